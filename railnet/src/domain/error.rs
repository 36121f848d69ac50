//! Domain error types.
//!
//! Every failure here is synchronous, local, and recoverable: it is raised
//! at the point of detection, reported to the immediate caller, and never
//! leaves partial state behind.

use super::ClockTime;

/// Validation and lookup failures across the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A line with this name is already registered
    #[error("line already exists: {0}")]
    LineExists(String),

    /// No line registered under this name
    #[error("no such line: {0}")]
    UnknownLine(String),

    /// No station under this name, or the station is not on the line
    #[error("no such station: {0}")]
    UnknownStation(String),

    /// No schedule departs the given station at the given time
    #[error("no schedule departing {station} at {time}")]
    UnknownSchedule { station: String, time: ClockTime },

    /// A candidate schedule failed validation
    #[error("invalid schedule: {0}")]
    InvalidSchedule(&'static str),

    /// No schedule satisfies the journey query
    #[error("no feasible route")]
    ImpossibleRoute,
}

//! Train identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A numeric train identifier.
///
/// Train ids order numerically, which fixes the iteration order of a
/// line's schedule map and breaks ties between trains passing a station
/// at the same time.
///
/// # Examples
///
/// ```
/// use railnet::domain::TrainId;
///
/// let t = TrainId::parse("100").unwrap();
/// assert_eq!(t.value(), 100);
///
/// // Numeric order, not text order
/// assert!(TrainId::new(20) < TrainId::new(100));
///
/// assert!(TrainId::parse("").is_err());
/// assert!(TrainId::parse("12a").is_err());
/// assert!(TrainId::parse("-4").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrainId(u32);

impl TrainId {
    /// Wrap a raw id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Parse an id from decimal text. Only ASCII digits are accepted.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        if s.is_empty() {
            return Err(InvalidTrainId {
                reason: "empty train id",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTrainId {
                reason: "train id must be decimal digits",
            });
        }
        s.parse::<u32>().map(Self).map_err(|_| InvalidTrainId {
            reason: "train id out of range",
        })
    }

    /// Returns the raw id.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

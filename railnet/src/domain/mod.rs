//! Domain types for the railway network.
//!
//! This module contains the core domain model. All leaf types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity; `Line` enforces the scheduling rules before any state
//! changes.

mod error;
mod line;
mod name;
mod schedule;
mod station;
mod time;
mod train;

pub use error::NetworkError;
pub use line::Line;
pub use name::NameKey;
pub use schedule::{Schedule, Stop};
pub use station::{Passage, Station};
pub use time::{ClockTime, TimeError};
pub use train::{InvalidTrainId, TrainId};

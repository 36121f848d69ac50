//! Schedule types.
//!
//! A `Schedule` is one train's ordered traversal of (station, time) pairs
//! along a line. Schedules are built by `Line` from a fully validated stop
//! list; nothing here re-checks the scheduling rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ClockTime, NameKey, TrainId};

/// A single (station, time) entry of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Station key
    pub station: NameKey,
    /// Time the train calls there
    pub time: ClockTime,
}

/// One train's timetable along a line.
///
/// Stops are kept in traversal order; a station-keyed map backs the
/// per-station time lookup. Times strictly increase along the sequence
/// and the stations follow the line's route in one direction, both
/// guaranteed by the owning line's validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    train: TrainId,
    stops: Vec<Stop>,
    times: BTreeMap<NameKey, ClockTime>,
}

impl Schedule {
    /// Build a schedule from a validated stop list.
    pub fn from_stops(train: TrainId, stops: Vec<Stop>) -> Self {
        let times = stops
            .iter()
            .map(|stop| (stop.station.clone(), stop.time))
            .collect();
        Self {
            train,
            stops,
            times,
        }
    }

    /// The train this schedule belongs to.
    pub fn train(&self) -> TrainId {
        self.train
    }

    /// Stops in traversal order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// First stop of the traversal.
    pub fn departure(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Station the schedule departs from.
    pub fn departure_station(&self) -> Option<&NameKey> {
        self.stops.first().map(|stop| &stop.station)
    }

    /// Time the schedule departs at.
    pub fn departure_time(&self) -> Option<ClockTime> {
        self.stops.first().map(|stop| stop.time)
    }

    /// Does the schedule call at this station?
    pub fn visits(&self, station: &NameKey) -> bool {
        self.times.contains_key(station)
    }

    /// Time the schedule calls at a station, if it does.
    pub fn time_at(&self, station: &NameKey) -> Option<ClockTime> {
        self.times.get(station).copied()
    }

    /// Does `a` come strictly before `b` in this schedule's own sequence?
    ///
    /// False when either station is not visited. This is the direction
    /// test for journey queries: a journey is only possible on a schedule
    /// that reaches the departure before the destination.
    pub fn in_order(&self, a: &NameKey, b: &NameKey) -> bool {
        let pos_a = self.stops.iter().position(|stop| &stop.station == a);
        let pos_b = self.stops.iter().position(|stop| &stop.station == b);
        match (pos_a, pos_b) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

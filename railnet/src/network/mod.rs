//! The network registry.
//!
//! `Network` owns every line and station in name-keyed arenas and mediates
//! all cross-entity operations: creating and removing lines (with cascading
//! station cleanup), resolving textual names, and delegating schedule
//! operations to the owning line. Queries return owned view values, never
//! the live entities.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::domain::{ClockTime, Line, NameKey, NetworkError, Schedule, Station, TrainId};

/// Read-only snapshot of a schedule, with display-cased station names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    pub train: TrainId,
    pub stops: Vec<(String, ClockTime)>,
}

/// Read-only snapshot of one train passage through a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageView {
    pub time: ClockTime,
    pub train: TrainId,
    pub line: String,
}

/// All lines and stations of one railway network.
///
/// Single-threaded by design; operations that touch several entities
/// update the owning collection and every back-reference before
/// returning, so the registry is consistent between any two calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    lines: HashMap<NameKey, Line>,
    stations: HashMap<NameKey, Station>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is a line with this name registered?
    pub fn has_line(&self, name: &str) -> bool {
        self.lines.contains_key(&NameKey::new(name))
    }

    /// Is a station with this name registered?
    pub fn has_station(&self, name: &str) -> bool {
        self.stations.contains_key(&NameKey::new(name))
    }

    /// Number of registered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of registered stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Register a line over the given station names, in order.
    ///
    /// Stations are materialized on first sight and reused afterwards;
    /// every station on the route gains a back-reference to the new line.
    pub fn insert_line<S: AsRef<str>>(
        &mut self,
        name: &str,
        station_names: &[S],
    ) -> Result<(), NetworkError> {
        let key = NameKey::new(name);
        if self.lines.contains_key(&key) {
            return Err(NetworkError::LineExists(name.to_string()));
        }

        let mut route = Vec::with_capacity(station_names.len());
        for station_name in station_names {
            let station_name = station_name.as_ref();
            let station_key = NameKey::new(station_name);
            let station = self
                .stations
                .entry(station_key.clone())
                .or_insert_with(|| Station::new(station_name));
            station.add_line(key.clone());
            route.push(station_key);
        }

        info!(line = name, stations = route.len(), "line inserted");
        self.lines.insert(key, Line::new(name, route));
        Ok(())
    }

    /// Remove a line, its schedules, and its traces on every station.
    ///
    /// Stations left without any line are dropped from the registry.
    pub fn remove_line(&mut self, name: &str) -> Result<(), NetworkError> {
        let key = NameKey::new(name);
        let line = self
            .lines
            .remove(&key)
            .ok_or_else(|| NetworkError::UnknownLine(name.to_string()))?;

        for station_key in line.route() {
            if let Some(station) = self.stations.get_mut(station_key) {
                station.remove_line(&key);
                if station.is_abandoned() {
                    self.stations.remove(station_key);
                }
            }
        }
        info!(line = name, "line removed");
        Ok(())
    }

    /// Station display names along a line's route, in order.
    pub fn consult_line(&self, name: &str) -> Result<Vec<&str>, NetworkError> {
        let line = self
            .lines
            .get(&NameKey::new(name))
            .ok_or_else(|| NetworkError::UnknownLine(name.to_string()))?;
        Ok(line
            .route()
            .iter()
            .map(|key| self.station_display(key))
            .collect())
    }

    /// Display names of the lines serving a station, in key order.
    pub fn consult_station(&self, name: &str) -> Result<Vec<&str>, NetworkError> {
        let station = self
            .stations
            .get(&NameKey::new(name))
            .ok_or_else(|| NetworkError::UnknownStation(name.to_string()))?;
        Ok(station.lines().map(|key| self.line_display(key)).collect())
    }

    /// Validate and insert a schedule on a line.
    ///
    /// The line must exist; every named station must be known to the
    /// network (InvalidSchedule otherwise); the rest of the rules live in
    /// [`Line::insert_schedule`].
    pub fn insert_schedule<S: AsRef<str>>(
        &mut self,
        line_name: &str,
        train: TrainId,
        stops: &[(S, ClockTime)],
    ) -> Result<(), NetworkError> {
        let Network { lines, stations } = self;
        let line = lines
            .get_mut(&NameKey::new(line_name))
            .ok_or_else(|| NetworkError::UnknownLine(line_name.to_string()))?;

        let mut resolved = Vec::with_capacity(stops.len());
        for (station_name, time) in stops {
            let station_key = NameKey::new(station_name.as_ref());
            if !stations.contains_key(&station_key) {
                return Err(NetworkError::InvalidSchedule("unknown station"));
            }
            resolved.push((station_key, *time));
        }

        line.insert_schedule(stations, train, resolved)
    }

    /// Remove the schedule of a line departing (station, time).
    pub fn remove_schedule(
        &mut self,
        line_name: &str,
        station_name: &str,
        time: ClockTime,
    ) -> Result<(), NetworkError> {
        let Network { lines, stations } = self;
        let line = lines
            .get_mut(&NameKey::new(line_name))
            .ok_or_else(|| NetworkError::UnknownLine(line_name.to_string()))?;

        let station_key = NameKey::new(station_name);
        if !stations.contains_key(&station_key) {
            return Err(NetworkError::UnknownSchedule {
                station: station_name.to_string(),
                time,
            });
        }
        line.remove_schedule(stations, &station_key, time)
    }

    /// Schedules departing a terminus of a line, ascending by time.
    pub fn consult_schedules(
        &self,
        line_name: &str,
        station_name: &str,
    ) -> Result<Vec<ScheduleView>, NetworkError> {
        let line = self
            .lines
            .get(&NameKey::new(line_name))
            .ok_or_else(|| NetworkError::UnknownLine(line_name.to_string()))?;

        let station_key = NameKey::new(station_name);
        if !self.stations.contains_key(&station_key) {
            return Err(NetworkError::UnknownStation(station_name.to_string()));
        }
        let schedules = line.departures(&station_key)?;
        Ok(schedules
            .into_iter()
            .map(|schedule| self.schedule_view(schedule))
            .collect())
    }

    /// Trains passing a station, ordered by (time, train id).
    pub fn station_trains(&self, name: &str) -> Result<Vec<PassageView>, NetworkError> {
        let station = self
            .stations
            .get(&NameKey::new(name))
            .ok_or_else(|| NetworkError::UnknownStation(name.to_string()))?;
        Ok(station
            .passages()
            .map(|(passage, line_key)| PassageView {
                time: passage.time,
                train: passage.train,
                line: self.line_display(line_key).to_string(),
            })
            .collect())
    }

    /// Best schedule between two stations of a line arriving at or before
    /// `deadline`.
    pub fn best_schedule(
        &self,
        line_name: &str,
        departure: &str,
        destination: &str,
        deadline: ClockTime,
    ) -> Result<ScheduleView, NetworkError> {
        let line = self
            .lines
            .get(&NameKey::new(line_name))
            .ok_or_else(|| NetworkError::UnknownLine(line_name.to_string()))?;
        let schedule = line.best_schedule(
            &NameKey::new(departure),
            &NameKey::new(destination),
            deadline,
        )?;
        Ok(self.schedule_view(schedule))
    }

    fn schedule_view(&self, schedule: &Schedule) -> ScheduleView {
        ScheduleView {
            train: schedule.train(),
            stops: schedule
                .stops()
                .iter()
                .map(|stop| (self.station_display(&stop.station).to_string(), stop.time))
                .collect(),
        }
    }

    /// Display name for a station key; falls back to the key itself if
    /// the arena has no entry (unreachable in a consistent registry).
    fn station_display<'a>(&'a self, key: &'a NameKey) -> &'a str {
        self.stations
            .get(key)
            .map(Station::name)
            .unwrap_or_else(|| key.as_str())
    }

    fn line_display<'a>(&'a self, key: &'a NameKey) -> &'a str {
        self.lines
            .get(key)
            .map(Line::name)
            .unwrap_or_else(|| key.as_str())
    }
}

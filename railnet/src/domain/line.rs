//! Lines and their scheduling rules.
//!
//! A line is a named ordered station sequence whose first and last entries
//! are its termini. It owns the schedules of the trains running on it and
//! is the single place where the scheduling rules are enforced:
//!
//! - a schedule departs from a terminus and may run in either direction;
//! - its stations follow the route in that direction, without wraparound;
//! - its times strictly increase stop to stop;
//! - it never overtakes another schedule running the same direction.
//!
//! Validation completes before any state changes, so a rejected schedule
//! leaves the line and its stations untouched.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::{ClockTime, NameKey, NetworkError, Schedule, Station, Stop, TrainId};

/// A named line of the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    name: String,
    key: NameKey,
    route: Vec<NameKey>,
    schedules: BTreeMap<TrainId, Schedule>,
}

impl Line {
    /// Create a line over an ordered station sequence.
    pub fn new(name: &str, route: Vec<NameKey>) -> Self {
        Self {
            name: name.to_string(),
            key: NameKey::new(name),
            route,
            schedules: BTreeMap::new(),
        }
    }

    /// Display name (casing as registered).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key.
    pub fn key(&self) -> &NameKey {
        &self.key
    }

    /// Station keys in route order.
    pub fn route(&self) -> &[NameKey] {
        &self.route
    }

    /// Is `station` one of the two termini?
    pub fn is_terminus(&self, station: &NameKey) -> bool {
        self.route.first() == Some(station) || self.route.last() == Some(station)
    }

    /// Is `station` anywhere on the route?
    pub fn serves(&self, station: &NameKey) -> bool {
        self.route.contains(station)
    }

    /// Schedules in train-id order.
    pub fn schedules(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.values()
    }

    /// Validate and insert a schedule for `train`.
    ///
    /// `stops` must already be resolved against the network's station
    /// registry. Re-inserting a train id replaces its previous schedule,
    /// deregistering the old passages first. Each visited station in the
    /// arena records a (time, train) passage against this line.
    pub fn insert_schedule(
        &mut self,
        stations: &mut HashMap<NameKey, Station>,
        train: TrainId,
        stops: Vec<(NameKey, ClockTime)>,
    ) -> Result<(), NetworkError> {
        let Some((first_station, _)) = stops.first() else {
            return Err(NetworkError::InvalidSchedule("schedule has no stops"));
        };
        if !self.is_terminus(first_station) {
            return Err(NetworkError::InvalidSchedule(
                "first stop is not a terminus of the line",
            ));
        }
        self.validate(&stops)?;

        if let Some(old) = self.schedules.remove(&train) {
            self.deregister(stations, &old);
        }

        let schedule = Schedule::from_stops(
            train,
            stops.into_iter()
                .map(|(station, time)| Stop { station, time })
                .collect(),
        );
        for stop in schedule.stops() {
            if let Some(station) = stations.get_mut(&stop.station) {
                station.add_passage(stop.time, train, self.key.clone());
            }
        }
        debug!(line = %self.name, %train, stops = schedule.stops().len(), "schedule inserted");
        self.schedules.insert(train, schedule);
        Ok(())
    }

    /// Remove the schedule departing `station` exactly at `time`.
    ///
    /// Scans the schedules in train-id order and removes the first match,
    /// deregistering its passages from every station it visited.
    pub fn remove_schedule(
        &mut self,
        stations: &mut HashMap<NameKey, Station>,
        station: &NameKey,
        time: ClockTime,
    ) -> Result<(), NetworkError> {
        let found = self
            .schedules
            .iter()
            .find(|(_, schedule)| {
                schedule.departure_station() == Some(station)
                    && schedule.departure_time() == Some(time)
            })
            .map(|(train, _)| *train);

        let Some(train) = found else {
            return Err(NetworkError::UnknownSchedule {
                station: station.as_str().to_string(),
                time,
            });
        };
        if let Some(schedule) = self.schedules.remove(&train) {
            self.deregister(stations, &schedule);
        }
        debug!(line = %self.name, %train, "schedule removed");
        Ok(())
    }

    /// Schedules departing exactly `station`, ascending by departure time.
    ///
    /// Fails unless `station` is a terminus; intermediate stations have
    /// passages, not departures.
    pub fn departures(&self, station: &NameKey) -> Result<Vec<&Schedule>, NetworkError> {
        if !self.is_terminus(station) {
            return Err(NetworkError::UnknownStation(station.as_str().to_string()));
        }
        let mut out: Vec<&Schedule> = self
            .schedules
            .values()
            .filter(|schedule| schedule.departure_station() == Some(station))
            .collect();
        // Stable sort keeps train-id order for equal departure times
        out.sort_by_key(|schedule| schedule.departure_time());
        Ok(out)
    }

    /// Best schedule from `departure` to `destination` arriving at or
    /// before `deadline`.
    ///
    /// Considers schedules visiting both stations in that order in their
    /// own direction, and picks the one arriving latest within the
    /// deadline; the lowest train id wins an exact tie.
    pub fn best_schedule(
        &self,
        departure: &NameKey,
        destination: &NameKey,
        deadline: ClockTime,
    ) -> Result<&Schedule, NetworkError> {
        if !self.serves(departure) {
            return Err(NetworkError::UnknownStation(departure.as_str().to_string()));
        }
        if !self.serves(destination) {
            return Err(NetworkError::ImpossibleRoute);
        }

        let mut best: Option<(&Schedule, ClockTime)> = None;
        for schedule in self.schedules.values() {
            let Some(arrival) = schedule.time_at(destination) else {
                continue;
            };
            if !schedule.visits(departure) || !schedule.in_order(departure, destination) {
                continue;
            }
            if deadline < arrival {
                continue;
            }
            match best {
                Some((_, held)) if arrival <= held => {}
                _ => best = Some((schedule, arrival)),
            }
        }
        best.map(|(schedule, _)| schedule)
            .ok_or(NetworkError::ImpossibleRoute)
    }

    /// Remove this line's passages for `schedule` from every station it
    /// visited.
    fn deregister(&self, stations: &mut HashMap<NameKey, Station>, schedule: &Schedule) {
        for stop in schedule.stops() {
            if let Some(station) = stations.get_mut(&stop.station) {
                station.remove_passage(stop.time, schedule.train());
            }
        }
    }

    /// Check route order, travel times, and the non-overtake rule.
    ///
    /// The walk direction comes from which terminus the first stop
    /// matches. The scan position only ever advances (or recedes) and a
    /// stop not found before the route ends in that direction is invalid,
    /// so candidate stops need not be every station of the line but must
    /// appear in line order.
    fn validate(&self, stops: &[(NameKey, ClockTime)]) -> Result<(), NetworkError> {
        let forward = self.route.first() == stops.first().map(|(station, _)| station);
        let mut pos = if forward { 0 } else { self.route.len() - 1 };
        let (departure_station, departure_time) = &stops[0];

        for (i, (station, time)) in stops.iter().enumerate() {
            if forward {
                while pos < self.route.len() && self.route[pos] != *station {
                    pos += 1;
                }
                if pos == self.route.len() {
                    return Err(NetworkError::InvalidSchedule(
                        "stop is off the route in the direction of travel",
                    ));
                }
            } else {
                let mut found = false;
                loop {
                    if self.route[pos] == *station {
                        found = true;
                        break;
                    }
                    if pos == 0 {
                        break;
                    }
                    pos -= 1;
                }
                if !found {
                    return Err(NetworkError::InvalidSchedule(
                        "stop is off the route in the direction of travel",
                    ));
                }
            }

            if i > 0 {
                if !stops[i - 1].1.precedes(*time) {
                    return Err(NetworkError::InvalidSchedule(
                        "times must strictly increase",
                    ));
                }
                if self.overtaken(station, *time, departure_station, *departure_time) {
                    return Err(NetworkError::InvalidSchedule(
                        "overtakes an existing schedule",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Would a stop at (`station`, `time`) conflict with an existing
    /// same-direction schedule?
    ///
    /// Relative departure order must be preserved at every shared station:
    /// an existing schedule departing at or before the candidate must
    /// arrive strictly earlier, one departing later must arrive strictly
    /// later. Equal arrival times violate both.
    fn overtaken(
        &self,
        station: &NameKey,
        time: ClockTime,
        departure_station: &NameKey,
        departure_time: ClockTime,
    ) -> bool {
        let forward = self.route.first() == Some(departure_station);

        for existing in self.schedules.values() {
            let same_direction =
                (existing.departure_station() == self.route.first()) == forward;
            if !same_direction {
                continue;
            }
            let Some(arrival) = existing.time_at(station) else {
                continue;
            };
            let Some(existing_departure) = existing.departure_time() else {
                continue;
            };
            if existing_departure <= departure_time {
                if arrival >= time {
                    return true;
                }
            } else if arrival <= time {
                return true;
            }
        }
        false
    }
}

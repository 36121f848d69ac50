//! Station state.
//!
//! A station holds non-owning back-references: the set of lines serving it
//! and an index of the train passages through it. Both are maintained by
//! the owning side (`Network` for lines, `Line` for passages) in lockstep
//! with every insert and remove.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{ClockTime, NameKey, TrainId};

/// Composite key of the passage index: a train calling at a given time.
///
/// Ordered by time first, train id second, so trains sharing a time still
/// form a strict order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Passage {
    pub time: ClockTime,
    pub train: TrainId,
}

/// A named node of the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    name: String,
    key: NameKey,
    lines: BTreeSet<NameKey>,
    #[serde(with = "passages_as_entries")]
    passages: BTreeMap<Passage, NameKey>,
}

impl Station {
    /// Create a station, keeping `name` as the display form.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: NameKey::new(name),
            lines: BTreeSet::new(),
            passages: BTreeMap::new(),
        }
    }

    /// Display name (first-seen casing).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key.
    pub fn key(&self) -> &NameKey {
        &self.key
    }

    /// Register a line serving this station.
    pub fn add_line(&mut self, line: NameKey) {
        self.lines.insert(line);
    }

    /// Deregister a line, purging every passage it recorded here.
    pub fn remove_line(&mut self, line: &NameKey) {
        self.lines.remove(line);
        self.passages.retain(|_, owner| owner != line);
    }

    /// Keys of the lines serving this station, in key order.
    pub fn lines(&self) -> impl Iterator<Item = &NameKey> {
        self.lines.iter()
    }

    /// A station with no lines is abandoned and gets dropped from the
    /// registry by its caller.
    pub fn is_abandoned(&self) -> bool {
        self.lines.is_empty()
    }

    /// Record a train passing at `time` on behalf of `line`.
    pub fn add_passage(&mut self, time: ClockTime, train: TrainId, line: NameKey) {
        self.passages.insert(Passage { time, train }, line);
    }

    /// Remove the passage with this exact (time, train) key, if present.
    pub fn remove_passage(&mut self, time: ClockTime, train: TrainId) {
        self.passages.remove(&Passage { time, train });
    }

    /// Passages in (time, train) order, with the line that recorded each.
    pub fn passages(&self) -> impl Iterator<Item = (&Passage, &NameKey)> {
        self.passages.iter()
    }
}

/// JSON object keys must be strings, so the composite-keyed passage map
/// serializes as a sequence of entries.
mod passages_as_entries {
    use super::{NameKey, Passage};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<Passage, NameKey>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<BTreeMap<Passage, NameKey>, D::Error> {
        let entries = Vec::<(Passage, NameKey)>::deserialize(de)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> NameKey {
        NameKey::new(s)
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn new_station_is_abandoned() {
        let station = Station::new("Lisbon");
        assert_eq!(station.name(), "Lisbon");
        assert_eq!(station.key(), &key("LISBON"));
        assert!(station.is_abandoned());
    }

    #[test]
    fn line_membership() {
        let mut station = Station::new("Lisbon");
        station.add_line(key("Green"));
        station.add_line(key("Red"));
        assert!(!station.is_abandoned());

        station.remove_line(&key("Green"));
        assert!(!station.is_abandoned());
        station.remove_line(&key("Red"));
        assert!(station.is_abandoned());
    }

    #[test]
    fn lines_iterate_in_key_order() {
        let mut station = Station::new("Lisbon");
        station.add_line(key("red"));
        station.add_line(key("Azure"));
        station.add_line(key("GREEN"));

        let lines: Vec<&str> = station.lines().map(NameKey::as_str).collect();
        assert_eq!(lines, ["AZURE", "GREEN", "RED"]);
    }

    #[test]
    fn passages_order_by_time_then_train() {
        let mut station = Station::new("Lisbon");
        station.add_passage(time("09:00"), TrainId::new(200), key("Green"));
        station.add_passage(time("08:00"), TrainId::new(300), key("Green"));
        station.add_passage(time("08:00"), TrainId::new(100), key("Red"));

        let order: Vec<(u32, u32)> = station
            .passages()
            .map(|(p, _)| (p.time.hour() * 60 + p.time.minute(), p.train.value()))
            .collect();
        assert_eq!(order, [(480, 100), (480, 300), (540, 200)]);
    }

    #[test]
    fn remove_passage_by_exact_key() {
        let mut station = Station::new("Lisbon");
        station.add_passage(time("08:00"), TrainId::new(100), key("Green"));
        station.add_passage(time("09:00"), TrainId::new(100), key("Red"));

        station.remove_passage(time("08:00"), TrainId::new(100));
        let remaining: Vec<&NameKey> = station.passages().map(|(_, line)| line).collect();
        assert_eq!(remaining, [&key("Red")]);

        // Missing key is a no-op
        station.remove_passage(time("10:00"), TrainId::new(100));
        assert_eq!(station.passages().count(), 1);
    }

    #[test]
    fn remove_line_purges_its_passages() {
        let mut station = Station::new("Lisbon");
        station.add_line(key("Green"));
        station.add_line(key("Red"));
        station.add_passage(time("08:00"), TrainId::new(100), key("Green"));
        station.add_passage(time("09:00"), TrainId::new(200), key("Red"));
        station.add_passage(time("10:00"), TrainId::new(300), key("Green"));

        station.remove_line(&key("Green"));

        let remaining: Vec<u32> = station.passages().map(|(p, _)| p.train.value()).collect();
        assert_eq!(remaining, [200]);
    }
}

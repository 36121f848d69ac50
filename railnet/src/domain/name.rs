//! Case-insensitive name keys.
//!
//! Line and station names are free text, possibly multi-word, and match
//! case-insensitively: "Green Line" and "GREEN LINE" address the same
//! entity. A `NameKey` is the uppercase-normalized form used wherever a
//! name is an index key; entities keep the display form they were first
//! created with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Uppercase-normalized lookup key for a line or station name.
///
/// Two keys are equal iff the uppercase forms of their source names are
/// equal. Ordering is the ordering of the uppercase form, which gives the
/// listing order for the lines serving a station.
///
/// # Examples
///
/// ```
/// use railnet::domain::NameKey;
///
/// let a = NameKey::new("Green Line");
/// let b = NameKey::new("GREEN line");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "GREEN LINE");
///
/// assert_ne!(NameKey::new("North"), NameKey::new("South"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NameKey(String);

impl NameKey {
    /// Build the key for a name.
    pub fn new(name: &str) -> Self {
        Self(name.to_uppercase())
    }

    /// Returns the normalized form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameKey({})", self.0)
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_equality() {
        assert_eq!(NameKey::new("lisbon"), NameKey::new("LISBON"));
        assert_eq!(NameKey::new("LiSbOn"), NameKey::new("lisBON"));
        assert_ne!(NameKey::new("lisbon"), NameKey::new("porto"));
    }

    #[test]
    fn multi_word_names() {
        let key = NameKey::new("new york central");
        assert_eq!(key.as_str(), "NEW YORK CENTRAL");
        assert_eq!(key, NameKey::new("New York Central"));
    }

    #[test]
    fn ordering_by_uppercase_form() {
        let mut keys = vec![
            NameKey::new("cyan"),
            NameKey::new("Azure"),
            NameKey::new("BLUE"),
        ];
        keys.sort();
        let names: Vec<&str> = keys.iter().map(NameKey::as_str).collect();
        assert_eq!(names, ["AZURE", "BLUE", "CYAN"]);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(NameKey::new("Central"));
        assert!(set.contains(&NameKey::new("CENTRAL")));
        assert!(!set.contains(&NameKey::new("Coastal")));
    }
}

// src/model/dependencies.rs

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::TaskId;

/// Ordered set of predecessor ids.
///
/// Externally this is a comma-joined string (`"A, B"`); it is split here, at
/// the input boundary, and joined again only when serialized. Insertion order
/// is preserved and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    ids: Vec<TaskId>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id, returning `false` if it was blank or already present.
    pub fn insert(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() || self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|d| d == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromStr for DependencySet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split(',').collect())
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ids.join(","))
    }
}

impl<S: Into<TaskId>> FromIterator<S> for DependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Serialize for DependencySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DependencySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept the joined string the table widget produces, and a plain
        // list for hand-written plan files.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Joined(s) => s.split(',').collect(),
            Repr::List(ids) => ids.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_trims_and_dedupes() {
        let set: DependencySet = " A, B ,,A,C ".parse().unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(set.to_string(), "A,B,C");
    }

    #[test]
    fn empty_string_is_empty_set() {
        let set: DependencySet = "".parse().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn deserializes_from_string_or_list() {
        let joined: DependencySet = serde_json::from_str(r#""A,B""#).unwrap();
        let list: DependencySet = serde_json::from_str(r#"["A", "B", "A"]"#).unwrap();
        assert_eq!(joined, list);
    }
}

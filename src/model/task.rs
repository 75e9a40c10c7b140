// src/model/task.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;
use crate::model::dependencies::DependencySet;
use crate::types::TaskId;

/// One row of the caller's flat task list.
///
/// Field names follow the external camelCase representation (`parentId`).
/// Anything the engine does not know about (`cost`, `priority`, custom
/// columns) rides along in `extra` and is serialized back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    #[serde(default)]
    pub name: String,

    /// Inclusive start, `YYYY-MM-DD`. Kept as text so malformed input can be
    /// passed through rather than rejected.
    #[serde(default, deserialize_with = "date_text")]
    pub start: String,

    /// Inclusive end, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "date_text")]
    pub end: String,

    /// Completion percentage, 0..=100.
    #[serde(default)]
    pub progress: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,

    /// Finish-to-start predecessors.
    #[serde(default)]
    pub dependencies: DependencySet,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            start: start.into(),
            end: end.into(),
            progress: 0,
            parent_id: None,
            dependencies: DependencySet::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Parent id, treating an empty string the same as no parent.
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Inclusive calendar-day duration, 0 when the dates are unusable.
    pub fn duration(&self) -> i64 {
        dates::duration_days(&self.start, &self.end)
    }
}

/// A date as written in a plan: quoted text, or a bare TOML date/datetime.
#[derive(Deserialize)]
#[serde(untagged)]
enum DateRepr {
    Text(String),
    Toml(toml::value::Datetime),
}

/// Read either form into `YYYY-MM-DD` text. A TOML datetime keeps only its
/// date part; a bare time stays as written and ends up unscheduled.
fn date_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match DateRepr::deserialize(deserializer)? {
        DateRepr::Text(text) => text,
        DateRepr::Toml(datetime) => match datetime.date {
            Some(d) => format!("{:04}-{:02}-{:02}", d.year, d.month, d.day),
            None => datetime.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passenger_fields_survive_a_json_round_trip() {
        let raw = r#"{
            "id": "A",
            "name": "Design",
            "start": "2024-01-01",
            "end": "2024-01-03",
            "progress": 40,
            "parentId": "P",
            "dependencies": "X, Y",
            "cost": 1200,
            "priority": "high"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.parent(), Some("P"));
        assert_eq!(task.dependencies.to_string(), "X,Y");
        assert_eq!(task.extra["cost"], serde_json::json!(1200));
        assert_eq!(task.duration(), 3);

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["priority"], "high");
        assert_eq!(back["parentId"], "P");
        assert_eq!(back["dependencies"], "X,Y");
    }

    #[test]
    fn bare_toml_dates_become_text() {
        let raw = "id = \"A\"\nstart = 2024-03-01\nend = 2024-03-04T17:30:00Z\n";
        let task: Task = toml::from_str(raw).unwrap();
        assert_eq!(task.start, "2024-03-01");
        assert_eq!(task.end, "2024-03-04");
        assert_eq!(task.duration(), 4);
    }

    #[test]
    fn empty_parent_means_root() {
        let mut task = Task::new("A", "2024-01-01", "2024-01-01");
        task.parent_id = Some(String::new());
        assert_eq!(task.parent(), None);
    }
}

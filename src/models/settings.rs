//! Event settings model
//!
//! The backend exposes settings as a flat map of string values. `EventSettings`
//! is the typed, immutable view of that map; a fresh response is merged into
//! the previous value field by field, so a missing or empty key never blanks a
//! known value.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use crate::config::EventDefaultsConfig;

pub const KEY_NAME: &str = "event_name";
pub const KEY_DATE: &str = "event_date";
pub const KEY_LOCATION: &str = "event_location";
pub const KEY_WORKLOAD: &str = "event_workload";
pub const KEY_CAPACITY_DAY1: &str = "vagas_dia1";
pub const KEY_CAPACITY_DAY2: &str = "vagas_dia2";

/// Raw settings as exchanged with `GET/PUT /settings`
pub type SettingsMap = BTreeMap<String, Value>;

/// Event metadata shown by every public-facing component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettings {
    pub name: String,
    pub date: String,
    pub location: String,
    pub workload_hours: u32,
    pub capacity_day1: u32,
    pub capacity_day2: u32,
}

impl EventSettings {
    /// Return a copy with every non-empty field of `map` applied
    pub fn merged(&self, map: &SettingsMap) -> EventSettings {
        let mut next = self.clone();

        if let Some(name) = text_field(map, KEY_NAME) {
            next.name = name;
        }
        if let Some(date) = text_field(map, KEY_DATE) {
            next.date = date;
        }
        if let Some(location) = text_field(map, KEY_LOCATION) {
            next.location = location;
        }
        if let Some(hours) = number_field(map, KEY_WORKLOAD) {
            next.workload_hours = hours;
        }
        if let Some(capacity) = number_field(map, KEY_CAPACITY_DAY1) {
            next.capacity_day1 = capacity;
        }
        if let Some(capacity) = number_field(map, KEY_CAPACITY_DAY2) {
            next.capacity_day2 = capacity;
        }

        next
    }

    /// Wire representation for `PUT /settings`
    pub fn to_map(&self) -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert(KEY_NAME.to_string(), Value::String(self.name.clone()));
        map.insert(KEY_DATE.to_string(), Value::String(self.date.clone()));
        map.insert(KEY_LOCATION.to_string(), Value::String(self.location.clone()));
        map.insert(KEY_WORKLOAD.to_string(), Value::String(self.workload_hours.to_string()));
        map.insert(KEY_CAPACITY_DAY1.to_string(), Value::String(self.capacity_day1.to_string()));
        map.insert(KEY_CAPACITY_DAY2.to_string(), Value::String(self.capacity_day2.to_string()));
        map
    }
}

impl From<&EventDefaultsConfig> for EventSettings {
    fn from(config: &EventDefaultsConfig) -> Self {
        Self {
            name: config.name.clone(),
            date: config.date.clone(),
            location: config.location.clone(),
            workload_hours: config.workload_hours,
            capacity_day1: config.capacity_day1,
            capacity_day2: config.capacity_day2,
        }
    }
}

impl Default for EventSettings {
    fn default() -> Self {
        Self::from(&crate::config::Settings::default().event)
    }
}

/// String view of a settings value; numbers are accepted as their decimal text
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(map: &SettingsMap, key: &str) -> Option<String> {
    map.get(key)
        .and_then(value_text)
        .filter(|s| !s.trim().is_empty())
}

fn number_field(map: &SettingsMap, key: &str) -> Option<u32> {
    let text = text_field(map, key)?;
    match text.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(key = key, value = %text, "Ignoring non-numeric settings value");
            None
        }
    }
}

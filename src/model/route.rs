use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a bus loop. Compared by string equality only.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteName(String);

impl RouteName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RouteName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A departure as written in the timetable, e.g. "7:05".
///
/// Warning: the source data is 12-hour wall-clock without AM/PM, and a list can wrap
/// from "12:55" to "1:10". This is kept as an opaque display string on purpose and is
/// never turned into a clock time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DepartureTime(String);

impl DepartureTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DepartureTime {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DepartureTime {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Route metadata from the stop document. `route_name` is what stops list in their `routes`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BusRoute {
    pub route_number: String,
    pub route_name: RouteName,
    #[serde(default)]
    pub color: Option<String>,
}

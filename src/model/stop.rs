use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::route::{DepartureTime, RouteName};

/// Departure times per route, in the order the timetable lists them.
pub type Schedules = HashMap<RouteName, Vec<DepartureTime>>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StopId {
    Number(u64),
    Text(String),
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopId::Number(n) => write!(f, "{n}"),
            StopId::Text(s) => f.write_str(s),
        }
    }
}

/// Decimal degrees
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    /// Code posted at the stop. Unique when present.
    #[serde(default)]
    pub stop_code: Option<String>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default = "accessible_by_default")]
    pub accessible: bool,
    /// Order matters for the route badges shown in the popup.
    #[serde(default)]
    pub routes: Vec<RouteName>,
    #[serde(default, alias = "schedule")]
    pub schedules: Schedules,
}

fn accessible_by_default() -> bool {
    true
}

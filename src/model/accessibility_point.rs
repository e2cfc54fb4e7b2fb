use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stop::{Location, StopId};

/// A ramp, elevator or entrance shown on the map. Unrelated to bus stops.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessibilityPoint {
    pub id: StopId,
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PointKind {
    Entrance,
    Elevator,
    Ramp,
    Other(String),
}

impl PointKind {
    pub fn label(&self) -> &str {
        match self {
            PointKind::Entrance => "entrance",
            PointKind::Elevator => "elevator",
            PointKind::Ramp => "ramp",
            PointKind::Other(other) => other,
        }
    }
}

impl From<String> for PointKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            // The backend spells it out
            "entrance" | "accessible_entrance" => PointKind::Entrance,
            "elevator" => PointKind::Elevator,
            "ramp" => PointKind::Ramp,
            _ => PointKind::Other(value),
        }
    }
}

impl From<PointKind> for String {
    fn from(value: PointKind) -> Self {
        match value {
            PointKind::Other(other) => other,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_kind_known_and_open_values() {
        assert_eq!(PointKind::from("ramp".to_string()), PointKind::Ramp);
        assert_eq!(
            PointKind::from("accessible_entrance".to_string()),
            PointKind::Entrance
        );
        assert_eq!(
            PointKind::from("tactile_paving".to_string()),
            PointKind::Other("tactile_paving".to_string())
        );
        assert_eq!(String::from(PointKind::Elevator), "elevator");
    }

    #[test]
    fn accessibility_point_reads_type_field() {
        let point: AccessibilityPoint = serde_json::from_str(
            r#"{
                "id": 2,
                "name": "Elevator - Science Building",
                "latitude": 43.0491,
                "longitude": -76.1484,
                "type": "elevator",
                "description": "Main elevator, ground floor"
            }"#,
        )
        .unwrap();

        assert_eq!(point.kind, PointKind::Elevator);
        assert_eq!(point.building_name, None);
        assert_eq!(point.created_at, None);
    }
}

//! Loads the stop document the map is drawn from and reports integrity problems in it

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{
    AccessibilityPoint, BusRoute, DepartureTime, Location, PointKind, RouteName, Stop, StopId,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StopDocument {
    #[serde(default)]
    pub accessibility_points: Vec<AccessibilityPoint>,
    #[serde(default)]
    pub bus_stops: Vec<Stop>,
    #[serde(default)]
    pub routes: Vec<BusRoute>,
}

impl StopDocument {
    /// Marker colors for the routes that have one
    pub fn route_colors(&self) -> impl Iterator<Item = (RouteName, String)> + '_ {
        self.routes.iter().filter_map(|route| {
            route
                .color
                .clone()
                .map(|color| (route.route_name.clone(), color))
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("error reading the stop document {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing the stop document {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_document(path: &Path) -> Result<StopDocument, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_document(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "got {} bus stops and {} accessibility points",
        document.bus_stops.len(),
        document.accessibility_points.len()
    );

    Ok(document)
}

pub fn parse_document(contents: &str) -> Result<StopDocument, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Built-in campus data, used when no document is given
pub fn sample_document() -> StopDocument {
    StopDocument {
        accessibility_points: vec![
            sample_point(
                1,
                "Accessible Entrance - Student Center",
                Location::new(43.0481, -76.1474),
                PointKind::Entrance,
                "Automatic door with ramp access",
            ),
            sample_point(
                2,
                "Elevator - Science Building",
                Location::new(43.0491, -76.1484),
                PointKind::Elevator,
                "Main elevator, ground floor",
            ),
            sample_point(
                3,
                "Accessible Ramp - Library",
                Location::new(43.0471, -76.1494),
                PointKind::Ramp,
                "Ramp access to main entrance",
            ),
        ],
        bus_stops: vec![
            sample_stop(
                1,
                "Main Campus Stop",
                "MCS",
                Location::new(43.0471, -76.1464),
                &[
                    ("Orange Loop", &["7:00", "7:30", "8:00", "12:00", "1:00"]),
                    ("Blue Loop", &["6:40", "7:20", "8:00", "12:20", "1:20"]),
                ],
            ),
            sample_stop(
                2,
                "Engineering Quad",
                "EQ",
                Location::new(43.0501, -76.1454),
                &[("Blue Loop", &["6:45", "7:25", "8:05", "12:25", "1:25"])],
            ),
            sample_stop(
                3,
                "South Campus Apartments",
                "SCA",
                Location::new(43.0423, -76.1391),
                &[("Orange Loop", &["6:50", "7:20", "7:50", "11:50", "12:50"])],
            ),
        ],
        routes: vec![
            BusRoute {
                route_number: "1".to_string(),
                route_name: RouteName::from("Blue Loop"),
                color: Some("#2563eb".to_string()),
            },
            BusRoute {
                route_number: "2".to_string(),
                route_name: RouteName::from("Orange Loop"),
                color: Some("#f97316".to_string()),
            },
        ],
    }
}

fn sample_point(
    id: u64,
    name: &str,
    location: Location,
    kind: PointKind,
    description: &str,
) -> AccessibilityPoint {
    AccessibilityPoint {
        id: StopId::Number(id),
        name: name.to_string(),
        location,
        kind,
        description: Some(description.to_string()),
        building_name: None,
        created_at: None,
    }
}

/// Routes are taken in the order the timetables are given
fn sample_stop(
    id: u64,
    name: &str,
    stop_code: &str,
    location: Location,
    timetables: &[(&str, &[&str])],
) -> Stop {
    Stop {
        id: StopId::Number(id),
        name: name.to_string(),
        stop_code: Some(stop_code.to_string()),
        location,
        accessible: true,
        routes: timetables.iter().map(|(r, _)| RouteName::from(*r)).collect(),
        schedules: timetables
            .iter()
            .map(|(r, times)| {
                (
                    RouteName::from(*r),
                    times.iter().map(|t| DepartureTime::from(*t)).collect(),
                )
            })
            .collect(),
    }
}

static DEPARTURE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1[0-2]|[1-9]):[0-5][0-9]$").expect("valid regex"));

/// Something odd in the source data. None of these stop the map from being drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataWarning {
    DuplicateStopId { id: StopId },
    DuplicateStopCode { code: String },
    NoRoutes { stop: StopId },
    MissingSchedule { stop: StopId, route: RouteName },
    UnlistedSchedule { stop: StopId, route: RouteName },
    OddDepartureFormat {
        stop: StopId,
        route: RouteName,
        departure: DepartureTime,
    },
    InvalidLocation { name: String },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::DuplicateStopId { id } => write!(f, "stop id {id} is used more than once"),
            DataWarning::DuplicateStopCode { code } => {
                write!(f, "stop code {code:?} is used more than once")
            }
            DataWarning::NoRoutes { stop } => write!(f, "stop {stop} isn't served by any route"),
            DataWarning::MissingSchedule { stop, route } => {
                write!(f, "stop {stop} lists {route} but has no schedule for it")
            }
            DataWarning::UnlistedSchedule { stop, route } => {
                write!(f, "stop {stop} has a schedule for {route} which it doesn't list")
            }
            DataWarning::OddDepartureFormat {
                stop,
                route,
                departure,
            } => write!(
                f,
                "stop {stop} route {route} has departure {departure:?} not in H:MM form"
            ),
            DataWarning::InvalidLocation { name } => {
                write!(f, "{name:?} has coordinates out of range")
            }
        }
    }
}

/// Checks the document against what the map expects and logs every finding
#[tracing::instrument(skip_all)]
pub fn lint_document(document: &StopDocument) -> Vec<DataWarning> {
    let mut warnings = vec![];

    let mut seen = HashSet::new();
    let mut seen_codes = HashSet::new();
    for stop in &document.bus_stops {
        if !seen.insert(&stop.id) {
            warnings.push(DataWarning::DuplicateStopId {
                id: stop.id.clone(),
            });
        }
        if let Some(code) = &stop.stop_code {
            if !seen_codes.insert(code) {
                warnings.push(DataWarning::DuplicateStopCode { code: code.clone() });
            }
        }
        lint_stop(stop, &mut warnings);
    }

    warnings.extend(
        document
            .accessibility_points
            .iter()
            .filter(|p| !p.location.is_valid())
            .map(|p| DataWarning::InvalidLocation {
                name: p.name.clone(),
            }),
    );

    for warning in &warnings {
        warn!("{warning}");
    }

    warnings
}

fn lint_stop(stop: &Stop, warnings: &mut Vec<DataWarning>) {
    if !stop.location.is_valid() {
        warnings.push(DataWarning::InvalidLocation {
            name: stop.name.clone(),
        });
    }

    if stop.routes.is_empty() {
        warnings.push(DataWarning::NoRoutes {
            stop: stop.id.clone(),
        });
    }

    for route in stop.routes.iter().unique() {
        if !stop.schedules.contains_key(route) {
            warnings.push(DataWarning::MissingSchedule {
                stop: stop.id.clone(),
                route: route.clone(),
            });
        }
    }

    // sorted so the report doesn't depend on map iteration order
    for (route, departures) in stop.schedules.iter().sorted_by_key(|(route, _)| *route) {
        if !stop.routes.contains(route) {
            warnings.push(DataWarning::UnlistedSchedule {
                stop: stop.id.clone(),
                route: route.clone(),
            });
        }

        warnings.extend(
            departures
                .iter()
                .filter(|d| !DEPARTURE_FORMAT.is_match(d.as_str()))
                .map(|d| DataWarning::OddDepartureFormat {
                    stop: stop.id.clone(),
                    route: route.clone(),
                    departure: d.clone(),
                }),
        );
    }
}

//! Everything the map renderer needs, one entry per marker.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::aggregator::{RouteSchedule, aggregate};
use crate::classifier::{StopCategory, classify};
use crate::data_source::StopDocument;
use crate::model::{AccessibilityPoint, Location, PointKind, RouteName, Stop, StopId};
use crate::presentation::{MapView, MarkerAssets, MarkerPalette, MarkerStyle};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StopView {
    pub id: StopId,
    pub name: String,
    pub stop_code: Option<String>,
    pub location: Location,
    pub accessible: bool,
    /// In the order the source lists them
    pub route_badges: Vec<RouteName>,
    pub category: StopCategory,
    pub marker: MarkerStyle,
    pub schedules: Vec<RouteSchedule>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessibilityPointView {
    pub id: StopId,
    pub name: String,
    pub location: Location,
    pub kind: PointKind,
    pub description: Option<String>,
    pub building_name: Option<String>,
}

impl From<&AccessibilityPoint> for AccessibilityPointView {
    fn from(point: &AccessibilityPoint) -> Self {
        Self {
            id: point.id.clone(),
            name: point.name.clone(),
            location: point.location,
            kind: point.kind.clone(),
            description: point.description.clone(),
            building_name: point.building_name.clone(),
        }
    }
}

/// A stop that couldn't be put on the map
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkippedStop {
    pub id: StopId,
    pub name: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StopViews {
    pub views: Vec<StopView>,
    pub skipped: Vec<SkippedStop>,
}

pub fn build_stop_view(stop: &Stop, palette: &MarkerPalette) -> Result<StopView, SkippedStop> {
    let category = classify(&stop.routes).map_err(|e| SkippedStop {
        id: stop.id.clone(),
        name: stop.name.clone(),
        reason: e.to_string(),
    })?;

    Ok(StopView {
        id: stop.id.clone(),
        name: stop.name.clone(),
        stop_code: stop.stop_code.clone(),
        location: stop.location,
        accessible: stop.accessible,
        route_badges: stop.routes.iter().unique().cloned().collect_vec(),
        marker: palette.style_for(&category),
        category,
        schedules: aggregate(&stop.routes, &stop.schedules),
    })
}

/// Each stop is handled on its own, a bad stop is skipped and the rest still get drawn.
#[tracing::instrument(skip_all, fields(stops = stops.len()))]
pub fn build_stop_views(stops: &[Stop], palette: &MarkerPalette) -> StopViews {
    let (views, skipped): (Vec<_>, Vec<_>) = stops
        .iter()
        .map(|stop| build_stop_view(stop, palette))
        .partition_result();

    for stop in &skipped {
        error!("Skipping stop {} ({:?}): {}", stop.id, stop.name, stop.reason);
    }

    StopViews { views, skipped }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapScene {
    pub view: MapView,
    pub icons: MarkerAssets,
    pub accessibility_points: Vec<AccessibilityPointView>,
    pub bus_stops: Vec<StopView>,
    pub skipped: Vec<SkippedStop>,
}

#[tracing::instrument(skip_all)]
pub fn build_scene(
    document: &StopDocument,
    palette: &MarkerPalette,
    view: MapView,
    icons: MarkerAssets,
) -> MapScene {
    let StopViews { views, skipped } = build_stop_views(&document.bus_stops, palette);

    let accessibility_points = document
        .accessibility_points
        .iter()
        .map(AccessibilityPointView::from)
        .collect_vec();

    info!(
        "built scene with {} bus stops ({} skipped) and {} accessibility points",
        views.len(),
        skipped.len(),
        accessibility_points.len()
    );

    MapScene {
        view,
        icons,
        accessibility_points,
        bus_stops: views,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data_source::sample_document;
    use crate::model::DepartureTime;

    fn stop(id: u64, routes: &[&str]) -> Stop {
        Stop {
            id: StopId::Number(id),
            name: format!("Stop {id}"),
            stop_code: None,
            location: Location::new(43.0, -76.0),
            accessible: true,
            routes: routes.iter().map(|r| RouteName::from(*r)).collect(),
            schedules: HashMap::new(),
        }
    }

    #[test]
    fn empty_stop_is_skipped_without_blocking_others() {
        let stops = vec![stop(1, &["Blue Loop"]), stop(2, &[]), stop(3, &["A", "B"])];

        let result = build_stop_views(&stops, &MarkerPalette::default());

        assert_eq!(
            result.views.iter().map(|v| v.id.clone()).collect_vec(),
            vec![StopId::Number(1), StopId::Number(3)]
        );
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, StopId::Number(2));
        assert!(result.skipped[0].reason.contains("at least one route"));
    }

    #[test]
    fn stop_view_carries_category_marker_and_schedules() {
        let mut main_stop = stop(1, &["Orange Loop", "Blue Loop"]);
        main_stop.stop_code = Some("MCS".to_string());
        main_stop.schedules.insert(
            RouteName::from("Orange Loop"),
            vec![DepartureTime::from("7:00")],
        );
        let palette = MarkerPalette::default();

        let view = build_stop_view(&main_stop, &palette).unwrap();

        assert_eq!(view.stop_code.as_deref(), Some("MCS"));
        assert_eq!(view.category, StopCategory::MultiRoute);
        assert_eq!(view.marker, palette.style_for(&StopCategory::MultiRoute));
        assert_eq!(view.route_badges, main_stop.routes);
        assert_eq!(
            view.schedules,
            vec![
                RouteSchedule {
                    route: RouteName::from("Orange Loop"),
                    departures: vec![DepartureTime::from("7:00")],
                },
                RouteSchedule {
                    route: RouteName::from("Blue Loop"),
                    departures: vec![],
                },
            ]
        );
    }

    #[test]
    fn sample_scene() {
        let scene = build_scene(
            &sample_document(),
            &MarkerPalette::default(),
            MapView::default(),
            MarkerAssets::default(),
        );

        assert_eq!(scene.accessibility_points.len(), 3);
        assert_eq!(scene.bus_stops.len(), 3);
        assert!(scene.skipped.is_empty());
        assert_eq!(
            scene
                .bus_stops
                .iter()
                .map(|s| s.category.clone())
                .collect_vec(),
            vec![
                StopCategory::MultiRoute,
                StopCategory::SingleRoute {
                    route: RouteName::from("Blue Loop")
                },
                StopCategory::SingleRoute {
                    route: RouteName::from("Orange Loop")
                },
            ]
        );
    }
}

//! Pairs each route of a stop with its own timetable, in display order

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{DepartureTime, RouteName, Schedules};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteSchedule {
    pub route: RouteName,
    /// Exactly as listed by the source. Empty when the source has no timetable for the route.
    pub departures: Vec<DepartureTime>,
}

/// The `routes` list decides both which routes show up and their order.
/// Timetables are never merged across routes, sorted or deduplicated.
pub fn aggregate(routes: &[RouteName], schedules: &Schedules) -> Vec<RouteSchedule> {
    let aggregated = routes
        .iter()
        .unique()
        .map(|route| {
            let departures = match schedules.get(route) {
                Some(times) => times.clone(),
                None => {
                    debug!(%route, "no schedule for route, showing it without departures");
                    Vec::new()
                }
            };

            RouteSchedule {
                route: route.clone(),
                departures,
            }
        })
        .collect_vec();

    let ignored = schedules
        .keys()
        .filter(|route| !routes.contains(route))
        .sorted()
        .collect_vec();
    if !ignored.is_empty() {
        debug!(?ignored, "ignoring schedules for routes the stop doesn't list");
    }

    aggregated
}

//! Decides which kind of marker a stop gets from the routes serving it

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::RouteName;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopCategory {
    SingleRoute { route: RouteName },
    MultiRoute,
}

impl fmt::Display for StopCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCategory::SingleRoute { route } => write!(f, "single route ({route})"),
            StopCategory::MultiRoute => f.write_str("multi route"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid input: a stop must be served by at least one route")]
    EmptyRoutes,
}

/// Counts distinct route names. Never looks at which routes they are.
pub fn classify(routes: &[RouteName]) -> Result<StopCategory, ClassifyError> {
    let mut distinct = routes.iter().unique();

    let first = distinct.next().ok_or(ClassifyError::EmptyRoutes)?;

    if distinct.next().is_some() {
        Ok(StopCategory::MultiRoute)
    } else {
        Ok(StopCategory::SingleRoute {
            route: first.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(names: &[&str]) -> Vec<RouteName> {
        names.iter().map(|n| RouteName::from(*n)).collect()
    }

    #[test]
    fn one_route_is_single_route_with_that_route() {
        for name in ["Blue Loop", "Orange Loop", "Night Shuttle"] {
            assert_eq!(
                classify(&routes(&[name])),
                Ok(StopCategory::SingleRoute {
                    route: RouteName::from(name)
                })
            );
        }
    }

    #[test]
    fn two_or_more_routes_are_multi_route() {
        assert_eq!(
            classify(&routes(&["Orange Loop", "Blue Loop"])),
            Ok(StopCategory::MultiRoute)
        );
        assert_eq!(
            classify(&routes(&["A", "B", "C"])),
            Ok(StopCategory::MultiRoute)
        );
        assert_eq!(
            classify(&routes(&["A", "B", "C", "D", "E"])),
            Ok(StopCategory::MultiRoute)
        );
    }

    #[test]
    fn empty_routes_is_rejected() {
        assert_eq!(classify(&[]), Err(ClassifyError::EmptyRoutes));
    }

    #[test]
    fn repeated_route_counts_once() {
        assert_eq!(
            classify(&routes(&["Blue Loop", "Blue Loop"])),
            Ok(StopCategory::SingleRoute {
                route: RouteName::from("Blue Loop")
            })
        );
    }

    #[test]
    fn order_does_not_change_category() {
        assert_eq!(
            classify(&routes(&["A", "B"])),
            classify(&routes(&["B", "A"]))
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let input = routes(&["Orange Loop"]);
        assert_eq!(classify(&input), classify(&input.clone()));
    }

    #[test]
    fn category_serializes_with_kind_tag() {
        let single = StopCategory::SingleRoute {
            route: RouteName::from("Blue Loop"),
        };
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            serde_json::json!({"kind": "single_route", "route": "Blue Loop"})
        );
        assert_eq!(
            serde_json::to_value(StopCategory::MultiRoute).unwrap(),
            serde_json::json!({"kind": "multi_route"})
        );
    }
}

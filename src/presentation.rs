//! Presentation settings handed to the map renderer.
//! Built once at startup and only read afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classifier::StopCategory;
use crate::model::{Location, RouteName};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkerStyle {
    pub color: String,
    pub label: String,
}

/// Maps a stop category to the marker drawn for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerPalette {
    pub route_colors: HashMap<RouteName, String>,
    pub multi_route: String,
    /// Used for single-route stops on a route without a configured color
    pub fallback: String,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            route_colors: HashMap::from([
                (RouteName::from("Blue Loop"), "#2563eb".to_string()),
                (RouteName::from("Orange Loop"), "#f97316".to_string()),
            ]),
            multi_route: "#7c3aed".to_string(),
            fallback: "#6b7280".to_string(),
        }
    }
}

impl MarkerPalette {
    pub fn with_route_colors(
        mut self,
        overrides: impl IntoIterator<Item = (RouteName, String)>,
    ) -> Self {
        self.route_colors.extend(overrides);
        self
    }

    pub fn style_for(&self, category: &StopCategory) -> MarkerStyle {
        match category {
            StopCategory::SingleRoute { route } => MarkerStyle {
                color: self
                    .route_colors
                    .get(route)
                    .unwrap_or(&self.fallback)
                    .clone(),
                label: route.to_string(),
            },
            StopCategory::MultiRoute => MarkerStyle {
                color: self.multi_route.clone(),
                label: "Multiple routes".to_string(),
            },
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("expected ROUTE=COLOR, got {0:?}")]
    MissingSeparator(String),

    #[error("route name is empty in {0:?}")]
    EmptyRoute(String),

    #[error("color is empty in {0:?}")]
    EmptyColor(String),
}

/// Parses a `ROUTE=COLOR` override, e.g. `Green Loop=#16a34a`.
/// Splits on the last `=` so route names may contain one.
pub fn parse_route_color(raw: &str) -> Result<(RouteName, String), PaletteError> {
    let (route, color) = raw
        .rsplit_once('=')
        .ok_or_else(|| PaletteError::MissingSeparator(raw.to_string()))?;

    let route = route.trim();
    let color = color.trim();

    if route.is_empty() {
        return Err(PaletteError::EmptyRoute(raw.to_string()));
    }
    if color.is_empty() {
        return Err(PaletteError::EmptyColor(raw.to_string()));
    }

    Ok((RouteName::from(route), color.to_string()))
}

/// Default marker images. The renderer takes these explicitly instead of
/// resolving its own asset paths.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkerAssets {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

impl Default for MarkerAssets {
    fn default() -> Self {
        Self {
            icon_url: "images/marker-icon.png".to_string(),
            icon_retina_url: "images/marker-icon-2x.png".to_string(),
            shadow_url: "images/marker-shadow.png".to_string(),
        }
    }
}

/// Initial viewport and tile source
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapView {
    pub center: Location,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            // Syracuse University
            center: Location::new(43.0481, -76.1474),
            zoom: 15,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_route_uses_route_color() {
        let palette = MarkerPalette::default();
        let style = palette.style_for(&StopCategory::SingleRoute {
            route: RouteName::from("Orange Loop"),
        });

        assert_eq!(style.color, "#f97316");
        assert_eq!(style.label, "Orange Loop");
    }

    #[test]
    fn unknown_route_falls_back() {
        let palette = MarkerPalette::default();
        let style = palette.style_for(&StopCategory::SingleRoute {
            route: RouteName::from("Green Loop"),
        });

        assert_eq!(style.color, palette.fallback);
    }

    #[test]
    fn multi_route_ignores_route_colors() {
        let palette = MarkerPalette::default();
        assert_eq!(
            palette.style_for(&StopCategory::MultiRoute).color,
            palette.multi_route
        );
    }

    #[test]
    fn overrides_replace_defaults() {
        let palette = MarkerPalette::default().with_route_colors([
            (RouteName::from("Blue Loop"), "navy".to_string()),
            (RouteName::from("Green Loop"), "green".to_string()),
        ]);

        assert_eq!(palette.route_colors[&RouteName::from("Blue Loop")], "navy");
        assert_eq!(palette.route_colors[&RouteName::from("Green Loop")], "green");
        assert_eq!(palette.route_colors.len(), 3);
    }

    #[test]
    fn parses_route_color() {
        assert_eq!(
            parse_route_color("Green Loop = #16a34a"),
            Ok((RouteName::from("Green Loop"), "#16a34a".to_string()))
        );
        assert_eq!(
            parse_route_color("A=B=red"),
            Ok((RouteName::from("A=B"), "red".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_route_color() {
        assert_eq!(
            parse_route_color("Green Loop"),
            Err(PaletteError::MissingSeparator("Green Loop".to_string()))
        );
        assert_eq!(
            parse_route_color("=red"),
            Err(PaletteError::EmptyRoute("=red".to_string()))
        );
        assert_eq!(
            parse_route_color("Green Loop= "),
            Err(PaletteError::EmptyColor("Green Loop= ".to_string()))
        );
    }
}

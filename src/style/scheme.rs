use serde::Deserialize;

use crate::geofile::feature::GeometryKind;

use super::{
    descriptor::{Color, Style},
    popup::{PopupLine, PopupTemplate},
    rules::{ColorTarget, StyleRule},
};

/// The styling and popup scheme shared by all features of a layer.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LayerScheme {
    /// Hotel markers, one fixed style.
    Hotel,
    /// Stations and stops, blue shades per transport type.
    Transport,
    /// Outdoor activities, one hue per activity type.
    Activity,
    /// Trails coloured by difficulty level.
    Trail,
    /// Sports and leisure areas.
    SportsZone,
}

const TRANSPORT_COLORS: [(&str, &str); 5] = [
    ("gare", "#0d47a1"),
    ("gare_routiere", "#1565c0"),
    ("arret_bus", "#1e88e5"),
    ("telecabine", "#42a5f5"),
    ("heliport", "#01579b"),
];

const ACTIVITY_COLORS: [(&str, &str); 5] = [
    ("ski", "#607d8b"),
    ("randonnee", "#43a047"),
    ("vtt", "#fb8c00"),
    ("parapente", "#e53935"),
    ("escalade", "#6d4c41"),
];

pub const TRAIL_EASY_COLOR: &str = "#2e7d32";

const TRAIL_COLORS: [(&str, &str); 3] = [
    ("facile", TRAIL_EASY_COLOR),
    ("moyen", "#f9a825"),
    ("difficile", "#c62828"),
];

const SPORTS_ZONE_COLORS: [(&str, &str); 6] = [
    ("golf", "#7cb342"),
    ("tennis", "#ff7043"),
    ("football", "#26a69a"),
    ("piscine", "#29b6f6"),
    ("patinoire", "#80deea"),
    ("equitation", "#a1887f"),
];

fn circle_marker(stroke: &'static str, radius: f64, fill_opacity: f64) -> Style {
    Style {
        color: Color::from_table(stroke),
        weight: 1.0,
        opacity: 1.0,
        fill_color: None,
        fill_opacity: Some(fill_opacity),
        radius: Some(radius),
    }
}

impl LayerScheme {
    pub const ALL: [LayerScheme; 5] = [
        LayerScheme::Hotel,
        LayerScheme::Transport,
        LayerScheme::Activity,
        LayerScheme::Trail,
        LayerScheme::SportsZone,
    ];

    /// The geometry the layer's data is expected to hold.
    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            LayerScheme::Hotel | LayerScheme::Transport | LayerScheme::Activity => {
                GeometryKind::Point
            }
            LayerScheme::Trail => GeometryKind::Line,
            LayerScheme::SportsZone => GeometryKind::Polygon,
        }
    }

    /// Property holding the category label, if the layer is styled per category.
    pub fn category_key(&self) -> Option<&'static str> {
        match self {
            LayerScheme::Hotel => None,
            LayerScheme::Transport | LayerScheme::Activity | LayerScheme::SportsZone => {
                Some("type")
            }
            LayerScheme::Trail => Some("niveau"),
        }
    }

    pub fn style_rule(&self) -> StyleRule {
        match self {
            LayerScheme::Hotel => StyleRule::new(
                circle_marker("#000", 10.0, 0.8),
                ColorTarget::Fill,
                Color::from_table("#0077ff"),
            ),
            LayerScheme::Transport => StyleRule::new(
                circle_marker("#000", 8.0, 0.9),
                ColorTarget::Fill,
                Color::from_table("#90caf9"),
            )
            .with_categories(&TRANSPORT_COLORS),
            LayerScheme::Activity => StyleRule::new(
                circle_marker("#333", 7.0, 0.85),
                ColorTarget::Fill,
                Color::from_table("#9e9e9e"),
            )
            .with_categories(&ACTIVITY_COLORS),
            LayerScheme::Trail => StyleRule::new(
                Style {
                    color: Color::from_table(TRAIL_EASY_COLOR),
                    weight: 4.0,
                    opacity: 0.8,
                    fill_color: None,
                    fill_opacity: None,
                    radius: None,
                },
                ColorTarget::Stroke,
                Color::from_table(TRAIL_EASY_COLOR),
            )
            .with_categories(&TRAIL_COLORS),
            LayerScheme::SportsZone => StyleRule::new(
                Style {
                    color: Color::from_table("#bdbdbd"),
                    weight: 2.0,
                    opacity: 1.0,
                    fill_color: None,
                    fill_opacity: Some(0.5),
                    radius: None,
                },
                ColorTarget::StrokeAndFill,
                Color::from_table("#bdbdbd"),
            )
            .with_categories(&SPORTS_ZONE_COLORS),
        }
    }

    pub fn popup_template(&self) -> PopupTemplate {
        match self {
            LayerScheme::Hotel => PopupTemplate {
                name_key: "HOTEL",
                fallback_name: "Hôtel de luxe",
                lines: &[],
            },
            LayerScheme::Transport => PopupTemplate {
                name_key: "nom",
                fallback_name: "Point de transport",
                lines: &[
                    PopupLine::Labelled {
                        label: "Type",
                        key: "type",
                    },
                    PopupLine::Labelled {
                        label: "Accès",
                        key: "acces",
                    },
                ],
            },
            LayerScheme::Activity => PopupTemplate {
                name_key: "nom",
                fallback_name: "Activité",
                lines: &[
                    PopupLine::Labelled {
                        label: "Type",
                        key: "type",
                    },
                    PopupLine::Labelled {
                        label: "Difficulté",
                        key: "difficulte",
                    },
                ],
            },
            LayerScheme::Trail => PopupTemplate {
                name_key: "nom",
                fallback_name: "Sentier",
                lines: &[
                    PopupLine::Labelled {
                        label: "Type",
                        key: "type",
                    },
                    PopupLine::Labelled {
                        label: "Distance",
                        key: "distance",
                    },
                    PopupLine::Bare { key: "description" },
                ],
            },
            LayerScheme::SportsZone => PopupTemplate {
                name_key: "nom",
                fallback_name: "Zone de loisirs",
                lines: &[PopupLine::Labelled {
                    label: "Type",
                    key: "type",
                }],
            },
        }
    }
}

use std::collections::HashMap;

use serde::Deserialize;

use crate::geofile::feature::Feature;

use super::{
    descriptor::{Color, Style},
    popup::PopupTemplate,
    rules::StyleRule,
    scheme::LayerScheme,
};

/// Additions to a scheme's colour table, read from the layer configuration.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StyleOverrides {
    pub default_color: Option<Color>,
    pub categories: HashMap<String, Color>,
}

/// Computes the style and popup of the features of one layer. Both are pure functions of the
/// feature, so a styler can be shared between threads.
#[derive(Debug, Clone)]
pub struct FeatureStyler {
    scheme: LayerScheme,
    rule: StyleRule,
    popup: PopupTemplate,
}

impl FeatureStyler {
    pub fn new(scheme: LayerScheme) -> Self {
        Self {
            scheme,
            rule: scheme.style_rule(),
            popup: scheme.popup_template(),
        }
    }

    pub fn with_overrides(scheme: LayerScheme, overrides: &StyleOverrides) -> Self {
        let mut styler = Self::new(scheme);
        if let Some(color) = &overrides.default_color {
            styler.rule.set_default_color(color.clone());
        }
        for (category, color) in &overrides.categories {
            styler.rule.insert_category(category, color.clone());
        }
        styler
    }

    pub fn scheme(&self) -> LayerScheme {
        self.scheme
    }

    pub fn style(&self, feature: &Feature) -> Style {
        if feature.kind != self.scheme.geometry_kind() {
            log::debug!(
                "{:?} feature in a {:?} layer, styling it with the layer's table",
                feature.kind,
                self.scheme
            );
        }
        let category = self
            .scheme
            .category_key()
            .and_then(|key| feature.category(key));
        self.rule.style_for(category.as_deref(), feature.kind)
    }

    pub fn popup(&self, feature: &Feature) -> String {
        self.popup.render(feature)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use crate::{
        geofile::feature::{AttributeValue, Feature, FeatureMap},
        style::{
            descriptor::Color,
            scheme::{LayerScheme, TRAIL_EASY_COLOR},
        },
    };

    use super::{FeatureStyler, StyleOverrides};

    fn point_feature(attributes: &[(&str, &str)]) -> Feature {
        let mut feature = Feature::from(geo::Point::new(6.6167, 45.8667));
        feature.attributes = attributes
            .iter()
            .map(|(key, value)| (key.to_string(), AttributeValue::from(*value)))
            .collect();
        feature
    }

    fn line_feature(attributes: FeatureMap) -> Feature {
        let line: geo::LineString = vec![(6.61, 45.86), (6.62, 45.87)].into();
        Feature::new(geo::Geometry::LineString(line), attributes).unwrap()
    }

    fn polygon_feature(category: &str) -> Feature {
        let polygon = geo::Polygon::new(
            vec![(6.60, 45.85), (6.61, 45.85), (6.61, 45.86), (6.60, 45.85)].into(),
            vec![],
        );
        let attributes = FeatureMap::from([("type".to_string(), AttributeValue::from(category))]);
        Feature::new(geo::Geometry::Polygon(polygon), attributes).unwrap()
    }

    #[rstest]
    #[case(LayerScheme::Transport, "gare", "#0d47a1")]
    #[case(LayerScheme::Transport, "gare_routiere", "#1565c0")]
    #[case(LayerScheme::Transport, "heliport", "#01579b")]
    #[case(LayerScheme::Transport, "Telecabine", "#42a5f5")]
    #[case(LayerScheme::Transport, "bateau", "#90caf9")]
    #[case(LayerScheme::Activity, "ski", "#607d8b")]
    #[case(LayerScheme::Activity, "parapente", "#e53935")]
    #[case(LayerScheme::Activity, "curling", "#9e9e9e")]
    #[case(LayerScheme::Hotel, "gare", "#0077ff")]
    fn test_point_fill_color(
        #[case] scheme: LayerScheme,
        #[case] category: &str,
        #[case] expected_fill: &str,
    ) {
        let styler = FeatureStyler::new(scheme);
        let style = styler.style(&point_feature(&[("type", category)]));
        assert_eq!(style.fill_color.unwrap().as_str(), expected_fill);
        assert!(style.radius.is_some());
    }

    #[rstest]
    #[case(LayerScheme::Transport, "#90caf9")]
    #[case(LayerScheme::Activity, "#9e9e9e")]
    fn test_absent_category_gets_default(#[case] scheme: LayerScheme, #[case] expected_fill: &str) {
        let style = FeatureStyler::new(scheme).style(&point_feature(&[("nom", "Sans type")]));
        assert_eq!(style.fill_color.unwrap().as_str(), expected_fill);
    }

    #[test]
    fn test_hotel_matches_single_hotel_map() {
        let styler = FeatureStyler::new(LayerScheme::Hotel);
        let style = styler.style(&point_feature(&[]));
        assert_eq!(style.radius, Some(10.0));
        assert_eq!(style.color.as_str(), "#000");
        assert_abs_diff_eq!(style.weight, 1.0);
        assert_abs_diff_eq!(style.opacity, 1.0);
        assert_abs_diff_eq!(style.fill_opacity.unwrap(), 0.8);
        assert_eq!(style.fill_color.unwrap().as_str(), "#0077ff");

        assert_eq!(styler.popup(&point_feature(&[])), "<b>Hôtel de luxe</b>");
        assert_eq!(
            styler.popup(&point_feature(&[("HOTEL", "Les Fermes de Marie")])),
            "<b>Les Fermes de Marie</b>"
        );
    }

    #[test]
    fn test_transport_heliport() {
        let styler = FeatureStyler::new(LayerScheme::Transport);
        let feature = point_feature(&[
            ("nom", "Héliport de Megève"),
            ("type", "heliport"),
            ("acces", "Sur réservation, 24h/24"),
        ]);
        let style = styler.style(&feature);
        assert_eq!(style.fill_color.unwrap().as_str(), "#01579b");
        let popup = styler.popup(&feature);
        assert!(popup.contains("Type : heliport"));
        assert!(popup.contains("Sur réservation, 24h/24"));
        assert_eq!(
            popup,
            "<b>Héliport de Megève</b><br>Type : heliport<br>Accès : Sur réservation, 24h/24"
        );
    }

    #[rstest]
    #[case(LayerScheme::Transport, "<b>Point de transport</b>")]
    #[case(LayerScheme::Activity, "<b>Activité</b>")]
    #[case(LayerScheme::Trail, "<b>Sentier</b>")]
    #[case(LayerScheme::SportsZone, "<b>Zone de loisirs</b>")]
    #[case(LayerScheme::Hotel, "<b>Hôtel de luxe</b>")]
    fn test_missing_name_falls_back(#[case] scheme: LayerScheme, #[case] expected: &str) {
        let popup = FeatureStyler::new(scheme).popup(&point_feature(&[("type", "ski")]));
        assert!(popup.starts_with(expected), "{}", popup);
    }

    #[test]
    fn test_activity_popup() {
        let popup = FeatureStyler::new(LayerScheme::Activity).popup(&point_feature(&[
            ("nom", "Domaine du Mont d'Arbois"),
            ("type", "ski"),
        ]));
        assert_eq!(
            popup,
            "<b>Domaine du Mont d'Arbois</b><br>Type : ski<br>Difficulté : non renseigné"
        );
    }

    #[rstest]
    #[case(Some("facile"), TRAIL_EASY_COLOR)]
    #[case(Some("moyen"), "#f9a825")]
    #[case(Some("difficile"), "#c62828")]
    #[case(Some("extreme"), TRAIL_EASY_COLOR)]
    #[case(None, TRAIL_EASY_COLOR)]
    fn test_trail_stroke(#[case] niveau: Option<&str>, #[case] expected_color: &str) {
        let mut attributes = FeatureMap::new();
        if let Some(niveau) = niveau {
            attributes.insert("niveau".to_string(), AttributeValue::from(niveau));
        }
        let style = FeatureStyler::new(LayerScheme::Trail).style(&line_feature(attributes));
        assert_eq!(style.color.as_str(), expected_color);
        assert_abs_diff_eq!(style.weight, 4.0);
        assert_abs_diff_eq!(style.opacity, 0.8);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.radius, None);
    }

    #[test]
    fn test_trail_popup() {
        let attributes = FeatureMap::from([
            ("nom".to_string(), AttributeValue::from("Tour du Jaillet")),
            ("type".to_string(), AttributeValue::from("randonnée")),
            ("distance".to_string(), AttributeValue::Number(8.0)),
            (
                "description".to_string(),
                AttributeValue::from("Vue sur le Mont-Blanc"),
            ),
        ]);
        let popup = FeatureStyler::new(LayerScheme::Trail).popup(&line_feature(attributes));
        assert_eq!(
            popup,
            "<b>Tour du Jaillet</b><br>Type : randonnée<br>Distance : 8<br>Vue sur le Mont-Blanc"
        );
    }

    #[test]
    fn test_sports_zone_golf() {
        let style = FeatureStyler::new(LayerScheme::SportsZone).style(&polygon_feature("golf"));
        assert_eq!(style.fill_color.unwrap().as_str(), "#7cb342");
        assert_eq!(style.color.as_str(), "#7cb342");
        assert_abs_diff_eq!(style.fill_opacity.unwrap(), 0.5);
        assert_abs_diff_eq!(style.weight, 2.0);
    }

    #[test]
    fn test_sports_zone_unknown_category() {
        let style =
            FeatureStyler::new(LayerScheme::SportsZone).style(&polygon_feature("petanque"));
        assert_eq!(style.fill_color.unwrap().as_str(), "#bdbdbd");
    }

    #[test]
    fn test_style_and_popup_are_idempotent() {
        for scheme in LayerScheme::ALL {
            let styler = FeatureStyler::new(scheme);
            let feature = point_feature(&[("nom", "Le Palais"), ("type", "patinoire")]);
            assert_eq!(styler.style(&feature), styler.style(&feature));
            assert_eq!(styler.popup(&feature), styler.popup(&feature));
        }
    }

    #[test]
    fn test_overrides() {
        let overrides = StyleOverrides {
            default_color: Some(Color::parse("#111111").unwrap()),
            categories: [("navette".to_string(), Color::parse("#222222").unwrap())].into(),
        };
        let styler = FeatureStyler::with_overrides(LayerScheme::Transport, &overrides);
        let navette = styler.style(&point_feature(&[("type", "navette")]));
        assert_eq!(navette.fill_color.unwrap().as_str(), "#222222");
        let unknown = styler.style(&point_feature(&[("type", "bateau")]));
        assert_eq!(unknown.fill_color.unwrap().as_str(), "#111111");
        let gare = styler.style(&point_feature(&[("type", "gare")]));
        assert_eq!(gare.fill_color.unwrap().as_str(), "#0d47a1");
    }
}

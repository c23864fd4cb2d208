use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::styled_layer::{StyledFeature, StyledLayer};

/// Initial view of the map the output is drawn on.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MapView {
    /// `[lat, lon]` in degrees.
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        // Megève.
        Self {
            center: [45.8667, 6.6167],
            zoom: 14,
        }
    }
}

pub fn styled_feature_to_geojson(
    styled: &StyledFeature,
    layer_name: &str,
) -> anyhow::Result<geojson::Feature> {
    let mut properties = styled.feature.properties.clone();
    properties.insert("layer".to_string(), geojson::JsonValue::from(layer_name));
    properties.insert(
        "style".to_string(),
        serde_json::to_value(&styled.style).context("Serialising style")?,
    );
    properties.insert(
        "popup".to_string(),
        geojson::JsonValue::from(styled.popup.as_str()),
    );
    Ok(geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(
            &styled.feature.geometry,
        ))),
        id: styled.feature.id.clone(),
        properties: Some(properties),
        foreign_members: styled.feature.foreign_members.clone(),
    })
}

/// Collect the styled layers into one FeatureCollection, in layer order. The map view is stored
/// as the `view` member of the collection.
pub fn layers_to_feature_collection(
    layers: &[StyledLayer],
    view: &MapView,
) -> anyhow::Result<geojson::FeatureCollection> {
    let features = layers
        .iter()
        .flat_map(|layer| {
            layer
                .features
                .iter()
                .map(|styled| styled_feature_to_geojson(styled, &layer.name))
        })
        .collect::<anyhow::Result<Vec<geojson::Feature>>>()?;
    let mut foreign_members = geojson::JsonObject::new();
    foreign_members.insert(
        "view".to_string(),
        serde_json::to_value(view).context("Serialising map view")?,
    );
    Ok(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    })
}

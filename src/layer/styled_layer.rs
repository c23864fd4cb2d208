use anyhow::Context;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::{
    geofile::{feature::Feature, geojson::read_features_from_geojson_file, source::LayerSource},
    style::{
        descriptor::Style,
        scheme::LayerScheme,
        styler::{FeatureStyler, StyleOverrides},
    },
};

#[derive(Deserialize, Debug, Clone)]
pub struct LayerConfig {
    pub name: String,
    pub scheme: LayerScheme,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub source: LayerSource,
    #[serde(default)]
    pub style_overrides: StyleOverrides,
}

#[derive(Debug, Clone)]
pub struct StyledFeature {
    pub feature: Feature,
    pub style: Style,
    pub popup: String,
}

#[derive(Debug, Clone)]
pub struct StyledLayer {
    pub name: String,
    pub scheme: LayerScheme,
    pub features: Vec<StyledFeature>,
}

/// Style every feature of a layer. Each feature is handled independently of the others.
pub fn style_features(name: &str, styler: &FeatureStyler, features: Vec<Feature>) -> StyledLayer {
    let features = features
        .into_par_iter()
        .map(|feature| StyledFeature {
            style: styler.style(&feature),
            popup: styler.popup(&feature),
            feature,
        })
        .collect();
    StyledLayer {
        name: name.to_string(),
        scheme: styler.scheme(),
        features,
    }
}

pub fn load_layer(config: &LayerConfig, data_dir: &Path) -> anyhow::Result<StyledLayer> {
    let filepath = config
        .source
        .resolve(&config.name, data_dir)
        .with_context(|| format!("Resolving source of layer {}", config.name))?;
    let features = read_features_from_geojson_file(&filepath)
        .with_context(|| format!("Reading layer {}", config.name))?;
    log::info!(
        "Read {} features for layer {} from {:?}",
        features.len(),
        config.name,
        filepath
    );
    let styler = FeatureStyler::with_overrides(config.scheme, &config.style_overrides);
    Ok(style_features(&config.name, &styler, features))
}

/// Load and style all layers in parallel. A layer that cannot be loaded is logged and left out,
/// the others are returned in configuration order.
pub fn load_layers(configs: &[LayerConfig], data_dir: &Path) -> Vec<StyledLayer> {
    configs
        .par_iter()
        .progress_count(configs.len() as u64)
        .filter_map(|config| match load_layer(config, data_dir) {
            Ok(layer) => Some(layer),
            Err(err) => {
                log::error!("Omitting layer {}: {:#}", config.name, err);
                None
            }
        })
        .collect()
}

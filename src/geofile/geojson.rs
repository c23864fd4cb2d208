use anyhow::{anyhow, Context};
use std::{fs, path::Path};

use super::feature::Feature;

/// Parse GeoJSON text into features. Accepts a FeatureCollection, a single Feature or a bare
/// Geometry. Features without a drawable geometry are skipped with a warning.
pub fn read_features_from_geojson(contents: &str) -> anyhow::Result<Vec<Feature>> {
    let geojson: geojson::GeoJson = contents.parse().context("Parsing GeoJSON")?;
    let geojson_features = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => collection.features,
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(geometry) => vec![geojson::Feature::from(geometry)],
    };

    let num_features = geojson_features.len();
    let features: Vec<Feature> = geojson_features
        .into_iter()
        .filter_map(|geojson_feature| match convert_feature(geojson_feature) {
            Ok(feature) => Some(feature),
            Err(err) => {
                log::warn!("Skipping feature: {:#}", err);
                None
            }
        })
        .collect();
    if features.len() != num_features {
        log::warn!(
            "Out of {} features read, only {} had a drawable geometry.",
            num_features,
            features.len()
        )
    }
    Ok(features)
}

pub fn read_features_from_geojson_file(filepath: &Path) -> anyhow::Result<Vec<Feature>> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading GeoJSON file {:?}", filepath))?;
    read_features_from_geojson(&contents)
}

fn convert_feature(geojson_feature: geojson::Feature) -> anyhow::Result<Feature> {
    let geometry = match geojson_feature.geometry {
        Some(geometry) => geometry,
        None => return Err(anyhow!("feature has no geometry")),
    };
    let geometry: geo::Geometry = geometry
        .try_into()
        .map_err(|err| anyhow!("could not convert geometry, {}", err))?;
    let mut feature =
        Feature::from_properties(geometry, geojson_feature.properties.unwrap_or_default())
            .ok_or_else(|| anyhow!("geometry collections are not supported"))?;
    feature.id = geojson_feature.id;
    feature.foreign_members = geojson_feature.foreign_members;
    Ok(feature)
}

pub fn write_feature_collection_to_geojson(
    feature_collection: geojson::FeatureCollection,
    output_filepath: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = output_filepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating output directory {:?}", parent))?;
        }
    }
    let geojson_contents = geojson::GeoJson::from(feature_collection);
    fs::write(output_filepath, geojson_contents.to_string())
        .with_context(|| format!("Writing GeoJSON to {:?}", output_filepath))
}

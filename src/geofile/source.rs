use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Where the GeoJSON file of a layer comes from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum LayerSource {
    /// A local file. Relative paths are resolved against the data directory.
    Geofile { filepath: PathBuf },
    /// A remote file, downloaded once and cached in the data directory.
    Url { url: String },
}

/// 64-bit FNV-1a, stable across runs and platforms.
fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Cache file for a downloaded layer. The URL hash is part of the name so that changing a
/// layer's URL fetches the new data instead of reusing the old file.
pub fn get_cache_filename(layer_name: &str, url: &str) -> String {
    let sanitized: String = layer_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let url_hash = fnv1a64(url.as_bytes());
    format!("{sanitized}_{url_hash:016x}_layer.geojson")
}

pub fn download_geojson(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("map-styler")
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    response.text().or(Err(anyhow!("No response text")))
}

pub fn sync_geojson_to_file(
    layer_name: &str,
    url: &str,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let output_filepath = output_dir.join(get_cache_filename(layer_name, url));
    if output_filepath.exists() {
        log::info!(
            "Local file exists for layer {}: {:?}",
            layer_name,
            output_filepath
        );
        return Ok(output_filepath);
    }

    log::info!("Downloading layer {} from {}", layer_name, url);
    let contents = download_geojson(url)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Creating data directory {:?}", output_dir))?;
    fs::write(&output_filepath, contents)
        .with_context(|| format!("Writing layer {} to {:?}", layer_name, output_filepath))?;
    Ok(output_filepath)
}

impl LayerSource {
    /// Local path of the layer's GeoJSON file, downloading it first if needed.
    pub fn resolve(&self, layer_name: &str, data_dir: &Path) -> anyhow::Result<PathBuf> {
        match self {
            LayerSource::Geofile { filepath } => {
                let filepath = if filepath.is_absolute() {
                    filepath.clone()
                } else {
                    data_dir.join(filepath)
                };
                if !filepath.exists() {
                    return Err(anyhow!("Layer file {:?} not found", filepath));
                }
                Ok(filepath)
            }
            LayerSource::Url { url } => sync_geojson_to_file(layer_name, url, data_dir),
        }
    }
}

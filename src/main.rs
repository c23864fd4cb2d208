extern crate log;
pub mod geofile;
pub mod layer;
pub mod style;
use crate::geofile::geojson::write_feature_collection_to_geojson;
use crate::layer::render::{layers_to_feature_collection, MapView};
use crate::layer::styled_layer::{load_layers, LayerConfig};
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Style GeoJSON map layers and write them, with their popups, to a single GeoJSON file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct Config {
    /// Directory holding the layer files and the download cache.
    data_dir: PathBuf,
    output_filepath: PathBuf,
    #[serde(default)]
    view: MapView,
    layers: Vec<LayerConfig>,
}

fn read_config(config_filepath: &Path) -> anyhow::Result<Config> {
    if !config_filepath.exists() {
        return Err(anyhow!("Config file {:?} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;
    Ok(config)
}

fn try_main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let args = Args::try_parse()?;
    let config = read_config(Path::new(&args.config_filepath))?;

    log::info!("Loading {} layers", config.layers.len());
    let layers = load_layers(&config.layers, &config.data_dir);
    let num_features: usize = layers.iter().map(|layer| layer.features.len()).sum();
    log::info!(
        "Styled {} features in {} of {} layers",
        num_features,
        layers.len(),
        config.layers.len()
    );

    let feature_collection = layers_to_feature_collection(&layers, &config.view)?;
    log::info!(
        "Writing styled layers to GeoJSON to {:?}",
        &config.output_filepath
    );
    write_feature_collection_to_geojson(feature_collection, &config.output_filepath)?;
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

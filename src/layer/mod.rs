pub mod render;
pub mod styled_layer;

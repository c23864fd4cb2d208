use std::collections::HashMap;

use crate::geofile::feature::GeometryKind;

use super::descriptor::{Color, Style};

/// Which part of the base style the category colour is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Fill,
    Stroke,
    StrokeAndFill,
}

/// Table from category label to colour, applied on top of a constant base style. Labels are
/// matched ignoring ASCII case; unknown or absent labels get the default colour.
#[derive(Debug, Clone)]
pub struct StyleRule {
    base: Style,
    target: ColorTarget,
    default_color: Color,
    colors: HashMap<String, Color>,
}

fn normalize_category(category: &str) -> String {
    category.trim().to_ascii_lowercase()
}

impl StyleRule {
    pub fn new(base: Style, target: ColorTarget, default_color: Color) -> Self {
        Self {
            base,
            target,
            default_color,
            colors: HashMap::new(),
        }
    }

    /// Add the colour for a category, replacing any colour it already had.
    pub fn insert_category(&mut self, category: &str, color: Color) {
        self.colors.insert(normalize_category(category), color);
    }

    pub fn with_categories(mut self, categories: &[(&str, &'static str)]) -> Self {
        for (category, color) in categories {
            self.insert_category(category, Color::from_table(color));
        }
        self
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    pub fn default_color(&self) -> &Color {
        &self.default_color
    }

    pub fn color_for(&self, category: Option<&str>) -> &Color {
        category
            .and_then(|category| self.colors.get(&normalize_category(category)))
            .unwrap_or(&self.default_color)
    }

    pub fn style_for(&self, category: Option<&str>, kind: GeometryKind) -> Style {
        let color = self.color_for(category).clone();
        let mut style = self.base.clone();
        match self.target {
            ColorTarget::Fill => style.fill_color = Some(color),
            ColorTarget::Stroke => style.color = color,
            ColorTarget::StrokeAndFill => {
                style.color = color.clone();
                style.fill_color = Some(color);
            }
        }
        if kind != GeometryKind::Point {
            style.radius = None;
        }
        style
    }
}

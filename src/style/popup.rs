use crate::geofile::feature::{AttributeValue, Feature};

/// Shown in place of any attribute other than the name that a feature does not have.
pub const MISSING_VALUE: &str = "non renseigné";

/// One line of a popup after the name header.
#[derive(Debug, Clone, Copy)]
pub enum PopupLine {
    /// `{label} : {value}`
    Labelled {
        label: &'static str,
        key: &'static str,
    },
    /// The value on its own.
    Bare { key: &'static str },
}

/// Popup layout of a layer: the name in bold followed by a fixed list of attribute lines,
/// separated by `<br>`. Attribute values are inserted verbatim.
#[derive(Debug, Clone, Copy)]
pub struct PopupTemplate {
    pub name_key: &'static str,
    pub fallback_name: &'static str,
    pub lines: &'static [PopupLine],
}

impl PopupTemplate {
    pub fn render(&self, feature: &Feature) -> String {
        let name = feature
            .attribute(self.name_key)
            .filter(|value| !is_falsy(value))
            .map(|value| value.to_string())
            .unwrap_or_else(|| self.fallback_name.to_string());

        let mut popup = format!("<b>{}</b>", name);
        for line in self.lines {
            popup.push_str("<br>");
            match line {
                PopupLine::Labelled { label, key } => {
                    popup.push_str(&format!("{} : {}", label, value_or_missing(feature, key)))
                }
                PopupLine::Bare { key } => popup.push_str(&value_or_missing(feature, key)),
            }
        }
        popup
    }
}

/// Names that count as missing: `""`, `0`, NaN and `false`.
fn is_falsy(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::String(value) => value.is_empty(),
        AttributeValue::Number(value) => *value == 0.0 || value.is_nan(),
        AttributeValue::Bool(value) => !value,
    }
}

fn value_or_missing(feature: &Feature, key: &str) -> String {
    match feature.attribute(key) {
        Some(value) => value.to_string(),
        None => MISSING_VALUE.to_string(),
    }
}

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS hex colour, `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        let value = value.trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("Colour '{}' must start with '#'", value))?;
        if !(digits.len() == 3 || digits.len() == 6)
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(anyhow!(
                "Colour '{}' must have 3 or 6 hexadecimal digits",
                value
            ));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Colours of the built-in tables, which are known to be well formed.
    pub(crate) fn from_table(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual parameters of a rendered feature. Field names follow the Leaflet path options so the
/// serialised form can be handed to a web map as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Circle marker radius in pixels, points only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Color, Style};

    #[rstest]
    #[case("#0077ff", Some("#0077ff"))]
    #[case("#000", Some("#000"))]
    #[case(" #ABCDEF ", Some("#abcdef"))]
    #[case("0077ff", None)]
    #[case("#0077f", None)]
    #[case("#gggggg", None)]
    #[case("blue", None)]
    fn test_parse_color(#[case] input: &str, #[case] expected: Option<&str>) {
        let parsed = Color::parse(input).ok();
        assert_eq!(parsed.as_ref().map(Color::as_str), expected);
    }

    #[test]
    fn test_style_serializes_leaflet_options() {
        let style = Style {
            color: Color::from_table("#000"),
            weight: 1.0,
            opacity: 1.0,
            fill_color: Some(Color::from_table("#0077ff")),
            fill_opacity: Some(0.8),
            radius: None,
        };
        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "color": "#000",
                "weight": 1.0,
                "opacity": 1.0,
                "fillColor": "#0077ff",
                "fillOpacity": 0.8
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_color() {
        assert!(serde_yaml::from_str::<Color>("'#1565c0'").is_ok());
        assert!(serde_yaml::from_str::<Color>("navy").is_err());
    }
}

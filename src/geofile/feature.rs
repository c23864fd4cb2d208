use std::{collections::HashMap, fmt};

/// Attribute value used for styling and popups. GeoJSON properties that are `null`, arrays or
/// objects have no attribute value but are still kept in the feature's properties.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl AttributeValue {
    pub fn from_json(value: &geojson::JsonValue) -> Option<Self> {
        match value {
            geojson::JsonValue::String(value) => Some(AttributeValue::String(value.to_owned())),
            geojson::JsonValue::Number(value) => value.as_f64().map(AttributeValue::Number),
            geojson::JsonValue::Bool(value) => Some(AttributeValue::Bool(*value)),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(value) => write!(f, "{}", value),
            // f64 Display never uses an exponent and prints integral values without `.0`.
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

/// Named attributes of a feature.
pub type FeatureMap = HashMap<String, AttributeValue>;

pub fn attributes_from_properties(properties: &geojson::JsonObject) -> FeatureMap {
    properties
        .iter()
        .filter_map(|(key, value)| {
            AttributeValue::from_json(value).map(|value| (key.to_owned(), value))
        })
        .collect()
}

pub fn attributes_to_properties(attributes: &FeatureMap) -> geojson::JsonObject {
    attributes
        .iter()
        .map(|(key, value)| {
            let value = match value {
                AttributeValue::String(value) => geojson::JsonValue::from(value.as_str()),
                AttributeValue::Number(value) => geojson::JsonValue::from(*value),
                AttributeValue::Bool(value) => geojson::JsonValue::from(*value),
            };
            (key.to_owned(), value)
        })
        .collect()
}

/// The kind of geometry a feature has, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl GeometryKind {
    /// Classify a geometry. Returns `None` for geometry collections, which cannot be drawn with a
    /// single style.
    pub fn of(geometry: &geo::Geometry) -> Option<Self> {
        match geometry {
            geo::Geometry::Point(_) | geo::Geometry::MultiPoint(_) => Some(GeometryKind::Point),
            geo::Geometry::Line(_)
            | geo::Geometry::LineString(_)
            | geo::Geometry::MultiLineString(_) => Some(GeometryKind::Line),
            geo::Geometry::Polygon(_)
            | geo::Geometry::MultiPolygon(_)
            | geo::Geometry::Rect(_)
            | geo::Geometry::Triangle(_) => Some(GeometryKind::Polygon),
            geo::Geometry::GeometryCollection(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: geo::Geometry,
    pub kind: GeometryKind,
    pub attributes: FeatureMap,
    /// The properties as read, written back unchanged.
    pub properties: geojson::JsonObject,
    pub id: Option<geojson::feature::Id>,
    pub foreign_members: Option<geojson::JsonObject>,
}

impl Feature {
    pub fn new(geometry: geo::Geometry, attributes: FeatureMap) -> Option<Self> {
        let properties = attributes_to_properties(&attributes);
        let kind = GeometryKind::of(&geometry)?;
        Some(Self {
            geometry,
            kind,
            attributes,
            properties,
            id: None,
            foreign_members: None,
        })
    }

    /// Build a feature from GeoJSON properties, keeping them for output.
    pub fn from_properties(
        geometry: geo::Geometry,
        properties: geojson::JsonObject,
    ) -> Option<Self> {
        let kind = GeometryKind::of(&geometry)?;
        Some(Self {
            geometry,
            kind,
            attributes: attributes_from_properties(&properties),
            properties,
            id: None,
            foreign_members: None,
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// The category label stored under `key`. Blank labels count as absent.
    pub fn category(&self, key: &str) -> Option<String> {
        let category = self.attribute(key)?.to_string();
        let category = category.trim();
        if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        }
    }
}

impl From<geo::Point> for Feature {
    fn from(value: geo::Point) -> Self {
        Self {
            geometry: geo::Geometry::Point(value),
            kind: GeometryKind::Point,
            attributes: FeatureMap::new(),
            properties: geojson::JsonObject::new(),
            id: None,
            foreign_members: None,
        }
    }
}

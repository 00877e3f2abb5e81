use crate::geo::LngLat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON geometry subset used by the report map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// GeoJSON feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

fn label_props(label: Option<&str>) -> Map<String, Value> {
    let mut props = Map::new();
    if let Some(label) = label {
        props.insert("label".to_string(), Value::String(label.to_string()));
    }
    props
}

impl Feature {
    fn with_geometry(geometry: Geometry, label: Option<&str>) -> Self {
        Self {
            kind: "Feature".to_string(),
            properties: label_props(label),
            geometry,
        }
    }

    pub fn point(position: LngLat, label: Option<&str>) -> Self {
        Self::with_geometry(
            Geometry::Point {
                coordinates: position.to_coordinates(),
            },
            label,
        )
    }

    pub fn line(points: &[LngLat], label: Option<&str>) -> Self {
        Self::with_geometry(
            Geometry::LineString {
                coordinates: points.iter().map(|p| p.to_coordinates()).collect(),
            },
            label,
        )
    }

    pub fn polygon(ring: &[LngLat], label: Option<&str>) -> Self {
        Self::with_geometry(
            Geometry::Polygon {
                coordinates: vec![ring.iter().map(|p| p.to_coordinates()).collect()],
            },
            label,
        )
    }

    pub fn label(&self) -> Option<&str> {
        self.properties.get("label").and_then(Value::as_str)
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_serializes_with_geojson_tags() {
        let feature = Feature::point(LngLat::new(7.18, 52.33), Some("Mast 1"));
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], 7.18);
        assert_eq!(value["properties"]["label"], "Mast 1");
    }

    #[test]
    fn polygon_wraps_ring_in_outer_array() {
        let ring = [
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(1.0, 1.0),
            LngLat::new(0.0, 0.0),
        ];
        let feature = Feature::polygon(&ring, None);
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["geometry"]["coordinates"][0].as_array().unwrap().len(), 4);
    }
}

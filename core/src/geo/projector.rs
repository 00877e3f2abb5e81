use crate::prelude::LocalPoint;
use crate::report::GeoCenter;
use serde::{Deserialize, Serialize};

/// Geographic position, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn to_coordinates(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Meters per degree of latitude, constant everywhere.
pub const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Meters per degree of longitude, shrinking with latitude.
pub fn meters_per_deg_lng(lat_deg: f64) -> f64 {
    METERS_PER_DEG_LAT * lat_deg.to_radians().cos()
}

/// Converts a local (x, y) meter offset to geographic coordinates.
///
/// The local frame is left-handed: Y+ points at compass bearing B
/// (clockwise from true north), X+ points at bearing B − 90°. For a
/// direction at bearing θ the east component is sin θ and the north
/// component is cos θ, hence:
///
/// ```text
/// geoEast  = −x · cos B + y · sin B
/// geoNorth =  x · sin B + y · cos B
/// ```
///
/// Meter offsets become degree offsets at the center's latitude — a linear
/// approximation with sub-meter distortion over field-sized geometry.
pub fn local_to_lng_lat(x: f64, y: f64, center: &GeoCenter) -> LngLat {
    let bearing = center.field_bearing.to_radians();

    let geo_east = -x * bearing.cos() + y * bearing.sin();
    let geo_north = x * bearing.sin() + y * bearing.cos();

    LngLat::new(
        center.lng + geo_east / meters_per_deg_lng(center.lat),
        center.lat + geo_north / METERS_PER_DEG_LAT,
    )
}

/// Projects a ring of local points and closes it (first vertex repeated).
pub fn local_ring_to_lng_lat(points: &[LocalPoint], center: &GeoCenter) -> Vec<LngLat> {
    let mut ring: Vec<LngLat> = points
        .iter()
        .map(|p| local_to_lng_lat(p.x, p.y, center))
        .collect();
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

/// Closed geographic ring for the field rectangle given its half-dimensions.
pub fn field_polygon_ring(half_width: f64, half_length: f64, center: &GeoCenter) -> Vec<LngLat> {
    let corners = [
        LocalPoint::new(-half_width, half_length),
        LocalPoint::new(half_width, half_length),
        LocalPoint::new(half_width, -half_length),
        LocalPoint::new(-half_width, -half_length),
    ];
    local_ring_to_lng_lat(&corners, center)
}

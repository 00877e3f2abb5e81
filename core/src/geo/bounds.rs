use crate::geo::projector::{meters_per_deg_lng, LngLat, METERS_PER_DEG_LAT};
use serde::{Deserialize, Serialize};

/// Geographic rectangle used for initial map framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

/// Min/max rectangle over a point set, expanded by a meter-based padding
/// converted to degrees at the box's average latitude. Empty input yields
/// no bounds rather than an infinite rectangle.
pub fn bounding_box(points: &[LngLat], padding_meters: f64) -> Option<GeoBounds> {
    let first = points.first()?;
    let mut min_lng = first.lng;
    let mut max_lng = first.lng;
    let mut min_lat = first.lat;
    let mut max_lat = first.lat;

    for p in &points[1..] {
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }

    let avg_lat = (min_lat + max_lat) / 2.0;
    let d_lng = padding_meters / meters_per_deg_lng(avg_lat);
    let d_lat = padding_meters / METERS_PER_DEG_LAT;

    Some(GeoBounds {
        south_west: LngLat::new(min_lng - d_lng, min_lat - d_lat),
        north_east: LngLat::new(max_lng + d_lng, max_lat + d_lat),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point_set_has_no_bounds() {
        assert!(bounding_box(&[], 40.0).is_none());
    }

    #[test]
    fn box_covers_all_points() {
        let points = [
            LngLat::new(7.18, 52.33),
            LngLat::new(7.19, 52.34),
            LngLat::new(7.185, 52.335),
        ];
        let bounds = bounding_box(&points, 0.0).unwrap();
        assert_eq!(bounds.south_west, LngLat::new(7.18, 52.33));
        assert_eq!(bounds.north_east, LngLat::new(7.19, 52.34));
    }

    #[test]
    fn padding_expands_in_degrees() {
        let points = [LngLat::new(7.0, 52.0)];
        let bounds = bounding_box(&points, METERS_PER_DEG_LAT).unwrap();
        // One full degree of latitude on each side.
        assert!((bounds.north_east.lat - 53.0).abs() < 1e-9);
        assert!((bounds.south_west.lat - 51.0).abs() < 1e-9);
        // More than a degree of longitude at 52° N.
        assert!(bounds.north_east.lng - 7.0 > 1.0);
    }
}

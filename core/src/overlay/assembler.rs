use crate::geo::{bounding_box, field_polygon_ring, local_to_lng_lat, GeoBounds, LngLat};
use crate::overlay::features::{Feature, FeatureCollection};
use crate::prelude::LocalPoint;
use crate::report::ReportPayload;
use serde::{Deserialize, Serialize};

/// Meter padding around the framing bounds, matching the production map.
const MAP_BOUNDS_PADDING_M: f64 = 30.0;

/// Geographic feature collections for the external map surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapOverlay {
    /// Field boundary rectangle.
    pub field: Feature,
    /// Mast positions, labelled "Mast 1".. in payload order.
    pub masts: FeatureCollection,
    /// Aiming segments from each mast to its resolved target.
    pub aiming_lines: FeatureCollection,
    /// Building facade polylines.
    pub facades: FeatureCollection,
    /// Label anchor per facade.
    pub facade_labels: FeatureCollection,
    /// Initial framing over every projected point, 30 m padded.
    pub bounds: Option<GeoBounds>,
}

/// Facade label anchor: average of the endpoints for a 2-point line, the
/// literal middle vertex for longer lines.
fn facade_label_anchor(line: &[LocalPoint]) -> LocalPoint {
    if line.len() == 2 {
        LocalPoint::new(
            (line[0].x + line[1].x) / 2.0,
            (line[0].y + line[1].y) / 2.0,
        )
    } else {
        line[line.len() / 2]
    }
}

/// Projects the payload's local-coordinate geometry into geographic
/// feature collections. Pure transform; masts without a resolvable aiming
/// target and facades with fewer than two vertices are skipped.
pub fn assemble_overlay(payload: &ReportPayload) -> MapOverlay {
    assemble_overlay_with_padding(payload, MAP_BOUNDS_PADDING_M)
}

/// Same as [`assemble_overlay`] with a caller-chosen framing padding.
pub fn assemble_overlay_with_padding(payload: &ReportPayload, padding_meters: f64) -> MapOverlay {
    let center = &payload.geo_center;
    let half_width = payload.field.half_width();
    let half_length = payload.field.half_length();

    let field_ring = field_polygon_ring(half_width, half_length, center);
    let field = Feature::polygon(&field_ring, None);

    let mut all_points: Vec<LngLat> = field_ring.clone();

    let mast_features: Vec<Feature> = payload
        .masts
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let position = local_to_lng_lat(m.x, m.y, center);
            all_points.push(position);
            Feature::point(position, Some(&format!("Mast {}", i + 1)))
        })
        .collect();

    let aiming_features: Vec<Feature> = payload
        .masts
        .iter()
        .filter_map(|m| {
            let target = payload.aiming_target(m)?;
            let from = local_to_lng_lat(m.x, m.y, center);
            let to = local_to_lng_lat(target.x, target.y, center);
            Some(Feature::line(&[from, to], None))
        })
        .collect();

    let mut facade_features = Vec::new();
    let mut facade_label_features = Vec::new();
    for facade in &payload.facades {
        if facade.line.len() < 2 {
            continue;
        }
        let line: Vec<LngLat> = facade
            .line
            .iter()
            .map(|p| local_to_lng_lat(p.x, p.y, center))
            .collect();
        all_points.extend(line.iter().copied());
        facade_features.push(Feature::line(&line, Some(&facade.label)));

        let anchor = facade_label_anchor(&facade.line);
        facade_label_features.push(Feature::point(
            local_to_lng_lat(anchor.x, anchor.y, center),
            Some(&facade.label),
        ));
    }

    let bounds = bounding_box(&all_points, padding_meters);

    MapOverlay {
        field,
        masts: FeatureCollection::new(mast_features),
        aiming_lines: FeatureCollection::new(aiming_features),
        facades: FeatureCollection::new(facade_features),
        facade_labels: FeatureCollection::new(facade_label_features),
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::features::Geometry;
    use crate::report::{
        BuildingFacade, Direction, FieldDimensions, GeoCenter, LightPoint,
    };

    fn payload() -> ReportPayload {
        ReportPayload {
            field: FieldDimensions {
                width: 68.0,
                length: 105.0,
            },
            points: Vec::new(),
            masts: vec![
                LightPoint {
                    id: 19,
                    x: -39.45,
                    y: 57.15,
                    mast_height: 16.0,
                    direction_id: Some(19),
                    tilt: 10.0,
                },
                LightPoint {
                    id: 20,
                    x: 39.38,
                    y: -57.89,
                    mast_height: 16.0,
                    direction_id: None,
                    tilt: 10.0,
                },
            ],
            directions: vec![Direction {
                id: 19,
                vector: None,
                aiming_line: vec![
                    LocalPoint::new(-39.45, 57.15),
                    LocalPoint::new(-28.84, 46.55),
                ],
            }],
            facades: vec![
                BuildingFacade {
                    label: "Fassade 1".to_string(),
                    line: vec![LocalPoint::new(72.90, 43.27), LocalPoint::new(70.51, 29.44)],
                },
                BuildingFacade {
                    label: "Fassade 3".to_string(),
                    line: vec![
                        LocalPoint::new(50.0, 10.0),
                        LocalPoint::new(55.0, 12.0),
                        LocalPoint::new(60.0, 20.0),
                    ],
                },
                BuildingFacade {
                    label: "degenerate".to_string(),
                    line: vec![LocalPoint::new(1.0, 1.0)],
                },
            ],
            geo_center: GeoCenter {
                lng: 7.18433015,
                lat: 52.33465923,
                field_bearing: 323.7,
            },
        }
    }

    #[test]
    fn field_polygon_ring_is_closed() {
        let overlay = assemble_overlay(&payload());
        match &overlay.field.geometry {
            Geometry::Polygon { coordinates } => {
                let ring = &coordinates[0];
                assert_eq!(ring.len(), 5);
                assert_eq!(ring[0], ring[4]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn masts_are_labelled_in_order() {
        let overlay = assemble_overlay(&payload());
        assert_eq!(overlay.masts.features.len(), 2);
        assert_eq!(overlay.masts.features[0].label(), Some("Mast 1"));
        assert_eq!(overlay.masts.features[1].label(), Some("Mast 2"));
    }

    #[test]
    fn mast_without_direction_gets_no_aiming_line() {
        let overlay = assemble_overlay(&payload());
        assert_eq!(overlay.aiming_lines.features.len(), 1);
    }

    #[test]
    fn degenerate_facade_is_skipped() {
        let overlay = assemble_overlay(&payload());
        assert_eq!(overlay.facades.features.len(), 2);
        assert_eq!(overlay.facade_labels.features.len(), 2);
    }

    #[test]
    fn two_point_facade_label_sits_at_the_midpoint() {
        let anchor = facade_label_anchor(&[
            LocalPoint::new(72.90, 43.27),
            LocalPoint::new(70.51, 29.44),
        ]);
        assert!((anchor.x - 71.705).abs() < 1e-9);
        assert!((anchor.y - 36.355).abs() < 1e-9);
    }

    #[test]
    fn longer_facade_label_uses_the_middle_vertex() {
        let anchor = facade_label_anchor(&[
            LocalPoint::new(50.0, 10.0),
            LocalPoint::new(55.0, 12.0),
            LocalPoint::new(60.0, 20.0),
        ]);
        assert_eq!(anchor, LocalPoint::new(55.0, 12.0));
    }

    #[test]
    fn bounds_cover_the_eastern_facade() {
        let overlay = assemble_overlay(&payload());
        let bounds = overlay.bounds.unwrap();
        // Facade vertices sit well outside the field rectangle; the
        // framing box must still contain their projection.
        let facade_pt = local_to_lng_lat(72.90, 43.27, &payload().geo_center);
        assert!(facade_pt.lng >= bounds.south_west.lng);
        assert!(facade_pt.lng <= bounds.north_east.lng);
        assert!(facade_pt.lat >= bounds.south_west.lat);
        assert!(facade_pt.lat <= bounds.north_east.lat);
    }

    #[test]
    fn empty_payload_still_frames_the_field() {
        let mut p = payload();
        p.masts.clear();
        p.directions.clear();
        p.facades.clear();
        let overlay = assemble_overlay(&p);
        assert!(overlay.bounds.is_some());
        assert!(overlay.aiming_lines.features.is_empty());
    }
}

use crate::prelude::{LocalPoint, ReportError, ReportResult, Vector3};
use serde::{Deserialize, Serialize};

/// Field footprint in meters. X spans the width, Y spans the length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub width: f64,
    pub length: f64,
}

impl FieldDimensions {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_length(&self) -> f64 {
        self.length / 2.0
    }
}

/// One illuminance sample in local coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Horizontal illuminance (lux).
    pub eh: f64,
    /// Vertical illuminance (lux), absent in most survey dumps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev: Option<f64>,
    /// Candela value, when the survey provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cd: Option<f64>,
}

/// Mast position with a reference to its aiming direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub mast_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_id: Option<u32>,
    pub tilt: f64,
}

/// Aiming direction: either an explicit line (mast position, aiming point)
/// or a bare vector when the survey stores no line geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Direction {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vector3>,
    #[serde(default)]
    pub aiming_line: Vec<LocalPoint>,
}

/// Building wall face as a polyline in local coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingFacade {
    pub label: String,
    pub line: Vec<LocalPoint>,
}

/// Anchor for projecting local coordinates to geography. `field_bearing`
/// is the compass bearing (degrees clockwise from true north) of the
/// local Y+ axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoCenter {
    pub lng: f64,
    pub lat: f64,
    pub field_bearing: f64,
}

/// The already-deserialized survey report consumed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub field: FieldDimensions,
    pub points: Vec<CalculationPoint>,
    pub masts: Vec<LightPoint>,
    pub directions: Vec<Direction>,
    pub facades: Vec<BuildingFacade>,
    pub geo_center: GeoCenter,
}

impl ReportPayload {
    /// Rejects payloads the engine cannot give meaning to. Missing optional
    /// geometry is not an error; it is skipped downstream.
    pub fn validate(&self) -> ReportResult<()> {
        if !(self.field.width > 0.0 && self.field.length > 0.0) {
            return Err(ReportError::InvalidField(format!(
                "width {} x length {}",
                self.field.width, self.field.length
            )));
        }
        if !self.geo_center.field_bearing.is_finite() {
            return Err(ReportError::InvalidGeoCenter(format!(
                "bearing {}",
                self.geo_center.field_bearing
            )));
        }
        if !(self.geo_center.lat.abs() <= 90.0) {
            return Err(ReportError::InvalidGeoCenter(format!(
                "latitude {}",
                self.geo_center.lat
            )));
        }
        Ok(())
    }

    /// Resolves the point a mast aims at: the second vertex of the
    /// direction's aiming line when present, otherwise the direction
    /// vector, otherwise nothing.
    pub fn aiming_target(&self, mast: &LightPoint) -> Option<LocalPoint> {
        let direction_id = mast.direction_id?;
        let direction = self.directions.iter().find(|d| d.id == direction_id)?;
        if direction.aiming_line.len() >= 2 {
            return Some(direction.aiming_line[1]);
        }
        direction
            .vector
            .map(|v| LocalPoint::new(v.x, v.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with(directions: Vec<Direction>, masts: Vec<LightPoint>) -> ReportPayload {
        ReportPayload {
            field: FieldDimensions {
                width: 68.0,
                length: 105.0,
            },
            points: Vec::new(),
            masts,
            directions,
            facades: Vec::new(),
            geo_center: GeoCenter {
                lng: 7.18433015,
                lat: 52.33465923,
                field_bearing: 323.7,
            },
        }
    }

    fn mast(direction_id: Option<u32>) -> LightPoint {
        LightPoint {
            id: 19,
            x: -39.45,
            y: 57.15,
            mast_height: 16.0,
            direction_id,
            tilt: 10.0,
        }
    }

    #[test]
    fn validate_rejects_non_positive_field() {
        let mut payload = payload_with(Vec::new(), Vec::new());
        payload.field.width = 0.0;
        assert!(matches!(
            payload.validate(),
            Err(ReportError::InvalidField(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_latitude() {
        let mut payload = payload_with(Vec::new(), Vec::new());
        payload.geo_center.lat = 95.0;
        assert!(matches!(
            payload.validate(),
            Err(ReportError::InvalidGeoCenter(_))
        ));
    }

    #[test]
    fn aiming_target_prefers_line_over_vector() {
        let direction = Direction {
            id: 19,
            vector: Some(Vector3 {
                x: 1.0,
                y: 2.0,
                z: 0.0,
            }),
            aiming_line: vec![LocalPoint::new(-39.45, 57.15), LocalPoint::new(-28.84, 46.55)],
        };
        let payload = payload_with(vec![direction], vec![mast(Some(19))]);
        let target = payload.aiming_target(&payload.masts[0]).unwrap();
        assert_eq!(target, LocalPoint::new(-28.84, 46.55));
    }

    #[test]
    fn aiming_target_falls_back_to_vector() {
        let direction = Direction {
            id: 19,
            vector: Some(Vector3 {
                x: -24.45,
                y: -0.37,
                z: 0.0,
            }),
            aiming_line: Vec::new(),
        };
        let payload = payload_with(vec![direction], vec![mast(Some(19))]);
        let target = payload.aiming_target(&payload.masts[0]).unwrap();
        assert_eq!(target, LocalPoint::new(-24.45, -0.37));
    }

    #[test]
    fn aiming_target_skips_mast_without_direction() {
        let payload = payload_with(Vec::new(), vec![mast(None)]);
        assert!(payload.aiming_target(&payload.masts[0]).is_none());
    }
}

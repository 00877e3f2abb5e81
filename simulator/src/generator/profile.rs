use anyhow::Context;
use luxcore::prelude::LocalPoint;
use luxcore::report::{
    BuildingFacade, CalculationPoint, Direction, FieldDimensions, GeoCenter, LightPoint,
    ReportPayload,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic survey report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub field_width: f64,
    pub field_length: f64,
    /// Lattice pitch of the calculation grid, meters.
    pub pitch: f64,
    /// Illuminance at the field center, lux.
    pub peak_lux: f64,
    /// Jitter amplitude added to every sample, lux.
    pub noise: f64,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            field_width: 68.0,
            field_length: 105.0,
            pitch: 7.0,
            peak_lux: 130.0,
            noise: 3.0,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

impl SampleConfig {
    fn normalized_pitch(&self) -> f64 {
        if self.pitch > 0.0 {
            self.pitch
        } else {
            7.0
        }
    }
}

/// Geographic center of the sample field (Ibbenbüren survey dump):
/// Y+ axis points NNW at bearing 323.7°.
fn sample_geo_center() -> GeoCenter {
    GeoCenter {
        lng: 7.18433015,
        lat: 52.33465923,
        field_bearing: 323.7,
    }
}

/// The six masts of the sample survey, positioned outside the field
/// corners and midlines, each aiming inward.
fn sample_masts(half_width: f64, half_length: f64) -> (Vec<LightPoint>, Vec<Direction>) {
    let mx = half_width + 5.4;
    let my = half_length + 5.0;
    let positions = [
        (-mx, my),
        (-mx, 0.0),
        (-mx, -my),
        (mx, -my),
        (mx, 0.0),
        (mx, my),
    ];

    let mut masts = Vec::with_capacity(positions.len());
    let mut directions = Vec::with_capacity(positions.len());
    for (i, &(x, y)) in positions.iter().enumerate() {
        let id = 19 + i as u32;
        masts.push(LightPoint {
            id,
            x,
            y,
            mast_height: 16.0,
            direction_id: Some(id),
            tilt: 10.0,
        });
        directions.push(Direction {
            id,
            vector: None,
            aiming_line: vec![
                LocalPoint::new(x, y),
                LocalPoint::new(x * 0.73, y * 0.81),
            ],
        });
    }
    (masts, directions)
}

/// Building facades from the sample dump: two straight walls and one
/// L-shaped wall east of the field.
fn sample_facades() -> Vec<BuildingFacade> {
    vec![
        BuildingFacade {
            label: "Fassade 1".to_string(),
            line: vec![LocalPoint::new(72.90, 43.27), LocalPoint::new(70.51, 29.44)],
        },
        BuildingFacade {
            label: "Fassade 2".to_string(),
            line: vec![LocalPoint::new(65.39, 23.26), LocalPoint::new(59.63, -1.75)],
        },
        BuildingFacade {
            label: "Fassade 3".to_string(),
            line: vec![
                LocalPoint::new(50.38, -24.98),
                LocalPoint::new(54.74, -11.87),
                LocalPoint::new(57.78, -12.84),
            ],
        },
    ]
}

fn lattice_positions(extent: f64, pitch: f64) -> Vec<f64> {
    let count = ((extent / pitch).floor() as usize).max(1);
    let span = (count - 1) as f64 * pitch;
    (0..count).map(|i| -span / 2.0 + i as f64 * pitch).collect()
}

fn build_calculation_points(config: &SampleConfig) -> anyhow::Result<Vec<CalculationPoint>> {
    if !(config.field_width > 0.0 && config.field_length > 0.0) {
        anyhow::bail!(
            "field dimensions must be positive, got {} x {}",
            config.field_width,
            config.field_length
        );
    }

    let pitch = config.normalized_pitch();
    let xs = lattice_positions(config.field_width, pitch);
    let ys = lattice_positions(config.field_length, pitch);
    let half_w = config.field_width / 2.0;
    let half_l = config.field_length / 2.0;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut points = Vec::with_capacity(xs.len() * ys.len());
    let mut id = 820;

    for &x in &xs {
        for &y in &ys {
            // Bright center, falling off toward the edges.
            let nx = x / half_w;
            let ny = y / half_l;
            let falloff = (1.0 - nx * nx) * (1.0 - ny * ny);
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            let eh = config.peak_lux * (0.55 + 0.45 * falloff) + jitter;

            points.push(CalculationPoint {
                id,
                x,
                y,
                eh,
                ev: None,
                cd: Some(0.19),
            });
            id += 1;
        }
    }

    Ok(points)
}

pub fn build_report_payload_from_config(config: &SampleConfig) -> anyhow::Result<ReportPayload> {
    let points =
        build_calculation_points(config).context("building synthetic calculation grid")?;
    let field = FieldDimensions {
        width: config.field_width,
        length: config.field_length,
    };
    let (masts, directions) = sample_masts(field.half_width(), field.half_length());

    Ok(ReportPayload {
        field,
        points,
        masts,
        directions,
        facades: sample_facades(),
        geo_center: sample_geo_center(),
    })
}

pub fn build_report_payload(field_width: f64, field_length: f64) -> anyhow::Result<ReportPayload> {
    let config = SampleConfig {
        field_width,
        field_length,
        ..Default::default()
    };
    build_report_payload_from_config(&config)
}

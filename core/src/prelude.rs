use serde::{Deserialize, Serialize};

/// A position in the local field frame: meters, origin at field center,
/// X along the field width, Y along the field length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 3D vector used by aiming directions (z is mounting height related).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Contract-violation errors for incoming report payloads.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("invalid field dimensions: {0}")]
    InvalidField(String),
    #[error("invalid geographic center: {0}")]
    InvalidGeoCenter(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

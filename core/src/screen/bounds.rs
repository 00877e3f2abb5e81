use crate::report::{FieldDimensions, LightPoint};
use serde::{Deserialize, Serialize};

/// Padding ratios applied to the raw extent so mast labels near the edge
/// stay inside the canvas.
const PAD_RATIO_X: f64 = 0.07;
const PAD_RATIO_Y: f64 = 0.05;

/// Axis-aligned rectangle in local coordinates covering everything that
/// gets drawn: the field footprint, all mast positions, plus a
/// proportional margin.
///
/// Display convention: the y-range maps to the horizontal screen axis,
/// the x-range to the vertical one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WorldBounds {
    /// Bounds over the field footprint and all masts, padded.
    pub fn for_scene(field: &FieldDimensions, masts: &[LightPoint]) -> Self {
        let mut x_min = -field.half_width();
        let mut x_max = field.half_width();
        let mut y_min = -field.half_length();
        let mut y_max = field.half_length();

        for m in masts {
            x_min = x_min.min(m.x);
            x_max = x_max.max(m.x);
            y_min = y_min.min(m.y);
            y_max = y_max.max(m.y);
        }

        let pad_x = (x_max - x_min) * PAD_RATIO_X;
        let pad_y = (y_max - y_min) * PAD_RATIO_Y;

        Self {
            x_min: x_min - pad_x,
            x_max: x_max + pad_x,
            y_min: y_min - pad_y,
            y_max: y_max + pad_y,
        }
    }

    /// Extent mapped to the horizontal screen axis.
    pub fn h_range(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Extent mapped to the vertical screen axis.
    pub fn v_range(&self) -> f64 {
        self.x_max - self.x_min
    }
}

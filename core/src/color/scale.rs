use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS form, e.g. `rgb(139, 69, 19)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One calibration stop of the heatmap gradient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GradientStop {
    pub value: f64,
    pub color: Rgb,
}

/// Production gradient: brown (low) over orange and yellow to green (high).
const GRADIENT_STOPS: [GradientStop; 8] = [
    GradientStop { value: 0.0, color: Rgb::new(139, 69, 19) },
    GradientStop { value: 60.0, color: Rgb::new(180, 83, 9) },
    GradientStop { value: 75.0, color: Rgb::new(217, 119, 6) },
    GradientStop { value: 85.0, color: Rgb::new(234, 179, 8) },
    GradientStop { value: 95.0, color: Rgb::new(132, 204, 22) },
    GradientStop { value: 110.0, color: Rgb::new(34, 197, 94) },
    GradientStop { value: 130.0, color: Rgb::new(21, 128, 61) },
    GradientStop { value: 200.0, color: Rgb::new(21, 128, 61) },
];

const TEXT_LIGHT: Rgb = Rgb::new(255, 255, 255);
const TEXT_DARK: Rgb = Rgb::new(26, 26, 46);

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear color scale over calibration stops sorted ascending
/// by value. Total over all finite inputs: values outside the calibrated
/// range clamp to the first/last stop.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<GradientStop>,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            stops: GRADIENT_STOPS.to_vec(),
        }
    }
}

impl ColorScale {
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn color_for(&self, lux: f64) -> Rgb {
        let first = match self.stops.first() {
            Some(stop) => stop,
            None => return Rgb::new(0, 0, 0),
        };
        if lux <= first.value {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if lux <= curr.value {
                let t = (lux - prev.value) / (curr.value - prev.value);
                return Rgb::new(
                    lerp(prev.color.r as f64, curr.color.r as f64, t).round() as u8,
                    lerp(prev.color.g as f64, curr.color.g as f64, t).round() as u8,
                    lerp(prev.color.b as f64, curr.color.b as f64, t).round() as u8,
                );
            }
        }

        // Above the last stop: clamp, no extrapolation.
        self.stops[self.stops.len() - 1].color
    }
}

/// Maps a lux value to a heatmap color using the production gradient.
pub fn lux_to_color(lux: f64) -> Rgb {
    ColorScale::default().color_for(lux)
}

/// Contrasting label color. Fixed thresholds on the lux domain, not derived
/// from the interpolated color's luminance: dark text only on the yellow
/// and lime band between 75 and 120 lux.
pub fn text_color_for_lux(lux: f64) -> Rgb {
    if lux < 75.0 || lux > 120.0 {
        TEXT_LIGHT
    } else {
        TEXT_DARK
    }
}

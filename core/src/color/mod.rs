pub mod scale;

pub use scale::{lux_to_color, text_color_for_lux, ColorScale, GradientStop, Rgb};

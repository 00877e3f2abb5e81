pub mod assembler;
pub mod features;

pub use assembler::{assemble_overlay, assemble_overlay_with_padding, MapOverlay};
pub use features::{Feature, FeatureCollection, Geometry};

pub mod builder;

pub use builder::{build_grid, Grid, GridCell, FALLBACK_PITCH};

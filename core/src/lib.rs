//! Geometric coordinate engine for the lighting-survey report platform.
//!
//! The modules reconcile three coordinate frames (local field frame,
//! geographic frame, screen frame) and provide the illuminance color
//! mapping; everything is a pure synchronous transform apart from the
//! caller-owned [`scene::SceneCache`].

pub mod color;
pub mod geo;
pub mod grid;
pub mod overlay;
pub mod prelude;
pub mod report;
pub mod scene;
pub mod screen;
pub mod telemetry;

pub use prelude::{LocalPoint, ReportError, ReportResult, Vector3};

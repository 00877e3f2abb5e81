//! Caller-owned cache of the derived grid and world bounds.
//!
//! The engine has no UI observation primitive; the host invokes
//! [`SceneCache::rebuild`] whenever the report data changes and
//! [`SceneCache::layout`] whenever the container width changes.

use crate::grid::{build_grid, Grid};
use crate::report::ReportPayload;
use crate::screen::{ScreenMapper, WorldBounds};
use crate::telemetry::{LogManager, MetricsRecorder};

pub struct SceneCache {
    grid: Grid,
    bounds: WorldBounds,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl SceneCache {
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            bounds: WorldBounds::default(),
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Recomputes the grid and world bounds from the payload. Cheap and
    /// eager; bounded by the sample count.
    pub fn rebuild(&mut self, payload: &ReportPayload) {
        self.grid = build_grid(&payload.points);
        self.bounds = WorldBounds::for_scene(&payload.field, &payload.masts);
        self.metrics.record_rebuild();
        self.metrics.record_duplicates(self.grid.duplicates());
        self.logger.record(&format!(
            "scene rebuilt: {} x {} grid, {} duplicate samples",
            self.grid.rows(),
            self.grid.cols(),
            self.grid.duplicates()
        ));
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn world_bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Screen mapping for the current bounds, `None` while the scene is
    /// empty or the container degenerate.
    pub fn layout(&self, container_width: f64) -> Option<ScreenMapper> {
        ScreenMapper::new(self.bounds, container_width)
    }

    /// (rebuilds, duplicate samples) recorded so far.
    pub fn metrics(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }
}

impl Default for SceneCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CalculationPoint, FieldDimensions, GeoCenter};

    fn payload() -> ReportPayload {
        ReportPayload {
            field: FieldDimensions {
                width: 68.0,
                length: 105.0,
            },
            points: vec![
                CalculationPoint {
                    id: 1,
                    x: -5.0,
                    y: -5.0,
                    eh: 90.0,
                    ev: None,
                    cd: None,
                },
                CalculationPoint {
                    id: 2,
                    x: 5.0,
                    y: 5.0,
                    eh: 110.0,
                    ev: None,
                    cd: None,
                },
            ],
            masts: Vec::new(),
            directions: Vec::new(),
            facades: Vec::new(),
            geo_center: GeoCenter {
                lng: 7.18433015,
                lat: 52.33465923,
                field_bearing: 323.7,
            },
        }
    }

    #[test]
    fn empty_cache_has_no_layout_content() {
        let cache = SceneCache::new();
        assert!(cache.grid().is_empty());
        assert!(cache.layout(800.0).is_none());
    }

    #[test]
    fn rebuild_populates_grid_and_bounds() {
        let mut cache = SceneCache::new();
        cache.rebuild(&payload());
        assert_eq!((cache.grid().rows(), cache.grid().cols()), (2, 2));
        assert!(cache.world_bounds().h_range() > 105.0);
        assert!(cache.layout(800.0).is_some());
        assert_eq!(cache.metrics().0, 1);
    }

    #[test]
    fn rebuild_replaces_previous_state() {
        let mut cache = SceneCache::new();
        cache.rebuild(&payload());
        let mut empty = payload();
        empty.points.clear();
        cache.rebuild(&empty);
        assert!(cache.grid().is_empty());
        assert_eq!(cache.metrics().0, 2);
    }
}

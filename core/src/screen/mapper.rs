use crate::grid::Grid;
use crate::prelude::LocalPoint;
use crate::screen::bounds::WorldBounds;
use serde::{Deserialize, Serialize};

/// A point in logical (CSS-pixel) canvas coordinates. Backing-store /
/// device-pixel-ratio scaling is the rendering surface's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub h: f64,
    pub v: f64,
}

/// Aspect-correct affine mapping between world bounds and a canvas.
///
/// The horizontal axis carries the world y-range, the vertical axis the
/// world x-range with increasing x moving up the screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenMapper {
    bounds: WorldBounds,
    width: f64,
    height: f64,
}

impl ScreenMapper {
    /// `None` when the bounds or the container are degenerate — there is
    /// nothing to render, and no division by zero happens downstream.
    pub fn new(bounds: WorldBounds, container_width: f64) -> Option<Self> {
        if !(bounds.h_range() > 0.0 && bounds.v_range() > 0.0 && container_width > 0.0) {
            return None;
        }
        let height = container_width * (bounds.v_range() / bounds.h_range());
        Some(Self {
            bounds,
            width: container_width,
            height,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Horizontal canvas coordinate for a world y.
    pub fn to_screen_h(&self, world_y: f64) -> f64 {
        (world_y - self.bounds.y_min) / self.bounds.h_range() * self.width
    }

    /// Vertical canvas coordinate for a world x (flipped: higher x is
    /// further up, i.e. a smaller v).
    pub fn to_screen_v(&self, world_x: f64) -> f64 {
        (self.bounds.x_max - world_x) / self.bounds.v_range() * self.height
    }

    pub fn to_screen(&self, p: LocalPoint) -> ScreenPoint {
        ScreenPoint {
            h: self.to_screen_h(p.y),
            v: self.to_screen_v(p.x),
        }
    }

    /// Exact inverse of the forward mapping.
    pub fn to_world(&self, h: f64, v: f64) -> LocalPoint {
        LocalPoint {
            x: self.bounds.x_max - v / self.height * self.bounds.v_range(),
            y: self.bounds.y_min + h / self.width * self.bounds.h_range(),
        }
    }

    /// Pixel size of one grid cell, derived from the world pitches.
    pub fn cell_pixel_size(&self, grid: &Grid) -> (f64, f64) {
        let w = grid.pitch_y() / self.bounds.h_range() * self.width;
        let h = grid.pitch_x() / self.bounds.v_range() * self.height;
        (w, h)
    }

    /// Hit test: inverse-maps the screen point, then scans the grid in
    /// row-major order for the first cell whose center is strictly within
    /// half a pitch on both axes. A point exactly on a cell boundary
    /// matches nothing.
    pub fn find_cell_at(&self, grid: &Grid, h: f64, v: f64) -> Option<(usize, usize)> {
        let world = self.to_world(h, v);
        let half_x = grid.pitch_x() / 2.0;
        let half_y = grid.pitch_y() / 2.0;

        grid.cells()
            .find(|cell| (world.x - cell.x).abs() < half_x && (world.y - cell.y).abs() < half_y)
            .map(|cell| (cell.row, cell.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use crate::report::CalculationPoint;

    fn bounds() -> WorldBounds {
        WorldBounds {
            x_min: -38.0,
            x_max: 38.0,
            y_min: -58.0,
            y_max: 58.0,
        }
    }

    fn sample(id: u32, x: f64, y: f64, eh: f64) -> CalculationPoint {
        CalculationPoint {
            id,
            x,
            y,
            eh,
            ev: None,
            cd: None,
        }
    }

    #[test]
    fn aspect_is_locked_to_world_ranges() {
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        assert_eq!(mapper.width(), 800.0);
        let expected = 800.0 * (76.0 / 116.0);
        assert!((mapper.height() - expected).abs() < 1e-9);
    }

    #[test]
    fn degenerate_bounds_yield_no_mapper() {
        let flat = WorldBounds {
            x_min: 1.0,
            x_max: 1.0,
            y_min: -58.0,
            y_max: 58.0,
        };
        assert!(ScreenMapper::new(flat, 800.0).is_none());
        assert!(ScreenMapper::new(bounds(), 0.0).is_none());
    }

    #[test]
    fn forward_mapping_orients_axes() {
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        // Lowest y is the left edge, highest x the top edge.
        assert_eq!(mapper.to_screen_h(-58.0), 0.0);
        assert_eq!(mapper.to_screen_h(58.0), 800.0);
        assert_eq!(mapper.to_screen_v(38.0), 0.0);
        assert!((mapper.to_screen_v(-38.0) - mapper.height()).abs() < 1e-9);
    }

    #[test]
    fn round_trip_is_identity_within_tolerance() {
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        for &(x, y) in &[(0.0, 0.0), (-36.34, -53.42), (30.29, 48.0), (12.5, -7.25)] {
            let s = mapper.to_screen(LocalPoint::new(x, y));
            let w = mapper.to_world(s.h, s.v);
            assert!((w.x - x).abs() < 1e-6 * x.abs().max(1.0));
            assert!((w.y - y).abs() < 1e-6 * y.abs().max(1.0));
        }
    }

    #[test]
    fn hit_test_resolves_cell_centers() {
        let points = vec![
            sample(1, -5.0, -5.0, 10.0),
            sample(2, -5.0, 5.0, 20.0),
            sample(3, 5.0, -5.0, 30.0),
            sample(4, 5.0, 5.0, 40.0),
        ];
        let grid = build_grid(&points);
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        let s = mapper.to_screen(LocalPoint::new(5.0, -5.0));
        assert_eq!(mapper.find_cell_at(&grid, s.h, s.v), Some((0, 0)));
    }

    #[test]
    fn boundary_point_matches_no_cell() {
        let points = vec![sample(1, 0.0, -5.0, 10.0), sample(2, 0.0, 5.0, 20.0)];
        let grid = build_grid(&points);
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        // Exactly midway between the two cell centers along y.
        let s = mapper.to_screen(LocalPoint::new(0.0, 0.0));
        assert_eq!(mapper.find_cell_at(&grid, s.h, s.v), None);
    }

    #[test]
    fn miss_far_from_any_cell() {
        let grid = build_grid(&[sample(1, 0.0, 0.0, 10.0)]);
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        let s = mapper.to_screen(LocalPoint::new(20.0, 40.0));
        assert_eq!(mapper.find_cell_at(&grid, s.h, s.v), None);
    }

    #[test]
    fn cell_pixel_size_scales_with_pitch() {
        let points = vec![
            sample(1, -5.0, -5.0, 10.0),
            sample(2, -5.0, 5.0, 20.0),
            sample(3, 5.0, -5.0, 30.0),
            sample(4, 5.0, 5.0, 40.0),
        ];
        let grid = build_grid(&points);
        let mapper = ScreenMapper::new(bounds(), 800.0).unwrap();
        let (w, h) = mapper.cell_pixel_size(&grid);
        assert!((w - 10.0 / 116.0 * 800.0).abs() < 1e-9);
        assert!((h - 10.0 / 76.0 * mapper.height()).abs() < 1e-9);
    }
}

use crate::report::CalculationPoint;
use crate::telemetry::LogManager;
use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};

/// Pitch substituted when an axis has a single distinct coordinate.
pub const FALLBACK_PITCH: f64 = 1.0;

/// Coordinates are snapped to this lattice before dedup so that noisy
/// input does not explode the axis sets. Survey dumps are pre-quantized
/// well above this resolution.
const SNAP: f64 = 1e6;

fn quantize(v: f64) -> i64 {
    (v * SNAP).round() as i64
}

/// One populated grid cell.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub point: CalculationPoint,
}

/// Dense row/column arrangement of the sampled points.
///
/// Row 0 holds the highest x (up on screen = higher x), column 0 the
/// lowest y (left on screen = lower y). Cells are stored in an arena;
/// the row/col plane indexes into it, `None` marking absent samples.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: Vec<GridCell>,
    index: Array2<Option<usize>>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    duplicates: usize,
}

impl Grid {
    pub fn rows(&self) -> usize {
        self.xs.len()
    }

    pub fn cols(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distinct x values, descending (top row first).
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Distinct y values, ascending (left column first).
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Duplicate (x, y) samples encountered while building; earlier
    /// entries were overwritten.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        let idx = (*self.index.get((row, col))?)?;
        self.cells.get(idx)
    }

    /// Populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// World distance per row along x.
    pub fn pitch_x(&self) -> f64 {
        if self.xs.len() > 1 {
            (self.xs[0] - self.xs[self.xs.len() - 1]) / (self.xs.len() - 1) as f64
        } else {
            FALLBACK_PITCH
        }
    }

    /// World distance per column along y.
    pub fn pitch_y(&self) -> f64 {
        if self.ys.len() > 1 {
            (self.ys[self.ys.len() - 1] - self.ys[0]) / (self.ys.len() - 1) as f64
        } else {
            FALLBACK_PITCH
        }
    }
}

/// Builds the dense grid from an unordered sample set.
///
/// Absent (x, y) combinations stay absent; renderers must treat them as
/// "no data", never as zero. Duplicate samples overwrite earlier ones,
/// each one logged as a warning and counted on the grid.
pub fn build_grid(points: &[CalculationPoint]) -> Grid {
    let logger = LogManager::new();

    let mut xs_seen: BTreeMap<i64, f64> = BTreeMap::new();
    let mut ys_seen: BTreeMap<i64, f64> = BTreeMap::new();
    let mut lookup: HashMap<(i64, i64), usize> = HashMap::new();
    let mut duplicates = 0;

    for (idx, p) in points.iter().enumerate() {
        let kx = quantize(p.x);
        let ky = quantize(p.y);
        xs_seen.entry(kx).or_insert(p.x);
        ys_seen.entry(ky).or_insert(p.y);
        if lookup.insert((kx, ky), idx).is_some() {
            duplicates += 1;
            logger.warn(&format!(
                "duplicate sample at ({}, {}) overwrites an earlier value",
                p.x, p.y
            ));
        }
    }

    let x_keys: Vec<i64> = xs_seen.keys().rev().copied().collect();
    let xs: Vec<f64> = xs_seen.values().rev().copied().collect();
    let y_keys: Vec<i64> = ys_seen.keys().copied().collect();
    let ys: Vec<f64> = ys_seen.values().copied().collect();

    let mut cells = Vec::with_capacity(lookup.len());
    let mut index = Array2::from_elem((xs.len(), ys.len()), None);

    for (row, &kx) in x_keys.iter().enumerate() {
        for (col, &ky) in y_keys.iter().enumerate() {
            if let Some(&point_idx) = lookup.get(&(kx, ky)) {
                let p = &points[point_idx];
                index[(row, col)] = Some(cells.len());
                cells.push(GridCell {
                    row,
                    col,
                    x: p.x,
                    y: p.y,
                    value: p.eh,
                    point: p.clone(),
                });
            }
        }
    }

    Grid {
        cells,
        index,
        xs,
        ys,
        duplicates,
    }
}

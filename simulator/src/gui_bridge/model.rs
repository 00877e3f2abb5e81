use crate::workflow::runner::RenderSummary;
use luxcore::report::ReportPayload;
use serde::{Deserialize, Serialize};

/// State served to the visualizer: the report itself plus the render
/// summary the workflow derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub report: Option<ReportPayload>,
    pub rows: usize,
    pub cols: usize,
    pub cell_count: usize,
    pub duplicate_count: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub notes: Vec<String>,
}

impl VisualizationModel {
    pub fn from_summary(report: ReportPayload, summary: &RenderSummary) -> Self {
        Self {
            report: Some(report),
            rows: summary.rows,
            cols: summary.cols,
            cell_count: summary.cell_count,
            duplicate_count: summary.duplicate_count,
            canvas_width: summary.canvas_width,
            canvas_height: summary.canvas_height,
            notes: summary.notes.clone(),
        }
    }
}

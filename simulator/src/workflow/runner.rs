use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use luxcore::overlay::{assemble_overlay_with_padding, MapOverlay};
use luxcore::report::ReportPayload;
use luxcore::scene::SceneCache;

pub struct RenderSummary {
    pub rows: usize,
    pub cols: usize,
    pub cell_count: usize,
    pub duplicate_count: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub overlay: MapOverlay,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, payload: &ReportPayload) -> anyhow::Result<RenderSummary> {
        payload.validate().context("validating report payload")?;

        let mut scene = SceneCache::new();
        scene.rebuild(payload);

        let overlay = assemble_overlay_with_padding(payload, self.config.map_padding_m);

        let (canvas_width, canvas_height) = match scene.layout(self.config.container_width) {
            Some(mapper) => (mapper.width(), mapper.height()),
            None => (0.0, 0.0),
        };

        let grid = scene.grid();
        let mut notes = vec![format!(
            "grid {} x {} ({} cells)",
            grid.rows(),
            grid.cols(),
            grid.cells().count()
        )];
        if grid.duplicates() > 0 {
            notes.push(format!("{} duplicate samples overwritten", grid.duplicates()));
        }
        notes.push(format!(
            "overlay: {} masts, {} aiming lines, {} facades",
            overlay.masts.features.len(),
            overlay.aiming_lines.features.len(),
            overlay.facades.features.len()
        ));

        Ok(RenderSummary {
            rows: grid.rows(),
            cols: grid.cols(),
            cell_count: grid.cells().count(),
            duplicate_count: grid.duplicates(),
            canvas_width,
            canvas_height,
            overlay,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_report_payload;

    #[test]
    fn runner_executes_sample_report() {
        let cfg = WorkflowConfig::from_args(800.0, 30.0);
        let runner = Runner::new(cfg);
        let payload = build_report_payload(68.0, 105.0).unwrap();
        let summary = runner.execute(&payload).unwrap();
        assert!(summary.rows > 0 && summary.cols > 0);
        assert_eq!(summary.cell_count, summary.rows * summary.cols);
        assert_eq!(summary.canvas_width, 800.0);
        assert!(summary.canvas_height > 0.0);
        assert!(summary.overlay.bounds.is_some());
        assert_eq!(summary.overlay.masts.features.len(), 6);
    }

    #[test]
    fn runner_rejects_invalid_field() {
        let cfg = WorkflowConfig::from_args(800.0, 30.0);
        let runner = Runner::new(cfg);
        let mut payload = build_report_payload(68.0, 105.0).unwrap();
        payload.field.width = -1.0;
        assert!(runner.execute(&payload).is_err());
    }
}

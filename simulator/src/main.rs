use anyhow::Context;
use clap::Parser;
use generator::profile::build_report_payload_from_config;
use generator::profile::SampleConfig;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::VisualizationModel;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Survey-report workflow driver and HTTP bridge")]
struct Args {
    /// Run a single offline pass over a report and emit a baseline summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Load a report payload from JSON instead of generating a sample
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long, default_value_t = 800.0)]
    container_width: f64,
    #[arg(long, default_value_t = 30.0)]
    map_padding_m: f64,
    /// Keep the GUI bridge alive for incoming payloads
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.container_width, args.map_padding_m)
    };

    let runner = Runner::new(workflow_config);
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    let payload = if let Some(path) = args.report {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading report payload {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing report payload {}", path.display()))?
    } else {
        build_report_payload_from_config(&SampleConfig::default())?
    };

    if args.offline {
        let summary = runner.execute(&payload)?;

        println!(
            "Offline run -> grid {} x {} ({} cells), canvas {:.0} x {:.0}, {} overlay masts",
            summary.rows,
            summary.cols,
            summary.cell_count,
            summary.canvas_width,
            summary.canvas_height,
            summary.overlay.masts.features.len()
        );

        let model = VisualizationModel::from_summary(payload.clone(), &summary);
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline report results ready.");

        let report_line = format!(
            "grid={}x{} cells={} duplicates={} canvas={:.0}x{:.0} notes={:?}\n",
            summary.rows,
            summary.cols,
            summary.cell_count,
            summary.duplicate_count,
            summary.canvas_width,
            summary.canvas_height,
            summary.notes
        );
        let report_path = PathBuf::from("tools/data/offline_report.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report_line.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

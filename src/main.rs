#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use mips_trace_viewer::app::SESSION;
use mips_trace_viewer::trace::{self, Session};
use mips_trace_viewer::ViewerApp;

/// Where the simulator drops its per-step snapshots.
const DEFAULT_TRACE_DIR: &str = "output/gui";

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TRACE_DIR.to_string())
        .into();

    let steps = match trace::load_trace(&dir) {
        Ok(steps) => steps,
        Err(e) => {
            tracing::error!(error = %e, "could not load trace");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    *SESSION.lock().unwrap() = Session::new(steps);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([840.0, 720.0])
            .with_min_inner_size([600.0, 450.0])
            .with_title("MIPS32 Trace Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "mips-trace-viewer",
        native_options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
    )
}

//! # ALS Report Viewer Application Entry Point
//!
//! This binary crate walks a directory of calibration reports, analyzes each one
//! with the core library, writes a PNG per report and shows a terminal preview.
//! In interactive mode it pauses after every report; `q` or Esc stops the batch.


use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use als_report_lib::{
    analysis::{AnalysisSettings, ReportAnalysis},
    batch::run_batch,
    canvas::Canvas,
    config::Config,
    renderer::{draw_ascii, draw_report, RenderLabels},
    report_data::ReportDirectory,
};

#[derive(Parser)]
#[command(name = "als-report-viewer")]
#[command(about = "Fit and check ALS calibration reports")]
#[command(version)]
struct Cli {
    /// Directory containing *.json reports (default from als-viewer.toml, else ./reports/)
    reports_dir: Option<PathBuf>,
}

/// Render a report to `<output_dir>/<report stem>.png`.
fn render_to_file(
    report_path: &Path,
    analysis: &ReportAnalysis,
    config: &Config,
) -> anyhow::Result<PathBuf> {
    let mut canvas = Canvas::new(config.display.canvas_size);
    let labels = RenderLabels {
        source: report_path.display().to_string(),
        rendered_at: chrono::Local::now(),
    };
    draw_report(analysis, &labels, &mut canvas).unwrap_or_else(|never| match never {});

    let stem = report_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| analysis.serial_number.clone());
    let out = config.reports.output_dir.join(format!("{stem}.png"));
    canvas
        .save_png(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(out)
}

/// Block until the operator asks for the next report.
///
/// Enter continues; `q`, Esc or end of input cancels.
fn wait_for_next() -> ControlFlow<()> {
    print!("Enter: next report, q/Esc: stop > ");
    // A failed flush only hides the prompt
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => ControlFlow::Break(()),
        Ok(_) => {
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") || answer.contains('\u{1b}') {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(dir) = cli.reports_dir {
        config = config.with_reports_dir(dir);
    }

    let reports = ReportDirectory::new(&config.reports.directory);
    let paths = reports
        .paths()
        .with_context(|| format!("cannot list reports in {}", reports.root().display()))?;

    fs::create_dir_all(&config.reports.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            config.reports.output_dir.display()
        )
    })?;

    let settings = AnalysisSettings {
        canvas_size: config.display.canvas_size,
        tolerances: config.tolerances,
    };

    let summary = run_batch(paths, &settings, |path, analysis| {
        println!("\nProcessed: {}", path.display());

        match render_to_file(path, analysis, &config) {
            Ok(out) => info!("Rendered {}", out.display()),
            // Rendering is diagnostic output; the analysis itself succeeded
            Err(e) => error!("Rendering failed for {}: {:#}", path.display(), e),
        }

        if config.display.ascii_rows > 0 {
            draw_ascii(analysis, config.display.ascii_rows);
        }

        if config.display.interactive {
            wait_for_next()
        } else {
            ControlFlow::Continue(())
        }
    });

    if summary.processed + summary.failed == 0 {
        warn!("No reports found in {}", reports.root().display());
    }
    println!(
        "\n{} processed, {} failed{}",
        summary.processed,
        summary.failed,
        if summary.cancelled { " (cancelled)" } else { "" }
    );

    Ok(())
}

use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use tflite_export::cli::Cli;
use tflite_export::config::Settings;
use tflite_export::display;
use tflite_export::export::{ExportError, Exporter};

/// Main entry point for tflite-export
///
/// Loads settings (files, environment, then command line), sets up file
/// logging and runs the export pipeline once.
///
/// Exits 0 when the pipeline completes, including when the exported file
/// could not be found, and 1 on any export failure.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli.config_dir, &cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => return fail(&ExportError::from(e)),
    };

    let _guard = match tflite_export::logging::init(&settings.logging)
        .context("Failed to initialize logging")
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("tflite-export starting up");
    info!(?settings, "Settings loaded");

    let exporter = Exporter::from_settings(&settings);
    match exporter.run().await {
        Ok(report) => {
            info!(status = %report.status, relocation = ?report.relocation, "Run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {}", e);
            fail(&e)
        }
    }
}

fn fail(err: &ExportError) -> ExitCode {
    display::failure(err);
    ExitCode::from(err.exit_code() as u8)
}

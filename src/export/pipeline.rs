use std::path::PathBuf;
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::info;

use crate::config::Settings;
use crate::display;
use super::download::fetch_weights;
use super::error::ExportError;
use super::relocate::{expected_output_path, relocate};
use super::runtime::PythonRuntime;
use super::types::{ExportReport, ExportRequest};

/// Runs one export: probe the library, obtain the weights, export, then move
/// the artifact to its destination.
pub struct Exporter {
    runtime: PythonRuntime,
    client: Client,
    request: ExportRequest,
    weights_url: Option<String>,
    destination: PathBuf,
}

impl Exporter {
    pub fn new(
        runtime: PythonRuntime,
        request: ExportRequest,
        weights_url: Option<String>,
        destination: PathBuf,
    ) -> Self {
        Self {
            runtime,
            client: Client::new(),
            request,
            weights_url,
            destination,
        }
    }

    /// Replaces the HTTP client used for the weights download.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let runtime = PythonRuntime::new(
            settings.export.python.clone(),
            Duration::from_secs(settings.export.timeout_secs),
        );
        let request = ExportRequest {
            work_dir: settings.model.work_dir.clone(),
            model: settings.model.name.clone(),
            format: settings.export.format,
            imgsz: settings.export.imgsz,
            precision: settings.precision(),
        };
        Self::new(
            runtime,
            request,
            settings.model.weights_url.clone(),
            settings.output.destination.clone(),
        )
    }

    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    pub async fn run(&self) -> Result<ExportReport, ExportError> {
        self.runtime.probe().await?;
        display::success("Ultralytics imported successfully");

        self.obtain_model().await?;

        display::step(&format!(
            "Exporting to {} (this may take a minute)...",
            self.request.format.as_str().to_uppercase()
        ));
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {elapsed} {wide_msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(format!("imgsz={} precision={:?}", self.request.imgsz, self.request.precision));
        let exported = self.runtime.export(&self.request).await;
        spinner.finish_and_clear();
        let status = exported?;
        display::success(&format!("Export completed: {}", status));

        let expected = expected_output_path(&self.request);
        let relocation = relocate(&expected, &self.destination).await?;
        display::relocation(&relocation, &self.request.stem());

        Ok(ExportReport { status, expected, relocation })
    }

    /// Makes sure the weights are on disk, or leaves the download to the
    /// export library when no URL is configured.
    async fn obtain_model(&self) -> Result<(), ExportError> {
        display::step(&format!("Downloading {} model...", self.request.stem()));

        let weights = self.request.weights_path();
        if weights.exists() {
            info!("Using existing weights at {}", weights.display());
            display::success(&format!("Model found at {}", weights.display()));
            return Ok(());
        }

        match &self.weights_url {
            Some(url) => {
                fetch_weights(&self.client, url, &weights).await?;
                display::success("Model downloaded");
            }
            None => {
                info!("No weights URL configured; the export library will fetch {}", self.request.model);
                display::success("Model will be fetched by the export library");
            }
        }
        Ok(())
    }
}

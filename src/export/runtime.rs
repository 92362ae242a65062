//! Python subprocess wrapper around the Ultralytics export call.
//!
//! The export library is only reachable through a Python interpreter, so both
//! the availability probe and the conversion run as `python -c <script>`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::error::ExportError;
use super::types::ExportRequest;

const PROBE_SCRIPT: &str = "import ultralytics";

// argv: weights, format, imgsz, int8, half
const EXPORT_SCRIPT: &str = r#"import sys
from ultralytics import YOLO
weights, fmt, imgsz, int8, half = sys.argv[1:6]
model = YOLO(weights)
result = model.export(format=fmt, imgsz=int(imgsz), int8=int8 == "1", half=half == "1")
print(result)
"#;

/// Python interpreter that is expected to have the export library installed.
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    python_path: PathBuf,
    timeout: Duration,
}

impl PythonRuntime {
    pub fn new(python_path: PathBuf, timeout: Duration) -> Self {
        Self { python_path, timeout }
    }

    /// Checks that the interpreter runs and can import the export library.
    pub async fn probe(&self) -> Result<(), ExportError> {
        debug!("Probing {} for ultralytics", self.python_path.display());

        let output = Command::new(&self.python_path)
            .args(["-c", PROBE_SCRIPT])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExportError::LibraryUnavailable {
                python: self.python_path.clone(),
                detail: format!("failed to spawn interpreter: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = last_line(&stderr).unwrap_or_else(|| format!("exit {}", output.status));
            warn!("ultralytics import failed: {}", detail);
            return Err(ExportError::LibraryUnavailable {
                python: self.python_path.clone(),
                detail,
            });
        }

        info!("ultralytics import succeeded");
        Ok(())
    }

    /// Runs the export inside `request.work_dir` and returns the last line the
    /// export call printed.
    pub async fn export(&self, request: &ExportRequest) -> Result<String, ExportError> {
        let imgsz = request.imgsz.to_string();
        let int8 = flag(request.precision.is_int8());
        let half = flag(request.precision.is_half());

        info!(
            model = %request.model,
            format = %request.format,
            imgsz = request.imgsz,
            precision = ?request.precision,
            "Starting export"
        );

        let child = Command::new(&self.python_path)
            .args(["-c", EXPORT_SCRIPT])
            .args([request.model.as_str(), request.format.as_str(), imgsz.as_str(), int8, half])
            .current_dir(&request.work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::Export(format!(
                "failed to spawn {}: {}", self.python_path.display(), e
            )))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExportError::Export(format!(
                "export timed out after {}s", self.timeout.as_secs()
            )))?
            .map_err(|e| ExportError::Export(format!("failed to wait for export: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("export stdout: {}", stdout.trim());

        if !output.status.success() {
            let detail = last_line(&stderr).unwrap_or_else(|| format!("exit {}", output.status));
            return Err(ExportError::Export(detail));
        }

        let status = last_line(&stdout).unwrap_or_default();
        info!("Export returned: {}", status);
        Ok(status)
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Last non-empty line of subprocess output, where Python puts the exception
fn last_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
}

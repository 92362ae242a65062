use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds of an export run. Every variant ends the process with
/// exit status 1.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Ultralytics not installed ({}): {detail}", .python.display())]
    LibraryUnavailable { python: PathBuf, detail: String },

    #[error("Download failed for {url}: {detail}")]
    Download { url: String, detail: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExportError {
    /// Remediation lines printed after the error message
    pub fn hint(&self) -> &'static str {
        match self {
            ExportError::LibraryUnavailable { .. } => "Please run: pip3 install ultralytics",
            ExportError::Download { .. } => {
                "Check network access, or set model.weights_url to a reachable mirror"
            }
            ExportError::Export(_) => {
                "If you see 'No module named tensorflow', install it:\n  pip3 install tensorflow"
            }
            ExportError::Move { .. } => "Check that the destination directory is writable",
            ExportError::Config(_) => "Fix the setting in config/local.toml or on the command line",
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<::config::ConfigError> for ExportError {
    fn from(err: ::config::ConfigError) -> Self {
        ExportError::Config(err.to_string())
    }
}

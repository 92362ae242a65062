mod download;
mod error;
mod pipeline;
mod relocate;
mod runtime;
mod types;

// Re-export from types
pub use types::{ExportFormat, ExportReport, ExportRequest, Precision, Relocation};
// Re-export from error
pub use error::ExportError;
// Re-export from runtime
pub use runtime::PythonRuntime;
// Re-export from download
pub use download::fetch_weights;
// Re-export from relocate
pub use relocate::{expected_output_path, relocate, size_in_mib};
// Re-export from pipeline
pub use pipeline::Exporter;

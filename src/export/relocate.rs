use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::error::ExportError;
use super::types::{ExportRequest, Relocation};

/// Where the export library leaves its output:
/// `<work_dir>/<stem>_saved_model/<stem>_<precision>.<ext>`
pub fn expected_output_path(request: &ExportRequest) -> PathBuf {
    let stem = request.stem();
    request
        .work_dir
        .join(format!("{}_saved_model", stem))
        .join(format!(
            "{}_{}.{}",
            stem,
            request.precision.file_suffix(),
            request.format.extension()
        ))
}

/// Size in mebibytes with one decimal place
pub fn size_in_mib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0 / 1024.0)
}

/// Moves `expected` to `destination` if it exists.
///
/// An existing destination is replaced. The destination's parent directory
/// is created when missing. Moves across filesystems fall back to copy and
/// remove.
pub async fn relocate(expected: &Path, destination: &Path) -> Result<Relocation, ExportError> {
    let move_err = |source: std::io::Error| ExportError::Move {
        from: expected.to_path_buf(),
        to: destination.to_path_buf(),
        source,
    };

    if !fs::try_exists(expected).await.map_err(move_err)? {
        warn!("Exported file not found at {}", expected.display());
        return Ok(Relocation::Missing { expected: expected.to_path_buf() });
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(move_err)?;
        }
    }

    if let Err(e) = fs::rename(expected, destination).await {
        debug!("rename failed ({}), falling back to copy", e);
        fs::copy(expected, destination).await.map_err(move_err)?;
        fs::remove_file(expected).await.map_err(move_err)?;
    }

    let bytes = fs::metadata(destination).await.map_err(move_err)?.len();
    info!("Moved {} to {} ({} bytes)", expected.display(), destination.display(), bytes);

    Ok(Relocation::Moved { destination: destination.to_path_buf(), bytes })
}

use std::path::Path;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::error::ExportError;

/// Streams `url` into `target`, writing through a `.part` file so an
/// interrupted download never leaves a truncated weights file behind.
///
/// Returns the number of bytes written.
pub async fn fetch_weights(client: &Client, url: &str, target: &Path) -> Result<u64, ExportError> {
    let download_err = |detail: String| ExportError::Download { url: url.to_string(), detail };

    info!("Downloading {} to {}", url, target.display());

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(download_err(format!("server returned status {}", response.status())));
    }

    let pb = match response.content_length() {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| download_err(format!("cannot create {}: {}", parent.display(), e)))?;
        }
    }

    let partial = target.with_extension("part");
    let result = match write_partial(response, &partial, &pb).await {
        Ok(written) => fs::rename(&partial, target)
            .await
            .map(|_| written)
            .map_err(|e| format!("cannot finalize {}: {}", target.display(), e)),
        Err(e) => Err(e),
    };

    let written = match result {
        Ok(written) => written,
        Err(detail) => {
            pb.abandon();
            let _ = fs::remove_file(&partial).await;
            return Err(download_err(detail));
        }
    };

    pb.finish_and_clear();
    info!("Downloaded {} bytes", written);
    Ok(written)
}

/// Streams the response body into `partial`, returning the byte count.
async fn write_partial(
    response: reqwest::Response,
    partial: &Path,
    pb: &ProgressBar,
) -> Result<u64, String> {
    let mut file = fs::File::create(partial)
        .await
        .map_err(|e| format!("cannot create {}: {}", partial.display(), e))?;

    let mut written = 0u64;
    let mut byte_stream = response.bytes_stream();
    while let Some(chunk_result) = byte_stream.next().await {
        let bytes = chunk_result.map_err(|e| e.to_string())?;
        file.write_all(&bytes).await.map_err(|e| e.to_string())?;
        written += bytes.len() as u64;
        pb.set_position(written);
    }
    file.flush().await.map_err(|e| e.to_string())?;
    Ok(written)
}

//! Streaming save of the response body to disk.
//!
//! The body streams straight to a file. A partial file left by a failed
//! stream is removed, and existing files are never overwritten.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use super::error::FetchError;

/// Metadata about a completed save.
#[derive(Debug, Clone)]
pub struct SaveResult {
    /// Final output path.
    pub path: PathBuf,
    /// File size after the save completes.
    pub bytes_written: u64,
}

/// Streams a 2xx response body to a file in `output_dir`.
///
/// The filename is determined by:
/// 1. `Content-Disposition` header (if present)
/// 2. `fallback_filename`
///
/// A numeric suffix is added when the target already exists.
pub(crate) async fn save_response(
    response: reqwest::Response,
    output_dir: &Path,
    fallback_filename: &str,
) -> Result<SaveResult, FetchError> {
    let filename = response_filename(&response, fallback_filename);
    let path = resolve_unique_path(output_dir, &filename);
    debug!(filename = %filename, path = %path.display(), "resolved output path");

    let mut file = File::create(&path)
        .await
        .map_err(|e| FetchError::io(path.clone(), e))?;

    let url = response.url().as_str().to_string();
    match stream_to_file(&mut file, response, &url, &path).await {
        Ok(bytes_written) => {
            info!(path = %path.display(), bytes = bytes_written, "forecast saved");
            Ok(SaveResult {
                path,
                bytes_written,
            })
        }
        Err(err) => {
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&path).await;
            Err(err)
        }
    }
}

/// Streams response body to file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

/// Picks the output filename from the Content-Disposition header or the
/// configured fallback.
fn response_filename(response: &reqwest::Response, fallback: &str) -> String {
    response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_disposition)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Extracts the filename from a Content-Disposition header value.
///
/// Handles the simple `filename="name"` and `filename=name` forms the
/// backend emits; RFC 5987 `filename*=` encoding is not attempted.
fn parse_content_disposition(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let index = lower.find("filename=")?;
    let raw = header[index + "filename=".len()..].trim();
    let value = raw.split(';').next().unwrap_or(raw).trim();
    let value = value.trim_matches('"').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Replaces path separators and control characters so a server-supplied name
/// cannot escape the output directory.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim().trim_start_matches('.').to_string()
}

/// Resolves a path that does not collide with an existing file.
///
/// `forecast.xlsx` becomes `forecast_2.xlsx`, `forecast_3.xlsx`, ... when
/// earlier names are taken.
fn resolve_unique_path(output_dir: &Path, filename: &str) -> PathBuf {
    let candidate = output_dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    let mut suffix = 2u32;
    loop {
        let next_name = match extension {
            Some(ext) => format!("{stem}_{suffix}.{ext}"),
            None => format!("{stem}_{suffix}"),
        };
        let next = output_dir.join(next_name);
        if !next.exists() {
            return next;
        }
        suffix += 1;
    }
}

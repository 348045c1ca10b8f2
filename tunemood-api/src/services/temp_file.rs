//! Request-scoped temporary files
//!
//! Every file a request writes to disk is owned by a [`TempFileGuard`]. The
//! guard removes the file when dropped, so early returns, extractor errors
//! and cancelled request futures all leave the temp directory clean.

use std::path::Path;
use tempfile::TempPath;
use tracing::{debug, warn};

/// Longest sanitized filename kept in a temp file name
const MAX_NAME_LEN: usize = 96;

/// Owns one temporary file and deletes it on drop
#[derive(Debug)]
pub struct TempFileGuard {
    path: Option<TempPath>,
}

impl TempFileGuard {
    pub fn new(path: TempPath) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        // `release` is the only taker and it consumes the guard
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Delete the file now instead of at end of scope
    pub fn cleanup(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(temp_path) = self.path.take() else {
            return;
        };
        let removed = temp_path.to_path_buf();

        match temp_path.close() {
            Ok(()) => debug!(path = %removed.display(), "Removed temp file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %removed.display(), "Temp file already gone");
            }
            Err(e) => warn!(path = %removed.display(), error = %e, "Error cleaning up temp file"),
        }
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reduce a client-supplied filename to a safe single path component
///
/// Directory parts are stripped and anything outside `[A-Za-z0-9._-]` is
/// replaced with `_`. Empty or dot-only names become `upload`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Keep the tail so the extension survives truncation
    let cleaned = if cleaned.len() > MAX_NAME_LEN {
        cleaned[cleaned.len() - MAX_NAME_LEN..].to_string()
    } else {
        cleaned
    };

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Copy `source` into a new uniquely named file in `temp_dir`
///
/// Name pattern: `audio_<unix millis>_<random>_<sanitized name>`. The file is
/// created exclusively, so concurrent uploads of the same name within the
/// same millisecond still get distinct paths.
pub async fn copy_to_request_temp(
    source: &Path,
    temp_dir: &Path,
    original_name: &str,
) -> std::io::Result<TempFileGuard> {
    let millis = chrono::Utc::now().timestamp_millis();
    let prefix = format!("audio_{}_", millis);
    let suffix = format!("_{}", sanitize_file_name(original_name));

    let target = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .rand_bytes(8)
        .tempfile_in(temp_dir)?
        .into_temp_path();
    let guard = TempFileGuard::new(target);

    let bytes = tokio::fs::copy(source, guard.path()).await?;
    debug!(
        from = %source.display(),
        to = %guard.path().display(),
        bytes,
        "Copied upload to request temp file"
    );

    Ok(guard)
}

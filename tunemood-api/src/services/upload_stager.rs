//! Multipart upload staging
//!
//! Streams a `multipart/form-data` body to disk. The first file part named
//! `audio` is written to a staging file in the configured temp directory;
//! every other part is drained. All part bytes count toward the size cap,
//! which is checked per chunk so an oversized upload is rejected without
//! buffering it.

use crate::config::UploadSettings;
use crate::services::temp_file::TempFileGuard;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Form field that carries the audio file
pub const AUDIO_FIELD: &str = "audio";

/// Upload staging errors
#[derive(Debug, Error)]
pub enum UploadError {
    /// Body exceeded the configured cap
    #[error("upload exceeds the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: u64 },

    /// No file part named `audio`
    #[error("no file field named \"audio\"")]
    MissingFile,

    /// File part present but zero bytes long
    #[error("uploaded file is empty")]
    EmptyFile,

    /// Malformed multipart body or transport failure
    #[error("multipart parse failed: {0}")]
    Parse(String),

    /// Staging file could not be created or written
    #[error("staging failed: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    fn from_multipart(err: MultipartError, limit_bytes: u64) -> Self {
        // axum reports body-limit violations inside the parser as 413
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge { limit_bytes }
        } else {
            UploadError::Parse(err.body_text())
        }
    }
}

/// One request's uploaded audio file, staged on disk
///
/// The staging file is removed when this value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    /// Filename as sent by the client
    pub original_name: String,
    /// Declared media type, if the part carried one
    pub mimetype: Option<String>,
    /// Bytes written
    pub size: u64,
    /// Staging file
    pub file: TempFileGuard,
}

/// Stage the `audio` file part of `multipart` under `settings.temp_dir`
pub async fn stage_audio_upload(
    mut multipart: Multipart,
    settings: &UploadSettings,
) -> Result<StagedUpload, UploadError> {
    let limit = settings.max_upload_bytes;
    let mut total: u64 = 0;
    let mut staged: Option<StagedUpload> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::from_multipart(e, limit))?
    {
        let is_audio_file = staged.is_none()
            && field.name() == Some(AUDIO_FIELD)
            && field.file_name().is_some();

        if is_audio_file {
            staged = Some(write_part(&mut field, settings, &mut total).await?);
        } else {
            debug!(field = ?field.name(), "Skipping multipart field");
            drain_part(&mut field, limit, &mut total).await?;
        }
    }

    let upload = staged.ok_or(UploadError::MissingFile)?;
    if upload.size == 0 {
        return Err(UploadError::EmptyFile);
    }

    Ok(upload)
}

async fn write_part(
    field: &mut Field<'_>,
    settings: &UploadSettings,
    total: &mut u64,
) -> Result<StagedUpload, UploadError> {
    let limit = settings.max_upload_bytes;
    let original_name = field.file_name().unwrap_or_default().to_string();
    let mimetype = field.content_type().map(str::to_string);

    let (std_file, temp_path) = tempfile::Builder::new()
        .prefix("upload_")
        .tempfile_in(&settings.temp_dir)?
        .into_parts();
    let guard = TempFileGuard::new(temp_path);
    let mut out = tokio::fs::File::from_std(std_file);

    let mut size: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| UploadError::from_multipart(e, limit))?
    {
        let len = chunk.len() as u64;
        size += len;
        *total += len;
        if *total > limit {
            return Err(UploadError::TooLarge { limit_bytes: limit });
        }
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    debug!(
        path = %guard.path().display(),
        original_name = %original_name,
        size,
        "Staged audio upload"
    );

    Ok(StagedUpload {
        original_name,
        mimetype,
        size,
        file: guard,
    })
}

async fn drain_part(field: &mut Field<'_>, limit: u64, total: &mut u64) -> Result<(), UploadError> {
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| UploadError::from_multipart(e, limit))?
    {
        *total += chunk.len() as u64;
        if *total > limit {
            return Err(UploadError::TooLarge { limit_bytes: limit });
        }
    }
    Ok(())
}

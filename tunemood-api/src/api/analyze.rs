//! Audio analysis upload handler
//!
//! POST /api/analyze accepts `multipart/form-data` with one file field
//! `audio`, runs the configured feature extractor on a private copy of the
//! upload and answers with the scores plus the file's metadata.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit, State,
    },
    http::header,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{AnalyzeResponse, FileInfo},
    services::{copy_to_request_temp, is_audio_upload, stage_audio_upload},
    AppState,
};

/// POST /api/analyze
///
/// Both temp files (the staged upload and the extractor's copy) are owned
/// by guards, so they are removed on every return path below.
pub async fn analyze_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let multipart = multipart.map_err(|rejection| {
        error!(error = %rejection.body_text(), "Rejected multipart request");
        ApiError::Internal
    })?;

    let upload = stage_audio_upload(multipart, &state.upload).await?;

    info!(
        original_name = %upload.original_name,
        mimetype = ?upload.mimetype,
        size = upload.size,
        "Audio file details"
    );

    if !is_audio_upload(upload.mimetype.as_deref(), Some(&upload.original_name)) {
        warn!(
            original_name = %upload.original_name,
            mimetype = ?upload.mimetype,
            "Rejected non-audio upload"
        );
        return Err(ApiError::InvalidFileType);
    }

    let file_info = FileInfo::from(&upload);

    let copy = copy_to_request_temp(upload.file.path(), &state.upload.temp_dir, &upload.original_name)
        .await
        .map_err(|e| {
            error!(error = %e, "Error copying upload to temp file");
            ApiError::AnalysisFailed
        })?;

    let result = state.extractor.extract(copy.path()).await;

    copy.cleanup();
    upload.file.cleanup();

    match result {
        Ok(data) => {
            info!(
                extractor = state.extractor.name(),
                bpm = data.bpm,
                key = %data.key,
                scale = %data.scale,
                "Audio analysis completed"
            );
            Ok(Json(AnalyzeResponse::new(data.clamped(), file_info)))
        }
        Err(e) => {
            error!(extractor = state.extractor.name(), error = %e, "Error during audio analysis");
            Err(ApiError::AnalysisFailed)
        }
    }
}

/// Any method other than POST on /api/analyze
pub async fn method_not_allowed() -> impl IntoResponse {
    ([(header::ALLOW, "POST")], ApiError::MethodNotAllowed)
}

/// Build analysis routes
///
/// `body_limit` replaces axum's 2 MB default for this route only.
pub fn analyze_routes(body_limit: usize) -> Router<AppState> {
    Router::new().route(
        "/api/analyze",
        post(analyze_audio)
            .fallback(method_not_allowed)
            .layer(DefaultBodyLimit::max(body_limit)),
    )
}

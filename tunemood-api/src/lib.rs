//! tunemood-api library interface
//!
//! Exposes the router and state so integration tests can drive the service
//! without binding a socket.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod models;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::{http::Uri, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::UploadSettings;
use crate::types::FeatureExtractor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Feature-extraction hook invoked for every accepted upload
    pub extractor: Arc<dyn FeatureExtractor>,
    /// Upload staging settings
    pub upload: Arc<UploadSettings>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn FeatureExtractor>, upload: UploadSettings) -> Self {
        Self {
            extractor,
            upload: Arc::new(upload),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::analyze_routes(state.upload.body_limit()))
        .merge(api::health_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

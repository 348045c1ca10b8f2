//! UI Routes - browser client for the analysis endpoint
//!
//! Vanilla HTML/CSS/JS (no frameworks), embedded in the binary.

use axum::{routing::get, Router};
use crate::AppState;

mod root;
mod static_assets;

use root::root_page;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}

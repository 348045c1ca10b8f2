//! Data models for tunemood-api

pub mod analyze_response;

pub use analyze_response::{AnalyzeResponse, FileInfo};

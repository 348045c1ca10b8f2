//! Test Helper Utilities
//!
//! Shared utilities for driving the tunemood-api router in tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tunemood_api::config::UploadSettings;
use tunemood_api::extractors::PlaceholderAnalyzer;
use tunemood_api::types::{AnalysisResult, ExtractionError, FeatureExtractor};
use tunemood_api::{build_router, AppState};

/// Multipart boundary used by every test request
pub const BOUNDARY: &str = "----tunemoodTestBoundary7MA4YWxkTrZu0gW";

/// 50 MiB, the default upload cap
pub const DEFAULT_LIMIT: u64 = 50 * 1024 * 1024;

/// One part of a multipart body
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Part {
    pub fn file(name: &str, file_name: &str, content_type: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: content_type.map(str::to_string),
            data,
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }
}

/// Encode parts as a `multipart/form-data` body using [`BOUNDARY`]
pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = &part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = &part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /api/analyze request carrying `parts`
pub fn analyze_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Request with a single `audio` file part
pub fn audio_upload(file_name: &str, content_type: Option<&str>, data: Vec<u8>) -> Request<Body> {
    analyze_request(&[Part::file("audio", file_name, content_type, data)])
}

/// Fake audio payload of `len` bytes starting with an ID3 header
pub fn fake_mp3(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    let header = b"ID3\x03\x00\x00\x00\x00\x00\x00";
    let n = header.len().min(len);
    data[..n].copy_from_slice(&header[..n]);
    data
}

pub fn upload_settings(temp_dir: &Path, max_upload_bytes: u64) -> UploadSettings {
    UploadSettings {
        temp_dir: temp_dir.to_path_buf(),
        max_upload_bytes,
    }
}

/// Router with a seeded placeholder analyzer and the default cap
pub fn test_app(temp_dir: &Path) -> Router {
    test_app_with(
        Arc::new(PlaceholderAnalyzer::with_seed(1)),
        upload_settings(temp_dir, DEFAULT_LIMIT),
    )
}

pub fn test_app_with(extractor: Arc<dyn FeatureExtractor>, settings: UploadSettings) -> Router {
    build_router(AppState::new(extractor, settings))
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Names of the entries currently in `dir`
pub fn dir_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

/// Extractor that always fails
pub struct FailingExtractor;

#[async_trait]
impl FeatureExtractor for FailingExtractor {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn extract(&self, _path: &Path) -> Result<AnalysisResult, ExtractionError> {
        Err(ExtractionError::Internal("model not loaded".to_string()))
    }
}

/// What [`RecordingExtractor`] saw for one call
#[derive(Debug, Clone)]
pub struct SeenFile {
    pub path: PathBuf,
    pub existed: bool,
    pub content: Vec<u8>,
}

/// Extractor that records the file it was handed, then delegates
pub struct RecordingExtractor {
    inner: PlaceholderAnalyzer,
    pub seen: Mutex<Vec<SeenFile>>,
}

impl RecordingExtractor {
    pub fn new() -> Self {
        Self {
            inner: PlaceholderAnalyzer::with_seed(3),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenFile> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeatureExtractor for RecordingExtractor {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn extract(&self, path: &Path) -> Result<AnalysisResult, ExtractionError> {
        let content = std::fs::read(path).unwrap_or_default();
        self.seen.lock().unwrap().push(SeenFile {
            path: path.to_path_buf(),
            existed: path.exists(),
            content,
        });
        self.inner.extract(path).await
    }
}

//! Feature extractor implementations
//!
//! Only the placeholder exists today. New analyzers implement
//! [`crate::types::FeatureExtractor`] and are wired in `main.rs`.

pub mod placeholder_analyzer;

pub use placeholder_analyzer::PlaceholderAnalyzer;

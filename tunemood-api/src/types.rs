//! Core types and the feature-extraction trait
//!
//! The upload handler never computes features itself. It hands the staged
//! file path to a [`FeatureExtractor`] held in application state, so a real
//! analyzer can replace the placeholder without touching the HTTP contract.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Musical scale (mode) of the detected key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicalScale {
    Major,
    Minor,
}

impl MusicalScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicalScale::Major => "major",
            MusicalScale::Minor => "minor",
        }
    }
}

impl std::fmt::Display for MusicalScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood and musical-feature scores for one uploaded file
///
/// Field names are the JSON wire names of the `data` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Happy mood score (0.0-1.0)
    pub mood_happy: f64,
    /// Sad mood score (0.0-1.0)
    pub mood_sad: f64,
    /// Relaxed mood score (0.0-1.0)
    pub mood_relaxed: f64,
    /// Aggressive mood score (0.0-1.0)
    pub mood_aggressive: f64,
    /// Danceability score (0.0-1.0)
    pub danceability: f64,
    /// Tempo in beats per minute
    pub bpm: u32,
    /// Key label (e.g. "C", "F#")
    pub key: String,
    /// Major or minor
    pub scale: MusicalScale,
}

impl AnalysisResult {
    /// Clamp every score into 0.0-1.0
    ///
    /// Extractors may produce slightly out-of-range values from floating
    /// point arithmetic; the response contract requires the closed range.
    pub fn clamped(mut self) -> Self {
        for score in [
            &mut self.mood_happy,
            &mut self.mood_sad,
            &mut self.mood_relaxed,
            &mut self.mood_aggressive,
            &mut self.danceability,
        ] {
            *score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        }
        self
    }
}

/// Feature extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Staged file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not analyzable audio
    #[error("Unsupported audio: {0}")]
    UnsupportedAudio(String),

    /// Analyzer-internal failure
    #[error("Analysis failed: {0}")]
    Internal(String),
}

/// Feature-extraction hook: staged file path → [`AnalysisResult`]
///
/// Implementations run inside the request; the file at `path` exists for the
/// whole call and is deleted by the caller afterwards.
///
/// # Example
/// ```rust,ignore
/// struct FixedExtractor;
///
/// #[async_trait::async_trait]
/// impl FeatureExtractor for FixedExtractor {
///     fn name(&self) -> &'static str { "fixed" }
///
///     async fn extract(&self, _path: &Path) -> Result<AnalysisResult, ExtractionError> {
///         Ok(AnalysisResult { /* ... */ })
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait FeatureExtractor: Send + Sync {
    /// Extractor name for logging
    fn name(&self) -> &'static str;

    /// Analyze the audio file at `path`
    async fn extract(&self, path: &Path) -> Result<AnalysisResult, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            mood_happy: 0.5,
            mood_sad: 0.25,
            mood_relaxed: 0.75,
            mood_aggressive: 0.1,
            danceability: 0.9,
            bpm: 128,
            key: "A".to_string(),
            scale: MusicalScale::Minor,
        }
    }

    #[test]
    fn test_scale_serializes_lowercase() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["scale"], "minor");
        assert_eq!(json["bpm"], 128);
        assert_eq!(json["key"], "A");
    }

    #[test]
    fn test_clamped_bounds_scores() {
        let mut result = sample();
        result.mood_happy = 1.0000001;
        result.mood_sad = -0.2;
        result.danceability = f64::NAN;

        let result = result.clamped();

        assert_eq!(result.mood_happy, 1.0);
        assert_eq!(result.mood_sad, 0.0);
        assert_eq!(result.danceability, 0.0);
        assert_eq!(result.mood_relaxed, 0.75);
    }
}

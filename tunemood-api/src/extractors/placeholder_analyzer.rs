//! Placeholder analyzer
//!
//! Stands in for a real audio analyzer. It does not decode the file: it only
//! checks that the staged file is present and then produces pseudo-random
//! scores in the ranges the response contract promises.

use crate::types::{AnalysisResult, ExtractionError, FeatureExtractor, MusicalScale};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Lowest BPM produced (inclusive)
pub const MIN_BPM: u32 = 60;

/// Highest BPM produced (exclusive)
pub const MAX_BPM: u32 = 240;

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pseudo-random feature extractor
pub struct PlaceholderAnalyzer {
    rng: Mutex<StdRng>,
}

impl PlaceholderAnalyzer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn generate(&self) -> AnalysisResult {
        // Generator state survives a poisoned lock
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        AnalysisResult {
            mood_happy: rng.gen_range(0.0..=1.0),
            mood_sad: rng.gen_range(0.0..=1.0),
            mood_relaxed: rng.gen_range(0.0..=1.0),
            mood_aggressive: rng.gen_range(0.0..=1.0),
            danceability: rng.gen_range(0.0..=1.0),
            bpm: rng.gen_range(MIN_BPM..MAX_BPM),
            key: PITCH_CLASSES[rng.gen_range(0..PITCH_CLASSES.len())].to_string(),
            scale: if rng.gen_bool(0.5) {
                MusicalScale::Major
            } else {
                MusicalScale::Minor
            },
        }
    }
}

impl Default for PlaceholderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeatureExtractor for PlaceholderAnalyzer {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn extract(&self, path: &Path) -> Result<AnalysisResult, ExtractionError> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(ExtractionError::UnsupportedAudio(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        debug!(
            path = %path.display(),
            bytes = metadata.len(),
            "Generating placeholder features"
        );

        Ok(self.generate())
    }
}

//! Response body of POST /api/analyze

use serde::{Deserialize, Serialize};

use crate::services::StagedUpload;
use crate::types::AnalysisResult;

/// Success message returned with every 200 response
pub const SUCCESS_MESSAGE: &str = "Audio analysis completed successfully";

/// Successful analysis response (200)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Always true on this response
    pub success: bool,

    pub message: String,

    /// Mood and feature scores
    pub data: AnalysisResult,

    /// Echo of the uploaded file's metadata
    #[serde(rename = "fileInfo")]
    pub file_info: FileInfo,
}

impl AnalyzeResponse {
    pub fn new(data: AnalysisResult, file_info: FileInfo) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data,
            file_info,
        }
    }
}

/// Uploaded file metadata as the client sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Filename from the multipart part
    pub original_name: String,

    /// Bytes received
    pub size: u64,

    /// Declared media type (null when the part had none)
    pub mimetype: Option<String>,
}

impl From<&StagedUpload> for FileInfo {
    fn from(upload: &StagedUpload) -> Self {
        Self {
            original_name: upload.original_name.clone(),
            size: upload.size,
            mimetype: upload.mimetype.clone(),
        }
    }
}

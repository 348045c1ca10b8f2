//! Request-handling services for tunemood-api

pub mod file_type;
pub mod temp_file;
pub mod upload_stager;

pub use file_type::is_audio_upload;
pub use temp_file::{copy_to_request_temp, TempFileGuard};
pub use upload_stager::{stage_audio_upload, StagedUpload, UploadError};

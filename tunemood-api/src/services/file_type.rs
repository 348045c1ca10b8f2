//! Audio upload type check
//!
//! An upload is accepted when its declared media type mentions `audio` or
//! its filename carries a known audio extension. Either signal is enough:
//! browsers often send `application/octet-stream` for `.flac`/`.m4a`.

/// Accepted filename extensions (compared case-insensitively)
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "aac", "ogg", "flac"];

/// True when the declared media type or the filename marks the upload as audio
pub fn is_audio_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    content_type.is_some_and(is_audio_media_type) || file_name.is_some_and(has_audio_extension)
}

fn is_audio_media_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("audio")
}

fn has_audio_extension(file_name: &str) -> bool {
    file_name.rsplit_once('.').is_some_and(|(_, ext)| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

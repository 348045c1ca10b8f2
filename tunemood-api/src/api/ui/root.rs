//! Root page handler - upload form and results view

use axum::response::{Html, IntoResponse};

use super::static_assets::{ANALYZE_CSS, ANALYZE_JS};

/// GET /
///
/// Single-page UI: file picker with audio preview, submit button, results.
/// Styles and script are inlined so the page needs no other route.
pub async fn root_page() -> impl IntoResponse {
    Html(render_root_page(
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP"),
    ))
}

fn render_root_page(version: &str, git_hash: &str, profile: &str, built: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Audio Mood Analysis</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <div class="header-content">
            <div>
                <h1>Audio Mood Analysis</h1>
                <p class="subtitle">Mood, danceability, tempo and key for an audio file</p>
            </div>
            <div class="build-info">
                <div>tunemood-api v{version}</div>
                <div>{git_hash} ({profile})</div>
                <div>{built}</div>
            </div>
        </div>
    </header>
    <div class="content">
        <form id="analyze-form">
            <div class="field">
                <label for="audio-file">Select Audio File:</label><br>
                <input type="file" id="audio-file" name="audio" accept="audio/*">
                <audio id="audio-preview" class="hidden" controls></audio>
            </div>
            <button type="submit" id="submit-button" class="button" disabled>Analyze Audio</button>
        </form>

        <div id="error" class="error hidden" role="alert"></div>
        <div id="results" class="results hidden"></div>

        <h2>API Usage</h2>
        <p>Send a POST request to <code>/api/analyze</code> with an audio file in form-data under the key "audio".</p>
        <pre>curl -X POST \
  -F "audio=@your-audio-file.mp3" \
  http://localhost:3000/api/analyze</pre>
    </div>
    <script>
{js}
    </script>
</body>
</html>
"#,
        css = ANALYZE_CSS,
        js = ANALYZE_JS,
        version = version,
        git_hash = git_hash,
        profile = profile,
        built = built,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_form_to_script() {
        let html = render_root_page("0.1.0", "abcdef12", "debug", "2026-01-01T00:00:00Z");

        assert!(html.contains(r#"id="analyze-form""#));
        assert!(html.contains(r#"accept="audio/*""#));
        assert!(html.contains("tunemood-api v0.1.0"));
        assert!(html.contains("abcdef12 (debug)"));
        assert!(html.contains("fetch('/api/analyze'"));
        assert!(html.contains("formData.append('audio'"));
    }
}

//! Static assets embedded at compile time

/// Page styles
pub const ANALYZE_CSS: &str = include_str!("../../../static/analyze.css");

/// Upload form script
pub const ANALYZE_JS: &str = include_str!("../../../static/analyze.js");

//! Tracing subscriber setup shared by tunemood binaries

use tracing_subscriber::EnvFilter;

/// Build the filter for the service
///
/// `RUST_LOG` wins when set and valid. Otherwise `level` is applied to the
/// given crate targets and to `tower_http`, with everything else at `warn`.
pub fn build_env_filter(level: &str, targets: &[&str]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = vec!["warn".to_string()];
        directives.extend(targets.iter().map(|t| format!("{}={}", t, level)));
        directives.push(format!("tower_http={}", level));
        EnvFilter::new(directives.join(","))
    })
}

/// Install the global fmt subscriber
///
/// Returns an error if a global subscriber was already set.
pub fn init_tracing(
    level: &str,
    targets: &[&str],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level, targets))
        .with_target(true)
        .try_init()
}

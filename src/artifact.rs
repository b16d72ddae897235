//! Artifact path resolution for local and CI runs.
//!
//! Tests leave screenshot/video/trace files behind as relative paths inside
//! the runner's working directory. Locally those paths are already
//! addressable. On a CI host the files are served over HTTP from a results
//! base URL, and the runner-container path prefix has to be stripped before
//! joining.

use crate::config::ReporterConfig;

/// Path prefix the runner container mounts the workspace under
pub const APP_PREFIX: &str = "/app/";

/// Drop one leading container prefix from a path, if present
pub(crate) fn strip_app_prefix(path: &str) -> &str {
    path.strip_prefix(APP_PREFIX).unwrap_or(path)
}

/// Rewrites artifact paths for the execution environment
#[derive(Debug, Clone)]
pub struct ArtifactPathResolver {
    ci: bool,
    results_base_url: Option<String>,
}

impl ArtifactPathResolver {
    /// Create a resolver for the given environment
    pub fn new(ci: bool, results_base_url: Option<String>) -> Self {
        Self {
            ci,
            results_base_url,
        }
    }

    /// Create a resolver from reporter configuration
    pub fn from_config(config: &ReporterConfig) -> Self {
        Self::new(config.ci, config.results_base_url.clone())
    }

    /// Resolve a raw artifact path for the current environment.
    ///
    /// - Absent paths stay absent.
    /// - Outside CI the path is returned unchanged.
    /// - In CI with a results base URL, a leading container prefix is
    ///   stripped and the remainder is joined onto the base URL. Paths that
    ///   already carry the base URL are returned unchanged, so re-resolving
    ///   an already-resolved path is a no-op.
    /// - In CI without a configured base URL the raw path passes through;
    ///   resolution never fails.
    pub fn resolve(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw?;
        match &self.results_base_url {
            Some(base) if self.ci => {
                if raw.starts_with(base.as_str()) {
                    return Some(raw.to_string());
                }
                Some(format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    strip_app_prefix(raw)
                ))
            }
            _ => Some(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_resolver() -> ArtifactPathResolver {
        ArtifactPathResolver::new(true, Some("https://ci.example/art".to_string()))
    }

    #[test]
    fn test_none_input_yields_none() {
        assert_eq!(ci_resolver().resolve(None), None);
        assert_eq!(ArtifactPathResolver::new(false, None).resolve(None), None);
    }

    #[test]
    fn test_local_mode_is_identity() {
        let resolver = ArtifactPathResolver::new(false, None);
        assert_eq!(
            resolver.resolve(Some("/app/run1/shot.png")),
            Some("/app/run1/shot.png".to_string())
        );

        // A configured base URL is ignored outside CI
        let resolver = ArtifactPathResolver::new(false, Some("https://ci.example/art".to_string()));
        assert_eq!(
            resolver.resolve(Some("run1/shot.png")),
            Some("run1/shot.png".to_string())
        );
    }

    #[test]
    fn test_ci_mode_strips_prefix_and_joins_base() {
        assert_eq!(
            ci_resolver().resolve(Some("/app/run1/shot.png")),
            Some("https://ci.example/art/run1/shot.png".to_string())
        );
    }

    #[test]
    fn test_ci_mode_without_prefix_still_joins() {
        assert_eq!(
            ci_resolver().resolve(Some("run1/video.webm")),
            Some("https://ci.example/art/run1/video.webm".to_string())
        );
    }

    #[test]
    fn test_ci_mode_without_base_url_passes_through() {
        let resolver = ArtifactPathResolver::new(true, None);
        assert_eq!(
            resolver.resolve(Some("/app/run1/shot.png")),
            Some("/app/run1/shot.png".to_string())
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = ci_resolver();
        let once = resolver.resolve(Some("/app/run1/shot.png")).unwrap();
        let twice = resolver.resolve(Some(&once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trailing_slash_on_base_does_not_double() {
        let resolver = ArtifactPathResolver::new(true, Some("https://ci.example/art/".to_string()));
        assert_eq!(
            resolver.resolve(Some("/app/run1/shot.png")),
            Some("https://ci.example/art/run1/shot.png".to_string())
        );
    }

    #[test]
    fn test_strip_app_prefix_only_strips_leading() {
        assert_eq!(strip_app_prefix("/app/run1/a.png"), "run1/a.png");
        assert_eq!(strip_app_prefix("run1/app/a.png"), "run1/app/a.png");
    }
}

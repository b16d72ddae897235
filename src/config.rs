//! Reporter configuration with environment variable support.
//!
//! All knobs of the reporting pipeline come from the environment, with
//! sensible defaults for local runs. The configuration is built once (via
//! [`ReporterConfig::from_env`]) and passed into the reporter explicitly,
//! so tests can construct arbitrary configurations without touching process
//! state.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `E2E_REPORT_CI` | Truthy value enables CI mode | unset |
//! | `E2E_REPORT_RESULTS_URL` | Base URL the CI host serves artifacts from | none |
//! | `E2E_REPORT_URL` | Base URL the CI host serves the engine report from | none |
//! | `E2E_REPORT_ENVIRONMENT` | Environment label shown in the report header | `UNKNOWN` |
//! | `E2E_REPORT_DIR` | Output directory for generated reports | `reports` |
//! | `E2E_REPORT_TRACKER_URL` | Issue tracker base URL for bug filing | none |
//! | `E2E_REPORT_TRACKER_PROJECT` | Issue tracker project id | none |
//! | `E2E_REPORT_TRACKER_ISSUE_TYPE` | Issue tracker issue-type id | none |

use std::env;
use std::path::PathBuf;

use crate::artifact::strip_app_prefix;

// ============================================================================
// Default Values
// ============================================================================

/// Default output directory for generated reports
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Default environment label when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "UNKNOWN";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable enabling CI mode
pub const ENV_CI: &str = "E2E_REPORT_CI";

/// Environment variable for the CI artifact base URL
pub const ENV_RESULTS_URL: &str = "E2E_REPORT_RESULTS_URL";

/// Environment variable for the CI engine-report base URL
pub const ENV_REPORT_URL: &str = "E2E_REPORT_URL";

/// Environment variable for the environment label
pub const ENV_ENVIRONMENT: &str = "E2E_REPORT_ENVIRONMENT";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "E2E_REPORT_DIR";

/// Environment variable for the issue tracker base URL
pub const ENV_TRACKER_URL: &str = "E2E_REPORT_TRACKER_URL";

/// Environment variable for the issue tracker project id
pub const ENV_TRACKER_PROJECT: &str = "E2E_REPORT_TRACKER_PROJECT";

/// Environment variable for the issue tracker issue-type id
pub const ENV_TRACKER_ISSUE_TYPE: &str = "E2E_REPORT_TRACKER_ISSUE_TYPE";

/// Configuration for one reporting run
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Whether the run executes under a CI host
    pub ci: bool,
    /// Base URL the CI host serves test artifacts from
    pub results_base_url: Option<String>,
    /// Base URL the CI host serves the engine-native report from
    pub report_base_url: Option<String>,
    /// Environment label (cosmetic, upper-cased)
    pub environment: String,
    /// Directory the rendered reports are written to
    pub output_dir: PathBuf,
    /// Issue tracker identifiers for the bug-filing helper
    pub tracker: TrackerConfig,
}

/// Issue tracker identifiers consumed by the client-side bug-filing helper
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// Tracker instance base URL
    pub base_url: Option<String>,
    /// Project id for created issues
    pub project_id: Option<String>,
    /// Issue-type id for created issues (e.g. Bug)
    pub issue_type_id: Option<String>,
}

impl ReporterConfig {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            ci: env::var(ENV_CI).map(|v| is_truthy(&v)).unwrap_or(false),
            results_base_url: non_empty_var(ENV_RESULTS_URL),
            report_base_url: non_empty_var(ENV_REPORT_URL),
            environment: env::var(ENV_ENVIRONMENT)
                .map(|v| v.to_uppercase())
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            output_dir: env::var(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            tracker: TrackerConfig::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring the environment)
    pub fn defaults() -> Self {
        Self {
            ci: false,
            results_base_url: None,
            report_base_url: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            tracker: TrackerConfig::default(),
        }
    }

    /// Set CI mode
    pub fn ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Set the CI artifact base URL
    pub fn results_base_url(mut self, url: impl Into<String>) -> Self {
        self.results_base_url = Some(url.into());
        self
    }

    /// Set the CI engine-report base URL
    pub fn report_base_url(mut self, url: impl Into<String>) -> Self {
        self.report_base_url = Some(url.into());
        self
    }

    /// Set the environment label
    pub fn environment(mut self, label: impl Into<String>) -> Self {
        self.environment = label.into().to_uppercase();
        self
    }

    /// Set the report output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Base location of the engine-native report, used for per-test deep links.
    ///
    /// The configured CI report URL wins when present (with the container
    /// path prefix stripped); otherwise deep links stay relative to the
    /// local default report directory.
    pub fn report_base(&self) -> String {
        match &self.report_base_url {
            Some(url) => strip_app_prefix(url).to_string(),
            None => DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TrackerConfig {
    /// Create tracker settings from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var(ENV_TRACKER_URL),
            project_id: non_empty_var(ENV_TRACKER_PROJECT),
            issue_type_id: non_empty_var(ENV_TRACKER_ISSUE_TYPE),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Read an environment variable, treating empty values as unset
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Interpret an environment-flag value
fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

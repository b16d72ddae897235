//! Normalization of raw completion events into canonical records.
//!
//! Pure conversion, no I/O: outcome coercion, step extraction, error-text
//! cleanup and attachment lookup all happen here, so every downstream
//! consumer sees one stable record shape regardless of how the engine
//! phrased the event.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::artifact::ArtifactPathResolver;
use crate::config::ReporterConfig;
use crate::event::{Outcome, TestEvent};
use crate::report::{ReportError, ReportResult, TestRecord, TestStatus};

/// Sub-event category the engine uses for structured test steps
pub const STEP_CATEGORY: &str = "test.step";

/// Suite label used when the engine reported no enclosing group
pub const FALLBACK_SUITE: &str = "Unknown";

/// Attachment name for screenshots
pub const ATTACHMENT_SCREENSHOT: &str = "screenshot";

/// Attachment name for videos
pub const ATTACHMENT_VIDEO: &str = "video";

/// Attachment name for execution traces
pub const ATTACHMENT_TRACE: &str = "trace";

// Terminal color-control sequences (CSI ... m) that assertion libraries
// embed in failure messages.
static ANSI_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI color pattern"));

/// Remove terminal color escape sequences from failure text
pub fn strip_ansi(text: &str) -> String {
    ANSI_COLOR.replace_all(text, "").into_owned()
}

/// Convert a completion event into a canonical [`TestRecord`].
///
/// Fails only on malformed identity (blank id or title); the caller is
/// expected to log and skip such events rather than abort the run.
pub fn normalize(
    event: &TestEvent,
    resolver: &ArtifactPathResolver,
    config: &ReporterConfig,
) -> ReportResult<TestRecord> {
    if event.id.trim().is_empty() {
        return Err(ReportError::MalformedEvent(
            "completion event has no test id".to_string(),
        ));
    }
    if event.title.trim().is_empty() {
        return Err(ReportError::MalformedEvent(format!(
            "test {} has no title",
            event.id
        )));
    }

    let status = match event.outcome {
        Outcome::Passed => TestStatus::Passed,
        Outcome::Skipped => TestStatus::Skipped,
        // The model has no separate error status: anything the engine cut
        // short counts as a failure.
        Outcome::Failed | Outcome::TimedOut | Outcome::Interrupted => TestStatus::Failed,
    };

    let steps: Vec<String> = event
        .steps
        .iter()
        .filter(|s| s.category == STEP_CATEGORY)
        .map(|s| s.title.clone())
        .filter(|title| !title.is_empty())
        .collect();

    let error_text = event
        .errors
        .iter()
        .map(|failure| strip_ansi(&failure.message))
        .collect::<Vec<_>>()
        .join("\n");

    let suite = event
        .suite
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SUITE.to_string());

    Ok(TestRecord {
        suite,
        name: event.title.clone(),
        id: event.id.clone(),
        status,
        duration_secs: (event.duration_ms / 1000.0).max(0.0),
        steps,
        screenshot_path: resolver.resolve(find_attachment(event, ATTACHMENT_SCREENSHOT)),
        video_path: resolver.resolve(find_attachment(event, ATTACHMENT_VIDEO)),
        trace_path: resolver.resolve(find_attachment(event, ATTACHMENT_TRACE)),
        error_text,
        details_path: format!(
            "{}/engine-report/index.html#?testId={}",
            config.report_base(),
            event.id
        ),
    })
}

/// First attachment with the given name and a present, non-empty path
fn find_attachment<'a>(event: &'a TestEvent, name: &str) -> Option<&'a str> {
    event
        .attachments
        .iter()
        .filter(|a| a.name == name)
        .find_map(|a| a.path.as_deref().filter(|p| !p.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Attachment, Failure, SubEvent};

    fn resolver() -> ArtifactPathResolver {
        ArtifactPathResolver::new(false, None)
    }

    fn event(outcome: Outcome) -> TestEvent {
        TestEvent {
            suite: Some("Home page".to_string()),
            title: "shows the welcome banner".to_string(),
            id: "t-42".to_string(),
            outcome,
            duration_ms: 1234.5,
            steps: vec![],
            errors: vec![],
            attachments: vec![],
        }
    }

    #[test]
    fn test_terminal_outcomes_coerce_to_failed() {
        let config = ReporterConfig::defaults();
        for outcome in [Outcome::TimedOut, Outcome::Interrupted, Outcome::Failed] {
            let record = normalize(&event(outcome), &resolver(), &config).unwrap();
            assert_eq!(record.status, TestStatus::Failed);
        }
    }

    #[test]
    fn test_plain_outcomes_are_identity_preserving() {
        let config = ReporterConfig::defaults();
        let record = normalize(&event(Outcome::Passed), &resolver(), &config).unwrap();
        assert_eq!(record.status, TestStatus::Passed);
        let record = normalize(&event(Outcome::Skipped), &resolver(), &config).unwrap();
        assert_eq!(record.status, TestStatus::Skipped);
    }

    #[test]
    fn test_step_extraction_filters_category_and_empties() {
        let config = ReporterConfig::defaults();
        let mut e = event(Outcome::Passed);
        e.steps = vec![
            SubEvent {
                category: STEP_CATEGORY.to_string(),
                title: "Open the page".to_string(),
            },
            SubEvent {
                category: "hook".to_string(),
                title: "beforeEach".to_string(),
            },
            SubEvent {
                category: STEP_CATEGORY.to_string(),
                title: String::new(),
            },
            SubEvent {
                category: STEP_CATEGORY.to_string(),
                title: "Click login".to_string(),
            },
        ];
        let record = normalize(&e, &resolver(), &config).unwrap();
        assert_eq!(record.steps, vec!["Open the page", "Click login"]);
    }

    #[test]
    fn test_error_text_strips_color_and_joins() {
        let config = ReporterConfig::defaults();
        let mut e = event(Outcome::Failed);
        e.errors = vec![
            Failure {
                message: "\x1b[31mexpected\x1b[0m true".to_string(),
            },
            Failure {
                message: "locator not found".to_string(),
            },
        ];
        let record = normalize(&e, &resolver(), &config).unwrap();
        assert_eq!(record.error_text, "expected true\nlocator not found");
    }

    #[test]
    fn test_no_failures_yield_empty_error_text() {
        let config = ReporterConfig::defaults();
        let record = normalize(&event(Outcome::Passed), &resolver(), &config).unwrap();
        assert_eq!(record.error_text, "");
    }

    #[test]
    fn test_attachment_lookup_distinguishes_none_from_empty() {
        let config = ReporterConfig::defaults();
        let mut e = event(Outcome::Failed);
        e.attachments = vec![
            Attachment {
                name: "screenshot".to_string(),
                path: None,
            },
            Attachment {
                name: "screenshot".to_string(),
                path: Some("run/shot.png".to_string()),
            },
            Attachment {
                name: "video".to_string(),
                path: Some(String::new()),
            },
        ];
        let record = normalize(&e, &resolver(), &config).unwrap();
        // First screenshot entry has no path; the lookup moves on to the
        // one that does.
        assert_eq!(record.screenshot_path.as_deref(), Some("run/shot.png"));
        assert_eq!(record.video_path, None);
        assert_eq!(record.trace_path, None);
    }

    #[test]
    fn test_missing_suite_falls_back_to_sentinel() {
        let config = ReporterConfig::defaults();
        let mut e = event(Outcome::Passed);
        e.suite = None;
        let record = normalize(&e, &resolver(), &config).unwrap();
        assert_eq!(record.suite, FALLBACK_SUITE);
    }

    #[test]
    fn test_blank_identity_is_malformed() {
        let config = ReporterConfig::defaults();
        let mut e = event(Outcome::Passed);
        e.id = "  ".to_string();
        assert!(matches!(
            normalize(&e, &resolver(), &config),
            Err(ReportError::MalformedEvent(_))
        ));

        let mut e = event(Outcome::Passed);
        e.title = String::new();
        assert!(matches!(
            normalize(&e, &resolver(), &config),
            Err(ReportError::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_duration_converts_to_seconds() {
        let config = ReporterConfig::defaults();
        let record = normalize(&event(Outcome::Passed), &resolver(), &config).unwrap();
        assert!((record.duration_secs - 1.2345).abs() < 1e-9);
    }

    #[test]
    fn test_details_path_carries_test_id() {
        let config = ReporterConfig::defaults();
        let record = normalize(&event(Outcome::Passed), &resolver(), &config).unwrap();
        assert_eq!(
            record.details_path,
            "reports/engine-report/index.html#?testId=t-42"
        );

        let ci_config = ReporterConfig::defaults()
            .ci(true)
            .report_base_url("/app/builds/7");
        let record = normalize(&event(Outcome::Passed), &resolver(), &ci_config).unwrap();
        assert_eq!(
            record.details_path,
            "builds/7/engine-report/index.html#?testId=t-42"
        );
    }
}

//! Inbound completion-event model.
//!
//! The automation engine delivers one [`TestEvent`] per finished test,
//! carrying identity, outcome, timing, structured sub-events, failure
//! descriptors and named file attachments. Events arrive serialized (one
//! JSON object per test) and are normalized into [`crate::report::TestRecord`]s
//! before storage.

use serde::{Deserialize, Serialize};

/// One per-test completion notification from the automation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEvent {
    /// Title of the enclosing test group, when the engine knows it
    #[serde(default)]
    pub suite: Option<String>,

    /// Declared title of the test
    pub title: String,

    /// Stable unique identifier assigned by the engine
    pub id: String,

    /// Terminal outcome reported by the engine
    pub outcome: Outcome,

    /// Test duration in milliseconds
    #[serde(default)]
    pub duration_ms: f64,

    /// Ordered structured sub-events recorded during the test
    #[serde(default)]
    pub steps: Vec<SubEvent>,

    /// Failure descriptors (empty for passing tests)
    #[serde(default)]
    pub errors: Vec<Failure>,

    /// Named file attachments produced by the test
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Terminal outcome as reported by the engine.
///
/// The string forms match the engine's own status vocabulary, so serialized
/// events parse without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Passed,
    Failed,
    TimedOut,
    Interrupted,
    Skipped,
}

/// A structured sub-event recorded inside a test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubEvent {
    /// Engine category tag (only step-kind entries reach the report)
    pub category: String,

    /// Human-readable title of the sub-event
    pub title: String,
}

/// One failure descriptor attached to a test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    /// Message or stack text, possibly containing terminal color escapes
    pub message: String,
}

/// A named file attachment produced by a test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment name tag (e.g. "screenshot", "video", "trace")
    pub name: String,

    /// Path to the attachment file, when one was written
    #[serde(default)]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parses_engine_vocabulary() {
        for (raw, expected) in [
            ("\"passed\"", Outcome::Passed),
            ("\"failed\"", Outcome::Failed),
            ("\"timedOut\"", Outcome::TimedOut),
            ("\"interrupted\"", Outcome::Interrupted),
            ("\"skipped\"", Outcome::Skipped),
        ] {
            let parsed: Outcome = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_event_parses_with_optional_fields_missing() {
        let raw = r#"{"title":"loads the home page","id":"t-1","outcome":"passed"}"#;
        let event: TestEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.title, "loads the home page");
        assert!(event.suite.is_none());
        assert_eq!(event.duration_ms, 0.0);
        assert!(event.steps.is_empty());
        assert!(event.errors.is_empty());
        assert!(event.attachments.is_empty());
    }

    #[test]
    fn test_event_missing_id_is_rejected() {
        let raw = r#"{"title":"no id","outcome":"failed"}"#;
        assert!(serde_json::from_str::<TestEvent>(raw).is_err());
    }

    #[test]
    fn test_attachment_path_defaults_to_none() {
        let raw = r#"{"name":"screenshot"}"#;
        let attachment: Attachment = serde_json::from_str(raw).unwrap();
        assert!(attachment.path.is_none());
    }
}

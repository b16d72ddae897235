//! Bug payload encoding for the client-side issue-filing helper.
//!
//! Failed rows in the detailed report carry an encoded copy of the data the
//! in-page `createBug` script needs to pre-fill an issue tracker's creation
//! form. The payload is JSON wrapped in standard base64, so the blob is safe
//! inside an HTML attribute value and reversible on the client with
//! `atob` + `JSON.parse`.
//!
//! The field names and the absent-value convention (empty string, never
//! null) are parsed by untyped client code and must not change.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::report::{ReportError, ReportResult, TestRecord};

/// The subset of a failed record the bug-filing client consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugPayload {
    /// Test title (becomes the issue summary)
    pub name: String,

    /// Step titles in execution order
    pub steps: Vec<String>,

    /// Screenshot link, or empty string when no screenshot exists
    pub screenshot: String,

    /// Video link, or empty string
    pub video: String,

    /// Trace link, or empty string
    pub trace: String,

    /// Cleaned failure text, or empty string
    pub error: String,

    /// Deep link into the engine-native report
    pub details: String,
}

impl BugPayload {
    /// Build the payload from a stored record
    pub fn from_record(record: &TestRecord) -> Self {
        Self {
            name: record.name.clone(),
            steps: record.steps.clone(),
            screenshot: record.screenshot_path.clone().unwrap_or_default(),
            video: record.video_path.clone().unwrap_or_default(),
            trace: record.trace_path.clone().unwrap_or_default(),
            error: record.error_text.clone(),
            details: record.details_path.clone(),
        }
    }
}

/// Encode a record's bug payload as an attribute-safe base64 blob.
///
/// The base64 alphabet contains no quotes or angle brackets, so the result
/// can be embedded in an HTML attribute value without further escaping.
pub fn encode(record: &TestRecord) -> ReportResult<String> {
    let json = serde_json::to_string(&BugPayload::from_record(record))?;
    Ok(STANDARD.encode(json))
}

/// Decode a blob back into its payload (the client-side contract)
pub fn decode(blob: &str) -> ReportResult<BugPayload> {
    let bytes = STANDARD
        .decode(blob)
        .map_err(|err| ReportError::MalformedEvent(format!("bug payload is not base64: {}", err)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

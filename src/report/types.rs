//! Core types for the run report: records, aggregates, render options.

use serde::{Deserialize, Serialize};

/// Terminal status of a stored test record.
///
/// The engine's timed-out and interrupted outcomes are coerced to `Failed`
/// during normalization; only these three values ever reach the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    /// Lowercase form, used for CSS badge classes
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical record for one executed test, immutable once stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Enclosing test group ("Unknown" when the engine reported none)
    pub suite: String,

    /// Declared test title
    pub name: String,

    /// Engine-assigned unique identifier
    pub id: String,

    /// Terminal status after outcome coercion
    pub status: TestStatus,

    /// Duration in seconds, rendered with two decimals
    pub duration_secs: f64,

    /// Human-readable step titles in emission order (empties dropped)
    pub steps: Vec<String>,

    /// Resolved screenshot path, if the artifact was produced
    pub screenshot_path: Option<String>,

    /// Resolved video path, if the artifact was produced
    pub video_path: Option<String>,

    /// Resolved trace path, if the artifact was produced
    pub trace_path: Option<String>,

    /// All failure messages, color escapes stripped, newline-joined
    pub error_text: String,

    /// Deep link into the engine-native report for this test id
    pub details_path: String,
}

/// Counts over one run's records, recomputed at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl AggregateCounts {
    /// Count statuses over a full record snapshot
    pub fn from_records(records: &[TestRecord]) -> Self {
        let mut counts = Self {
            total: records.len(),
            passed: 0,
            failed: 0,
            skipped: 0,
        };
        for record in records {
            match record.status {
                TestStatus::Passed => counts.passed += 1,
                TestStatus::Failed => counts.failed += 1,
                TestStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    pub fn passed_pct(&self) -> f64 {
        self.pct(self.passed)
    }

    pub fn failed_pct(&self) -> f64 {
        self.pct(self.failed)
    }

    pub fn skipped_pct(&self) -> f64 {
        self.pct(self.skipped)
    }

    // An empty run reports 0.00 for every status rather than dividing by zero.
    fn pct(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (count as f64 / self.total as f64) * 100.0
        }
    }
}

/// Column/action selection for one rendering of the report.
///
/// Both report variants come from the same rendering function; only the
/// options differ, so the table structure cannot drift between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include the per-row Actions column with the bug-filing helper
    pub include_actions: bool,

    /// Include the deep-link Details column instead of the steps toggle
    pub include_detail_links: bool,
}

impl RenderOptions {
    /// Minimal customer view: steps toggle, no operational actions
    pub fn customer() -> Self {
        Self {
            include_actions: false,
            include_detail_links: false,
        }
    }

    /// Extended operational view for CI runs
    pub fn detailed() -> Self {
        Self {
            include_actions: true,
            include_detail_links: true,
        }
    }
}

/// Result type for reporting operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Error types for reporting operations
#[derive(Debug)]
pub enum ReportError {
    /// Inbound completion event missing required identity fields
    MalformedEvent(String),

    /// Serialization error
    Serialization(serde_json::Error),

    /// I/O error while writing report files
    Io(std::io::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MalformedEvent(msg) => write!(f, "Malformed event: {}", msg),
            ReportError::Serialization(err) => write!(f, "Serialization error: {}", err),
            ReportError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::MalformedEvent(_) => None,
            ReportError::Serialization(err) => Some(err),
            ReportError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(suite: &str, status: TestStatus) -> TestRecord {
        TestRecord {
            suite: suite.to_string(),
            name: format!("test in {}", suite),
            id: format!("id-{}-{}", suite, status),
            status,
            duration_secs: 1.0,
            steps: vec![],
            screenshot_path: None,
            video_path: None,
            trace_path: None,
            error_text: String::new(),
            details_path: String::new(),
        }
    }

    #[test]
    fn test_counts_over_mixed_records() {
        let records = vec![
            record("A", TestStatus::Passed),
            record("B", TestStatus::Failed),
            record("A", TestStatus::Skipped),
        ];
        let counts = AggregateCounts::from_records(&records);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.skipped, 1);
        assert!((counts.passed_pct() - 33.33).abs() < 0.01);
    }

    #[test]
    fn test_percentages_sum_to_100_for_non_empty_sets() {
        let sets: Vec<Vec<TestRecord>> = vec![
            vec![record("A", TestStatus::Passed)],
            vec![
                record("A", TestStatus::Passed),
                record("A", TestStatus::Failed),
                record("B", TestStatus::Skipped),
            ],
            vec![
                record("A", TestStatus::Failed),
                record("B", TestStatus::Failed),
                record("C", TestStatus::Passed),
                record("D", TestStatus::Skipped),
                record("E", TestStatus::Passed),
                record("F", TestStatus::Passed),
                record("G", TestStatus::Skipped),
            ],
        ];
        for records in sets {
            let counts = AggregateCounts::from_records(&records);
            let sum = counts.passed_pct() + counts.failed_pct() + counts.skipped_pct();
            assert!((sum - 100.0).abs() < 1e-9, "sum was {}", sum);
        }
    }

    #[test]
    fn test_empty_run_has_zero_percentages() {
        let counts = AggregateCounts::from_records(&[]);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.passed_pct(), 0.0);
        assert_eq!(counts.failed_pct(), 0.0);
        assert_eq!(counts.skipped_pct(), 0.0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TestStatus::Passed.to_string(), "passed");
        assert_eq!(TestStatus::Failed.as_str(), "failed");
    }
}

pub mod bug;
pub mod render;
pub mod types;
pub mod writer;

pub use bug::{BugPayload, decode as decode_bug_payload, encode as encode_bug_payload};
pub use render::{escape_html, render};
pub use types::{
    AggregateCounts, RenderOptions, ReportError, ReportResult, TestRecord, TestStatus,
};
pub use writer::{CUSTOMER_REPORT_FILE, DETAILED_REPORT_FILE, write_reports};

//! In-memory result storage for the current run.
//!
//! The store is append-only for the run's lifetime: created empty at run
//! start, appended to once per completion event, read as a full snapshot at
//! run end, then discarded. There is no cross-run persistence.

use crate::report::TestRecord;

/// Ordered, append-only collection of result records for one run.
///
/// Uniqueness of record ids is upheld by the normalizer and not re-checked
/// here; validating it would cost a scan per append on a path that runs once
/// per test. The `&mut self` receiver on [`append`](Self::append) makes any
/// concurrent append a compile error rather than a silent race.
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<TestRecord>,
}

impl ResultStore {
    /// Create an empty store for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record; O(1) amortized
    pub fn append(&mut self, record: TestRecord) {
        self.records.push(record);
    }

    /// Full snapshot in insertion order.
    ///
    /// Callers that need a different display order sort a copy; storage
    /// order stays available for other consumers.
    pub fn snapshot(&self) -> &[TestRecord] {
        &self.records
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the run produced no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the store at run end, yielding the records in insertion order
    pub fn finalize(self) -> Vec<TestRecord> {
        self.records
    }
}

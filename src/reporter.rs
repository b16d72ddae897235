//! The two-phase run facade.
//!
//! The automation engine delivers completion events serially, one per
//! finished test, then signals run end. [`RunReporter`] mirrors that
//! lifecycle: [`on_test_end`](RunReporter::on_test_end) appends to the
//! store, [`on_end`](RunReporter::on_end) renders and flushes once. The
//! engine guarantees serialized delivery, so no synchronization is needed;
//! the `&mut self` receiver turns any concurrent append into a compile
//! error.

use crate::artifact::ArtifactPathResolver;
use crate::config::ReporterConfig;
use crate::event::TestEvent;
use crate::normalize::normalize;
use crate::report::writer::{CUSTOMER_REPORT_FILE, DETAILED_REPORT_FILE, write_reports};
use crate::report::{AggregateCounts, RenderOptions, ReportResult, render};
use crate::store::ResultStore;

/// Collects results for one run and produces the HTML reports at run end
#[derive(Debug)]
pub struct RunReporter {
    config: ReporterConfig,
    resolver: ArtifactPathResolver,
    store: ResultStore,
}

impl RunReporter {
    /// Create a reporter for a new run
    pub fn new(config: ReporterConfig) -> Self {
        let resolver = ArtifactPathResolver::from_config(&config);
        Self {
            config,
            resolver,
            store: ResultStore::new(),
        }
    }

    /// Handle one completion event.
    ///
    /// Malformed events are logged and skipped; a bad event never aborts
    /// the run or duplicates a record.
    pub fn on_test_end(&mut self, event: &TestEvent) {
        match normalize(event, &self.resolver, &self.config) {
            Ok(record) => self.store.append(record),
            Err(err) => eprintln!("Warning: skipping completion event: {}", err),
        }
    }

    /// Aggregate counts over the records collected so far
    pub fn counts(&self) -> AggregateCounts {
        AggregateCounts::from_records(self.store.snapshot())
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no records have been collected
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Render and flush both report variants, consuming the reporter.
    ///
    /// The customer report is always produced. The detailed variant exists
    /// only for CI runs: its operational actions point at CI-hosted
    /// artifacts and are meaningless locally. A write failure propagates to
    /// the caller; the run's results are still intact, only the rendered
    /// report is lost.
    pub fn on_end(self) -> ReportResult<()> {
        let Self { config, store, .. } = self;
        let records = store.finalize();

        let customer = render(&records, &RenderOptions::customer(), &config);
        let detailed = config
            .ci
            .then(|| render(&records, &RenderOptions::detailed(), &config));

        write_reports(&config.output_dir, &customer, detailed.as_deref())?;

        if detailed.is_some() {
            println!(
                "> Test report generated: {}",
                config.output_dir.join(DETAILED_REPORT_FILE).display()
            );
        } else {
            println!(
                "> Test report generated: {}",
                config.output_dir.join(CUSTOMER_REPORT_FILE).display()
            );
            println!("> Open it in a browser to view the run summary.");
        }

        Ok(())
    }
}

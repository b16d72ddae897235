use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use run_reporter::{ReporterConfig, RunReporter, TestEvent};

/// Run Reporter - test-run reporting and aggregation for browser e2e suites
#[derive(Parser, Debug)]
#[command(
    name = "run-reporter",
    about = "Render customer and detailed HTML reports from test-run completion events",
    after_help = "ENVIRONMENT VARIABLES:\n\
        E2E_REPORT_CI                 Truthy value enables CI mode\n\
        E2E_REPORT_RESULTS_URL        Base URL the CI host serves artifacts from\n\
        E2E_REPORT_URL                Base URL the CI host serves the engine report from\n\
        E2E_REPORT_ENVIRONMENT        Environment label shown in the report header\n\
        E2E_REPORT_DIR                Output directory for generated reports\n\
        E2E_REPORT_TRACKER_URL        Issue tracker base URL for bug filing\n\
        E2E_REPORT_TRACKER_PROJECT    Issue tracker project id\n\
        E2E_REPORT_TRACKER_ISSUE_TYPE Issue tracker issue-type id"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a completion-event file and write the HTML reports
    Generate {
        /// Path to the event file (one JSON completion event per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the reports (default: reports, or E2E_REPORT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force CI mode (also enabled by E2E_REPORT_CI)
        #[arg(long)]
        ci: bool,

        /// Base URL the CI host serves artifacts from
        #[arg(long)]
        results_url: Option<String>,

        /// Base URL the CI host serves the engine report from
        #[arg(long)]
        report_url: Option<String>,

        /// Environment label shown in the report header
        #[arg(short, long)]
        environment: Option<String>,
    },

    /// Print aggregate counts for a completion-event file
    Summary {
        /// Path to the event file (one JSON completion event per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output the counts as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Generate {
            input,
            output,
            ci,
            results_url,
            report_url,
            environment,
        }) => {
            let mut config = ReporterConfig::from_env();
            if ci {
                config = config.ci(true);
            }
            if let Some(url) = results_url {
                config = config.results_base_url(url);
            }
            if let Some(url) = report_url {
                config = config.report_base_url(url);
            }
            if let Some(label) = environment {
                config = config.environment(label);
            }
            if let Some(dir) = output {
                config = config.output_dir(dir);
            }

            let events = read_events(&input)?;
            let mut reporter = RunReporter::new(config);
            for event in &events {
                reporter.on_test_end(event);
            }

            let counts = reporter.counts();
            println!(
                "Processed {} events: {} passed, {} failed, {} skipped",
                counts.total, counts.passed, counts.failed, counts.skipped
            );

            reporter.on_end()?;
        }

        Some(Commands::Summary { input, json }) => {
            let events = read_events(&input)?;
            let mut reporter = RunReporter::new(ReporterConfig::from_env());
            for event in &events {
                reporter.on_test_end(event);
            }

            let counts = reporter.counts();
            if json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                println!("Total:   {}", counts.total);
                println!("Passed:  {} ({:.2}%)", counts.passed, counts.passed_pct());
                println!("Failed:  {} ({:.2}%)", counts.failed, counts.failed_pct());
                println!("Skipped: {} ({:.2}%)", counts.skipped, counts.skipped_pct());
            }
        }

        None => {
            println!("Run Reporter - test-run reporting for browser e2e suites");
            println!();
            println!("Usage: run-reporter <COMMAND>");
            println!();
            println!("Commands:");
            println!("  generate  Replay a completion-event file and write the HTML reports");
            println!("  summary   Print aggregate counts for a completion-event file");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}

/// Read one JSON completion event per line, skipping unparseable lines with
/// a warning so one corrupt entry never loses the rest of the run.
fn read_events(path: &Path) -> Result<Vec<TestEvent>, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|err| format!("cannot open event file {}: {}", path.display(), err))?;

    let mut events = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TestEvent>(&line) {
            Ok(event) => events.push(event),
            Err(err) => {
                eprintln!(
                    "Warning: skipping unparseable event on line {}: {}",
                    number + 1,
                    err
                );
            }
        }
    }
    Ok(events)
}

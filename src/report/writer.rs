//! Scoped filesystem persistence of the rendered reports.

use std::fs;
use std::path::Path;

use crate::report::ReportResult;

/// File name of the customer report, written for every run
pub const CUSTOMER_REPORT_FILE: &str = "index.html";

/// File name of the detailed operational report, written only for CI runs
pub const DETAILED_REPORT_FILE: &str = "detailed-report.html";

/// Write the rendered reports into the output directory.
///
/// The directory is created recursively and tolerates pre-existing paths.
/// The customer report is always written; the detailed report only when one
/// was produced, so a local run never leaves a zero-byte detailed file
/// behind. Each file lands all-or-nothing: content goes to a temp sibling
/// first and is renamed into place.
pub fn write_reports(
    output_dir: &Path,
    customer_html: &str,
    detailed_html: Option<&str>,
) -> ReportResult<()> {
    fs::create_dir_all(output_dir)?;

    write_atomic(&output_dir.join(CUSTOMER_REPORT_FILE), customer_html)?;
    if let Some(html) = detailed_html {
        write_atomic(&output_dir.join(DETAILED_REPORT_FILE), html)?;
    }
    Ok(())
}

/// Write a file via temp sibling + rename, so readers never see a partial
/// document
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, contents)?;
    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_customer_report_always() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(dir.path(), "<html>customer</html>", None).unwrap();

        let customer = dir.path().join(CUSTOMER_REPORT_FILE);
        assert_eq!(fs::read_to_string(customer).unwrap(), "<html>customer</html>");
        assert!(!dir.path().join(DETAILED_REPORT_FILE).exists());
    }

    #[test]
    fn test_writes_detailed_report_when_produced() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(
            dir.path(),
            "<html>customer</html>",
            Some("<html>detailed</html>"),
        )
        .unwrap();

        let detailed = dir.path().join(DETAILED_REPORT_FILE);
        assert_eq!(fs::read_to_string(detailed).unwrap(), "<html>detailed</html>");
    }

    #[test]
    fn test_creates_intermediate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("reports");
        write_reports(&nested, "<html></html>", None).unwrap();
        assert!(nested.join(CUSTOMER_REPORT_FILE).exists());

        // Idempotent on a pre-existing directory
        write_reports(&nested, "<html>v2</html>", None).unwrap();
        assert_eq!(
            fs::read_to_string(nested.join(CUSTOMER_REPORT_FILE)).unwrap(),
            "<html>v2</html>"
        );
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(dir.path(), "<html></html>", Some("<html></html>")).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|ext| ext == "tmp").unwrap_or(false))
            .collect();
        assert!(leftovers.is_empty());
    }
}

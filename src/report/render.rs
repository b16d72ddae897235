//! HTML rendering of the run report.
//!
//! One rendering function produces both report variants; the customer and
//! detailed views differ only through [`RenderOptions`], so the table
//! structure and the aggregate math cannot drift apart. The output is a
//! self-contained document: inline styles and scripts, plus one external
//! charting-library reference for the status donut.

use chrono::Local;

use crate::config::{ReporterConfig, TrackerConfig};
use crate::report::bug;
use crate::report::types::{AggregateCounts, RenderOptions, TestRecord, TestStatus};

/// Escape a string for interpolation into HTML text or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the full report document for one run.
///
/// Aggregate counts come from the complete record set; display order is a
/// stable sort of a copy by suite (case-insensitive), so tests within one
/// suite keep their execution order and storage order is left untouched.
pub fn render(records: &[TestRecord], options: &RenderOptions, config: &ReporterConfig) -> String {
    let counts = AggregateCounts::from_records(records);

    let mut ordered: Vec<&TestRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.suite.to_lowercase().cmp(&b.suite.to_lowercase()));

    let mut rows = String::new();
    for (idx, record) in ordered.iter().enumerate() {
        rows.push_str(&render_row(record, idx, options, &config.tracker));
    }

    let mut html = String::with_capacity(rows.len() + 16_384);
    html.push_str(DOC_HEAD);
    html.push_str(&render_header(options, config));
    html.push_str(&render_summary(&counts, config));
    html.push_str(&render_table(&rows, options));
    html.push_str(&render_scripts(&counts, options));
    html.push_str("</body>\n</html>\n");
    html
}

/// One primary row plus its hidden companion steps row
fn render_row(
    record: &TestRecord,
    idx: usize,
    options: &RenderOptions,
    tracker: &TrackerConfig,
) -> String {
    let view_cell = if options.include_detail_links {
        format!(
            "<td><a href=\"{}\" target=\"_blank\" class=\"plain-link\"><button>View details</button></a></td>",
            escape_html(&record.details_path)
        )
    } else {
        format!("<td><button onclick=\"toggleSteps({idx})\">View Steps</button></td>")
    };

    // The actions column stays rectangular: non-failed rows render an empty
    // cell rather than dropping the column.
    let action_cell = if options.include_actions {
        if record.status == TestStatus::Failed {
            let payload = bug::encode(record).unwrap_or_default();
            format!(
                "<td><button onclick=\"createBug({idx}, '{}', '{}', '{}')\">Create Bug</button>\
                 <input type=\"hidden\" id=\"bug-data-{idx}\" value=\"{payload}\" /></td>",
                escape_html(tracker.base_url.as_deref().unwrap_or("")),
                escape_html(tracker.project_id.as_deref().unwrap_or("")),
                escape_html(tracker.issue_type_id.as_deref().unwrap_or("")),
            )
        } else {
            "<td></td>".to_string()
        }
    } else {
        String::new()
    };

    let step_items: String = record
        .steps
        .iter()
        .map(|step| format!("<li>{}</li>", escape_html(step)))
        .collect();
    let colspan = if options.include_actions { 7 } else { 6 };

    format!(
        "<tr>\
         <td>{number}</td>\
         <td>{suite}</td>\
         <td>{name}</td>\
         <td><span class=\"badge {status}\">{status_label}</span></td>\
         <td>{duration:.2}s</td>\
         {view_cell}{action_cell}\
         </tr>\n\
         <tr id=\"steps-{idx}\" class=\"steps-row\">\
         <td colspan=\"{colspan}\"><div class=\"steps-content\">\
         <strong>Steps:</strong><ul>{step_items}</ul>\
         </div></td>\
         </tr>\n",
        number = idx + 1,
        suite = escape_html(&record.suite),
        name = escape_html(&record.name),
        status = record.status.as_str(),
        status_label = record.status.as_str().to_uppercase(),
        duration = record.duration_secs,
    )
}

fn render_header(options: &RenderOptions, config: &ReporterConfig) -> String {
    let buttons = if options.include_detail_links {
        format!(
            "<div class=\"report-buttons\">\
             <a href=\"{}/engine-report/index.html\" target=\"_blank\" class=\"plain-link\">\
             <button>Open Engine Report</button></a>\
             <a href=\"index.html\" download=\"custom-report.html\" class=\"plain-link\">\
             <button>Download Report</button></a>\
             </div>",
            escape_html(&config.report_base())
        )
    } else {
        String::new()
    };

    format!(
        "<div class=\"header-container\">\
         <div class=\"header-info\"><h1>Test Report</h1></div>{buttons}</div>\n"
    )
}

fn render_summary(counts: &AggregateCounts, config: &ReporterConfig) -> String {
    format!(
        "<div class=\"top-section\">\n\
         <div class=\"project-info\">\
         <h3>Project Info</h3>\
         <p><strong>Environment:</strong> {environment}</p>\
         <p><strong>Execution Date:</strong> {date}</p>\
         </div>\n\
         <div class=\"summary-and-chart\">\
         <div class=\"summary\"><h2>Test Results Summary</h2>\
         <p><strong>Total:</strong> {total} | <strong>Passed:</strong> {passed} | \
         <strong>Failed:</strong> {failed} | <strong>Skipped:</strong> {skipped}</p></div>\
         <div class=\"chart-container\">\
         <canvas id=\"donutChart\" width=\"300\" height=\"300\"></canvas>\
         </div></div>\n</div>\n",
        environment = escape_html(&config.environment),
        date = Local::now().format("%Y-%m-%d %H:%M:%S"),
        total = counts.total,
        passed = counts.passed,
        failed = counts.failed,
        skipped = counts.skipped,
    )
}

fn render_table(rows: &str, options: &RenderOptions) -> String {
    let view_header = if options.include_detail_links {
        "<th>Details</th>"
    } else {
        "<th>Steps</th>"
    };
    let action_header = if options.include_actions {
        "<th>Actions</th>"
    } else {
        ""
    };

    format!(
        "<table>\n<thead><tr>\
         <th>#</th><th>Suite</th><th>Test Name</th><th>Status</th><th>Duration</th>\
         {view_header}{action_header}\
         </tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n"
    )
}

fn render_scripts(counts: &AggregateCounts, options: &RenderOptions) -> String {
    let mut scripts = format!(
        "<script>\n\
         const centerTextPlugin = {{\n\
         id: 'centerText',\n\
         beforeDraw(chart) {{\n\
         const {{ width, height, ctx }} = chart;\n\
         ctx.restore();\n\
         ctx.font = '1.25em Arial';\n\
         ctx.textBaseline = 'middle';\n\
         ctx.textAlign = 'center';\n\
         const x = width / 2;\n\
         const y = height / 2;\n\
         ctx.fillStyle = '#4caf50';\n\
         ctx.fillText('{passed_pct:.2}%', x, y - 40);\n\
         ctx.fillStyle = '#f44336';\n\
         ctx.fillText('{failed_pct:.2}%', x, y - 10);\n\
         ctx.fillStyle = '#ff9800';\n\
         ctx.fillText('{skipped_pct:.2}%', x, y + 20);\n\
         ctx.save();\n\
         }}\n\
         }};\n\
         const ctx = document.getElementById('donutChart').getContext('2d');\n\
         new Chart(ctx, {{\n\
         type: 'doughnut',\n\
         data: {{\n\
         labels: ['Passed', 'Failed', 'Skipped'],\n\
         datasets: [{{ data: [{passed}, {failed}, {skipped}],\n\
         backgroundColor: ['#4caf50', '#f44336', '#ff9800'], hoverOffset: 4 }}]\n\
         }},\n\
         options: {{ responsive: true, plugins: {{ legend: {{ position: 'bottom' }} }} }},\n\
         plugins: [centerTextPlugin]\n\
         }});\n\
         function toggleSteps(idx) {{\n\
         const row = document.getElementById('steps-' + idx);\n\
         row.style.display = row.style.display === 'table-row' ? 'none' : 'table-row';\n\
         }}\n\
         </script>\n",
        passed_pct = counts.passed_pct(),
        failed_pct = counts.failed_pct(),
        skipped_pct = counts.skipped_pct(),
        passed = counts.passed,
        failed = counts.failed,
        skipped = counts.skipped,
    );

    if options.include_actions {
        scripts.push_str(CREATE_BUG_SCRIPT);
    }
    scripts
}

// Document head with inline styles and the external charting reference.
const DOC_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Test Report</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<style>
body { font-family: 'Arial', sans-serif; background: #f4f6f8; padding: 20px; }
.header-container { display: flex; justify-content: space-between; align-items: center; margin-bottom: 30px; }
.header-info { text-align: center; }
.top-section { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 30px; gap: 40px; }
.project-info { flex: 1; background: #fff; padding: 15px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.05); border-radius: 8px; }
.summary-and-chart { display: flex; flex-direction: column; align-items: center; flex: 1; background: #fff; padding: 15px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.05); border-radius: 8px; }
.chart-container { width: 300px; height: 300px; margin-top: 20px; }
.report-buttons { display: flex; justify-content: flex-end; gap: 10px; }
.report-buttons button { padding: 12px; }
table { width: 100%; border-collapse: collapse; margin-top: 30px; background: #fff; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.05); }
th, td { padding: 12px 15px; border: 1px solid #ddd; text-align: center; }
th { background-color: #3f51b5; color: white; }
.badge { padding: 4px 8px; border-radius: 5px; color: white; font-size: 12px; }
.badge.passed { background: #4caf50; }
.badge.failed { background: #f44336; }
.badge.skipped { background: #ff9800; }
button { padding: 6px 12px; background: #2196f3; color: white; border: none; border-radius: 5px; cursor: pointer; }
button:hover { background: #1976d2; }
.plain-link { text-decoration: none; }
.steps-row { display: none; background: #eef; }
.steps-content { padding: 15px; text-align: left; }
</style>
</head>
<body>
"#;

// Client-side bug-filing helper. Decodes the per-row payload and opens the
// tracker's create-issue form with summary/description query parameters.
const CREATE_BUG_SCRIPT: &str = r#"<script>
function createBug(index, trackerBaseUrl, projectId, issueTypeId) {
  const element = document.getElementById('bug-data-' + index);
  const data = JSON.parse(atob(element.value));

  const summary = encodeURIComponent('Bug: ' + data.name);

  let description = '{code}Steps to Reproduce:\n\n' + data.steps.map((s, i) => (i + 1) + '. ' + s).join('\n\n') + '\n{code}';

  if (data.screenshot) description += '\n\n*Screenshot:* (' + data.screenshot + ')';
  if (data.video) description += '\n\n*Video:* (' + data.video + ')';
  if (data.trace) description += '\n\n*Trace:* (' + data.trace + ')';
  if (data.details) description += '\n\n*Details:* (' + data.details + ')';

  if (data.error) {
    description += '\n\n{code}\n' + data.error + '\n{code}';
  }

  const issueUrl = trackerBaseUrl + '/secure/CreateIssueDetails%21init.jspa?pid=' + projectId + '&issuetype=' + issueTypeId + '&summary=' + summary + '&description=' + encodeURIComponent(description);
  window.open(issueUrl, '_blank');
}
</script>
"#;

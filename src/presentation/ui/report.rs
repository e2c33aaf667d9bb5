use colored::Colorize;

use super::display::DisplayHelper;
use crate::common::result::GitfanResult;
use crate::domain::entities::status_report::StatusReport;

const STATUS_HEADERS: [&str; 6] = ["Name", "Branch", "Tag/Ref", "Staged", "Unstaged", "Location"];
const ERROR_HEADERS: [&str; 3] = ["Error Index", "Message", "Detail"];

/// Renders a collected report as text tables or structured data
pub struct ReportRenderer {
    display: DisplayHelper,
}

impl ReportRenderer {
    pub fn new(display: DisplayHelper) -> Self {
        Self { display }
    }

    /// Status table, then the error table when anything failed.
    ///
    /// Rows and error entries are emitted exactly in report order.
    pub fn render_text(&self, report: &StatusReport) -> String {
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.branch.clone(),
                    row.ref_label.clone(),
                    self.paint(&row.staged, |s| s.bright_green().to_string()),
                    self.paint(&row.unstaged, |s| s.bright_red().to_string()),
                    row.location.clone(),
                ]
            })
            .collect();

        let mut out = self.display.render_table(&STATUS_HEADERS, &rows);

        if report.has_errors() {
            let errors: Vec<Vec<String>> = report
                .errors
                .iter()
                .map(|e| vec![e.index.to_string(), e.message.clone(), single_line(&e.detail)])
                .collect();
            out.push('\n');
            out.push_str(&self.display.render_table(&ERROR_HEADERS, &errors));
        }

        if report.partial {
            out.push('\n');
            out.push_str(&self.paint(
                "Interrupted: some repositories were not inspected.",
                |s| s.yellow().to_string(),
            ));
            out.push('\n');
        }

        out
    }

    pub fn render_json(&self, report: &StatusReport) -> GitfanResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn render_yaml(&self, report: &StatusReport) -> GitfanResult<String> {
        Ok(serde_yaml::to_string(report)?)
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.display.use_color && !text.is_empty() {
            style(text)
        } else {
            text.to_string()
        }
    }
}

// Multi-line diagnostics would break the table grid
fn single_line(detail: &str) -> String {
    detail.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" / ")
}

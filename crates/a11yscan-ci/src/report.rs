//! Report assembly
//!
//! Converts per-file violation lists into one markdown document: a title,
//! then one section per file in diff order, each either a fixed-column table
//! or an explicit no-violations marker. Pure text assembly; identical input
//! yields byte-identical output.

use a11yscan_domain::{FileReport, Violation};

/// First line of every published report
pub const REPORT_TITLE: &str = "# Accessibility report";

/// Emitted for a clean file so absence of problems is visible
pub const NO_VIOLATIONS_MARKER: &str = "No accessibility violations found.";

// Column order is a compatibility contract; consumers rely on it across runs.
const TABLE_HEADER: &str = "| Impact | Description | Help | Help URL | Elements | Markup |";
const TABLE_DIVIDER: &str = "| --- | --- | --- | --- | --- | --- |";

/// Render the full report document for a run.
///
/// Sections appear in the order the file reports are given, which the
/// pipeline keeps aligned with the order the diff reported them.
pub fn render_report(reports: &[FileReport]) -> String {
    let mut sections = Vec::with_capacity(reports.len() + 1);
    sections.push(REPORT_TITLE.to_string());
    for report in reports {
        sections.push(render_section(report));
    }
    sections.join("\n\n")
}

fn render_section(report: &FileReport) -> String {
    let mut section = format!("## [{}]({})", report.file.path, report.file.view_url);
    section.push_str("\n\n");

    if report.is_clean() {
        section.push_str(NO_VIOLATIONS_MARKER);
        return section;
    }

    section.push_str(TABLE_HEADER);
    section.push('\n');
    section.push_str(TABLE_DIVIDER);
    for violation in &report.violations {
        section.push('\n');
        section.push_str(&render_row(violation));
    }
    section
}

fn render_row(violation: &Violation) -> String {
    let impact = violation
        .impact
        .map(|impact| impact.to_string())
        .unwrap_or_default();
    let elements = violation
        .nodes
        .iter()
        .map(|node| node.selector.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let markup = violation
        .nodes
        .iter()
        .map(|node| format!("`{}`", node.outer_html))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "| {} | {} | {} | {} | {} | {} |",
        cell(&impact),
        cell(&violation.description),
        cell(&violation.help),
        cell(&violation.help_url),
        cell(&elements),
        cell(&markup)
    )
}

/// Keep arbitrary text from breaking the table structure
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

//! Plain text rendering of outlines and analyses.

use chrono::SecondsFormat;

use crate::model::DocumentOutline;
use crate::session::{Analysis, RelevanceReport, SummaryReport};

/// Render an outline as an indented heading list.
pub fn outline_to_text(outline: &DocumentOutline) -> String {
    let mut output = String::new();

    if outline.has_title() {
        output.push_str(&format!("Title: {}\n", outline.title));
        output.push('\n');
    }

    if outline.is_empty() {
        output.push_str("No structured headings found in this PDF.\n");
        return output;
    }

    output.push_str("Document Outline:\n");
    for entry in outline.entries() {
        let indent = "  ".repeat(entry.level.depth() as usize - 1);
        output.push_str(&format!(
            "{}{} {} (Page {})\n",
            indent, entry.level, entry.text, entry.page
        ));
    }
    output
}

/// Render a relevance ranking.
pub fn relevance_to_text(report: &RelevanceReport) -> String {
    let mut output = String::from("Persona Analysis Results\n");
    output.push_str(&format!("Document: {}\n", report.filename));
    output.push_str(&format!("Persona: {}\n", report.persona));
    output.push_str(&format!("Job to be done: {}\n", report.job));
    output.push_str(&format!("Keywords: {}\n", report.keywords.join(", ")));
    output.push_str(&format!("Total sections found: {}\n", report.total_sections));
    output.push_str(&format!("Relevant sections: {}\n", report.sections.len()));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    output.push('\n');

    if report.sections.is_empty() {
        output.push_str(
            "No sections found that match the persona and job requirements. \
             Try different keywords or check if the PDF contains relevant headings.\n",
        );
        return output;
    }

    output.push_str("Relevant Sections (Ranked by Importance):\n");
    for (i, section) in report.sections.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}] {} (Page {}) Score: {}\n",
            i + 1,
            section.level(),
            section.text(),
            section.page(),
            section.score
        ));
    }
    output
}

/// Render a summary digest with its header.
pub fn summary_to_text(report: &SummaryReport) -> String {
    let mut output = String::from("Document Summary\n");
    output.push_str(&format!("Document: {}\n", report.filename));
    output.push_str(&format!("Persona: {}\n", report.persona));
    output.push_str(&format!("Task: {}\n", report.job));
    output.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    output.push('\n');
    output.push_str(&report.summary.to_string());
    output
}

/// Render either kind of analysis.
pub fn analysis_to_text(analysis: &Analysis) -> String {
    match analysis {
        Analysis::Relevance(report) => relevance_to_text(report),
        Analysis::Summary(report) => summary_to_text(report),
    }
}

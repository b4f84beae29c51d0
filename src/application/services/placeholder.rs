//! Canned reports returned in demo mode.
//!
//! Output depends only on the inputs (no dates, no randomness) and uses the
//! same section layout as a generated report.

use std::fmt::Write;

use crate::domain::{AnalysisType, ComparisonRequest, NamedText};

use super::prompt_builder::{REPORT_SECTIONS, change_table_header};

pub const PLACEHOLDER_PROMPT_VERSION: &str = "demo_placeholder_v1";

const DEMO_NOTICE: &str =
    "*Demo mode: configure the Azure OpenAI endpoint and key to get a real AI analysis.*";

pub fn comparison_report(request: &ComparisonRequest) -> String {
    let original = request.original();
    let revised = request.revised();
    let before = original.text.stats();
    let after = revised.text.stats();
    let delta = request.word_delta();
    let percentage = if before.word_count > 0 {
        delta as f64 / before.word_count as f64 * 100.0
    } else {
        0.0
    };

    let [summary, overview, impact, recommendations, action] = REPORT_SECTIONS;
    let mut report = String::new();

    let _ = writeln!(report, "## {summary}");
    let _ = writeln!(
        report,
        "**Documents:** {} → {}",
        original.filename, revised.filename
    );
    let _ = writeln!(
        report,
        "**Size:** {} → {} words ({delta:+} words, {percentage:+.1}%)",
        before.word_count, after.word_count
    );
    let _ = writeln!(
        report,
        "This is an illustrative report. The documents were read successfully but no AI \
         analysis was performed."
    );
    let _ = writeln!(report);

    let _ = writeln!(report, "## {overview}");
    let _ = writeln!(report, "{}", change_table_header());
    let _ = writeln!(
        report,
        "| Example: Budget | Modified | €21.0M | €24.4M | Illustrative value | Medium |"
    );
    let _ = writeln!(
        report,
        "| Example: Reporting deadline | Added | n/a | Quarterly report | Illustrative value \
         | Low |"
    );
    let _ = writeln!(report);

    let _ = writeln!(report, "## {impact}");
    let _ = writeln!(
        report,
        "Impact on member organisations cannot be assessed without the AI backend."
    );
    let _ = writeln!(report);

    let _ = writeln!(report, "## {recommendations}");
    let _ = writeln!(report, "1. Configure the AI backend and run the comparison again.");
    let _ = writeln!(report, "2. Review both documents manually in the meantime.");
    let _ = writeln!(report);

    let _ = writeln!(report, "## {action}");
    let _ = writeln!(report, "**Unknown** (demo mode).");
    let _ = writeln!(report);
    let _ = writeln!(report, "---");
    report.push_str(DEMO_NOTICE);
    report.push('\n');

    report
}

pub fn document_report(
    document: &NamedText,
    analysis_type: AnalysisType,
    sections: &[String],
) -> String {
    let stats = document.text.stats();
    let reading_minutes = stats.word_count / 200 + 1;
    let mut report = String::new();

    let _ = writeln!(report, "## Document Analysis ({analysis_type})");
    let _ = writeln!(report, "**Document:** {}", document.filename);
    let _ = writeln!(
        report,
        "**Statistics:** {} words, {} characters, about {reading_minutes} min reading time",
        stats.word_count, stats.char_count
    );
    let _ = writeln!(report);

    for (index, section) in sections.iter().enumerate() {
        let _ = writeln!(report, "### {}. {section}", index + 1);
        let _ = writeln!(report, "Not available in demo mode.");
        let _ = writeln!(report);
    }

    let _ = writeln!(report, "---");
    report.push_str(DEMO_NOTICE);
    report.push('\n');

    report
}

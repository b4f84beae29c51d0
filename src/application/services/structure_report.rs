//! Markdown for the structural pre-analysis.

use std::fmt::Write;

use crate::domain::{Severity, StructureAnalysis};

const LISTED_ITEMS: usize = 3;

/// Opening block for reports whose comparison raised red flags or critical
/// issues. `None` when there is nothing to warn about.
pub fn warning_section(analysis: &StructureAnalysis) -> Option<String> {
    if !analysis.needs_attention() {
        return None;
    }

    let mut section = String::new();
    let _ = writeln!(section, "## ⚠️ Critical Warnings");
    let _ = writeln!(section);

    for issue in &analysis.critical_issues {
        let marker = match issue.severity {
            Severity::Critical => "🔴",
            Severity::High | Severity::Medium => "🟡",
        };
        let _ = writeln!(
            section,
            "{marker} **{}** ({}): {}",
            issue.kind.as_str().to_uppercase(),
            issue.severity.as_str(),
            issue.message
        );
        let _ = writeln!(section, "*Action required: {}*", issue.action_required);
        let _ = writeln!(section);
    }

    let _ = writeln!(
        section,
        "**Note:** these warnings point to possible problems with the comparison itself. \
         Read the analysis carefully and consider verifying it manually."
    );
    let _ = writeln!(section);
    let _ = writeln!(section, "---");

    Some(section)
}

/// Full structural pre-analysis: statistics, section changes, moves and
/// integrity.
pub fn structure_section(analysis: &StructureAnalysis) -> String {
    let StructureAnalysis {
        original,
        revised,
        change,
        content_changes: changes,
        moves,
        integrity,
        ..
    } = analysis;

    let mut section = String::new();
    let _ = writeln!(section, "## Structural Pre-Analysis");
    let _ = writeln!(section);

    let _ = writeln!(section, "### Document Statistics");
    let _ = writeln!(
        section,
        "**Original:** {} words, {} characters, {} sections",
        original.words, original.characters, analysis.original_sections
    );
    let _ = writeln!(
        section,
        "**Revised:** {} words, {} characters, {} sections",
        revised.words, revised.characters, analysis.revised_sections
    );
    let _ = writeln!(
        section,
        "**Size change:** {:+.1}% words, {:+.1}% characters ({})",
        change.word_percentage,
        change.character_percentage,
        analysis.size_category.as_str()
    );
    if !analysis.red_flags.is_empty() {
        let _ = writeln!(section);
        let _ = writeln!(section, "**Red flags:**");
        for flag in &analysis.red_flags {
            let _ = writeln!(section, "- {flag}");
        }
    }
    let _ = writeln!(section);

    let _ = writeln!(section, "### Section Changes");
    let _ = writeln!(section, "- **Added sections:** {}", changes.added.len());
    let _ = writeln!(section, "- **Removed sections:** {}", changes.removed.len());
    let _ = writeln!(section, "- **Modified sections:** {}", changes.modified.len());
    let _ = writeln!(section, "- **Unchanged sections:** {}", changes.unchanged.len());
    if !changes.removed.is_empty() {
        let _ = writeln!(section);
        let _ = writeln!(section, "**Removed:**");
        for removed in changes.removed.iter().take(LISTED_ITEMS) {
            let _ = writeln!(section, "- {} ({} words)", removed.title, removed.word_count);
        }
        if changes.removed.len() > LISTED_ITEMS {
            let _ = writeln!(
                section,
                "- ... and {} more",
                changes.removed.len() - LISTED_ITEMS
            );
        }
    }
    let _ = writeln!(section);

    if !moves.is_empty() {
        let _ = writeln!(section, "### Moved Sections");
        for movement in moves.iter().take(LISTED_ITEMS) {
            let _ = writeln!(
                section,
                "- **{}:** position {} → {} ({})",
                movement.title,
                movement.old_position,
                movement.new_position,
                movement.direction()
            );
        }
        if moves.len() > LISTED_ITEMS {
            let _ = writeln!(section, "- ... and {} more", moves.len() - LISTED_ITEMS);
        }
        let _ = writeln!(section);
    }

    let _ = writeln!(section, "### Document Integrity");
    let _ = writeln!(
        section,
        "**Score:** {}/100 ({})",
        integrity.score,
        integrity.level.as_str()
    );
    let _ = writeln!(
        section,
        "**Recommendation:** {}",
        integrity.level.recommendation()
    );
    for warning in &integrity.warnings {
        let _ = writeln!(section, "- {warning}");
    }
    let _ = writeln!(section);
    let _ = writeln!(section, "---");

    section
}

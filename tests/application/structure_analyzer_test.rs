use docdelta::application::services::{
    analyze_structure, heading_title, split_sections, structure_section, warning_section,
};
use docdelta::domain::{IntegrityLevel, IssueKind, MajorChangeKind, SizeCategory};

const FRAMEWORK: &str = "1. Scope
This framework covers elderly care budgets for all regions.
2. Budget
The national budget rises to 24.4 million euro in 2026.
3. Staffing
Every location keeps at least two nurses on duty at night.
4. Reporting
Providers report quarterly to the ministry.";

const SCOPE_ONLY: &str = "1. Scope
This framework covers elderly care budgets for all regions.";

fn titles<'a>(sections: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    sections.into_iter().collect()
}

#[test]
fn given_identical_versions_when_analyzing_then_reports_no_flags_and_full_integrity() {
    let analysis = analyze_structure(FRAMEWORK, FRAMEWORK);

    assert!(analysis.red_flags.is_empty());
    assert!(analysis.critical_issues.is_empty());
    assert!(analysis.major_changes.is_empty());
    assert!(analysis.moves.is_empty());
    assert_eq!(analysis.original_sections, 4);
    assert_eq!(analysis.content_changes.unchanged.len(), 4);
    assert_eq!(analysis.size_category, SizeCategory::Minimal);
    assert_eq!(analysis.integrity.score, 100);
    assert_eq!(analysis.integrity.level, IntegrityLevel::High);
    assert!(!analysis.needs_attention());
    assert_eq!(warning_section(&analysis), None);
}

#[test]
fn given_large_deletion_when_analyzing_then_raises_red_flags_and_content_loss() {
    let analysis = analyze_structure(FRAMEWORK, SCOPE_ONLY);

    assert_eq!(analysis.red_flags.len(), 3);
    assert!(analysis.red_flags[0].starts_with("Critical: 74.0% change in document size"));
    assert!(analysis.red_flags[1].starts_with("Warning: 75.0% change in word count"));
    assert!(analysis.has_major_change(MajorChangeKind::MassiveDeletion));
    assert!(analysis.has_major_change(MajorChangeKind::Restructuring));
    assert!(
        analysis
            .critical_issues
            .iter()
            .any(|issue| issue.kind == IssueKind::ContentLoss)
    );
    assert_eq!(analysis.size_category, SizeCategory::Extreme);
    assert_eq!(analysis.integrity.score, 10);
    assert_eq!(analysis.integrity.level, IntegrityLevel::Low);
    assert_eq!(
        titles(analysis.content_changes.removed.iter().map(|s| s.title.as_str())),
        ["Budget", "Staffing", "Reporting"]
    );

    let stats = analysis.comparison_stats();
    assert_eq!(stats.doc1_words, 44);
    assert_eq!(stats.doc2_words, 11);
    assert_eq!(stats.size_difference, -33);
    assert_eq!(stats.size_difference_percentage, -75.0);
}

#[test]
fn given_large_deletion_when_rendering_then_warning_section_lists_every_issue() {
    let analysis = analyze_structure(FRAMEWORK, SCOPE_ONLY);

    let warnings = warning_section(&analysis).unwrap();

    assert!(warnings.starts_with("## ⚠️ Critical Warnings"));
    assert!(warnings.contains("**CONTENT_LOSS** (critical)"));
    assert_eq!(warnings.matches("*Action required:").count(), 4);
    assert!(warnings.trim_end().ends_with("---"));
}

#[test]
fn given_swapped_sections_when_analyzing_then_reports_moves_without_flags() {
    let swapped = "1. Scope
This framework covers elderly care budgets for all regions.
2. Staffing
Every location keeps at least two nurses on duty at night.
3. Budget
The national budget rises to 24.4 million euro in 2026.
4. Reporting
Providers report quarterly to the ministry.";

    let analysis = analyze_structure(FRAMEWORK, swapped);

    assert!(analysis.red_flags.is_empty());
    assert_eq!(analysis.content_changes.unchanged.len(), 4);
    assert_eq!(analysis.moves.len(), 2);
    let staffing = &analysis.moves[0];
    assert_eq!(staffing.title, "Staffing");
    assert_eq!((staffing.old_position, staffing.new_position), (3, 2));
    assert_eq!(staffing.direction(), "moved up");
    assert_eq!(analysis.integrity.score, 100);
    assert!(structure_section(&analysis).contains("### Moved Sections"));
}

#[test]
fn given_replaced_and_edited_sections_when_analyzing_then_classifies_each() {
    let revised = "1. Scope
This framework covers elderly care budgets for all regions.
2. Budget
The national budget rises to 26.0 million euro in 2027.
3. Staffing
Every location keeps at least two nurses on duty at night.
4. Evaluation
Providers evaluate the framework every year.";

    let analysis = analyze_structure(FRAMEWORK, revised);
    let changes = &analysis.content_changes;

    assert_eq!(
        titles(changes.added.iter().map(|s| s.title.as_str())),
        ["Evaluation"]
    );
    assert_eq!(
        titles(changes.removed.iter().map(|s| s.title.as_str())),
        ["Reporting"]
    );
    assert_eq!(changes.modified.len(), 1);
    assert_eq!(changes.modified[0].title, "Budget");
    assert_eq!(changes.modified[0].word_change, 0);
    assert!(changes.modified[0].similarity < 1.0);
    assert_eq!(changes.unchanged, ["Scope", "Staffing"]);
    assert!(!analysis.needs_attention());
}

#[test]
fn given_heading_styles_when_detecting_then_extracts_titles() {
    assert_eq!(heading_title("2.3 Budget allocation").as_deref(), Some("Budget allocation"));
    assert_eq!(
        heading_title("Artikel 5 Toepassingsbereik").as_deref(),
        Some("Artikel 5 Toepassingsbereik")
    );
    assert_eq!(heading_title("## Funding ##").as_deref(), Some("Funding"));
    assert_eq!(heading_title("ANNEX").as_deref(), Some("ANNEX"));
    assert_eq!(heading_title("WERKWIJZE EN TOEZICHT").as_deref(), Some("WERKWIJZE EN TOEZICHT"));
}

#[test]
fn given_sentences_when_detecting_headings_then_rejects_them() {
    assert_eq!(heading_title("The budget rises to 24.4 million euro."), None);
    assert_eq!(heading_title("1. The budget rises."), None);
    assert_eq!(heading_title("providers report quarterly"), None);
}

#[test]
fn given_text_before_first_heading_when_splitting_then_leaves_it_out() {
    let sections =
        split_sections("Preamble text here.\n# Scope\nCovers all regions.\n\n# Budget\nRises.");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Scope");
    assert_eq!(sections[0].position, 1);
    assert_eq!(sections[0].content, "Covers all regions.");
    assert_eq!(sections[0].word_count, 3);
    assert_eq!(sections[1].title, "Budget");
    assert_eq!(sections[1].position, 2);
}

#[test]
fn given_empty_original_when_analyzing_then_percentages_stay_zero() {
    let analysis = analyze_structure("", "1. Scope\nNew text for every region.");

    assert_eq!(analysis.change.word_percentage, 0.0);
    assert_eq!(analysis.change.character_percentage, 0.0);
    assert!(analysis.red_flags.is_empty());
    assert_eq!(analysis.content_changes.added.len(), 1);
}

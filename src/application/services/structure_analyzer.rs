use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    ContentChanges, CriticalIssue, IntegrityAssessment, IntegrityLevel, IssueKind, MajorChange,
    MajorChangeKind, ModifiedSection, Section, SectionMove, Severity, SizeCategory, SizeChange,
    StructureAnalysis, TextProfile, word_set_similarity,
};

const SIZE_FLAG_PCT: f64 = 50.0;
const WORD_FLAG_PCT: f64 = 40.0;
const MIN_RETAINED_WORDS: f64 = 0.7;

const MASSIVE_DELETION_PCT: f64 = -50.0;
const SECTION_COUNT_TOLERANCE: usize = 3;
const SECTION_COUNT_HIGH_ABOVE: usize = 5;
const MIN_PRESERVED_CONTENT: f64 = 0.7;

const INTEGRITY_SIZE_PCT: f64 = 30.0;
const INTEGRITY_MANY_MOVES: usize = 5;
const INTEGRITY_MANY_REMOVALS: usize = 3;
const CRITICAL_REMOVALS: usize = 5;

const MAX_TITLE_CHARS: usize = 80;
const MAX_HEADING_LINE_CHARS: usize = 120;
const MAX_TITLE_WORDS: usize = 8;

const VERIFY_VERSIONS: &str = "Verify that the right document versions were uploaded";

/// `1. Scope`, `2.3 Budget`, `B. Annexes`. Captures the title without its number.
static NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)*\.?|[A-Z]\.)\s+(\p{Lu}.{2,99})$").unwrap()
});

/// Articles, paragraphs, chapters and annexes, in Dutch and English.
static LEGAL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:artikel|article|art\.|paragraaf|paragraph|§|",
        r"hoofdstuk|chapter|bijlage|appendix|annex)",
        r"(?:\s*\d+[a-z]?\b|\s+[ivxlc]+\b|\s+[a-z]\b|\s*[:.\-]|\s*$)",
    ))
    .unwrap()
});

static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+?)\s*#*$").unwrap());

/// Compares the section structure and size of two versions without the AI
/// backend. Pure and deterministic.
pub fn analyze_structure(original: &str, revised: &str) -> StructureAnalysis {
    let original_profile = TextProfile::of(original);
    let revised_profile = TextProfile::of(revised);
    let change = SizeChange::between(&original_profile, &revised_profile);

    let before = split_sections(original);
    let after = split_sections(revised);

    let red_flags = red_flags(&original_profile, &revised_profile, &change);
    let content_changes = content_changes(&before, &after);
    let moves = section_moves(&before, &after);
    let major_changes = major_changes(&before, &after, &change);
    let integrity = assess_integrity(&change, &content_changes, &moves, &major_changes);
    let critical_issues = critical_issues(&red_flags, &content_changes, &major_changes);

    StructureAnalysis {
        original: original_profile,
        revised: revised_profile,
        size_category: SizeCategory::classify(&change),
        change,
        red_flags,
        original_sections: before.len(),
        revised_sections: after.len(),
        content_changes,
        moves,
        major_changes,
        integrity,
        critical_issues,
    }
}

/// Splits `text` at every heading line. Lines before the first heading
/// belong to no section.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match heading_title(line) {
            Some(title) => {
                if let Some((previous, lines)) = current.take() {
                    let position = sections.len() + 1;
                    sections.push(section(previous, position, &lines));
                }
                current = Some((title, Vec::new()));
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((title, lines)) = current {
        let position = sections.len() + 1;
        sections.push(section(title, position, &lines));
    }

    sections
}

/// The section title when `line` reads as a heading.
pub fn heading_title(line: &str) -> Option<String> {
    if let Some(caps) = MARKDOWN_HEADING.captures(line) {
        return Some(caps[1].to_string());
    }

    if line.chars().count() > MAX_HEADING_LINE_CHARS {
        return None;
    }

    if LEGAL_HEADING.is_match(line) {
        return Some(line.to_string());
    }

    if let Some(caps) = NUMBERED_HEADING.captures(line) {
        let title = caps[1].trim();
        if !ends_like_sentence(title) {
            return Some(title.to_string());
        }
    }

    looks_like_title(line).then(|| line.to_string())
}

fn looks_like_title(line: &str) -> bool {
    if line.chars().count() > MAX_TITLE_CHARS || ends_like_sentence(line) {
        return false;
    }

    let has_letters = line.chars().any(char::is_alphabetic);
    let all_caps = has_letters && !line.chars().any(char::is_lowercase);
    let capitalised = line.chars().next().is_some_and(char::is_uppercase);

    all_caps || (capitalised && line.split_whitespace().count() <= MAX_TITLE_WORDS)
}

fn ends_like_sentence(line: &str) -> bool {
    line.ends_with(|c: char| matches!(c, '.' | ',' | ';' | ':'))
}

fn section(title: String, position: usize, lines: &[&str]) -> Section {
    let content = lines.join("\n");
    Section {
        title,
        position,
        word_count: content.split_whitespace().count(),
        content,
    }
}

fn red_flags(original: &TextProfile, revised: &TextProfile, change: &SizeChange) -> Vec<String> {
    let mut flags = Vec::new();

    if change.character_percentage.abs() > SIZE_FLAG_PCT {
        flags.push(format!(
            "Critical: {:.1}% change in document size; the document was substantially rewritten",
            change.character_percentage.abs()
        ));
    }
    if change.word_percentage.abs() > WORD_FLAG_PCT {
        flags.push(format!(
            "Warning: {:.1}% change in word count; content may have been removed",
            change.word_percentage.abs()
        ));
    }
    if (revised.words as f64) < original.words as f64 * MIN_RETAINED_WORDS {
        flags.push("Critical: 30% or more of the content was removed".to_string());
    }

    flags
}

/// First section per title, in document order.
fn first_by_title(sections: &[Section]) -> Vec<&Section> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .filter(|section| seen.insert(section.title.as_str()))
        .collect()
}

fn content_changes(before: &[Section], after: &[Section]) -> ContentChanges {
    let old_by_title: HashMap<&str, &Section> = first_by_title(before)
        .into_iter()
        .map(|section| (section.title.as_str(), section))
        .collect();
    let new_titles: HashSet<&str> = after.iter().map(|s| s.title.as_str()).collect();

    let mut changes = ContentChanges::default();

    for section in first_by_title(after) {
        match old_by_title.get(section.title.as_str()) {
            None => changes.added.push(section.clone()),
            Some(old) if old.content != section.content => {
                changes.modified.push(ModifiedSection {
                    title: section.title.clone(),
                    similarity: word_set_similarity(&old.content, &section.content),
                    word_change: section.word_count as i64 - old.word_count as i64,
                });
            }
            Some(_) => changes.unchanged.push(section.title.clone()),
        }
    }

    changes.removed = first_by_title(before)
        .into_iter()
        .filter(|section| !new_titles.contains(section.title.as_str()))
        .cloned()
        .collect();

    changes
}

/// Sections whose (non-empty) content reappears at another position.
fn section_moves(before: &[Section], after: &[Section]) -> Vec<SectionMove> {
    let mut old_by_content: HashMap<&str, &Section> = HashMap::new();
    for section in before.iter().filter(|s| !s.content.is_empty()) {
        old_by_content.entry(section.content.as_str()).or_insert(section);
    }

    let mut seen = HashSet::new();
    let mut moves: Vec<SectionMove> = after
        .iter()
        .filter(|section| !section.content.is_empty() && seen.insert(section.content.as_str()))
        .filter_map(|section| {
            let old = old_by_content.get(section.content.as_str())?;
            (old.position != section.position).then(|| SectionMove {
                title: old.title.clone(),
                old_position: old.position,
                new_position: section.position,
            })
        })
        .collect();

    moves.sort_by_key(|movement| std::cmp::Reverse(movement.shift().abs()));
    moves
}

fn major_changes(before: &[Section], after: &[Section], change: &SizeChange) -> Vec<MajorChange> {
    let mut changes = Vec::new();

    if change.word_percentage < MASSIVE_DELETION_PCT {
        changes.push(MajorChange {
            kind: MajorChangeKind::MassiveDeletion,
            description: format!(
                "{:.1}% of the content was removed",
                change.word_percentage.abs()
            ),
            severity: Severity::High,
            recommendation: "Check that these are the right documents; the wrong versions may \
                             have been uploaded",
        });
    }

    let section_delta = after.len().abs_diff(before.len());
    if section_delta > SECTION_COUNT_TOLERANCE {
        let verb = if after.len() > before.len() { "added" } else { "removed" };
        changes.push(MajorChange {
            kind: MajorChangeKind::SectionCountChange,
            description: format!("{section_delta} sections {verb}"),
            severity: if section_delta > SECTION_COUNT_HIGH_ABOVE {
                Severity::High
            } else {
                Severity::Medium
            },
            recommendation: "Review the changes to the document structure",
        });
    }

    let old_contents: HashSet<&str> = before
        .iter()
        .filter(|s| !s.content.is_empty())
        .map(|s| s.content.as_str())
        .collect();
    if !old_contents.is_empty() {
        let new_contents: HashSet<&str> = after.iter().map(|s| s.content.as_str()).collect();
        let preserved = old_contents.intersection(&new_contents).count() as f64
            / old_contents.len() as f64;

        if preserved < MIN_PRESERVED_CONTENT {
            changes.push(MajorChange {
                kind: MajorChangeKind::Restructuring,
                description: format!(
                    "Only {:.0}% of the section content was preserved",
                    preserved * 100.0
                ),
                severity: Severity::High,
                recommendation: "The document was substantially restructured; review it manually",
            });
        }
    }

    changes
}

fn assess_integrity(
    change: &SizeChange,
    content: &ContentChanges,
    moves: &[SectionMove],
    major: &[MajorChange],
) -> IntegrityAssessment {
    let has = |kind: MajorChangeKind| major.iter().any(|c| c.kind == kind);
    let mut score: i32 = 100;
    let mut warnings = Vec::new();

    if change.word_percentage.abs() > INTEGRITY_SIZE_PCT {
        score -= 30;
        warnings.push(format!(
            "Large size difference: {:+.1}% words",
            change.word_percentage
        ));
    }
    if has(MajorChangeKind::MassiveDeletion) {
        score -= 40;
        warnings.push("Massive content removal detected".to_string());
    }
    if has(MajorChangeKind::Restructuring) {
        score -= 20;
        warnings.push("Major document restructuring".to_string());
    }
    if moves.len() > INTEGRITY_MANY_MOVES {
        score -= 15;
        warnings.push(format!("Many moved sections: {}", moves.len()));
    }
    if content.removed.len() > INTEGRITY_MANY_REMOVALS {
        score -= 10;
        warnings.push(format!("Many removed sections: {}", content.removed.len()));
    }

    let score = score.clamp(0, 100) as u8;
    IntegrityAssessment {
        score,
        level: IntegrityLevel::from_score(score),
        warnings,
    }
}

fn critical_issues(
    red_flags: &[String],
    content: &ContentChanges,
    major: &[MajorChange],
) -> Vec<CriticalIssue> {
    let mut issues: Vec<CriticalIssue> = red_flags
        .iter()
        .map(|flag| CriticalIssue {
            kind: IssueKind::SizeDiscrepancy,
            severity: Severity::Critical,
            message: flag.clone(),
            action_required: VERIFY_VERSIONS,
        })
        .collect();

    if major.iter().any(|c| c.kind == MajorChangeKind::MassiveDeletion) {
        issues.push(CriticalIssue {
            kind: IssueKind::ContentLoss,
            severity: Severity::Critical,
            message: "Massive content removal can mean the wrong document versions were compared"
                .to_string(),
            action_required: "Verify the documents manually",
        });
    }

    if content.removed.len() > CRITICAL_REMOVALS {
        issues.push(CriticalIssue {
            kind: IssueKind::ManyDeletions,
            severity: Severity::High,
            message: format!(
                "{} sections removed; compliance may be affected",
                content.removed.len()
            ),
            action_required: "Review the removed content for compliance impact",
        });
    }

    issues
}

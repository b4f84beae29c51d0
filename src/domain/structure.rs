//! Deterministic comparison of two document versions, computed before (and
//! independently of) the AI backend.

/// Size measurements of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextProfile {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

impl TextProfile {
    /// Lines are `\n`-separated; paragraphs are non-blank blocks separated by a blank line.
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: text.split('\n').count(),
            paragraphs: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        }
    }
}

/// Change from the original to the revised profile. Percentages are relative
/// to the original and 0 when the original is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeChange {
    pub characters: i64,
    pub words: i64,
    pub character_percentage: f64,
    pub word_percentage: f64,
}

impl SizeChange {
    pub fn between(original: &TextProfile, revised: &TextProfile) -> Self {
        Self {
            characters: revised.characters as i64 - original.characters as i64,
            words: revised.words as i64 - original.words as i64,
            character_percentage: percentage(original.characters, revised.characters),
            word_percentage: percentage(original.words, revised.words),
        }
    }
}

fn percentage(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (after as f64 - before as f64) / before as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCategory {
    Minimal,
    Small,
    Moderate,
    Large,
    Extreme,
}

impl SizeCategory {
    /// Buckets the mean of the character and word percentages.
    pub fn classify(change: &SizeChange) -> Self {
        let mean = ((change.character_percentage + change.word_percentage) / 2.0).abs();
        match mean {
            m if m < 5.0 => Self::Minimal,
            m if m < 15.0 => Self::Small,
            m if m < 35.0 => Self::Moderate,
            m if m < 60.0 => Self::Large,
            _ => Self::Extreme,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Small => "small",
            Self::Moderate => "moderate",
            Self::Large => "large",
            Self::Extreme => "extreme",
        }
    }
}

/// A heading and the lines under it, up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// 1-based position among the document's sections.
    pub position: usize,
    pub content: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedSection {
    pub title: String,
    /// Word-set similarity of the old and new content, 0.0 to 1.0.
    pub similarity: f64,
    pub word_change: i64,
}

/// Sections matched by title across the two versions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentChanges {
    pub added: Vec<Section>,
    pub removed: Vec<Section>,
    pub modified: Vec<ModifiedSection>,
    pub unchanged: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// Section content found at a different position in the revised version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMove {
    pub title: String,
    pub old_position: usize,
    pub new_position: usize,
}

impl SectionMove {
    /// Negative when the section moved towards the start of the document.
    pub fn shift(&self) -> i64 {
        self.new_position as i64 - self.old_position as i64
    }

    pub fn direction(&self) -> &'static str {
        if self.shift() < 0 { "moved up" } else { "moved down" }
    }

    pub fn impact(&self) -> Severity {
        if self.shift().abs() > 3 {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorChangeKind {
    MassiveDeletion,
    SectionCountChange,
    Restructuring,
}

impl MajorChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MassiveDeletion => "massive_deletion",
            Self::SectionCountChange => "section_count_change",
            Self::Restructuring => "major_restructuring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorChange {
    pub kind: MajorChangeKind,
    pub description: String,
    pub severity: Severity,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityLevel {
    High,
    Medium,
    Low,
}

impl IntegrityLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::High => "The comparison is reliable; the analysis can be read as usual.",
            Self::Medium => {
                "The changes are complex; take extra care when interpreting the analysis."
            }
            Self::Low => {
                "Document integrity is low; verify the comparison manually before relying on it."
            }
        }
    }
}

/// How far the comparison can be trusted, out of 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityAssessment {
    pub score: u8,
    pub level: IntegrityLevel,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    SizeDiscrepancy,
    ContentLoss,
    ManyDeletions,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SizeDiscrepancy => "size_discrepancy",
            Self::ContentLoss => "content_loss",
            Self::ManyDeletions => "many_deletions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub action_required: &'static str,
}

/// Word counts of the two versions, as reported next to every comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonStats {
    pub doc1_words: usize,
    pub doc2_words: usize,
    pub size_difference: i64,
    pub size_difference_percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureAnalysis {
    pub original: TextProfile,
    pub revised: TextProfile,
    pub change: SizeChange,
    pub size_category: SizeCategory,
    pub red_flags: Vec<String>,
    pub original_sections: usize,
    pub revised_sections: usize,
    pub content_changes: ContentChanges,
    /// Largest shift first.
    pub moves: Vec<SectionMove>,
    pub major_changes: Vec<MajorChange>,
    pub integrity: IntegrityAssessment,
    pub critical_issues: Vec<CriticalIssue>,
}

impl StructureAnalysis {
    pub fn comparison_stats(&self) -> ComparisonStats {
        ComparisonStats {
            doc1_words: self.original.words,
            doc2_words: self.revised.words,
            size_difference: self.change.words,
            size_difference_percentage: self.change.word_percentage,
        }
    }

    /// True when the report should open with a warning block.
    pub fn needs_attention(&self) -> bool {
        !self.red_flags.is_empty() || !self.critical_issues.is_empty()
    }

    pub fn has_major_change(&self, kind: MajorChangeKind) -> bool {
        self.major_changes.iter().any(|change| change.kind == kind)
    }
}

use crate::application::ports::CompletionRequest;
use crate::domain::{AnalysisType, ComparisonRequest, StructureAnalysis};

/// Sections every comparison report carries, in order. Shared with the placeholder report.
pub const REPORT_SECTIONS: [&str; 5] = [
    "Executive Summary",
    "Change Overview",
    "Impact Analysis",
    "Recommendations",
    "Action Required",
];

pub const CHANGE_TABLE_COLUMNS: [&str; 6] = [
    "Section",
    "Change Type",
    "Old Value",
    "New Value",
    "Impact",
    "Priority",
];

pub const COMPARISON_PROMPT_VERSION: &str = "version_compare_v1";
pub const DOCUMENT_PROMPT_VERSION: &str = "document_analysis_v1";

/// Who the reports are written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    pub organisation: String,
    pub sector: String,
    pub language: String,
}

impl Default for PromptProfile {
    fn default() -> Self {
        Self {
            organisation: "ActiZ".to_string(),
            sector: "Dutch elderly care".to_string(),
            language: "English".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn into_request(self, max_tokens: u32, temperature: f32) -> CompletionRequest {
        CompletionRequest::new(self.user, max_tokens, temperature).with_system(self.system)
    }
}

fn structure_context(structure: &StructureAnalysis) -> String {
    let changes = &structure.content_changes;
    let mut context = format!(
        "\n\nStructural pre-analysis (computed, not model output):\n\
         - Words: {} -> {} ({:+.1}%)\n\
         - Sections: {} -> {}\n\
         - Added {}, removed {}, modified {}, moved {}\n\
         - Integrity score: {}/100 ({})",
        structure.original.words,
        structure.revised.words,
        structure.change.word_percentage,
        structure.original_sections,
        structure.revised_sections,
        changes.added.len(),
        changes.removed.len(),
        changes.modified.len(),
        structure.moves.len(),
        structure.integrity.score,
        structure.integrity.level.as_str(),
    );
    for flag in &structure.red_flags {
        context.push_str("\n- ");
        context.push_str(flag);
    }
    context
}

/// Markdown header row plus separator for the change table.
pub fn change_table_header() -> String {
    format!(
        "| {} |\n|{}|",
        CHANGE_TABLE_COLUMNS.join(" | "),
        CHANGE_TABLE_COLUMNS.map(|_| "---").join("|")
    )
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    profile: PromptProfile,
}

impl PromptBuilder {
    pub fn new(profile: PromptProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &PromptProfile {
        &self.profile
    }

    /// [`Self::build`] plus the structural findings as extra context for the model.
    pub fn comparison(&self, request: &ComparisonRequest, structure: &StructureAnalysis) -> Prompt {
        let original = request.original();
        let revised = request.revised();
        let mut prompt = self.build(
            original.text.as_str(),
            &original.filename,
            revised.text.as_str(),
            &revised.filename,
        );
        prompt.user.push_str(&structure_context(structure));
        prompt
    }

    /// Embeds both texts verbatim; no truncation happens here.
    pub fn build(&self, text1: &str, name1: &str, text2: &str, name2: &str) -> Prompt {
        let sections = REPORT_SECTIONS
            .iter()
            .zip(self.section_instructions())
            .map(|(title, instruction)| format!("## {title}\n{instruction}"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let user = format!(
            "Compare the two versions of the document below.\n\n\
             ORIGINAL VERSION: {name1}\n---\n{text1}\n---\n\n\
             NEW VERSION: {name2}\n---\n{text2}\n---\n\n\
             Return a markdown report with exactly these sections, in this order:\n\n\
             {sections}"
        );

        Prompt {
            system: self.comparison_system_prompt(),
            user,
        }
    }

    pub fn single_document(
        &self,
        text: &str,
        filename: &str,
        analysis_type: AnalysisType,
    ) -> Prompt {
        let PromptProfile {
            organisation,
            language,
            ..
        } = &self.profile;

        let lens = match analysis_type {
            AnalysisType::VersionCompare => "and summarise its key points".to_string(),
            AnalysisType::PositionAnalysis => format!("from the perspective of {organisation}"),
            AnalysisType::ExternalAnalysis => "for external reactions and sentiment".to_string(),
            AnalysisType::StrategyAnalysis => "for a communication strategy".to_string(),
        };

        let outline = self
            .document_sections(analysis_type)
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {s}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        let user = format!(
            "Analyse the policy document below {lens}.\n\n\
             DOCUMENT: {filename}\n---\n{text}\n---\n\n\
             Structure the analysis as follows:\n{outline}"
        );

        Prompt {
            system: format!(
                "You are an expert in {sector} policy working for {organisation}. \
                 You analyse policy documents and give clear, practical insights with \
                 concrete recommendations. Write in {language}.",
                sector = self.profile.sector,
            ),
            user,
        }
    }

    pub fn document_sections(&self, analysis_type: AnalysisType) -> Vec<String> {
        let PromptProfile {
            organisation,
            sector,
            ..
        } = &self.profile;

        match analysis_type {
            AnalysisType::VersionCompare => vec![
                "Main subject".to_string(),
                "Key policy measures".to_string(),
                "Target groups".to_string(),
                "Implementation".to_string(),
                "Possible impact".to_string(),
            ],
            AnalysisType::PositionAnalysis => vec![
                format!("Relevance for {sector}"),
                format!("Consequences for {organisation} members"),
                "Opportunities and threats".to_string(),
                format!("Recommended position for {organisation}"),
            ],
            AnalysisType::ExternalAnalysis => vec![
                "Overall sentiment".to_string(),
                "Main objections and concerns".to_string(),
                "Positive points".to_string(),
                "Recommended response".to_string(),
            ],
            AnalysisType::StrategyAnalysis => vec![
                "Communication goals".to_string(),
                "Target audiences".to_string(),
                "Key messages".to_string(),
                "Communication channels".to_string(),
                "Risks and mitigation".to_string(),
            ],
        }
    }

    fn comparison_system_prompt(&self) -> String {
        let PromptProfile {
            organisation,
            sector,
            language,
        } = &self.profile;

        format!(
            "You are an expert document analyst for {organisation}, the industry association \
             for {sector}. You compare successive versions of policy documents and explain \
             what changed and what it means for {organisation}'s member organisations.\n\n\
             Detect every change, in this order of priority:\n\
             1. Removed chapters, sections or procedures.\n\
             2. Sections that moved to a different position.\n\
             3. Modified values: amounts, percentages, dates, deadlines and obligations.\n\
             4. Added sections or requirements.\n\n\
             Quote old and new values literally. Never invent changes that are not in the text. \
             Answer in {language}, in markdown only."
        )
    }

    fn section_instructions(&self) -> [String; 5] {
        let organisation = &self.profile.organisation;
        [
            "Two to four sentences: what changed overall and how significant it is.".to_string(),
            format!(
                "A markdown table with the columns {}. One row per change. \
                 Change Type is one of Added, Removed, Modified or Moved. \
                 Priority is High, Medium or Low.",
                CHANGE_TABLE_COLUMNS.join(" | ")
            ),
            format!(
                "What the changes mean for {organisation} member organisations: financial, \
                 operational, compliance and communication consequences."
            ),
            format!("Concrete follow-up actions for {organisation}, most urgent first."),
            "Start with **Yes** or **No**, then one sentence explaining why.".to_string(),
        ]
    }
}

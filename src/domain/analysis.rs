use std::fmt;
use std::str::FromStr;

/// The lens a report is written through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisType {
    #[default]
    VersionCompare,
    PositionAnalysis,
    ExternalAnalysis,
    StrategyAnalysis,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 4] = [
        Self::VersionCompare,
        Self::PositionAnalysis,
        Self::ExternalAnalysis,
        Self::StrategyAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VersionCompare => "version_compare",
            Self::PositionAnalysis => "position_analysis",
            Self::ExternalAnalysis => "external_analysis",
            Self::StrategyAnalysis => "strategy_analysis",
        }
    }

    /// Unknown or missing values fall back to [`AnalysisType::VersionCompare`].
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown analysis type: {s}"))
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Why a canned report was returned instead of a model-written one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderReason {
    NotConfigured,
    BackendUnavailable(String),
}

impl PlaceholderReason {
    pub fn describe(&self) -> String {
        match self {
            Self::NotConfigured => "AI backend is not configured".to_string(),
            Self::BackendUnavailable(cause) => format!("AI backend unavailable: {cause}"),
        }
    }
}

/// Result of asking the AI backend for a report.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Generated {
        markdown: String,
        model: String,
        usage: Option<TokenUsage>,
    },
    Placeholder {
        markdown: String,
        reason: PlaceholderReason,
    },
}

impl AnalysisOutcome {
    pub fn markdown(&self) -> &str {
        match self {
            Self::Generated { markdown, .. } | Self::Placeholder { markdown, .. } => markdown,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Puts `preamble` in front of the report, separated by a blank line.
    pub fn with_preamble(mut self, preamble: &str) -> Self {
        let (Self::Generated { markdown, .. } | Self::Placeholder { markdown, .. }) = &mut self;
        *markdown = format!("{}\n\n{markdown}", preamble.trim_end());
        self
    }
}

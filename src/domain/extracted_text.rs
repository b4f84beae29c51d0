const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub word_count: usize,
    pub char_count: usize,
}

impl DocumentStats {
    /// Words are whitespace-delimited tokens; characters are Unicode scalar values.
    pub fn of(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
        }
    }
}

/// Plain text pulled out of an upload. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    stats: DocumentStats,
}

impl ExtractedText {
    /// Returns `None` when nothing but whitespace remains after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            stats: DocumentStats::of(text),
            text: text.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    pub fn preview(&self) -> String {
        if self.stats.char_count <= PREVIEW_CHARS {
            return self.text.clone();
        }

        let mut preview: String = self.text.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

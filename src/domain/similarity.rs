use std::collections::HashSet;

const IDENTICAL_ABOVE: f64 = 0.95;
const VERY_DIFFERENT_BELOW: f64 = 0.1;

/// Jaccard similarity of the lowercased word sets of `a` and `b`.
pub fn word_set_similarity(a: &str, b: &str) -> f64 {
    let left: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let right: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }

    left.intersection(&right).count() as f64 / union as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityClass {
    Identical,
    VeryDifferent,
    Normal,
}

impl SimilarityClass {
    pub fn classify(score: f64) -> Self {
        if score > IDENTICAL_ABOVE {
            Self::Identical
        } else if score < VERY_DIFFERENT_BELOW {
            Self::VeryDifferent
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identical => "identical_documents",
            Self::VeryDifferent => "very_different_documents",
            Self::Normal => "normal_comparison",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Identical => "The documents are nearly identical; there is little to compare.",
            Self::VeryDifferent => {
                "The documents share very few words; they may not be versions of the same document."
            }
            Self::Normal => "The documents are ready to compare.",
        }
    }
}

// Keyword extractor trait: lets the pipeline rank text without knowing
// which scoring model sits behind it.

use super::RankedKeyword;

/// Granularity of a keyword ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Individual truncated words
    #[default]
    Words,
    /// Whole candidate phrases
    Phrases,
}

/// Trait for turning a block of text into a ranked keyword list.
pub trait KeywordExtractor {
    /// Rank candidate phrases (or words, for models that only score words)
    /// by descending score. Text without candidates yields an empty list.
    fn rank(&self, text: &str) -> Vec<RankedKeyword>;

    /// Rank individual scoring words by descending score.
    fn rank_words(&self, text: &str) -> Vec<RankedKeyword>;

    fn rank_as(&self, text: &str, granularity: Granularity) -> Vec<RankedKeyword> {
        match granularity {
            Granularity::Words => self.rank_words(text),
            Granularity::Phrases => self.rank(text),
        }
    }
}

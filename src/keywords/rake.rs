// RAKE-style keyword ranking with a selectable scoring strategy.
//
// One extractor covers all three scoring models; the strategy only changes
// how word scores are combined, never how candidates are found.

use tracing::debug;

use super::phrases::candidate_phrases;
use super::scoring::{score_phrases, score_words, ScoringStrategy};
use super::stopwords::StopWords;
use super::traits::KeywordExtractor;
use super::RankedKeyword;

/// Keyword ranker bound to a stop-word list and a scoring strategy.
pub struct Rake<'a> {
    stop_words: &'a StopWords,
    strategy: ScoringStrategy,
    /// Words of this many characters or fewer are not scored
    min_word_len: usize,
}

impl<'a> Rake<'a> {
    pub fn new(stop_words: &'a StopWords, strategy: ScoringStrategy) -> Self {
        Self {
            stop_words,
            strategy,
            min_word_len: 0,
        }
    }

    pub fn with_min_word_len(mut self, min_word_len: usize) -> Self {
        self.min_word_len = min_word_len;
        self
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }
}

impl KeywordExtractor for Rake<'_> {
    fn rank(&self, text: &str) -> Vec<RankedKeyword> {
        if !self.strategy.scores_phrases() {
            return self.rank_words(text);
        }

        let phrases = candidate_phrases(text, self.stop_words);
        let words = score_words(&phrases, self.strategy, self.min_word_len);
        let ranked = score_phrases(&phrases, &words, self.min_word_len);

        debug!(
            strategy = %self.strategy(),
            phrases = ranked.len(),
            "Ranked keyword phrases"
        );
        ranked
    }

    fn rank_words(&self, text: &str) -> Vec<RankedKeyword> {
        let phrases = candidate_phrases(text, self.stop_words);
        let ranked = score_words(&phrases, self.strategy, self.min_word_len).ranked();

        debug!(
            strategy = %self.strategy(),
            phrases = phrases.len(),
            words = ranked.len(),
            "Ranked keyword words"
        );
        ranked
    }
}

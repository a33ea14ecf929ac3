// Keyword set selection and per-post keyword density.

use super::{sort_ranking, RankedKeyword};

/// Share of a ranking kept as the keyword set.
pub const DEFAULT_TOP_FRACTION: f64 = 0.1;

/// The keywords a post's density is measured against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Keep every term scoring at least as high as the term at rank
    /// `floor(len * fraction)` of the descending ranking.
    ///
    /// Ties at the cut-off are all kept, so the set can be larger than the
    /// fraction suggests.
    pub fn top_fraction(ranked: &[RankedKeyword], fraction: f64) -> Self {
        if ranked.is_empty() {
            return Self::default();
        }

        let mut sorted = ranked.to_vec();
        sort_ranking(&mut sorted);

        let cut = ((sorted.len() as f64 * fraction).floor() as usize).min(sorted.len() - 1);
        let threshold = sorted[cut].score;

        Self::new(
            sorted
                .into_iter()
                .filter(|r| r.score >= threshold)
                .map(|r| r.term),
        )
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Total occurrences of every keyword in `text`, case-insensitive.
    ///
    /// Each keyword is counted on its own (non-overlapping occurrences), so
    /// adding keywords to the set can never lower a post's count.
    ///
    /// Matching ignores case deliberately: keywords are extracted from
    /// lowercased text, and a capitalized sentence-initial occurrence still
    /// counts.
    pub fn count_in(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .map(|k| lower.matches(k.as_str()).count())
            .sum()
    }
}

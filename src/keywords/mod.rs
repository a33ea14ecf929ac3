// Keyword extraction — RAKE-style phrase splitting, scoring and selection.

pub mod phrases;
pub mod rake;
pub mod scoring;
pub mod selection;
pub mod stopwords;
pub mod traits;

use serde::{Deserialize, Serialize};

/// One entry of a keyword ranking: a phrase or truncated word and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedKeyword {
    #[serde(rename = "keyword")]
    pub term: String,
    pub score: f64,
}

/// Sort a ranking by descending score. Ties keep their incoming order.
pub fn sort_ranking(ranked: &mut [RankedKeyword]) {
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

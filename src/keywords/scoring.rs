// Word and phrase scoring over a candidate phrase list.
//
// Every strategy starts from the same two counts per word:
//   frequency(w) = how many times w occurs across all phrases
//   degree(w)    = co-occurrence breadth of w, plus frequency(w)
// and differs only in how degree is accumulated and how the two combine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::phrases::phrase_words;
use super::{sort_ranking, RankedKeyword};

/// How word scores are derived from frequency and degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// degree(w) / frequency(w), degree summing (phrase length - 1)
    DegreeRatio,
    /// frequency(w) / degree(w), degree summing 1 / phrase length
    InverseDegree,
    /// frequency(w) alone; ranks words, never phrases
    FrequencyOnly,
}

impl ScoringStrategy {
    pub const ALL: [ScoringStrategy; 3] = [
        ScoringStrategy::DegreeRatio,
        ScoringStrategy::InverseDegree,
        ScoringStrategy::FrequencyOnly,
    ];

    /// Name used in keyword file names (`keywords_<name>.tsv`).
    pub fn file_label(self) -> &'static str {
        match self {
            ScoringStrategy::DegreeRatio => "rake",
            ScoringStrategy::InverseDegree => "exp_rake",
            ScoringStrategy::FrequencyOnly => "frequency",
        }
    }

    /// Whether phrase-level scores exist for this strategy.
    pub fn scores_phrases(self) -> bool {
        !matches!(self, ScoringStrategy::FrequencyOnly)
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_label())
    }
}

impl FromStr for ScoringStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rake" | "degree-ratio" => Ok(ScoringStrategy::DegreeRatio),
            "exp_rake" | "inverse-degree" => Ok(ScoringStrategy::InverseDegree),
            "frequency" | "frequency-only" => Ok(ScoringStrategy::FrequencyOnly),
            other => anyhow::bail!("unknown scoring strategy {other:?}"),
        }
    }
}

/// Per-word scores, remembering the order words were first seen so that
/// ties rank deterministically.
#[derive(Debug, Clone, Default)]
pub struct WordScores {
    order: Vec<String>,
    scores: HashMap<String, f64>,
}

impl WordScores {
    pub fn get(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Words ranked by descending score.
    pub fn ranked(&self) -> Vec<RankedKeyword> {
        let mut ranked: Vec<RankedKeyword> = self
            .order
            .iter()
            .map(|w| RankedKeyword {
                term: w.clone(),
                score: self.scores[w],
            })
            .collect();
        sort_ranking(&mut ranked);
        ranked
    }
}

/// Score every word of `phrases` under `strategy`.
pub fn score_words(phrases: &[String], strategy: ScoringStrategy, min_len: usize) -> WordScores {
    let mut order: Vec<String> = Vec::new();
    let mut frequency: HashMap<String, f64> = HashMap::new();
    let mut degree: HashMap<String, f64> = HashMap::new();

    for phrase in phrases {
        let words = phrase_words(phrase, min_len);
        let length = words.len() as f64;
        let contribution = match strategy {
            ScoringStrategy::DegreeRatio | ScoringStrategy::FrequencyOnly => length - 1.0,
            ScoringStrategy::InverseDegree => 1.0 / length,
        };

        for word in words {
            if !frequency.contains_key(&word) {
                order.push(word.clone());
            }
            *frequency.entry(word.clone()).or_insert(0.0) += 1.0;
            *degree.entry(word).or_insert(0.0) += contribution;
        }
    }

    let scores = order
        .iter()
        .map(|w| {
            let freq = frequency[w];
            let deg = degree[w] + freq;
            let score = match strategy {
                ScoringStrategy::DegreeRatio => deg / freq,
                ScoringStrategy::InverseDegree => freq / deg,
                ScoringStrategy::FrequencyOnly => freq,
            };
            (w.clone(), score)
        })
        .collect();

    WordScores { order, scores }
}

/// Score each distinct phrase as the sum of its word scores.
///
/// Phrases with no scorable words keep a score of zero.
pub fn score_phrases(phrases: &[String], words: &WordScores, min_len: usize) -> Vec<RankedKeyword> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked = Vec::new();

    for phrase in phrases {
        if !seen.insert(phrase.as_str()) {
            continue;
        }
        let score: f64 = phrase_words(phrase, min_len)
            .iter()
            .filter_map(|w| words.get(w))
            .sum();
        ranked.push(RankedKeyword {
            term: phrase.clone(),
            score,
        });
    }

    sort_ranking(&mut ranked);
    ranked
}

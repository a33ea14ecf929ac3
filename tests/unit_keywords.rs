// Unit tests for keyword extraction.
//
// Tests candidate splitting at stop words, the three scoring strategies on
// a small hand-checked text, keyword-set selection and density counting.

use forumgraph::keywords::phrases::{candidate_phrases, phrase_words, TextCleaner};
use forumgraph::keywords::rake::Rake;
use forumgraph::keywords::scoring::{score_words, ScoringStrategy};
use forumgraph::keywords::selection::KeywordSet;
use forumgraph::keywords::stopwords::StopWords;
use forumgraph::keywords::traits::{Granularity, KeywordExtractor};
use forumgraph::keywords::RankedKeyword;

fn ranked(pairs: &[(&str, f64)]) -> Vec<RankedKeyword> {
    pairs
        .iter()
        .map(|(term, score)| RankedKeyword {
            term: term.to_string(),
            score: *score,
        })
        .collect()
}

// ============================================================
// Candidate phrases
// ============================================================

#[test]
fn stop_words_split_candidates() {
    let stop = StopWords::new(["за", "очень"]).unwrap();
    let phrases = candidate_phrases("Иван написал. Спасибо за совет, очень интересно.", &stop);

    for phrase in &phrases {
        for word in phrase.split_whitespace() {
            assert_ne!(word, "за");
            assert_ne!(word, "очень");
        }
    }

    let words: Vec<String> = phrases.iter().flat_map(|p| phrase_words(p, 0)).collect();
    assert!(words.contains(&"спас".to_string()));
    assert!(words.contains(&"сове".to_string()));
    assert!(words.contains(&"инте".to_string()));

    assert!(phrases.contains(&"спасибо".to_string()));
    assert!(phrases.contains(&"интересно".to_string()));
    let advice = phrases.iter().position(|p| p.starts_with("совет"));
    let thanks = phrases.iter().position(|p| p == "спасибо");
    assert!(advice.is_some() && thanks.is_some() && advice != thanks);
}

#[test]
fn hyphenated_stop_word_does_not_split() {
    let stop = StopWords::new(["что"]).unwrap();
    let phrases = candidate_phrases("что-то новое", &stop);
    assert_eq!(phrases, vec!["что-то новое"]);
}

#[test]
fn stop_words_match_case_insensitively() {
    let stop = StopWords::new(["очень"]).unwrap();
    let phrases = candidate_phrases("ОЧЕНЬ интересно", &stop);
    assert_eq!(phrases, vec!["интересно"]);
}

#[test]
fn empty_text_has_no_candidates() {
    let stop = StopWords::builtin().unwrap();
    assert!(candidate_phrases("", &stop).is_empty());
    assert!(candidate_phrases("  ...  ", &stop).is_empty());
}

#[test]
fn cleaner_strips_links_and_noise() {
    let cleaner = TextCleaner::new().unwrap();
    let cleaned = cleaner.clean("Смотрите http://forum.example/t=1 «тему» (важно)…");
    assert!(!cleaned.contains("http"));
    assert!(!cleaned.contains('«'));
    assert!(!cleaned.contains('('));
    assert!(cleaned.ends_with('.'));
}

// ============================================================
// Scoring strategies
// ============================================================

#[test]
fn degree_ratio_favors_long_phrases() {
    // "давление растет" (2 words) and "давление" alone
    let phrases = vec!["давление растет".to_string(), "давление".to_string()];
    let scores = score_words(&phrases, ScoringStrategy::DegreeRatio, 0);

    // давл: freq 2, degree (1 + 0) + 2 = 3 -> 1.5; раст: freq 1, degree 1 + 1 = 2 -> 2.0
    assert!((scores.get("давл").unwrap() - 1.5).abs() < 1e-9);
    assert!((scores.get("раст").unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn inverse_degree_scores() {
    let phrases = vec!["давление растет".to_string(), "давление".to_string()];
    let scores = score_words(&phrases, ScoringStrategy::InverseDegree, 0);

    // давл: freq 2, Σ1/len = 0.5 + 1 -> 2 / 3.5; раст: 1 / (0.5 + 1)
    assert!((scores.get("давл").unwrap() - 2.0 / 3.5).abs() < 1e-9);
    assert!((scores.get("раст").unwrap() - 1.0 / 1.5).abs() < 1e-9);
}

#[test]
fn frequency_only_counts_occurrences() {
    let phrases = vec!["давление растет".to_string(), "давление".to_string()];
    let scores = score_words(&phrases, ScoringStrategy::FrequencyOnly, 0);
    assert_eq!(scores.get("давл"), Some(2.0));
    assert_eq!(scores.get("раст"), Some(1.0));
}

#[test]
fn min_word_len_excludes_short_words() {
    let phrases = vec!["мы давление".to_string()];
    let scores = score_words(&phrases, ScoringStrategy::DegreeRatio, 2);
    assert!(scores.get("мы").is_none());
    assert!(scores.get("давл").is_some());
}

#[test]
fn numbers_are_not_scored() {
    let phrases = vec!["давление 120 3.5".to_string()];
    let scores = score_words(&phrases, ScoringStrategy::FrequencyOnly, 0);
    assert_eq!(scores.len(), 1);
}

#[test]
fn rankings_are_sorted_descending() {
    let stop = StopWords::builtin().unwrap();
    let text = "Давление растет каждый день. Давление падает ночью. Врач советует покой.";
    for strategy in ScoringStrategy::ALL {
        let rake = Rake::new(&stop, strategy);
        for granularity in [Granularity::Words, Granularity::Phrases] {
            let ranked = rake.rank_as(text, granularity);
            assert!(!ranked.is_empty(), "{strategy} produced nothing");
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}

#[test]
fn phrase_ranking_has_no_duplicates() {
    let stop = StopWords::builtin().unwrap();
    let rake = Rake::new(&stop, ScoringStrategy::DegreeRatio);
    let ranked = rake.rank("Давление растет. Давление растет. Врач советует.");
    let mut terms: Vec<&str> = ranked.iter().map(|r| r.term.as_str()).collect();
    let before = terms.len();
    terms.sort();
    terms.dedup();
    assert_eq!(terms.len(), before);
}

#[test]
fn strategy_parses_from_file_label() {
    for strategy in ScoringStrategy::ALL {
        let parsed: ScoringStrategy = strategy.file_label().parse().unwrap();
        assert_eq!(parsed, strategy);
    }
    assert!("tfidf".parse::<ScoringStrategy>().is_err());
}

// ============================================================
// Keyword set and density
// ============================================================

#[test]
fn top_fraction_keeps_scores_above_threshold() {
    let ranking = ranked(&[
        ("a1", 10.0),
        ("a2", 9.0),
        ("a3", 8.0),
        ("a4", 7.0),
        ("a5", 6.0),
        ("a6", 5.0),
        ("a7", 4.0),
        ("a8", 3.0),
        ("a9", 2.0),
        ("a10", 1.0),
    ]);
    // floor(10 * 0.2) = 2 -> threshold 8.0
    let set = KeywordSet::top_fraction(&ranking, 0.2);
    assert_eq!(set.keywords(), &["a1", "a2", "a3"]);
}

#[test]
fn top_fraction_of_empty_ranking_is_empty() {
    assert!(KeywordSet::top_fraction(&[], 0.1).is_empty());
}

#[test]
fn density_counts_case_insensitively() {
    let set = KeywordSet::new(["давл"]);
    assert_eq!(set.count_in("Давление и давление"), 2);
}

#[test]
fn density_is_monotonic_in_keyword_set() {
    let text = "Давление растет, врач советует снизить давление";
    let small = KeywordSet::new(["давл"]);
    let large = KeywordSet::new(["давл", "врач", "сове"]);
    assert!(large.count_in(text) >= small.count_in(text));
    assert_eq!(large.count_in(text), 4);
}

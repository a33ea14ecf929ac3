// Sentence and phrase splitting for keyword candidates.
//
// Text is cut into sentences on terminal punctuation, sentences are cut into
// phrases at stop words, and phrases are cut into words on whitespace. Words
// are truncated by length band instead of stemmed; the bands were tuned on
// Russian inflection and keep rankings comparable across runs.

use anyhow::{Context, Result};
use regex::Regex;

use super::stopwords::StopWords;

/// Strips link debris and punctuation noise from an opening post before
/// keyword ranking.
pub struct TextCleaner {
    links: Regex,
    noise: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            links: Regex::new(r"[a-zA-Z0-9:/.,=&#*]{2,}").context("link pattern")?,
            noise: Regex::new(r"\(|\)|-|«|»|Т\.е\.|,|:").context("noise pattern")?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let text = self.links.replace_all(text, " ");
        let text = self.noise.replace_all(&text, " ");
        text.replace('…', ".")
    }
}

/// Split text into lowercased, trimmed, non-blank sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(|c| !c.is_whitespace()))
        .map(|s| s.to_lowercase().trim().to_string())
        .collect()
}

/// All candidate phrases of `text`, in order of appearance.
pub fn candidate_phrases(text: &str, stop_words: &StopWords) -> Vec<String> {
    split_sentences(text)
        .iter()
        .flat_map(|sentence| stop_words.split(sentence))
        .collect()
}

/// Length-banded truncation standing in for a stemmer.
///
/// 12+ characters keep 7, 10+ keep 6, 6+ keep 4, 4+ keep 3; shorter words
/// are unchanged. Lengths are counted in characters, not bytes.
pub fn truncate_word(word: &str) -> &str {
    let len = word.chars().count();
    let keep = match len {
        n if n >= 12 => 7,
        n if n >= 10 => 6,
        n if n >= 6 => 4,
        n if n >= 4 => 3,
        _ => return word,
    };
    match word.char_indices().nth(keep) {
        Some((byte, _)) => &word[..byte],
        None => word,
    }
}

/// Scoring keys of a phrase: truncated, lowercased words longer than
/// `min_len` that are not numbers.
pub fn phrase_words(phrase: &str, min_len: usize) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(|w| truncate_word(w).trim().to_lowercase())
        .filter(|w| w.chars().count() > min_len && !is_number(w))
        .collect()
}

/// Integer literal, or float literal when the token contains a dot.
fn is_number(token: &str) -> bool {
    if token.contains('.') {
        token.parse::<f64>().is_ok()
    } else {
        token.parse::<i64>().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_bands() {
        assert_eq!(truncate_word("преобразовывается"), "преобра");
        assert_eq!(truncate_word("информация"), "информ");
        assert_eq!(truncate_word("спасибо"), "спас");
        assert_eq!(truncate_word("совет"), "сов");
        assert_eq!(truncate_word("тут"), "тут");
        assert_eq!(truncate_word(""), "");
    }

    #[test]
    fn test_split_sentences_drops_blank() {
        assert_eq!(
            split_sentences("Первое. ! Второе?  "),
            vec!["первое", "второе"]
        );
    }

    #[test]
    fn test_phrase_words_skip_numbers() {
        assert_eq!(phrase_words("давление 12 3.5 бар", 0), vec!["давл", "бар"]);
    }

    #[test]
    fn test_phrase_words_min_len() {
        assert_eq!(phrase_words("а бар клапан", 2), vec!["бар", "клап"]);
    }

    #[test]
    fn test_cleaner_removes_links_and_noise() {
        let cleaner = TextCleaner::new().unwrap();
        let cleaned = cleaner.clean("Смотри http://site.ru/x (фото), т.е… дальше");
        assert!(!cleaned.contains("http"));
        assert!(!cleaned.contains('('));
        assert!(!cleaned.contains(','));
        assert!(cleaned.contains('.'));
    }
}

// Stop-word list and the splitter pattern built from it.
//
// The built-in list was curated for Russian technical forum threads: besides
// function words it carries the verbs that kept surfacing as noise in
// mechanical discussions. The ISO lists from the `stop-words` crate can be
// merged in for broader coverage.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use stop_words::{get, LANGUAGE};

use crate::error::require_file;

const BUILTIN: &[&str] = &[
    "в", "как", "примерно", "общих", "всем", "на", "при", "или", "это", "по", "и", "от", "из",
    "благодаря", "затем", "все", "мы", "но", "не", "что", "так", "тот", "кто", "них", "а",
    "чтобы", "когда", "учитывая", "еще", "под", "ней", "собой", "понятно", "которые", "свою",
    "то", "она", "никак", "вообще", "ну", "очень", "тут", "какая", "эта", "только", "лишь",
    "для", "того", "тогда", "никакого", "давайте", "вот", "имхо", "хочет", "получить", "читать",
    "эту", "тех", "критикуйте", "такая", "совсем", "за", "этого", "во", "время", "его",
    "конечно", "счет", "которое", "видно", "они", "свое", "своей", "хотел", "вижу", "слова",
    "работают", "нажатии", "создает", "заполненной", "передается", "выталкивает", "давят",
    "сжимают", "создавая", "преобразовывается", "рассеивается", "остановились", "написать",
    "возникают", "отходят", "делать", "распространенные", "разбирал", "знает", "сидят",
    "разводящая", "сдвинуть", "влияет", "двигаются", "служит", "болтались", "издавали",
    "гремящий", "возвращаются", "отпускаем", "оказывает", "разбираться", "появляется",
    "действует", "выталкивается", "деформируется", "стремятся", "падает", "позволяет",
    "вернуться", "делает", "увлекая", "разводятся", "остается", "вернуть", "возвращается",
    "теряет", "я",
];

/// Where the stop-word list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum StopWordSource {
    /// The curated forum list
    Builtin,
    /// Curated list plus the Russian and English ISO lists
    Iso,
    /// One word per line
    File(std::path::PathBuf),
}

/// A stop-word list with its compiled splitting pattern.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: Vec<String>,
    pattern: Option<Regex>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort();
        words.dedup();

        let pattern = if words.is_empty() {
            None
        } else {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                    .context("Failed to compile stop-word pattern")?,
            )
        };

        Ok(Self { words, pattern })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN)
    }

    pub fn load(source: &StopWordSource) -> Result<Self> {
        match source {
            StopWordSource::Builtin => Self::builtin(),
            StopWordSource::Iso => {
                let mut words: Vec<String> = BUILTIN.iter().map(|w| w.to_string()).collect();
                words.extend(get(LANGUAGE::Russian));
                words.extend(get(LANGUAGE::English));
                Self::new(words)
            }
            StopWordSource::File(path) => Self::from_file(path),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        require_file(path)?;
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop words from {}", path.display()))?;
        Self::new(contents.lines())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Split `sentence` at every stop word into the runs between them.
    ///
    /// A stop word counts only as a whole word that is not followed by a
    /// hyphen, so "что-то" stays intact while "за" in "спасибо за совет"
    /// splits. Runs are trimmed and lowercased; empty runs are dropped.
    pub fn split<'a>(&self, sentence: &'a str) -> Vec<String> {
        let mut pieces: Vec<&'a str> = Vec::new();
        let mut start = 0;

        if let Some(pattern) = &self.pattern {
            for m in pattern.find_iter(sentence) {
                if sentence[m.end()..].starts_with('-') {
                    continue;
                }
                pieces.push(&sentence[start..m.start()]);
                start = m.end();
            }
        }
        pieces.push(&sentence[start..]);

        pieces
            .into_iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

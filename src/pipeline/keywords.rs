// Keyword pipeline: opening post -> three keyword rankings on disk.
//
// The thread's first post sets the topic, so only its text is ranked. It is
// cleaned of link debris first, then ranked once per scoring strategy and
// written to `keywords_<strategy>.tsv`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::InputError;
use crate::keywords::phrases::TextCleaner;
use crate::keywords::rake::Rake;
use crate::keywords::scoring::ScoringStrategy;
use crate::keywords::traits::{Granularity, KeywordExtractor};
use crate::keywords::RankedKeyword;
use crate::thread::Thread;
use crate::tsv;

/// One strategy's ranking and where it was written.
#[derive(Debug, Clone)]
pub struct KeywordFile {
    pub strategy: ScoringStrategy,
    pub path: PathBuf,
    pub ranked: Vec<RankedKeyword>,
}

/// File name for a strategy's ranking.
pub fn keyword_file_name(strategy: ScoringStrategy) -> String {
    format!("keywords_{}.tsv", strategy.file_label())
}

/// Rank the thread's opening post under every strategy.
pub fn rank_opening_post(
    thread: &Thread,
    analysis: &AnalysisConfig,
    granularity: Granularity,
) -> Result<Vec<(ScoringStrategy, Vec<RankedKeyword>)>> {
    let opening = thread
        .posts()
        .first()
        .map(|p| p.text.as_str())
        .unwrap_or_default();
    let text = TextCleaner::new()?.clean(opening);

    Ok(ScoringStrategy::ALL
        .iter()
        .map(|&strategy| {
            let rake = Rake::new(&analysis.stop_words, strategy)
                .with_min_word_len(analysis.min_word_len);
            (strategy, rake.rank_as(&text, granularity))
        })
        .collect())
}

/// Read the thread, rank its opening post and write one file per strategy
/// into `out_dir`.
pub fn run(
    thread_path: &Path,
    out_dir: &Path,
    analysis: &AnalysisConfig,
    granularity: Granularity,
) -> Result<Vec<KeywordFile>> {
    let thread = tsv::read_thread(thread_path, analysis.input_header)?;
    if thread.is_empty() {
        return Err(InputError::NothingToProcess {
            what: "posts",
            location: thread_path.to_path_buf(),
        }
        .into());
    }

    info!(
        thread = %thread_path.display(),
        posts = thread.len(),
        "Extracting keywords"
    );

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut files = Vec::new();
    for (strategy, ranked) in rank_opening_post(&thread, analysis, granularity)? {
        let path = out_dir.join(keyword_file_name(strategy));
        tsv::write_ranking(&path, &ranked)?;
        info!(
            strategy = %strategy,
            keywords = ranked.len(),
            path = %path.display(),
            "Wrote keyword ranking"
        );
        files.push(KeywordFile {
            strategy,
            path,
            ranked,
        });
    }

    Ok(files)
}

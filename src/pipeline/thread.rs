// Thread statistics pipeline: reply graphs, per-post and per-author tables.
//
// Replies are resolved once per resolver and reused for every keyword file;
// only the per-post `keywords` column depends on the keyword ranking. All
// inputs are read and validated before the first file is written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::{require_file, InputError};
use crate::graph::{InteractionGraph, NormalizedGraph};
use crate::keywords::selection::KeywordSet;
use crate::keywords::RankedKeyword;
use crate::replies::naive::NaiveResolver;
use crate::replies::quote::QuoteResolver;
use crate::replies::traits::ReplyResolver;
use crate::replies::ResolvedReplies;
use crate::stats::author::{author_stats, thread_counts, AuthorStats, ThreadCount};
use crate::stats::post::{post_stats, LinkCounter, PostStats};
use crate::thread::Thread;
use crate::tsv;

/// Everything one resolver contributes to the output.
#[derive(Debug, Clone)]
pub struct ResolverPass {
    pub label: &'static str,
    pub replies: ResolvedReplies,
    pub graph: InteractionGraph,
    pub normalized: NormalizedGraph,
    pub authors: Vec<AuthorStats>,
}

impl ResolverPass {
    fn from_resolver<R: ReplyResolver + ?Sized>(resolver: &R) -> Self {
        let thread = resolver.thread();
        let replies = resolve_with_progress(resolver);
        let graph = InteractionGraph::from_links(thread, &replies.links);
        let normalized = graph.normalize();
        let authors = author_stats(thread, &graph, &normalized);

        if replies.unresolved > 0 {
            warn!(
                resolver = resolver.label(),
                unresolved = replies.unresolved,
                "Some quotes could not be tied to a post"
            );
        }
        info!(
            resolver = resolver.label(),
            links = replies.links.len(),
            authors = graph.authors().len(),
            "Reply graph built"
        );

        Self {
            label: resolver.label(),
            replies,
            graph,
            normalized,
            authors,
        }
    }
}

/// Per-resolver line of the run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverSummary {
    pub label: String,
    pub links: usize,
    pub unresolved_quotes: usize,
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub thread: String,
    pub keyword_file: String,
    pub posts: usize,
    pub authors: usize,
    pub keywords_used: usize,
    pub generated_at: String,
    pub resolvers: Vec<ResolverSummary>,
}

/// What was written for one keyword file.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    pub summary: RunSummary,
}

/// Result of one `run`: the reply graphs and one report per keyword file.
#[derive(Debug, Clone)]
pub struct StatsRun {
    pub passes: Vec<ResolverPass>,
    pub reports: Vec<StatsReport>,
}

/// Resolve every post, showing progress on long threads.
fn resolve_with_progress<R: ReplyResolver + ?Sized>(resolver: &R) -> ResolvedReplies {
    let posts = resolver.thread().len();
    let pb = ProgressBar::new(posts as u64);
    // A template that fails to parse only loses the styling.
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  Resolving [{bar:30}] {pos}/{len} ({eta}) {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(resolver.label());

    let mut replies = ResolvedReplies::default();
    for index in 0..posts {
        replies.push(resolver.resolve_post(index));
        pb.inc(1);
    }
    pb.finish_and_clear();
    replies
}

/// Run both resolvers over the thread.
pub fn analyze_replies(thread: &Thread, analysis: &AnalysisConfig) -> Result<Vec<ResolverPass>> {
    let quote = QuoteResolver::new(thread, &analysis.quote_markers)?;
    let naive = NaiveResolver::new(thread).with_text_overlap(analysis.naive_text_overlap);

    let resolvers: [&dyn ReplyResolver; 2] = [&quote, &naive];
    Ok(resolvers
        .into_iter()
        .map(ResolverPass::from_resolver)
        .collect())
}

/// `keywords_*.tsv` files in `dir`, sorted by name.
pub fn discover_keyword_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list keyword directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_keyword_file = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("keywords_") && n.ends_with(".tsv"));
        if is_keyword_file {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(InputError::NothingToProcess {
            what: "keyword files",
            location: dir.to_path_buf(),
        }
        .into());
    }
    Ok(files)
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a name from {}", path.display()))
}

/// Compute and write the statistics for one thread against each keyword
/// file. Output for `keywords_x.tsv` lands in `<out_dir>/keywords_x/`.
pub fn run(
    thread_path: &Path,
    keyword_files: &[PathBuf],
    out_dir: &Path,
    analysis: &AnalysisConfig,
) -> Result<StatsRun> {
    require_file(thread_path)?;
    for path in keyword_files {
        require_file(path)?;
    }
    if keyword_files.is_empty() {
        return Err(InputError::NothingToProcess {
            what: "keyword files",
            location: out_dir.to_path_buf(),
        }
        .into());
    }

    let thread = tsv::read_thread(thread_path, analysis.input_header)?;
    if thread.is_empty() {
        return Err(InputError::NothingToProcess {
            what: "posts",
            location: thread_path.to_path_buf(),
        }
        .into());
    }

    let rankings = keyword_files
        .iter()
        .map(|path| Ok((path, tsv::read_ranking(path)?)))
        .collect::<Result<Vec<(&PathBuf, Vec<RankedKeyword>)>>>()?;

    let name = file_stem(thread_path)?;
    info!(
        thread = %name,
        posts = thread.len(),
        authors = thread.authors().len(),
        keyword_files = rankings.len(),
        "Analyzing thread"
    );

    let passes = analyze_replies(&thread, analysis)?;
    let counts = thread_counts(&thread);
    let links = LinkCounter::new()?;
    let tables = ThreadTables {
        name: &name,
        thread: &thread,
        passes: &passes,
        counts: &counts,
        links: &links,
    };

    let mut reports = Vec::new();
    for (path, ranked) in rankings {
        let keywords = KeywordSet::top_fraction(&ranked, analysis.keyword_fraction);
        let directory = out_dir.join(file_stem(path)?);
        let report = tables.write_report(&directory, path, &keywords)?;
        info!(
            directory = %report.directory.display(),
            files = report.files.len(),
            keywords = keywords.len(),
            "Statistics written"
        );
        reports.push(report);
    }

    Ok(StatsRun { passes, reports })
}

/// Per-thread inputs shared by every keyword file's report.
struct ThreadTables<'a> {
    name: &'a str,
    thread: &'a Thread,
    passes: &'a [ResolverPass],
    counts: &'a [ThreadCount],
    links: &'a LinkCounter,
}

impl ThreadTables<'_> {
    fn write_report(
        &self,
        directory: &Path,
        keyword_file: &Path,
        keywords: &KeywordSet,
    ) -> Result<StatsReport> {
        let Self {
            name,
            thread,
            passes,
            counts,
            links,
        } = *self;

        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create {}", directory.display()))?;

        let mut files = Vec::new();
        for pass in passes {
            let kind = pass.label;
            let indegree = pass.replies.indegree(thread.len());
            let rows: Vec<PostStats> = post_stats(thread, keywords, links, &indegree);

            let path = directory.join(format!("stat_{name}_{kind}.tsv"));
            tsv::write_rows(&path, &rows)?;
            files.push(path);

            for (suffix, table) in pass.graph.export(&pass.normalized) {
                let path = directory.join(format!("{name}_{kind}_soc_graph_{suffix}.tsv"));
                tsv::write_table(&path, &table)?;
                files.push(path);
            }

            let path = directory.join(format!("auth_stat_{name}_{kind}.tsv"));
            tsv::write_rows(&path, &pass.authors)?;
            files.push(path);
        }

        let path = directory.join(format!("{name}_threads_count.tsv"));
        tsv::write_rows(&path, counts)?;
        files.push(path);

        let summary = RunSummary {
            thread: name.to_string(),
            keyword_file: keyword_file.display().to_string(),
            posts: thread.len(),
            authors: thread.authors().len(),
            keywords_used: keywords.len(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            resolvers: passes
                .iter()
                .map(|pass| ResolverSummary {
                    label: pass.label.to_string(),
                    links: pass.replies.links.len(),
                    unresolved_quotes: pass.replies.unresolved,
                })
                .collect(),
        };
        let path = directory.join("summary.json");
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        files.push(path);

        Ok(StatsReport {
            directory: directory.to_path_buf(),
            files,
            summary,
        })
    }
}

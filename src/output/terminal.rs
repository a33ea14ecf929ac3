// Colored terminal output for keyword rankings and statistics runs.
//
// main.rs only decides what to show; the formatting lives here.

use colored::Colorize;

use crate::keywords::RankedKeyword;
use crate::pipeline::keywords::KeywordFile;
use crate::pipeline::thread::{ResolverPass, StatsReport};

/// How many keywords each ranking shows.
const KEYWORD_PREVIEW: usize = 10;

/// How many author pairs each reply graph shows.
const EDGE_PREVIEW: usize = 5;

/// Display the head of every keyword ranking.
pub fn display_keywords(files: &[KeywordFile]) {
    for file in files {
        println!(
            "\n{}",
            format!(
                "=== {} ({} keywords) ===",
                file.strategy,
                file.ranked.len()
            )
            .bold()
        );
        display_ranking(&file.ranked);
        println!("  {}", file.path.display().to_string().dimmed());
    }
}

fn display_ranking(ranked: &[RankedKeyword]) {
    if ranked.is_empty() {
        println!("  {}", "No keywords found in the opening post.".yellow());
        return;
    }

    println!("  {:>4}  {:<40} {:>8}", "Rank".dimmed(), "Keyword".dimmed(), "Score".dimmed());
    println!("  {}", "-".repeat(56).dimmed());
    for (i, keyword) in ranked.iter().take(KEYWORD_PREVIEW).enumerate() {
        println!(
            "  {:>4}. {:<40} {:>8.3}",
            i + 1,
            super::truncate_chars(&keyword.term, 40),
            keyword.score
        );
    }
    if ranked.len() > KEYWORD_PREVIEW {
        println!(
            "  {}",
            format!("... and {} more", ranked.len() - KEYWORD_PREVIEW).dimmed()
        );
    }
}

/// Display the strongest reply edges of each resolver.
pub fn display_reply_graphs(passes: &[ResolverPass]) {
    for pass in passes {
        println!(
            "\n{}",
            format!(
                "=== Reply graph: {} ({} links) ===",
                pass.label,
                pass.replies.links.len()
            )
            .bold()
        );

        let edges = pass.graph.top_edges(EDGE_PREVIEW);
        if edges.is_empty() {
            println!("  {}", "No replies resolved.".yellow());
        }
        for (from, to, count) in edges {
            println!(
                "  {:<24} {} {:<24} {:>4}",
                super::truncate_chars(from, 24),
                "->".dimmed(),
                super::truncate_chars(to, 24),
                count
            );
        }

        if pass.replies.unresolved > 0 {
            println!(
                "  {} {} quotes could not be tied to a post",
                "~".yellow(),
                pass.replies.unresolved
            );
        }
    }
}

/// Display where each statistics run was written.
pub fn display_reports(reports: &[StatsReport]) {
    for report in reports {
        let summary = &report.summary;
        println!(
            "\n{} {}",
            "Wrote".green().bold(),
            report.directory.display().to_string().bold()
        );
        println!(
            "  {} posts, {} authors, {} keywords in use, {} files",
            summary.posts,
            summary.authors,
            summary.keywords_used,
            report.files.len()
        );
        for resolver in &summary.resolvers {
            println!(
                "  {:<16} {:>5} links  {:>5} unresolved",
                resolver.label.dimmed(),
                resolver.links,
                resolver.unresolved_quotes
            );
        }
    }
}

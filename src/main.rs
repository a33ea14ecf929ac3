use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use forumgraph::config::Config;
use forumgraph::keywords::traits::Granularity;
use forumgraph::output::terminal;
use forumgraph::pipeline;

/// Forumgraph: keyword rankings and reply graphs for forum threads.
///
/// Ranks the keywords of a thread's opening post, infers who replied to
/// whom, and writes per-post and per-author statistics as TSV tables.
#[derive(Parser)]
#[command(name = "forumgraph", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the keywords of a thread's opening post
    Keywords {
        /// Thread file (tab-separated, one post per row)
        thread: PathBuf,

        /// Output directory (default: FORUMGRAPH_OUTPUT_DIR or ".")
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rank single words or whole phrases
        #[arg(long, value_enum, default_value_t = GranularityArg::Words)]
        granularity: GranularityArg,
    },

    /// Build reply graphs and statistics tables for a thread
    Stats {
        /// Thread file (tab-separated, one post per row)
        thread: PathBuf,

        /// Keyword rankings to use (default: every keywords_*.tsv in the output directory)
        #[arg(long = "keywords", num_args = 1..)]
        keyword_files: Vec<PathBuf>,

        /// Output directory (default: FORUMGRAPH_OUTPUT_DIR or ".")
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Rank keywords, then build statistics against all three rankings
    Run {
        /// Thread file (tab-separated, one post per row)
        thread: PathBuf,

        /// Output directory (default: FORUMGRAPH_OUTPUT_DIR or ".")
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rank single words or whole phrases
        #[arg(long, value_enum, default_value_t = GranularityArg::Words)]
        granularity: GranularityArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Words,
    Phrases,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Words => Granularity::Words,
            GranularityArg::Phrases => Granularity::Phrases,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("forumgraph=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let analysis = config.analysis()?;
    info!(stop_words = analysis.stop_words.len(), "Configuration loaded");

    match cli.command {
        Commands::Keywords {
            thread,
            out,
            granularity,
        } => {
            let out = out.unwrap_or_else(|| config.output_dir.clone());
            let files = pipeline::keywords::run(&thread, &out, &analysis, granularity.into())?;
            terminal::display_keywords(&files);
            println!(
                "\n{}",
                "Next: forumgraph stats <thread> to build the reply graphs.".dimmed()
            );
        }

        Commands::Stats {
            thread,
            keyword_files,
            out,
        } => {
            let out = out.unwrap_or_else(|| config.output_dir.clone());
            let keyword_files = if keyword_files.is_empty() {
                pipeline::thread::discover_keyword_files(&out)?
            } else {
                keyword_files
            };
            let run = pipeline::thread::run(&thread, &keyword_files, &out, &analysis)?;
            terminal::display_reply_graphs(&run.passes);
            terminal::display_reports(&run.reports);
        }

        Commands::Run {
            thread,
            out,
            granularity,
        } => {
            let out = out.unwrap_or_else(|| config.output_dir.clone());
            let files = pipeline::keywords::run(&thread, &out, &analysis, granularity.into())?;
            terminal::display_keywords(&files);

            let keyword_files: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
            let run = pipeline::thread::run(&thread, &keyword_files, &out, &analysis)?;
            terminal::display_reply_graphs(&run.passes);
            terminal::display_reports(&run.reports);
        }
    }

    Ok(())
}

use anyhow::Context;
use clap::Parser;
use link_rank::{
    page_rank::{iterated, sampled},
    report::Report,
    Corpus, IteratedPageRank, PageRank, PageRankResult, SampledPageRank,
};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Rank the pages of a directory of HTML files by PageRank.
#[derive(Parser)]
#[command(name = "link-rank")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the `*.html` pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, default_value_t = 0.85, env = "LINK_RANK_DAMPING")]
    damping: f64,

    /// Number of random-surfer steps
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Per-page change below which iteration stops
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// Upper bound on iterations
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Seed for a reproducible random walk
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let corpus = Corpus::crawl(&cli.corpus)
        .with_context(|| format!("loading corpus from {}", cli.corpus.display()))?;

    let sampled_cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
        seed: cli.seed,
    };
    let sampled = SampledPageRank::new(corpus.graph(), &sampled_cfg)
        .context("configuring sampled page rank")?
        .calc()?;
    let report = Report::new(
        format!("PageRank Results from Sampling (n = {})", cli.samples),
        sampled.named(&corpus),
    );
    print!("{report}");

    let iterated_cfg = iterated::Config {
        damping: cli.damping,
        epsilon: cli.tolerance,
        max_iterations: cli.max_iterations,
    };
    let iterated = IteratedPageRank::new(corpus.graph(), &iterated_cfg)
        .context("configuring iterated page rank")?
        .calc()?;
    if !iterated.converged {
        warn!(
            iterations = iterated.iterations,
            "iteration hit its cap; ranks below are not a fixed point"
        );
    }
    let report = Report::new("PageRank Results from Iteration", iterated.named(&corpus));
    print!("{report}");

    Ok(())
}

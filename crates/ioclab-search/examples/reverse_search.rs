//! Command-line front end for the reverse IoC search and ciphertext profiling.
//!
//! # Usage
//!
//! Search assignments of 8 letters over `abc` whose IoC is 0.25 ± 0.05:
//!
//! ```sh
//! cargo run --example reverse_search -- search --target 0.25 --tolerance 0.05 --alphabet abc --len 8
//! ```
//!
//! Take the target from a sample text instead, and consume the top-level
//! branches in parallel:
//!
//! ```sh
//! cargo run --example reverse_search -- search --sample "kebab" --alphabet abek --parallel
//! ```
//!
//! Compare a text against uniform random text over its alphabet size:
//!
//! ```sh
//! cargo run --example reverse_search -- profile "attack at dawn" --alphabet-size 27
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow the search.

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ioclab_core::{
    CandidateSets, Normalization,
    profile::{IocProfile, SymbolCounts, split_profile},
};
use ioclab_search::{ReverseSearch, SearchError, SearchStats, TargetRange};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalizationArg {
    /// Denominator `L·(L−1)`.
    PairCount,
    /// Denominator `L`.
    Length,
}

impl From<NormalizationArg> for Normalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::PairCount => Normalization::PairCount,
            NormalizationArg::Length => Normalization::Length,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Denominator convention of the IoC.
    #[arg(long, value_name = "KIND", default_value = "pair-count", global = true)]
    normalization: NormalizationArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enumerate assignments matching a target IoC.
    Search(SearchArgs),
    /// Profile a text against uniform random text.
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Target IoC value.
    #[arg(long, conflicts_with = "sample", required_unless_present = "sample")]
    target: Option<f64>,

    /// Sample text whose IoC becomes the target.
    #[arg(long)]
    sample: Option<String>,

    /// Accepted distance from the target.
    #[arg(long, default_value_t = 0.0)]
    tolerance: f64,

    /// Symbols every position may take.
    #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz")]
    alphabet: String,

    /// Message length; defaults to the sample length.
    #[arg(long, required_unless_present = "sample")]
    len: Option<usize>,

    /// Maximum number of solutions to print.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Consume the top-level branches on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Text to profile.
    text: String,

    /// Alphabet size of the random baseline; defaults to the distinct
    /// symbols of the text.
    #[arg(long)]
    alphabet_size: Option<usize>,

    /// Also print the split profile for the text length.
    #[arg(long)]
    splits: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let normalization = Normalization::from(cli.normalization);
    let result = match cli.command {
        Command::Search(args) => run_search(&args, normalization),
        Command::Profile(args) => run_profile(&args, normalization),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run_search(args: &SearchArgs, normalization: Normalization) -> Result<(), SearchError> {
    let search = match (&args.sample, args.target) {
        (Some(sample), _) => {
            let sample: Vec<char> = sample.chars().collect();
            ReverseSearch::matching(&sample, args.tolerance, normalization)?
        }
        (None, Some(target)) => {
            ReverseSearch::new(TargetRange::new(target, args.tolerance)?).with_normalization(normalization)
        }
        (None, None) => unreachable!("clap requires --target or --sample"),
    };
    let len = args
        .len
        .or_else(|| args.sample.as_ref().map(|s| s.chars().count()))
        .unwrap_or_default();
    let candidates = CandidateSets::uniform(args.alphabet.chars(), len);

    println!(
        "Target: [{:.6}, {:.6}] over {len} positions, {} symbols",
        search.target().lo(),
        search.target().hi(),
        candidates.symbols().len()
    );

    let (solutions, stats) = if args.parallel {
        collect_parallel(&search, &candidates, args.limit)?
    } else {
        let mut assignments = search.search(&candidates)?;
        let solutions: Vec<String> = assignments
            .by_ref()
            .take(args.limit)
            .map(|s| s.into_iter().collect())
            .collect();
        (solutions, assignments.stats().clone())
    };

    for solution in &solutions {
        println!("  {solution}");
    }
    print_stats(&stats);
    Ok(())
}

fn collect_parallel(
    search: &ReverseSearch,
    candidates: &CandidateSets<char>,
    limit: usize,
) -> Result<(Vec<String>, SearchStats), SearchError> {
    let branches = search.branches(candidates)?;
    log::info!("splitting search into {} branches", branches.len());

    let results: Vec<_> = branches
        .into_par_iter()
        .map(|mut branch| {
            let solutions: Vec<String> = branch
                .by_ref()
                .take(limit)
                .map(|s| s.into_iter().collect())
                .collect();
            (solutions, branch.stats().clone())
        })
        .collect();

    let mut stats = SearchStats::default();
    let mut solutions = Vec::new();
    for (branch_solutions, branch_stats) in results {
        stats.merge(&branch_stats);
        solutions.extend(branch_solutions);
    }
    solutions.truncate(limit);
    Ok((solutions, stats))
}

fn print_stats(stats: &SearchStats) {
    println!("Stats:");
    println!("  solutions:          {}", stats.solutions());
    println!("  branches:           {}", stats.branches());
    println!("  pruned stage sizes: {}", stats.pruned_stage_sizes());
    println!("  dead ends:          {}", stats.dead_ends());
    println!("  rejected terminals: {}", stats.rejected_terminals());
    println!("  max depth:          {}", stats.max_depth());
}

fn run_profile(args: &ProfileArgs, normalization: Normalization) -> Result<(), SearchError> {
    let text: Vec<char> = args.text.chars().collect();
    let counts = SymbolCounts::from_sequence(&text);
    let alphabet_size = args.alphabet_size.unwrap_or(counts.distinct());
    let profile = IocProfile::measure(&text, alphabet_size, normalization)?;

    println!("IoC:    {}", profile.ioc);
    println!("Random: {:.6} (alphabet of {alphabet_size})", profile.random);
    println!("Ratio:  {:.3}", profile.ratio);
    println!("Counts:");
    for (symbol, count) in counts.entries() {
        println!("  {symbol:?}: {count}");
    }

    if args.splits {
        println!("Splits:");
        for (parts, ioc) in split_profile(text.len(), normalization) {
            println!("  {parts:>3}: {:.6}", ioc.value());
        }
    }
    Ok(())
}

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use anchor_sim::align::{AnchoredScorer, ScoringConfig};
use anchor_sim::io::{fasta, table};
use anchor_sim::matrix::{build_matrices, BuildOptions, Sequence, SimilarityMatrices};
use anchor_sim::report::{ReportMeta, SimilarityReport};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "anchor-sim",
    author,
    version,
    about = "All-pairs sequence similarity anchored on longest common substrings",
    arg_required_else_help = true
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every pair of sequences in a FASTA file and write LCS / similarity matrices
    Compare {
        /// Input FASTA file
        input: String,
        /// Directory for lcs_results.csv and similarity_results.csv
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Score added per matching residue
        #[arg(long = "match", default_value_t = 1, allow_negative_numbers = true)]
        match_reward: i32,
        /// Score added per mismatching residue (negative)
        #[arg(long = "mismatch", default_value_t = -1, allow_negative_numbers = true)]
        mismatch_penalty: i32,
        /// Score added per gap position (negative)
        #[arg(long = "gap", default_value_t = -1, allow_negative_numbers = true)]
        gap_penalty: i32,
        /// Worker threads (0 = all cores)
        #[arg(short = 't', long = "threads", default_value_t = 0)]
        threads: usize,
        /// Abort the run if a single pair takes longer than this many seconds
        #[arg(long = "pair-timeout")]
        pair_timeout: Option<u64>,
        /// Also save a binary snapshot of the results for later export
        #[arg(long)]
        snapshot: Option<String>,
    },
    /// Re-export CSV matrices from a saved snapshot
    Export {
        /// Snapshot written by `compare --snapshot`
        snapshot: String,
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Compare {
            input,
            out_dir,
            match_reward,
            mismatch_penalty,
            gap_penalty,
            threads,
            pair_timeout,
            snapshot,
        } => {
            let scoring = ScoringConfig::new(match_reward, mismatch_penalty, gap_penalty);
            let opts = BuildOptions {
                threads,
                pair_timeout: pair_timeout.map(Duration::from_secs),
            };
            run_compare(&input, &out_dir, scoring, opts, snapshot.as_deref())
        }
        Commands::Export { snapshot, out_dir } => run_export(&snapshot, &out_dir),
    }
}

fn run_compare(
    input: &str,
    out_dir: &Path,
    scoring: ScoringConfig,
    opts: BuildOptions,
    snapshot: Option<&str>,
) -> Result<()> {
    scoring.validate()?;

    let seqs = fasta::read_sequences(input)
        .with_context(|| format!("cannot read sequences from '{}'", input))?;
    let total_len: usize = seqs.iter().map(Sequence::len).sum();
    log::info!("input: {}", input);
    log::info!("sequences: {}", seqs.len());
    log::info!("total_len: {}", total_len);
    log::info!(
        "scoring: match={} mismatch={} gap={}",
        scoring.match_reward,
        scoring.mismatch_penalty,
        scoring.gap_penalty
    );

    let started = Instant::now();
    let scorer = AnchoredScorer::with_scoring(scoring);
    let matrices = build_matrices(&seqs, &scorer, &opts)?;
    log::info!("scored all pairs in {:.2?}", started.elapsed());

    write_outputs(out_dir, &matrices)?;

    if let Some(path) = snapshot {
        let report = SimilarityReport::new(matrices, scoring, ReportMeta::for_run(input));
        report
            .save_to_file(path)
            .with_context(|| format!("cannot write snapshot to '{}'", path))?;
        log::info!("snapshot saved: {}", path);
    }
    Ok(())
}

fn run_export(snapshot: &str, out_dir: &Path) -> Result<()> {
    let report = SimilarityReport::load_from_file(snapshot)
        .with_context(|| format!("cannot load snapshot '{}'", snapshot))?;
    if let Some(ts) = &report.meta.timestamp {
        log::info!("snapshot taken at {}", ts);
    }
    write_outputs(out_dir, &report.matrices)
}

fn write_outputs(out_dir: &Path, matrices: &SimilarityMatrices) -> Result<()> {
    let (lcs, sim) = table::write_matrices(out_dir, matrices)
        .with_context(|| format!("cannot write matrices to '{}'", out_dir.display()))?;
    log::info!("wrote {} and {}", lcs.display(), sim.display());
    Ok(())
}

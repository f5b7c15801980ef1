use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use jointseq_align::{
    NormalizedSequence, PivotSelector, SearchStrategy, SequencerConfig, DEFAULT_LENGTH_COLUMN,
};
use jointseq_io::{align_files, DatasetReader, ResultWriter, RunName};

#[derive(Parser)]
#[command(name = "jointseq")]
#[command(about = "Pivot-anchored alignment of pipe joint measurements between two scans")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel segment alignment (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared pivot and matching parameters.
#[derive(Args, Debug, Clone)]
struct PivotArgs {
    /// Maximum length difference for two joints to match
    #[arg(long)]
    tolerance: f64,

    /// Fraction of each dataset that must be covered by pivots, in (0, 1]
    #[arg(long, default_value_t = 0.5)]
    pivot_percentile: f64,

    /// Absolute minimum number of pivots per dataset
    #[arg(long, default_value_t = 2)]
    pivot_required: usize,

    /// Lookup strategy over sorted lengths: "binary" or "linear"
    #[arg(long, default_value = "binary")]
    search: String,
}

#[derive(Subcommand)]
enum Command {
    /// Align a target scan against a base scan and write the matches
    Align {
        /// Path to the base dataset (.csv or .json)
        #[arg(long)]
        base: PathBuf,

        /// Path to the target dataset (.csv or .json)
        #[arg(long)]
        target: PathBuf,

        /// Column holding the joint length in the base dataset
        #[arg(long, default_value = DEFAULT_LENGTH_COLUMN)]
        base_column: String,

        /// Column holding the joint length in the target dataset
        #[arg(long, default_value = DEFAULT_LENGTH_COLUMN)]
        target_column: String,

        /// Align segments one after another instead of in parallel
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        pivot: PivotArgs,
    },

    /// Report the pivots chosen for a single dataset
    Pivots {
        /// Path to the dataset (.csv or .json)
        #[arg(long)]
        data: PathBuf,

        /// Column holding the joint length
        #[arg(long, default_value = DEFAULT_LENGTH_COLUMN)]
        column: String,

        #[command(flatten)]
        pivot: PivotArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct AlignOutput {
    run: String,
    n_base: usize,
    n_target: usize,
    base_pivots: usize,
    target_pivots: usize,
    pivot_matches: usize,
    segments_aligned: usize,
    n_matches: usize,
    output: String,
}

#[derive(Serialize)]
struct PivotsOutput {
    n_records: usize,
    needed: usize,
    sufficient: bool,
    pivots: Vec<PivotOutput>,
}

#[derive(Serialize)]
struct PivotOutput {
    index: usize,
    length: f64,
}

fn parse_search_strategy(s: &str) -> Result<SearchStrategy> {
    match s {
        "binary" => Ok(SearchStrategy::Binary),
        "linear" => Ok(SearchStrategy::Linear),
        other => anyhow::bail!("unknown search strategy: {other} (expected binary or linear)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Align {
            base,
            target,
            base_column,
            target_column,
            sequential,
            run,
            output_dir,
            pivot,
        } => {
            let run_name = RunName::new(run.clone())?;
            let strategy = parse_search_strategy(&pivot.search)?;

            // 1. Build and validate the configuration
            let config =
                SequencerConfig::new(pivot.pivot_percentile, pivot.tolerance, pivot.pivot_required)
                    .context("invalid alignment parameters")?
                    .with_base_column(base_column)?
                    .with_target_column(target_column)?
                    .with_strategy(strategy)
                    .with_parallel(!sequential);

            // 2. Read both datasets and align
            let aligned = align_files(&base, &target, &config, None)
                .context("alignment failed")?;
            let result = &aligned.result;
            if result.is_empty() {
                info!("no matches found");
            }

            // 3. Write matches JSON
            let writer = ResultWriter::new(&output_dir, run_name)?;
            let path = writer.write_matches(&config, aligned.n_base, aligned.n_target, result)?;

            // 4. Print summary
            let output = AlignOutput {
                run,
                n_base: aligned.n_base,
                n_target: aligned.n_target,
                base_pivots: result.base_pivots,
                target_pivots: result.target_pivots,
                pivot_matches: result.pivot_matches,
                segments_aligned: result.segments_aligned,
                n_matches: result.len(),
                output: path.display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Pivots {
            data,
            column,
            pivot,
        } => {
            let strategy = parse_search_strategy(&pivot.search)?;
            let selector =
                PivotSelector::new(pivot.pivot_percentile, pivot.pivot_required, pivot.tolerance)
                    .context("invalid pivot parameters")?
                    .with_strategy(strategy);

            // 1. Read and normalize
            let dataset = DatasetReader::new(&data)
                .read()
                .context("failed to read dataset")?;
            let seq = NormalizedSequence::from_records(dataset.records(), &column)
                .context("failed to normalize dataset")?;

            // 2. Select pivots
            let selected = selector.select(&seq);
            let pivots: Vec<PivotOutput> = selected
                .as_ref()
                .map(|set| {
                    set.as_slice()
                        .iter()
                        .map(|m| PivotOutput {
                            index: m.original_index,
                            length: m.length,
                        })
                        .collect()
                })
                .unwrap_or_default();

            // 3. Print summary
            let output = PivotsOutput {
                n_records: seq.len(),
                needed: selector.candidate_count(seq.len()),
                sufficient: selected.is_some(),
                pivots,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

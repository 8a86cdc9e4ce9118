// CLI entry point for the `lookalike` near-duplicate detector.
//
// Two modes, mirroring the library drivers:
//   - no positional arguments: compare every unordered pair of files in the
//     images directory, printing a timing/score line per pair and both file
//     paths for pairs above the similarity threshold.
//   - two positional arguments: compare exactly that pair and always print
//     both paths after the score line.

use anyhow::bail;
use clap::Parser;
use lookalike::driver::PairwiseDriver;
use lookalike::parallel_driver::ParallelDriver;
use lookalike::pipeline::{
    ComparePipeline, PairResult, PipelineConfig, DEFAULT_SIMILARITY_THRESHOLD,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lookalike",
    version,
    about = "Find near-duplicate images via windowed SSIM over downsampled grids"
)]
struct Cli {
    /// Two image files to compare directly. Leave empty to scan a directory.
    files: Vec<PathBuf>,

    /// Directory scanned in batch mode.
    #[arg(long, default_value = "images")]
    dir: PathBuf,

    /// Edge length of the resampled comparison grid.
    #[arg(long, default_value_t = 8)]
    grid_size: u32,

    /// SSIM score above which a pair is flagged as a likely duplicate.
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    threshold: f64,

    /// Fan pair comparisons out across a worker pool (batch mode only).
    #[arg(long)]
    parallel: bool,
}

/// Prints the per-pair timing/score line, e.g. `  12 ms 0.973`.
fn print_score_line(result: &PairResult) {
    println!("{:>4} ms {}", result.elapsed.as_millis(), result.score);
}

/// Batch-mode reporter: paths only follow flagged pairs.
fn report_batch_pair(result: &PairResult) {
    print_score_line(result);
    if result.is_duplicate {
        println!("{}", result.left.display());
        println!("{}", result.right.display());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let pipeline = ComparePipeline::new(PipelineConfig {
        grid_size: cli.grid_size,
        similarity_threshold: cli.threshold,
    });

    if cli.files.is_empty() {
        if cli.parallel {
            ParallelDriver::new(pipeline)
                .run_directory(&cli.dir, report_batch_pair)
                .await?;
        } else {
            PairwiseDriver::new(pipeline)
                .run_directory(&cli.dir, report_batch_pair)
                .await?;
        }
        return Ok(());
    }

    if cli.files.len() < 2 {
        bail!("expected either zero or two image paths, got {}", cli.files.len());
    }

    let driver = PairwiseDriver::new(pipeline);
    driver
        .run_pair(&cli.files[0], &cli.files[1], |result| {
            print_score_line(result);
            println!("{}", result.left.display());
            println!("{}", result.right.display());
        })
        .await?;

    Ok(())
}

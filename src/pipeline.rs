// THEORY:
// The `pipeline` module is the top-level API for the comparison engine. It
// encapsulates the full stack — decode, resample, fingerprint, SSIM — behind
// a single, easy-to-use interface, so callers hand it file paths and receive
// scores without touching the `core_modules` layer.
//
// Disk reads go through `tokio::fs`, making decode I/O the pipeline's only
// suspension point. Everything after the bytes are in memory is pure
// computation on grids owned exclusively by the current comparison.

use crate::core_modules::binarize::binarize;
use crate::core_modules::grayscale::to_grayscale;
use crate::core_modules::otsu;
use crate::core_modules::resampler::{self, DEFAULT_GRID_SIZE};
use crate::core_modules::sample_grid::sample_grid::SampleGrid;
use crate::core_modules::signature::Signature;
use crate::core_modules::ssim;
use crate::error::CompareError;
use log::debug;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Pairs scoring above this are reported as likely duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.95;

/// Configuration for the comparison pipeline, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Edge length of the resampled grid every image is shrunk to.
    pub grid_size: u32,
    /// SSIM score above which a pair is flagged as a likely duplicate.
    pub similarity_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// The outcome of comparing one pair of image files.
#[derive(Debug, Clone)]
pub struct PairResult {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Wall-clock time for the pair, decode included.
    pub elapsed: Duration,
    /// The SSIM score of the two resampled grids.
    pub score: f64,
    /// Whether the score exceeded the configured similarity threshold.
    pub is_duplicate: bool,
}

/// The main, top-level struct for the comparison engine.
#[derive(Clone)]
pub struct ComparePipeline {
    config: PipelineConfig,
}

impl ComparePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reads, decodes, and resamples one image file into a sample grid.
    pub async fn load_grid(&self, path: &Path) -> Result<SampleGrid, CompareError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CompareError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let image = image::load_from_memory(&bytes).map_err(|source| CompareError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "decoded {:?} ({}x{}), resampling to {}x{}",
            path,
            image.width(),
            image.height(),
            self.config.grid_size,
            self.config.grid_size
        );
        Ok(resampler::resample(&image, self.config.grid_size))
    }

    /// Runs the full fingerprint path for one file: resample, grayscale,
    /// Otsu threshold, binarize, extract the bit signature.
    pub async fn fingerprint(&self, path: &Path) -> Result<Signature, CompareError> {
        let grid = self.load_grid(path).await?;
        Ok(self.fingerprint_grid(grid))
    }

    /// The pure tail of the fingerprint path, for callers that already own
    /// a resampled grid.
    pub fn fingerprint_grid(&self, grid: SampleGrid) -> Signature {
        let gray = to_grayscale(grid);
        let threshold = otsu::optimal_threshold(&gray);
        debug!("otsu threshold: {threshold}");
        let binary = binarize(gray, threshold);
        Signature::extract(&binary)
    }

    /// Decodes both files concurrently, scores them with SSIM, and reports
    /// the elapsed wall-clock time for the whole pair.
    pub async fn compare_files(
        &self,
        left: &Path,
        right: &Path,
    ) -> Result<PairResult, CompareError> {
        let started = Instant::now();

        let (left_grid, right_grid) =
            futures::join!(self.load_grid(left), self.load_grid(right));
        let similarity = ssim::compare(&left_grid?, &right_grid?)?;

        let elapsed = started.elapsed();
        debug!(
            "compared {:?} vs {:?}: {} in {:?}",
            left, right, similarity.score, elapsed
        );

        Ok(PairResult {
            left: left.to_path_buf(),
            right: right.to_path_buf(),
            elapsed,
            score: similarity.score,
            is_duplicate: similarity.score > self.config.similarity_threshold,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;

    /// A fresh directory under the system temp dir, unique per test.
    pub fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lookalike_{label}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("Error creating scratch dir.");
        dir
    }

    /// A horizontal gradient, structurally rich after resampling.
    pub fn gradient_image(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, _| {
            let level = (x * 255 / (size - 1)) as u8;
            Rgba([level, level, level, 255])
        })
    }

    /// A high-contrast checkerboard, structurally unrelated to a gradient.
    pub fn checkerboard_image(size: u32, cell: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let level = if on { 255 } else { 0 };
            Rgba([level, level, level, 255])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    #[tokio::test]
    async fn identical_files_score_one() {
        let dir = scratch_dir("pipeline_identical");
        let first = dir.join("first.png");
        let second = dir.join("second.png");
        let image = gradient_image(64);
        image.save(&first).expect("Error saving fixture.");
        image.save(&second).expect("Error saving fixture.");

        let pipeline = ComparePipeline::new(PipelineConfig::default());
        let result = pipeline.compare_files(&first, &second).await.unwrap();
        assert!((result.score - 1.0).abs() < 1e-9, "got {}", result.score);
        assert!(result.is_duplicate);
        assert_eq!(result.left, first);
        assert_eq!(result.right, second);
    }

    #[tokio::test]
    async fn unrelated_files_score_below_threshold() {
        let dir = scratch_dir("pipeline_unrelated");
        let first = dir.join("gradient.png");
        let second = dir.join("checker.png");
        gradient_image(64).save(&first).expect("Error saving fixture.");
        checkerboard_image(64, 8)
            .save(&second)
            .expect("Error saving fixture.");

        let pipeline = ComparePipeline::new(PipelineConfig::default());
        let result = pipeline.compare_files(&first, &second).await.unwrap();
        assert!(!result.is_duplicate, "got {}", result.score);
    }

    #[tokio::test]
    async fn fingerprint_length_matches_grid_area() {
        let dir = scratch_dir("pipeline_fingerprint");
        let path = dir.join("gradient.png");
        gradient_image(64).save(&path).expect("Error saving fixture.");

        let pipeline = ComparePipeline::new(PipelineConfig::default());
        let signature = pipeline.fingerprint(&path).await.unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.as_bits().contains('0'));
        assert!(signature.as_bits().contains('1'));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let pipeline = ComparePipeline::new(PipelineConfig::default());
        let missing = PathBuf::from("/nonexistent/lookalike.png");
        let outcome = pipeline.compare_files(&missing, &missing).await;
        assert!(matches!(outcome, Err(CompareError::Read { .. })));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_decode_error() {
        let dir = scratch_dir("pipeline_corrupt");
        let path = dir.join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let pipeline = ComparePipeline::new(PipelineConfig::default());
        let outcome = pipeline.fingerprint(&path).await;
        assert!(matches!(outcome, Err(CompareError::Decode { .. })));
    }
}

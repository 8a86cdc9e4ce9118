// THEORY:
// One error enum covers the whole crate. Decode failures carry the offending
// path so a batch run's diagnostic names the file; the comparison errors are
// defined states rather than panics, even though the resampling step makes
// them unreachable in the normal pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    /// The source file could not be read from disk.
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's bytes could not be decoded as an image.
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// SSIM was asked to compare two grids of unequal size.
    #[error(
        "grid dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}"
    )]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// Hamming distance was asked to compare signatures of unequal length.
    #[error("signature lengths differ: {left} vs {right}")]
    SignatureLength { left: usize, right: usize },

    /// The parallel driver's worker pool went away mid-run.
    #[error("comparison worker pool shut down unexpectedly")]
    WorkerPool,
}

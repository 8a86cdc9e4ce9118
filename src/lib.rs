// THEORY:
// This file is the main entry point for the `lookalike` library crate. It
// follows the standard Rust convention of using `lib.rs` to define the
// public API exposed to external consumers (like the bundled CLI binary).
//
// The high-level interface is the `ComparePipeline` together with the two
// drivers (`PairwiseDriver` and `ParallelDriver`). The leaf analysis stages
// live in `core_modules` and remain available for callers that want to
// compose the fingerprint or SSIM paths by hand.

pub mod core_modules;
pub mod driver;
pub mod error;
pub mod parallel_driver;
pub mod pipeline;

// Re-export key data structures for the public API.
pub use crate::core_modules::signature::Signature;
pub use crate::core_modules::ssim::Similarity;
pub use crate::driver::PairwiseDriver;
pub use crate::error::CompareError;
pub use crate::parallel_driver::ParallelDriver;
pub use crate::pipeline::{ComparePipeline, PairResult, PipelineConfig};

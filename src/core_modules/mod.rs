// THEORY:
// The `core_modules` layer holds the leaf analysis stages of the engine.
// Each module does one thing to a sample grid and knows nothing about files,
// directories, or the driver above it. Data flows strictly downward:
// resampler -> grayscale -> otsu -> binarize -> signature for the
// fingerprint path, and resampler -> ssim for the structural path.

pub mod binarize;
pub mod grayscale;
pub mod otsu;
pub mod resampler;
pub mod sample_grid;
pub mod signature;
pub mod ssim;

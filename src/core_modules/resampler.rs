// THEORY:
// The `resampler` module is the entry gate of the pipeline. Shrinking every
// source image to the same tiny square grid is what makes the downstream
// signature robust to resolution and scale differences, and it bounds all
// later work to O(N²) regardless of how large the source was.
//
// The interpolation itself is delegated to the `image` crate's bilinear
// filter; this module only owns the policy (exact square resize, RGBA out).

use crate::core_modules::sample_grid::sample_grid::SampleGrid;
use image::DynamicImage;
use image::imageops::FilterType;

/// The default grid edge length. Eight is small enough that a signature fits
/// in 64 bits and an SSIM pass touches a single window.
pub const DEFAULT_GRID_SIZE: u32 = 8;

/// Shrinks a decoded image to a `size` x `size` RGBA sample grid.
pub fn resample(image: &DynamicImage, size: u32) -> SampleGrid {
    let resized = image.resize_exact(size, size, FilterType::Triangle);
    let rgba = resized.to_rgba8();
    SampleGrid::new(size, size, rgba.into_raw())
}

// THEORY:
// The `grayscale` module collapses each RGBA sample to a single luminance
// level using the ITU-R BT.601 perceptual weights. Every later stage of the
// fingerprint path (histogram, threshold, binarization) assumes R = G = B,
// so the converted level is written back into all three color channels and
// alpha is forced opaque.

use crate::core_modules::sample_grid::sample_grid::SampleGrid;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Converts every sample to its luminance level, truncating toward zero.
/// Consumes the grid and returns it; the caller keeps exclusive ownership.
pub fn to_grayscale(mut grid: SampleGrid) -> SampleGrid {
    for pixel in grid.pixels_mut() {
        let gray = (RED_WEIGHT * pixel[0] as f64
            + GREEN_WEIGHT * pixel[1] as f64
            + BLUE_WEIGHT * pixel[2] as f64) as u8;
        pixel[0] = gray;
        pixel[1] = gray;
        pixel[2] = gray;
        pixel[3] = 255;
    }
    grid
}

// THEORY:
// The `ssim` module scores the structural similarity of two sample grids.
// Unlike the fingerprint path, which throws away everything but one bit per
// pixel, SSIM keeps the full luminance surface and asks how well the two
// surfaces agree in local brightness, contrast, and structure.
//
// Key architectural principles:
// 1.  **Windowed Statistics**: The grids are walked in 8x8 windows (clamped
//     at the edges so every pixel is covered exactly once). Each window
//     contributes one local score built from the window's mean luminances,
//     variances, and covariance; the final score is the mean over windows.
//     For the default 8x8 resampled grid this degenerates to one window.
// 2.  **Canonical Constants**: The stabilizing constants are the standard
//     (K1*L)^2 and (K2*L)^2 with K1 = 0.01, K2 = 0.03, L = 255. With them in
//     place a grid compared against itself scores exactly 1.0.
// 3.  **Defined Failure**: Unequal dimensions are a reported error, never an
//     out-of-bounds access. The pipeline resamples both sides to the same
//     size precisely to satisfy this precondition.

use crate::core_modules::sample_grid::sample_grid::SampleGrid;
use crate::error::CompareError;

/// (0.01 * 255)^2 — luminance stabilizer.
const C1: f64 = 6.5025;
/// (0.03 * 255)^2 — contrast stabilizer.
const C2: f64 = 58.5225;

/// Edge length of the sliding window.
const WINDOW_SIZE: usize = 8;

/// The result of a structural comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Mean SSIM over all windows, in [-1, 1].
    pub score: f64,
}

/// Computes the windowed SSIM score of two grids of identical dimensions.
pub fn compare(left: &SampleGrid, right: &SampleGrid) -> Result<Similarity, CompareError> {
    if left.dimensions() != right.dimensions() {
        return Err(CompareError::DimensionMismatch {
            left_width: left.width,
            left_height: left.height,
            right_width: right.width,
            right_height: right.height,
        });
    }

    let width = left.width as usize;
    let height = left.height as usize;
    let left_luminance = luminance_plane(left);
    let right_luminance = luminance_plane(right);

    let mut score_sum = 0.0;
    let mut window_count = 0usize;

    for window_y in (0..height).step_by(WINDOW_SIZE) {
        for window_x in (0..width).step_by(WINDOW_SIZE) {
            let x_end = (window_x + WINDOW_SIZE).min(width);
            let y_end = (window_y + WINDOW_SIZE).min(height);

            let mut window_left = Vec::with_capacity(WINDOW_SIZE * WINDOW_SIZE);
            let mut window_right = Vec::with_capacity(WINDOW_SIZE * WINDOW_SIZE);
            for y in window_y..y_end {
                for x in window_x..x_end {
                    let index = y * width + x;
                    window_left.push(left_luminance[index]);
                    window_right.push(right_luminance[index]);
                }
            }

            score_sum += window_score(&window_left, &window_right);
            window_count += 1;
        }
    }

    if window_count == 0 {
        // Two empty grids of equal (zero) dimensions are trivially identical.
        return Ok(Similarity { score: 1.0 });
    }

    Ok(Similarity {
        score: score_sum / window_count as f64,
    })
}

/// Collapses an RGBA grid to a row-major luminance plane (BT.601 weights).
fn luminance_plane(grid: &SampleGrid) -> Vec<f64> {
    grid.pixels()
        .map(|pixel| {
            0.299 * pixel[0] as f64 + 0.587 * pixel[1] as f64 + 0.114 * pixel[2] as f64
        })
        .collect()
}

/// The SSIM of a single window pair.
fn window_score(left: &[f64], right: &[f64]) -> f64 {
    let n = left.len() as f64;

    let mean_left: f64 = left.iter().sum::<f64>() / n;
    let mean_right: f64 = right.iter().sum::<f64>() / n;

    let mut variance_left = 0.0;
    let mut variance_right = 0.0;
    let mut covariance = 0.0;
    for (&l, &r) in left.iter().zip(right) {
        let dl = l - mean_left;
        let dr = r - mean_right;
        variance_left += dl * dl;
        variance_right += dr * dr;
        covariance += dl * dr;
    }
    variance_left /= n;
    variance_right /= n;
    covariance /= n;

    let numerator = (2.0 * mean_left * mean_right + C1) * (2.0 * covariance + C2);
    let denominator = (mean_left * mean_left + mean_right * mean_right + C1)
        * (variance_left + variance_right + C2);

    numerator / denominator
}

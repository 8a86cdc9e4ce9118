// THEORY:
// The `otsu` module selects the binarization threshold that best splits a
// grayscale grid into a dark and a bright population. It is the statistical
// heart of the fingerprint path: instead of a fixed cut-off, the threshold
// adapts to each image's own histogram.
//
// Key architectural principles:
// 1.  **Between-Class Variance**: Otsu's criterion scores a candidate
//     threshold t by how far apart it pushes the mean levels of the two
//     populations it creates, weighted by their sizes. The t with the
//     largest score wins.
// 2.  **Single-Pass Scan**: Rather than recomputing both populations for
//     every t, the scan keeps a running background weight and level sum and
//     derives the foreground side from the global totals.
// 3.  **First Maximum Wins**: The comparison is strictly greater-than. A
//     later t with an equal score never replaces an earlier one, and a grid
//     with a single gray level never produces a positive score at all, so
//     its threshold is 0. Both behaviors are load-bearing; keep them.

use crate::core_modules::sample_grid::sample_grid::SampleGrid;

pub type Threshold = u8;

/// Number of distinct gray levels in an 8-bit channel.
pub const LEVELS: usize = 256;

/// Builds the 256-bin gray-level histogram of a grid. The grid is expected
/// to be grayscale already (R = G = B), so only the red channel is read.
pub fn build_histogram(grid: &SampleGrid) -> [u32; LEVELS] {
    let mut histogram = [0u32; LEVELS];
    for pixel in grid.pixels() {
        histogram[pixel[0] as usize] += 1;
    }
    histogram
}

/// Returns the threshold maximizing the between-class variance of the
/// background/foreground split of a grayscale grid.
pub fn optimal_threshold(grid: &SampleGrid) -> Threshold {
    let histogram = build_histogram(grid);
    let total = grid.pixel_count() as u64;

    // Global sum of (level * count), fixed for the whole scan.
    let sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut background_weight: u64 = 0;
    let mut background_sum: f64 = 0.0;
    let mut best_variance: f64 = 0.0;
    let mut threshold: Threshold = 0;

    for (level, &count) in histogram.iter().enumerate() {
        background_weight += count as u64;
        if background_weight == 0 {
            // Nothing at or below this level yet.
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            // Everything is background from here on; no split remains.
            break;
        }

        background_sum += level as f64 * count as f64;

        let background_mean = background_sum / background_weight as f64;
        let foreground_mean = (sum - background_sum) / foreground_weight as f64;
        let separation = background_mean - foreground_mean;
        let between_class_variance =
            background_weight as f64 * foreground_weight as f64 * separation * separation;

        // Strict comparison: ties resolve to the smallest level.
        if between_class_variance > best_variance {
            best_variance = between_class_variance;
            threshold = level as Threshold;
        }
    }

    threshold
}

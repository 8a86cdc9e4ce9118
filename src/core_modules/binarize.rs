// THEORY:
// The `binarize` module applies a previously selected threshold to a
// grayscale grid, leaving every sample strictly black or strictly white.
// The inequality is strict: a level equal to the threshold is background.

use crate::core_modules::otsu::Threshold;
use crate::core_modules::sample_grid::sample_grid::SampleGrid;

/// Maps every sample to 255 (gray level above the threshold) or 0
/// (at or below it), forcing alpha opaque. Consumes and returns the grid.
pub fn binarize(mut grid: SampleGrid, threshold: Threshold) -> SampleGrid {
    for pixel in grid.pixels_mut() {
        let level = if pixel[0] > threshold { 255 } else { 0 };
        pixel[0] = level;
        pixel[1] = level;
        pixel[2] = level;
        pixel[3] = 255;
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_grid(levels: &[u8]) -> SampleGrid {
        let data = levels.iter().flat_map(|&g| [g, g, g, 255]).collect();
        SampleGrid::new(levels.len() as u32, 1, data)
    }

    #[test]
    fn level_equal_to_threshold_is_background() {
        let binary = binarize(gray_grid(&[99, 100, 101]), 100);
        let levels: Vec<u8> = binary.pixels().map(|p| p[0]).collect();
        assert_eq!(levels, vec![0, 0, 255]);
    }

    #[test]
    fn already_binary_grid_is_a_fixed_point() {
        for threshold in [0u8, 1, 100, 254] {
            let binary = binarize(gray_grid(&[0, 255, 255, 0]), threshold);
            let again = binarize(
                gray_grid(&binary.pixels().map(|p| p[0]).collect::<Vec<_>>()),
                threshold,
            );
            assert_eq!(binary.data, again.data, "threshold {threshold}");
        }
    }
}

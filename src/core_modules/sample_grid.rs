// THEORY:
// The `SampleGrid` module is the foundational data container for the entire
// analysis pipeline. It represents a small, dense rectangular grid of RGBA
// samples — the product of shrinking an arbitrarily large source image down
// to a fixed resolution.
//
// Key architectural principles:
// 1.  **Dumb Data Container**: Like the rest of the leaf layer, `SampleGrid`
//     holds bytes and answers simple questions about them. It does not know
//     how to threshold, compare, or fingerprint itself; those concerns live
//     in the modules that consume it.
// 2.  **Exclusive Ownership**: Every grid belongs to exactly one in-flight
//     comparison. The transforming stages (grayscale, binarize) consume a
//     grid by value and hand back the transformed grid, so no aliasing ever
//     crosses a pipeline stage.
// 3.  **Flat RGBA Layout**: Samples are stored row-major, four bytes per
//     pixel, mirroring what image decoders emit. The length invariant
//     (width * height * CHANNELS) is enforced at construction.

pub mod sample_grid {
    pub type Channel = u8;

    /// Number of channels per sample (R, G, B, A).
    pub const CHANNELS: usize = 4;

    /// A rectangular grid of RGBA samples at a fixed, small resolution.
    pub struct SampleGrid {
        /// The width of the grid in pixels.
        pub width: u32,
        /// The height of the grid in pixels.
        pub height: u32,
        /// Flattened row-major RGBA bytes, `width * height * CHANNELS` long.
        pub data: Vec<Channel>,
    }

    impl SampleGrid {
        pub fn new(width: u32, height: u32, data: Vec<Channel>) -> Self {
            let expected = (width * height) as usize * CHANNELS;
            if data.len() != expected {
                panic!(
                    "Cannot build a {}x{} grid from {} bytes (expected {}).",
                    width,
                    height,
                    data.len(),
                    expected
                );
            }
            Self {
                width,
                height,
                data,
            }
        }

        /// The number of pixels in the grid.
        pub fn pixel_count(&self) -> usize {
            (self.width * self.height) as usize
        }

        /// Width and height as a pair, for dimension-equality checks.
        pub fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        /// Iterates the grid pixel by pixel, yielding `[R, G, B, A]` slices
        /// in row-major order.
        pub fn pixels(&self) -> impl Iterator<Item = &[Channel]> {
            self.data.chunks_exact(CHANNELS)
        }

        /// Mutable counterpart of `pixels`, used by the in-place value
        /// transforms (grayscale conversion and binarization).
        pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [Channel]> {
            self.data.chunks_exact_mut(CHANNELS)
        }
    }
}

// THEORY:
// The `signature` module flattens a binarized grid into its "eigenvalue": a
// fixed-length string of '0'/'1' characters, one per pixel in row-major
// order. The signature is the terminal artifact of the fingerprint path and
// a compact similarity key in its own right — two signatures can be ranked
// by Hamming distance for a fraction of the cost of an SSIM pass.
//
// The comparison driver currently runs on SSIM alone; the signature path is
// kept as an independent, cheaper primitive (e.g. for pre-filtering
// candidate pairs) rather than being wired into the driver.

use crate::core_modules::sample_grid::sample_grid::SampleGrid;
use crate::error::CompareError;

/// A fixed-length bit-string fingerprint of a binarized grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bits: String,
}

impl Signature {
    /// Flattens a binarized grid into its signature: '1' where the stored
    /// red channel is non-zero, '0' elsewhere, in row-major order.
    pub fn extract(grid: &SampleGrid) -> Self {
        let bits = grid
            .pixels()
            .map(|pixel| if pixel[0] != 0 { '1' } else { '0' })
            .collect();
        Self { bits }
    }

    /// The signature as a string of '0'/'1' characters.
    pub fn as_bits(&self) -> &str {
        &self.bits
    }

    /// The number of bits, always width * height of the source grid.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Counts the differing bit positions between two signatures of equal
    /// length. Lower is more similar; zero means identical fingerprints.
    pub fn hamming_distance(&self, other: &Signature) -> Result<u32, CompareError> {
        if self.len() != other.len() {
            return Err(CompareError::SignatureLength {
                left: self.len(),
                right: other.len(),
            });
        }
        let distance = self
            .bits
            .bytes()
            .zip(other.bits.bytes())
            .filter(|(a, b)| a != b)
            .count() as u32;
        Ok(distance)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_grid(width: u32, height: u32, on: &[usize]) -> SampleGrid {
        let mut data = vec![0u8; (width * height) as usize * 4];
        for pixel in data.chunks_exact_mut(4) {
            pixel[3] = 255;
        }
        for &index in on {
            let base = index * 4;
            data[base] = 255;
            data[base + 1] = 255;
            data[base + 2] = 255;
        }
        SampleGrid::new(width, height, data)
    }

    #[test]
    fn length_always_matches_pixel_count() {
        for (w, h) in [(1, 1), (8, 8), (3, 5)] {
            let signature = Signature::extract(&binary_grid(w, h, &[]));
            assert_eq!(signature.len(), (w * h) as usize);
        }
    }

    #[test]
    fn bits_follow_row_major_order() {
        let signature = Signature::extract(&binary_grid(2, 2, &[0, 3]));
        assert_eq!(signature.as_bits(), "1001");
    }

    #[test]
    fn hamming_distance_counts_differing_bits() {
        let a = Signature::extract(&binary_grid(2, 2, &[0, 1]));
        let b = Signature::extract(&binary_grid(2, 2, &[1, 2]));
        assert_eq!(a.hamming_distance(&b).unwrap(), 2);
        assert_eq!(a.hamming_distance(&a).unwrap(), 0);
    }

    #[test]
    fn hamming_distance_rejects_unequal_lengths() {
        let a = Signature::extract(&binary_grid(2, 2, &[]));
        let b = Signature::extract(&binary_grid(3, 3, &[]));
        assert!(matches!(
            a.hamming_distance(&b),
            Err(CompareError::SignatureLength { left: 4, right: 9 })
        ));
    }
}

/// Version information placement and extraction for QR codes v7+
use crate::decoder::bch;
use crate::models::{BitMatrix, Version};

/// Version info is 18 bits (6 data + 12 ECC) stored twice, next to the
/// top-right finder and transposed next to the bottom-left finder
pub struct VersionInfo;

impl VersionInfo {
    /// Write both version blocks (no-op below version 7)
    pub fn place(matrix: &mut BitMatrix, version: Version) {
        if version.number() < 7 {
            return;
        }
        let size = matrix.width();
        let word = bch::version_bits(version);
        for i in 0..18 {
            let bit = (word >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            matrix.set(a, b, bit);
            matrix.set(b, a, bit);
        }
    }

    /// Decode the version from either block; `None` when neither is readable
    pub fn extract(matrix: &BitMatrix) -> Option<Version> {
        let size = matrix.width();
        if size < 45 {
            return None;
        }

        let read = |transposed: bool| {
            (0..18).fold(0u32, |word, i| {
                let a = size - 11 + i % 3;
                let b = i / 3;
                let dark = if transposed {
                    matrix.get(b, a)
                } else {
                    matrix.get(a, b)
                };
                word | (u32::from(dark) << i)
            })
        };

        bch::decode_version(read(false)).or_else(|| bch::decode_version(read(true)))
    }
}

/// Format information placement and extraction
use crate::decoder::bch;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Error correction level and mask pattern, read from the 15-bit format word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask pattern
    pub mask_pattern: MaskPattern,
}

/// Module coordinates of bit `i` in the copy around the top-left finder
fn primary_position(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Module coordinates of bit `i` in the copy split between the other two finders
fn secondary_position(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

impl FormatInfo {
    /// 15-bit masked format word
    pub fn bits(&self) -> u32 {
        bch::format_bits(self.ec_level, self.mask_pattern)
    }

    /// Write both copies of the format word plus the dark module
    pub fn place(&self, matrix: &mut BitMatrix) {
        let size = matrix.width();
        let word = self.bits();
        for i in 0..15 {
            let bit = (word >> i) & 1 == 1;
            let (x, y) = primary_position(i);
            matrix.set(x, y, bit);
            let (x, y) = secondary_position(i, size);
            matrix.set(x, y, bit);
        }
        matrix.set(8, size - 8, true);
    }

    /// Read both copies and keep whichever decodes with fewer bit errors
    pub fn extract(matrix: &BitMatrix) -> Option<Self> {
        let size = matrix.width();
        if size < 21 {
            return None;
        }

        let read = |position: &dyn Fn(usize) -> (usize, usize)| {
            (0..15).fold(0u32, |word, i| {
                let (x, y) = position(i);
                word | (u32::from(matrix.get(x, y)) << i)
            })
        };
        let primary = read(&primary_position);
        let secondary = read(&|i| secondary_position(i, size));

        let word = if bch::format_distance(primary) <= bch::format_distance(secondary) {
            primary
        } else {
            secondary
        };
        let (ec_level, mask_pattern) = bch::decode_format(word)?;
        log::trace!("format info: {ec_level} mask {}", mask_pattern.id());
        Some(Self {
            ec_level,
            mask_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(ec_level: ECLevel, mask: u8) -> FormatInfo {
        FormatInfo {
            ec_level,
            mask_pattern: MaskPattern::new(mask).unwrap(),
        }
    }

    #[test]
    fn test_place_and_extract() {
        let mut matrix = BitMatrix::square(25);
        let expected = info(ECLevel::H, 6);
        expected.place(&mut matrix);
        assert!(matrix.get(8, 25 - 8));
        assert_eq!(FormatInfo::extract(&matrix), Some(expected));
    }

    #[test]
    fn test_extract_survives_damaged_primary_copy() {
        let mut matrix = BitMatrix::square(21);
        let expected = info(ECLevel::L, 3);
        expected.place(&mut matrix);
        for i in 0..6 {
            matrix.toggle(8, i);
        }
        assert_eq!(FormatInfo::extract(&matrix), Some(expected));
    }

    #[test]
    fn test_blank_matrix_has_no_format() {
        assert_eq!(FormatInfo::extract(&BitMatrix::square(21)), None);
    }
}

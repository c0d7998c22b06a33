/// Bitstream extraction from QR code matrix
use crate::decoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Data module coordinates in placement order.
///
/// Columns are consumed in pairs from the right edge, skipping the vertical
/// timing column, alternating upward and downward; within a pair the right
/// module comes first.
pub fn data_module_order(func: &FunctionMask) -> Vec<(usize, usize)> {
    let size = func.size();
    let mut order = Vec::with_capacity(func.data_modules_count());
    let mut right = size as isize - 1;

    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = (right - j) as usize;
                if !func.is_function(x, y) {
                    order.push((x, y));
                }
            }
        }
        right -= 2;
    }

    order
}

/// Extract raw bitstream from QR code matrix following zigzag pattern
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Data bits in placement order (excluding function patterns)
    pub fn extract(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        data_module_order(func)
            .into_iter()
            .map(|(x, y)| matrix.get(x, y))
            .collect()
    }

    /// Data bits packed MSB-first into codewords; trailing remainder bits dropped
    pub fn extract_codewords(matrix: &BitMatrix, func: &FunctionMask) -> Vec<u8> {
        bits_to_codewords(&Self::extract(matrix, func))
    }
}

/// Pack bits MSB-first into bytes, ignoring a trailing partial byte
pub fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit)))
        .collect()
}

/// MSB-first reader over a codeword sequence
pub struct BitReader<'a> {
    bytes: &'a [u8],
    idx: usize,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first bit of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, idx: 0 }
    }

    /// Bits left to read
    pub fn remaining(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.idx)
    }

    /// Read `n` (at most 32) bits as an unsigned value
    pub fn read_bits(&mut self, n: usize) -> Option<u32> {
        if n > 32 || n > self.remaining() {
            return None;
        }
        let mut val = 0u32;
        for _ in 0..n {
            let bit = (self.bytes[self.idx / 8] >> (7 - self.idx % 8)) & 1;
            val = (val << 1) | u32::from(bit);
            self.idx += 1;
        }
        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_order_starts_bottom_right_upward() {
        let func = FunctionMask::new(Version::MIN);
        let order = data_module_order(&func);
        assert_eq!(order.len(), 208);
        assert_eq!(&order[..4], &[(20, 20), (19, 20), (20, 19), (19, 19)]);
        assert!(order.iter().all(|&(x, _)| x != 6));
    }

    #[test]
    fn test_extract_follows_order() {
        let func = FunctionMask::new(Version::MIN);
        let mut matrix = BitMatrix::square(21);
        matrix.set(20, 20, true);
        matrix.set(19, 19, true);
        let bits = BitstreamExtractor::extract(&matrix, &func);
        assert_eq!(&bits[..4], &[true, false, false, true]);
        assert_eq!(BitstreamExtractor::extract_codewords(&matrix, &func)[0], 0b1001_0000);
    }

    #[test]
    fn test_bit_reader() {
        let bytes = [0b1010_1100, 0b0101_0000];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(4), Some(0b1010));
        assert_eq!(reader.read_bits(6), Some(0b1100_01));
        assert_eq!(reader.remaining(), 6);
        assert_eq!(reader.read_bits(7), None);
    }
}

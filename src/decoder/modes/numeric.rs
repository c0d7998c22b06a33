/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::decoder::bitstream::BitReader;

/// Decode numeric mode data
pub struct NumericDecoder;

impl NumericDecoder {
    /// Append `character_count` ASCII digits to `out`
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
        out: &mut Vec<u8>,
    ) -> Option<()> {
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let (bits_needed, limit) = match group_size {
                3 => (10, 1000),
                2 => (7, 100),
                _ => (4, 10),
            };

            let value = reader.read_bits(bits_needed)?;
            if value >= limit {
                return None;
            }
            let digits = format!("{value:0width$}", width = group_size);
            out.extend_from_slice(digits.as_bytes());
            chars_remaining -= group_size;
        }

        Some(())
    }
}

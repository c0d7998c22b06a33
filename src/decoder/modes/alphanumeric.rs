/// Alphanumeric mode decoder (Mode 0010)
/// Pairs = 11 bits, single = 6 bits
use crate::decoder::bitstream::BitReader;
use crate::decoder::tables::ALPHANUMERIC_CHARSET;

/// Decode alphanumeric data
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Append `character_count` characters from the 45-symbol set to `out`
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
        out: &mut Vec<u8>,
    ) -> Option<()> {
        let mut chars_remaining = character_count;

        while chars_remaining >= 2 {
            let value = reader.read_bits(11)? as usize;
            let (first, second) = (value / 45, value % 45);
            if first >= 45 {
                return None;
            }
            out.push(ALPHANUMERIC_CHARSET[first]);
            out.push(ALPHANUMERIC_CHARSET[second]);
            chars_remaining -= 2;
        }

        if chars_remaining == 1 {
            let value = reader.read_bits(6)? as usize;
            out.push(*ALPHANUMERIC_CHARSET.get(value)?);
        }

        Some(())
    }
}

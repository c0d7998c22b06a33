/// Byte mode decoder (Mode 0100) for 8-bit data
use crate::decoder::bitstream::BitReader;

/// Decode byte mode data (8 bits per character)
pub struct ByteDecoder;

impl ByteDecoder {
    /// Append `character_count` raw bytes to `out`
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
        out: &mut Vec<u8>,
    ) -> Option<()> {
        if reader.remaining() < character_count * 8 {
            return None;
        }
        for _ in 0..character_count {
            out.push(reader.read_bits(8)? as u8);
        }
        Some(())
    }
}

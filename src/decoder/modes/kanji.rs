/// Kanji mode decoder (Mode 1000): 13-bit values expanding to Shift-JIS pairs
use crate::decoder::bitstream::BitReader;

/// Decode kanji mode data into Shift-JIS bytes
pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Append `character_count` Shift-JIS double-byte characters to `out`
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
        out: &mut Vec<u8>,
    ) -> Option<()> {
        for _ in 0..character_count {
            let value = reader.read_bits(13)?;
            let mut code = ((value / 0xC0) << 8) | (value % 0xC0);
            code += if code < 0x1F00 { 0x8140 } else { 0xC140 };
            out.push((code >> 8) as u8);
            out.push((code & 0xFF) as u8);
        }
        Some(())
    }
}

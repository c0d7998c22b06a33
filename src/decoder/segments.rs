//! Segment parsing of corrected data codewords

use crate::decoder::bitstream::BitReader;
use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, kanji::KanjiDecoder,
    numeric::NumericDecoder,
};
use crate::decoder::tables::Mode;
use crate::models::Version;

/// ECI designators for ISO-8859-1
const ECI_LATIN1: [u32; 2] = [1, 3];

/// Concatenated segment payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentData {
    /// Raw payload bytes across all segments
    pub bytes: Vec<u8>,
    /// Last ECI designator seen, if any
    pub eci: Option<u32>,
}

impl SegmentData {
    /// Payload as text: UTF-8 unless an ECI selects Latin-1, with Latin-1
    /// as the fallback for byte runs that are not valid UTF-8
    pub fn text(&self) -> String {
        match self.eci {
            Some(eci) if ECI_LATIN1.contains(&eci) => latin1(&self.bytes),
            _ => match std::str::from_utf8(&self.bytes) {
                Ok(text) => text.to_owned(),
                Err(_) => latin1(&self.bytes),
            },
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse every segment up to the terminator or the end of the data
pub fn decode_segments(data_codewords: &[u8], version: Version) -> Option<SegmentData> {
    let mut reader = BitReader::new(data_codewords);
    let mut bytes = Vec::new();
    let mut eci = None;

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4)?;
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)?;
        let decode: fn(&mut BitReader<'_>, usize, &mut Vec<u8>) -> Option<()> = match mode {
            Mode::Eci => {
                eci = Some(read_eci_designator(&mut reader)?);
                continue;
            }
            Mode::Numeric => NumericDecoder::decode,
            Mode::Alphanumeric => AlphanumericDecoder::decode,
            Mode::Byte => ByteDecoder::decode,
            Mode::Kanji => KanjiDecoder::decode,
        };
        let count = reader.read_bits(mode.char_count_bits(version))? as usize;
        decode(&mut reader, count, &mut bytes)?;
    }

    Some(SegmentData { bytes, eci })
}

fn read_eci_designator(reader: &mut BitReader<'_>) -> Option<u32> {
    let first = reader.read_bits(8)?;
    if first & 0x80 == 0 {
        Some(first & 0x7F)
    } else if first & 0xC0 == 0x80 {
        Some(((first & 0x3F) << 8) | reader.read_bits(8)?)
    } else if first & 0xE0 == 0xC0 {
        Some(((first & 0x1F) << 16) | reader.read_bits(16)?)
    } else {
        None
    }
}

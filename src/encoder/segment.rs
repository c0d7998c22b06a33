//! Data segments: mode choice and per-mode bit packing

use super::bit_buffer::BitBuffer;
use crate::decoder::tables::{ALPHANUMERIC_CHARSET, Mode};
use crate::models::Version;

/// One encoded run of payload in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

impl Segment {
    /// Digits only, packed three per 10 bits
    pub fn numeric(digits: &str) -> Option<Self> {
        if !is_numeric(digits) {
            return None;
        }
        let mut data = BitBuffer::new();
        for chunk in digits.as_bytes().chunks(3) {
            let value = chunk.iter().fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            data.append_bits(value, chunk.len() * 3 + 1);
        }
        Some(Self {
            mode: Mode::Numeric,
            char_count: digits.len(),
            data,
        })
    }

    /// Upper-case alphanumeric set, packed two per 11 bits
    pub fn alphanumeric(text: &str) -> Option<Self> {
        let codes: Vec<u32> = text
            .bytes()
            .map(|b| {
                ALPHANUMERIC_CHARSET
                    .iter()
                    .position(|&c| c == b)
                    .map(|i| i as u32)
            })
            .collect::<Option<_>>()?;
        let mut data = BitBuffer::new();
        for pair in codes.chunks(2) {
            match pair {
                [a, b] => data.append_bits(a * 45 + b, 11),
                [a] => data.append_bits(*a, 6),
                _ => {}
            }
        }
        Some(Self {
            mode: Mode::Alphanumeric,
            char_count: codes.len(),
            data,
        })
    }

    /// Arbitrary bytes, eight bits each
    pub fn bytes(bytes: &[u8]) -> Self {
        let mut data = BitBuffer::new();
        for &b in bytes {
            data.append_bits(u32::from(b), 8);
        }
        Self {
            mode: Mode::Byte,
            char_count: bytes.len(),
            data,
        }
    }

    /// Most compact single mode for `text`: numeric, then alphanumeric, then byte
    pub fn for_text(text: &str) -> Self {
        Self::numeric(text)
            .filter(|_| !text.is_empty())
            .or_else(|| Self::alphanumeric(text).filter(|_| !text.is_empty()))
            .unwrap_or_else(|| Self::bytes(text.as_bytes()))
    }

    /// Encoding mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters (or bytes) carried
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Packed payload bits, without header
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Header plus payload bits at `version`; `None` when the character
    /// count overflows the count field
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits + self.data.len())
    }

    /// Write mode indicator, character count and payload
    pub fn write(&self, buffer: &mut BitBuffer, version: Version) {
        buffer.append_bits(self.mode.indicator(), 4);
        buffer.append_bits(self.char_count as u32, self.mode.char_count_bits(version));
        buffer.extend_from(&self.data);
    }
}

fn is_numeric(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Total stream length of `segments` at `version`, if every count fits
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, s| Some(acc + s.encoded_bits(version)?))
}

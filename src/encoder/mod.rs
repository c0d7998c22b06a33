//! QR symbol generation
//!
//! Text is packed into a single segment in the most compact mode, placed in
//! the smallest version that holds it, protected with Reed-Solomon codewords
//! and masked with whichever of the eight patterns scores the lowest penalty.
//!
//! ```
//! use cardscan::encoder::QrBuilder;
//! use cardscan::ECLevel;
//!
//! let symbol = QrBuilder::new("HELLO WORLD").ec_level(ECLevel::M).build().unwrap();
//! assert_eq!(symbol.version().number(), 1);
//! ```

/// MSB-first bit assembly
pub mod bit_buffer;
/// Penalty scoring and mask choice
pub mod mask;
/// Function patterns and zig-zag data placement
pub mod placement;
/// Grayscale and PNG rendering
pub mod raster;
/// Mode selection and segment packing
pub mod segment;

use bit_buffer::BitBuffer;
use segment::{Segment, total_bits};

use crate::decoder::function_mask::FunctionMask;
use crate::decoder::reed_solomon::ReedSolomonEncoder;
use crate::decoder::tables::{data_capacity_bits, ec_block_info};
use crate::decoder::version::VersionInfo;
use crate::error::{Error, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Alternating pad codewords filling unused data capacity
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// A finished symbol: one entry per module, quiet zone excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    modules: BitMatrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
}

impl QrSymbol {
    /// Module grid, dark = `true`
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Version chosen for the payload
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask applied to the data modules
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }
}

/// Symbol builder; unset options fall back to automatic choices
#[derive(Debug, Clone)]
pub struct QrBuilder<'a> {
    text: &'a str,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QrBuilder<'a> {
    /// Builder for `text` at level L with automatic mask choice
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ec_level: ECLevel::default(),
            mask: None,
        }
    }

    /// Error correction level
    pub fn ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Force a mask instead of scoring all eight
    pub fn mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Encode, failing only when the text exceeds version 40 at the chosen level
    pub fn build(&self) -> Result<QrSymbol> {
        encode_segments(&[Segment::for_text(self.text)], self.ec_level, self.mask)
    }
}

/// Encode `text` with automatic mode, version and mask choice
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<QrSymbol> {
    QrBuilder::new(text).ec_level(ec_level).build()
}

/// Encode pre-built segments into the smallest fitting version
pub fn encode_segments(segments: &[Segment], ec_level: ECLevel, mask: Option<MaskPattern>) -> Result<QrSymbol> {
    let (version, used_bits) = Version::all()
        .find_map(|version| {
            total_bits(segments, version)
                .filter(|&bits| bits <= data_capacity_bits(version, ec_level))
                .map(|bits| (version, bits))
        })
        .ok_or_else(|| Error::Capacity {
            needed_bits: needed_bits(segments),
            available_bits: data_capacity_bits(Version::MAX, ec_level),
            ec_level,
        })?;
    log::debug!("encoding {used_bits} data bits as version {version}-{ec_level}");

    let data = data_codewords(segments, version, ec_level);
    let codewords = add_ecc_and_interleave(&data, version, ec_level);

    let func = FunctionMask::new(version);
    let mut base = placement::draw_function_patterns(version);
    VersionInfo::place(&mut base, version);
    placement::place_codewords(&mut base, &func, &codewords);

    let (mask, modules) = match mask {
        Some(mask) => (mask, mask::masked_symbol(&base, &func, ec_level, mask)),
        None => mask::choose_mask(&base, &func, ec_level),
    };

    Ok(QrSymbol {
        modules,
        version,
        ec_level,
        mask,
    })
}

/// Stream length at the widest count fields, for capacity errors
fn needed_bits(segments: &[Segment]) -> usize {
    segments
        .iter()
        .map(|s| 4 + s.mode().char_count_bits(Version::MAX) + s.data().len())
        .sum()
}

/// Segments, terminator, byte alignment and pad codewords up to capacity
fn data_codewords(segments: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity = data_capacity_bits(version, ec_level);
    let mut buffer = BitBuffer::new();
    for segment in segments {
        segment.write(&mut buffer, version);
    }

    let terminator = (capacity - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    buffer.append_bits(0, (8 - buffer.len() % 8) % 8);

    let mut bytes = buffer.to_bytes();
    let pads = PAD_CODEWORDS.iter().cycle();
    let missing = capacity / 8 - bytes.len();
    bytes.extend(pads.take(missing));
    bytes
}

/// Split data into blocks, append each block's ECC and interleave
fn add_ecc_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let num_short = info.num_short_blocks();
    let short_len = info.short_block_data_len();
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for b in 0..info.num_blocks {
        let len = if b < num_short { short_len } else { short_len + 1 };
        let block = &data[offset..offset + len];
        blocks.push((block, rs.remainder(block)));
        offset += len;
    }

    let mut out = Vec::with_capacity(info.total_codewords);
    for i in 0..=short_len {
        out.extend(blocks.iter().filter_map(|(block, _)| block.get(i)));
    }
    for i in 0..info.ecc_per_block {
        out.extend(blocks.iter().map(|(_, ecc)| ecc[i]));
    }
    out
}

//! BCH codes protecting format information (15,5) and version information (18,6)

use crate::models::{ECLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Both codes correct up to three bit errors
const MAX_CORRECTABLE: u32 = 3;

/// 15-bit masked format word for a level / mask pair
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = (u32::from(ec_level.format_bits()) << 3) | u32::from(mask.id());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_XOR_MASK
}

/// 18-bit version word (versions 7 and up)
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | rem
}

/// Nearest valid format word, when within correction distance
pub fn decode_format(word: u32) -> Option<(ECLevel, MaskPattern)> {
    let mut best: Option<(u32, ECLevel, MaskPattern)> = None;
    for ec_level in ECLevel::ALL {
        for mask in MaskPattern::all() {
            let distance = (format_bits(ec_level, mask) ^ word).count_ones();
            if best.is_none_or(|(d, _, _)| distance < d) {
                best = Some((distance, ec_level, mask));
            }
        }
    }
    best.filter(|(d, _, _)| *d <= MAX_CORRECTABLE)
        .map(|(_, ec_level, mask)| (ec_level, mask))
}

/// Distance from `word` to the nearest valid format word
pub fn format_distance(word: u32) -> u32 {
    ECLevel::ALL
        .iter()
        .flat_map(|&ec| MaskPattern::all().map(move |m| (format_bits(ec, m) ^ word).count_ones()))
        .min()
        .unwrap_or(u32::MAX)
}

/// Nearest valid version word (7-40), when within correction distance
pub fn decode_version(word: u32) -> Option<Version> {
    Version::all()
        .filter(|v| v.number() >= 7)
        .map(|v| ((version_bits(v) ^ word).count_ones(), v))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= MAX_CORRECTABLE)
        .map(|(_, v)| v)
}

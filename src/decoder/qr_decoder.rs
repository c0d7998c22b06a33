//! Decode pipeline: binarize, locate, sample, then read the module grid
use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::segments::decode_segments;
use crate::decoder::tables::ec_block_info;
use crate::decoder::unmask::apply_mask;
use crate::decoder::version::VersionInfo;
use crate::detector::{self, transform, SymbolLocation};
use crate::models::{BitMatrix, DecodedSymbol, ECLevel, Version};
use crate::utils::binarization::{adaptive_binarize, otsu_binarize};

/// Dimension offsets tried around the finder-spacing estimate
const DIMENSION_OFFSETS: [isize; 5] = [0, -4, 4, -8, 8];

/// Stateless QR symbol reader
pub struct QrDecoder;

impl QrDecoder {
    /// First symbol readable in a grayscale plane.
    ///
    /// A global Otsu threshold is tried first, then a local adaptive one for
    /// unevenly lit captures, then both again with light and dark swapped.
    pub fn decode_gray(gray: &[u8], width: usize, height: usize) -> Option<DecodedSymbol> {
        if width == 0 || height == 0 || gray.len() < width * height {
            return None;
        }

        let otsu = otsu_binarize(gray, width, height);
        if let Some(symbol) = Self::decode_binary(&otsu) {
            return Some(symbol);
        }

        let window = (width.min(height) / 8).clamp(15, 101) | 1;
        log::debug!("global threshold found nothing, trying adaptive window {window}");
        let adaptive = adaptive_binarize(gray, width, height, window);
        if let Some(symbol) = Self::decode_binary(&adaptive) {
            return Some(symbol);
        }

        log::debug!("trying inverted (light-on-dark) reading");
        Self::decode_binary(&invert(&otsu)).or_else(|| Self::decode_binary(&invert(&adaptive)))
    }

    /// First symbol readable in a binarized image
    pub fn decode_binary(matrix: &BitMatrix) -> Option<DecodedSymbol> {
        detector::locate(matrix)
            .iter()
            .find_map(|location| Self::decode_location(matrix, location))
    }

    fn decode_location(matrix: &BitMatrix, location: &SymbolLocation) -> Option<DecodedSymbol> {
        let mut tried = Vec::new();
        for offset in DIMENSION_OFFSETS {
            let Some(version) = location
                .dimension
                .checked_add_signed(offset)
                .and_then(Version::from_size)
            else {
                continue;
            };
            let mut version = version;

            let Some(grid) = Self::sample(matrix, location, version) else {
                continue;
            };
            // Large symbols carry their version; trust it over the spacing estimate
            if let Some(encoded) = VersionInfo::extract(&grid).filter(|v| *v != version) {
                log::trace!("version info says {encoded}, estimate was {version}");
                version = encoded;
            }
            if tried.contains(&version) {
                continue;
            }
            tried.push(version);

            let grid = if grid.width() == version.size() {
                Some(grid)
            } else {
                Self::sample(matrix, location, version)
            };
            if let Some(symbol) = grid.as_ref().and_then(Self::decode_grid) {
                log::debug!(
                    "decoded version {} level {} mask {}",
                    symbol.version,
                    symbol.ec_level,
                    symbol.mask.id()
                );
                return Some(symbol);
            }
        }
        None
    }

    fn sample(matrix: &BitMatrix, location: &SymbolLocation, version: Version) -> Option<BitMatrix> {
        let dimension = version.size();
        let transform = transform::symbol_transform(matrix, location, dimension)?;
        transform::sample_grid(matrix, &transform, dimension)
    }

    /// Read a sampled module grid (one entry per module, no quiet zone)
    pub fn decode_grid(grid: &BitMatrix) -> Option<DecodedSymbol> {
        let version = Version::from_size(grid.width())?;
        let format = FormatInfo::extract(grid)?;
        let func = FunctionMask::new(version);

        let mut unmasked = grid.clone();
        apply_mask(&mut unmasked, format.mask_pattern, &func);
        let codewords = BitstreamExtractor::extract_codewords(&unmasked, &func);
        let data = deinterleave_and_correct(&codewords, version, format.ec_level)?;
        let segments = decode_segments(&data, version)?;

        Some(DecodedSymbol {
            text: segments.text(),
            bytes: segments.bytes,
            version,
            ec_level: format.ec_level,
            mask: format.mask_pattern,
        })
    }
}

/// Split interleaved codewords into blocks, correct each and concatenate the data.
///
/// Short blocks come first; long blocks carry one extra data codeword.
pub fn deinterleave_and_correct(codewords: &[u8], version: Version, ec_level: ECLevel) -> Option<Vec<u8>> {
    let info = ec_block_info(version, ec_level);
    if codewords.len() < info.total_codewords {
        return None;
    }

    let num_short = info.num_short_blocks();
    let short_len = info.short_block_data_len();
    let block_data_len = |b: usize| if b < num_short { short_len } else { short_len + 1 };

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(block_data_len(b) + info.ecc_per_block))
        .collect();

    let mut source = codewords[..info.total_codewords].iter().copied();
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < block_data_len(b) {
                block.push(source.next()?);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(source.next()?);
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.data_codewords());
    for (b, block) in blocks.iter_mut().enumerate() {
        match rs.decode(block) {
            Ok(0) => {}
            Ok(corrected) => log::trace!("block {b}: corrected {corrected} codewords"),
            Err(reason) => {
                log::trace!("block {b}: {reason}");
                return None;
            }
        }
        data.extend_from_slice(&block[..block_data_len(b)]);
    }
    Some(data)
}

fn invert(matrix: &BitMatrix) -> BitMatrix {
    let mut inverted = matrix.clone();
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            inverted.toggle(x, y);
        }
    }
    inverted
}

//! QR symbol reading after location
//!
//! - Error correction (Reed-Solomon, BCH)
//! - Format and version information
//! - Unmasking and bitstream extraction
//! - Segment decoding (numeric, alphanumeric, byte, kanji, ECI)
//!
//! Tables, the function mask and the zig-zag order are shared with the encoder.

/// BCH codes for format and version info
pub mod bch;
/// Bitstream extraction from the module grid
pub mod bitstream;
/// Format information placement and extraction
pub mod format;
/// Function module mask (finder/timing/format/alignment/version)
pub mod function_mask;
/// Per-mode segment payload decoders
pub mod modes;
/// Pipeline from grayscale plane to decoded symbol
pub mod qr_decoder;
/// Reed-Solomon encoding and correction
pub mod reed_solomon;
/// Segment stream parsing
pub mod segments;
/// Capacity, block and alignment tables
pub mod tables;
/// Data masking
pub mod unmask;
/// Version information (versions 7-40)
pub mod version;

pub use qr_decoder::QrDecoder;

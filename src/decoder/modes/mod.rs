//! QR code data mode decoders
//!
//! Each decoder reads one segment's payload from a [`BitReader`] and
//! appends the raw bytes it represents.
//!
//! [`BitReader`]: crate::decoder::bitstream::BitReader

/// Alphanumeric mode (45-character set)
pub mod alphanumeric;
/// Byte mode
pub mod byte;
/// Kanji mode (Shift-JIS)
pub mod kanji;
/// Numeric mode
pub mod numeric;

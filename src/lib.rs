//! cardscan - business card extraction and QR payload codec
//!
//! Turns recognized business-card text into a structured [`ContactRecord`],
//! and encodes contact data into QR symbols (and reads them back) with a QR
//! engine written in pure Rust on top of the `image` crate.
//!
//! ```
//! let extraction = cardscan::extract("Jane Doe\nCTO\njane@acme.com");
//! assert_eq!(extraction.record.email.as_deref(), Some("jane@acme.com"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Payload codec over the QR engine
pub mod codec;
/// QR rendering parameters
pub mod config;
/// QR symbol reading (format info, error correction, segment decoding)
pub mod decoder;
/// QR symbol location (finder patterns, grouping, sampling)
pub mod detector;
/// QR symbol generation (segments, placement, masking, rendering)
pub mod encoder;
/// Error type and result alias
pub mod error;
/// Contact field extraction
pub mod extract;
/// Core data structures (ContactRecord, Payload, BitMatrix, etc.)
pub mod models;
/// Text recognition capability
pub mod ocr;
/// Card intake pipeline
pub mod scanner;
/// Image persistence capability
pub mod store;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use codec::QrCodec;
pub use config::CodecConfig;
pub use error::{Error, Result};
pub use extract::FieldExtractor;
pub use models::{
    BitMatrix, ContactRecord, DecodedSymbol, ECLevel, Extraction, FieldMap, MaskPattern, Payload,
    PayloadKind, Point, QrPayload, RawText, Version,
};
pub use ocr::{StaticText, TesseractCli, TextRecognizer};
pub use scanner::{CardScan, CardScanner};
pub use store::{FsImageStore, ImageStore, NamingScheme};

/// Extract contact fields from recognized card text with the standard recognizers
pub fn extract(text: &str) -> Extraction {
    FieldExtractor::new().extract(text)
}

/// Encode a payload with the default codec configuration
pub fn encode(payload: &Payload) -> Result<QrPayload> {
    QrCodec::default().encode(payload)
}

/// Read the first QR symbol in an encoded raster (PNG, JPEG, ...)
///
/// Returns `Ok(None)` when the image holds no readable symbol.
pub fn decode(raster: &[u8]) -> Result<Option<String>> {
    QrCodec::default().decode(raster)
}

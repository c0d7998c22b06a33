//! Plain data types shared across the crate

/// Contact records and recognized text
pub mod contact;
/// Bit matrix for binary images and module grids
pub mod matrix;
/// Encodable payload kinds and their canonical text
pub mod payload;
/// Image-space points
pub mod point;
/// QR symbol parameters: version, level, mask
pub mod symbol;

pub use contact::{ContactRecord, Extraction, RawText};
pub use matrix::BitMatrix;
pub use payload::{FieldMap, Payload, PayloadKind, QrPayload};
pub use point::Point;
pub use symbol::{DecodedSymbol, ECLevel, MaskPattern, Version};

//! Error types for cardscan.

use std::io;
use thiserror::Error;

use crate::models::ECLevel;

/// Result type alias for cardscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the codec and the external-capability adapters.
///
/// Absence is never an error: missing contact fields are `None` and an image
/// without a symbol decodes to `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload text does not fit the largest symbol at the configured level.
    #[error(
        "payload needs {needed_bits} data bits but version 40-{ec_level} holds {available_bits}"
    )]
    Capacity {
        /// Bits the encoded segment requires
        needed_bits: usize,
        /// Data bits available in a version 40 symbol
        available_bits: usize,
        /// Level the capacity was computed for
        ec_level: ECLevel,
    },

    /// Bytes handed to the decoder are not a readable raster.
    #[error("malformed image: {0}")]
    MalformedImage(#[source] image::ImageError),

    /// Rendering or re-encoding a raster failed.
    #[error("raster encoding error: {0}")]
    Raster(#[source] image::ImageError),

    /// The text recognizer failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// I/O error from an image store or recognizer process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message() {
        let err = Error::Capacity {
            needed_bits: 30_000,
            available_bits: 23_648,
            ec_level: ECLevel::L,
        };
        assert_eq!(
            err.to_string(),
            "payload needs 30000 data bits but version 40-L holds 23648"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}

//! Card intake pipeline: store the image, recognize its text, extract
//! contact fields and read any QR symbol printed on the card

use serde::Serialize;

use crate::codec::QrCodec;
use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::models::{ContactRecord, Extraction, RawText};
use crate::ocr::TextRecognizer;
use crate::store::ImageStore;

/// Everything learned from one card image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardScan {
    /// Where the image was stored, when a store is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Recognized text
    pub raw_text: RawText,
    /// Fields extracted from the text
    pub record: ContactRecord,
    /// Text of a QR symbol on the card, if one was read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_text: Option<String>,
}

impl CardScan {
    /// The text and record as an [`Extraction`]
    pub fn extraction(&self) -> Extraction {
        Extraction {
            raw_text: self.raw_text.clone(),
            record: self.record.clone(),
        }
    }
}

/// Wires a recognizer, the field extractor, an optional image store and the
/// QR codec into a single scan call
pub struct CardScanner<R> {
    recognizer: R,
    extractor: FieldExtractor,
    store: Option<Box<dyn ImageStore>>,
    codec: QrCodec,
    read_qr: bool,
}

impl<R: TextRecognizer> CardScanner<R> {
    /// Scanner with the standard extractor, no store, and QR reading enabled
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            extractor: FieldExtractor::default(),
            store: None,
            codec: QrCodec::default(),
            read_qr: true,
        }
    }

    /// Persist every scanned image through `store`
    pub fn with_store(mut self, store: impl ImageStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Replace the field extractor
    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the codec used to read QR symbols
    pub fn with_codec(mut self, codec: QrCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Enable or skip the QR reading step
    pub fn read_qr(mut self, enabled: bool) -> Self {
        self.read_qr = enabled;
        self
    }

    /// The recognizer in use
    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Scan one card image.
    ///
    /// Errors from the store, the recognizer or the image decoder are returned
    /// as-is; a card without a QR symbol is not an error.
    pub fn scan(&self, image: &[u8]) -> Result<CardScan> {
        let image_ref = self.store.as_ref().map(|store| store.save(image)).transpose()?;

        let text = self.recognizer.recognize(image)?;
        let Extraction { raw_text, record } = self.extractor.extract(&text);

        let qr_text = if self.read_qr {
            self.codec.decode(image)?
        } else {
            None
        };

        log::debug!(
            "scanned card: {} lines, {} fields, qr {}",
            raw_text.lines().len(),
            record.populated_count(),
            if qr_text.is_some() { "found" } else { "absent" }
        );

        Ok(CardScan {
            image_ref,
            raw_text,
            record,
            qr_text,
        })
    }
}

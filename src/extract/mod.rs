//! Contact field extraction from recognized card text
//!
//! The extractor folds an ordered list of [`Recognizer`]s over an empty
//! [`ContactRecord`]. It never fails: text with nothing recognizable yields a
//! record with every field absent.

/// The individual field recognizers
pub mod recognizers;

use rayon::prelude::*;

pub use recognizers::Recognizer;

use crate::models::{ContactRecord, Extraction, RawText};

/// Ordered recognizer pipeline
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    recognizers: Vec<Recognizer>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self {
            recognizers: recognizers::STANDARD.to_vec(),
        }
    }
}

impl FieldExtractor {
    /// Extractor running the standard recognizers
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor running exactly `recognizers`, in order
    pub fn with_recognizers(recognizers: Vec<Recognizer>) -> Self {
        Self { recognizers }
    }

    /// Append a recognizer that runs after the existing ones
    pub fn push(&mut self, recognizer: Recognizer) {
        self.recognizers.push(recognizer);
    }

    /// Number of recognizers in the pipeline
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// True when no recognizer is configured
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Fields recognized in `raw`
    pub fn extract_record(&self, raw: &RawText) -> ContactRecord {
        let mut record = ContactRecord::default();
        for recognize in &self.recognizers {
            recognize(raw, &mut record);
        }
        record
    }

    /// Split `text` into lines and recognize fields
    pub fn extract(&self, text: &str) -> Extraction {
        let raw_text = RawText::new(text);
        let record = self.extract_record(&raw_text);
        log::trace!(
            "extracted {} fields from {} lines",
            record.populated_count(),
            raw_text.lines().len()
        );
        Extraction { raw_text, record }
    }

    /// [`extract`](Self::extract) over many texts in parallel, results in input order
    pub fn extract_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Extraction> {
        texts.par_iter().map(|text| self.extract(text.as_ref())).collect()
    }
}

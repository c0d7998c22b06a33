//! QR payload codec: canonical text to PNG and raster back to text

use image::DynamicImage;

use crate::config::CodecConfig;
use crate::decoder::QrDecoder;
use crate::encoder::{self, QrSymbol, raster};
use crate::error::{Error, Result};
use crate::models::{DecodedSymbol, FieldMap, Payload, PayloadKind, QrPayload};
use crate::utils::grayscale::image_to_grayscale;

/// Encodes payloads into QR rasters and reads QR rasters back.
///
/// Stateless apart from its [`CodecConfig`]; safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QrCodec {
    config: CodecConfig,
}

impl QrCodec {
    /// Codec with explicit generation parameters
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Generation parameters in use
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Render the payload's canonical text as a PNG symbol.
    ///
    /// Fails only with [`Error::Capacity`] when the text exceeds version 40.
    pub fn encode(&self, payload: &Payload) -> Result<QrPayload> {
        let text = payload.canonical_text();
        let symbol = encoder::encode_text(&text, self.config.ec_level)?;
        let png = self.rasterize(&symbol)?;
        log::debug!(
            "encoded {} payload ({} chars) as version {} mask {}",
            payload.kind(),
            text.chars().count(),
            symbol.version(),
            symbol.mask().id()
        );
        Ok(QrPayload {
            kind: payload.kind(),
            text,
            png,
            version: symbol.version(),
            ec_level: symbol.ec_level(),
            mask: symbol.mask(),
        })
    }

    /// [`encode`](Self::encode) for a flat field map tagged with its kind
    pub fn encode_fields(&self, kind: PayloadKind, fields: &FieldMap) -> Result<QrPayload> {
        self.encode(&Payload::from_fields(kind, fields))
    }

    /// PNG bytes for arbitrary text
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        let symbol = encoder::encode_text(text, self.config.ec_level)?;
        self.rasterize(&symbol)
    }

    fn rasterize(&self, symbol: &QrSymbol) -> Result<Vec<u8>> {
        raster::render_png(symbol, self.config.module_px, self.config.border)
    }

    /// Text of the first symbol found in `raster` (any format `image` reads).
    ///
    /// `Ok(None)` when the image holds no readable symbol.
    pub fn decode(&self, raster: &[u8]) -> Result<Option<String>> {
        Ok(self.decode_symbol(raster)?.map(|symbol| symbol.text))
    }

    /// Like [`decode`](Self::decode) but keeps bytes, version, level and mask
    pub fn decode_symbol(&self, raster: &[u8]) -> Result<Option<DecodedSymbol>> {
        let image = image::load_from_memory(raster).map_err(Error::MalformedImage)?;
        Ok(decode_image(&image))
    }
}

/// First symbol readable in an already decoded image
pub fn decode_image(image: &DynamicImage) -> Option<DecodedSymbol> {
    let (gray, width, height) = image_to_grayscale(image);
    let symbol = QrDecoder::decode_gray(&gray, width, height);
    if symbol.is_none() {
        log::debug!("no QR symbol found in {width}x{height} image");
    }
    symbol
}

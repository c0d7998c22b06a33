/// Raster output: module grid to grayscale image and PNG bytes
use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, Luma};

use super::QrSymbol;
use crate::config::{MAX_BORDER, MAX_MODULE_PX};
use crate::error::{Error, Result};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Black-on-white image, `module_px` pixels per module with a `border`-module quiet zone.
///
/// Both are capped at the [`CodecConfig`](crate::config::CodecConfig) maximums.
pub fn render_luma(symbol: &QrSymbol, module_px: u32, border: u32) -> GrayImage {
    let module_px = module_px.clamp(1, MAX_MODULE_PX);
    let border = border.min(MAX_BORDER);
    let modules = symbol.size() as u32;
    let side = (modules + 2 * border) * module_px;

    GrayImage::from_fn(side, side, |px, py| {
        let (mx, my) = (px / module_px, py / module_px);
        let inside = (border..border + modules).contains(&mx) && (border..border + modules).contains(&my);
        if inside && symbol.modules().get((mx - border) as usize, (my - border) as usize) {
            DARK
        } else {
            LIGHT
        }
    })
}

/// PNG-encoded [`render_luma`]
pub fn render_png(symbol: &QrSymbol, module_px: u32, border: u32) -> Result<Vec<u8>> {
    let image = render_luma(symbol, module_px, border);
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(Error::Raster)?;
    Ok(png)
}

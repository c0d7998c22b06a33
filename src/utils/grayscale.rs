/// Luminance conversion for decoder input
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
use image::DynamicImage;
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Below this many pixels rows are converted on the calling thread
const PARALLEL_THRESHOLD: usize = 256 * 256;

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * u32::from(r) + COEF_G * u32::from(g) + COEF_B * u32::from(b)) >> 8;
    lum.min(255) as u8
}

/// Luminance over a white background, so transparent areas read as light
#[inline]
fn luminance_over_white(px: &[u8]) -> u8 {
    let lum = u32::from(luminance(px[0], px[1], px[2]));
    let alpha = u32::from(px[3]);
    ((lum * alpha + 255 * (255 - alpha)) / 255) as u8
}

fn convert_rows(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    pixel: fn(&[u8]) -> u8,
) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    let convert_row = |(y, row): (usize, &mut [u8])| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = pixel(&src[idx..idx + channels]);
        }
    };

    if width * height >= PARALLEL_THRESHOLD {
        gray.par_chunks_mut(width).enumerate().for_each(convert_row);
    } else {
        gray.chunks_mut(width).enumerate().for_each(convert_row);
    }
    gray
}

/// Convert packed RGB bytes to grayscale, rows in parallel for large images
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert_rows(rgb, width, height, 3, |px| luminance(px[0], px[1], px[2]))
}

/// Convert packed RGBA bytes to grayscale, compositing over white
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert_rows(rgba, width, height, 4, luminance_over_white)
}

/// Grayscale plane of a decoded image with its dimensions
pub fn image_to_grayscale(image: &DynamicImage) -> (Vec<u8>, usize, usize) {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let gray = match image {
        DynamicImage::ImageLuma8(luma) => luma.as_raw().clone(),
        DynamicImage::ImageRgb8(rgb) => rgb_to_grayscale(rgb.as_raw(), width, height),
        other if other.color().has_alpha() => {
            rgba_to_grayscale(other.to_rgba8().as_raw(), width, height)
        }
        other => rgb_to_grayscale(other.to_rgb8().as_raw(), width, height),
    };
    (gray, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbaImage};

    #[test]
    fn test_rgb_to_grayscale() {
        assert!(rgb_to_grayscale(&[255, 255, 255], 1, 1)[0] >= 254);
        assert_eq!(rgb_to_grayscale(&[0, 0, 0], 1, 1)[0], 0);
        let red = rgb_to_grayscale(&[255, 0, 0], 1, 1)[0];
        assert!(red > 0 && red < 255);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let width = 300;
        let height = 300;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        let gray = rgb_to_grayscale(&rgb, width, height);
        for (i, &value) in gray.iter().enumerate().step_by(997) {
            assert_eq!(value, luminance(rgb[i * 3], rgb[i * 3 + 1], rgb[i * 3 + 2]));
        }
    }

    #[test]
    fn test_transparent_pixels_read_light() {
        let rgba = RgbaImage::from_raw(2, 1, vec![0, 0, 0, 0, 0, 0, 0, 255]).unwrap();
        let (gray, width, height) = image_to_grayscale(&DynamicImage::ImageRgba8(rgba));
        assert_eq!((width, height), (2, 1));
        assert_eq!(gray, vec![255, 0]);
    }

    #[test]
    fn test_luma_passthrough() {
        let luma = GrayImage::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        let (gray, _, _) = image_to_grayscale(&DynamicImage::ImageLuma8(luma));
        assert_eq!(gray, vec![1, 2, 3, 4]);
    }
}

//! Image processing helpers for the decoder
//!
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (Otsu's method, fixed and adaptive thresholds)
//! - Perspective transforms between module grid and image space

/// Otsu, fixed and adaptive thresholding
pub mod binarization;
/// Perspective transforms
pub mod geometry;
/// RGB/RGBA to luminance conversion
pub mod grayscale;

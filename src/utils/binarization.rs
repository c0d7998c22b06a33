/// Grayscale to binary conversion. Dark pixels map to `true`.
use crate::models::BitMatrix;

/// Pixels darker than the local mean by this much count as dark
const ADAPTIVE_OFFSET: i64 = 7;

/// Global threshold chosen by Otsu's method
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    threshold_binarize(gray, width, height, calculate_otsu_threshold(gray))
}

/// Otsu's threshold: the split maximizing between-class variance.
/// Pixels strictly below the returned value are dark.
pub fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut best_variance = 0.0;
    let mut best_threshold = 128u8;
    let mut below_count = 0.0;
    let mut below_sum = 0.0;

    for threshold in 1..=255usize {
        below_count += histogram[threshold - 1] as f64;
        below_sum += (threshold - 1) as f64 * histogram[threshold - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }
        let mean_below = below_sum / below_count;
        let mean_above = (total_sum - below_sum) / above_count;
        let variance = below_count * above_count * (mean_below - mean_above).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = threshold as u8;
        }
    }

    best_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            binary.set(x, y, gray[y * width + x] < threshold);
        }
    }
    binary
}

/// Local mean threshold over a `window`-sized square, via an integral image.
/// Handles uneven lighting that defeats a single global threshold.
pub fn adaptive_binarize(gray: &[u8], width: usize, height: usize, window: usize) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    // integral[(y + 1) * (width + 1) + (x + 1)] = sum of gray[0..=y][0..=x]
    let stride = width + 1;
    let mut integral = vec![0u64; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += u64::from(gray[y * width + x]);
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }

    let half = window.max(3) / 2;
    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(width);
            let area = ((x1 - x0) * (y1 - y0)) as i64;
            let sum = (integral[y1 * stride + x1] + integral[y0 * stride + x0]) as i64
                - integral[y0 * stride + x1] as i64
                - integral[y1 * stride + x0] as i64;
            let pixel = i64::from(gray[y * width + x]);
            binary.set(x, y, pixel * area < sum - ADAPTIVE_OFFSET * area);
        }
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50];
        let binary = threshold_binarize(&gray, 2, 2, 128);
        assert!(binary.get(0, 0));
        assert!(!binary.get(1, 0));
        assert!(!binary.get(0, 1));
        assert!(binary.get(1, 1));
    }

    #[test]
    fn test_otsu_binarize() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let threshold = calculate_otsu_threshold(&gray);
        assert!(threshold > 50 && threshold <= 200);

        let binary = otsu_binarize(&gray, 10, 10);
        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
    }

    #[test]
    fn test_adaptive_handles_gradient() {
        // Dark squares on a left-to-right brightness ramp
        let width = 64;
        let height = 16;
        let mut gray = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                let background = 100 + (x as u32 * 150 / width as u32) as u8;
                let dark = (x / 8) % 2 == 0 && (4..12).contains(&y);
                gray[y * width + x] = if dark { background - 60 } else { background };
            }
        }
        let binary = adaptive_binarize(&gray, width, height, 15);
        assert!(binary.get(4, 8));
        assert!(binary.get(50, 8));
        assert!(!binary.get(12, 1));
        assert!(!binary.get(52, 1));
    }
}

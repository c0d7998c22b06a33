/// Module-grid sampling through a perspective transform
use super::alignment::find_alignment_pattern;
use super::grouping::SymbolLocation;
use crate::decoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Point, Version};
use crate::utils::geometry::PerspectiveTransform;

/// Grid-to-image transform for `location` read as a `dimension`-module symbol.
///
/// From version 2 the bottom-right alignment pattern pins the fourth corner,
/// which absorbs perspective skew; otherwise the symbol is treated as affine.
pub fn symbol_transform(
    matrix: &BitMatrix,
    location: &SymbolLocation,
    dimension: usize,
) -> Option<PerspectiveTransform> {
    let far = dimension as f32 - 3.5;
    let src = [Point::new(3.5, 3.5), Point::new(far, 3.5), Point::new(3.5, far)];
    let dst = [location.top_left, location.top_right, location.bottom_left];
    let affine = PerspectiveTransform::from_three_points(&src, &dst)?;

    let Some(version) = Version::from_size(dimension).filter(|v| v.number() >= 2) else {
        return Some(affine);
    };
    let Some(&last) = alignment_pattern_positions(version).last() else {
        return Some(affine);
    };

    let align_src = Point::new(last as f32 + 0.5, last as f32 + 0.5);
    let predicted = affine.transform(&align_src);
    match find_alignment_pattern(matrix, predicted, location.module_size) {
        Some(found) => {
            log::trace!("alignment pattern at ({:.1}, {:.1})", found.x, found.y);
            PerspectiveTransform::from_points(
                &[src[0], src[1], src[2], align_src],
                &[dst[0], dst[1], dst[2], found],
            )
            .or(Some(affine))
        }
        None => Some(affine),
    }
}

/// Read a `dimension`-square module grid, each module decided by a 3x3 majority
/// of pixels around its mapped center
pub fn sample_grid(matrix: &BitMatrix, transform: &PerspectiveTransform, dimension: usize) -> Option<BitMatrix> {
    let mut grid = BitMatrix::square(dimension);
    let (width, height) = (matrix.width() as isize, matrix.height() as isize);

    for y in 0..dimension {
        for x in 0..dimension {
            let p = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if !p.is_finite() {
                return None;
            }
            let (px, py) = (p.x.floor() as isize, p.y.floor() as isize);
            if px < -1 || py < -1 || px > width || py > height {
                // Symbol extends past the image
                return None;
            }

            let (mut dark, mut total) = (0, 0);
            for sy in py - 1..=py + 1 {
                for sx in px - 1..=px + 1 {
                    if (0..width).contains(&sx) && (0..height).contains(&sy) {
                        total += 1;
                        if matrix.get(sx as usize, sy as usize) {
                            dark += 1;
                        }
                    }
                }
            }
            grid.set(x, y, total > 0 && dark * 2 > total);
        }
    }

    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(dimension: usize, unit: f32, origin: f32) -> SymbolLocation {
        let far = (dimension as f32 - 3.5) * unit + origin;
        let near = 3.5 * unit + origin;
        crate::detector::grouping::group_finder_patterns(&[
            crate::detector::finder::FinderPattern::new(near, near, unit),
            crate::detector::finder::FinderPattern::new(far, near, unit),
            crate::detector::finder::FinderPattern::new(near, far, unit),
        ])[0]
    }

    #[test]
    fn test_sample_scaled_checkerboard() {
        let unit = 5usize;
        let origin = 10usize;
        let dimension = 21;
        let mut image = BitMatrix::new(dimension * unit + 2 * origin, dimension * unit + 2 * origin);
        for y in 0..dimension * unit {
            for x in 0..dimension * unit {
                image.set(origin + x, origin + y, (x / unit + y / unit) % 2 == 0);
            }
        }

        let loc = location(dimension, unit as f32, origin as f32);
        let transform = symbol_transform(&image, &loc, dimension).unwrap();
        let grid = sample_grid(&image, &transform, dimension).unwrap();
        for y in 0..dimension {
            for x in 0..dimension {
                assert_eq!(grid.get(x, y), (x + y) % 2 == 0, "module ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_symbol_past_image_edge() {
        let image = BitMatrix::new(40, 40);
        let loc = location(21, 4.0, 0.0);
        let transform = symbol_transform(&image, &loc, 41).unwrap();
        assert!(sample_grid(&image, &transform, 41).is_none());
    }
}

/// Alignment pattern search for QR versions 2+
///
/// The pattern is a 5x5-module target: dark ring, light ring, dark center.
use crate::models::{BitMatrix, Point};

/// Fraction of the 25 template modules that must match
const MIN_TEMPLATE_MATCH: usize = 21;

/// Search radius around the predicted center, in modules
const SEARCH_RADIUS_MODULES: f32 = 4.0;

fn template_dark(dx: isize, dy: isize) -> bool {
    dx.abs().max(dy.abs()) != 1
}

fn template_score(matrix: &BitMatrix, center: Point, module_size: f32) -> usize {
    let mut score = 0;
    for dy in -2isize..=2 {
        for dx in -2isize..=2 {
            let x = center.x + dx as f32 * module_size;
            let y = center.y + dy as f32 * module_size;
            if x < 0.0 || y < 0.0 {
                continue;
            }
            if matrix.get(x as usize, y as usize) == template_dark(dx, dy) {
                score += 1;
            }
        }
    }
    score
}

/// Best-matching alignment pattern center near `predicted`, if any matches well
pub fn find_alignment_pattern(matrix: &BitMatrix, predicted: Point, module_size: f32) -> Option<Point> {
    if !predicted.is_finite() || module_size < 1.0 {
        return None;
    }
    let radius = (module_size * SEARCH_RADIUS_MODULES) as isize;
    let step = ((module_size / 3.0) as isize).max(1);

    let mut best: Option<(usize, f32, Point)> = None;
    for oy in (-radius..=radius).step_by(step as usize) {
        for ox in (-radius..=radius).step_by(step as usize) {
            let candidate = Point::new(predicted.x + ox as f32, predicted.y + oy as f32);
            let score = template_score(matrix, candidate, module_size);
            if score < MIN_TEMPLATE_MATCH {
                continue;
            }
            let offset = candidate.distance_squared(&predicted);
            let better = match best {
                None => true,
                Some((s, d, _)) => score > s || (score == s && offset < d),
            };
            if better {
                best = Some((score, offset, candidate));
            }
        }
    }

    best.map(|(_, _, p)| center_of_stone(matrix, p, module_size))
}

/// Re-center on the dark center module by averaging its dark pixels
fn center_of_stone(matrix: &BitMatrix, near: Point, module_size: f32) -> Point {
    let half = (module_size * 0.5).ceil() as isize;
    let (cx, cy) = (near.x as isize, near.y as isize);
    let (mut sx, mut sy, mut n) = (0.0f32, 0.0f32, 0usize);
    for y in cy - half..=cy + half {
        for x in cx - half..=cx + half {
            if x >= 0 && y >= 0 && matrix.get(x as usize, y as usize) {
                sx += x as f32 + 0.5;
                sy += y as f32 + 0.5;
                n += 1;
            }
        }
    }
    if n == 0 {
        near
    } else {
        Point::new(sx / n as f32, sy / n as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_alignment(matrix: &mut BitMatrix, cx: usize, cy: usize, unit: usize) {
        for my in -2isize..=2 {
            for mx in -2isize..=2 {
                let dark = template_dark(mx, my);
                let x0 = (cx as isize + mx * unit as isize - unit as isize / 2) as usize;
                let y0 = (cy as isize + my * unit as isize - unit as isize / 2) as usize;
                for y in y0..y0 + unit {
                    for x in x0..x0 + unit {
                        matrix.set(x, y, dark);
                    }
                }
            }
        }
    }

    #[test]
    fn test_finds_offset_pattern() {
        let mut matrix = BitMatrix::new(120, 120);
        draw_alignment(&mut matrix, 64, 58, 6);
        let found = find_alignment_pattern(&matrix, Point::new(55.0, 50.0), 6.0).unwrap();
        assert!((found.x - 64.0).abs() < 2.0, "x = {}", found.x);
        assert!((found.y - 58.0).abs() < 2.0, "y = {}", found.y);
    }

    #[test]
    fn test_blank_area_has_no_pattern() {
        let matrix = BitMatrix::new(80, 80);
        assert!(find_alignment_pattern(&matrix, Point::new(40.0, 40.0), 5.0).is_none());
    }
}

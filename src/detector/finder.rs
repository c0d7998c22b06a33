/// Finder pattern detection using 1:1:3:1:1 ratio scanning with vertical
/// and horizontal cross-checks
use crate::models::{BitMatrix, Point};

/// Allowed deviation of each run from its ideal width, in module units
const RATIO_TOLERANCE: f32 = 0.5;
/// Smallest pattern accepted, in pixels (7 modules at 1 px)
const MIN_PATTERN_WIDTH: usize = 7;

/// A located finder pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    /// Center in pixel coordinates
    pub center: Point,
    /// Estimated module width in pixels
    pub module_size: f32,
    /// Scan lines that confirmed this pattern
    pub hits: usize,
}

impl FinderPattern {
    /// Pattern confirmed by a single scan line
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
            hits: 1,
        }
    }

    fn is_near(&self, other: &FinderPattern) -> bool {
        let size_ratio = self.module_size.max(other.module_size)
            / self.module_size.min(other.module_size).max(f32::EPSILON);
        self.center.distance(&other.center) <= self.module_size.max(other.module_size) * 2.0
            && size_ratio < 1.5
    }

    fn absorb(&mut self, other: &FinderPattern) {
        let total = (self.hits + other.hits) as f32;
        let (w1, w2) = (self.hits as f32 / total, other.hits as f32 / total);
        self.center = Point::new(
            self.center.x * w1 + other.center.x * w2,
            self.center.y * w1 + other.center.y * w2,
        );
        self.module_size = self.module_size * w1 + other.module_size * w2;
        self.hits += other.hits;
    }
}

/// Stateless finder pattern scanner
pub struct FinderDetector;

impl FinderDetector {
    /// Scan every row of `matrix`, cross-check each hit and merge duplicates
    pub fn detect(matrix: &BitMatrix) -> Vec<FinderPattern> {
        let mut merged: Vec<FinderPattern> = Vec::new();

        for y in 0..matrix.height() {
            for candidate in Self::scan_row(matrix, y) {
                match merged.iter_mut().find(|p| p.is_near(&candidate)) {
                    Some(existing) => existing.absorb(&candidate),
                    None => merged.push(candidate),
                }
            }
        }

        merged.sort_by(|a, b| b.hits.cmp(&a.hits));
        log::trace!("finder candidates after merge: {}", merged.len());
        merged
    }

    fn scan_row(matrix: &BitMatrix, y: usize) -> Vec<FinderPattern> {
        let width = matrix.width();
        let mut candidates = Vec::new();

        // Runs as (is_dark, start, length)
        let mut runs: Vec<(bool, usize, usize)> = Vec::new();
        let mut run_start = 0;
        for x in 1..=width {
            if x == width || matrix.get(x, y) != matrix.get(run_start, y) {
                runs.push((matrix.get(run_start, y), run_start, x - run_start));
                run_start = x;
            }
        }

        for window in runs.windows(5) {
            if !window[0].0 {
                continue;
            }
            let lengths = [
                window[0].2,
                window[1].2,
                window[2].2,
                window[3].2,
                window[4].2,
            ];
            if !Self::quick_ratio_check(&lengths) || !Self::ratio_matches(&lengths) {
                continue;
            }
            let center_x = window[2].1 as f32 + window[2].2 as f32 / 2.0;
            if let Some(pattern) = Self::cross_check(matrix, center_x, y as f32) {
                candidates.push(pattern);
            }
        }

        candidates
    }

    /// Quick ratio validation with integer arithmetic before the float check
    fn quick_ratio_check(lengths: &[usize; 5]) -> bool {
        let total: usize = lengths.iter().sum();
        if total < MIN_PATTERN_WIDTH {
            return false;
        }

        let outer_min = lengths[0].min(lengths[4]).max(1);
        if lengths[2] < outer_min * 2 || lengths[2] > outer_min * 5 {
            return false;
        }

        let outer_avg = (lengths[0] + lengths[1] + lengths[3] + lengths[4]) / 4;
        [lengths[1], lengths[3]]
            .iter()
            .all(|&w| w * 2 >= outer_avg && w <= outer_avg * 2)
    }

    fn ratio_matches(lengths: &[usize; 5]) -> bool {
        let total: usize = lengths.iter().sum();
        let unit = total as f32 / 7.0;
        lengths
            .iter()
            .zip([1.0f32, 1.0, 3.0, 1.0, 1.0])
            .all(|(&len, expected)| (len as f32 / unit - expected).abs() <= RATIO_TOLERANCE * expected.max(1.0))
    }

    /// Confirm a row hit along the column through it, then re-center along the row
    fn cross_check(matrix: &BitMatrix, x: f32, y: f32) -> Option<FinderPattern> {
        let (center_y, height) = Self::measure_line(matrix, x as usize, y as usize, false)?;
        let (center_x, width) = Self::measure_line(matrix, x as usize, center_y as usize, true)?;
        // Confirm the vertical measurement through the refined center
        let (center_y, height) = Self::measure_line(matrix, center_x as usize, center_y as usize, false)
            .unwrap_or((center_y, height));
        if (width - height).abs() > width.max(height) * 0.4 {
            return None;
        }
        Some(FinderPattern::new(center_x, center_y, (width + height) / 14.0))
    }

    /// Measure the 1:1:3:1:1 run through (x, y) along one axis.
    ///
    /// Returns the center coordinate on that axis and the total pattern width.
    fn measure_line(matrix: &BitMatrix, x: usize, y: usize, horizontal: bool) -> Option<(f32, f32)> {
        let (pos, limit) = if horizontal {
            (x, matrix.width())
        } else {
            (y, matrix.height())
        };
        let dark = |p: usize| {
            if horizontal {
                matrix.get(p, y)
            } else {
                matrix.get(x, p)
            }
        };
        if !dark(pos) {
            return None;
        }

        // Walk outward: center dark, light ring, dark ring
        let mut counts = [0usize; 5];
        let mut p = pos as isize;
        for (state, expect_dark) in [(2usize, true), (1, false), (0, true)] {
            while p >= 0 && dark(p as usize) == expect_dark {
                counts[state] += 1;
                p -= 1;
            }
            if counts[state] == 0 {
                return None;
            }
        }
        let start = (p + 1) as usize;

        let mut p = pos + 1;
        for (state, expect_dark) in [(2usize, true), (3, false), (4, true)] {
            while p < limit && dark(p) == expect_dark {
                counts[state] += 1;
                p += 1;
            }
            if state != 2 && counts[state] == 0 {
                return None;
            }
        }

        if !Self::quick_ratio_check(&counts) || !Self::ratio_matches(&counts) {
            return None;
        }

        let center = (start + counts[0] + counts[1]) as f32 + counts[2] as f32 / 2.0;
        Some((center, counts.iter().sum::<usize>() as f32))
    }
}

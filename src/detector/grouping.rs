/// Grouping of finder patterns into candidate QR symbols
use super::finder::FinderPattern;
use crate::models::{Point, Version};

/// Only the strongest finders take part in triple search
const MAX_FINDERS: usize = 12;
/// Candidate symbols handed to the decoder
const MAX_CANDIDATES: usize = 6;

/// Three ordered finder centers believed to belong to one symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolLocation {
    /// Finder at the right-angle corner
    pub top_left: Point,
    /// Finder along the first row
    pub top_right: Point,
    /// Finder along the first column
    pub bottom_left: Point,
    /// Module width in pixels, averaged over both arms
    pub module_size: f32,
    /// Symbol side length in modules estimated from finder spacing
    pub dimension: usize,
    score: f32,
}

impl SymbolLocation {
    /// Lower is a more plausible symbol
    pub fn score(&self) -> f32 {
        self.score
    }
}

/// Plausible symbols from detected finders, best first
pub fn group_finder_patterns(patterns: &[FinderPattern]) -> Vec<SymbolLocation> {
    let pool = &patterns[..patterns.len().min(MAX_FINDERS)];
    let mut locations = Vec::new();

    for i in 0..pool.len() {
        for j in i + 1..pool.len() {
            for k in j + 1..pool.len() {
                if let Some(location) = order_finder_patterns(&pool[i], &pool[j], &pool[k]) {
                    locations.push(location);
                }
            }
        }
    }

    locations.sort_by(|a, b| a.score.total_cmp(&b.score));
    locations.truncate(MAX_CANDIDATES);
    log::debug!("{} finders grouped into {} symbol candidates", pool.len(), locations.len());
    locations
}

/// Identify the right-angle corner and orient the other two finders clockwise
fn order_finder_patterns(a: &FinderPattern, b: &FinderPattern, c: &FinderPattern) -> Option<SymbolLocation> {
    let patterns = [a, b, c];

    let sizes = patterns.map(|p| p.module_size);
    let min_size = sizes.iter().copied().fold(f32::INFINITY, f32::min);
    let max_size = sizes.iter().copied().fold(0.0f32, f32::max);
    if min_size < 1.0 || max_size / min_size > 1.5 {
        return None;
    }

    // The corner finder sees the other two at the angle closest to 90 degrees
    let corner_cos = |i: usize| {
        let p = patterns[i].center;
        let p1 = patterns[(i + 1) % 3].center;
        let p2 = patterns[(i + 2) % 3].center;
        let (v1x, v1y) = (p1.x - p.x, p1.y - p.y);
        let (v2x, v2y) = (p2.x - p.x, p2.y - p.y);
        let denom = (v1x * v1x + v1y * v1y).sqrt() * (v2x * v2x + v2y * v2y).sqrt();
        if denom == 0.0 {
            f32::INFINITY
        } else {
            ((v1x * v2x + v1y * v2y) / denom).abs()
        }
    };
    let best_idx = (0..3).min_by(|&i, &j| corner_cos(i).total_cmp(&corner_cos(j)))?;
    let best_cos = corner_cos(best_idx);
    if best_cos > 0.3 {
        return None;
    }

    let tl = patterns[best_idx];
    let p1 = patterns[(best_idx + 1) % 3];
    let p2 = patterns[(best_idx + 2) % 3];

    // Image y grows downward, so a positive cross product means p1 is clockwise of p2
    let cross = (p1.center.x - tl.center.x) * (p2.center.y - tl.center.y)
        - (p1.center.y - tl.center.y) * (p2.center.x - tl.center.x);
    let (tr, bl) = if cross > 0.0 { (p1, p2) } else { (p2, p1) };

    let avg_module = sizes.iter().sum::<f32>() / 3.0;
    let d_tr = tl.center.distance(&tr.center);
    let d_bl = tl.center.distance(&bl.center);
    let arm_ratio = d_tr.max(d_bl) / d_tr.min(d_bl).max(f32::EPSILON);
    if arm_ratio > 1.4 {
        return None;
    }

    let dim1 = estimate_dimension_from_distance(d_tr, avg_module)?;
    let dim2 = estimate_dimension_from_distance(d_bl, avg_module)?;
    let dimension = if dim1 == dim2 {
        dim1
    } else if dim1.abs_diff(dim2) <= 4 {
        Version::from_size((dim1 + dim2) / 2)
            .map(|v| v.size())
            .unwrap_or(dim1.min(dim2))
    } else {
        return None;
    };

    let module_size = (d_tr + d_bl) / 2.0 / (dimension as f32 - 7.0);
    if !(0.75..=1.25).contains(&(module_size / avg_module)) {
        return None;
    }

    let hits = (a.hits + b.hits + c.hits) as f32;
    let score = (max_size / min_size) * 2.0 + arm_ratio + best_cos - hits.ln_1p() * 0.1;

    Some(SymbolLocation {
        top_left: tl.center,
        top_right: tr.center,
        bottom_left: bl.center,
        module_size,
        dimension,
        score,
    })
}

/// Nearest valid symbol size for a finder-to-finder center distance
pub fn estimate_dimension_from_distance(distance: f32, module_size: f32) -> Option<usize> {
    if module_size <= 0.0 {
        return None;
    }
    let raw_dim = distance / module_size + 7.0;
    if raw_dim < 19.0 {
        return None;
    }
    let version = ((raw_dim - 17.0) / 4.0).round().max(1.0) as u8;
    Version::new(version).map(|v| v.size())
}

/// Mask selection by the four standard penalty rules
use rayon::prelude::*;

use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::unmask::apply_mask;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Finder-like run with four light modules on one side
const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// Apply each of the eight masks (with matching format info) and keep the
/// lowest-penalty result; ties go to the lower mask id
pub fn choose_mask(base: &BitMatrix, func: &FunctionMask, ec_level: ECLevel) -> (MaskPattern, BitMatrix) {
    let candidates: Vec<(u32, MaskPattern, BitMatrix)> = MaskPattern::all()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|mask| {
            let masked = masked_symbol(base, func, ec_level, mask);
            (penalty_score(&masked), mask, masked)
        })
        .collect();

    candidates
        .into_iter()
        .min_by_key(|(score, mask, _)| (*score, mask.id()))
        .map(|(score, mask, matrix)| {
            log::trace!("mask {} chosen with penalty {score}", mask.id());
            (mask, matrix)
        })
        .unwrap_or_else(|| {
            let mask = MaskPattern::default();
            (mask, masked_symbol(base, func, ec_level, mask))
        })
}

/// `base` with `mask` applied to its data modules and the format word written
pub fn masked_symbol(base: &BitMatrix, func: &FunctionMask, ec_level: ECLevel, mask: MaskPattern) -> BitMatrix {
    let mut matrix = base.clone();
    apply_mask(&mut matrix, mask, func);
    FormatInfo {
        ec_level,
        mask_pattern: mask,
    }
    .place(&mut matrix);
    matrix
}

/// Total penalty of a finished symbol; lower reads more reliably
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let rows = (0..size).map(|y| (0..size).map(|x| matrix.get(x, y)).collect::<Vec<_>>());
    let cols = (0..size).map(|x| (0..size).map(|y| matrix.get(x, y)).collect::<Vec<_>>());

    let mut score = 0;
    for line in rows.chain(cols) {
        score += run_penalty(&line) + finder_like_penalty(&line);
    }
    score + block_penalty(matrix) + balance_penalty(matrix)
}

/// N1: five or more same-colored modules in a row
fn run_penalty(line: &[bool]) -> u32 {
    line.chunk_by(|a, b| a == b)
        .filter(|run| run.len() >= 5)
        .map(|run| PENALTY_N1 + (run.len() - 5) as u32)
        .sum()
}

/// N2: each 2x2 block of one color
fn block_penalty(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = matrix.get(x, y);
            if matrix.get(x + 1, y) == c && matrix.get(x, y + 1) == c && matrix.get(x + 1, y + 1) == c {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// N3: 1:1:3:1:1 patterns flanked by four light modules; the quiet zone counts as light
fn finder_like_penalty(line: &[bool]) -> u32 {
    let mut padded = vec![false; 4];
    padded.extend_from_slice(line);
    padded.extend_from_slice(&[false; 4]);

    let forward = padded.windows(11).filter(|w| w[..] == FINDER_LIKE[..]).count();
    let backward = padded
        .windows(11)
        .filter(|w| w.iter().rev().eq(FINDER_LIKE.iter()))
        .count();
    (forward + backward) as u32 * PENALTY_N3
}

/// N4: deviation of the dark ratio from 50%, in 5% steps
fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = (matrix.width() * matrix.height()) as i64;
    if total == 0 {
        return 0;
    }
    let dark = matrix.count_dark() as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    k.max(0) as u32 * PENALTY_N4
}

//! QR symbol location in binarized images
//!
//! - Finder pattern detection (the three square markers)
//! - Grouping finders into oriented symbol candidates
//! - Alignment pattern search for perspective refinement
//! - Module grid sampling through the resulting transform

/// Alignment pattern search for QR versions 2+
pub mod alignment;
/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
/// Finder triples ordered into symbol candidates
pub mod grouping;
/// Sample grid extraction and perspective correction
pub mod transform;

use crate::models::BitMatrix;
pub use finder::{FinderDetector, FinderPattern};
pub use grouping::SymbolLocation;

/// Candidate symbols in `matrix`, most plausible first
pub fn locate(matrix: &BitMatrix) -> Vec<SymbolLocation> {
    let finders = FinderDetector::detect(matrix);
    if finders.len() < 3 {
        log::debug!("only {} finder patterns found", finders.len());
        return Vec::new();
    }
    grouping::group_finder_patterns(&finders)
}

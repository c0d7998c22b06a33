/// Data masking. XOR is its own inverse, so the same pass masks and unmasks.
use crate::decoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Toggle every data module the mask pattern selects
pub fn apply_mask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask_pattern.is_masked(x, y) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Function pattern drawing and data placement for a fresh symbol
use crate::decoder::bitstream::data_module_order;
use crate::decoder::function_mask::{FunctionMask, alignment_centers};
use crate::models::{BitMatrix, Version};

/// Symbol with finders, separators, timing and alignment patterns drawn.
///
/// Format and version areas stay light until the mask is known.
pub fn draw_function_patterns(version: Version) -> BitMatrix {
    let size = version.size();
    let mut matrix = BitMatrix::square(size);

    for i in 0..size {
        let dark = i % 2 == 0;
        matrix.set(6, i, dark);
        matrix.set(i, 6, dark);
    }

    draw_finder(&mut matrix, 3, 3);
    draw_finder(&mut matrix, size - 4, 3);
    draw_finder(&mut matrix, 3, size - 4);

    for (cx, cy) in alignment_centers(version) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let x = cx.wrapping_add_signed(dx);
                let y = cy.wrapping_add_signed(dy);
                matrix.set(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    matrix
}

/// 7x7 finder centered on (cx, cy) plus its light separator, clipped to the symbol
fn draw_finder(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    let size = matrix.width() as isize;
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let (x, y) = (cx as isize + dx, cy as isize + dy);
            if (0..size).contains(&x) && (0..size).contains(&y) {
                let ring = dx.abs().max(dy.abs());
                matrix.set(x as usize, y as usize, ring != 2 && ring != 4);
            }
        }
    }
}

/// Write `codewords` MSB-first along the zig-zag; remainder modules stay light
pub fn place_codewords(matrix: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) {
    let bits = codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1));
    for ((x, y), bit) in data_module_order(func).into_iter().zip(bits) {
        matrix.set(x, y, bit);
    }
}

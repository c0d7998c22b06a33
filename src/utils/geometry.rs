/// Perspective mapping between module-grid coordinates and image pixels
use crate::models::Point;

/// Perspective transformation matrix (3x3, bottom-right element fixed to 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    m: [f64; 8],
}

impl PerspectiveTransform {
    /// Transform mapping each `src[i]` onto `dst[i]`.
    ///
    /// `None` when three of the points are collinear.
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for (i, (s, d)) in src.iter().zip(dst).enumerate() {
            let (sx, sy) = (f64::from(s.x), f64::from(s.y));
            let (dx, dy) = (f64::from(d.x), f64::from(d.y));
            a[2 * i] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[2 * i] = dx;
            a[2 * i + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[2 * i + 1] = dy;
        }

        solve_linear_system(a, b).map(|m| Self { m })
    }

    /// Affine transform fixed by three correspondences; the fourth corner is
    /// completed as a parallelogram
    pub fn from_three_points(src: &[Point; 3], dst: &[Point; 3]) -> Option<Self> {
        let complete = |p: &[Point; 3]| Point::new(p[1].x + p[2].x - p[0].x, p[1].y + p[2].y - p[0].y);
        Self::from_points(
            &[src[0], src[1], src[2], complete(src)],
            &[dst[0], dst[1], dst[2], complete(dst)],
        )
    }

    /// Transform a point using this perspective matrix
    pub fn transform(&self, p: &Point) -> Point {
        let m = &self.m;
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        let denominator = m[6] * x + m[7] * y + 1.0;
        if denominator.abs() < 1e-12 {
            return Point::new(f32::NAN, f32::NAN);
        }
        Point::new(
            ((m[0] * x + m[1] * y + m[2]) / denominator) as f32,
            ((m[3] * x + m[4] * y + m[5]) / denominator) as f32,
        )
    }
}

/// Solve an 8x8 linear system by Gaussian elimination with partial pivoting
fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    const N: usize = 8;

    for col in 0..N {
        let pivot = (col..N).max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..N {
            let factor = a[row][col] / a[col][col];
            b[row] -= factor * b[col];
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = [0.0f64; N];
    for row in (0..N).rev() {
        let tail: f64 = (row + 1..N).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

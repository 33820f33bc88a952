//! 3x3 matrix math for colorimetry.
//!
//! Only what camera-to-XYZ conversion needs: products, inversion and the
//! Bradford chromatic adaptation between white points.

use std::ops::Mul;

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f32; 3]; 3]);

/// CIE Standard Illuminant D65, Y normalized to 1.
pub const D65: [f32; 3] = [0.95047, 1.0, 1.08883];

/// CIE Standard Illuminant D50, Y normalized to 1.
pub const D50: [f32; 3] = [0.96422, 1.0, 0.82521];

/// Bradford cone response matrix (Lam, 1985).
pub const BRADFORD: Mat3 = Mat3([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// XYZ (D65) to linear sRGB.
pub const XYZ_TO_SRGB: Mat3 = Mat3([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);

const SINGULAR_EPSILON: f32 = 1e-9;

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn diagonal(a: f32, b: f32, c: f32) -> Mat3 {
        Mat3([[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]])
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse by cofactors; `None` for singular or non-finite input.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let m = &self.0;
        let inv_det = 1.0 / det;
        Some(Mat3([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    pub fn scaled(&self, factor: f32) -> Mat3 {
        Mat3(self.0.map(|row| row.map(|v| v * factor)))
    }

    #[inline]
    pub fn transform(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [[0.0f32; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[r][k] * rhs.0[k][c]).sum();
            }
        }
        Mat3(out)
    }
}

/// Chromatic adaptation matrix taking XYZ under `src_white` to XYZ under `dst_white`.
pub fn adapt_matrix(method: Mat3, src_white: [f32; 3], dst_white: [f32; 3]) -> Mat3 {
    let method_inv = method.inverse().unwrap_or(Mat3::IDENTITY);
    let src_cone = method.transform(src_white);
    let dst_cone = method.transform(dst_white);
    let scale = Mat3::diagonal(
        dst_cone[0] / src_cone[0],
        dst_cone[1] / src_cone[1],
        dst_cone[2] / src_cone[2],
    );
    method_inv * scale * method
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_inverse_round_trips_to_identity() {
        let product = BRADFORD * BRADFORD.inverse().unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(product.0[r][c], expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        assert!(Mat3([[0.0; 3]; 3]).inverse().is_none());
        assert!(Mat3([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]).inverse().is_none());
        assert!(Mat3([[f32::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]).inverse().is_none());
    }

    #[test]
    fn test_bradford_maps_d65_white_to_d50() {
        let adapted = adapt_matrix(BRADFORD, D65, D50).transform(D65);
        for i in 0..3 {
            assert_abs_diff_eq!(adapted[i], D50[i], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_xyz_to_srgb_maps_d65_to_unit_rgb() {
        let rgb = XYZ_TO_SRGB.transform(D65);
        for v in rgb {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-3);
        }
    }
}

//! As-shot white balance normalization and color temperature estimation.

use crate::image_pipeline::color::CameraToXyz;

/// McCamy's approximation loses meaning outside roughly this range.
const CCT_RANGE_KELVIN: (f32, f32) = (1000.0, 25000.0);

/// Largest distance from the Planckian locus, in CIE 1960 uv, that still has a
/// correlated color temperature.
const MAX_DUV: f64 = 0.05;

/// Normalizes engine coefficients so that green is exactly 1.0.
/// Returns `None` when any coefficient is missing (NaN), zero or negative.
pub fn normalize_wb(coeffs: [f32; 3]) -> Option<[f32; 3]> {
    if !coeffs.iter().all(|c| c.is_finite() && *c > 0.0) {
        return None;
    }
    let [r, g, b] = coeffs;
    Some([r / g, 1.0, b / g])
}

/// Estimates the correlated color temperature of the light the camera was
/// white balanced for: the camera neutral `1 / wb` is taken to XYZ and its
/// chromaticity run through McCamy's cubic.
pub fn estimate_color_temperature(wb: [f32; 3], transform: &CameraToXyz) -> Option<f32> {
    if !transform.is_calibrated() {
        return None;
    }
    let neutral = wb.map(|gain| 1.0 / gain);
    let [x, y, z] = transform.camera_to_xyz_d65(neutral);
    let sum = x + y + z;
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    mccamy_cct(x / sum, y / sum)
}

/// Correlated color temperature from CIE 1931 xy chromaticity (McCamy, 1992).
///
/// `None` outside 1000 to 25000 K, and for chromaticities farther than
/// [`MAX_DUV`] from the Planckian locus, where no temperature describes the
/// light.
pub fn mccamy_cct(x: f32, y: f32) -> Option<f32> {
    let denom = 0.1858 - y;
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let n = (x - 0.3320) / denom;
    let cct = 449.0 * n.powi(3) + 3525.0 * n.powi(2) + 6823.3 * n + 5520.33;
    if !cct.is_finite() || !(CCT_RANGE_KELVIN.0..=CCT_RANGE_KELVIN.1).contains(&cct) {
        return None;
    }
    (planckian_duv(f64::from(x), f64::from(y), f64::from(cct))? <= MAX_DUV).then_some(cct)
}

/// Distance in CIE 1960 uv between `(x, y)` and the blackbody at `kelvin`.
fn planckian_duv(x: f64, y: f64, kelvin: f64) -> Option<f64> {
    let d = -2.0 * x + 12.0 * y + 3.0;
    if d.abs() < f64::EPSILON {
        return None;
    }
    let (u, v) = (4.0 * x / d, 6.0 * y / d);
    let (locus_u, locus_v) = planckian_uv(kelvin);
    Some((u - locus_u).hypot(v - locus_v))
}

/// Krystek's rational fit of the Planckian locus in CIE 1960 uv.
fn planckian_uv(t: f64) -> (f64, f64) {
    let t2 = t * t;
    let u = (0.860117757 + 1.54118254e-4 * t + 1.28641212e-7 * t2) / (1.0 + 8.42420235e-4 * t + 7.08145163e-7 * t2);
    let v = (0.317398726 + 4.22806245e-5 * t + 4.20481691e-8 * t2) / (1.0 - 2.89741816e-5 * t + 1.61456053e-7 * t2);
    (u, v)
}

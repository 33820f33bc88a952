//! Camera RGB to CIE XYZ (D50) conversion.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::image_pipeline::color::matrix::{BRADFORD, D50, D65, Mat3, XYZ_TO_SRGB, adapt_matrix};
use crate::image_pipeline::common::{Result, try_zeroed_vec};
use crate::image_pipeline::debayer::CameraRgbImage;

const FULL_SCALE: f32 = u16::MAX as f32;

/// Linear map from normalized camera RGB to XYZ.
///
/// The camera matrix is scaled so that a D65-lit white which just saturates
/// the camera's strongest channel lands on Y = 1.0.
#[derive(Debug, Clone, Copy)]
pub struct CameraToXyz {
    to_d65: Mat3,
    to_d50: Mat3,
    calibrated: bool,
}

impl CameraToXyz {
    /// Builds the transform from the engine's XYZ(D65)-to-camera matrix.
    /// Missing or singular matrices fall back to treating camera RGB as linear sRGB.
    pub fn from_xyz_to_cam(xyz_to_cam: [[f32; 3]; 3]) -> Self {
        Self::from_matrix(Mat3(xyz_to_cam)).unwrap_or_else(|| {
            warn!("Camera color matrix unavailable, assuming linear sRGB primaries");
            let mut fallback = Self::from_matrix(XYZ_TO_SRGB).unwrap_or(Self::identity());
            fallback.calibrated = false;
            fallback
        })
    }

    fn from_matrix(xyz_to_cam: Mat3) -> Option<Self> {
        let neutral = xyz_to_cam.transform(D65);
        let peak = neutral.iter().copied().fold(f32::MIN, f32::max);
        if !peak.is_finite() || peak <= 0.0 {
            return None;
        }
        let to_d65 = xyz_to_cam.inverse()?.scaled(peak);
        if !to_d65.is_finite() {
            return None;
        }
        let to_d50 = adapt_matrix(BRADFORD, D65, D50) * to_d65;
        debug!(?to_d50, "Camera to XYZ(D50) matrix");
        Some(Self { to_d65, to_d50, calibrated: true })
    }

    fn identity() -> Self {
        Self { to_d65: Mat3::IDENTITY, to_d50: Mat3::IDENTITY, calibrated: false }
    }

    /// False when the fallback primaries are in use.
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Camera RGB (unit range) to XYZ under the camera's D65 calibration, unadapted.
    pub fn camera_to_xyz_d65(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.to_d65.transform(rgb)
    }

    pub fn camera_to_xyz_d50(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.to_d50.transform(rgb)
    }

    /// Converts a whole image into interleaved fixed-point XYZ(D50), clamped to [0, 1].
    pub fn apply(&self, image: &CameraRgbImage) -> Result<Vec<u16>> {
        let row_len = image.width * 3;
        let mut out = try_zeroed_vec::<u16>(image.data.len())?;
        if row_len == 0 {
            return Ok(out);
        }

        out.par_chunks_mut(row_len)
            .zip(image.data.par_chunks(row_len))
            .for_each(|(dst_row, src_row)| {
                for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
                    let rgb = [
                        f32::from(src[0]) / FULL_SCALE,
                        f32::from(src[1]) / FULL_SCALE,
                        f32::from(src[2]) / FULL_SCALE,
                    ];
                    let xyz = self.to_d50.transform(rgb);
                    for (d, v) in dst.iter_mut().zip(xyz) {
                        *d = (v.clamp(0.0, 1.0) * FULL_SCALE).round() as u16;
                    }
                }
            });

        Ok(out)
    }
}

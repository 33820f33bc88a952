//! Camera metadata types

/// Gains reported when the file carries no usable as-shot white balance.
pub const UNIT_WB: [f32; 3] = [1.0, 1.0, 1.0];

/// Exposure and white-balance metadata shipped alongside the XYZ pixels.
///
/// None of it is applied to the pixel data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMetadata {
    /// DNG BaselineExposure in EV, `None` when the file has no such tag
    pub baseline_exposure: Option<f32>,
    /// As-shot white balance gains (R, G, B) with green exactly 1.0
    pub wb_multipliers: [f32; 3],
    /// Correlated color temperature of the as-shot white in Kelvin, `None` when it cannot be estimated
    pub color_temperature: Option<f32>,
}

impl Default for CameraMetadata {
    fn default() -> Self {
        Self {
            baseline_exposure: None,
            wb_multipliers: UNIT_WB,
            color_temperature: None,
        }
    }
}

impl CameraMetadata {
    pub fn has_baseline_exposure(&self) -> bool {
        self.baseline_exposure.is_some()
    }
}

//! Camera metadata module
//!
//! Exposure and white-balance information is gathered independently of the
//! pixel path: BaselineExposure straight from the container's tags, white
//! balance and color temperature from what the engine reports.

mod dng;
mod types;
mod white_balance;

pub use dng::{BASELINE_EXPOSURE_TAG, read_baseline_exposure};
pub use types::{CameraMetadata, UNIT_WB};
pub use white_balance::{estimate_color_temperature, mccamy_cct, normalize_wb};

use tracing::debug;

use crate::image_pipeline::color::CameraToXyz;
use crate::image_pipeline::raw::{RawImageData, detect_container};

/// Collects the metadata for one file. Missing tags degrade to the defaults of
/// [`CameraMetadata`], never to an error.
pub fn read_metadata(file_data: &[u8], raw_image: &RawImageData, transform: &CameraToXyz) -> CameraMetadata {
    let baseline_exposure = match detect_container(file_data) {
        Some(container) if container.is_tiff_based() => read_baseline_exposure(file_data),
        _ => None,
    };

    let (wb_multipliers, color_temperature) = match normalize_wb(raw_image.wb_coeffs) {
        Some(wb) => (wb, estimate_color_temperature(wb, transform)),
        None => {
            debug!("No as-shot white balance, reporting unit gains");
            (UNIT_WB, None)
        }
    };

    CameraMetadata {
        baseline_exposure,
        wb_multipliers,
        color_temperature,
    }
}

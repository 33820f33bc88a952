//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (ARW, CR2, NEF, DNG, etc.)
//! using the rawloader library. It decodes the sensor data and extracts the levels, CFA layout,
//! white balance and color matrix the rest of the pipeline needs.

use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{
    ActiveArea, BayerPattern, CfaColor, RawImageData, SensorLayout,
};

/// RAW image reader that uses the rawloader library for decoding.
///
/// rawloader's camera database is built once and never mutated, so a single
/// reader can be shared between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawLoaderReader;

/// Rows and columns checked when verifying that a CFA repeats every 2 photosites.
const CFA_PERIOD_CHECK: usize = 6;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// This method:
    /// 1. Decodes the RAW file using rawloader, catching engine panics
    /// 2. Converts float data (normalized 0.0-1.0) to the u16 range
    /// 3. Resolves the CFA into a 2x2 Bayer tile, or RGB for linear DNGs
    /// 4. Translates rawloader's crops into an active area
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use raw_xyz_bridge::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let raw_bytes = std::fs::read("image.arw").unwrap();
    /// let image_data = RawLoaderReader.read_raw(&raw_bytes).unwrap();
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = panic::catch_unwind(AssertUnwindSafe(|| {
            rawloader::decode(&mut Cursor::new(data))
        }))
        .map_err(|payload| ConversionError::EnginePanic(panic_message(payload.as_ref())))?
        .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        let cpp = decoded.cpp;

        debug!(
            make = %decoded.clean_make,
            model = %decoded.clean_model,
            cpp,
            "Decoded image: {}x{}", width, height
        );

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let layout = match cpp {
            1 => SensorLayout::Bayer(bayer_pattern(&decoded.cfa)?),
            3 => SensorLayout::Rgb,
            other => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{} components per pixel",
                    other
                )));
            }
        };

        let (data, black_levels, white_levels) = match decoded.data {
            RawloaderImageData::Integer(values) => (
                values,
                first_three(decoded.blacklevels),
                first_three(decoded.whitelevels),
            ),
            // Float data is already normalized, so its levels become the full u16 range
            RawloaderImageData::Float(values) => (
                values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16)
                    .collect(),
                [0; 3],
                [u16::MAX; 3],
            ),
        };

        let expected = width * height * cpp;
        if data.len() < expected {
            return Err(ConversionError::DecodeError(format!(
                "truncated sensor data: {} of {} samples",
                data.len(),
                expected
            )));
        }

        let wb = decoded.wb_coeffs;
        let xyz_to_cam = [
            decoded.xyz_to_cam[0],
            decoded.xyz_to_cam[1],
            decoded.xyz_to_cam[2],
        ];

        Ok(RawImageData {
            width,
            height,
            layout,
            data,
            black_levels,
            white_levels,
            wb_coeffs: [wb[0], wb[1], wb[2]],
            xyz_to_cam,
            active_area: active_area(decoded.crops, width, height),
            make: decoded.clean_make,
            model: decoded.clean_model,
        })
    }
}

fn first_three(levels: [u16; 4]) -> [u16; 3] {
    [levels[0], levels[1], levels[2]]
}

/// Resolves rawloader's CFA into a 2x2 tile. X-Trans and four-color sensors are rejected.
fn bayer_pattern(cfa: &rawloader::CFA) -> Result<BayerPattern> {
    let color = |row: usize, col: usize| -> Result<CfaColor> {
        match cfa.color_at(row, col) {
            0 => Ok(CfaColor::Red),
            1 => Ok(CfaColor::Green),
            2 => Ok(CfaColor::Blue),
            other => Err(ConversionError::UnsupportedFormat(format!(
                "CFA color index {} at ({}, {})",
                other, row, col
            ))),
        }
    };

    let pattern = BayerPattern([color(0, 0)?, color(0, 1)?, color(1, 0)?, color(1, 1)?]);

    for row in 0..CFA_PERIOD_CHECK {
        for col in 0..CFA_PERIOD_CHECK {
            if color(row, col)? != pattern.color_at(row, col) {
                return Err(ConversionError::UnsupportedFormat(
                    "non-Bayer color filter array".to_string(),
                ));
            }
        }
    }

    match pattern {
        BayerPattern::RGGB | BayerPattern::BGGR | BayerPattern::GRBG | BayerPattern::GBRG => {
            Ok(pattern)
        }
        _ => Err(ConversionError::UnsupportedFormat(format!(
            "CFA tile {:?}",
            pattern.0
        ))),
    }
}

/// rawloader crops are `[top, right, bottom, left]` margins.
fn active_area(crops: [usize; 4], width: usize, height: usize) -> Option<ActiveArea> {
    let [top, right, bottom, left] = crops;
    if crops == [0; 4] || left + right >= width || top + bottom >= height {
        return None;
    }
    Some(ActiveArea {
        top,
        left,
        width: width - left - right,
        height: height - top - bottom,
    })
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

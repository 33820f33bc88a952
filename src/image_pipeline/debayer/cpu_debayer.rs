use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::image_pipeline::common::{ConversionError, Result, try_zeroed_vec};
use crate::image_pipeline::config::DemosaicAlgorithm;
use crate::image_pipeline::debayer::CameraRgbImage;
use crate::image_pipeline::raw::{ActiveArea, BayerPattern, RawImageData, SensorLayout};

const FULL_SCALE: f32 = u16::MAX as f32;

pub struct CpuDebayer {
    algorithm: DemosaicAlgorithm,
}

impl CpuDebayer {
    pub fn new(algorithm: DemosaicAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Normalizes levels, crops to `area` and interpolates missing colors.
    /// White balance is not applied.
    pub fn process(&self, raw_image: &RawImageData, area: Option<ActiveArea>) -> Result<CameraRgbImage> {
        let area = area.unwrap_or(ActiveArea {
            top: 0,
            left: 0,
            width: raw_image.width,
            height: raw_image.height,
        });
        let normalized = normalize_levels(raw_image, &area)?;

        match raw_image.layout {
            SensorLayout::Rgb => Ok(CameraRgbImage {
                width: area.width,
                height: area.height,
                data: normalized,
            }),
            SensorLayout::Bayer(pattern) => {
                let pattern = pattern.shifted(area.top, area.left);
                self.demosaic(&normalized, area.width, area.height, pattern)
            }
        }
    }

    fn demosaic(&self, mosaic: &[u16], width: usize, height: usize, pattern: BayerPattern) -> Result<CameraRgbImage> {
        let cfa = bayer_cfa(pattern)?;
        let algorithm = match self.algorithm {
            DemosaicAlgorithm::NearestNeighbour => Demosaic::NearestNeighbour,
            DemosaicAlgorithm::Linear => Demosaic::Linear,
            DemosaicAlgorithm::Cubic => Demosaic::Cubic,
        };
        debug!("Running demosaic {}x{}, CFA={:?}, algo={:?}", width, height, pattern.0, self.algorithm);

        let bayer_bytes: Vec<u8> = mosaic.iter().flat_map(|&val| val.to_le_bytes()).collect();
        let mut output_buf = try_zeroed_vec::<u8>(width * height * 3 * 2)?;
        {
            let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
            bayer::run_demosaic(
                &mut Cursor::new(&bayer_bytes[..]),
                BayerDepth::Depth16LE,
                cfa,
                algorithm,
                &mut output_raster,
            )
            .map_err(|e| ConversionError::DemosaicError(format!("{:?}", e)))?;
        }

        // The raster stores samples in native byte order
        let data = output_buf
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect();

        Ok(CameraRgbImage { width, height, data })
    }
}

fn bayer_cfa(pattern: BayerPattern) -> Result<CFA> {
    match pattern {
        BayerPattern::RGGB => Ok(CFA::RGGB),
        BayerPattern::BGGR => Ok(CFA::BGGR),
        BayerPattern::GRBG => Ok(CFA::GRBG),
        BayerPattern::GBRG => Ok(CFA::GBRG),
        other => Err(ConversionError::UnsupportedFormat(format!("CFA tile {:?}", other.0))),
    }
}

/// Black-subtracts and scales every sample of `area` so that each channel's
/// white level lands on 65535.
fn normalize_levels(raw_image: &RawImageData, area: &ActiveArea) -> Result<Vec<u16>> {
    let channels = raw_image.channels();
    let scale: [f32; 3] = std::array::from_fn(|c| {
        let range = raw_image.white_levels[c].saturating_sub(raw_image.black_levels[c]);
        FULL_SCALE / f32::from(range.max(1))
    });
    let black: [f32; 3] = raw_image.black_levels.map(f32::from);

    let mut out = try_zeroed_vec::<u16>(area.width * area.height * channels)?;
    let row_len = area.width * channels;

    for (y, out_row) in out.chunks_exact_mut(row_len).enumerate() {
        let row = area.top + y;
        let start = (row * raw_image.width + area.left) * channels;
        let src_row = &raw_image.data[start..start + row_len];

        for (i, (dst, &src)) in out_row.iter_mut().zip(src_row).enumerate() {
            let channel = match raw_image.layout {
                SensorLayout::Rgb => i % 3,
                SensorLayout::Bayer(pattern) => pattern.color_at(row, area.left + i).index(),
            };
            let value = (f32::from(src) - black[channel]).max(0.0) * scale[channel];
            *dst = value.min(FULL_SCALE).round() as u16;
        }
    }

    Ok(out)
}

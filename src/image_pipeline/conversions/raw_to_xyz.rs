use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    color::CameraToXyz,
    common::error::{ConversionError, Result},
    config::DecodeConfig,
    debayer::CpuDebayer,
    metadata,
    raw::{ActiveArea, RawImageData, RawImageReader, RawLoaderReader, detect_container, panic_message},
    result::{DecodeResult, XyzImage},
};

/// Drives a RAW engine and turns its output into linear XYZ (D50).
///
/// Holds no per-call state; one pipeline can serve concurrent decodes.
pub struct RawToXyzPipeline<R: RawImageReader = RawLoaderReader> {
    reader: R,
    config: DecodeConfig,
}

impl RawToXyzPipeline<RawLoaderReader> {
    pub fn new() -> Self {
        Self::with_config(DecodeConfig::default())
    }

    pub fn with_config(config: DecodeConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            config,
        }
    }
}

impl Default for RawToXyzPipeline<RawLoaderReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RawImageReader> RawToXyzPipeline<R> {
    pub fn with_custom(reader: R, config: DecodeConfig) -> Self {
        Self { reader, config }
    }

    /// Rejects engine output the later stages cannot index safely.
    fn check_layout(&self, raw_image: &RawImageData) -> Result<()> {
        let expected = raw_image.width * raw_image.height * raw_image.channels();
        if raw_image.width == 0 || raw_image.height == 0 || raw_image.data.len() < expected {
            return Err(ConversionError::InvalidDimensions(raw_image.width, raw_image.height));
        }
        Ok(())
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn active_area(&self, raw_image: &RawImageData) -> Option<ActiveArea> {
        if !self.config.crop_to_active_area {
            return None;
        }
        raw_image.active_area.filter(|area| {
            area.width > 0
                && area.height > 0
                && area.left + area.width <= raw_image.width
                && area.top + area.height <= raw_image.height
        })
    }

    /// Decodes an in-memory RAW file, propagating the first failure.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8]) -> Result<XyzImage> {
        if input_data.is_empty() {
            return Err(ConversionError::InputReadError("input is empty".to_string()));
        }
        let container = detect_container(input_data);
        info!(?container, "Starting RAW to XYZ conversion");

        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            match self.reader.read_raw(input_data) {
                Ok(raw_image) => raw_image,
                Err(ConversionError::DecodeError(msg)) if container.is_none() => {
                    return Err(ConversionError::UnrecognizedContainer(msg));
                }
                Err(e) => return Err(e),
            }
        };

        let area = {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.check_layout(&raw_image)?;
            let area = self.active_area(&raw_image);
            let (width, height) = area.map_or((raw_image.width, raw_image.height), |a| (a.width, a.height));
            self.validate_dimensions(width, height)?;
            area
        };

        let camera_rgb = {
            let _span = tracing::info_span!("demosaic").entered();
            CpuDebayer::new(self.config.demosaic).process(&raw_image, area)?
        };

        let transform = CameraToXyz::from_xyz_to_cam(raw_image.xyz_to_cam);
        let xyz = {
            let _span = tracing::info_span!("camera_to_xyz").entered();
            transform.apply(&camera_rgb)?
        };

        let camera_metadata = {
            let _span = tracing::info_span!("read_metadata").entered();
            metadata::read_metadata(input_data, &raw_image, &transform)
        };

        info!(
            make = %raw_image.make,
            model = %raw_image.model,
            width = camera_rgb.width,
            height = camera_rgb.height,
            "Conversion complete"
        );
        Ok(XyzImage::new(camera_rgb.width, camera_rgb.height, xyz, camera_metadata))
    }

    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<XyzImage> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Converting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.convert(&input_data)
    }

    /// Decodes a RAW file into a [`DecodeResult`]. Never panics: every failure,
    /// including a panic inside the engine, comes back as `DecodeResult::Failure`.
    pub fn decode<P: AsRef<Path>>(&self, input_path: P) -> DecodeResult {
        let input_path = input_path.as_ref();
        self.guarded(|| self.convert_file(input_path))
    }

    /// Same as [`decode`](Self::decode) for a file already in memory.
    pub fn decode_bytes(&self, input_data: &[u8]) -> DecodeResult {
        self.guarded(|| self.convert(input_data))
    }

    fn guarded(&self, op: impl FnOnce() -> Result<XyzImage>) -> DecodeResult {
        match panic::catch_unwind(AssertUnwindSafe(op)) {
            Ok(Ok(image)) => DecodeResult::Success(image),
            Ok(Err(e)) => {
                warn!(kind = ?e.kind(), "Decode failed: {}", e);
                DecodeResult::Failure(e.into())
            }
            Err(payload) => {
                let e = ConversionError::EnginePanic(panic_message(payload.as_ref()));
                warn!("Decode failed: {}", e);
                DecodeResult::Failure(e.into())
            }
        }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DecodeConfig) {
        self.config = config;
    }
}

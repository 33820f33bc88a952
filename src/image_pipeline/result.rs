//! Decode results and the ownership of their pixel buffers.
//!
//! A [`DecodeResult`] is either a success carrying an [`XyzImage`] or a
//! failure carrying a [`DecodeFailure`]. The pixel buffer belongs to the
//! result until [`release`] (or drop) consumes it, so a result can never be
//! released twice or read after release.

use crate::image_pipeline::common::{ConversionError, ErrorKind};
use crate::image_pipeline::metadata::{CameraMetadata, UNIT_WB};

/// Longest diagnostic message, in bytes, excluding the C terminator.
pub const MAX_ERROR_MESSAGE_LEN: usize = 255;

/// Samples per pixel in the output buffer (X, Y, Z).
pub const XYZ_CHANNELS: usize = 3;

/// Bytes per output sample.
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<u16>();

/// Linear CIE XYZ (D50) image, interleaved, row-major, fixed-point u16.
#[derive(Debug)]
pub struct XyzImage {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u16>,
    metadata: CameraMetadata,
}

impl XyzImage {
    pub(crate) fn new(width: usize, height: usize, data: Vec<u16>, metadata: CameraMetadata) -> Self {
        debug_assert_eq!(data.len(), width * height * XYZ_CHANNELS);
        Self {
            width,
            height,
            stride: width * XYZ_CHANNELS * BYTES_PER_SAMPLE,
            data,
            metadata,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Interleaved X, Y, Z samples; `value / 65535` is the linear tristimulus value.
    pub fn pixels(&self) -> &[u16] {
        &self.data
    }

    /// Size of the pixel buffer in bytes, always `height * stride`.
    pub fn byte_len(&self) -> usize {
        self.height * self.stride
    }

    pub fn metadata(&self) -> &CameraMetadata {
        &self.metadata
    }

    pub fn into_pixels(self) -> Vec<u16> {
        self.data
    }
}

/// Why a decode failed, with a bounded, never-empty message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    kind: ErrorKind,
    message: String,
}

impl DecodeFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message.push_str("unknown decode failure");
        }
        truncate_on_char_boundary(&mut message, MAX_ERROR_MESSAGE_LEN);
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ConversionError> for DecodeFailure {
    fn from(err: ConversionError) -> Self {
        DecodeFailure::new(err.kind(), err.to_string())
    }
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// Outcome of a decode call.
#[derive(Debug)]
#[must_use = "a DecodeResult owns its pixel buffer and must be checked for success"]
pub enum DecodeResult {
    Success(XyzImage),
    Failure(DecodeFailure),
}

impl DecodeResult {
    pub fn success(&self) -> bool {
        matches!(self, DecodeResult::Success(_))
    }

    pub fn image(&self) -> Option<&XyzImage> {
        match self {
            DecodeResult::Success(image) => Some(image),
            DecodeResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&DecodeFailure> {
        match self {
            DecodeResult::Success(_) => None,
            DecodeResult::Failure(failure) => Some(failure),
        }
    }

    /// 0 on failure.
    pub fn width(&self) -> usize {
        self.image().map_or(0, XyzImage::width)
    }

    /// 0 on failure.
    pub fn height(&self) -> usize {
        self.image().map_or(0, XyzImage::height)
    }

    /// 0 on failure.
    pub fn stride(&self) -> usize {
        self.image().map_or(0, XyzImage::stride)
    }

    pub fn pixel_data(&self) -> Option<&[u16]> {
        self.image().map(XyzImage::pixels)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(DecodeFailure::message)
    }

    pub fn metadata(&self) -> Option<&CameraMetadata> {
        self.image().map(XyzImage::metadata)
    }

    pub fn has_baseline_exposure(&self) -> bool {
        self.metadata().is_some_and(CameraMetadata::has_baseline_exposure)
    }

    /// BaselineExposure in EV, 0.0 when absent.
    pub fn baseline_exposure(&self) -> f32 {
        self.metadata().and_then(|m| m.baseline_exposure).unwrap_or(0.0)
    }

    /// Unit gains on failure or when the file carries none.
    pub fn wb_multipliers(&self) -> [f32; 3] {
        self.metadata().map_or(UNIT_WB, |m| m.wb_multipliers)
    }

    /// Kelvin, with 0.0 meaning "unknown".
    pub fn color_temperature(&self) -> f32 {
        self.metadata().and_then(|m| m.color_temperature).unwrap_or(0.0)
    }

    pub fn into_result(self) -> std::result::Result<XyzImage, DecodeFailure> {
        match self {
            DecodeResult::Success(image) => Ok(image),
            DecodeResult::Failure(failure) => Err(failure),
        }
    }

    /// Frees the pixel buffer. A no-op for failures.
    pub fn release(self) {
        drop(self);
    }
}

impl From<crate::image_pipeline::common::Result<XyzImage>> for DecodeResult {
    fn from(result: crate::image_pipeline::common::Result<XyzImage>) -> Self {
        match result {
            Ok(image) => DecodeResult::Success(image),
            Err(err) => DecodeResult::Failure(err.into()),
        }
    }
}

/// Releases a result returned by a decode call. Ownership makes a second
/// release or a later read a compile error.
pub fn release(result: DecodeResult) {
    result.release();
}

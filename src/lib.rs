//! Decode vendor RAW photos (DNG, ARW, CR2, NEF, ...) into linear CIE XYZ (D50)
//! pixel buffers plus the camera's exposure and white-balance metadata.
//!
//! ```no_run
//! let result = raw_xyz_bridge::decode("IMG_0001.DNG");
//! if let Some(image) = result.image() {
//!     println!("{}x{}, {} bytes per row", image.width(), image.height(), image.stride());
//! } else {
//!     eprintln!("{}", result.error_message().unwrap_or_default());
//! }
//! raw_xyz_bridge::release(result);
//! ```
//!
//! The same contract is exported to C through [`ffi`].

pub mod ffi;
pub mod image_pipeline;
pub mod logger;

use std::path::Path;

pub use image_pipeline::{
    CameraMetadata, DecodeConfig, DecodeFailure, DecodeResult, ErrorKind, RawToXyzPipeline, XyzImage,
    release,
};

/// Decodes the RAW file at `path` with the default pipeline.
pub fn decode<P: AsRef<Path>>(path: P) -> DecodeResult {
    RawToXyzPipeline::new().decode(path)
}

/// Decodes a RAW file already loaded into memory with the default pipeline.
pub fn decode_bytes(data: &[u8]) -> DecodeResult {
    RawToXyzPipeline::new().decode_bytes(data)
}

//! Image processing pipeline module
//!
//! This module turns vendor RAW files into linear CIE XYZ (D50) buffers, with
//! separate modules for RAW reading, demosaicing, colorimetry, metadata
//! extraction and orchestration.

pub mod color;
pub mod common;
pub mod config;
pub mod conversions;
pub mod debayer;
pub mod metadata;
pub mod raw;
pub mod result;

pub use common::{
    ConversionError,
    ErrorKind,
    Result,
};

pub use config::{
    DecodeConfig,
    DecodeConfigBuilder,
    DemosaicAlgorithm,
};

pub use raw::{
    RawContainer,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
    detect_container,
};

pub use metadata::{
    CameraMetadata,
    read_metadata,
};

pub use result::{
    DecodeFailure,
    DecodeResult,
    XyzImage,
    release,
};

pub use conversions::{
    RawToXyzPipeline,
};

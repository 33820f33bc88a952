//! RAW image reading module
//!
//! This module provides format-agnostic RAW image reading capabilities.

mod container;
mod reader;
mod rawloader_reader;
pub mod types;

pub use container::{RawContainer, detect_container};
pub use reader::RawImageReader;
pub use rawloader_reader::RawLoaderReader;
pub(crate) use rawloader_reader::panic_message;
pub use types::{ActiveArea, BayerPattern, CfaColor, RawImageData, SensorLayout};

//! Pipeline conversions module
//!
//! This module contains the orchestration logic that turns RAW files into XYZ images.

mod raw_to_xyz;


pub use raw_to_xyz::RawToXyzPipeline;

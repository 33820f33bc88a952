//! Colorimetry module
//!
//! Maps camera-native RGB into CIE XYZ with a D50 white point.

pub mod matrix;
mod xyz;

pub use matrix::{D50, D65, Mat3};
pub use xyz::CameraToXyz;

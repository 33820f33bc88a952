//! Common utilities module
//!
//! This module contains shared utilities used across the image pipeline.

pub mod buffer;
pub mod error;

pub use buffer::try_zeroed_vec;
pub use error::{ConversionError, ErrorKind, Result};

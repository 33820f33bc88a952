//! C bindings to the RAW to XYZ decoder
//!
//! The layout of [`RawXyzResult`] and both entry points are mirrored in
//! `include/raw_xyz_bridge.h`. A result owns its pixel buffer until it is
//! handed to [`rawxyz_free_result`]; copies of the struct share the pointer,
//! so exactly one of them may be freed.

use std::ffi::{CStr, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use crate::image_pipeline::metadata::UNIT_WB;
use crate::image_pipeline::raw::panic_message;
use crate::image_pipeline::result::{BYTES_PER_SAMPLE, DecodeResult, XyzImage};

/// Size of [`RawXyzResult::error_message`], terminator included.
pub const ERROR_MESSAGE_CAPACITY: usize = 256;

/// Result of [`rawxyz_decode_to_xyz`].
///
/// On success `data` points to `height * stride` bytes of interleaved X, Y, Z
/// `uint16_t` samples (linear, D50, `65535` = 1.0). On failure `data` is null,
/// the dimensions are 0 and `error_message` holds a NUL-terminated diagnostic.
/// `color_temperature` is `0.0` when unknown.
#[repr(C)]
pub struct RawXyzResult {
    pub data: *mut u16,
    pub width: c_int,
    pub height: c_int,
    pub stride: c_int,
    pub success: bool,
    pub error_message: [c_char; ERROR_MESSAGE_CAPACITY],
    pub baseline_exposure: f32,
    pub has_baseline_exposure: bool,
    pub wb_multipliers: [f32; 3],
    pub color_temperature: f32,
}

impl RawXyzResult {
    fn failure(message: &str) -> Self {
        let text = message.split('\0').next().unwrap_or_default();
        let mut end = text.len().min(ERROR_MESSAGE_CAPACITY - 1);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let text = if end == 0 { "Decode failed" } else { &text[..end] };

        let mut error_message = [0 as c_char; ERROR_MESSAGE_CAPACITY];
        for (dst, &src) in error_message.iter_mut().zip(text.as_bytes()) {
            *dst = src as c_char;
        }

        Self {
            data: ptr::null_mut(),
            width: 0,
            height: 0,
            stride: 0,
            success: false,
            error_message,
            baseline_exposure: 0.0,
            has_baseline_exposure: false,
            wb_multipliers: UNIT_WB,
            color_temperature: 0.0,
        }
    }

    fn success(image: XyzImage) -> Self {
        let (Ok(width), Ok(height), Ok(stride)) = (
            c_int::try_from(image.width()),
            c_int::try_from(image.height()),
            c_int::try_from(image.stride()),
        ) else {
            return Self::failure(&format!(
                "Image {}x{} does not fit the C result layout",
                image.width(),
                image.height()
            ));
        };
        let metadata = *image.metadata();
        let data = Box::into_raw(image.into_pixels().into_boxed_slice()).cast::<u16>();

        Self {
            data,
            width,
            height,
            stride,
            success: true,
            error_message: [0; ERROR_MESSAGE_CAPACITY],
            baseline_exposure: metadata.baseline_exposure.unwrap_or(0.0),
            has_baseline_exposure: metadata.has_baseline_exposure(),
            wb_multipliers: metadata.wb_multipliers,
            color_temperature: metadata.color_temperature.unwrap_or(0.0),
        }
    }

    /// Number of `u16` samples behind `data`.
    fn sample_count(&self) -> usize {
        let height = usize::try_from(self.height).unwrap_or(0);
        let stride = usize::try_from(self.stride).unwrap_or(0);
        height * stride / BYTES_PER_SAMPLE
    }
}

impl From<DecodeResult> for RawXyzResult {
    fn from(result: DecodeResult) -> Self {
        match result {
            DecodeResult::Success(image) => RawXyzResult::success(image),
            DecodeResult::Failure(failure) => RawXyzResult::failure(failure.message()),
        }
    }
}

/// \brief Decode a RAW file to linear XYZ (D50)
///
/// @param file_path: NUL-terminated path to a RAW file (.DNG, .ARW, .CR2, ...)
///
/// @returns A result that must be passed to `rawxyz_free_result` exactly once.
/// Check `success` before touching `data`.
///
/// # Safety
///
/// `file_path` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rawxyz_decode_to_xyz(file_path: *const c_char) -> RawXyzResult {
    if file_path.is_null() {
        return RawXyzResult::failure("File path is null");
    }
    // safety: the caller guarantees a NUL-terminated string
    let path = unsafe { CStr::from_ptr(file_path) }.to_string_lossy().into_owned();

    panic::catch_unwind(AssertUnwindSafe(|| RawXyzResult::from(crate::decode(&path))))
        .unwrap_or_else(|payload| {
            RawXyzResult::failure(&format!("Decoding engine panicked: {}", panic_message(payload.as_ref())))
        })
}

/// \brief Free the pixel buffer of a result returned by `rawxyz_decode_to_xyz`
///
/// Nulls `data`, clears `success` and zeroes the dimensions afterwards, so
/// calling it on a failure result, a null pointer, or an already freed result
/// does nothing.
///
/// # Safety
///
/// `result` must be null or point to a result produced by
/// `rawxyz_decode_to_xyz` whose `data`, `height` and `stride` were not modified.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rawxyz_free_result(result: *mut RawXyzResult) {
    if result.is_null() {
        return;
    }
    // safety: checked above, validity is the caller's contract
    let result = unsafe { &mut *result };
    if !result.data.is_null() {
        let len = result.sample_count();
        // safety: data came from Box<[u16]> of exactly `len` samples
        drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(result.data, len)) });
    }
    result.data = ptr::null_mut();
    result.success = false;
    result.width = 0;
    result.height = 0;
    result.stride = 0;
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;
    use crate::image_pipeline::metadata::CameraMetadata;

    fn message(result: &RawXyzResult) -> String {
        // safety: failure() always NUL-terminates within the array
        unsafe { CStr::from_ptr(result.error_message.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_nonexistent_file() {
        let path = CString::new("/nonexistent/file.dng").unwrap();
        let mut result = unsafe { rawxyz_decode_to_xyz(path.as_ptr()) };

        assert!(!result.success);
        assert!(result.data.is_null());
        assert_eq!((result.width, result.height, result.stride), (0, 0, 0));
        assert!(message(&result).contains("/nonexistent/file.dng"));

        unsafe { rawxyz_free_result(&mut result) };
        assert!(result.data.is_null());
    }

    #[test]
    fn test_null_arguments() {
        let result = unsafe { rawxyz_decode_to_xyz(ptr::null()) };
        assert!(!result.success);
        assert!(!message(&result).is_empty());

        unsafe { rawxyz_free_result(ptr::null_mut()) };
    }

    #[test]
    fn test_success_layout_and_single_release() {
        let metadata = CameraMetadata {
            baseline_exposure: Some(-0.5),
            wb_multipliers: [2.0, 1.0, 1.5],
            color_temperature: Some(5200.0),
        };
        let image = XyzImage::new(4, 2, vec![1234u16; 4 * 2 * 3], metadata);
        let mut result = RawXyzResult::from(DecodeResult::Success(image));

        assert!(result.success);
        assert!(!result.data.is_null());
        assert_eq!((result.width, result.height, result.stride), (4, 2, 24));
        assert_eq!(result.error_message[0], 0);
        assert!(result.has_baseline_exposure);
        assert_eq!(result.baseline_exposure, -0.5);
        assert_eq!(result.wb_multipliers, [2.0, 1.0, 1.5]);
        assert_eq!(result.color_temperature, 5200.0);

        let samples = unsafe { std::slice::from_raw_parts(result.data, result.sample_count()) };
        assert_eq!(samples.len(), 24);
        assert!(samples.iter().all(|&v| v == 1234));

        unsafe { rawxyz_free_result(&mut result) };
        assert!(result.data.is_null());
        assert!(!result.success);
        assert_eq!((result.width, result.height, result.stride), (0, 0, 0));
        assert_eq!(result.sample_count(), 0);
        // already released, must not double free
        unsafe { rawxyz_free_result(&mut result) };
    }

    #[test]
    fn test_long_message_is_truncated_and_terminated() {
        let result = RawXyzResult::failure(&"x".repeat(1000));
        assert_eq!(result.error_message[ERROR_MESSAGE_CAPACITY - 1], 0);
        assert_eq!(message(&result).len(), ERROR_MESSAGE_CAPACITY - 1);
    }

    #[test]
    fn test_interior_nul_stops_the_message() {
        let result = RawXyzResult::failure("bad\0tail");
        assert_eq!(message(&result), "bad");
    }
}

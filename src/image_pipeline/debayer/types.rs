//! Types for debayering operations

/// Camera-native RGB after level normalization and demosaicing
#[derive(Debug, Clone)]
pub struct CameraRgbImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...], black at 0 and sensor saturation at 65535
    pub data: Vec<u16>,
}

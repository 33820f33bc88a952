//! RAW image data types

/// Color index of a photosite, in the engine's channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaColor {
    Red,
    Green,
    Blue,
}

impl CfaColor {
    pub fn index(self) -> usize {
        match self {
            CfaColor::Red => 0,
            CfaColor::Green => 1,
            CfaColor::Blue => 2,
        }
    }
}

/// 2x2 Bayer tile, read row-major from the top-left photosite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BayerPattern(pub [CfaColor; 4]);

impl BayerPattern {
    pub const RGGB: BayerPattern = BayerPattern([CfaColor::Red, CfaColor::Green, CfaColor::Green, CfaColor::Blue]);
    pub const BGGR: BayerPattern = BayerPattern([CfaColor::Blue, CfaColor::Green, CfaColor::Green, CfaColor::Red]);
    pub const GRBG: BayerPattern = BayerPattern([CfaColor::Green, CfaColor::Red, CfaColor::Blue, CfaColor::Green]);
    pub const GBRG: BayerPattern = BayerPattern([CfaColor::Green, CfaColor::Blue, CfaColor::Red, CfaColor::Green]);

    pub fn color_at(&self, row: usize, col: usize) -> CfaColor {
        self.0[(row % 2) * 2 + col % 2]
    }

    /// Pattern seen from an origin shifted by (`row`, `col`) photosites.
    pub fn shifted(&self, row: usize, col: usize) -> BayerPattern {
        BayerPattern([
            self.color_at(row, col),
            self.color_at(row, col + 1),
            self.color_at(row + 1, col),
            self.color_at(row + 1, col + 1),
        ])
    }
}

/// How photosite samples are laid out in [`RawImageData::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorLayout {
    /// One sample per photosite behind a 2x2 Bayer filter.
    Bayer(BayerPattern),
    /// Three interleaved samples per pixel (linear DNG, already demosaiced).
    Rgb,
}

/// Active image area inside the sensor readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveArea {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

/// Represents decoded RAW image data as handed over by the engine
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the sensor readout in pixels
    pub width: usize,
    /// Height of the sensor readout in pixels
    pub height: usize,
    pub layout: SensorLayout,
    /// Sensor samples, `width * height * channels`
    pub data: Vec<u16>,
    /// Black level per color channel (R, G, B)
    pub black_levels: [u16; 3],
    /// White (saturation) level per color channel (R, G, B)
    pub white_levels: [u16; 3],
    /// As-shot white balance coefficients (R, G, B), unnormalized, NaN when unknown
    pub wb_coeffs: [f32; 3],
    /// XYZ (D65) to camera matrix, one row per camera channel. All zeros when unknown.
    pub xyz_to_cam: [[f32; 3]; 3],
    /// Crop to apply before color conversion, if the engine reports one
    pub active_area: Option<ActiveArea>,
    pub make: String,
    pub model: String,
}

impl RawImageData {
    pub fn channels(&self) -> usize {
        match self.layout {
            SensorLayout::Bayer(_) => 1,
            SensorLayout::Rgb => 3,
        }
    }
}

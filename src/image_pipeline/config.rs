//! RAW to XYZ decode configuration types

/// Demosaicing algorithms offered by the CPU debayer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemosaicAlgorithm {
    /// Copy the nearest photosite of each color (fastest, blocky)
    NearestNeighbour,
    /// Bilinear interpolation (default)
    Linear,
    /// Bicubic interpolation (slowest, sharpest)
    Cubic,
}

/// Largest edge accepted by default. Also keeps `stride` representable as a C int.
pub const DEFAULT_MAX_DIMENSION: usize = 65535;

/// Configuration for RAW to XYZ decoding
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    pub demosaic: DemosaicAlgorithm,
    /// Whether to validate image dimensions before color conversion
    pub validate_dimensions: bool,
    pub max_dimension: Option<usize>,
    /// Whether to drop the masked sensor border reported by the engine
    pub crop_to_active_area: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            demosaic: DemosaicAlgorithm::Linear,
            validate_dimensions: true,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            crop_to_active_area: true,
        }
    }
}

impl DecodeConfig {
    pub fn builder() -> DecodeConfigBuilder {
        DecodeConfigBuilder::default()
    }
}

/// Builder for DecodeConfig
#[derive(Default)]
pub struct DecodeConfigBuilder {
    demosaic: Option<DemosaicAlgorithm>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    crop_to_active_area: Option<bool>,
}

impl DecodeConfigBuilder {
    pub fn demosaic(mut self, algorithm: DemosaicAlgorithm) -> Self {
        self.demosaic = Some(algorithm);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn crop_to_active_area(mut self, crop: bool) -> Self {
        self.crop_to_active_area = Some(crop);
        self
    }

    pub fn build(self) -> DecodeConfig {
        let default = DecodeConfig::default();
        DecodeConfig {
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            crop_to_active_area: self.crop_to_active_area.unwrap_or(default.crop_to_active_area),
        }
    }
}

use thiserror::Error;

/// Coarse classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Path missing or unreadable, empty file, or not a RAW container at all.
    Input,
    /// Recognized container whose structure the engine rejects.
    Format,
    /// The decoding engine or a later pipeline stage failed internally.
    Engine,
    /// Output buffer allocation failed.
    Resource,
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Not a recognized RAW container: {0}")]
    UnrecognizedContainer(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Unsupported sensor layout: {0}")]
    UnsupportedFormat(String),

    #[error("Demosaic failed: {0}")]
    DemosaicError(String),

    #[error("Decoding engine panicked: {0}")]
    EnginePanic(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to allocate {0} bytes for the XYZ buffer")]
    AllocationError(usize),
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InputReadError(_) | ConversionError::UnrecognizedContainer(_) => {
                ErrorKind::Input
            }
            ConversionError::DecodeError(_) => ErrorKind::Format,
            ConversionError::UnsupportedFormat(_)
            | ConversionError::DemosaicError(_)
            | ConversionError::EnginePanic(_)
            | ConversionError::InvalidDimensions(_, _) => ErrorKind::Engine,
            ConversionError::AllocationError(_) => ErrorKind::Resource,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

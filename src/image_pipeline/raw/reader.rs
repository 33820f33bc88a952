use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::RawImageData;

/// A RAW decoding engine. Implementations must not keep per-call state so that
/// one reader can serve concurrent decodes.
pub trait RawImageReader: Send + Sync {
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData>;
}

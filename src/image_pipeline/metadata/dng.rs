//! DNG tag extraction from IFD0.
//!
//! Tags are read with a plain EXIF/TIFF reader rather than an image decoder,
//! so IFD0 may describe a CFA or LinearRaw image the decoder would refuse.

use exif::{Context, In, Reader, Tag, Value};
use tracing::debug;

/// DNG BaselineExposure, SRATIONAL, IFD0.
pub const BASELINE_EXPOSURE_TAG: u16 = 50730;

/// Reads BaselineExposure from IFD0. Any parse failure means "not present".
pub fn read_baseline_exposure(data: &[u8]) -> Option<f32> {
    let exif = match Reader::new().read_raw(data.to_vec()) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("IFD0 not readable for BaselineExposure: {}", e);
            return None;
        }
    };

    let field = exif.get_field(Tag(Context::Tiff, BASELINE_EXPOSURE_TAG), In::PRIMARY)?;
    let ev = value_as_f32(&field.value)?;
    debug!("BaselineExposure: {:+.2} EV", ev);
    ev.is_finite().then_some(ev)
}

fn value_as_f32(value: &Value) -> Option<f32> {
    match value {
        Value::SRational(v) => v.first().filter(|r| r.denom != 0).map(|r| r.to_f64() as f32),
        Value::Rational(v) => v.first().filter(|r| r.denom != 0).map(|r| r.to_f64() as f32),
        Value::Float(v) => v.first().copied(),
        Value::Double(v) => v.first().map(|&d| d as f32),
        Value::SShort(v) => v.first().map(|&s| f32::from(s)),
        Value::SLong(v) => v.first().map(|&s| s as f32),
        _ => None,
    }
}

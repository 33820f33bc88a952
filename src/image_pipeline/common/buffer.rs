use crate::image_pipeline::common::error::{ConversionError, Result};

/// Allocates a zero-filled buffer, reporting allocator failure instead of aborting.
pub fn try_zeroed_vec<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ConversionError::AllocationError(bytes))?;
    buf.resize(len, T::default());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_allocation() {
        let buf: Vec<u16> = try_zeroed_vec(12).unwrap();
        assert_eq!(buf, vec![0u16; 12]);
    }

    #[test]
    fn test_impossible_allocation_is_reported() {
        let err = try_zeroed_vec::<u64>(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, ConversionError::AllocationError(_)));
    }
}

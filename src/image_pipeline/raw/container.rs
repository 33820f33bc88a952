//! Magic-byte classification of RAW containers.
//!
//! The engine does its own format detection; this only decides whether a
//! rejected file was a RAW container at all, which separates input errors
//! from format errors.

/// Container families recognized from the first bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawContainer {
    /// TIFF-based: DNG, ARW, CR2, NEF, PEF, SRW, DCR, ERF, 3FR, ...
    Tiff,
    /// Olympus ORF (TIFF variant with its own magic)
    Orf,
    /// Panasonic RW2/RAW
    Rw2,
    /// Fujifilm RAF
    Raf,
    /// Minolta MRW
    Mrw,
    /// Canon CRW (CIFF)
    Crw,
    /// Phase One IIQ
    Iiq,
    /// ARRI ARI
    Ari,
    /// ISO base media (Canon CR3 and friends)
    IsoBmff,
}

impl RawContainer {
    /// Whether IFD0 of the file can be walked with a plain TIFF reader.
    pub fn is_tiff_based(self) -> bool {
        matches!(self, RawContainer::Tiff)
    }
}

pub fn detect_container(data: &[u8]) -> Option<RawContainer> {
    let starts = |magic: &[u8]| data.starts_with(magic);
    let at = |offset: usize, magic: &[u8]| {
        data.get(offset..offset + magic.len()).is_some_and(|s| s == magic)
    };

    if at(8, b"IIII") {
        Some(RawContainer::Iiq)
    } else if starts(b"IIRO") || starts(b"IIRS") || starts(b"MMOR") {
        Some(RawContainer::Orf)
    } else if starts(b"IIU\0") {
        Some(RawContainer::Rw2)
    } else if starts(b"II*\0") || starts(b"MM\0*") {
        Some(RawContainer::Tiff)
    } else if starts(b"FUJIFILM") {
        Some(RawContainer::Raf)
    } else if starts(b"\0MRM") {
        Some(RawContainer::Mrw)
    } else if at(6, b"HEAPCCDR") {
        Some(RawContainer::Crw)
    } else if starts(b"ARRI") {
        Some(RawContainer::Ari)
    } else if at(4, b"ftyp") {
        Some(RawContainer::IsoBmff)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiff_both_endians() {
        assert_eq!(detect_container(b"II*\0\x08\0\0\0"), Some(RawContainer::Tiff));
        assert_eq!(detect_container(b"MM\0*\0\0\0\x08"), Some(RawContainer::Tiff));
    }

    #[test]
    fn test_vendor_magics() {
        assert_eq!(detect_container(b"IIRO\x08\0\0\0"), Some(RawContainer::Orf));
        assert_eq!(detect_container(b"IIU\0\x08\0\0\0"), Some(RawContainer::Rw2));
        assert_eq!(detect_container(b"FUJIFILMCCD-RAW 0201"), Some(RawContainer::Raf));
        assert_eq!(detect_container(b"II\x1a\0\0\0HEAPCCDR"), Some(RawContainer::Crw));
        assert_eq!(detect_container(b"\0\0\0\x18ftypcrx "), Some(RawContainer::IsoBmff));
    }

    #[test]
    fn test_unknown_and_short_input() {
        assert_eq!(detect_container(b""), None);
        assert_eq!(detect_container(b"II"), None);
        assert_eq!(detect_container(b"\x89PNG\r\n\x1a\n"), None);
        assert_eq!(detect_container(b"hello world, not a raw file"), None);
    }
}

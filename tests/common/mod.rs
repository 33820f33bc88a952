//! Synthetic single-IFD DNG files for decoding through the real engine.

/// IFD entry payloads used by the fixture.
enum Field {
    Byte(Vec<u8>),
    Ascii(&'static str),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SRational(Vec<(i32, i32)>),
}

impl Field {
    fn type_code(&self) -> u16 {
        match self {
            Field::Byte(_) => 1,
            Field::Ascii(_) => 2,
            Field::Short(_) => 3,
            Field::Long(_) => 4,
            Field::Rational(_) => 5,
            Field::SRational(_) => 10,
        }
    }

    fn count(&self) -> u32 {
        let count = match self {
            Field::Byte(v) => v.len(),
            Field::Ascii(s) => s.len() + 1,
            Field::Short(v) => v.len(),
            Field::Long(v) => v.len(),
            Field::Rational(v) => v.len(),
            Field::SRational(v) => v.len(),
        };
        count as u32
    }

    fn bytes(&self) -> Vec<u8> {
        match self {
            Field::Byte(v) => v.clone(),
            Field::Ascii(s) => s.bytes().chain(std::iter::once(0)).collect(),
            Field::Short(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Field::Long(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Field::Rational(v) => v
                .iter()
                .flat_map(|(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
                .collect(),
            Field::SRational(v) => v
                .iter()
                .flat_map(|(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
                .collect(),
        }
    }
}

pub const BLACK_LEVEL: u16 = 256;
pub const WHITE_LEVEL: u16 = 4095;

/// As-shot neutral of 1/2, 1, 2/3, i.e. white balance gains of 2, 1, 1.5.
pub const AS_SHOT_WB: [f32; 3] = [2.0, 1.0, 1.5];

/// Uncompressed 16-bit RGGB DNG whose only IFD is the CFA image itself.
/// `baseline_exposure` is written as an SRATIONAL when given.
pub fn cfa_dng(width: u32, height: u32, baseline_exposure: Option<(i32, i32)>) -> Vec<u8> {
    let pixel_len = (width * height * 2) as usize;
    let mut entries: Vec<(u16, Field)> = vec![
        (254, Field::Long(vec![0])),
        (256, Field::Long(vec![width])),
        (257, Field::Long(vec![height])),
        (258, Field::Short(vec![16])),
        (259, Field::Short(vec![1])),
        (262, Field::Short(vec![32803])),
        (271, Field::Ascii("Synthetic")),
        (272, Field::Ascii("Bayer Sixteen")),
        (273, Field::Long(vec![0])),
        (277, Field::Short(vec![1])),
        (278, Field::Long(vec![height])),
        (279, Field::Long(vec![pixel_len as u32])),
        (284, Field::Short(vec![1])),
        (33421, Field::Short(vec![2, 2])),
        (33422, Field::Byte(vec![0, 1, 1, 2])),
        (50706, Field::Byte(vec![1, 4, 0, 0])),
        (50708, Field::Ascii("Synthetic Bayer Sixteen")),
        (50714, Field::Short(vec![BLACK_LEVEL])),
        (50717, Field::Short(vec![WHITE_LEVEL])),
        (
            50721,
            Field::SRational(vec![
                (7374, 10000),
                (-2389, 10000),
                (-551, 10000),
                (-5435, 10000),
                (13162, 10000),
                (2519, 10000),
                (-1006, 10000),
                (1795, 10000),
                (6552, 10000),
            ]),
        ),
        (50728, Field::Rational(vec![(1, 2), (1, 1), (2, 3)])),
        (50778, Field::Short(vec![21])),
    ];
    if let Some(ev) = baseline_exposure {
        entries.push((50730, Field::SRational(vec![ev])));
    }
    entries.sort_by_key(|(tag, _)| *tag);

    let ifd_offset = 8usize;
    let ifd_len = 2 + entries.len() * 12 + 4;
    let extra_len: usize = entries
        .iter()
        .map(|(_, f)| f.bytes().len())
        .filter(|&len| len > 4)
        .map(|len| len + len % 2)
        .sum();
    let pixel_offset = ifd_offset + ifd_len + extra_len;
    for (tag, field) in entries.iter_mut() {
        if *tag == 273 {
            *field = Field::Long(vec![pixel_offset as u32]);
        }
    }

    let mut out = Vec::with_capacity(pixel_offset + pixel_len);
    out.extend_from_slice(b"II*\0");
    out.extend_from_slice(&(ifd_offset as u32).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());

    let mut extra = Vec::with_capacity(extra_len);
    let extra_offset = ifd_offset + ifd_len;
    for (tag, field) in &entries {
        let bytes = field.bytes();
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&field.type_code().to_le_bytes());
        out.extend_from_slice(&field.count().to_le_bytes());
        if bytes.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..bytes.len()].copy_from_slice(&bytes);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&((extra_offset + extra.len()) as u32).to_le_bytes());
            extra.extend_from_slice(&bytes);
            if extra.len() % 2 == 1 {
                extra.push(0);
            }
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&extra);
    assert_eq!(out.len(), pixel_offset);

    for row in 0..height {
        for col in 0..width {
            let value = BLACK_LEVEL + ((row * 97 + col * 31) % 3000) as u16;
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    out
}

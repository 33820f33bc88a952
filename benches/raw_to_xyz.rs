use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use raw_xyz_bridge::image_pipeline::color::CameraToXyz;
use raw_xyz_bridge::image_pipeline::debayer::CameraRgbImage;
use raw_xyz_bridge::image_pipeline::raw::{BayerPattern, RawImageData, SensorLayout};
use raw_xyz_bridge::image_pipeline::{
    DecodeConfig, DemosaicAlgorithm, RawImageReader, RawToXyzPipeline, Result,
};
use std::hint::black_box;

const XYZ_TO_CAM: [[f32; 3]; 3] = [
    [0.7374, -0.2389, -0.0551],
    [-0.5435, 1.3162, 0.2519],
    [-0.1006, 0.1795, 0.6552],
];

/// Hands out the same synthetic mosaic for every call.
struct SyntheticReader {
    raw: RawImageData,
}

impl RawImageReader for SyntheticReader {
    fn read_raw(&self, _data: &[u8]) -> Result<RawImageData> {
        Ok(self.raw.clone())
    }
}

fn generate_mock_mosaic(width: usize, height: usize) -> RawImageData {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(512 + ((x * 7 + y * 13) % 12000) as u16);
        }
    }
    RawImageData {
        width,
        height,
        layout: SensorLayout::Bayer(BayerPattern::RGGB),
        data,
        black_levels: [512; 3],
        white_levels: [16383; 3],
        wb_coeffs: [2.0, 1.0, 1.5],
        xyz_to_cam: XYZ_TO_CAM,
        active_area: None,
        make: "Synthetic".to_string(),
        model: "Mosaic".to_string(),
    }
}

fn benchmark_decode_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_size");

    let sizes = vec![
        (256, 256, "256x256"),
        (1024, 768, "1024x768"),
        (2048, 1536, "2048x1536"),
    ];

    for (width, height, label) in sizes {
        let reader = SyntheticReader { raw: generate_mock_mosaic(width, height) };
        let pipeline = RawToXyzPipeline::with_custom(reader, DecodeConfig::default());

        group.bench_with_input(BenchmarkId::from_parameter(label), &pipeline, |b, pipeline| {
            b.iter(|| pipeline.decode_bytes(black_box(b"II*\0")).release());
        });
    }

    group.finish();
}

fn benchmark_demosaic_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("demosaic_algorithms");

    let algorithms = vec![
        (DemosaicAlgorithm::NearestNeighbour, "nearest"),
        (DemosaicAlgorithm::Linear, "linear"),
        (DemosaicAlgorithm::Cubic, "cubic"),
    ];

    for (algorithm, label) in algorithms {
        let reader = SyntheticReader { raw: generate_mock_mosaic(1024, 768) };
        let config = DecodeConfig::builder().demosaic(algorithm).build();
        let pipeline = RawToXyzPipeline::with_custom(reader, config);

        group.bench_function(label, |b| {
            b.iter(|| pipeline.decode_bytes(black_box(b"II*\0")).release());
        });
    }

    group.finish();
}

fn benchmark_color_transform(c: &mut Criterion) {
    let transform = CameraToXyz::from_xyz_to_cam(XYZ_TO_CAM);
    let image = CameraRgbImage {
        width: 2048,
        height: 1536,
        data: (0..2048 * 1536 * 3).map(|i| (i * 31 % 65536) as u16).collect(),
    };

    c.bench_function("camera_to_xyz_2048x1536", |b| {
        b.iter(|| transform.apply(black_box(&image)));
    });
}

criterion_group!(
    benches,
    benchmark_decode_sizes,
    benchmark_demosaic_algorithms,
    benchmark_color_transform
);
criterion_main!(benches);

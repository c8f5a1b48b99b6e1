use criterion::{criterion_group, criterion_main, Criterion};
use pupilcore::lowlevel::IntegralImage;
use pupilcore::{
    coarse_locate, edge_ratio_confidence, outline_contrast_confidence, CoarseConfig,
    ConfidenceConfig, ConfidenceReport, ImageView, Pupil,
};
use std::hint::black_box;

/// Textured eye-like frame: a dark disc over a patterned background.
fn make_frame(width: usize, height: usize, cx: f32, cy: f32, radius: f32) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let value = if dx * dx + dy * dy <= radius * radius {
                20 + ((x ^ y) & 0x0F)
            } else {
                140 + (((x * 13) ^ (y * 7)) & 0x3F)
            };
            data.push(value as u8);
        }
    }
    data
}

fn make_edges(width: usize, height: usize, cx: f32, cy: f32, radius: f32) -> Vec<u8> {
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if ((dx * dx + dy * dy).sqrt() - radius).abs() < 0.5 {
                data[y * width + x] = 255;
            }
        }
    }
    data
}

fn bench_coarse(c: &mut Criterion) {
    let (width, height) = (640usize, 480usize);
    let frame_data = make_frame(width, height, 380.0, 220.0, 45.0);
    let frame = ImageView::from_slice(&frame_data, width, height).unwrap();

    let cfg = CoarseConfig::default();
    c.bench_function("coarse_locate_640x480", |b| {
        b.iter(|| black_box(coarse_locate(frame, &cfg).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let cfg_par = CoarseConfig {
            parallel: true,
            ..CoarseConfig::default()
        };
        c.bench_function("coarse_locate_640x480_parallel", |b| {
            b.iter(|| black_box(coarse_locate(frame, &cfg_par).unwrap()));
        });
    }

    c.bench_function("integral_image_640x480", |b| {
        b.iter(|| black_box(IntegralImage::from_view(frame).unwrap()));
    });
}

fn bench_confidence(c: &mut Criterion) {
    let (width, height) = (640usize, 480usize);
    let frame_data = make_frame(width, height, 380.0, 220.0, 45.0);
    let edge_data = make_edges(width, height, 380.0, 220.0, 45.0);
    let frame = ImageView::from_slice(&frame_data, width, height).unwrap();
    let edges = ImageView::from_slice(&edge_data, width, height).unwrap();
    let pupil = Pupil::new(380.0, 220.0, 92.0, 86.0, 20.0);

    c.bench_function("outline_contrast", |b| {
        b.iter(|| black_box(outline_contrast_confidence(frame, &pupil, 5.0)));
    });

    c.bench_function("edge_ratio_band5", |b| {
        b.iter(|| black_box(edge_ratio_confidence(edges, &pupil, 5).unwrap()));
    });

    let cfg = ConfidenceConfig::default();
    c.bench_function("confidence_report", |b| {
        b.iter(|| black_box(ConfidenceReport::evaluate(frame, Some(edges), &pupil, &cfg).unwrap()));
    });
}

criterion_group!(benches, bench_coarse, bench_confidence);
criterion_main!(benches);

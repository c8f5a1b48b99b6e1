#![cfg(feature = "rayon")]

mod common;

use pupilcore::{
    coarse_locate, coarse_locate_detailed, CoarseConfig, ConfidenceConfig, ConfidenceReport,
    ImageView, Pupil,
};

#[test]
fn parallel_scan_finds_the_same_pupil() {
    let (w, h) = (320usize, 240usize);
    let data = common::disc_frame(w, h, 200.0, 90.0, 28.0, 15, 200);
    let frame = ImageView::from_slice(&data, w, h).unwrap();

    let sequential = CoarseConfig::default();
    let parallel = CoarseConfig {
        parallel: true,
        ..CoarseConfig::default()
    };
    let seq = coarse_locate_detailed(frame, &sequential, &mut ()).unwrap();
    let par = coarse_locate_detailed(frame, &parallel, &mut ()).unwrap();

    assert!(seq.roi.contains(200, 90));
    assert!(par.roi.contains(200, 90));
    assert_eq!(seq.best_response, par.best_response);
    assert!(par.candidates <= seq.candidates);
}

#[test]
fn parallel_scan_is_deterministic() {
    let (w, h) = (200usize, 150usize);
    let data: Vec<u8> = (0..w * h).map(|i| ((i * 7919) % 251) as u8).collect();
    let frame = ImageView::from_slice(&data, w, h).unwrap();
    let cfg = CoarseConfig {
        parallel: true,
        ..CoarseConfig::default()
    };
    let first = coarse_locate(frame, &cfg).unwrap();
    for _ in 0..4 {
        assert_eq!(coarse_locate(frame, &cfg).unwrap(), first);
    }
}

#[test]
fn parallel_report_matches_sequential() {
    let (w, h) = (160usize, 120usize);
    let frame_data = common::disc_frame(w, h, 80.0, 60.0, 25.0, 30, 200);
    let edge_data = common::disc_edges(w, h, 80.0, 60.0, 25.0);
    let frame = ImageView::from_slice(&frame_data, w, h).unwrap();
    let edges = ImageView::from_slice(&edge_data, w, h).unwrap();
    let pupil = Pupil::new(81.0, 59.0, 52.0, 47.0, 12.0);

    let seq = ConfidenceReport::evaluate(frame, Some(edges), &pupil, &ConfidenceConfig::default())
        .unwrap();
    let par_cfg = ConfidenceConfig {
        parallel: true,
        ..ConfidenceConfig::default()
    };
    let par = ConfidenceReport::evaluate(frame, Some(edges), &pupil, &par_cfg).unwrap();
    assert_eq!(seq, par);
}

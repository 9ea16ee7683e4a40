use super::*;

#[test]
fn unknown_duration_has_no_segments() {
    assert!(project_timeline(&[1.0, 2.0], 0.0, 0.5).is_empty());
    assert!(project_timeline(&[1.0], f64::NAN, 0.5).is_empty());
    assert!(stop_markers(&[1.0], 0.0).is_empty());
}

#[test]
fn segments_cover_the_whole_duration() {
    let segs = project_timeline(&[2.0, 6.0], 10.0, 4.0);
    let bounds: Vec<(f64, f64)> = segs.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(bounds, [(0.0, 2.0), (2.0, 6.0), (6.0, 10.0)]);
    let fills: Vec<f64> = segs.iter().map(|s| s.fill_percent).collect();
    assert_eq!(fills, [100.0, 50.0, 0.0]);
    let total: f64 = segs.iter().map(|s| s.width_percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn no_trailing_segment_when_last_stop_is_the_end() {
    let segs = project_timeline(&[5.0, 10.0], 10.0, 10.0);
    assert_eq!(segs.len(), 2);
    assert!(segs.iter().all(|s| s.fill_percent == 100.0));
}

#[test]
fn stops_past_the_end_are_clipped() {
    let segs = project_timeline(&[4.0, 12.0, 15.0], 8.0, 6.0);
    let bounds: Vec<(f64, f64)> = segs.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(bounds, [(0.0, 4.0), (4.0, 8.0)]);
    assert_eq!(segs[1].fill_percent, 50.0);
    assert_eq!(stop_markers(&[4.0, 12.0], 8.0), [50.0]);
}

#[test]
fn fill_is_zero_before_and_full_at_end() {
    assert_eq!(segment_fill(2.0, 4.0, 1.9), 0.0);
    assert_eq!(segment_fill(2.0, 4.0, 2.0), 0.0);
    assert_eq!(segment_fill(2.0, 4.0, 3.0), 50.0);
    assert_eq!(segment_fill(2.0, 4.0, 4.0), 100.0);
    // Zero-length segment at t=0.
    assert_eq!(segment_fill(0.0, 0.0, 0.0), 100.0);
}

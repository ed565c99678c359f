use stackfall::term::FrameRateCounter;

#[test]
fn steady_frames_report_once_per_window() {
    let mut counter = FrameRateCounter::new(1000);
    let mut reports = Vec::new();
    for i in 0..=200u64 {
        if let Some(fps) = counter.tick(i * 10) {
            reports.push(fps);
        }
    }
    assert_eq!(reports.len(), 2);
    for fps in reports {
        assert!((fps - 100.0).abs() < 1e-9, "fps={fps}");
    }
}

#[test]
fn first_frame_only_starts_the_window() {
    let mut counter = FrameRateCounter::new(5000);
    assert_eq!(counter.tick(123_456), None);
    assert_eq!(counter.tick(125_000), None);
}

#[test]
fn slow_frames_lower_the_average() {
    let mut counter = FrameRateCounter::new(5000);
    counter.tick(0);
    // Two frames in five seconds.
    assert_eq!(counter.tick(4000), None);
    let fps = counter.tick(5000).unwrap();
    assert!((fps - 0.4).abs() < 1e-9, "fps={fps}");
}

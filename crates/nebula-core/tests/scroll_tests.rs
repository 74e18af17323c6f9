use nebula_core::{preload_margin_px, ScrollDirection, ScrollVelocityTracker};

#[test]
fn preload_margin_buckets_are_exact() {
    assert_eq!(preload_margin_px(100.0), 200);
    assert_eq!(preload_margin_px(800.0), 400);
    assert_eq!(preload_margin_px(2000.0), 800);

    // Boundary behavior: thresholds belong to the faster bucket.
    assert_eq!(preload_margin_px(499.9), 200);
    assert_eq!(preload_margin_px(500.0), 400);
    assert_eq!(preload_margin_px(1500.0), 800);
}

#[test]
fn first_tick_primes_without_reporting_velocity() {
    let mut tracker = ScrollVelocityTracker::new();
    let sample = tracker.tick(0.0, 4000.0);
    assert_eq!(sample.velocity, 0.0);
    assert_eq!(sample.direction, ScrollDirection::Idle);
}

#[test]
fn velocity_is_pixels_per_second_with_direction() {
    let mut tracker = ScrollVelocityTracker::new();
    tracker.tick(0.0, 0.0);
    // 40px in 50ms -> 800 px/s, downward.
    let sample = tracker.tick(50.0, 40.0);
    assert!((sample.velocity - 800.0).abs() < 1e-3);
    assert_eq!(sample.direction, ScrollDirection::Down);

    // Back up 10px over the next 50ms -> 200 px/s, upward.
    let sample = tracker.tick(100.0, 30.0);
    assert!((sample.velocity - 200.0).abs() < 1e-3);
    assert_eq!(sample.direction, ScrollDirection::Up);
}

#[test]
fn sub_interval_ticks_do_not_resample() {
    let mut tracker = ScrollVelocityTracker::new();
    tracker.tick(0.0, 0.0);
    let sample = tracker.tick(16.0, 500.0);
    assert_eq!(sample.velocity, 0.0, "sampling interval not yet elapsed");
    let sample = tracker.tick(50.0, 500.0);
    assert!(sample.velocity > 0.0);
}

#[test]
fn velocity_is_capped() {
    let mut tracker = ScrollVelocityTracker::new();
    tracker.tick(0.0, 0.0);
    let sample = tracker.tick(50.0, 10_000.0);
    assert_eq!(sample.velocity, 5000.0);
}

#[test]
fn decays_to_idle_after_quiet_period() {
    let mut tracker = ScrollVelocityTracker::new();
    tracker.tick(0.0, 0.0);
    let sample = tracker.tick(50.0, 40.0);
    assert_eq!(sample.direction, ScrollDirection::Down);

    // No further movement; idle after 150ms of stillness.
    let sample = tracker.tick(120.0, 40.0);
    assert_eq!(sample.direction, ScrollDirection::Down, "still within the quiet window");
    let sample = tracker.tick(200.0, 40.0);
    assert_eq!(sample.direction, ScrollDirection::Idle);
    assert_eq!(sample.velocity, 0.0);
}

#[test]
fn continuous_scrolling_never_goes_idle() {
    let mut tracker = ScrollVelocityTracker::new();
    let mut y = 0.0;
    tracker.tick(0.0, y);
    for i in 1..=40 {
        y += 30.0;
        let sample = tracker.tick(i as f64 * 50.0, y);
        assert_eq!(sample.direction, ScrollDirection::Down);
        assert!((sample.velocity - 600.0).abs() < 1e-3);
    }
}

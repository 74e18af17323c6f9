use nebula_core::{FpsCounter, Teardown};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn fps_counter_reads_sixty_for_sixty_frames_per_second() {
    let mut counter = FpsCounter::new();
    let mut readings = Vec::new();
    for i in 0..=600 {
        let now = i as f64 * (1000.0 / 60.0);
        if let Some(reading) = counter.frame(now) {
            readings.push(reading);
        }
    }
    assert!(readings.len() >= 8);
    for reading in &readings {
        assert!(
            (59..=61).contains(&reading.fps),
            "fps reading {} out of range",
            reading.fps
        );
        assert!((59..=61).contains(&reading.avg));
    }
}

#[test]
fn fps_average_smooths_a_rate_change() {
    let mut counter = FpsCounter::new();
    let mut now = 0.0;
    let mut last = None;
    // Ten seconds at 60fps, then five at 30fps.
    for _ in 0..600 {
        now += 1000.0 / 60.0;
        if let Some(r) = counter.frame(now) {
            last = Some(r);
        }
    }
    for _ in 0..150 {
        now += 1000.0 / 30.0;
        if let Some(r) = counter.frame(now) {
            last = Some(r);
        }
    }
    let last = last.expect("readings were emitted");
    assert!((29..=31).contains(&last.fps));
    // History still holds some 60fps windows, so the average sits between.
    assert!(last.avg > last.fps);
}

#[test]
fn fps_emits_at_most_once_per_window() {
    let mut counter = FpsCounter::new();
    let mut emitted = 0;
    for i in 0..=300 {
        if counter.frame(i as f64 * 10.0).is_some() {
            emitted += 1;
        }
    }
    assert_eq!(emitted, 3, "3000ms of frames -> 3 window closes");
}

#[test]
fn teardown_runs_callbacks_lifo_exactly_once() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut teardown = Teardown::new();
    for tag in ["buffers", "observer", "listener"] {
        let order = order.clone();
        teardown.on_teardown(move || order.borrow_mut().push(tag));
    }
    teardown.dispose();
    teardown.dispose();
    assert_eq!(*order.borrow(), vec!["listener", "observer", "buffers"]);
}

#[test]
fn teardown_runs_on_drop() {
    let ran = Rc::new(RefCell::new(false));
    {
        let mut teardown = Teardown::new();
        let ran = ran.clone();
        teardown.on_teardown(move || *ran.borrow_mut() = true);
    }
    assert!(*ran.borrow());
}

#[test]
fn late_registration_after_dispose_releases_immediately() {
    let mut teardown = Teardown::new();
    teardown.dispose();
    let ran = Rc::new(RefCell::new(false));
    let ran_cb = ran.clone();
    teardown.on_teardown(move || *ran_cb.borrow_mut() = true);
    assert!(*ran.borrow());
}

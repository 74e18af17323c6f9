// Host-side tests for the pure helper modules of the wasm-only crate.
// The crate body is wasm-gated, so the files are included directly.

#![allow(dead_code)]
mod hud {
    include!("../src/hud.rs");
}
mod margins {
    include!("../src/margins.rs");
}

use hud::*;
use margins::*;
use nebula_core::{preload_margin_px, FpsReading};

#[test]
fn velocity_buckets_produce_the_expected_root_margins() {
    assert_eq!(root_margin_css(preload_margin_px(100.0)), "200px");
    assert_eq!(root_margin_css(preload_margin_px(800.0)), "400px");
    assert_eq!(root_margin_css(preload_margin_px(2000.0)), "800px");
}

#[test]
fn approach_margin_formats_like_any_other() {
    assert_eq!(root_margin_css(600), "600px");
}

#[test]
fn thresholds_are_valid_intersection_ratios() {
    assert!((0.0..=1.0).contains(&GATE_THRESHOLD));
    assert!((0.0..=1.0).contains(&APPROACH_THRESHOLD));
    assert!(APPROACH_THRESHOLD <= GATE_THRESHOLD);
}

#[test]
fn fps_classes_match_the_site_thresholds() {
    assert_eq!(fps_class(60), "fps-good");
    assert_eq!(fps_class(55), "fps-good");
    assert_eq!(fps_class(54), "fps-ok");
    assert_eq!(fps_class(30), "fps-ok");
    assert_eq!(fps_class(29), "fps-bad");
    assert_eq!(fps_class(0), "fps-bad");
}

#[test]
fn fps_text_shows_current_and_average() {
    let text = fps_text(&FpsReading { fps: 58, avg: 61 });
    assert_eq!(text, "FPS 58  AVG 61");
}

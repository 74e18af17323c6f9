// Pure formatting for the development FPS overlay; web-sys-free so host
// tests can include this file directly.

use nebula_core::FpsReading;

/// CSS class encoding the health of a reading, matching the site's
/// green/yellow/red thresholds.
pub fn fps_class(fps: u32) -> &'static str {
    if fps >= 55 {
        "fps-good"
    } else if fps >= 30 {
        "fps-ok"
    } else {
        "fps-bad"
    }
}

pub fn fps_text(reading: &FpsReading) -> String {
    format!("FPS {}  AVG {}", reading.fps, reading.avg)
}

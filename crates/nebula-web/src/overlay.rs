//! Development-only FPS overlay. Production builds never touch the
//! element; the `debug_assertions` gate is checked by the frame loop
//! before the counter is even advanced.

use crate::hud;
use nebula_core::FpsReading;
use web_sys as web;

const OVERLAY_ID: &str = "fps-overlay";

pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("style", "");
    }
}

pub fn update(document: &web::Document, reading: &FpsReading) {
    let Some(el) = document.get_element_by_id(OVERLAY_ID) else {
        return;
    };
    el.set_text_content(Some(&hud::fps_text(reading)));
    let _ = el.set_attribute("class", hud::fps_class(reading.fps));
}

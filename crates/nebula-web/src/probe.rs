//! One-shot capability probe. Runs synchronously at startup before any
//! mount decision; every query is best-effort and a missing answer falls
//! back to the conservative default in `nebula_core::capability`.

use nebula_core::{DeviceProfile, ProbeInputs};
use wasm_bindgen::JsCast;
use web_sys as web;

// WEBGL_debug_renderer_info UNMASKED_RENDERER_WEBGL
const UNMASKED_RENDERER_WEBGL: u32 = 0x9246;

pub fn detect() -> DeviceProfile {
    let window = web::window();

    let user_agent = window
        .as_ref()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default();
    let viewport_width = window
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;
    let reduced_motion = window
        .as_ref()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    let renderer = unmasked_renderer();

    let profile = DeviceProfile::from_probe(&ProbeInputs {
        user_agent: &user_agent,
        viewport_width,
        renderer: renderer.as_deref(),
        reduced_motion,
    });
    log::info!(
        "[probe] mobile={} low_end={} tier={:?} max_dpr={} reduced_motion={} renderer={:?}",
        profile.is_mobile,
        profile.is_low_end,
        profile.gpu_tier,
        profile.max_dpr,
        profile.reduced_motion,
        renderer
    );
    profile
}

/// Read the unmasked renderer string from a throwaway WebGL context. The
/// context is never attached to the page; introspection failing at any
/// step simply yields `None`.
fn unmasked_renderer() -> Option<String> {
    let document = web::window()?.document()?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    let gl = webgl_context(&canvas)?;
    // The extension must be requested before the parameter is unmasked.
    gl.get_extension("WEBGL_debug_renderer_info").ok()??;
    gl.get_parameter(UNMASKED_RENDERER_WEBGL)
        .ok()?
        .as_string()
}

fn webgl_context(canvas: &web::HtmlCanvasElement) -> Option<web::WebGlRenderingContext> {
    for name in ["webgl", "experimental-webgl"] {
        if let Some(ctx) = canvas.get_context(name).ok().flatten() {
            if let Ok(gl) = ctx.dyn_into::<web::WebGlRenderingContext>() {
                return Some(gl);
            }
        }
    }
    None
}

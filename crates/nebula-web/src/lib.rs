#![cfg(target_arch = "wasm32")]

//! WASM entry point. Probes the device once, wires the lazy-section
//! governor and the persisted 3D toggle, and mounts the WebGPU background
//! scene when the capability gate allows it.

mod dom;
mod frame;
mod hud;
mod margins;
mod observer;
mod overlay;
mod prefetch;
mod probe;
mod render;
mod sections;
mod storage;

use crate::frame::{ActiveScene, FrameContext};
use crate::render::{FlareInstance, SceneBuffers, SceneConfig, SpriteInstance, TrailVertex};
use crate::sections::LazySections;
use nebula_core::{
    generate_flares, generate_ribbons, DeviceProfile, EffectsToggle, ParticleField,
    ParticleParams, StarField, Teardown, COLOR_CYAN, DEFAULT_FLARE_LIGHTS,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CANVAS_ID: &str = "bg-canvas";
const FALLBACK_ID: &str = "static-backdrop";
const TOGGLE_ID: &str = "effects-toggle";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    log::info!("nebula-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // One-shot capability probe gates everything that follows.
    let profile = probe::detect();
    let toggle = Rc::new(RefCell::new(EffectsToggle::new(storage::LocalStorage)));

    let sections = LazySections::discover(&document);
    let ctx = Rc::new(RefCell::new(FrameContext::new(document.clone(), sections)));

    if cfg!(debug_assertions) {
        overlay::show(&document);
    }

    // Keep the canvas backing store in sync with CSS size and DPR.
    if let Some(canvas) = canvas_element(&document) {
        let max_dpr = profile.max_dpr;
        let canvas_resize = canvas;
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize, max_dpr);
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            let _ = w
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        }
        resize_closure.forget();
    }

    if toggle.borrow().is_enabled() && profile.allows_canvas() {
        build_scene(&document, profile, &ctx).await;
    } else {
        log::info!(
            "[scene] 3d layer not mounted (enabled={}, canvas_allowed={})",
            toggle.borrow().is_enabled(),
            profile.allows_canvas()
        );
        dom::hide(&document, CANVAS_ID);
        dom::show(&document, FALLBACK_ID);
    }

    {
        let ctx = ctx.clone();
        let toggle = toggle.clone();
        let document_click = document.clone();
        dom::add_click_listener(&document, TOGGLE_ID, move || {
            let enabled = toggle.borrow_mut().toggle();
            if enabled && profile.allows_canvas() {
                let ctx = ctx.clone();
                let document = document_click.clone();
                spawn_local(async move {
                    build_scene(&document, profile, &ctx).await;
                });
            } else {
                ctx.borrow_mut().shutdown_scene();
                dom::hide(&document_click, CANVAS_ID);
                dom::show(&document_click, FALLBACK_ID);
            }
        });
    }

    frame::start_loop(ctx);
    Ok(())
}

fn canvas_element(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document.get_element_by_id(CANVAS_ID)?.dyn_into().ok()
}

async fn build_scene(
    document: &web::Document,
    profile: DeviceProfile,
    ctx: &Rc<RefCell<FrameContext>>,
) {
    if let Err(e) = create_scene(document, profile, ctx).await {
        log::error!("[scene] init failed: {:?}", e);
        dom::hide(document, CANVAS_ID);
        dom::show(document, FALLBACK_ID);
    }
}

async fn create_scene(
    document: &web::Document,
    profile: DeviceProfile,
    ctx: &Rc<RefCell<FrameContext>>,
) -> anyhow::Result<()> {
    if ctx.borrow().scene.is_some() {
        return Ok(());
    }
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::hide(document, FALLBACK_ID);
    dom::show(document, CANVAS_ID);
    dom::sync_canvas_backing_size(&canvas, profile.max_dpr);

    let budget = profile.budget();
    let params = ParticleParams::default();
    let mut field = ParticleField::new(params.clone(), budget, rand::random());
    let mut stars_sim = StarField::new(budget, rand::random());
    let ribbons = generate_ribbons(budget, rand::random());
    let flares = generate_flares(budget, DEFAULT_FLARE_LIGHTS.len(), rand::random());

    let scene_config = SceneConfig {
        particle_capacity: field.len(),
        particle_size: params.size,
        particle_color: params.color,
        aurora_segments: budget.aurora_segments,
        ribbons,
        max_stars: budget.max_stars,
        trail_len: budget.trail_len,
        grid_extent: budget.grid_extent,
        grid_cell: budget.grid_extent / budget.grid_divisions as f32,
        flare_capacity: flares.len(),
    };

    // Leak a canvas clone to satisfy the surface's 'static lifetime.
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas, scene_config).await?;

    let anchors: Vec<[f32; 2]> = DEFAULT_FLARE_LIGHTS
        .iter()
        .map(|l| gpu.project_to_ndc(glam::Vec3::from_array(*l)))
        .collect();

    let buffers = Rc::new(RefCell::new(SceneBuffers::default()));
    let mut callback_ids = Vec::new();
    {
        let mut ctx_mut = ctx.borrow_mut();

        // One scheduler callback per effect with per-frame state.
        let particle_buffers = buffers.clone();
        callback_ids.push(ctx_mut.scheduler.register(move |tick| {
            field.step(tick.time);
            let mut b = particle_buffers.borrow_mut();
            b.time = tick.time;
            b.rotation = field.rotation();
            field.write_instances(&mut b.particles);
        }));

        let star_buffers = buffers.clone();
        callback_ids.push(ctx_mut.scheduler.register(move |tick| {
            stars_sim.step(Duration::from_secs_f32(tick.dt));
            write_star_buffers(&stars_sim, &mut star_buffers.borrow_mut());
        }));

        let flare_buffers = buffers.clone();
        callback_ids.push(ctx_mut.scheduler.register(move |tick| {
            let mut b = flare_buffers.borrow_mut();
            b.flares.clear();
            for (i, element) in flares.iter().enumerate() {
                let anchor = anchors[element.light_index];
                let fade = 0.75 + 0.25 * (tick.time * 0.8 + i as f32).sin();
                let along = 1.0 - element.axis_offset;
                b.flares.push(FlareInstance {
                    ndc: [anchor[0] * along, anchor[1] * along],
                    scale: element.scale,
                    _pad: 0.0,
                    color: [
                        element.color[0],
                        element.color[1],
                        element.color[2],
                        element.opacity * fade,
                    ],
                });
            }
        }));

        let mut teardown = Teardown::new();
        let document_td = document.clone();
        teardown.on_teardown(move || {
            dom::hide(&document_td, CANVAS_ID);
            dom::show(&document_td, FALLBACK_ID);
        });

        ctx_mut.scene = Some(ActiveScene {
            canvas,
            gpu,
            buffers,
            callback_ids,
            teardown,
        });
    }
    log::info!("[scene] 3d layer mounted");
    Ok(())
}

fn write_star_buffers(sim: &StarField, b: &mut SceneBuffers) {
    b.trail_vertices.clear();
    b.trail_ranges.clear();
    b.heads.clear();
    for star in sim.active() {
        let start = b.trail_vertices.len() as u32;
        let len = star.trail.len();
        let trail_alpha = star.trail_opacity();
        for (j, p) in star.trail.iter().enumerate() {
            // Alpha ramps up toward the newest sample.
            let ramp = (j + 1) as f32 / len as f32;
            b.trail_vertices.push(TrailVertex {
                pos: p.to_array(),
                alpha: ramp * trail_alpha,
            });
        }
        b.trail_ranges.push((start, len as u32));

        let opacity = star.opacity();
        b.heads.push(SpriteInstance {
            pos: star.position.to_array(),
            scale: 0.08,
            color: [1.0, 1.0, 1.0, opacity],
        });
        b.heads.push(SpriteInstance {
            pos: star.position.to_array(),
            scale: 0.2,
            color: [COLOR_CYAN[0], COLOR_CYAN[1], COLOR_CYAN[2], opacity * 0.3],
        });
    }
}

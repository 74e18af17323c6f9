//! The single animation loop. Every mounted effect registered a callback
//! on the scheduler; one requestAnimationFrame closure advances the scroll
//! tracker, sweeps the section gates, runs the scheduler and renders.

use crate::sections::LazySections;
use crate::{dom, overlay, render};
use instant::Instant;
use nebula_core::{
    CallbackId, FpsCounter, FrameScheduler, FrameTick, ScrollVelocityTracker, Teardown,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A mounted 3D layer: its canvas, GPU state, shared frame buffers and the
/// scheduler callbacks it owns.
pub struct ActiveScene {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'static>,
    pub buffers: Rc<RefCell<render::SceneBuffers>>,
    pub callback_ids: Vec<CallbackId>,
    pub teardown: Teardown,
}

pub struct FrameContext {
    pub document: web::Document,
    pub scheduler: FrameScheduler,
    pub tracker: ScrollVelocityTracker,
    pub sections: LazySections,
    pub fps: FpsCounter,
    pub scene: Option<ActiveScene>,
    started: Instant,
    last_instant: Instant,
}

impl FrameContext {
    pub fn new(document: web::Document, sections: LazySections) -> Self {
        let now = Instant::now();
        Self {
            document,
            scheduler: FrameScheduler::new(),
            tracker: ScrollVelocityTracker::new(),
            sections,
            fps: FpsCounter::new(),
            scene: None,
            started: now,
            last_instant: now,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let time = (now - self.started).as_secs_f32();

        let now_ms = dom::performance_now_ms();
        let sample = self.tracker.tick(now_ms, dom::scroll_y());
        self.sections.sweep(&self.document, sample.velocity);

        self.scheduler.run_frame(&FrameTick { time, dt });

        if let Some(scene) = &mut self.scene {
            let w = scene.canvas.width();
            let h = scene.canvas.height();
            scene.gpu.resize_if_needed(w, h);
            let buffers = scene.buffers.borrow();
            if let Err(e) = scene.gpu.render(&buffers) {
                log::error!("render error: {:?}", e);
            }
        }

        // Diagnostic overlay exists only in development builds.
        if cfg!(debug_assertions) {
            if let Some(reading) = self.fps.frame(now_ms) {
                overlay::update(&self.document, &reading);
            }
        }
    }

    /// Unmount the 3D layer: deregister its frame callbacks before
    /// anything else so no callback can touch released state, then run the
    /// teardown stack and drop the GPU state (whose own Drop releases the
    /// buffers even on paths that skip this method).
    pub fn shutdown_scene(&mut self) {
        let Some(mut scene) = self.scene.take() else {
            return;
        };
        for id in scene.callback_ids.drain(..) {
            self.scheduler.deregister(id);
        }
        scene.teardown.dispose();
        log::info!("[scene] 3d layer unmounted");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

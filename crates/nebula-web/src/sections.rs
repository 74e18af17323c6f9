//! Registry of lazily-mounted page sections. Each `.lazy-section` element
//! gets a [`SectionGate`] plus two observers: the mount gate (margin
//! follows the scroll-velocity bucket) and a wider fire-once approach
//! observer used to prefetch the section's images.
//!
//! Observer callbacks only record what happened; the frame loop's sweep
//! applies the consequences (mount, prefetch, observer retune), so DOM and
//! observer lifecycles stay in one place.

use crate::margins::{APPROACH_THRESHOLD, GATE_THRESHOLD};
use crate::observer::SectionObserver;
use crate::prefetch;
use fnv::FnvHashMap;
use nebula_core::SectionGate;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct SectionSlot {
    id: String,
    element: web::Element,
    gate: RefCell<SectionGate>,
    pending_mount: Cell<bool>,
    pending_prefetch: Cell<bool>,
    mount_observer: RefCell<Option<SectionObserver>>,
    approach_observer: RefCell<Option<SectionObserver>>,
}

#[derive(Default)]
pub struct LazySections {
    slots: FnvHashMap<String, Rc<SectionSlot>>,
}

impl LazySections {
    /// Find every `.lazy-section` element and arm its observers.
    pub fn discover(document: &web::Document) -> Self {
        let mut slots = FnvHashMap::default();
        let Ok(nodes) = document.query_selector_all(".lazy-section") else {
            return Self { slots };
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok())
            else {
                continue;
            };
            let id = if element.id().is_empty() {
                format!("section-{i}")
            } else {
                element.id()
            };
            let slot = Rc::new(SectionSlot {
                id: id.clone(),
                element,
                gate: RefCell::new(SectionGate::new()),
                pending_mount: Cell::new(false),
                pending_prefetch: Cell::new(false),
                mount_observer: RefCell::new(None),
                approach_observer: RefCell::new(None),
            });
            arm_mount_observer(&slot);
            arm_approach_observer(&slot);
            slots.insert(id, slot);
        }
        log::info!("[sections] governing {} lazy section(s)", slots.len());
        Self { slots }
    }

    /// Apply everything the observer callbacks recorded since the last
    /// frame, then retune margins against the current scroll velocity.
    pub fn sweep(&self, document: &web::Document, velocity: f32) {
        for slot in self.slots.values() {
            if slot.pending_prefetch.take() {
                let urls = prefetch::prefetch_urls(&slot.element);
                if !urls.is_empty() {
                    prefetch::prefetch_images(document, &urls);
                }
                // Fire-once: the approach observer has served its purpose.
                *slot.approach_observer.borrow_mut() = None;
            }

            if slot.pending_mount.take() {
                mount_content(slot);
                *slot.mount_observer.borrow_mut() = None;
                *slot.approach_observer.borrow_mut() = None;
            } else if let Some(margin) = slot.gate.borrow_mut().retune(velocity) {
                log::debug!("[sections] '{}' retuned to {}px", slot.id, margin);
                arm_mount_observer(slot);
            }
        }
    }
}

fn arm_mount_observer(slot: &Rc<SectionSlot>) {
    let weak = Rc::downgrade(slot);
    let margin = slot.gate.borrow().margin_px();
    let observer = SectionObserver::observe(
        &slot.element,
        margin,
        GATE_THRESHOLD,
        move |intersecting| {
            if let Some(slot) = weak.upgrade() {
                if slot.gate.borrow_mut().on_intersection(intersecting) {
                    slot.pending_mount.set(true);
                }
            }
        },
    );
    match observer {
        Ok(observer) => *slot.mount_observer.borrow_mut() = Some(observer),
        Err(e) => {
            // No observer means no deferral: mount immediately rather than
            // leave the section blank.
            log::warn!("[sections] observer failed for '{}': {:?}", slot.id, e);
            slot.gate.borrow_mut().on_intersection(true);
            slot.pending_mount.set(true);
        }
    }
}

fn arm_approach_observer(slot: &Rc<SectionSlot>) {
    let weak = Rc::downgrade(slot);
    let margin = slot.gate.borrow().approach_margin_px();
    let observer = SectionObserver::observe(
        &slot.element,
        margin,
        APPROACH_THRESHOLD,
        move |intersecting| {
            if let Some(slot) = weak.upgrade() {
                if slot.gate.borrow_mut().on_approach(intersecting) {
                    slot.pending_prefetch.set(true);
                }
            }
        },
    );
    if let Ok(observer) = observer {
        *slot.approach_observer.borrow_mut() = Some(observer);
    }
}

/// Reveal the real content and retire the skeleton. The latch in the gate
/// guarantees this runs once per section.
fn mount_content(slot: &SectionSlot) {
    if let Ok(Some(content)) = slot.element.query_selector("[data-lazy-content]") {
        if let Some(content) = content.dyn_ref::<web::HtmlElement>() {
            content.set_hidden(false);
        }
    }
    if let Ok(Some(skeleton)) = slot.element.query_selector("[data-lazy-skeleton]") {
        if let Some(skeleton) = skeleton.dyn_ref::<web::HtmlElement>() {
            skeleton.set_hidden(true);
        }
    }
    let _ = slot.element.class_list().add_1("is-mounted");
    log::info!("[sections] mounted '{}'", slot.id);
}

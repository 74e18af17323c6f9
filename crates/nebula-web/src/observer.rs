//! IntersectionObserver glue for the section gates. Each observer owns its
//! callback closure and disconnects itself on drop, so replacing an
//! observer (margin retune) or dropping a section can never leave a live
//! callback behind.

use crate::margins::root_margin_css;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct SectionObserver {
    observer: web::IntersectionObserver,
    _closure: Closure<dyn FnMut(js_sys::Array)>,
}

impl SectionObserver {
    /// Observe `element` with a symmetric margin; `on_report` receives the
    /// `is_intersecting` flag of every entry.
    pub fn observe(
        element: &web::Element,
        margin_px: u32,
        threshold: f64,
        mut on_report: impl FnMut(bool) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    on_report(entry.is_intersecting());
                }
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let options = web::IntersectionObserverInit::new();
        options.set_root_margin(&root_margin_css(margin_px));
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = web::IntersectionObserver::new_with_options(
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        observer.observe(element);

        Ok(Self {
            observer,
            _closure: closure,
        })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

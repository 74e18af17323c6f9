//! Asset prefetch ahead of a section mount: one `<link rel="prefetch">`
//! per URL, appended to the document head. Failures are ignored; prefetch
//! is advisory.

use wasm_bindgen::JsCast;
use web_sys as web;

pub fn prefetch_images(document: &web::Document, urls: &[String]) {
    let Some(head) = document.head() else {
        return;
    };
    for url in urls {
        let Ok(el) = document.create_element("link") else {
            continue;
        };
        let Ok(link) = el.dyn_into::<web::HtmlLinkElement>() else {
            continue;
        };
        link.set_rel("prefetch");
        let _ = link.set_attribute("as", "image");
        link.set_href(url);
        let _ = head.append_child(&link);
    }
    log::debug!("[prefetch] queued {} image(s)", urls.len());
}

/// Parse a section's `data-prefetch` attribute: comma-separated URLs.
pub fn prefetch_urls(element: &web::Element) -> Vec<String> {
    element
        .get_attribute("data-prefetch")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

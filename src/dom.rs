use crate::constants::{ATTR_CURSOR, ATTR_CURSOR_REGION};
use crate::core::capability::Capabilities;
use crate::core::cursor::ElementInfo;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

fn media_matches(window: &web::Window, query: &str) -> Option<bool> {
    match window.match_media(query) {
        Ok(Some(list)) => Some(list.matches()),
        Ok(None) => None,
        Err(e) => {
            log::warn!("[gate] matchMedia({}) failed: {:?}", query, e);
            None
        }
    }
}

/// Evaluated once on startup.
pub fn read_capabilities(window: &web::Window) -> Capabilities {
    let (viewport_width, _) = viewport(window);
    Capabilities {
        reduced_motion: media_matches(window, "(prefers-reduced-motion: reduce)"),
        coarse_pointer: media_matches(window, "(pointer: coarse)"),
        viewport_width,
    }
}

pub fn viewport(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

#[inline]
pub fn event_element(ev: &web::Event) -> Option<web::Element> {
    ev.target().and_then(|t| t.dyn_into::<web::Element>().ok())
}

#[inline]
pub fn closest(el: &web::Element, selector: &str) -> Option<web::Element> {
    el.closest(selector).ok().flatten()
}

/// Hovered element first, then every ancestor up to `<html>`.
pub fn element_path(target: &web::Element) -> Vec<ElementInfo> {
    let mut path = Vec::new();
    let mut cur = Some(target.clone());
    while let Some(el) = cur {
        let mut info = ElementInfo::new(&el.tag_name());
        let classes = el.class_list();
        for i in 0..classes.length() {
            if let Some(c) = classes.item(i) {
                info.classes.push(c);
            }
        }
        info.cursor_override = el.get_attribute(ATTR_CURSOR);
        info.region = el.get_attribute(ATTR_CURSOR_REGION);
        path.push(info);
        cur = el.parent_element();
    }
    path
}

pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    let mut out = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                out.push(el);
            }
        }
    }
    out
}

pub fn query_document(document: &web::Document, selector: &str) -> Vec<web::Element> {
    document
        .document_element()
        .map(|root| query_all(&root, selector))
        .unwrap_or_default()
}

#[inline]
pub fn set_style(el: &web::Element, prop: &str, value: &str) {
    if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
        _ = h.style().set_property(prop, value);
    }
}

pub fn set_transform(el: &web::Element, value: &str) {
    set_style(el, "transform", value);
}

pub fn set_opacity(el: &web::Element, value: f32) {
    set_style(el, "opacity", &format!("{:.3}", value));
}

pub fn attr_f64(el: &web::Element, name: &str) -> Option<f64> {
    el.get_attribute(name).and_then(|v| v.trim().parse().ok())
}

//! Full-screen loader shown over the home page until the visitor enters and
//! the hero has finished its first reveal.

use crate::constants::LOADER_ID;
use web_sys as web;

const STATUS_SELECTOR: &str = "[data-loader-status]";

#[inline]
fn loader(document: &web::Document) -> Option<web::Element> {
    document.get_element_by_id(LOADER_ID)
}

fn set_visible(el: &web::Element, visible: bool) {
    let cl = el.class_list();
    _ = if visible {
        cl.remove_1("hidden")
    } else {
        cl.add_1("hidden")
    };
    // inline fallback for stylesheets without a .hidden rule
    _ = el.set_attribute("style", if visible { "" } else { "display:none" });
    _ = el.set_attribute("aria-hidden", if visible { "false" } else { "true" });
}

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = loader(document) {
        set_visible(&el, true);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = loader(document) {
        set_visible(&el, false);
    }
}

/// A page without a loader counts as already hidden.
pub fn is_hidden(document: &web::Document) -> bool {
    let Some(el) = loader(document) else {
        return true;
    };
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .is_some_and(|s| s.contains("display:none"))
}

pub fn set_status(document: &web::Document, text: &str) {
    if let Some(Ok(Some(status))) = loader(document).map(|el| el.query_selector(STATUS_SELECTOR)) {
        status.set_text_content(Some(text));
    }
}

#![cfg(target_arch = "wasm32")]
use crate::constants::ATTR_SOCIAL;
use crate::core::site::{PageMeta, Route, SiteConfig, Social};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod constants;
mod core;
mod dom;
mod frame;
mod host;
mod overlay;
mod render;
mod views;

/// Sets `<meta name|property=key content=value>`, creating the tag if absent.
fn upsert_meta(document: &web::Document, attr: &str, key: &str, value: &str) {
    let selector = format!("meta[{}=\"{}\"]", attr, key);
    let existing = document.query_selector(&selector).ok().flatten();
    let el = match existing {
        Some(el) => el,
        None => {
            let Ok(el) = document.create_element("meta") else {
                return;
            };
            _ = el.set_attribute(attr, key);
            if let Some(head) = document.head() {
                _ = head.append_child(&el);
            }
            el
        }
    };
    if let Some(meta) = el.dyn_ref::<web::HtmlMetaElement>() {
        meta.set_content(value);
    } else {
        _ = el.set_attribute("content", value);
    }
}

fn write_head_meta(document: &web::Document, meta: &PageMeta) {
    document.set_title(&meta.title);
    upsert_meta(document, "name", "description", &meta.description);
    upsert_meta(document, "property", "og:title", &meta.title);
    upsert_meta(document, "property", "og:description", &meta.description);
    upsert_meta(document, "property", "og:image", &meta.image);
    upsert_meta(document, "name", "twitter:card", "summary_large_image");
}

/// Points every `a[data-social]` at the configured profile.
fn write_social_links(document: &web::Document, config: &SiteConfig) {
    for el in dom::query_document(document, &format!("a[{}]", ATTR_SOCIAL)) {
        let url = el
            .get_attribute(ATTR_SOCIAL)
            .and_then(|k| Social::from_key(&k))
            .and_then(|s| config.social_url(s));
        let Some(url) = url else {
            continue;
        };
        _ = el.set_attribute("href", url);
        _ = el.set_attribute("target", "_blank");
        _ = el.set_attribute("rel", "noopener noreferrer");
    }
}

fn wire_pagehide(app: &Rc<RefCell<app::App>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let weak = Rc::downgrade(app);
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(app) = weak.upgrade() else { return };
        if let Ok(mut a) = app.try_borrow_mut() {
            a.teardown();
        };
    }) as Box<dyn FnMut(web::Event)>);
    window
        .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    // Lives as long as the page.
    closure.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mentor-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let caps = dom::read_capabilities(&window);
    let path = window
        .location()
        .pathname()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let route = Route::from_path(&path);
    let form_url = document
        .body()
        .and_then(|b| b.get_attribute("data-form-url"));
    let config = SiteConfig::default().with_form_url(form_url.as_deref());
    log::info!(
        "[gate] reduced_motion={:?} coarse_pointer={:?} width={:.0}",
        caps.reduced_motion,
        caps.coarse_pointer,
        caps.viewport_width
    );

    write_head_meta(&document, &route.meta(&config));
    write_social_links(&document, &config);

    let seed: u64 = rand::random();
    let app = Rc::new_cyclic(|this| {
        RefCell::new(app::App::new(this.clone(), caps, route, config, seed))
    });
    app.borrow_mut().mount_all();
    wire_pagehide(&app)?;

    // The app is otherwise held only by weak references in its own callbacks.
    std::mem::forget(app);
    Ok(())
}

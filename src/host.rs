//! Browser implementation of the lifecycle `Host`.
//!
//! Listeners, frame loops and timers all hold only a weak reference to the
//! app, so a torn-down app is never kept alive by a stray callback.

use crate::app::App;
use crate::core::lifecycle::{EventKind, Host, Subsystem};
use crate::frame::FrameLoop;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct DomListener {
    target: web::EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

pub struct DomTimer {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

pub struct DomHost {
    app: Weak<RefCell<App>>,
}

fn event_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::PointerMove => "pointermove",
        EventKind::PointerOver => "pointerover",
        EventKind::PointerLeave => "pointerleave",
        EventKind::Scroll => "scroll",
        EventKind::Resize => "resize",
        EventKind::Click => "click",
        EventKind::Submit => "submit",
        EventKind::Input => "pointerdown",
    }
}

fn event_target(kind: EventKind) -> Option<web::EventTarget> {
    let window = web::window()?;
    let document = window.document()?;
    let target: web::EventTarget = match kind {
        EventKind::PointerMove | EventKind::Scroll | EventKind::Resize => window.into(),
        // pointerleave does not bubble; the root element sees the pointer
        // leaving the page.
        EventKind::PointerLeave => document.document_element()?.into(),
        EventKind::PointerOver | EventKind::Click | EventKind::Submit | EventKind::Input => {
            document.into()
        }
    };
    Some(target)
}

impl DomHost {
    pub fn new(app: Weak<RefCell<App>>) -> Self {
        Self { app }
    }
}

impl Host for DomHost {
    type Listener = DomListener;
    type Frame = FrameLoop;
    type Timer = DomTimer;

    fn listen(&mut self, owner: Subsystem, kind: EventKind) -> Option<DomListener> {
        let target = event_target(kind)?;
        let name = event_name(kind);
        let app = self.app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            let Some(app) = app.upgrade() else { return };
            // Re-entrant dispatch (an event fired synchronously from inside a
            // handler) is dropped; the next event carries the latest state.
            if let Ok(mut a) = app.try_borrow_mut() {
                a.dispatch(owner, kind, &ev);
            };
        }) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::warn!("[mount] {:?} could not listen to {}: {:?}", owner, name, e);
            return None;
        }
        Some(DomListener {
            target,
            name,
            closure,
        })
    }

    fn unlisten(&mut self, listener: DomListener) {
        _ = listener.target.remove_event_listener_with_callback(
            listener.name,
            listener.closure.as_ref().unchecked_ref(),
        );
    }

    fn request_frames(&mut self, owner: Subsystem) -> Option<FrameLoop> {
        let app = self.app.clone();
        FrameLoop::start(move |dt_ms| {
            let Some(app) = app.upgrade() else { return };
            if let Ok(mut a) = app.try_borrow_mut() {
                a.frame(owner, dt_ms);
            };
        })
    }

    fn cancel_frames(&mut self, frame: FrameLoop) {
        frame.cancel();
    }

    fn start_timer(&mut self, owner: Subsystem, delay_ms: u32) -> Option<DomTimer> {
        let window = web::window()?;
        let app = self.app.clone();
        let closure = Closure::wrap(Box::new(move || {
            let Some(app) = app.upgrade() else { return };
            if let Ok(mut a) = app.try_borrow_mut() {
                a.on_timer(owner);
            };
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|e| log::warn!("[mount] {:?} timer failed: {:?}", owner, e))
            .ok()?;
        Some(DomTimer {
            id,
            _closure: closure,
        })
    }

    fn clear_timer(&mut self, timer: DomTimer) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(timer.id);
        }
    }
}

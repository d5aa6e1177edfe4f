use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MAX_FRAME_DT_MS;

/// Measures elapsed time between frames of one loop.
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous tick, clamped after long stalls.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = match self.last {
            Some(prev) => (now - prev).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(MAX_FRAME_DT_MS)
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling `requestAnimationFrame` loop with a cancellation handle.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Option<Self> {
        let window = web::window()?;
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: TickSlot = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        let mut clock = FrameClock::new();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            on_frame(clock.tick());
            // Cancelled loops have an empty slot and must not reschedule.
            let slot = tick_clone.borrow();
            if let (Some(w), Some(cb)) = (web::window(), slot.as_ref()) {
                raf_clone.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));

        let id = {
            let slot = tick.borrow();
            let cb = slot.as_ref()?;
            window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
        };
        raf_id.set(id);
        Some(Self { raf_id, tick })
    }

    pub fn cancel(self) {
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            _ = w.cancel_animation_frame(id);
        }
        // Dropping the closure also breaks its self-reference.
        self.tick.borrow_mut().take();
    }
}

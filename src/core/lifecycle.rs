// Subscription bookkeeping for every mounted subsystem.
//
// A subsystem acquires its listeners, its frame loop and its timers through
// a [`Scope`]; disposing the scope releases all of them, and disposing twice
// is a no-op. The browser implements [`Host`] on top of `addEventListener`,
// `requestAnimationFrame` and `setTimeout`.

use super::capability::{Capabilities, LayoutMode};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerOver,
    PointerLeave,
    Scroll,
    Resize,
    Click,
    Submit,
    Input,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subsystem {
    Cursor,
    Loader,
    Hero,
    Fluid,
    Reveals,
    Pins,
    Carousel,
    ContactForm,
    Cta,
}

impl Subsystem {
    /// Rich subsystems do per-frame work and must not mount at all when the
    /// capability gate says no.
    pub fn requires_rich_motion(self) -> bool {
        matches!(self, Subsystem::Cursor | Subsystem::Hero | Subsystem::Fluid)
    }

    pub fn events(self, layout: LayoutMode) -> &'static [EventKind] {
        use EventKind::*;
        match self {
            Subsystem::Cursor => &[PointerMove, PointerOver, PointerLeave],
            Subsystem::Loader => &[Click],
            Subsystem::Hero => &[PointerMove, PointerOver, PointerLeave, Scroll, Resize, Click],
            Subsystem::Fluid => &[PointerMove, PointerLeave, Resize],
            Subsystem::Reveals => &[Scroll, Resize],
            Subsystem::Pins => match layout {
                LayoutMode::Horizontal => &[Scroll, Resize],
                // Stacked panels only need intersection checks.
                LayoutMode::Stacked => &[Scroll],
            },
            Subsystem::Carousel => &[Input, Resize],
            Subsystem::ContactForm => &[Submit],
            Subsystem::Cta => &[Click],
        }
    }

    pub fn needs_frames(self) -> bool {
        matches!(
            self,
            Subsystem::Cursor
                | Subsystem::Hero
                | Subsystem::Fluid
                | Subsystem::Reveals
                | Subsystem::Pins
                | Subsystem::Carousel
        )
    }
}

/// Browser-side resource provider.
pub trait Host {
    type Listener;
    type Frame;
    type Timer;

    fn listen(&mut self, owner: Subsystem, kind: EventKind) -> Option<Self::Listener>;
    fn unlisten(&mut self, listener: Self::Listener);
    fn request_frames(&mut self, owner: Subsystem) -> Option<Self::Frame>;
    fn cancel_frames(&mut self, frame: Self::Frame);
    fn start_timer(&mut self, owner: Subsystem, delay_ms: u32) -> Option<Self::Timer>;
    fn clear_timer(&mut self, timer: Self::Timer);
}

pub struct Scope<H: Host> {
    listeners: Vec<H::Listener>,
    frames: Option<H::Frame>,
    timer: Option<H::Timer>,
}

impl<H: Host> Default for Scope<H> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            frames: None,
            timer: None,
        }
    }
}

impl<H: Host> Scope<H> {
    pub fn listen(&mut self, host: &mut H, owner: Subsystem, kind: EventKind) {
        if let Some(l) = host.listen(owner, kind) {
            self.listeners.push(l);
        }
    }

    pub fn run_frames(&mut self, host: &mut H, owner: Subsystem) {
        if self.frames.is_none() {
            self.frames = host.request_frames(owner);
        }
    }

    /// Debounced: any pending timer is cleared before the new one starts.
    pub fn restart_timer(&mut self, host: &mut H, owner: Subsystem, delay_ms: u32) {
        self.clear_timer(host);
        self.timer = host.start_timer(owner, delay_ms);
    }

    pub fn clear_timer(&mut self, host: &mut H) {
        if let Some(t) = self.timer.take() {
            host.clear_timer(t);
        }
    }

    /// Called by the owner when its timer fired so it is not cleared twice.
    pub fn timer_fired(&mut self) {
        self.timer = None;
    }

    pub fn dispose(&mut self, host: &mut H) {
        for l in self.listeners.drain(..) {
            host.unlisten(l);
        }
        if let Some(f) = self.frames.take() {
            host.cancel_frames(f);
        }
        self.clear_timer(host);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.frames.is_none() && self.timer.is_none()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Every mounted subsystem and its scope.
pub struct Mounts<H: Host> {
    scopes: FnvHashMap<Subsystem, Scope<H>>,
    caps: Capabilities,
}

impl<H: Host> Mounts<H> {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            scopes: FnvHashMap::default(),
            caps,
        }
    }

    /// Returns false (and acquires nothing) if the subsystem is gated off or
    /// already mounted.
    pub fn mount(&mut self, host: &mut H, subsystem: Subsystem) -> bool {
        if subsystem.requires_rich_motion() && !self.caps.should_animate() {
            log::info!("[gate] {:?} skipped: rich motion disabled", subsystem);
            return false;
        }
        if self.scopes.contains_key(&subsystem) {
            return false;
        }
        let mut scope = Scope::default();
        for kind in subsystem.events(self.caps.layout_mode()) {
            scope.listen(host, subsystem, *kind);
        }
        if subsystem.needs_frames() {
            scope.run_frames(host, subsystem);
        }
        log::debug!(
            "[mount] {:?} listeners={}",
            subsystem,
            scope.listener_count()
        );
        self.scopes.insert(subsystem, scope);
        true
    }

    pub fn is_mounted(&self, subsystem: Subsystem) -> bool {
        self.scopes.contains_key(&subsystem)
    }

    pub fn restart_timer(&mut self, host: &mut H, subsystem: Subsystem, delay_ms: u32) {
        if let Some(s) = self.scopes.get_mut(&subsystem) {
            s.restart_timer(host, subsystem, delay_ms);
        }
    }

    pub fn clear_timer(&mut self, host: &mut H, subsystem: Subsystem) {
        if let Some(s) = self.scopes.get_mut(&subsystem) {
            s.clear_timer(host);
        }
    }

    pub fn timer_fired(&mut self, subsystem: Subsystem) {
        if let Some(s) = self.scopes.get_mut(&subsystem) {
            s.timer_fired();
        }
    }

    pub fn unmount(&mut self, host: &mut H, subsystem: Subsystem) {
        if let Some(mut s) = self.scopes.remove(&subsystem) {
            s.dispose(host);
        }
    }

    pub fn unmount_all(&mut self, host: &mut H) {
        let mut keys: Vec<Subsystem> = self.scopes.keys().copied().collect();
        keys.sort();
        for k in keys {
            self.unmount(host, k);
        }
    }

    pub fn mounted(&self) -> impl Iterator<Item = Subsystem> + '_ {
        self.scopes.keys().copied()
    }
}

//! The mounted page: one binding per subsystem plus the lifecycle
//! bookkeeping that owns every listener, frame loop and timer.

use crate::constants::*;
use crate::core::color;
use crate::core::contact::{ContactFields, FormSink, LogSink, CONFIRMATION_MESSAGE};
use crate::core::cursor::CustomCursor;
use crate::core::fluid::FluidError;
use crate::core::hero::{HeroOrchestrator, HeroSignal};
use crate::core::lifecycle::{EventKind, Mounts, Subsystem};
use crate::core::pin::{PinLayout, PinnedSection, PinnedTrack, SubKind};
use crate::core::reveal::{
    intersection_ratio, CurtainEdge, FadeFrame, FadeUp, LineCascade, OneShotReveal, RevealFrame,
    RevealParams, RevealState,
};
use crate::core::site::{cta_target, Route, SiteConfig};
use crate::core::timers::{Carousel, LoaderGate, LoaderState, TimerAction};
use crate::core::{
    Capabilities, LayoutMode, CAROUSEL_RESUME_MS, LOADER_AUTO_ADVANCE_MS, REVEAL_THRESHOLD,
};
use crate::dom;
use crate::host::DomHost;
use crate::overlay;
use crate::render::FluidGpu;
use crate::views::{self, CursorView, HeroView};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

struct CursorBinding {
    cursor: CustomCursor,
    view: CursorView,
}

struct HeroBinding {
    hero: HeroOrchestrator,
    view: HeroView,
}

enum RevealKind {
    Block {
        reveal: OneShotReveal,
        curtain: Option<web::Element>,
    },
    Lines {
        cascade: LineCascade,
        lines: Vec<(web::Element, Option<web::Element>)>,
        color: [f32; 4],
        frames: Vec<RevealFrame>,
    },
    Fade(FadeUp),
}

struct RevealBinding {
    el: web::Element,
    kind: RevealKind,
    done: bool,
}

struct PinBinding {
    section_el: web::Element,
    panels: Vec<web::Element>,
    subs: Vec<web::Element>,
    text_flags: Vec<bool>,
    layout: PinLayout,
}

struct CarouselBinding {
    root: web::Element,
    track: web::Element,
    carousel: Carousel,
}

struct FluidBinding {
    canvas: web::HtmlCanvasElement,
    gpu: FluidGpu,
}

const SHOWN: RevealFrame = RevealFrame {
    curtain_origin: CurtainEdge::Right,
    curtain_scale: 0.0,
    content_opacity: 1.0,
};

pub struct App {
    caps: Capabilities,
    route: Route,
    config: SiteConfig,
    host: DomHost,
    mounts: Mounts<DomHost>,
    this: Weak<RefCell<App>>,
    epoch: Instant,
    seed: u64,

    cursor: Option<CursorBinding>,
    hero: Option<HeroBinding>,
    fluid: Option<FluidBinding>,
    reveals: Vec<RevealBinding>,
    reveals_dirty: bool,
    pins: Vec<PinBinding>,
    carousels: Vec<CarouselBinding>,
    loader: Option<LoaderGate>,
    sink: LogSink,
}

impl App {
    pub fn new(
        this: Weak<RefCell<App>>,
        caps: Capabilities,
        route: Route,
        config: SiteConfig,
        seed: u64,
    ) -> Self {
        Self {
            host: DomHost::new(this.clone()),
            mounts: Mounts::new(caps),
            caps,
            route,
            config,
            this,
            epoch: Instant::now(),
            seed,
            cursor: None,
            hero: None,
            fluid: None,
            reveals: Vec::new(),
            reveals_dirty: true,
            pins: Vec::new(),
            carousels: Vec::new(),
            loader: None,
            sink: LogSink::default(),
        }
    }

    #[inline]
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn mount_all(&mut self) {
        log::info!(
            "[mount] route={:?} animate={} layout={:?}",
            self.route,
            self.caps.should_animate(),
            self.caps.layout_mode()
        );
        for s in self.route.subsystems() {
            if self.mounts.mount(&mut self.host, *s) && !self.bind(*s) {
                // Missing markup: release what the mount acquired.
                log::info!("[mount] {:?} has no markup on this page", s);
                self.mounts.unmount(&mut self.host, *s);
            }
        }
        let hero_bound = self.hero.is_some();
        if let Some(gate) = self.loader.as_mut() {
            gate.settle(hero_bound);
        }
    }

    /// Returns false when the page lacks the nodes the subsystem drives.
    fn bind(&mut self, s: Subsystem) -> bool {
        let Some(document) = dom::window_document() else {
            return false;
        };
        match s {
            Subsystem::Cursor => {
                self.cursor = CursorView::bind(&document).map(|view| CursorBinding {
                    cursor: CustomCursor::new(self.seed),
                    view,
                });
                self.cursor.is_some()
            }
            Subsystem::Loader => {
                if document.get_element_by_id(LOADER_ID).is_none() {
                    return false;
                }
                overlay::show(&document);
                overlay::set_status(&document, "Tap anywhere to enter");
                self.loader = Some(LoaderGate::new());
                self.mounts
                    .restart_timer(&mut self.host, Subsystem::Loader, LOADER_AUTO_ADVANCE_MS);
                true
            }
            Subsystem::Hero => {
                self.hero = HeroView::bind(&document).map(|view| HeroBinding {
                    hero: HeroOrchestrator::new(view.layout(), self.seed.rotate_left(17)),
                    view,
                });
                self.hero.is_some()
            }
            Subsystem::Fluid => self.start_fluid(&document),
            Subsystem::Reveals => {
                self.bind_reveals(&document);
                !self.reveals.is_empty()
            }
            Subsystem::Pins => {
                self.bind_pins(&document);
                !self.pins.is_empty()
            }
            Subsystem::Carousel => {
                self.bind_carousels(&document);
                !self.carousels.is_empty()
            }
            Subsystem::ContactForm => document.get_element_by_id(CONTACT_FORM_ID).is_some(),
            Subsystem::Cta => matches!(document.query_selector(CTA_SELECTOR), Ok(Some(_))),
        }
    }

    fn bind_reveals(&mut self, document: &web::Document) {
        let animate = self.caps.reduced_motion != Some(true);
        for el in dom::query_document(document, REVEAL_SELECTOR) {
            let params = RevealParams {
                threshold: dom::attr_f64(&el, "data-reveal-threshold")
                    .map(|t| t as f32)
                    .unwrap_or(REVEAL_THRESHOLD),
                delay_ms: dom::attr_f64(&el, "data-reveal-delay").unwrap_or(0.0),
                color: el
                    .get_attribute("data-reveal-color")
                    .and_then(|c| color::parse_hex_color(&c))
                    .unwrap_or(RevealParams::default().color),
                ..RevealParams::default()
            };
            let line_els = dom::query_all(&el, REVEAL_LINE_SELECTOR);
            let kind = if line_els.is_empty() {
                RevealKind::Block {
                    reveal: OneShotReveal::new(params),
                    curtain: views::ensure_curtain(document, &el),
                }
            } else {
                RevealKind::Lines {
                    cascade: LineCascade::new(line_els.len(), params),
                    lines: line_els
                        .into_iter()
                        .map(|l| {
                            let c = views::ensure_curtain(document, &l);
                            (l, c)
                        })
                        .collect(),
                    color: params.color,
                    frames: Vec::new(),
                }
            };
            self.reveals.push(RevealBinding {
                el,
                kind,
                done: false,
            });
        }
        for el in dom::query_document(document, FADE_UP_SELECTOR) {
            let delay = dom::attr_f64(&el, "data-fade-delay").unwrap_or(0.0);
            self.reveals.push(RevealBinding {
                el,
                kind: RevealKind::Fade(FadeUp::new(REVEAL_THRESHOLD, delay)),
                done: false,
            });
        }
        if !animate {
            // Reduced motion: content is simply present.
            for r in &mut self.reveals {
                show_final(r);
            }
        }
        log::debug!("[reveal] bound {}", self.reveals.len());
    }

    fn bind_pins(&mut self, document: &web::Document) {
        let mode = self.caps.layout_mode();
        for section_el in dom::query_document(document, PIN_SELECTOR) {
            let panels = dom::query_all(&section_el, PIN_PANEL_SELECTOR);
            let mut section = PinnedSection::new(measure_track(&section_el, panels.len()));
            let mut subs = Vec::new();
            let mut text_flags = Vec::new();
            for (i, panel) in panels.iter().enumerate() {
                for el in dom::query_all(panel, PIN_PARALLAX_SELECTOR) {
                    let depth = dom::attr_f64(&el, "data-parallax").unwrap_or(40.0) as f32;
                    section = section.with_sub(i, SubKind::Parallax { depth_px: depth });
                    subs.push(el);
                    text_flags.push(false);
                }
                for (order, el) in dom::query_all(panel, PIN_TEXT_SELECTOR).into_iter().enumerate() {
                    section = section.with_sub(i, SubKind::TextEntrance { order });
                    subs.push(el);
                    text_flags.push(true);
                }
            }
            _ = section_el.set_attribute(
                "data-pin-mode",
                match mode {
                    LayoutMode::Horizontal => "horizontal",
                    LayoutMode::Stacked => "stacked",
                },
            );
            self.pins.push(PinBinding {
                layout: PinLayout::for_mode(mode, section, REVEAL_THRESHOLD),
                section_el,
                panels,
                subs,
                text_flags,
            });
        }
    }

    fn bind_carousels(&mut self, document: &web::Document) {
        for root in dom::query_document(document, CAROUSEL_SELECTOR) {
            let Ok(Some(track)) = root.query_selector(CAROUSEL_TRACK_SELECTOR) else {
                continue;
            };
            let width = carousel_wrap_width(&track);
            self.carousels.push(CarouselBinding {
                root,
                track,
                carousel: Carousel::new(width),
            });
        }
    }

    fn start_fluid(&mut self, document: &web::Document) -> bool {
        let Some(canvas) = document
            .get_element_by_id(FLUID_CANVAS_ID)
            .and_then(|e| e.dyn_into::<web::HtmlCanvasElement>().ok())
        else {
            log::debug!("[fluid] no canvas on this page");
            return false;
        };
        let Some(src) = canvas.get_attribute(FLUID_BACKGROUND_ATTR) else {
            log::warn!("[fluid] canvas has no {}", FLUID_BACKGROUND_ATTR);
            return false;
        };
        dom::sync_canvas_backing_size(&canvas);
        let this = self.this.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let gpu = match init_fluid(&canvas, &src).await {
                Ok(gpu) => gpu,
                Err(e) => {
                    log::warn!("[fluid] disabled: {}", e);
                    return;
                }
            };
            let Some(app) = this.upgrade() else { return };
            let Ok(mut a) = app.try_borrow_mut() else {
                log::warn!("[fluid] app busy, dropping renderer");
                return;
            };
            // Torn down while the device was being requested.
            if !a.mounts.is_mounted(Subsystem::Fluid) {
                return;
            }
            views::show_fluid_canvas(&canvas, true);
            a.fluid = Some(FluidBinding { canvas, gpu });
        });
        true
    }

    // ===================== events =====================

    pub fn dispatch(&mut self, owner: Subsystem, kind: EventKind, ev: &web::Event) {
        match owner {
            Subsystem::Cursor => self.cursor_event(kind, ev),
            Subsystem::Hero => self.hero_event(kind, ev),
            Subsystem::Fluid => self.fluid_event(kind, ev),
            Subsystem::Reveals => {
                self.reveals_dirty = true;
            }
            Subsystem::Pins => {
                if kind == EventKind::Resize {
                    self.remeasure_pins();
                }
            }
            Subsystem::Carousel => match kind {
                EventKind::Resize => {
                    for b in &mut self.carousels {
                        b.carousel.set_track_width(carousel_wrap_width(&b.track));
                    }
                }
                _ => self.carousel_event(ev),
            },
            Subsystem::Loader => self.loader_event(),
            Subsystem::ContactForm => self.contact_event(ev),
            Subsystem::Cta => self.cta_event(ev),
        }
    }

    fn cursor_event(&mut self, kind: EventKind, ev: &web::Event) {
        let now = self.now_ms();
        let Some(b) = self.cursor.as_mut() else {
            return;
        };
        match kind {
            EventKind::PointerMove => {
                if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                    b.cursor
                        .on_pointer_move(m.client_x() as f32, m.client_y() as f32, now);
                }
            }
            EventKind::PointerOver => {
                if let Some(el) = dom::event_element(ev) {
                    b.cursor.on_pointer_over(&dom::element_path(&el));
                }
            }
            EventKind::PointerLeave => b.cursor.on_pointer_leave(),
            _ => {}
        }
    }

    fn hero_event(&mut self, kind: EventKind, ev: &web::Event) {
        let Some(b) = self.hero.as_mut() else {
            return;
        };
        match kind {
            EventKind::PointerMove => {
                if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                    let p = b.view.to_local(m.client_x() as f32, m.client_y() as f32);
                    b.hero.on_pointer_move(p, b.view.cta_center());
                }
            }
            EventKind::PointerOver => {
                let target = dom::event_element(ev);
                let on_wing = target
                    .as_ref()
                    .and_then(|el| dom::closest(el, HERO_WING_ZONE_SELECTOR))
                    .is_some();
                let on_cta = target.as_ref().is_some_and(|el| b.view.is_cta(el));
                b.hero.set_wing_hover(on_wing);
                b.hero.set_cta_hover(on_cta);
            }
            EventKind::PointerLeave => {
                b.hero.on_pointer_leave();
                b.hero.set_wing_hover(false);
                b.hero.set_cta_hover(false);
            }
            EventKind::Scroll => {
                if let Some(w) = web::window() {
                    let (_, vh) = dom::viewport(&w);
                    b.hero.on_scroll(dom::scroll_y(&w), vh);
                }
            }
            EventKind::Resize => b.hero.set_layout(b.view.layout()),
            EventKind::Click => {
                if dom::event_element(ev).is_some_and(|el| b.view.is_cta(&el)) {
                    b.hero.on_cta_click();
                }
            }
            _ => {}
        }
    }

    fn fluid_event(&mut self, kind: EventKind, ev: &web::Event) {
        let Some(b) = self.fluid.as_mut() else {
            return;
        };
        match kind {
            EventKind::PointerMove => {
                if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                    let r = b.canvas.get_bounding_client_rect();
                    b.gpu.set_pointer(
                        m.client_x() as f32 - r.left() as f32,
                        m.client_y() as f32 - r.top() as f32,
                        r.width() as f32,
                        r.height() as f32,
                    );
                }
            }
            EventKind::PointerLeave => b.gpu.clear_pointer(),
            EventKind::Resize => {
                dom::sync_canvas_backing_size(&b.canvas);
                b.gpu.resize_if_needed(b.canvas.width(), b.canvas.height());
            }
            _ => {}
        }
    }

    fn carousel_event(&mut self, ev: &web::Event) {
        let Some(target) = dom::event_element(ev) else {
            return;
        };
        let node: &web::Node = &target;
        let mut touched = false;
        for b in &mut self.carousels {
            if b.root.contains(Some(node)) && b.carousel.interact(None) == TimerAction::Restart {
                touched = true;
            }
        }
        if touched {
            self.mounts
                .restart_timer(&mut self.host, Subsystem::Carousel, CAROUSEL_RESUME_MS);
        }
    }

    fn loader_event(&mut self) {
        let Some(gate) = self.loader.as_mut() else {
            return;
        };
        if gate.interact() == TimerAction::Clear {
            self.mounts.clear_timer(&mut self.host, Subsystem::Loader);
        }
        self.try_dismiss_loader();
    }

    fn try_dismiss_loader(&mut self) {
        let Some(gate) = self.loader.as_ref() else {
            return;
        };
        let Some(document) = dom::window_document() else {
            return;
        };
        if gate.can_dismiss() && !overlay::is_hidden(&document) {
            overlay::hide(&document);
            log::info!("[loader] dismissed ({:?})", gate.state());
        } else if !gate.can_dismiss() && gate.state() != LoaderState::Waiting {
            overlay::set_status(&document, "Loading...");
        }
    }

    fn contact_event(&mut self, ev: &web::Event) {
        let Some(form) = dom::event_element(ev)
            .filter(|el| el.id() == CONTACT_FORM_ID)
            .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
        else {
            return;
        };
        ev.prevent_default();
        let fields = read_contact_fields(&form);
        let status = dom::window_document().and_then(|d| d.get_element_by_id(CONTACT_STATUS_ID));
        for el in dom::query_all(&form, "[aria-invalid]") {
            _ = el.remove_attribute("aria-invalid");
        }
        match fields.validate() {
            Ok(submission) => match self.sink.submit(&submission) {
                Ok(()) => {
                    form.reset();
                    if let Some(s) = &status {
                        s.set_text_content(Some(CONFIRMATION_MESSAGE));
                        _ = s.set_attribute("data-state", "ok");
                    }
                }
                Err(e) => {
                    log::error!("[contact] submission failed: {:?}", e);
                    if let Some(s) = &status {
                        s.set_text_content(Some("Something went wrong. Please try again."));
                        _ = s.set_attribute("data-state", "error");
                    }
                }
            },
            Err(e) => {
                log::info!("[contact] invalid: {}", e);
                if let Ok(Some(field)) = form.query_selector(&format!("[name=\"{}\"]", e.field())) {
                    _ = field.set_attribute("aria-invalid", "true");
                }
                if let Some(s) = &status {
                    s.set_text_content(Some(&e.to_string()));
                    _ = s.set_attribute("data-state", "error");
                }
            }
        }
    }

    fn cta_event(&mut self, ev: &web::Event) {
        if dom::event_element(ev)
            .and_then(|el| dom::closest(&el, CTA_SELECTOR))
            .is_none()
        {
            return;
        }
        ev.prevent_default();
        let target = cta_target(&self.config);
        let Some(w) = web::window() else { return };
        let frame = if target.new_context { "_blank" } else { "_self" };
        match w.open_with_url_and_target(&target.url, frame) {
            Ok(_) => log::info!("[cta] opened {}", target.url),
            Err(e) => log::warn!("[cta] open failed: {:?}", e),
        }
    }

    // ===================== frames =====================

    pub fn frame(&mut self, owner: Subsystem, dt_ms: f64) {
        let dt_sec = (dt_ms / 1000.0) as f32;
        match owner {
            Subsystem::Cursor => {
                let now = self.now_ms();
                if let Some(b) = self.cursor.as_mut() {
                    let f = b.cursor.frame(dt_sec, now);
                    b.view.write(&f, b.cursor.sparks());
                }
            }
            Subsystem::Hero => self.hero_frame(dt_ms),
            Subsystem::Fluid => {
                if let Some(b) = self.fluid.as_mut() {
                    if let Err(e) = b.gpu.render(dt_sec) {
                        log::debug!("[fluid] frame skipped: {}", e);
                    }
                }
            }
            Subsystem::Reveals => self.reveal_frame(),
            Subsystem::Pins => self.pin_frame(),
            Subsystem::Carousel => {
                for b in &mut self.carousels {
                    // Images may still be loading at bind time.
                    if b.carousel.track_width() <= 0.0 {
                        b.carousel.set_track_width(carousel_wrap_width(&b.track));
                    }
                    let offset = b.carousel.frame(dt_sec);
                    views::write_carousel(&b.track, offset);
                }
            }
            Subsystem::Loader | Subsystem::ContactForm | Subsystem::Cta => {}
        }
    }

    fn hero_frame(&mut self, dt_ms: f64) {
        let Some(b) = self.hero.as_mut() else {
            return;
        };
        let signal = b.hero.frame(dt_ms);
        let snapshot = b.hero.snapshot();
        b.view.write(&snapshot, b.hero.ambient());
        if signal == Some(HeroSignal::Ready) {
            if let Some(body) = dom::window_document().and_then(|d| d.body()) {
                _ = body.set_attribute("data-hero-ready", "true");
            }
            if let Some(gate) = self.loader.as_mut() {
                gate.hero_ready();
            }
            self.try_dismiss_loader();
        }
    }

    fn reveal_frame(&mut self) {
        let Some(w) = web::window() else { return };
        let now = self.now_ms();
        let (_, vh) = dom::viewport(&w);
        let observe = std::mem::take(&mut self.reveals_dirty);
        for r in self.reveals.iter_mut().filter(|r| !r.done) {
            if observe {
                let rect = r.el.get_bounding_client_rect();
                let ratio = intersection_ratio(rect.top() as f32, rect.height() as f32, vh);
                let fired = match &mut r.kind {
                    RevealKind::Block { reveal, .. } => reveal.observe(ratio, now),
                    RevealKind::Lines { cascade, .. } => cascade.observe(ratio, now),
                    RevealKind::Fade(f) => f.observe(ratio, now),
                };
                if fired {
                    log::debug!("[reveal] fired at {:.0}ms", now);
                }
            }
            write_reveal(r, now);
        }
    }

    fn remeasure_pins(&mut self) {
        for b in &mut self.pins {
            if let PinLayout::Horizontal(section) = &mut b.layout {
                section.track = measure_track(&b.section_el, b.panels.len());
            }
        }
    }

    fn pin_frame(&mut self) {
        let Some(w) = web::window() else { return };
        let scroll = dom::scroll_y(&w);
        let (_, vh) = dom::viewport(&w);
        let now = self.now_ms();
        for b in &mut self.pins {
            match &mut b.layout {
                PinLayout::Horizontal(section) => {
                    let f = section.evaluate(scroll);
                    views::write_pin(&b.section_el, &b.panels, &b.subs, &f, &b.text_flags);
                }
                PinLayout::Stacked(stack) => {
                    for (i, panel) in b.panels.iter().enumerate() {
                        let rect = panel.get_bounding_client_rect();
                        stack.observe(
                            i,
                            intersection_ratio(rect.top() as f32, rect.height() as f32, vh),
                            now,
                        );
                        if let Some(f) = stack.sample(i, now) {
                            views::write_fade(panel, &f);
                        }
                    }
                }
            }
        }
    }

    // ===================== timers =====================

    pub fn on_timer(&mut self, owner: Subsystem) {
        self.mounts.timer_fired(owner);
        match owner {
            Subsystem::Loader => {
                if let Some(gate) = self.loader.as_mut() {
                    if gate.timeout() {
                        self.try_dismiss_loader();
                    }
                }
            }
            Subsystem::Carousel => {
                for b in &mut self.carousels {
                    b.carousel.resume();
                }
            }
            _ => {}
        }
    }

    /// Releases everything. Safe to call more than once.
    pub fn teardown(&mut self) {
        let mut live: Vec<Subsystem> = self.mounts.mounted().collect();
        live.sort();
        if !live.is_empty() {
            log::debug!("[mount] tearing down {:?}", live);
        }
        self.mounts.unmount_all(&mut self.host);
        let document = dom::window_document();
        if let Some(mut b) = self.cursor.take() {
            b.cursor.teardown();
            if let Some(d) = &document {
                b.view.detach(d);
            }
        }
        if let Some(mut b) = self.hero.take() {
            b.hero.teardown();
            b.view.detach();
        }
        if let Some(b) = self.fluid.take() {
            views::show_fluid_canvas(&b.canvas, false);
        }
        self.reveals.clear();
        self.pins.clear();
        self.carousels.clear();
        self.loader = None;
        log::info!("[mount] torn down");
    }
}

fn measure_track(section_el: &web::Element, panels: usize) -> PinnedTrack {
    let (scroll, vh) = web::window()
        .map(|w| (dom::scroll_y(&w), dom::viewport(&w).1))
        .unwrap_or((0.0, 0.0));
    let rect = section_el.get_bounding_client_rect();
    PinnedTrack::from_layout(
        rect.top() as f32 + scroll,
        rect.height() as f32,
        vh,
        panels.max(1),
    )
}

/// The track holds its items twice; one copy is the wrap width.
fn carousel_wrap_width(track: &web::Element) -> f32 {
    track.scroll_width() as f32 * 0.5
}

fn show_final(r: &mut RevealBinding) {
    match &r.kind {
        RevealKind::Block { reveal, curtain } => {
            views::write_reveal(&r.el, curtain.as_ref(), &SHOWN, reveal.params().color);
        }
        RevealKind::Lines { lines, color, .. } => {
            for (l, c) in lines {
                views::write_reveal(l, c.as_ref(), &SHOWN, *color);
            }
        }
        RevealKind::Fade(_) => views::write_fade(
            &r.el,
            &FadeFrame {
                opacity: 1.0,
                translate_y: 0.0,
            },
        ),
    }
    r.done = true;
}

fn write_reveal(r: &mut RevealBinding, now: f64) {
    match &mut r.kind {
        RevealKind::Block { reveal, curtain } => {
            let f = reveal.update(now);
            views::write_reveal(&r.el, curtain.as_ref(), &f, reveal.params().color);
            r.done = reveal.state(now) == RevealState::Done;
        }
        RevealKind::Lines {
            cascade,
            lines,
            color,
            frames,
        } => {
            cascade.update(now, frames);
            for ((l, c), f) in lines.iter().zip(frames.iter()) {
                views::write_reveal(l, c.as_ref(), f, *color);
            }
            r.done = cascade.is_done(now);
        }
        RevealKind::Fade(fade) => {
            let f = fade.sample(now);
            views::write_fade(&r.el, &f);
            r.done = fade.has_fired() && f.opacity >= 1.0;
        }
    }
}

fn read_contact_fields(form: &web::HtmlFormElement) -> ContactFields {
    let value = |name: &str| -> String {
        let Ok(Some(el)) = form.query_selector(&format!("[name=\"{}\"]", name)) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    };
    let interests = dom::query_all(form, "input[name=\"interests\"]:checked")
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .map(|i| i.value())
        .collect();
    ContactFields {
        parent_name: value("parent_name"),
        student_name: value("student_name"),
        email: value("email"),
        phone: value("phone"),
        grade: value("grade"),
        interests,
    }
}

async fn load_image(src: &str) -> Result<web::HtmlImageElement, FluidError> {
    let img = web::HtmlImageElement::new()
        .map_err(|e| FluidError::Background(format!("{:?}", e)))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(src);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| FluidError::Background(format!("{} failed to decode: {:?}", src, e)))?;
    Ok(img)
}

async fn init_fluid(canvas: &web::HtmlCanvasElement, src: &str) -> Result<FluidGpu, FluidError> {
    let img = load_image(src).await?;
    FluidGpu::new(canvas, &img, FLUID_SIM_DIVISOR).await
}

//! DOM writers. Each view is bound once at mount time and silently skips
//! any node the page does not provide.

use crate::constants::*;
use crate::core::color;
use crate::core::cursor::CursorFrame;
use crate::core::hero::{HeroFrame, HeroLayout};
use crate::core::particles::ParticlePool;
use crate::core::pin::PinFrame;
use crate::core::reveal::{CurtainEdge, FadeFrame, RevealFrame};
use crate::core::{AMBIENT_POOL_CAPACITY, FADE_UP_OFFSET_PX, SPARK_POOL_CAPACITY};
use crate::dom;
use glam::Vec2;
use web_sys as web;

/// Pre-creates `count` spans under `container`, one per pool slot.
fn particle_spans(document: &web::Document, container: &web::Element, count: usize) -> Vec<web::Element> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let Ok(span) = document.create_element("span") else {
            break;
        };
        _ = span.set_attribute("class", "particle");
        dom::set_opacity(&span, 0.0);
        if container.append_child(&span).is_ok() {
            out.push(span);
        }
    }
    out
}

/// Writes live pool slots onto their spans and hides slots that died.
fn write_particles(spans: &[web::Element], shown: &mut [bool], pool: &ParticlePool) {
    for (i, p) in pool.iter_live() {
        let Some(span) = spans.get(i) else { continue };
        dom::set_transform(
            span,
            &format!(
                "translate3d({:.1}px,{:.1}px,0) scale({:.2})",
                p.pos.x, p.pos.y, p.size
            ),
        );
        dom::set_opacity(span, p.alpha());
        if let Some(s) = shown.get_mut(i) {
            *s = true;
        }
    }
    for (i, s) in shown.iter_mut().enumerate() {
        if *s && pool.get(i).is_none() {
            if let Some(span) = spans.get(i) {
                dom::set_opacity(span, 0.0);
            }
            *s = false;
        }
    }
}

fn remove_spans(spans: &mut Vec<web::Element>) {
    for s in spans.drain(..) {
        s.remove();
    }
}

// ===================== Cursor =====================

pub struct CursorView {
    root: web::Element,
    dot: Option<web::Element>,
    ring: Option<web::Element>,
    glyph: Option<web::Element>,
    sparks: Vec<web::Element>,
    sparks_shown: Vec<bool>,
}

impl CursorView {
    pub fn bind(document: &web::Document) -> Option<Self> {
        let root = document.get_element_by_id(CURSOR_ROOT_ID)?;
        let sparks = document
            .get_element_by_id(CURSOR_SPARKS_ID)
            .map(|c| particle_spans(document, &c, SPARK_POOL_CAPACITY))
            .unwrap_or_default();
        _ = root.class_list().add_1("is-active");
        if let Some(body) = document.body() {
            _ = body.class_list().add_1("has-custom-cursor");
        }
        Some(Self {
            root,
            dot: document.get_element_by_id(CURSOR_DOT_ID),
            ring: document.get_element_by_id(CURSOR_RING_ID),
            glyph: document.get_element_by_id(CURSOR_GLYPH_ID),
            sparks_shown: vec![false; sparks.len()],
            sparks,
        })
    }

    pub fn write(&mut self, frame: &CursorFrame, sparks: &ParticlePool) {
        dom::set_opacity(&self.root, if frame.visible { 1.0 } else { 0.0 });
        _ = self.root.set_attribute("data-variant", frame.variant.as_marker());
        let visual = frame.variant.visual();
        if let Some(dot) = &self.dot {
            dom::set_transform(
                dot,
                &format!("translate3d({:.1}px,{:.1}px,0)", frame.dot.x, frame.dot.y),
            );
        }
        if let Some(ring) = &self.ring {
            let r = visual.ring_diameter * 0.5;
            dom::set_transform(
                ring,
                &format!(
                    "translate3d({:.1}px,{:.1}px,0)",
                    frame.ring.x - r,
                    frame.ring.y - r
                ),
            );
            dom::set_style(ring, "width", &format!("{:.0}px", visual.ring_diameter));
            dom::set_style(ring, "height", &format!("{:.0}px", visual.ring_diameter));
            dom::set_style(ring, "border-width", &format!("{:.1}px", visual.border_width));
            dom::set_style(ring, "border-color", &color::css_rgba(visual.border_rgba));
            dom::set_style(ring, "background-color", &color::css_rgba(visual.fill_rgba));
        }
        if let Some(glyph) = &self.glyph {
            match frame.glyph_angle {
                Some(a) => {
                    dom::set_opacity(glyph, 1.0);
                    dom::set_transform(
                        glyph,
                        &format!(
                            "translate3d({:.1}px,{:.1}px,0) rotate({:.3}rad)",
                            frame.dot.x, frame.dot.y, a
                        ),
                    );
                }
                None => dom::set_opacity(glyph, 0.0),
            }
        }
        write_particles(&self.sparks, &mut self.sparks_shown, sparks);
    }

    /// Restores the native cursor and removes the spawned spark nodes.
    pub fn detach(&mut self, document: &web::Document) {
        dom::set_opacity(&self.root, 0.0);
        _ = self.root.class_list().remove_1("is-active");
        if let Some(body) = document.body() {
            _ = body.class_list().remove_1("has-custom-cursor");
        }
        remove_spans(&mut self.sparks);
        self.sparks_shown.clear();
    }
}

// ===================== Hero =====================

pub struct HeroView {
    root: web::Element,
    cta: Option<web::Element>,
    wings: Vec<web::Element>,
    layers: Vec<web::Element>,
    doodles: Vec<web::Element>,
    spotlight: Option<web::Element>,
    plane: Option<web::Element>,
    ambient: Vec<web::Element>,
    ambient_shown: Vec<bool>,
}

impl HeroView {
    pub fn bind(document: &web::Document) -> Option<Self> {
        let root = document.get_element_by_id(HERO_ID)?;
        let ambient = document
            .get_element_by_id(HERO_PARTICLES_ID)
            .map(|c| particle_spans(document, &c, AMBIENT_POOL_CAPACITY))
            .unwrap_or_default();
        Some(Self {
            cta: document.get_element_by_id(HERO_CTA_ID),
            wings: dom::query_all(&root, HERO_WING_SELECTOR),
            layers: dom::query_all(&root, HERO_LAYER_SELECTOR),
            doodles: dom::query_all(&root, HERO_DOODLE_SELECTOR),
            spotlight: document.get_element_by_id(HERO_SPOTLIGHT_ID),
            plane: document.get_element_by_id(HERO_PLANE_ID),
            ambient_shown: vec![false; ambient.len()],
            ambient,
            root,
        })
    }

    pub fn layout(&self) -> HeroLayout {
        let rect = self.root.get_bounding_client_rect();
        HeroLayout {
            width: rect.width() as f32,
            height: rect.height() as f32,
            layers: self.layers.len(),
            doodles: self.doodles.len(),
        }
    }

    /// Client coordinates to hero-local px.
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Vec2 {
        let rect = self.root.get_bounding_client_rect();
        Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    pub fn cta_center(&self) -> Option<Vec2> {
        let cta = self.cta.as_ref()?;
        let r = cta.get_bounding_client_rect();
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return None;
        }
        Some(self.to_local(
            (r.left() + r.width() * 0.5) as f32,
            (r.top() + r.height() * 0.5) as f32,
        ))
    }

    pub fn is_cta(&self, el: &web::Element) -> bool {
        let node: &web::Node = el;
        self.cta.as_ref().is_some_and(|c| c.contains(Some(node)))
    }

    pub fn write(&mut self, frame: &HeroFrame, ambient: &ParticlePool) {
        _ = self
            .root
            .set_attribute("data-started", if frame.started { "true" } else { "false" });
        dom::set_transform(&self.root, &format!("scale({:.4})", frame.scale));
        dom::set_opacity(&self.root, frame.opacity);

        for (i, el) in self.layers.iter().enumerate() {
            let o = frame.layer_opacity.get(i).copied().unwrap_or(0.0);
            dom::set_opacity(el, o);
            // Deeper layers move more.
            let depth = (i + 1) as f32 / self.layers.len().max(1) as f32;
            dom::set_transform(
                el,
                &format!(
                    "translate3d({:.1}px,{:.1}px,0)",
                    frame.parallax.x * depth,
                    frame.parallax.y * depth
                ),
            );
        }
        for (i, el) in self.doodles.iter().enumerate() {
            let dy = frame.doodle_offsets.get(i).copied().unwrap_or(0.0);
            dom::set_transform(el, &format!("translateY({:.1}px)", dy));
        }
        if let Some(s) = &self.spotlight {
            dom::set_opacity(s, frame.spotlight);
        }
        for w in &self.wings {
            dom::set_transform(w, &format!("rotate({:.2}deg)", -24.0 * frame.wing));
        }
        if let Some(cta) = &self.cta {
            dom::set_transform(
                cta,
                &format!("translate3d({:.1}px,{:.1}px,0)", frame.magnet.x, frame.magnet.y),
            );
            dom::set_style(cta, "--neon", &format!("{:.3}", frame.neon));
        }
        if let Some(plane) = &self.plane {
            match frame.takeoff {
                Some(t) => {
                    dom::set_transform(
                        plane,
                        &format!(
                            "translate3d({:.1}px,{:.1}px,0) rotate({:.3}rad)",
                            t.dx, t.dy, t.rotation_rad
                        ),
                    );
                    dom::set_opacity(plane, t.opacity);
                }
                None => {
                    dom::set_transform(plane, "none");
                    dom::set_opacity(plane, 1.0);
                }
            }
        }
        write_particles(&self.ambient, &mut self.ambient_shown, ambient);
    }

    pub fn detach(&mut self) {
        remove_spans(&mut self.ambient);
        self.ambient_shown.clear();
    }
}

// ===================== Reveals =====================

/// Returns the curtain child of a reveal target, creating it if absent.
pub fn ensure_curtain(document: &web::Document, el: &web::Element) -> Option<web::Element> {
    let selector = format!(".{}", REVEAL_CURTAIN_CLASS);
    if let Ok(Some(c)) = el.query_selector(&selector) {
        return Some(c);
    }
    let c = document.create_element("span").ok()?;
    _ = c.set_attribute("class", REVEAL_CURTAIN_CLASS);
    _ = c.set_attribute("aria-hidden", "true");
    el.append_child(&c).ok()?;
    Some(c)
}

pub fn write_reveal(el: &web::Element, curtain: Option<&web::Element>, frame: &RevealFrame, color: [f32; 4]) {
    // Content opacity goes through a custom property so the curtain itself
    // stays opaque.
    dom::set_style(el, "--reveal-opacity", &format!("{:.3}", frame.content_opacity));
    if let Some(c) = curtain {
        let origin = match frame.curtain_origin {
            CurtainEdge::Left => "left center",
            CurtainEdge::Right => "right center",
        };
        dom::set_style(c, "transform-origin", origin);
        dom::set_transform(c, &format!("scaleX({:.4})", frame.curtain_scale));
        dom::set_style(c, "background-color", &color::css_rgba(color));
    }
}

pub fn write_fade(el: &web::Element, frame: &FadeFrame) {
    dom::set_opacity(el, frame.opacity);
    dom::set_transform(el, &format!("translateY({:.1}px)", frame.translate_y));
}

// ===================== Pinned sections =====================

pub fn write_pin(
    section: &web::Element,
    panels: &[web::Element],
    subs: &[web::Element],
    frame: &PinFrame,
    text_flags: &[bool],
) {
    _ = section.set_attribute("data-pin-phase", &format!("{:?}", frame.phase).to_lowercase());
    let transform = frame.panel_transform();
    for panel in panels {
        dom::set_transform(panel, &transform);
    }
    for (i, el) in subs.iter().enumerate() {
        let v = frame.subs.get(i).copied().unwrap_or(0.0);
        if text_flags.get(i).copied().unwrap_or(false) {
            write_fade(
                el,
                &FadeFrame {
                    opacity: v,
                    translate_y: (1.0 - v) * FADE_UP_OFFSET_PX,
                },
            );
        } else {
            dom::set_transform(el, &format!("translate3d({:.1}px,0,0)", v));
        }
    }
}

// ===================== Carousel / fluid =====================

pub fn write_carousel(track: &web::Element, offset: f32) {
    dom::set_transform(track, &format!("translate3d({:.1}px,0,0)", -offset));
}

/// Stacks the canvas behind the page once the GPU path is live.
pub fn show_fluid_canvas(canvas: &web::HtmlCanvasElement, visible: bool) {
    _ = canvas.set_attribute("data-active", if visible { "true" } else { "false" });
}

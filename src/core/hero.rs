// Hero load sequence and its interactive sub-timelines.
//
// Everything is driven from one `frame(dt)` call and a handful of input
// setters. Nothing advances until the startup delay has elapsed so layout
// measurements taken by the view are stable.

use super::constants::*;
use super::particles::{ParticleKind, ParticlePool, SpawnParams};
use super::timeline::{Ease, Tween};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroSignal {
    /// Primary reveal finished; overlays waiting on the hero may proceed.
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TakeoffFrame {
    pub dx: f32,
    pub dy: f32,
    pub rotation_rad: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeroFrame {
    pub started: bool,
    pub layer_opacity: SmallVec<[f32; 4]>,
    pub parallax: Vec2,
    pub spotlight: f32,
    pub wing: f32,
    pub magnet: Vec2,
    pub neon: f32,
    pub takeoff: Option<TakeoffFrame>,
    pub doodle_offsets: SmallVec<[f32; 4]>,
    pub scale: f32,
    pub opacity: f32,
}

/// Scale/opacity applied to the hero as it scrolls out of view.
pub fn hero_scroll_transform(scroll_y: f32, viewport_h: f32) -> (f32, f32) {
    let k = (scroll_y / viewport_h.max(1.0)).clamp(0.0, 1.0);
    (1.0 - (1.0 - HERO_SCROLL_MIN_SCALE) * k, 1.0 - k)
}

/// Magnetic pull target for a CTA centred at `center`.
pub fn magnet_target(pointer: Vec2, center: Vec2) -> Vec2 {
    let d = pointer - center;
    if d.length() < MAGNET_RADIUS_PX {
        d * MAGNET_STRENGTH
    } else {
        Vec2::ZERO
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HeroLayout {
    pub width: f32,
    pub height: f32,
    pub layers: usize,
    pub doodles: usize,
}

pub struct HeroOrchestrator {
    layout: HeroLayout,
    elapsed_ms: f64,
    ready_emitted: bool,

    wing: Tween,
    wing_hovered: bool,
    scrolled_past: bool,

    neon: Tween,
    magnet: Vec2,
    magnet_target: Vec2,
    pointer_norm: Vec2,

    takeoff: Tween,
    takeoff_active: bool,

    ambient: ParticlePool,
    spawn_accum: f32,
    rng: StdRng,

    scroll_y: f32,
    viewport_h: f32,
}

impl HeroOrchestrator {
    pub fn new(layout: HeroLayout, seed: u64) -> Self {
        Self {
            layout,
            elapsed_ms: 0.0,
            ready_emitted: false,
            wing: Tween::new(HERO_WING_MS, Ease::OutCubic),
            wing_hovered: false,
            scrolled_past: false,
            neon: Tween::new(HERO_NEON_MS, Ease::InOutSine),
            magnet: Vec2::ZERO,
            magnet_target: Vec2::ZERO,
            pointer_norm: Vec2::ZERO,
            takeoff: Tween::new(HERO_TAKEOFF_MS, Ease::InOutSine),
            takeoff_active: false,
            ambient: ParticlePool::with_capacity(AMBIENT_POOL_CAPACITY),
            spawn_accum: 0.0,
            rng: StdRng::seed_from_u64(seed),
            scroll_y: 0.0,
            viewport_h: layout.height.max(1.0),
        }
    }

    pub fn set_layout(&mut self, layout: HeroLayout) {
        self.layout = layout;
    }

    #[inline]
    fn local_ms(&self) -> f64 {
        self.elapsed_ms - HERO_STARTUP_DELAY_MS
    }

    pub fn is_started(&self) -> bool {
        self.local_ms() >= 0.0
    }

    pub fn is_complete(&self) -> bool {
        self.local_ms() >= HERO_PRIMARY_REVEAL_MS
    }

    /// Pointer in hero-local px; `cta_center` is the CTA centre in the same
    /// space when it is measurable.
    pub fn on_pointer_move(&mut self, pointer: Vec2, cta_center: Option<Vec2>) {
        let size = Vec2::new(self.layout.width.max(1.0), self.layout.height.max(1.0));
        self.pointer_norm = (pointer / size - Vec2::splat(0.5)) * 2.0;
        self.magnet_target = cta_center
            .map(|c| magnet_target(pointer, c))
            .unwrap_or(Vec2::ZERO);
    }

    pub fn on_pointer_leave(&mut self) {
        self.magnet_target = Vec2::ZERO;
        self.pointer_norm = Vec2::ZERO;
    }

    pub fn set_wing_hover(&mut self, hovered: bool) {
        self.wing_hovered = hovered;
        self.sync_wing();
    }

    pub fn set_cta_hover(&mut self, hovered: bool) {
        if hovered {
            self.neon.play();
        } else {
            self.neon.reverse();
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f32, viewport_h: f32) {
        self.scroll_y = scroll_y;
        self.viewport_h = viewport_h.max(1.0);
        self.scrolled_past = scroll_y > self.viewport_h * HERO_WING_SCROLL_FRACTION;
        self.sync_wing();
    }

    // Hover wins over the scroll-driven state.
    fn sync_wing(&mut self) {
        if self.wing_hovered || self.scrolled_past {
            self.wing.play();
        } else {
            self.wing.reverse();
        }
    }

    pub fn wing_engaged(&self) -> bool {
        self.wing_hovered || self.scrolled_past
    }

    pub fn on_cta_click(&mut self) {
        self.takeoff.restart();
        self.takeoff_active = true;
        log::info!("[hero] takeoff");
    }

    /// Advance all timelines. Returns `Some(HeroSignal::Ready)` exactly once.
    pub fn frame(&mut self, dt_ms: f64) -> Option<HeroSignal> {
        let dt_ms = dt_ms.max(0.0);
        self.elapsed_ms += dt_ms;
        if !self.is_started() {
            return None;
        }
        let dt_sec = (dt_ms / 1000.0) as f32;

        self.wing.step(dt_ms);
        self.neon.step(dt_ms);
        if self.takeoff_active {
            self.takeoff.step(dt_ms);
            if !self.takeoff.is_active() {
                self.takeoff_active = false;
                self.takeoff.reset();
            }
        }
        let alpha = 1.0 - (-dt_sec / MAGNET_TAU_SEC).exp();
        self.magnet += (self.magnet_target - self.magnet) * alpha;

        self.step_ambient(dt_sec);

        if self.is_complete() && !self.ready_emitted {
            self.ready_emitted = true;
            log::info!("[hero] primary reveal complete");
            return Some(HeroSignal::Ready);
        }
        None
    }

    fn step_ambient(&mut self, dt_sec: f32) {
        self.ambient.step(dt_sec);
        self.spawn_accum += dt_sec * AMBIENT_SPAWN_PER_SEC;
        while self.spawn_accum >= 1.0 {
            self.spawn_accum -= 1.0;
            let x = self.rng.gen_range(0.0..self.layout.width.max(1.0));
            let y = self.layout.height.max(1.0) * self.rng.gen_range(0.6..1.0);
            self.ambient.spawn(SpawnParams {
                kind: ParticleKind::Ambient,
                pos: Vec2::new(x, y),
                vel: Vec2::new(self.rng.gen_range(-6.0..6.0), -self.rng.gen_range(10.0..30.0)),
                size: self.rng.gen_range(1.5..4.0),
                life: AMBIENT_LIFE_SEC,
                drag: 0.0,
            });
        }
    }

    pub fn ambient(&self) -> &ParticlePool {
        &self.ambient
    }

    pub fn snapshot(&self) -> HeroFrame {
        let t = self.local_ms();
        let started = t >= 0.0;
        let layer_opacity = (0..self.layout.layers)
            .map(|i| {
                let lt = (t - i as f64 * HERO_LAYER_STAGGER_MS) / HERO_LAYER_FADE_MS;
                if started {
                    Ease::OutCubic.apply(lt as f32)
                } else {
                    0.0
                }
            })
            .collect();
        let secs = (t.max(0.0) / 1000.0) as f32;
        let spotlight = 0.6 + 0.4 * (TAU * secs / HERO_SPOTLIGHT_PERIOD_SEC).sin();
        let doodle_offsets = (0..self.layout.doodles)
            .map(|i| {
                let phase = i as f32 * 1.3;
                HERO_DOODLE_AMPLITUDE_PX * (TAU * secs / HERO_DOODLE_PERIOD_SEC + phase).sin()
            })
            .collect();
        let (scale, opacity) = hero_scroll_transform(self.scroll_y, self.viewport_h);
        HeroFrame {
            started,
            layer_opacity,
            parallax: self.pointer_norm * HERO_PARALLAX_FACTOR * self.layout.width,
            spotlight,
            wing: self.wing.value(),
            magnet: self.magnet,
            neon: self.neon.value(),
            takeoff: self.takeoff_active.then(|| self.takeoff_frame()),
            doodle_offsets,
            scale,
            opacity,
        }
    }

    fn takeoff_frame(&self) -> TakeoffFrame {
        let k = self.takeoff.value();
        let w = self.layout.width;
        let h = self.layout.height;
        TakeoffFrame {
            dx: k * w * 0.6,
            dy: -k * k * h * 0.7 + (k * TAU).sin() * 8.0,
            rotation_rad: -0.35 * k,
            opacity: if k < 0.7 { 1.0 } else { (1.0 - k) / 0.3 },
        }
    }

    pub fn teardown(&mut self) {
        self.wing.reset();
        self.neon.reset();
        self.takeoff.reset();
        self.takeoff_active = false;
        self.ambient.clear();
        self.magnet = Vec2::ZERO;
        self.magnet_target = Vec2::ZERO;
        log::debug!("[hero] torn down");
    }
}

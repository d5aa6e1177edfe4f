// Custom cursor: hover classification, two-body smoothed following and the
// velocity-oriented glyph shown over the hero portrait.

use super::constants::*;
use super::particles::{ParticleKind, ParticlePool, SpawnParams};
use super::pointer::{PointerSample, PointerTracker};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

pub const HERO_REGION_CLASS: &str = "hero-portrait";
pub const DRAG_REGION_CLASS: &str = "drag-region";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorVariant {
    #[default]
    Default,
    HoverLink,
    HoverButton,
    Drag,
    HoverHero,
}

impl CursorVariant {
    /// Parse the value of a `data-cursor` override marker.
    pub fn from_marker(value: &str) -> Option<Self> {
        match value.trim() {
            "default" => Some(Self::Default),
            "hover-link" | "link" => Some(Self::HoverLink),
            "hover-button" | "button" => Some(Self::HoverButton),
            "drag" => Some(Self::Drag),
            "hover-hero" | "hero" => Some(Self::HoverHero),
            _ => None,
        }
    }

    pub fn as_marker(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HoverLink => "hover-link",
            Self::HoverButton => "hover-button",
            Self::Drag => "drag",
            Self::HoverHero => "hover-hero",
        }
    }

    pub fn visual(self) -> CursorVisual {
        match self {
            Self::Default => CursorVisual {
                ring_diameter: 36.0,
                border_width: 1.5,
                border_rgba: [1.0, 1.0, 1.0, 0.6],
                fill_rgba: [0.0, 0.0, 0.0, 0.0],
            },
            Self::HoverLink => CursorVisual {
                ring_diameter: 56.0,
                border_width: 2.0,
                border_rgba: [0.98, 0.78, 0.27, 0.9],
                fill_rgba: [0.98, 0.78, 0.27, 0.12],
            },
            Self::HoverButton => CursorVisual {
                ring_diameter: 64.0,
                border_width: 2.0,
                border_rgba: [0.36, 0.85, 1.0, 0.9],
                fill_rgba: [0.36, 0.85, 1.0, 0.15],
            },
            Self::Drag => CursorVisual {
                ring_diameter: 80.0,
                border_width: 1.0,
                border_rgba: [1.0, 1.0, 1.0, 0.8],
                fill_rgba: [1.0, 1.0, 1.0, 0.08],
            },
            Self::HoverHero => CursorVisual {
                ring_diameter: 96.0,
                border_width: 1.0,
                border_rgba: [1.0, 0.55, 0.2, 0.7],
                fill_rgba: [1.0, 0.55, 0.2, 0.06],
            },
        }
    }
}

/// Presentational constants for one cursor variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorVisual {
    pub ring_diameter: f32,
    pub border_width: f32,
    pub border_rgba: [f32; 4],
    pub fill_rgba: [f32; 4],
}

/// Synthetic description of one element on the hovered path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementInfo {
    /// Lower-case tag name.
    pub tag: String,
    pub classes: SmallVec<[String; 4]>,
    /// Raw value of the `data-cursor` attribute, if present.
    pub cursor_override: Option<String>,
    /// Raw value of the `data-cursor-region` attribute, if present.
    pub region: Option<String>,
}

impl ElementInfo {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_override(mut self, marker: &str) -> Self {
        self.cursor_override = Some(marker.to_string());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is_hero_region(&self) -> bool {
        self.has_class(HERO_REGION_CLASS) || self.region.as_deref() == Some("hero")
    }

    fn is_drag_region(&self) -> bool {
        self.has_class(DRAG_REGION_CLASS) || self.region.as_deref() == Some("drag")
    }
}

/// Classify the hovered element. `path` lists the hovered element first,
/// followed by its ancestors up to the document root.
pub fn classify(path: &[ElementInfo]) -> CursorVariant {
    if let Some(v) = path
        .iter()
        .filter_map(|e| e.cursor_override.as_deref())
        .find_map(CursorVariant::from_marker)
    {
        return v;
    }
    if path.iter().any(ElementInfo::is_hero_region) {
        return CursorVariant::HoverHero;
    }
    if path.iter().any(|e| e.tag == "a") {
        return CursorVariant::HoverLink;
    }
    if path.iter().any(|e| e.tag == "button") {
        return CursorVariant::HoverButton;
    }
    if path.iter().any(ElementInfo::is_drag_region) {
        return CursorVariant::Drag;
    }
    CursorVariant::Default
}

/// Two independently smoothed layers chasing the raw pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorFollower {
    pub dot: Vec2,
    pub ring: Vec2,
    initialized: bool,
}

impl CursorFollower {
    pub fn step(&mut self, target: Vec2, dt_sec: f32) {
        if !self.initialized {
            self.dot = target;
            self.ring = target;
            self.initialized = true;
            return;
        }
        let dt = dt_sec.max(0.0);
        let a_dot = 1.0 - (-dt / CURSOR_DOT_TAU_SEC).exp();
        let a_ring = 1.0 - (-dt / CURSOR_RING_TAU_SEC).exp();
        self.dot += (target - self.dot) * a_dot;
        self.ring += (target - self.ring) * a_ring;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Orientation of the directional glyph, `None` when it should be hidden.
pub fn glyph_angle(variant: CursorVariant, sample: &PointerSample) -> Option<f32> {
    if variant != CursorVariant::HoverHero || sample.speed() < GLYPH_MIN_SPEED {
        return None;
    }
    Some(sample.velocity_y.atan2(sample.velocity_x))
}

/// Snapshot consumed by the cursor view each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    pub visible: bool,
    pub variant: CursorVariant,
    pub dot: Vec2,
    pub ring: Vec2,
    pub glyph_angle: Option<f32>,
}

pub struct CustomCursor {
    tracker: PointerTracker,
    follower: CursorFollower,
    variant: CursorVariant,
    sparks: ParticlePool,
    rng: StdRng,
    inside: bool,
    now_ms: f64,
}

impl CustomCursor {
    pub fn new(seed: u64) -> Self {
        Self {
            tracker: PointerTracker::new(),
            follower: CursorFollower::default(),
            variant: CursorVariant::Default,
            sparks: ParticlePool::with_capacity(SPARK_POOL_CAPACITY),
            rng: StdRng::seed_from_u64(seed),
            inside: false,
            now_ms: 0.0,
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, timestamp_ms: f64) -> PointerSample {
        let sample = self.tracker.record(x, y, timestamp_ms);
        self.inside = true;
        self.now_ms = self.now_ms.max(timestamp_ms);
        if self.tracker.should_spark(&mut self.rng) {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.gen_range(40.0..140.0);
            self.sparks.spawn(SpawnParams {
                kind: ParticleKind::Spark,
                pos: Vec2::new(x, y),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: self.rng.gen_range(2.0..5.0),
                life: SPARK_LIFE_SEC,
                drag: SPARK_DRAG_PER_SEC,
            });
        }
        sample
    }

    pub fn on_pointer_over(&mut self, path: &[ElementInfo]) -> CursorVariant {
        self.variant = classify(path);
        self.variant
    }

    pub fn on_pointer_leave(&mut self) {
        self.inside = false;
    }

    /// `now_ms` is on the same clock as the pointer timestamps.
    pub fn frame(&mut self, dt_sec: f32, now_ms: f64) -> CursorFrame {
        self.now_ms = self.now_ms.max(now_ms);
        if let Some(s) = self.tracker.latest() {
            self.follower.step(Vec2::new(s.x, s.y), dt_sec);
        }
        self.sparks.step(dt_sec);
        self.snapshot()
    }

    pub fn snapshot(&self) -> CursorFrame {
        CursorFrame {
            visible: self.inside && self.tracker.has_entered(),
            variant: self.variant,
            dot: self.follower.dot,
            ring: self.follower.ring,
            glyph_angle: self
                .tracker
                .current(self.now_ms)
                .and_then(|s| glyph_angle(self.variant, &s)),
        }
    }

    #[inline]
    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    pub fn sparks(&self) -> &ParticlePool {
        &self.sparks
    }

    pub fn teardown(&mut self) {
        self.tracker.reset();
        self.follower.reset();
        self.sparks.clear();
        self.inside = false;
        self.variant = CursorVariant::Default;
        self.now_ms = 0.0;
    }
}

// Shared motion tuning constants used by the core state machines.
//
// All durations are milliseconds, distances are CSS pixels unless the name
// says otherwise.

// Capability gate
pub const NARROW_VIEWPORT_PX: f32 = 768.0; // below this, pinned sections fall back to a vertical stack

// Pointer tracking
pub const MIN_SAMPLE_DT_MS: f64 = 1.0; // elapsed-time floor for velocity
pub const POINTER_STALE_MS: f64 = 80.0; // no move for this long means the pointer is at rest
pub const SPARK_SPEED_THRESHOLD: f32 = 1.2; // px per ms before sparks may spawn
pub const SPARK_CHANCE: f32 = 0.3; // probability gate per qualifying sample

// Cursor smoothing (exponential time constants, seconds)
pub const CURSOR_DOT_TAU_SEC: f32 = 0.02; // inner dot, near-instant
pub const CURSOR_RING_TAU_SEC: f32 = 0.12; // outer ring, trailing
pub const GLYPH_MIN_SPEED: f32 = 0.15; // px per ms; below this the glyph hides

// Particles
pub const SPARK_POOL_CAPACITY: usize = 48;
pub const AMBIENT_POOL_CAPACITY: usize = 32;
pub const SPARK_LIFE_SEC: f32 = 0.6;
pub const AMBIENT_LIFE_SEC: f32 = 6.0;
pub const SPARK_DRAG_PER_SEC: f32 = 3.0; // velocity decay rate
pub const AMBIENT_SPAWN_PER_SEC: f32 = 2.5;

// Text reveal
pub const REVEAL_THRESHOLD: f32 = 0.2; // visible fraction that triggers a reveal
pub const REVEAL_DURATION_MS: f64 = 900.0;
pub const LINE_STAGGER_MS: f64 = 120.0; // per-line delay increment in a cascade
pub const FADE_UP_DURATION_MS: f64 = 700.0;
pub const FADE_UP_OFFSET_PX: f32 = 40.0;

// Hero orchestration
pub const HERO_STARTUP_DELAY_MS: f64 = 150.0; // lets layout settle before measuring
pub const HERO_PRIMARY_REVEAL_MS: f64 = 2200.0;
pub const HERO_LAYER_FADE_MS: f64 = 1200.0;
pub const HERO_LAYER_STAGGER_MS: f64 = 180.0;
pub const HERO_WING_MS: f64 = 650.0;
pub const HERO_WING_SCROLL_FRACTION: f32 = 0.35; // of viewport height
pub const HERO_NEON_MS: f64 = 500.0;
pub const HERO_TAKEOFF_MS: f64 = 1400.0;
pub const HERO_SPOTLIGHT_PERIOD_SEC: f32 = 4.0;
pub const HERO_DOODLE_PERIOD_SEC: f32 = 6.0;
pub const HERO_DOODLE_AMPLITUDE_PX: f32 = 12.0;
pub const HERO_SCROLL_MIN_SCALE: f32 = 0.85;
pub const HERO_PARALLAX_FACTOR: f32 = 0.02; // pointer offset fraction applied to depth 1 layers

// Magnetic CTA
pub const MAGNET_RADIUS_PX: f32 = 140.0;
pub const MAGNET_STRENGTH: f32 = 0.35;
pub const MAGNET_TAU_SEC: f32 = 0.15;

// Loader and carousel timers
pub const LOADER_AUTO_ADVANCE_MS: u32 = 4000;
pub const CAROUSEL_RESUME_MS: u32 = 3000;
pub const CAROUSEL_SPEED_PX_PER_SEC: f32 = 40.0;

// Fluid background
pub const FLUID_IMPULSE_RADIUS: f32 = 0.03; // in uv units
pub const FLUID_IMPULSE_STRENGTH: f32 = 0.5;
pub const FLUID_WAVE_SPEED: f32 = 0.25; // laplacian coefficient
pub const FLUID_VELOCITY_DAMPING: f32 = 0.995;
pub const FLUID_PRESSURE_DAMPING: f32 = 0.999;
pub const FLUID_REFRACTION: f32 = 0.04;
pub const FLUID_LIGHT_DIR: [f32; 3] = [-0.4, 0.6, 0.7];

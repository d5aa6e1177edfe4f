// Host-side pieces of the fluid background: the ping-pong discipline and the
// uniform block shared by the simulate and render passes.

use super::constants::*;

/// Which of the two simulation buffers is read this frame. The other one is
/// written, then [`PingPong::swap`] flips the roles exactly once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PingPong {
    current: usize,
}

impl PingPong {
    #[inline]
    pub fn read(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn write(&self) -> usize {
        self.current ^ 1
    }

    #[inline]
    pub fn swap(&mut self) {
        self.current ^= 1;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FluidError {
    #[error("no WebGPU adapter available")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(String),
    #[error("background image failed to load: {0}")]
    Background(String),
    #[error("surface error: {0}")]
    Surface(String),
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FluidUniforms {
    pub resolution: [f32; 2],
    pub pointer_uv: [f32; 2],
    pub impulse_radius: f32,
    pub impulse_strength: f32,
    pub wave_speed: f32,
    pub time: f32,
    pub velocity_damping: f32,
    pub pressure_damping: f32,
    pub refraction: f32,
    pub pointer_active: f32,
    pub light_dir: [f32; 4],
}

impl FluidUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        let [lx, ly, lz] = FLUID_LIGHT_DIR;
        let len = (lx * lx + ly * ly + lz * lz).sqrt().max(1e-6);
        Self {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            pointer_uv: [0.5, 0.5],
            impulse_radius: FLUID_IMPULSE_RADIUS,
            impulse_strength: FLUID_IMPULSE_STRENGTH,
            wave_speed: FLUID_WAVE_SPEED,
            time: 0.0,
            velocity_damping: FLUID_VELOCITY_DAMPING,
            pressure_damping: FLUID_PRESSURE_DAMPING,
            refraction: FLUID_REFRACTION,
            pointer_active: 0.0,
            light_dir: [lx / len, ly / len, lz / len, 0.0],
        }
    }

    /// Pointer in canvas CSS px; out-of-canvas positions disable the impulse.
    pub fn set_pointer(&mut self, x: f32, y: f32, css_width: f32, css_height: f32) {
        if css_width <= 0.0 || css_height <= 0.0 {
            self.pointer_active = 0.0;
            return;
        }
        let u = x / css_width;
        let v = y / css_height;
        let inside = (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v);
        self.pointer_uv = [u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)];
        self.pointer_active = if inside { 1.0 } else { 0.0 };
    }

    pub fn clear_pointer(&mut self) {
        self.pointer_active = 0.0;
    }
}

/// Simulation buffers run at a fraction of the canvas size.
pub fn sim_extent(canvas_w: u32, canvas_h: u32, divisor: u32) -> (u32, u32) {
    let d = divisor.max(1);
    ((canvas_w / d).max(1), (canvas_h / d).max(1))
}

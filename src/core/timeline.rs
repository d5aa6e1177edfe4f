// Reversible tweens. Reversal resumes from the current progress so hover
// exits never jump-cut.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    OutCubic,
    InOutSine,
    OutBack,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
            Ease::InOutSine => -((std::f32::consts::PI * t).cos() - 1.0) * 0.5,
            Ease::OutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    Paused,
}

#[derive(Clone, Copy, Debug)]
pub struct Tween {
    duration_ms: f64,
    progress: f32,
    direction: Direction,
    ease: Ease,
}

impl Tween {
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            duration_ms: duration_ms.max(1.0),
            progress: 0.0,
            direction: Direction::Paused,
            ease,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
    }

    /// Restart from zero, used for one-off timelines like the takeoff.
    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.direction = Direction::Forward;
    }

    pub fn step(&mut self, dt_ms: f64) {
        let delta = (dt_ms.max(0.0) / self.duration_ms) as f32;
        match self.direction {
            Direction::Forward => {
                self.progress = (self.progress + delta).min(1.0);
                if self.progress >= 1.0 {
                    self.direction = Direction::Paused;
                }
            }
            Direction::Reverse => {
                self.progress = (self.progress - delta).max(0.0);
                if self.progress <= 0.0 {
                    self.direction = Direction::Paused;
                }
            }
            Direction::Paused => {}
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.ease.apply(self.progress)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.direction != Direction::Paused
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = Direction::Paused;
    }
}

use super::constants::{MIN_SAMPLE_DT_MS, POINTER_STALE_MS, SPARK_CHANCE, SPARK_SPEED_THRESHOLD};
use rand::Rng;

/// Most recent pointer reading. Velocity is in px per ms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub timestamp_ms: f64,
}

impl PointerSample {
    #[inline]
    pub fn speed(&self) -> f32 {
        (self.velocity_x * self.velocity_x + self.velocity_y * self.velocity_y).sqrt()
    }

    /// The sample as seen at `now_ms`. Browsers send no event when the
    /// pointer stops, so an old sample reads as stationary.
    pub fn at(self, now_ms: f64) -> PointerSample {
        if now_ms - self.timestamp_ms > POINTER_STALE_MS {
            PointerSample {
                velocity_x: 0.0,
                velocity_y: 0.0,
                ..self
            }
        } else {
            self
        }
    }
}

/// Last-value-wins pointer tracker. Consumers read [`PointerTracker::latest`]
/// synchronously; nothing is buffered.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    latest: Option<PointerSample>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: f32, y: f32, timestamp_ms: f64) -> PointerSample {
        let sample = match self.latest {
            Some(prev) => {
                let dt = (timestamp_ms - prev.timestamp_ms).max(MIN_SAMPLE_DT_MS) as f32;
                PointerSample {
                    x,
                    y,
                    velocity_x: (x - prev.x) / dt,
                    velocity_y: (y - prev.y) / dt,
                    timestamp_ms,
                }
            }
            None => PointerSample {
                x,
                y,
                velocity_x: 0.0,
                velocity_y: 0.0,
                timestamp_ms,
            },
        };
        self.latest = Some(sample);
        sample
    }

    #[inline]
    pub fn latest(&self) -> Option<PointerSample> {
        self.latest
    }

    #[inline]
    pub fn current(&self, now_ms: f64) -> Option<PointerSample> {
        self.latest.map(|s| s.at(now_ms))
    }

    #[inline]
    pub fn has_entered(&self) -> bool {
        self.latest.is_some()
    }

    pub fn speed(&self) -> f32 {
        self.latest.map(|s| s.speed()).unwrap_or(0.0)
    }

    /// Probabilistic spark gate so trails feel organic rather than periodic.
    pub fn should_spark<R: Rng>(&self, rng: &mut R) -> bool {
        self.speed() > SPARK_SPEED_THRESHOLD && rng.gen::<f32>() < SPARK_CHANCE
    }

    pub fn reset(&mut self) {
        self.latest = None;
    }
}

// One-shot viewport reveals: the curtain-wipe text reveal, its multi-line
// cascade and the plain fade-up used by stacked panels.

use super::constants::*;
use super::timeline::Ease;

/// Fraction of an element's height inside `[0, viewport_h]`.
pub fn intersection_ratio(top: f32, height: f32, viewport_h: f32) -> f32 {
    if height <= 0.0 {
        return if top >= 0.0 && top <= viewport_h { 1.0 } else { 0.0 };
    }
    let visible = (top + height).min(viewport_h) - top.max(0.0);
    (visible.max(0.0) / height).clamp(0.0, 1.0)
}

/// Sticky "has this entrance been observed" flag.
#[derive(Clone, Copy, Debug)]
pub struct OneShot {
    threshold: f32,
    fired_at: Option<f64>,
}

impl OneShot {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired_at: None,
        }
    }

    /// Returns true only on the call that fires the trigger.
    pub fn observe(&mut self, ratio: f32, now_ms: f64) -> bool {
        if self.fired_at.is_some() || ratio < self.threshold || ratio <= 0.0 {
            return false;
        }
        self.fired_at = Some(now_ms);
        true
    }

    #[inline]
    pub fn fired_at(&self) -> Option<f64> {
        self.fired_at
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired_at.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealParams {
    pub threshold: f32,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub color: [f32; 4],
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            delay_ms: 0.0,
            duration_ms: REVEAL_DURATION_MS,
            color: [0.98, 0.78, 0.27, 1.0],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurtainEdge {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    /// Edge the curtain is anchored to (grows from left, recedes to right).
    pub curtain_origin: CurtainEdge,
    /// Horizontal scale of the curtain, 0 = hidden, 1 = fully covering.
    pub curtain_scale: f32,
    pub content_opacity: f32,
}

impl RevealFrame {
    const HIDDEN: RevealFrame = RevealFrame {
        curtain_origin: CurtainEdge::Left,
        curtain_scale: 0.0,
        content_opacity: 0.0,
    };
    const SHOWN: RevealFrame = RevealFrame {
        curtain_origin: CurtainEdge::Right,
        curtain_scale: 0.0,
        content_opacity: 1.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Waiting,
    Playing,
    Done,
}

#[derive(Clone, Copy, Debug)]
pub struct OneShotReveal {
    params: RevealParams,
    trigger: OneShot,
    done: bool,
}

impl OneShotReveal {
    pub fn new(params: RevealParams) -> Self {
        Self {
            params,
            trigger: OneShot::new(params.threshold),
            done: false,
        }
    }

    #[inline]
    pub fn params(&self) -> &RevealParams {
        &self.params
    }

    pub fn observe(&mut self, ratio: f32, now_ms: f64) -> bool {
        let fired = self.trigger.observe(ratio, now_ms);
        if fired {
            log::debug!("[reveal] triggered at {:.0}ms", now_ms);
        }
        fired
    }

    pub fn has_fired(&self) -> bool {
        self.trigger.has_fired()
    }

    fn local_t(&self, now_ms: f64) -> Option<f32> {
        let start = self.trigger.fired_at()? + self.params.delay_ms;
        Some(((now_ms - start) / self.params.duration_ms.max(1.0)) as f32)
    }

    pub fn state(&self, now_ms: f64) -> RevealState {
        if self.done {
            return RevealState::Done;
        }
        match self.local_t(now_ms) {
            None => RevealState::Waiting,
            Some(t) if t >= 1.0 => RevealState::Done,
            Some(_) => RevealState::Playing,
        }
    }

    /// Latches `Done` so later samples are constant.
    pub fn update(&mut self, now_ms: f64) -> RevealFrame {
        if self.state(now_ms) == RevealState::Done {
            self.done = true;
        }
        self.sample(now_ms)
    }

    pub fn sample(&self, now_ms: f64) -> RevealFrame {
        if self.done {
            return RevealFrame::SHOWN;
        }
        let t = match self.local_t(now_ms) {
            None => return RevealFrame::HIDDEN,
            Some(t) => t,
        };
        if t <= 0.0 {
            RevealFrame::HIDDEN
        } else if t < 0.5 {
            RevealFrame {
                curtain_origin: CurtainEdge::Left,
                curtain_scale: Ease::InOutSine.apply(t * 2.0),
                content_opacity: 0.0,
            }
        } else if t < 1.0 {
            // Content flips to visible while still covered.
            RevealFrame {
                curtain_origin: CurtainEdge::Right,
                curtain_scale: 1.0 - Ease::InOutSine.apply((t - 0.5) * 2.0),
                content_opacity: 1.0,
            }
        } else {
            RevealFrame::SHOWN
        }
    }
}

/// Same curtain transition applied to an ordered list of lines, each
/// delayed by a fixed increment per index.
#[derive(Clone, Debug)]
pub struct LineCascade {
    lines: Vec<OneShotReveal>,
}

impl LineCascade {
    pub fn new(line_count: usize, base: RevealParams) -> Self {
        Self::with_stagger(line_count, base, LINE_STAGGER_MS)
    }

    pub fn with_stagger(line_count: usize, base: RevealParams, stagger_ms: f64) -> Self {
        let lines = (0..line_count)
            .map(|i| {
                OneShotReveal::new(RevealParams {
                    delay_ms: base.delay_ms + i as f64 * stagger_ms,
                    ..base
                })
            })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines share one observation of the container.
    pub fn observe(&mut self, ratio: f32, now_ms: f64) -> bool {
        let mut fired = false;
        for l in &mut self.lines {
            fired |= l.observe(ratio, now_ms);
        }
        fired
    }

    pub fn update(&mut self, now_ms: f64, out: &mut Vec<RevealFrame>) {
        out.clear();
        out.extend(self.lines.iter_mut().map(|l| l.update(now_ms)));
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.lines
            .iter()
            .all(|l| l.state(now_ms) == RevealState::Done)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeFrame {
    pub opacity: f32,
    pub translate_y: f32,
}

/// Plain fade-up entrance, also one-shot.
#[derive(Clone, Copy, Debug)]
pub struct FadeUp {
    trigger: OneShot,
    delay_ms: f64,
    duration_ms: f64,
}

impl FadeUp {
    pub fn new(threshold: f32, delay_ms: f64) -> Self {
        Self {
            trigger: OneShot::new(threshold),
            delay_ms,
            duration_ms: FADE_UP_DURATION_MS,
        }
    }

    pub fn observe(&mut self, ratio: f32, now_ms: f64) -> bool {
        self.trigger.observe(ratio, now_ms)
    }

    pub fn has_fired(&self) -> bool {
        self.trigger.has_fired()
    }

    pub fn sample(&self, now_ms: f64) -> FadeFrame {
        let k = match self.trigger.fired_at() {
            None => 0.0,
            Some(at) => Ease::OutCubic
                .apply(((now_ms - at - self.delay_ms) / self.duration_ms) as f32),
        };
        FadeFrame {
            opacity: k,
            translate_y: (1.0 - k) * FADE_UP_OFFSET_PX,
        }
    }
}

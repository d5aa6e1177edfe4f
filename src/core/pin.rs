// Pinned horizontal sections ("quarters", "offerings").
//
// One progress value per pinned track is the single source of truth; every
// sub-animation inside the pin keys off a sub-range of it.

use super::capability::LayoutMode;
use super::reveal::{FadeFrame, FadeUp};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinPhase {
    Before,
    Pinned,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinnedTrack {
    /// Document scroll offset at which the container pins.
    pub start_y: f32,
    /// Scroll distance consumed while pinned.
    pub distance: f32,
    pub panels: usize,
}

impl PinnedTrack {
    pub fn new(start_y: f32, distance: f32, panels: usize) -> Self {
        Self {
            start_y,
            distance: distance.max(1.0),
            panels: panels.max(1),
        }
    }

    /// Build from measured layout: the section is `section_height` tall and
    /// pins for everything beyond one viewport.
    pub fn from_layout(section_top: f32, section_height: f32, viewport_h: f32, panels: usize) -> Self {
        Self::new(section_top, section_height - viewport_h, panels)
    }

    pub fn progress(&self, scroll_y: f32) -> f32 {
        ((scroll_y - self.start_y) / self.distance).clamp(0.0, 1.0)
    }

    pub fn phase(&self, scroll_y: f32) -> PinPhase {
        if scroll_y < self.start_y {
            PinPhase::Before
        } else if scroll_y < self.start_y + self.distance {
            PinPhase::Pinned
        } else {
            PinPhase::After
        }
    }

    /// Track translation in percent of one panel width.
    pub fn translate_percent(&self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        -100.0 * (self.panels as f32 - 1.0) * p
    }

    /// Progress range during which panel `index` is at least partly on screen.
    pub fn panel_span(&self, index: usize) -> (f32, f32) {
        if self.panels <= 1 {
            return (0.0, 1.0);
        }
        let n = (self.panels - 1) as f32;
        let i = index.min(self.panels - 1) as f32;
        (((i - 1.0) / n).max(0.0), ((i + 1.0) / n).min(1.0))
    }

    /// Progress at which panel `index` is fully in view.
    pub fn panel_center(&self, index: usize) -> f32 {
        if self.panels <= 1 {
            return 0.0;
        }
        index.min(self.panels - 1) as f32 / (self.panels - 1) as f32
    }
}

/// Local 0..1 progress of `p` inside `[start, end]`.
pub fn sub_progress(p: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if p >= end { 1.0 } else { 0.0 };
    }
    ((p - start) / (end - start)).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubKind {
    /// Offset in px swept from +depth to -depth across the panel span.
    Parallax { depth_px: f32 },
    /// 0..1 entrance while the panel slides in, delayed by `order` steps.
    TextEntrance { order: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubAnimation {
    pub panel: usize,
    pub kind: SubKind,
}

const TEXT_STEP: f32 = 0.08;

#[derive(Clone, Debug, PartialEq)]
pub struct PinFrame {
    pub phase: PinPhase,
    pub progress: f32,
    pub translate_percent: f32,
    pub subs: SmallVec<[f32; 8]>,
}

impl PinFrame {
    /// CSS transform applied to every panel. Percentages resolve against
    /// the panel's own box, so the shift is in panel widths whatever the
    /// track is laid out as.
    pub fn panel_transform(&self) -> String {
        format!("translate3d({:.3}%,0,0)", self.translate_percent)
    }
}

#[derive(Clone, Debug)]
pub struct PinnedSection {
    pub track: PinnedTrack,
    pub subs: Vec<SubAnimation>,
}

impl PinnedSection {
    pub fn new(track: PinnedTrack) -> Self {
        Self {
            track,
            subs: Vec::new(),
        }
    }

    pub fn with_sub(mut self, panel: usize, kind: SubKind) -> Self {
        self.subs.push(SubAnimation { panel, kind });
        self
    }

    pub fn evaluate(&self, scroll_y: f32) -> PinFrame {
        let p = self.track.progress(scroll_y);
        let subs = self.subs.iter().map(|s| self.sub_value(p, s)).collect();
        PinFrame {
            phase: self.track.phase(scroll_y),
            progress: p,
            translate_percent: self.track.translate_percent(p),
            subs,
        }
    }

    fn sub_value(&self, p: f32, sub: &SubAnimation) -> f32 {
        match sub.kind {
            SubKind::Parallax { depth_px } => {
                let (a, b) = self.track.panel_span(sub.panel);
                depth_px * (1.0 - 2.0 * sub_progress(p, a, b))
            }
            SubKind::TextEntrance { order } => {
                let center = self.track.panel_center(sub.panel);
                let (a, _) = self.track.panel_span(sub.panel);
                let start = a + (center - a) * 0.5 + order as f32 * TEXT_STEP * (center - a);
                sub_progress(p, start.min(center), center)
            }
        }
    }
}

/// Narrow/touch fallback: each panel fades in on its own, no pinning.
#[derive(Clone, Debug)]
pub struct StackedPanels {
    panels: Vec<FadeUp>,
}

impl StackedPanels {
    pub fn new(count: usize, threshold: f32) -> Self {
        Self {
            panels: (0..count).map(|_| FadeUp::new(threshold, 0.0)).collect(),
        }
    }

    pub fn observe(&mut self, index: usize, ratio: f32, now_ms: f64) -> bool {
        self.panels
            .get_mut(index)
            .map(|p| p.observe(ratio, now_ms))
            .unwrap_or(false)
    }

    pub fn sample(&self, index: usize, now_ms: f64) -> Option<FadeFrame> {
        self.panels.get(index).map(|p| p.sample(now_ms))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// A pinned region in whichever form the layout mode calls for.
#[derive(Clone, Debug)]
pub enum PinLayout {
    Horizontal(PinnedSection),
    Stacked(StackedPanels),
}

impl PinLayout {
    pub fn for_mode(mode: LayoutMode, section: PinnedSection, threshold: f32) -> Self {
        match mode {
            LayoutMode::Horizontal => PinLayout::Horizontal(section),
            LayoutMode::Stacked => {
                PinLayout::Stacked(StackedPanels::new(section.track.panels, threshold))
            }
        }
    }
}

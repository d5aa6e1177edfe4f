// One-shot capability check that decides whether rich motion mounts at all.

use super::constants::NARROW_VIEWPORT_PX;

/// Raw answers from the environment. `None` means the query threw or the
/// browser does not support it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Capabilities {
    pub reduced_motion: Option<bool>,
    pub coarse_pointer: Option<bool>,
    pub viewport_width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Pinned sections translate horizontally with scroll.
    Horizontal,
    /// Panels stack vertically and fade in independently.
    Stacked,
}

impl Capabilities {
    /// Unknown answers default to enabled.
    pub fn should_animate(&self) -> bool {
        !matches!(self.reduced_motion, Some(true)) && !matches!(self.coarse_pointer, Some(true))
    }

    pub fn is_touch(&self) -> bool {
        matches!(self.coarse_pointer, Some(true))
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.is_touch() || self.viewport_width < NARROW_VIEWPORT_PX {
            LayoutMode::Stacked
        } else {
            LayoutMode::Horizontal
        }
    }
}

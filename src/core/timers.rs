// Timer-driven state: the loading overlay's auto-advance and the mentor
// carousel's idle resume. The timers themselves are owned by the host; these
// types only decide what a timer firing or a user interaction means.

use super::constants::CAROUSEL_SPEED_PX_PER_SEC;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterCause {
    User,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderState {
    Waiting,
    Entered(EnterCause),
}

/// What the host should do with the pending auto-advance timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    Keep,
    Clear,
    Restart,
}

#[derive(Clone, Copy, Debug)]
pub struct LoaderGate {
    state: LoaderState,
    hero_ready: bool,
}

impl Default for LoaderGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderGate {
    pub fn new() -> Self {
        Self {
            state: LoaderState::Waiting,
            hero_ready: false,
        }
    }

    /// Real interaction. The auto-advance timer must be cleared.
    pub fn interact(&mut self) -> TimerAction {
        if self.state == LoaderState::Waiting {
            self.state = LoaderState::Entered(EnterCause::User);
            log::info!("[loader] entered by user");
        }
        TimerAction::Clear
    }

    /// Auto-advance timer fired; synthesizes the click unless the user was
    /// first.
    pub fn timeout(&mut self) -> bool {
        if self.state == LoaderState::Waiting {
            self.state = LoaderState::Entered(EnterCause::Auto);
            log::info!("[loader] auto-advanced");
            return true;
        }
        false
    }

    pub fn hero_ready(&mut self) {
        self.hero_ready = true;
    }

    /// Called once every subsystem has bound. A page whose hero did not
    /// bind has nothing to wait for.
    pub fn settle(&mut self, hero_bound: bool) {
        if !hero_bound {
            log::debug!("[loader] no hero bound, not waiting for it");
            self.hero_ready = true;
        }
    }

    #[inline]
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Overlay may leave once entered and the hero has finished its reveal.
    pub fn can_dismiss(&self) -> bool {
        matches!(self.state, LoaderState::Entered(_)) && self.hero_ready
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselMode {
    Auto,
    Paused,
}

/// Horizontally auto-scrolling mentor strip.
#[derive(Clone, Copy, Debug)]
pub struct Carousel {
    offset: f32,
    track_width: f32,
    mode: CarouselMode,
}

impl Carousel {
    pub fn new(track_width: f32) -> Self {
        Self {
            offset: 0.0,
            track_width: track_width.max(0.0),
            mode: CarouselMode::Auto,
        }
    }

    pub fn set_track_width(&mut self, w: f32) {
        self.track_width = w.max(0.0);
        self.offset = self.wrap(self.offset);
    }

    fn wrap(&self, x: f32) -> f32 {
        if self.track_width <= 0.0 {
            0.0
        } else {
            x.rem_euclid(self.track_width)
        }
    }

    /// Any manual scroll/drag pauses auto-scroll and re-arms the idle timer.
    pub fn interact(&mut self, manual_offset: Option<f32>) -> TimerAction {
        self.mode = CarouselMode::Paused;
        if let Some(o) = manual_offset {
            self.offset = self.wrap(o);
        }
        TimerAction::Restart
    }

    pub fn resume(&mut self) {
        if self.mode == CarouselMode::Paused {
            log::debug!("[carousel] resuming auto-scroll");
        }
        self.mode = CarouselMode::Auto;
    }

    pub fn frame(&mut self, dt_sec: f32) -> f32 {
        if self.mode == CarouselMode::Auto {
            self.offset = self.wrap(self.offset + CAROUSEL_SPEED_PX_PER_SEC * dt_sec.max(0.0));
        }
        self.offset
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    #[inline]
    pub fn mode(&self) -> CarouselMode {
        self.mode
    }
}

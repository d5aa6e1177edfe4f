// Host-side tests for mount/teardown bookkeeping against a counting host.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod capability {
        include!("../src/core/capability.rs");
    }
    pub mod lifecycle {
        include!("../src/core/lifecycle.rs");
    }
}

use motion::capability::{Capabilities, LayoutMode};
use motion::lifecycle::*;

/// Hands out numbered handles and tracks how many are outstanding.
#[derive(Default)]
struct CountingHost {
    next: u32,
    listeners: Vec<(u32, Subsystem, EventKind)>,
    frames: Vec<(u32, Subsystem)>,
    timers: Vec<(u32, Subsystem, u32)>,
    timers_started: usize,
    timers_cleared: usize,
    refuse_listen: bool,
}

impl CountingHost {
    fn id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    fn outstanding(&self) -> usize {
        self.listeners.len() + self.frames.len() + self.timers.len()
    }
}

impl Host for CountingHost {
    type Listener = u32;
    type Frame = u32;
    type Timer = u32;

    fn listen(&mut self, owner: Subsystem, kind: EventKind) -> Option<u32> {
        if self.refuse_listen {
            return None;
        }
        let id = self.id();
        self.listeners.push((id, owner, kind));
        Some(id)
    }

    fn unlisten(&mut self, listener: u32) {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _, _)| *id != listener);
        assert_eq!(before - 1, self.listeners.len(), "unknown listener {}", listener);
    }

    fn request_frames(&mut self, owner: Subsystem) -> Option<u32> {
        let id = self.id();
        self.frames.push((id, owner));
        Some(id)
    }

    fn cancel_frames(&mut self, frame: u32) {
        let before = self.frames.len();
        self.frames.retain(|(id, _)| *id != frame);
        assert_eq!(before - 1, self.frames.len(), "unknown frame loop {}", frame);
    }

    fn start_timer(&mut self, owner: Subsystem, delay_ms: u32) -> Option<u32> {
        let id = self.id();
        self.timers_started += 1;
        self.timers.push((id, owner, delay_ms));
        Some(id)
    }

    fn clear_timer(&mut self, timer: u32) {
        let before = self.timers.len();
        self.timers.retain(|(id, _, _)| *id != timer);
        assert_eq!(before - 1, self.timers.len(), "unknown timer {}", timer);
        self.timers_cleared += 1;
    }
}

fn desktop() -> Capabilities {
    Capabilities {
        reduced_motion: Some(false),
        coarse_pointer: Some(false),
        viewport_width: 1440.0,
    }
}

const HOME: &[Subsystem] = &[
    Subsystem::Cursor,
    Subsystem::Loader,
    Subsystem::Hero,
    Subsystem::Fluid,
    Subsystem::Reveals,
    Subsystem::Pins,
    Subsystem::Carousel,
    Subsystem::Cta,
];

#[test]
fn gate_follows_both_preferences() {
    assert!(desktop().should_animate());
    assert!(Capabilities::default().should_animate());
    let reduced = Capabilities {
        reduced_motion: Some(true),
        ..desktop()
    };
    let touch = Capabilities {
        coarse_pointer: Some(true),
        ..desktop()
    };
    assert!(!reduced.should_animate());
    assert!(!touch.should_animate());
}

#[test]
fn mount_acquires_declared_resources() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    assert!(mounts.mount(&mut host, Subsystem::Cursor));
    assert_eq!(
        host.listeners.len(),
        Subsystem::Cursor.events(LayoutMode::Horizontal).len()
    );
    assert_eq!(host.frames.len(), 1);
    assert!(mounts.is_mounted(Subsystem::Cursor));
}

#[test]
fn double_mount_is_refused() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    assert!(mounts.mount(&mut host, Subsystem::Hero));
    let before = host.outstanding();
    assert!(!mounts.mount(&mut host, Subsystem::Hero));
    assert_eq!(host.outstanding(), before);
}

#[test]
fn reduced_motion_attaches_nothing_for_rich_subsystems() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(Capabilities {
        reduced_motion: Some(true),
        ..desktop()
    });
    for s in [Subsystem::Cursor, Subsystem::Hero, Subsystem::Fluid] {
        assert!(!mounts.mount(&mut host, s));
        assert!(!mounts.is_mounted(s));
    }
    assert_eq!(host.outstanding(), 0);

    // Static subsystems still mount.
    assert!(mounts.mount(&mut host, Subsystem::Reveals));
    assert!(mounts.mount(&mut host, Subsystem::ContactForm));
    assert!(host.outstanding() > 0);
}

#[test]
fn teardown_releases_everything_and_is_idempotent() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    for s in HOME {
        mounts.mount(&mut host, *s);
    }
    mounts.restart_timer(&mut host, Subsystem::Loader, 4000);
    mounts.restart_timer(&mut host, Subsystem::Carousel, 3000);
    assert!(host.outstanding() > 0);

    mounts.unmount_all(&mut host);
    assert_eq!(host.outstanding(), 0);
    assert_eq!(mounts.mounted().count(), 0);

    // Second teardown touches nothing (the host would panic on unknown ids).
    mounts.unmount_all(&mut host);
    assert_eq!(host.outstanding(), 0);
}

#[test]
fn scope_dispose_twice_is_noop() {
    let mut host = CountingHost::default();
    let mut scope: Scope<CountingHost> = Scope::default();
    scope.listen(&mut host, Subsystem::Reveals, EventKind::Scroll);
    scope.run_frames(&mut host, Subsystem::Reveals);
    scope.run_frames(&mut host, Subsystem::Reveals);
    assert_eq!(host.frames.len(), 1);
    scope.restart_timer(&mut host, Subsystem::Reveals, 10);
    assert!(!scope.is_empty());
    scope.dispose(&mut host);
    assert!(scope.is_empty());
    scope.dispose(&mut host);
    assert_eq!(host.outstanding(), 0);
}

#[test]
fn restart_timer_debounces() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    mounts.mount(&mut host, Subsystem::Carousel);
    for _ in 0..5 {
        mounts.restart_timer(&mut host, Subsystem::Carousel, 3000);
    }
    assert_eq!(host.timers_started, 5);
    assert_eq!(host.timers_cleared, 4);
    assert_eq!(host.timers.len(), 1);
    assert_eq!(host.timers[0].2, 3000);
}

#[test]
fn fired_timer_is_not_cleared_again() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    mounts.mount(&mut host, Subsystem::Loader);
    mounts.restart_timer(&mut host, Subsystem::Loader, 4000);
    // The browser dropped the timeout after it fired.
    host.timers.clear();
    mounts.timer_fired(Subsystem::Loader);
    mounts.unmount(&mut host, Subsystem::Loader);
    assert_eq!(host.timers_cleared, 0);
}

#[test]
fn timers_on_unmounted_subsystems_are_ignored() {
    let mut host = CountingHost::default();
    let mut mounts: Mounts<CountingHost> = Mounts::new(desktop());
    mounts.restart_timer(&mut host, Subsystem::Carousel, 3000);
    assert_eq!(host.timers_started, 0);
}

#[test]
fn failed_listen_is_not_recorded() {
    let mut host = CountingHost {
        refuse_listen: true,
        ..Default::default()
    };
    let mut mounts = Mounts::new(desktop());
    assert!(mounts.mount(&mut host, Subsystem::Reveals));
    mounts.unmount_all(&mut host);
    assert_eq!(host.outstanding(), 0);
}

#[test]
fn stacked_pins_listen_to_less() {
    let h = Subsystem::Pins.events(LayoutMode::Horizontal).len();
    let s = Subsystem::Pins.events(LayoutMode::Stacked).len();
    assert!(s < h);
    assert!(!Subsystem::ContactForm.needs_frames());
    assert!(Subsystem::Carousel.needs_frames());
    // Wrap width is re-measured on resize.
    assert!(Subsystem::Carousel
        .events(LayoutMode::Horizontal)
        .contains(&EventKind::Resize));
}

#[test]
fn unbound_subsystem_is_released_after_mount() {
    let mut host = CountingHost::default();
    let mut mounts = Mounts::new(desktop());
    assert!(mounts.mount(&mut host, Subsystem::Loader));
    assert!(mounts.mount(&mut host, Subsystem::Hero));
    // The hero markup is missing, so the mount is rolled back.
    mounts.unmount(&mut host, Subsystem::Hero);
    assert!(!mounts.is_mounted(Subsystem::Hero));
    assert!(mounts.is_mounted(Subsystem::Loader));
    assert_eq!(
        host.outstanding(),
        Subsystem::Loader.events(LayoutMode::Horizontal).len()
    );
}

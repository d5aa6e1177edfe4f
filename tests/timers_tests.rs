// Host-side tests for the loader gate and the carousel idle resume.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod timers {
        include!("../src/core/timers.rs");
    }
}

use motion::constants::CAROUSEL_SPEED_PX_PER_SEC;
use motion::timers::*;

#[test]
fn user_enter_wins_over_timeout() {
    let mut g = LoaderGate::new();
    assert_eq!(g.interact(), TimerAction::Clear);
    assert_eq!(g.state(), LoaderState::Entered(EnterCause::User));
    // A timer that fires anyway changes nothing.
    assert!(!g.timeout());
    assert_eq!(g.state(), LoaderState::Entered(EnterCause::User));
}

#[test]
fn timeout_auto_advances_once() {
    let mut g = LoaderGate::default();
    assert!(g.timeout());
    assert!(!g.timeout());
    assert_eq!(g.state(), LoaderState::Entered(EnterCause::Auto));
    // Late interaction keeps the original cause.
    g.interact();
    assert_eq!(g.state(), LoaderState::Entered(EnterCause::Auto));
}

#[test]
fn dismiss_waits_for_hero_ready() {
    let mut g = LoaderGate::new();
    g.hero_ready();
    assert!(!g.can_dismiss());
    g.interact();
    assert!(g.can_dismiss());

    let mut g = LoaderGate::new();
    g.interact();
    assert!(!g.can_dismiss());
    g.hero_ready();
    assert!(g.can_dismiss());
}

#[test]
fn carousel_advances_and_wraps() {
    let mut c = Carousel::new(100.0);
    assert_eq!(c.mode(), CarouselMode::Auto);
    let o = c.frame(1.0);
    assert!((o - CAROUSEL_SPEED_PX_PER_SEC.rem_euclid(100.0)).abs() < 1e-4);
    for _ in 0..10 {
        c.frame(0.5);
    }
    assert!(c.offset() >= 0.0 && c.offset() < 100.0);
}

#[test]
fn carousel_interaction_pauses_until_resume() {
    let mut c = Carousel::new(1000.0);
    c.frame(1.0);
    assert_eq!(c.interact(Some(250.0)), TimerAction::Restart);
    assert_eq!(c.mode(), CarouselMode::Paused);
    assert_eq!(c.offset(), 250.0);
    c.frame(5.0);
    assert_eq!(c.offset(), 250.0);
    c.resume();
    c.frame(1.0);
    assert!((c.offset() - (250.0 + CAROUSEL_SPEED_PX_PER_SEC)).abs() < 1e-3);
}

#[test]
fn manual_offset_wraps_negative() {
    let mut c = Carousel::new(200.0);
    c.interact(Some(-50.0));
    assert_eq!(c.offset(), 150.0);
}

#[test]
fn zero_width_track_stays_put() {
    let mut c = Carousel::new(0.0);
    assert_eq!(c.frame(10.0), 0.0);
    c.set_track_width(300.0);
    c.frame(1.0);
    assert!(c.offset() > 0.0);
}

#[test]
fn missing_hero_does_not_hold_the_loader() {
    let mut g = LoaderGate::new();
    g.settle(false);
    assert!(!g.can_dismiss());
    assert!(g.timeout());
    assert!(g.can_dismiss());
}

#[test]
fn bound_hero_still_gates_dismissal() {
    let mut g = LoaderGate::new();
    g.settle(true);
    g.interact();
    assert!(!g.can_dismiss());
    g.hero_ready();
    assert!(g.can_dismiss());
}

#[test]
fn narrower_track_rewraps_offset() {
    let mut c = Carousel::new(1000.0);
    c.interact(Some(700.0));
    c.set_track_width(400.0);
    assert_eq!(c.track_width(), 400.0);
    assert_eq!(c.offset(), 300.0);
    c.resume();
    c.frame(1.0);
    assert!(c.offset() < 400.0);
}

// Host-side tests for cursor classification and following.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod pointer {
        include!("../src/core/pointer.rs");
    }
    pub mod cursor {
        include!("../src/core/cursor.rs");
    }
}

use glam::Vec2;
use motion::cursor::*;
use motion::pointer::PointerSample;

fn el(tag: &str) -> ElementInfo {
    ElementInfo::new(tag)
}

#[test]
fn override_marker_wins_over_everything() {
    let path = vec![
        el("span").with_override("drag"),
        el("a"),
        el("div").with_class(HERO_REGION_CLASS),
    ];
    assert_eq!(classify(&path), CursorVariant::Drag);
}

#[test]
fn override_on_ancestor_still_wins() {
    let path = vec![el("button"), el("section").with_override("hover-link")];
    assert_eq!(classify(&path), CursorVariant::HoverLink);
}

#[test]
fn unknown_override_is_ignored() {
    let path = vec![el("span").with_override("sparkly"), el("a")];
    assert_eq!(classify(&path), CursorVariant::HoverLink);
}

#[test]
fn hero_region_beats_anchor() {
    let path = vec![el("a"), el("figure").with_class(HERO_REGION_CLASS)];
    assert_eq!(classify(&path), CursorVariant::HoverHero);
    let by_attr = vec![el("img"), el("div").with_region("hero")];
    assert_eq!(classify(&by_attr), CursorVariant::HoverHero);
}

#[test]
fn anchor_beats_button_and_matches_descendants() {
    let path = vec![el("span"), el("button"), el("a")];
    assert_eq!(classify(&path), CursorVariant::HoverLink);
}

#[test]
fn button_beats_drag_region() {
    let path = vec![el("button"), el("ul").with_class(DRAG_REGION_CLASS)];
    assert_eq!(classify(&path), CursorVariant::HoverButton);
}

#[test]
fn drag_region_then_default() {
    let drag = vec![el("li"), el("ul").with_region("drag")];
    assert_eq!(classify(&drag), CursorVariant::Drag);
    assert_eq!(classify(&[el("p"), el("body")]), CursorVariant::Default);
    assert_eq!(classify(&[]), CursorVariant::Default);
}

#[test]
fn marker_aliases_parse() {
    assert_eq!(CursorVariant::from_marker(" hero "), Some(CursorVariant::HoverHero));
    assert_eq!(CursorVariant::from_marker("button"), Some(CursorVariant::HoverButton));
    assert_eq!(CursorVariant::from_marker(""), None);
    for v in [
        CursorVariant::Default,
        CursorVariant::HoverLink,
        CursorVariant::HoverButton,
        CursorVariant::Drag,
        CursorVariant::HoverHero,
    ] {
        assert_eq!(CursorVariant::from_marker(v.as_marker()), Some(v));
    }
}

#[test]
fn follower_snaps_then_ring_trails_dot() {
    let mut f = CursorFollower::default();
    f.step(Vec2::new(10.0, 10.0), 0.016);
    assert_eq!(f.dot, Vec2::new(10.0, 10.0));
    assert_eq!(f.ring, Vec2::new(10.0, 10.0));

    let target = Vec2::new(110.0, 10.0);
    f.step(target, 0.016);
    let dot_gap = (target - f.dot).length();
    let ring_gap = (target - f.ring).length();
    assert!(dot_gap < ring_gap, "dot {} ring {}", dot_gap, ring_gap);

    for _ in 0..200 {
        f.step(target, 0.016);
    }
    assert!((f.ring - target).length() < 0.01);
}

#[test]
fn follower_is_frame_rate_independent() {
    let target = Vec2::new(100.0, 0.0);
    let mut a = CursorFollower::default();
    let mut b = CursorFollower::default();
    a.step(Vec2::ZERO, 0.0);
    b.step(Vec2::ZERO, 0.0);
    a.step(target, 0.032);
    b.step(target, 0.016);
    b.step(target, 0.016);
    assert!((a.ring - b.ring).length() < 1e-3);
}

#[test]
fn glyph_only_over_hero_when_moving() {
    let fast = PointerSample {
        x: 0.0,
        y: 0.0,
        velocity_x: 0.0,
        velocity_y: 1.0,
        timestamp_ms: 0.0,
    };
    let slow = PointerSample {
        velocity_y: 0.01,
        ..fast
    };
    let a = glyph_angle(CursorVariant::HoverHero, &fast).unwrap();
    assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert!(glyph_angle(CursorVariant::HoverHero, &slow).is_none());
    assert!(glyph_angle(CursorVariant::HoverLink, &fast).is_none());
}

#[test]
fn cursor_hidden_until_first_move_and_after_leave() {
    let mut c = CustomCursor::new(7);
    assert!(!c.frame(0.016, 0.0).visible);
    c.on_pointer_move(50.0, 60.0, 0.0);
    let f = c.frame(0.016, 16.0);
    assert!(f.visible);
    assert_eq!(f.dot, Vec2::new(50.0, 60.0));
    c.on_pointer_leave();
    assert!(!c.frame(0.016, 32.0).visible);
    c.on_pointer_move(52.0, 60.0, 48.0);
    assert!(c.frame(0.016, 64.0).visible);
}

#[test]
fn glyph_hides_once_pointer_rests() {
    let mut c = CustomCursor::new(3);
    c.on_pointer_over(&[el("div").with_class(HERO_REGION_CLASS)]);
    c.on_pointer_move(0.0, 0.0, 0.0);
    c.on_pointer_move(50.0, 0.0, 16.0);
    let moving = c.frame(0.016, 20.0);
    assert_eq!(moving.glyph_angle, Some(0.0));

    // No further pointermove arrives while the pointer sits still.
    let mut now = 20.0;
    let mut last = moving;
    for _ in 0..121 {
        now += 16.0;
        last = c.frame(0.016, now);
    }
    assert!(last.glyph_angle.is_none());
    assert_eq!(last.variant, CursorVariant::HoverHero);
    assert!(last.visible);

    // Moving again brings it back.
    c.on_pointer_move(50.0, 10.0, now + 16.0);
    c.on_pointer_move(50.0, 40.0, now + 32.0);
    let resumed = c.frame(0.016, now + 36.0).glyph_angle.unwrap();
    assert!((resumed - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn fast_motion_spawns_bounded_sparks() {
    let mut c = CustomCursor::new(42);
    let mut t = 0.0;
    for i in 0..500 {
        t += 10.0;
        // 50px per 10ms = 5 px/ms, well above the spark threshold
        c.on_pointer_move((i * 50) as f32, 0.0, t);
    }
    let live = c.sparks().live_count();
    assert!(live > 0);
    assert!(live <= c.sparks().capacity());
}

#[test]
fn slow_motion_never_sparks() {
    let mut c = CustomCursor::new(42);
    for i in 0..200 {
        c.on_pointer_move(i as f32 * 0.5, 0.0, i as f64 * 16.0);
    }
    assert_eq!(c.sparks().live_count(), 0);
}

#[test]
fn teardown_resets_state() {
    let mut c = CustomCursor::new(1);
    c.on_pointer_over(&[el("a")]);
    for i in 0..100 {
        c.on_pointer_move(i as f32 * 40.0, 0.0, i as f64 * 5.0);
    }
    c.teardown();
    assert_eq!(c.variant(), CursorVariant::Default);
    assert_eq!(c.sparks().live_count(), 0);
    assert!(!c.snapshot().visible);
}

#[test]
fn deep_ancestors_still_classify() {
    let mut path: Vec<ElementInfo> = (0..30).map(|_| el("span")).collect();
    path.push(el("section").with_override("drag"));
    assert_eq!(classify(&path), CursorVariant::Drag);

    let mut path: Vec<ElementInfo> = (0..40).map(|_| el("div")).collect();
    path.push(el("a"));
    assert_eq!(classify(&path), CursorVariant::HoverLink);
}

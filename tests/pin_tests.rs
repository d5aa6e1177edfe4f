// Host-side tests for pinned horizontal sections and their stacked fallback.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod capability {
        include!("../src/core/capability.rs");
    }
    pub mod timeline {
        include!("../src/core/timeline.rs");
    }
    pub mod reveal {
        include!("../src/core/reveal.rs");
    }
    pub mod pin {
        include!("../src/core/pin.rs");
    }
}

use motion::capability::{Capabilities, LayoutMode};
use motion::pin::*;

#[test]
fn progress_is_clamped_and_phased() {
    let t = PinnedTrack::new(1000.0, 3000.0, 4);
    assert_eq!(t.progress(0.0), 0.0);
    assert_eq!(t.phase(999.0), PinPhase::Before);
    assert!((t.progress(2500.0) - 0.5).abs() < 1e-6);
    assert_eq!(t.phase(2500.0), PinPhase::Pinned);
    assert_eq!(t.progress(9000.0), 1.0);
    assert_eq!(t.phase(4000.0), PinPhase::After);
}

#[test]
fn translate_is_exact_at_ends() {
    let t = PinnedTrack::new(0.0, 100.0, 4);
    assert_eq!(t.translate_percent(0.0), 0.0);
    assert_eq!(t.translate_percent(1.0), -300.0);
    assert!((t.translate_percent(0.5) + 150.0).abs() < 1e-4);
    // Out-of-range progress never overshoots.
    assert_eq!(t.translate_percent(1.7), -300.0);
}

#[test]
fn single_panel_never_moves() {
    let t = PinnedTrack::new(0.0, 100.0, 1);
    assert_eq!(t.translate_percent(1.0), 0.0);
    assert_eq!(t.panel_span(0), (0.0, 1.0));
}

#[test]
fn degenerate_layout_still_has_distance() {
    let t = PinnedTrack::from_layout(500.0, 600.0, 800.0, 3);
    assert!(t.distance >= 1.0);
    assert_eq!(t.start_y, 500.0);
    assert_eq!(t.progress(10_000.0), 1.0);
}

#[test]
fn panel_spans_cover_neighbours() {
    let t = PinnedTrack::new(0.0, 100.0, 5);
    assert_eq!(t.panel_span(0), (0.0, 0.25));
    assert_eq!(t.panel_span(2), (0.25, 0.75));
    assert_eq!(t.panel_span(4), (0.75, 1.0));
    assert_eq!(t.panel_center(2), 0.5);
}

#[test]
fn sub_progress_maps_range() {
    assert_eq!(sub_progress(0.1, 0.2, 0.4), 0.0);
    assert!((sub_progress(0.3, 0.2, 0.4) - 0.5).abs() < 1e-6);
    assert_eq!(sub_progress(0.9, 0.2, 0.4), 1.0);
    assert_eq!(sub_progress(0.5, 0.5, 0.5), 1.0);
}

#[test]
fn section_keys_every_sub_off_one_progress() {
    let section = PinnedSection::new(PinnedTrack::new(0.0, 1000.0, 3))
        .with_sub(1, SubKind::Parallax { depth_px: 50.0 })
        .with_sub(1, SubKind::TextEntrance { order: 0 })
        .with_sub(1, SubKind::TextEntrance { order: 2 });

    let start = section.evaluate(-10.0);
    assert_eq!(start.phase, PinPhase::Before);
    assert_eq!(start.subs.len(), 3);
    assert_eq!(start.subs[0], 50.0);
    assert_eq!(start.subs[1], 0.0);

    // Panel 1 is centred at p = 0.5.
    let mid = section.evaluate(500.0);
    assert!((mid.translate_percent + 100.0).abs() < 1e-3);
    assert!(mid.subs[0].abs() < 1e-3);
    assert_eq!(mid.subs[1], 1.0);
    assert_eq!(mid.subs[2], 1.0);

    let between = section.evaluate(400.0);
    assert!(between.subs[1] >= between.subs[2]);

    let end = section.evaluate(1000.0);
    assert_eq!(end.subs[0], -50.0);
    assert_eq!(end.translate_percent, -200.0);
}

#[test]
fn stacked_panels_reveal_independently() {
    let mut s = StackedPanels::new(3, 0.2);
    assert_eq!(s.len(), 3);
    assert!(s.observe(1, 0.5, 0.0));
    assert!(!s.observe(1, 0.5, 10.0));
    assert_eq!(s.sample(0, 5000.0).unwrap().opacity, 0.0);
    assert_eq!(s.sample(1, 5000.0).unwrap().opacity, 1.0);
    assert!(s.sample(7, 0.0).is_none());
    assert!(!s.observe(7, 1.0, 0.0));
}

#[test]
fn layout_mode_selects_representation() {
    let section = PinnedSection::new(PinnedTrack::new(0.0, 100.0, 4));
    let wide = Capabilities {
        viewport_width: 1280.0,
        ..Default::default()
    };
    let narrow = Capabilities {
        viewport_width: 500.0,
        ..Default::default()
    };
    let touch = Capabilities {
        coarse_pointer: Some(true),
        viewport_width: 1280.0,
        ..Default::default()
    };
    assert_eq!(wide.layout_mode(), LayoutMode::Horizontal);
    assert_eq!(narrow.layout_mode(), LayoutMode::Stacked);
    assert_eq!(touch.layout_mode(), LayoutMode::Stacked);

    match PinLayout::for_mode(narrow.layout_mode(), section.clone(), 0.2) {
        PinLayout::Stacked(s) => assert_eq!(s.len(), 4),
        PinLayout::Horizontal(_) => panic!("narrow viewport must stack"),
    }
    assert!(matches!(
        PinLayout::for_mode(wide.layout_mode(), section, 0.2),
        PinLayout::Horizontal(_)
    ));
}

#[test]
fn panels_shift_in_their_own_widths() {
    let section = PinnedSection::new(PinnedTrack::new(0.0, 1000.0, 4));
    assert_eq!(section.evaluate(-10.0).translate_percent, 0.0);
    assert_eq!(section.evaluate(500.0).panel_transform(), "translate3d(-150.000%,0,0)");
    assert_eq!(section.evaluate(5000.0).panel_transform(), "translate3d(-300.000%,0,0)");
}

// Host-side tests for the fixed-capacity particle pool and pointer tracker.

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
}

use glam::Vec2;
use motion::constants::POINTER_STALE_MS;
use motion::particles::*;
use motion::pointer::PointerTracker;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn spark(x: f32, life: f32) -> SpawnParams {
    SpawnParams {
        kind: ParticleKind::Spark,
        pos: Vec2::new(x, 0.0),
        vel: Vec2::new(100.0, 0.0),
        size: 3.0,
        life,
        drag: 0.0,
    }
}

#[test]
fn spawn_fills_free_slots_first() {
    let mut pool = ParticlePool::with_capacity(3);
    assert_eq!(pool.spawn(spark(0.0, 1.0)), Some(0));
    assert_eq!(pool.spawn(spark(1.0, 1.0)), Some(1));
    assert_eq!(pool.live_count(), 2);
}

#[test]
fn full_pool_recycles_oldest() {
    let mut pool = ParticlePool::with_capacity(2);
    pool.spawn(spark(0.0, 1.0));
    pool.spawn(spark(1.0, 1.0));
    let idx = pool.spawn(spark(2.0, 1.0)).unwrap();
    assert_eq!(idx, 0);
    assert_eq!(pool.get(0).unwrap().pos.x, 2.0);
    // Next recycle hits what is now the oldest.
    assert_eq!(pool.spawn(spark(3.0, 1.0)), Some(1));
    assert_eq!(pool.live_count(), 2);
}

#[test]
fn zero_capacity_spawns_nothing() {
    let mut pool = ParticlePool::with_capacity(0);
    assert_eq!(pool.spawn(spark(0.0, 1.0)), None);
}

#[test]
fn step_expires_and_frees() {
    let mut pool = ParticlePool::with_capacity(4);
    pool.spawn(spark(0.0, 0.1));
    pool.spawn(spark(0.0, 10.0));
    pool.step(0.2);
    assert_eq!(pool.live_count(), 1);
    assert!(pool.get(0).is_none());
    assert!(pool.get(1).is_some());
    // Freed slot is reused.
    assert_eq!(pool.spawn(spark(0.0, 1.0)), Some(0));
}

#[test]
fn drag_slows_particles_and_alpha_fades() {
    let mut pool = ParticlePool::with_capacity(1);
    pool.spawn(SpawnParams {
        drag: 3.0,
        ..spark(0.0, 2.0)
    });
    pool.step(0.5);
    let p = *pool.get(0).unwrap();
    assert!(p.vel.x < 100.0 && p.vel.x > 0.0);
    assert!(p.pos.x > 0.0);
    assert!((p.alpha() - 0.75).abs() < 1e-4);
}

#[test]
fn clear_empties_pool() {
    let mut pool = ParticlePool::with_capacity(5);
    for i in 0..5 {
        pool.spawn(spark(i as f32, 1.0));
    }
    pool.clear();
    assert_eq!(pool.live_count(), 0);
    assert_eq!(pool.iter_live().count(), 0);
}

#[test]
fn tracker_first_sample_has_no_velocity() {
    let mut t = PointerTracker::new();
    assert!(!t.has_entered());
    let s = t.record(10.0, 20.0, 100.0);
    assert_eq!(s.velocity_x, 0.0);
    assert_eq!(s.velocity_y, 0.0);
    assert!(t.has_entered());
}

#[test]
fn tracker_velocity_uses_floored_dt() {
    let mut t = PointerTracker::new();
    t.record(0.0, 0.0, 0.0);
    let s = t.record(30.0, -40.0, 10.0);
    assert!((s.velocity_x - 3.0).abs() < 1e-6);
    assert!((s.speed() - 5.0).abs() < 1e-5);
    // Same timestamp: dt floors at 1ms instead of dividing by zero.
    let s = t.record(32.0, -40.0, 10.0);
    assert!(s.velocity_x.is_finite());
    assert!((s.velocity_x - 2.0).abs() < 1e-6);
}

#[test]
fn tracker_spark_gate_needs_speed() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut t = PointerTracker::new();
    t.record(0.0, 0.0, 0.0);
    t.record(1.0, 0.0, 100.0);
    assert!((0..100).all(|_| !t.should_spark(&mut rng)));
    t.record(500.0, 0.0, 110.0);
    assert!((0..100).any(|_| t.should_spark(&mut rng)));
    t.reset();
    assert_eq!(t.speed(), 0.0);
}

#[test]
fn stale_sample_reads_as_stationary() {
    let mut t = PointerTracker::new();
    t.record(0.0, 0.0, 0.0);
    let s = t.record(40.0, 0.0, 10.0);
    assert_eq!(t.current(10.0 + POINTER_STALE_MS), Some(s));
    let rest = t.current(10.0 + POINTER_STALE_MS + 1.0).unwrap();
    assert_eq!(rest.speed(), 0.0);
    assert_eq!((rest.x, rest.y), (40.0, 0.0));
    // The recorded sample itself is untouched.
    assert_eq!(t.latest(), Some(s));
}

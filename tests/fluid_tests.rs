// Host-side tests for the fluid ping-pong discipline and uniform block.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod fluid {
        include!("../src/core/fluid.rs");
    }
}

use motion::fluid::*;

#[test]
fn ping_pong_reads_previous_write() {
    let mut p = PingPong::default();
    assert_eq!((p.read(), p.write()), (0, 1));
    let written = p.write();
    p.swap();
    assert_eq!(p.read(), written);
    assert_ne!(p.read(), p.write());
    p.swap();
    assert_eq!((p.read(), p.write()), (0, 1));
}

#[test]
fn uniform_block_matches_shader_layout() {
    assert_eq!(std::mem::size_of::<FluidUniforms>(), 64);
    assert_eq!(std::mem::size_of::<FluidUniforms>() % 16, 0);
    let u = FluidUniforms::new(640, 360);
    let bytes: &[u8] = bytemuck::bytes_of(&u);
    assert_eq!(bytes.len(), 64);
}

#[test]
fn light_direction_is_normalized() {
    let u = FluidUniforms::new(1, 1);
    let [x, y, z, w] = u.light_dir;
    assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
    assert_eq!(w, 0.0);
}

#[test]
fn pointer_maps_to_uv_and_disables_outside() {
    let mut u = FluidUniforms::new(800, 600);
    u.set_pointer(200.0, 150.0, 800.0, 600.0);
    assert_eq!(u.pointer_uv, [0.25, 0.25]);
    assert_eq!(u.pointer_active, 1.0);

    u.set_pointer(-10.0, 150.0, 800.0, 600.0);
    assert_eq!(u.pointer_active, 0.0);

    u.set_pointer(10.0, 10.0, 0.0, 600.0);
    assert_eq!(u.pointer_active, 0.0);

    u.set_pointer(400.0, 300.0, 800.0, 600.0);
    u.clear_pointer();
    assert_eq!(u.pointer_active, 0.0);
}

#[test]
fn sim_extent_never_zero() {
    assert_eq!(sim_extent(1920, 1080, 2), (960, 540));
    assert_eq!(sim_extent(1, 1, 4), (1, 1));
    assert_eq!(sim_extent(300, 200, 0), (300, 200));
}

#[test]
fn zero_size_resolution_is_clamped() {
    let u = FluidUniforms::new(0, 0);
    assert_eq!(u.resolution, [1.0, 1.0]);
}

#[test]
fn errors_describe_themselves() {
    assert!(FluidError::NoAdapter.to_string().contains("adapter"));
    assert!(FluidError::Background("x.jpg".into())
        .to_string()
        .contains("x.jpg"));
}

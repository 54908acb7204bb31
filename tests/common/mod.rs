#![allow(dead_code)]

use threebody::surface::rgba;
use threebody::{Body, CollisionFloor, ForceLaw, GravityField, SimulationConfig, Vec2};

pub fn white() -> threebody::Color {
    rgba(255, 255, 255, 255)
}

/// Body at `(x, y)` with the given velocity.
pub fn body(mass: f64, radius: f64, x: f64, y: f64, vx: f64, vy: f64) -> Body {
    Body::new(mass, radius, white())
        .unwrap()
        .with_state(Vec2::new(x, y), Vec2::new(vx, vy))
}

pub fn field(g: f64, law: ForceLaw) -> GravityField {
    GravityField::new(g, law, CollisionFloor::SumOfRadii).unwrap()
}

/// The canonical demo: three bodies of mass 1.725 on r = 100 around the
/// center of a 1024x768 canvas, G = 5, fixed seed.
pub fn demo_config() -> SimulationConfig {
    SimulationConfig {
        seed: Some(42),
        ..Default::default()
    }
}

pub fn canvas_center() -> Vec2 {
    Vec2::new(512.0, 384.0)
}

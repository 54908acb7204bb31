// src/orbit.rs

use crate::body::{Body, GlyphKind};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::vector::Vec2;
use std::f64::consts::TAU;

/// Speed of a body on the circle of radius `r`: `sqrt(G·m/r)`.
///
/// With the product force law and equal masses on a regular triangle the
/// true circular speed is `sqrt(G·m²/(√3·r))`, which this matches when
/// `m ≈ √3` (the default 1.725).
pub fn circular_speed(g: f64, mass: f64, r: f64) -> f64 {
    (g * mass / r).sqrt()
}

/// Unit tangent of the orbit at angle `theta`, pointing in the direction of
/// travel.
fn tangent(theta: f64) -> Vec2 {
    Vec2::new(theta.sin(), -theta.cos())
}

/// `config.body_count` equal bodies spaced evenly on a circle of radius
/// `orbit_radius` around the canvas center, each moving along the circle at
/// [`circular_speed`].
pub fn circular_ring(config: &SimulationConfig) -> Result<Vec<Body>, ConfigError> {
    config.validate()?;

    let n = config.body_count;
    let r = config.orbit_radius;
    let center = Vec2::new(config.width as f64 / 2.0, config.height as f64 / 2.0);
    let speed = circular_speed(config.g, config.mass, r);

    (0..n)
        .map(|i| {
            let theta = i as f64 * TAU / n as f64;
            let position = center + r * Vec2::new(theta.cos(), theta.sin());
            let velocity = speed * tangent(theta);
            let body = Body::new(config.mass, config.body_radius, config.color(i))?
                .with_state(position, velocity);
            Ok(match config.glyph {
                GlyphKind::Glow => body,
                GlyphKind::Ship => body.steerable(config.orientation),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_sit_on_the_circle() {
        let cfg = SimulationConfig::default();
        let bodies = circular_ring(&cfg).unwrap();
        assert_eq!(bodies.len(), 3);
        let center = Vec2::new(512.0, 384.0);
        for b in &bodies {
            assert!(((b.position - center).norm() - 100.0).abs() < 1e-9);
        }
        assert!((bodies[0].position - Vec2::new(612.0, 384.0)).norm() < 1e-9);
    }

    #[test]
    fn velocity_is_tangent_with_circular_speed() {
        let cfg = SimulationConfig::default();
        let v = (5.0_f64 * 1.725 / 100.0).sqrt();
        for b in circular_ring(&cfg).unwrap() {
            let radial = b.position - Vec2::new(512.0, 384.0);
            assert!(radial.dot(&b.velocity).abs() < 1e-9);
            assert!((b.velocity.norm() - v).abs() < 1e-12);
        }
    }

    #[test]
    fn all_bodies_turn_the_same_way() {
        let cfg = SimulationConfig { body_count: 5, ..Default::default() };
        let center = Vec2::new(512.0, 384.0);
        let spins: Vec<f64> = circular_ring(&cfg)
            .unwrap()
            .iter()
            .map(|b| (b.position - center).perp(&b.velocity))
            .collect();
        assert!(spins.iter().all(|s| *s < 0.0));
    }

    #[test]
    fn ship_glyph_attaches_orientation() {
        let cfg = SimulationConfig { glyph: GlyphKind::Ship, ..Default::default() };
        assert!(circular_ring(&cfg).unwrap().iter().all(|b| b.orientation().is_some()));
    }

    #[test]
    fn zero_bodies_is_rejected() {
        let cfg = SimulationConfig { body_count: 0, ..Default::default() };
        assert_eq!(circular_ring(&cfg), Err(ConfigError::NoBodies));
    }
}

// src/body.rs

use crate::error::ConfigError;
use crate::surface::{rgba, with_alpha, Color, Surface, Transform, BLACK};
use crate::vector::{heading, magnitude, Vec2};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body-local outline of the ship glyph, nose along +x.
const HULL: [[f64; 2]; 3] = [[10.0, 0.0], [-10.0, 5.0], [-10.0, -5.0]];
const FLAME: [[f64; 2]; 3] = [[-10.0, -2.0], [-10.0, 2.0], [-18.0, 0.0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphKind {
    #[default]
    Glow,
    Ship,
}

/// Starting orientation of a steerable body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Radians, 0 = east, clockwise-positive on screen.
    pub initial_heading: f64,
    pub thrust: bool,
}

/// Orientation capability attached to a body. Replaces the glow/trace
/// drawing with an oriented triangle that follows the velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub heading: f64,
    pub thrust: bool,
}

impl From<OrientationConfig> for Orientation {
    fn from(cfg: OrientationConfig) -> Self {
        Self {
            heading: cfg.initial_heading,
            thrust: cfg.thrust,
        }
    }
}

impl Orientation {
    fn render(&mut self, position: Vec2, velocity: Vec2, color: Color, layer: &mut Surface) {
        // a body at rest keeps pointing where it last pointed
        if magnitude(velocity) > 0.0 {
            self.heading = heading(velocity);
        }
        let t = Transform::new(position, self.heading);
        let hull = HULL.map(|[x, y]| t.apply(Vec2::new(x, y)));
        layer.fill_triangle(hull, color);
        layer.stroke_triangle(hull, BLACK);
        if self.thrust {
            let flame = FLAME.map(|[x, y]| t.apply(Vec2::new(x, y)));
            layer.fill_triangle(flame, rgba(255, 0, 0, 255));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Glow,
    Ship(Orientation),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Probability that a candidate pixel in the window gets stippled.
    pub density: f64,
    /// Half-width of the square stipple window, in pixels.
    pub window: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            density: 0.001,
            window: 5,
        }
    }
}

/// Validated drawing parameters shared by every body.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    stipple: Bernoulli,
    window: i64,
    glow_scale: f64,
}

impl RenderStyle {
    pub fn new(trace: &TraceConfig, glow_scale: f64) -> Result<Self, ConfigError> {
        let stipple = Bernoulli::new(trace.density)
            .map_err(|_| ConfigError::InvalidTraceDensity(trace.density))?;
        if !glow_scale.is_finite() || glow_scale <= 0.0 {
            return Err(ConfigError::InvalidGlowScale(glow_scale));
        }
        Ok(Self {
            stipple,
            window: trace.window as i64,
            glow_scale,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f64,
    pub radius: f64,
    pub color: Color,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub glyph: Glyph,
}

impl Body {
    pub fn new(mass: f64, radius: f64, color: Color) -> Result<Self, ConfigError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::InvalidMass(mass));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(Body {
            mass,
            radius,
            color,
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            glyph: Glyph::Glow,
        })
    }

    pub fn with_state(mut self, position: Vec2, velocity: Vec2) -> Self {
        self.position = position;
        self.velocity = velocity;
        self
    }

    /// Attach the orientation capability. Physics is unchanged.
    pub fn steerable(mut self, orientation: OrientationConfig) -> Self {
        self.glyph = Glyph::Ship(orientation.into());
        self
    }

    pub fn orientation(&self) -> Option<&Orientation> {
        match &self.glyph {
            Glyph::Ship(o) => Some(o),
            Glyph::Glow => None,
        }
    }

    pub fn set_thrust(&mut self, on: bool) {
        if let Glyph::Ship(o) = &mut self.glyph {
            o.thrust = on;
        }
    }

    /// Semi-implicit Euler with unit time step.
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
    }

    /// Draw this body for the current frame. Only a ship's heading is
    /// updated; position, velocity and acceleration are left alone.
    pub fn render<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut Surface,
        traces: &mut Surface,
        style: &RenderStyle,
        rng: &mut R,
    ) {
        match &mut self.glyph {
            Glyph::Glow => {
                draw_glow(bodies, self.position, self.radius * style.glow_scale, self.color);
                stipple_trace(traces, self.position, self.color, style, rng);
            }
            Glyph::Ship(orientation) => {
                orientation.render(self.position, self.velocity, self.color, bodies)
            }
        }
    }
}

/// Stacked discs, widest and faintest first, so the alpha falls linearly
/// from opaque at the center to zero at `extent`.
fn draw_glow(layer: &mut Surface, center: Vec2, extent: f64, color: Color) {
    let rings = extent.ceil().max(1.0) as usize;
    for k in 0..rings {
        let radius = extent * (rings - k) as f64 / rings as f64;
        let alpha = 255.0 * (k + 1) as f64 / rings as f64;
        layer.fill_circle(center, radius, with_alpha(color, alpha.round() as u8));
    }
}

fn stipple_trace<R: Rng + ?Sized>(
    layer: &mut Surface,
    center: Vec2,
    color: Color,
    style: &RenderStyle,
    rng: &mut R,
) {
    let cx = center.x.floor() as i64;
    let cy = center.y.floor() as i64;
    let w = style.window;
    for dy in -w..=w {
        for dx in -w..=w {
            if style.stipple.sample(rng) {
                layer.blend_pixel(cx + dx, cy + dy, color);
            }
        }
    }
    layer.blend_pixel(cx, cy, color);
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(m={:.3}, p=[{:.2}, {:.2}], v=[{:.4}, {:.4}])",
            self.mass, self.position.x, self.position.y, self.velocity.x, self.velocity.y
        )
    }
}

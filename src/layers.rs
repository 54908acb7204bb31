// src/layers.rs

use crate::error::ConfigError;
use crate::surface::{rgba, Surface};
use crate::vector::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Draw order, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerRole {
    Starfield = 0,
    Traces = 1,
    Reference = 2,
    Bodies = 3,
}

/// What happens to a layer's pixels between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Painted once at startup.
    Static,
    /// Never cleared; every frame adds to it.
    Accumulate,
    /// Cleared at the start of every frame.
    ClearEachFrame,
}

impl LayerRole {
    /// Total number of layers.
    pub const COUNT: usize = 4;

    pub const ALL: [LayerRole; LayerRole::COUNT] = [
        LayerRole::Starfield,
        LayerRole::Traces,
        LayerRole::Reference,
        LayerRole::Bodies,
    ];

    pub fn persistence(self) -> Persistence {
        match self {
            LayerRole::Starfield | LayerRole::Reference => Persistence::Static,
            LayerRole::Traces => Persistence::Accumulate,
            LayerRole::Bodies => Persistence::ClearEachFrame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Inclusive radius range, pixels.
    pub radius: [f64; 2],
    /// Inclusive gray-level range.
    pub intensity: [u8; 2],
    pub background: [u8; 4],
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            radius: [1.0, 3.0],
            intensity: [150, 255],
            background: [0, 0, 0, 255],
        }
    }
}

impl StarfieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [lo, hi] = self.radius;
        if !(lo > 0.0) || !hi.is_finite() || lo > hi {
            return Err(ConfigError::InvalidStarRadius(lo, hi));
        }
        Ok(())
    }
}

/// Paint the background, then scatter `count` gray discs at random.
pub fn generate_starfield<R: Rng + ?Sized>(layer: &mut Surface, stars: &StarfieldConfig, rng: &mut R) {
    let [r, g, b, a] = stars.background;
    layer.fill(rgba(r, g, b, a));

    let (w, h) = (layer.width() as f64, layer.height() as f64);
    if w == 0.0 || h == 0.0 {
        return;
    }
    let [r_lo, r_hi] = stars.radius;
    let (i_lo, i_hi) = (stars.intensity[0].min(stars.intensity[1]), stars.intensity[0].max(stars.intensity[1]));
    for _ in 0..stars.count {
        let at = Vec2::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
        let radius = rng.random_range(r_lo..=r_hi);
        let level = rng.random_range(i_lo..=i_hi);
        layer.fill_circle(at, radius, rgba(level, level, level, 255));
    }
}

/// White ring hugging the circle of `radius` around the layer center: one
/// circle on each side per step of `ring_width`, fading out as they move
/// away from the orbit.
pub fn generate_reference(layer: &mut Surface, radius: f64, ring_width: u32) {
    let center = layer.center();
    let w = ring_width.max(1) as f64;
    for i in 0..ring_width.max(1) {
        let offset = i as f64;
        let alpha = (255.0 - 255.0 * offset / w).round() as u8;
        let color = rgba(255, 255, 255, alpha);
        layer.stroke_circle(center, radius + offset, 1.0, color);
        if i > 0 && radius - offset >= 0.0 {
            layer.stroke_circle(center, radius - offset, 1.0, color);
        }
    }
}

/// Four offscreen layers stacked bottom-to-top onto `screen` each frame.
#[derive(Debug, Clone)]
pub struct LayerCompositor {
    layers: [Surface; LayerRole::COUNT],
    screen: Surface,
    show_reference: bool,
}

impl LayerCompositor {
    pub fn new(width: u32, height: u32, show_reference: bool) -> Self {
        Self {
            layers: std::array::from_fn(|_| Surface::new(width, height)),
            screen: Surface::new(width, height),
            show_reference,
        }
    }

    pub fn layer(&self, role: LayerRole) -> &Surface {
        &self.layers[role as usize]
    }

    pub fn layer_mut(&mut self, role: LayerRole) -> &mut Surface {
        &mut self.layers[role as usize]
    }

    /// The last composited frame.
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub fn reference_visible(&self) -> bool {
        self.show_reference
    }

    pub fn set_reference_visible(&mut self, visible: bool) {
        self.show_reference = visible;
    }

    pub fn generate_starfield<R: Rng + ?Sized>(&mut self, stars: &StarfieldConfig, rng: &mut R) {
        generate_starfield(self.layer_mut(LayerRole::Starfield), stars, rng);
        log::debug!("starfield: {} stars", stars.count);
    }

    pub fn generate_reference(&mut self, radius: f64, ring_width: u32) {
        generate_reference(self.layer_mut(LayerRole::Reference), radius, ring_width);
        log::debug!("reference ring: radius {radius}, width {ring_width}");
    }

    /// Clear every layer whose policy asks for a fresh start each frame.
    pub fn begin_frame(&mut self) {
        for role in LayerRole::ALL {
            if role.persistence() == Persistence::ClearEachFrame {
                self.layers[role as usize].clear();
            }
        }
    }

    /// Mutable access to the two layers bodies draw on, `(bodies, traces)`.
    pub fn body_targets(&mut self) -> (&mut Surface, &mut Surface) {
        let [_, traces, _, bodies] = &mut self.layers;
        (bodies, traces)
    }

    /// Clear the screen and stack the layers onto it bottom-to-top.
    pub fn composite_frame(&mut self) {
        let Self {
            layers,
            screen,
            show_reference,
        } = self;
        screen.clear();
        for role in LayerRole::ALL {
            if role == LayerRole::Reference && !*show_reference {
                continue;
            }
            screen.draw_over(&layers[role as usize]);
        }
    }
}

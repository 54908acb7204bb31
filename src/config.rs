// src/config.rs

use crate::body::{GlyphKind, OrientationConfig, RenderStyle, TraceConfig};
use crate::error::{ConfigError, Result};
use crate::gravity::{CollisionFloor, ForceLaw, GravityField};
use crate::layers::StarfieldConfig;
use crate::surface::{rgba, Color};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Every field has a default, so a JSON file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    pub body_count: usize,
    pub mass: f64,
    pub body_radius: f64,
    #[serde(rename = "G", alias = "g")]
    pub g: f64,
    /// Radius of the initial circular orbit, pixels.
    pub orbit_radius: f64,
    /// Body colors, cycled when there are more bodies than entries.
    pub palette: Vec<[u8; 4]>,
    pub force_law: ForceLaw,
    pub collision_floor: CollisionFloor,
    pub glyph: GlyphKind,
    pub orientation: OrientationConfig,
    pub trace: TraceConfig,
    /// Glow extent as a multiple of the body radius.
    pub glow_scale: f64,
    pub starfield: StarfieldConfig,
    pub ring_width: u32,
    pub show_reference: bool,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub record_history: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            body_count: 3,
            mass: 1.725,
            body_radius: 2.0,
            g: 5.0,
            orbit_radius: 100.0,
            palette: vec![[255, 0, 0, 50], [0, 255, 0, 50], [0, 0, 255, 50]],
            force_law: ForceLaw::default(),
            collision_floor: CollisionFloor::default(),
            glyph: GlyphKind::default(),
            orientation: OrientationConfig::default(),
            trace: TraceConfig::default(),
            glow_scale: 1.0,
            starfield: StarfieldConfig::default(),
            ring_width: 10,
            show_reference: true,
            seed: None,
            record_history: false,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.body_count == 0 {
            return Err(ConfigError::NoBodies);
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        if !self.body_radius.is_finite() || self.body_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.body_radius));
        }
        if !self.orbit_radius.is_finite() || self.orbit_radius <= 0.0 {
            return Err(ConfigError::InvalidOrbitRadius(self.orbit_radius));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.gravity_field()?;
        self.render_style()?;
        self.starfield.validate()?;
        Ok(())
    }

    pub fn gravity_field(&self) -> std::result::Result<GravityField, ConfigError> {
        GravityField::new(self.g, self.force_law, self.collision_floor)
    }

    pub fn render_style(&self) -> std::result::Result<RenderStyle, ConfigError> {
        RenderStyle::new(&self.trace, self.glow_scale)
    }

    /// Palette entry for body `index`.
    pub fn color(&self, index: usize) -> Color {
        let [r, g, b, a] = self.palette[index % self.palette.len()];
        rgba(r, g, b, a)
    }
}

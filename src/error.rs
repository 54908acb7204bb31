// src/error.rs

use thiserror::Error;

/// Rejected construction parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("a simulation needs at least one body")]
    NoBodies,
    #[error("gravitational constant must be finite and non-negative, got {0}")]
    InvalidGravitationalConstant(f64),
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("orbit radius must be positive and finite, got {0}")]
    InvalidOrbitRadius(f64),
    #[error("trace density must lie in [0, 1], got {0}")]
    InvalidTraceDensity(f64),
    #[error("collision floor scale must be positive and finite, got {0}")]
    InvalidCollisionScale(f64),
    #[error("glow scale must be positive and finite, got {0}")]
    InvalidGlowScale(f64),
    #[error("color palette is empty")]
    EmptyPalette,
    #[error("star radius range [{0}, {1}] is not a valid positive interval")]
    InvalidStarRadius(f64, f64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

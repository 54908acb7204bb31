pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod gravity;
pub mod layers;
pub mod orbit;
pub mod simulation;
pub mod surface;
pub mod vector;

pub use body::{Body, Glyph, GlyphKind, Orientation, OrientationConfig, RenderStyle, TraceConfig};
pub use config::SimulationConfig;
pub use diagnostics::{angular_momentum, momentum, total_energy, EnergyMonitor};
pub use error::{ConfigError, Error};
pub use gravity::{CollisionFloor, ForceLaw, GravityField};
pub use layers::{LayerCompositor, LayerRole, Persistence, StarfieldConfig};
pub use simulation::{LoopState, SimulationLoop, SimulationState, Trajectory};
pub use surface::{Color, Surface};
pub use vector::Vec2;

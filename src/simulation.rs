// src/simulation.rs

use crate::body::{Body, RenderStyle};
use crate::config::SimulationConfig;
use crate::diagnostics::{total_energy, EnergyMonitor};
use crate::error::ConfigError;
use crate::gravity::GravityField;
use crate::layers::LayerCompositor;
use crate::orbit::{circular_ring, circular_speed};
use crate::surface::Surface;
use crate::vector::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
}

/// The bodies and the field acting on them.
#[derive(Debug, Clone)]
pub struct SimulationState {
    bodies: Vec<Body>,
    field: GravityField,
}

impl SimulationState {
    pub fn new(bodies: Vec<Body>, field: GravityField) -> Result<Self, ConfigError> {
        if bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }
        Ok(Self { bodies, field })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn field(&self) -> &GravityField {
        &self.field
    }

    /// Gravity, then integration, for every body.
    pub fn step(&mut self) {
        self.field.compute_accelerations(&mut self.bodies);
        for body in self.bodies.iter_mut() {
            body.integrate();
        }
    }
}

/// Per-body position history, one entry per tick.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    pub positions: Vec<Vec<Vec2>>,
}

impl Trajectory {
    fn new(bodies: &[Body]) -> Self {
        Self {
            positions: vec![Vec::new(); bodies.len()],
        }
    }

    fn record(&mut self, bodies: &[Body]) {
        for (i, body) in bodies.iter().enumerate() {
            self.positions[i].push(body.position);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Starts `Uninitialized`; `initialize` moves it to `Running`, after which
/// every `tick` advances one step and renders one frame.
pub struct SimulationLoop {
    config: SimulationConfig,
    phase: LoopState,
    state: Option<SimulationState>,
    compositor: LayerCompositor,
    style: RenderStyle,
    rng: StdRng,
    frame: u64,
    monitor: Option<EnergyMonitor>,
    trajectory: Option<Trajectory>,
}

impl SimulationLoop {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let style = config.render_style()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let compositor = LayerCompositor::new(config.width, config.height, config.show_reference);
        Ok(Self {
            config,
            phase: LoopState::Uninitialized,
            state: None,
            compositor,
            style,
            rng,
            frame: 0,
            monitor: None,
            trajectory: None,
        })
    }

    /// Place `body_count` bodies on the reference circle and start running.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        let bodies = circular_ring(&self.config)?;
        self.initialize_with(bodies)?;
        log::info!(
            "initialized {} bodies on r={} with speed {:.4} (G={})",
            self.config.body_count,
            self.config.orbit_radius,
            circular_speed(self.config.g, self.config.mass, self.config.orbit_radius),
            self.config.g
        );
        Ok(())
    }

    /// Start running with an explicit body set instead of the circular
    /// arrangement.
    pub fn initialize_with(&mut self, bodies: Vec<Body>) -> Result<(), ConfigError> {
        let field = self.config.gravity_field()?;
        let state = SimulationState::new(bodies, field)?;

        // a re-initialized loop starts from empty layers
        self.compositor = LayerCompositor::new(
            self.config.width,
            self.config.height,
            self.compositor.reference_visible(),
        );
        self.compositor
            .generate_starfield(&self.config.starfield, &mut self.rng);
        self.compositor
            .generate_reference(self.config.orbit_radius, self.config.ring_width);

        self.monitor = Some(EnergyMonitor::new(total_energy(state.bodies(), state.field())));
        self.trajectory = self
            .config
            .record_history
            .then(|| Trajectory::new(state.bodies()));
        self.state = Some(state);
        self.frame = 0;
        self.phase = LoopState::Running;
        Ok(())
    }

    /// Advance one frame: physics, then drawing, then compositing.
    pub fn tick(&mut self) {
        let Some(state) = self.state.as_mut() else {
            log::warn!("tick() called before initialize(); ignoring");
            return;
        };

        state.step();

        self.compositor.begin_frame();
        let (bodies_layer, traces_layer) = self.compositor.body_targets();
        for body in state.bodies.iter_mut() {
            body.render(bodies_layer, traces_layer, &self.style, &mut self.rng);
        }
        self.compositor.composite_frame();

        self.frame += 1;
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.record(self.frame, total_energy(&state.bodies, &state.field));
        }
        if let Some(trajectory) = self.trajectory.as_mut() {
            trajectory.record(&state.bodies);
        }
        log::trace!("tick {}", self.frame);
    }

    pub fn phase(&self) -> LoopState {
        self.phase
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn bodies(&self) -> &[Body] {
        match &self.state {
            Some(state) => state.bodies(),
            None => &[],
        }
    }

    /// Owned copy of the bodies, for handing a frame to another thread.
    pub fn snapshot(&self) -> Vec<Body> {
        self.bodies().to_vec()
    }

    /// Ticks run since initialization.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut LayerCompositor {
        &mut self.compositor
    }

    pub fn screen(&self) -> &Surface {
        self.compositor.screen()
    }

    pub fn monitor(&self) -> Option<&EnergyMonitor> {
        self.monitor.as_ref()
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }
}

use crate::body::Body;
use crate::gravity::GravityField;
use crate::vector::Vec2;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Relative energy drifts reported by [`EnergyMonitor`].
pub const ENERGY_THRESHOLDS: [f64; 6] = [0.01, 0.05, 0.1, 0.2, 0.5, 1.0];

pub fn kinetic_energy(bodies: &[Body], field: &GravityField) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * field.inertia(b) * b.velocity.norm_squared())
        .sum()
}

pub fn potential_energy(bodies: &[Body], field: &GravityField) -> f64 {
    bodies
        .iter()
        .tuple_combinations()
        .map(|(a, b)| field.pair_potential(a, b))
        .sum()
}

pub fn total_energy(bodies: &[Body], field: &GravityField) -> f64 {
    kinetic_energy(bodies, field) + potential_energy(bodies, field)
}

pub fn momentum(bodies: &[Body], field: &GravityField) -> Vec2 {
    bodies
        .iter()
        .fold(Vec2::zeros(), |acc, b| acc + field.inertia(b) * b.velocity)
}

/// z-component of the total angular momentum about `origin`.
pub fn angular_momentum(bodies: &[Body], field: &GravityField, origin: Vec2) -> f64 {
    bodies
        .iter()
        .map(|b| field.inertia(b) * (b.position - origin).perp(&b.velocity))
        .sum()
}

/// Tracks total energy over a run and remembers the first tick at which
/// each relative-drift threshold was exceeded. Only running aggregates are
/// kept, so an open-ended run uses constant memory.
#[derive(Debug, Clone)]
pub struct EnergyMonitor {
    initial_energy: f64,
    samples: u64,
    mean: f64,
    m2: f64,
    latest: Option<f64>,
    pub energy_thresholds: Vec<f64>,
    pub idx_energy_exceeded: HashMap<OrderedFloat<f64>, Option<u64>>,
}

impl EnergyMonitor {
    pub fn new(initial_energy: f64) -> Self {
        let energy_thresholds = ENERGY_THRESHOLDS.to_vec();
        let idx_energy_exceeded = energy_thresholds
            .iter()
            .map(|&t| (OrderedFloat(t), None))
            .collect();
        Self {
            initial_energy,
            samples: 0,
            mean: 0.0,
            m2: 0.0,
            latest: None,
            energy_thresholds,
            idx_energy_exceeded,
        }
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    /// Number of energies recorded so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn latest(&self) -> Option<f64> {
        self.latest
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// `|E - E0| / |E0|`, or the absolute difference when `E0` is zero.
    pub fn relative_drift(&self, energy: f64) -> f64 {
        let diff = (energy - self.initial_energy).abs();
        if self.initial_energy == 0.0 {
            diff
        } else {
            diff / self.initial_energy.abs()
        }
    }

    pub fn latest_drift(&self) -> Option<f64> {
        self.latest.map(|e| self.relative_drift(e))
    }

    pub fn record(&mut self, tick: u64, energy: f64) {
        // Welford update
        self.samples += 1;
        let delta = energy - self.mean;
        self.mean += delta / self.samples as f64;
        self.m2 += delta * (energy - self.mean);
        self.latest = Some(energy);

        let drift = self.relative_drift(energy);
        for &t in &self.energy_thresholds {
            if let Some(val) = self.idx_energy_exceeded.get_mut(&OrderedFloat(t)) {
                if val.is_none() && drift > t {
                    *val = Some(tick);
                    log::warn!("energy drift {:.4} exceeded {} at tick {}", drift, t, tick);
                }
            }
        }
    }

    pub fn first_exceeded(&self, threshold: f64) -> Option<u64> {
        self.idx_energy_exceeded
            .get(&OrderedFloat(threshold))
            .copied()
            .flatten()
    }

    /// Threshold crossings sorted by threshold.
    pub fn crossings(&self) -> Vec<(f64, Option<u64>)> {
        self.idx_energy_exceeded
            .iter()
            .map(|(k, v)| (k.into_inner(), *v))
            .sorted_by_key(|(k, _)| OrderedFloat(*k))
            .collect()
    }

    /// Population standard deviation of the recorded energies.
    pub fn std_dev(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        (self.m2 / self.samples as f64).sqrt()
    }
}

use crate::body::Body;
use crate::error::ConfigError;
use crate::vector::{magnitude, scale, subtract, Vec2};
use serde::{Deserialize, Serialize};

/// How a pair's coupling `G·...` turns into the acceleration of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceLaw {
    /// `a_i += d · G·m_i·m_j / r³`. The pair force is applied directly as
    /// acceleration, so every body has unit inertia.
    #[default]
    Product,
    /// `a_i += d · G·m_j / r³`. Inertia of a body is its mass.
    Newtonian,
}

/// Minimum separation used by the force law.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionFloor {
    /// `r >= r_i + r_j`
    #[default]
    SumOfRadii,
    /// `r >= k · (r_i + r_j)`
    Scaled(f64),
}

impl CollisionFloor {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            CollisionFloor::SumOfRadii => Ok(()),
            CollisionFloor::Scaled(k) if k.is_finite() && k > 0.0 => Ok(()),
            CollisionFloor::Scaled(k) => Err(ConfigError::InvalidCollisionScale(k)),
        }
    }

    #[inline(always)]
    pub fn distance(&self, a: &Body, b: &Body) -> f64 {
        let contact = a.radius + b.radius;
        match *self {
            CollisionFloor::SumOfRadii => contact,
            CollisionFloor::Scaled(k) => k * contact,
        }
    }
}

/// Pairwise gravity over the whole body set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    g: f64,
    law: ForceLaw,
    floor: CollisionFloor,
}

impl GravityField {
    pub fn new(g: f64, law: ForceLaw, floor: CollisionFloor) -> Result<Self, ConfigError> {
        if !g.is_finite() || g < 0.0 {
            return Err(ConfigError::InvalidGravitationalConstant(g));
        }
        floor.validate()?;
        Ok(Self { g, law, floor })
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn law(&self) -> ForceLaw {
        self.law
    }

    pub fn floor(&self) -> CollisionFloor {
        self.floor
    }

    /// Inertia the force law implies for `body`; the weight used when
    /// summing momentum and kinetic energy.
    pub fn inertia(&self, body: &Body) -> f64 {
        match self.law {
            ForceLaw::Product => 1.0,
            ForceLaw::Newtonian => body.mass,
        }
    }

    #[inline(always)]
    fn coupling(&self, target: &Body, source: &Body) -> f64 {
        match self.law {
            ForceLaw::Product => self.g * target.mass * source.mass,
            ForceLaw::Newtonian => self.g * source.mass,
        }
    }

    /// Acceleration of `bodies[obj_idx]` due to every other body, summed in
    /// slice order.
    pub fn acceleration_on(&self, obj_idx: usize, bodies: &[Body]) -> Vec2 {
        let target = &bodies[obj_idx];

        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != obj_idx)
            .map(|(_, other)| {
                let displacement = subtract(other.position, target.position);
                let r = magnitude(displacement).max(self.floor.distance(target, other));
                scale(displacement, self.coupling(target, other) / (r * r * r))
            })
            .fold(Vec2::zeros(), |acc, a| acc + a)
    }

    /// Overwrite every body's acceleration from the current positions.
    pub fn compute_accelerations(&self, bodies: &mut [Body]) {
        for i in 0..bodies.len() {
            let acc = self.acceleration_on(i, bodies);
            bodies[i].acceleration = acc;
        }
    }

    /// Potential energy of one pair. Inside the collision floor the force
    /// grows linearly with distance, so the potential there is the matching
    /// parabola, continuous with `-k/r` at the floor.
    pub fn pair_potential(&self, a: &Body, b: &Body) -> f64 {
        let k = self.g * a.mass * b.mass;
        let r = magnitude(subtract(b.position, a.position));
        let floor = self.floor.distance(a, b);
        if r >= floor {
            -k / r
        } else {
            k * (r * r - floor * floor) / (2.0 * floor.powi(3)) - k / floor
        }
    }
}

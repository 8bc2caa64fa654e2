use cgmath::prelude::*;
use rand::Rng;

use crate::particle::{Group, Particle};

/// Squared distance at or beyond which particles no longer interact.
pub const CUTOFF: f32 = 500.0;
/// Squared distance below which a pair is treated as coincident and skipped.
pub const MIN_DISTANCE: f32 = 1.0;

/// Coefficient table indexed by `[source][target]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceMatrix {
    coefficients: [[f32; Group::COUNT]; Group::COUNT],
}

impl ForceMatrix {
    pub fn new(coefficients: [[f32; Group::COUNT]; Group::COUNT]) -> Self {
        Self { coefficients }
    }

    /// Independent uniform draws in [-1, 1] for every ordered pair.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut coefficients = [[0.0; Group::COUNT]; Group::COUNT];
        for row in coefficients.iter_mut() {
            for coefficient in row.iter_mut() {
                *coefficient = rng.gen_range(-1.0..=1.0);
            }
        }
        Self { coefficients }
    }

    pub fn get(&self, source: Group, target: Group) -> f32 {
        self.coefficients[source.index()][target.index()]
    }

    pub fn rows(&self) -> &[[f32; Group::COUNT]; Group::COUNT] {
        &self.coefficients
    }
}

/// Force exerted on a particle at `from` by one at `to`, or `None` outside the interaction band.
pub fn pair_force(
    coefficient: f32,
    from: cgmath::Vector2<f32>,
    to: cgmath::Vector2<f32>,
) -> Option<cgmath::Vector2<f32>> {
    let delta = to - from;
    let sqr_distance = delta.magnitude2();

    if sqr_distance < MIN_DISTANCE || sqr_distance >= CUTOFF {
        return None;
    }

    let f = coefficient / sqr_distance;
    Some(delta * f)
}

/// Sums `pair_force` over `others` in slice order.
pub fn net_force(
    coefficient: f32,
    position: cgmath::Vector2<f32>,
    others: &[Particle],
) -> cgmath::Vector2<f32> {
    let mut total_force = cgmath::Vector2::zero();
    for other in others {
        if let Some(force) = pair_force(coefficient, position, other.position) {
            total_force += force;
        }
    }
    total_force
}

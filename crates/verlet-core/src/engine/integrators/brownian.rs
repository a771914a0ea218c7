use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use super::Integrator;
use crate::core::potential::Potential;
use crate::engine::state::ParticleState;

/// Overdamped Langevin (Brownian) dynamics.
///
/// Follows the stochastic scheme from the LAMMPS-derived reference:
///
/// ```text
/// p ← p − 0.5·dt·(−F(r) + σ·p/m) + sqrt(dt·kT·σ/m)·h
/// r ← r + dt·p/m
/// p ← p − 0.5·dt·(−F(r)/m + σ·p/m) + sqrt(dt·kT·σ/m)·h
/// ```
///
/// with a single `h ~ N(0,1)` drawn per step and used in both half-kicks.
/// Note the second half-kick divides the freshly evaluated force by the mass
/// while the first does not; the asymmetry is present in the reference scheme
/// and is reproduced here unchanged to keep trajectories compatible.
pub struct Brownian;

impl Integrator for Brownian {
    fn step(&self, state: &mut ParticleState, potential: &Potential, rng: &mut StdRng) {
        let dt = state.timestep;
        let kt = state.kt;
        let sigma = state.friction;
        let m = state.mass;

        let h: f64 = StandardNormal.sample(rng);
        let noise = (dt * kt * sigma / m).sqrt() * h;

        let force = potential.force(&state.position);
        let drift = &state.momentum * (sigma / m) - &force;
        state.momentum -= drift * (0.5 * dt);
        state.momentum.add_scalar_mut(noise);

        let displacement = &state.momentum * (dt / m);
        state.position += displacement;

        let force = potential.force(&state.position);
        let drift = &state.momentum * (sigma / m) - force / m;
        state.momentum -= drift * (0.5 * dt);
        state.momentum.add_scalar_mut(noise);
    }
}

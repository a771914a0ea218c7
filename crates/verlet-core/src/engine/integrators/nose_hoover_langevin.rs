use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use super::Integrator;
use crate::core::potential::Potential;
use crate::engine::state::ParticleState;

/// Nose-Hoover-Langevin dynamics: the full splitting scheme with a
/// stochastically refreshed thermostat coordinate.
///
/// ```text
/// z ← exp(−0.5·γ·dt)·z + sqrt(kT/(m·(1−exp(−γ·dt))))·h₁
/// p ← p + 0.5·dt·F(r);  r ← r + 0.5·dt·p/m
/// repeat twice: { p ← p·exp(−0.25·z·dt); z ← z + 0.5·dt·(2K(p) − N·kT)/m; p ← p·exp(−0.25·z·dt) }
/// r ← r + 0.5·dt·p/m;  p ← p + 0.5·dt·F(r)
/// z ← exp(−0.5·γ·dt)·z + sqrt(kT/(m·(1−exp(−γ·dt))))·h₂
/// ```
///
/// `K(p) = p·p/(2m)` is the total kinetic energy, `N` the spatial dimension,
/// and `h₁`, `h₂` are independent `N(0,1)` draws (one bath refresh at entry,
/// one at exit). The bath refresh divides by `1 − exp(−γ·dt)`, so `γ = 0` is
/// rejected at configuration time.
pub struct NoseHooverLangevin;

impl Integrator for NoseHooverLangevin {
    fn step(&self, state: &mut ParticleState, potential: &Potential, rng: &mut StdRng) {
        let dt = state.timestep;
        let kt = state.kt;
        let gamma = state.friction;
        let m = state.mass;
        let n_kt = state.dim() as f64 * kt;

        let decay = (-0.5 * gamma * dt).exp();
        let bath = (kt / (m * (1.0 - (-gamma * dt).exp()))).sqrt();

        let h1: f64 = StandardNormal.sample(rng);
        let h2: f64 = StandardNormal.sample(rng);

        state.thermostat = (&state.thermostat * decay).add_scalar(bath * h1);

        let kick = potential.force(&state.position) * (0.5 * dt);
        state.momentum += kick;
        let drift = &state.momentum * (0.5 * dt / m);
        state.position += drift;

        for _ in 0..2 {
            let scale = state.thermostat.map(|z| (-0.25 * dt * z).exp());
            state.momentum.component_mul_assign(&scale);
            let twice_kinetic = state.momentum.dot(&state.momentum) / m;
            state
                .thermostat
                .add_scalar_mut(0.5 * dt * (twice_kinetic - n_kt) / m);
            let scale = state.thermostat.map(|z| (-0.25 * dt * z).exp());
            state.momentum.component_mul_assign(&scale);
        }

        let drift = &state.momentum * (0.5 * dt / m);
        state.position += drift;
        let kick = potential.force(&state.position) * (0.5 * dt);
        state.momentum += kick;

        state.thermostat = (&state.thermostat * decay).add_scalar(bath * h2);
    }
}

use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use super::Integrator;
use crate::core::potential::Potential;
use crate::engine::state::ParticleState;

/// Thermostat mass parameter, fixed by the reference scheme.
const MU: f64 = 0.5;

/// Nose-Hoover extended-system dynamics with an auxiliary noise term on the
/// thermostat coordinate.
///
/// ```text
/// p ← p + 0.5·dt·F(r);  r ← r + 0.5·dt·p
/// p ← p · exp(−0.5·dt·z)
/// z ← [(1 − dt·σ²/(4μ))·z + (dt/μ)·(p²/m − N·kT) + σ·sqrt(dt)·h] / (1 + dt·σ²/(4μ))
/// p ← p · exp(−0.5·dt·z)
/// r ← r + 0.5·dt·p;  p ← p + 0.5·dt·F(r)
/// ```
///
/// `N` is the spatial dimension and one scalar `h ~ N(0,1)` is drawn per step.
/// The thermostat update is element-wise per axis (`p²` is the component-wise
/// square), and the position half-drifts carry no mass division, both exactly
/// as in the reference scheme.
pub struct NoseHoover;

impl Integrator for NoseHoover {
    fn step(&self, state: &mut ParticleState, potential: &Potential, rng: &mut StdRng) {
        let dt = state.timestep;
        let kt = state.kt;
        let sigma = state.friction;
        let m = state.mass;
        let n_kt = state.dim() as f64 * kt;

        let h: f64 = StandardNormal.sample(rng);

        let kick = potential.force(&state.position) * (0.5 * dt);
        state.momentum += kick;
        let drift = &state.momentum * (0.5 * dt);
        state.position += drift;

        let scale = state.thermostat.map(|z| (-0.5 * dt * z).exp());
        state.momentum.component_mul_assign(&scale);

        let coupling = dt * sigma * sigma / (4.0 * MU);
        let kinetic = state.momentum.map(|p| p * p / m);
        state.thermostat = (&state.thermostat * (1.0 - coupling)
            + kinetic.add_scalar(-n_kt) * (dt / MU))
            .add_scalar(sigma * dt.sqrt() * h)
            / (1.0 + coupling);

        let scale = state.thermostat.map(|z| (-0.5 * dt * z).exp());
        state.momentum.component_mul_assign(&scale);

        let drift = &state.momentum * (0.5 * dt);
        state.position += drift;
        let kick = potential.force(&state.position) * (0.5 * dt);
        state.momentum += kick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::engine::config::SimulationConfigBuilder;

    const TOLERANCE: f64 = 1e-12;

    fn state(friction: f64) -> ParticleState {
        let config = SimulationConfigBuilder::new()
            .position(vec![1.0])
            .momentum(vec![0.0])
            .integrator("nosehoover")
            .friction(friction)
            .build()
            .unwrap();
        ParticleState::new(&config).unwrap()
    }

    #[test]
    fn zero_coupling_step_matches_hand_computed_scheme() {
        // sigma = 0 removes the noise and coupling terms, leaving the scheme
        // deterministic and checkable step by step.
        let mut state = state(0.0);
        let potential = Potential::from_expression("x**2", 1).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let dt = state.timestep;
        let kt = state.kt;
        let m = state.mass;
        let force = |x: f64| -2.0 * x;

        let mut p = 0.0 + 0.5 * dt * force(1.0);
        let mut r = 1.0 + 0.5 * dt * p;
        // z starts at zero, so the first scaling is the identity.
        let z = (dt / MU) * (p * p / m - kt);
        p *= (-0.5 * dt * z).exp();
        r += 0.5 * dt * p;
        p += 0.5 * dt * force(r);

        NoseHoover.step(&mut state, &potential, &mut rng);
        assert!((state.position[0] - r).abs() < TOLERANCE);
        assert!((state.momentum[0] - p).abs() < TOLERANCE);
        assert!((state.thermostat[0] - z).abs() < TOLERANCE);
    }

    #[test]
    fn thermostat_components_evolve_per_axis() {
        // Unequal momenta along the two axes must drive the thermostat
        // components apart, matching the element-wise reference update.
        let config = SimulationConfigBuilder::new()
            .position(vec![0.0, 0.0])
            .momentum(vec![2.0, 0.0])
            .integrator("nosehoover")
            .build()
            .unwrap();
        let mut state = ParticleState::new(&config).unwrap();
        let potential = Potential::zero(2).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        NoseHoover.step(&mut state, &potential, &mut rng);
        assert!(
            (state.thermostat[0] - state.thermostat[1]).abs() > 1e-6,
            "expected per-axis thermostat components to differ"
        );
    }

    #[test]
    fn many_steps_in_a_well_remain_finite() {
        let mut state = state(5.0);
        let potential = Potential::from_expression("x**2", 1).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..500 {
            NoseHoover.step(&mut state, &potential, &mut rng);
        }
        assert!(state.is_finite());
    }
}

//! Per-step integration schemes for constant-temperature dynamics.
//!
//! Each strategy advances the whole [`ParticleState`] by exactly one timestep;
//! the sub-updates within a step are never observable from outside. Forces are
//! re-evaluated at every point the scheme calls for them, because the position
//! changes mid-step in every scheme. Gaussian noise comes from the caller's
//! generator so that each simulation instance owns an independent stream.

mod brownian;
mod nose_hoover;
mod nose_hoover_langevin;

pub use brownian::Brownian;
pub use nose_hoover::NoseHoover;
pub use nose_hoover_langevin::NoseHooverLangevin;

use rand::rngs::StdRng;

use super::config::IntegratorKind;
use super::state::ParticleState;
use crate::core::potential::Potential;

/// A per-step state-transition rule.
///
/// Implementations never fail: degenerate parameter combinations are rejected
/// at configuration time, and non-finite results are detected by the driver
/// after each step.
pub trait Integrator {
    /// Advance `state` by one timestep under `potential`.
    fn step(&self, state: &mut ParticleState, potential: &Potential, rng: &mut StdRng);
}

impl IntegratorKind {
    /// Resolves the kind to its strategy, once per run.
    pub(crate) fn strategy(self) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::Brownian => Box::new(Brownian),
            IntegratorKind::NoseHoover => Box::new(NoseHoover),
            IntegratorKind::NoseHooverLangevin => Box::new(NoseHooverLangevin),
        }
    }
}

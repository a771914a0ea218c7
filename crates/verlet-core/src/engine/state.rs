use nalgebra::DVector;

use super::config::{IntegratorKind, SimulationConfig};
use super::error::SimulationError;
use crate::core::units;

/// A coordinate axis of the simulated particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// The mutable physical state of the particle, advanced in place once per
/// step by exactly one integrator strategy.
///
/// The thermostat coordinate starts as the zero vector of the particle's
/// dimension; the Nose-Hoover scheme evolves it per axis while the
/// Nose-Hoover-Langevin scheme keeps all components equal, and Brownian
/// dynamics leaves it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    /// Position in nm.
    pub position: DVector<f64>,
    /// Momentum in amu·nm/ps.
    pub momentum: DVector<f64>,
    /// Extended-system thermostat coordinate in (kcal/amu)^(1/2).
    pub thermostat: DVector<f64>,
    /// Mass in amu, constant for the run.
    pub mass: f64,
    /// Thermal energy `kB·T` in kcal/mol.
    pub kt: f64,
    /// Timestep in ps, constant for the run.
    pub timestep: f64,
    /// Friction/coupling coefficient in 1/ps; damping rate for Brownian
    /// dynamics, thermostat coupling rate for the Nose-Hoover variants.
    pub friction: f64,
}

impl ParticleState {
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let dim = config.position.len();
        if config.momentum.len() != dim {
            return Err(SimulationError::InvalidDimension(format!(
                "position has {dim} components but momentum has {}",
                config.momentum.len()
            )));
        }
        if !(1..=2).contains(&dim) {
            return Err(SimulationError::InvalidDimension(format!(
                "{dim} components given; only 1- and 2-dimensional particles are supported"
            )));
        }
        if !(config.mass > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "mass must be positive, got {}",
                config.mass
            )));
        }
        if !(config.temperature > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "temperature must be positive, got {}",
                config.temperature
            )));
        }
        if !(config.timestep > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "timestep must be positive, got {}",
                config.timestep
            )));
        }
        if !config.friction.is_finite() || config.friction < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "friction must be finite and non-negative, got {}",
                config.friction
            )));
        }
        if IntegratorKind::parse(&config.integrator) == Some(IntegratorKind::NoseHooverLangevin)
            && config.friction == 0.0
        {
            return Err(SimulationError::InvalidParameter(
                "friction must be positive for the Nose-Hoover-Langevin integrator \
                 (the bath refresh divides by 1 - exp(-friction*dt))"
                    .into(),
            ));
        }

        Ok(Self {
            position: DVector::from_vec(config.position.clone()),
            momentum: DVector::from_vec(config.momentum.clone()),
            thermostat: DVector::zeros(dim),
            mass: config.mass,
            kt: units::thermal_energy(config.temperature),
            timestep: config.timestep,
            friction: config.friction,
        })
    }

    /// Spatial dimension (1 or 2).
    #[inline]
    pub fn dim(&self) -> usize {
        self.position.len()
    }

    /// Instantaneous kinetic energy `p·p / (2m)` in kcal/mol.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        self.momentum.dot(&self.momentum) / (2.0 * self.mass)
    }

    /// Whether every dynamical component is still a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.momentum.iter().all(|v| v.is_finite())
            && self.thermostat.iter().all(|v| v.is_finite())
    }
}

/// Append-only record of pre-step state snapshots, one per completed step.
///
/// Snapshots are independent copies; mutating the live state never rewrites
/// history. Per-axis views borrow the history and project lazily.
#[derive(Debug, Clone)]
pub struct TrajectoryHistory {
    dim: usize,
    positions: Vec<DVector<f64>>,
    momenta: Vec<DVector<f64>>,
    thermostats: Vec<DVector<f64>>,
}

impl TrajectoryHistory {
    pub(crate) fn new(dim: usize) -> Self {
        Self {
            dim,
            positions: Vec::new(),
            momenta: Vec::new(),
            thermostats: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, state: &ParticleState) {
        self.positions.push(state.position.clone());
        self.momenta.push(state.momentum.clone());
        self.thermostats.push(state.thermostat.clone());
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn component(&self, axis: Axis) -> Result<usize, SimulationError> {
        let index = axis.index();
        if index >= self.dim {
            return Err(SimulationError::InvalidDimension(format!(
                "axis {axis:?} does not exist for a {}-dimensional particle",
                self.dim
            )));
        }
        Ok(index)
    }

    /// Position component time series along `axis`, in step order.
    pub fn positions(
        &self,
        axis: Axis,
    ) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        let index = self.component(axis)?;
        Ok(self.positions.iter().map(move |r| r[index]))
    }

    /// Momentum component time series along `axis`, in step order.
    pub fn momenta(&self, axis: Axis) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        let index = self.component(axis)?;
        Ok(self.momenta.iter().map(move |p| p[index]))
    }

    /// Thermostat-coordinate time series along `axis`, in step order.
    pub fn thermostats(
        &self,
        axis: Axis,
    ) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        let index = self.component(axis)?;
        Ok(self.thermostats.iter().map(move |z| z[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SimulationConfigBuilder;

    fn state_2d() -> ParticleState {
        let config = SimulationConfigBuilder::new()
            .position(vec![1.0, -1.0])
            .momentum(vec![0.5, 0.25])
            .build()
            .unwrap();
        ParticleState::new(&config).unwrap()
    }

    #[test]
    fn thermostat_starts_at_zero_with_matching_dimension() {
        let state = state_2d();
        assert_eq!(state.thermostat, DVector::from_vec(vec![0.0, 0.0]));
        assert_eq!(state.dim(), 2);
    }

    #[test]
    fn thermal_energy_is_derived_from_temperature() {
        let state = state_2d();
        assert!((state.kt - units::thermal_energy(298.15)).abs() < 1e-15);
    }

    #[test]
    fn kinetic_energy_follows_equipartition_form() {
        let state = state_2d();
        let expected = (0.5 * 0.5 + 0.25 * 0.25) / 2.0;
        assert!((state.kinetic_energy() - expected).abs() < 1e-15);
    }

    #[test]
    fn non_finite_momentum_is_detected() {
        let mut state = state_2d();
        assert!(state.is_finite());
        state.momentum[1] = f64::INFINITY;
        assert!(!state.is_finite());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let config = SimulationConfig {
            position: vec![1.0, -1.0],
            momentum: vec![0.0],
            mass: 1.0,
            temperature: 298.15,
            timestep: 0.1,
            friction: 5.0,
            num_steps: 10,
            integrator: "brownian".to_string(),
            seed: None,
        };
        assert!(matches!(
            ParticleState::new(&config),
            Err(SimulationError::InvalidDimension(_))
        ));
    }

    #[test]
    fn zero_friction_is_rejected_for_nose_hoover_langevin() {
        // A hand-built config skips the builder, so the degenerate bath
        // amplitude has to be caught here as well.
        let config = SimulationConfig {
            position: vec![0.0],
            momentum: vec![0.0],
            mass: 1.0,
            temperature: 298.15,
            timestep: 0.1,
            friction: 0.0,
            num_steps: 10,
            integrator: "nosehooverlangevin".to_string(),
            seed: Some(1),
        };
        assert!(matches!(
            ParticleState::new(&config),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn history_snapshots_are_independent_of_live_state() {
        let mut state = state_2d();
        let mut history = TrajectoryHistory::new(state.dim());
        history.record(&state);
        state.position[0] = 99.0;
        let xs: Vec<f64> = history.positions(Axis::X).unwrap().collect();
        assert_eq!(xs, vec![1.0]);
    }

    #[test]
    fn axis_views_project_components_in_step_order() {
        let mut state = state_2d();
        let mut history = TrajectoryHistory::new(state.dim());
        history.record(&state);
        state.position[1] = 3.0;
        history.record(&state);

        let ys: Vec<f64> = history.positions(Axis::Y).unwrap().collect();
        assert_eq!(ys, vec![-1.0, 3.0]);
        let pxs: Vec<f64> = history.momenta(Axis::X).unwrap().collect();
        assert_eq!(pxs, vec![0.5, 0.5]);
    }

    #[test]
    fn y_axis_view_is_rejected_for_one_dimensional_history() {
        let history = TrajectoryHistory::new(1);
        assert!(matches!(
            history.positions(Axis::Y),
            Err(SimulationError::InvalidDimension(_))
        ));
        assert!(matches!(
            history.thermostats(Axis::Y),
            Err(SimulationError::InvalidDimension(_))
        ));
    }
}

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use crate::core::potential::Potential;
use crate::engine::config::{IntegratorKind, SimulationConfig};
use crate::engine::error::SimulationError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{Axis, ParticleState, TrajectoryHistory};

/// Lifecycle of a simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Configured,
    Running,
    Completed,
}

/// The simulation driver: owns the particle state, the configured potential,
/// the trajectory history, and an independently seeded random source.
///
/// A fresh driver starts with the zero potential. Each call to [`run`]
/// advances the particle by the configured number of steps, appending the
/// *pre-step* state to history before every tick, so after a completed run
/// the history holds exactly `num_steps` additional entries. `run` takes
/// `&mut self` and is therefore not re-entrant.
///
/// [`run`]: Simulation::run
pub struct Simulation {
    config: SimulationConfig,
    state: ParticleState,
    potential: Potential,
    history: TrajectoryHistory,
    rng: StdRng,
    status: RunStatus,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let state = ParticleState::new(&config)?;
        let potential = Potential::zero(state.dim())?;
        let history = TrajectoryHistory::new(state.dim());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            state,
            potential,
            history,
            rng,
            status: RunStatus::Configured,
        })
    }

    /// Replaces the potential with one parsed from a single expression over
    /// the particle's coordinates, e.g. `x**2 + y**2` in 2D.
    ///
    /// The replacement is atomic: on a parse failure the previously
    /// configured potential stays in effect.
    pub fn update_potential(&mut self, expression: &str) -> Result<(), SimulationError> {
        let next = Potential::from_expression(expression, self.state.dim())?;
        debug!(expression, "potential replaced");
        self.potential = next;
        Ok(())
    }

    /// Replaces the potential with independent per-axis expressions; axes
    /// beyond the supplied list default to the zero potential. Atomic in the
    /// same sense as [`Simulation::update_potential`].
    pub fn update_potential_per_axis(
        &mut self,
        expressions: &[&str],
    ) -> Result<(), SimulationError> {
        let next = Potential::from_axis_expressions(expressions, self.state.dim())?;
        debug!(?expressions, "potential replaced per axis");
        self.potential = next;
        Ok(())
    }

    /// Executes the configured number of steps under the configured
    /// integrator, reporting per-step progress through `reporter`.
    ///
    /// The integrator kind is resolved here, once per run, so an unrecognized
    /// name fails at run time with [`SimulationError::UnknownIntegrator`]. A
    /// step that produces a non-finite state aborts the run with
    /// [`SimulationError::NumericalDivergence`] carrying the step index and
    /// the offending state.
    #[instrument(skip_all, name = "simulation_run")]
    pub fn run(&mut self, reporter: &ProgressReporter) -> Result<(), SimulationError> {
        let kind = IntegratorKind::parse(&self.config.integrator).ok_or_else(|| {
            SimulationError::UnknownIntegrator {
                name: self.config.integrator.clone(),
            }
        })?;
        let integrator = kind.strategy();
        let num_steps = self.config.num_steps;

        self.status = RunStatus::Running;
        reporter.report(Progress::RunStart {
            total_steps: num_steps as u64,
        });
        info!(?kind, num_steps, dim = self.state.dim(), "starting dynamics");

        for step in 0..num_steps {
            self.history.record(&self.state);
            integrator.step(&mut self.state, &self.potential, &mut self.rng);
            if !self.state.is_finite() {
                return Err(SimulationError::NumericalDivergence {
                    step,
                    position: self.state.position.iter().copied().collect(),
                    momentum: self.state.momentum.iter().copied().collect(),
                    thermostat: self.state.thermostat.iter().copied().collect(),
                });
            }
            reporter.report(Progress::StepCompleted);
        }

        reporter.report(Progress::RunFinish);
        self.status = RunStatus::Completed;
        info!(steps_recorded = self.history.len(), "dynamics complete");
        Ok(())
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn potential(&self) -> &Potential {
        &self.potential
    }

    pub fn history(&self) -> &TrajectoryHistory {
        &self.history
    }

    /// Position component time series along `axis`, one value per step.
    pub fn positions(
        &self,
        axis: Axis,
    ) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        self.history.positions(axis)
    }

    /// Momentum component time series along `axis`, one value per step.
    pub fn momenta(&self, axis: Axis) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        self.history.momenta(axis)
    }

    /// Thermostat-coordinate time series along `axis`, one value per step.
    pub fn thermostats(
        &self,
        axis: Axis,
    ) -> Result<impl Iterator<Item = f64> + '_, SimulationError> {
        self.history.thermostats(axis)
    }
}

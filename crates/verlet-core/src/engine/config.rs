use super::error::SimulationError;

/// The integration scheme families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    /// Overdamped Langevin dynamics.
    Brownian,
    /// Deterministic extended-system thermostat with an auxiliary noise term.
    NoseHoover,
    /// Extended-system thermostat with a stochastically refreshed bath coordinate.
    NoseHooverLangevin,
}

impl IntegratorKind {
    /// Case-insensitive lookup of an integrator kind by its configured name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "brownian" => Some(Self::Brownian),
            "nosehoover" => Some(Self::NoseHoover),
            "nosehooverlangevin" => Some(Self::NoseHooverLangevin),
            _ => None,
        }
    }

    /// Default friction/coupling coefficient for this family, in 1/ps.
    pub fn default_friction(self) -> f64 {
        match self {
            Self::Brownian | Self::NoseHoover => 5.0,
            Self::NoseHooverLangevin => 10.0,
        }
    }
}

/// Validated parameters for one simulation instance.
///
/// Units follow [`crate::core::units`]: positions in nm, momenta in
/// amu·nm/ps, mass in amu, temperature in K, timestep in ps, friction in
/// 1/ps. The integrator kind is carried as the raw configured string and
/// resolved when the run starts, so an unrecognized name surfaces at run
/// time rather than at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub position: Vec<f64>,
    pub momentum: Vec<f64>,
    pub mass: f64,
    pub temperature: f64,
    pub timestep: f64,
    pub friction: f64,
    pub num_steps: usize,
    pub integrator: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    position: Option<Vec<f64>>,
    momentum: Option<Vec<f64>>,
    mass: Option<f64>,
    temperature: Option<f64>,
    timestep: Option<f64>,
    friction: Option<f64>,
    num_steps: Option<usize>,
    integrator: Option<String>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Vec<f64>) -> Self {
        self.position = Some(position);
        self
    }
    pub fn momentum(mut self, momentum: Vec<f64>) -> Self {
        self.momentum = Some(momentum);
        self
    }
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }
    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = Some(num_steps);
        self
    }
    pub fn integrator(mut self, integrator: impl Into<String>) -> Self {
        self.integrator = Some(integrator.into());
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        let position = self
            .position
            .ok_or_else(|| SimulationError::InvalidParameter("position is required".into()))?;
        let momentum = self
            .momentum
            .ok_or_else(|| SimulationError::InvalidParameter("momentum is required".into()))?;

        let dim = position.len();
        if momentum.len() != dim {
            return Err(SimulationError::InvalidDimension(format!(
                "position has {dim} components but momentum has {}",
                momentum.len()
            )));
        }
        if !(1..=2).contains(&dim) {
            return Err(SimulationError::InvalidDimension(format!(
                "{dim} components given; only 1- and 2-dimensional particles are supported"
            )));
        }

        let mass = self.mass.unwrap_or(1.0);
        let temperature = self.temperature.unwrap_or(298.15);
        let timestep = self.timestep.unwrap_or(0.1);
        let num_steps = self.num_steps.unwrap_or(1000);
        let integrator = self.integrator.unwrap_or_else(|| "brownian".to_string());

        if !(mass > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if !(temperature > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "temperature must be positive, got {temperature}"
            )));
        }
        if !(timestep > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "timestep must be positive, got {timestep}"
            )));
        }

        // Resolution may fail here for an unrecognized name; that case is
        // deliberately deferred to run time, and the Brownian default is used
        // for the friction fallback in the meantime.
        let kind = IntegratorKind::parse(&integrator);
        let friction = self
            .friction
            .unwrap_or_else(|| kind.map_or(5.0, IntegratorKind::default_friction));

        if !friction.is_finite() || friction < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "friction must be finite and non-negative, got {friction}"
            )));
        }
        if kind == Some(IntegratorKind::NoseHooverLangevin) && friction == 0.0 {
            return Err(SimulationError::InvalidParameter(
                "friction must be positive for the Nose-Hoover-Langevin integrator \
                 (the bath refresh divides by 1 - exp(-friction*dt))"
                    .into(),
            ));
        }

        Ok(SimulationConfig {
            position,
            momentum,
            mass,
            temperature,
            timestep,
            friction,
            num_steps,
            integrator,
            seed: self.seed,
        })
    }
}

use thiserror::Error;

use crate::core::potential::PotentialError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid potential expression: {source}")]
    InvalidExpression {
        #[from]
        source: PotentialError,
    },

    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown integrator kind '{name}'")]
    UnknownIntegrator { name: String },

    #[error(
        "non-finite state after step {step}: position {position:?}, momentum {momentum:?}, thermostat {thermostat:?}"
    )]
    NumericalDivergence {
        step: usize,
        position: Vec<f64>,
        momentum: Vec<f64>,
        thermostat: Vec<f64>,
    },
}

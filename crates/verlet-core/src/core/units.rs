//! Physical unit conventions shared by every component.
//!
//! - length: nm
//! - time: ps
//! - mass: amu (g/mol)
//! - momentum: amu·nm/ps
//! - temperature: K
//! - energy: kcal/mol
//! - thermostat coordinate: (kcal/amu)^(1/2)

/// Boltzmann constant in kcal/(mol·K).
pub const BOLTZMANN: f64 = 0.0019872041;

/// Thermal energy `kT` in kcal/mol for a temperature in Kelvin.
#[inline]
pub fn thermal_energy(temperature: f64) -> f64 {
    BOLTZMANN * temperature
}

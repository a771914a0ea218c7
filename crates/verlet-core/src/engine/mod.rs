//! # Engine Module
//!
//! This module implements the stateful machinery of a simulation run: the
//! mutable particle state and its recorded trajectory, the per-step
//! integration schemes, run configuration, progress reporting, and the error
//! taxonomy.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Configuration** ([`config`]) - Run parameters, defaults, and the
//!   validating builder
//! - **State Tracking** ([`state`]) - The particle's physical state and the
//!   append-only trajectory history with lazy per-axis views
//! - **Integrators** ([`integrators`]) - The Brownian, Nose-Hoover, and
//!   Nose-Hoover-Langevin update rules behind a single strategy trait
//! - **Progress Monitoring** ([`progress`]) - Best-effort progress reporting
//!   that can never affect simulation results
//! - **Error Handling** ([`error`]) - Engine-specific error types and
//!   propagation

pub mod config;
pub mod error;
pub mod integrators;
pub mod progress;
pub mod state;

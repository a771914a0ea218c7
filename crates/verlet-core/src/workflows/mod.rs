//! # Workflows Module
//!
//! This module provides the high-level entry point that ties the `core` and
//! `engine` layers together into a complete simulation run.
//!
//! ## Architecture
//!
//! - **Simulation Driver** ([`simulation`]) - Owns the particle state, the
//!   configured potential, the trajectory history, and the random source;
//!   executes the configured number of steps under the selected integrator
//!   and exposes the recorded time series.

pub mod simulation;

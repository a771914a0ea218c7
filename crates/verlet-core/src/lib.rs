//! # Verlet Core Library
//!
//! A library for simulating the constant-temperature dynamics of a single point
//! particle (1- or 2-dimensional) moving in a user-defined analytic potential.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless mathematical machinery: an
//!   algebraic expression engine with exact symbolic differentiation (`expr`), the
//!   potential/force model derived from it (`potential`), and the physical unit
//!   conventions (`units`).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer holds the mutable particle
//!   state and its recorded trajectory (`state`), the per-step integration schemes
//!   (`integrators`), run configuration (`config`), progress reporting (`progress`),
//!   and the error taxonomy (`error`).
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `engine` and `core` together into the [`workflows::simulation::Simulation`]
//!   driver, the entry point for end-users of the library.

pub mod core;
pub mod engine;
pub mod workflows;

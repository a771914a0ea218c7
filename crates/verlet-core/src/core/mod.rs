//! # Core Module
//!
//! This module provides the stateless mathematical building blocks for the
//! simulation: expression parsing and symbolic differentiation, the analytic
//! potential model, and the physical unit conventions.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Expression Engine** ([`expr`]) - An algebraic expression tree with a
//!   hand-rolled parser, exact symbolic differentiation, and numeric evaluation
//! - **Potential Model** ([`potential`]) - Force and potential-energy evaluators
//!   derived from user-supplied expressions
//! - **Units** ([`units`]) - The unit contract and physical constants shared by
//!   every component

pub mod expr;
pub mod potential;
pub mod units;

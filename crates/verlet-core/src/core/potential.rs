//! Analytic potential and force evaluators derived by symbolic differentiation.

use nalgebra::DVector;
use thiserror::Error;

use super::expr::{Expr, ExpressionError, parse};

/// Variable names for the supported dimensions, in axis order.
const AXIS_VARIABLES: [&str; 2] = ["x", "y"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PotentialError {
    #[error("invalid potential expression: {0}")]
    Expression(#[from] ExpressionError),
    #[error("unsupported dimension {dim}: only 1- and 2-dimensional potentials are supported")]
    UnsupportedDimension { dim: usize },
    #[error("{given} axis expressions supplied for a {dim}-dimensional potential")]
    TooManyAxisExpressions { given: usize, dim: usize },
}

/// An analytic potential over 1 or 2 named coordinates (`x`, or `x` and `y`).
///
/// The per-axis force expressions are the exact negated partial derivatives of
/// the potential, computed symbolically at construction time and simplified.
/// Construction is all-or-nothing, so swapping a `Potential` into a simulation
/// is atomic: a failed parse leaves the previously configured functions in
/// effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Potential {
    dim: usize,
    energies: Vec<Expr>,
    forces: Vec<Expr>,
}

impl Potential {
    fn variables(dim: usize) -> Result<&'static [&'static str], PotentialError> {
        match dim {
            1 | 2 => Ok(&AXIS_VARIABLES[..dim]),
            _ => Err(PotentialError::UnsupportedDimension { dim }),
        }
    }

    /// The zero potential: no force anywhere. This is what a freshly
    /// constructed simulation starts with.
    pub fn zero(dim: usize) -> Result<Self, PotentialError> {
        Self::variables(dim)?;
        Ok(Self {
            dim,
            energies: vec![Expr::Constant(0.0)],
            forces: vec![Expr::Constant(0.0); dim],
        })
    }

    /// Builds a potential from a single expression over the declared
    /// coordinates, e.g. `x**2 + y**2` in 2D.
    pub fn from_expression(source: &str, dim: usize) -> Result<Self, PotentialError> {
        let variables = Self::variables(dim)?;
        let energy = parse(source, variables)?;
        Self::from_parts(vec![energy], dim)
    }

    /// Builds a potential from independent per-axis expressions; axes beyond
    /// the supplied list default to the zero potential.
    pub fn from_axis_expressions(sources: &[&str], dim: usize) -> Result<Self, PotentialError> {
        let variables = Self::variables(dim)?;
        if sources.len() > dim {
            return Err(PotentialError::TooManyAxisExpressions {
                given: sources.len(),
                dim,
            });
        }
        let mut energies = Vec::with_capacity(sources.len());
        for source in sources {
            energies.push(parse(source, variables)?);
        }
        Self::from_parts(energies, dim)
    }

    fn from_parts(energies: Vec<Expr>, dim: usize) -> Result<Self, PotentialError> {
        let total = energies
            .iter()
            .cloned()
            .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
            .unwrap_or(Expr::Constant(0.0));
        let forces = (0..dim)
            .map(|axis| Expr::Neg(Box::new(total.diff(axis))).simplify())
            .collect();
        Ok(Self {
            dim,
            energies,
            forces,
        })
    }

    /// Spatial dimension of the potential (1 or 2).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Evaluates the force `-∂U/∂x_i` at `position`, one component per axis.
    pub fn force(&self, position: &DVector<f64>) -> DVector<f64> {
        debug_assert_eq!(position.len(), self.dim);
        let coords = position.as_slice();
        DVector::from_iterator(self.dim, self.forces.iter().map(|f| f.eval(coords)))
    }

    /// Evaluates the potential energy at `position`.
    pub fn energy(&self, position: &DVector<f64>) -> f64 {
        debug_assert_eq!(position.len(), self.dim);
        let coords = position.as_slice();
        self.energies.iter().map(|u| u.eval(coords)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn zero_potential_produces_no_force() {
        let potential = Potential::zero(2).unwrap();
        let force = potential.force(&DVector::from_vec(vec![3.0, -4.0]));
        assert_eq!(force, DVector::from_vec(vec![0.0, 0.0]));
        assert_eq!(potential.energy(&DVector::from_vec(vec![3.0, -4.0])), 0.0);
    }

    #[test]
    fn harmonic_force_is_negated_derivative() {
        let potential = Potential::from_expression("3*x**2", 1).unwrap();
        for x in [-2.0, -0.5, 0.0, 0.25, 1.0, 10.0] {
            let force = potential.force(&DVector::from_vec(vec![x]));
            assert!(f64_approx_equal(force[0], -6.0 * x), "x = {x}");
        }
    }

    #[test]
    fn two_dimensional_well_has_independent_axis_forces() {
        let potential = Potential::from_expression("x**2 + y**2", 2).unwrap();
        let force = potential.force(&DVector::from_vec(vec![1.0, -1.0]));
        assert!(f64_approx_equal(force[0], -2.0));
        assert!(f64_approx_equal(force[1], 2.0));
    }

    #[test]
    fn coupled_expression_yields_cross_terms() {
        let potential = Potential::from_expression("x*y", 2).unwrap();
        let force = potential.force(&DVector::from_vec(vec![2.0, 5.0]));
        assert!(f64_approx_equal(force[0], -5.0));
        assert!(f64_approx_equal(force[1], -2.0));
    }

    #[test]
    fn unspecified_axis_defaults_to_zero_potential() {
        let potential = Potential::from_axis_expressions(&["2*x**2"], 2).unwrap();
        let force = potential.force(&DVector::from_vec(vec![1.5, 9.0]));
        assert!(f64_approx_equal(force[0], -6.0));
        assert!(f64_approx_equal(force[1], 0.0));
    }

    #[test]
    fn per_axis_energies_sum() {
        let potential = Potential::from_axis_expressions(&["x**2", "2*y"], 2).unwrap();
        let energy = potential.energy(&DVector::from_vec(vec![3.0, 4.0]));
        assert!(f64_approx_equal(energy, 17.0));
    }

    #[test]
    fn surplus_axis_expressions_are_rejected() {
        let err = Potential::from_axis_expressions(&["x**2", "y**2"], 1).unwrap_err();
        assert_eq!(
            err,
            PotentialError::TooManyAxisExpressions { given: 2, dim: 1 }
        );
    }

    #[test]
    fn dimension_outside_supported_range_is_rejected() {
        assert!(matches!(
            Potential::from_expression("x**2", 3),
            Err(PotentialError::UnsupportedDimension { dim: 3 })
        ));
        assert!(matches!(
            Potential::zero(0),
            Err(PotentialError::UnsupportedDimension { dim: 0 })
        ));
    }

    #[test]
    fn one_dimensional_potential_rejects_second_variable() {
        let err = Potential::from_expression("x**2 + y**2", 1).unwrap_err();
        assert!(matches!(err, PotentialError::Expression(_)));
    }

    #[test]
    fn singular_expression_evaluates_to_non_finite_force() {
        let potential = Potential::from_expression("1/x", 1).unwrap();
        let force = potential.force(&DVector::from_vec(vec![0.0]));
        assert!(!force[0].is_finite());
    }
}

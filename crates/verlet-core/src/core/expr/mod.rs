//! Algebraic expression trees with exact symbolic differentiation.
//!
//! A potential expression such as `2*x**2 + 0.1*y**2` is parsed into an
//! [`Expr`] tree over declared variables, differentiated symbolically (never by
//! finite differences), simplified, and then evaluated numerically once per
//! force call. Variables are referenced by index into the declared name list so
//! that evaluation takes a plain coordinate slice.

mod parser;

pub use parser::parse;

use thiserror::Error;

/// Errors produced while parsing an expression string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("unexpected character '{found}' at byte {position}")]
    UnexpectedCharacter { found: char, position: usize },
    #[error("malformed number literal at byte {position}")]
    MalformedNumber { position: usize },
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },
    #[error("unexpected token at byte {position}")]
    UnexpectedToken { position: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("trailing input at byte {position}")]
    TrailingInput { position: usize },
}

/// A node in an algebraic expression tree.
///
/// Variables carry their index into the variable list declared at parse time,
/// which is also the index into the coordinate slice passed to [`Expr::eval`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Variable(usize),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Function, Box<Expr>),
}

/// Unary functions understood by the parser and the differentiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Sinh,
    Cosh,
    Tanh,
}

impl Function {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "sqrt" => Self::Sqrt,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            _ => return None,
        })
    }

    #[inline]
    pub(crate) fn eval(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
        }
    }

    /// The outer derivative d f(u)/du as an expression in `arg`.
    fn derivative(self, arg: Expr) -> Expr {
        match self {
            Self::Sin => func(Self::Cos, arg),
            Self::Cos => neg(func(Self::Sin, arg)),
            Self::Tan => div(
                Expr::Constant(1.0),
                pow(func(Self::Cos, arg), Expr::Constant(2.0)),
            ),
            Self::Exp => func(Self::Exp, arg),
            Self::Ln => div(Expr::Constant(1.0), arg),
            Self::Sqrt => div(
                Expr::Constant(1.0),
                mul(Expr::Constant(2.0), func(Self::Sqrt, arg)),
            ),
            Self::Sinh => func(Self::Cosh, arg),
            Self::Cosh => func(Self::Sinh, arg),
            Self::Tanh => sub(
                Expr::Constant(1.0),
                pow(func(Self::Tanh, arg), Expr::Constant(2.0)),
            ),
        }
    }
}

fn neg(a: Expr) -> Expr {
    Expr::Neg(Box::new(a))
}

fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(Box::new(a), Box::new(b))
}

fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(Box::new(a), Box::new(b))
}

fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(Box::new(a), Box::new(b))
}

fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(Box::new(a), Box::new(b))
}

fn pow(a: Expr, b: Expr) -> Expr {
    Expr::Pow(Box::new(a), Box::new(b))
}

fn func(f: Function, a: Expr) -> Expr {
    Expr::Func(f, Box::new(a))
}

impl Expr {
    /// Numerically evaluates the expression at the given coordinates.
    ///
    /// The slice must be at least as long as the variable list the expression
    /// was parsed against.
    pub fn eval(&self, vars: &[f64]) -> f64 {
        match self {
            Expr::Constant(c) => *c,
            Expr::Variable(i) => vars[*i],
            Expr::Neg(a) => -a.eval(vars),
            Expr::Add(a, b) => a.eval(vars) + b.eval(vars),
            Expr::Sub(a, b) => a.eval(vars) - b.eval(vars),
            Expr::Mul(a, b) => a.eval(vars) * b.eval(vars),
            Expr::Div(a, b) => a.eval(vars) / b.eval(vars),
            Expr::Pow(a, b) => a.eval(vars).powf(b.eval(vars)),
            Expr::Func(f, a) => f.eval(a.eval(vars)),
        }
    }

    /// Exact symbolic derivative with respect to the variable at `var`.
    pub fn diff(&self, var: usize) -> Expr {
        match self {
            Expr::Constant(_) => Expr::Constant(0.0),
            Expr::Variable(i) => Expr::Constant(if *i == var { 1.0 } else { 0.0 }),
            Expr::Neg(a) => neg(a.diff(var)),
            Expr::Add(a, b) => add(a.diff(var), b.diff(var)),
            Expr::Sub(a, b) => sub(a.diff(var), b.diff(var)),
            Expr::Mul(a, b) => add(
                mul(a.diff(var), (**b).clone()),
                mul((**a).clone(), b.diff(var)),
            ),
            Expr::Div(a, b) => div(
                sub(
                    mul(a.diff(var), (**b).clone()),
                    mul((**a).clone(), b.diff(var)),
                ),
                pow((**b).clone(), Expr::Constant(2.0)),
            ),
            Expr::Pow(a, b) => match **b {
                // d(u^n) = n * u^(n-1) * u'
                Expr::Constant(n) => mul(
                    mul(
                        Expr::Constant(n),
                        pow((**a).clone(), Expr::Constant(n - 1.0)),
                    ),
                    a.diff(var),
                ),
                // d(u^v) = u^v * (v' ln u + v u'/u)
                _ => mul(
                    self.clone(),
                    add(
                        mul(b.diff(var), func(Function::Ln, (**a).clone())),
                        div(mul((**b).clone(), a.diff(var)), (**a).clone()),
                    ),
                ),
            },
            Expr::Func(f, a) => mul(f.derivative((**a).clone()), a.diff(var)),
        }
    }

    /// Constant folding and algebraic identity cleanup.
    ///
    /// Keeps derivative trees small; the simplification is purely structural
    /// and never changes the value of the expression at finite inputs.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => self.clone(),
            Expr::Neg(a) => match a.simplify() {
                Expr::Constant(c) => Expr::Constant(-c),
                Expr::Neg(inner) => *inner,
                a => neg(a),
            },
            Expr::Add(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x + y),
                (Expr::Constant(c), e) | (e, Expr::Constant(c)) if c == 0.0 => e,
                (a, b) => add(a, b),
            },
            Expr::Sub(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x - y),
                (e, Expr::Constant(c)) if c == 0.0 => e,
                (Expr::Constant(c), e) if c == 0.0 => neg(e),
                (a, b) => sub(a, b),
            },
            Expr::Mul(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x * y),
                (Expr::Constant(c), _) | (_, Expr::Constant(c)) if c == 0.0 => {
                    Expr::Constant(0.0)
                }
                (Expr::Constant(c), e) | (e, Expr::Constant(c)) if c == 1.0 => e,
                (a, b) => mul(a, b),
            },
            Expr::Div(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Constant(x), Expr::Constant(y)) if y != 0.0 => Expr::Constant(x / y),
                (Expr::Constant(c), _) if c == 0.0 => Expr::Constant(0.0),
                (e, Expr::Constant(c)) if c == 1.0 => e,
                (a, b) => div(a, b),
            },
            Expr::Pow(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x.powf(y)),
                (e, Expr::Constant(c)) if c == 1.0 => e,
                (_, Expr::Constant(c)) if c == 0.0 => Expr::Constant(1.0),
                (a, b) => pow(a, b),
            },
            Expr::Func(f, a) => match a.simplify() {
                Expr::Constant(c) => Expr::Constant(f.eval(c)),
                a => func(*f, a),
            },
        }
    }
}

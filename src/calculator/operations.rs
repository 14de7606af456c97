//! Arithmetic behind binary operators and scientific functions.

use super::input::{BinaryOp, UnaryFn};
use serde::Deserialize;
use std::f64::consts;
use thiserror::Error;

/// Largest factorial input whose result is finite in an `f64`.
pub const MAX_FACTORIAL: u32 = 170;

/// Failures that put the calculator into its error mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Unit used to interpret trigonometric function input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    fn to_radians(self, x: f64) -> f64 {
        match self {
            Self::Radians => x,
            Self::Degrees => x.to_radians(),
        }
    }
}

/// Resolve a pending binary operation.
pub fn combine(a: f64, b: f64, op: BinaryOp) -> Result<f64, CalcError> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Subtract => Ok(a - b),
        BinaryOp::Multiply => Ok(a * b),
        BinaryOp::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
        BinaryOp::Divide => Ok(a / b),
        BinaryOp::Power => Ok(a.powf(b)),
    }
}

impl UnaryFn {
    /// Apply the function to `x`.
    ///
    /// `log` and `ln` of non-positive input yield NaN or -Infinity rather
    /// than an error.
    pub fn apply(self, x: f64, angle: AngleUnit, factorial_limit: u32) -> Result<f64, CalcError> {
        match self {
            Self::Sin => Ok(angle.to_radians(x).sin()),
            Self::Cos => Ok(angle.to_radians(x).cos()),
            Self::Tan => Ok(angle.to_radians(x).tan()),
            Self::Log => Ok(x.log10()),
            Self::Ln => Ok(x.ln()),
            Self::Sqrt if x < 0.0 => Err(CalcError::InvalidInput(
                "square root of a negative number".to_string(),
            )),
            Self::Sqrt => Ok(x.sqrt()),
            Self::Factorial => factorial(x, factorial_limit),
            Self::Reciprocal if x == 0.0 => Err(CalcError::DivisionByZero),
            Self::Reciprocal => Ok(1.0 / x),
            Self::Square => Ok(x * x),
            Self::Pi => Ok(consts::PI),
            Self::E => Ok(consts::E),
        }
    }
}

/// Iterative factorial for non-negative integers up to `limit`.
///
/// `limit` is capped at [`MAX_FACTORIAL`].
pub fn factorial(x: f64, limit: u32) -> Result<f64, CalcError> {
    if x.is_nan() || x < 0.0 {
        return Err(CalcError::InvalidInput(
            "factorial of a negative number".to_string(),
        ));
    }
    if x.fract() != 0.0 {
        return Err(CalcError::InvalidInput(
            "factorial of a non-integer".to_string(),
        ));
    }

    let limit = limit.min(MAX_FACTORIAL);
    if x > f64::from(limit) {
        return Err(CalcError::InvalidInput(format!(
            "factorial input above {limit}"
        )));
    }

    let n = x as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        assert_eq!(combine(3.0, 4.0, BinaryOp::Add), Ok(7.0));
        assert_eq!(combine(3.0, 4.0, BinaryOp::Subtract), Ok(-1.0));
        assert_eq!(combine(3.0, 4.0, BinaryOp::Multiply), Ok(12.0));
        assert_eq!(combine(3.0, 4.0, BinaryOp::Divide), Ok(0.75));
        assert_eq!(combine(2.0, 10.0, BinaryOp::Power), Ok(1024.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            combine(5.0, 0.0, BinaryOp::Divide),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            combine(5.0, -0.0, BinaryOp::Divide),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0, MAX_FACTORIAL), Ok(1.0));
        assert_eq!(factorial(1.0, MAX_FACTORIAL), Ok(1.0));
        assert_eq!(factorial(5.0, MAX_FACTORIAL), Ok(120.0));
        assert!(factorial(170.0, MAX_FACTORIAL).unwrap().is_finite());
    }

    #[test]
    fn test_factorial_rejects() {
        assert!(matches!(
            factorial(-1.0, MAX_FACTORIAL),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            factorial(2.5, MAX_FACTORIAL),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            factorial(171.0, 1000),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            factorial(11.0, 10),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(factorial(f64::NAN, MAX_FACTORIAL).is_err());
    }

    #[test]
    fn test_functions() {
        let r = AngleUnit::Radians;
        assert_eq!(UnaryFn::Sqrt.apply(16.0, r, MAX_FACTORIAL), Ok(4.0));
        assert!(UnaryFn::Sqrt.apply(-4.0, r, MAX_FACTORIAL).is_err());
        assert_eq!(
            UnaryFn::Reciprocal.apply(0.0, r, MAX_FACTORIAL),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(UnaryFn::Reciprocal.apply(4.0, r, MAX_FACTORIAL), Ok(0.25));
        assert_eq!(UnaryFn::Square.apply(-3.0, r, MAX_FACTORIAL), Ok(9.0));
        let log = UnaryFn::Log.apply(1000.0, r, MAX_FACTORIAL).unwrap();
        assert!((log - 3.0).abs() < 1e-12);
        assert_eq!(UnaryFn::Pi.apply(42.0, r, MAX_FACTORIAL), Ok(consts::PI));
    }

    #[test]
    fn test_log_of_non_positive_is_not_an_error() {
        let r = AngleUnit::Radians;
        assert!(UnaryFn::Log.apply(-1.0, r, MAX_FACTORIAL).unwrap().is_nan());
        assert_eq!(
            UnaryFn::Ln.apply(0.0, r, MAX_FACTORIAL),
            Ok(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_degrees() {
        let sin = UnaryFn::Sin.apply(90.0, AngleUnit::Degrees, MAX_FACTORIAL).unwrap();
        assert!((sin - 1.0).abs() < 1e-12);
    }
}

//! Query-string calculator core.
//!
//! This crate turns three raw text values (two operands and an operator
//! token, exactly as they arrive in a query string) into either a number or
//! a typed [`CalcError`]. It is transport-agnostic and holds no state, so
//! the HTTP server in `crates/server` is a thin adapter around
//! [`calculate`].
//!
//! Pipeline:
//!
//! 1. normalize the operator token ([`normalize_operator`]);
//! 2. reject absent inputs ([`CalcError::MissingParameters`]);
//! 3. parse both operands with prefix-tolerant rules ([`parse_number`]);
//! 4. dispatch on [`Operator`] and compute.
//!
//! ```
//! use calcapi::{calculate, CalcError, CalculationRequest};
//!
//! let req = CalculationRequest::new("3", "4", "%2B");
//! assert_eq!(calculate(&req), Ok(7.0));
//!
//! let req = CalculationRequest::new("10", "0", "/");
//! assert_eq!(calculate(&req), Err(CalcError::DivisionByZero));
//! ```

pub mod error;
pub mod number;
pub mod operator;

pub use error::CalcError;
pub use number::parse_number;
pub use operator::{Operator, normalize_operator};

use serde::{Deserialize, Serialize};

/// Raw inputs of a single calculation. `None` means the parameter was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub num1: Option<String>,
    #[serde(default)]
    pub num2: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
}

impl CalculationRequest {
    /// Build a request with all three parameters present.
    pub fn new(
        num1: impl Into<String>,
        num2: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            num1: Some(num1.into()),
            num2: Some(num2.into()),
            operation: Some(operation.into()),
        }
    }
}

/// Result of [`evaluate`]: the computed value plus the operator it resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// The recognized operator, `None` when `operation` was absent or unknown.
    pub operator: Option<Operator>,
    pub result: Result<f64, CalcError>,
}

/// Validate `request` and compute its result.
///
/// Checks run in a fixed order, and the first failing check decides the
/// error: presence, then operand parsing, then the operator itself (which
/// includes the zero-divisor check). A request with a bad operand and a bad
/// operator therefore reports [`CalcError::InvalidParameters`].
pub fn calculate(request: &CalculationRequest) -> Result<f64, CalcError> {
    evaluate(request).result
}

/// Like [`calculate`], but also reports which operator the token resolved to.
///
/// The operator token is normalized exactly once.
pub fn evaluate(request: &CalculationRequest) -> Evaluation {
    let operation = request.operation.as_deref().map(normalize_operator);
    tracing::debug!(
        received = ?request.operation,
        decoded = ?operation,
        "operator token"
    );

    let operator = operation.as_deref().map(Operator::from_token);

    let result = match (request.num1.as_deref(), request.num2.as_deref(), operator) {
        (Some(num1), Some(num2), Some(operator)) => {
            match (parse_number(num1), parse_number(num2)) {
                (Some(a), Some(b)) => operator.and_then(|op| op.apply(a, b)),
                _ => Err(CalcError::InvalidParameters),
            }
        }
        _ => Err(CalcError::MissingParameters),
    };

    Evaluation {
        operator: operator.and_then(Result::ok),
        result,
    }
}

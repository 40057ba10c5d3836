//! Error types produced by the calculation pipeline.
//!
//! Every failure the calculator can report is one of four typed variants.
//! The `Display` text is the message returned to API callers verbatim, so it
//! is kept stable (and in Portuguese, matching the public contract).
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`MissingParameters`](CalcError::MissingParameters) | `num1`, `num2` or `operation` absent |
//! | [`InvalidParameters`](CalcError::InvalidParameters) | an operand has no numeric prefix |
//! | [`UnknownOperation`](CalcError::UnknownOperation) | operator token is not `+ - x /` |
//! | [`DivisionByZero`](CalcError::DivisionByZero) | `/` with a zero divisor |
//!
//! # HTTP Status Code Mapping
//!
//! All four kinds are client errors:
//!
//! ```rust
//! use calcapi::CalcError;
//!
//! fn to_http_status(_error: &CalcError) -> u16 {
//!     400
//! }
//!
//! assert_eq!(to_http_status(&CalcError::DivisionByZero), 400);
//! ```

use thiserror::Error;

/// Failure modes of [`calculate`](crate::calculate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CalcError {
    #[error("Parâmetros insuficientes!")]
    MissingParameters,

    #[error("Parâmetros inválidos!")]
    InvalidParameters,

    #[error("Operação inválida!")]
    UnknownOperation,

    #[error("Divisão por zero não é permitida!")]
    DivisionByZero,
}

impl CalcError {
    /// Stable machine-readable code, used for log fields and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::MissingParameters => "MISSING_PARAMETERS",
            CalcError::InvalidParameters => "INVALID_PARAMETERS",
            CalcError::UnknownOperation => "UNKNOWN_OPERATION",
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }
}

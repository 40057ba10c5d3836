//! Operator tokens: normalization, recognition and arithmetic.

use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;
use crate::number::is_js_whitespace;

/// One of the four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Recognize an already-normalized operator token.
    ///
    /// Exactly `+`, `-`, `x` and `/` are accepted; matching is case-sensitive
    /// and any other token, including the empty string, is rejected.
    pub fn from_token(token: &str) -> Result<Self, CalcError> {
        match token {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "x" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            _ => Err(CalcError::UnknownOperation),
        }
    }

    /// The token callers use to select this operation.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "x",
            Operator::Divide => "/",
        }
    }

    /// Apply the operation to `a` and `b`.
    ///
    /// Division by an exact zero (either sign) is rejected rather than
    /// producing an infinity.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_token(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Restore an operator token mangled by query-string encoding.
///
/// The token is percent-decoded first, then every run of whitespace is
/// replaced by a single `+`. The second step exists because a literal `+` in a
/// query string is the encoding of a space, so `operation=+` reaches the
/// handler as `" "`.
///
/// Malformed escapes such as a lone `%` are kept as literal text. If decoding
/// produces bytes that are not UTF-8 the raw token is used unchanged.
///
/// ```
/// use calcapi::normalize_operator;
///
/// assert_eq!(normalize_operator("%2B"), "+");
/// assert_eq!(normalize_operator(" "), "+");
/// assert_eq!(normalize_operator("%25"), "%");
/// ```
pub fn normalize_operator(raw: &str) -> String {
    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!(operation = %raw, error = %err, "operator is not valid UTF-8 after decoding");
            raw.into()
        }
    };

    let mut out = String::with_capacity(decoded.len());
    let mut in_whitespace = false;
    for c in decoded.chars() {
        if is_js_whitespace(c) {
            if !in_whitespace {
                out.push('+');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

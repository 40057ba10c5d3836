use calcapi::{CalcError, CalculationRequest, Operator, calculate};

const OPERANDS: &[f64] = &[
    0.0, 1.0, -1.0, 2.5, -7.25, 3.0, 1e-9, 123456.789, -98765.4321, 1e12,
];

fn request(a: f64, b: f64, op: &str) -> CalculationRequest {
    CalculationRequest::new(a.to_string(), b.to_string(), op)
}

#[test]
fn addition_matches_native_operator() {
    for &a in OPERANDS {
        for &b in OPERANDS {
            assert_eq!(calculate(&request(a, b, "+")), Ok(a + b), "{a} + {b}");
        }
    }
}

#[test]
fn subtraction_matches_native_operator() {
    for &a in OPERANDS {
        for &b in OPERANDS {
            assert_eq!(calculate(&request(a, b, "-")), Ok(a - b), "{a} - {b}");
        }
    }
}

#[test]
fn multiplication_matches_native_operator() {
    for &a in OPERANDS {
        for &b in OPERANDS {
            assert_eq!(calculate(&request(a, b, "x")), Ok(a * b), "{a} x {b}");
        }
    }
}

#[test]
fn division_matches_native_operator_for_nonzero_divisor() {
    for &a in OPERANDS {
        for &b in OPERANDS.iter().filter(|b| **b != 0.0) {
            assert_eq!(calculate(&request(a, b, "/")), Ok(a / b), "{a} / {b}");
        }
    }
}

#[test]
fn division_by_zero_always_rejected() {
    for &a in OPERANDS {
        for zero in ["0", "-0", "0.0", "0e10", "0abc"] {
            let req = CalculationRequest::new(a.to_string(), zero, "/");
            assert_eq!(calculate(&req), Err(CalcError::DivisionByZero), "{a} / {zero}");
        }
    }
}

#[test]
fn encoded_operators_are_accepted() {
    let cases = [("%2B", 7.0), ("%2D", -1.0), ("-", -1.0), ("x", 12.0), ("%2F", 0.75)];
    for (token, expected) in cases {
        let req = CalculationRequest::new("3", "4", token);
        assert_eq!(calculate(&req), Ok(expected), "operation {token:?}");
    }
}

#[test]
fn unknown_operators_always_rejected() {
    for token in ["", "%", "%25", "*", "X", "plus", "//", "x ", "%2A"] {
        let req = CalculationRequest::new("5", "2", token);
        assert_eq!(
            calculate(&req),
            Err(CalcError::UnknownOperation),
            "operation {token:?}"
        );
    }
}

#[test]
fn any_missing_parameter_is_reported_as_missing() {
    let full = CalculationRequest::new("1", "2", "+");
    let variants = [
        CalculationRequest { num1: None, ..full.clone() },
        CalculationRequest { num2: None, ..full.clone() },
        CalculationRequest { operation: None, ..full.clone() },
        CalculationRequest {
            num1: None,
            num2: Some("junk".into()),
            operation: Some("%".into()),
        },
    ];
    for req in variants {
        assert_eq!(calculate(&req), Err(CalcError::MissingParameters), "{req:?}");
    }
}

#[test]
fn non_numeric_operand_is_invalid_even_with_valid_operator() {
    for op in Operator::ALL {
        for (a, b) in [("abc", "2"), ("2", "abc"), ("", "2"), ("2", " ")] {
            let req = CalculationRequest::new(a, b, op.token());
            assert_eq!(
                calculate(&req),
                Err(CalcError::InvalidParameters),
                "{a:?} {op} {b:?}"
            );
        }
    }
}

#[test]
fn prefix_tolerant_operands() {
    let req = CalculationRequest::new("12abc", "3px", "x");
    assert_eq!(calculate(&req), Ok(36.0));
}

#[test]
fn overflow_yields_infinity() {
    let req = CalculationRequest::new("1e308", "10", "x");
    assert_eq!(calculate(&req), Ok(f64::INFINITY));
}

#[test]
fn repeated_requests_are_identical() {
    let requests = [
        CalculationRequest::new("3", "4", "%2B"),
        CalculationRequest::new("10", "0", "%2F"),
        CalculationRequest::new("abc", "2", "+"),
    ];
    for req in &requests {
        let first = calculate(req);
        for _ in 0..10 {
            assert_eq!(calculate(req), first);
        }
    }
}

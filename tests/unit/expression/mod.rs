use super::*;

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-12)
}

#[test]
fn evaluates_polynomials() {
    assert!(close(evaluate("x^3 - 2*x - 5", 2.0), -1.0));
    assert!(close(evaluate("x**2", 3.0), 9.0));
    assert!(close(evaluate("-x^2", 3.0), -9.0));
    assert!(close(evaluate("2^-1", 0.0), 0.5));
}

#[test]
fn equation_is_normalized_to_difference() {
    assert!(close(evaluate("x^2 = 4", 3.0), 5.0));
    assert!(close(evaluate("x^2 - 4 = 0", 3.0), 5.0));
}

#[test]
fn implicit_function_application() {
    assert!(close(evaluate("sin x", 1.0), 1.0f64.sin()));
    assert!(close(evaluate("ln 2", 0.0), 2.0f64.ln()));
    assert!(close(evaluate("cos x + 1", 0.0), 2.0));
}

#[test]
fn ln_and_log_are_natural() {
    assert_eq!(evaluate("ln(x)", 5.0), evaluate("log(x)", 5.0));
    assert!(close(evaluate("log(e)", 0.0), 1.0));
}

#[test]
fn failures_are_none() {
    assert_eq!(evaluate("1/x", 0.0), None);
    assert_eq!(evaluate("sqrt(x)", -1.0), None);
    assert_eq!(evaluate("log(x)", 0.0), None);
    assert_eq!(evaluate("ln x", -2.0), None);
    assert_eq!(evaluate("exp(x)", 1000.0), None);
    assert_eq!(evaluate("x +", 1.0), None);
    assert_eq!(evaluate("foo(x)", 1.0), None);
    assert_eq!(evaluate("", 1.0), None);
}

#[test]
fn parsed_expression_is_reusable() {
    let e = Expression::parse("abs(x) - 1").unwrap();
    assert!(close(e.sample(-3.0), 2.0));
    assert!(close(e.sample(0.5), -0.5));
    assert_eq!(e.source(), "abs(x) - 1");
}

#[test]
fn parse_error_converts_to_crate_error() {
    let err: crate::RootplayError = Expression::parse("x )").unwrap_err().into();
    assert!(err.to_string().contains("expression error:"));
}

#[test]
fn pathologically_nested_formula_is_none() {
    let src = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
    assert_eq!(evaluate(&src, 1.0), None);
    assert!(Expression::parse(&src).is_err());
}

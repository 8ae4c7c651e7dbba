use super::*;

fn form(formula: &str) -> FormInput {
    FormInput {
        formula: formula.to_owned(),
        a: "1".to_owned(),
        b: "2,5".to_owned(),
        x0: "3".to_owned(),
        precision: 2,
    }
}

#[test]
fn bisection_sends_bounds_only() {
    let req = CalculationRequest::from_form("task4", MethodKind::Bisection, &form(" x^2 - 2 ")).unwrap();
    assert_eq!(req.path(), "/api/v1/calculate/task4/bisection");
    let body: serde_json::Value = serde_json::from_str(&req.body().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "formula": "x^2 - 2", "epsilon": 0.01, "a": 1.0, "b": 2.5 })
    );
}

#[test]
fn guess_methods_send_x0_only() {
    for (method, segment) in [
        (MethodKind::Newton, "newton"),
        (MethodKind::SimpleIteration, "simple_iter"),
    ] {
        let req = CalculationRequest::from_form("task4", method, &form("cos(x)")).unwrap();
        assert_eq!(req.path(), format!("/api/v1/calculate/task4/{segment}"));
        let body: serde_json::Value = serde_json::from_str(&req.body().unwrap()).unwrap();
        assert_eq!(body["x0"], 3.0);
        assert!(body.get("a").is_none());
        assert!(body.get("b").is_none());
    }
}

#[test]
fn invalid_inputs_never_build_a_request() {
    assert!(CalculationRequest::from_form("task4", MethodKind::Newton, &form("")).is_err());

    let mut f = form("x");
    f.b = "two".to_owned();
    assert!(CalculationRequest::from_form("task4", MethodKind::Bisection, &f).is_err());
    // Bounds are not needed for Newton.
    assert!(CalculationRequest::from_form("task4", MethodKind::Newton, &f).is_ok());

    assert!(CalculationRequest::from_form("a/b", MethodKind::Newton, &form("x")).is_err());
}

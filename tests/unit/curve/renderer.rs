use super::*;
use crate::{
    curve::window::GraphWindow,
    trace::step::{MethodKind, Step},
};

fn renderer() -> CurveRenderer {
    CurveRenderer::new(CurveSettings::default())
}

#[test]
fn render_sets_x_range_and_padded_y_range() {
    let mut r = renderer();
    let v = r.render("x", 0.0, 2.0).unwrap();
    assert_eq!(v.x_range(), [-2.0, 2.0]);
    // y spans [-2, 2]; pad = 0.4.
    let [y0, y1] = v.y_range();
    assert!((y0 + 2.4).abs() < 1e-9, "{y0}");
    assert!((y1 - 2.4).abs() < 1e-9, "{y1}");
    assert_eq!(r.base_curve().points.len(), 500);
    assert_eq!(r.viewport(), v);
}

#[test]
fn flat_curve_gets_minimum_padding() {
    let mut r = renderer();
    let v = r.render("3", 0.0, 1.0).unwrap();
    let [y0, y1] = v.y_range();
    assert!((y0 - 2.9).abs() < 1e-9);
    assert!((y1 - 3.1).abs() < 1e-9);
}

#[test]
fn unparseable_formula_falls_back_to_default_range() {
    let mut r = renderer();
    let v = r.render("x +* 2", 0.0, 5.0).unwrap();
    assert_eq!(v.y_range(), [-10.0, 10.0]);
    assert!(r.base_curve().points.is_empty());
}

#[test]
fn asymptote_samples_are_clamped_out() {
    let mut r = renderer();
    r.render("1/(x - 0.001)", 0.0, 1.0).unwrap();
    assert!(r.base_curve().points.iter().all(|p| p.y.abs() < 1e5));

    // Near-pole samples blow past the clamp and are not kept at all.
    let e = Expression::parse("1/x^3").unwrap();
    let (points, _) = sample_curve(Some(&e), [-1e-3, 1e-3], &CurveSettings::default());
    assert!(points.len() < 500);
}

#[test]
fn invalid_window_leaves_viewport_untouched() {
    let mut r = renderer();
    let before = r.render("x^2", 1.0, 3.0).unwrap();
    assert!(r.render("x^2", 0.0, 0.0).is_err());
    assert!(r.render("x^2", f64::NAN, 1.0).is_err());
    assert_eq!(r.viewport(), before);
}

#[test]
fn user_zoom_persists_until_reset_or_redraw() {
    let mut r = renderer();
    let baseline = r.render("x^2 - 2", 0.0, 3.0).unwrap();
    let zoom = Viewport::new([0.5, 2.0], [-1.0, 1.0]).unwrap();
    r.apply_user_zoom(zoom);
    assert_eq!(r.viewport(), zoom);
    assert_eq!(r.baseline(), baseline);
    assert_eq!(r.reset_zoom(), baseline);

    r.apply_user_zoom(zoom);
    let redrawn = r.render("x^2 - 2", 5.0, 1.0).unwrap();
    assert_eq!(r.viewport(), redrawn);
}

#[test]
fn fit_trace_bounds_every_step_with_margin() {
    let trace = StepTrace::new(
        MethodKind::Newton,
        vec![
            Step::Newton {
                x_prev: 3.0,
                fx: 7.0,
                x_new: 1.5,
            },
            Step::Newton {
                x_prev: 1.5,
                fx: 0.25,
                x_new: 1.4,
            },
        ],
    )
    .unwrap();
    let mut r = renderer();
    let v = r.fit_trace("x^2 - 2", &trace).unwrap();
    // extent [1.4, 3.0] -> center 2.2, span 0.8 + 2.
    let [x0, x1] = v.x_range();
    assert!((x0 - (2.2 - 2.8)).abs() < 1e-9);
    assert!((x1 - (2.2 + 2.8)).abs() < 1e-9);
}

#[test]
fn input_windows_follow_method() {
    let w = GraphWindow::for_inputs(MethodKind::Bisection, "0", "4", "");
    assert_eq!(w.center, 2.0);
    assert_eq!(w.span, 4.0);

    let w = GraphWindow::for_inputs(MethodKind::Bisection, "oops", "", "");
    assert_eq!(w.x_range(), [-20.0, 20.0]);

    let w = GraphWindow::for_inputs(MethodKind::Newton, "0", "4", "1,5");
    assert_eq!(w.x_range(), [-3.5, 6.5]);

    let w = GraphWindow::for_inputs(MethodKind::SimpleIteration, "", "", "");
    assert_eq!(w.center, 2.5);
}

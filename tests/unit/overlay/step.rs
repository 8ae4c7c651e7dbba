use super::*;
use crate::{foundation::core::Line, overlay::shape::OverlayShape};

fn viewport() -> Viewport {
    Viewport::new([-1.0, 5.0], [-3.0, 7.0]).unwrap()
}

fn bisection_trace() -> StepTrace {
    StepTrace::new(
        MethodKind::Bisection,
        vec![
            Step::Bisection {
                a: 0.0,
                b: 4.0,
                c: 2.0,
            },
            Step::Bisection {
                a: 2.0,
                b: 4.0,
                c: 3.0,
            },
        ],
    )
    .unwrap()
}

#[test]
fn bisection_draws_bracket_and_midpoint() {
    let v = viewport();
    let o = StepRenderer::render_step(1, &bisection_trace(), MethodKind::Bisection, "x - 3", &v);
    let lines: Vec<_> = o.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        (
            ShapeRole::BracketLow,
            Line::new((2.0, -3.0), (2.0, 7.0)),
            Dash::Dashed
        )
    );
    assert_eq!(
        lines[1],
        (
            ShapeRole::BracketHigh,
            Line::new((4.0, -3.0), (4.0, 7.0)),
            Dash::Dashed
        )
    );
    let markers: Vec<_> = o.markers().collect();
    assert_eq!(markers, vec![(ShapeRole::Midpoint, Point::new(3.0, 0.0))]);
}

#[test]
fn bracket_lines_follow_the_zoomed_viewport() {
    let zoomed = Viewport::new([1.0, 2.0], [-0.5, 0.5]).unwrap();
    let o = StepRenderer::render_step(0, &bisection_trace(), MethodKind::Bisection, "x", &zoomed);
    for (_, line, _) in o.lines() {
        assert_eq!(line.p0.y, -0.5);
        assert_eq!(line.p1.y, 0.5);
    }
}

#[test]
fn newton_draws_tangent_points_and_projection() {
    let trace = StepTrace::new(
        MethodKind::Newton,
        vec![Step::Newton {
            x_prev: 2.0,
            fx: 2.0,
            x_new: 1.5,
        }],
    )
    .unwrap();
    let o = StepRenderer::render_step(0, &trace, MethodKind::Newton, "x^2 - 2", &viewport());
    assert_eq!(
        o.shapes,
        vec![
            OverlayShape::Line {
                role: ShapeRole::Tangent,
                line: Line::new((2.0, 2.0), (1.5, 0.0)),
                dash: Dash::Solid,
            },
            OverlayShape::Marker {
                role: ShapeRole::PreviousPoint,
                at: Point::new(2.0, 2.0),
            },
            OverlayShape::Marker {
                role: ShapeRole::NextPoint,
                at: Point::new(1.5, 0.0),
            },
            OverlayShape::Line {
                role: ShapeRole::Projection,
                line: Line::new((1.5, 0.0), (1.5, 0.25)),
                dash: Dash::Dotted,
            },
        ]
    );
}

#[test]
fn newton_without_curve_value_omits_projection_only() {
    let trace = StepTrace::new(
        MethodKind::Newton,
        vec![Step::Newton {
            x_prev: 2.0,
            fx: 1.0,
            x_new: -1.0,
        }],
    )
    .unwrap();
    let o = StepRenderer::render_step(0, &trace, MethodKind::Newton, "sqrt(x)", &viewport());
    assert_eq!(o.len(), 3);
    assert!(o.shapes.iter().all(|s| s.role() != ShapeRole::Projection));
}

#[test]
fn simple_iteration_recomputes_missing_fx() {
    let trace = StepTrace::new(
        MethodKind::SimpleIteration,
        vec![
            Step::SimpleIteration {
                x_prev: 1.0,
                x_new: 2.0,
                fx: None,
            },
            Step::SimpleIteration {
                x_prev: 2.0,
                x_new: 3.0,
                fx: Some(10.0),
            },
        ],
    )
    .unwrap();
    let v = viewport();
    let o = StepRenderer::render_step(0, &trace, MethodKind::SimpleIteration, "2*x", &v);
    assert_eq!(
        o.lines().next().unwrap(),
        (
            ShapeRole::IterationPath,
            Line::new((1.0, 2.0), (2.0, 4.0)),
            Dash::Dotted
        )
    );
    assert_eq!(o.markers().count(), 2);

    let o = StepRenderer::render_step(1, &trace, MethodKind::SimpleIteration, "2*x", &v);
    assert_eq!(o.lines().next().unwrap().1, Line::new((2.0, 10.0), (3.0, 6.0)));
}

#[test]
fn simple_iteration_with_unusable_formula_keeps_known_points() {
    let trace = StepTrace::new(
        MethodKind::SimpleIteration,
        vec![Step::SimpleIteration {
            x_prev: 1.0,
            x_new: 2.0,
            fx: Some(0.5),
        }],
    )
    .unwrap();
    let o = StepRenderer::render_step(0, &trace, MethodKind::SimpleIteration, "x +", &viewport());
    assert_eq!(o.lines().count(), 0);
    assert_eq!(
        o.markers().collect::<Vec<_>>(),
        vec![(ShapeRole::PreviousPoint, Point::new(1.0, 0.5))]
    );
}

#[test]
fn out_of_range_or_mismatched_method_is_empty() {
    let t = bisection_trace();
    let v = viewport();
    assert!(StepRenderer::render_step(2, &t, MethodKind::Bisection, "x", &v).is_empty());
    assert!(StepRenderer::render_step(usize::MAX, &t, MethodKind::Bisection, "x", &v).is_empty());
    assert!(StepRenderer::render_step(0, &t, MethodKind::Newton, "x", &v).is_empty());
}

#[test]
fn rendering_is_deterministic_and_leaves_viewport_alone() {
    let t = bisection_trace();
    let v = viewport();
    let a = StepRenderer::render_step(1, &t, MethodKind::Bisection, "x^3", &v);
    let b = StepRenderer::render_step(1, &t, MethodKind::Bisection, "x^3", &v);
    assert_eq!(a, b);
    assert_eq!(v, viewport());
}

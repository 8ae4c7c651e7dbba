use std::sync::Arc;

use super::*;
use crate::{curve::renderer::BaseCurve, foundation::core::Viewport, overlay::shape::Overlay};

fn small_chart() -> ChartSettings {
    ChartSettings {
        width: 100,
        height: 50,
        ..ChartSettings::default()
    }
}

fn frame(overlay: Overlay, label: Option<&str>) -> ChartFrame {
    ChartFrame {
        viewport: Viewport::new([0.0, 10.0], [-5.0, 5.0]).unwrap(),
        base: Arc::new(BaseCurve {
            formula: "x".to_owned(),
            points: vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 5.0)],
        }),
        overlay,
        label: label.map(str::to_owned),
    }
}

#[test]
fn overlay_lines_map_to_pixels_with_dash_styles() {
    let mut overlay = Overlay::default();
    overlay.push_line(
        ShapeRole::BracketLow,
        Point::new(2.0, -5.0),
        Point::new(2.0, 5.0),
        Dash::Dashed,
    );
    overlay.push_marker(ShapeRole::Midpoint, Point::new(5.0, 0.0));
    let svg = frame_to_svg(&frame(overlay, None), &small_chart());

    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(
        r##"<line x1="20.00" y1="50.00" x2="20.00" y2="0.00" stroke="#ff3366" stroke-width="2" stroke-dasharray="6 4"/>"##
    ));
    assert!(svg.contains(r##"<circle cx="50.00" cy="25.00" r="5" fill="#00f0ff"/>"##));
    assert!(svg.contains(r#"clip-path="url(#plot)""#));
    assert!(!svg.contains("<text"));
}

#[test]
fn label_is_drawn_and_escaped() {
    let svg = frame_to_svg(&frame(Overlay::default(), Some("2 / 5 <")), &small_chart());
    assert!(svg.contains(">2 / 5 &lt;</text>"));
}

#[test]
fn axes_only_when_zero_is_visible() {
    let svg = frame_to_svg(&frame(Overlay::default(), None), &small_chart());
    // y = 0 is visible, x = 0 sits on the left edge.
    assert_eq!(svg.matches("<line ").count(), 2);

    let mut f = frame(Overlay::default(), None);
    f.viewport = Viewport::new([1.0, 2.0], [1.0, 2.0]).unwrap();
    let svg = frame_to_svg(&f, &small_chart());
    assert_eq!(svg.matches("<line ").count(), 0);
}

#[test]
fn curve_path_breaks_at_missing_samples() {
    let pts: Vec<Point> = [0.0, 1.0, 2.0, 6.0, 7.0]
        .into_iter()
        .map(|x| Point::new(x, x))
        .collect();
    let path = curve_path(&pts);
    let moves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
    assert_eq!(path.elements().len(), 5);
}

#[test]
fn empty_curve_draws_no_path() {
    let mut f = frame(Overlay::default(), None);
    f.base = Arc::new(BaseCurve::default());
    let svg = frame_to_svg(&f, &small_chart());
    assert!(!svg.contains("<path"));
}

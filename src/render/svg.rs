use std::fmt::Write as _;

use crate::{
    config::settings::{ChartSettings, Palette},
    foundation::core::{Affine, BezPath, Line, Point},
    overlay::shape::{Dash, OverlayShape, ShapeRole},
    session::surface::ChartFrame,
};

const CURVE_WIDTH: f64 = 2.5;
const LINE_WIDTH: f64 = 2.0;
const MARKER_RADIUS: f64 = 5.0;

/// Serialize one chart frame as a standalone SVG document of `chart.width x chart.height`.
///
/// Data coordinates go through [`Viewport::to_pixels`](crate::Viewport::to_pixels); everything
/// outside the plot box is clipped.
#[tracing::instrument(level = "debug", skip_all, fields(shapes = frame.overlay.len()))]
pub fn frame_to_svg(frame: &ChartFrame, chart: &ChartSettings) -> String {
    let (w, h) = (f64::from(chart.width), f64::from(chart.height));
    let to_px = frame.viewport.to_pixels(w, h);
    let palette = &chart.palette;

    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        out,
        r#"<defs><clipPath id="plot"><rect x="0" y="0" width="{w}" height="{h}"/></clipPath></defs>"#
    );
    let _ = writeln!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
        escape(&chart.background)
    );
    out.push_str("<g clip-path=\"url(#plot)\">\n");

    write_axes(&mut out, frame, to_px, palette);

    let curve = curve_path(&frame.base.points);
    if !curve.elements().is_empty() {
        let _ = writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{CURVE_WIDTH}" stroke-linejoin="round"/>"#,
            (to_px * curve).to_svg(),
            escape(&palette.curve)
        );
    }

    for shape in &frame.overlay.shapes {
        match shape {
            OverlayShape::Line { role, line, dash } => {
                write_line(&mut out, to_px * *line, role_color(palette, *role), *dash);
            }
            OverlayShape::Marker { role, at } => {
                let p = to_px * *at;
                let _ = writeln!(
                    out,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{MARKER_RADIUS}" fill="{}"/>"#,
                    p.x,
                    p.y,
                    escape(role_color(palette, *role))
                );
            }
        }
    }
    out.push_str("</g>\n");

    if let Some(label) = &frame.label {
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="24" text-anchor="end" font-family="sans-serif" font-size="16" fill="{}">{}</text>"#,
            w - 12.0,
            escape(&palette.label),
            escape(label)
        );
    }
    out.push_str("</svg>\n");
    out
}

fn write_axes(out: &mut String, frame: &ChartFrame, to_px: Affine, palette: &Palette) {
    let [x0, x1] = frame.viewport.x_range();
    let [y0, y1] = frame.viewport.y_range();
    if y0 <= 0.0 && 0.0 <= y1 {
        write_line(out, to_px * Line::new((x0, 0.0), (x1, 0.0)), &palette.axis, Dash::Solid);
    }
    if x0 <= 0.0 && 0.0 <= x1 {
        write_line(out, to_px * Line::new((0.0, y0), (0.0, y1)), &palette.axis, Dash::Solid);
    }
}

fn write_line(out: &mut String, line: Line, color: &str, dash: Dash) {
    let dash = match dash {
        Dash::Solid => String::new(),
        Dash::Dashed => r#" stroke-dasharray="6 4""#.to_owned(),
        Dash::Dotted => r#" stroke-dasharray="2 4""#.to_owned(),
    };
    let _ = writeln!(
        out,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{LINE_WIDTH}"{dash}/>"#,
        line.p0.x,
        line.p0.y,
        line.p1.x,
        line.p1.y,
        escape(color)
    );
}

/// Polyline through the samples, lifted wherever samples are missing.
///
/// The sampling step is taken to be the smallest gap between neighbours; a gap wider than one
/// and a half steps means dropped samples (asymptote or domain hole) and starts a new subpath.
pub(crate) fn curve_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let step = points
        .windows(2)
        .map(|w| w[1].x - w[0].x)
        .fold(f64::INFINITY, f64::min);
    let mut prev: Option<Point> = None;
    for &p in points {
        match prev {
            Some(q) if p.x - q.x <= step * 1.5 => path.line_to(p),
            _ => path.move_to(p),
        }
        prev = Some(p);
    }
    path
}

fn role_color(palette: &Palette, role: ShapeRole) -> &str {
    match role {
        ShapeRole::BracketLow | ShapeRole::BracketHigh => &palette.bracket,
        ShapeRole::Midpoint => &palette.midpoint,
        ShapeRole::Tangent => &palette.tangent,
        ShapeRole::Projection => &palette.projection,
        ShapeRole::IterationPath => &palette.iteration_path,
        ShapeRole::PreviousPoint => &palette.previous_point,
        ShapeRole::NextPoint => &palette.next_point,
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;

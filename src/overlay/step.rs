use crate::{
    expression::Expression,
    foundation::core::{Point, Viewport},
    overlay::shape::{Dash, Overlay, ShapeRole},
    trace::step::{MethodKind, Step, StepTrace},
};

/// Stateless mapping from one trace step to its overlay geometry.
///
/// Full-height reference lines take their extent from the viewport that is passed in, so they
/// span the chart at whatever zoom the user has chosen. The viewport is only read.
pub struct StepRenderer;

impl StepRenderer {
    /// Overlay for step `index` of `trace`, parsing `expr` for the points the trace lacks.
    pub fn render_step(
        index: usize,
        trace: &StepTrace,
        method: MethodKind,
        expr: &str,
        viewport: &Viewport,
    ) -> Overlay {
        let parsed = Expression::parse(expr).ok();
        Self::render_step_with(index, trace, method, parsed.as_ref(), viewport)
    }

    /// Same as [`render_step`](Self::render_step) with an already parsed formula.
    ///
    /// Out-of-range indices and a `method` that disagrees with the trace give an empty overlay.
    #[tracing::instrument(level = "trace", skip(trace, expr, viewport))]
    pub fn render_step_with(
        index: usize,
        trace: &StepTrace,
        method: MethodKind,
        expr: Option<&Expression>,
        viewport: &Viewport,
    ) -> Overlay {
        if method != trace.method() {
            tracing::warn!(
                requested = %method,
                trace = %trace.method(),
                "method does not match trace; nothing drawn"
            );
            return Overlay::default();
        }
        let Some(step) = trace.get(index) else {
            tracing::warn!(index, len = trace.len(), "step index out of range; nothing drawn");
            return Overlay::default();
        };

        let f = |x: f64| expr.and_then(|e| e.sample(x));
        let mut out = Overlay::default();

        match *step {
            Step::Bisection { a, b, c } => {
                let [y0, y1] = viewport.y_range();
                out.push_line(
                    ShapeRole::BracketLow,
                    Point::new(a, y0),
                    Point::new(a, y1),
                    Dash::Dashed,
                );
                out.push_line(
                    ShapeRole::BracketHigh,
                    Point::new(b, y0),
                    Point::new(b, y1),
                    Dash::Dashed,
                );
                out.push_marker(ShapeRole::Midpoint, Point::new(c, 0.0));
            }
            Step::Newton { x_prev, fx, x_new } => {
                let from = Point::new(x_prev, fx);
                let to = Point::new(x_new, 0.0);
                out.push_line(ShapeRole::Tangent, from, to, Dash::Solid);
                out.push_marker(ShapeRole::PreviousPoint, from);
                out.push_marker(ShapeRole::NextPoint, to);
                if let Some(y) = f(x_new) {
                    out.push_line(ShapeRole::Projection, to, Point::new(x_new, y), Dash::Dotted);
                }
            }
            Step::SimpleIteration { x_prev, x_new, fx } => {
                let from = fx.or_else(|| f(x_prev)).map(|y| Point::new(x_prev, y));
                let to = f(x_new).map(|y| Point::new(x_new, y));
                if let (Some(from), Some(to)) = (from, to) {
                    out.push_line(ShapeRole::IterationPath, from, to, Dash::Dotted);
                }
                if let Some(from) = from {
                    out.push_marker(ShapeRole::PreviousPoint, from);
                }
                if let Some(to) = to {
                    out.push_marker(ShapeRole::NextPoint, to);
                }
            }
        }

        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/step.rs"]
mod tests;

use crate::{
    foundation::core::parse_decimal,
    trace::step::{MethodKind, StepTrace},
};

/// Horizontal window `[center - span, center + span]` a curve is sampled over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphWindow {
    pub center: f64,
    pub span: f64,
}

impl GraphWindow {
    const DEFAULT_A: f64 = -10.0;
    const DEFAULT_B: f64 = 10.0;
    const DEFAULT_X0: f64 = 2.5;
    const GUESS_SPAN: f64 = 5.0;
    const TRACE_MARGIN: f64 = 2.0;

    /// Window derived from the raw form inputs for `method`.
    ///
    /// Interval methods widen `[a, b]` by half its length on each side; initial-guess methods
    /// look at `x0 +- 5`. Unparseable inputs fall back to `[-10, 10]` and `x0 = 2.5`.
    pub fn for_inputs(method: MethodKind, a: &str, b: &str, x0: &str) -> Self {
        if method.uses_interval() {
            let a = parse_decimal(a).unwrap_or(Self::DEFAULT_A);
            let b = parse_decimal(b).unwrap_or(Self::DEFAULT_B);
            let len = (b - a).abs();
            Self {
                center: (a + b) / 2.0,
                span: len / 2.0 + len * 0.5,
            }
        } else {
            Self {
                center: parse_decimal(x0).unwrap_or(Self::DEFAULT_X0),
                span: Self::GUESS_SPAN,
            }
        }
    }

    /// Window that keeps every step of `trace` in view with a fixed margin.
    pub fn for_trace(trace: &StepTrace) -> Self {
        let [lo, hi] = trace.x_extent();
        Self {
            center: (lo + hi) / 2.0,
            span: (hi - lo).abs() / 2.0 + Self::TRACE_MARGIN,
        }
    }

    pub fn x_range(&self) -> [f64; 2] {
        [self.center - self.span, self.center + self.span]
    }
}

use crate::foundation::error::{RootplayError, RootplayResult};

/// Root-finding method that produced a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Interval halving; the service also calls it `dichotomy`.
    #[serde(alias = "dichotomy")]
    Bisection,
    Newton,
    /// Fixed-point iteration `x = phi(x)`.
    #[serde(rename = "simple_iter", alias = "simple_iteration")]
    SimpleIteration,
}

impl MethodKind {
    /// Path segment used in the calculation endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            MethodKind::Bisection => "bisection",
            MethodKind::Newton => "newton",
            MethodKind::SimpleIteration => "simple_iter",
        }
    }

    /// Bisection works on an interval; the others start from an initial guess.
    pub fn uses_interval(self) -> bool {
        matches!(self, MethodKind::Bisection)
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl std::str::FromStr for MethodKind {
    type Err = RootplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bisection" | "dichotomy" => Ok(MethodKind::Bisection),
            "newton" => Ok(MethodKind::Newton),
            "simple_iter" | "simple_iteration" => Ok(MethodKind::SimpleIteration),
            other => Err(RootplayError::validation(format!(
                "unknown method '{other}'"
            ))),
        }
    }
}

/// One recorded iteration of a solver run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Step {
    /// Current bracket `[a, b]` and its midpoint `c`.
    Bisection { a: f64, b: f64, c: f64 },
    /// Tangent from `(x_prev, fx)` down to the axis at `x_new`.
    Newton { x_prev: f64, fx: f64, x_new: f64 },
    /// `x_new = phi(x_prev)`; `fx` is the service's cached value at `x_prev`, when sent.
    SimpleIteration {
        x_prev: f64,
        x_new: f64,
        fx: Option<f64>,
    },
}

impl Step {
    pub fn method(&self) -> MethodKind {
        match self {
            Step::Bisection { .. } => MethodKind::Bisection,
            Step::Newton { .. } => MethodKind::Newton,
            Step::SimpleIteration { .. } => MethodKind::SimpleIteration,
        }
    }

    /// Every x coordinate this step draws at.
    pub fn x_extent(&self) -> [f64; 2] {
        match *self {
            Step::Bisection { a, b, c } => [a.min(b).min(c), a.max(b).max(c)],
            Step::Newton { x_prev, x_new, .. } | Step::SimpleIteration { x_prev, x_new, .. } => {
                [x_prev.min(x_new), x_prev.max(x_new)]
            }
        }
    }

    pub fn validate(&self) -> RootplayResult<()> {
        let fields: &[(&str, f64)] = match self {
            Step::Bisection { a, b, c } => &[("a", *a), ("b", *b), ("c", *c)],
            Step::Newton { x_prev, fx, x_new } => {
                &[("x_prev", *x_prev), ("fx", *fx), ("x_new", *x_new)]
            }
            Step::SimpleIteration { x_prev, x_new, fx } => {
                if let Some(fx) = fx
                    && !fx.is_finite()
                {
                    return Err(RootplayError::validation(format!(
                        "step field 'fx' is not finite ({fx})"
                    )));
                }
                &[("x_prev", *x_prev), ("x_new", *x_new)]
            }
        };
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(RootplayError::validation(format!(
                    "step field '{name}' is not finite ({v})"
                )));
            }
        }
        Ok(())
    }
}

/// The ordered steps of one solver run: non-empty, all from the same method, all finite.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepTrace {
    method: MethodKind,
    steps: Vec<Step>,
}

impl StepTrace {
    pub fn new(method: MethodKind, steps: Vec<Step>) -> RootplayResult<Self> {
        if steps.is_empty() {
            return Err(RootplayError::EmptyTrace);
        }
        for (i, step) in steps.iter().enumerate() {
            if step.method() != method {
                return Err(RootplayError::validation(format!(
                    "step {i} is a {} step in a {method} trace",
                    step.method()
                )));
            }
            step.validate()
                .map_err(|e| RootplayError::validation(format!("step {i}: {e}")))?;
        }
        Ok(Self { method, steps })
    }

    pub fn method(&self) -> MethodKind {
        self.method
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// `[min, max]` over every x coordinate in the trace.
    pub fn x_extent(&self) -> [f64; 2] {
        self.steps.iter().fold(
            [f64::INFINITY, f64::NEG_INFINITY],
            |[lo, hi], s| {
                let [a, b] = s.x_extent();
                [lo.min(a), hi.max(b)]
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/step.rs"]
mod tests;

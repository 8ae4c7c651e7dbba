//! Step objects as the solver service sends them.
//!
//! The service has shipped two field spellings over time (`x_prev` from the JSON tags, `XPrev`
//! from untagged struct fields), and camel case shows up from other clients. All of them are
//! accepted here and nowhere else; downstream code only sees [`Step`].

use crate::{
    foundation::error::{RootplayError, RootplayResult},
    trace::step::{MethodKind, Step, StepTrace},
};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub(crate) struct WireStep {
    #[serde(default, alias = "A")]
    a: Option<f64>,
    #[serde(default, alias = "B")]
    b: Option<f64>,
    #[serde(default, alias = "C")]
    c: Option<f64>,
    #[serde(default, alias = "XPrev", alias = "xPrev")]
    x_prev: Option<f64>,
    #[serde(default, alias = "XNew", alias = "xNew")]
    x_new: Option<f64>,
    #[serde(default, alias = "Fx")]
    fx: Option<f64>,
}

impl WireStep {
    fn into_step(self, method: MethodKind, index: usize) -> RootplayResult<Step> {
        let need = |v: Option<f64>, name: &str| {
            v.ok_or_else(|| {
                RootplayError::serde(format!(
                    "{method} step {index} is missing field '{name}'"
                ))
            })
        };
        Ok(match method {
            MethodKind::Bisection => {
                let a = need(self.a, "a")?;
                let b = need(self.b, "b")?;
                Step::Bisection {
                    a,
                    b,
                    c: self.c.unwrap_or((a + b) / 2.0),
                }
            }
            MethodKind::Newton => Step::Newton {
                x_prev: need(self.x_prev, "x_prev")?,
                fx: need(self.fx, "fx")?,
                x_new: need(self.x_new, "x_new")?,
            },
            MethodKind::SimpleIteration => Step::SimpleIteration {
                x_prev: need(self.x_prev, "x_prev")?,
                x_new: need(self.x_new, "x_new")?,
                fx: self.fx,
            },
        })
    }
}

/// Convert wire steps into a validated trace. An absent or empty list is [`RootplayError::EmptyTrace`].
pub(crate) fn normalize_steps(
    method: MethodKind,
    steps: Option<Vec<WireStep>>,
) -> RootplayResult<StepTrace> {
    let steps = steps
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.into_step(method, i))
        .collect::<RootplayResult<Vec<_>>>()?;
    StepTrace::new(method, steps)
}

/// Parse a bare JSON array of steps.
pub fn parse_steps(method: MethodKind, json: &str) -> RootplayResult<StepTrace> {
    let steps: Vec<WireStep> = serde_json::from_str(json)?;
    normalize_steps(method, Some(steps))
}

#[cfg(test)]
#[path = "../../tests/unit/trace/wire.rs"]
mod tests;

use crate::{
    foundation::error::{RootplayError, RootplayResult},
    trace::{
        step::{MethodKind, StepTrace},
        wire::{WireStep, normalize_steps},
    },
};

const FALLBACK_SERVER_ERROR: &str = "Server error";

#[derive(serde::Deserialize)]
struct WireSuccess {
    root: f64,
    iterations: u64,
    error: f64,
    #[serde(default)]
    steps: Option<Vec<WireStep>>,
}

/// A successful calculation with a non-empty trace.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub root: f64,
    pub iterations: u64,
    /// Final error estimate reported by the solver.
    pub error: f64,
    pub trace: StepTrace,
}

/// Result figures formatted for display.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ResultSummary {
    pub root: String,
    pub iterations: u64,
    pub error: String,
    pub steps: usize,
}

impl CalculationResult {
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            root: format!("{:.6}", self.root),
            iterations: self.iterations,
            error: exponential(self.error, 2),
            steps: self.trace.len(),
        }
    }
}

/// Decode a service response for `method`.
///
/// A non-2xx status becomes [`RootplayError::Service`] carrying the body's `error` string, or
/// `"Server error"` when there is none. A success without steps is [`RootplayError::EmptyTrace`].
#[tracing::instrument(level = "debug", skip(body), fields(len = body.len()))]
pub fn decode_response(
    method: MethodKind,
    status: u16,
    body: &str,
) -> RootplayResult<CalculationResult> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .unwrap_or_else(|| FALLBACK_SERVER_ERROR.to_owned());
        tracing::debug!(status, %message, "service reported failure");
        return Err(RootplayError::service(message));
    }

    let wire: WireSuccess = serde_json::from_str(body)?;
    let trace = normalize_steps(method, wire.steps)?;
    Ok(CalculationResult {
        root: wire.root,
        iterations: wire.iterations,
        error: wire.error,
        trace,
    })
}

// `{:e}` with an explicit sign on non-negative exponents, e.g. `1.50e+3`.
fn exponential(v: f64, digits: usize) -> String {
    let s = format!("{v:.digits$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/response.rs"]
mod tests;

use crate::{
    client::form::FormInput,
    foundation::error::{RootplayError, RootplayResult},
    trace::step::MethodKind,
};

/// A validated calculation request, ready to be posted.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CalculationRequest {
    #[serde(skip)]
    pub task: String,
    #[serde(skip)]
    pub method: MethodKind,
    pub formula: String,
    pub epsilon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x0: Option<f64>,
}

impl CalculationRequest {
    /// Validate the form for `method`. Interval methods send `a`/`b`; the others send `x0`.
    pub fn from_form(task: &str, method: MethodKind, form: &FormInput) -> RootplayResult<Self> {
        if task.is_empty() || task.contains('/') {
            return Err(RootplayError::validation(format!("invalid task name '{task}'")));
        }
        let formula = form.formula()?.to_owned();
        let epsilon = form.epsilon()?;

        let (a, b, x0) = if method.uses_interval() {
            let (a, b) = form.bounds()?;
            (Some(a), Some(b), None)
        } else {
            (None, None, Some(form.initial_guess()?))
        };

        Ok(Self {
            task: task.to_owned(),
            method,
            formula,
            epsilon,
            a,
            b,
            x0,
        })
    }

    /// Endpoint path, `/api/v1/calculate/{task}/{method}`.
    pub fn path(&self) -> String {
        format!("/api/v1/calculate/{}/{}", self.task, self.method.wire_name())
    }

    pub fn body(&self) -> RootplayResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/request.rs"]
mod tests;

use crate::foundation::{
    core::parse_decimal,
    error::{RootplayError, RootplayResult},
};

/// Raw text of the calculation form, exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub formula: String,
    pub a: String,
    pub b: String,
    pub x0: String,
    /// Precision slider; the requested tolerance is `10^-precision`.
    pub precision: u32,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            formula: String::new(),
            a: "-10".to_owned(),
            b: "10".to_owned(),
            x0: "2.5".to_owned(),
            precision: 6,
        }
    }
}

impl FormInput {
    pub const MAX_PRECISION: u32 = 15;

    pub fn formula(&self) -> RootplayResult<&str> {
        let f = self.formula.trim();
        if f.is_empty() {
            return Err(RootplayError::validation("please enter a formula"));
        }
        Ok(f)
    }

    /// Both interval bounds, accepting a decimal comma.
    pub fn bounds(&self) -> RootplayResult<(f64, f64)> {
        match (parse_decimal(&self.a), parse_decimal(&self.b)) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(RootplayError::validation(
                "please enter valid interval bounds [a, b]",
            )),
        }
    }

    pub fn initial_guess(&self) -> RootplayResult<f64> {
        parse_decimal(&self.x0)
            .ok_or_else(|| RootplayError::validation("please enter an initial guess x0"))
    }

    pub fn epsilon(&self) -> RootplayResult<f64> {
        if !(1..=Self::MAX_PRECISION).contains(&self.precision) {
            return Err(RootplayError::validation(format!(
                "precision must be between 1 and {}, got {}",
                Self::MAX_PRECISION,
                self.precision
            )));
        }
        Ok(10f64.powi(-(self.precision as i32)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/form.rs"]
mod tests;

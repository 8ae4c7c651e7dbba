use crate::foundation::error::{RootplayError, RootplayResult};

pub use kurbo::{Affine, BezPath, Line, Point};

/// Visible data-space window of the chart.
///
/// Both ranges are `[min, max]` with `min < max` and finite endpoints; the constructor is the
/// only way to build one, so every `Viewport` in circulation satisfies that.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Viewport {
    x_range: [f64; 2],
    y_range: [f64; 2],
}

impl Viewport {
    /// Build a viewport, rejecting empty, inverted, or non-finite ranges.
    pub fn new(x_range: [f64; 2], y_range: [f64; 2]) -> RootplayResult<Self> {
        check_range("x_range", x_range)?;
        check_range("y_range", y_range)?;
        Ok(Self { x_range, y_range })
    }

    /// Horizontal range `[min, max]`.
    pub fn x_range(&self) -> [f64; 2] {
        self.x_range
    }

    /// Vertical range `[min, max]`.
    pub fn y_range(&self) -> [f64; 2] {
        self.y_range
    }

    pub fn width(&self) -> f64 {
        self.x_range[1] - self.x_range[0]
    }

    pub fn height(&self) -> f64 {
        self.y_range[1] - self.y_range[0]
    }

    /// Affine map from data space into a `width x height` pixel box (y grows downward).
    pub fn to_pixels(&self, width: f64, height: f64) -> Affine {
        let sx = width / self.width();
        let sy = height / self.height();
        Affine::new([sx, 0.0, 0.0, -sy, -self.x_range[0] * sx, self.y_range[1] * sy])
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_range: [-10.0, 10.0],
            y_range: [-10.0, 10.0],
        }
    }
}

impl<'de> serde::Deserialize<'de> for Viewport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            x_range: [f64; 2],
            y_range: [f64; 2],
        }

        let raw = Raw::deserialize(deserializer)?;
        Viewport::new(raw.x_range, raw.y_range).map_err(serde::de::Error::custom)
    }
}

/// Parse a user-typed number, accepting a decimal comma (`"1,5"`). Non-finite values are rejected.
pub(crate) fn parse_decimal(s: &str) -> Option<f64> {
    let v: f64 = s.trim().replacen(',', ".", 1).parse().ok()?;
    v.is_finite().then_some(v)
}

fn check_range(name: &str, r: [f64; 2]) -> RootplayResult<()> {
    if !r[0].is_finite() || !r[1].is_finite() {
        return Err(RootplayError::validation(format!(
            "{name} must be finite, got [{}, {}]",
            r[0], r[1]
        )));
    }
    if r[0] >= r[1] {
        return Err(RootplayError::validation(format!(
            "{name} must satisfy min < max, got [{}, {}]",
            r[0], r[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

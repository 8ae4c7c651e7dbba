use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::{
    client::form::FormInput,
    foundation::{
        core::Viewport,
        error::{RootplayError, RootplayResult},
    },
};

/// Everything tunable about a visualizer instance.
///
/// Every field has a default, so a settings file only needs the keys it changes:
///
/// ```json
/// { "playback": { "tick_ms": 400 }, "chart": { "width": 640, "height": 360 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub input: InputSettings,
    pub curve: CurveSettings,
    pub chart: ChartSettings,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Autoplay period.
    pub tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Quiet window before formula/bounds edits redraw the curve.
    pub debounce_ms: u64,
    /// Precision slider value; requests use `epsilon = 10^-precision`.
    pub precision: u32,
    /// Task segment of the calculation endpoint.
    pub task: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            precision: 6,
            task: "task4".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub samples: usize,
    /// Samples with `|y|` at or above this are dropped (asymptotes).
    pub clamp_abs: f64,
    /// Vertical range when no sample survives.
    pub fallback_y: [f64; 2],
    /// Viewport before the first curve render.
    pub initial_viewport: Viewport,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            samples: 500,
            clamp_abs: 1e5,
            fallback_y: [-10.0, 10.0],
            initial_viewport: Viewport::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub palette: Palette,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            background: "#12141c".to_owned(),
            palette: Palette::default(),
        }
    }
}

/// Stroke/fill colors per overlay role, as SVG color strings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub curve: String,
    pub axis: String,
    pub bracket: String,
    pub midpoint: String,
    pub tangent: String,
    pub projection: String,
    pub iteration_path: String,
    pub previous_point: String,
    pub next_point: String,
    pub label: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            curve: "#00f0ff".to_owned(),
            axis: "rgba(255,255,255,0.2)".to_owned(),
            bracket: "#ff3366".to_owned(),
            midpoint: "#00f0ff".to_owned(),
            tangent: "#7000ff".to_owned(),
            projection: "rgba(255,255,255,0.3)".to_owned(),
            iteration_path: "#7000ff".to_owned(),
            previous_point: "#ffffff".to_owned(),
            next_point: "#00f0ff".to_owned(),
            label: "#9ca3af".to_owned(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn from_path(path: &Path) -> RootplayResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Settings = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RootplayError::serde(format!("{}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> RootplayResult<()> {
        if self.playback.tick_ms == 0 {
            return Err(RootplayError::validation("playback.tick_ms must be > 0"));
        }
        if self.input.debounce_ms == 0 {
            return Err(RootplayError::validation("input.debounce_ms must be > 0"));
        }
        if !(1..=FormInput::MAX_PRECISION).contains(&self.input.precision) {
            return Err(RootplayError::validation(format!(
                "input.precision must be in 1..={}",
                FormInput::MAX_PRECISION
            )));
        }
        if self.input.task.trim().is_empty() {
            return Err(RootplayError::validation("input.task must be non-empty"));
        }
        if self.curve.samples < 2 {
            return Err(RootplayError::validation("curve.samples must be >= 2"));
        }
        if !(self.curve.clamp_abs.is_finite() && self.curve.clamp_abs > 0.0) {
            return Err(RootplayError::validation(
                "curve.clamp_abs must be finite and > 0",
            ));
        }
        let [lo, hi] = self.curve.fallback_y;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(RootplayError::validation(
                "curve.fallback_y must be finite with min < max",
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(RootplayError::validation("chart size must be non-zero"));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.playback.tick_ms)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.input.debounce_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;

use std::sync::Arc;

use crate::{
    config::settings::CurveSettings,
    curve::window::GraphWindow,
    expression::Expression,
    foundation::{
        core::{Point, Viewport},
        error::{RootplayError, RootplayResult},
    },
    trace::step::StepTrace,
};

/// Sampled background curve `y = f(x)`.
///
/// Points are in ascending x order. Failed or clamped samples are simply absent, so consecutive
/// points may be further apart than the sampling step.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BaseCurve {
    pub formula: String,
    pub points: Vec<Point>,
}

/// Owner of the background curve and of the persisted chart viewport.
///
/// The viewport is replaced only by [`render`](Self::render), [`fit_trace`](Self::fit_trace),
/// [`apply_user_zoom`](Self::apply_user_zoom), and [`reset_zoom`](Self::reset_zoom); overlay
/// rendering reads it and nothing else writes it.
#[derive(Clone, Debug)]
pub struct CurveRenderer {
    settings: CurveSettings,
    base: Arc<BaseCurve>,
    baseline: Viewport,
    viewport: Viewport,
}

impl CurveRenderer {
    pub fn new(settings: CurveSettings) -> Self {
        let initial = settings.initial_viewport;
        Self {
            settings,
            base: Arc::new(BaseCurve::default()),
            baseline: initial,
            viewport: initial,
        }
    }

    /// Sample `expr` over `[center - span, center + span]` and make the result the new baseline.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, expr: &str, center: f64, span: f64) -> RootplayResult<Viewport> {
        let parsed = match Expression::parse(expr) {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!(%err, "formula does not parse; drawing an empty curve");
                None
            }
        };
        self.render_parsed(expr, parsed.as_ref(), center, span)
    }

    pub(crate) fn render_parsed(
        &mut self,
        formula: &str,
        expr: Option<&Expression>,
        center: f64,
        span: f64,
    ) -> RootplayResult<Viewport> {
        if !center.is_finite() || !span.is_finite() || span <= 0.0 {
            return Err(RootplayError::validation(format!(
                "curve window needs a finite center and positive span, got center={center} span={span}"
            )));
        }
        let x_range = [center - span, center + span];
        let (points, y_range) = sample_curve(expr, x_range, &self.settings);
        let viewport = Viewport::new(x_range, y_range)?;

        tracing::debug!(
            samples = points.len(),
            x0 = x_range[0],
            x1 = x_range[1],
            y0 = y_range[0],
            y1 = y_range[1],
            "curve rendered"
        );

        self.base = Arc::new(BaseCurve {
            formula: formula.to_owned(),
            points,
        });
        self.baseline = viewport;
        self.viewport = viewport;
        Ok(viewport)
    }

    /// Re-center on a freshly loaded trace so the whole run is visible.
    pub fn fit_trace(&mut self, expr: &str, trace: &StepTrace) -> RootplayResult<Viewport> {
        let w = GraphWindow::for_trace(trace);
        self.render(expr, w.center, w.span)
    }

    pub(crate) fn fit_trace_parsed(
        &mut self,
        formula: &str,
        expr: Option<&Expression>,
        trace: &StepTrace,
    ) -> RootplayResult<Viewport> {
        let w = GraphWindow::for_trace(trace);
        self.render_parsed(formula, expr, w.center, w.span)
    }

    /// Persist a viewport chosen by the user (pan/zoom). The curve is not resampled.
    pub fn apply_user_zoom(&mut self, viewport: Viewport) {
        tracing::debug!(?viewport, "user zoom persisted");
        self.viewport = viewport;
    }

    /// Drop any user zoom and return to the last rendered baseline.
    pub fn reset_zoom(&mut self) -> Viewport {
        self.viewport = self.baseline;
        self.viewport
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn baseline(&self) -> Viewport {
        self.baseline
    }

    pub fn base_curve(&self) -> &Arc<BaseCurve> {
        &self.base
    }
}

/// Sample `expr` at `settings.samples` evenly spaced points (both ends included) and compute the
/// padded vertical range of the kept samples.
pub fn sample_curve(
    expr: Option<&Expression>,
    x_range: [f64; 2],
    settings: &CurveSettings,
) -> (Vec<Point>, [f64; 2]) {
    let n = settings.samples.max(2);
    let [x0, x1] = x_range;
    let step = (x1 - x0) / ((n - 1) as f64);

    let points: Vec<Point> = match expr {
        Some(expr) => (0..n)
            .filter_map(|i| {
                let x = if i == n - 1 { x1 } else { x0 + step * (i as f64) };
                let y = expr.sample(x)?;
                (y.abs() < settings.clamp_abs).then_some(Point::new(x, y))
            })
            .collect(),
        None => Vec::new(),
    };

    if points.is_empty() {
        return (points, settings.fallback_y);
    }

    let (min_y, max_y) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let pad = ((max_y - min_y) * 0.1).max(0.1);
    (points, [min_y - pad, max_y + pad])
}

#[cfg(test)]
#[path = "../../tests/unit/curve/renderer.rs"]
mod tests;

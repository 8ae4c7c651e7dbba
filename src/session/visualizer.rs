use std::time::Duration;

use crate::{
    client::{
        form::FormInput,
        request::CalculationRequest,
        response::{ResultSummary, decode_response},
        sequencer::{RequestSequencer, RequestTicket},
        transport::{Transport, TransportResponse},
    },
    config::settings::Settings,
    curve::{renderer::CurveRenderer, window::GraphWindow},
    expression::Expression,
    foundation::{
        core::Viewport,
        error::{RootplayError, RootplayResult},
    },
    overlay::{shape::Overlay, step::StepRenderer},
    playback::{
        controller::{Controls, PlaybackController, PlaybackState},
        debounce::Debouncer,
        schedule::{Scheduler, TaskKind, VirtualScheduler},
    },
    session::surface::{ChartFrame, ChartSurface, Notice},
    trace::step::{MethodKind, StepTrace},
};

/// A submitted request waiting for its response.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: CalculationRequest,
}

/// The whole visualizer: form state, curve, playback, and the surface it draws on.
///
/// Single-threaded. Time only moves through [`advance`](Self::advance), which fires due
/// autoplay ticks and debounced redraws one at a time.
pub struct Visualizer<S: ChartSurface> {
    settings: Settings,
    surface: S,
    curve: CurveRenderer,
    controller: PlaybackController,
    debouncer: Debouncer,
    sequencer: RequestSequencer,
    scheduler: VirtualScheduler,
    form: FormInput,
    method: MethodKind,
    expr: Option<Expression>,
    result: Option<ResultSummary>,
}

impl<S: ChartSurface> Visualizer<S> {
    pub fn new(settings: Settings, surface: S) -> RootplayResult<Self> {
        settings.validate()?;
        let form = FormInput {
            precision: settings.input.precision,
            ..FormInput::default()
        };
        Ok(Self {
            curve: CurveRenderer::new(settings.curve.clone()),
            controller: PlaybackController::new(settings.tick_period()),
            debouncer: Debouncer::new(settings.debounce_window()),
            sequencer: RequestSequencer::new(),
            scheduler: VirtualScheduler::new(),
            form,
            method: MethodKind::Bisection,
            expr: None,
            result: None,
            settings,
            surface,
        })
    }

    /// Draw the curve for the current inputs now, superseding any pending debounced redraw.
    pub fn init(&mut self) {
        self.debouncer.cancel(&mut self.scheduler);
        self.redraw_curve();
    }

    pub fn edit_formula(&mut self, formula: impl Into<String>) {
        self.form.formula = formula.into();
        self.expr = Expression::parse(&self.form.formula).ok();
        self.debouncer.touch(&mut self.scheduler);
    }

    pub fn edit_bounds(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.form.a = a.into();
        self.form.b = b.into();
        self.debouncer.touch(&mut self.scheduler);
    }

    pub fn edit_initial_guess(&mut self, x0: impl Into<String>) {
        self.form.x0 = x0.into();
        self.debouncer.touch(&mut self.scheduler);
    }

    /// Precision only affects the next request; nothing is redrawn.
    pub fn set_precision(&mut self, precision: u32) {
        self.form.precision = precision;
    }

    /// Switch method and redraw immediately, dropping any pending debounced redraw.
    pub fn select_method(&mut self, method: MethodKind) {
        self.method = method;
        self.debouncer.cancel(&mut self.scheduler);
        self.redraw_curve();
    }

    /// Validate the form and claim a request ticket.
    ///
    /// Validation failures and [`RootplayError::Busy`] are also reported to the surface.
    pub fn submit(&mut self) -> RootplayResult<PendingRequest> {
        let built = CalculationRequest::from_form(&self.settings.input.task, self.method, &self.form)
            .and_then(|request| Ok((self.sequencer.begin()?, request)));
        match built {
            Ok((ticket, request)) => {
                tracing::info!(seq = ticket.seq(), path = %request.path(), "calculation submitted");
                Ok(PendingRequest { ticket, request })
            }
            Err(err) => {
                self.surface.notify(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Apply the response to a submitted request.
    ///
    /// Stale responses are dropped without touching any state. Any failure leaves the loaded
    /// trace and playback state exactly as they were.
    #[tracing::instrument(skip_all, fields(seq = pending.ticket.seq()))]
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        response: RootplayResult<TransportResponse>,
    ) -> RootplayResult<()> {
        self.sequencer.finish(pending.ticket)?;

        let decoded = response.and_then(|r| decode_response(pending.request.method, r.status, &r.body));
        let result = match decoded {
            Ok(result) => result,
            Err(err) => {
                let message = match &err {
                    RootplayError::EmptyTrace => err.to_string(),
                    other => format!("calculation failed: {other}"),
                };
                tracing::info!(%message, "calculation produced no trace");
                self.surface.notify(Notice::Error(message));
                return Err(err);
            }
        };

        let summary = result.summary();
        tracing::info!(
            root = %summary.root,
            iterations = summary.iterations,
            steps = summary.steps,
            "calculation loaded"
        );

        // The trace fit supersedes any redraw still queued from edits made before submitting.
        self.debouncer.cancel(&mut self.scheduler);
        let formula = pending.request.formula.as_str();
        let parsed = Expression::parse(formula).ok();
        if let Err(err) = self.curve.fit_trace_parsed(formula, parsed.as_ref(), &result.trace) {
            self.surface.notify(Notice::Error(err.to_string()));
        }
        self.controller.load_trace(result.trace, &mut self.scheduler);
        self.result = Some(summary);
        self.compose();
        Ok(())
    }

    /// Submit, post through `transport`, and resolve in one go.
    pub fn calculate_with(&mut self, transport: &mut dyn Transport) -> RootplayResult<()> {
        let pending = self.submit()?;
        let response = pending
            .request
            .body()
            .and_then(|body| transport.post_json(&pending.request.path(), &body));
        self.resolve(pending, response)
    }

    /// Supersede the outstanding request so a new one can be submitted.
    pub fn abandon_pending(&mut self) -> Option<RequestTicket> {
        let ticket = self.sequencer.abandon();
        if let Some(t) = ticket {
            tracing::debug!(seq = t.seq(), "pending request abandoned");
        }
        ticket
    }

    pub fn next(&mut self) {
        if self.controller.next(&mut self.scheduler).is_some() {
            self.compose();
        }
    }

    pub fn prev(&mut self) {
        if self.controller.prev(&mut self.scheduler).is_some() {
            self.compose();
        }
    }

    pub fn toggle_play(&mut self) {
        if self.controller.toggle_play(&mut self.scheduler).is_some() {
            self.compose();
        }
    }

    pub fn seek(&mut self, index: usize) {
        if self.controller.seek(index, &mut self.scheduler).is_some() {
            self.compose();
        }
    }

    /// Let `dt` of time pass, firing everything that comes due in order.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(fired) = self.scheduler.pop_due(until) {
            match fired.kind {
                TaskKind::PlaybackTick => {
                    if self.controller.on_tick(fired.id, &mut self.scheduler).is_some() {
                        self.compose();
                    }
                }
                TaskKind::CurveRedraw => {
                    if self.debouncer.fire(fired.id) {
                        self.redraw_curve();
                    }
                }
            }
        }
        self.scheduler.advance_to(until);
    }

    /// Persist a user-chosen viewport and redraw at it.
    pub fn zoom(&mut self, viewport: Viewport) {
        self.curve.apply_user_zoom(viewport);
        self.compose();
    }

    pub fn reset_zoom(&mut self) {
        self.curve.reset_zoom();
        self.compose();
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn controls(&self) -> Controls {
        self.controller.controls()
    }

    pub fn trace(&self) -> Option<&StepTrace> {
        self.controller.trace()
    }

    pub fn viewport(&self) -> Viewport {
        self.curve.viewport()
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn method(&self) -> MethodKind {
        self.method
    }

    pub fn result(&self) -> Option<&ResultSummary> {
        self.result.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next scheduled task (tick or redraw) is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The frame that would be presented now, without presenting it.
    pub fn frame(&self) -> ChartFrame {
        let viewport = self.curve.viewport();
        let (overlay, label) = match self.controller.trace() {
            Some(trace) => (
                StepRenderer::render_step_with(
                    self.controller.state().index,
                    trace,
                    self.method,
                    self.expr.as_ref(),
                    &viewport,
                ),
                Some(self.controller.controls().counter),
            ),
            None => (Overlay::default(), None),
        };
        ChartFrame {
            viewport,
            base: self.curve.base_curve().clone(),
            overlay,
            label,
        }
    }

    fn redraw_curve(&mut self) {
        let window = GraphWindow::for_inputs(self.method, &self.form.a, &self.form.b, &self.form.x0);
        match self
            .curve
            .render_parsed(&self.form.formula, self.expr.as_ref(), window.center, window.span)
        {
            Ok(_) => self.compose(),
            Err(err) => self.surface.notify(Notice::Error(err.to_string())),
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn compose(&mut self) {
        let frame = self.frame();
        self.surface.present(frame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/visualizer.rs"]
mod tests;

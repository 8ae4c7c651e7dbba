//! rootplay replays root-finding solver runs one step at a time over the function's curve.
//!
//! A run (bisection, Newton, or simple iteration) arrives from the solver service as a list of
//! steps. The crate turns it into a [`StepTrace`], samples the formula into a [`BaseCurve`],
//! and lets a [`PlaybackController`] walk the trace manually or on a timer:
//!
//! - Build a [`Visualizer`] over a [`ChartSurface`]
//! - Edit the form, [`Visualizer::calculate_with`] a [`Transport`]
//! - Navigate with `next`/`prev`/`toggle_play`, and let time pass with [`Visualizer::advance`]
//!
//! Every presented [`ChartFrame`] can be turned into SVG with [`frame_to_svg`] and rasterized
//! with a [`Rasterizer`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod client;
pub(crate) mod config;
pub(crate) mod curve;
/// Formula parsing and evaluation.
pub mod expression;
pub(crate) mod overlay;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod trace;

pub use crate::foundation::core::{Affine, BezPath, Line, Point, Viewport};
pub use crate::foundation::error::{RootplayError, RootplayResult};

pub use crate::client::form::FormInput;
pub use crate::client::request::CalculationRequest;
pub use crate::client::response::{CalculationResult, ResultSummary, decode_response};
pub use crate::client::sequencer::{RequestSequencer, RequestTicket};
pub use crate::client::transport::{
    RecordedRequest, ReplayTransport, Transport, TransportResponse,
};
pub use crate::config::settings::{
    ChartSettings, CurveSettings, InputSettings, Palette, PlaybackSettings, Settings,
};
pub use crate::curve::renderer::{BaseCurve, CurveRenderer, sample_curve};
pub use crate::curve::window::GraphWindow;
pub use crate::expression::{ExprError, Expression, evaluate};
pub use crate::overlay::shape::{Dash, Overlay, OverlayShape, ShapeRole};
pub use crate::overlay::step::StepRenderer;
pub use crate::playback::controller::{
    Controls, PlaybackController, PlaybackState, PlaybackStatus,
};
pub use crate::playback::debounce::Debouncer;
pub use crate::playback::schedule::{Fired, Scheduler, TaskId, TaskKind, VirtualScheduler};
pub use crate::render::raster::{FrameRGBA, Rasterizer, rasterize_svg, write_png};
pub use crate::render::svg::frame_to_svg;
pub use crate::session::surface::{ChartFrame, ChartSurface, Notice, RecordingSurface};
pub use crate::session::visualizer::{PendingRequest, Visualizer};
pub use crate::trace::step::{MethodKind, Step, StepTrace};
pub use crate::trace::wire::parse_steps;

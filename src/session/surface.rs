use std::sync::Arc;

use crate::{curve::renderer::BaseCurve, foundation::core::Viewport, overlay::shape::Overlay};

/// One composed chart: the shared base curve plus the current step's overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartFrame {
    pub viewport: Viewport,
    pub base: Arc<BaseCurve>,
    pub overlay: Overlay,
    /// Step counter, `"current / total"`, when a trace is loaded.
    pub label: Option<String>,
}

/// User-facing messages. Failures reach the user through these, never as panics.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(m) => m,
        }
    }
}

/// Where composed frames and notices go.
pub trait ChartSurface {
    fn present(&mut self, frame: ChartFrame);
    fn notify(&mut self, notice: Notice);
}

/// Surface that keeps everything it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<ChartFrame>,
    pub notices: Vec<Notice>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.frames.last()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl ChartSurface for RecordingSurface {
    fn present(&mut self, frame: ChartFrame) {
        self.frames.push(frame);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<S: ChartSurface + ?Sized> ChartSurface for &mut S {
    fn present(&mut self, frame: ChartFrame) {
        (**self).present(frame);
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}

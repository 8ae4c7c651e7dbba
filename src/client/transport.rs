use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::RootplayResult;

/// Raw answer from the solver service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// How requests reach the solver service.
///
/// Errors are transport failures (no answer at all). A service-side failure is a successful
/// transport call with a non-2xx status.
pub trait Transport {
    fn post_json(&mut self, path: &str, body: &str) -> RootplayResult<TransportResponse>;
}

/// A request a [`ReplayTransport`] has seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
}

/// Answers every request with one recorded response.
#[derive(Clone, Debug)]
pub struct ReplayTransport {
    response: TransportResponse,
    requests: Vec<RecordedRequest>,
}

impl ReplayTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: TransportResponse {
                status,
                body: body.into(),
            },
            requests: Vec::new(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Load a recording.
    ///
    /// The file is either a bare success body, or an envelope `{"status": 400, "body": {...}}`
    /// for replaying failures.
    pub fn from_path(path: &Path) -> RootplayResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read recorded response '{}'", path.display()))?;
        Self::from_recording(&text)
    }

    pub fn from_recording(text: &str) -> RootplayResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let status = value
            .get("status")
            .and_then(serde_json::Value::as_u64)
            .and_then(|s| u16::try_from(s).ok());
        match (status, value.get("body")) {
            (Some(status), Some(body)) => {
                let body = match body {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Ok(Self::new(status, body))
            }
            _ => Ok(Self::ok(text)),
        }
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }
}

impl Transport for ReplayTransport {
    fn post_json(&mut self, path: &str, body: &str) -> RootplayResult<TransportResponse> {
        tracing::debug!(path, status = self.response.status, "replaying recorded response");
        self.requests.push(RecordedRequest {
            path: path.to_owned(),
            body: body.to_owned(),
        });
        Ok(self.response.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/transport.rs"]
mod tests;

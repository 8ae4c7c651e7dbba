/// Convenience result type used across rootplay.
pub type RootplayResult<T> = Result<T, RootplayError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum RootplayError {
    /// Invalid user input, settings, or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A formula failed to parse.
    #[error("expression error: {0}")]
    Expression(String),

    /// The solver service answered with a failure; the message is the server's, verbatim.
    #[error("{0}")]
    Service(String),

    /// A calculation succeeded but produced no steps.
    #[error("no steps produced")]
    EmptyTrace,

    /// A response arrived for a request that is no longer current.
    #[error("stale response for request #{0}")]
    StaleResponse(u64),

    /// A calculation request is already outstanding.
    #[error("a calculation request is already in flight")]
    Busy,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RootplayError {
    /// Build a [`RootplayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RootplayError::Expression`] value.
    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    /// Build a [`RootplayError::Service`] value.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Build a [`RootplayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RootplayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

//! Failures the synthesizer resolves into error payloads.

use crate::http::StatusCode;
use crate::synth::payload::ErrorPayload;
use thiserror::Error;

/// Every way a request can fail inside the core.
///
/// None of these escape [`synthesize`](crate::synth::synthesize); each is
/// turned into an [`ErrorPayload`] with the matching status.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("HTTP method {0} is not supported")]
    MethodNotAllowed(String),

    #[error("failed to serialize response payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SynthError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            SynthError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SynthError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short title placed in the `error` field.
    pub fn title(&self) -> &'static str {
        match self {
            SynthError::MethodNotAllowed(_) => "Method Not Allowed",
            SynthError::Serialization(_) => "Internal Server Error",
        }
    }

    /// Detail shown to the caller. Serialization internals are not exposed.
    pub fn detail(&self) -> String {
        match self {
            SynthError::MethodNotAllowed(_) => self.to_string(),
            SynthError::Serialization(_) => "Failed to process request".to_string(),
        }
    }
}

impl From<&SynthError> for ErrorPayload {
    fn from(err: &SynthError) -> Self {
        ErrorPayload {
            error: err.title().to_string(),
            message: err.detail(),
            status: err.status().0,
        }
    }
}

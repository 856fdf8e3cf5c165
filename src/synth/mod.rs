//! Response synthesis: method dispatch, CORS handling and JSON payloads.

pub mod error;
pub mod payload;
mod synthesizer;

pub use error::SynthError;
pub use payload::{ErrorPayload, SuccessPayload};
pub use synthesizer::{
    cors_headers, synthesize, Outcome, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS,
    CORS_ALLOW_ORIGIN,
};

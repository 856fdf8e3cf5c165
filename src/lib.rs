//! # reqecho - request echo adapter
//!
//! `reqecho` answers HTTP-style requests with a JSON description of what it
//! received. Requests arrive either on a local HTTP listener or as
//! load-balancer target group events delivered by a serverless runtime; both
//! are normalized into one [`CanonicalRequest`] and answered by the same
//! synthesizer.
//!
//! ## Architecture
//!
//! ```text
//!  hyper Request ──┐                                  ┌──> hyper Response
//!                  ├─> CanonicalRequest ─> synthesize ┤
//!  ALB event ──────┘        (adapters)      (core)    └──> ALB response
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use reqecho::prelude::*;
//!
//! let request = CanonicalRequest::new("POST", "/items").body(r#"{"a":1}"#);
//! let response = synthesize(request);
//!
//! assert_eq!(response.status, StatusCode::CREATED);
//! assert_eq!(
//!     response.get_header("Access-Control-Allow-Origin"),
//!     Some(&"*".to_string())
//! );
//! ```
//!
//! ## Outcomes
//!
//! - `OPTIONS` is answered as a CORS preflight before method dispatch.
//! - `GET`, `PUT`, `DELETE` and `PATCH` answer 200, `POST` answers 201.
//! - Any other method answers 405 with an error payload.
//! - A payload that cannot be encoded answers 500.
//!
//! Every response carries the same four CORS headers.

pub mod http;
pub mod runtime;
pub mod synth;
pub mod transport;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{CanonicalRequest, CanonicalResponse, Method, StatusCode};
    pub use crate::runtime::{AdapterConfig, EventRunner, HttpServer, RunMode};
    pub use crate::synth::{synthesize, ErrorPayload, SuccessPayload, SynthError};
    pub use crate::transport::{AlbTargetGroupRequest, AlbTargetGroupResponse};
}

// Re-export for convenience
pub use http::{CanonicalRequest, CanonicalResponse};
pub use runtime::{AdapterConfig, EventRunner, HttpServer, RunMode};
pub use synth::synthesize;

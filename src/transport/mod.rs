//! Request adapters and responders, one pair per transport.
//!
//! Both adapters collapse multi-valued headers and query parameters to the
//! first value in the transport's own order, so the same logical request
//! yields the same [`CanonicalRequest`](crate::http::CanonicalRequest)
//! whichever way it arrives.

pub mod direct;
pub mod event;
pub mod headers;

pub use aws_lambda_events::alb::{AlbTargetGroupRequest, AlbTargetGroupResponse};
pub use direct::{adapt_request, into_http_response};
pub use event::into_alb_response;

//! Canonical request and response models shared by every transport.

mod request;
mod response;

pub use request::{decode_component, decode_path, parse_query, CanonicalRequest, Method};
pub use response::{CanonicalResponse, StatusCode};

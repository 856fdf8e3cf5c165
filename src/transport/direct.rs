//! Direct HTTP transport: hyper requests in, hyper responses out.

use crate::http::{decode_path, parse_query, CanonicalRequest, CanonicalResponse};
use crate::transport::headers::{first_header_values, to_header_map};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::{Request, Response};
use tracing::warn;

/// Convert a hyper request into a [`CanonicalRequest`].
///
/// Multi-valued headers and query parameters collapse to their first value
/// in wire order. The path is percent-decoded. The body is read eagerly up to
/// `max_body_bytes`; anything past the bound is dropped.
pub async fn adapt_request<B>(req: Request<B>, max_body_bytes: usize) -> CanonicalRequest
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();

    let query_params = parts.uri.query().map(parse_query).unwrap_or_default();
    let body = read_body_bounded(body, max_body_bytes).await;

    CanonicalRequest::new(parts.method.as_str(), decode_path(parts.uri.path()))
        .headers(first_header_values(&parts.headers))
        .query_params(query_params)
        .body(body)
}

/// Read at most `limit` bytes of `body`.
///
/// A read error ends the read early and keeps what arrived so far.
pub async fn read_body_bounded<B>(mut body: B, limit: usize) -> String
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    let mut buf: Vec<u8> = Vec::new();

    while let Some(frame) = body.frame().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                warn!("Error reading request body, keeping {} bytes: {}", buf.len(), err);
                break;
            }
        };

        // Trailers carry no payload.
        let Ok(data) = frame.into_data() else {
            continue;
        };

        let room = limit - buf.len();
        if data.len() > room {
            buf.extend_from_slice(&data[..room]);
            warn!("Request body exceeds {} bytes, truncating", limit);
            break;
        }
        buf.extend_from_slice(&data);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Write a [`CanonicalResponse`] as a hyper response.
///
/// Every header pair is copied as given. An out-of-range status falls back to
/// 500.
pub fn into_http_response(response: CanonicalResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut http_response = Response::new(Full::new(Bytes::from(response.body)));
    *http_response.status_mut() = status;
    *http_response.headers_mut() = to_header_map(response.headers);

    http_response
}

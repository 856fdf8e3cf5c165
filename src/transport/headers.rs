//! Header map conversions shared by both transports.

use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;
use std::collections::BTreeMap;
use tracing::warn;

/// One value per header name: the first one received.
///
/// Bytes that are not UTF-8 are replaced lossily rather than dropping the
/// header.
pub fn first_header_values(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .filter_map(|name| {
            let value = headers.get(name)?;
            Some((
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ))
        })
        .collect()
}

/// Build a header map from name/value pairs, skipping pairs hyper rejects.
pub fn to_header_map(headers: BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            _ => warn!("Dropping invalid response header {}: {}", name, value),
        }
    }
    map
}

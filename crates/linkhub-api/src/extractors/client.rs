//! Client details extractor
//!
//! Captures the user agent and the client address for view recording.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use linkhub_service::ViewerInfo;

/// Address recorded when no proxy header names the client
pub const UNKNOWN_IP: &str = "unknown";

/// Resolve the client address: first `x-forwarded-for` entry, then
/// `x-real-ip`, else `"unknown"`
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

/// Viewer details taken from request headers
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ViewerInfo);

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        Ok(Self(ViewerInfo {
            user_agent,
            ip_address: client_ip(&parts.headers),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let map = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(client_ip(&map), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let map = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_ip(&map), "198.51.100.4");
    }

    #[test]
    fn test_unknown_without_proxy_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
        assert_eq!(client_ip(&headers(&[("x-forwarded-for", "")])), "unknown");
    }
}

//! API-key gate for MCP HTTP requests.
//!
//! The key is read from `x-api-key`, falling back to
//! `Authorization: Bearer <key>`. An empty allow-list admits nobody.

use std::collections::HashSet;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const API_KEY_HEADER: &str = "x-api-key";

/// The set of accepted API keys.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys(HashSet<String>);

impl ApiKeys {
    /// Builds the allow-list, dropping blank entries.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            keys.into_iter()
                .map(|k| {
                    let k: String = k.into();
                    k.trim().to_string()
                })
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// True when no key is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Neither header carried a key.
    Missing,
    /// The key is not in the allow-list.
    Invalid,
}

impl AuthRejection {
    fn detail(self) -> &'static str {
        match self {
            Self::Missing => "Missing API key. Use x-api-key header or Authorization: Bearer <key>",
            Self::Invalid => "Invalid API key",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, Json(json!({"detail": self.detail()}))).into_response()
    }
}

fn provided_key(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty());
    from_header.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
            .filter(|k| !k.is_empty())
    })
}

/// Checks the request headers against the allow-list.
///
/// # Errors
///
/// Returns the rejection to send back with `403 Forbidden`.
pub fn authorize(headers: &HeaderMap, keys: &ApiKeys) -> Result<(), AuthRejection> {
    let key = provided_key(headers).ok_or(AuthRejection::Missing)?;
    if keys.contains(key) {
        Ok(())
    } else {
        Err(AuthRejection::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> ApiKeys {
        ApiKeys::new(["alpha", " beta ", ""])
    }

    #[test]
    fn x_api_key_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("alpha"));
        assert!(authorize(&headers, &keys()).is_ok());
    }

    #[test]
    fn bearer_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer beta"));
        assert!(authorize(&headers, &keys()).is_ok());
    }

    #[test]
    fn x_api_key_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("nope"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer alpha"));
        assert_eq!(authorize(&headers, &keys()), Err(AuthRejection::Invalid));
    }

    #[test]
    fn missing_key() {
        assert_eq!(
            authorize(&HeaderMap::new(), &keys()),
            Err(AuthRejection::Missing)
        );
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("alpha"));
        let empty = ApiKeys::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(authorize(&headers, &empty), Err(AuthRejection::Invalid));
    }

    #[test]
    fn blank_entries_dropped() {
        assert_eq!(keys().0.len(), 2);
    }
}

//! Master-key authorization tokens for the Cosmos DB REST API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors building an authorization token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The account key is not valid base64.
    #[error("account key is not valid base64: {0}")]
    InvalidKey(String),
}

/// A decoded account master key.
#[derive(Clone)]
pub struct MasterKey(Vec<u8>);

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

impl MasterKey {
    /// Decodes the base64 key shown in the Azure portal.
    pub fn from_base64(key: &str) -> Result<Self, AuthError> {
        STANDARD
            .decode(key.trim())
            .map(Self)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    /// Builds the URL-encoded `authorization` header value for one request.
    pub fn authorization(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String, AuthError> {
        let payload = string_to_sign(verb, resource_type, resource_link, date);
        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());
        let sig = STANDARD.encode(mac.finalize().into_bytes());
        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={sig}")).into_owned())
    }
}

/// The exact text that gets signed.
pub(crate) fn string_to_sign(
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    )
}

/// Formats a timestamp the way the `x-ms-date` header expects (RFC 1123).
pub fn rfc1123(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

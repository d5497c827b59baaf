//! Lightweight client-side helper for calling a rehash service from
//! integration tests and other Rust callers.
//!
//! Only the JSON envelope is spoken here; it is the service's documented
//! wire format.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::REHASH_BYTES;

/// Errors emitted by the client helper.
#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Status(u16, String),
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(err) => write!(f, "http error: {err}"),
            ClientError::Status(code, body) => {
                write!(f, "server rejected request ({code}): {body}")
            }
            ClientError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Http(value)
    }
}

#[derive(Debug, Deserialize)]
struct RehashEnvelope {
    rehash: String,
}

/// POST the input bytes to the service root and return the 32-byte rehash.
pub async fn rehash_remote(
    base_url: &str,
    input: &[u8],
) -> Result<[u8; REHASH_BYTES], ClientError> {
    let normalized = base_url.trim_end_matches('/');
    let url = format!("{normalized}/");
    let response = Client::new()
        .post(&url)
        .json(&json!({ "hash": STANDARD.encode(input) }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status(
            status.as_u16(),
            body.trim_end().to_string(),
        ));
    }

    let envelope: RehashEnvelope = response.json().await?;
    let decoded = STANDARD
        .decode(&envelope.rehash)
        .map_err(|err| ClientError::Decode(err.to_string()))?;
    decoded
        .try_into()
        .map_err(|_| ClientError::Decode("rehash is not 32 bytes".into()))
}

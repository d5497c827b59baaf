//! Request/response codecs for the rehash endpoint.
//!
//! The handler is written once; an injected [`WireFormat`] decides how input
//! bytes arrive in a request body and how the rehashed bytes go back out.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use thiserror::Error;

use crate::REHASH_BYTES;

/// Decode failures for a request body. All of these map to a 400 response.
#[derive(Debug, Error)]
pub enum WireError {
    /// The request envelope failed to parse.
    #[error("error decoding hash json: {0}")]
    Envelope(String),
    /// The hash value was not standard base64.
    #[error("input hash base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A request/response codec for the rehash endpoint.
pub trait WireFormat: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;
    /// Extract the raw input bytes from a request body.
    fn decode_request(&self, body: &[u8]) -> Result<Vec<u8>, WireError>;
    /// Render the rehashed bytes as a body plus its content type.
    fn encode_response(&self, rehash: &[u8; REHASH_BYTES]) -> (&'static str, String);
}

/// JSON envelope codec, the service's documented format: requests carry
/// `{"hash": "<base64>"}` and responses carry `{"rehash": "<base64>"}`.
/// An absent or null `hash` field reads as empty input, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWire;

#[derive(Debug, Deserialize)]
struct HashEnvelope {
    hash: Option<String>,
}

impl WireFormat for JsonWire {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode_request(&self, body: &[u8]) -> Result<Vec<u8>, WireError> {
        let envelope: HashEnvelope =
            serde_json::from_slice(body).map_err(|err| WireError::Envelope(err.to_string()))?;
        Ok(STANDARD.decode(envelope.hash.unwrap_or_default())?)
    }

    fn encode_response(&self, rehash: &[u8; REHASH_BYTES]) -> (&'static str, String) {
        let envelope = serde_json::json!({ "rehash": STANDARD.encode(rehash) });
        ("application/json", format!("{envelope}\n"))
    }
}

/// Bare codec for callers that predate the JSON envelope: the request body is
/// the base64 text itself and the response is a base64 line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawWire;

impl WireFormat for RawWire {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn decode_request(&self, body: &[u8]) -> Result<Vec<u8>, WireError> {
        // Tolerate the newline shells append; interior whitespace still fails.
        Ok(STANDARD.decode(body.trim_ascii())?)
    }

    fn encode_response(&self, rehash: &[u8; REHASH_BYTES]) -> (&'static str, String) {
        (
            "text/plain; charset=utf-8",
            format!("{}\n", STANDARD.encode(rehash)),
        )
    }
}

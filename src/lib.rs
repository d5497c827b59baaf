#![forbid(unsafe_code)]

//! Core of the rehash service: secret key handling plus the keyed transform.
//!
//! The service holds one 32-byte secret, loaded from disk at startup, and
//! answers each request with PBKDF2-HMAC-SHA256 over the caller's input,
//! salted with that secret. A single iteration, always: the transform is a
//! keyed pseudorandom function, not password stretching.

pub mod client;
pub mod server;

pub use client::{ClientError, rehash_remote};
pub use server::wire::{JsonWire, RawWire, WireError, WireFormat};
pub use server::{ServerState, build_router, run_server};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

/// Bytes in the server secret key.
pub const KEY_BYTES: usize = 32;
/// Hex characters consumed from the front of the key file.
pub const KEY_HEX_CHARS: usize = 2 * KEY_BYTES;
/// Bytes in every rehash output.
pub const REHASH_BYTES: usize = 32;
/// PBKDF2 iteration count. Exactly one: every stored rehash depends on this
/// count staying fixed.
pub const PBKDF2_ROUNDS: u32 = 1;
/// Where the production daemon reads its key from.
pub const DEFAULT_KEY_PATH: &str = "/etc/rehash.key";
/// Fixed listen address of the production daemon.
pub const LISTEN_ADDR: &str = "0.0.0.0:8888";

/// Zeroized secret key material shared read-only across request workers.
#[derive(Clone)]
pub struct SecretKey {
    inner: Arc<Zeroizing<[u8; KEY_BYTES]>>,
}

impl SecretKey {
    pub fn new(bytes: [u8; KEY_BYTES]) -> Self {
        Self {
            inner: Arc::new(Zeroizing::new(bytes)),
        }
    }

    pub fn from_raw(bytes: Zeroizing<[u8; KEY_BYTES]>) -> Self {
        Self {
            inner: Arc::new(bytes),
        }
    }

    /// Exposes the key bytes for the PBKDF2 call. Callers must never log,
    /// serialize, or copy the returned bytes outside the transform.
    pub(crate) fn expose(&self) -> &[u8; KEY_BYTES] {
        &self.inner
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Failures while reading the key file. All are fatal at startup; the daemon
/// never serves without a valid key.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    /// The file could not be read at all.
    #[error("key file unreadable: {0}")]
    Unreadable(#[from] std::io::Error),
    /// Fewer bytes present than one hex-encoded key.
    #[error("key file too short: {0} bytes, need 64 hex characters")]
    TooShort(usize),
    /// The leading 64 bytes are not valid hex.
    #[error("key file is not hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Read the secret key from `path`.
///
/// The first [`KEY_HEX_CHARS`] bytes of the file are decoded as hex (either
/// case); anything after them, such as a trailing newline, is ignored.
pub fn load_key_file(path: impl AsRef<Path>) -> Result<SecretKey, KeyLoadError> {
    let raw = std::fs::read(path)?;
    if raw.len() < KEY_HEX_CHARS {
        return Err(KeyLoadError::TooShort(raw.len()));
    }
    let decoded = Zeroizing::new(hex::decode(&raw[..KEY_HEX_CHARS])?);
    let mut bytes = Zeroizing::new([0u8; KEY_BYTES]);
    bytes.copy_from_slice(&decoded);
    Ok(SecretKey::from_raw(bytes))
}

/// Apply the keyed transform: PBKDF2-HMAC-SHA256 with the caller's input as
/// the password and the server key as the salt.
pub fn rehash(key: &SecretKey, input: &[u8]) -> [u8; REHASH_BYTES] {
    let mut out = [0u8; REHASH_BYTES];
    pbkdf2_hmac::<Sha256>(input, key.expose(), PBKDF2_ROUNDS, &mut out);
    out
}

//! Session secret generation
//!
//! Tokens are raw bytes from the operating system's CSPRNG encoded with the
//! URL-safe base64 alphabet (`A-Z a-z 0-9 - _`) and no padding.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

use crate::error::SecretError;

/// Random bytes drawn when no length is given.
pub const DEFAULT_SECRET_BYTES: usize = 50;

/// Generate a URL-safe token from `length` random bytes.
///
/// The token is `ceil(4 * length / 3)` characters long.
pub fn generate_secret(length: usize) -> Result<String, SecretError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SecretError::Entropy(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}

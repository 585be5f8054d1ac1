//! Compact token codec for store identifiers.
//!
//! The store's native key is 12 opaque bytes; the UI and URLs carry a 16
//! character URL-safe base64 token (`-` and `_` standing in for the two
//! characters that would need percent-encoding in a path segment). Encoding
//! is lossless and both directions reject malformed input outright.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

/// Byte width of a store identifier.
pub const ID_LEN: usize = 12;
/// Character length of a compact token. 12 bytes encode to exactly 16
/// base64 characters, so no padding is involved.
pub const TOKEN_LEN: usize = 16;

/// Error from the token codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The identifier is not exactly [`ID_LEN`] bytes.
    #[error("identifier must be {ID_LEN} bytes, got {0}")]
    InvalidIdentifierLength(usize),
    /// The token is not exactly [`TOKEN_LEN`] characters.
    #[error("token must be {TOKEN_LEN} characters, got {0}")]
    InvalidTokenLength(usize),
    /// The token contains a character outside the URL-safe base64 alphabet,
    /// or is not a canonical encoding of any identifier.
    #[error("token is not valid URL-safe base64")]
    InvalidTokenAlphabet,
}

/// A store-issued identifier: [`ID_LEN`] opaque bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoredId([u8; ID_LEN]);

impl StoredId {
    /// Wrap raw identifier bytes, validating the length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        let bytes: [u8; ID_LEN] = bytes
            .try_into()
            .map_err(|_| TokenError::InvalidIdentifierLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl From<[u8; ID_LEN]> for StoredId {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

/// Encode identifier bytes as a compact URL-safe token.
///
/// Fails with [`TokenError::InvalidIdentifierLength`] unless `id` is exactly
/// [`ID_LEN`] bytes.
pub fn encode(id: &[u8]) -> Result<String, TokenError> {
    if id.len() != ID_LEN {
        return Err(TokenError::InvalidIdentifierLength(id.len()));
    }
    Ok(URL_SAFE_NO_PAD.encode(id))
}

/// Decode a compact token back into the identifier it was derived from.
///
/// Fails with [`TokenError::InvalidTokenLength`] unless the token is exactly
/// [`TOKEN_LEN`] characters, and with [`TokenError::InvalidTokenAlphabet`]
/// for any character outside the URL-safe alphabet. Never returns a partial
/// identifier.
pub fn decode(token: &str) -> Result<StoredId, TokenError> {
    // The alphabet is ASCII, so byte length and character count agree for
    // every token this check lets through.
    if token.len() != TOKEN_LEN {
        return Err(TokenError::InvalidTokenLength(token.len()));
    }
    // Length is already validated, so the only way decoding can fail is a
    // byte outside the alphabet.
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| TokenError::InvalidTokenAlphabet)?;
    StoredId::from_bytes(&bytes)
}

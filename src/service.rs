//! Publish and fetch operations, as consumed by the transport collaborator.
//!
//! The HTTP layer is an external collaborator; what it needs from the core
//! is "submit a tape, get a token" and "resolve a token, get the tape", with
//! a malformed token, an absent recording, and a store fault kept apart so
//! it can answer each one differently.

use thiserror::Error;

use crate::store::{StoreError, TapeStore};
use crate::tape::Tape;
use crate::token::{self, TokenError};

/// Error publishing a new tape.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The store issued an identifier the codec cannot represent.
    #[error("store issued an unencodable identifier: {0}")]
    Token(#[from] TokenError),
}

/// Error fetching a tape by token.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The token is malformed. A malformed token is indistinguishable in
    /// intent from an absent recording, so callers should answer it the way
    /// they answer [`FetchError::NotFound`], never as a fault.
    #[error("malformed recording token: {0}")]
    BadToken(#[from] TokenError),
    /// The token is well-formed but no tape is stored under it.
    #[error("no recording matches this token")]
    NotFound,
    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FetchError {
    /// True for the errors that must surface as "no such recording".
    pub fn is_not_found_equivalent(&self) -> bool {
        matches!(self, FetchError::BadToken(_) | FetchError::NotFound)
    }
}

/// Ties a tape store to the token codec.
///
/// Owns its store explicitly; callers thread a service value through instead
/// of reaching for process-wide wiring.
pub struct TapeService<S> {
    store: S,
}

impl<S: TapeStore> TapeService<S> {
    /// Build a service over a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a finalized tape and return the compact token referencing it.
    pub fn publish(&self, tape: Tape) -> Result<String, PublishError> {
        let id = self.store.save(tape)?;
        let token = token::encode(id.as_bytes())?;
        tracing::debug!(%token, "published tape");
        Ok(token)
    }

    /// Resolve a compact token to the stored tape.
    pub fn fetch(&self, token: &str) -> Result<Tape, FetchError> {
        let id = token::decode(token)?;
        self.store.load(&id)?.ok_or(FetchError::NotFound)
    }
}

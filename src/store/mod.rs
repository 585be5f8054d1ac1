//! Persistence collaborator interface.
//!
//! The real store lives outside this crate; the core only needs a place
//! that accepts a finalized tape, issues an identifier for it, and returns
//! the tape on lookup. [`MemoryStore`] stands in for tests and the demo
//! binary.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::tape::Tape;
use crate::token::StoredId;

/// Failure inside the persistence layer. Distinct from "not found", which
/// [`TapeStore::load`] reports as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Where finalized tapes live.
///
/// `save` hands ownership of the tape to the store and returns the
/// identifier the store assigned; the tape is an immutable value from then
/// on. `load` returns `Ok(None)` for an identifier no tape was stored under.
pub trait TapeStore: Send + Sync {
    /// Store a tape and return its assigned identifier.
    fn save(&self, tape: Tape) -> Result<StoredId, StoreError>;

    /// Look up a tape by identifier.
    fn load(&self, id: &StoredId) -> Result<Option<Tape>, StoreError>;
}

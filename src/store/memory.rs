//! In-memory tape store.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::store::{StoreError, TapeStore};
use crate::tape::Tape;
use crate::token::{StoredId, ID_LEN};

/// Keeps tapes in a map, issuing random identifiers.
///
/// Stand-in for the external persistence collaborator in tests and the demo
/// binary; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tapes: Mutex<HashMap<StoredId, Tape>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tapes.
    pub fn len(&self) -> usize {
        self.tapes.lock().len()
    }

    /// True if no tape has been stored.
    pub fn is_empty(&self) -> bool {
        self.tapes.lock().is_empty()
    }
}

impl TapeStore for MemoryStore {
    fn save(&self, tape: Tape) -> Result<StoredId, StoreError> {
        let mut tapes = self.tapes.lock();
        let id = loop {
            let candidate = StoredId::from(rand::random::<[u8; ID_LEN]>());
            if !tapes.contains_key(&candidate) {
                break candidate;
            }
        };
        tapes.insert(id, tape);
        tracing::debug!(stored = tapes.len(), "saved tape");
        Ok(id)
    }

    fn load(&self, id: &StoredId) -> Result<Option<Tape>, StoreError> {
        Ok(self.tapes.lock().get(id).cloned())
    }
}

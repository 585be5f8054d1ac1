//! Diff computation and patch application for tape entries.
//!
//! A patch is an opaque string: a JSON envelope holding the byte length and
//! FNV-1a hash of the base text it was computed against, plus the edit
//! operations produced by diffing the two states. Deleted text is carried
//! verbatim, so patches are reversible, and application verifies the base
//! fingerprint before mutating anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Error applying a patch to a base text.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The patch string is not a valid serialized patch envelope.
    #[error("malformed patch: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The base text is not the one the patch was computed against.
    #[error("patch was computed against a different base text")]
    Diverged,
    /// An edit operation falls outside the base text.
    #[error("patch does not match the base text at byte {offset}")]
    Mismatch { offset: usize },
    /// The edit operations stopped short of covering the whole base text.
    #[error("patch covers only {covered} bytes of a {base_len}-byte base")]
    Incomplete { covered: usize, base_len: usize },
}

/// A single edit operation within a patch.
///
/// `Keep` spans are stored as byte lengths; deleted text is stored verbatim
/// so the patch stays invertible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum PatchOp {
    Keep { len: usize },
    Delete { text: String },
    Insert { text: String },
}

/// The serialized form of a patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Patch {
    base_len: usize,
    base_hash: u64,
    ops: Vec<PatchOp>,
}

/// FNV-1a over the text's bytes. Fast and deterministic, not cryptographic;
/// it only guards replay against a diverged base.
fn text_hash(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in text.as_bytes() {
        hash = (hash ^ byte as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Compute the patch transforming `previous` into `current`.
///
/// Deterministic for identical inputs and total over arbitrary strings.
pub fn compute_patch(previous: &str, current: &str) -> String {
    let ops: Vec<PatchOp> = dissimilar::diff(previous, current)
        .into_iter()
        .map(|chunk| match chunk {
            dissimilar::Chunk::Equal(text) => PatchOp::Keep { len: text.len() },
            dissimilar::Chunk::Delete(text) => PatchOp::Delete {
                text: text.to_owned(),
            },
            dissimilar::Chunk::Insert(text) => PatchOp::Insert {
                text: text.to_owned(),
            },
        })
        .collect();
    let patch = Patch {
        base_len: previous.len(),
        base_hash: text_hash(previous),
        ops,
    };
    serde_json::to_string(&patch).expect("patch envelope serializes to JSON")
}

/// Apply a patch produced by [`compute_patch`] to `base`.
///
/// Returns the post-edit text, or a [`PatchError`] if the patch is malformed
/// or was computed against a different base. On error no partial result
/// escapes.
pub fn apply_patch(patch: &str, base: &str) -> Result<String, PatchError> {
    let patch: Patch = serde_json::from_str(patch)?;

    if patch.base_len != base.len() || patch.base_hash != text_hash(base) {
        return Err(PatchError::Diverged);
    }

    let mut out = String::with_capacity(base.len());
    let mut pos = 0usize;
    for op in &patch.ops {
        match op {
            PatchOp::Keep { len } => {
                let end = pos
                    .checked_add(*len)
                    .ok_or(PatchError::Mismatch { offset: pos })?;
                let kept = base
                    .get(pos..end)
                    .ok_or(PatchError::Mismatch { offset: pos })?;
                out.push_str(kept);
                pos = end;
            }
            PatchOp::Delete { text } => {
                let end = pos
                    .checked_add(text.len())
                    .ok_or(PatchError::Mismatch { offset: pos })?;
                match base.get(pos..end) {
                    Some(deleted) if deleted == text => pos = end,
                    _ => return Err(PatchError::Mismatch { offset: pos }),
                }
            }
            PatchOp::Insert { text } => out.push_str(text),
        }
    }

    if pos != base.len() {
        return Err(PatchError::Incomplete {
            covered: pos,
            base_len: base.len(),
        });
    }

    Ok(out)
}

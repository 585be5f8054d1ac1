//! Capture a stream of text edits as a time-indexed tape of reversible
//! patches, replay it at the original pace, and reference stored tapes
//! through compact URL-safe tokens.
//!
//! The pipeline runs capture -> store -> replay:
//! - [`tape`] diffs each observed text state against the previous one and
//!   logs the patch with its offset from the start of the recording
//! - [`store`] and [`service`] are the seam to the external persistence and
//!   transport collaborators
//! - [`token`] maps the store's fixed-width identifiers to URL-safe tokens
//! - [`playback`] replays a tape into a sink, one authoritative session at
//!   a time

pub mod cli;
pub mod playback;
pub mod service;
pub mod store;
pub mod tape;
pub mod token;

pub use playback::{
    MemorySink, PlaybackError, PlaybackHandle, PlaybackOutcome, PlaybackSession, PlaybackSink,
    Player, TickOutcome,
};
pub use service::{FetchError, PublishError, TapeService};
pub use store::{MemoryStore, StoreError, TapeStore};
pub use tape::{apply_patch, compute_patch, PatchError, Tape, TapeEntry, TapeRecorder};
pub use token::{StoredId, TokenError};

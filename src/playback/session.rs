//! One replay session: a generation-tagged drain over the remaining entries.

use std::collections::VecDeque;

use thiserror::Error;

use crate::playback::sink::PlaybackSink;
use crate::tape::{apply_patch, PatchError, TapeEntry};

/// Error that aborts a single replay session.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// An entry's patch could not be applied to the sink's current text.
    /// The recording cannot be reconstructed from this point on.
    #[error("recording could not be reconstructed: {0}")]
    Patch(#[from] PatchError),
}

/// What a tick left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Entries remain; the next one is due at `next_due_ms` after start.
    Running { next_due_ms: u64 },
    /// The tape is exhausted.
    Completed,
}

/// Ephemeral state for one replay: the remaining entries and the generation
/// that makes this session the authoritative one on its sink.
///
/// The session itself is clock-free; the driver supplies elapsed time on each
/// tick and is responsible for the generation check before calling in.
#[derive(Debug)]
pub struct PlaybackSession {
    generation: u64,
    remaining: VecDeque<TapeEntry>,
}

impl PlaybackSession {
    /// Build a session over `entries` tagged with `generation`.
    pub fn new(generation: u64, entries: Vec<TapeEntry>) -> Self {
        Self {
            generation,
            remaining: entries.into(),
        }
    }

    /// The generation this session was started as.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Entries not yet applied.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Apply every entry due at `elapsed_ms`, oldest first.
    ///
    /// Each patch is applied to the sink's current text; if the sink was
    /// scrolled to the bottom before a mutation it is re-scrolled after,
    /// otherwise the scroll position is left alone. A patch failure aborts
    /// the session without writing a partial state.
    pub fn tick<S: PlaybackSink + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        sink: &mut S,
    ) -> Result<TickOutcome, PlaybackError> {
        while self
            .remaining
            .front()
            .is_some_and(|entry| entry.time_ms <= elapsed_ms)
        {
            let Some(entry) = self.remaining.pop_front() else {
                break;
            };
            let follow = sink.is_scrolled_to_bottom();
            let next = apply_patch(&entry.patch, &sink.text())?;
            sink.set_text(&next);
            if follow {
                sink.scroll_to_bottom();
            }
        }

        Ok(match self.remaining.front() {
            Some(entry) => TickOutcome::Running {
                next_due_ms: entry.time_ms,
            },
            None => TickOutcome::Completed,
        })
    }
}

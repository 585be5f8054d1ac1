//! Turns a stream of raw text-change events into a tape.

use crate::tape::model::{Tape, TapeEntry};
use crate::tape::patch::compute_patch;

/// Accumulates timed edits during a recording session.
///
/// The capture source delivers `(current_text, now_ms)` on each observed
/// mutation; throttling granularity is its concern. The recorder diffs each
/// delivery against the previously recorded state, so calls with no net
/// change are ignored and never produce a degenerate entry.
#[derive(Debug, Default)]
pub struct TapeRecorder {
    previous: String,
    base_time_ms: Option<u64>,
    entries: Vec<TapeEntry>,
}

impl TapeRecorder {
    /// Create an empty recorder. The first recorded patch will be relative
    /// to the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the current text at `now_ms`.
    ///
    /// The first real change anchors the tape's time base and is recorded at
    /// offset 0; later changes are recorded at their offset from that base.
    /// Offsets saturate rather than go backwards if the caller's clock does.
    pub fn on_change(&mut self, current: &str, now_ms: u64) {
        if current == self.previous {
            return;
        }

        let time_ms = match self.base_time_ms {
            Some(base) => now_ms.saturating_sub(base),
            None => {
                self.base_time_ms = Some(now_ms);
                0
            }
        };

        let patch = compute_patch(&self.previous, current);
        tracing::trace!(time_ms, patch_len = patch.len(), "recorded tape entry");
        self.entries.push(TapeEntry { time_ms, patch });
        self.previous = current.to_owned();
    }

    /// Discard everything captured so far, including the time base. The next
    /// change starts a fresh tape at offset 0.
    pub fn reset(&mut self) {
        self.previous.clear();
        self.base_time_ms = None;
        self.entries.clear();
    }

    /// Number of entries captured so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the recorder and return the immutable captured tape.
    pub fn finalize(self, title: impl Into<String>) -> Tape {
        Tape {
            title: title.into(),
            entries: self.entries,
        }
    }
}

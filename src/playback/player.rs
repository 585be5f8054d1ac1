//! Drives replay sessions against a shared sink with real elapsed time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use crate::playback::session::{PlaybackSession, TickOutcome};
use crate::playback::sink::PlaybackSink;
use crate::tape::Tape;

/// How a replay session ended. All variants are equivalent from the outside:
/// the session has no further observable effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The tape was replayed to the end.
    Completed,
    /// A newer session was started on the same sink before this one
    /// finished; it stopped without further sink mutations.
    Superseded,
    /// An entry could not be applied; the session stopped, the sink and any
    /// later sessions are unaffected.
    Aborted,
}

/// Handle to a running replay session.
pub struct PlaybackHandle {
    generation: u64,
    task: JoinHandle<PlaybackOutcome>,
}

impl PlaybackHandle {
    /// The generation this session runs as.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the session to reach a terminal state.
    pub async fn wait(self) -> PlaybackOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(generation = self.generation, error = %err, "playback task failed");
                PlaybackOutcome::Aborted
            }
        }
    }
}

/// Replays tapes against one sink, one live session at a time.
///
/// Starting a session bumps the player's generation counter; every scheduled
/// tick of an older session re-checks the counter under the sink lock and
/// becomes a no-op once it is stale. That counter discipline is the only
/// cancellation mechanism: no tick of a superseded session ever mutates the
/// sink after a newer session has claimed it.
pub struct Player<S> {
    generation: Arc<AtomicU64>,
    sink: Arc<Mutex<S>>,
}

impl<S: PlaybackSink + Send + 'static> Player<S> {
    /// Create a player over a shared sink.
    pub fn new(sink: Arc<Mutex<S>>) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            sink,
        }
    }

    /// The sink this player replays into.
    pub fn sink(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.sink)
    }

    /// Start replaying `tape`, superseding any session previously started on
    /// this player. The sink's visible text is reset to empty before the
    /// first entry is applied.
    ///
    /// The session runs as a cooperative task that drains every entry whose
    /// offset has elapsed, then re-arms itself for the next due entry; entry
    /// `i` becomes visible no earlier than `time_ms[i]` after start.
    pub fn start(&self, tape: &Tape) -> PlaybackHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, entries = tape.entries.len(), "starting playback");

        {
            let mut sink = self.sink.lock();
            // A later start() may have claimed the sink in the meantime.
            if self.generation.load(Ordering::SeqCst) == generation {
                sink.set_text("");
            }
        }

        let mut session = PlaybackSession::new(generation, tape.entries.clone());
        let current = Arc::clone(&self.generation);
        let sink = Arc::clone(&self.sink);

        let task = tokio::spawn(async move {
            let started = Instant::now();
            loop {
                let outcome = {
                    let mut sink = sink.lock();
                    // Re-checked under the lock: once stale, this tick must
                    // not touch the sink at all.
                    if current.load(Ordering::SeqCst) != generation {
                        tracing::debug!(generation, "playback superseded");
                        return PlaybackOutcome::Superseded;
                    }
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    session.tick(elapsed_ms, &mut *sink)
                };

                match outcome {
                    Ok(TickOutcome::Completed) => {
                        tracing::debug!(generation, "playback completed");
                        return PlaybackOutcome::Completed;
                    }
                    Ok(TickOutcome::Running { next_due_ms }) => {
                        sleep_until(started + Duration::from_millis(next_due_ms)).await;
                    }
                    Err(err) => {
                        tracing::warn!(generation, error = %err, "playback aborted");
                        return PlaybackOutcome::Aborted;
                    }
                }
            }
        });

        PlaybackHandle { generation, task }
    }
}

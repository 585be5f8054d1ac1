//! Integration tests for the capture -> store -> replay pipeline

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use typetape::playback::{MemorySink, PlaybackOutcome, PlaybackSink, Player};
use typetape::service::TapeService;
use typetape::store::MemoryStore;
use typetape::tape::{Tape, TapeRecorder};

/// Capture a short typing session, publish it, resolve the token, and
/// replay the fetched tape to completion.
#[tokio::test(start_paused = true)]
async fn test_capture_publish_fetch_replay_pipeline() {
    let mut recorder = TapeRecorder::new();
    recorder.on_change("fn main() {", 1_000);
    recorder.on_change("fn main() {}\n", 1_500);
    recorder.on_change("fn main() {}\n// done\n", 2_200);
    let tape = recorder.finalize("hello.rs");

    let service = TapeService::new(MemoryStore::new());
    let token = service.publish(tape).expect("publish should succeed");
    let fetched = service.fetch(&token).expect("fetch should succeed");
    assert_eq!(fetched.title, "hello.rs");
    assert_eq!(fetched.entries.len(), 3);
    assert_eq!(fetched.entries[0].time_ms, 0);

    let sink = Arc::new(Mutex::new(MemorySink::new()));
    let player = Player::new(Arc::clone(&sink));
    let outcome = player.start(&fetched).wait().await;

    assert_eq!(outcome, PlaybackOutcome::Completed);
    assert_eq!(sink.lock().text(), "fn main() {}\n// done\n");
    // Reset to empty, then the three captured states in order.
    assert_eq!(
        sink.lock().history(),
        [
            "",
            "fn main() {",
            "fn main() {}\n",
            "fn main() {}\n// done\n"
        ]
    );
}

/// Entries recorded at 0ms, 500ms, and 1200ms become visible at those
/// offsets and never earlier.
#[tokio::test(start_paused = true)]
async fn test_replay_honors_recorded_offsets() {
    let mut recorder = TapeRecorder::new();
    recorder.on_change("a", 10_000);
    recorder.on_change("ab", 10_500);
    recorder.on_change("abc", 11_200);
    let tape = recorder.finalize("");

    let sink = Arc::new(Mutex::new(MemorySink::new()));
    let player = Player::new(Arc::clone(&sink));
    let handle = player.start(&tape);

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(sink.lock().text(), "a");

    tokio::time::sleep(Duration::from_millis(498)).await;
    assert_eq!(sink.lock().text(), "a", "second entry must not appear before 500ms");

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(sink.lock().text(), "ab");

    tokio::time::sleep(Duration::from_millis(698)).await;
    assert_eq!(sink.lock().text(), "ab", "third entry must not appear before 1200ms");

    assert_eq!(handle.wait().await, PlaybackOutcome::Completed);
    assert_eq!(sink.lock().text(), "abc");
}

/// Pressing play twice leaves only the second session's progression on the
/// sink.
#[tokio::test(start_paused = true)]
async fn test_restarted_playback_shows_only_the_new_session() {
    let mut recorder = TapeRecorder::new();
    recorder.on_change("first", 0);
    recorder.on_change("first second", 2_000);
    let tape = recorder.finalize("");

    let sink = Arc::new(Mutex::new(MemorySink::new()));
    let player = Player::new(Arc::clone(&sink));

    let first = player.start(&tape);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Play pressed again: same tape, new session.
    let second = player.start(&tape);
    assert_eq!(second.wait().await, PlaybackOutcome::Completed);
    assert_eq!(first.wait().await, PlaybackOutcome::Superseded);

    assert_eq!(sink.lock().text(), "first second");
    // The superseded session applied "first" before the takeover; after the
    // takeover only the new session's states appear.
    let history = sink.lock().history().to_vec();
    let takeover = history
        .iter()
        .rposition(|s| s.is_empty())
        .expect("restart resets the sink");
    assert_eq!(history[takeover..], ["", "first", "first second"]);
}

/// A tape that survives a file round-trip replays identically.
#[tokio::test(start_paused = true)]
async fn test_tape_file_roundtrip_replays() {
    let mut recorder = TapeRecorder::new();
    recorder.on_change("x = 1", 50);
    recorder.on_change("x = 12", 300);
    let tape = recorder.finalize("numbers");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("numbers.json");
    tape.write_json_to_path(&path).unwrap();
    let reloaded = Tape::read_json_from_path(&path).unwrap();
    assert_eq!(reloaded, tape);

    let sink = Arc::new(Mutex::new(MemorySink::new()));
    let player = Player::new(Arc::clone(&sink));
    assert_eq!(player.start(&reloaded).wait().await, PlaybackOutcome::Completed);
    assert_eq!(sink.lock().text(), "x = 12");
}

//! Command-line interface: record a tape from stdin, play one back.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;

use crate::playback::{PlaybackOutcome, PlaybackSink, Player};
use crate::tape::{Tape, TapeRecorder};

#[derive(Debug, Parser)]
#[command(
    name = "typetape",
    version,
    about = "Capture text edits over time and replay them at their original pace"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a tape from stdin: each line is appended to the text as it
    /// arrives, timestamped on delivery.
    Record {
        /// Title stored with the recording
        #[arg(long, default_value = "")]
        title: String,
        /// Where to write the tape
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// Replay a recorded tape in the terminal at its original pace.
    Play {
        /// Tape file produced by `record`
        tape: PathBuf,
    },
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Record { title, out } => record(title, out),
        Command::Play { tape } => play(tape).await,
    }
}

fn record(title: String, out: PathBuf) -> Result<()> {
    let mut recorder = TapeRecorder::new();
    let mut text = String::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        text.push_str(&line);
        text.push('\n');
        recorder.on_change(&text, now_ms());
    }

    let entry_count = recorder.len();
    let tape = recorder.finalize(title);
    tape.write_json_to_path(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    eprintln!("wrote {entry_count} entries to {}", out.display());
    Ok(())
}

async fn play(path: PathBuf) -> Result<()> {
    let tape = Tape::read_json_from_path(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    if !tape.title.is_empty() {
        eprintln!("{}", tape.title);
    }

    let player = Player::new(Arc::new(Mutex::new(TerminalSink::new())));
    match player.start(&tape).wait().await {
        PlaybackOutcome::Completed | PlaybackOutcome::Superseded => Ok(()),
        PlaybackOutcome::Aborted => bail!("the recording could not be reconstructed"),
    }
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Sink that mirrors the evolving text onto the terminal.
struct TerminalSink {
    text: String,
}

impl TerminalSink {
    fn new() -> Self {
        Self {
            text: String::new(),
        }
    }
}

impl PlaybackSink for TerminalSink {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        // Clear and repaint; the cursor tracks the end of the text.
        print!("\x1b[2J\x1b[H{}", self.text);
        let _ = io::stdout().flush();
    }

    fn is_scrolled_to_bottom(&self) -> bool {
        true
    }

    fn scroll_to_bottom(&mut self) {}
}

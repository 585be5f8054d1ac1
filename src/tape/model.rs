//! Tape and tape-entry data model.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One captured edit: the patch from the previous recorded state to the
/// current one, and when it happened relative to the start of the recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// Milliseconds since the first recorded change. Non-decreasing within
    /// one tape; the first entry is always at 0.
    pub time_ms: u64,
    /// Opaque patch produced by [`compute_patch`](crate::tape::compute_patch).
    /// The first entry's patch is relative to the empty string.
    pub patch: String,
}

/// An immutable recording: a title and an ordered sequence of entries.
///
/// A tape has no identity of its own; identity is assigned by the store and
/// referenced through the token codec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    /// User-supplied title; may be empty.
    pub title: String,
    /// Entries in capture order.
    pub entries: Vec<TapeEntry>,
}

impl Tape {
    /// Write the tape as a single JSON document.
    pub fn write_json_to_path(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(io::Error::other)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a tape previously written by [`Tape::write_json_to_path`].
    pub fn read_json_from_path(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(io::Error::other)
    }
}

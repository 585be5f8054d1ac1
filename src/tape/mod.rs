//! Tape capture: the time-indexed, reversible log of text edits.
//!
//! This module is scoped to the capture side of the pipeline:
//! - [`patch`] computes and applies the reversible per-edit patches
//! - [`model`] is the tape shape exchanged with the store
//! - [`recorder`] turns a live stream of text mutations into a tape

pub mod model;
pub mod patch;
pub mod recorder;

pub use model::{Tape, TapeEntry};
pub use patch::{apply_patch, compute_patch, PatchError};
pub use recorder::TapeRecorder;

//! Format converters
//!
//! Conversion between Standard MIDI File bytes and the in-memory song
//! model.

pub mod midi;

// Re-export for convenience
pub use midi::{parse_midi, write_midi, MidiError};

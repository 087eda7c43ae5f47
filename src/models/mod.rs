//! Data model for the MIDI combiner
//!
//! Contains the in-memory song representation shared by the SMF codec
//! and the combine core.

pub mod song;

// Re-export commonly used types
pub use song::{
    ControlEvent, NoteEvent, PitchBendEvent, SongDocument, TempoMarker, TimeSignatureMarker,
    Track, DEFAULT_RESOLUTION,
};

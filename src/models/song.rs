//! In-memory song model shared by the codec and the combiner
//!
//! This is a lean representation of a Standard MIDI File - not a full
//! music object model. It keeps just what the combiner needs: notes with
//! durations, control changes, pitch bends, and the document-level tempo
//! and time-signature maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default output resolution in ticks per quarter note.
pub const DEFAULT_RESOLUTION: u16 = 480;

/// A parsed multi-track MIDI sequence.
///
/// Tick positions everywhere in the document are absolute and expressed
/// in `resolution` ticks per quarter note. Track order is positional and
/// meaningful: track `i` of one file lines up with track `i` of another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongDocument {
    /// Ticks per quarter note. Must be positive.
    pub resolution: u16,
    pub tracks: Vec<Track>,
    /// Tempo map, sorted by tick.
    pub tempos: Vec<TempoMarker>,
    /// Time-signature map, sorted by tick.
    pub time_signatures: Vec<TimeSignatureMarker>,
}

impl SongDocument {
    /// Create an empty document at the given resolution.
    pub fn new(resolution: u16) -> Self {
        SongDocument {
            resolution,
            tracks: Vec::new(),
            tempos: Vec::new(),
            time_signatures: Vec::new(),
        }
    }

    /// Total number of notes across all tracks.
    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(|t| t.notes.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoMarker {
    pub tick: u64,
    pub bpm: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignatureMarker {
    pub tick: u64,
    pub numerator: u8,
    /// Denominator as a plain number (4 in 3/4), not the SMF power of two.
    pub denominator: u8,
}

/// One event track: notes, per-controller control changes, pitch bends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// MIDI channel 0-15 (9 = drums).
    pub channel: u8,
    pub notes: Vec<NoteEvent>,
    /// Control-change events keyed by controller number. BTreeMap keeps
    /// controller iteration order deterministic across runs.
    pub control_changes: BTreeMap<u8, Vec<ControlEvent>>,
    pub pitch_bends: Vec<PitchBendEvent>,
}

impl Track {
    pub fn with_name(name: &str) -> Self {
        Track {
            name: name.to_string(),
            ..Track::default()
        }
    }

    /// True when the track carries no events of any kind.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
            && self.pitch_bends.is_empty()
            && self.control_changes.values().all(|ccs| ccs.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number 0-127.
    pub pitch: u8,
    /// Note-on velocity 0-127.
    pub velocity: u8,
    /// Note-off velocity 0-127.
    pub off_velocity: u8,
    /// Absolute start tick.
    pub tick: u64,
    /// Length in ticks. `tick + duration` is the note's end tick.
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEvent {
    /// Controller value 0-127.
    pub value: u8,
    pub tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchBendEvent {
    /// Signed 14-bit bend, -8192..=8191, 0 = no bend.
    pub value: i16,
    pub tick: u64,
}

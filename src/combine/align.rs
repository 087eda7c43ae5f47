use crate::models::{SongDocument, Track};

/// Display name given to every track the combiner creates. Source track
/// names are deliberately not preserved.
pub const COMBINED_TRACK_NAME: &str = "Tracks";

/// Policy for mapping a source track onto an output track.
///
/// The default is positional (track i -> track i). Keeping this behind a
/// trait lets a name-based or instrument-based matcher be added later
/// without touching the combiner loop.
pub trait TrackMatcher {
    /// Output track index for the given source track index.
    fn target_index(&self, source_index: usize, source: &SongDocument) -> usize;
}

/// Index-based matching: track i of every input maps to output track i.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatcher;

impl TrackMatcher for PositionalMatcher {
    fn target_index(&self, source_index: usize, _source: &SongDocument) -> usize {
        source_index
    }
}

/// Return the output track at `index`, appending new empty tracks until
/// the document is long enough. Tracks are never reordered or removed,
/// so an index handed out once stays valid for the rest of the run.
pub fn aligned_track(output: &mut SongDocument, index: usize) -> &mut Track {
    while output.tracks.len() <= index {
        output.tracks.push(Track::with_name(COMBINED_TRACK_NAME));
    }
    &mut output.tracks[index]
}

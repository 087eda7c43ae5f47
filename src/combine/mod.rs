//! The merge core: rebase several parsed MIDI documents onto one timeline
//!
//! Inputs are processed in caller order; each input is repeated its
//! `repeat` count, and every playthrough is shifted by a running offset
//! so segments play back-to-back with no gap and no overlap. Tempo and
//! time-signature data come exclusively from the first input.

pub mod align;
pub mod span;
pub mod timebase;

pub use align::{aligned_track, PositionalMatcher, TrackMatcher, COMBINED_TRACK_NAME};
pub use span::playthrough_span;
pub use timebase::{normalize_tick, rebase_tick};

use crate::models::{ControlEvent, NoteEvent, PitchBendEvent, SongDocument};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombineError {
    #[error("no MIDI files to combine")]
    EmptyInput,
    #[error("malformed resolution: {resolution} ticks per quarter note")]
    MalformedResolution { resolution: u16 },
    #[error("no notes found or could not advance ticks for file: {name}")]
    NoAdvancingEvents { name: String },
}

pub type Result<T> = std::result::Result<T, CombineError>;

/// One entry of the ordered input list handed to [`combine`].
///
/// Owned by the surrounding application (the playlist surface), which
/// reorders entries and edits repeat counts before calling in. `repeat`
/// is expected to already be clamped to >= 1 by that surface.
#[derive(Debug, Clone)]
pub struct InputSpec {
    /// Identifying name, used in error reporting (typically the
    /// uploaded filename).
    pub name: String,
    pub document: SongDocument,
    /// How many times this input plays through. Precondition: >= 1.
    pub repeat: u32,
}

/// Merge `inputs` in order into one document at `target_resolution`
/// ticks per quarter note, using positional track matching.
pub fn combine(inputs: &[InputSpec], target_resolution: u16) -> Result<SongDocument> {
    combine_with_matcher(inputs, target_resolution, &PositionalMatcher)
}

/// Like [`combine`], with an explicit track-matching policy.
pub fn combine_with_matcher(
    inputs: &[InputSpec],
    target_resolution: u16,
    matcher: &dyn TrackMatcher,
) -> Result<SongDocument> {
    if inputs.is_empty() {
        return Err(CombineError::EmptyInput);
    }
    if target_resolution == 0 {
        return Err(CombineError::MalformedResolution { resolution: 0 });
    }

    let mut combined = SongDocument::new(target_resolution);
    let mut offset = 0u64;

    // Tempo and time signature survive from the first input only; every
    // other input's metadata is discarded.
    let first = &inputs[0].document;
    let kept_tempos = first.tempos.clone();
    let kept_time_signatures = first.time_signatures.clone();

    for spec in inputs {
        let source = &spec.document;
        let source_resolution = source.resolution;
        if source_resolution == 0 {
            return Err(CombineError::MalformedResolution { resolution: 0 });
        }

        for _ in 0..spec.repeat {
            for (source_index, track) in source.tracks.iter().enumerate() {
                let output_index = matcher.target_index(source_index, source);
                let out = aligned_track(&mut combined, output_index);
                if out.is_empty() {
                    // First contributor decides the output channel
                    out.channel = track.channel;
                }

                for note in &track.notes {
                    let normalized =
                        normalize_tick(note.tick, source_resolution, target_resolution)?;
                    // Only the start tick is time-base corrected; the
                    // duration is copied unscaled. Known approximation:
                    // note lengths are subtly off when source and target
                    // resolutions differ.
                    out.notes.push(NoteEvent {
                        tick: rebase_tick(normalized, offset),
                        ..*note
                    });
                }

                for (&controller, events) in &track.control_changes {
                    let dest = out.control_changes.entry(controller).or_default();
                    for cc in events {
                        let normalized =
                            normalize_tick(cc.tick, source_resolution, target_resolution)?;
                        dest.push(ControlEvent {
                            tick: rebase_tick(normalized, offset),
                            ..*cc
                        });
                    }
                }

                for bend in &track.pitch_bends {
                    let normalized =
                        normalize_tick(bend.tick, source_resolution, target_resolution)?;
                    out.pitch_bends.push(PitchBendEvent {
                        tick: rebase_tick(normalized, offset),
                        ..*bend
                    });
                }
            }

            let span = playthrough_span(source, target_resolution)?;
            if span == 0 {
                // Advancing by zero would collapse the next playthrough
                // onto this one, so the whole merge is abandoned.
                return Err(CombineError::NoAdvancingEvents {
                    name: spec.name.clone(),
                });
            }
            offset += span;
        }
    }

    // The retained tempo and meter apply from the very start of the
    // combined output, wherever they sat in the original file.
    combined.tempos = kept_tempos
        .into_iter()
        .map(|mut marker| {
            marker.tick = 0;
            marker
        })
        .collect();
    combined.time_signatures = kept_time_signatures
        .into_iter()
        .map(|mut marker| {
            marker.tick = 0;
            marker
        })
        .collect();

    Ok(combined)
}

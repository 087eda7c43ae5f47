use crate::converters::midi::{MidiError, Result};
use crate::models::{SongDocument, Track};
use midly::num::u14;
use midly::{Format, Header, MetaMessage, MidiMessage, PitchBend, Smf, Timing, TrackEvent,
    TrackEventKind};

/// Write a [`SongDocument`] to Standard MIDI File (SMF) Format 1 bytes.
///
/// Tempo and time-signature markers are folded into track 0 rather than
/// a separate conductor track, so a write/parse round trip preserves
/// positional track indices - the combiner aligns tracks by position.
/// Accepts any document shape the combiner can produce, including zero
/// tracks (a meta-only track is synthesized) and zero events.
pub fn write_midi(doc: &SongDocument) -> Result<Vec<u8>> {
    let mut tracks = Vec::new();

    if doc.tracks.is_empty() {
        tracks.push(build_marker_track(doc));
    } else {
        for (index, track) in doc.tracks.iter().enumerate() {
            tracks.push(build_event_track(doc, track, index == 0));
        }
    }

    let header = Header {
        format: Format::Parallel,
        timing: Timing::Metrical(doc.resolution.into()),
    };

    let smf = Smf { header, tracks };

    let mut out = Vec::new();
    smf.write(&mut out)
        .map_err(|e| MidiError::Write(format!("failed to write MIDI: {}", e)))?;

    Ok(out)
}

/// Meta-only track for documents with no event tracks.
fn build_marker_track(doc: &SongDocument) -> Vec<TrackEvent<'_>> {
    let mut events = Vec::new();
    push_marker_events(doc, &mut events);
    finish_track(&mut events);
    events
}

fn build_event_track<'a>(
    doc: &'a SongDocument,
    track: &'a Track,
    include_markers: bool,
) -> Vec<TrackEvent<'a>> {
    let mut events = Vec::new();

    if !track.name.is_empty() {
        events.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(track.name.as_bytes())),
        });
    }

    if include_markers {
        push_marker_events(doc, &mut events);
    }

    let channel = track.channel.into();

    for note in &track.notes {
        events.push(TrackEvent {
            delta: (note.tick as u32).into(),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: note.pitch.into(),
                    vel: note.velocity.into(),
                },
            },
        });
        events.push(TrackEvent {
            delta: ((note.tick + note.duration) as u32).into(),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: note.pitch.into(),
                    vel: note.off_velocity.into(),
                },
            },
        });
    }

    for (&controller, ccs) in &track.control_changes {
        for cc in ccs {
            events.push(TrackEvent {
                delta: (cc.tick as u32).into(),
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::Controller {
                        controller: controller.into(),
                        value: cc.value.into(),
                    },
                },
            });
        }
    }

    for bend in &track.pitch_bends {
        events.push(TrackEvent {
            delta: (bend.tick as u32).into(),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::PitchBend {
                    // Signed bend back to the raw value centered on 8192
                    bend: PitchBend(u14::from_int_lossy((bend.value + 8192) as u16)),
                },
            },
        });
    }

    finish_track(&mut events);
    events
}

/// Append tempo and time-signature metas, still carrying absolute ticks.
fn push_marker_events<'a>(doc: &SongDocument, events: &mut Vec<TrackEvent<'a>>) {
    for tempo in &doc.tempos {
        if tempo.bpm <= 0.0 {
            continue;
        }
        let microseconds_per_quarter = (60_000_000.0 / tempo.bpm) as u32;
        events.push(TrackEvent {
            delta: (tempo.tick as u32).into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(microseconds_per_quarter.into())),
        });
    }

    for ts in &doc.time_signatures {
        // Denominator as a power of 2 (4 -> 2, 8 -> 3)
        let denominator_power = (ts.denominator as f32).log2() as u8;
        events.push(TrackEvent {
            delta: (ts.tick as u32).into(),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(
                ts.numerator,
                denominator_power,
                24, // MIDI clocks per metronome click
                8,  // 32nd notes per quarter note
            )),
        });
    }
}

/// Sort by absolute tick, rewrite to delta times, terminate the track.
fn finish_track(events: &mut Vec<TrackEvent>) {
    events.sort_by_key(|e| e.delta.as_int());
    convert_to_delta_times(events);
    events.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
}

/// Convert absolute tick times to delta times (time since previous event).
fn convert_to_delta_times(events: &mut [TrackEvent]) {
    let mut prev_tick = 0u32;
    for event in events.iter_mut() {
        let current_tick = event.delta.as_int();
        let delta = current_tick.saturating_sub(prev_tick);
        event.delta = delta.into();
        prev_tick = current_tick;
    }
}

use crate::converters::midi::{MidiError, Result};
use crate::models::{ControlEvent, NoteEvent, PitchBendEvent, SongDocument, TempoMarker,
    TimeSignatureMarker, Track};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use std::collections::HashMap;

/// Parse Standard MIDI File bytes into a [`SongDocument`].
///
/// Rejects anything that is not a well-formed SMF byte stream, and SMF
/// files with SMPTE (timecode) timing - the combiner works in metrical
/// ticks per quarter note only.
///
/// Note-on/note-off pairing: a NoteOn with velocity 0 counts as a note
/// off, and an off closes the oldest open note of the same key on the
/// track. Note-ons left open at end of track are dropped, as completed
/// notes are the only thing the model carries.
pub fn parse_midi(bytes: &[u8]) -> Result<SongDocument> {
    let smf = Smf::parse(bytes).map_err(|e| MidiError::Parse(e.to_string()))?;

    let resolution = match smf.header.timing {
        Timing::Metrical(tpq) => tpq.as_int(),
        Timing::Timecode(..) => {
            return Err(MidiError::Unsupported("SMPTE timecode timing".to_string()))
        }
    };

    let mut doc = SongDocument::new(resolution);

    for events in &smf.tracks {
        let mut track = Track::default();
        let mut channel_known = false;
        let mut tick = 0u64;
        // key -> open (start_tick, on_velocity), oldest first
        let mut open_notes: HashMap<u8, Vec<(u64, u8)>> = HashMap::new();

        for event in events {
            tick += event.delta.as_int() as u64;

            match event.kind {
                TrackEventKind::Midi { channel, message } => {
                    if !channel_known {
                        track.channel = channel.as_int();
                        channel_known = true;
                    }
                    match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            open_notes
                                .entry(key.as_int())
                                .or_default()
                                .push((tick, vel.as_int()));
                        }
                        MidiMessage::NoteOn { key, .. } => {
                            close_note(&mut track, &mut open_notes, key.as_int(), 0, tick);
                        }
                        MidiMessage::NoteOff { key, vel } => {
                            close_note(&mut track, &mut open_notes, key.as_int(), vel.as_int(), tick);
                        }
                        MidiMessage::Controller { controller, value } => {
                            track
                                .control_changes
                                .entry(controller.as_int())
                                .or_default()
                                .push(ControlEvent {
                                    value: value.as_int(),
                                    tick,
                                });
                        }
                        MidiMessage::PitchBend { bend } => {
                            // Raw 14-bit value centered on 8192
                            track.pitch_bends.push(PitchBendEvent {
                                value: bend.0.as_int() as i16 - 8192,
                                tick,
                            });
                        }
                        _ => {}
                    }
                }
                TrackEventKind::Meta(meta) => match meta {
                    MetaMessage::TrackName(name) if track.name.is_empty() => {
                        track.name = String::from_utf8_lossy(name).into_owned();
                    }
                    MetaMessage::Tempo(us_per_quarter) => {
                        let us = us_per_quarter.as_int();
                        if us > 0 {
                            doc.tempos.push(TempoMarker {
                                tick,
                                bpm: 60_000_000.0 / us as f64,
                            });
                        }
                    }
                    MetaMessage::TimeSignature(numerator, denominator_power, _, _) => {
                        doc.time_signatures.push(TimeSignatureMarker {
                            tick,
                            numerator,
                            denominator: 1u8 << denominator_power.min(7),
                        });
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Notes are collected when they close, so re-sort by start tick
        track.notes.sort_by_key(|note| note.tick);
        doc.tracks.push(track);
    }

    // Markers may come from any track; present them as one sorted map
    doc.tempos.sort_by_key(|marker| marker.tick);
    doc.time_signatures.sort_by_key(|marker| marker.tick);

    Ok(doc)
}

fn close_note(
    track: &mut Track,
    open_notes: &mut HashMap<u8, Vec<(u64, u8)>>,
    key: u8,
    off_velocity: u8,
    tick: u64,
) {
    if let Some(opens) = open_notes.get_mut(&key) {
        if !opens.is_empty() {
            let (start, velocity) = opens.remove(0);
            track.notes.push(NoteEvent {
                pitch: key,
                velocity,
                off_velocity,
                tick: start,
                duration: tick.saturating_sub(start),
            });
        }
    }
}

// Codec integration tests: SMF bytes in, SMF bytes out

use combiner_wasm::combine::{combine, InputSpec};
use combiner_wasm::converters::midi::{parse_midi, write_midi};
use combiner_wasm::models::{
    ControlEvent, NoteEvent, PitchBendEvent, SongDocument, TempoMarker, TimeSignatureMarker,
    Track,
};

fn sample_document() -> SongDocument {
    let mut doc = SongDocument::new(480);

    let mut drums = Track::with_name("Drums");
    drums.channel = 9;
    drums.notes.push(NoteEvent {
        pitch: 36,
        velocity: 110,
        off_velocity: 64,
        tick: 0,
        duration: 240,
    });
    drums.notes.push(NoteEvent {
        pitch: 42,
        velocity: 80,
        off_velocity: 64,
        tick: 240,
        duration: 240,
    });

    let mut bass = Track::with_name("Bass");
    bass.channel = 1;
    bass.notes.push(NoteEvent {
        pitch: 40,
        velocity: 96,
        off_velocity: 50,
        tick: 0,
        duration: 480,
    });
    bass.control_changes
        .entry(7)
        .or_default()
        .push(ControlEvent { value: 100, tick: 0 });
    bass.pitch_bends
        .push(PitchBendEvent { value: -2048, tick: 120 });

    doc.tracks.push(drums);
    doc.tracks.push(bass);
    doc.tempos.push(TempoMarker { tick: 0, bpm: 96.0 });
    doc.time_signatures.push(TimeSignatureMarker {
        tick: 0,
        numerator: 6,
        denominator: 8,
    });
    doc
}

#[test]
fn test_round_trip_preserves_document() {
    let doc = sample_document();
    let bytes = write_midi(&doc).expect("write failed");
    let parsed = parse_midi(&bytes).expect("parse failed");

    assert_eq!(parsed.resolution, doc.resolution);
    assert_eq!(parsed.tracks.len(), doc.tracks.len());

    for (original, reread) in doc.tracks.iter().zip(parsed.tracks.iter()) {
        assert_eq!(original.name, reread.name);
        assert_eq!(original.channel, reread.channel);
        assert_eq!(original.notes.len(), reread.notes.len());
        for (a, b) in original.notes.iter().zip(reread.notes.iter()) {
            assert_eq!(a.pitch, b.pitch);
            assert_eq!(a.velocity, b.velocity);
            assert_eq!(a.off_velocity, b.off_velocity);
            assert_eq!(a.tick, b.tick);
            assert_eq!(a.duration, b.duration);
        }
        assert_eq!(original.control_changes, reread.control_changes);
        assert_eq!(original.pitch_bends.len(), reread.pitch_bends.len());
        for (a, b) in original.pitch_bends.iter().zip(reread.pitch_bends.iter()) {
            assert_eq!(a.value, b.value);
            assert_eq!(a.tick, b.tick);
        }
    }

    assert_eq!(parsed.tempos.len(), 1);
    assert!((parsed.tempos[0].bpm - 96.0).abs() < 0.01);
    assert_eq!(parsed.time_signatures.len(), 1);
    assert_eq!(parsed.time_signatures[0].numerator, 6);
    assert_eq!(parsed.time_signatures[0].denominator, 8);
}

#[test]
fn test_rejects_non_midi_bytes() {
    assert!(parse_midi(b"RIFF....WAVEfmt ").is_err());
    assert!(parse_midi(&[0u8; 64]).is_err());
}

#[test]
fn test_writes_empty_and_zero_event_documents() {
    // The writer must accept anything the combiner can produce
    let empty = SongDocument::new(480);
    let bytes = write_midi(&empty).expect("empty write failed");
    assert_eq!(&bytes[0..4], b"MThd");

    let mut trackless_events = SongDocument::new(480);
    trackless_events.tracks.push(Track::with_name("Tracks"));
    let bytes = write_midi(&trackless_events).expect("zero-event write failed");
    let parsed = parse_midi(&bytes).expect("zero-event parse failed");
    assert_eq!(parsed.tracks.len(), 1);
    assert_eq!(parsed.note_count(), 0);
}

#[test]
fn test_combine_then_export_then_reparse() {
    // The full pipeline a browser session exercises
    let part = sample_document();
    let part_bytes = write_midi(&part).expect("write failed");

    let parsed = parse_midi(&part_bytes).expect("parse failed");
    let inputs = vec![
        InputSpec {
            name: "part.mid".to_string(),
            document: parsed.clone(),
            repeat: 2,
        },
        InputSpec {
            name: "part-again.mid".to_string(),
            document: parsed,
            repeat: 1,
        },
    ];

    let combined = combine(&inputs, 480).expect("combine failed");
    let combined_bytes = write_midi(&combined).expect("combined write failed");
    let reread = parse_midi(&combined_bytes).expect("combined parse failed");

    // 3 playthroughs of 3 notes each, spread over both tracks
    assert_eq!(reread.note_count(), 9);
    assert_eq!(reread.tracks.len(), 2);

    // Playthroughs sit 480 ticks apart (the sample spans one quarter x4)
    let drum_ticks: Vec<u64> = reread.tracks[0].notes.iter().map(|n| n.tick).collect();
    assert_eq!(drum_ticks, vec![0, 240, 480, 720, 960, 1200]);
}

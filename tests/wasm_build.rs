//! WASM build test
//!
//! Exercises the JavaScript-facing playlist API inside a browser
//! environment, end to end: add, edit, combine, export.

#![cfg(target_arch = "wasm32")]

use combiner_wasm::api::{add_midi_file, clear_playlist, combine_midi, set_repeat_count};
use combiner_wasm::models::{NoteEvent, SongDocument, Track};
use combiner_wasm::write_midi;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn one_note_file() -> Vec<u8> {
    let mut doc = SongDocument::new(480);
    let mut track = Track::with_name("Part");
    track.notes.push(NoteEvent {
        pitch: 60,
        velocity: 100,
        off_velocity: 64,
        tick: 0,
        duration: 480,
    });
    doc.tracks.push(track);
    write_midi(&doc).unwrap()
}

#[wasm_bindgen_test]
fn test_add_combine_export() {
    clear_playlist().unwrap();

    let bytes = one_note_file();
    add_midi_file("part.mid".to_string(), &bytes).unwrap();
    set_repeat_count(0, 2).unwrap();

    let combined = combine_midi(0).unwrap();
    assert!(combined.length() > 14);

    clear_playlist().unwrap();
}

#[wasm_bindgen_test]
fn test_add_rejects_garbage() {
    let result = add_midi_file("notes.txt".to_string(), b"hello");
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_combine_empty_playlist_errors() {
    clear_playlist().unwrap();
    assert!(combine_midi(0).is_err());
}

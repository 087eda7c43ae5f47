//! WASM-owned playlist: the ordered, editable list of uploaded files
//!
//! The playlist is the unit the combiner iterates: each entry holds a
//! parsed document, the uploaded filename, and a repeat count. The
//! JavaScript side drives reordering (drag and drop) and repeat editing
//! through this module; the parsed documents never cross the boundary.

use crate::api::helpers::{clamp_repeat, serialize, validate_index, validation_error};
use crate::combine::InputSpec;
use crate::converters::midi::parse_midi;
use crate::models::SongDocument;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

// WASM-owned playlist storage (canonical source of truth)
lazy_static! {
    static ref PLAYLIST: Mutex<Vec<PlaylistEntry>> = Mutex::new(Vec::new());
}

pub struct PlaylistEntry {
    pub name: String,
    pub repeat: u32,
    pub document: SongDocument,
}

/// What JavaScript sees of one playlist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    pub index: usize,
    pub name: String,
    pub repeat: u32,
    pub track_count: usize,
    pub note_count: usize,
}

fn summarize(index: usize, entry: &PlaylistEntry) -> EntrySummary {
    EntrySummary {
        index,
        name: entry.name.clone(),
        repeat: entry.repeat,
        track_count: entry.document.tracks.len(),
        note_count: entry.document.note_count(),
    }
}

pub fn lock_playlist() -> Result<std::sync::MutexGuard<'static, Vec<PlaylistEntry>>, JsValue> {
    PLAYLIST
        .lock()
        .map_err(|_| JsValue::from_str("Playlist lock poisoned"))
}

/// Snapshot the playlist into the ordered input list `combine` expects.
pub fn snapshot_inputs() -> Result<Vec<InputSpec>, JsValue> {
    let playlist = lock_playlist()?;
    Ok(playlist
        .iter()
        .map(|entry| InputSpec {
            name: entry.name.clone(),
            document: entry.document.clone(),
            repeat: entry.repeat,
        })
        .collect())
}

/// Parse and add a MIDI file to the end of the playlist
///
/// The bytes are validated by actually parsing them; anything that is
/// not a well-formed MIDI file is rejected here, before it can ever
/// reach the combiner.
///
/// # Returns
/// Summary of the new entry (index, name, repeat, track/note counts)
#[wasm_bindgen(js_name = addMidiFile)]
pub fn add_midi_file(name: String, bytes: &[u8]) -> Result<JsValue, JsValue> {
    wasm_info!("addMidiFile called: \"{}\", {} bytes", name, bytes.len());

    let document = parse_midi(bytes).map_err(|e| {
        wasm_error!("File \"{}\" is not a valid MIDI file: {}", name, e);
        JsValue::from_str(&format!("File \"{}\" is not a valid MIDI file: {}", name, e))
    })?;

    wasm_log!(
        "  Parsed \"{}\": {} tracks, {} notes, {} tpq",
        name,
        document.tracks.len(),
        document.note_count(),
        document.resolution
    );

    let mut playlist = lock_playlist()?;
    let entry = PlaylistEntry {
        name,
        repeat: 1,
        document,
    };
    let summary = summarize(playlist.len(), &entry);
    playlist.push(entry);

    wasm_info!("addMidiFile completed: {} files in playlist", playlist.len());
    serialize(&summary, "Summary serialization error")
}

/// Remove the playlist entry at `index`
#[wasm_bindgen(js_name = removeMidiFile)]
pub fn remove_midi_file(index: usize) -> Result<(), JsValue> {
    wasm_info!("removeMidiFile called: index={}", index);

    let mut playlist = lock_playlist()?;
    validate_index(index, playlist.len(), "playlist").map_err(validation_error)?;
    let removed = playlist.remove(index);

    wasm_info!("removeMidiFile completed: removed \"{}\"", removed.name);
    Ok(())
}

/// Move the entry at `from` to position `to` (drag-to-reorder)
#[wasm_bindgen(js_name = moveMidiFile)]
pub fn move_midi_file(from: usize, to: usize) -> Result<(), JsValue> {
    wasm_info!("moveMidiFile called: from={}, to={}", from, to);

    let mut playlist = lock_playlist()?;
    validate_index(from, playlist.len(), "playlist").map_err(validation_error)?;
    validate_index(to, playlist.len(), "playlist").map_err(validation_error)?;

    let entry = playlist.remove(from);
    playlist.insert(to, entry);

    wasm_info!("moveMidiFile completed");
    Ok(())
}

/// Set the repeat count for the entry at `index`
///
/// Values below 1 are clamped to 1 - this surface owns the clamp, the
/// combiner itself assumes repeat >= 1.
///
/// # Returns
/// The repeat count actually stored
#[wasm_bindgen(js_name = setRepeatCount)]
pub fn set_repeat_count(index: usize, repeat: u32) -> Result<u32, JsValue> {
    wasm_info!("setRepeatCount called: index={}, repeat={}", index, repeat);

    let mut playlist = lock_playlist()?;
    validate_index(index, playlist.len(), "playlist").map_err(validation_error)?;

    let clamped = clamp_repeat(repeat);
    if clamped != repeat {
        wasm_warn!("  Repeat {} clamped to {}", repeat, clamped);
    }
    playlist[index].repeat = clamped;

    wasm_info!("setRepeatCount completed");
    Ok(clamped)
}

/// List the current playlist as an array of entry summaries
#[wasm_bindgen(js_name = listMidiFiles)]
pub fn list_midi_files() -> Result<JsValue, JsValue> {
    let playlist = lock_playlist()?;
    let summaries: Vec<EntrySummary> = playlist
        .iter()
        .enumerate()
        .map(|(index, entry)| summarize(index, entry))
        .collect();

    serialize(&summaries, "Playlist serialization error")
}

/// Remove every entry from the playlist
#[wasm_bindgen(js_name = clearPlaylist)]
pub fn clear_playlist() -> Result<(), JsValue> {
    wasm_info!("clearPlaylist called");

    let mut playlist = lock_playlist()?;
    playlist.clear();

    wasm_info!("clearPlaylist completed");
    Ok(())
}

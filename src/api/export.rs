//! Combine-and-export operation for the WASM API
//!
//! Runs the merge over the current playlist and hands the combined
//! Standard MIDI File bytes back to JavaScript for the download step.

use crate::api::playlist::snapshot_inputs;
use crate::combine::combine;
use crate::converters::midi::write_midi;
use crate::models::DEFAULT_RESOLUTION;
use crate::{wasm_error, wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

/// Combine the playlist into one MIDI file
///
/// Inputs are merged in playlist order, each repeated its repeat count,
/// back-to-back on one timeline. Tempo and time signature come from the
/// first file in the list.
///
/// # Parameters
/// - `resolution`: Ticks per quarter note for the output (typically 480
///   or 960), use 0 for the default (480)
///
/// # Returns
/// Combined MIDI file as Uint8Array (Standard MIDI File Format 1)
#[wasm_bindgen(js_name = combineMidi)]
pub fn combine_midi(resolution: u16) -> Result<js_sys::Uint8Array, JsValue> {
    wasm_info!("combineMidi called with resolution={}", resolution);

    let inputs = snapshot_inputs()?;
    wasm_log!("  Playlist has {} files", inputs.len());

    let target_resolution = if resolution == 0 {
        DEFAULT_RESOLUTION
    } else {
        resolution
    };

    // Step 1: Merge onto one timeline
    let combined = combine(&inputs, target_resolution).map_err(|e| {
        wasm_error!("Combine error: {}", e);
        JsValue::from_str(&format!("Combine error: {}", e))
    })?;

    wasm_log!(
        "  Combined document: {} tracks, {} notes",
        combined.tracks.len(),
        combined.note_count()
    );

    // Step 2: Write SMF bytes
    let midi_bytes = write_midi(&combined).map_err(|e| {
        wasm_error!("MIDI write error: {}", e);
        JsValue::from_str(&format!("MIDI write error: {}", e))
    })?;

    wasm_info!("  MIDI generated: {} bytes", midi_bytes.len());

    // Convert to Uint8Array for JavaScript
    let uint8_array = js_sys::Uint8Array::new_with_length(midi_bytes.len() as u32);
    uint8_array.copy_from(&midi_bytes);

    wasm_info!("combineMidi completed successfully");
    Ok(uint8_array)
}

//! MIDI Combiner WASM Module
//!
//! Merges several multi-track MIDI files into one: tick positions are
//! normalized to a common resolution, inputs play back-to-back in the
//! user's order with per-file repeat counts, and tracks are aligned by
//! position across files. The browser UI handles upload, reordering and
//! download; this module handles everything between bytes-in and
//! bytes-out.

pub mod models;
pub mod combine;
pub mod converters;
pub mod api;

// Re-export commonly used types
pub use combine::{combine, CombineError, InputSpec};
pub use converters::midi::{parse_midi, write_midi, MidiError};
pub use models::{SongDocument, Track, DEFAULT_RESOLUTION};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("MIDI Combiner WASM module initialized");
}

//! MIDI Combiner WASM API
//!
//! The JavaScript-facing surface of the module. JavaScript owns the
//! upload/drag-to-reorder UI and the download step; this layer owns the
//! playlist state and runs the merge.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization, validation
//! - `playlist`: the WASM-owned input list (add, remove, move, repeat)
//! - `export`: combine the playlist and return SMF bytes

pub mod helpers;
pub mod playlist;
pub mod export;

// Re-export the public API functions
pub use export::combine_midi;
pub use playlist::{
    add_midi_file, clear_playlist, list_midi_files, move_midi_file, remove_midi_file,
    set_repeat_count,
};

mod parse;
mod write;

pub use parse::parse_midi;
pub use write::write_midi;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("midi parse error: {0}")]
    Parse(String),
    #[error("unsupported midi feature: {0}")]
    Unsupported(String),
    #[error("midi write error: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, MidiError>;

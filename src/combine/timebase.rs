use crate::combine::{CombineError, Result};

/// Convert a tick from a source resolution to the target resolution.
///
/// Rounds half away from zero; since ticks are non-negative this is the
/// add-half-then-divide integer form. The same rule is used everywhere
/// ticks are rescaled so repeated offset accumulation cannot drift.
///
/// # Arguments
/// * `tick` - Absolute tick in the source time base
/// * `source` - Source resolution (ticks per quarter note)
/// * `target` - Target resolution (ticks per quarter note)
pub fn normalize_tick(tick: u64, source: u16, target: u16) -> Result<u64> {
    if source == 0 {
        return Err(CombineError::MalformedResolution { resolution: source });
    }
    let source = source as u64;
    Ok((tick * target as u64 + source / 2) / source)
}

/// Shift a normalized tick by the running offset, placing the event at
/// its absolute position in the combined timeline.
pub fn rebase_tick(normalized: u64, offset: u64) -> u64 {
    normalized + offset
}

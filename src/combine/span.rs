use crate::combine::timebase::normalize_tick;
use crate::combine::Result;
use crate::models::SongDocument;

/// Furthest note end reached by one playthrough of `source`, expressed
/// in the target resolution.
///
/// Only notes count: control changes and pitch bends have no duration
/// and cannot advance the timeline. Returns 0 when the document has no
/// notes at all - the caller must treat that as an error, because an
/// offset that does not advance would overlap the next playthrough onto
/// this one.
pub fn playthrough_span(source: &SongDocument, target_resolution: u16) -> Result<u64> {
    let mut max_end = 0u64;
    for track in &source.tracks {
        for note in &track.notes {
            let end = normalize_tick(note.tick + note.duration, source.resolution, target_resolution)?;
            if end > max_end {
                max_end = end;
            }
        }
    }
    Ok(max_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ControlEvent, NoteEvent, Track};

    fn note(tick: u64, duration: u64) -> NoteEvent {
        NoteEvent {
            pitch: 60,
            velocity: 100,
            off_velocity: 64,
            tick,
            duration,
        }
    }

    #[test]
    fn test_span_is_furthest_note_end_across_tracks() {
        let mut doc = SongDocument::new(480);
        let mut a = Track::default();
        a.notes.push(note(0, 480));
        let mut b = Track::default();
        b.notes.push(note(960, 240));
        doc.tracks.push(a);
        doc.tracks.push(b);

        assert_eq!(playthrough_span(&doc, 480).unwrap(), 1200);
    }

    #[test]
    fn test_span_is_normalized() {
        let mut doc = SongDocument::new(240);
        let mut track = Track::default();
        track.notes.push(note(0, 240));
        doc.tracks.push(track);

        // One quarter at 240 tpq is 480 ticks at 480 tpq
        assert_eq!(playthrough_span(&doc, 480).unwrap(), 480);
    }

    #[test]
    fn test_controllers_do_not_advance_span() {
        let mut doc = SongDocument::new(480);
        let mut track = Track::default();
        track
            .control_changes
            .entry(7)
            .or_default()
            .push(ControlEvent { value: 100, tick: 9600 });
        doc.tracks.push(track);

        assert_eq!(playthrough_span(&doc, 480).unwrap(), 0);
    }

    #[test]
    fn test_empty_document_has_zero_span() {
        let doc = SongDocument::new(480);
        assert_eq!(playthrough_span(&doc, 480).unwrap(), 0);
    }
}

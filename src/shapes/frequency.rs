//! Note frequencies for playing a shape back.

use crate::pitch::{midi_to_frequency, parse_note_with_octave};
use crate::tuning::Tuning;

use super::types::{NoteFrequency, Shape};

/// MIDI number and equal-tempered frequency of each note in a shape.
///
/// Open-string octaves follow the tuning table convention: a lowercase name is
/// octave 4, uppercase is octave 3, unless a digit says otherwise. Notes whose
/// open string can't be parsed are skipped.
pub fn shape_frequencies(shape: &Shape, tuning: &Tuning) -> Vec<NoteFrequency> {
    shape
        .notes
        .iter()
        .filter_map(|note| {
            let open = parse_note_with_octave(tuning.strings.get(note.string_index)?)?;
            let midi = open.midi() + note.fret as i16;
            Some(NoteFrequency {
                frequency: midi_to_frequency(midi),
                midi,
                note: note.note,
                degree: note.degree.clone(),
                string_index: note.string_index,
            })
        })
        .collect()
}

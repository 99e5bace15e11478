//! Full chord-shape search
//!
//! For each run of adjacent active strings, every combination of one chord
//! tone per string is enumerated depth-first. A branch is cut as soon as the
//! fretted span exceeds the reach limit; open strings never count toward it.

use crate::chord::ChordQuality;
use crate::config::SearchConfig;
use crate::pitch::{note_to_pitch_class, pitch_at_fret, pitch_class_name};
use crate::tuning::Tuning;

use super::types::{number_positions, ChordTone, Shape, ShapeContext, ShapeNote};

/// Running lowest/highest fretted fret of a partial combination.
#[derive(Debug, Clone, Copy, Default)]
struct Reach {
    low: Option<u8>,
    high: Option<u8>,
}

impl Reach {
    fn with(self, fret: u8) -> Self {
        if fret == 0 {
            return self;
        }
        Self {
            low: Some(self.low.map_or(fret, |lo| lo.min(fret))),
            high: Some(self.high.map_or(fret, |hi| hi.max(fret))),
        }
    }

    fn span(&self) -> u8 {
        match (self.low, self.high) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }
}

/// Chord tones on each string: every fret in `0..=max_fret` whose pitch is in the chord.
pub fn scan_chord_tones(
    open_pitches: &[u8],
    quality: &ChordQuality,
    root_pitch: u8,
    max_fret: u8,
) -> Vec<Vec<ChordTone>> {
    let chord_pitches = quality.pitch_classes(root_pitch);
    open_pitches
        .iter()
        .map(|&open| {
            (0..=max_fret)
                .filter_map(|fret| {
                    let pitch = pitch_at_fret(open, fret);
                    let idx = chord_pitches.iter().position(|&p| p == pitch)?;
                    Some(ChordTone {
                        fret,
                        pitch,
                        interval: quality.intervals[idx],
                        degree: quality.degrees[idx].clone(),
                    })
                })
                .collect()
        })
        .collect()
}

/// Visit every combination of one tone per string in `string..=end` whose
/// fretted span stays within `max_reach`.
fn enumerate<'a, F>(
    tones: &'a [Vec<ChordTone>],
    string: usize,
    end: usize,
    reach: Reach,
    max_reach: u8,
    combo: &mut Vec<&'a ChordTone>,
    visit: &mut F,
) where
    F: FnMut(&[&'a ChordTone]),
{
    if string > end {
        visit(combo.as_slice());
        return;
    }
    for tone in &tones[string] {
        let next = reach.with(tone.fret);
        if next.span() <= max_reach {
            combo.push(tone);
            enumerate(tones, string + 1, end, next, max_reach, combo, visit);
            combo.pop();
        }
    }
}

/// Distinct chord tones a combination must cover: all of a triad, any three of a seventh.
fn required_coverage(quality: &ChordQuality) -> usize {
    quality.tone_count().min(3)
}

/// Find every full shape for a root and chord quality on a tuning.
///
/// Returns an empty list when the root note isn't recognized or the tuning
/// has no active strings. Shapes are sorted by (lowest fret, start string)
/// and numbered from 1. A shape on a shorter run of strings is kept even when
/// a longer shape contains the same notes; no two shapes share the same
/// (string, fret) list, since each run is a different set of strings and a
/// string's chord-tone frets are distinct.
pub fn find_shapes(
    root_note: &str,
    quality: &ChordQuality,
    tuning: &Tuning,
    max_fret: u8,
    config: &SearchConfig,
) -> Vec<Shape> {
    let Some(root_pitch) = note_to_pitch_class(root_note) else {
        log::debug!("Unrecognized root note '{}'", root_note);
        return vec![];
    };

    let active = tuning.active_strings();
    let string_count = active.len();
    if string_count == 0 {
        return vec![];
    }

    let tones = scan_chord_tones(&active.pitches, quality, root_pitch, max_fret);
    let chord_pitches = quality.pitch_classes(root_pitch);
    let required = required_coverage(quality);
    let min_strings = config.min_strings.clamp(1, string_count);
    let context = ShapeContext {
        root_note,
        root_pitch,
        chord_quality: &quality.key,
    };

    let mut shapes = Vec::new();
    let mut candidates = 0usize;

    for start in 0..string_count {
        for end in (start + min_strings - 1)..string_count {
            let mut combo = Vec::with_capacity(end - start + 1);
            enumerate(
                &tones,
                start,
                end,
                Reach::default(),
                config.max_reach,
                &mut combo,
                &mut |picked: &[&ChordTone]| {
                    candidates += 1;
                    let covered = chord_pitches
                        .iter()
                        .filter(|p| picked.iter().any(|t| t.pitch == **p))
                        .count();
                    if covered < required {
                        return;
                    }

                    let notes: Vec<ShapeNote> = picked
                        .iter()
                        .enumerate()
                        .map(|(offset, tone)| ShapeNote {
                            string_index: active.indices[start + offset],
                            local_string_index: start + offset,
                            fret: tone.fret,
                            pitch: tone.pitch,
                            interval: tone.interval,
                            degree: tone.degree.clone(),
                            note: pitch_class_name(tone.pitch),
                        })
                        .collect();

                    let Some(shape) = Shape::build(notes, &context, None) else {
                        log::trace!(
                            "Dropping frets {:?}: bass interval {} has no inversion",
                            picked.iter().map(|t| t.fret).collect::<Vec<_>>(),
                            picked[0].interval
                        );
                        return;
                    };
                    if shape.highest_fret > max_fret {
                        return;
                    }
                    shapes.push(shape);
                },
            );
        }
    }

    log::debug!(
        "{} {} on {}: {} candidates, {} shapes",
        root_note,
        quality.key,
        tuning.name,
        candidates,
        shapes.len()
    );
    number_positions(shapes)
}

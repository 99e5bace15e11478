//! Single best voicing for a chord diagram.
//!
//! Unlike the shape search, each main string may also be muted, and only the
//! best-scoring voicing is kept. The result carries everything a four-string
//! chord diagram needs: per-string frets, finger numbers, the base fret and
//! any barre.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chord::ChordQuality;
use crate::config::SearchConfig;
use crate::pitch::{display_note, note_to_pitch_class, pitch_at_fret, pitch_class_name};
use crate::tuning::Tuning;

/// One string of a diagram voicing.
///
/// `string_num` counts down to 1 for the highest string; muted strings have
/// no fret, note or degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringPosition {
    pub string_num: usize,
    pub fret: Option<u8>,
    pub muted: bool,
    pub note: Option<&'static str>,
    pub degree: Option<String>,
    pub is_root: bool,
    pub finger: Option<u8>,
}

/// A barre across strings `from_string..=to_string` at `fret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub fret: u8,
    pub from_string: usize,
    pub to_string: usize,
}

/// The chosen voicing, ordered from the lowest main string up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordVoicing {
    pub positions: Vec<StringPosition>,
    /// First fret drawn on the diagram (1 unless the voicing sits above fret 4)
    pub base_fret: u8,
    pub barre: Option<Barre>,
    pub chord_notes: Vec<&'static str>,
    pub num_strings: usize,
    pub score: i32,
}

impl ChordVoicing {
    /// Pitch classes of the sounding strings, ascending and without repeats.
    pub fn sounding_pitches(&self) -> Vec<u8> {
        let mut pitches: Vec<u8> = self
            .positions
            .iter()
            .filter_map(|p| p.note.and_then(note_to_pitch_class))
            .collect();
        pitches.sort_unstable();
        pitches.dedup();
        pitches
    }
}

#[derive(Debug, Clone, Copy)]
struct Fretting {
    fret: u8,
    pitch: u8,
    tone_index: usize,
}

/// Lower is better: low on the neck, compact, open strings, more strings sounding.
fn score(voicing: &[Option<Fretting>]) -> i32 {
    let sounding: Vec<&Fretting> = voicing.iter().flatten().collect();
    let fretted = sounding.iter().map(|f| f.fret).filter(|&f| f > 0);
    let min_fret = fretted.clone().min().unwrap_or(0) as i32;
    let max_fret = fretted.max().unwrap_or(0) as i32;
    let open_count = sounding.iter().filter(|f| f.fret == 0).count() as i32;
    min_fret * 100 + (max_fret - min_fret) * 50 - open_count * 30 - sounding.len() as i32 * 10
}

struct Explorer<'a> {
    string_pitches: &'a [u8],
    chord_pitches: &'a [u8],
    chord_mask: u16,
    max_fret: u8,
    max_reach: u8,
    max_fingers: usize,
    best: Option<(i32, Vec<Option<Fretting>>)>,
    visited: usize,
}

impl Explorer<'_> {
    fn explore(&mut self, voicing: &mut Vec<Option<Fretting>>, used: u16) {
        let fretted: Vec<u8> = voicing.iter().flatten().map(|f| f.fret).filter(|&f| f > 0).collect();
        if fretted.len() > self.max_fingers {
            return;
        }
        if let (Some(lo), Some(hi)) = (fretted.iter().min(), fretted.iter().max()) {
            if hi - lo > self.max_reach {
                return;
            }
        }

        let string_idx = voicing.len();
        if string_idx == self.string_pitches.len() {
            self.visited += 1;
            if used & self.chord_mask == self.chord_mask {
                let s = score(voicing);
                if self.best.as_ref().map_or(true, |(best, _)| s < *best) {
                    self.best = Some((s, voicing.clone()));
                }
            }
            return;
        }

        voicing.push(None);
        self.explore(voicing, used);
        voicing.pop();

        let open = self.string_pitches[string_idx];
        for fret in 0..=self.max_fret {
            let pitch = pitch_at_fret(open, fret);
            if let Some(tone_index) = self.chord_pitches.iter().position(|&p| p == pitch) {
                voicing.push(Some(Fretting { fret, pitch, tone_index }));
                self.explore(voicing, used | (1 << pitch));
                voicing.pop();
            }
        }
    }
}

/// Number fretted strings 1-4 by (fret ascending, string number descending).
fn assign_fingers(positions: &mut [StringPosition]) {
    let mut order: Vec<usize> = (0..positions.len())
        .filter(|&i| positions[i].fret.is_some_and(|f| f > 0))
        .collect();
    order.sort_by_key(|&i| (positions[i].fret, std::cmp::Reverse(positions[i].string_num)));
    for (n, &i) in order.iter().enumerate() {
        positions[i].finger = Some((n + 1).min(4) as u8);
    }
}

/// The lowest fret held by two or more strings no more than three strings apart.
fn detect_barre(positions: &[StringPosition]) -> Option<Barre> {
    let mut groups: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for p in positions {
        if let Some(fret) = p.fret.filter(|&f| f > 0) {
            groups.entry(fret).or_default().push(p.string_num);
        }
    }
    groups.into_iter().find_map(|(fret, strings)| {
        let lo = *strings.iter().min()?;
        let hi = *strings.iter().max()?;
        (strings.len() >= 2 && hi - lo <= 3).then_some(Barre {
            fret,
            from_string: lo,
            to_string: hi,
        })
    })
}

/// Find the best diagram voicing of a chord on a tuning's main strings.
///
/// Returns `None` if the root isn't recognized or no voicing satisfies the
/// finger, reach and chord-tone constraints.
pub fn find_chord_voicing(
    tuning: &Tuning,
    root_note: &str,
    quality: &ChordQuality,
    max_fret: u8,
    config: &SearchConfig,
) -> Option<ChordVoicing> {
    let root_pitch = note_to_pitch_class(root_note)?;
    let chord_pitches = quality.pitch_classes(root_pitch);
    let active = tuning.active_strings();
    if active.is_empty() {
        return None;
    }

    let mut explorer = Explorer {
        string_pitches: &active.pitches,
        chord_pitches: &chord_pitches,
        chord_mask: chord_pitches.iter().fold(0u16, |mask, p| mask | (1 << p)),
        max_fret,
        max_reach: config.voicing_max_reach,
        max_fingers: config.max_fingers,
        best: None,
        visited: 0,
    };
    explorer.explore(&mut Vec::with_capacity(active.len()), 0);
    let visited = explorer.visited;
    let (score, best) = explorer.best?;
    log::debug!(
        "Voicing {} {} on {}: best score {} of {} complete voicings",
        root_note,
        quality.key,
        tuning.name,
        score,
        visited
    );

    let num_strings = best.len();
    let mut positions: Vec<StringPosition> = best
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let string_num = num_strings - idx;
            match slot {
                None => StringPosition {
                    string_num,
                    fret: None,
                    muted: true,
                    note: None,
                    degree: None,
                    is_root: false,
                    finger: None,
                },
                Some(f) => StringPosition {
                    string_num,
                    fret: Some(f.fret),
                    muted: false,
                    note: Some(pitch_class_name(f.pitch)),
                    degree: Some(quality.degrees[f.tone_index].clone()),
                    is_root: f.pitch == root_pitch,
                    finger: None,
                },
            }
        })
        .collect();
    assign_fingers(&mut positions);

    let min_fretted = positions.iter().filter_map(|p| p.fret).filter(|&f| f > 0).min();
    let base_fret = match min_fretted {
        Some(f) if f > 4 => f,
        _ => 1,
    };
    let barre = detect_barre(&positions);

    Some(ChordVoicing {
        positions,
        base_fret,
        barre,
        chord_notes: chord_pitches.iter().map(|&p| display_note(p)).collect(),
        num_strings,
        score,
    })
}

//! Chord quality table.
//!
//! Qualities are loaded once from `data/chords.yaml` into an immutable
//! [`ChordTable`] that callers hold and pass by reference to the search
//! functions.

use serde::{Deserialize, Serialize};

use crate::error::BanjoError;
use crate::pitch::{note_to_pitch_class, pitch_class_name};

const BUILTIN_CHORDS: &str = include_str!("../data/chords.yaml");

/// A chord quality: semitone intervals from the root with a degree label for each.
///
/// `intervals` is ascending, starts at 0 and has 3 or 4 entries; `degrees`
/// runs parallel to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordQuality {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub intervals: Vec<u8>,
    pub degrees: Vec<String>,
    #[serde(default, skip_serializing)]
    pub aliases: Vec<String>,
}

impl ChordQuality {
    /// Number of chord tones (3 for triads, 4 for sevenths and sixths).
    pub fn tone_count(&self) -> usize {
        self.intervals.len()
    }

    /// Index of `interval` in the quality, if it is one of its chord tones.
    pub fn tone_index(&self, interval: u8) -> Option<usize> {
        self.intervals.iter().position(|&iv| iv == interval)
    }

    /// Degree label for a chord-tone interval ("1", "♭3", "5", ...).
    pub fn degree_of(&self, interval: u8) -> Option<&str> {
        self.tone_index(interval).map(|i| self.degrees[i].as_str())
    }

    /// Chord tone pitch classes for `root_pitch`, in interval order.
    pub fn pitch_classes(&self, root_pitch: u8) -> Vec<u8> {
        self.intervals
            .iter()
            .map(|iv| ((root_pitch as u16 + *iv as u16) % 12) as u8)
            .collect()
    }

    fn check(&self) -> Result<(), BanjoError> {
        let fail = |message: &str| {
            Err(BanjoError::DataError(format!(
                "chord quality '{}': {}",
                self.key, message
            )))
        };
        if !(3..=4).contains(&self.intervals.len()) {
            return fail("must have 3 or 4 intervals");
        }
        if self.intervals[0] != 0 {
            return fail("first interval must be 0");
        }
        if self.intervals.windows(2).any(|w| w[0] >= w[1]) || self.intervals.iter().any(|&iv| iv > 11) {
            return fail("intervals must be ascending and below 12");
        }
        if self.degrees.len() != self.intervals.len() {
            return fail("degree labels must match the intervals");
        }
        Ok(())
    }
}

/// Immutable table of chord qualities, looked up by key or alias.
#[derive(Debug, Clone)]
pub struct ChordTable {
    qualities: Vec<ChordQuality>,
}

impl ChordTable {
    /// Build a table, checking every quality's invariants.
    pub fn new(qualities: Vec<ChordQuality>) -> Result<Self, BanjoError> {
        for quality in &qualities {
            quality.check()?;
        }
        Ok(Self { qualities })
    }

    /// Parse a table from YAML (a list of qualities).
    pub fn from_yaml(source: &str) -> Result<Self, BanjoError> {
        let qualities: Vec<ChordQuality> = serde_yaml::from_str(source)?;
        Self::new(qualities)
    }

    /// The built-in table embedded from `data/chords.yaml`.
    pub fn builtin() -> Result<Self, BanjoError> {
        Self::from_yaml(BUILTIN_CHORDS)
    }

    /// Look up a quality by canonical key, then exact alias, then key ignoring case.
    ///
    /// Aliases are matched case-sensitively since `m` and `M` name different chords.
    pub fn get(&self, key: &str) -> Option<&ChordQuality> {
        self.qualities
            .iter()
            .find(|q| q.key == key)
            .or_else(|| self.qualities.iter().find(|q| q.aliases.iter().any(|a| a == key)))
            .or_else(|| self.qualities.iter().find(|q| q.key.eq_ignore_ascii_case(key)))
    }

    /// Like [`ChordTable::get`] but reports a missing key as an error.
    pub fn require(&self, key: &str) -> Result<&ChordQuality, BanjoError> {
        self.get(key)
            .ok_or_else(|| BanjoError::UnknownChordQuality(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChordQuality> {
        self.qualities.iter()
    }
}

/// Chord tone pitch classes for a root note name; empty if the root is unknown.
pub fn chord_pitch_classes(root_note: &str, quality: &ChordQuality) -> Vec<u8> {
    match note_to_pitch_class(root_note) {
        Some(root) => quality.pitch_classes(root),
        None => vec![],
    }
}

/// Chord tone names (sharp spelling) for a root note name.
pub fn chord_note_names(root_note: &str, quality: &ChordQuality) -> Vec<&'static str> {
    chord_pitch_classes(root_note, quality)
        .into_iter()
        .map(pitch_class_name)
        .collect()
}

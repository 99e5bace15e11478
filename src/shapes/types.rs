//! Shape type definitions
//!
//! These are immutable value records handed to rendering and audio code.
//! Everything serializes in camelCase for JSON consumers.

use serde::{Deserialize, Serialize};

use crate::inversion::{ordinal_position, Inversion};

/// How shapes are voiced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicingMode {
    /// Three or more notes on adjacent strings
    #[default]
    Full,
    /// Two-note double stops taken from the full shapes
    Partial,
}

/// A fret on one active string where a chord tone sounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordTone {
    pub fret: u8,
    pub pitch: u8,
    /// Interval of this tone above the chord root
    pub interval: u8,
    pub degree: String,
}

/// One note of a shape.
///
/// # Fields
/// - `string_index`: index into the tuning's full string list (the drone is 0)
/// - `local_string_index`: index into the active strings (0 = lowest main string)
/// - `fret`: 0 for an open string
/// - `pitch`: pitch class sounding at the fret
/// - `interval` / `degree`: which chord tone it is
/// - `note`: sharp spelling of the pitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNote {
    pub string_index: usize,
    pub local_string_index: usize,
    pub fret: u8,
    pub pitch: u8,
    pub interval: u8,
    pub degree: String,
    pub note: &'static str,
}

/// A chord voicing on a run of adjacent active strings.
///
/// `lowest_fret` ignores open strings and is 0 only when every note is open.
/// `position` is 1-based after sorting by (`lowest_fret`, `start_string`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub notes: Vec<ShapeNote>,
    pub lowest_fret: u8,
    pub highest_fret: u8,
    /// First and last active-string indices covered
    pub start_string: usize,
    pub end_string: usize,
    #[serde(rename = "classification")]
    pub inversion: Inversion,
    pub bass_interval: u8,
    pub bass_degree: String,
    pub root_note: String,
    pub root_pitch: u8,
    pub chord_quality: String,
    pub position: usize,
    pub position_label: String,
    pub is_partial: bool,
    /// Classification of the full shape a double stop was taken from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Inversion>,
}

/// Chord context shared by every shape of one query.
#[derive(Debug, Clone)]
pub(crate) struct ShapeContext<'a> {
    pub root_note: &'a str,
    pub root_pitch: u8,
    pub chord_quality: &'a str,
}

impl Shape {
    /// Build a shape from its notes (lowest string first).
    ///
    /// Returns `None` when there are no notes or the bass interval doesn't
    /// classify. Positions are filled in later by [`number_positions`].
    pub(crate) fn build(
        notes: Vec<ShapeNote>,
        context: &ShapeContext<'_>,
        parent: Option<Inversion>,
    ) -> Option<Self> {
        let bass = notes.first()?;
        let inversion = Inversion::from_bass_interval(bass.interval)?;
        let lowest_fret = notes.iter().map(|n| n.fret).filter(|&f| f > 0).min().unwrap_or(0);
        let highest_fret = notes.iter().map(|n| n.fret).max().unwrap_or(0);
        let start_string = bass.local_string_index;
        let end_string = notes.last().map_or(start_string, |n| n.local_string_index);

        Some(Self {
            bass_interval: bass.interval,
            bass_degree: bass.degree.clone(),
            lowest_fret,
            highest_fret,
            start_string,
            end_string,
            inversion,
            root_note: context.root_note.to_string(),
            root_pitch: context.root_pitch,
            chord_quality: context.chord_quality.to_string(),
            position: 0,
            position_label: String::new(),
            is_partial: parent.is_some(),
            parent,
            notes,
        })
    }

    pub fn frets(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.fret).collect()
    }

    /// Degree labels from the lowest string up ("1", "3", "5", "1").
    pub fn degrees(&self) -> Vec<&str> {
        self.notes.iter().map(|n| n.degree.as_str()).collect()
    }

    /// Fret distance between the lowest and highest fretted notes.
    pub fn span(&self) -> u8 {
        let fretted = self.notes.iter().map(|n| n.fret).filter(|&f| f > 0);
        match (fretted.clone().min(), fretted.max()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }

    /// Distinct pitch classes sounding in the shape, ascending.
    pub fn pitch_classes(&self) -> Vec<u8> {
        let mut pitches: Vec<u8> = self.notes.iter().map(|n| n.pitch).collect();
        pitches.sort_unstable();
        pitches.dedup();
        pitches
    }

    /// The (tuning string index, fret) pairs that identify the shape.
    pub fn fingerprint(&self) -> Vec<(usize, u8)> {
        self.notes.iter().map(|n| (n.string_index, n.fret)).collect()
    }
}

/// Sort shapes by (lowest fret, start string) and number them from 1.
///
/// The sort is stable, so shapes that tie keep their enumeration order.
pub(crate) fn number_positions(mut shapes: Vec<Shape>) -> Vec<Shape> {
    shapes.sort_by_key(|s| (s.lowest_fret, s.start_string));
    for (idx, shape) in shapes.iter_mut().enumerate() {
        shape.position = idx + 1;
        shape.position_label = ordinal_position(idx + 1);
    }
    shapes
}

/// A pair of identically-shaped chords one tuning interval apart.
///
/// `from` and `to` index into the shape list the connectors were computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub fret_distance: u8,
}

/// A shape described as a named reference shape moved up the neck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovableShape {
    pub alias: &'static str,
    pub offset: u8,
    pub description: String,
}

/// Pitch and frequency of one shape note, for audio playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFrequency {
    pub frequency: f64,
    pub midi: i16,
    pub note: &'static str,
    pub degree: String,
    pub string_index: usize,
}

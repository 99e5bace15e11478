//! Pitch-class arithmetic and note-name handling.
//!
//! Pitch classes are `u8` values in `0..12` with C = 0. Note names are parsed
//! case-insensitively (the tuning tables write high strings in lowercase) and
//! normalized to the sharp spelling used by [`CHROMATIC_SCALE`].

/// Canonical sharp spellings, indexed by pitch class.
pub const CHROMATIC_SCALE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Reference pitch for A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Letter name to semitone offset from C
fn letter_to_semitone(letter: char) -> Option<i8> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

fn accidental_offset(accidental: &str) -> Option<i8> {
    match accidental {
        "" => Some(0),
        "#" | "♯" => Some(1),
        "b" | "♭" => Some(-1),
        _ => None,
    }
}

/// Convert a note name (`"C"`, `"f#"`, `"Bb"`, `"E#"`) to its pitch class.
///
/// Returns `None` for anything that isn't a letter A-G followed by at most one
/// accidental.
///
/// # Examples
/// ```
/// use banjo_chords::pitch::note_to_pitch_class;
///
/// assert_eq!(note_to_pitch_class("C"), Some(0));
/// assert_eq!(note_to_pitch_class("f#"), Some(6));
/// assert_eq!(note_to_pitch_class("Bb"), Some(10));
/// assert_eq!(note_to_pitch_class("Cb"), Some(11));
/// assert_eq!(note_to_pitch_class("H"), None);
/// ```
pub fn note_to_pitch_class(note: &str) -> Option<u8> {
    let note = note.trim();
    let mut chars = note.chars();
    let base = letter_to_semitone(chars.next()?)?;
    let acc = accidental_offset(chars.as_str())?;
    Some((base + acc).rem_euclid(12) as u8)
}

/// Normalize a note name to its canonical sharp spelling (`"db"` → `"C#"`).
pub fn normalize_note(note: &str) -> Option<&'static str> {
    note_to_pitch_class(note).map(pitch_class_name)
}

/// Canonical sharp name for a pitch class (taken mod 12).
pub fn pitch_class_name(pitch: u8) -> &'static str {
    CHROMATIC_SCALE[(pitch % 12) as usize]
}

/// Preferred display spelling: sharps, except G# and A# which read as Ab and Bb.
pub fn display_note(pitch: u8) -> &'static str {
    match pitch % 12 {
        8 => "Ab",
        10 => "Bb",
        p => CHROMATIC_SCALE[p as usize],
    }
}

/// Pitch class sounding at `fret` on a string whose open pitch class is `open`.
pub fn pitch_at_fret(open: u8, fret: u8) -> u8 {
    ((open as u16 + fret as u16) % 12) as u8
}

/// Note name sounding at `fret` on an open string named `open_note`.
///
/// Returns `None` when the open note can't be resolved.
pub fn note_at_fret(open_note: &str, fret: u8) -> Option<&'static str> {
    note_to_pitch_class(open_note).map(|open| pitch_class_name(pitch_at_fret(open, fret)))
}

/// Ascending semitone distance from `from` to `to` (`0..12`).
pub fn interval_between(from: u8, to: u8) -> u8 {
    ((to % 12) + 12 - (from % 12)) % 12
}

/// Solfège spelling (Do Re Mi Fa Sol La Si), keeping any accidental.
///
/// ```
/// use banjo_chords::pitch::to_solfege;
///
/// assert_eq!(to_solfege("G"), "Sol");
/// assert_eq!(to_solfege("Bb"), "Sib");
/// ```
pub fn to_solfege(note: &str) -> String {
    let mut chars = note.chars();
    let Some(letter) = chars.next() else {
        return String::new();
    };
    let syllable = match letter.to_ascii_uppercase() {
        'C' => "Do",
        'D' => "Re",
        'E' => "Mi",
        'F' => "Fa",
        'G' => "Sol",
        'A' => "La",
        'B' => "Si",
        _ => return note.to_string(),
    };
    format!("{}{}", syllable, chars.as_str())
}

/// A note name with an octave, as written in tuning tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctaveNote {
    pub pitch: u8,
    pub octave: i8,
}

impl OctaveNote {
    /// MIDI note number (C4 = 60).
    pub fn midi(&self) -> i16 {
        (self.octave as i16 + 1) * 12 + self.pitch as i16
    }
}

/// Parse a note with an optional octave digit (`"G4"`, `"C#3"`, `"g"`, `"D"`).
///
/// Without a digit, a lowercase letter means octave 4 (the high strings of a
/// banjo) and an uppercase letter means octave 3.
///
/// ```
/// use banjo_chords::pitch::parse_note_with_octave;
///
/// let high_g = parse_note_with_octave("g").unwrap();
/// assert_eq!(high_g.midi(), 67);
/// let low_d = parse_note_with_octave("D").unwrap();
/// assert_eq!(low_d.midi(), 50);
/// ```
pub fn parse_note_with_octave(note: &str) -> Option<OctaveNote> {
    let note = note.trim();
    let (name, octave) = match note.char_indices().last() {
        Some((idx, c)) if c.is_ascii_digit() => (&note[..idx], Some(c.to_digit(10)? as i8)),
        _ => (note, None),
    };
    let pitch = note_to_pitch_class(name)?;
    let octave = octave.unwrap_or_else(|| {
        if name.starts_with(|c: char| c.is_ascii_lowercase()) {
            4
        } else {
            3
        }
    });
    Some(OctaveNote { pitch, octave })
}

/// Equal-tempered frequency of a MIDI note.
pub fn midi_to_frequency(midi: i16) -> f64 {
    A4_FREQUENCY * 2f64.powf((midi as f64 - 69.0) / 12.0)
}

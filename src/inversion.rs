//! Inversion classification.
//!
//! A shape is classified only by the interval (from the root) of the chord
//! tone on its lowest string. The mapping doesn't depend on the chord quality.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Glyph used by diagram renderers to mark an inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeGlyph {
    Triangle,
    Rectangle,
    Diamond,
}

/// Which chord tone sits in the bass.
///
/// Serializes as its full display style (name, color, glyph, alias) so
/// renderers don't need their own lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Inversion {
    /// Root in the bass
    Root,
    /// Third (major or minor) in the bass
    First,
    /// Fifth in the bass
    Second,
    /// Seventh in the bass
    Third,
}

impl Inversion {
    pub const ALL: [Inversion; 4] = [
        Inversion::Root,
        Inversion::First,
        Inversion::Second,
        Inversion::Third,
    ];

    /// Classify a bass interval.
    ///
    /// # Examples
    /// ```
    /// use banjo_chords::Inversion;
    ///
    /// assert_eq!(Inversion::from_bass_interval(0), Some(Inversion::Root));
    /// assert_eq!(Inversion::from_bass_interval(3), Some(Inversion::First));
    /// assert_eq!(Inversion::from_bass_interval(7), Some(Inversion::Second));
    /// assert_eq!(Inversion::from_bass_interval(11), Some(Inversion::Third));
    /// assert_eq!(Inversion::from_bass_interval(1), None);
    /// ```
    pub fn from_bass_interval(interval: u8) -> Option<Self> {
        match interval {
            0 => Some(Inversion::Root),
            3 | 4 => Some(Inversion::First),
            7 => Some(Inversion::Second),
            10 | 11 => Some(Inversion::Third),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Inversion::Root => "Root Form",
            Inversion::First => "1st Inversion",
            Inversion::Second => "2nd Inversion",
            Inversion::Third => "3rd Inversion",
        }
    }

    /// Parse a display name ("Root Form") or short form ("root", "1st", "first").
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        Inversion::ALL
            .into_iter()
            .find(|inv| inv.name().eq_ignore_ascii_case(&lower))
            .or(match lower.as_str() {
                "root" | "0" => Some(Inversion::Root),
                "first" | "1st" | "1" => Some(Inversion::First),
                "second" | "2nd" | "2" => Some(Inversion::Second),
                "third" | "3rd" | "3" => Some(Inversion::Third),
                _ => None,
            })
    }

    pub fn color(&self) -> &'static str {
        match self {
            Inversion::Root => "#3366cc",
            Inversion::First => "#cc3333",
            Inversion::Second => "#cc9900",
            Inversion::Third => "#339933",
        }
    }

    pub fn glyph(&self) -> ShapeGlyph {
        match self {
            Inversion::Root | Inversion::First => ShapeGlyph::Triangle,
            Inversion::Second => ShapeGlyph::Rectangle,
            Inversion::Third => ShapeGlyph::Diamond,
        }
    }

    /// Name of the reference movable shape this inversion is played from.
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            Inversion::Root => Some("F Shape"),
            Inversion::First => Some("D Shape"),
            Inversion::Second => Some("Barre Shape"),
            Inversion::Third => None,
        }
    }
}

impl Serialize for Inversion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Inversion", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("color", self.color())?;
        state.serialize_field("shape", &self.glyph())?;
        state.serialize_field("alias", &self.alias())?;
        state.end()
    }
}

/// Classify a bass interval; `None` means the shape must be discarded.
pub fn classify_bass(interval: u8) -> Option<Inversion> {
    Inversion::from_bass_interval(interval)
}

/// Ordinal position label: 1 → "1st Position", 12 → "12th Position", 22 → "22nd Position".
pub fn ordinal_position(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} Position", n, suffix)
}

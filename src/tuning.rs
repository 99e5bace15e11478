//! Tuning dataset and the active-string resolver.
//!
//! A tuning lists its open strings from index 0 upward. On a five-string banjo
//! index 0 is the short 5th ("drone") string, which never takes part in chord
//! shapes; [`ActiveStrings`] exposes the strings that do.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BanjoError;
use crate::pitch::note_to_pitch_class;

const BUILTIN_TUNINGS: &str = include_str!("../data/tunings.yaml");

/// Tuning family, used to group the reference listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TuningFamily {
    CFamily,
    DFamily,
    GFamily,
    OtherFamily,
}

impl TuningFamily {
    pub fn label(&self) -> &'static str {
        match self {
            TuningFamily::CFamily => "C-Based Tunings",
            TuningFamily::DFamily => "D-Based Tunings",
            TuningFamily::GFamily => "G-Based Tunings",
            TuningFamily::OtherFamily => "Other Tunings (4-String)",
        }
    }
}

/// Tuning record as written in the data file.
#[derive(Debug, Clone, Deserialize)]
struct TuningRecord {
    name: String,
    #[serde(default = "default_family")]
    family: TuningFamily,
    #[serde(default)]
    description: String,
    strings: Vec<String>,
    #[serde(default)]
    short_string_index: Option<usize>,
    #[serde(default)]
    short_string_start_fret: Option<u8>,
    #[serde(default)]
    reference_tuning: Option<String>,
    #[serde(default)]
    capo_positions: BTreeMap<u8, String>,
    #[serde(default)]
    songs: String,
}

fn default_family() -> TuningFamily {
    TuningFamily::OtherFamily
}

/// A banjo tuning whose open strings all resolve to pitch classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TuningRecord", rename_all = "camelCase")]
pub struct Tuning {
    pub name: String,
    pub family: TuningFamily,
    pub description: String,
    pub strings: Vec<String>,
    /// Index of the short drone string, if any.
    pub short_string_index: Option<usize>,
    /// Fret where the short string starts on the neck.
    pub short_string_start_fret: Option<u8>,
    pub reference_tuning: Option<String>,
    pub capo_positions: BTreeMap<u8, String>,
    pub songs: String,
    #[serde(skip)]
    open_pitches: Vec<u8>,
}

impl TryFrom<TuningRecord> for Tuning {
    type Error = BanjoError;

    fn try_from(record: TuningRecord) -> Result<Self, Self::Error> {
        let mut tuning = Tuning::new(&record.name, &record.strings, record.short_string_index)?;
        tuning.family = record.family;
        tuning.description = record.description;
        tuning.short_string_start_fret = record.short_string_start_fret;
        tuning.reference_tuning = record.reference_tuning;
        tuning.capo_positions = record.capo_positions;
        tuning.songs = record.songs;
        Ok(tuning)
    }
}

impl Tuning {
    /// Build a tuning from open-string names, checking that every string resolves.
    ///
    /// ```
    /// use banjo_chords::Tuning;
    ///
    /// let open_g = Tuning::new("Open G", &["g", "D", "G", "B", "d"], Some(0)).unwrap();
    /// assert_eq!(open_g.string_count(), 5);
    /// assert!(Tuning::new("Broken", &["g", "X"], None).is_err());
    /// ```
    pub fn new<S: AsRef<str>>(
        name: &str,
        strings: &[S],
        short_string_index: Option<usize>,
    ) -> Result<Self, BanjoError> {
        if strings.is_empty() {
            return Err(BanjoError::InvalidTuning {
                name: name.to_string(),
                message: "no strings".to_string(),
            });
        }
        let open_pitches = strings
            .iter()
            .enumerate()
            .map(|(i, s)| {
                note_to_pitch_class(s.as_ref()).ok_or_else(|| BanjoError::InvalidTuning {
                    name: name.to_string(),
                    message: format!("string {} has unknown pitch '{}'", i, s.as_ref()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            family: TuningFamily::OtherFamily,
            description: String::new(),
            strings: strings.iter().map(|s| s.as_ref().to_string()).collect(),
            short_string_index,
            short_string_start_fret: short_string_index.map(|_| 6),
            reference_tuning: None,
            capo_positions: BTreeMap::new(),
            songs: String::new(),
            open_pitches,
        })
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Open pitch class of the string at `index`.
    pub fn open_pitch(&self, index: usize) -> Option<u8> {
        self.open_pitches.get(index).copied()
    }

    /// Whether index 0 is a short drone string on a five-string neck.
    ///
    /// Any other combination of drone flag and string count counts as no drone.
    pub fn has_drone(&self) -> bool {
        self.short_string_index == Some(0) && self.strings.len() == 5
    }

    pub fn active_strings(&self) -> ActiveStrings {
        ActiveStrings::resolve(self)
    }

    /// Capo positions rendered as `"Capo 2 → Key of A | Capo 5 → Key of C"`.
    pub fn capo_summary(&self) -> String {
        self.capo_positions
            .iter()
            .map(|(fret, key)| {
                if *fret == 0 {
                    key.clone()
                } else {
                    format!("Capo {} → {}", fret, key)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// The strings of a tuning that take part in chord shapes.
///
/// Position 0 is the lowest main string ("string 4" on a five-string banjo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStrings {
    /// Open pitch class of each active string.
    pub pitches: Vec<u8>,
    /// Index of each active string in the tuning's string list.
    pub indices: Vec<usize>,
    /// Open string names as written in the tuning.
    pub names: Vec<String>,
}

impl ActiveStrings {
    pub fn resolve(tuning: &Tuning) -> Self {
        let start = if tuning.has_drone() { 1 } else { 0 };
        let indices: Vec<usize> = (start..tuning.string_count()).collect();
        Self {
            pitches: indices.iter().map(|&i| tuning.open_pitches[i]).collect(),
            names: indices.iter().map(|&i| tuning.strings[i].clone()).collect(),
            indices,
        }
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }
}

/// The tuning dataset, in file order.
#[derive(Debug, Clone)]
pub struct TuningSet {
    tunings: Vec<Tuning>,
}

impl TuningSet {
    pub fn new(tunings: Vec<Tuning>) -> Self {
        Self { tunings }
    }

    /// Parse a dataset from YAML (a list of tuning records).
    pub fn from_yaml(source: &str) -> Result<Self, BanjoError> {
        let tunings: Vec<Tuning> = serde_yaml::from_str(source)?;
        Ok(Self::new(tunings))
    }

    /// The built-in dataset embedded from `data/tunings.yaml`.
    pub fn builtin() -> Result<Self, BanjoError> {
        Self::from_yaml(BUILTIN_TUNINGS)
    }

    /// Look up a tuning by exact name, then ignoring case.
    pub fn get(&self, name: &str) -> Result<&Tuning, BanjoError> {
        self.tunings
            .iter()
            .find(|t| t.name == name)
            .or_else(|| self.tunings.iter().find(|t| t.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| BanjoError::UnknownTuning(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuning> {
        self.tunings.iter()
    }

    /// Tunings of one family, in file order.
    pub fn family(&self, family: TuningFamily) -> impl Iterator<Item = &Tuning> {
        self.tunings.iter().filter(move |t| t.family == family)
    }

    pub fn len(&self) -> usize {
        self.tunings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_loads() {
        let set = TuningSet::builtin().unwrap();
        assert_eq!(set.len(), 24);

        let open_g = set.get("Open G").unwrap();
        assert_eq!(open_g.strings, vec!["g", "D", "G", "B", "d"]);
        assert_eq!(open_g.family, TuningFamily::GFamily);
        assert_eq!(open_g.short_string_start_fret, Some(6));
        assert_eq!(open_g.capo_positions.get(&2).map(String::as_str), Some("Key of A"));

        let plectrum = set.get("plectrum c").unwrap();
        assert_eq!(plectrum.string_count(), 4);
        assert_eq!(plectrum.short_string_index, None);

        assert!(matches!(set.get("Open Q"), Err(BanjoError::UnknownTuning(_))));
    }

    #[test]
    fn test_active_strings_skip_drone() {
        let set = TuningSet::builtin().unwrap();
        let active = set.get("Open G").unwrap().active_strings();
        assert_eq!(active.indices, vec![1, 2, 3, 4]);
        assert_eq!(active.pitches, vec![2, 7, 11, 2]); // D G B D
        assert_eq!(active.names, vec!["D", "G", "B", "d"]);
    }

    #[test]
    fn test_active_strings_without_drone() {
        let set = TuningSet::builtin().unwrap();
        let active = set.get("Tenor (Standard)").unwrap().active_strings();
        assert_eq!(active.indices, vec![0, 1, 2, 3]);
        assert_eq!(active.pitches, vec![0, 7, 2, 9]);
    }

    #[test]
    fn test_inconsistent_drone_flag_uses_all_strings() {
        // Drone flag on a four-string tuning is treated as no drone
        let odd = Tuning::new("Odd", &["C", "G", "B", "d"], Some(0)).unwrap();
        assert!(!odd.has_drone());
        assert_eq!(odd.active_strings().len(), 4);

        let elsewhere = Tuning::new("Elsewhere", &["g", "D", "G", "B", "d"], Some(4)).unwrap();
        assert_eq!(elsewhere.active_strings().len(), 5);
    }

    #[test]
    fn test_invalid_string_rejected_on_load() {
        let yaml = r#"
- name: Broken
  strings: [g, D, H, B, d]
"#;
        let err = TuningSet::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown pitch 'H'"));
    }

    #[test]
    fn test_capo_summary() {
        let set = TuningSet::builtin().unwrap();
        assert_eq!(
            set.get("Open G").unwrap().capo_summary(),
            "Capo 2 → Key of A | Capo 5 → Key of C | Capo 7 → Key of D"
        );
        assert_eq!(set.get("Plectrum C").unwrap().capo_summary(), "Key of C");
    }
}

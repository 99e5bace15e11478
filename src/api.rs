//! # Public API
//!
//! [`ChordEngine`] bundles the immutable chord quality table with the search
//! limits. Build it once and pass it by reference; every query is a pure
//! function of its arguments and the engine.
//!
//! ## Typical Usage
//!
//! ```rust
//! use banjo_chords::{ChordEngine, TuningSet, VoicingMode};
//!
//! let engine = ChordEngine::builtin()?;
//! let tunings = TuningSet::builtin()?;
//! let open_g = tunings.get("Open G")?;
//!
//! let shapes = engine.generate_chord_shapes("C", "MAJOR", open_g, VoicingMode::Full, 12);
//! for shape in &shapes {
//!     println!("{}: {} {:?}", shape.position_label, shape.inversion.name(), shape.frets());
//! }
//!
//! let diagram = engine.find_chord_voicing(open_g, "C", "major", 12);
//! assert!(diagram.is_some());
//! # Ok::<(), banjo_chords::BanjoError>(())
//! ```

use crate::chord::{ChordQuality, ChordTable};
use crate::config::SearchConfig;
use crate::error::BanjoError;
use crate::shapes::{generate_chord_shapes, Shape, VoicingMode};
use crate::tuning::Tuning;
use crate::voicing::{find_chord_voicing, ChordVoicing};

#[derive(Debug, Clone)]
pub struct ChordEngine {
    chords: ChordTable,
    config: SearchConfig,
}

impl ChordEngine {
    pub fn new(chords: ChordTable, config: SearchConfig) -> Self {
        Self { chords, config }
    }

    /// Engine over the built-in chord table with default limits.
    pub fn builtin() -> Result<Self, BanjoError> {
        Ok(Self::new(ChordTable::builtin()?, SearchConfig::default()))
    }

    pub fn chords(&self) -> &ChordTable {
        &self.chords
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn quality(&self, key: &str) -> Option<&ChordQuality> {
        self.chords.get(key)
    }

    /// Chord shapes for a root and chord quality key.
    ///
    /// An unknown quality key or root note gives an empty list.
    pub fn generate_chord_shapes(
        &self,
        root_note: &str,
        quality_key: &str,
        tuning: &Tuning,
        mode: VoicingMode,
        max_fret: u8,
    ) -> Vec<Shape> {
        let Some(quality) = self.chords.get(quality_key) else {
            log::debug!("Unknown chord quality '{}'", quality_key);
            return vec![];
        };
        generate_chord_shapes(root_note, quality, tuning, mode, max_fret, &self.config)
    }

    /// The single best diagram voicing, or `None` if there isn't one.
    pub fn find_chord_voicing(
        &self,
        tuning: &Tuning,
        root_note: &str,
        quality_key: &str,
        max_fret: u8,
    ) -> Option<ChordVoicing> {
        let quality = self.chords.get(quality_key)?;
        find_chord_voicing(tuning, root_note, quality, max_fret, &self.config)
    }
}

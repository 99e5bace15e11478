//! # Shapes Module
//!
//! Find, classify and relate the chord shapes a tuning offers for a chord.
//!
//! ## Pipeline
//! 1. **Active strings** - drop the drone string ([`crate::tuning::ActiveStrings`])
//! 2. **Search** - enumerate one chord tone per string over runs of adjacent strings,
//!    pruning on fretted reach and requiring enough distinct chord tones
//! 3. **Classify** - the bass interval picks the inversion ([`crate::Inversion`])
//! 4. **Number** - sort by lowest fret, then start string, and label "1st Position", ...
//! 5. **Double stops** (optional) - split full shapes into two-note pieces
//! 6. **Connectors** - pair shapes that sit one tuning interval apart
//!
//! ## Sub-modules
//! - `types` - Shape, ShapeNote, Connector, MovableShape definitions
//! - `search` - the full-shape search
//! - `partial` - double stop generation
//! - `connector` - tuning interval, connectors and movable shape names
//! - `frequency` - note frequencies for playback
//!
//! ## Example
//! ```rust
//! use banjo_chords::{ChordTable, SearchConfig, TuningSet, VoicingMode};
//! use banjo_chords::shapes::generate_chord_shapes;
//!
//! let chords = ChordTable::builtin().unwrap();
//! let tunings = TuningSet::builtin().unwrap();
//! let open_g = tunings.get("Open G").unwrap();
//! let major = chords.get("MAJOR").unwrap();
//!
//! let shapes = generate_chord_shapes("G", major, open_g, VoicingMode::Full, 15, &SearchConfig::default());
//! assert!(!shapes.is_empty());
//! assert_eq!(shapes[0].position_label, "1st Position");
//! ```

mod connector;
mod frequency;
mod partial;
mod search;
mod types;

#[cfg(test)]
mod tests;

pub use connector::{calculate_tuning_interval, find_shape_connectors, get_movable_shape_info};
pub use frequency::shape_frequencies;
pub use partial::to_partial_shapes;
pub use search::{find_shapes, scan_chord_tones};
pub use types::{ChordTone, Connector, MovableShape, NoteFrequency, Shape, ShapeNote, VoicingMode};

use crate::chord::ChordQuality;
use crate::config::SearchConfig;
use crate::inversion::Inversion;
use crate::tuning::Tuning;

/// Full shapes, or the double stops taken from them.
pub fn generate_chord_shapes(
    root_note: &str,
    quality: &ChordQuality,
    tuning: &Tuning,
    mode: VoicingMode,
    max_fret: u8,
    config: &SearchConfig,
) -> Vec<Shape> {
    let full = find_shapes(root_note, quality, tuning, max_fret, config);
    match mode {
        VoicingMode::Full => full,
        VoicingMode::Partial => to_partial_shapes(&full),
    }
}

/// Keep only shapes of the given inversions; an empty filter keeps everything.
///
/// Position numbers are left as they were.
pub fn filter_shapes_by_inversion(shapes: Vec<Shape>, inversions: &[Inversion]) -> Vec<Shape> {
    if inversions.is_empty() {
        return shapes;
    }
    shapes
        .into_iter()
        .filter(|s| inversions.contains(&s.inversion))
        .collect()
}

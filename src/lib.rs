pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod harness;
pub mod inversion;
pub mod pitch;
pub mod shapes;
pub mod tuning;
pub mod voicing;

pub use api::ChordEngine;
pub use chord::{ChordQuality, ChordTable};
pub use config::SearchConfig;
pub use error::*;
pub use harness::{ValidationReport, ValidationSuite};
pub use inversion::{classify_bass, Inversion, ShapeGlyph};
pub use shapes::{
    calculate_tuning_interval, filter_shapes_by_inversion, find_shape_connectors,
    get_movable_shape_info, shape_frequencies, Connector, MovableShape, Shape, ShapeNote,
    VoicingMode,
};
pub use tuning::{ActiveStrings, Tuning, TuningFamily, TuningSet};
pub use voicing::{Barre, ChordVoicing, StringPosition};

/// Run the built-in validation cases against the built-in tables.
/// This is the quickest way to check the engine end to end.
pub fn validate_builtin() -> Result<ValidationReport, BanjoError> {
    let engine = ChordEngine::builtin()?;
    let tunings = TuningSet::builtin()?;
    Ok(ValidationSuite::builtin()?.run(&engine, &tunings))
}

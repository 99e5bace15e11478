//! # Error Types
//!
//! This module defines the error type for the data boundary of the crate.
//!
//! Chord-shape queries never fail: an unknown root note, a tuning with too few
//! strings or a chord with no classifiable bass simply produce an empty result.
//! Errors only come from loading the static tables (tunings, chord qualities,
//! validation cases), reading a config file, or looking up a name that isn't
//! in a table.
//!
//! ## Usage
//! ```rust
//! use banjo_chords::{BanjoError, TuningSet};
//!
//! let tunings = TuningSet::builtin().unwrap();
//! match tunings.get("Open Q") {
//!     Ok(tuning) => println!("{}", tuning.name),
//!     Err(BanjoError::UnknownTuning(name)) => eprintln!("No tuning named {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BanjoError {
    /// A note name that doesn't resolve to a pitch class.
    ///
    /// # Example
    /// ```
    /// # use banjo_chords::BanjoError;
    /// let err = BanjoError::UnknownNote("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown note name: H");
    /// ```
    #[error("Unknown note name: {0}")]
    UnknownNote(String),

    /// A tuning record that breaks the tuning invariants.
    ///
    /// Occurs when an open string can't be resolved to a pitch class or the
    /// string list is empty.
    ///
    /// # Example
    /// ```
    /// # use banjo_chords::BanjoError;
    /// let err = BanjoError::InvalidTuning {
    ///     name: "Open G".to_string(),
    ///     message: "string 2 has unknown pitch 'X'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid tuning 'Open G': string 2 has unknown pitch 'X'");
    /// ```
    #[error("Invalid tuning '{name}': {message}")]
    InvalidTuning { name: String, message: String },

    /// Lookup of a tuning name that isn't in the dataset.
    #[error("Unknown tuning: {0}")]
    UnknownTuning(String),

    /// Lookup of a chord quality key (or alias) that isn't in the table.
    ///
    /// # Example
    /// ```
    /// # use banjo_chords::BanjoError;
    /// let err = BanjoError::UnknownChordQuality("maj13".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord quality: maj13");
    /// ```
    #[error("Unknown chord quality: {0}")]
    UnknownChordQuality(String),

    /// Malformed static data (YAML tables).
    #[error("Invalid data table: {0}")]
    DataError(String),

    /// Unreadable or malformed configuration file.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<serde_yaml::Error> for BanjoError {
    fn from(e: serde_yaml::Error) -> Self {
        BanjoError::DataError(e.to_string())
    }
}

//! # Validation Harness
//!
//! Declarative checks of the shape engine against known tuning and chord
//! combinations. Cases live in `data/validation.yaml`; each one names a
//! query and the properties its result must have.
//!
//! ## Shape cases
//! - `has_shapes` / `min_shapes` - how many shapes come back
//! - `all_two_notes` - every shape is a double stop
//! - `classification` - the first shape with this inversion name has the
//!   expected color and bass interval
//! - `degrees` - some shape of that inversion has exactly these degrees
//! - `movable_alias` - the first Root Form shape's movable shape name
//!
//! ## Connector cases
//! - `tuning_interval` - the N-fret rule for the tuning
//! - `has_connectors` - the shapes for `root`/`quality` contain a connector
//!
//! A failing case records what it found; it never aborts the run.

use serde::{Deserialize, Serialize};

use crate::api::ChordEngine;
use crate::error::BanjoError;
use crate::inversion::Inversion;
use crate::shapes::{
    calculate_tuning_interval, find_shape_connectors, get_movable_shape_info, Shape, VoicingMode,
};
use crate::tuning::TuningSet;

const BUILTIN_CASES: &str = include_str!("../data/validation.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationExpectation {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub bass_interval: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShapeExpectations {
    pub has_shapes: Option<bool>,
    pub min_shapes: Option<usize>,
    pub all_two_notes: bool,
    pub classification: Option<ClassificationExpectation>,
    pub degrees: Option<Vec<String>>,
    pub movable_alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeCase {
    pub id: String,
    pub description: String,
    pub tuning: String,
    pub root: String,
    pub quality: String,
    #[serde(default)]
    pub mode: VoicingMode,
    #[serde(default)]
    pub expect: ShapeExpectations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorCase {
    pub id: String,
    pub description: String,
    pub tuning: String,
    #[serde(default)]
    pub tuning_interval: Option<u8>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub has_connectors: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationSuite {
    pub shape_cases: Vec<ShapeCase>,
    pub connector_cases: Vec<ConnectorCase>,
}

/// Outcome of one case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub id: String,
    pub description: String,
    pub passed: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub results: Vec<CaseResult>,
}

impl ValidationReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

impl ValidationSuite {
    pub fn from_yaml(source: &str) -> Result<Self, BanjoError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// The built-in cases embedded from `data/validation.yaml`.
    pub fn builtin() -> Result<Self, BanjoError> {
        Self::from_yaml(BUILTIN_CASES)
    }

    /// Run every case, shape cases first.
    pub fn run(&self, engine: &ChordEngine, tunings: &TuningSet) -> ValidationReport {
        let mut results = Vec::new();
        for case in &self.shape_cases {
            let errors = check_shape_case(case, engine, tunings);
            results.push(case_result(&case.id, &case.description, errors));
        }
        for case in &self.connector_cases {
            let errors = check_connector_case(case, engine, tunings);
            results.push(case_result(&case.id, &case.description, errors));
        }
        let report = ValidationReport { results };
        log::info!("Validation: {}/{} passed", report.passed(), report.total());
        report
    }
}

fn case_result(id: &str, description: &str, errors: Vec<String>) -> CaseResult {
    if !errors.is_empty() {
        log::warn!("{} failed: {}", id, errors.join("; "));
    }
    CaseResult {
        id: id.to_string(),
        description: description.to_string(),
        passed: errors.is_empty(),
        errors,
    }
}

/// Checks stop at the first failure, like an assertion would.
fn check_shape_case(case: &ShapeCase, engine: &ChordEngine, tunings: &TuningSet) -> Vec<String> {
    let tuning = match tunings.get(&case.tuning) {
        Ok(t) => t,
        Err(e) => return vec![e.to_string()],
    };
    if engine.quality(&case.quality).is_none() {
        return vec![format!("Unknown chord quality: {}", case.quality)];
    }
    let shapes = engine.generate_chord_shapes(
        &case.root,
        &case.quality,
        tuning,
        case.mode,
        engine.config().max_fret,
    );
    let expect = &case.expect;

    if expect.has_shapes == Some(true) && shapes.is_empty() {
        return vec!["Expected shapes but none were generated".to_string()];
    }
    if let Some(min) = expect.min_shapes {
        if shapes.len() < min {
            return vec![format!("Expected at least {} shapes, got {}", min, shapes.len())];
        }
    }
    if expect.all_two_notes {
        let invalid = shapes.iter().filter(|s| s.notes.len() != 2).count();
        if invalid > 0 {
            return vec![format!("{} shapes don't have exactly 2 notes", invalid)];
        }
    }
    if let Some(exp) = &expect.classification {
        if let Err(message) = check_classification(&shapes, exp, expect.degrees.as_deref()) {
            return vec![message];
        }
    }
    if let Some(alias) = &expect.movable_alias {
        let info = shapes
            .iter()
            .find(|s| s.inversion == Inversion::Root)
            .and_then(get_movable_shape_info);
        if let Some(info) = info {
            if info.alias != alias.as_str() {
                return vec![format!("Expected alias \"{}\", got \"{}\"", alias, info.alias)];
            }
        }
    }
    vec![]
}

fn check_classification(
    shapes: &[Shape],
    exp: &ClassificationExpectation,
    degrees: Option<&[String]>,
) -> Result<(), String> {
    let Some(shape) = shapes.iter().find(|s| s.inversion.name() == exp.name) else {
        let mut found: Vec<&str> = shapes.iter().map(|s| s.inversion.name()).collect();
        found.sort_unstable();
        found.dedup();
        return Err(format!(
            "No shape with classification \"{}\" found. Found: {}",
            exp.name,
            found.join(", ")
        ));
    };
    if let Some(color) = &exp.color {
        if shape.inversion.color() != color.as_str() {
            return Err(format!("Expected color {}, got {}", color, shape.inversion.color()));
        }
    }
    if let Some(interval) = exp.bass_interval {
        if shape.bass_interval != interval {
            return Err(format!(
                "Expected bass interval {}, got {}",
                interval, shape.bass_interval
            ));
        }
    }
    if let Some(degrees) = degrees {
        let matched = shapes
            .iter()
            .filter(|s| s.inversion == shape.inversion)
            .any(|s| s.degrees() == degrees);
        if !matched {
            return Err(format!(
                "No {} shape with degrees {}",
                exp.name,
                degrees.join("-")
            ));
        }
    }
    Ok(())
}

fn check_connector_case(
    case: &ConnectorCase,
    engine: &ChordEngine,
    tunings: &TuningSet,
) -> Vec<String> {
    let tuning = match tunings.get(&case.tuning) {
        Ok(t) => t,
        Err(e) => return vec![e.to_string()],
    };
    let interval = calculate_tuning_interval(tuning);
    if let Some(expected) = case.tuning_interval {
        if interval != expected {
            return vec![format!(
                "Expected tuning interval {}, got {}",
                expected, interval
            )];
        }
    }
    if let (Some(want), Some(root), Some(quality)) = (case.has_connectors, &case.root, &case.quality) {
        let shapes = engine.generate_chord_shapes(
            root,
            quality,
            tuning,
            VoicingMode::Full,
            engine.config().max_fret,
        );
        let found = !find_shape_connectors(&shapes, tuning).is_empty();
        if found != want {
            return vec![format!(
                "Expected connectors: {}, found: {}",
                want, found
            )];
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_suite_passes() {
        let engine = ChordEngine::builtin().unwrap();
        let tunings = TuningSet::builtin().unwrap();
        let report = ValidationSuite::builtin().unwrap().run(&engine, &tunings);

        assert_eq!(report.total(), 11);
        for result in &report.results {
            assert!(result.passed, "{} failed: {:?}", result.id, result.errors);
        }
    }

    #[test]
    fn test_failing_case_reports_errors() {
        let yaml = r#"
shape_cases:
  - id: BAD_1
    description: Unknown tuning
    tuning: Open Q
    root: G
    quality: MAJOR
  - id: BAD_2
    description: Wrong bass interval
    tuning: Open G
    root: G
    quality: MAJOR
    expect:
      classification: { name: Root Form, bass_interval: 4 }
connector_cases:
  - id: BAD_3
    description: Wrong interval
    tuning: Open G
    tuning_interval: 7
"#;
        let engine = ChordEngine::builtin().unwrap();
        let tunings = TuningSet::builtin().unwrap();
        let report = ValidationSuite::from_yaml(yaml).unwrap().run(&engine, &tunings);

        assert_eq!(report.failed(), 3);
        assert_eq!(report.results[0].errors, vec!["Unknown tuning: Open Q"]);
        assert_eq!(report.results[1].errors, vec!["Expected bass interval 4, got 0"]);
        assert_eq!(report.results[2].errors, vec!["Expected tuning interval 7, got 5"]);
    }
}

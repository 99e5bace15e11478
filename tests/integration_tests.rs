//! Integration tests for the banjo chord engine
//!
//! Tests the public API end to end: tuning lookup, shape search, connectors
//! and the diagram voicing.

use banjo_chords::{
    calculate_tuning_interval, find_shape_connectors, get_movable_shape_info, validate_builtin,
    BanjoError, ChordEngine, ChordTable, Inversion, SearchConfig, Tuning, TuningSet, VoicingMode,
};

fn setup() -> (ChordEngine, TuningSet) {
    (ChordEngine::builtin().unwrap(), TuningSet::builtin().unwrap())
}

#[test]
fn test_builtin_validation_passes() {
    let report = validate_builtin().unwrap();
    assert!(report.all_passed(), "{:?}", report.results);
    assert_eq!(report.failed(), 0);
}

#[test]
fn test_every_tuning_has_g_major_shapes() {
    let (engine, tunings) = setup();
    for tuning in tunings.iter() {
        let shapes = engine.generate_chord_shapes("G", "MAJOR", tuning, VoicingMode::Full, 15);
        assert!(!shapes.is_empty(), "no G major shapes in {}", tuning.name);
    }
}

#[test]
fn test_quality_aliases_resolve() {
    let (engine, tunings) = setup();
    let open_g = tunings.get("Open G").unwrap();

    let by_key = engine.generate_chord_shapes("A", "MIN7", open_g, VoicingMode::Full, 12);
    let by_alias = engine.generate_chord_shapes("A", "m7", open_g, VoicingMode::Full, 12);
    assert!(!by_key.is_empty());
    assert_eq!(by_key, by_alias);

    // "M" is major and "m" is minor
    assert_eq!(engine.quality("M").unwrap().key, "MAJOR");
    assert_eq!(engine.quality("m").unwrap().key, "MINOR");
    assert_eq!(engine.quality("dom7").unwrap().key, "DOM7");
}

#[test]
fn test_unknown_inputs() {
    let (engine, tunings) = setup();
    let open_g = tunings.get("open g").unwrap();
    assert_eq!(open_g.name, "Open G");

    assert!(engine
        .generate_chord_shapes("G", "NOPE", open_g, VoicingMode::Full, 15)
        .is_empty());
    assert!(engine.find_chord_voicing(open_g, "G", "NOPE", 12).is_none());

    match tunings.get("Open Q") {
        Err(BanjoError::UnknownTuning(name)) => assert_eq!(name, "Open Q"),
        other => panic!("expected UnknownTuning, got {:?}", other),
    }
    assert!(matches!(
        engine.chords().require("NOPE"),
        Err(BanjoError::UnknownChordQuality(_))
    ));
}

#[test]
fn test_connectors_and_movable_shapes() {
    let (engine, tunings) = setup();
    let double_c = tunings.get("Double C").unwrap();
    assert_eq!(calculate_tuning_interval(double_c), 7);

    let shapes = engine.generate_chord_shapes("C", "MAJOR", double_c, VoicingMode::Full, 15);
    for c in find_shape_connectors(&shapes, double_c) {
        assert_eq!(shapes[c.to].lowest_fret - shapes[c.from].lowest_fret, 7);
    }
    for shape in &shapes {
        let info = get_movable_shape_info(shape);
        assert_eq!(info.is_some(), shape.inversion != Inversion::Third);
    }
}

#[test]
fn test_plectrum_c_voicing() {
    let (engine, tunings) = setup();
    let plectrum = tunings.get("Plectrum C").unwrap();
    let voicing = engine.find_chord_voicing(plectrum, "C", "major", 12).unwrap();

    let frets: Vec<Option<u8>> = voicing.positions.iter().map(|p| p.fret).collect();
    assert_eq!(frets, vec![Some(0), Some(0), Some(1), Some(2)]);
    assert_eq!(voicing.chord_notes, vec!["C", "E", "G"]);

    let roots: Vec<usize> = voicing
        .positions
        .iter()
        .filter(|p| p.is_root)
        .map(|p| p.string_num)
        .collect();
    assert_eq!(roots, vec![4, 2]); // open C and B string fret 1
}

#[test]
fn test_custom_tuning_and_config() {
    let config = SearchConfig::from_yaml("max_reach: 3\nmin_strings: 4\n").unwrap();
    let engine = ChordEngine::new(ChordTable::builtin().unwrap(), config);
    let tenor = Tuning::new("Tenor", &["C", "G", "d", "a"], None).unwrap();

    let shapes = engine.generate_chord_shapes("C", "MAJOR", &tenor, VoicingMode::Full, 12);
    assert!(!shapes.is_empty());
    for shape in &shapes {
        assert_eq!(shape.notes.len(), 4);
        assert!(shape.span() <= 3);
    }
    assert_eq!(calculate_tuning_interval(&tenor), 7);
}

use super::*;
use crate::chord::ChordTable;
use crate::tuning::TuningSet;

fn shapes_for(tuning: &str, root: &str, quality: &str, mode: VoicingMode) -> Vec<Shape> {
    let chords = ChordTable::builtin().unwrap();
    let tunings = TuningSet::builtin().unwrap();
    let config = SearchConfig::default();
    generate_chord_shapes(
        root,
        chords.get(quality).unwrap(),
        tunings.get(tuning).unwrap(),
        mode,
        config.max_fret,
        &config,
    )
}

fn open_g() -> Tuning {
    TuningSet::builtin().unwrap().get("Open G").unwrap().clone()
}

#[test]
fn test_scan_chord_tones_on_d_string() {
    let chords = ChordTable::builtin().unwrap();
    let major = chords.get("MAJOR").unwrap();
    // D string, G major: D (open), G (5), B (9), D (12)
    let tones = scan_chord_tones(&[2], major, 7, 12);
    let frets: Vec<u8> = tones[0].iter().map(|t| t.fret).collect();
    assert_eq!(frets, vec![0, 5, 9, 12]);
    let degrees: Vec<&str> = tones[0].iter().map(|t| t.degree.as_str()).collect();
    assert_eq!(degrees, vec!["5", "1", "3", "5"]);
}

#[test]
fn test_full_shapes_cover_the_triad() {
    let shapes = shapes_for("Open G", "C", "MAJOR", VoicingMode::Full);
    assert!(!shapes.is_empty());
    for shape in &shapes {
        assert!(shape.notes.len() >= 3);
        assert_eq!(shape.pitch_classes(), vec![0, 4, 7], "{:?}", shape.frets());
        assert!(shape.span() <= 5);
        assert!(shape.highest_fret <= 15);
        assert!(!shape.is_partial);
    }
}

#[test]
fn test_shapes_use_adjacent_strings() {
    for shape in shapes_for("Open G", "D", "MAJOR", VoicingMode::Full) {
        let strings: Vec<usize> = shape.notes.iter().map(|n| n.local_string_index).collect();
        let expected: Vec<usize> = (shape.start_string..=shape.end_string).collect();
        assert_eq!(strings, expected);
        // The drone (string 0) is never part of a shape in Open G
        assert!(shape.notes.iter().all(|n| n.string_index == n.local_string_index + 1));
    }
}

#[test]
fn test_positions_follow_sort_order() {
    let shapes = shapes_for("Open G", "A", "MINOR", VoicingMode::Full);
    for (idx, shape) in shapes.iter().enumerate() {
        assert_eq!(shape.position, idx + 1);
    }
    for pair in shapes.windows(2) {
        let a = (pair[0].lowest_fret, pair[0].start_string);
        let b = (pair[1].lowest_fret, pair[1].start_string);
        assert!(a <= b, "{:?} sorted after {:?}", b, a);
    }
    assert_eq!(shapes[0].position_label, "1st Position");
    if shapes.len() >= 12 {
        assert_eq!(shapes[10].position_label, "11th Position");
        assert_eq!(shapes[11].position_label, "12th Position");
    }
}

#[test]
fn test_search_is_deterministic() {
    let first = shapes_for("Double C", "F", "DOM7", VoicingMode::Full);
    let second = shapes_for("Double C", "F", "DOM7", VoicingMode::Full);
    assert_eq!(first, second);
}

#[test]
fn test_open_strings_ignored_by_reach_and_lowest_fret() {
    let chords = ChordTable::builtin().unwrap();
    let tuning = open_g();
    // No fretted spread allowed at all; opens must not count toward it
    let config = SearchConfig {
        max_reach: 0,
        ..SearchConfig::default()
    };
    let shapes = find_shapes("G", chords.get("MAJOR").unwrap(), &tuning, 15, &config);

    // Open D under G B D at the 12th fret
    let shape = shapes
        .iter()
        .find(|s| s.frets() == vec![0, 12, 12, 12])
        .unwrap();
    assert_eq!(shape.lowest_fret, 12);
    assert_eq!(shape.highest_fret, 12);
    assert_eq!(shape.span(), 0);
    assert_eq!(shape.inversion, Inversion::Second);
    assert!(shapes.iter().any(|s| s.frets() == vec![0, 12, 12]));

    for shape in &shapes {
        let fretted: Vec<u8> = shape.frets().into_iter().filter(|&f| f > 0).collect();
        match fretted.iter().min() {
            Some(&lowest) => {
                assert_eq!(shape.lowest_fret, lowest);
                assert!(fretted.iter().all(|&f| f == lowest));
            }
            None => assert_eq!(shape.lowest_fret, 0),
        }
    }
}

#[test]
fn test_open_g_g_major_open_shapes() {
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);

    // D G B, D G B d and G B d all open; start string breaks the tie
    let open: Vec<&Shape> = shapes.iter().filter(|s| s.lowest_fret == 0).collect();
    assert_eq!(open.len(), 3);
    assert_eq!(open[0].frets(), vec![0, 0, 0]);
    assert_eq!(open[0].inversion, Inversion::Second);
    assert_eq!(open[0].bass_degree, "5");
    assert_eq!(open[1].frets(), vec![0, 0, 0, 0]);
    assert_eq!(open[2].start_string, 1);
    assert_eq!(open[2].inversion, Inversion::Root);

    for inversion in [Inversion::Root, Inversion::First, Inversion::Second] {
        assert!(shapes.iter().any(|s| s.inversion == inversion), "{:?}", inversion);
    }
    assert!(shapes.iter().all(|s| s.inversion != Inversion::Third));
}

#[test]
fn test_open_g_f_major_root_form() {
    let shapes = shapes_for("Open G", "F", "MAJOR", VoicingMode::Full);
    // D3 G2 B1 d3: F A C F
    let shape = shapes
        .iter()
        .find(|s| s.frets() == vec![3, 2, 1, 3] && s.start_string == 0)
        .unwrap();
    assert_eq!(shape.inversion, Inversion::Root);
    assert_eq!(shape.degrees(), vec!["1", "3", "5", "1"]);
    assert_eq!(shape.lowest_fret, 1);
    assert_eq!(shape.highest_fret, 3);
    assert_eq!(shape.root_note, "F");
    assert_eq!(shape.chord_quality, "MAJOR");
}

#[test]
fn test_seventh_third_inversion() {
    let shapes = shapes_for("Open G", "G", "DOM7", VoicingMode::Full);
    let third = shapes
        .iter()
        .find(|s| s.inversion == Inversion::Third)
        .unwrap();
    assert_eq!(third.bass_interval, 10);
    assert_eq!(third.bass_degree, "♭7");
    assert_eq!(third.notes[0].note, "F");

    // Three of the four tones are enough for a seventh chord
    assert!(shapes.iter().all(|s| s.pitch_classes().len() >= 3));
}

#[test]
fn test_unknown_root_gives_no_shapes() {
    assert!(shapes_for("Open G", "H", "MAJOR", VoicingMode::Full).is_empty());
    assert!(shapes_for("Open G", "", "MAJOR", VoicingMode::Partial).is_empty());
}

#[test]
fn test_partial_shapes() {
    let partials = shapes_for("Open G", "C", "MAJOR", VoicingMode::Partial);
    assert!(!partials.is_empty());
    for shape in &partials {
        assert_eq!(shape.notes.len(), 2);
        assert!(shape.is_partial);
        assert!(shape.parent.is_some());
        assert_eq!(shape.end_string, shape.start_string + 1);
        assert!(shape.notes.iter().any(|n| matches!(n.interval, 0 | 3 | 4)));
    }
    for (idx, shape) in partials.iter().enumerate() {
        assert_eq!(shape.position, idx + 1);
    }

    let mut keys: Vec<Vec<(usize, u8)>> = partials.iter().map(|s| s.fingerprint()).collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[test]
fn test_tuning_intervals() {
    let tunings = TuningSet::builtin().unwrap();
    assert_eq!(calculate_tuning_interval(tunings.get("Open G").unwrap()), 5);
    assert_eq!(calculate_tuning_interval(tunings.get("Double C").unwrap()), 7);

    let single = Tuning::new("One string", &["G"], None).unwrap();
    assert_eq!(calculate_tuning_interval(&single), 0);
    assert!(find_shape_connectors(&[], &single).is_empty());
}

#[test]
fn test_connectors_span_one_tuning_interval() {
    let tuning = open_g();
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);
    let connectors = find_shape_connectors(&shapes, &tuning);
    assert!(!connectors.is_empty());
    for c in &connectors {
        assert!(c.from < c.to);
        assert_eq!(c.fret_distance, 5);
        assert_eq!(shapes[c.to].lowest_fret - shapes[c.from].lowest_fret, 5);
    }
}

#[test]
fn test_movable_shape_descriptions() {
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);
    let open_root = shapes
        .iter()
        .find(|s| s.inversion == Inversion::Root && s.lowest_fret == 0)
        .unwrap();
    let info = get_movable_shape_info(open_root).unwrap();
    assert_eq!(info.alias, "F Shape");
    assert_eq!(info.description, "F Shape");

    let f_shapes = shapes_for("Open G", "F", "MAJOR", VoicingMode::Full);
    let f_root = f_shapes.iter().find(|s| s.frets() == vec![3, 2, 1, 3]).unwrap();
    assert_eq!(get_movable_shape_info(f_root).unwrap().description, "F Shape + 1 Fret");

    for shape in shapes.iter().filter(|s| s.lowest_fret > 1) {
        let info = get_movable_shape_info(shape).unwrap();
        assert_eq!(
            info.description,
            format!("{} + {} Frets", info.alias, shape.lowest_fret)
        );
    }

    let sevenths = shapes_for("Open G", "G", "DOM7", VoicingMode::Full);
    let third = sevenths.iter().find(|s| s.inversion == Inversion::Third).unwrap();
    assert!(get_movable_shape_info(third).is_none());
}

#[test]
fn test_filter_by_inversion() {
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);
    let total = shapes.len();

    let roots = filter_shapes_by_inversion(shapes.clone(), &[Inversion::Root]);
    assert!(!roots.is_empty());
    assert!(roots.iter().all(|s| s.inversion == Inversion::Root));

    let two = filter_shapes_by_inversion(shapes.clone(), &[Inversion::Root, Inversion::Second]);
    assert!(two.len() > roots.len());

    assert_eq!(filter_shapes_by_inversion(shapes, &[]).len(), total);
}

#[test]
fn test_shape_frequencies() {
    let tuning = open_g();
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);
    let freqs = shape_frequencies(&shapes[0], &tuning);

    // Open D3, G3, B3
    let midi: Vec<i16> = freqs.iter().map(|f| f.midi).collect();
    assert_eq!(midi, vec![50, 55, 59]);
    assert!((freqs[1].frequency - 196.0).abs() < 0.01);
    assert_eq!(freqs[1].note, "G");
    assert_eq!(freqs[1].degree, "1");
}

#[test]
fn test_shape_serializes_camel_case() {
    let shapes = shapes_for("Open G", "G", "MAJOR", VoicingMode::Full);
    let json = serde_json::to_value(&shapes[0]).unwrap();
    assert_eq!(json["positionLabel"], "1st Position");
    assert_eq!(json["classification"]["name"], "2nd Inversion");
    assert_eq!(json["classification"]["color"], "#cc9900");
    assert_eq!(json["notes"][0]["stringIndex"], 1);
    assert!(json.get("parent").is_none());
}

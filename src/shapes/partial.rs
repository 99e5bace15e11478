//! Double stops: adjacent two-string pieces of full shapes.

use std::collections::HashSet;

use super::types::{number_positions, Shape, ShapeContext};

/// Root or third: the tones that still identify the chord in a two-note voicing.
fn is_defining(interval: u8) -> bool {
    matches!(interval, 0 | 3 | 4)
}

/// Split full shapes into adjacent-string pairs that carry a root or a third.
///
/// Pairs are classified by their lower string, deduplicated by their
/// (string, fret) pairs, then sorted and numbered on their own.
pub fn to_partial_shapes(full_shapes: &[Shape]) -> Vec<Shape> {
    let mut seen = HashSet::new();
    let mut partials = Vec::new();

    for shape in full_shapes {
        let context = ShapeContext {
            root_note: &shape.root_note,
            root_pitch: shape.root_pitch,
            chord_quality: &shape.chord_quality,
        };
        for pair in shape.notes.windows(2) {
            if !pair.iter().any(|n| is_defining(n.interval)) {
                continue;
            }
            let key = (pair[0].string_index, pair[0].fret, pair[1].string_index, pair[1].fret);
            if !seen.insert(key) {
                continue;
            }
            if let Some(partial) = Shape::build(pair.to_vec(), &context, Some(shape.inversion)) {
                partials.push(partial);
            }
        }
    }

    log::debug!(
        "{} double stops from {} full shapes",
        partials.len(),
        full_shapes.len()
    );
    number_positions(partials)
}

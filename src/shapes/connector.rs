//! Movability: the "N-fret rule" and named movable shapes.
//!
//! On a banjo the two lowest main strings sit a fixed interval apart, so a
//! chord shape reappears with the same fingering that many frets higher.

use crate::pitch::interval_between;
use crate::tuning::Tuning;

use super::types::{Connector, MovableShape, Shape};

/// Semitones from the lowest active string up to the next one (`0..12`).
///
/// Returns 0 when the tuning has fewer than two active strings.
///
/// ```
/// use banjo_chords::{calculate_tuning_interval, Tuning};
///
/// let open_g = Tuning::new("Open G", &["g", "D", "G", "B", "d"], Some(0)).unwrap();
/// assert_eq!(calculate_tuning_interval(&open_g), 5);
/// ```
pub fn calculate_tuning_interval(tuning: &Tuning) -> u8 {
    let active = tuning.active_strings();
    match active.pitches.as_slice() {
        [lowest, next, ..] => interval_between(*lowest, *next),
        _ => 0,
    }
}

/// Every ordered pair of shapes (earlier, later) whose lowest frets differ by
/// exactly the tuning interval.
pub fn find_shape_connectors(shapes: &[Shape], tuning: &Tuning) -> Vec<Connector> {
    let interval = calculate_tuning_interval(tuning);
    let mut connectors = Vec::new();
    if interval == 0 {
        return connectors;
    }
    for (i, current) in shapes.iter().enumerate() {
        for (j, next) in shapes.iter().enumerate().skip(i + 1) {
            if next.lowest_fret.checked_sub(current.lowest_fret) == Some(interval) {
                connectors.push(Connector {
                    from: i,
                    to: j,
                    fret_distance: interval,
                });
            }
        }
    }
    connectors
}

/// Describe a shape as its inversion's reference shape plus a fret offset.
///
/// Returns `None` for inversions with no named reference shape.
pub fn get_movable_shape_info(shape: &Shape) -> Option<MovableShape> {
    let alias = shape.inversion.alias()?;
    let offset = shape.lowest_fret;
    let description = match offset {
        0 => alias.to_string(),
        1 => format!("{} + 1 Fret", alias),
        n => format!("{} + {} Frets", alias, n),
    };
    Some(MovableShape {
        alias,
        offset,
        description,
    })
}

//! Orientation classification.
//!
//! Every enabled [`Division`] is sorted into at most one of nine compass
//! buckets.  A division is on the *left* when its column lies in the low half
//! of its grid, on the *right* when it lies strictly in the high half, and in
//! the *center* when the grid has an odd number of columns and the division
//! sits exactly on the middle one.  Rows work the same way.
//!
//! A division that satisfies no rule is left out; there is no fallback
//! bucket.

use crate::geometry::Division;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the nine compass positions on the numeric keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Orientation {
    /// All orientations, in keypad reading order.
    pub const ALL: [Orientation; 9] = [
        Orientation::TopLeft,
        Orientation::TopCenter,
        Orientation::TopRight,
        Orientation::MiddleLeft,
        Orientation::MiddleCenter,
        Orientation::MiddleRight,
        Orientation::BottomLeft,
        Orientation::BottomCenter,
        Orientation::BottomRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Whether `division` belongs in this orientation's bucket.
    pub fn matches(self, division: &Division) -> bool {
        let (columns, rows) = (division.columns(), division.rows());
        let (x, y) = (division.x(), division.y());

        let left = x <= half_down(columns);
        let right = x > half_up(columns);
        let center_column = is_center(x, columns);
        let top = y <= half_down(rows);
        let bottom = y > half_up(rows);
        let middle_row = is_center(y, rows);
        let spans = columns > 1 || rows > 1;

        match self {
            // The single whole-area division has no half to sit in; it is
            // reached from the first key instead.
            Orientation::TopLeft => (left && top) || !spans,
            Orientation::TopCenter => center_column && spans && top,
            Orientation::TopRight => right && top,
            Orientation::MiddleLeft => left && middle_row && spans,
            Orientation::MiddleCenter => center_column && middle_row && spans,
            Orientation::MiddleRight => right && middle_row && spans,
            Orientation::BottomLeft => left && bottom,
            Orientation::BottomCenter => center_column && spans && bottom,
            Orientation::BottomRight => right && bottom,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::TopLeft => "top-left",
            Orientation::TopCenter => "top-center",
            Orientation::TopRight => "top-right",
            Orientation::MiddleLeft => "middle-left",
            Orientation::MiddleCenter => "middle-center",
            Orientation::MiddleRight => "middle-right",
            Orientation::BottomLeft => "bottom-left",
            Orientation::BottomCenter => "bottom-center",
            Orientation::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

/// Parse an orientation name (case-insensitive; accepts "top-left",
/// "TopLeft", "top_left", …).
pub fn parse_orientation(s: &str) -> Option<Orientation> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect();
    Orientation::ALL
        .into_iter()
        .find(|o| o.to_string().replace('-', "") == normalized)
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_orientation(&s)
            .ok_or_else(|| DeError::custom(format!("invalid orientation: {:?}", s)))
    }
}

/// Upper bound (inclusive) of the low half of `n`; `.5` rounds down.
pub fn half_down(n: u32) -> u32 {
    n / 2
}

/// Lower bound (exclusive) of the high half of `n`; `.5` rounds up.
pub fn half_up(n: u32) -> u32 {
    n.div_ceil(2)
}

pub fn is_odd(n: u32) -> bool {
    n % 2 != 0
}

fn is_center(coord: u32, n: u32) -> bool {
    is_odd(n) && coord == n / 2 + 1
}

/// Divisions grouped by [`Orientation`].
///
/// Within each bucket divisions keep the order they had in the input to
/// [`classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientationBuckets {
    buckets: [Vec<Division>; 9],
}

impl OrientationBuckets {
    /// Divisions in `orientation`'s bucket, possibly empty.
    pub fn get(&self, orientation: Orientation) -> &[Division] {
        &self.buckets[orientation.index()]
    }

    /// Iterate `(orientation, bucket)` pairs in keypad reading order.
    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &[Division])> {
        Orientation::ALL
            .into_iter()
            .map(move |o| (o, self.get(o)))
    }

    /// Total number of bucketed divisions.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Sort `divisions` into orientation buckets.
///
/// Each bucket is filled independently from the full input.
pub fn classify(divisions: &[Division]) -> OrientationBuckets {
    let mut buckets = OrientationBuckets::default();
    for orientation in Orientation::ALL {
        buckets.buckets[orientation.index()] = divisions
            .iter()
            .filter(|d| orientation.matches(d))
            .copied()
            .collect();
    }
    buckets
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{enumerate, GridSize};

    fn div(columns: u32, rows: u32, x: u32, y: u32) -> Division {
        Division::new(columns, rows, x, y).unwrap()
    }

    fn orientations_of(d: &Division) -> Vec<Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(|o| o.matches(d))
            .collect()
    }

    fn grid(columns: u32, rows: u32) -> Vec<Division> {
        GridSize::new(columns, rows).unwrap().divisions().collect()
    }

    #[test]
    fn half_helpers_match_epsilon_rounding() {
        for n in 0..200u32 {
            let down = (n as f64 / 2.0 - 0.05).round() as u32;
            let up = (n as f64 / 2.0 + 0.05).round() as u32;
            assert_eq!(half_down(n), down, "half_down({n})");
            assert_eq!(half_up(n), up, "half_up({n})");
        }
    }

    #[test]
    fn whole_area_lands_in_top_left_only() {
        let buckets = classify(&grid(1, 1));
        assert_eq!(buckets.get(Orientation::TopLeft), &[div(1, 1, 1, 1)]);
        for (o, bucket) in buckets.iter() {
            if o != Orientation::TopLeft {
                assert!(bucket.is_empty(), "{o} should be empty");
            }
        }
    }

    #[test]
    fn three_by_three_examples() {
        assert_eq!(
            orientations_of(&div(3, 3, 2, 2)),
            vec![Orientation::MiddleCenter]
        );
        assert_eq!(orientations_of(&div(3, 3, 1, 1)), vec![Orientation::TopLeft]);
        assert_eq!(orientations_of(&div(3, 3, 3, 1)), vec![Orientation::TopRight]);
        assert_eq!(orientations_of(&div(3, 3, 2, 1)), vec![Orientation::TopCenter]);
        assert_eq!(
            orientations_of(&div(3, 3, 1, 3)),
            vec![Orientation::BottomLeft]
        );
    }

    #[test]
    fn three_by_three_fills_every_bucket_once() {
        let buckets = classify(&grid(3, 3));
        for (o, bucket) in buckets.iter() {
            assert_eq!(bucket.len(), 1, "{o}");
        }
    }

    #[test]
    fn two_by_two_quadrants() {
        let buckets = classify(&grid(2, 2));
        assert_eq!(buckets.get(Orientation::TopLeft), &[div(2, 2, 1, 1)]);
        assert_eq!(buckets.get(Orientation::TopRight), &[div(2, 2, 2, 1)]);
        assert_eq!(buckets.get(Orientation::BottomLeft), &[div(2, 2, 1, 2)]);
        assert_eq!(buckets.get(Orientation::BottomRight), &[div(2, 2, 2, 2)]);
        assert_eq!(buckets.len(), 4);
    }

    #[test]
    fn halves_of_a_single_row() {
        assert_eq!(
            orientations_of(&div(2, 1, 1, 1)),
            vec![Orientation::MiddleLeft]
        );
        assert_eq!(
            orientations_of(&div(2, 1, 2, 1)),
            vec![Orientation::MiddleRight]
        );
        assert_eq!(
            orientations_of(&div(1, 2, 1, 1)),
            vec![Orientation::TopCenter]
        );
        assert_eq!(
            orientations_of(&div(1, 2, 1, 2)),
            vec![Orientation::BottomCenter]
        );
    }

    #[test]
    fn no_division_lands_in_two_buckets() {
        for d in enumerate(7, 7) {
            assert!(orientations_of(&d).len() <= 1, "{d} matched {:?}", orientations_of(&d));
        }
    }

    #[test]
    fn every_enumerated_division_is_bucketed_once() {
        let all = enumerate(7, 7);
        for d in &all {
            assert_eq!(orientations_of(d).len(), 1, "{d}");
        }
        assert_eq!(classify(&all).len(), all.len());
    }

    #[test]
    fn center_column_of_even_row_grid_goes_top_or_bottom() {
        assert_eq!(
            orientations_of(&div(3, 4, 2, 2)),
            vec![Orientation::TopCenter]
        );
        assert_eq!(
            orientations_of(&div(3, 4, 2, 3)),
            vec![Orientation::BottomCenter]
        );
    }

    #[test]
    fn bucket_order_follows_input_order() {
        let all = enumerate(3, 3);
        let buckets = classify(&all);
        for (_, bucket) in buckets.iter() {
            let positions: Vec<usize> = bucket
                .iter()
                .map(|d| all.iter().position(|a| a == d).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            assert_eq!(positions, sorted);
        }
    }

    #[test]
    fn top_left_bucket_for_three_by_three_max() {
        let buckets = classify(&enumerate(3, 3));
        assert_eq!(
            buckets.get(Orientation::TopLeft),
            &[
                div(1, 1, 1, 1),
                div(2, 2, 1, 1),
                div(2, 3, 1, 1),
                div(3, 2, 1, 1),
                div(3, 3, 1, 1),
            ]
        );
    }

    #[test]
    fn classify_empty_input() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn parse_orientation_variants() {
        assert_eq!(parse_orientation("top-left"), Some(Orientation::TopLeft));
        assert_eq!(parse_orientation("MiddleCenter"), Some(Orientation::MiddleCenter));
        assert_eq!(parse_orientation("bottom_right"), Some(Orientation::BottomRight));
        assert_eq!(parse_orientation("sideways"), None);
    }
}

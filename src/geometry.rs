//! Grid geometry.
//!
//! A [`GridSize`] splits the work area into `columns × rows` equal cells and
//! a [`Division`] names one of those cells.  [`enumerate`] produces every
//! division for every grid size up to a configured maximum, in the order
//! that later defines how repeated hotkey presses cycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// An axis-aligned rectangle in logical screen units.
///
/// `right` and `bottom` are exclusive edges, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its origin and size.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether `self` reaches or exceeds every edge of `other`.
    pub fn covers(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Grow every edge outward by `amount`.
    pub fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Margin between a window's visible (extended) frame and its raw rectangle.
///
/// Negative `left`/`top` and positive `right`/`bottom` mean the visible frame
/// extends past the raw rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOffset {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameOffset {
    /// `extended - window`, edge by edge.
    pub fn between(window: &Rect, extended: &Rect) -> Self {
        *extended - *window
    }
}

impl Sub for Rect {
    type Output = FrameOffset;

    fn sub(self, rhs: Rect) -> FrameOffset {
        FrameOffset {
            left: self.left - rhs.left,
            top: self.top - rhs.top,
            right: self.right - rhs.right,
            bottom: self.bottom - rhs.bottom,
        }
    }
}

/// A tiling granularity of `columns × rows` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Returns `None` when either dimension is zero.
    pub fn new(columns: u32, rows: u32) -> Option<Self> {
        (columns >= 1 && rows >= 1).then_some(Self { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Every cell of this grid, row by row (`y` ascending, then `x`).
    pub fn divisions(self) -> impl Iterator<Item = Division> {
        (1..=self.rows).flat_map(move |y| {
            (1..=self.columns).map(move |x| Division {
                columns: self.columns,
                rows: self.rows,
                x,
                y,
            })
        })
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Wire shape of a [`Division`], validated on the way in.
#[derive(Deserialize)]
struct RawDivision {
    columns: u32,
    rows: u32,
    x: u32,
    y: u32,
}

/// One cell `(x, y)` of a `columns × rows` grid.  Coordinates are 1-based.
///
/// Equality and hashing are structural over all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDivision")]
pub struct Division {
    columns: u32,
    rows: u32,
    x: u32,
    y: u32,
}

/// A division whose coordinates fall outside its grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid division {columns}x{rows} at ({x}, {y})")]
pub struct InvalidDivision {
    pub columns: u32,
    pub rows: u32,
    pub x: u32,
    pub y: u32,
}

impl TryFrom<RawDivision> for Division {
    type Error = InvalidDivision;

    fn try_from(raw: RawDivision) -> Result<Self, Self::Error> {
        Division::new(raw.columns, raw.rows, raw.x, raw.y).ok_or(InvalidDivision {
            columns: raw.columns,
            rows: raw.rows,
            x: raw.x,
            y: raw.y,
        })
    }
}

impl Division {
    /// Returns `None` unless `1 ≤ x ≤ columns` and `1 ≤ y ≤ rows`.
    pub fn new(columns: u32, rows: u32, x: u32, y: u32) -> Option<Self> {
        let valid = (1..=columns).contains(&x) && (1..=rows).contains(&y);
        valid.then_some(Self {
            columns,
            rows,
            x,
            y,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize {
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Pixel rectangle of this division inside `work_area`.
    ///
    /// Cell sizes are truncated, so on work areas that do not divide evenly
    /// the last column/row stops short of the right/bottom edge.
    pub fn bounds(&self, work_area: &Rect) -> Rect {
        let cell_width = work_area.width() / self.columns as i32;
        let cell_height = work_area.height() / self.rows as i32;
        let x = self.x as i32;
        let y = self.y as i32;
        Rect {
            left: work_area.left + cell_width * (x - 1),
            top: work_area.top + cell_height * (y - 1),
            right: work_area.left + cell_width * x,
            bottom: work_area.top + cell_height * y,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.columns, self.rows, self.x, self.y
        )
    }
}

/// Every division of every grid size from `1×1` up to
/// `max_columns × max_rows`.
///
/// Grid sizes are visited by columns, then rows; within a grid the cells
/// come row by row.  Non-positive maxima yield nothing.
pub fn enumerate(max_columns: i32, max_rows: i32) -> Vec<Division> {
    let max_columns = u32::try_from(max_columns).unwrap_or(0);
    let max_rows = u32::try_from(max_rows).unwrap_or(0);
    (1..=max_columns)
        .flat_map(|columns| (1..=max_rows).filter_map(move |rows| GridSize::new(columns, rows)))
        .flat_map(GridSize::divisions)
        .collect()
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn single_grid_yields_columns_times_rows() {
        for columns in 1..=6 {
            for rows in 1..=6 {
                let grid = GridSize::new(columns, rows).unwrap();
                let divisions: Vec<Division> = grid.divisions().collect();
                assert_eq!(divisions.len(), (columns * rows) as usize);
                for d in &divisions {
                    assert!((1..=columns).contains(&d.x()));
                    assert!((1..=rows).contains(&d.y()));
                }
                let unique: HashSet<Division> = divisions.iter().copied().collect();
                assert_eq!(unique.len(), divisions.len());
            }
        }
    }

    #[test]
    fn enumerate_covers_every_grid_size() {
        let all = enumerate(3, 2);
        // sum over columns 1..=3, rows 1..=2 of columns*rows = (1+2+3)*(1+2)
        assert_eq!(all.len(), 18);
    }

    #[test]
    fn enumerate_order_is_columns_then_rows_then_cells() {
        let all = enumerate(2, 2);
        let expected = [
            (1, 1, 1, 1),
            (1, 2, 1, 1),
            (1, 2, 1, 2),
            (2, 1, 1, 1),
            (2, 1, 2, 1),
            (2, 2, 1, 1),
            (2, 2, 2, 1),
            (2, 2, 1, 2),
            (2, 2, 2, 2),
        ];
        let got: Vec<(u32, u32, u32, u32)> = all
            .iter()
            .map(|d| (d.columns(), d.rows(), d.x(), d.y()))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn enumerate_non_positive_is_empty() {
        assert!(enumerate(0, 5).is_empty());
        assert!(enumerate(5, 0).is_empty());
        assert!(enumerate(-3, -1).is_empty());
    }

    #[test]
    fn division_rejects_out_of_range() {
        assert!(Division::new(2, 2, 0, 1).is_none());
        assert!(Division::new(2, 2, 3, 1).is_none());
        assert!(Division::new(2, 2, 1, 3).is_none());
        assert!(Division::new(0, 0, 1, 1).is_none());
        assert!(Division::new(2, 2, 2, 2).is_some());
    }

    #[test]
    fn division_equality_is_structural() {
        let a = Division::new(3, 2, 1, 2).unwrap();
        let b = Division::new(3, 2, 1, 2).unwrap();
        let c = Division::new(2, 3, 1, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<Division> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn bounds_bottom_right_quadrant() {
        let wa = Rect::new(0, 0, 1000, 800);
        let d = Division::new(2, 2, 2, 2).unwrap();
        assert_eq!(d.bounds(&wa), Rect::new(500, 400, 1000, 800));
    }

    #[test]
    fn bounds_respects_work_area_origin() {
        let wa = Rect::new(100, 40, 1100, 840);
        let d = Division::new(2, 1, 1, 1).unwrap();
        assert_eq!(d.bounds(&wa), Rect::new(100, 40, 600, 840));
    }

    #[test]
    fn bounds_truncates_without_fixup() {
        let wa = Rect::new(0, 0, 1000, 800);
        let d = Division::new(3, 3, 3, 3).unwrap();
        // 1000 / 3 = 333, 800 / 3 = 266
        assert_eq!(d.bounds(&wa), Rect::new(666, 532, 999, 798));
    }

    #[test]
    fn frame_offset_is_extended_minus_window() {
        let window = Rect::new(100, 100, 500, 400);
        let extended = Rect::new(90, 100, 510, 410);
        let fo = FrameOffset::between(&window, &extended);
        assert_eq!(
            fo,
            FrameOffset {
                left: -10,
                top: 0,
                right: 10,
                bottom: 10
            }
        );
    }

    #[test]
    fn covers_is_inclusive() {
        let wa = Rect::new(0, 0, 100, 100);
        assert!(wa.covers(&wa));
        assert!(Rect::new(-1, 0, 100, 101).covers(&wa));
        assert!(!Rect::new(0, 0, 99, 100).covers(&wa));
    }

    #[test]
    fn deserialize_division_validates() {
        let ok: Division =
            serde_json::from_str(r#"{"columns":3,"rows":1,"x":2,"y":1}"#).unwrap();
        assert_eq!(ok, Division::new(3, 1, 2, 1).unwrap());
        let bad = serde_json::from_str::<Division>(r#"{"columns":2,"rows":2,"x":5,"y":1}"#);
        assert!(bad.is_err());
    }
}

//! Which divisions the user has enabled.
//!
//! Every division of every grid size up to the configured maximum has an
//! on/off flag.  Newly discovered divisions start enabled; divisions that
//! fall outside a shrunken maximum are forgotten.  Classification never
//! reads this store directly: it gets a [`snapshot`](DivisionPreferences::snapshot).

use crate::geometry::{enumerate, Division};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Emitted whenever a division's enabled flag actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionEnabledChanged {
    pub division: Division,
    pub enabled: bool,
}

/// Largest accepted value for either side of the maximum grid.
///
/// The number of divisions grows with the fourth power of the maximum
/// (`12×12` already yields 6084), so larger requests are refused.
pub const MAX_GRID: i32 = 12;

/// A maximum grid beyond [`MAX_GRID`] was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("grid {columns}x{rows} exceeds the {max}x{max} limit", max = MAX_GRID)]
pub struct GridTooLarge {
    pub columns: i32,
    pub rows: i32,
}

fn check_max(columns: i32, rows: i32) -> Result<(), GridTooLarge> {
    if columns > MAX_GRID || rows > MAX_GRID {
        Err(GridTooLarge { columns, rows })
    } else {
        Ok(())
    }
}

/// Enabled flags for all divisions up to `max_columns × max_rows`.
#[derive(Debug, Clone)]
pub struct DivisionPreferences {
    max_columns: i32,
    max_rows: i32,
    enabled: HashMap<Division, bool>,
}

impl DivisionPreferences {
    /// Discover every division up to the given maximum, all enabled.
    ///
    /// A maximum beyond [`MAX_GRID`] is clamped to it.
    pub fn new(max_columns: i32, max_rows: i32) -> Self {
        if let Err(e) = check_max(max_columns, max_rows) {
            warn!("{}, clamping", e);
        }
        let max_columns = max_columns.min(MAX_GRID);
        let max_rows = max_rows.min(MAX_GRID);
        let mut prefs = Self {
            max_columns,
            max_rows,
            enabled: HashMap::new(),
        };
        prefs.discover();
        prefs
    }

    /// Current maximum as `(columns, rows)`.
    pub fn max(&self) -> (i32, i32) {
        (self.max_columns, self.max_rows)
    }

    /// Whether `division` is known and enabled.
    pub fn is_enabled(&self, division: &Division) -> bool {
        self.enabled.get(division).copied().unwrap_or(false)
    }

    /// Number of known divisions (enabled or not).
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Change the maximum grid size.
    ///
    /// Divisions beyond the new maximum are dropped; divisions that come into
    /// range start enabled.  Flags of divisions that stay in range are kept.
    /// A maximum beyond [`MAX_GRID`] is refused and nothing changes.
    pub fn set_max(&mut self, max_columns: i32, max_rows: i32) -> Result<(), GridTooLarge> {
        check_max(max_columns, max_rows)?;
        self.max_columns = max_columns;
        self.max_rows = max_rows;
        self.prune();
        self.discover();
        Ok(())
    }

    /// Set the flag for `division`.
    ///
    /// Returns the change event, or `None` if the division is unknown or the
    /// flag already had that value.
    pub fn set_enabled(
        &mut self,
        division: Division,
        enabled: bool,
    ) -> Option<DivisionEnabledChanged> {
        let slot = self.enabled.get_mut(&division)?;
        if *slot == enabled {
            return None;
        }
        *slot = enabled;
        debug!("{} -> {}", division, if enabled { "enabled" } else { "disabled" });
        Some(DivisionEnabledChanged { division, enabled })
    }

    /// Enabled divisions in enumeration order.
    pub fn snapshot(&self) -> Vec<Division> {
        enumerate(self.max_columns, self.max_rows)
            .into_iter()
            .filter(|d| self.is_enabled(d))
            .collect()
    }

    fn discover(&mut self) {
        for division in enumerate(self.max_columns, self.max_rows) {
            self.enabled.entry(division).or_insert(true);
        }
    }

    fn prune(&mut self) {
        let (max_columns, max_rows) = (self.max_columns, self.max_rows);
        let before = self.enabled.len();
        self.enabled.retain(|d, _| {
            (d.columns() as i64) <= max_columns as i64 && (d.rows() as i64) <= max_rows as i64
        });
        let removed = before - self.enabled.len();
        if removed > 0 {
            debug!("pruned {} division(s) beyond {}x{}", removed, max_columns, max_rows);
        }
    }
}

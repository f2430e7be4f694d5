//! The dispatcher that ties preferences, classification, cycling and the
//! window manager together.
//!
//! [`Tiler`] owns the only mutable state in the engine (the cycle position
//! and the current orientation buckets) and reacts to [`Command`]s one at a
//! time.  It is meant to live on a single thread that drains a command
//! channel, so none of that state needs locking.

use crate::command::Command;
use crate::cycle::CycleSelector;
use crate::geometry::Division;
use crate::hotkey::KeyId;
use crate::orientation::{classify, Orientation, OrientationBuckets};
use crate::preferences::{DivisionEnabledChanged, DivisionPreferences, GridTooLarge};
use crate::resize::{resize_foreground, ResizeError, ResizePlan};
use crate::traits::WindowManager;
use log::{debug, info};
use std::sync::mpsc;

/// Possible errors from handling a command.
///
/// None of these are fatal: the caller logs them and carries on with the
/// next command.
#[derive(Debug, thiserror::Error)]
pub enum TilerError {
    /// The pressed key has no orientation.
    #[error("no orientation for key {0}")]
    UnmappedKey(KeyId),
    /// The orientation has no enabled divisions.
    #[error("no enabled divisions for {0}")]
    EmptyBucket(Orientation),
    /// The requested maximum grid is too large; the current one is kept.
    #[error(transparent)]
    GridTooLarge(#[from] GridTooLarge),
    /// Placing the window failed.
    #[error(transparent)]
    Resize(#[from] ResizeError),
}

impl TilerError {
    /// The command was refused before anything happened, as opposed to
    /// failing halfway through.
    pub fn is_ignored(&self) -> bool {
        !matches!(self, TilerError::Resize(_))
    }
}

/// Reacts to hotkeys by snapping the focused window onto grid divisions.
///
/// The tiler is generic over any [`WindowManager`] implementation, making
/// it independent of Hyprland or any other concrete backend.
///
/// # Typical usage
///
/// ```ignore
/// let wm = HyprlandWm::new();
/// let mut tiler = Tiler::new(wm, DivisionPreferences::new(5, 5));
/// tiler.handle(Command::Hotkey(VK_NUMPAD7))?;
/// ```
pub struct Tiler<W: WindowManager> {
    wm: W,
    preferences: DivisionPreferences,
    buckets: OrientationBuckets,
    cycle: CycleSelector,
    events_tx: Option<mpsc::Sender<DivisionEnabledChanged>>,
}

impl<W: WindowManager> Tiler<W> {
    /// Create a tiler and build the initial buckets from `preferences`.
    pub fn new(wm: W, preferences: DivisionPreferences) -> Self {
        let buckets = classify(&preferences.snapshot());
        Self {
            wm,
            preferences,
            buckets,
            cycle: CycleSelector::new(),
            events_tx: None,
        }
    }

    /// Attach a channel that receives a [`DivisionEnabledChanged`] for every
    /// division whose flag actually changes.
    pub fn set_event_sink(&mut self, tx: mpsc::Sender<DivisionEnabledChanged>) {
        self.events_tx = Some(tx);
    }

    pub fn preferences(&self) -> &DivisionPreferences {
        &self.preferences
    }

    pub fn buckets(&self) -> &OrientationBuckets {
        &self.buckets
    }

    pub fn cycle(&self) -> &CycleSelector {
        &self.cycle
    }

    pub fn window_manager(&self) -> &W {
        &self.wm
    }

    /// Process a single [`Command`].
    pub fn handle(&mut self, cmd: Command) -> Result<(), TilerError> {
        match cmd {
            Command::Hotkey(key) => {
                let plan = self.snap(key)?;
                debug!("placed on {}", plan.target);
            }

            Command::SetDivisionEnabled { division, enabled } => {
                self.set_division_enabled(division, enabled);
            }

            Command::SetMaxGrid { columns, rows } => {
                self.preferences.set_max(columns, rows)?;
                info!("max grid {}x{}", columns, rows);
                self.rebuild();
            }
        }
        Ok(())
    }

    /// Pick the next division for `key` and move the focused window there.
    pub fn snap(&mut self, key: KeyId) -> Result<ResizePlan, TilerError> {
        let orientation = key.orientation().ok_or(TilerError::UnmappedKey(key))?;
        debug!("{} -> {}", key, orientation);

        let division = self
            .cycle
            .select(key, self.buckets.get(orientation))
            .ok_or(TilerError::EmptyBucket(orientation))?;
        info!(
            "{} [{}/{}]: {}",
            orientation,
            self.cycle.repeat_index() + 1,
            self.buckets.get(orientation).len(),
            division
        );

        Ok(resize_foreground(&self.wm, &division)?)
    }

    fn set_division_enabled(&mut self, division: Division, enabled: bool) {
        let Some(event) = self.preferences.set_enabled(division, enabled) else {
            debug!("{} unchanged", division);
            return;
        };
        self.rebuild();
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event);
        }
    }

    /// Recompute every bucket from the current preferences.
    fn rebuild(&mut self) {
        self.buckets = classify(&self.preferences.snapshot());
        debug!(
            "rebuilt buckets: {}",
            self.buckets
                .iter()
                .map(|(o, b)| format!("{}={}", o, b.len()))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
}

//  Tests

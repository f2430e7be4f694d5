//! Frame-compensated window placement.
//!
//! Window managers position a window by its *raw* rectangle, but what the
//! user sees is the *extended* frame, which may stick out past the raw
//! rectangle (drop shadows, borders, invisible resize handles).  To make the
//! visible frame land exactly on a division we measure the difference first
//! and fold it into the requested position and size.

use crate::geometry::{Division, FrameOffset, Rect};
use crate::traits::WindowManager;
use log::debug;

/// Why a resize attempt was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    /// No window currently has focus.
    #[error("no foreground window")]
    NoForegroundWindow,
    /// A geometry query or placement call failed.
    #[error("geometry query failed: {0}")]
    GeometryQueryFailed(String),
}

/// Raw position and size handed to [`WindowManager::set_window_pos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Everything needed to place a window on a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Where the visible frame should end up.
    pub target: Rect,
    /// Extended frame minus raw rectangle, measured just before placing.
    pub frame_offset: FrameOffset,
    /// What to ask the window manager for.
    pub raw: RawPlacement,
    /// The target fills the whole work area, so the window should be
    /// maximized after being placed.
    pub maximize: bool,
}

impl ResizePlan {
    pub fn compute(
        division: &Division,
        work_area: &Rect,
        window_rect: &Rect,
        extended_frame_rect: &Rect,
    ) -> Self {
        let frame_offset = FrameOffset::between(window_rect, extended_frame_rect);
        let target = division.bounds(work_area);
        let raw = RawPlacement {
            x: target.left - frame_offset.left,
            y: target.top - frame_offset.top,
            width: target.width() + frame_offset.left - frame_offset.right,
            height: target.height() + frame_offset.top - frame_offset.bottom,
        };
        Self {
            target,
            frame_offset,
            raw,
            // A plain resize to the full area leaves the title bar slightly
            // off; maximizing places it correctly.
            maximize: target.covers(work_area),
        }
    }
}

fn geometry<E: std::error::Error>(e: E) -> ResizeError {
    ResizeError::GeometryQueryFailed(e.to_string())
}

/// Place the focused window on `division`.
///
/// The window is restored before anything is measured, and all rectangles
/// are queried fresh on every call.
pub fn resize_foreground<W: WindowManager>(
    wm: &W,
    division: &Division,
) -> Result<ResizePlan, ResizeError> {
    let window = wm
        .foreground_window()
        .map_err(geometry)?
        .ok_or(ResizeError::NoForegroundWindow)?;

    wm.restore(&window).map_err(geometry)?;

    let work_area = wm.work_area().map_err(geometry)?;
    let window_rect = wm.window_rect(&window).map_err(geometry)?;
    let extended = wm.extended_frame_rect(&window).map_err(geometry)?;

    let plan = ResizePlan::compute(division, &work_area, &window_rect, &extended);
    debug!(
        "{:?}: window {} extended {} -> target {} raw {:?}",
        window, window_rect, extended, plan.target, plan.raw
    );

    let raw = plan.raw;
    wm.set_window_pos(&window, raw.x, raw.y, raw.width, raw.height)
        .map_err(geometry)?;

    if plan.maximize {
        debug!("{:?}: target covers work area {}, maximizing", window, work_area);
        wm.maximize(&window).map_err(geometry)?;
    }

    Ok(plan)
}

//! Shared test doubles.

use crate::geometry::{FrameOffset, Rect};
use crate::resize::RawPlacement;
use crate::traits::WindowManager;
use std::cell::{Cell, RefCell};

/// Every [`WindowManager`] call the fake has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Foreground,
    Restore,
    WindowRect,
    ExtendedFrameRect,
    SetWindowPos(RawPlacement),
    Maximize,
    WorkArea,
}

#[derive(Debug, thiserror::Error)]
#[error("fake failure on {0:?}")]
pub struct FakeError(Call);

/// A window manager with a single window whose visible frame extends past
/// its raw rectangle by a fixed margin.
///
/// Placing the window moves its raw rectangle, so subsequent measurements
/// reflect earlier calls.
#[derive(Debug)]
pub struct FakeWm {
    has_window: bool,
    window: Cell<Rect>,
    frame: FrameOffset,
    work_area: Rect,
    fail_on: Option<Call>,
    calls: RefCell<Vec<Call>>,
}

impl FakeWm {
    pub fn new(window: Rect, frame: FrameOffset, work_area: Rect) -> Self {
        Self {
            has_window: true,
            window: Cell::new(window),
            frame,
            work_area,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Window `(100,100,500,400)` with extended frame `(90,100,510,410)` on
    /// a 1920×1080 work area.
    pub fn framed_window() -> Self {
        Self::new(
            Rect::new(100, 100, 500, 400),
            FrameOffset {
                left: -10,
                top: 0,
                right: 10,
                bottom: 10,
            },
            Rect::new(0, 0, 1920, 1080),
        )
    }

    pub fn without_window() -> Self {
        Self {
            has_window: false,
            ..Self::framed_window()
        }
    }

    /// Make calls of the same kind as `call` fail.
    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn placements(&self) -> Vec<RawPlacement> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SetWindowPos(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Where the window is visibly drawn right now.
    pub fn visible_rect(&self) -> Rect {
        let w = self.window.get();
        Rect::new(
            w.left + self.frame.left,
            w.top + self.frame.top,
            w.right + self.frame.right,
            w.bottom + self.frame.bottom,
        )
    }

    fn record(&self, call: Call) -> Result<(), FakeError> {
        self.calls.borrow_mut().push(call);
        let same_kind = self
            .fail_on
            .is_some_and(|f| std::mem::discriminant(&f) == std::mem::discriminant(&call));
        if same_kind {
            Err(FakeError(call))
        } else {
            Ok(())
        }
    }
}

impl WindowManager for FakeWm {
    type Window = u32;
    type Error = FakeError;

    fn foreground_window(&self) -> Result<Option<u32>, FakeError> {
        self.record(Call::Foreground)?;
        Ok(self.has_window.then_some(1))
    }

    fn restore(&self, _window: &u32) -> Result<(), FakeError> {
        self.record(Call::Restore)
    }

    fn window_rect(&self, _window: &u32) -> Result<Rect, FakeError> {
        self.record(Call::WindowRect)?;
        Ok(self.window.get())
    }

    fn extended_frame_rect(&self, _window: &u32) -> Result<Rect, FakeError> {
        self.record(Call::ExtendedFrameRect)?;
        Ok(self.visible_rect())
    }

    fn set_window_pos(
        &self,
        _window: &u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), FakeError> {
        self.record(Call::SetWindowPos(RawPlacement {
            x,
            y,
            width,
            height,
        }))?;
        self.window.set(Rect::from_origin_size(x, y, width, height));
        Ok(())
    }

    fn maximize(&self, _window: &u32) -> Result<(), FakeError> {
        self.record(Call::Maximize)
    }

    fn work_area(&self) -> Result<Rect, FakeError> {
        self.record(Call::WorkArea)?;
        Ok(self.work_area)
    }
}

//! Core traits that decouple gridsnap from any specific window manager or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The [`Tiler`](crate::tiler::Tiler)
//! only depends on these abstractions.

use crate::command::Command;
use crate::geometry::Rect;
use crate::hotkey::{KeyId, Modifiers};
use std::fmt::Debug;
use std::sync::mpsc;

/// Abstraction over a window manager that can measure and place the focused
/// window.
///
/// All rectangles are in logical screen units.  An implementation might
/// talk to Hyprland via IPC, or it might be a recording stub used in tests.
pub trait WindowManager {
    /// Opaque handle to a window.
    type Window: Clone + Debug;

    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// The currently focused window, or `None` if nothing has focus.
    fn foreground_window(&self) -> Result<Option<Self::Window>, Self::Error>;

    /// Bring `window` out of any maximized, minimized or fullscreen state.
    ///
    /// Frame measurements taken while a window is maximized are unreliable,
    /// so this is always called before [`window_rect`](Self::window_rect)
    /// and [`extended_frame_rect`](Self::extended_frame_rect).
    fn restore(&self, window: &Self::Window) -> Result<(), Self::Error>;

    /// The raw rectangle the window manager positions the window by.
    fn window_rect(&self, window: &Self::Window) -> Result<Rect, Self::Error>;

    /// The rectangle the window visibly occupies, including any frame or
    /// border drawn around the raw rectangle.
    fn extended_frame_rect(&self, window: &Self::Window) -> Result<Rect, Self::Error>;

    /// Move and resize `window` so its raw rectangle starts at `(x, y)` with
    /// the given size.
    fn set_window_pos(
        &self,
        window: &Self::Window,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), Self::Error>;

    /// Maximize `window`.
    fn maximize(&self, window: &Self::Window) -> Result<(), Self::Error>;

    /// The usable area of the display the focused window is on, excluding
    /// panels and bars.
    fn work_area(&self) -> Result<Rect, Self::Error>;
}

/// Something that can bind a global hotkey so that pressing it eventually
/// delivers a [`Command::Hotkey`] to the tiler.
pub trait HotkeyRegistrar {
    /// The error type produced by this registrar.
    type Error: std::error::Error + Send + 'static;

    /// Bind `modifiers + key`.
    fn register(&self, modifiers: Modifiers, key: KeyId) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, an in-memory
/// channel) and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

//! **gridsnap**: snap the focused window onto grid divisions with the
//! numeric keypad.
//!
//! The work area is split into every grid from `1×1` up to a configured
//! maximum.  Each cell of each grid (a *division*) is sorted into one of nine
//! compass positions, and the keypad key at that position moves the focused
//! window onto it.  Pressing the same key again cycles to the next division
//! in that position.
//!
//! # Architecture
//!
//! The engine is a pipeline of pure steps, leaf-first:
//!
//! * [`geometry`] enumerates divisions and computes their rectangles;
//! * [`orientation`] classifies them into compass buckets;
//! * [`cycle`] picks one division per key press;
//! * [`resize`] turns it into a frame-compensated placement.
//!
//! [`tiler::Tiler`] drives the pipeline in response to [`command::Command`]s
//! and is generic over two seams:
//!
//! * [`traits::WindowManager`]: measures and places the focused window;
//! * [`traits::CommandSource`]: delivers commands from some transport.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener).

pub mod command;
pub mod config;
pub mod cycle;
pub mod geometry;
pub mod hotkey;
pub mod hyprland;
pub mod ipc;
pub mod orientation;
pub mod preferences;
pub mod resize;
pub mod tiler;
pub mod traits;

#[cfg(test)]
mod testing;

//! IPC over a Unix socket.
//!
//! The daemon listens for newline-delimited JSON commands; hotkey bindings
//! and scripts use [`client::send`] to deliver them.

pub mod client;
pub mod listener;

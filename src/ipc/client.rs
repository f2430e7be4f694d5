//! One-shot client for a running daemon.
//!
//! Hotkey bindings run `gridsnap key <name>`, which connects to the daemon's
//! socket, writes one JSON line and exits.

use crate::command::Command;
use crate::ipc::listener::UnixSocketError;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;

/// Send `cmd` to the listener at `path`.
pub fn send(path: &Path, cmd: &Command) -> Result<(), UnixSocketError> {
    let mut line = serde_json::to_string(cmd)?;
    line.push('\n');
    let mut stream = UnixStream::connect(path)?;
    stream.write_all(line.as_bytes())?;
    stream.shutdown(std::net::Shutdown::Write)?;
    Ok(())
}

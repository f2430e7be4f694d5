//! [`WindowManager`] and [`HotkeyRegistrar`] implementations backed by
//! Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.
//!
//! Hyprland has no extended window frame; the border it draws around a
//! window plays that role, so the visible rectangle is the window grown by
//! `general:border_size`.  Windows can only be positioned freely while
//! floating, so restoring a window also makes it float.

use crate::geometry::Rect;
use crate::hotkey::{KeyId, Modifiers};
use crate::traits::{HotkeyRegistrar, WindowManager};
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// All communication happens over Hyprland's IPC socket
/// (`$XDG_RUNTIME_DIR/hypr/<instance>/.socket.sock`).  No child processes
/// are spawned.
pub struct HyprlandWm {
    /// Command line Hyprland runs when a registered hotkey fires; the key
    /// name is appended.
    key_command: String,
}

/// A Hyprland window address such as `0x55d0c6a3c1f0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyprWindow(String);

impl HyprWindow {
    fn selector(&self) -> String {
        format!("address:{}", self.0)
    }
}

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl HyprlandWm {
    /// Create a new handle.
    ///
    /// `key_command` is what hotkey bindings execute, e.g.
    /// `"/usr/bin/gridsnap key"`.  No connection is opened eagerly; each
    /// method call opens a short-lived IPC request.
    pub fn new(key_command: impl Into<String>) -> Self {
        Self {
            key_command: key_command.into(),
        }
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandWmError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandWmError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a request and check for `"ok"`.
fn expect_ok(request: &str) -> Result<(), HyprlandWmError> {
    let response = ipc_request(request)?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("{}: {}", request, response.trim())))
    }
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandWmError> {
    debug!("dispatch {}", args);
    expect_ok(&format!("/dispatch {}", args))
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, HyprlandWmError> {
    serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    /// Space claimed by bars and panels: `[left, top, right, bottom]`.
    #[serde(default)]
    reserved: [i32; 4],
    #[serde(default)]
    focused: bool,
}

fn unit_scale() -> f64 {
    1.0
}

/// Fullscreen state: a boolean on older Hyprland, a mode number on newer.
#[derive(Deserialize)]
#[serde(untagged)]
enum FullscreenJson {
    Flag(bool),
    Mode(i64),
}

impl FullscreenJson {
    fn is_active(&self) -> bool {
        match self {
            FullscreenJson::Flag(on) => *on,
            FullscreenJson::Mode(mode) => *mode != 0,
        }
    }
}

/// Subset of the JSON object returned by `j/activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    address: String,
}

/// Subset of a `j/clients` entry.
#[derive(Deserialize)]
struct ClientJson {
    address: String,
    at: [i32; 2],
    size: [i32; 2],
    #[serde(default)]
    floating: bool,
    fullscreen: Option<FullscreenJson>,
}

/// Subset of the JSON object returned by `j/getoption <name>`.
#[derive(Deserialize)]
struct OptionJson {
    #[serde(default)]
    int: i64,
}

impl MonitorJson {
    /// The monitor's area minus reserved edges, in logical units.
    fn work_area(&self) -> Rect {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let width = (self.width as f64 / scale).round() as i32;
        let height = (self.height as f64 / scale).round() as i32;
        let [left, top, right, bottom] = self.reserved;
        Rect::new(
            self.x + left,
            self.y + top,
            self.x + width - right,
            self.y + height - bottom,
        )
    }
}

/// Look up a window by address in `j/clients`.
fn client(window: &HyprWindow) -> Result<ClientJson, HyprlandWmError> {
    let json = ipc_json("clients")?;
    let clients: Vec<ClientJson> = parse(&json)?;
    clients
        .into_iter()
        .find(|c| c.address == window.0)
        .ok_or_else(|| HyprlandWmError(format!("window {} is gone", window.0)))
}

fn border_size() -> Result<i32, HyprlandWmError> {
    let json = ipc_json("getoption general:border_size")?;
    let option: OptionJson = parse(&json)?;
    Ok(option.int as i32)
}

/// Hyprland keysym for a numpad key (`KP_0` … `KP_9`).
fn keysym(key: KeyId) -> Option<String> {
    key.numpad_digit().map(|d| format!("KP_{}", d))
}

/// Hyprland modifier list such as `CTRL ALT`.
fn hypr_mods(modifiers: Modifiers) -> String {
    modifiers
        .names()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Window = HyprWindow;
    type Error = HyprlandWmError;

    fn foreground_window(&self) -> Result<Option<HyprWindow>, Self::Error> {
        let json = ipc_json("activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let w: ActiveWindowJson = parse(&json)?;
        Ok(Some(HyprWindow(w.address)))
    }

    fn restore(&self, window: &HyprWindow) -> Result<(), Self::Error> {
        let c = client(window)?;
        if c.fullscreen.as_ref().is_some_and(FullscreenJson::is_active) {
            ipc_dispatch(&format!("focuswindow {}", window.selector()))?;
            ipc_dispatch("fullscreenstate 0 0")?;
        }
        if !c.floating {
            ipc_dispatch(&format!("setfloating {}", window.selector()))?;
        }
        Ok(())
    }

    fn window_rect(&self, window: &HyprWindow) -> Result<Rect, Self::Error> {
        let c = client(window)?;
        Ok(Rect::from_origin_size(c.at[0], c.at[1], c.size[0], c.size[1]))
    }

    fn extended_frame_rect(&self, window: &HyprWindow) -> Result<Rect, Self::Error> {
        let rect = self.window_rect(window)?;
        Ok(rect.inflate(border_size()?))
    }

    fn set_window_pos(
        &self,
        window: &HyprWindow,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), Self::Error> {
        ipc_dispatch(&format!(
            "resizewindowpixel exact {} {},{}",
            width,
            height,
            window.selector()
        ))?;
        ipc_dispatch(&format!(
            "movewindowpixel exact {} {},{}",
            x,
            y,
            window.selector()
        ))
    }

    fn maximize(&self, window: &HyprWindow) -> Result<(), Self::Error> {
        ipc_dispatch(&format!("focuswindow {}", window.selector()))?;
        ipc_dispatch("fullscreen 1")
    }

    fn work_area(&self) -> Result<Rect, Self::Error> {
        let json = ipc_json("monitors")?;
        let monitors: Vec<MonitorJson> = parse(&json)?;
        let monitor = monitors
            .iter()
            .find(|m| m.focused)
            .or_else(|| monitors.first())
            .ok_or_else(|| HyprlandWmError("no monitors".into()))?;
        debug!("work area from monitor {}", monitor.name);
        Ok(monitor.work_area())
    }
}

//  HotkeyRegistrar implementation

impl HotkeyRegistrar for HyprlandWm {
    type Error = HyprlandWmError;

    /// Add a `bind` that runs the key command with the key's name.
    fn register(&self, modifiers: Modifiers, key: KeyId) -> Result<(), Self::Error> {
        let sym = keysym(key)
            .ok_or_else(|| HyprlandWmError(format!("no keysym for {}", key)))?;
        expect_ok(&format!(
            "/keyword bind {},{},exec,{} {}",
            hypr_mods(modifiers),
            sym,
            self.key_command,
            key
        ))
    }
}

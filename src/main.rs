//! Entry point for the **gridsnap** daemon and its one-shot client.
//!
//! Without arguments the daemon starts: it registers the numpad hotkeys,
//! spawns the socket listener on a background thread and processes incoming
//! commands on the main thread.
//!
//! With arguments a single command is sent to a running daemon:
//!
//! ```text
//! gridsnap key numpad7
//! gridsnap disable 3 3 2 2
//! gridsnap enable 3 3 2 2
//! gridsnap max 4 3
//! ```

use gridsnap::command::Command;
use gridsnap::config::Config;
use gridsnap::geometry::Division;
use gridsnap::hotkey::{parse_key, register_numpad_hotkeys};
use gridsnap::hyprland::wm::HyprlandWm;
use gridsnap::ipc::client;
use gridsnap::ipc::listener::UnixSocketListener;
use gridsnap::preferences::DivisionEnabledChanged;
use gridsnap::tiler::Tiler;
use gridsnap::traits::{CommandSource, WindowManager};
use log::{error, info, warn};
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/gridsnap.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/gridsnap`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("gridsnap")
}

/// Try to load the config from `$XDG_CONFIG_HOME/gridsnap/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// What hotkey bindings execute; the key name is appended.
fn key_command() -> String {
    let exe = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "gridsnap".into());
    format!("{} key", shell_quote(&exe))
}

/// Quote `s` for `sh`, which Hyprland runs `exec` bindings through.
fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

//  Main

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_daemon();
        return;
    }

    match parse_client_args(&args) {
        Some(cmd) => {
            let path = default_socket_path();
            if let Err(e) = client::send(std::path::Path::new(&path), &cmd) {
                error!("failed to reach daemon at {}: {}", path, e);
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("usage: gridsnap [key <name> | enable|disable <columns> <rows> <x> <y> | max <columns> <rows>]");
            std::process::exit(2);
        }
    }
}

/// Turn command-line arguments into a single [`Command`].
fn parse_client_args(args: &[String]) -> Option<Command> {
    let numbers = |rest: &[String]| -> Option<Vec<i64>> {
        rest.iter().map(|s| s.parse().ok()).collect()
    };
    match args.first().map(String::as_str)? {
        "key" => match &args[1..] {
            [name] => parse_key(name).map(Command::Hotkey),
            _ => None,
        },
        verb @ ("enable" | "disable") => {
            let n = numbers(&args[1..])?;
            let [columns, rows, x, y] = n.as_slice() else {
                return None;
            };
            let u = |v: i64| u32::try_from(v).ok();
            let division = Division::new(u(*columns)?, u(*rows)?, u(*x)?, u(*y)?)?;
            Some(Command::SetDivisionEnabled {
                division,
                enabled: verb == "enable",
            })
        }
        "max" => {
            let n = numbers(&args[1..])?;
            let [columns, rows] = n.as_slice() else {
                return None;
            };
            Some(Command::SetMaxGrid {
                columns: i32::try_from(*columns).ok()?,
                rows: i32::try_from(*rows).ok()?,
            })
        }
        _ => None,
    }
}

/// Normal daemon mode.
fn run_daemon() {
    let config = load_config();

    let wm = HyprlandWm::new(key_command());
    let failures = register_numpad_hotkeys(&wm, config.hotkeys.modifiers);
    if !failures.is_empty() {
        warn!("{} of 10 hotkeys could not be registered", failures.len());
    }

    let mut tiler = Tiler::new(wm, config.preferences());

    let (event_tx, event_rx) = mpsc::channel::<DivisionEnabledChanged>();
    tiler.set_event_sink(event_tx);
    std::thread::spawn(move || {
        for event in event_rx {
            info!(
                "{} {}",
                event.division,
                if event.enabled { "enabled" } else { "disabled" }
            );
        }
    });

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    start_event_loop(tiler, cmd_rx);
}

//  Event loop

fn start_event_loop<W: WindowManager>(mut tiler: Tiler<W>, cmd_rx: mpsc::Receiver<Command>) {
    info!("gridsnap running");
    for cmd in cmd_rx {
        match tiler.handle(cmd) {
            Ok(()) => {}
            Err(e) if e.is_ignored() => warn!("command ignored: {}", e),
            Err(e) => error!("command error: {}", e),
        }
    }
    info!("all command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    let path = default_socket_path();
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}

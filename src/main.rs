// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
//   • `editor`          – EDIT child-control hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

// Release builds run as a GUI application (no console window) on Windows.
// Debug builds keep the console so that log output is visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod app;
mod commands;
#[cfg(windows)]
mod editor;
mod error;
mod platform;
// Window geometry is only consumed by the Win32 front-end.
#[cfg_attr(not(windows), allow(dead_code))]
mod settings;

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; RUST_LOG=jotter=debug shows every title refresh.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "fatal");
        platform::show_fatal_error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run() -> error::Result<()> {
    let settings = settings::load();
    tracing::debug!(?settings, "settings loaded");
    platform::win32::window::run(settings)
}

#[cfg(not(windows))]
fn run() -> error::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut app = app::App::new();
    platform::console::Console::new(stdin.lock(), stdout.lock()).run(&mut app)
}

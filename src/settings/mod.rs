// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `settings.json` in the per-user configuration directory:
//   Windows: `%APPDATA%\Jotter\settings.json`
//   other:   `$XDG_CONFIG_HOME/jotter/settings.json` or `~/.config/jotter/settings.json`
// No `unsafe`, pure safe Rust + serde_json.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub(crate) version: u32,
    /// Outer window width in device pixels.
    #[serde(default = "default_extent")]
    pub(crate) window_width: i32,
    /// Outer window height in device pixels.
    #[serde(default = "default_extent")]
    pub(crate) window_height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            window_width: DEFAULT_EXTENT,
            window_height: DEFAULT_EXTENT,
        }
    }
}

impl Settings {
    /// Record a new outer window size.
    ///
    /// Sizes that `load` would reject are ignored and `false` is returned.
    pub(crate) fn set_window_size(&mut self, width: i32, height: i32) -> bool {
        if width < MIN_EXTENT || height < MIN_EXTENT {
            return false;
        }
        self.window_width = width;
        self.window_height = height;
        true
    }
}

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

/// Default window edge: a square 1200 × 1200 window.
const DEFAULT_EXTENT: i32 = 1200;

/// Smallest edge accepted from disk; anything below is treated as corrupt.
const MIN_EXTENT: i32 = 200;

fn default_extent() -> i32 {
    DEFAULT_EXTENT
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the settings file.
///
/// Returns `None` if none of the relevant environment variables are set.
pub(crate) fn settings_path() -> Option<PathBuf> {
    let mut p = config_dir()?;
    p.push("settings.json");
    Some(p)
}

#[cfg(windows)]
fn config_dir() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    Some(PathBuf::from(appdata).join("Jotter"))
}

#[cfg(not(windows))]
fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("jotter"))
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `settings` to the settings file, creating its directory if needed.
pub(crate) fn save(settings: &Settings) -> io::Result<()> {
    let path = settings_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no configuration directory"))?;
    save_to(&path, settings)
}

fn save_to(path: &std::path::Path, settings: &Settings) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, settings).map_err(io::Error::other)
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read the settings file, falling back to defaults.
///
/// Any error (file missing, JSON parse failure, unrecognised version,
/// nonsensical window size) yields `Settings::default()`.
pub(crate) fn load() -> Settings {
    settings_path()
        .and_then(|p| load_from(&p))
        .unwrap_or_default()
}

fn load_from(path: &std::path::Path) -> Option<Settings> {
    let data = fs::read(path).ok()?;
    let parsed = parse(&data);
    debug!(path = %path.display(), ok = parsed.is_some(), "settings read");
    parsed
}

fn parse(data: &[u8]) -> Option<Settings> {
    let s: Settings = serde_json::from_slice(data).ok()?;
    if s.version != SETTINGS_VERSION {
        return None;
    }
    if s.window_width < MIN_EXTENT || s.window_height < MIN_EXTENT {
        return None;
    }
    Some(s)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

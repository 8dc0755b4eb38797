// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the document session uses to talk to the
// user.  Every modal interaction (confirmation, file pickers, error boxes) and
// the window title go through `Host`, so `App` never touches a real display.
// All Win32 FFI is confined to the `win32` sub-module and never leaks outward.

use std::path::PathBuf;

// The console front-end is the default everywhere except Windows.
#[cfg_attr(windows, allow(dead_code))]
pub mod console;
#[cfg(windows)]
pub mod win32;

/// Caption of the unsaved-changes confirmation.
pub(crate) const UNSAVED_CAPTION: &str = "Unsaved Changes";

/// Body of the unsaved-changes confirmation.
pub(crate) const UNSAVED_PROMPT: &str = "Do you want to save changes to your current document?";

/// Outcome of the three-way unsaved-changes confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Persist the pending edits first.
    Save,
    /// Drop the pending edits.
    Discard,
    /// Abandon the operation that raised the prompt.
    Cancel,
}

/// The "ask the user" capability.
///
/// Every call is synchronous: it blocks until the user answers, exactly like
/// a modal dialog on the UI thread.
pub(crate) trait Host {
    /// Ask Save / Discard / Cancel before unsaved edits would be lost.
    fn confirm_unsaved(&mut self) -> Decision;

    /// Pick an existing file to open (`*.txt`, with an all-files fallback).
    /// `None` means the user dismissed the picker.
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Pick a target for Save As (`*.txt`, with an all-files fallback).
    /// `None` means the user dismissed the picker.
    fn pick_save_path(&mut self) -> Option<PathBuf>;

    /// Show a non-fatal error message.  The application stays usable.
    fn report_error(&mut self, message: &str);

    /// Replace the window title.
    fn set_title(&mut self, title: &str);
}

/// Show an error that prevents the application from starting or continuing.
pub(crate) fn show_fatal_error(message: &str) {
    #[cfg(windows)]
    win32::window::show_error_dialog(message);
    #[cfg(not(windows))]
    eprintln!("jotter: {message}");
}

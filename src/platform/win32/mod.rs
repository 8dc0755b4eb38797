// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is one of exactly two modules in the codebase where `unsafe` code is
// permitted (the other is `editor`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::PCWSTR,
    Win32::{Foundation::HWND, UI::WindowsAndMessaging::SetWindowTextW},
};

use crate::platform::{Decision, Host};

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dialogs; // common open/save dialogs and message boxes
pub mod window; // main window, WndProc, message loop

// ── Host ──────────────────────────────────────────────────────────────────────

/// `Host` backed by modal Win32 dialogs owned by the main window.
pub(crate) struct Win32Host {
    hwnd: HWND,
}

impl Win32Host {
    pub(crate) fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl Host for Win32Host {
    fn confirm_unsaved(&mut self) -> Decision {
        dialogs::confirm_unsaved(self.hwnd)
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        dialogs::show_open_dialog(self.hwnd)
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        dialogs::show_save_dialog(self.hwnd)
    }

    fn report_error(&mut self, message: &str) {
        dialogs::show_error(self.hwnd, message);
    }

    fn set_title(&mut self, title: &str) {
        let title = dialogs::wide(title);
        // SAFETY: hwnd is the main window; title is null-terminated UTF-16
        // that outlives the call.
        unsafe {
            let _ = SetWindowTextW(self.hwnd, PCWSTR(title.as_ptr()));
        }
    }
}

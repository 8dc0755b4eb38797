// ── Text area hosting ─────────────────────────────────────────────────────────
//
// Exposes a safe Rust API over a multiline Win32 EDIT child control.  Callers
// interact with `TextArea` through the methods below; they never send raw
// messages to the control themselves.
//
// This is one of exactly two modules where `unsafe` is permitted (the other is
// `platform::win32`).  Every unsafe block MUST carry a `// SAFETY:` comment.

#![allow(unsafe_code)]

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, WPARAM},
        UI::Input::KeyboardAndMouse::SetFocus,
        UI::WindowsAndMessaging::{
            CreateWindowExW, MoveWindow, SendMessageW, HMENU, WINDOW_STYLE, WM_GETTEXT,
            WM_GETTEXTLENGTH, WM_SETTEXT, WS_CHILD, WS_EX_CLIENTEDGE, WS_HSCROLL, WS_VISIBLE,
            WS_VSCROLL,
        },
    },
};

use crate::error::{JotterError, Result};

// ── Edit-control messages and styles ──────────────────────────────────────────
//
// Raw values from <winuser.h>; kept local so the `windows` feature list stays
// short.

const ES_MULTILINE: u32 = 0x0004;
const ES_AUTOVSCROLL: u32 = 0x0040;
const ES_AUTOHSCROLL: u32 = 0x0080;
const ES_WANTRETURN: u32 = 0x1000;
const ES_NOHIDESEL: u32 = 0x0100;

/// `EM_SETLIMITTEXT`: 0 lifts the default 32 767-character cap.
const EM_SETLIMITTEXT: u32 = 0x00C5;

/// `EN_CHANGE` notification code (high word of `WM_COMMAND`'s WPARAM).
pub(crate) const EN_CHANGE: u32 = 0x0300;

/// Child-window identifier of the text area inside the main window.
pub(crate) const IDC_TEXT_AREA: u16 = 100;

// ── TextArea ──────────────────────────────────────────────────────────────────

/// The document's text-entry area.
///
/// The child `HWND` is destroyed automatically by Windows when the parent is
/// destroyed; no explicit cleanup is needed.
pub(crate) struct TextArea {
    hwnd: HWND,
}

impl TextArea {
    /// Create the EDIT child inside `hwnd_parent`, sized to zero.
    ///
    /// The first `WM_SIZE` on the parent lays it out.
    pub(crate) fn create(hwnd_parent: HWND, hinstance: HINSTANCE) -> Result<Self> {
        let style = WS_CHILD
            | WS_VISIBLE
            | WS_VSCROLL
            | WS_HSCROLL
            | WINDOW_STYLE(
                ES_MULTILINE | ES_AUTOVSCROLL | ES_AUTOHSCROLL | ES_WANTRETURN | ES_NOHIDESEL,
            );

        // SAFETY: "EDIT" is a system class that always exists.  hwnd_parent
        // and hinstance are valid handles owned by the caller.  The HMENU
        // argument of a child window carries its control identifier.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                w!("EDIT"),
                PCWSTR::null(),
                style,
                0,
                0,
                0,
                0,
                hwnd_parent,
                HMENU(IDC_TEXT_AREA as usize as *mut core::ffi::c_void),
                hinstance,
                None,
            )
        }
        .map_err(|e| {
            tracing::error!(error = %e, "could not create the text area");
            JotterError::from(e)
        })?;

        // SAFETY: hwnd is the EDIT control just created; EM_SETLIMITTEXT with
        // 0 is documented to select the maximum size.
        unsafe {
            let _ = SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));
        }

        Ok(Self { hwnd })
    }

    /// Replace all text.
    ///
    /// The control fires `EN_CHANGE` synchronously; the window procedure
    /// ignores it because the window state is already borrowed.
    pub(crate) fn set_text(&self, text: &str) {
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: hwnd valid; wide is null-terminated UTF-16 that outlives the call.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                WM_SETTEXT,
                WPARAM(0),
                LPARAM(wide.as_ptr() as isize),
            );
        }
    }

    /// Read the full text.
    pub(crate) fn text(&self) -> String {
        // SAFETY: hwnd valid; WM_GETTEXTLENGTH is a read-only query.
        let len =
            unsafe { SendMessageW(self.hwnd, WM_GETTEXTLENGTH, WPARAM(0), LPARAM(0)).0 as usize };
        let mut buf = vec![0u16; len + 1];
        // SAFETY: buf holds len+1 UTF-16 units; WM_GETTEXT writes at most
        // WPARAM units including the terminator.
        let copied = unsafe {
            SendMessageW(
                self.hwnd,
                WM_GETTEXT,
                WPARAM(len + 1),
                LPARAM(buf.as_mut_ptr() as isize),
            )
            .0 as usize
        };
        buf.truncate(copied.min(len));
        String::from_utf16_lossy(&buf)
    }

    /// Fill the parent's client area.
    pub(crate) fn resize(&self, width: i32, height: i32) {
        // SAFETY: hwnd valid; MoveWindow on a child only affects layout.
        unsafe {
            let _ = MoveWindow(self.hwnd, 0, 0, width, height, true);
        }
    }

    /// Give keyboard focus to the text area.
    pub(crate) fn focus(&self) {
        // SAFETY: hwnd valid; SetFocus on a child of the foreground window.
        unsafe {
            let _ = SetFocus(self.hwnd);
        }
    }
}

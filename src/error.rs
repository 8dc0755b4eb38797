// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Jotter return `error::Result<T>`.  No panics
// in production paths; file errors surface through `Host::report_error` and
// startup errors through `platform::show_fatal_error`.

use std::{io, path::PathBuf};

/// Every error that Jotter can produce.
#[derive(Debug)]
pub enum JotterError {
    /// Reading a document from disk failed.  The session is left untouched.
    Read {
        /// The path the user picked.
        path: PathBuf,
        source: io::Error,
    },

    /// Writing the buffer to disk failed.  `path` and `dirty` are left untouched.
    Write {
        /// The target path (current path for Save, picked path for Save As).
        path: PathBuf,
        source: io::Error,
    },

    /// Any other I/O error (settings file, console streams, …).
    Io(io::Error),

    /// A Win32 API call returned a failure code.
    #[cfg(windows)]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },
}

impl std::fmt::Display for JotterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { source, .. } => {
                write!(f, "Could not read file. Original error: {source}")
            }
            Self::Write { source, .. } => {
                write!(f, "Could not save file. Original error: {source}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(windows)]
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
        }
    }
}

impl JotterError {
    /// The document path involved, for `Read` and `Write` failures.
    pub(crate) fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl std::error::Error for JotterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            #[cfg(windows)]
            Self::Win32 { .. } => None,
        }
    }
}

impl From<io::Error> for JotterError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// Convert a windows-crate error (HRESULT) directly into a JotterError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for JotterError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JotterError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

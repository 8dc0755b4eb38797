// ── File commands ─────────────────────────────────────────────────────────────
//
// Pure-Rust description of the File menu: labels, keyboard shortcuts, and
// console verbs.  No Win32 imports; usable from any front-end.

/// A user-initiated command on the document session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
}

/// A keyboard shortcut: Ctrl (Command on macOS), optional Shift, and a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shortcut {
    pub(crate) shift: bool,
    /// Upper-case ASCII letter, which doubles as the Win32 virtual-key code.
    pub(crate) key: u8,
}

impl Shortcut {
    /// Human-readable form shown next to the menu item.
    ///
    /// `mac` selects the "Command" spelling used on macOS.
    pub(crate) fn display(self, mac: bool) -> String {
        let ctrl = if mac { "Command" } else { "Ctrl" };
        let shift = if self.shift { "+Shift" } else { "" };
        format!("{ctrl}{shift}+{}", self.key as char)
    }
}

impl Command {
    /// Every command, in File-menu order.
    pub(crate) const ALL: [Command; 5] = [
        Command::New,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Exit,
    ];

    /// Menu label with the access-key marker.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::New => "&New",
            Self::Open => "&Open…",
            Self::Save => "&Save",
            Self::SaveAs => "Save &As…",
            Self::Exit => "E&xit",
        }
    }

    pub(crate) fn shortcut(self) -> Shortcut {
        let (shift, key) = match self {
            Self::New => (false, b'N'),
            Self::Open => (false, b'O'),
            Self::Save => (false, b'S'),
            Self::SaveAs => (true, b'S'),
            Self::Exit => (false, b'Q'),
        };
        Shortcut { shift, key }
    }

    /// Menu text as `"label\tshortcut"`, the layout Win32 menus expect.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn menu_text(self, mac: bool) -> String {
        format!("{}\t{}", self.label(), self.shortcut().display(mac))
    }

    /// Parse a console verb (without the leading `:`).
    #[cfg_attr(windows, allow(dead_code))]
    pub(crate) fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "new" | "n" => Some(Self::New),
            "open" | "o" | "e" => Some(Self::Open),
            "save" | "w" => Some(Self::Save),
            "saveas" | "save-as" => Some(Self::SaveAs),
            "exit" | "quit" | "q" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// `true` when shortcut labels should use macOS spelling.
pub(crate) fn is_mac() -> bool {
    cfg!(target_os = "macos")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

// ── Application lifecycle & top-level state ────────────────────────────────────
//
// A single `App` is created on startup and owned by the front-end for the
// lifetime of the main window.  All mutations happen on the UI thread; there
// is no global mutable state.  Every user interaction goes through the
// `Host` passed into each command, so the whole session is testable headless.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    commands::Command,
    error::{JotterError, Result},
    platform::{Decision, Host},
};

/// Application name shown at the start of the window title.
pub(crate) const APP_NAME: &str = "Jotter";

const UTF8_BOM: char = '\u{feff}';

// ── DocumentState ─────────────────────────────────────────────────────────────

/// State of the one document this process edits.
#[derive(Debug, Default)]
pub(crate) struct DocumentState {
    /// Full buffer contents.
    pub(crate) text: String,
    /// Path to the file on disk, or `None` for an untitled buffer.
    pub(crate) path: Option<PathBuf>,
    /// `true` when the buffer contains changes not yet saved to disk.
    pub(crate) dirty: bool,
}

impl DocumentState {
    /// The bare filename component, or `"Untitled"` if no path is set.
    fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_owned())
    }

    fn clear(&mut self) {
        self.text.clear();
        self.path = None;
        self.dirty = false;
    }
}

// ── Command results ───────────────────────────────────────────────────────────

/// Result of the unsaved-changes checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Checkpoint {
    /// Pending edits were saved or discarded; the caller may continue.
    Proceed,
    /// The user cancelled, or the save did not go through; the caller stops.
    Abort,
}

/// What the front-end must do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Buffer contents are as the front-end last saw them.
    Unchanged,
    /// The controller replaced the buffer; push `App::text()` to the text area.
    Reloaded,
    /// Terminate the application.
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// The document session controller.
///
/// Passed by mutable reference through front-end handlers so that all
/// application logic sees a single, explicit state root rather than a
/// collection of disconnected globals.
#[derive(Debug, Default)]
pub(crate) struct App {
    /// State of the currently open document.
    pub(crate) doc: DocumentState,
}

impl App {
    /// Create a fresh `App` with an untitled, empty document.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub(crate) fn text(&self) -> &str {
        &self.doc.text
    }

    /// Compute the title string for the main window.
    ///
    /// | State | Title |
    /// |---|---|
    /// | No path, clean | `"Jotter | Untitled"` |
    /// | No path, dirty | `"Jotter | Untitled*"` |
    /// | Path set, clean | `"Jotter | todo.txt"` |
    /// | Path set, dirty | `"Jotter | todo.txt*"` |
    pub(crate) fn window_title(&self) -> String {
        let dirty = if self.doc.dirty { "*" } else { "" };
        format!("{APP_NAME} | {}{dirty}", self.doc.display_name())
    }

    fn refresh_title(&self, host: &mut dyn Host) {
        let title = self.window_title();
        debug!(%title, "title refreshed");
        host.set_title(&title);
    }

    /// Dispatch a File command.
    pub(crate) fn run(&mut self, command: Command, host: &mut dyn Host) -> Effect {
        debug!(?command, "command");
        match command {
            Command::New => self.new_document(host),
            Command::Open => self.open(host),
            Command::Save => {
                self.save(host);
                Effect::Unchanged
            }
            Command::SaveAs => {
                self.save_as(host);
                Effect::Unchanged
            }
            Command::Exit => self.exit(host),
        }
    }

    // ── Buffer edits ──────────────────────────────────────────────────────────

    /// The text area changed; `text` is its full new contents.
    pub(crate) fn edit(&mut self, text: String, host: &mut dyn Host) {
        self.doc.text = text;
        self.doc.dirty = true;
        self.refresh_title(host);
    }

    // ── New ───────────────────────────────────────────────────────────────────

    /// Replace the session with an empty, untitled document.
    pub(crate) fn new_document(&mut self, host: &mut dyn Host) -> Effect {
        if self.resolve_unsaved(host) == Checkpoint::Abort {
            return Effect::Unchanged;
        }
        self.doc.clear();
        info!("new document");
        self.refresh_title(host);
        Effect::Reloaded
    }

    // ── Open ──────────────────────────────────────────────────────────────────

    /// Ask for a file and load it.
    pub(crate) fn open(&mut self, host: &mut dyn Host) -> Effect {
        let mut effect = Effect::Unchanged;

        if self.doc.dirty {
            match host.confirm_unsaved() {
                Decision::Discard => {
                    // Drop the edits right away; the buffer stays empty even
                    // if the picker below is dismissed.
                    self.doc.clear();
                    self.refresh_title(host);
                    effect = Effect::Reloaded;
                }
                Decision::Save => {
                    if self.save_pending(host) == Checkpoint::Abort {
                        return Effect::Unchanged;
                    }
                }
                Decision::Cancel => {
                    debug!("open cancelled at unsaved-changes prompt");
                    return Effect::Unchanged;
                }
            }
        }

        let Some(path) = host.pick_open_path() else {
            debug!("open picker dismissed");
            return effect;
        };

        match self.load(path) {
            Ok(()) => {
                self.refresh_title(host);
                Effect::Reloaded
            }
            Err(e) => {
                report(host, &e);
                effect
            }
        }
    }

    /// Read `path` and make it the current document.
    ///
    /// The whole file is read before any state changes, so a failure leaves
    /// text, path and dirty flag exactly as they were.  A leading UTF-8 byte
    /// order mark is dropped.
    pub(crate) fn load(&mut self, path: PathBuf) -> Result<()> {
        let mut text = fs::read_to_string(&path).map_err(|source| JotterError::Read {
            path: path.clone(),
            source,
        })?;
        if text.starts_with(UTF8_BOM) {
            text.drain(..UTF8_BOM.len_utf8());
        }
        info!(path = %path.display(), bytes = text.len(), "document loaded");
        self.doc.text = text;
        self.doc.path = Some(path);
        self.doc.dirty = false;
        Ok(())
    }

    // ── Save / Save As ────────────────────────────────────────────────────────

    /// Save to the current path, or fall back to Save As for untitled buffers.
    ///
    /// Returns `true` when the buffer was written.
    pub(crate) fn save(&mut self, host: &mut dyn Host) -> bool {
        let Some(path) = self.doc.path.clone() else {
            return self.save_as(host);
        };
        match self.write_to(&path) {
            Ok(()) => {
                self.doc.dirty = false;
                self.refresh_title(host);
                true
            }
            Err(e) => {
                report(host, &e);
                false
            }
        }
    }

    /// Ask for a target path and write the buffer there.
    ///
    /// Returns `true` when the buffer was written.
    pub(crate) fn save_as(&mut self, host: &mut dyn Host) -> bool {
        let Some(path) = host.pick_save_path() else {
            debug!("save picker dismissed");
            return false;
        };
        match self.write_to(&path) {
            Ok(()) => {
                self.doc.path = Some(path);
                self.doc.dirty = false;
                self.refresh_title(host);
                true
            }
            Err(e) => {
                report(host, &e);
                false
            }
        }
    }

    /// Write the whole buffer to `path`.  Does not touch session state.
    fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.doc.text).map_err(|source| JotterError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.doc.text.len(), "document saved");
        Ok(())
    }

    // ── Exit ──────────────────────────────────────────────────────────────────

    /// Request application exit, guarding unsaved edits first.
    pub(crate) fn exit(&mut self, host: &mut dyn Host) -> Effect {
        match self.resolve_unsaved(host) {
            Checkpoint::Proceed => {
                info!("exit");
                Effect::Quit
            }
            Checkpoint::Abort => Effect::Unchanged,
        }
    }

    // ── Unsaved-changes checkpoint ────────────────────────────────────────────

    /// Give the user a chance to keep pending edits before they are lost.
    ///
    /// A clean document always proceeds without prompting.
    pub(crate) fn resolve_unsaved(&mut self, host: &mut dyn Host) -> Checkpoint {
        if !self.doc.dirty {
            return Checkpoint::Proceed;
        }
        let decision = host.confirm_unsaved();
        debug!(?decision, "unsaved-changes prompt answered");
        match decision {
            Decision::Save => self.save_pending(host),
            Decision::Discard => Checkpoint::Proceed,
            Decision::Cancel => Checkpoint::Abort,
        }
    }

    /// Checkpoint "Save": proceed only once the edits are actually on disk.
    fn save_pending(&mut self, host: &mut dyn Host) -> Checkpoint {
        if self.save(host) {
            Checkpoint::Proceed
        } else {
            Checkpoint::Abort
        }
    }
}

/// Log and surface a file error through the host.
fn report(host: &mut dyn Host, e: &JotterError) {
    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
    warn!(%path, error = %e, "file operation failed");
    host.report_error(&format!("Error: {e}"));
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Scripted stand-in for a real display.
    ///
    /// Answers are consumed front to back; an exhausted queue means the user
    /// dismissed the dialog (Cancel / no path).
    #[derive(Default)]
    struct FakeHost {
        decisions: VecDeque<Decision>,
        open_paths: VecDeque<PathBuf>,
        save_paths: VecDeque<PathBuf>,
        errors: Vec<String>,
        titles: Vec<String>,
        prompts: usize,
    }

    impl FakeHost {
        fn last_title(&self) -> &str {
            self.titles.last().map(String::as_str).unwrap_or("")
        }
    }

    impl Host for FakeHost {
        fn confirm_unsaved(&mut self) -> Decision {
            self.prompts += 1;
            self.decisions.pop_front().unwrap_or(Decision::Cancel)
        }
        fn pick_open_path(&mut self) -> Option<PathBuf> {
            self.open_paths.pop_front()
        }
        fn pick_save_path(&mut self) -> Option<PathBuf> {
            self.save_paths.pop_front()
        }
        fn report_error(&mut self, message: &str) {
            self.errors.push(message.to_owned());
        }
        fn set_title(&mut self, title: &str) {
            self.titles.push(title.to_owned());
        }
    }

    fn typed(app: &mut App, host: &mut FakeHost, s: &str) {
        let text = format!("{}{s}", app.text());
        app.edit(text, host);
    }

    // ── Title rule ────────────────────────────────────────────────────────────

    #[test]
    fn title_clean_untitled() {
        assert_eq!(App::new().window_title(), "Jotter | Untitled");
    }

    #[test]
    fn title_dirty_untitled() {
        let mut app = App::new();
        app.doc.dirty = true;
        assert_eq!(app.window_title(), "Jotter | Untitled*");
    }

    #[test]
    fn title_uses_basename_only() {
        let mut app = App::new();
        app.doc.path = Some(PathBuf::from("notes").join("todo.txt"));
        assert_eq!(app.window_title(), "Jotter | todo.txt");
        app.doc.dirty = true;
        assert_eq!(app.window_title(), "Jotter | todo.txt*");
    }

    #[test]
    fn edit_marks_dirty_and_refreshes_title() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "h");
        assert!(app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | Untitled*");
    }

    // ── Save / Save As ────────────────────────────────────────────────────────

    #[test]
    fn save_untitled_falls_back_to_save_as() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("a.txt");
        let mut app = App::new();
        let mut host = FakeHost::default();
        host.save_paths.push_back(target.clone());

        typed(&mut app, &mut host, "hello");
        assert!(app.save(&mut host));

        assert_eq!(fs::read_to_string(&target).expect("read back"), "hello");
        assert_eq!(app.doc.path.as_deref(), Some(target.as_path()));
        assert!(!app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | a.txt");
        assert!(host.errors.is_empty());
    }

    #[test]
    fn save_to_existing_path_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("a.txt");
        fs::write(&target, "hello").expect("seed");

        let mut app = App::new();
        let mut host = FakeHost::default();
        app.load(target.clone()).expect("load");
        typed(&mut app, &mut host, " world");
        assert_eq!(host.last_title(), "Jotter | a.txt*");

        assert!(app.save(&mut host));
        assert_eq!(fs::read_to_string(&target).expect("read back"), "hello world");
        assert!(!app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | a.txt");
    }

    #[test]
    fn save_failure_keeps_dirty_and_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        let mut host = FakeHost::default();
        // A directory cannot be written as a file.
        app.doc.path = Some(dir.path().to_path_buf());
        typed(&mut app, &mut host, "x");

        assert!(!app.save(&mut host));
        assert!(app.doc.dirty);
        assert_eq!(app.doc.path.as_deref(), Some(dir.path()));
        assert_eq!(host.errors.len(), 1);
        assert!(host.errors[0].starts_with("Error: Could not save file. Original error: "));
    }

    #[test]
    fn save_as_cancel_changes_nothing() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "x");
        let titles = host.titles.len();

        assert!(!app.save_as(&mut host));
        assert!(app.doc.dirty);
        assert!(app.doc.path.is_none());
        assert_eq!(host.titles.len(), titles);
    }

    #[test]
    fn save_as_failure_keeps_previous_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = dir.path().join("keep.txt");
        let mut app = App::new();
        let mut host = FakeHost::default();
        app.doc.path = Some(original.clone());
        typed(&mut app, &mut host, "x");
        host.save_paths.push_back(dir.path().join("missing").join("b.txt"));

        assert!(!app.save_as(&mut host));
        assert_eq!(app.doc.path.as_deref(), Some(original.as_path()));
        assert!(app.doc.dirty);
        assert_eq!(host.errors.len(), 1);
    }

    // ── Open ──────────────────────────────────────────────────────────────────

    #[test]
    fn open_round_trips_saved_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("round.txt");
        let content = "line one\r\nline two\nünïcödé\n";

        let mut first = App::new();
        let mut host = FakeHost::default();
        first.edit(content.to_owned(), &mut host);
        host.save_paths.push_back(target.clone());
        assert!(first.save_as(&mut host));

        // Simulated restart.
        let mut second = App::new();
        let mut host = FakeHost::default();
        host.open_paths.push_back(target.clone());
        assert_eq!(second.open(&mut host), Effect::Reloaded);
        assert_eq!(second.text(), content);
        assert!(!second.doc.dirty);
    }

    #[test]
    fn open_after_discard_loads_new_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = dir.path().join("b.txt");
        fs::write(&b, "xyz").expect("seed");

        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "scratch");
        host.decisions.push_back(Decision::Discard);
        host.open_paths.push_back(b.clone());

        assert_eq!(app.open(&mut host), Effect::Reloaded);
        assert_eq!(app.text(), "xyz");
        assert_eq!(app.doc.path.as_deref(), Some(b.as_path()));
        assert!(!app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | b.txt");
    }

    #[test]
    fn open_discard_then_dismiss_leaves_cleared_buffer() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "scratch");
        host.decisions.push_back(Decision::Discard);

        assert_eq!(app.open(&mut host), Effect::Reloaded);
        assert_eq!(app.text(), "");
        assert!(app.doc.path.is_none());
        assert!(!app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | Untitled");
    }

    #[test]
    fn open_cancel_skips_picker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = dir.path().join("b.txt");
        fs::write(&b, "xyz").expect("seed");

        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "keep me");
        host.decisions.push_back(Decision::Cancel);
        host.open_paths.push_back(b);

        assert_eq!(app.open(&mut host), Effect::Unchanged);
        assert_eq!(app.text(), "keep me");
        assert!(app.doc.dirty);
        assert_eq!(host.open_paths.len(), 1, "picker must not be shown");
    }

    #[test]
    fn open_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&b, "other").expect("seed");

        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "draft");
        host.decisions.push_back(Decision::Save);
        host.save_paths.push_back(a.clone());
        host.open_paths.push_back(b.clone());

        assert_eq!(app.open(&mut host), Effect::Reloaded);
        assert_eq!(fs::read_to_string(&a).expect("saved"), "draft");
        assert_eq!(app.text(), "other");
        assert_eq!(app.doc.path.as_deref(), Some(b.as_path()));
    }

    #[test]
    fn open_save_dismissed_aborts() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "draft");
        host.decisions.push_back(Decision::Save);
        host.open_paths.push_back(PathBuf::from("never-used.txt"));

        assert_eq!(app.open(&mut host), Effect::Unchanged);
        assert_eq!(app.text(), "draft");
        assert!(app.doc.dirty);
        assert_eq!(host.open_paths.len(), 1);
    }

    #[test]
    fn failed_open_leaves_session_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        let mut host = FakeHost::default();
        app.doc.path = Some(dir.path().join("current.txt"));
        app.doc.text = "content".to_owned();
        // Reading a directory fails regardless of privileges.
        host.open_paths.push_back(dir.path().to_path_buf());

        assert_eq!(app.open(&mut host), Effect::Unchanged);

        assert_eq!(app.text(), "content");
        assert_eq!(app.doc.path, Some(dir.path().join("current.txt")));
        assert!(!app.doc.dirty);
        assert_eq!(host.prompts, 0);
        assert_eq!(host.errors.len(), 1);
        assert!(host.errors[0].starts_with("Error: Could not read file. Original error: "));
    }

    #[test]
    fn open_discard_then_failed_load_reports_and_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        let mut host = FakeHost::default();
        app.doc.path = Some(dir.path().join("draft.txt"));
        typed(&mut app, &mut host, "thrown away");
        host.decisions.push_back(Decision::Discard);
        host.open_paths.push_back(dir.path().join("missing.txt"));

        // The text area must be refreshed to the cleared buffer.
        assert_eq!(app.open(&mut host), Effect::Reloaded);
        assert_eq!(app.text(), "");
        assert!(app.doc.path.is_none());
        assert!(!app.doc.dirty);
        assert_eq!(host.errors.len(), 1);
        assert!(host.errors[0].contains("Could not read file"));
        assert_eq!(host.last_title(), "Jotter | Untitled");
    }

    #[test]
    fn load_strips_utf8_bom() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("bom.txt");
        fs::write(&target, b"\xEF\xBB\xBFhello").expect("seed");

        let mut app = App::new();
        app.load(target).expect("load");
        assert_eq!(app.text(), "hello");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        app.doc.text = "kept".to_owned();
        app.doc.dirty = true;

        let err = app.load(dir.path().join("nope.txt")).expect_err("missing file");
        assert!(matches!(err, JotterError::Read { .. }));
        assert_eq!(app.text(), "kept");
        assert!(app.doc.dirty);
        assert!(app.doc.path.is_none());
    }

    // ── New ───────────────────────────────────────────────────────────────────

    #[test]
    fn new_on_clean_document_does_not_prompt() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        app.doc.path = Some(PathBuf::from("a.txt"));
        app.doc.text = "saved".to_owned();

        assert_eq!(app.new_document(&mut host), Effect::Reloaded);
        assert_eq!(host.prompts, 0);
        assert_eq!(app.text(), "");
        assert!(app.doc.path.is_none());
        assert!(!app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | Untitled");
    }

    #[test]
    fn new_discard_resets() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "junk");
        host.decisions.push_back(Decision::Discard);

        assert_eq!(app.new_document(&mut host), Effect::Reloaded);
        assert_eq!(app.text(), "");
        assert!(!app.doc.dirty);
    }

    #[test]
    fn new_cancel_keeps_everything() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "junk");
        host.decisions.push_back(Decision::Cancel);

        assert_eq!(app.new_document(&mut host), Effect::Unchanged);
        assert_eq!(app.text(), "junk");
        assert!(app.doc.dirty);
    }

    #[test]
    fn new_save_writes_then_resets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("kept.txt");
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "important");
        host.decisions.push_back(Decision::Save);
        host.save_paths.push_back(target.clone());

        assert_eq!(app.new_document(&mut host), Effect::Reloaded);
        assert_eq!(fs::read_to_string(&target).expect("saved"), "important");
        assert_eq!(app.text(), "");
        assert!(app.doc.path.is_none());
    }

    // ── Exit ──────────────────────────────────────────────────────────────────

    #[test]
    fn run_dispatches_save_as() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("cmd.txt");
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "via command");
        host.save_paths.push_back(target.clone());

        assert_eq!(app.run(Command::SaveAs, &mut host), Effect::Unchanged);
        assert_eq!(fs::read_to_string(&target).expect("saved"), "via command");
        assert_eq!(app.run(Command::Exit, &mut host), Effect::Quit);
    }

    #[test]
    fn exit_clean_quits_without_prompt() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        assert_eq!(app.exit(&mut host), Effect::Quit);
        assert_eq!(host.prompts, 0);
    }

    #[test]
    fn exit_cancel_stays() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "x");
        host.decisions.push_back(Decision::Cancel);
        assert_eq!(app.exit(&mut host), Effect::Unchanged);
        assert!(app.doc.dirty);
    }

    #[test]
    fn exit_discard_quits() {
        let mut app = App::new();
        let mut host = FakeHost::default();
        typed(&mut app, &mut host, "x");
        host.decisions.push_back(Decision::Discard);
        assert_eq!(app.exit(&mut host), Effect::Quit);
    }

    #[test]
    fn exit_save_failure_stays() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        let mut host = FakeHost::default();
        app.doc.path = Some(dir.path().to_path_buf());
        typed(&mut app, &mut host, "x");
        host.decisions.push_back(Decision::Save);

        assert_eq!(app.exit(&mut host), Effect::Unchanged);
        assert_eq!(host.errors.len(), 1);
        assert!(app.doc.dirty);
    }

    // ── Dirty tracking ────────────────────────────────────────────────────────

    #[test]
    fn dirty_clears_on_save_and_returns_on_edit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("d.txt");
        let mut app = App::new();
        let mut host = FakeHost::default();
        host.save_paths.push_back(target);

        for s in ["a", "b", "c"] {
            typed(&mut app, &mut host, s);
        }
        assert!(app.save(&mut host));
        assert!(!app.doc.dirty);

        typed(&mut app, &mut host, "d");
        assert!(app.doc.dirty);
        assert_eq!(host.last_title(), "Jotter | d.txt*");
    }

    #[test]
    fn every_title_matches_state_rule() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::new();
        let mut host = FakeHost::default();
        host.save_paths.push_back(dir.path().join("t.txt"));
        host.decisions.push_back(Decision::Discard);

        typed(&mut app, &mut host, "1");
        assert_eq!(host.last_title(), app.window_title());
        app.save(&mut host);
        assert_eq!(host.last_title(), app.window_title());
        typed(&mut app, &mut host, "2");
        assert_eq!(host.last_title(), app.window_title());
        app.new_document(&mut host);
        assert_eq!(host.last_title(), app.window_title());
        assert_eq!(host.last_title(), "Jotter | Untitled");
    }
}

// ── Console front-end ─────────────────────────────────────────────────────────
//
// Line-oriented stand-in for the window on platforms without the Win32
// front-end.  Lines starting with `:` are File commands; every other line is
// typed into the buffer.  Prompts are answered on the same input stream, so a
// whole session can be scripted.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use tracing::{debug, warn};

use crate::{
    app::{App, Effect},
    commands::{is_mac, Command},
    error::Result,
    platform::{Decision, Host, UNSAVED_CAPTION, UNSAVED_PROMPT},
};

/// Extension appended to Save As targets typed without one.
const DEFAULT_EXTENSION: &str = "txt";

/// A console session over any line source and sink.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
    /// Last title printed; repeated titles are suppressed.
    title: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            title: String::new(),
        }
    }

    /// Drive `app` until Exit succeeds or the input ends.
    pub(crate) fn run(&mut self, app: &mut App) -> Result<()> {
        let title = app.window_title();
        self.set_title(&title);

        while let Some(line) = self.read_line()? {
            // `::text` types a literal line starting with `:`.
            if let Some(literal) = line.strip_prefix("::") {
                self.type_line(app, &format!(":{literal}"));
                continue;
            }
            let Some(verb) = line.strip_prefix(':') else {
                self.type_line(app, &line);
                continue;
            };

            match verb.trim() {
                "print" | "p" => {
                    let text = app.text().to_owned();
                    self.output.write_all(text.as_bytes())?;
                    if !text.is_empty() && !text.ends_with('\n') {
                        writeln!(self.output)?;
                    }
                }
                "help" | "h" => self.print_help()?,
                verb => match Command::from_verb(verb) {
                    Some(command) => {
                        if app.run(command, self) == Effect::Quit {
                            return Ok(());
                        }
                    }
                    None => writeln!(self.output, "unknown command :{verb} (try :help)")?,
                },
            }
        }

        if app.doc.dirty {
            warn!("input closed with unsaved changes");
        }
        Ok(())
    }

    /// Append one line of text to the buffer.
    fn type_line(&mut self, app: &mut App, line: &str) {
        let mut text = app.text().to_owned();
        text.push_str(line);
        text.push('\n');
        app.edit(text, self);
    }

    fn print_help(&mut self) -> io::Result<()> {
        let mac = is_mac();
        for command in Command::ALL {
            let label = command.label().replace('&', "").replace('…', "");
            let verb = match command {
                Command::New => ":new",
                Command::Open => ":open",
                Command::Save => ":save, :w",
                Command::SaveAs => ":saveas",
                Command::Exit => ":exit, :q",
            };
            writeln!(
                self.output,
                "  {verb:<12} {label:<10} ({})",
                command.shortcut().display(mac)
            )?;
        }
        writeln!(self.output, "  {:<12} show the buffer", ":print")?;
        writeln!(self.output, "  {:<12} type a line starting with ':'", "::text")
    }

    /// Next input line without its terminator, or `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                warn!("input line is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print `question` and read the answer.  I/O failure counts as no answer.
    fn ask(&mut self, question: &str) -> Option<String> {
        let asked = write!(self.output, "{question}").and_then(|()| self.output.flush());
        if let Err(e) = asked {
            warn!(error = %e, "could not write prompt");
            return None;
        }
        match self.read_line() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "could not read answer");
                None
            }
        }
    }

    fn ask_path(&mut self, question: &str) -> Option<PathBuf> {
        let answer = self.ask(question)?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }
}

impl<R: BufRead, W: Write> Host for Console<R, W> {
    fn confirm_unsaved(&mut self) -> Decision {
        let question = format!("{UNSAVED_CAPTION}: {UNSAVED_PROMPT} [y]es/[n]o/[c]ancel: ");
        let decision = match self.ask(&question) {
            Some(answer) => parse_decision(&answer),
            None => Decision::Cancel,
        };
        debug!(?decision, "console confirmation");
        decision
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.ask_path("Open file (*.txt): ")
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        self.ask_path("Save as (*.txt): ").map(with_default_extension)
    }

    fn report_error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            warn!(error = %e, %message, "could not print error");
        }
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_owned();
            if let Err(e) = writeln!(self.output, "[{title}]") {
                warn!(error = %e, %title, "could not print title");
            }
        }
    }
}

/// `y`/`yes` saves, `n`/`no` discards, anything else cancels.
fn parse_decision(answer: &str) -> Decision {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "s" | "save" => Decision::Save,
        "n" | "no" | "d" | "discard" => Decision::Discard,
        _ => Decision::Cancel,
    }
}

/// Give extension-less Save As targets a `.txt` suffix.
fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Terminal output for the keg CLI.
//!
//! Status lines use a right-aligned coloured verb column, Cargo style.
//! They go to stderr so stdout stays free for `brands --json` and
//! completion scripts.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Tone of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Note,
    Warn,
}

impl Tone {
    fn colour(self) -> &'static str {
        match self {
            Tone::Progress => GREEN,
            Tone::Note => CYAN,
            Tone::Warn => YELLOW,
        }
    }
}

/// Status printer for the CLI.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "     Packing Apple (1024 sprites)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(Tone::Note, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(Tone::Warn, verb, message);
    }

    /// Format a path for display, relative to the working directory.
    pub fn path(&self, path: &Path) -> String {
        let shown = display_path(path);
        if self.color {
            format!("{CYAN}{shown}{RESET}")
        } else {
            shown
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            let colour = tone.colour();
            format!("{BOLD}{colour}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn print_line(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Pluralize a count: `plural(1, "emoji", "emojis")` -> "1 emoji".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

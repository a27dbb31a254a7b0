use std::fmt::Display;

use colored::Colorize;

/// Auxiliary diagnostic output, passed explicitly to every component that
/// wants to report what it is doing.
///
/// Nothing printed here feeds back into a scan: a disabled `Diagnostics`
/// produces the same result as an enabled one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    debug: bool,
}

impl Diagnostics {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Print a `[DEBUG]` line to stderr when debug output is enabled.
    pub fn debug(&self, msg: impl Display) {
        if self.debug {
            eprintln!("{} {}", "[DEBUG]".dimmed(), msg);
        }
    }

    /// Warnings are always shown.
    pub fn warn(&self, msg: impl Display) {
        eprintln!("  {} {}", "⚠".yellow(), msg);
    }
}

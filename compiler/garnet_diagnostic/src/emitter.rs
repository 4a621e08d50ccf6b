//! Terminal Emitter
//!
//! Renders diagnostics as `path:line:col: severity: message` followed by the
//! offending source line and a caret underline, with optional ANSI color.

use std::io::{self, Write};

use garnet_ir::Source;

use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Render one diagnostic against the source it was reported on.
    pub fn emit(&mut self, diagnostic: &Diagnostic, source: &Source<'_>, path: &str) -> io::Result<()> {
        let (line, column) = source.line_column(diagnostic.location.start);
        let prefix = format!("{path}:{line}:{}: ", column + 1);
        self.write_colored(&prefix, colors::BOLD)?;
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&diagnostic.severity.to_string(), color)?;
        writeln!(self.writer, ": {}", diagnostic.message)?;

        let text = source.line_text(diagnostic.location.start);
        writeln!(self.writer, "  {}", String::from_utf8_lossy(text))?;

        // Underline to the end of the location, clipped to this line.
        let line_len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        let width = diagnostic
            .location
            .len()
            .min(line_len.saturating_sub(column))
            .max(1);
        let padding = " ".repeat(column as usize);
        let carets = "^".repeat(width as usize);
        write!(self.writer, "  {padding}")?;
        self.write_colored(&carets, color)?;
        writeln!(self.writer)
    }

    /// Print a one-line count of what was emitted.
    pub fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        if error_count == 0 && warning_count == 0 {
            return Ok(());
        }
        writeln!(
            self.writer,
            "{error_count} error{}, {warning_count} warning{}",
            plural_s(error_count),
            plural_s(warning_count)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests;

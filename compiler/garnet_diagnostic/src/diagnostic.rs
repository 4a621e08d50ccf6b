//! Core diagnostic types.

use std::fmt;

use garnet_ir::Location;

use crate::DiagnosticId;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// How a host should treat a diagnostic.
///
/// Errors are `Syntax` (the default), `Argument` (only raised when the
/// source came from a command-line argument), or `Load` (only raised when
/// the file is loaded). Warnings are `Default` (always shown) or `Verbose`
/// (shown only in verbose mode).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Level {
    Syntax,
    Argument,
    Load,
    Default,
    Verbose,
}

impl Level {
    /// Wire tag; interpreted relative to the severity.
    pub const fn tag(self) -> u8 {
        match self {
            Level::Syntax | Level::Default => 0,
            Level::Argument | Level::Verbose => 1,
            Level::Load => 2,
        }
    }

    pub const fn from_tag(severity: Severity, tag: u8) -> Option<Level> {
        match (severity, tag) {
            (Severity::Error, 0) => Some(Level::Syntax),
            (Severity::Error, 1) => Some(Level::Argument),
            (Severity::Error, 2) => Some(Level::Load),
            (Severity::Warning, 0) => Some(Level::Default),
            (Severity::Warning, 1) => Some(Level::Verbose),
            _ => None,
        }
    }
}

/// A located syntax error or warning.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub severity: Severity,
    pub level: Level,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    /// Diagnostic with the id's default severity, level, and message.
    pub fn new(id: DiagnosticId, location: Location) -> Self {
        Diagnostic {
            id,
            severity: id.severity(),
            level: id.level(),
            message: id.message().to_string(),
            location,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.location)
    }
}

#[cfg(test)]
mod tests;

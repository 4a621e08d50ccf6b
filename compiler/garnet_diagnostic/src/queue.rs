//! Collects diagnostics in encounter order.
//!
//! Errors and warnings are kept in separate lists, each in the order the
//! lexer and parser reported them. A diagnostic identical in id and
//! location to one already queued is dropped, so recovery paths that
//! revisit the same token do not report it twice.

use rustc_hash::FxHashSet;

use garnet_ir::Location;

use crate::{Diagnostic, DiagnosticId, Severity};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    seen: FxHashSet<(DiagnosticId, Location)>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a diagnostic. Returns `false` if it duplicated an earlier one.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if !self.seen.insert((diagnostic.id, diagnostic.location)) {
            return false;
        }
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
        true
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether any error starts at `offset`.
    pub fn has_error_at(&self, offset: u32) -> bool {
        self.errors.iter().any(|d| d.location.start == offset)
    }

    /// Take `(errors, warnings)`.
    pub fn into_parts(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        (self.errors, self.warnings)
    }
}

#[cfg(test)]
mod tests;

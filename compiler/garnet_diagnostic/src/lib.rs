//! Diagnostics for the Garnet parser.
//!
//! Syntax errors and warnings are values, never panics or `Err`s: the lexer
//! and parser push them into a [`DiagnosticQueue`] and keep going. Each
//! carries a stable [`DiagnosticId`], a [`Severity`], a [`Level`], the
//! rendered message, and the [`Location`](garnet_ir::Location) it points at.

mod diagnostic;
pub mod emitter;
mod id;
mod queue;

pub use diagnostic::{Diagnostic, Level, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use id::DiagnosticId;
pub use queue::DiagnosticQueue;

//! Low-level scanning primitives for the Garnet lexer.
//!
//! [`SourceBuffer`] copies the source into a zero-padded buffer so the
//! [`Cursor`] can look a few bytes ahead without bounds checks failing at
//! the end of input. Source bytes need not be valid UTF-8.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;

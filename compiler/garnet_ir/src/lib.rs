//! Garnet IR - shared data types for the Garnet parser.
//!
//! This crate holds everything the lexer, parser, and wire codec agree on:
//! - [`Location`] byte ranges into the source
//! - [`Name`] for identifiers and constants (raw bytes, not interned)
//! - [`Token`] and the closed [`TokenKind`] set
//! - the [`Node`] tree, its field schema, and the [`Visitor`]
//! - comments, encodings, and the line table in [`Source`]
//!
//! Every type derives `Eq` and `Hash` so whole trees and parse results can be
//! compared structurally. Floats are stored as `u64` bits for that reason.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod comment;
mod encoding;
mod location;
mod name;
pub mod node;
mod source;
mod token;
mod value;

pub use comment::{Comment, CommentKind, MagicComment};
pub use encoding::Encoding;
pub use location::{Location, LocationError};
pub use name::Name;
pub use node::{
    FieldError, FieldKind, FieldRef, FieldType, FieldValue, Node, NodeKind, NodeType, Visitor,
};
pub use source::Source;
pub use token::{Token, TokenKind};
pub use value::{FloatValue, IntegerValue, StringValue};

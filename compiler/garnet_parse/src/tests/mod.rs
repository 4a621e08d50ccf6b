//! Parser tests.
//!
//! - `parser`: literals, calls, assignments, control flow, and definitions
//! - `recovery`: malformed input and the diagnostics it produces
//!
//! The helpers here are shared with the unit tests of the grammar modules.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod parser;
mod recovery;

use garnet_ir::Node;

use crate::{parse, Options, ParseResult};

pub(crate) fn parse_source(source: &str) -> ParseResult<'_> {
    parse(source.as_bytes(), &Options::default())
}

pub(crate) fn parse_with<'src>(source: &'src str, options: &Options) -> ParseResult<'src> {
    parse(source.as_bytes(), options)
}

/// Top-level statements of a parse.
pub(crate) fn statements<'a>(result: &'a ParseResult<'_>) -> &'a [Node] {
    result.statements()
}

/// The only top-level statement of an error-free parse.
pub(crate) fn single(result: &ParseResult<'_>) -> Node {
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    let body = statements(result);
    assert_eq!(body.len(), 1, "expected one statement, got {body:?}");
    body[0].clone()
}

//! The outcome of a parse.

use garnet_diagnostic::Diagnostic;
use garnet_ir::{Comment, Encoding, Location, MagicComment, Node, NodeKind, Source, Token};

/// A complete tree plus everything recorded alongside it.
///
/// Always produced, whatever the input: syntax errors are in `errors` and
/// the tree holds placeholders where required elements were missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseResult<'src> {
    /// A `ProgramNode`.
    pub root: Node,
    pub comments: Vec<Comment>,
    pub magic_comments: Vec<MagicComment>,
    /// Location of the text after `__END__`.
    pub data_loc: Option<Location>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    /// Encoding in effect at the end of the parse.
    pub encoding: Encoding,
    pub frozen_string_literal: Option<bool>,
    pub source: Source<'src>,
}

impl<'src> ParseResult<'src> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Top-level statements of the program.
    pub fn statements(&self) -> &[Node] {
        let NodeKind::Program(program) = &self.root.kind else {
            return &[];
        };
        match &program.statements.kind {
            NodeKind::Statements(statements) => &statements.body,
            _ => &[],
        }
    }

    /// Locals of the top-level scope, in declaration order.
    pub fn locals(&self) -> &[garnet_ir::Name] {
        match &self.root.kind {
            NodeKind::Program(program) => &program.locals,
            _ => &[],
        }
    }
}

/// The token stream of a source, with what the lexer recorded alongside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexResult<'src> {
    /// Every token in emission order, ending with `Eof`.
    pub tokens: Vec<Token<'src>>,
    pub comments: Vec<Comment>,
    pub magic_comments: Vec<MagicComment>,
    pub data_loc: Option<Location>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub encoding: Encoding,
    pub source: Source<'src>,
}

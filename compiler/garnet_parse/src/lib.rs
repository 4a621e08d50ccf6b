//! Recursive descent parser for Garnet.
//!
//! Statements are parsed top-down; expressions use precedence climbing over
//! a binding-power table (see `grammar::expr::operators`). The parser pulls
//! tokens from the lexer one at a time and feeds context back to it: after
//! an identifier that names a local variable the lexer is told that a value
//! was seen, so `x -1` lexes as a subtraction.
//!
//! Parsing never fails. Every syntax error becomes a diagnostic, missing
//! pieces become `MissingNode`s, and the parser resynchronises at the next
//! statement boundary or closing token.

mod context;
mod cursor;
mod error;
mod grammar;
mod options;
mod recovery;
mod result;
mod scope;
mod stack;

pub use context::ParseContext;
pub use cursor::Cursor;
pub use error::ConfigError;
pub use options::{CommandLine, Options, OptionsScope, Version};
pub use recovery::TokenSet;
pub use result::{LexResult, ParseResult};
pub use scope::{numbered_parameter, BlockParameters, Forwarding, Scope, ScopeKind, ScopeTracker};
pub use stack::ensure_sufficient_stack;

use garnet_diagnostic::{Diagnostic, DiagnosticId};
use garnet_ir::{Location, Name, Node, Source, Token, TokenKind};
use garnet_lexer::{LexState, Lexer, LexerOptions};
use garnet_lexer_core::SourceBuffer;
use tracing::debug;

use crate::recovery::TokenSet as Set;

/// Parse `source` into a complete tree.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse<'src>(source: &'src [u8], options: &Options) -> ParseResult<'src> {
    run(source, options, false).0
}

/// Every token of `source`, trivia included, in the order the lexer
/// produced them while the parser drove it.
///
/// The parser runs alongside so that context-dependent tokens (`foo -1`
/// after a local, labels, `do` kinds) come out as they would in a parse.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex<'src>(source: &'src [u8], options: &Options) -> LexResult<'src> {
    let (result, tokens) = run(source, options, true);
    LexResult {
        tokens,
        comments: result.comments,
        magic_comments: result.magic_comments,
        data_loc: result.data_loc,
        errors: result.errors,
        warnings: result.warnings,
        encoding: result.encoding,
        source: result.source,
    }
}

/// Parse, also returning the recorded tokens when `record_tokens` is set.
/// The lexer's tokens borrow its padded copy of the source; they are
/// rebound to `source` before leaving.
fn run<'src>(source: &'src [u8], options: &Options, record_tokens: bool) -> (ParseResult<'src>, Vec<Token<'src>>) {
    let buffer = SourceBuffer::new(source);
    let config = LexerOptions {
        record_tokens,
        ..lexer_options(options)
    };
    let lexer = Lexer::new(&buffer, &config);
    let mut parser = Parser::new(lexer, options);

    for scope in &options.scopes {
        parser
            .scopes
            .push_scope_with(ScopeKind::Eval, scope.locals.iter(), scope.forwarding);
    }
    parser.scopes.push_scope(ScopeKind::Top);
    let statements = parser.parse_program();
    let command_line = options.command_line | parser.shebang_command_line(options);
    let statements = parser.wrap_command_line(statements, command_line);
    let locals = parser.scopes.pop_scope().into_locals();
    let root = Node::new(
        statements.location,
        garnet_ir::node::ProgramNode {
            locals,
            statements: Box::new(statements),
        },
    );

    let output = parser.cursor.finish();
    let tokens = output.tokens.iter().filter_map(|token| token.rebind(source)).collect();
    let (errors, warnings) = output.diagnostics.into_parts();
    debug!(errors = errors.len(), warnings = warnings.len(), "parsed");
    let result = ParseResult {
        root,
        comments: output.comments,
        magic_comments: output.magic_comments,
        data_loc: output.data_loc,
        errors,
        warnings,
        encoding: output.encoding,
        frozen_string_literal: output.frozen_string_literal,
        source: Source::new(source, options.start_line),
    };
    (result, tokens)
}

/// Lexer configuration for `options`.
pub fn lexer_options(options: &Options) -> LexerOptions {
    LexerOptions {
        encoding: options.encoding,
        encoding_locked: options.encoding_locked,
        frozen_string_literal: options.frozen_string_literal,
        skip_to_shebang: options.command_line.contains(CommandLine::X),
        main_script: options.main_script,
        record_tokens: false,
    }
}

/// Parser state.
pub(crate) struct Parser<'buf> {
    cursor: Cursor<'buf>,
    scopes: ScopeTracker,
    context: ParseContext,
    version: Version,
    partial_script: bool,
    filepath: Vec<u8>,
    /// Depth of open statement lists; the program body is 1.
    statement_nesting: u32,
    /// Names bound by the pattern being parsed.
    pattern_captures: Vec<Name>,
    /// Terminators of the open statement lists, innermost last.
    terminators: Vec<Set>,
}

impl<'buf> Parser<'buf> {
    fn new(lexer: Lexer<'buf>, options: &Options) -> Self {
        Parser {
            cursor: Cursor::new(lexer),
            scopes: ScopeTracker::new(),
            context: ParseContext::new(),
            version: options.version,
            partial_script: options.partial_script,
            filepath: options.filepath.clone().unwrap_or_default(),
            statement_nesting: 0,
            pattern_captures: Vec::new(),
            terminators: Vec::new(),
        }
    }

    // Cursor delegation.

    #[inline]
    fn current(&self) -> Token<'buf> {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_location(&self) -> Location {
        self.cursor.current_location()
    }

    #[inline]
    fn previous_location(&self) -> Location {
        self.cursor.previous_location()
    }

    #[inline]
    fn previous_kind(&self) -> TokenKind {
        self.cursor.previous_kind()
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.cursor.at(kind)
    }

    #[inline]
    fn at_any(&self, set: Set) -> bool {
        self.cursor.at_any(set)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Consume the current token. When the new current token is an
    /// identifier naming a visible local, the lexer is told a value was
    /// seen so the following operator lexes as binary.
    fn advance(&mut self) -> Token<'buf> {
        let consumed = self.cursor.advance();
        let current = self.cursor.current();
        if current.kind == TokenKind::Identifier
            && !self.cursor.current_state().is_fname_or_dot()
            && self.scopes.resolve(current.raw).is_some()
        {
            self.cursor.set_lex_state(LexState::END | LexState::LABEL);
        }
        consumed
    }

    /// Consume the current token if it is `kind`.
    fn accept(&mut self, kind: TokenKind) -> Option<Location> {
        if self.at(kind) {
            Some(self.advance().location)
        } else {
            None
        }
    }

    /// Consume `kind` or report `id`.
    fn expect(&mut self, kind: TokenKind, id: DiagnosticId) -> Option<Location> {
        let location = self.accept(kind);
        if location.is_none() {
            self.error(id, self.error_location());
        }
        location
    }

    /// Where to point an error about the current token: the token itself,
    /// or the end of the previous one when the current token is a line
    /// break or the end of input.
    fn error_location(&self) -> Location {
        match self.current_kind() {
            TokenKind::Eof | TokenKind::Newline => Location::point(self.previous_location().end),
            _ => self.current_location(),
        }
    }

    fn error(&mut self, id: DiagnosticId, location: Location) {
        self.cursor.diagnostics().push(Diagnostic::new(id, location));
    }

    fn warn(&mut self, id: DiagnosticId, location: Location) {
        self.error(id, location);
    }

    fn error_with(&mut self, id: DiagnosticId, location: Location, message: String) {
        self.cursor
            .diagnostics()
            .push(Diagnostic::new(id, location).with_message(message));
    }

    /// Report the current token as unexpected.
    fn error_unexpected(&mut self, id: DiagnosticId) {
        let token = self.current();
        let message = match id {
            DiagnosticId::UnexpectedTokenIgnore => {
                format!("unexpected {}, ignoring it", token.kind.display())
            }
            DiagnosticId::UnexpectedToken => {
                format!("unexpected {}; expected an expression", token.kind.display())
            }
            _ => id.message().to_string(),
        };
        self.error_with(id, self.error_location(), message);
    }

    /// Zero-width placeholder at the current error position.
    fn missing(&self) -> Node {
        Node::missing(Location::point(self.error_location().start))
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while self.at(TokenKind::Newline) || self.at(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Run `f` with `context` in place of the current context.
    fn with_context<R>(&mut self, context: ParseContext, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Bytes of `location` in the source.
    fn slice(&self, location: Location) -> &'buf [u8] {
        location.slice(self.cursor.source()).unwrap_or_default()
    }

    fn shebang_command_line(&self, options: &Options) -> CommandLine {
        if !options.main_script {
            return CommandLine::empty();
        }
        self.cursor
            .shebang_flags()
            .iter()
            .filter_map(|&letter| CommandLine::from_letter(char::from(letter)).ok())
            .fold(CommandLine::empty(), |flags, flag| flags | flag)
    }
}

#[cfg(test)]
mod tests;

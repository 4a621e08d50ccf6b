//! Token cursor over the pull lexer.
//!
//! The lexer is context-sensitive, so tokens cannot be produced ahead of
//! the parser: the cursor holds exactly one lookahead token and lexes the
//! next one only when the current one is consumed. Anything the parser
//! tells the lexer (state overrides, `do` loop markers) therefore applies
//! to the token after `current`.

use garnet_diagnostic::DiagnosticQueue;
use garnet_ir::{Location, Token, TokenKind};
use garnet_lexer::{LexOutput, LexState, Lexer};
use tracing::trace;

use crate::recovery::TokenSet;

pub struct Cursor<'buf> {
    lexer: Lexer<'buf>,
    current: Token<'buf>,
    /// Lexer state in effect when `current` was lexed.
    current_state: LexState,
    previous: Location,
    previous_kind: TokenKind,
}

impl<'buf> Cursor<'buf> {
    /// Wrap `lexer` and lex the first token.
    pub fn new(mut lexer: Lexer<'buf>) -> Self {
        let current_state = lexer.state();
        let current = next_valid(&mut lexer);
        Cursor {
            lexer,
            current,
            current_state,
            previous: Location::point(current.location.start),
            previous_kind: TokenKind::NotProvided,
        }
    }

    #[inline]
    pub fn current(&self) -> Token<'buf> {
        self.current
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn current_location(&self) -> Location {
        self.current.location
    }

    /// State the lexer was in before it produced `current`.
    #[inline]
    pub fn current_state(&self) -> LexState {
        self.current_state
    }

    #[inline]
    pub fn previous_location(&self) -> Location {
        self.previous
    }

    #[inline]
    pub fn previous_kind(&self) -> TokenKind {
        self.previous_kind
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn at_any(&self, set: TokenSet) -> bool {
        set.contains(self.current.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Consume the current token and lex the next one. Invalid tokens are
    /// skipped here; the lexer has already reported them.
    pub fn advance(&mut self) -> Token<'buf> {
        let consumed = self.current;
        if consumed.kind != TokenKind::Eof {
            self.previous = consumed.location;
            self.previous_kind = consumed.kind;
            self.current_state = self.lexer.state();
            self.current = next_valid(&mut self.lexer);
        }
        trace!(token = ?self.current, "cursor");
        consumed
    }

    /// The lexer state that will apply to the token after `current`.
    #[inline]
    pub fn lex_state(&self) -> LexState {
        self.lexer.state()
    }

    pub fn set_lex_state(&mut self, state: LexState) {
        self.lexer.set_state(state);
    }

    pub fn push_do_loop(&mut self, in_condition: bool) {
        self.lexer.push_do_loop(in_condition);
    }

    pub fn pop_do_loop(&mut self) {
        self.lexer.pop_do_loop();
    }

    pub fn source(&self) -> &'buf [u8] {
        self.lexer.source()
    }

    pub fn encoding(&self) -> garnet_ir::Encoding {
        self.lexer.encoding()
    }

    pub fn frozen_string_literal(&self) -> Option<bool> {
        self.lexer.frozen_string_literal()
    }

    /// Switch letters from a `#!` first line.
    pub fn shebang_flags(&self) -> &[u8] {
        self.lexer.shebang_flags()
    }

    pub fn diagnostics(&mut self) -> &mut DiagnosticQueue {
        self.lexer.diagnostics_mut()
    }

    pub fn finish(self) -> LexOutput<'buf> {
        self.lexer.finish()
    }
}

fn next_valid<'buf>(lexer: &mut Lexer<'buf>) -> Token<'buf> {
    loop {
        let token = lexer.next_token();
        if token.kind != TokenKind::Invalid {
            return token;
        }
    }
}

#[cfg(test)]
mod tests;

//! String-like literals: quotes, `%` literals, regexps, word lists,
//! heredocs, and `?c` character literals.
//!
//! Opening a literal pushes a mode; the body is then produced piecewise as
//! `STRING_CONTENT` tokens interleaved with interpolation tokens, and the
//! closing delimiter pops the mode again.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::{Token, TokenKind};

use super::{is_space, Lexer};
use crate::mode::{Delimited, Heredoc, HeredocIndent, HeredocQuote, LiteralKind, Mode};
use crate::LexState;

/// The closing bracket for a bracket opener, or the byte itself.
fn terminator_for(open: u8) -> (u8, u8) {
    match open {
        b'(' => (b')', b'('),
        b'[' => (b']', b'['),
        b'{' => (b'}', b'{'),
        b'<' => (b'>', b'<'),
        _ => (open, 0),
    }
}

fn is_word_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x0b')
}

impl<'buf> Lexer<'buf> {
    /// `"` or `'`. The cursor is on the quote.
    pub(super) fn begin_quote(&mut self, start: u32, quote: u8, interpolation: bool, cmd_state: bool) -> Token<'buf> {
        let label_allowed = self.label_possible(cmd_state);
        self.cursor.advance();
        self.push_string(quote, interpolation, label_allowed, LiteralKind::String);
        self.token(TokenKind::StringBegin, start)
    }

    pub(super) fn push_string(&mut self, terminator: u8, interpolation: bool, label_allowed: bool, kind: LiteralKind) {
        self.modes.push(Mode::String(Delimited {
            interpolation,
            incrementor: 0,
            terminator,
            nesting: 0,
            label_allowed,
            kind,
        }));
    }

    pub(super) fn begin_regexp(&mut self, start: u32, terminator: u8, incrementor: u8) -> Token<'buf> {
        self.modes.push(Mode::Regexp(Delimited {
            interpolation: true,
            incrementor,
            terminator,
            nesting: 0,
            label_allowed: false,
            kind: LiteralKind::String,
        }));
        self.token(TokenKind::RegexpBegin, start)
    }

    /// A backtick is a method name after `def` or `.`, and an xstring
    /// otherwise.
    pub(super) fn lex_backtick(&mut self, start: u32) -> Token<'buf> {
        self.cursor.advance();
        if self.state.contains(LexState::FNAME) {
            return self.emit(TokenKind::Backtick, start, LexState::ENDFN);
        }
        if self.state.contains(LexState::DOT) {
            return self.emit(TokenKind::Backtick, start, LexState::ARG);
        }
        self.push_string(b'`', true, false, LiteralKind::XString);
        self.token(TokenKind::Backtick, start)
    }

    /// `%q(...)`, `%w[...]`, `%r{...}`, and friends. The cursor is on `%`.
    pub(super) fn lex_percent_literal(&mut self, start: u32) -> Token<'buf> {
        use TokenKind as T;

        self.cursor.advance();
        let letter = self.cursor.current();
        let (kind, open) = if letter.is_ascii_alphanumeric() {
            self.cursor.advance();
            (Some(letter), self.cursor.current())
        } else {
            (None, letter)
        };

        if self.cursor.is_eof() {
            self.error(DiagnosticId::InvalidPercentEof, start, self.cursor.pos());
            return self.token(T::Invalid, start);
        }
        let known = matches!(kind, None | Some(b'q' | b'Q' | b'w' | b'W' | b'i' | b'I' | b's' | b'r' | b'x'));
        if !known || open.is_ascii_alphanumeric() {
            self.error(DiagnosticId::InvalidPercent, start, self.cursor.pos());
            return self.token(T::Invalid, start);
        }
        self.cursor.advance();

        let (terminator, incrementor) = terminator_for(open);
        let delimited = |interpolation: bool, kind: LiteralKind| Delimited {
            interpolation,
            incrementor,
            terminator,
            nesting: 0,
            label_allowed: false,
            kind,
        };
        let (mode, token) = match kind {
            Some(b'q') => (Mode::String(delimited(false, LiteralKind::String)), T::StringBegin),
            None | Some(b'Q') => (Mode::String(delimited(true, LiteralKind::String)), T::StringBegin),
            Some(b's') => (Mode::String(delimited(false, LiteralKind::Symbol)), T::SymbolBegin),
            Some(b'x') => (Mode::String(delimited(true, LiteralKind::XString)), T::PercentLowerX),
            Some(b'r') => (Mode::Regexp(delimited(true, LiteralKind::String)), T::RegexpBegin),
            Some(b'w') => (Mode::List(delimited(false, LiteralKind::String)), T::PercentLowerW),
            Some(b'W') => (Mode::List(delimited(true, LiteralKind::String)), T::PercentUpperW),
            Some(b'i') => (Mode::List(delimited(false, LiteralKind::Symbol)), T::PercentLowerI),
            _ => (Mode::List(delimited(true, LiteralKind::Symbol)), T::PercentUpperI),
        };
        self.modes.push(mode);
        self.token(token, start)
    }

    /// `?a` character literal, or the ternary `?`.
    pub(super) fn lex_question_mark(&mut self, start: u32) -> Token<'buf> {
        self.cursor.advance();
        if self.state.is_end() {
            return self.emit(TokenKind::QuestionMark, start, LexState::BEG);
        }
        let current = self.cursor.current();
        if self.cursor.is_eof() {
            self.error(DiagnosticId::CharacterLiteralTerm, start, self.cursor.pos());
            return self.emit(TokenKind::QuestionMark, start, LexState::BEG);
        }
        if is_space(current) {
            return self.emit(TokenKind::QuestionMark, start, LexState::BEG);
        }
        let next = self.cursor.peek();
        if (current.is_ascii_alphanumeric() || current == b'_')
            && (next.is_ascii_alphanumeric() || next == b'_' || next >= 0x80)
        {
            return self.emit(TokenKind::QuestionMark, start, LexState::BEG);
        }

        if current == b'\\' {
            self.cursor.advance();
            self.skip_escape();
        } else {
            self.advance_char();
        }
        self.emit(TokenKind::CharacterLiteral, start, LexState::END)
    }

    /// Move over one character, reporting it if the encoding rejects it.
    fn advance_char(&mut self) {
        let at = self.cursor.pos();
        match self.encoding.char_width(self.cursor.rest()) {
            Some(width) => self.cursor.advance_n(u32::try_from(width).unwrap_or(1)),
            None => {
                self.cursor.advance();
                self.error(DiagnosticId::InvalidMultibyteChar, at, at + 1);
            }
        }
    }

    /// Move over the body of an escape; the cursor is after the backslash.
    fn skip_escape(&mut self) {
        match self.cursor.current() {
            b'u' => {
                self.cursor.advance();
                if self.cursor.current() == b'{' {
                    while !self.cursor.is_eof() && !matches!(self.cursor.current(), b'}' | b'\n') {
                        self.cursor.advance();
                    }
                    if self.cursor.current() == b'}' {
                        self.cursor.advance();
                    }
                } else {
                    self.eat_limited(4, |b| b.is_ascii_hexdigit());
                }
            }
            b'x' => {
                self.cursor.advance();
                self.eat_limited(2, |b| b.is_ascii_hexdigit());
            }
            b'0'..=b'7' => self.eat_limited(3, |b| matches!(b, b'0'..=b'7')),
            b'c' => {
                self.cursor.advance();
                self.skip_escaped_operand();
            }
            b'C' | b'M' if self.cursor.peek() == b'-' => {
                self.cursor.advance_n(2);
                self.skip_escaped_operand();
            }
            _ if !self.cursor.is_eof() => self.advance_char(),
            _ => {}
        }
    }

    fn skip_escaped_operand(&mut self) {
        if self.cursor.current() == b'\\' {
            self.cursor.advance();
            self.skip_escape();
        } else if !self.cursor.is_eof() {
            self.advance_char();
        }
    }

    fn eat_limited(&mut self, limit: u32, pred: impl Fn(u8) -> bool) {
        for _ in 0..limit {
            if self.cursor.is_eof() || !pred(self.cursor.current()) {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Whether `#` at `offset` starts `#{`, `#@var`, or `#$var`.
    fn interpolation_at(&self, offset: u32) -> Option<TokenKind> {
        let next = self.cursor.byte_at(offset + 1);
        let after = self.cursor.byte_at(offset + 2);
        let ident_start = |b: u8| b == b'_' || b.is_ascii_alphabetic() || b >= 0x80;
        match next {
            b'{' => Some(TokenKind::EmbexprBegin),
            b'@' if ident_start(after) => Some(TokenKind::Embvar),
            b'@' if after == b'@' && ident_start(self.cursor.byte_at(offset + 3)) => Some(TokenKind::Embvar),
            b'$' if ident_start(after) || after.is_ascii_digit() || b"~*$?!@/\\;,.=:<>\"&`'+".contains(&after) => {
                Some(TokenKind::Embvar)
            }
            _ => None,
        }
    }

    /// Emit the interpolation token at the cursor and enter its mode.
    fn lex_interpolation(&mut self, start: u32, kind: TokenKind) -> Token<'buf> {
        if kind == TokenKind::EmbexprBegin {
            self.cursor.advance_n(2);
            self.modes.push(Mode::Embexpr {
                brace_nesting: self.brace_nesting,
            });
            self.command_start = true;
            return self.emit(kind, start, LexState::BEG);
        }
        self.cursor.advance();
        self.modes.push(Mode::Embvar);
        self.emit(kind, start, LexState::BEG)
    }

    fn set_nesting(&mut self, nesting: u32) {
        if let Some(Mode::String(d) | Mode::Regexp(d) | Mode::List(d)) = self.modes.last_mut() {
            d.nesting = nesting;
        }
    }

    /// Report an unterminated literal and close it with an empty end token.
    fn unterminated(&mut self, id: DiagnosticId, kind: TokenKind) -> Token<'buf> {
        let end = self.cursor.pos();
        self.error(id, end, end);
        self.modes.pop();
        self.state = LexState::END;
        self.token_at(kind, end, end)
    }

    /// Scan literal content up to a delimiter, an interpolation, or (for
    /// word lists) a separator. Returns the content token.
    fn lex_content(&mut self, mut d: Delimited, words: bool) -> Token<'buf> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            let byte = self.cursor.current();
            if byte == d.terminator && d.nesting == 0 {
                break;
            }
            if words && is_word_separator(byte) {
                break;
            }
            if byte == d.terminator {
                d.nesting -= 1;
            } else if d.incrementor != 0 && byte == d.incrementor {
                d.nesting += 1;
            } else if byte == b'\\' {
                self.cursor.advance();
                if !self.cursor.is_eof() {
                    let newline = self.cursor.current() == b'\n';
                    self.cursor.advance();
                    if newline && self.heredoc_end.is_some() {
                        return self.content_before_heredoc_jump(d, start);
                    }
                }
                continue;
            } else if byte == b'#' && d.interpolation && self.interpolation_at(self.cursor.pos()).is_some() {
                break;
            } else if byte == b'\n' && self.heredoc_end.is_some() {
                self.cursor.advance();
                return self.content_before_heredoc_jump(d, start);
            }
            self.cursor.advance();
        }
        self.set_nesting(d.nesting);
        self.token(TokenKind::StringContent, start)
    }

    fn content_before_heredoc_jump(&mut self, d: Delimited, start: u32) -> Token<'buf> {
        self.set_nesting(d.nesting);
        let token = self.token(TokenKind::StringContent, start);
        self.jump_heredoc_end();
        token
    }

    /// Body of a quoted string, xstring, or dynamic symbol.
    pub(super) fn lex_string(&mut self, d: Delimited) -> Token<'buf> {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            let id = match d.kind {
                LiteralKind::String => DiagnosticId::StringTerm,
                LiteralKind::XString => DiagnosticId::XStringTerm,
                LiteralKind::Symbol => DiagnosticId::SymbolTerm,
            };
            return self.unterminated(id, TokenKind::StringEnd);
        }
        let byte = self.cursor.current();
        if byte == d.terminator && d.nesting == 0 {
            self.cursor.advance();
            self.modes.pop();
            if d.label_allowed && self.cursor.current() == b':' && self.cursor.peek() != b':' {
                self.cursor.advance();
                return self.emit(TokenKind::LabelEnd, start, LexState::ARG | LexState::LABELED);
            }
            return self.emit(TokenKind::StringEnd, start, LexState::END);
        }
        if byte == b'#' && d.interpolation {
            if let Some(kind) = self.interpolation_at(start) {
                return self.lex_interpolation(start, kind);
            }
        }
        self.lex_content(d, false)
    }

    /// Body of a regexp; the end token carries the option letters.
    pub(super) fn lex_regexp(&mut self, d: Delimited) -> Token<'buf> {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return self.unterminated(DiagnosticId::RegexpTerm, TokenKind::RegexpEnd);
        }
        let byte = self.cursor.current();
        if byte == d.terminator && d.nesting == 0 {
            self.cursor.advance();
            self.modes.pop();
            while self.cursor.current().is_ascii_alphabetic() {
                let at = self.cursor.pos();
                if !b"imxonesu".contains(&self.cursor.current()) {
                    self.error(DiagnosticId::RegexpUnknownOption, at, at + 1);
                }
                self.cursor.advance();
            }
            return self.emit(TokenKind::RegexpEnd, start, LexState::END);
        }
        if byte == b'#' {
            if let Some(kind) = self.interpolation_at(start) {
                return self.lex_interpolation(start, kind);
            }
        }
        self.lex_content(d, false)
    }

    /// Body of `%w`/`%W`/`%i`/`%I`: words separated by `WORDS_SEP`.
    pub(super) fn lex_list(&mut self, d: Delimited) -> Token<'buf> {
        let start = self.cursor.pos();
        if is_word_separator(self.cursor.current()) && !self.cursor.is_eof() {
            while !self.cursor.is_eof() && is_word_separator(self.cursor.current()) {
                let newline = self.cursor.current() == b'\n';
                self.cursor.advance();
                if newline && self.heredoc_end.is_some() {
                    let token = self.token(TokenKind::WordsSep, start);
                    self.jump_heredoc_end();
                    return token;
                }
            }
            return self.token(TokenKind::WordsSep, start);
        }
        if self.cursor.is_eof() {
            return self.unterminated(DiagnosticId::ListTerm, TokenKind::StringEnd);
        }
        let byte = self.cursor.current();
        if byte == d.terminator && d.nesting == 0 {
            self.cursor.advance();
            self.modes.pop();
            return self.emit(TokenKind::StringEnd, start, LexState::END);
        }
        if byte == b'#' && d.interpolation {
            if let Some(kind) = self.interpolation_at(start) {
                return self.lex_interpolation(start, kind);
            }
        }
        self.lex_content(d, true)
    }

    /// `<<ID`, `<<-ID`, `<<~ID`, optionally quoted. The cursor is on the
    /// first `<`. Returns `None` (without moving) when this is a shift
    /// operator instead.
    pub(super) fn lex_heredoc_start(&mut self, start: u32) -> Option<Token<'buf>> {
        let mut pos = start + 2;
        let indent = match self.cursor.byte_at(pos) {
            b'-' => {
                pos += 1;
                HeredocIndent::Dash
            }
            b'~' => {
                pos += 1;
                HeredocIndent::Tilde
            }
            _ => HeredocIndent::None,
        };

        let (quote, ident_start, ident_end, marker_end) = match self.cursor.byte_at(pos) {
            open @ (b'\'' | b'"' | b'`') => {
                let close = (pos + 1..self.cursor.source_len())
                    .find(|&at| matches!(self.cursor.byte_at(at), b'\n' | b'\r') || self.cursor.byte_at(at) == open)?;
                if self.cursor.byte_at(close) != open {
                    return None;
                }
                let quote = match open {
                    b'\'' => HeredocQuote::Single,
                    b'`' => HeredocQuote::Backtick,
                    _ => HeredocQuote::Double,
                };
                (quote, pos + 1, close, close + 1)
            }
            byte if byte == b'_' || byte.is_ascii_alphabetic() || byte >= 0x80 => {
                let mut end = pos;
                while let Some(width) = self.encoding.ident_char_width(self.cursor.slice(end, self.cursor.source_len())) {
                    end += u32::try_from(width).unwrap_or(1);
                }
                (HeredocQuote::Double, pos, end, end)
            }
            _ => return None,
        };

        let body_start = self
            .heredoc_end
            .take()
            .unwrap_or_else(|| self.cursor.next_line_start(marker_end));
        self.cursor.set_pos(marker_end);
        let token = self.token(TokenKind::HeredocStart, start);
        self.modes.push(Mode::Heredoc(Heredoc {
            ident_start,
            ident_end,
            quote,
            indent,
            resume: marker_end,
        }));
        self.cursor.set_pos(body_start);
        self.state = LexState::END;
        tracing::trace!(start, body_start, "heredoc");
        Some(token)
    }

    /// Whether the line at `line_start` is the heredoc's terminator line.
    /// Returns the offset after the line's newline.
    fn heredoc_terminator(&self, heredoc: &Heredoc, line_start: u32) -> Option<u32> {
        let mut pos = line_start;
        if heredoc.indent != HeredocIndent::None {
            while matches!(self.cursor.byte_at(pos), b' ' | b'\t') && pos < self.cursor.source_len() {
                pos += 1;
            }
        }
        let ident = self.cursor.slice(heredoc.ident_start, heredoc.ident_end);
        let len = u32::try_from(ident.len()).ok()?;
        if self.cursor.slice(pos, pos + len) != ident || pos + len > self.cursor.source_len() {
            return None;
        }
        pos += len;
        match self.cursor.byte_at(pos) {
            _ if pos >= self.cursor.source_len() => Some(pos),
            b'\n' => Some(pos + 1),
            b'\r' if self.cursor.byte_at(pos + 1) == b'\n' => Some(pos + 2),
            _ => None,
        }
    }

    pub(super) fn lex_heredoc(&mut self, heredoc: Heredoc) -> Token<'buf> {
        let start = self.cursor.pos();

        if self.cursor.is_line_start(start) {
            if let Some(end) = self.heredoc_terminator(&heredoc, start) {
                self.cursor.set_pos(end);
                let token = self.token(TokenKind::HeredocEnd, start);
                self.close_heredoc(&heredoc, end);
                return token;
            }
        }
        if self.cursor.is_eof() {
            self.error(DiagnosticId::HeredocTerm, heredoc.ident_start, heredoc.ident_end);
            self.close_heredoc(&heredoc, start);
            return self.token_at(TokenKind::HeredocEnd, start, start);
        }

        let interpolates = heredoc.quote.interpolates();
        if interpolates && self.cursor.current() == b'#' {
            if let Some(kind) = self.interpolation_at(start) {
                return self.lex_interpolation(start, kind);
            }
        }

        while !self.cursor.is_eof() {
            let byte = self.cursor.current();
            if byte == b'\\' && interpolates {
                self.cursor.advance_n(if self.cursor.peek() == b'\n' { 1 } else { 2 });
                continue;
            }
            if byte == b'#' && interpolates && self.interpolation_at(self.cursor.pos()).is_some() {
                break;
            }
            self.cursor.advance();
            if byte == b'\n' {
                if self.heredoc_end.is_some() {
                    let token = self.token(TokenKind::StringContent, start);
                    self.jump_heredoc_end();
                    return token;
                }
                let line_start = self.cursor.pos();
                if heredoc.indent == HeredocIndent::Tilde
                    || self.heredoc_terminator(&heredoc, line_start).is_some()
                {
                    break;
                }
            }
        }
        self.token(TokenKind::StringContent, start)
    }

    /// Pop the heredoc and return to the rest of its marker line.
    fn close_heredoc(&mut self, heredoc: &Heredoc, body_end: u32) {
        self.modes.pop();
        self.heredoc_end = Some(body_end);
        self.cursor.set_pos(heredoc.resume);
        self.state = LexState::END;
    }
}

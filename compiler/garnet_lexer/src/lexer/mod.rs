//! The lexer proper.
//!
//! [`Lexer::next_token`] is pulled by the parser one token at a time. The
//! top of the mode stack decides how the next bytes are scanned: default
//! (expression) lexing, the body of a string-like literal, or a heredoc
//! body. The [`LexState`] carries what the previous token implies about the
//! next one.
//!
//! Heredoc bodies are lexed out of line: after a `<<ID` marker the cursor
//! jumps to the body, emits its tokens, and comes back to the rest of the
//! marker line. The next newline then skips past the consumed body.

mod comment;
mod ident;
mod literal;
mod number;

use garnet_diagnostic::{Diagnostic, DiagnosticId, DiagnosticQueue};
use garnet_ir::{Comment, Encoding, Location, MagicComment, Token, TokenKind};
use garnet_lexer_core::{Cursor, SourceBuffer};

use crate::mode::Mode;
use crate::LexState;

/// Lexer configuration, derived from the parser options.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LexerOptions {
    /// Encoding to start with; UTF-8 when unset.
    pub encoding: Option<Encoding>,
    /// Ignore `# encoding:` magic comments.
    pub encoding_locked: bool,
    pub frozen_string_literal: Option<bool>,
    /// `-x`: skip lines until a `#!...ruby` line.
    pub skip_to_shebang: bool,
    /// Honour command-line flags on a `#!...ruby` first line.
    pub main_script: bool,
    /// Keep every token, trivia included, for [`Lexer::finish`].
    pub record_tokens: bool,
}

/// Everything the lexer collected, handed over once lexing is done.
#[derive(Clone, Debug)]
pub struct LexOutput<'buf> {
    pub tokens: Vec<Token<'buf>>,
    pub comments: Vec<Comment>,
    pub magic_comments: Vec<MagicComment>,
    pub data_loc: Option<Location>,
    pub encoding: Encoding,
    pub frozen_string_literal: Option<bool>,
    pub diagnostics: DiagnosticQueue,
}

pub struct Lexer<'buf> {
    cursor: Cursor<'buf>,
    state: LexState,
    modes: Vec<Mode>,
    encoding: Encoding,
    encoding_locked: bool,
    diagnostics: DiagnosticQueue,
    comments: Vec<Comment>,
    magic_comments: Vec<MagicComment>,
    frozen_string_literal: Option<bool>,
    data_loc: Option<Location>,
    shebang_flags: Vec<u8>,
    /// Where the last consumed heredoc body ended; the next newline on the
    /// marker line jumps here.
    heredoc_end: Option<u32>,
    /// Depth of `(`, `[`, `{`.
    enclosure_nesting: u32,
    /// Depth of `{` only; matches `}` against `#{`.
    brace_nesting: u32,
    /// Enclosure depth of a `->` whose body has not opened yet.
    lambda_nesting: Option<u32>,
    /// Whether `do` closes a `while`/`until` condition at this depth.
    do_loop_stack: Vec<bool>,
    /// The next token starts a command (after a newline or `;`).
    command_start: bool,
    /// A non-trivia token has been produced.
    seen_token: bool,
    /// The previous token was a bare `:`; the next one is a symbol name.
    symbol_pending: bool,
    finished: bool,
    record: bool,
    tokens: Vec<Token<'buf>>,
}

impl<'buf> Lexer<'buf> {
    pub fn new(buffer: &'buf SourceBuffer, options: &LexerOptions) -> Self {
        let mut lexer = Lexer {
            cursor: buffer.cursor(),
            state: LexState::BEG,
            modes: Vec::new(),
            encoding: options.encoding.unwrap_or_default(),
            encoding_locked: options.encoding_locked,
            diagnostics: DiagnosticQueue::new(),
            comments: Vec::new(),
            magic_comments: Vec::new(),
            frozen_string_literal: options.frozen_string_literal,
            data_loc: None,
            shebang_flags: Vec::new(),
            heredoc_end: None,
            enclosure_nesting: 0,
            brace_nesting: 0,
            lambda_nesting: None,
            do_loop_stack: Vec::new(),
            command_start: true,
            seen_token: false,
            symbol_pending: false,
            finished: false,
            record: options.record_tokens,
            tokens: Vec::new(),
        };
        if options.skip_to_shebang {
            lexer.skip_to_shebang();
        }
        if options.main_script {
            lexer.read_shebang_flags();
        }
        lexer
    }

    /// The next significant token. Trivia (comments, ignored newlines,
    /// embedded documents, `__END__`) is recorded but skipped.
    pub fn next_token(&mut self) -> Token<'buf> {
        loop {
            let pending_symbol = self.symbol_pending;
            let token = self.lex();
            if self.record {
                self.tokens.push(token);
            }
            if token.kind.is_trivia() {
                continue;
            }
            if pending_symbol {
                self.symbol_pending = false;
                self.state = LexState::END;
            }
            if token.kind != TokenKind::Eof {
                self.seen_token = true;
            }
            tracing::trace!(?token, "lexed");
            return token;
        }
    }

    #[inline]
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Override the state before the next token is lexed. The parser does
    /// this where only it knows the context, e.g. after an identifier that
    /// names a local variable.
    #[inline]
    pub fn set_state(&mut self, state: LexState) {
        self.state = state;
    }

    /// Enter (`true`) or shield (`false`) a loop condition, where `do`
    /// closes the condition rather than opening a block.
    pub fn push_do_loop(&mut self, in_condition: bool) {
        self.do_loop_stack.push(in_condition);
    }

    pub fn pop_do_loop(&mut self) {
        self.do_loop_stack.pop();
    }

    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    #[inline]
    pub fn frozen_string_literal(&self) -> Option<bool> {
        self.frozen_string_literal
    }

    /// Flag letters from a `#!...ruby -n -l` first line.
    pub fn shebang_flags(&self) -> &[u8] {
        &self.shebang_flags
    }

    #[inline]
    pub fn source(&self) -> &'buf [u8] {
        self.cursor.slice(0, self.cursor.source_len())
    }

    /// The shared diagnostic queue. The parser reports into it too, so
    /// diagnostics stay in encounter order.
    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticQueue {
        &mut self.diagnostics
    }

    pub fn finish(self) -> LexOutput<'buf> {
        LexOutput {
            tokens: self.tokens,
            comments: self.comments,
            magic_comments: self.magic_comments,
            data_loc: self.data_loc,
            encoding: self.encoding,
            frozen_string_literal: self.frozen_string_literal,
            diagnostics: self.diagnostics,
        }
    }

    fn lex(&mut self) -> Token<'buf> {
        if self.finished {
            let end = self.cursor.source_len().max(self.cursor.pos());
            return Token::new(TokenKind::Eof, Location::point(end), &[]);
        }
        match self.modes.last().copied() {
            None | Some(Mode::Embexpr { .. }) => self.lex_default(),
            Some(Mode::Embvar) => {
                self.modes.pop();
                self.lex_embedded_variable()
            }
            Some(Mode::String(delimited)) => self.lex_string(delimited),
            Some(Mode::Regexp(delimited)) => self.lex_regexp(delimited),
            Some(Mode::List(delimited)) => self.lex_list(delimited),
            Some(Mode::Heredoc(heredoc)) => self.lex_heredoc(heredoc),
        }
    }

    fn lex_default(&mut self) -> Token<'buf> {
        let cmd_state = self.command_start;
        self.command_start = false;
        let mut space_seen = false;
        loop {
            let start = self.cursor.pos();
            match self.cursor.current() {
                b' ' | b'\t' | b'\x0c' | b'\x0b' => {
                    self.cursor.eat_whitespace();
                    space_seen = true;
                }
                b'\r' if self.cursor.peek() != b'\n' => {
                    self.cursor.advance();
                    space_seen = true;
                }
                b'\\' if self.cursor.peek() == b'\n' => {
                    self.cursor.advance_n(2);
                    self.jump_heredoc_end();
                    space_seen = true;
                }
                b'\\' if self.cursor.peek() == b'\r' && self.cursor.peek2() == b'\n' => {
                    self.cursor.advance_n(3);
                    self.jump_heredoc_end();
                    space_seen = true;
                }
                b'#' => {
                    self.command_start = cmd_state;
                    return self.lex_comment(start);
                }
                b'\n' | b'\r' => return self.lex_newline(start, cmd_state),
                b'=' if self.cursor.is_line_start(start) && self.at_embdoc_begin() => {
                    self.command_start = cmd_state;
                    return self.lex_embdoc(start);
                }
                b'_' if self.cursor.is_line_start(start) && self.at_data_marker() => {
                    return self.lex_data(start);
                }
                byte => return self.lex_punctuation(start, byte, space_seen, cmd_state),
            }
        }
    }

    fn lex_newline(&mut self, start: u32, cmd_state: bool) -> Token<'buf> {
        let width = if self.cursor.current() == b'\r' { 2 } else { 1 };
        self.cursor.advance_n(width);
        let ignored = (self.state.intersects(
            LexState::BEG | LexState::CLASS | LexState::FNAME | LexState::DOT,
        ) && !self.state.contains(LexState::LABELED))
            || self.state.contains(LexState::ARG | LexState::LABELED);
        let end = self.cursor.pos();
        self.jump_heredoc_end();

        if ignored || self.next_line_continues() {
            self.command_start = cmd_state;
            return self.token_at(TokenKind::IgnoredNewline, start, end);
        }
        self.state = LexState::BEG;
        self.command_start = true;
        self.token_at(TokenKind::Newline, start, end)
    }

    /// Whether the next code line starts with `.method` or `&.method`, which
    /// continues the current expression.
    fn next_line_continues(&self) -> bool {
        let mut pos = self.cursor.pos();
        loop {
            while matches!(self.cursor.byte_at(pos), b' ' | b'\t' | b'\x0c' | b'\x0b' | b'\r') {
                pos += 1;
            }
            if self.cursor.byte_at(pos) == b'#' && pos < self.cursor.source_len() {
                pos = self.cursor.next_line_start(pos);
                continue;
            }
            break;
        }
        match self.cursor.byte_at(pos) {
            b'.' => self.cursor.byte_at(pos + 1) != b'.',
            b'&' => self.cursor.byte_at(pos + 1) == b'.',
            _ => false,
        }
    }

    fn jump_heredoc_end(&mut self) {
        if let Some(end) = self.heredoc_end.take() {
            if end > self.cursor.pos() {
                self.cursor.set_pos(end);
            }
        }
    }

    /// Operators, delimiters, and the start of every non-trivia token.
    fn lex_punctuation(&mut self, start: u32, byte: u8, space_seen: bool, cmd_state: bool) -> Token<'buf> {
        use TokenKind as T;

        let peek = self.cursor.peek();
        match byte {
            0 | 0x04 | 0x1a => {
                self.finished = true;
                self.token_at(T::Eof, start, start)
            }
            b'*' => self.lex_star(start, space_seen),
            b'!' => {
                self.cursor.advance();
                let kind = match self.cursor.current() {
                    b'=' => {
                        self.cursor.advance();
                        T::BangEqual
                    }
                    b'~' => {
                        self.cursor.advance();
                        T::BangTilde
                    }
                    b'@' if self.state.is_fname_or_dot() => {
                        self.cursor.advance();
                        T::Bang
                    }
                    _ => T::Bang,
                };
                let state = self.operator_state();
                self.emit(kind, start, state)
            }
            b'=' => {
                self.cursor.advance();
                let kind = match (self.cursor.current(), self.cursor.peek()) {
                    (b'=', b'=') => {
                        self.cursor.advance_n(2);
                        T::EqualEqualEqual
                    }
                    (b'=', _) => {
                        self.cursor.advance();
                        T::EqualEqual
                    }
                    (b'~', _) => {
                        self.cursor.advance();
                        T::EqualTilde
                    }
                    (b'>', _) => {
                        self.cursor.advance();
                        T::EqualGreater
                    }
                    _ => T::Equal,
                };
                let state = if matches!(kind, T::Equal | T::EqualGreater) {
                    LexState::BEG
                } else {
                    self.operator_state()
                };
                self.emit(kind, start, state)
            }
            b'<' => self.lex_less(start, space_seen),
            b'>' => {
                self.cursor.advance();
                let kind = match (self.cursor.current(), self.cursor.peek()) {
                    (b'=', _) => {
                        self.cursor.advance();
                        T::GreaterEqual
                    }
                    (b'>', b'=') => {
                        self.cursor.advance_n(2);
                        T::GreaterGreaterEqual
                    }
                    (b'>', _) => {
                        self.cursor.advance();
                        T::GreaterGreater
                    }
                    _ => T::Greater,
                };
                let state = if kind == T::GreaterGreaterEqual {
                    LexState::BEG
                } else {
                    self.operator_state()
                };
                self.emit(kind, start, state)
            }
            b'"' => self.begin_quote(start, b'"', true, cmd_state),
            b'\'' => self.begin_quote(start, b'\'', false, cmd_state),
            b'`' => self.lex_backtick(start),
            b'?' => self.lex_question_mark(start),
            b'&' => self.lex_ampersand(start, space_seen),
            b'|' => {
                self.cursor.advance();
                let kind = match (self.cursor.current(), self.cursor.peek()) {
                    // `{ || }` is an empty parameter list, not `||`.
                    (b'|', _) if self.state.contains(LexState::BEG) => T::Pipe,
                    (b'|', b'=') => {
                        self.cursor.advance_n(2);
                        T::PipePipeEqual
                    }
                    (b'|', _) => {
                        self.cursor.advance();
                        T::PipePipe
                    }
                    (b'=', _) => {
                        self.cursor.advance();
                        T::PipeEqual
                    }
                    _ => T::Pipe,
                };
                let state = match kind {
                    T::Pipe if !self.state.is_fname_or_dot() => LexState::BEG | LexState::LABEL,
                    T::PipePipe | T::PipeEqual | T::PipePipeEqual => LexState::BEG,
                    _ => self.operator_state(),
                };
                self.emit(kind, start, state)
            }
            b'+' | b'-' => self.lex_sign(start, byte, space_seen),
            b'.' => {
                let beg = self.state.is_beg();
                let kind = if peek == b'.' && self.cursor.peek2() == b'.' {
                    self.cursor.advance_n(3);
                    if beg {
                        T::UDotDotDot
                    } else {
                        T::DotDotDot
                    }
                } else if peek == b'.' {
                    self.cursor.advance_n(2);
                    if beg {
                        T::UDotDot
                    } else {
                        T::DotDot
                    }
                } else {
                    self.cursor.advance();
                    return self.emit(T::Dot, start, LexState::DOT);
                };
                self.emit(kind, start, LexState::BEG)
            }
            b'0'..=b'9' => self.lex_number(start),
            b')' => {
                self.cursor.advance();
                self.close_enclosure();
                self.emit(T::ParenthesisRight, start, LexState::ENDFN)
            }
            b']' => {
                self.cursor.advance();
                self.close_enclosure();
                self.emit(T::BracketRight, start, LexState::END)
            }
            b'}' => {
                self.cursor.advance();
                if let Some(Mode::Embexpr { brace_nesting }) = self.modes.last().copied() {
                    if brace_nesting == self.brace_nesting {
                        self.modes.pop();
                        return self.token(T::EmbexprEnd, start);
                    }
                }
                self.brace_nesting = self.brace_nesting.saturating_sub(1);
                self.close_enclosure();
                self.emit(T::BraceRight, start, LexState::END)
            }
            b'(' => {
                self.cursor.advance();
                let kind = if self.state.is_beg() || !space_seen {
                    T::ParenthesisLeft
                } else if self.state.is_arg()
                    || self.state.contains(LexState::END | LexState::LABEL)
                {
                    T::ParenthesisLeftParentheses
                } else {
                    T::ParenthesisLeft
                };
                self.open_enclosure();
                self.emit(kind, start, LexState::BEG | LexState::LABEL)
            }
            b'[' => {
                self.cursor.advance();
                if self.state.is_fname_or_dot() && self.cursor.current() == b']' {
                    self.cursor.advance();
                    let kind = if self.cursor.current() == b'=' {
                        self.cursor.advance();
                        T::BracketLeftRightEqual
                    } else {
                        T::BracketLeftRight
                    };
                    return self.emit(kind, start, LexState::ARG);
                }
                let kind = if self.state.is_beg() || (self.state.is_arg() && space_seen) {
                    T::BracketLeftArray
                } else {
                    T::BracketLeft
                };
                self.open_enclosure();
                self.emit(kind, start, LexState::BEG | LexState::LABEL)
            }
            b'{' => {
                self.cursor.advance();
                let (kind, state) = if self.lambda_nesting == Some(self.enclosure_nesting) {
                    self.lambda_nesting = None;
                    (T::LambdaBegin, LexState::BEG)
                } else if self.state.contains(LexState::LABELED) {
                    (T::BraceLeft, LexState::BEG | LexState::LABEL)
                } else if self.state.intersects(LexState::ARG_ANY | LexState::END_ANY) {
                    (T::BraceLeft, LexState::BEG)
                } else {
                    (T::BraceLeft, LexState::BEG | LexState::LABEL)
                };
                self.open_enclosure();
                self.brace_nesting += 1;
                self.command_start = state == LexState::BEG;
                self.emit(kind, start, state)
            }
            b'^' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    return self.emit(T::CaretEqual, start, LexState::BEG);
                }
                let state = self.operator_state();
                self.emit(T::Caret, start, state)
            }
            b';' => {
                self.cursor.advance();
                self.command_start = true;
                self.emit(T::Semicolon, start, LexState::BEG)
            }
            b',' => {
                self.cursor.advance();
                self.emit(T::Comma, start, LexState::BEG | LexState::LABEL)
            }
            b'~' => {
                self.cursor.advance();
                if self.state.is_fname_or_dot() && self.cursor.current() == b'@' {
                    self.cursor.advance();
                }
                let state = self.operator_state();
                self.emit(T::Tilde, start, state)
            }
            b':' => self.lex_colon(start, space_seen),
            b'/' => self.lex_slash(start, space_seen),
            b'%' => self.lex_percent(start, space_seen),
            b'$' => self.lex_global_variable(start),
            b'@' => self.lex_instance_variable(start),
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.lex_identifier(start, cmd_state),
            0x80..=0xff => self.lex_identifier(start, cmd_state),
            _ => {
                self.cursor.advance();
                self.error(DiagnosticId::InvalidCharacter, start, self.cursor.pos());
                self.token(T::Invalid, start)
            }
        }
    }

    fn lex_star(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        let double = self.cursor.peek() == b'*';
        self.cursor.advance_n(if double { 2 } else { 1 });
        if self.cursor.current() == b'=' {
            self.cursor.advance();
            let kind = if double { T::StarStarEqual } else { T::StarEqual };
            return self.emit(kind, start, LexState::BEG);
        }
        let kind = if self.is_spcarg(space_seen) {
            let id = if double {
                DiagnosticId::AmbiguousPrefixStarStar
            } else {
                DiagnosticId::AmbiguousPrefixStar
            };
            self.error(id, start, self.cursor.pos());
            if double {
                T::UStarStar
            } else {
                T::UStar
            }
        } else if self.state.is_beg() {
            if double {
                T::UStarStar
            } else {
                T::UStar
            }
        } else if double {
            T::StarStar
        } else {
            T::Star
        };
        let state = self.operator_state();
        self.emit(kind, start, state)
    }

    fn lex_ampersand(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        self.cursor.advance();
        match (self.cursor.current(), self.cursor.peek()) {
            (b'&', b'=') => {
                self.cursor.advance_n(2);
                self.emit(T::AmpersandAmpersandEqual, start, LexState::BEG)
            }
            (b'&', _) => {
                self.cursor.advance();
                self.emit(T::AmpersandAmpersand, start, LexState::BEG)
            }
            (b'=', _) => {
                self.cursor.advance();
                self.emit(T::AmpersandEqual, start, LexState::BEG)
            }
            (b'.', _) if !self.state.is_beg() => {
                self.cursor.advance();
                self.emit(T::AmpersandDot, start, LexState::DOT)
            }
            _ => {
                let kind = if self.is_spcarg(space_seen) {
                    self.error(DiagnosticId::AmbiguousPrefixAmpersand, start, start + 1);
                    T::UAmpersand
                } else if self.state.is_beg() {
                    T::UAmpersand
                } else {
                    T::Ampersand
                };
                let state = self.operator_state();
                self.emit(kind, start, state)
            }
        }
    }

    fn lex_sign(&mut self, start: u32, sign: u8, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        let minus = sign == b'-';
        self.cursor.advance();
        let next = self.cursor.current();

        if self.state.is_fname_or_dot() {
            let unary = next == b'@';
            if unary {
                self.cursor.advance();
            }
            let kind = match (minus, unary) {
                (true, true) => T::UMinus,
                (true, false) => T::Minus,
                (false, true) => T::UPlus,
                (false, false) => T::Plus,
            };
            return self.emit(kind, start, LexState::ARG);
        }
        if next == b'=' {
            self.cursor.advance();
            let kind = if minus { T::MinusEqual } else { T::PlusEqual };
            return self.emit(kind, start, LexState::BEG);
        }
        if minus && next == b'>' {
            self.cursor.advance();
            self.lambda_nesting = Some(self.enclosure_nesting);
            return self.emit(T::MinusGreater, start, LexState::ENDFN);
        }
        let spcarg = self.is_spcarg(space_seen);
        if self.state.is_beg() || spcarg {
            if spcarg {
                let id = if minus {
                    DiagnosticId::AmbiguousFirstArgumentMinus
                } else {
                    DiagnosticId::AmbiguousFirstArgumentPlus
                };
                self.error(id, start, start + 1);
            }
            let kind = match (minus, next.is_ascii_digit()) {
                (true, true) => T::UMinusNum,
                (true, false) => T::UMinus,
                (false, _) => T::UPlus,
            };
            return self.emit(kind, start, LexState::BEG);
        }
        let kind = if minus { T::Minus } else { T::Plus };
        self.emit(kind, start, LexState::BEG)
    }

    fn lex_less(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        if self.cursor.peek() == b'<'
            && !self.state.intersects(LexState::DOT | LexState::CLASS)
            && !self.state.is_end()
            && (!self.state.is_arg() || self.state.contains(LexState::LABELED) || space_seen)
        {
            if let Some(token) = self.lex_heredoc_start(start) {
                return token;
            }
        }
        self.cursor.advance();
        let kind = match (self.cursor.current(), self.cursor.peek()) {
            (b'=', b'>') => {
                self.cursor.advance_n(2);
                T::LessEqualGreater
            }
            (b'=', _) => {
                self.cursor.advance();
                T::LessEqual
            }
            (b'<', b'=') => {
                self.cursor.advance_n(2);
                T::LessLessEqual
            }
            (b'<', _) => {
                self.cursor.advance();
                T::LessLess
            }
            _ => T::Less,
        };
        let state = if kind == T::LessLessEqual {
            LexState::BEG
        } else {
            self.operator_state()
        };
        self.emit(kind, start, state)
    }

    fn lex_colon(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        let peek = self.cursor.peek();
        if peek == b':' {
            self.cursor.advance_n(2);
            let top_level = self.state.is_beg()
                || self.state.contains(LexState::CLASS)
                || (self.state.is_arg() && space_seen);
            if top_level {
                return self.emit(T::UColonColon, start, LexState::BEG);
            }
            return self.emit(T::ColonColon, start, LexState::DOT);
        }
        if self.state.is_end()
            || matches!(peek, b' ' | b'\t' | b'\n' | b'\r' | b'#' | b'\x0c' | b'\x0b' | 0)
        {
            self.cursor.advance();
            return self.emit(T::Colon, start, LexState::BEG);
        }
        if matches!(peek, b'"' | b'\'') {
            self.cursor.advance_n(2);
            self.push_string(peek, peek == b'"', false, crate::mode::LiteralKind::Symbol);
            return self.token(T::SymbolBegin, start);
        }
        self.cursor.advance();
        self.symbol_pending = true;
        self.emit(T::SymbolBegin, start, LexState::FNAME)
    }

    fn lex_slash(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        if self.state.is_beg() {
            self.cursor.advance();
            return self.begin_regexp(start, b'/', 0);
        }
        if self.cursor.peek() == b'=' {
            self.cursor.advance_n(2);
            return self.emit(T::SlashEqual, start, LexState::BEG);
        }
        if self.is_spcarg_at(space_seen, self.cursor.peek()) {
            self.error(DiagnosticId::AmbiguousSlash, start, start + 1);
            self.cursor.advance();
            return self.begin_regexp(start, b'/', 0);
        }
        self.cursor.advance();
        let state = self.operator_state();
        self.emit(T::Slash, start, state)
    }

    fn lex_percent(&mut self, start: u32, space_seen: bool) -> Token<'buf> {
        use TokenKind as T;
        let peek = self.cursor.peek();
        if self.state.is_beg() && peek != 0 {
            return self.lex_percent_literal(start);
        }
        if peek == b'=' {
            self.cursor.advance_n(2);
            return self.emit(T::PercentEqual, start, LexState::BEG);
        }
        if self.is_spcarg_at(space_seen, peek) && !self.state.is_fname_or_dot() {
            return self.lex_percent_literal(start);
        }
        self.cursor.advance();
        let state = self.operator_state();
        self.emit(T::Percent, start, state)
    }

    fn open_enclosure(&mut self) {
        self.enclosure_nesting += 1;
        self.do_loop_stack.push(false);
    }

    fn close_enclosure(&mut self) {
        self.enclosure_nesting = self.enclosure_nesting.saturating_sub(1);
        self.do_loop_stack.pop();
    }

    /// State after an operator: a method name in `def`/`.` position,
    /// otherwise the start of an operand.
    fn operator_state(&self) -> LexState {
        if self.state.is_fname_or_dot() {
            LexState::ARG
        } else {
            LexState::BEG
        }
    }

    /// `foo -1`: an argument-position operator preceded by a space and not
    /// followed by one. The cursor is after the operator.
    fn is_spcarg(&self, space_seen: bool) -> bool {
        self.is_spcarg_at(space_seen, self.cursor.current())
    }

    fn is_spcarg_at(&self, space_seen: bool, next: u8) -> bool {
        self.state.is_arg() && space_seen && !is_space(next)
    }

    /// A `foo:` label may follow.
    fn label_possible(&self, cmd_state: bool) -> bool {
        (self.state.intersects(LexState::LABEL | LexState::ENDFN) && !cmd_state)
            || self.state.is_arg()
    }

    fn emit(&mut self, kind: TokenKind, start: u32, state: LexState) -> Token<'buf> {
        self.state = state;
        self.token(kind, start)
    }

    #[inline]
    fn token(&self, kind: TokenKind, start: u32) -> Token<'buf> {
        self.token_at(kind, start, self.cursor.pos())
    }

    #[inline]
    fn token_at(&self, kind: TokenKind, start: u32, end: u32) -> Token<'buf> {
        Token::new(kind, Location::new(start, end), self.cursor.slice(start, end))
    }

    fn error(&mut self, id: DiagnosticId, start: u32, end: u32) {
        self.diagnostics.push(Diagnostic::new(id, Location::new(start, end)));
    }
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x0b' | 0)
}

#[cfg(test)]
mod tests;

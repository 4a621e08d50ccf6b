//! Identifiers, keywords, labels, and sigiled variables.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::{Token, TokenKind};

use super::Lexer;
use crate::keywords;
use crate::LexState;

impl<'buf> Lexer<'buf> {
    /// Consume identifier characters, reporting bytes that are not valid in
    /// the source encoding.
    fn eat_identifier(&mut self) {
        loop {
            let at = self.cursor.pos();
            match self.encoding.ident_char_width(self.cursor.rest()) {
                Some(width) => self.cursor.advance_n(to_u32(width)),
                None if self.cursor.current() >= 0x80 => {
                    self.cursor.advance();
                    self.error(DiagnosticId::InvalidMultibyteChar, at, at + 1);
                }
                None => break,
            }
        }
    }

    fn is_identifier_start(&self, offset: u32) -> bool {
        let byte = self.cursor.byte_at(offset);
        byte == b'_' || byte.is_ascii_alphabetic() || byte >= 0x80
    }

    pub(super) fn lex_identifier(&mut self, start: u32, cmd_state: bool) -> Token<'buf> {
        use TokenKind as T;

        let previous = self.state;
        if self.cursor.current() >= 0x80 && self.encoding.ident_char_width(self.cursor.rest()).is_none() {
            self.cursor.advance();
            self.error(DiagnosticId::InvalidMultibyteChar, start, start + 1);
            return self.token(T::Invalid, start);
        }
        self.eat_identifier();

        let mut suffixed = false;
        if matches!(self.cursor.current(), b'?' | b'!')
            && (self.cursor.peek() != b'='
                || matches!(self.cursor.peek2(), b'=' | b'~' | b'>'))
        {
            self.cursor.advance();
            suffixed = true;
        } else if previous.contains(LexState::FNAME)
            && self.cursor.current() == b'='
            && !matches!(self.cursor.peek(), b'~' | b'>')
            && (self.cursor.peek() != b'=' || self.cursor.peek2() == b'>')
        {
            self.cursor.advance();
            return self.emit(T::Identifier, start, LexState::ENDFN);
        }

        if self.label_possible(cmd_state) && self.cursor.current() == b':' && self.cursor.peek() != b':' {
            self.cursor.advance();
            return self.emit(T::Label, start, LexState::ARG | LexState::LABELED);
        }

        let text = self.cursor.slice_from(start);
        if !previous.contains(LexState::DOT) {
            if let Some(keyword) = keywords::lookup(text) {
                return self.lex_keyword(start, keyword, previous);
            }
        }

        let kind = if suffixed {
            T::MethodName
        } else if text.first().is_some_and(u8::is_ascii_uppercase) {
            T::Constant
        } else {
            T::Identifier
        };
        let state = if previous.intersects(LexState::BEG_ANY | LexState::ARG_ANY | LexState::DOT) {
            if cmd_state {
                LexState::CMDARG
            } else {
                LexState::ARG
            }
        } else if previous.contains(LexState::FNAME) {
            LexState::ENDFN
        } else {
            LexState::END
        };
        self.emit(kind, start, state)
    }

    fn lex_keyword(&mut self, start: u32, keyword: keywords::Keyword, previous: LexState) -> Token<'buf> {
        use TokenKind as T;

        if previous.contains(LexState::FNAME) {
            return self.emit(keyword.kind, start, LexState::ENDFN);
        }
        if keyword.kind == T::KeywordDo {
            self.command_start = true;
            if self.lambda_nesting == Some(self.enclosure_nesting) {
                self.lambda_nesting = None;
                return self.emit(T::KeywordDo, start, LexState::BEG);
            }
            let kind = if self.do_loop_stack.last() == Some(&true) {
                T::KeywordDoLoop
            } else {
                T::KeywordDo
            };
            return self.emit(kind, start, LexState::BEG);
        }
        if let Some(modifier) = keyword.modifier {
            if !previous.intersects(LexState::BEG | LexState::LABELED | LexState::CLASS) {
                return self.emit(modifier, start, LexState::BEG | LexState::LABEL);
            }
        }
        if keyword.state.contains(LexState::BEG) {
            self.command_start = true;
        }
        self.emit(keyword.kind, start, keyword.state)
    }

    /// `@ivar` and `@@cvar`.
    pub(super) fn lex_instance_variable(&mut self, start: u32) -> Token<'buf> {
        let class = self.cursor.peek() == b'@';
        self.cursor.advance_n(if class { 2 } else { 1 });
        let (kind, bare) = if class {
            (TokenKind::ClassVariable, DiagnosticId::ClassVariableBare)
        } else {
            (TokenKind::InstanceVariable, DiagnosticId::InstanceVariableBare)
        };

        let sigil_end = self.cursor.pos();
        if self.cursor.current().is_ascii_digit() {
            self.eat_identifier();
            self.error(DiagnosticId::InvalidVariableName, start, self.cursor.pos());
        } else if self.is_identifier_start(sigil_end) {
            self.eat_identifier();
        } else {
            self.error(bare, start, sigil_end);
        }
        self.emit(kind, start, LexState::END)
    }

    /// `$gvar`, special globals, `$&`-style back references, and `$1`.
    pub(super) fn lex_global_variable(&mut self, start: u32) -> Token<'buf> {
        use TokenKind as T;

        let fname = self.state.contains(LexState::FNAME);
        self.cursor.advance();
        let kind = match self.cursor.current() {
            b'_' if self.encoding.ident_char_width(&self.cursor.rest()[1..]).is_some() => {
                self.eat_identifier();
                T::GlobalVariable
            }
            b'_' | b'~' | b'*' | b'$' | b'?' | b'!' | b'@' | b'/' | b'\\' | b';' | b','
            | b'.' | b'=' | b':' | b'<' | b'>' | b'"' | b'0' => {
                self.cursor.advance();
                T::GlobalVariable
            }
            b'-' => {
                self.cursor.advance();
                if let Some(width) = self.encoding.ident_char_width(self.cursor.rest()) {
                    self.cursor.advance_n(to_u32(width));
                }
                T::GlobalVariable
            }
            b'&' | b'`' | b'\'' | b'+' => {
                self.cursor.advance();
                if fname {
                    T::GlobalVariable
                } else {
                    T::BackReference
                }
            }
            b'1'..=b'9' => {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                if fname {
                    T::GlobalVariable
                } else {
                    T::NumberedReference
                }
            }
            _ if self.is_identifier_start(self.cursor.pos()) => {
                self.eat_identifier();
                T::GlobalVariable
            }
            _ => {
                self.error(DiagnosticId::GlobalVariableBare, start, self.cursor.pos());
                T::GlobalVariable
            }
        };
        self.emit(kind, start, LexState::END)
    }

    /// The variable after `#` in `"#@ivar"`; the `Embvar` mode has already
    /// been popped.
    pub(super) fn lex_embedded_variable(&mut self) -> Token<'buf> {
        let start = self.cursor.pos();
        if self.cursor.current() == b'$' {
            self.lex_global_variable(start)
        } else {
            self.lex_instance_variable(start)
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "character widths are at most 4"
)]
fn to_u32(width: usize) -> u32 {
    width as u32
}

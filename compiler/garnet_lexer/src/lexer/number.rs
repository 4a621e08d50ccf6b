//! Numeric literal shapes. Values are computed later from the raw text by
//! [`crate::numeric`].

use garnet_diagnostic::DiagnosticId;
use garnet_ir::{Token, TokenKind};

use super::Lexer;
use crate::LexState;

#[derive(Copy, Clone, Eq, PartialEq)]
enum Shape {
    Integer,
    Float,
    /// A float with an exponent; it cannot take the `r` suffix.
    Exponent,
}

impl<'buf> Lexer<'buf> {
    pub(super) fn lex_number(&mut self, start: u32) -> Token<'buf> {
        let shape = if self.cursor.current() == b'0' {
            self.lex_prefixed_number()
        } else {
            self.lex_decimal_number()
        };
        let rational = shape != Shape::Exponent && self.eat_suffix(b'r');
        let imaginary = self.eat_suffix(b'i');

        let kind = match (shape == Shape::Integer, rational, imaginary) {
            (true, false, false) => TokenKind::Integer,
            (true, true, false) => TokenKind::IntegerRational,
            (true, false, true) => TokenKind::IntegerImaginary,
            (true, true, true) => TokenKind::IntegerRationalImaginary,
            (false, false, false) => TokenKind::Float,
            (false, true, false) => TokenKind::FloatRational,
            (false, false, true) => TokenKind::FloatImaginary,
            (false, true, true) => TokenKind::FloatRationalImaginary,
        };
        self.emit(kind, start, LexState::END)
    }

    fn lex_prefixed_number(&mut self) -> Shape {
        let radix_digits: Option<fn(u8) -> bool> = match self.cursor.peek() {
            b'x' | b'X' => Some(|b: u8| b.is_ascii_hexdigit()),
            b'b' | b'B' => Some(|b: u8| matches!(b, b'0' | b'1')),
            b'o' | b'O' => Some(|b: u8| matches!(b, b'0'..=b'7')),
            b'd' | b'D' => Some(|b: u8| b.is_ascii_digit()),
            _ => None,
        };
        if let Some(is_digit) = radix_digits {
            let prefix = self.cursor.pos();
            self.cursor.advance_n(2);
            if !self.eat_digits(is_digit) {
                self.error(DiagnosticId::NumberNoDigits, prefix, self.cursor.pos());
            }
            return Shape::Integer;
        }

        match self.cursor.peek() {
            b'_' | b'0'..=b'9' => {
                self.cursor.advance();
                let digits = self.cursor.pos();
                self.eat_digits(|b| b.is_ascii_digit());
                let end = self.cursor.pos();
                let bad = (digits..end).find(|&at| matches!(self.cursor.byte_at(at), b'8' | b'9'));
                if let Some(bad) = bad {
                    self.error(DiagnosticId::InvalidOctalDigit, bad, bad + 1);
                }
                Shape::Integer
            }
            _ => {
                self.cursor.advance();
                self.lex_fraction_and_exponent()
            }
        }
    }

    fn lex_decimal_number(&mut self) -> Shape {
        self.eat_digits(|b| b.is_ascii_digit());
        self.lex_fraction_and_exponent()
    }

    fn lex_fraction_and_exponent(&mut self) -> Shape {
        let mut shape = Shape::Integer;
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.eat_digits(|b| b.is_ascii_digit());
            shape = Shape::Float;
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let exponent = self.cursor.pos();
            let (sign, digit) = (self.cursor.peek(), self.cursor.peek2());
            if sign.is_ascii_digit() {
                self.cursor.advance();
            } else if matches!(sign, b'+' | b'-') && digit.is_ascii_digit() {
                self.cursor.advance_n(2);
            } else if matches!(sign, b'+' | b'-') {
                self.cursor.advance_n(2);
                self.error(DiagnosticId::InvalidFloatExponent, exponent, self.cursor.pos());
                return Shape::Exponent;
            } else {
                return shape;
            }
            self.eat_digits(|b| b.is_ascii_digit());
            shape = Shape::Exponent;
        }
        shape
    }

    /// Consume digits separated by single underscores. Returns whether any
    /// digit was seen.
    fn eat_digits(&mut self, is_digit: impl Fn(u8) -> bool) -> bool {
        let mut seen = false;
        let mut last_underscore = None;
        loop {
            let byte = self.cursor.current();
            if is_digit(byte) {
                seen = true;
                last_underscore = None;
            } else if byte == b'_' {
                let after_zero = self.cursor.byte_at(self.cursor.pos().saturating_sub(1)) == b'0';
                if last_underscore.is_some() || (!seen && !after_zero) {
                    let at = self.cursor.pos();
                    self.error(DiagnosticId::InvalidNumberUnderscore, at, at + 1);
                }
                last_underscore = Some(self.cursor.pos());
            } else {
                break;
            }
            self.cursor.advance();
        }
        if let Some(at) = last_underscore {
            self.error(DiagnosticId::InvalidNumberUnderscore, at, at + 1);
        }
        seen
    }

    /// Take a one-letter suffix unless it starts an identifier (`1if`).
    fn eat_suffix(&mut self, letter: u8) -> bool {
        if self.cursor.current() != letter {
            return false;
        }
        let next = self.cursor.peek();
        let taken = !is_ident_byte(next)
            || (letter == b'r' && next == b'i' && !is_ident_byte(self.cursor.peek2()));
        if taken {
            self.cursor.advance();
        }
        taken
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

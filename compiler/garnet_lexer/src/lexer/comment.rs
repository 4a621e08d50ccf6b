//! Comments, magic comments, `=begin`/`=end` documents, `__END__`, and the
//! `#!` line.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::{Comment, CommentKind, Encoding, Location, MagicComment, Token, TokenKind};

use super::Lexer;
use crate::magic::{self, MagicPair};

impl<'buf> Lexer<'buf> {
    pub(super) fn lex_comment(&mut self, start: u32) -> Token<'buf> {
        self.cursor.eat_until_newline_or_eof();
        let mut end = self.cursor.pos();
        if end > start && self.cursor.byte_at(end - 1) == b'\r' {
            end -= 1;
            self.cursor.set_pos(end);
        }
        self.comments.push(Comment::new(CommentKind::Inline, Location::new(start, end)));
        self.magic_comment(start + 1, end);
        self.token_at(TokenKind::Comment, start, end)
    }

    fn magic_comment(&mut self, text_start: u32, text_end: u32) {
        let text = self.cursor.slice(text_start, text_end);
        let shift = |(from, to): (u32, u32)| Location::new(text_start + from, text_start + to);
        let encoding_allowed = !self.seen_token && !self.encoding_locked && self.in_encoding_position(text_start);

        let mut encoding_seen = false;
        for pair in magic::pairs(text) {
            let key = pair.key(text);
            let value = pair.value(text);
            if magic::key_is(key, "encoding") || magic::key_is(key, "coding") {
                encoding_seen = true;
                if encoding_allowed {
                    self.set_encoding(value, shift(pair.value));
                }
            } else if magic::key_is(key, "frozen_string_literal") {
                self.frozen_string_literal_comment(value, shift(pair.key), shift(pair.value));
            } else if !["warn_indent", "shareable_constant_value", "warn_past_scope"]
                .iter()
                .any(|known| magic::key_is(key, known))
            {
                continue;
            }
            self.record_magic(&pair, text_start);
        }

        if !encoding_seen && encoding_allowed {
            if let Some(pair) = magic::coding_anywhere(text) {
                self.set_encoding(pair.value(text), shift(pair.value));
                self.record_magic(&pair, text_start);
            }
        }
    }

    fn record_magic(&mut self, pair: &MagicPair, text_start: u32) {
        self.magic_comments.push(MagicComment {
            key_loc: Location::new(text_start + pair.key.0, text_start + pair.key.1),
            value_loc: Location::new(text_start + pair.value.0, text_start + pair.value.1),
        });
    }

    fn set_encoding(&mut self, name: &[u8], location: Location) {
        match Encoding::find(name) {
            Some(encoding) => {
                tracing::debug!(encoding = encoding.name(), "encoding magic comment");
                self.encoding = encoding;
            }
            None => self.error(DiagnosticId::InvalidEncodingMagicComment, location.start, location.end),
        }
    }

    fn frozen_string_literal_comment(&mut self, value: &[u8], key: Location, value_loc: Location) {
        if self.seen_token {
            self.error(DiagnosticId::IgnoredFrozenStringLiteral, key.start, key.end);
            return;
        }
        if value.eq_ignore_ascii_case(b"true") {
            self.frozen_string_literal = Some(true);
        } else if value.eq_ignore_ascii_case(b"false") {
            self.frozen_string_literal = Some(false);
        } else {
            self.error(DiagnosticId::InvalidMagicCommentValue, value_loc.start, value_loc.end);
        }
    }

    /// Encoding comments count on the first line, or on the second when the
    /// first is a `#!` line.
    fn in_encoding_position(&self, offset: u32) -> bool {
        let first_start = self.first_line_start();
        let Some(first_newline) = self.cursor.find_from(first_start, b'\n') else {
            return true;
        };
        if offset < first_newline {
            return true;
        }
        let shebang = self.cursor.slice(first_start, first_start + 2) == b"#!";
        let second_end = self.cursor.find_from(first_newline + 1, b'\n').unwrap_or(self.cursor.source_len());
        shebang && offset <= second_end
    }

    fn first_line_start(&self) -> u32 {
        if self.cursor.slice(0, 3) == b"\xEF\xBB\xBF" {
            3
        } else {
            0
        }
    }

    pub(super) fn at_embdoc_begin(&self) -> bool {
        self.cursor.starts_with(b"=begin") && is_line_break_or_space(self.cursor.peek_at(6))
    }

    /// `=begin` ... `=end`. The begin and line tokens are recorded directly;
    /// the returned token is the `=end` line.
    pub(super) fn lex_embdoc(&mut self, start: u32) -> Token<'buf> {
        let mut line_start = start;
        let mut line_end = self.cursor.next_line_start(start);
        self.record_trivia(TokenKind::EmbdocBegin, line_start, line_end);

        loop {
            line_start = line_end;
            if line_start >= self.cursor.source_len() {
                self.cursor.set_pos(line_start);
                self.error(DiagnosticId::EmbdocTerm, start, line_start);
                self.comments.push(Comment::new(CommentKind::EmbeddedDoc, Location::new(start, line_start)));
                return self.token_at(TokenKind::EmbdocEnd, line_start, line_start);
            }
            line_end = self.cursor.next_line_start(line_start);
            let line = self.cursor.slice(line_start, line_end);
            if line.starts_with(b"=end") && matches!(line.get(4), None | Some(b' ' | b'\t' | b'\n' | b'\r')) {
                self.cursor.set_pos(line_end);
                self.comments.push(Comment::new(CommentKind::EmbeddedDoc, Location::new(start, line_end)));
                return self.token_at(TokenKind::EmbdocEnd, line_start, line_end);
            }
            self.record_trivia(TokenKind::EmbdocLine, line_start, line_end);
        }
    }

    fn record_trivia(&mut self, kind: TokenKind, start: u32, end: u32) {
        if self.record {
            let token = self.token_at(kind, start, end);
            self.tokens.push(token);
        }
    }

    pub(super) fn at_data_marker(&self) -> bool {
        let after = self.cursor.pos() + 7;
        self.cursor.starts_with(b"__END__")
            && (after >= self.cursor.source_len()
                || self.cursor.byte_at(after) == b'\n'
                || (self.cursor.byte_at(after) == b'\r' && self.cursor.byte_at(after + 1) == b'\n'))
    }

    /// `__END__`: everything after it is data, not code.
    pub(super) fn lex_data(&mut self, start: u32) -> Token<'buf> {
        let end = self.cursor.next_line_start(start);
        let eof = self.cursor.source_len();
        self.cursor.set_pos(end);
        self.data_loc = Some(Location::new(start, eof));
        self.comments.push(Comment::new(CommentKind::TrailingDocument, Location::new(start, eof)));
        self.finished = true;
        self.token_at(TokenKind::DataBegin, start, end)
    }

    /// `-x`: skip to the first `#!` line that mentions ruby.
    pub(super) fn skip_to_shebang(&mut self) {
        let mut line = self.cursor.pos();
        let eof = self.cursor.source_len();
        while line < eof {
            let next = self.cursor.next_line_start(line);
            let text = self.cursor.slice(line, next);
            if text.starts_with(b"#!") && contains(text, b"ruby") {
                self.cursor.set_pos(line);
                return;
            }
            line = next;
        }
        self.error(DiagnosticId::ScriptNotFound, 0, 0);
        self.cursor.set_pos(eof);
        self.finished = true;
    }

    /// Command-line switches on a `#!...ruby -n -l` line.
    pub(super) fn read_shebang_flags(&mut self) {
        let line = self.cursor.pos();
        let text = self.cursor.slice(line, self.cursor.next_line_start(line));
        if !text.starts_with(b"#!") {
            return;
        }
        let Some(ruby) = find(text, b"ruby") else {
            return;
        };
        let mut flags = Vec::new();
        for word in text[ruby..].split(|b| b.is_ascii_whitespace()) {
            if let Some(switches) = word.strip_prefix(b"-") {
                if switches.first() == Some(&b'-') {
                    break;
                }
                flags.extend(switches.iter().copied().filter(u8::is_ascii_alphabetic));
            }
        }
        self.shebang_flags = flags;
    }
}

fn is_line_break_or_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

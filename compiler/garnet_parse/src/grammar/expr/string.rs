//! String-like literals: strings, heredocs, xstrings, character literals,
//! symbols, regexps, and word lists.
//!
//! The lexer hands over literal bodies as raw `StringContent` pieces
//! interleaved with interpolation tokens. Escapes are processed here, per
//! piece, and each piece is classified against the source encoding.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    ArrayFlags, ArrayNode, ClassVariableReadNode, EmbeddedStatementsNode, EmbeddedVariableNode,
    GlobalVariableReadNode, InstanceVariableReadNode, InterpolatedRegularExpressionNode, InterpolatedStringFlags,
    InterpolatedStringNode, InterpolatedSymbolNode, InterpolatedXStringNode, BackReferenceReadNode,
    NumberedReferenceReadNode, RegularExpressionFlags, RegularExpressionNode, StringFlags, StringNode, SymbolFlags,
    SymbolNode, XStringNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, StringValue, Token, TokenKind};
use garnet_lexer::{unescape, Delimiters, ForcedEncoding, Strictness, Unescaped};

use super::BRACKET_RESET;
use crate::recovery::TokenSet;
use crate::Parser;

/// How the pieces of one literal are unescaped.
#[derive(Copy, Clone, Debug)]
struct Escapes {
    /// `None` keeps the bytes as written (`<<'EOS'`).
    strictness: Option<Strictness>,
    delimiters: Delimiters,
}

impl Escapes {
    const RAW: Escapes = Escapes {
        strictness: None,
        delimiters: Delimiters::NONE,
    };

    fn new(strictness: Strictness, delimiters: Delimiters) -> Self {
        Escapes {
            strictness: Some(strictness),
            delimiters,
        }
    }

    /// Escapes for a literal opened by `opening`: a quote, or `%` with an
    /// optional letter and a delimiter.
    fn for_opening(opening: &[u8], interpolates: bool) -> Self {
        let strictness = if interpolates { Strictness::All } else { Strictness::Minimal };
        let open = opening.last().copied().unwrap_or(b'"');
        let delimiters = match open {
            b'(' => Delimiters::new(b')', b'('),
            b'[' => Delimiters::new(b']', b'['),
            b'{' => Delimiters::new(b'}', b'{'),
            b'<' => Delimiters::new(b'>', b'<'),
            other => Delimiters::new(other, 0),
        };
        Escapes::new(strictness, delimiters)
    }

    fn words(mut self) -> Self {
        self.delimiters.words = true;
        self
    }
}

/// One piece of a literal body.
#[derive(Debug)]
enum Piece {
    Content(Location),
    Embedded(Node),
}

/// A literal body with its closing token.
struct Body<'buf> {
    pieces: Vec<Piece>,
    closing: Option<Token<'buf>>,
}

impl Body<'_> {
    fn is_plain(&self) -> bool {
        self.pieces.iter().all(|piece| matches!(piece, Piece::Content(_)))
    }

    /// Source span of the content pieces, or an empty span at `after`.
    fn content_loc(&self, after: u32) -> Location {
        let mut span: Option<Location> = None;
        for piece in &self.pieces {
            if let Piece::Content(loc) = piece {
                span = Some(span.map_or(*loc, |s| s.join(*loc)));
            }
        }
        span.unwrap_or(Location::point(after))
    }
}

fn string_flags(forced: ForcedEncoding) -> StringFlags {
    match forced {
        ForcedEncoding::Utf8 => StringFlags::FORCED_UTF8_ENCODING,
        ForcedEncoding::Binary => StringFlags::FORCED_BINARY_ENCODING,
        ForcedEncoding::None => StringFlags::empty(),
    }
}

fn symbol_flags(forced: ForcedEncoding, bytes: &[u8]) -> SymbolFlags {
    match forced {
        ForcedEncoding::Utf8 => SymbolFlags::FORCED_UTF8_ENCODING,
        ForcedEncoding::Binary => SymbolFlags::FORCED_BINARY_ENCODING,
        ForcedEncoding::None if bytes.is_ascii() => SymbolFlags::FORCED_US_ASCII_ENCODING,
        ForcedEncoding::None => SymbolFlags::empty(),
    }
}

/// Merge two classifications of pieces of the same literal.
fn combine(a: ForcedEncoding, b: ForcedEncoding) -> ForcedEncoding {
    match (a, b) {
        (ForcedEncoding::Binary, _) | (_, ForcedEncoding::Binary) => ForcedEncoding::Binary,
        (ForcedEncoding::Utf8, _) | (_, ForcedEncoding::Utf8) => ForcedEncoding::Utf8,
        _ => ForcedEncoding::None,
    }
}

/// Columns of leading whitespace, with tabs to the next multiple of 8.
fn indentation(line: &[u8]) -> usize {
    let mut column = 0;
    for &byte in line {
        match byte {
            b' ' => column += 1,
            b'\t' => column = (column / 8 + 1) * 8,
            _ => break,
        }
    }
    column
}

/// Bytes to drop from the front of `line` to remove `columns` of
/// indentation. A tab that would cross the limit is kept.
fn dedent_width(line: &[u8], columns: usize) -> usize {
    let mut column = 0;
    let mut width = 0;
    for &byte in line {
        let next = match byte {
            b' ' => column + 1,
            b'\t' => (column / 8 + 1) * 8,
            _ => break,
        };
        if next > columns {
            break;
        }
        column = next;
        width += 1;
    }
    width
}

fn is_blank_line(line: &[u8]) -> bool {
    line.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')) && line.ends_with(b"\n")
}

impl<'buf> Parser<'buf> {
    /// A string, heredoc, xstring, or character literal, with any
    /// adjacent string literals concatenated onto it.
    pub(crate) fn parse_string_literal(&mut self) -> Node {
        let first = self.parse_single_string();
        if matches!(first.kind, NodeKind::Symbol(_) | NodeKind::InterpolatedSymbol(_) | NodeKind::XString(_) | NodeKind::InterpolatedXString(_))
        {
            return first;
        }
        let mut parts = vec![first];
        while self.at(TokenKind::StringBegin) || self.at(TokenKind::HeredocStart) || self.at(TokenKind::CharacterLiteral) {
            let next = self.parse_single_string();
            if matches!(next.kind, NodeKind::Symbol(_) | NodeKind::InterpolatedSymbol(_)) {
                self.error(DiagnosticId::UnexpectedToken, next.location);
            }
            parts.push(next);
        }
        if parts.len() == 1 {
            return parts.pop().unwrap_or_else(|| self.missing());
        }
        let location = parts[0].location.join(parts[parts.len() - 1].location);
        let flags = self.interpolated_flags(&parts);
        Node::new(
            location,
            InterpolatedStringNode {
                flags,
                opening_loc: None,
                parts,
                closing_loc: None,
            },
        )
    }

    fn parse_single_string(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::HeredocStart => self.parse_heredoc(),
            TokenKind::CharacterLiteral => self.parse_character_literal(),
            TokenKind::Backtick | TokenKind::PercentLowerX => self.parse_xstring(),
            _ => self.parse_quoted_string(),
        }
    }

    /// `"..."`, `'...'`, `%q(...)`, `%Q(...)`, `%(...)`, or a `"key":`
    /// label.
    fn parse_quoted_string(&mut self) -> Node {
        let opening = self.advance();
        let interpolates = !(opening.raw == b"'" || opening.raw.starts_with(b"%q"));
        let escapes = Escapes::for_opening(opening.raw, interpolates);
        let body = self.parse_body_pieces(TokenSet::new().with(TokenKind::StringEnd).with(TokenKind::LabelEnd));
        let closing = body.closing;
        let end = closing.map_or(self.previous_location().end, |c| c.location.end);
        let location = Location::new(opening.location.start, end);

        if closing.is_some_and(|c| c.kind == TokenKind::LabelEnd) {
            return self.symbol_from_body(opening.location, body, escapes, location);
        }
        let closing_loc = closing.map(|c| c.location);
        if body.is_plain() {
            let content_loc = body.content_loc(opening.location.end);
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            return Node::new(
                location,
                StringNode {
                    flags: string_flags(forced) | self.frozen_flags(),
                    opening_loc: Some(opening.location),
                    content_loc,
                    closing_loc,
                    unescaped: StringValue::from_source(self.cursor.source(), content_loc, unescaped),
                },
            );
        }
        let parts = self.string_parts(body.pieces, escapes);
        Node::new(
            location,
            InterpolatedStringNode {
                flags: self.interpolated_flags(&parts),
                opening_loc: Some(opening.location),
                parts,
                closing_loc,
            },
        )
    }

    /// `?a`, `?\n`
    fn parse_character_literal(&mut self) -> Node {
        let token = self.advance();
        let opening_loc = Location::new(token.location.start, token.location.start + 1);
        let content_loc = Location::new(opening_loc.end, token.location.end);
        let (bytes, forced) = self.unescape_at(content_loc, Escapes::new(Strictness::All, Delimiters::NONE));
        Node::new(
            token.location,
            StringNode {
                flags: string_flags(forced) | self.frozen_flags(),
                opening_loc: Some(opening_loc),
                content_loc,
                closing_loc: None,
                unescaped: StringValue::from_source(self.cursor.source(), content_loc, bytes),
            },
        )
    }

    /// `` `cmd` `` and `%x(cmd)`
    fn parse_xstring(&mut self) -> Node {
        let opening = self.advance();
        let escapes = Escapes::for_opening(opening.raw, true);
        let body = self.parse_body_pieces(TokenSet::single(TokenKind::StringEnd));
        let closing_loc = body
            .closing
            .map_or_else(|| Location::point(self.previous_location().end), |c| c.location);
        let location = opening.location.join(closing_loc);
        if body.is_plain() {
            let content_loc = body.content_loc(opening.location.end);
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            return Node::new(
                location,
                XStringNode {
                    flags: string_flags(forced),
                    opening_loc: opening.location,
                    content_loc,
                    closing_loc,
                    unescaped: StringValue::from_source(self.cursor.source(), content_loc, unescaped),
                },
            );
        }
        let parts = self.string_parts(body.pieces, escapes);
        Node::new(
            location,
            InterpolatedXStringNode {
                opening_loc: opening.location,
                parts,
                closing_loc,
            },
        )
    }

    /// `<<ID`, `<<-ID`, `<<~ID` and their quoted forms. The node covers the
    /// marker; the body and terminator are elsewhere in the source.
    fn parse_heredoc(&mut self) -> Node {
        let opening = self.advance();
        let marker = opening.raw.get(2..).unwrap_or_default();
        let (tilde, marker) = match marker.first() {
            Some(b'~') => (true, &marker[1..]),
            Some(b'-') => (false, &marker[1..]),
            _ => (false, marker),
        };
        let quote = marker.first().copied();
        let escapes = match quote {
            Some(b'\'') => Escapes::RAW,
            _ => Escapes::new(Strictness::All, Delimiters::NONE),
        };
        let mut body = self.parse_body_pieces(TokenSet::single(TokenKind::HeredocEnd));
        if tilde {
            self.dedent(&mut body.pieces);
        }
        let closing_loc = body.closing.map(|c| c.location);
        let location = opening.location;

        if quote == Some(b'`') {
            let closing_loc = closing_loc.unwrap_or(location);
            if body.is_plain() {
                let content_loc = body.content_loc(location.end);
                let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
                return Node::new(
                    location,
                    XStringNode {
                        flags: string_flags(forced),
                        opening_loc: location,
                        content_loc,
                        closing_loc,
                        unescaped: StringValue::from_source(self.cursor.source(), content_loc, unescaped),
                    },
                );
            }
            let parts = self.string_parts(body.pieces, escapes);
            return Node::new(
                location,
                InterpolatedXStringNode {
                    opening_loc: location,
                    parts,
                    closing_loc,
                },
            );
        }

        if body.is_plain() {
            let content_loc = body.content_loc(closing_loc.map_or(location.end, |c| c.start));
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            return Node::new(
                location,
                StringNode {
                    flags: string_flags(forced) | self.frozen_flags(),
                    opening_loc: Some(location),
                    content_loc,
                    closing_loc,
                    unescaped: StringValue::from_source(self.cursor.source(), content_loc, unescaped),
                },
            );
        }
        let parts = self.string_parts(body.pieces, escapes);
        Node::new(
            location,
            InterpolatedStringNode {
                flags: self.interpolated_flags(&parts),
                opening_loc: Some(location),
                parts,
                closing_loc,
            },
        )
    }

    /// Strip the common indentation from the lines of a `<<~` body by
    /// narrowing the pieces that start a line. Blank lines do not count
    /// towards the common indentation.
    fn dedent(&mut self, pieces: &mut [Piece]) {
        let source = self.cursor.source();
        let starts_line = |loc: &Location| loc.start == 0 || source.get(loc.start as usize - 1) == Some(&b'\n');
        let common = pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Content(loc) if starts_line(loc) => Some(self.slice(*loc)),
                _ => None,
            })
            .filter(|line| !is_blank_line(line))
            .map(indentation)
            .min();
        let Some(common) = common.filter(|&c| c > 0) else {
            return;
        };
        for piece in pieces.iter_mut() {
            if let Piece::Content(loc) = piece {
                if starts_line(loc) {
                    let width = dedent_width(self.slice(*loc), common);
                    let width = u32::try_from(width).unwrap_or(0);
                    *loc = Location::new(loc.start + width, loc.end);
                }
            }
        }
    }

    /// `:name`, `:"..."`, `%s(...)`
    pub(crate) fn parse_symbol(&mut self) -> Node {
        let opening = self.advance();
        if opening.raw == b":" {
            return self.parse_bare_symbol(opening);
        }
        let interpolates = opening.raw == b":\"";
        let escapes = Escapes::for_opening(opening.raw, interpolates);
        let body = self.parse_body_pieces(TokenSet::single(TokenKind::StringEnd));
        let end = body.closing.map_or(self.previous_location().end, |c| c.location.end);
        let location = Location::new(opening.location.start, end);
        self.symbol_from_body(opening.location, body, escapes, location)
    }

    /// `:name`, `:@ivar`, `:+`, `:[]=`, `:class`
    fn parse_bare_symbol(&mut self, colon: Token<'buf>) -> Node {
        let kind = self.current_kind();
        let valid = matches!(
            kind,
            TokenKind::Identifier
                | TokenKind::Constant
                | TokenKind::MethodName
                | TokenKind::InstanceVariable
                | TokenKind::ClassVariable
                | TokenKind::GlobalVariable
                | TokenKind::BackReference
                | TokenKind::NumberedReference
                | TokenKind::BracketLeftRight
                | TokenKind::BracketLeftRightEqual
        ) || kind.is_keyword()
            || kind.is_operator_method_name();
        if !valid {
            self.error(DiagnosticId::SymbolTerm, self.error_location());
            return Node::new(
                colon.location,
                SymbolNode {
                    flags: SymbolFlags::empty(),
                    opening_loc: Some(colon.location),
                    value_loc: None,
                    closing_loc: None,
                    unescaped: StringValue::default(),
                },
            );
        }
        let name = self.advance();
        let flags = if name.raw.is_ascii() {
            SymbolFlags::FORCED_US_ASCII_ENCODING
        } else {
            SymbolFlags::empty()
        };
        Node::new(
            colon.location.join(name.location),
            SymbolNode {
                flags,
                opening_loc: Some(colon.location),
                value_loc: Some(name.location),
                closing_loc: None,
                unescaped: StringValue::Shared(name.location),
            },
        )
    }

    fn symbol_from_body(&mut self, opening_loc: Location, body: Body<'buf>, escapes: Escapes, location: Location) -> Node {
        let closing_loc = body.closing.map(|c| c.location);
        if body.is_plain() {
            let value_loc = body.content_loc(opening_loc.end);
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            return Node::new(
                location,
                SymbolNode {
                    flags: symbol_flags(forced, &unescaped),
                    opening_loc: Some(opening_loc),
                    value_loc: Some(value_loc),
                    closing_loc,
                    unescaped: StringValue::from_source(self.cursor.source(), value_loc, unescaped),
                },
            );
        }
        let parts = self.string_parts(body.pieces, escapes);
        Node::new(
            location,
            InterpolatedSymbolNode {
                opening_loc: Some(opening_loc),
                parts,
                closing_loc,
            },
        )
    }

    /// `/.../flags`, `%r{...}flags`
    pub(crate) fn parse_regexp(&mut self) -> Node {
        let opening = self.advance();
        let delimiters = Escapes::for_opening(opening.raw, true).delimiters;
        let escapes = Escapes::new(Strictness::None, delimiters);
        let body = self.parse_body_pieces(TokenSet::single(TokenKind::RegexpEnd));
        let closing_loc = body
            .closing
            .map_or_else(|| Location::point(self.previous_location().end), |c| c.location);
        let location = opening.location.join(closing_loc);
        let mut flags = self.regexp_options(body.closing);

        if body.is_plain() {
            let content_loc = body.content_loc(opening.location.end);
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            flags |= match forced {
                ForcedEncoding::Utf8 => RegularExpressionFlags::FORCED_UTF8_ENCODING,
                ForcedEncoding::Binary => RegularExpressionFlags::FORCED_BINARY_ENCODING,
                ForcedEncoding::None if unescaped.is_ascii() => RegularExpressionFlags::FORCED_US_ASCII_ENCODING,
                ForcedEncoding::None => RegularExpressionFlags::empty(),
            };
            return Node::new(
                location,
                RegularExpressionNode {
                    flags,
                    opening_loc: opening.location,
                    content_loc,
                    closing_loc,
                    unescaped: StringValue::from_source(self.cursor.source(), content_loc, unescaped),
                },
            );
        }
        let parts = self.string_parts(body.pieces, escapes);
        Node::new(
            location,
            InterpolatedRegularExpressionNode {
                flags,
                opening_loc: opening.location,
                parts,
                closing_loc,
            },
        )
    }

    /// Option letters after the closing delimiter. Unknown letters were
    /// reported by the lexer; repeats are reported here.
    fn regexp_options(&mut self, closing: Option<Token<'_>>) -> RegularExpressionFlags {
        let mut flags = RegularExpressionFlags::empty();
        let Some(closing) = closing else {
            return flags;
        };
        for (offset, &letter) in closing.raw.iter().enumerate().skip(1) {
            let Some(flag) = RegularExpressionFlags::from_suffix(letter) else {
                continue;
            };
            if flags.contains(flag) {
                let at = closing.location.start + u32::try_from(offset).unwrap_or(0);
                self.warn(DiagnosticId::DuplicatedRegexpOption, Location::new(at, at + 1));
            }
            flags |= flag;
        }
        flags
    }

    /// `%w[a b]`, `%W[a#{b}]`, `%i[a b]`, `%I[a#{b}]`
    pub(crate) fn parse_word_list(&mut self) -> Node {
        let opening = self.advance();
        let symbols = matches!(opening.kind, TokenKind::PercentLowerI | TokenKind::PercentUpperI);
        let interpolates = matches!(opening.kind, TokenKind::PercentUpperW | TokenKind::PercentUpperI);
        let escapes = Escapes::for_opening(opening.raw, interpolates).words();

        let mut elements = Vec::new();
        let mut word: Vec<Piece> = Vec::new();
        let closing = loop {
            match self.current_kind() {
                TokenKind::WordsSep => {
                    self.advance();
                    self.finish_word(&mut word, &mut elements, symbols, escapes);
                }
                TokenKind::StringEnd => break Some(self.advance()),
                TokenKind::StringContent | TokenKind::EmbexprBegin | TokenKind::Embvar => {
                    if let Some(piece) = self.parse_piece() {
                        word.push(piece);
                    }
                }
                _ => {
                    self.error(DiagnosticId::ListTerm, self.error_location());
                    break None;
                }
            }
        };
        self.finish_word(&mut word, &mut elements, symbols, escapes);

        let closing_loc = closing.map_or_else(|| Location::point(self.previous_location().end), |c| c.location);
        Node::new(
            opening.location.join(closing_loc),
            ArrayNode {
                flags: ArrayFlags::empty(),
                elements,
                opening_loc: Some(opening.location),
                closing_loc: Some(closing_loc),
            },
        )
    }

    fn finish_word(&mut self, word: &mut Vec<Piece>, elements: &mut Vec<Node>, symbols: bool, escapes: Escapes) {
        if word.is_empty() {
            return;
        }
        let pieces = std::mem::take(word);
        let body = Body { pieces, closing: None };
        let plain = body.is_plain();
        let span = body
            .pieces
            .iter()
            .map(|piece| match piece {
                Piece::Content(loc) => *loc,
                Piece::Embedded(node) => node.location,
            })
            .reduce(Location::join)
            .unwrap_or_default();

        let element = if plain {
            let content_loc = body.content_loc(span.start);
            let (unescaped, forced) = self.unescape_pieces(&body.pieces, escapes);
            let value = StringValue::from_source(self.cursor.source(), content_loc, unescaped.clone());
            if symbols {
                Node::new(
                    span,
                    SymbolNode {
                        flags: symbol_flags(forced, &unescaped),
                        opening_loc: None,
                        value_loc: Some(content_loc),
                        closing_loc: None,
                        unescaped: value,
                    },
                )
            } else {
                Node::new(
                    span,
                    StringNode {
                        flags: string_flags(forced) | self.frozen_flags(),
                        opening_loc: None,
                        content_loc,
                        closing_loc: None,
                        unescaped: value,
                    },
                )
            }
        } else {
            let parts = self.string_parts(body.pieces, escapes);
            if symbols {
                Node::new(
                    span,
                    InterpolatedSymbolNode {
                        opening_loc: None,
                        parts,
                        closing_loc: None,
                    },
                )
            } else {
                Node::new(
                    span,
                    InterpolatedStringNode {
                        flags: self.interpolated_flags(&parts),
                        opening_loc: None,
                        parts,
                        closing_loc: None,
                    },
                )
            }
        };
        elements.push(element);
    }

    /// Pieces of a literal body up to a token in `closers`, which is
    /// consumed and returned.
    fn parse_body_pieces(&mut self, closers: TokenSet) -> Body<'buf> {
        let mut pieces = Vec::new();
        loop {
            if self.at_any(closers) {
                let closing = self.advance();
                return Body {
                    pieces,
                    closing: Some(closing),
                };
            }
            match self.parse_piece() {
                Some(piece) => pieces.push(piece),
                None => return Body { pieces, closing: None },
            }
        }
    }

    /// One content piece or interpolation; `None` at anything else.
    fn parse_piece(&mut self) -> Option<Piece> {
        match self.current_kind() {
            TokenKind::StringContent => Some(Piece::Content(self.advance().location)),
            TokenKind::EmbexprBegin => Some(Piece::Embedded(self.parse_embedded_statements())),
            TokenKind::Embvar => Some(Piece::Embedded(self.parse_embedded_variable())),
            _ => None,
        }
    }

    /// `#{ statements }`
    fn parse_embedded_statements(&mut self) -> Node {
        let opening_loc = self.advance().location;
        let statements = self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.parse_statements(TokenSet::single(TokenKind::EmbexprEnd))
        });
        let closing = self.expect(TokenKind::EmbexprEnd, DiagnosticId::EmbexprTerm);
        let closing_loc = closing.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            opening_loc.join(closing_loc),
            EmbeddedStatementsNode {
                opening_loc,
                statements,
                closing_loc,
            },
        )
    }

    /// `#@ivar`, `#@@cvar`, `#$gvar`
    fn parse_embedded_variable(&mut self) -> Node {
        let operator_loc = self.advance().location;
        let token = self.current();
        let name = Name::new(token.raw);
        let variable = match token.kind {
            TokenKind::InstanceVariable => Node::new(token.location, InstanceVariableReadNode { name }),
            TokenKind::ClassVariable => Node::new(token.location, ClassVariableReadNode { name }),
            TokenKind::GlobalVariable => Node::new(token.location, GlobalVariableReadNode { name }),
            TokenKind::BackReference => Node::new(token.location, BackReferenceReadNode { name }),
            TokenKind::NumberedReference => {
                let number = std::str::from_utf8(token.raw.get(1..).unwrap_or_default())
                    .ok()
                    .and_then(|digits| digits.parse().ok())
                    .unwrap_or(0);
                Node::new(token.location, NumberedReferenceReadNode { number })
            }
            _ => {
                self.error(DiagnosticId::InvalidVariableName, self.error_location());
                return Node::new(
                    operator_loc,
                    EmbeddedVariableNode {
                        operator_loc,
                        variable: Box::new(self.missing()),
                    },
                );
            }
        };
        self.advance();
        Node::new(
            operator_loc.join(variable.location),
            EmbeddedVariableNode {
                operator_loc,
                variable: Box::new(variable),
            },
        )
    }

    /// Parts of an interpolated literal: content pieces become string
    /// nodes without delimiters.
    fn string_parts(&mut self, pieces: Vec<Piece>, escapes: Escapes) -> Vec<Node> {
        let mut parts = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Content(location) => {
                    let (bytes, forced) = self.unescape_at(location, escapes);
                    parts.push(Node::new(
                        location,
                        StringNode {
                            flags: string_flags(forced) | self.frozen_flags(),
                            opening_loc: None,
                            content_loc: location,
                            closing_loc: None,
                            unescaped: StringValue::from_source(self.cursor.source(), location, bytes),
                        },
                    ));
                }
                Piece::Embedded(node) => parts.push(node),
            }
        }
        parts
    }

    /// Unescape the content pieces of a plain literal and join them.
    fn unescape_pieces(&mut self, pieces: &[Piece], escapes: Escapes) -> (Vec<u8>, ForcedEncoding) {
        let mut bytes = Vec::new();
        let mut forced = ForcedEncoding::None;
        for piece in pieces {
            if let Piece::Content(location) = piece {
                let (piece_bytes, piece_forced) = self.unescape_at(*location, escapes);
                bytes.extend_from_slice(&piece_bytes);
                forced = combine(forced, piece_forced);
            }
        }
        (bytes, forced)
    }

    /// Process the escapes of the source bytes at `location`, reporting
    /// escape errors at their source positions.
    fn unescape_at(&mut self, location: Location, escapes: Escapes) -> (Vec<u8>, ForcedEncoding) {
        let raw = self.slice(location);
        let unescaped = match escapes.strictness {
            Some(strictness) => unescape(raw, strictness, escapes.delimiters),
            None => Unescaped {
                bytes: raw.to_vec(),
                ..Unescaped::default()
            },
        };
        for error in &unescaped.errors {
            self.error(error.id, Location::new(location.start + error.start, location.start + error.end));
        }
        let (forced, mixed) = unescaped.classify(self.cursor.encoding());
        if mixed {
            self.error(DiagnosticId::MixedEncoding, location);
        }
        (unescaped.bytes, forced)
    }

    /// Mutability flags from `frozen_string_literal`.
    fn frozen_flags(&self) -> StringFlags {
        match self.cursor.frozen_string_literal() {
            Some(true) => StringFlags::FROZEN,
            Some(false) => StringFlags::MUTABLE,
            None => StringFlags::empty(),
        }
    }

    /// An interpolated string is frozen only when every part is a frozen
    /// literal.
    fn interpolated_flags(&self, parts: &[Node]) -> InterpolatedStringFlags {
        match self.cursor.frozen_string_literal() {
            Some(true) if parts.iter().all(|part| matches!(part.kind, NodeKind::String(_))) => InterpolatedStringFlags::FROZEN,
            Some(_) => InterpolatedStringFlags::MUTABLE,
            None => InterpolatedStringFlags::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_indentation_counts_tabs_to_next_stop() {
        assert_eq!(indentation(b"    x"), 4);
        assert_eq!(indentation(b"\tx"), 8);
        assert_eq!(indentation(b"  \tx"), 8);
        assert_eq!(indentation(b"x"), 0);
    }

    #[test]
    fn test_dedent_width_keeps_partial_tabs() {
        assert_eq!(dedent_width(b"    x", 2), 2);
        assert_eq!(dedent_width(b"\tx", 4), 0);
        assert_eq!(dedent_width(b"\tx", 8), 1);
    }

    #[test]
    fn test_blank_lines_need_a_newline() {
        assert!(is_blank_line(b"   \n"));
        assert!(!is_blank_line(b"   "));
        assert!(!is_blank_line(b"  a\n"));
    }

    #[test]
    fn test_percent_delimiters_pair_brackets() {
        let escapes = Escapes::for_opening(b"%w[", false);
        assert_eq!(escapes.delimiters, Delimiters::new(b']', b'['));
        assert_eq!(escapes.strictness, Some(Strictness::Minimal));
        let escapes = Escapes::for_opening(b"\"", true);
        assert_eq!(escapes.delimiters, Delimiters::new(b'"', 0));
    }
}

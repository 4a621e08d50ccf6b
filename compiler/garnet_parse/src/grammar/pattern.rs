//! Patterns of `case ... in`, `value => pattern`, and `value in pattern`.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    AlternationPatternNode, ArrayPatternNode, AssocNode, AssocSplatNode, CapturePatternNode,
    ClassVariableReadNode, ConstantPathNode, ConstantReadNode, FindPatternNode, GlobalVariableReadNode,
    HashPatternNode, ImplicitNode, ImplicitRestNode, InstanceVariableReadNode, LocalVariableReadNode,
    LocalVariableTargetNode, NoKeywordsParameterNode, ParenthesesNode, PinnedExpressionNode, PinnedVariableNode,
    SplatNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, TokenKind};
use rustc_hash::FxHashSet;

use super::expr::bp;
use crate::recovery::{TokenSet, EXPRESSION_START, STATEMENT_END};
use crate::{ParseContext, Parser};

/// Ends a pattern written without brackets.
const TOP_END: TokenSet = STATEMENT_END
    .with(TokenKind::KeywordThen)
    .with(TokenKind::KeywordIfModifier)
    .with(TokenKind::KeywordUnlessModifier)
    .with(TokenKind::KeywordAnd)
    .with(TokenKind::KeywordOr)
    .with(TokenKind::ParenthesisRight)
    .with(TokenKind::BracketRight)
    .with(TokenKind::BraceRight);

fn is_splat(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Splat(_))
}

fn span(nodes: &[Node]) -> Option<Location> {
    nodes.iter().map(|node| node.location).reduce(Location::join)
}

/// Elements of an array pattern split around their splats.
fn array_pattern(
    constant: Option<Node>,
    elements: Vec<Node>,
    opening_loc: Option<Location>,
    closing_loc: Option<Location>,
    location: Location,
) -> Node {
    let constant = constant.map(Box::new);
    let splats = elements.iter().filter(|element| is_splat(element)).count();
    let find = splats == 2
        && elements.len() >= 3
        && elements.first().is_some_and(is_splat)
        && elements.last().is_some_and(is_splat);
    if find {
        let mut elements = elements.into_iter();
        let left = elements.next().map(Box::new);
        let mut requireds: Vec<Node> = elements.collect();
        let right = requireds.pop().map(Box::new);
        if let (Some(left), Some(right)) = (left, right) {
            return Node::new(
                location,
                FindPatternNode {
                    constant,
                    left,
                    requireds,
                    right,
                    opening_loc,
                    closing_loc,
                },
            );
        }
        return Node::missing(location);
    }

    let mut requireds = Vec::new();
    let mut rest = None;
    let mut posts = Vec::new();
    for element in elements {
        if rest.is_none() && (is_splat(&element) || matches!(element.kind, NodeKind::ImplicitRest(_))) {
            rest = Some(Box::new(element));
        } else if rest.is_some() {
            posts.push(element);
        } else {
            requireds.push(element);
        }
    }
    Node::new(
        location,
        ArrayPatternNode {
            constant,
            requireds,
            rest,
            posts,
            opening_loc,
            closing_loc,
        },
    )
}

/// Static text of a hash pattern key.
fn key_text(node: &Node, source: &[u8]) -> Option<Vec<u8>> {
    match &node.kind {
        NodeKind::Symbol(symbol) => Some(symbol.unescaped.resolve(source).to_vec()),
        _ => None,
    }
}

impl Parser<'_> {
    /// A complete pattern. Brackets may be left off a top-level hash
    /// pattern (`in x:, y:`), and with `list` off an array pattern too
    /// (`in a, *b`).
    pub(crate) fn parse_pattern_top(&mut self, list: bool) -> Node {
        let saved = std::mem::take(&mut self.pattern_captures);
        let context = self
            .context
            .with(ParseContext::IN_PATTERN)
            .with(ParseContext::PIPE_IS_SEPARATOR);
        let pattern = self.with_context(context, |p| p.parse_top_pattern(list));
        self.pattern_captures = saved;
        pattern
    }

    fn parse_top_pattern(&mut self, list: bool) -> Node {
        if self.at_hash_pattern_key() {
            let (elements, rest) = self.parse_hash_pattern_elements(None);
            let location = span(&elements)
                .into_iter()
                .chain(rest.as_ref().map(|rest| rest.location))
                .reduce(Location::join)
                .unwrap_or_else(|| self.error_location());
            return Node::new(
                location,
                HashPatternNode {
                    constant: None,
                    elements,
                    rest: rest.map(Box::new),
                    opening_loc: None,
                    closing_loc: None,
                },
            );
        }

        let first = self.parse_pattern_element();
        if !list || !(self.at(TokenKind::Comma) || is_splat(&first)) {
            return first;
        }
        let mut elements = vec![first];
        while self.accept(TokenKind::Comma).is_some() {
            if self.at_any(TOP_END) {
                elements.push(Node::new(Location::point(self.previous_location().end), ImplicitRestNode {}));
                break;
            }
            elements.push(self.parse_pattern_element());
        }
        self.check_rests(&elements);
        let location = span(&elements).unwrap_or_else(|| self.error_location());
        array_pattern(None, elements, None, None, location)
    }

    /// `key:` or `"key":` at the start of a hash pattern, or `**`.
    fn at_hash_pattern_key(&self) -> bool {
        self.at(TokenKind::Label) || self.at(TokenKind::UStarStar) || self.at(TokenKind::StarStar)
    }

    /// An array pattern element: a splat or a full pattern.
    fn parse_pattern_element(&mut self) -> Node {
        if self.at(TokenKind::UStar) || self.at(TokenKind::Star) {
            let operator_loc = self.advance().location;
            let expression = if self.at(TokenKind::Identifier) {
                Some(Box::new(self.parse_capture_target()))
            } else {
                None
            };
            let location = expression.as_ref().map_or(operator_loc, |e| operator_loc.join(e.location));
            return Node::new(location, SplatNode { operator_loc, expression });
        }
        self.parse_pattern()
    }

    /// A second `*` outside a find pattern is an error.
    fn check_rests(&mut self, elements: &[Node]) {
        let splats: Vec<Location> = elements.iter().filter(|e| is_splat(e)).map(|e| e.location).collect();
        let find = splats.len() == 2
            && elements.len() >= 3
            && elements.first().is_some_and(is_splat)
            && elements.last().is_some_and(is_splat);
        if find {
            return;
        }
        for &location in splats.iter().skip(1) {
            self.error(DiagnosticId::PatternRest, location);
        }
    }

    /// Alternatives, optionally bound with `=> name`.
    fn parse_pattern(&mut self) -> Node {
        let mut pattern = self.parse_primitive_pattern();
        while self.at(TokenKind::Pipe) {
            let operator_loc = self.advance().location;
            let right = self.parse_primitive_pattern();
            pattern = Node::new(
                pattern.location.join(right.location),
                AlternationPatternNode {
                    left: Box::new(pattern),
                    right: Box::new(right),
                    operator_loc,
                },
            );
        }
        while self.at(TokenKind::EqualGreater) {
            let operator_loc = self.advance().location;
            let target = if self.at(TokenKind::Identifier) {
                self.parse_capture_target()
            } else {
                self.error(DiagnosticId::PatternExpression, self.error_location());
                self.missing()
            };
            pattern = Node::new(
                pattern.location.join(target.location),
                CapturePatternNode {
                    value: Box::new(pattern),
                    target: Box::new(target),
                    operator_loc,
                },
            );
        }
        pattern
    }

    fn parse_primitive_pattern(&mut self) -> Node {
        use TokenKind as T;
        match self.current_kind() {
            T::BracketLeftArray => {
                let opening = self.advance().location;
                self.parse_bracketed_pattern(None, opening, T::BracketRight)
            }
            T::BraceLeft => {
                let opening = self.advance().location;
                self.parse_bracketed_pattern(None, opening, T::BraceRight)
            }
            T::ParenthesisLeft | T::ParenthesisLeftParentheses => {
                let opening_loc = self.advance().location;
                self.skip_newlines();
                let body = self.parse_pattern();
                self.skip_newlines();
                let closing_loc = self
                    .expect(T::ParenthesisRight, DiagnosticId::PatternTermParen)
                    .unwrap_or_else(|| Location::point(body.location.end));
                Node::new(
                    opening_loc.join(closing_loc),
                    ParenthesesNode {
                        body: Some(Box::new(body)),
                        opening_loc,
                        closing_loc,
                    },
                )
            }
            T::Caret => self.parse_pin(),
            T::Identifier => self.parse_capture_target(),
            T::Constant | T::UColonColon => self.parse_constant_pattern(),
            kind if EXPRESSION_START.contains(kind) => self.parse_expression(bp::RANGE, false),
            _ => {
                self.error(DiagnosticId::PatternExpression, self.error_location());
                self.missing()
            }
        }
    }

    /// `[...]` or `{...}` after the opening, with an optional constant
    /// in front (`Point[x, y]`, `Point(x:)`).
    fn parse_bracketed_pattern(&mut self, constant: Option<Node>, opening: Location, closer: TokenKind) -> Node {
        let term = match closer {
            TokenKind::BracketRight => DiagnosticId::PatternTermBracket,
            TokenKind::BraceRight => DiagnosticId::PatternTermBrace,
            _ => DiagnosticId::PatternTermParen,
        };
        self.skip_newlines();
        let hash = closer == TokenKind::BraceRight || (constant.is_some() && self.at_hash_pattern_key());
        if hash {
            let (elements, rest) = self.parse_hash_pattern_elements(Some(closer));
            self.skip_newlines();
            let closing = self.expect(closer, term).or_else(|| self.skip_to_closer(closer));
            let end = closing.unwrap_or_else(|| self.previous_location());
            Node::new(
                constant.as_ref().map_or(opening, |c| c.location).join(end),
                HashPatternNode {
                    constant: constant.map(Box::new),
                    elements,
                    rest: rest.map(Box::new),
                    opening_loc: Some(opening),
                    closing_loc: closing,
                },
            )
        } else {
            let mut elements = Vec::new();
            while !self.at(closer) && !self.is_at_end() {
                elements.push(self.parse_pattern_element());
                self.skip_newlines();
                let Some(comma) = self.accept(TokenKind::Comma) else { break };
                self.skip_newlines();
                if self.at(closer) {
                    elements.push(Node::new(Location::point(comma.end), ImplicitRestNode {}));
                }
            }
            self.check_rests(&elements);
            let closing = self.expect(closer, term).or_else(|| self.skip_to_closer(closer));
            let end = closing.unwrap_or_else(|| self.previous_location());
            let location = constant.as_ref().map_or(opening, |c| c.location).join(end);
            array_pattern(constant, elements, Some(opening), closing, location)
        }
    }

    /// `key: pattern` pairs and an optional `**rest`, `**nil`, or `**`.
    fn parse_hash_pattern_elements(&mut self, closer: Option<TokenKind>) -> (Vec<Node>, Option<Node>) {
        let mut elements = Vec::new();
        let mut rest = None;
        let mut seen = FxHashSet::default();
        loop {
            if closer.is_some_and(|closer| self.at(closer)) || self.is_at_end() {
                break;
            }
            if self.at(TokenKind::UStarStar) || self.at(TokenKind::StarStar) {
                let operator_loc = self.advance().location;
                let node = if let Some(keyword_loc) = self.accept(TokenKind::KeywordNil) {
                    Node::new(operator_loc.join(keyword_loc), NoKeywordsParameterNode { operator_loc, keyword_loc })
                } else if self.at(TokenKind::Identifier) {
                    let target = self.parse_capture_target();
                    Node::new(
                        operator_loc.join(target.location),
                        AssocSplatNode { value: Some(Box::new(target)), operator_loc },
                    )
                } else {
                    Node::new(operator_loc, AssocSplatNode { value: None, operator_loc })
                };
                if rest.is_some() {
                    self.error(DiagnosticId::PatternRest, node.location);
                }
                rest = Some(node);
            } else {
                let element = self.parse_hash_pattern_pair(closer);
                if let NodeKind::Assoc(assoc) = &element.kind {
                    if let Some(text) = key_text(&assoc.key, self.cursor.source()) {
                        if !seen.insert(text) {
                            self.error(DiagnosticId::PatternHashKeyDuplicate, assoc.key.location);
                        }
                    }
                }
                if rest.is_some() {
                    self.error(DiagnosticId::PatternRest, element.location);
                }
                elements.push(element);
            }
            if closer.is_some() {
                self.skip_newlines();
            }
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
            if closer.is_some() {
                self.skip_newlines();
            }
        }
        (elements, rest)
    }

    /// `key: pattern`, or `key:` alone binding a local of the same name.
    fn parse_hash_pattern_pair(&mut self, closer: Option<TokenKind>) -> Node {
        let key = match self.current_kind() {
            TokenKind::Label => {
                let label = self.advance();
                self.label_symbol(label)
            }
            TokenKind::StringBegin => {
                let key = self.parse_string_literal();
                if !matches!(key.kind, NodeKind::Symbol(_)) {
                    self.error(DiagnosticId::PatternHashKey, key.location);
                }
                key
            }
            _ => {
                self.error(DiagnosticId::PatternHashKey, self.error_location());
                let missing = self.missing();
                if !self.at_any(TOP_END) && !self.at(TokenKind::Comma) {
                    self.advance();
                }
                return missing;
            }
        };

        let value_omitted = self.at(TokenKind::Comma)
            || self.at_any(TOP_END)
            || closer.is_some_and(|closer| self.at(closer));
        if !value_omitted {
            let value = self.parse_pattern();
            return Node::new(
                key.location.join(value.location),
                AssocNode { key: Box::new(key), value: Box::new(value), operator_loc: None },
            );
        }

        let name = match &key.kind {
            NodeKind::Symbol(symbol) => symbol.unescaped.resolve(self.cursor.source()).to_vec(),
            _ => Vec::new(),
        };
        let value_loc = match &key.kind {
            NodeKind::Symbol(symbol) => symbol.value_loc.unwrap_or(key.location),
            _ => key.location,
        };
        let local = name.first().is_some_and(|b| b.is_ascii_lowercase() || *b == b'_' || *b >= 0x80);
        let target = if local {
            self.bind_capture(Name::new(&name), value_loc)
        } else {
            self.error(DiagnosticId::PatternHashKey, key.location);
            Node::missing(value_loc)
        };
        let value = Node::new(value_loc, ImplicitNode { value: Box::new(target) });
        Node::new(
            key.location,
            AssocNode { key: Box::new(key), value: Box::new(value), operator_loc: None },
        )
    }

    /// `^name`, `^@ivar`, `^(expression)`
    fn parse_pin(&mut self) -> Node {
        let operator_loc = self.advance().location;
        let token = self.current();
        let variable = match token.kind {
            TokenKind::Identifier => {
                self.advance();
                match self.scopes.resolve(token.raw) {
                    Some(depth) => Node::new(
                        token.location,
                        LocalVariableReadNode { name: Name::new(token.raw), depth },
                    ),
                    None => {
                        self.error(DiagnosticId::PatternPinUndefined, token.location);
                        Node::missing(token.location)
                    }
                }
            }
            TokenKind::InstanceVariable => {
                self.advance();
                Node::new(token.location, InstanceVariableReadNode { name: Name::new(token.raw) })
            }
            TokenKind::ClassVariable => {
                self.advance();
                Node::new(token.location, ClassVariableReadNode { name: Name::new(token.raw) })
            }
            TokenKind::GlobalVariable => {
                self.advance();
                Node::new(token.location, GlobalVariableReadNode { name: Name::new(token.raw) })
            }
            TokenKind::ParenthesisLeft | TokenKind::ParenthesisLeftParentheses => {
                let lparen_loc = self.advance().location;
                let context = self
                    .context
                    .without(ParseContext::IN_PATTERN)
                    .without(ParseContext::PIPE_IS_SEPARATOR);
                let expression = self.with_context(context, |p| {
                    p.skip_newlines();
                    let expression = p.parse_operand(bp::STATEMENT, true);
                    p.skip_newlines();
                    expression
                });
                let rparen_loc = self
                    .expect(TokenKind::ParenthesisRight, DiagnosticId::PatternTermParen)
                    .unwrap_or_else(|| Location::point(expression.location.end));
                return Node::new(
                    operator_loc.join(rparen_loc),
                    PinnedExpressionNode {
                        expression: Box::new(expression),
                        operator_loc,
                        lparen_loc,
                        rparen_loc,
                    },
                );
            }
            _ => {
                self.error(DiagnosticId::PatternExpression, self.error_location());
                self.missing()
            }
        };
        Node::new(
            operator_loc.join(variable.location),
            PinnedVariableNode { variable: Box::new(variable), operator_loc },
        )
    }

    /// `Const`, `A::B`, `::A`, optionally followed by `(...)` or `[...]`.
    fn parse_constant_pattern(&mut self) -> Node {
        let mut constant = if self.at(TokenKind::Constant) {
            let token = self.advance();
            Node::new(token.location, ConstantReadNode { name: Name::new(token.raw) })
        } else {
            let delimiter_loc = self.advance().location;
            self.constant_segment(None, delimiter_loc)
        };
        while self.at(TokenKind::ColonColon) {
            let delimiter_loc = self.advance().location;
            constant = self.constant_segment(Some(constant), delimiter_loc);
        }

        match self.current_kind() {
            TokenKind::ParenthesisLeft => {
                let opening = self.advance().location;
                self.parse_bracketed_pattern(Some(constant), opening, TokenKind::ParenthesisRight)
            }
            TokenKind::BracketLeft => {
                let opening = self.advance().location;
                self.parse_bracketed_pattern(Some(constant), opening, TokenKind::BracketRight)
            }
            TokenKind::DotDot | TokenKind::DotDotDot => {
                let operator = self.advance();
                self.parse_range(Some(constant), operator, bp::RANGE + 1)
            }
            _ => constant,
        }
    }

    /// The constant after `::` in a pattern.
    fn constant_segment(&mut self, parent: Option<Node>, delimiter_loc: Location) -> Node {
        let start = parent.as_ref().map_or(delimiter_loc, |parent| parent.location);
        let (name, name_loc) = if self.at(TokenKind::Constant) {
            let token = self.advance();
            (Some(Name::new(token.raw)), token.location)
        } else {
            self.error(DiagnosticId::ConstantPathColonColon, self.error_location());
            (None, Location::point(delimiter_loc.end))
        };
        Node::new(
            start.join(name_loc),
            ConstantPathNode {
                parent: parent.map(Box::new),
                name,
                delimiter_loc,
                name_loc,
            },
        )
    }

    /// A bare identifier in a pattern binds a local.
    fn parse_capture_target(&mut self) -> Node {
        let token = self.advance();
        self.bind_capture(Name::new(token.raw), token.location)
    }

    fn bind_capture(&mut self, name: Name, location: Location) -> Node {
        let bytes = name.as_bytes();
        if !bytes.starts_with(b"_") {
            if self.pattern_captures.contains(&name) {
                self.error(DiagnosticId::PatternCaptureDuplicate, location);
            } else {
                self.pattern_captures.push(name.clone());
            }
        }
        let depth = match self.scopes.resolve(bytes) {
            Some(depth) => depth,
            None => {
                self.scopes.declare(bytes);
                0
            }
        };
        Node::new(location, LocalVariableTargetNode { name, depth })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::{parse_source, statements};
    use garnet_diagnostic::DiagnosticId;
    use garnet_ir::NodeKind;

    /// The pattern of the last statement in `source`.
    fn pattern_of(source: &str) -> NodeKind {
        let result = parse_source(source);
        assert!(result.errors.is_empty(), "{source}: {:?}", result.errors);
        let Some(last) = statements(&result).last() else { panic!("no statements") };
        match last.kind.clone() {
            NodeKind::MatchRequired(node) => node.pattern.kind,
            NodeKind::MatchPredicate(node) => node.pattern.kind,
            NodeKind::CaseMatch(node) => match &node.conditions[0].kind {
                NodeKind::In(clause) => clause.pattern.kind.clone(),
                other => panic!("expected an in clause, got {other:?}"),
            },
            other => panic!("expected a pattern match, got {other:?}"),
        }
    }

    // === Values and captures ===

    #[test]
    fn bare_identifier_binds_a_local() {
        let result = parse_source("1 => x\nx");
        assert!(result.errors.is_empty());
        let NodeKind::Program(program) = &result.root.kind else { panic!("not a program") };
        assert_eq!(program.locals.len(), 1);
        assert_eq!(program.locals[0].to_string(), "x");
    }

    #[test]
    fn range_values() {
        assert!(matches!(pattern_of("case 1\nin 1..5\nend"), NodeKind::Range(_)));
    }

    #[test]
    fn alternatives_and_capture() {
        let NodeKind::CapturePattern(capture) = pattern_of("case 1\nin Integer | Float => n\nend") else {
            panic!("expected a capture");
        };
        assert!(matches!(capture.value.kind, NodeKind::AlternationPattern(_)));
        assert!(matches!(capture.target.kind, NodeKind::LocalVariableTarget(_)));
    }

    #[test]
    fn duplicate_captures_are_reported() {
        let result = parse_source("case 1\nin [a, a]\nend");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].id, DiagnosticId::PatternCaptureDuplicate);
    }

    #[test]
    fn underscore_captures_may_repeat() {
        assert!(parse_source("case 1\nin [_, _]\nend").errors.is_empty());
    }

    // === Arrays and finds ===

    #[test]
    fn top_level_array_without_brackets() {
        let NodeKind::ArrayPattern(array) = pattern_of("[1, 2] => a, *rest") else {
            panic!("expected an array pattern");
        };
        assert_eq!(array.requireds.len(), 1);
        assert!(array.rest.is_some());
        assert!(array.opening_loc.is_none());
    }

    #[test]
    fn trailing_comma_is_an_implicit_rest() {
        let NodeKind::ArrayPattern(array) = pattern_of("case x\nin [a,]\nend") else {
            panic!("expected an array pattern");
        };
        assert!(matches!(array.rest.as_deref().map(|r| &r.kind), Some(NodeKind::ImplicitRest(_))));
    }

    #[test]
    fn find_pattern() {
        let NodeKind::FindPattern(find) = pattern_of("case x\nin [*, 1, *post]\nend") else {
            panic!("expected a find pattern");
        };
        assert_eq!(find.requireds.len(), 1);
    }

    #[test]
    fn two_rests_outside_a_find_pattern() {
        let result = parse_source("case x\nin [*a, *b, 1]\nend");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].id, DiagnosticId::PatternRest);
    }

    #[test]
    fn constant_with_parentheses() {
        let NodeKind::ArrayPattern(array) = pattern_of("case x\nin Point(1, y)\nend") else {
            panic!("expected an array pattern");
        };
        assert!(array.constant.is_some());
        assert_eq!(array.requireds.len(), 2);
    }

    // === Hashes ===

    #[test]
    fn hash_pattern_with_implicit_values() {
        let NodeKind::HashPattern(hash) = pattern_of("case x\nin {name:, age: Integer}\nend") else {
            panic!("expected a hash pattern");
        };
        assert_eq!(hash.elements.len(), 2);
        let NodeKind::Assoc(first) = &hash.elements[0].kind else { panic!("expected an assoc") };
        assert!(matches!(first.value.kind, NodeKind::Implicit(_)));
    }

    #[test]
    fn hash_rest_nil() {
        let NodeKind::HashPattern(hash) = pattern_of("case x\nin {a: 1, **nil}\nend") else {
            panic!("expected a hash pattern");
        };
        assert!(matches!(hash.rest.as_deref().map(|r| &r.kind), Some(NodeKind::NoKeywordsParameter(_))));
    }

    #[test]
    fn duplicate_hash_keys_are_reported() {
        let result = parse_source("case x\nin {a: 1, a: 2}\nend");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].id, DiagnosticId::PatternHashKeyDuplicate);
    }

    // === Pins ===

    #[test]
    fn pinned_local() {
        let NodeKind::PinnedVariable(pin) = pattern_of("y = 1\ncase x\nin ^y\nend") else {
            panic!("expected a pinned variable");
        };
        assert!(matches!(pin.variable.kind, NodeKind::LocalVariableRead(_)));
    }

    #[test]
    fn pinning_an_unknown_local() {
        let result = parse_source("case x\nin ^nope\nend");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].id, DiagnosticId::PatternPinUndefined);
    }

    #[test]
    fn pinned_expression() {
        assert!(matches!(pattern_of("case x\nin ^(1 + 2)\nend"), NodeKind::PinnedExpression(_)));
    }

    #[test]
    fn unclosed_bracket() {
        let result = parse_source("case x\nin [1, 2\nend");
        assert!(result.errors.iter().any(|e| e.id == DiagnosticId::PatternTermBracket));
    }
}

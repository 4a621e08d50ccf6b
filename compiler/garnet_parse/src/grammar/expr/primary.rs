//! Prefix operators and primary expressions.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    ArrayFlags, ArrayNode, AssocNode, AssocSplatNode, BackReferenceReadNode, CallFlags, CallNode,
    ClassVariableReadNode, ConstantPathNode, ConstantReadNode, DefinedNode, FalseNode, FloatNode,
    GlobalVariableReadNode, HashNode, ImaginaryNode, ImplicitNode, InstanceVariableReadNode, IntegerNode,
    ItLocalVariableReadNode, KeywordHashFlags, KeywordHashNode, LocalVariableReadNode, NilNode,
    NumberedReferenceReadNode, ParenthesesNode, RationalNode, RedoNode, RetryNode, SelfNode,
    SourceEncodingNode, SourceFileNode, SourceLineNode, SplatNode, StringFlags, SymbolFlags, SymbolNode,
    TrueNode,
};
use garnet_ir::{FloatValue, Location, Name, Node, NodeKind, StringValue, Token, TokenKind};
use garnet_lexer::numeric;
use rustc_hash::FxHashSet;

use super::postfix::CallArguments;
use super::{bp, BRACKET_RESET};
use crate::grammar::statements_node;
use crate::recovery::{TokenSet, ARGUMENT_START, EXPRESSION_START};
use crate::{numbered_parameter, ParseContext, Parser};


/// `op operand` as a call of the operator method on the operand.
fn unary_call(operator: Location, name: &[u8], operand: Node) -> Node {
    Node::new(
        operator.join(operand.location),
        CallNode {
            flags: CallFlags::empty(),
            receiver: Some(Box::new(operand)),
            call_operator_loc: None,
            name: Name::new(name),
            message_loc: Some(operator),
            opening_loc: None,
            arguments: None,
            closing_loc: None,
            block: None,
        },
    )
}

/// Whether `node` is a call whose arguments were given without
/// parentheses. Nothing may be chained onto such a call.
pub(crate) fn is_command(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Call(call) => call.opening_loc.is_none() && call.arguments.is_some(),
        NodeKind::Super(call) => call.lparen_loc.is_none() && call.arguments.is_some(),
        NodeKind::Yield(call) => call.lparen_loc.is_none() && call.arguments.is_some(),
        NodeKind::Return(_) | NodeKind::Break(_) | NodeKind::Next(_) => true,
        _ => false,
    }
}

/// A numeric literal with its sign flipped and its location widened to
/// cover the `-`.
fn negate(node: Node, minus: Location) -> Node {
    let location = minus.join(node.location);
    match node.kind {
        NodeKind::Integer(integer) => Node::new(
            location,
            IntegerNode {
                flags: integer.flags,
                value: integer.value.negated(),
            },
        ),
        NodeKind::Float(float) => Node::new(
            location,
            FloatNode {
                value: FloatValue::new(-float.value.get()),
            },
        ),
        NodeKind::Rational(rational) => Node::new(
            location,
            RationalNode {
                flags: rational.flags,
                numerator: rational.numerator.negated(),
                denominator: rational.denominator,
            },
        ),
        NodeKind::Imaginary(imaginary) => Node::new(
            location,
            ImaginaryNode {
                numeric: Box::new(negate(*imaginary.numeric, minus)),
            },
        ),
        kind => Node { location, kind },
    }
}

/// Identity of a literal hash key, for duplicate detection.
fn static_key(node: &Node, source: &[u8]) -> Option<(u8, Vec<u8>)> {
    match &node.kind {
        NodeKind::Symbol(symbol) => Some((0, symbol.unescaped.resolve(source).to_vec())),
        NodeKind::String(string) => Some((1, string.unescaped.resolve(source).to_vec())),
        NodeKind::Integer(integer) => Some((2, integer.value.to_string().into_bytes())),
        NodeKind::Nil(_) => Some((3, Vec::new())),
        NodeKind::True(_) => Some((4, Vec::new())),
        NodeKind::False(_) => Some((5, Vec::new())),
        _ => None,
    }
}

impl<'buf> Parser<'buf> {
    /// A prefix operator applied to its operand, or a primary expression
    /// with its postfix chain.
    pub(crate) fn parse_prefix(&mut self, command: bool) -> Node {
        use TokenKind as T;
        match self.current_kind() {
            T::Bang => {
                let operator = self.advance().location;
                let operand = self.parse_operand(bp::UNARY, command);
                unary_call(operator, b"!", operand)
            }
            T::Tilde => {
                let operator = self.advance().location;
                let operand = self.parse_operand(bp::UNARY, false);
                unary_call(operator, b"~", operand)
            }
            T::UPlus => {
                let operator = self.advance().location;
                let operand = self.parse_operand(bp::UNARY, false);
                unary_call(operator, b"+@", operand)
            }
            T::UMinus => {
                let operator = self.advance().location;
                let operand = self.parse_operand(bp::UMINUS, false);
                unary_call(operator, b"-@", operand)
            }
            T::UMinusNum => self.parse_negative_number(),
            T::KeywordNot => self.parse_not(),
            T::KeywordDefined => self.parse_defined(),
            T::UDotDot | T::UDotDotDot => {
                let operator = self.advance();
                self.parse_range(None, operator, bp::RANGE + 1)
            }
            T::UStar => self.parse_splat(bp::DEFINED),
            T::UStarStar | T::UAmpersand => {
                self.error_unexpected(DiagnosticId::UnexpectedToken);
                self.advance();
                self.parse_operand(bp::UNARY, false)
            }
            _ => {
                let node = self.parse_primary(command);
                if is_command(&node) || self.previous_kind() == T::LabelEnd {
                    node
                } else {
                    self.parse_postfix(node, command)
                }
            }
        }
    }

    /// `*expr`, or a bare `*` forwarding the enclosing rest parameter.
    pub(crate) fn parse_splat(&mut self, min_bp: u8) -> Node {
        let operator_loc = self.advance().location;
        let expression = if self.at_any(EXPRESSION_START) {
            Some(Box::new(self.parse_expression(min_bp, false)))
        } else {
            None
        };
        let location = expression.as_ref().map_or(operator_loc, |e| operator_loc.join(e.location));
        Node::new(location, SplatNode { operator_loc, expression })
    }

    /// `-2`, `-2.5r`, and `-2 ** 2`, which negates the power.
    fn parse_negative_number(&mut self) -> Node {
        let minus = self.advance().location;
        if !self.at_any(NUMERIC) {
            let operand = self.parse_operand(bp::UMINUS, false);
            return unary_call(minus, b"-@", operand);
        }
        let number = self.parse_numeric();
        if self.at(TokenKind::StarStar) {
            let power = self.parse_expression_from(number, bp::EXPONENT, false);
            return unary_call(minus, b"-@", power);
        }
        negate(number, minus)
    }

    /// `not x` or `not(x)`.
    fn parse_not(&mut self) -> Node {
        let keyword = self.advance().location;
        if self.at(TokenKind::ParenthesisLeft) {
            let opening = self.advance().location;
            self.skip_newlines();
            let receiver = if self.at(TokenKind::ParenthesisRight) {
                None
            } else {
                Some(Box::new(self.with_context(ParseContext::NONE, |p| p.parse_statement())))
            };
            self.skip_newlines();
            let closing = self.expect(TokenKind::ParenthesisRight, DiagnosticId::ExpectRparen);
            let end = closing.unwrap_or(self.previous_location());
            return Node::new(
                keyword.join(end),
                CallNode {
                    flags: CallFlags::empty(),
                    receiver,
                    call_operator_loc: None,
                    name: Name::new(b"!"),
                    message_loc: Some(keyword),
                    opening_loc: Some(opening),
                    arguments: None,
                    closing_loc: closing,
                    block: None,
                },
            );
        }
        let operand = self.parse_operand(bp::NOT, true);
        unary_call(keyword, b"!", operand)
    }

    /// `defined?(x)` or `defined? x`.
    fn parse_defined(&mut self) -> Node {
        let keyword_loc = self.advance().location;
        if self.at(TokenKind::ParenthesisLeft) {
            let lparen = self.advance().location;
            self.skip_newlines();
            let value = self.with_context(self.context.without(BRACKET_RESET), |p| p.parse_operand(bp::STATEMENT, true));
            self.skip_newlines();
            let rparen = self.expect(TokenKind::ParenthesisRight, DiagnosticId::ExpectRparen);
            let end = rparen.unwrap_or(value.location);
            return Node::new(
                keyword_loc.join(end),
                DefinedNode {
                    lparen_loc: Some(lparen),
                    value: Box::new(value),
                    rparen_loc: rparen,
                    keyword_loc,
                },
            );
        }
        let value = self.parse_operand(bp::DEFINED, false);
        Node::new(
            keyword_loc.join(value.location),
            DefinedNode {
                lparen_loc: None,
                value: Box::new(value),
                rparen_loc: None,
                keyword_loc,
            },
        )
    }

    /// Literals, variables, method calls by name, and the keyword
    /// constructs. Postfix operators are left to the caller.
    fn parse_primary(&mut self, command: bool) -> Node {
        use TokenKind as T;
        let token = self.current();
        match token.kind {
            kind if NUMERIC.contains(kind) => self.parse_numeric(),
            T::StringBegin | T::HeredocStart | T::Backtick | T::PercentLowerX | T::CharacterLiteral => {
                self.parse_string_literal()
            }
            T::SymbolBegin => self.parse_symbol(),
            T::RegexpBegin => self.parse_regexp(),
            T::PercentLowerW | T::PercentUpperW | T::PercentLowerI | T::PercentUpperI => self.parse_word_list(),
            T::InstanceVariable => {
                self.advance();
                Node::new(token.location, InstanceVariableReadNode { name: Name::new(token.raw) })
            }
            T::ClassVariable => {
                self.advance();
                Node::new(token.location, ClassVariableReadNode { name: Name::new(token.raw) })
            }
            T::GlobalVariable => {
                self.advance();
                Node::new(token.location, GlobalVariableReadNode { name: Name::new(token.raw) })
            }
            T::BackReference => {
                self.advance();
                Node::new(token.location, BackReferenceReadNode { name: Name::new(token.raw) })
            }
            T::NumberedReference => {
                self.advance();
                let number = std::str::from_utf8(token.raw.get(1..).unwrap_or_default())
                    .ok()
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .unwrap_or(0);
                Node::new(token.location, NumberedReferenceReadNode { number })
            }
            T::Identifier | T::MethodName | T::Constant => self.parse_identifier(command),
            T::UColonColon => {
                let delimiter_loc = self.advance().location;
                self.parse_constant_path(None, delimiter_loc, command)
            }
            T::Label => {
                self.error_unexpected(DiagnosticId::UnexpectedToken);
                self.advance();
                self.missing()
            }
            T::KeywordNil => self.keyword_literal(NilNode {}),
            T::KeywordTrue => self.keyword_literal(TrueNode {}),
            T::KeywordFalse => self.keyword_literal(FalseNode {}),
            T::KeywordSelf => self.keyword_literal(SelfNode {}),
            T::KeywordLine => self.keyword_literal(SourceLineNode {}),
            T::KeywordEncoding => self.keyword_literal(SourceEncodingNode {}),
            T::KeywordFile => {
                let flags = match self.cursor.frozen_string_literal() {
                    Some(true) => StringFlags::FROZEN,
                    Some(false) => StringFlags::MUTABLE,
                    None => StringFlags::empty(),
                };
                let filepath = StringValue::Owned(self.filepath.clone());
                self.keyword_literal(SourceFileNode { flags, filepath })
            }
            T::KeywordRedo => self.keyword_literal(RedoNode {}),
            T::KeywordRetry => {
                if !self.context.in_rescue() {
                    self.error(DiagnosticId::InvalidRetry, token.location);
                }
                self.keyword_literal(RetryNode {})
            }
            T::ParenthesisLeft | T::ParenthesisLeftParentheses => self.parse_parentheses(),
            T::BracketLeftArray => self.parse_array(),
            T::BraceLeft => self.parse_hash(),
            T::MinusGreater => self.parse_lambda(),
            T::KeywordIf => self.parse_if(),
            T::KeywordUnless => self.parse_unless(),
            T::KeywordWhile | T::KeywordUntil => self.parse_loop(),
            T::KeywordFor => self.parse_for(),
            T::KeywordCase => self.parse_case(),
            T::KeywordBegin => self.parse_begin(),
            T::KeywordDef => self.parse_def(),
            T::KeywordClass => self.parse_class(),
            T::KeywordModule => self.parse_module(),
            T::KeywordAlias => self.parse_alias(),
            T::KeywordUndef => self.parse_undef(),
            T::KeywordBeginUpcase | T::KeywordEndUpcase => self.parse_pre_post_execution(),
            T::KeywordReturn | T::KeywordBreak | T::KeywordNext => self.parse_jump(),
            T::KeywordYield => self.parse_yield(command),
            T::KeywordSuper => self.parse_super(command),
            _ => {
                self.error_unexpected(DiagnosticId::ExpectExpression);
                self.missing()
            }
        }
    }

    fn keyword_literal(&mut self, kind: impl Into<NodeKind>) -> Node {
        let location = self.advance().location;
        Node::new(location, kind)
    }

    /// Integer, float, rational, and imaginary literals.
    pub(crate) fn parse_numeric(&mut self) -> Node {
        let token = self.advance();
        let (body, suffix) = numeric::split_suffix(token.raw);
        let is_float = matches!(
            token.kind,
            TokenKind::Float | TokenKind::FloatRational | TokenKind::FloatImaginary | TokenKind::FloatRationalImaginary
        );
        let number = if suffix.rational {
            let (numerator, denominator) = numeric::rational_value(body);
            let flags = if is_float {
                garnet_ir::node::IntegerBaseFlags::DECIMAL
            } else {
                numeric::integer_value(body).1
            };
            Node::new(token.location, RationalNode { flags, numerator, denominator })
        } else if is_float {
            let value = numeric::float_value(body).unwrap_or_else(|| {
                self.warn(DiagnosticId::FloatOutOfRange, token.location);
                f64::INFINITY
            });
            Node::new(token.location, FloatNode { value: FloatValue::new(value) })
        } else {
            let (value, flags) = numeric::integer_value(body);
            Node::new(token.location, IntegerNode { flags, value })
        };
        if suffix.imaginary {
            Node::new(token.location, ImaginaryNode { numeric: Box::new(number) })
        } else {
            number
        }
    }

    /// An identifier, method name, or constant: a local variable read, a
    /// constant read, or a method call with or without arguments.
    fn parse_identifier(&mut self, command: bool) -> Node {
        let token = self.advance();
        let name = token.raw;

        if token.kind == TokenKind::Identifier && !self.at(TokenKind::ParenthesisLeft) {
            if let Some(node) = self.parse_local_read(token, command) {
                return node;
            }
        }
        if token.kind == TokenKind::Constant
            && !self.at(TokenKind::ParenthesisLeft)
            && !(command && self.at_any(ARGUMENT_START))
        {
            return Node::new(token.location, ConstantReadNode { name: Name::new(name) });
        }

        let variable_call = token.kind == TokenKind::Identifier;
        self.parse_call_rest(None, None, token, variable_call, command)
    }

    /// A bare identifier that names a local, a numbered parameter, or `it`.
    fn parse_local_read(&mut self, token: Token<'buf>, command: bool) -> Option<Node> {
        let name = token.raw;
        if let Some(number) = numbered_parameter(name).filter(|_| self.scopes.in_block()) {
            if let Err(id) = self.scopes.use_numbered_parameter(number) {
                self.error(id, token.location);
            }
            return Some(Node::new(token.location, LocalVariableReadNode { name: Name::new(name), depth: 0 }));
        }
        if let Some(depth) = self.scopes.resolve(name) {
            if command && self.at_any(ARGUMENT_START.intersection(LOCAL_COMMAND_START)) {
                return None;
            }
            return Some(Node::new(token.location, LocalVariableReadNode { name: Name::new(name), depth }));
        }
        if name == b"it"
            && self.version.has_it_parameter()
            && self.scopes.in_block()
            && !(command && self.at_any(ARGUMENT_START))
            && self.scopes.use_it_parameter().is_ok()
        {
            return Some(Node::new(token.location, ItLocalVariableReadNode {}));
        }
        None
    }

    /// The call named by `message`: arguments in parentheses, command
    /// arguments, or none, followed by a block if one is allowed here.
    pub(crate) fn parse_call_rest(
        &mut self,
        receiver: Option<Node>,
        call_operator_loc: Option<Location>,
        message: Token<'buf>,
        variable_call: bool,
        command: bool,
    ) -> Node {
        let mut flags = CallFlags::empty();
        if call_operator_loc.is_some_and(|loc| self.slice(loc) == b"&.") {
            flags |= CallFlags::SAFE_NAVIGATION;
        }
        if receiver.as_ref().is_some_and(|r| matches!(r.kind, NodeKind::SelfKeyword(_))) {
            flags |= CallFlags::IGNORE_VISIBILITY;
        }
        let name = match message.kind {
            TokenKind::UPlus if message.raw == b"+" => Name::new(b"+@"),
            TokenKind::UMinus if message.raw == b"-" => Name::new(b"-@"),
            TokenKind::ParenthesisLeft => Name::new(b"call"),
            _ => Name::new(message.raw),
        };
        let message_loc = (message.kind != TokenKind::ParenthesisLeft).then_some(message.location);

        let arguments = if message.kind == TokenKind::ParenthesisLeft {
            self.parse_parenthesized_arguments(message.location)
        } else if self.at(TokenKind::ParenthesisLeft) {
            let opening = self.advance().location;
            self.parse_parenthesized_arguments(opening)
        } else if command && self.at_any(ARGUMENT_START) {
            self.parse_command_arguments()
        } else {
            if variable_call && receiver.is_none() {
                flags |= CallFlags::VARIABLE_CALL;
            }
            CallArguments::default()
        };

        let start = receiver.as_ref().map_or(message.location, |r| r.location);
        let is_command_call = arguments.opening_loc.is_none() && arguments.arguments.is_some();
        let mut call = CallNode {
            flags,
            receiver: receiver.map(Box::new),
            call_operator_loc,
            name,
            message_loc,
            opening_loc: arguments.opening_loc,
            arguments: arguments.arguments,
            closing_loc: arguments.closing_loc,
            block: arguments.block,
        };
        let mut location = start.join(message.location);
        for end in [call.closing_loc, call.arguments.as_ref().map(|a| a.location), call.block.as_ref().map(|b| b.location)]
            .into_iter()
            .flatten()
        {
            location = location.join(end);
        }

        if is_command_call && self.at(TokenKind::KeywordDo) && self.context.allows_do_block() {
            let block = self.parse_do_block();
            self.attach_block(&mut call.block, block);
            if let Some(block) = &call.block {
                location = location.join(block.location);
            }
        }
        Node::new(location, call)
    }

    /// `::Name` after `parent`, or after nothing for a top-level path. The
    /// `::` is consumed.
    pub(crate) fn parse_constant_path(&mut self, parent: Option<Node>, delimiter_loc: Location, command: bool) -> Node {
        if !self.at(TokenKind::Constant) {
            if let Some(parent) = parent {
                if self.at(TokenKind::Identifier) || self.at(TokenKind::MethodName) || self.current_kind().is_keyword() {
                    let message = self.advance();
                    return self.parse_call_rest(Some(parent), Some(delimiter_loc), message, false, command);
                }
                if self.at(TokenKind::ParenthesisLeft) {
                    let message = self.advance();
                    return self.parse_call_rest(Some(parent), Some(delimiter_loc), message, false, command);
                }
                if self.current_kind().is_operator_method_name() {
                    let message = self.advance();
                    return self.parse_call_rest(Some(parent), Some(delimiter_loc), message, false, command);
                }
                self.error(DiagnosticId::ConstantPathColonColon, self.error_location());
                let location = parent.location.join(delimiter_loc);
                return Node::new(
                    location,
                    ConstantPathNode {
                        parent: Some(Box::new(parent)),
                        name: None,
                        delimiter_loc,
                        name_loc: Location::point(delimiter_loc.end),
                    },
                );
            }
            self.error(DiagnosticId::ConstantPathColonColon, self.error_location());
            return Node::new(
                delimiter_loc,
                ConstantPathNode {
                    parent: None,
                    name: None,
                    delimiter_loc,
                    name_loc: Location::point(delimiter_loc.end),
                },
            );
        }

        let constant = self.advance();
        if self.at(TokenKind::ParenthesisLeft) || (command && self.at_any(ARGUMENT_START)) {
            return match parent {
                Some(parent) => self.parse_call_rest(Some(parent), Some(delimiter_loc), constant, false, command),
                None => {
                    // `::Foo()` has no receiver to call on.
                    self.error(DiagnosticId::UnexpectedToken, self.current_location());
                    self.top_level_path(delimiter_loc, constant)
                }
            };
        }
        match parent {
            Some(parent) => Node::new(
                parent.location.join(constant.location),
                ConstantPathNode {
                    parent: Some(Box::new(parent)),
                    name: Some(Name::new(constant.raw)),
                    delimiter_loc,
                    name_loc: constant.location,
                },
            ),
            None => self.top_level_path(delimiter_loc, constant),
        }
    }

    fn top_level_path(&self, delimiter_loc: Location, constant: Token<'_>) -> Node {
        Node::new(
            delimiter_loc.join(constant.location),
            ConstantPathNode {
                parent: None,
                name: Some(Name::new(constant.raw)),
                delimiter_loc,
                name_loc: constant.location,
            },
        )
    }

    /// `( statements )`, `()`, or `(a, b)` as a nested target list of a
    /// multiple assignment.
    fn parse_parentheses(&mut self) -> Node {
        let opening_loc = self.advance().location;
        let (body, closing) = self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.cursor.push_do_loop(false);
            let body = p.parse_parenthesized_body();
            p.skip_separators();
            p.cursor.pop_do_loop();
            let closing = p.expect(TokenKind::ParenthesisRight, DiagnosticId::ExpectRparen);
            (body, closing)
        });
        let closing_loc = closing.unwrap_or_else(|| Location::point(self.previous_location().end));
        let location = opening_loc.join(closing_loc);

        match body {
            ParenthesizedBody::Targets(mut target) => {
                if let NodeKind::MultiTarget(multi) = &mut target.kind {
                    multi.lparen_loc = Some(opening_loc);
                    multi.rparen_loc = Some(closing_loc);
                }
                target.location = location;
                target
            }
            ParenthesizedBody::Statements(body) => Node::new(
                location,
                ParenthesesNode {
                    body,
                    opening_loc,
                    closing_loc,
                },
            ),
        }
    }

    /// Statements inside parentheses. A comma after the first expression
    /// makes it a nested target list.
    fn parse_parenthesized_body(&mut self) -> ParenthesizedBody {
        self.skip_separators();
        if self.at(TokenKind::ParenthesisRight) {
            return ParenthesizedBody::Statements(None);
        }
        if self.at(TokenKind::UStar) {
            return ParenthesizedBody::Targets(self.parse_target_list(None));
        }
        let first = self.parse_operand(bp::STATEMENT, true);
        if self.at(TokenKind::Comma) && Self::is_multi_write_start(&first) {
            let targets = self.parse_target_list(Some(first));
            if self.at(TokenKind::Equal) {
                // `(a, b = 1, 2)`
                let write = self.parse_assignment(targets, bp::STATEMENT, true);
                let mut body = vec![write];
                body.extend(self.parse_statement_list(TokenSet::single(TokenKind::ParenthesisRight)));
                return ParenthesizedBody::Statements(statements_node(body));
            }
            return ParenthesizedBody::Targets(targets);
        }
        if !self.at_any(crate::recovery::STATEMENT_END) && !self.at(TokenKind::ParenthesisRight) && self.at_any(EXPRESSION_START) {
            self.error_unexpected(DiagnosticId::StatementSeparator);
        }
        let mut body = vec![first];
        body.extend(self.parse_statement_list(TokenSet::single(TokenKind::ParenthesisRight)));
        ParenthesizedBody::Statements(statements_node(body))
    }

    /// `[a, *b, c: 1]`
    fn parse_array(&mut self) -> Node {
        let opening_loc = self.advance().location;
        let mut flags = ArrayFlags::empty();
        let mut elements = Vec::new();
        let mut keywords: Vec<Node> = Vec::new();

        self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.cursor.push_do_loop(false);
            loop {
                p.skip_newlines();
                if p.at(TokenKind::BracketRight) || p.is_at_end() {
                    break;
                }
                if p.at(TokenKind::UStar) {
                    flags |= ArrayFlags::CONTAINS_SPLAT;
                    elements.push(p.parse_splat(bp::DEFINED));
                } else if p.at(TokenKind::UStarStar) || p.at(TokenKind::Label) {
                    p.parse_assoc(&mut keywords, &mut FxHashSet::default());
                } else if p.at_any(EXPRESSION_START) {
                    let element = p.parse_expression(bp::DEFINED, false);
                    if p.at(TokenKind::EqualGreater) || p.previous_kind() == TokenKind::LabelEnd {
                        p.parse_assoc_value(element, &mut keywords, &mut FxHashSet::default());
                    } else {
                        elements.push(element);
                    }
                } else {
                    p.error_unexpected(DiagnosticId::ArrayElement);
                    break;
                }
                p.skip_newlines();
                if p.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
            p.skip_newlines();
            p.cursor.pop_do_loop();
        });
        if !keywords.is_empty() {
            elements.push(keyword_hash(keywords));
        }

        let closing_loc = self.accept(TokenKind::BracketRight);
        if closing_loc.is_none() {
            self.error(DiagnosticId::ArrayTerm, self.error_location());
            self.skip_to_closer(TokenKind::BracketRight);
        }
        let end = closing_loc.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            opening_loc.join(end),
            ArrayNode {
                flags,
                elements,
                opening_loc: Some(opening_loc),
                closing_loc: Some(end),
            },
        )
    }

    /// `{ a => 1, b: 2, **c }`
    fn parse_hash(&mut self) -> Node {
        let opening_loc = self.advance().location;
        let mut elements = Vec::new();
        let mut seen = FxHashSet::default();
        self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.cursor.push_do_loop(false);
            loop {
                p.skip_newlines();
                if p.at(TokenKind::BraceRight) || p.is_at_end() {
                    break;
                }
                if p.at(TokenKind::UStarStar) || p.at(TokenKind::Label) {
                    p.parse_assoc(&mut elements, &mut seen);
                } else if p.at_any(EXPRESSION_START) {
                    let key = p.parse_expression(bp::DEFINED, false);
                    if p.at(TokenKind::EqualGreater) || p.previous_kind() == TokenKind::LabelEnd {
                        p.parse_assoc_value(key, &mut elements, &mut seen);
                    } else {
                        p.error(DiagnosticId::HashRocket, p.error_location());
                        let value = p.missing();
                        elements.push(Node::new(
                            key.location,
                            AssocNode {
                                key: Box::new(key),
                                value: Box::new(value),
                                operator_loc: None,
                            },
                        ));
                    }
                } else {
                    p.error_unexpected(DiagnosticId::HashKey);
                    break;
                }
                p.skip_newlines();
                if p.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
            p.skip_newlines();
            p.cursor.pop_do_loop();
        });

        let closing = self.accept(TokenKind::BraceRight);
        if closing.is_none() {
            self.error(DiagnosticId::HashTerm, self.error_location());
            self.skip_to_closer(TokenKind::BraceRight);
        }
        let closing_loc = closing.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            opening_loc.join(closing_loc),
            HashNode {
                opening_loc,
                elements,
                closing_loc,
            },
        )
    }

    /// An element that starts with `**` or a label.
    pub(crate) fn parse_assoc(&mut self, elements: &mut Vec<Node>, seen: &mut FxHashSet<(u8, Vec<u8>)>) {
        if self.at(TokenKind::UStarStar) {
            let operator_loc = self.advance().location;
            let value = if self.at_any(EXPRESSION_START) {
                Some(Box::new(self.parse_expression(bp::DEFINED, false)))
            } else {
                if !self.scopes.can_forward(crate::Forwarding::KEYWORDS) {
                    self.error(DiagnosticId::ArgumentNoForwardStarStar, operator_loc);
                }
                None
            };
            let location = value.as_ref().map_or(operator_loc, |v| operator_loc.join(v.location));
            elements.push(Node::new(location, AssocSplatNode { value, operator_loc }));
            return;
        }

        let label = self.advance();
        let key = self.label_symbol(label);
        self.check_duplicate_key(&key, seen);
        let value_loc = Location::new(label.location.start, label.location.end.saturating_sub(1));
        let value = if self.at_any(EXPRESSION_START) && !self.at(TokenKind::Label) {
            self.parse_expression(bp::DEFINED, false)
        } else {
            let name = self.slice(value_loc);
            let implied = self.implied_value(name, value_loc);
            Node::new(value_loc, ImplicitNode { value: Box::new(implied) })
        };
        elements.push(Node::new(
            label.location.join(value.location),
            AssocNode {
                key: Box::new(key),
                value: Box::new(value),
                operator_loc: None,
            },
        ));
    }

    /// The value half of `key => value` or `"key": value`.
    pub(crate) fn parse_assoc_value(&mut self, key: Node, elements: &mut Vec<Node>, seen: &mut FxHashSet<(u8, Vec<u8>)>) {
        self.check_duplicate_key(&key, seen);
        let operator_loc = self.accept(TokenKind::EqualGreater);
        let value = if self.at_any(EXPRESSION_START) {
            self.parse_expression(bp::DEFINED, false)
        } else {
            self.error(DiagnosticId::HashValue, self.error_location());
            self.missing()
        };
        elements.push(Node::new(
            key.location.join(value.location),
            AssocNode {
                key: Box::new(key),
                value: Box::new(value),
                operator_loc,
            },
        ));
    }

    fn check_duplicate_key(&mut self, key: &Node, seen: &mut FxHashSet<(u8, Vec<u8>)>) {
        if let Some(identity) = static_key(key, self.cursor.source()) {
            if !seen.insert(identity) {
                self.warn(DiagnosticId::DuplicatedHashKey, key.location);
            }
        }
    }

    /// `name:` as a symbol key.
    pub(crate) fn label_symbol(&self, label: Token<'_>) -> Node {
        let end = label.location.end.saturating_sub(1);
        let value_loc = Location::new(label.location.start, end);
        let closing_loc = Location::new(end, label.location.end);
        let flags = if label.raw.is_ascii() {
            SymbolFlags::FORCED_US_ASCII_ENCODING
        } else {
            SymbolFlags::empty()
        };
        Node::new(
            label.location,
            SymbolNode {
                flags,
                opening_loc: None,
                value_loc: Some(value_loc),
                closing_loc: Some(closing_loc),
                unescaped: StringValue::Shared(value_loc),
            },
        )
    }

    /// What `{x:}` means by `x`: a local, a constant, or a method call.
    fn implied_value(&mut self, name: &[u8], location: Location) -> Node {
        if let Some(depth) = self.scopes.resolve(name) {
            return Node::new(location, LocalVariableReadNode { name: Name::new(name), depth });
        }
        if name.first().is_some_and(u8::is_ascii_uppercase) {
            return Node::new(location, ConstantReadNode { name: Name::new(name) });
        }
        Node::new(
            location,
            CallNode {
                flags: CallFlags::IGNORE_VISIBILITY,
                receiver: None,
                call_operator_loc: None,
                name: Name::new(name),
                message_loc: Some(location),
                opening_loc: None,
                arguments: None,
                closing_loc: None,
                block: None,
            },
        )
    }

    /// After a missing closer: skip to the matching `closer` and consume
    /// it, stopping early at the end of the statement.
    pub(crate) fn skip_to_closer(&mut self, closer: TokenKind) -> Option<Location> {
        let mut depth = 0u32;
        loop {
            let kind = self.current_kind();
            match kind {
                TokenKind::Eof | TokenKind::Newline | TokenKind::Semicolon | TokenKind::KeywordEnd => return None,
                _ if kind == closer && depth == 0 => return Some(self.advance().location),
                _ if kind == closer => depth -= 1,
                TokenKind::ParenthesisLeft | TokenKind::ParenthesisLeftParentheses
                    if closer == TokenKind::ParenthesisRight =>
                {
                    depth += 1;
                }
                TokenKind::BracketLeft | TokenKind::BracketLeftArray if closer == TokenKind::BracketRight => depth += 1,
                TokenKind::BraceLeft if closer == TokenKind::BraceRight => depth += 1,
                _ => {}
            }
            self.advance();
        }
    }
}

enum ParenthesizedBody {
    Statements(Option<Box<Node>>),
    Targets(Node),
}

/// Numeric literal tokens.
const NUMERIC: TokenSet = TokenSet::new()
    .with(TokenKind::Integer)
    .with(TokenKind::IntegerRational)
    .with(TokenKind::IntegerImaginary)
    .with(TokenKind::IntegerRationalImaginary)
    .with(TokenKind::Float)
    .with(TokenKind::FloatRational)
    .with(TokenKind::FloatImaginary)
    .with(TokenKind::FloatRationalImaginary);

/// Tokens after a local variable that still make it a command call
/// (`x y`, `x :a`); operators are lexed as binary after a local.
const LOCAL_COMMAND_START: TokenSet = TokenSet::new()
    .with(TokenKind::Identifier)
    .with(TokenKind::Constant)
    .with(TokenKind::MethodName)
    .with(TokenKind::Integer)
    .with(TokenKind::Float)
    .with(TokenKind::StringBegin)
    .with(TokenKind::InstanceVariable)
    .with(TokenKind::GlobalVariable)
    .with(TokenKind::ClassVariable)
    .with(TokenKind::Label);

/// Keyword arguments gathered into one hash.
pub(crate) fn keyword_hash(elements: Vec<Node>) -> Node {
    let symbol_keys = elements.iter().all(|element| match &element.kind {
        NodeKind::Assoc(assoc) => matches!(assoc.key.kind, NodeKind::Symbol(_)),
        _ => false,
    });
    let first = elements.first().map_or(Location::point(0), |e| e.location);
    let last = elements.last().map_or(first, |e| e.location);
    Node::new(
        first.join(last),
        KeywordHashNode {
            flags: if symbol_keys { KeywordHashFlags::SYMBOL_KEYS } else { KeywordHashFlags::empty() },
            elements,
        },
    )
}

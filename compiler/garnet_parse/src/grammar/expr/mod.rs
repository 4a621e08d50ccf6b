//! Expressions: precedence climbing over the table in `operators`.

pub(crate) mod operators;
mod postfix;
mod primary;
mod string;
mod write;

pub(crate) use operators::bp;
pub(crate) use postfix::{implicit_parameters, CallArguments};

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    AndNode, ArgumentsNode, ArgumentsFlags, CallFlags, CallNode, ElseNode, IfNode, LoopFlags, MatchPredicateNode,
    MatchRequiredNode, OrNode, RangeFlags, RangeNode, RescueModifierNode, UnlessNode, UntilNode, WhileNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, Token, TokenKind};
use garnet_lexer::LexState;

use crate::grammar::statements_node;
use crate::recovery::EXPRESSION_START;
use crate::stack::ensure_sufficient_stack;
use crate::{ParseContext, Parser};
use operators::Infix;

/// Contexts that brackets reset: a `do` or `|` inside belongs to the
/// bracketed expression.
pub(crate) const BRACKET_RESET: ParseContext = ParseContext::NO_DO_BLOCK.with(ParseContext::PIPE_IS_SEPARATOR);

/// A call of the method named by `operator` on `receiver`.
pub(crate) fn operator_call(receiver: Node, operator: Token<'_>, name: &[u8], argument: Option<Node>) -> Node {
    let mut location = receiver.location.join(operator.location);
    let arguments = argument.map(|argument| {
        location = location.join(argument.location);
        Box::new(Node::new(
            argument.location,
            ArgumentsNode {
                flags: ArgumentsFlags::empty(),
                arguments: vec![argument],
            },
        ))
    });
    Node::new(
        location,
        CallNode {
            flags: CallFlags::empty(),
            receiver: Some(Box::new(receiver)),
            call_operator_loc: None,
            name: Name::new(name),
            message_loc: Some(operator.location),
            opening_loc: None,
            arguments,
            closing_loc: None,
            block: None,
        },
    )
}

impl Parser<'_> {
    /// An expression whose operators bind at least `min_bp`. `command`
    /// allows a call with unparenthesized arguments (`puts x`) here.
    pub(crate) fn parse_expression(&mut self, min_bp: u8, command: bool) -> Node {
        ensure_sufficient_stack(|| {
            let left = self.parse_prefix(command);
            // `"key": value` ends the key; the caller takes the value.
            if self.previous_kind() == TokenKind::LabelEnd {
                return left;
            }
            self.parse_expression_from(left, min_bp, command)
        })
    }

    /// An operand that must be present: reports and substitutes a missing
    /// node when the current token cannot start an expression.
    pub(crate) fn parse_operand(&mut self, min_bp: u8, command: bool) -> Node {
        if self.at_any(EXPRESSION_START) {
            self.parse_expression(min_bp, command)
        } else {
            self.error_unexpected(DiagnosticId::ExpectExpression);
            self.missing()
        }
    }

    /// Extend `left` with infix operators binding at least `min_bp`.
    pub(crate) fn parse_expression_from(&mut self, mut left: Node, min_bp: u8, command: bool) -> Node {
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Pipe && self.context.pipe_is_separator() {
                break;
            }
            let Some((infix, left_bp, right_bp)) = operators::infix(kind) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            left = match infix {
                Infix::Binary => self.parse_binary(left, right_bp),
                Infix::And | Infix::Or => {
                    let operator = self.advance();
                    let keyword = matches!(operator.kind, TokenKind::KeywordAnd | TokenKind::KeywordOr);
                    let right = self.parse_operand(right_bp, keyword);
                    let location = left.location.join(right.location);
                    let (left, right, operator_loc) = (Box::new(left), Box::new(right), operator.location);
                    if infix == Infix::And {
                        Node::new(location, AndNode { left, right, operator_loc })
                    } else {
                        Node::new(location, OrNode { left, right, operator_loc })
                    }
                }
                Infix::Assign => self.parse_assignment(left, min_bp, command),
                Infix::OperatorAssign => self.parse_operator_assignment(left, command),
                Infix::Ternary => self.parse_ternary(left),
                Infix::Range => {
                    let operator = self.advance();
                    self.parse_range(Some(left), operator, right_bp)
                }
                Infix::Modifier => self.parse_modifier(left, right_bp),
                Infix::RescueModifier => {
                    let keyword_loc = self.advance().location;
                    let rescue_expression = self.parse_operand(right_bp, true);
                    Node::new(
                        left.location.join(rescue_expression.location),
                        RescueModifierNode {
                            expression: Box::new(left),
                            keyword_loc,
                            rescue_expression: Box::new(rescue_expression),
                        },
                    )
                }
                Infix::MatchRequired | Infix::MatchPredicate => {
                    self.cursor.set_lex_state(LexState::BEG | LexState::LABEL);
                    let operator_loc = self.advance().location;
                    let pattern = self.parse_pattern_top(infix == Infix::MatchRequired);
                    let location = left.location.join(pattern.location);
                    let (value, pattern) = (Box::new(left), Box::new(pattern));
                    if infix == Infix::MatchRequired {
                        Node::new(location, MatchRequiredNode { value, pattern, operator_loc })
                    } else {
                        Node::new(location, MatchPredicateNode { value, pattern, operator_loc })
                    }
                }
            };
        }
        left
    }

    /// `left op right` as a method call.
    fn parse_binary(&mut self, left: Node, right_bp: u8) -> Node {
        let operator = self.advance();
        let right = self.parse_operand(right_bp, false);
        if operator.kind == TokenKind::EqualTilde {
            if let Some(targets) = self.named_capture_targets(&left) {
                let call = operator_call(left, operator, operator.raw, Some(right));
                return Self::match_write(call, targets);
            }
        }
        let node = operator_call(left, operator, operator.raw, Some(right));
        if operators::is_equality(operator.kind) && operators::is_equality(self.current_kind()) {
            self.error_unexpected(DiagnosticId::UnexpectedToken);
        }
        node
    }

    /// `predicate ? a : b`
    fn parse_ternary(&mut self, predicate: Node) -> Node {
        let question = self.advance().location;
        let then_branch = if self.at_any(EXPRESSION_START) {
            self.parse_expression(bp::TERNARY, false)
        } else {
            self.error(DiagnosticId::TernaryExpression, self.error_location());
            self.missing()
        };
        let else_branch = match self.accept(TokenKind::Colon) {
            Some(colon) => {
                let value = self.parse_operand(bp::TERNARY, false);
                Node::new(
                    colon.join(value.location),
                    ElseNode {
                        else_keyword_loc: colon,
                        statements: statements_node(vec![value]),
                        end_keyword_loc: None,
                    },
                )
            }
            None => {
                self.error(DiagnosticId::TernaryColon, self.error_location());
                let missing = self.missing();
                Node::new(
                    missing.location,
                    ElseNode {
                        else_keyword_loc: missing.location,
                        statements: statements_node(vec![missing]),
                        end_keyword_loc: None,
                    },
                )
            }
        };
        Node::new(
            predicate.location.join(else_branch.location),
            IfNode {
                if_keyword_loc: None,
                predicate: Box::new(predicate),
                then_keyword_loc: Some(question),
                statements: statements_node(vec![then_branch]),
                subsequent: Some(Box::new(else_branch)),
                end_keyword_loc: None,
            },
        )
    }

    /// `left..right`, `left..`, `..right`. The operator is consumed.
    pub(crate) fn parse_range(&mut self, left: Option<Node>, operator: Token<'_>, right_bp: u8) -> Node {
        let exclude_end = matches!(operator.kind, TokenKind::DotDotDot | TokenKind::UDotDotDot);
        let right = if self.at_any(EXPRESSION_START) {
            let right = self.parse_expression(right_bp, false);
            if exclude_end && left.is_some() && self.spans_line_break(operator.location.end, right.location.start) {
                self.warn(DiagnosticId::DotDotDotEol, operator.location);
            }
            Some(right)
        } else {
            if left.is_none() {
                self.error_unexpected(DiagnosticId::ExpectExpression);
            }
            None
        };
        let mut location = operator.location;
        for node in left.iter().chain(right.iter()) {
            location = location.join(node.location);
        }
        Node::new(
            location,
            RangeNode {
                flags: if exclude_end { RangeFlags::EXCLUDE_END } else { RangeFlags::empty() },
                left: left.map(Box::new),
                right: right.map(Box::new),
                operator_loc: operator.location,
            },
        )
    }

    /// `statement if predicate` and friends.
    fn parse_modifier(&mut self, statement: Node, right_bp: u8) -> Node {
        let keyword = self.advance();
        let predicate = self.parse_operand(right_bp, true);
        let location = statement.location.join(predicate.location);
        let begin_modifier = matches!(&statement.kind, NodeKind::Begin(begin) if begin.begin_keyword_loc.is_some());
        let flags = if begin_modifier { LoopFlags::BEGIN_MODIFIER } else { LoopFlags::empty() };
        let statements = statements_node(vec![statement]);
        let predicate = Box::new(predicate);
        let keyword_loc = keyword.location;
        match keyword.kind {
            TokenKind::KeywordIfModifier => Node::new(
                location,
                IfNode {
                    if_keyword_loc: Some(keyword_loc),
                    predicate,
                    then_keyword_loc: None,
                    statements,
                    subsequent: None,
                    end_keyword_loc: None,
                },
            ),
            TokenKind::KeywordUnlessModifier => Node::new(
                location,
                UnlessNode {
                    keyword_loc,
                    predicate,
                    then_keyword_loc: None,
                    statements,
                    else_clause: None,
                    end_keyword_loc: None,
                },
            ),
            TokenKind::KeywordWhileModifier => Node::new(
                location,
                WhileNode {
                    flags,
                    keyword_loc,
                    closing_loc: None,
                    predicate,
                    statements,
                },
            ),
            _ => Node::new(
                location,
                UntilNode {
                    flags,
                    keyword_loc,
                    closing_loc: None,
                    predicate,
                    statements,
                },
            ),
        }
    }

    /// Whether the source between two offsets contains a line break.
    fn spans_line_break(&self, start: u32, end: u32) -> bool {
        if end <= start {
            return false;
        }
        memchr_newline(self.slice(Location::new(start, end)))
    }
}

fn memchr_newline(bytes: &[u8]) -> bool {
    bytes.contains(&b'\n')
}

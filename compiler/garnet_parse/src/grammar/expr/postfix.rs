//! Method calls, indexing, argument lists, and blocks.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    ArgumentsFlags, ArgumentsNode, BlockArgumentNode, BlockNode, CallFlags, CallNode, ForwardingArgumentsNode,
    ItParametersNode, NumberedParametersNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, TokenKind};
use rustc_hash::FxHashSet;

use super::{bp, BRACKET_RESET};
use super::primary::{is_command, keyword_hash};
use crate::recovery::{TokenSet, ARGUMENT_END, EXPRESSION_START};
use crate::{BlockParameters, Forwarding, ParseContext, Parser, ScopeKind};

/// Arguments and block of a call, as written after the method name.
#[derive(Debug, Default)]
pub(crate) struct CallArguments {
    pub(crate) opening_loc: Option<Location>,
    pub(crate) arguments: Option<Box<Node>>,
    pub(crate) closing_loc: Option<Location>,
    pub(crate) block: Option<Box<Node>>,
}


/// The block slot of a node that can take a block.
fn block_slot(node: &mut Node) -> Option<&mut Option<Box<Node>>> {
    match &mut node.kind {
        NodeKind::Call(call) => Some(&mut call.block),
        NodeKind::Super(call) => Some(&mut call.block),
        NodeKind::ForwardingSuper(call) => Some(&mut call.block),
        _ => None,
    }
}

/// Message tokens accepted after `.` besides identifiers.
fn is_message(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::MethodName | TokenKind::Constant | TokenKind::BracketLeftRight
            | TokenKind::BracketLeftRightEqual
    ) || kind.is_keyword()
        || kind.is_operator_method_name()
}

impl<'buf> Parser<'buf> {
    /// Calls, index reads, constant lookups, and blocks chained onto
    /// `node`. A command call ends the chain.
    pub(crate) fn parse_postfix(&mut self, mut node: Node, command: bool) -> Node {
        loop {
            node = match self.current_kind() {
                TokenKind::Dot | TokenKind::AmpersandDot => {
                    let operator = self.advance().location;
                    if !is_message(self.current_kind()) && !self.at(TokenKind::ParenthesisLeft) {
                        self.error(DiagnosticId::CallMessage, self.error_location());
                        return self.call_without_message(node, operator);
                    }
                    let message = self.advance();
                    self.parse_call_rest(Some(node), Some(operator), message, false, command)
                }
                TokenKind::ColonColon => {
                    let delimiter = self.advance().location;
                    self.parse_constant_path(Some(node), delimiter, command)
                }
                TokenKind::BracketLeft => self.parse_index(node),
                TokenKind::BraceLeft => {
                    if !self.takes_block(&mut node) {
                        return node;
                    }
                    let block = self.parse_brace_block();
                    self.with_block(node, block)
                }
                TokenKind::KeywordDo if self.context.allows_do_block() => {
                    if !self.takes_block(&mut node) {
                        return node;
                    }
                    let block = self.parse_do_block();
                    self.with_block(node, block)
                }
                _ => return node,
            };
            if is_command(&node) {
                return node;
            }
        }
    }

    /// Whether a block may attach to `node`: a call-like node that was not
    /// written as a command.
    fn takes_block(&self, node: &mut Node) -> bool {
        !is_command(node) && block_slot(node).is_some()
    }

    fn with_block(&mut self, mut node: Node, block: Node) -> Node {
        node.location = node.location.join(block.location);
        if let NodeKind::Call(call) = &mut node.kind {
            call.flags.remove(CallFlags::VARIABLE_CALL);
        }
        if let Some(slot) = block_slot(&mut node) {
            self.attach_block(slot, block);
        }
        node
    }

    /// Store `block` in `slot`, reporting a second block.
    pub(crate) fn attach_block(&mut self, slot: &mut Option<Box<Node>>, block: Node) {
        if slot.is_some() {
            self.error(DiagnosticId::ArgumentBlockMulti, block.location);
        }
        *slot = Some(Box::new(block));
    }

    /// `receiver.` with nothing callable after the dot.
    fn call_without_message(&mut self, receiver: Node, operator: Location) -> Node {
        let flags = if self.slice(operator) == b"&." {
            CallFlags::SAFE_NAVIGATION
        } else {
            CallFlags::empty()
        };
        Node::new(
            receiver.location.join(operator),
            CallNode {
                flags,
                receiver: Some(Box::new(receiver)),
                call_operator_loc: Some(operator),
                name: Name::new(b""),
                message_loc: None,
                opening_loc: None,
                arguments: None,
                closing_loc: None,
                block: None,
            },
        )
    }

    /// `receiver[args]` as a call of `[]`.
    fn parse_index(&mut self, receiver: Node) -> Node {
        let opening_loc = self.advance().location;
        let (arguments, block) = self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.cursor.push_do_loop(false);
            p.skip_newlines();
            let list = if p.at(TokenKind::BracketRight) {
                (None, None)
            } else {
                p.parse_argument_list(TokenKind::BracketRight)
            };
            p.skip_newlines();
            p.cursor.pop_do_loop();
            list
        });
        let closing = self.accept(TokenKind::BracketRight);
        if closing.is_none() {
            self.error(DiagnosticId::ExpectRbracket, self.error_location());
            self.skip_to_closer(TokenKind::BracketRight);
        }
        let closing_loc = closing.unwrap_or_else(|| Location::point(self.previous_location().end));
        let mut flags = CallFlags::empty();
        if matches!(receiver.kind, NodeKind::SelfKeyword(_)) {
            flags |= CallFlags::IGNORE_VISIBILITY;
        }
        Node::new(
            receiver.location.join(closing_loc),
            CallNode {
                flags,
                receiver: Some(Box::new(receiver)),
                call_operator_loc: None,
                name: Name::new(b"[]"),
                message_loc: Some(opening_loc.join(closing_loc)),
                opening_loc: Some(opening_loc),
                arguments,
                closing_loc: Some(closing_loc),
                block,
            },
        )
    }

    /// `(args)` after a method name; `opening` is already consumed.
    pub(crate) fn parse_parenthesized_arguments(&mut self, opening: Location) -> CallArguments {
        let (arguments, block) = self.with_context(self.context.without(BRACKET_RESET), |p| {
            p.cursor.push_do_loop(false);
            p.skip_newlines();
            let list = if p.at(TokenKind::ParenthesisRight) {
                (None, None)
            } else {
                p.parse_argument_list(TokenKind::ParenthesisRight)
            };
            p.skip_newlines();
            p.cursor.pop_do_loop();
            list
        });
        let mut closing_loc = self.accept(TokenKind::ParenthesisRight);
        if closing_loc.is_none() {
            self.error(DiagnosticId::ArgumentTermParen, self.error_location());
            closing_loc = self.skip_to_closer(TokenKind::ParenthesisRight);
        }
        CallArguments {
            opening_loc: Some(opening),
            arguments,
            closing_loc: Some(closing_loc.unwrap_or_else(|| Location::point(self.previous_location().end))),
            block,
        }
    }

    /// Arguments of a call written without parentheses. A `do` after them
    /// belongs to this call.
    pub(crate) fn parse_command_arguments(&mut self) -> CallArguments {
        let context = self.context.with(ParseContext::NO_DO_BLOCK);
        let (arguments, block) = self.with_context(context, |p| p.parse_argument_list(TokenKind::Eof));
        CallArguments {
            opening_loc: None,
            arguments,
            closing_loc: None,
            block,
        }
    }

    /// Comma-separated arguments up to `closer`. Keyword arguments gather
    /// into one hash; a `&block` argument is returned separately.
    pub(crate) fn parse_argument_list(&mut self, closer: TokenKind) -> (Option<Box<Node>>, Option<Box<Node>>) {
        let mut flags = ArgumentsFlags::empty();
        let mut arguments: Vec<Node> = Vec::new();
        let mut keywords: Vec<Node> = Vec::new();
        let mut keyword_index = None;
        let mut seen = FxHashSet::default();
        let mut block: Option<Node> = None;
        let mut forwarding = false;
        let parenthesized = closer != TokenKind::Eof;

        loop {
            if parenthesized {
                self.skip_newlines();
                if self.at(closer) {
                    break;
                }
            }
            if let Some(block) = &block {
                self.error(DiagnosticId::ArgumentAfterBlock, block.location);
            } else if forwarding {
                self.error(DiagnosticId::ArgumentAfterForwarding, self.current_location());
            }

            match self.current_kind() {
                TokenKind::UAmpersand => {
                    let argument = self.parse_block_argument();
                    block = Some(argument);
                }
                TokenKind::UStar => {
                    let splat = self.parse_splat(bp::DEFINED);
                    if let NodeKind::Splat(node) = &splat.kind {
                        if node.expression.is_none() && !self.scopes.can_forward(Forwarding::POSITIONALS) {
                            self.error(DiagnosticId::ArgumentNoForwardStar, node.operator_loc);
                        }
                    }
                    if flags.contains(ArgumentsFlags::CONTAINS_SPLAT) {
                        flags |= ArgumentsFlags::CONTAINS_MULTIPLE_SPLATS;
                    }
                    flags |= ArgumentsFlags::CONTAINS_SPLAT;
                    arguments.push(splat);
                }
                TokenKind::UDotDotDot => {
                    let operator = self.advance();
                    if self.at(closer) || self.at_any(ARGUMENT_END) {
                        if !self.scopes.can_forward(Forwarding::ALL) {
                            self.error(DiagnosticId::ArgumentNoForwardEllipses, operator.location);
                        }
                        flags |= ArgumentsFlags::CONTAINS_FORWARDING;
                        forwarding = true;
                        arguments.push(Node::new(operator.location, ForwardingArgumentsNode {}));
                    } else {
                        let range = self.parse_range(None, operator, bp::RANGE + 1);
                        arguments.push(self.parse_expression_from(range, bp::DEFINED, false));
                    }
                }
                TokenKind::UStarStar | TokenKind::Label => {
                    keyword_index.get_or_insert(arguments.len());
                    self.parse_assoc(&mut keywords, &mut seen);
                }
                kind if EXPRESSION_START.contains(kind) => {
                    let argument = self.parse_expression(bp::DEFINED, true);
                    if self.at(TokenKind::EqualGreater) || self.previous_kind() == TokenKind::LabelEnd {
                        keyword_index.get_or_insert(arguments.len());
                        self.parse_assoc_value(argument, &mut keywords, &mut seen);
                    } else {
                        arguments.push(argument);
                    }
                }
                _ => {
                    self.error_unexpected(DiagnosticId::ExpectArgument);
                    break;
                }
            }

            if parenthesized {
                self.skip_newlines();
            }
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
            if !parenthesized {
                self.skip_newlines();
            }
        }

        if !keywords.is_empty() {
            flags |= ArgumentsFlags::CONTAINS_KEYWORDS;
            if keywords.iter().any(|k| matches!(k.kind, NodeKind::AssocSplat(_))) {
                flags |= ArgumentsFlags::CONTAINS_KEYWORD_SPLAT;
            }
            let index = keyword_index.unwrap_or(arguments.len()).min(arguments.len());
            arguments.insert(index, keyword_hash(keywords));
        }

        let arguments = match (arguments.first(), arguments.last()) {
            (Some(first), Some(last)) => Some(Box::new(Node::new(
                first.location.join(last.location),
                ArgumentsNode { flags, arguments },
            ))),
            _ => None,
        };
        (arguments, block.map(Box::new))
    }

    /// `&block`, or a bare `&` passing the method's block along.
    fn parse_block_argument(&mut self) -> Node {
        let operator_loc = self.advance().location;
        let expression = if self.at_any(EXPRESSION_START) {
            Some(Box::new(self.parse_expression(bp::DEFINED, false)))
        } else {
            if !self.scopes.can_forward(Forwarding::BLOCK) {
                self.error(DiagnosticId::ArgumentNoForwardAmpersand, operator_loc);
            }
            None
        };
        let location = expression.as_ref().map_or(operator_loc, |e| operator_loc.join(e.location));
        Node::new(location, BlockArgumentNode { expression, operator_loc })
    }

    /// `{ |params| body }`
    pub(crate) fn parse_brace_block(&mut self) -> Node {
        let opening = self.advance().location;
        self.parse_block_rest(opening, TokenKind::BraceRight)
    }

    /// `do |params| body end`
    pub(crate) fn parse_do_block(&mut self) -> Node {
        let opening = self.advance().location;
        self.parse_block_rest(opening, TokenKind::KeywordEnd)
    }

    fn parse_block_rest(&mut self, opening_loc: Location, closer: TokenKind) -> Node {
        self.scopes.push_scope(ScopeKind::Block);
        let context = self.context.without(BRACKET_RESET);
        let (parameters, body) = self.with_context(context, |p| {
            p.cursor.push_do_loop(false);
            let parameters = p.parse_block_parameters();
            let body = if closer == TokenKind::KeywordEnd {
                p.parse_body(closer)
            } else {
                p.parse_statements(TokenSet::single(closer))
            };
            p.cursor.pop_do_loop();
            (parameters, body)
        });
        let closing = self.accept(closer);
        if closing.is_none() {
            let id = if closer == TokenKind::KeywordEnd {
                DiagnosticId::BlockTermEnd
            } else {
                DiagnosticId::BlockTerm
            };
            self.error(id, self.error_location());
        }
        let closing_loc = closing.unwrap_or_else(|| Location::point(self.error_location().start));
        let scope = self.scopes.pop_scope();
        let parameters = parameters.or_else(|| implicit_parameters(scope.parameters(), opening_loc.join(closing_loc)));
        Node::new(
            opening_loc.join(closing_loc),
            BlockNode {
                locals: scope.into_locals(),
                parameters: parameters.map(Box::new),
                body,
                opening_loc,
                closing_loc,
            },
        )
    }
}

/// Parameters a block gets from using `_1` or `it` in its body.
pub(crate) fn implicit_parameters(parameters: BlockParameters, location: Location) -> Option<Node> {
    match parameters {
        BlockParameters::Numbered(maximum) => Some(Node::new(
            location,
            NumberedParametersNode {
                maximum: u32::from(maximum),
            },
        )),
        BlockParameters::It => Some(Node::new(location, ItParametersNode {})),
        BlockParameters::None | BlockParameters::Ordinary => None,
    }
}

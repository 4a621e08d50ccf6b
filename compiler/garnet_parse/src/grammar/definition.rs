//! Definitions: `def`, parameter lists, block and lambda parameters,
//! `class`, `class << x`, and `module`.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    BlockLocalVariableNode, BlockParameterNode, BlockParametersNode, CallFlags, CallNode, ClassNode,
    ClassVariableReadNode, ConstantReadNode, DefNode, FalseNode, ForwardingParameterNode, GlobalVariableReadNode,
    ImplicitRestNode, InstanceVariableReadNode, KeywordRestParameterNode, LambdaNode, LocalVariableReadNode,
    ModuleNode, MultiTargetNode, NilNode, NoKeywordsParameterNode, OptionalKeywordParameterNode,
    OptionalParameterNode, ParameterFlags, ParametersNode, RequiredKeywordParameterNode, RequiredParameterNode,
    RescueModifierNode, RestParameterNode, SelfNode, SingletonClassNode, SplatNode, TrueNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, Token, TokenKind};
use garnet_lexer::LexState;

use super::expr::{bp, implicit_parameters, BRACKET_RESET};
use super::statements_node;
use crate::recovery::{TokenSet, STATEMENT_END};
use crate::{numbered_parameter, Forwarding, ParseContext, Parser, ScopeKind};

/// Where a parameter list appears.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Site {
    Def,
    Block,
    Lambda,
}

/// The kinds of parameter in the order they must appear.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Stage {
    Required,
    Optional,
    Rest,
    Post,
    Keyword,
    KeywordRest,
    Block,
}

/// The pieces of a parameter list as they are collected.
#[derive(Default)]
struct ParameterList {
    requireds: Vec<Node>,
    optionals: Vec<Node>,
    rest: Option<Box<Node>>,
    posts: Vec<Node>,
    keywords: Vec<Node>,
    keyword_rest: Option<Box<Node>>,
    block: Option<Box<Node>>,
}

impl ParameterList {
    fn into_node(self) -> Option<Node> {
        let singles = [&self.rest, &self.keyword_rest, &self.block];
        let location = self
            .requireds
            .iter()
            .chain(&self.optionals)
            .chain(&self.posts)
            .chain(&self.keywords)
            .chain(singles.into_iter().flatten().map(|node| &**node))
            .map(|part| part.location)
            .reduce(Location::join)?;
        Some(Node::new(
            location,
            ParametersNode {
                requireds: self.requireds,
                optionals: self.optionals,
                rest: self.rest,
                posts: self.posts,
                keywords: self.keywords,
                keyword_rest: self.keyword_rest,
                block: self.block,
            },
        ))
    }
}

/// Tokens that can name a method in `def`.
fn is_def_name(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::Constant | TokenKind::MethodName | TokenKind::Backtick
    ) || kind.is_keyword()
        || kind.is_operator_method_name()
}

/// A setter name such as `foo=`, as opposed to an operator ending in `=`.
fn is_setter(token: &Token<'_>) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Constant) && token.raw.ends_with(b"=")
}

/// The name part of a `def`.
struct DefName {
    receiver: Option<Node>,
    operator_loc: Option<Location>,
    name: Name,
    name_loc: Location,
    setter: bool,
}

impl DefName {
    fn missing(receiver: Option<Node>, operator_loc: Option<Location>, at: u32) -> Self {
        DefName {
            receiver,
            operator_loc,
            name: Name::new(b""),
            name_loc: Location::point(at),
            setter: false,
        }
    }

    fn new(receiver: Option<Node>, operator_loc: Option<Location>, token: &Token<'_>) -> Self {
        DefName {
            receiver,
            operator_loc,
            name: Name::new(token.raw),
            name_loc: token.location,
            setter: is_setter(token),
        }
    }
}

fn constant_name(node: &Node) -> Option<Name> {
    match &node.kind {
        NodeKind::ConstantRead(read) => Some(read.name.clone()),
        NodeKind::ConstantPath(path) => path.name.clone(),
        _ => None,
    }
}

impl<'buf> Parser<'buf> {
    /// `def name(params) body end`, `def recv.name = value`
    pub(crate) fn parse_def(&mut self) -> Node {
        let def_keyword_loc = self.advance().location;
        let DefName {
            receiver,
            operator_loc,
            name,
            name_loc,
            setter,
        } = self.parse_def_name();

        self.scopes.push_scope(ScopeKind::Method);
        let context = ParseContext::NONE.with(ParseContext::IN_DEF);
        let (lparen_loc, parameters, rparen_loc, equal_loc, body, end_keyword_loc) = self.with_context(context, |p| {
            let (lparen_loc, parameters, rparen_loc) = if p.at(TokenKind::ParenthesisLeft)
                || p.at(TokenKind::ParenthesisLeftParentheses)
            {
                let lparen = p.advance().location;
                let parameters = p.parse_parameter_list(Site::Def, TokenSet::single(TokenKind::ParenthesisRight));
                let rparen = p.expect(TokenKind::ParenthesisRight, DiagnosticId::DefParamsTerm);
                let rparen = rparen.or_else(|| p.skip_to_closer(TokenKind::ParenthesisRight));
                (Some(lparen), parameters, rparen)
            } else if p.at_any(STATEMENT_END) || p.at(TokenKind::Equal) {
                (None, None, None)
            } else {
                let parameters = p.parse_parameter_list(Site::Def, STATEMENT_END);
                (None, parameters, None)
            };

            if p.at(TokenKind::Equal) {
                let equal = p.advance().location;
                if setter {
                    p.error(DiagnosticId::DefEndlessSetter, name_loc);
                }
                let body = p.parse_endless_body();
                return (lparen_loc, parameters, rparen_loc, Some(equal), statements_node(vec![body]), None);
            }
            let body = p.parse_body(TokenKind::KeywordEnd);
            let end = p.expect(TokenKind::KeywordEnd, DiagnosticId::DefTerm);
            (lparen_loc, parameters, rparen_loc, None, body, end)
        });
        let scope = self.scopes.pop_scope();

        let mut location = def_keyword_loc.join(name_loc);
        for end in [rparen_loc, end_keyword_loc].into_iter().flatten() {
            location = location.join(end);
        }
        for part in parameters.iter().chain(body.as_deref()) {
            location = location.join(part.location);
        }
        Node::new(
            location,
            DefNode {
                name,
                name_loc,
                receiver: receiver.map(Box::new),
                parameters: parameters.map(Box::new),
                body,
                locals: scope.into_locals(),
                def_keyword_loc,
                operator_loc,
                lparen_loc,
                rparen_loc,
                equal_loc,
                end_keyword_loc,
            },
        )
    }

    /// Body of an endless `def`: one statement, with an optional
    /// `rescue` modifier.
    fn parse_endless_body(&mut self) -> Node {
        let body = self.parse_operand(bp::NOT, true);
        if !self.at(TokenKind::KeywordRescueModifier) {
            return body;
        }
        let keyword_loc = self.advance().location;
        let rescue_expression = self.parse_operand(bp::NOT, true);
        Node::new(
            body.location.join(rescue_expression.location),
            RescueModifierNode {
                expression: Box::new(body),
                keyword_loc,
                rescue_expression: Box::new(rescue_expression),
            },
        )
    }

    /// The method name and optional singleton receiver of a `def`.
    fn parse_def_name(&mut self) -> DefName {
        let first = self.current();
        let receiver_like = matches!(
            first.kind,
            TokenKind::InstanceVariable | TokenKind::ClassVariable | TokenKind::GlobalVariable
        );
        if !is_def_name(first.kind) && !receiver_like {
            self.error(DiagnosticId::DefName, self.error_location());
            return DefName::missing(None, None, self.error_location().start);
        }
        self.advance();

        if self.at(TokenKind::Dot) || self.at(TokenKind::ColonColon) {
            let receiver = self.def_receiver(first);
            self.cursor.set_lex_state(LexState::FNAME);
            let operator = self.advance().location;
            let name = self.current();
            if !is_def_name(name.kind) {
                self.error(DiagnosticId::DefName, self.error_location());
                return DefName::missing(Some(receiver), Some(operator), operator.end);
            }
            self.advance();
            return DefName::new(Some(receiver), Some(operator), &name);
        }
        if receiver_like {
            self.error(DiagnosticId::DefName, first.location);
        }
        DefName::new(None, None, &first)
    }

    /// The receiver of `def recv.name`.
    fn def_receiver(&mut self, token: Token<'buf>) -> Node {
        let location = token.location;
        let name = Name::new(token.raw);
        match token.kind {
            TokenKind::KeywordSelf => Node::new(location, SelfNode {}),
            TokenKind::KeywordNil => Node::new(location, NilNode {}),
            TokenKind::KeywordTrue => Node::new(location, TrueNode {}),
            TokenKind::KeywordFalse => Node::new(location, FalseNode {}),
            TokenKind::Constant => Node::new(location, ConstantReadNode { name }),
            TokenKind::InstanceVariable => Node::new(location, InstanceVariableReadNode { name }),
            TokenKind::ClassVariable => Node::new(location, ClassVariableReadNode { name }),
            TokenKind::GlobalVariable => Node::new(location, GlobalVariableReadNode { name }),
            TokenKind::Identifier => match self.scopes.resolve(token.raw) {
                Some(depth) => Node::new(location, LocalVariableReadNode { name, depth }),
                None => Node::new(
                    location,
                    CallNode {
                        flags: CallFlags::VARIABLE_CALL,
                        receiver: None,
                        call_operator_loc: None,
                        name,
                        message_loc: Some(location),
                        opening_loc: None,
                        arguments: None,
                        closing_loc: None,
                        block: None,
                    },
                ),
            },
            _ => {
                self.error(DiagnosticId::SingletonForLiterals, location);
                Node::missing(location)
            }
        }
    }

    /// Declare a parameter name in the innermost scope. An underscore name
    /// may repeat; any other repeat is an error.
    fn declare_parameter(&mut self, name: &[u8], location: Location) -> ParameterFlags {
        if numbered_parameter(name).is_some() {
            self.error(DiagnosticId::NumberedParameterReserved, location);
        }
        if self.scopes.declare(name) {
            return ParameterFlags::empty();
        }
        if name.starts_with(b"_") {
            ParameterFlags::REPEATED_PARAMETER
        } else {
            self.error(DiagnosticId::ParameterNameDuplicated, location);
            ParameterFlags::empty()
        }
    }

    /// Parameters up to a token in `closers`, which is not consumed.
    /// `None` when the list is empty.
    fn parse_parameter_list(&mut self, site: Site, closers: TokenSet) -> Option<Node> {
        let mut list = ParameterList::default();
        let mut stage = Stage::Required;
        loop {
            self.skip_newlines_in_list(closers);
            if self.at_any(closers) || self.is_at_end() {
                break;
            }
            let start = self.current_location();
            let next_stage = match self.current_kind() {
                TokenKind::Identifier => {
                    let token = self.advance();
                    let flags = self.declare_parameter(token.raw, token.location);
                    let name = Name::new(token.raw);
                    if self.at(TokenKind::Equal) {
                        let operator_loc = self.advance().location;
                        let value = self.parse_operand(bp::DEFINED, false);
                        if stage > Stage::Optional {
                            self.error(DiagnosticId::ParameterOrder, token.location);
                        }
                        list.optionals.push(Node::new(
                            token.location.join(value.location),
                            OptionalParameterNode {
                                flags,
                                name,
                                name_loc: token.location,
                                operator_loc,
                                value: Box::new(value),
                            },
                        ));
                        Stage::Optional
                    } else {
                        let node = Node::new(token.location, RequiredParameterNode { flags, name });
                        self.push_positional(&mut list, stage, node)
                    }
                }
                TokenKind::ParenthesisLeft | TokenKind::ParenthesisLeftParentheses => {
                    let node = self.parse_destructured_parameter();
                    self.push_positional(&mut list, stage, node)
                }
                TokenKind::Label => {
                    let token = self.advance();
                    let raw = token.raw.strip_suffix(b":").unwrap_or(token.raw);
                    let name_loc = if raw.len() < token.raw.len() {
                        Location::new(token.location.start, token.location.end - 1)
                    } else {
                        token.location
                    };
                    let flags = self.declare_parameter(raw, name_loc);
                    let name = Name::new(raw);
                    if stage > Stage::Keyword {
                        self.error(DiagnosticId::ParameterOrder, token.location);
                    }
                    let has_value = !self.at(TokenKind::Comma)
                        && !self.at_any(closers)
                        && !self.at_any(STATEMENT_END)
                        && !self.at(TokenKind::Pipe);
                    let node = if has_value {
                        let value = self.parse_operand(bp::DEFINED, false);
                        Node::new(
                            token.location.join(value.location),
                            OptionalKeywordParameterNode {
                                flags,
                                name,
                                name_loc: token.location,
                                value: Box::new(value),
                            },
                        )
                    } else {
                        Node::new(
                            token.location,
                            RequiredKeywordParameterNode {
                                flags,
                                name,
                                name_loc: token.location,
                            },
                        )
                    };
                    list.keywords.push(node);
                    Stage::Keyword
                }
                TokenKind::UStar | TokenKind::Star => {
                    let operator_loc = self.advance().location;
                    let (name, name_loc, flags) = self.parse_optional_parameter_name(b"*", site, Forwarding::POSITIONALS);
                    if stage >= Stage::Rest {
                        self.error(DiagnosticId::ParameterOrder, operator_loc);
                    }
                    let location = name_loc.map_or(operator_loc, |loc| operator_loc.join(loc));
                    list.rest = Some(Box::new(Node::new(
                        location,
                        RestParameterNode {
                            flags,
                            name,
                            name_loc,
                            operator_loc,
                        },
                    )));
                    Stage::Rest
                }
                TokenKind::UStarStar | TokenKind::StarStar => {
                    let operator_loc = self.advance().location;
                    if stage >= Stage::KeywordRest {
                        self.error(DiagnosticId::ParameterOrder, operator_loc);
                    }
                    if let Some(keyword_loc) = self.accept(TokenKind::KeywordNil) {
                        list.keyword_rest = Some(Box::new(Node::new(
                            operator_loc.join(keyword_loc),
                            NoKeywordsParameterNode {
                                operator_loc,
                                keyword_loc,
                            },
                        )));
                    } else {
                        let (name, name_loc, flags) =
                            self.parse_optional_parameter_name(b"**", site, Forwarding::KEYWORDS);
                        let location = name_loc.map_or(operator_loc, |loc| operator_loc.join(loc));
                        list.keyword_rest = Some(Box::new(Node::new(
                            location,
                            KeywordRestParameterNode {
                                flags,
                                name,
                                name_loc,
                                operator_loc,
                            },
                        )));
                    }
                    Stage::KeywordRest
                }
                TokenKind::UAmpersand | TokenKind::Ampersand => {
                    let operator_loc = self.advance().location;
                    if stage >= Stage::Block {
                        self.error(DiagnosticId::ParameterOrder, operator_loc);
                    }
                    let (name, name_loc, flags) = self.parse_optional_parameter_name(b"&", site, Forwarding::BLOCK);
                    let location = name_loc.map_or(operator_loc, |loc| operator_loc.join(loc));
                    list.block = Some(Box::new(Node::new(
                        location,
                        BlockParameterNode {
                            flags,
                            name,
                            name_loc,
                            operator_loc,
                        },
                    )));
                    Stage::Block
                }
                TokenKind::UDotDotDot | TokenKind::DotDotDot => {
                    let location = self.advance().location;
                    if site == Site::Def {
                        self.scopes.declare(b"...");
                        self.scopes.add_forwarding(Forwarding::ALL);
                    } else {
                        self.error(DiagnosticId::ArgumentNoForwardEllipses, location);
                    }
                    if stage >= Stage::KeywordRest {
                        self.error(DiagnosticId::ParameterOrder, location);
                    }
                    list.keyword_rest = Some(Box::new(Node::new(location, ForwardingParameterNode {})));
                    Stage::Block
                }
                TokenKind::Constant
                | TokenKind::InstanceVariable
                | TokenKind::ClassVariable
                | TokenKind::GlobalVariable => {
                    self.error(DiagnosticId::ParameterName, start);
                    self.advance();
                    stage
                }
                _ => {
                    self.error_unexpected(DiagnosticId::UnexpectedToken);
                    break;
                }
            };
            stage = stage.max(next_stage);

            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
            if site == Site::Block && self.at(TokenKind::Pipe) {
                // `|a,|` takes the first element only.
                let at = self.previous_location();
                if list.rest.is_none() {
                    list.rest = Some(Box::new(Node::new(at, ImplicitRestNode {})));
                }
                break;
            }
        }
        list.into_node()
    }

    fn skip_newlines_in_list(&mut self, closers: TokenSet) {
        if !closers.contains(TokenKind::Newline) {
            self.skip_newlines();
        }
    }

    /// A required positional goes before or after the optionals and rest.
    fn push_positional(&mut self, list: &mut ParameterList, stage: Stage, node: Node) -> Stage {
        match stage {
            Stage::Required => {
                list.requireds.push(node);
                Stage::Required
            }
            Stage::Optional | Stage::Rest | Stage::Post => {
                list.posts.push(node);
                Stage::Post
            }
            Stage::Keyword | Stage::KeywordRest | Stage::Block => {
                self.error(DiagnosticId::ParameterOrder, node.location);
                list.posts.push(node);
                stage
            }
        }
    }

    /// The name after `*`, `**`, or `&`. An anonymous one is declared
    /// under the operator itself and, in a method, may be forwarded.
    fn parse_optional_parameter_name(
        &mut self,
        anonymous: &[u8],
        site: Site,
        forwarding: Forwarding,
    ) -> (Option<Name>, Option<Location>, ParameterFlags) {
        if self.at(TokenKind::Identifier) {
            let token = self.advance();
            let flags = self.declare_parameter(token.raw, token.location);
            return (Some(Name::new(token.raw)), Some(token.location), flags);
        }
        if site == Site::Def {
            self.scopes.declare(anonymous);
            self.scopes.add_forwarding(forwarding);
        }
        (None, None, ParameterFlags::empty())
    }

    /// `(a, (b, *c), d)` in a parameter list.
    fn parse_destructured_parameter(&mut self) -> Node {
        let lparen_loc = self.advance().location;
        let mut lefts = Vec::new();
        let mut rest: Option<Box<Node>> = None;
        let mut rights = Vec::new();
        loop {
            let node = match self.current_kind() {
                TokenKind::Identifier => {
                    let token = self.advance();
                    let flags = self.declare_parameter(token.raw, token.location);
                    Node::new(
                        token.location,
                        RequiredParameterNode {
                            flags,
                            name: Name::new(token.raw),
                        },
                    )
                }
                TokenKind::ParenthesisLeft | TokenKind::ParenthesisLeftParentheses => {
                    self.parse_destructured_parameter()
                }
                TokenKind::UStar | TokenKind::Star => {
                    let operator_loc = self.advance().location;
                    let expression = if self.at(TokenKind::Identifier) {
                        let token = self.advance();
                        let flags = self.declare_parameter(token.raw, token.location);
                        Some(Box::new(Node::new(
                            token.location,
                            RequiredParameterNode {
                                flags,
                                name: Name::new(token.raw),
                            },
                        )))
                    } else {
                        None
                    };
                    let location = expression.as_ref().map_or(operator_loc, |e| operator_loc.join(e.location));
                    let splat = Node::new(location, SplatNode { operator_loc, expression });
                    if rest.is_some() {
                        self.error(DiagnosticId::MultiAssignMultiSplats, location);
                        rights.push(splat);
                    } else {
                        rest = Some(Box::new(splat));
                    }
                    if self.accept(TokenKind::Comma).is_none() {
                        break;
                    }
                    continue;
                }
                _ => {
                    self.error(DiagnosticId::ParameterName, self.error_location());
                    break;
                }
            };
            if rest.is_some() {
                rights.push(node);
            } else {
                lefts.push(node);
            }
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
            if self.at(TokenKind::ParenthesisRight) && rest.is_none() {
                rest = Some(Box::new(Node::new(self.previous_location(), ImplicitRestNode {})));
                break;
            }
        }
        let rparen_loc = self.expect(TokenKind::ParenthesisRight, DiagnosticId::ExpectRparen);
        let end = rparen_loc.unwrap_or_else(|| self.previous_location());
        Node::new(
            lparen_loc.join(end),
            MultiTargetNode {
                lefts,
                rest,
                rights,
                lparen_loc: Some(lparen_loc),
                rparen_loc,
            },
        )
    }

    /// `; a, b` block-local variables.
    fn parse_block_locals(&mut self) -> Vec<Node> {
        let mut locals = Vec::new();
        if self.accept(TokenKind::Semicolon).is_none() {
            return locals;
        }
        loop {
            if !self.at(TokenKind::Identifier) {
                self.error(DiagnosticId::ParameterName, self.error_location());
                break;
            }
            let token = self.advance();
            let flags = self.declare_parameter(token.raw, token.location);
            locals.push(Node::new(
                token.location,
                BlockLocalVariableNode {
                    flags,
                    name: Name::new(token.raw),
                },
            ));
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
        }
        locals
    }

    /// `|a, b = 1, *c; d|` at the start of a block. `None` when the block
    /// declares nothing, so `_1` and `it` stay available.
    pub(crate) fn parse_block_parameters(&mut self) -> Option<Node> {
        if self.at(TokenKind::PipePipe) {
            let location = self.advance().location;
            self.scopes.set_ordinary_parameters();
            let opening = Location::new(location.start, location.start + 1);
            let closing = Location::new(location.end - 1, location.end);
            return Some(Node::new(
                location,
                BlockParametersNode {
                    parameters: None,
                    locals: Vec::new(),
                    opening_loc: Some(opening),
                    closing_loc: Some(closing),
                },
            ));
        }
        if !self.at(TokenKind::Pipe) {
            return None;
        }
        let opening_loc = self.advance().location;
        self.scopes.set_ordinary_parameters();
        let closers = TokenSet::new().with(TokenKind::Pipe).with(TokenKind::Semicolon);
        let context = self.context.with(ParseContext::PIPE_IS_SEPARATOR);
        let (parameters, locals) = self.with_context(context, |p| {
            let parameters = p.parse_parameter_list(Site::Block, closers);
            (parameters, p.parse_block_locals())
        });
        let closing_loc = self.expect(TokenKind::Pipe, DiagnosticId::BlockParamPipeTerm);
        let end = closing_loc.unwrap_or_else(|| self.previous_location());
        Some(Node::new(
            opening_loc.join(end),
            BlockParametersNode {
                parameters: parameters.map(Box::new),
                locals,
                opening_loc: Some(opening_loc),
                closing_loc,
            },
        ))
    }

    /// `->(a; b)` or `-> a, b` before a lambda body.
    fn parse_lambda_parameters(&mut self) -> Option<Node> {
        if self.at(TokenKind::ParenthesisLeft) || self.at(TokenKind::ParenthesisLeftParentheses) {
            let opening_loc = self.advance().location;
            self.scopes.set_ordinary_parameters();
            let closers = TokenSet::new().with(TokenKind::ParenthesisRight).with(TokenKind::Semicolon);
            let parameters = self.parse_parameter_list(Site::Lambda, closers);
            let locals = self.parse_block_locals();
            let closing_loc = self.expect(TokenKind::ParenthesisRight, DiagnosticId::ExpectRparen);
            let end = closing_loc.unwrap_or_else(|| self.previous_location());
            return Some(Node::new(
                opening_loc.join(end),
                BlockParametersNode {
                    parameters: parameters.map(Box::new),
                    locals,
                    opening_loc: Some(opening_loc),
                    closing_loc,
                },
            ));
        }
        if self.at(TokenKind::LambdaBegin) || self.at(TokenKind::KeywordDo) {
            return None;
        }
        self.scopes.set_ordinary_parameters();
        let closers = TokenSet::new().with(TokenKind::LambdaBegin).with(TokenKind::KeywordDo);
        let parameters = self.parse_parameter_list(Site::Lambda, closers)?;
        Some(Node::new(
            parameters.location,
            BlockParametersNode {
                parameters: Some(Box::new(parameters)),
                locals: Vec::new(),
                opening_loc: None,
                closing_loc: None,
            },
        ))
    }

    /// `->(params) { body }`, `-> do body end`
    pub(crate) fn parse_lambda(&mut self) -> Node {
        let operator_loc = self.advance().location;
        self.scopes.push_scope(ScopeKind::Block);
        let parameters = self.parse_lambda_parameters();
        let context = self.context.without(BRACKET_RESET);
        let (opening_loc, body, closing_loc) = self.with_context(context, |p| {
            if p.at(TokenKind::LambdaBegin) {
                let opening = p.advance().location;
                let body = p.parse_statements(TokenSet::single(TokenKind::BraceRight));
                let closing = p.expect(TokenKind::BraceRight, DiagnosticId::LambdaTerm);
                (opening, body, closing)
            } else if p.at(TokenKind::KeywordDo) {
                let opening = p.advance().location;
                p.cursor.push_do_loop(false);
                let body = p.parse_body(TokenKind::KeywordEnd);
                p.cursor.pop_do_loop();
                let closing = p.expect(TokenKind::KeywordEnd, DiagnosticId::LambdaTermEnd);
                (opening, body, closing)
            } else {
                p.error(DiagnosticId::LambdaOpen, p.error_location());
                let missing = Location::point(p.error_location().start);
                (missing, None, Some(missing))
            }
        });
        let closing_loc = closing_loc.unwrap_or_else(|| Location::point(self.previous_location().end));
        let scope = self.scopes.pop_scope();
        let location = operator_loc.join(closing_loc);
        let parameters = parameters.or_else(|| implicit_parameters(scope.parameters(), location));
        Node::new(
            location,
            LambdaNode {
                locals: scope.into_locals(),
                operator_loc,
                opening_loc,
                closing_loc,
                parameters: parameters.map(Box::new),
                body,
            },
        )
    }

    /// `class Name < Super ... end` or `class << expr ... end`
    pub(crate) fn parse_class(&mut self) -> Node {
        let class_keyword_loc = self.advance().location;
        if self.at(TokenKind::LessLess) {
            return self.parse_singleton_class(class_keyword_loc);
        }
        if self.scopes.in_method() {
            self.error(DiagnosticId::ClassInMethod, class_keyword_loc);
        }
        let (constant_path, name) = self.parse_definition_name(DiagnosticId::ClassName);
        let (inheritance_operator_loc, superclass) = match self.accept(TokenKind::Less) {
            Some(operator) => (Some(operator), Some(Box::new(self.parse_operand(bp::NOT, false)))),
            None => (None, None),
        };
        let (body, locals, end) = self.parse_definition_body(DiagnosticId::ClassTerm);
        let end_keyword_loc = end.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            class_keyword_loc.join(end_keyword_loc),
            ClassNode {
                locals,
                class_keyword_loc,
                constant_path: Box::new(constant_path),
                inheritance_operator_loc,
                superclass,
                body,
                end_keyword_loc,
                name,
            },
        )
    }

    fn parse_singleton_class(&mut self, class_keyword_loc: Location) -> Node {
        let operator_loc = self.advance().location;
        let expression = self.parse_operand(bp::NOT, false);
        let (body, locals, end) = self.parse_definition_body(DiagnosticId::SingletonClassTerm);
        let end_keyword_loc = end.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            class_keyword_loc.join(end_keyword_loc),
            SingletonClassNode {
                locals,
                class_keyword_loc,
                operator_loc,
                expression: Box::new(expression),
                body,
                end_keyword_loc,
            },
        )
    }

    /// `module Name ... end`
    pub(crate) fn parse_module(&mut self) -> Node {
        let module_keyword_loc = self.advance().location;
        if self.scopes.in_method() {
            self.error(DiagnosticId::ModuleInMethod, module_keyword_loc);
        }
        let (constant_path, name) = self.parse_definition_name(DiagnosticId::ModuleName);
        let (body, locals, end) = self.parse_definition_body(DiagnosticId::ModuleTerm);
        let end_keyword_loc = end.unwrap_or_else(|| Location::point(self.previous_location().end));
        Node::new(
            module_keyword_loc.join(end_keyword_loc),
            ModuleNode {
                locals,
                module_keyword_loc,
                constant_path: Box::new(constant_path),
                body,
                end_keyword_loc,
                name,
            },
        )
    }

    /// The constant path naming a class or module.
    fn parse_definition_name(&mut self, id: DiagnosticId) -> (Node, Name) {
        if !self.at(TokenKind::Constant) && !self.at(TokenKind::UColonColon) && !self.at(TokenKind::Identifier) {
            self.error(id, self.error_location());
            return (self.missing(), Name::new(b""));
        }
        let path = self.parse_expression(bp::INDEX, false);
        match constant_name(&path) {
            Some(name) => (path, name),
            None => {
                self.error(id, path.location);
                (path, Name::new(b""))
            }
        }
    }

    /// Body of a class, module, or singleton class in a fresh scope.
    fn parse_definition_body(&mut self, id: DiagnosticId) -> (Option<Box<Node>>, Vec<Name>, Option<Location>) {
        self.scopes.push_scope(ScopeKind::Class);
        let (body, end) = self.with_context(ParseContext::NONE, |p| {
            let body = p.parse_body(TokenKind::KeywordEnd);
            (body, p.expect(TokenKind::KeywordEnd, id))
        });
        let scope = self.scopes.pop_scope();
        (body, scope.into_locals(), end)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Required < Stage::Optional);
        assert!(Stage::Post < Stage::Keyword);
        assert!(Stage::KeywordRest < Stage::Block);
    }

    #[test]
    fn test_setter_tokens() {
        let setter = Token::new(TokenKind::Identifier, Location::new(4, 8), b"foo=");
        assert!(is_setter(&setter));
        let operator = Token::new(TokenKind::EqualEqual, Location::new(4, 6), b"==");
        assert!(!is_setter(&operator));
    }

    #[test]
    fn test_empty_parameter_list_has_no_node() {
        assert!(ParameterList::default().into_node().is_none());
    }

    #[test]
    fn test_parameter_list_spans_its_parts() {
        let list = ParameterList {
            requireds: vec![Node::new(
                Location::new(8, 9),
                RequiredParameterNode {
                    flags: ParameterFlags::empty(),
                    name: Name::from("a"),
                },
            )],
            block: Some(Box::new(Node::new(
                Location::new(11, 13),
                BlockParameterNode {
                    flags: ParameterFlags::empty(),
                    name: Some(Name::from("b")),
                    name_loc: Some(Location::new(12, 13)),
                    operator_loc: Location::new(11, 12),
                },
            ))),
            ..ParameterList::default()
        };
        let node = list.into_node().unwrap();
        assert_eq!(node.location, Location::new(8, 13));
    }
}

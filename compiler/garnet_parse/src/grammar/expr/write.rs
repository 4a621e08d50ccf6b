//! Assignment: simple, compound, and multiple writes, and the targets
//! they write to.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    ArgumentsFlags, ArgumentsNode, ArrayFlags, ArrayNode, CallAndWriteNode, CallFlags, CallNode,
    CallOperatorWriteNode, CallOrWriteNode, CallTargetNode, ClassVariableAndWriteNode,
    ClassVariableOperatorWriteNode, ClassVariableOrWriteNode, ClassVariableTargetNode, ClassVariableWriteNode,
    ConstantAndWriteNode, ConstantOperatorWriteNode, ConstantOrWriteNode, ConstantPathAndWriteNode,
    ConstantPathOperatorWriteNode, ConstantPathOrWriteNode, ConstantPathTargetNode, ConstantPathWriteNode,
    ConstantTargetNode, ConstantWriteNode, ErrorRecoveryNode, GlobalVariableAndWriteNode,
    GlobalVariableOperatorWriteNode, GlobalVariableOrWriteNode, GlobalVariableTargetNode, GlobalVariableWriteNode,
    ImplicitRestNode, IndexAndWriteNode, IndexOperatorWriteNode, IndexOrWriteNode, IndexTargetNode,
    InstanceVariableAndWriteNode, InstanceVariableOperatorWriteNode, InstanceVariableOrWriteNode,
    InstanceVariableTargetNode, InstanceVariableWriteNode, LocalVariableAndWriteNode,
    LocalVariableOperatorWriteNode, LocalVariableOrWriteNode, LocalVariableTargetNode, LocalVariableWriteNode,
    MatchWriteNode, MultiTargetNode, MultiWriteNode, RescueModifierNode, SplatNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, TokenKind};

use super::bp;
use crate::recovery::EXPRESSION_START;
use crate::Parser;

/// Which compound assignment an operator token spells.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Compound {
    /// `&&=`
    And,
    /// `||=`
    Or,
    /// `+=` and the other binary operators.
    Operator,
}

/// A call written as `recv.name` with nothing else: the shape an
/// attribute write needs.
fn is_attribute(call: &CallNode) -> bool {
    call.receiver.is_some()
        && call.arguments.is_none()
        && call.block.is_none()
        && call.opening_loc.is_none()
        && call.message_loc.is_some()
        && call.name.as_bytes().first().is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_' || *b >= 0x80)
        && !call.name.as_bytes().ends_with(b"?")
        && !call.name.as_bytes().ends_with(b"!")
}

/// `recv[args]`
fn is_index(call: &CallNode) -> bool {
    call.receiver.is_some() && call.name.as_bytes() == b"[]" && call.opening_loc.is_some() && call.call_operator_loc.is_none()
}

/// A bare identifier call with no receiver or arguments.
fn is_variable_call(call: &CallNode) -> bool {
    call.flags.contains(CallFlags::VARIABLE_CALL)
}

fn setter_name(name: &Name) -> Name {
    let mut bytes = name.as_bytes().to_vec();
    bytes.push(b'=');
    Name::new(&bytes)
}

/// Start of the value half of a write: a value or the implicit array of
/// `a = *b` and `a = 1, 2`.
fn value_location(nodes: &[Node]) -> Location {
    let first = nodes.first().map_or(Location::point(0), |n| n.location);
    let last = nodes.last().map_or(first, |n| n.location);
    first.join(last)
}

impl Parser<'_> {
    /// `target = value`; the current token is `=`.
    pub(crate) fn parse_assignment(&mut self, target: Node, min_bp: u8, command: bool) -> Node {
        let operator_loc = self.advance().location;
        let statement_level = min_bp <= bp::STATEMENT;
        let multiple = matches!(target.kind, NodeKind::MultiTarget(_));
        let value = self.parse_assignment_value(statement_level || multiple, command);
        self.write(target, operator_loc, value)
    }

    /// Right-hand side of `=`. With `list`, `a, b` and `*a` build an
    /// implicit array; `rescue` always binds to the value.
    fn parse_assignment_value(&mut self, list: bool, command: bool) -> Node {
        let first = if self.at(TokenKind::UStar) {
            self.parse_splat(bp::DEFINED)
        } else {
            self.skip_newlines();
            self.parse_operand(bp::ASSIGNMENT, command)
        };
        let splat = matches!(first.kind, NodeKind::Splat(_));
        if !splat && !(list && self.at(TokenKind::Comma)) {
            return self.with_value_rescue(first);
        }

        let mut elements = vec![first];
        while list && self.accept(TokenKind::Comma).is_some() {
            self.skip_newlines();
            let element = if self.at(TokenKind::UStar) {
                self.parse_splat(bp::DEFINED)
            } else {
                self.parse_operand(bp::DEFINED, false)
            };
            elements.push(element);
        }
        let flags = if elements.iter().any(|e| matches!(e.kind, NodeKind::Splat(_))) {
            ArrayFlags::CONTAINS_SPLAT
        } else {
            ArrayFlags::empty()
        };
        let array = Node::new(
            value_location(&elements),
            ArrayNode {
                flags,
                elements,
                opening_loc: None,
                closing_loc: None,
            },
        );
        self.with_value_rescue(array)
    }

    /// `value rescue fallback` on the right of a write binds to the value.
    fn with_value_rescue(&mut self, value: Node) -> Node {
        if self.at(TokenKind::KeywordRescueModifier) {
            self.parse_value_rescue(value)
        } else {
            value
        }
    }

    fn parse_value_rescue(&mut self, expression: Node) -> Node {
        let keyword_loc = self.advance().location;
        let rescue_expression = self.parse_operand(bp::ASSIGNMENT, false);
        Node::new(
            expression.location.join(rescue_expression.location),
            RescueModifierNode {
                expression: Box::new(expression),
                keyword_loc,
                rescue_expression: Box::new(rescue_expression),
            },
        )
    }

    /// Build the write node for `target = value`.
    fn write(&mut self, target: Node, operator_loc: Location, value: Node) -> Node {
        let location = target.location.join(value.location);
        let name_loc = target.location;
        let value = Box::new(value);
        match target.kind {
            NodeKind::LocalVariableRead(read) => Node::new(
                location,
                LocalVariableWriteNode {
                    name: read.name,
                    depth: read.depth,
                    name_loc,
                    value,
                    operator_loc,
                },
            ),
            NodeKind::ItLocalVariableRead(_) => {
                self.scopes.declare(b"it");
                Node::new(
                    location,
                    LocalVariableWriteNode {
                        name: Name::new(b"it"),
                        depth: 0,
                        name_loc,
                        value,
                        operator_loc,
                    },
                )
            }
            NodeKind::Call(call) if is_variable_call(&call) => {
                self.declare_local(&call.name, name_loc);
                Node::new(
                    location,
                    LocalVariableWriteNode {
                        name: call.name,
                        depth: 0,
                        name_loc,
                        value,
                        operator_loc,
                    },
                )
            }
            NodeKind::InstanceVariableRead(read) => Node::new(
                location,
                InstanceVariableWriteNode {
                    name: read.name,
                    name_loc,
                    value,
                    operator_loc,
                },
            ),
            NodeKind::ClassVariableRead(read) => Node::new(
                location,
                ClassVariableWriteNode {
                    name: read.name,
                    name_loc,
                    value,
                    operator_loc,
                },
            ),
            NodeKind::GlobalVariableRead(read) => Node::new(
                location,
                GlobalVariableWriteNode {
                    name: read.name,
                    name_loc,
                    value,
                    operator_loc,
                },
            ),
            NodeKind::ConstantRead(read) => {
                self.check_constant_write(name_loc);
                Node::new(
                    location,
                    ConstantWriteNode {
                        name: read.name,
                        name_loc,
                        value,
                        operator_loc,
                    },
                )
            }
            NodeKind::ConstantPath(path) => {
                self.check_constant_write(name_loc);
                Node::new(
                    location,
                    ConstantPathWriteNode {
                        target: Box::new(Node::new(name_loc, path)),
                        operator_loc,
                        value,
                    },
                )
            }
            NodeKind::Call(mut call) if is_attribute(&call) || is_index(&call) => {
                let mut arguments = call.arguments.take().map_or_else(Vec::new, |a| match a.kind {
                    NodeKind::Arguments(arguments) => arguments.arguments,
                    _ => vec![*a],
                });
                arguments.push(*value);
                call.name = setter_name(&call.name);
                call.flags |= CallFlags::ATTRIBUTE_WRITE;
                call.arguments = Some(Box::new(Node::new(
                    value_location(&arguments),
                    ArgumentsNode {
                        flags: ArgumentsFlags::empty(),
                        arguments,
                    },
                )));
                Node::new(location, call)
            }
            NodeKind::MultiTarget(multi) => Node::new(
                location,
                MultiWriteNode {
                    lefts: multi.lefts,
                    rest: multi.rest,
                    rights: multi.rights,
                    lparen_loc: multi.lparen_loc,
                    rparen_loc: multi.rparen_loc,
                    operator_loc,
                    value,
                },
            ),
            NodeKind::Splat(splat) => {
                let multi = MultiTargetNode {
                    lefts: Vec::new(),
                    rest: Some(Box::new(self.splat_to_target(Node::new(name_loc, splat)))),
                    rights: Vec::new(),
                    lparen_loc: None,
                    rparen_loc: None,
                };
                self.write(Node::new(name_loc, multi), operator_loc, *value)
            }
            NodeKind::Missing(_) => Node::new(location, ErrorRecoveryNode { child: Some(value) }),
            kind => {
                self.error(DiagnosticId::WriteTarget, name_loc);
                Node::new(
                    location,
                    ErrorRecoveryNode {
                        child: Some(Box::new(Node { location: name_loc, kind })),
                    },
                )
            }
        }
    }

    /// `target op= value`; the current token is the operator.
    pub(crate) fn parse_operator_assignment(&mut self, target: Node, command: bool) -> Node {
        let operator = self.advance();
        let compound = match operator.kind {
            TokenKind::AmpersandAmpersandEqual => Compound::And,
            TokenKind::PipePipeEqual => Compound::Or,
            _ => Compound::Operator,
        };
        let binary_operator = Name::new(operator.raw.strip_suffix(b"=").unwrap_or(operator.raw));
        self.skip_newlines();
        let value = if self.at_any(EXPRESSION_START) {
            let value = self.parse_expression(bp::ASSIGNMENT, command);
            self.with_value_rescue(value)
        } else {
            self.error(DiagnosticId::OperatorWriteValue, self.error_location());
            self.missing()
        };
        self.compound_write(target, compound, operator.location, binary_operator, value)
    }

    fn compound_write(&mut self, target: Node, compound: Compound, operator_loc: Location, binary_operator: Name, value: Node) -> Node {
        let location = target.location.join(value.location);
        let name_loc = target.location;
        let value = Box::new(value);

        // Locals share one shape whichever way they were spelled.
        let local = match &target.kind {
            NodeKind::LocalVariableRead(read) => Some((read.name.clone(), read.depth)),
            NodeKind::Call(call) if is_variable_call(call) => {
                self.declare_local(&call.name, name_loc);
                Some((call.name.clone(), 0))
            }
            _ => None,
        };
        if let Some((name, depth)) = local {
            return match compound {
                Compound::And => Node::new(location, LocalVariableAndWriteNode { name_loc, operator_loc, value, name, depth }),
                Compound::Or => Node::new(location, LocalVariableOrWriteNode { name_loc, operator_loc, value, name, depth }),
                Compound::Operator => Node::new(
                    location,
                    LocalVariableOperatorWriteNode {
                        name_loc,
                        binary_operator_loc: operator_loc,
                        value,
                        name,
                        binary_operator,
                        depth,
                    },
                ),
            };
        }

        macro_rules! named {
            ($name:expr, $and:ident, $or:ident, $op:ident) => {
                match compound {
                    Compound::And => Node::new(location, $and { name: $name, name_loc, operator_loc, value }),
                    Compound::Or => Node::new(location, $or { name: $name, name_loc, operator_loc, value }),
                    Compound::Operator => Node::new(
                        location,
                        $op {
                            name: $name,
                            name_loc,
                            binary_operator_loc: operator_loc,
                            value,
                            binary_operator,
                        },
                    ),
                }
            };
        }

        match target.kind {
            NodeKind::InstanceVariableRead(read) => named!(
                read.name,
                InstanceVariableAndWriteNode,
                InstanceVariableOrWriteNode,
                InstanceVariableOperatorWriteNode
            ),
            NodeKind::ClassVariableRead(read) => named!(
                read.name,
                ClassVariableAndWriteNode,
                ClassVariableOrWriteNode,
                ClassVariableOperatorWriteNode
            ),
            NodeKind::GlobalVariableRead(read) => named!(
                read.name,
                GlobalVariableAndWriteNode,
                GlobalVariableOrWriteNode,
                GlobalVariableOperatorWriteNode
            ),
            NodeKind::ConstantRead(read) => {
                self.check_constant_write(name_loc);
                named!(read.name, ConstantAndWriteNode, ConstantOrWriteNode, ConstantOperatorWriteNode)
            }
            NodeKind::ConstantPath(path) => {
                self.check_constant_write(name_loc);
                let target = Box::new(Node::new(name_loc, path));
                match compound {
                    Compound::And => Node::new(location, ConstantPathAndWriteNode { target, operator_loc, value }),
                    Compound::Or => Node::new(location, ConstantPathOrWriteNode { target, operator_loc, value }),
                    Compound::Operator => Node::new(
                        location,
                        ConstantPathOperatorWriteNode {
                            target,
                            binary_operator_loc: operator_loc,
                            value,
                            binary_operator,
                        },
                    ),
                }
            }
            NodeKind::Call(call) if is_index(&call) => {
                let opening_loc = call.opening_loc.unwrap_or(name_loc);
                let closing_loc = call.closing_loc.unwrap_or(name_loc);
                match compound {
                    Compound::And => Node::new(
                        location,
                        IndexAndWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            opening_loc,
                            arguments: call.arguments,
                            closing_loc,
                            block: call.block,
                            operator_loc,
                            value,
                        },
                    ),
                    Compound::Or => Node::new(
                        location,
                        IndexOrWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            opening_loc,
                            arguments: call.arguments,
                            closing_loc,
                            block: call.block,
                            operator_loc,
                            value,
                        },
                    ),
                    Compound::Operator => Node::new(
                        location,
                        IndexOperatorWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            opening_loc,
                            arguments: call.arguments,
                            closing_loc,
                            block: call.block,
                            binary_operator,
                            binary_operator_loc: operator_loc,
                            value,
                        },
                    ),
                }
            }
            NodeKind::Call(call) if is_attribute(&call) => {
                let write_name = setter_name(&call.name);
                let read_name = call.name;
                match compound {
                    Compound::And => Node::new(
                        location,
                        CallAndWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            message_loc: call.message_loc,
                            read_name,
                            write_name,
                            operator_loc,
                            value,
                        },
                    ),
                    Compound::Or => Node::new(
                        location,
                        CallOrWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            message_loc: call.message_loc,
                            read_name,
                            write_name,
                            operator_loc,
                            value,
                        },
                    ),
                    Compound::Operator => Node::new(
                        location,
                        CallOperatorWriteNode {
                            flags: call.flags,
                            receiver: call.receiver,
                            call_operator_loc: call.call_operator_loc,
                            message_loc: call.message_loc,
                            read_name,
                            write_name,
                            binary_operator,
                            binary_operator_loc: operator_loc,
                            value,
                        },
                    ),
                }
            }
            kind => {
                self.error(DiagnosticId::WriteTarget, name_loc);
                Node::new(
                    location,
                    ErrorRecoveryNode {
                        child: Some(Box::new(Node { location: name_loc, kind })),
                    },
                )
            }
        }
    }

    /// Declare a local named by an assignment.
    fn declare_local(&mut self, name: &Name, location: Location) {
        if name.as_bytes().first().is_some_and(u8::is_ascii_uppercase) || name.as_bytes().ends_with(b"?") || name.as_bytes().ends_with(b"!") {
            self.error(DiagnosticId::WriteTarget, location);
            return;
        }
        self.scopes.declare(name.as_bytes());
    }

    /// Constants cannot be assigned inside a method body.
    fn check_constant_write(&mut self, location: Location) {
        if self.scopes.in_method() {
            self.error(DiagnosticId::DynamicConstantAssign, location);
        }
    }

    /// Whether `node` can start the target list of a multiple assignment.
    pub(crate) fn is_multi_write_start(node: &Node) -> bool {
        match &node.kind {
            NodeKind::LocalVariableRead(_)
            | NodeKind::ItLocalVariableRead(_)
            | NodeKind::InstanceVariableRead(_)
            | NodeKind::ClassVariableRead(_)
            | NodeKind::GlobalVariableRead(_)
            | NodeKind::ConstantRead(_)
            | NodeKind::ConstantPath(_)
            | NodeKind::MultiTarget(_)
            | NodeKind::Splat(_) => true,
            NodeKind::Call(call) => is_variable_call(call) || is_attribute(call) || is_index(call),
            _ => false,
        }
    }

    /// `a, *b, c = value` at statement level, `first` already parsed.
    pub(crate) fn parse_multi_write(&mut self, first: Option<Node>) -> Node {
        let targets = self.parse_target_list(first);
        if self.at(TokenKind::Equal) {
            return self.parse_assignment(targets, bp::STATEMENT, true);
        }
        self.error_unexpected(DiagnosticId::UnexpectedToken);
        targets
    }

    /// A comma-separated target list, without parentheses.
    pub(crate) fn parse_target_list(&mut self, first: Option<Node>) -> Node {
        let mut lefts = Vec::new();
        let mut rest: Option<Box<Node>> = None;
        let mut rights = Vec::new();
        let mut pending = first;

        loop {
            let element = match pending.take() {
                Some(node) => node,
                None if self.at(TokenKind::UStar) => self.parse_splat_target(),
                None if self.at_any(EXPRESSION_START) => self.parse_prefix(false),
                None => {
                    self.error_unexpected(DiagnosticId::ExpectExpression);
                    break;
                }
            };
            let element = if matches!(element.kind, NodeKind::Splat(_)) {
                self.splat_to_target(element)
            } else {
                self.to_target(element)
            };
            if matches!(element.kind, NodeKind::Splat(_)) {
                if rest.is_some() {
                    self.error(DiagnosticId::MultiAssignMultiSplats, element.location);
                    rights.push(element);
                } else {
                    rest = Some(Box::new(element));
                }
            } else if rest.is_some() {
                rights.push(element);
            } else {
                lefts.push(element);
            }

            let Some(comma) = self.accept(TokenKind::Comma) else {
                break;
            };
            if !self.at(TokenKind::UStar) && !self.at_any(EXPRESSION_START) {
                // `a, = value`
                if rest.is_none() {
                    rest = Some(Box::new(Node::new(comma, ImplicitRestNode {})));
                }
                break;
            }
        }

        let mut location = Location::point(self.current_location().start);
        let mut first_seen = false;
        for node in lefts.iter().chain(rest.as_deref()).chain(rights.iter()) {
            location = if first_seen { location.join(node.location) } else { node.location };
            first_seen = true;
        }
        Node::new(
            location,
            MultiTargetNode {
                lefts,
                rest,
                rights,
                lparen_loc: None,
                rparen_loc: None,
            },
        )
    }

    /// `*name` or a bare `*` in a target list, not yet converted to a target.
    fn parse_splat_target(&mut self) -> Node {
        let operator_loc = self.advance().location;
        let expression = self.at_any(EXPRESSION_START).then(|| Box::new(self.parse_prefix(false)));
        let location = expression.as_ref().map_or(operator_loc, |e| operator_loc.join(e.location));
        Node::new(location, SplatNode { operator_loc, expression })
    }

    fn splat_to_target(&mut self, node: Node) -> Node {
        match node.kind {
            NodeKind::Splat(mut splat) => {
                splat.expression = splat.expression.map(|e| Box::new(self.to_target(*e)));
                Node::new(node.location, splat)
            }
            kind => Node { location: node.location, kind },
        }
    }

    /// Convert an expression to the target node that writes it, declaring
    /// locals as needed.
    pub(crate) fn to_target(&mut self, node: Node) -> Node {
        let location = node.location;
        match node.kind {
            NodeKind::LocalVariableRead(read) => Node::new(location, LocalVariableTargetNode { name: read.name, depth: read.depth }),
            NodeKind::ItLocalVariableRead(_) => {
                self.scopes.declare(b"it");
                Node::new(location, LocalVariableTargetNode { name: Name::new(b"it"), depth: 0 })
            }
            NodeKind::Call(call) if is_variable_call(&call) => {
                self.declare_local(&call.name, location);
                Node::new(location, LocalVariableTargetNode { name: call.name, depth: 0 })
            }
            NodeKind::InstanceVariableRead(read) => Node::new(location, InstanceVariableTargetNode { name: read.name }),
            NodeKind::ClassVariableRead(read) => Node::new(location, ClassVariableTargetNode { name: read.name }),
            NodeKind::GlobalVariableRead(read) => Node::new(location, GlobalVariableTargetNode { name: read.name }),
            NodeKind::ConstantRead(read) => {
                self.check_constant_write(location);
                Node::new(location, ConstantTargetNode { name: read.name })
            }
            NodeKind::ConstantPath(path) => {
                self.check_constant_write(location);
                Node::new(
                    location,
                    ConstantPathTargetNode {
                        parent: path.parent,
                        name: path.name,
                        delimiter_loc: path.delimiter_loc,
                        name_loc: path.name_loc,
                    },
                )
            }
            NodeKind::Call(call) if is_index(&call) => Node::new(
                location,
                IndexTargetNode {
                    flags: call.flags | CallFlags::ATTRIBUTE_WRITE,
                    receiver: call.receiver.unwrap_or_else(|| Box::new(Node::missing(location))),
                    opening_loc: call.opening_loc.unwrap_or(location),
                    arguments: call.arguments,
                    closing_loc: call.closing_loc.unwrap_or(location),
                    block: call.block,
                },
            ),
            NodeKind::Call(call) if is_attribute(&call) => Node::new(
                location,
                CallTargetNode {
                    flags: call.flags | CallFlags::ATTRIBUTE_WRITE,
                    name: setter_name(&call.name),
                    receiver: call.receiver.unwrap_or_else(|| Box::new(Node::missing(location))),
                    call_operator_loc: call.call_operator_loc.unwrap_or(location),
                    message_loc: call.message_loc.unwrap_or(location),
                },
            ),
            NodeKind::Parentheses(parens) => {
                // `(a), b = ...`
                let inner = parens.body.and_then(|body| match body.kind {
                    NodeKind::Statements(mut statements) if statements.body.len() == 1 => statements.body.pop(),
                    _ => None,
                });
                let lefts = match inner {
                    Some(inner) => vec![self.to_target(inner)],
                    None => {
                        self.error(DiagnosticId::WriteTarget, location);
                        Vec::new()
                    }
                };
                Node::new(
                    location,
                    MultiTargetNode {
                        lefts,
                        rest: None,
                        rights: Vec::new(),
                        lparen_loc: Some(parens.opening_loc),
                        rparen_loc: Some(parens.closing_loc),
                    },
                )
            }
            kind @ (NodeKind::MultiTarget(_) | NodeKind::Missing(_)) => Node { location, kind },
            NodeKind::Splat(splat) => self.splat_to_target(Node::new(location, splat)),
            kind => {
                self.error(DiagnosticId::WriteTarget, location);
                Node { location, kind }
            }
        }
    }

    /// Locals declared by the named groups of a regexp literal on the left
    /// of `=~`. `None` when `left` is not a plain regexp or has no groups.
    pub(crate) fn named_capture_targets(&mut self, left: &Node) -> Option<Vec<Node>> {
        let NodeKind::RegularExpression(regexp) = &left.kind else {
            return None;
        };
        let source = self.cursor.source();
        let pattern = regexp.unescaped.resolve(source).to_vec();
        let mut targets: Vec<Node> = Vec::new();
        for name in named_groups(&pattern) {
            if targets.iter().any(|t| matches!(&t.kind, NodeKind::LocalVariableTarget(t) if t.name.as_bytes() == name)) {
                continue;
            }
            let depth = match self.scopes.resolve(name) {
                Some(depth) => depth,
                None => {
                    self.scopes.declare(name);
                    0
                }
            };
            targets.push(Node::new(
                left.location,
                LocalVariableTargetNode {
                    name: Name::new(name),
                    depth,
                },
            ));
        }
        (!targets.is_empty()).then_some(targets)
    }

    pub(crate) fn match_write(call: Node, targets: Vec<Node>) -> Node {
        Node::new(
            call.location,
            MatchWriteNode {
                call: Box::new(call),
                targets,
            },
        )
    }
}

/// Names of `(?<name>...)` groups that are valid local variable names.
fn named_groups(pattern: &[u8]) -> Vec<&[u8]> {
    let mut names = Vec::new();
    let mut i = 0;
    while i < pattern.len() {
        match pattern[i] {
            b'\\' => i += 2,
            // Lookbehind, not a group name.
            b'(' if pattern[i..].starts_with(b"(?<=") || pattern[i..].starts_with(b"(?<!") => i += 4,
            b'(' if pattern[i..].starts_with(b"(?<") => {
                let start = i + 3;
                let Some(length) = pattern[start..].iter().position(|&b| b == b'>') else {
                    break;
                };
                let name = &pattern[start..start + length];
                if is_local_name(name) {
                    names.push(name);
                }
                i = start + length + 1;
            }
            _ => i += 1,
        }
    }
    names
}

fn is_local_name(name: &[u8]) -> bool {
    let Some(&first) = name.first() else {
        return false;
    };
    (first == b'_' || first.is_ascii_lowercase() || first >= 0x80)
        && name.iter().all(|&b| b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80)
        && !garnet_lexer::is_reserved(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_named_groups_skip_lookbehind() {
        assert_eq!(named_groups(br"(?<year>\d+)-(?<=x)(?<!y)(?<month>\d+)"), vec![&b"year"[..], &b"month"[..]]);
    }

    #[test]
    fn test_named_groups_skip_escaped_parens() {
        assert_eq!(named_groups(br"\(?<a>(?<b>.)"), vec![&b"b"[..]]);
    }

    #[test]
    fn test_group_names_must_be_locals() {
        assert!(is_local_name(b"foo_1"));
        assert!(!is_local_name(b"Foo"));
        assert!(!is_local_name(b"1a"));
        assert!(!is_local_name(b"class"));
        assert!(!is_local_name(b""));
    }
}

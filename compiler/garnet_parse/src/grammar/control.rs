//! Keyword control flow: conditionals, loops, `case`, `begin`, jumps,
//! `yield`, `super`, `BEGIN`/`END`, `alias`, and `undef`.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{
    AliasGlobalVariableNode, AliasMethodNode, BackReferenceReadNode, BreakNode, CaseMatchNode, CaseNode,
    ElseNode, ForNode, ForwardingSuperNode, GlobalVariableReadNode, IfNode, InNode, LoopFlags, NextNode,
    NumberedReferenceReadNode, PostExecutionNode, PreExecutionNode, ReturnNode, SuperNode, SymbolFlags,
    SymbolNode, UndefNode, UnlessNode, UntilNode, WhenNode, WhileNode, YieldNode,
};
use garnet_ir::{Location, Name, Node, NodeKind, StringValue, TokenKind};
use garnet_lexer::LexState;

use super::expr::{bp, CallArguments};
use super::{statements_node, BODY_CLAUSES};
use crate::recovery::{TokenSet, ARGUMENT_START, EXPRESSION_START, STATEMENT_END};
use crate::Parser;

const IF_CLAUSES: TokenSet = TokenSet::new()
    .with(TokenKind::KeywordElsif)
    .with(TokenKind::KeywordElse)
    .with(TokenKind::KeywordEnd);

const UNLESS_CLAUSES: TokenSet = TokenSet::new().with(TokenKind::KeywordElse).with(TokenKind::KeywordEnd);

const WHEN_CLAUSES: TokenSet = TokenSet::new()
    .with(TokenKind::KeywordWhen)
    .with(TokenKind::KeywordElse)
    .with(TokenKind::KeywordEnd);

const IN_CLAUSES: TokenSet = TokenSet::new()
    .with(TokenKind::KeywordIn)
    .with(TokenKind::KeywordElse)
    .with(TokenKind::KeywordEnd);

/// The value of a variable write.
fn written_value(node: &Node) -> Option<&Node> {
    match &node.kind {
        NodeKind::LocalVariableWrite(write) => Some(&write.value),
        NodeKind::InstanceVariableWrite(write) => Some(&write.value),
        NodeKind::ClassVariableWrite(write) => Some(&write.value),
        NodeKind::GlobalVariableWrite(write) => Some(&write.value),
        _ => None,
    }
}

fn is_static_literal(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Integer(_)
            | NodeKind::Float(_)
            | NodeKind::Rational(_)
            | NodeKind::Imaginary(_)
            | NodeKind::String(_)
            | NodeKind::Symbol(_)
    )
}

/// Span from `start` through every node in `parts` and `end`.
fn span<'a>(start: Location, parts: impl IntoIterator<Item = &'a Node>, end: Option<Location>) -> Location {
    let mut location = start;
    for part in parts {
        location = location.join(part.location);
    }
    end.map_or(location, |end| location.join(end))
}

fn else_clause(else_keyword_loc: Location, statements: Option<Box<Node>>, end: Option<Location>) -> Box<Node> {
    let location = span(else_keyword_loc, statements.as_deref(), end);
    Box::new(Node::new(
        location,
        ElseNode {
            else_keyword_loc,
            statements,
            end_keyword_loc: end,
        },
    ))
}

/// Method name as written after `alias` or `undef`.
fn method_name_symbol(location: Location, raw: &[u8]) -> Node {
    let flags = if raw.is_ascii() {
        SymbolFlags::FORCED_US_ASCII_ENCODING
    } else {
        SymbolFlags::empty()
    };
    Node::new(
        location,
        SymbolNode {
            flags,
            opening_loc: None,
            value_loc: Some(location),
            closing_loc: None,
            unescaped: StringValue::Shared(location),
        },
    )
}

fn is_global(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::GlobalVariable | TokenKind::BackReference | TokenKind::NumberedReference
    )
}

/// One `if`/`elsif` clause before its node is built.
struct Clause {
    keyword_loc: Location,
    predicate: Node,
    then_keyword_loc: Option<Location>,
    statements: Option<Box<Node>>,
}

impl Parser<'_> {
    /// Condition of `if`, `unless`, `while`, `until`. Inside a loop
    /// condition `do` belongs to the loop.
    fn parse_predicate(&mut self, do_loop: bool) -> Node {
        if do_loop {
            self.cursor.push_do_loop(true);
        }
        let predicate = if self.at_any(EXPRESSION_START) {
            self.parse_expression(bp::COMPOSITION, true)
        } else {
            self.error(DiagnosticId::ConditionalPredicate, self.error_location());
            self.missing()
        };
        if do_loop {
            self.cursor.pop_do_loop();
        }
        self.check_predicate(&predicate);
        predicate
    }

    fn check_predicate(&mut self, predicate: &Node) {
        if written_value(predicate).is_some_and(is_static_literal) {
            self.warn(DiagnosticId::EqualInConditional, predicate.location);
        } else if is_static_literal(predicate) {
            self.warn(DiagnosticId::LiteralInCondition, predicate.location);
        }
    }

    /// `then`, or a statement separator possibly followed by `then`.
    fn parse_then(&mut self) -> Option<Location> {
        if !self.at(TokenKind::KeywordThen) && !self.at_any(STATEMENT_END) {
            self.error(DiagnosticId::ConditionalThen, self.error_location());
        }
        self.skip_separators();
        self.accept(TokenKind::KeywordThen)
    }

    /// `if a then b elsif c then d else e end`
    pub(crate) fn parse_if(&mut self) -> Node {
        let mut clauses = Vec::new();
        loop {
            let keyword_loc = self.advance().location;
            let predicate = self.parse_predicate(false);
            let then_keyword_loc = self.parse_then();
            let statements = self.parse_statements(IF_CLAUSES);
            clauses.push(Clause {
                keyword_loc,
                predicate,
                then_keyword_loc,
                statements,
            });
            if !self.at(TokenKind::KeywordElsif) {
                break;
            }
        }
        let else_start = self.accept(TokenKind::KeywordElse);
        let else_statements = match else_start {
            Some(_) => self.parse_statements(TokenSet::single(TokenKind::KeywordEnd)),
            None => None,
        };
        let end = self.expect(TokenKind::KeywordEnd, DiagnosticId::ConditionalTerm);

        let mut chain = else_start.map(|keyword| else_clause(keyword, else_statements, end));
        for clause in clauses.into_iter().rev() {
            let subsequent = chain.take();
            let location = span(
                clause.keyword_loc,
                std::iter::once(&clause.predicate)
                    .chain(clause.statements.as_deref())
                    .chain(subsequent.as_deref()),
                end,
            );
            chain = Some(Box::new(Node::new(
                location,
                IfNode {
                    if_keyword_loc: Some(clause.keyword_loc),
                    predicate: Box::new(clause.predicate),
                    then_keyword_loc: clause.then_keyword_loc,
                    statements: clause.statements,
                    subsequent,
                    end_keyword_loc: end,
                },
            )));
        }
        match chain {
            Some(node) => *node,
            None => self.missing(),
        }
    }

    /// `unless a then b else c end`
    pub(crate) fn parse_unless(&mut self) -> Node {
        let keyword_loc = self.advance().location;
        let predicate = self.parse_predicate(false);
        let then_keyword_loc = self.parse_then();
        let statements = self.parse_statements(UNLESS_CLAUSES);
        let else_start = self.accept(TokenKind::KeywordElse);
        let else_statements = match else_start {
            Some(_) => self.parse_statements(TokenSet::single(TokenKind::KeywordEnd)),
            None => None,
        };
        let end = self.expect(TokenKind::KeywordEnd, DiagnosticId::ConditionalTerm);
        let else_clause = else_start.map(|keyword| else_clause(keyword, else_statements, end));
        let location = span(
            keyword_loc,
            std::iter::once(&predicate)
                .chain(statements.as_deref())
                .chain(else_clause.as_deref()),
            end,
        );
        Node::new(
            location,
            UnlessNode {
                keyword_loc,
                predicate: Box::new(predicate),
                then_keyword_loc,
                statements,
                else_clause,
                end_keyword_loc: end,
            },
        )
    }

    /// `while cond do body end`, `until cond do body end`
    pub(crate) fn parse_loop(&mut self) -> Node {
        let keyword = self.advance();
        let predicate = self.parse_predicate(true);
        if self.accept(TokenKind::KeywordDoLoop).is_none() && !self.at_any(STATEMENT_END) {
            self.error(DiagnosticId::ConditionalThen, self.error_location());
        }
        let statements = self.parse_statements(TokenSet::single(TokenKind::KeywordEnd));
        let closing_loc = self.expect(TokenKind::KeywordEnd, DiagnosticId::LoopTerm);
        let location = span(
            keyword.location,
            std::iter::once(&predicate).chain(statements.as_deref()),
            closing_loc,
        );
        let (flags, keyword_loc, predicate) = (LoopFlags::empty(), keyword.location, Box::new(predicate));
        if keyword.kind == TokenKind::KeywordWhile {
            Node::new(
                location,
                WhileNode {
                    flags,
                    keyword_loc,
                    closing_loc,
                    predicate,
                    statements,
                },
            )
        } else {
            Node::new(
                location,
                UntilNode {
                    flags,
                    keyword_loc,
                    closing_loc,
                    predicate,
                    statements,
                },
            )
        }
    }

    /// `for a, b in collection do body end`
    pub(crate) fn parse_for(&mut self) -> Node {
        let for_keyword_loc = self.advance().location;
        let index = if self.at(TokenKind::UStar) {
            self.parse_target_list(None)
        } else if self.at_any(EXPRESSION_START) {
            let first = self.parse_expression(bp::DEFINED, false);
            if self.at(TokenKind::Comma) {
                self.parse_target_list(Some(first))
            } else {
                self.to_target(first)
            }
        } else {
            self.error(DiagnosticId::ForIndex, self.error_location());
            self.missing()
        };
        let in_keyword_loc = self
            .expect(TokenKind::KeywordIn, DiagnosticId::ForIn)
            .unwrap_or_else(|| Location::point(self.error_location().start));

        self.cursor.push_do_loop(true);
        let collection = self.parse_operand(bp::COMPOSITION, true);
        self.cursor.pop_do_loop();
        let do_keyword_loc = self.accept(TokenKind::KeywordDoLoop);

        let statements = self.parse_statements(TokenSet::single(TokenKind::KeywordEnd));
        let end = self.expect(TokenKind::KeywordEnd, DiagnosticId::ForTerm);
        let end_keyword_loc = end.unwrap_or_else(|| Location::point(self.error_location().start));
        let location = span(
            for_keyword_loc,
            [&index, &collection].into_iter().chain(statements.as_deref()),
            Some(end_keyword_loc),
        );
        Node::new(
            location,
            ForNode {
                index: Box::new(index),
                collection: Box::new(collection),
                statements,
                for_keyword_loc,
                in_keyword_loc,
                do_keyword_loc,
                end_keyword_loc,
            },
        )
    }

    /// `case x when ... end` or `case x in ... end`
    pub(crate) fn parse_case(&mut self) -> Node {
        let case_keyword_loc = self.advance().location;
        let predicate = if self.at_any(EXPRESSION_START) {
            Some(Box::new(self.parse_expression(bp::COMPOSITION, true)))
        } else {
            None
        };
        self.skip_separators();

        let pattern_match = self.at(TokenKind::KeywordIn);
        let mut conditions = Vec::new();
        if pattern_match {
            while self.at(TokenKind::KeywordIn) {
                conditions.push(self.parse_in_clause());
            }
        } else if self.at(TokenKind::KeywordWhen) {
            while self.at(TokenKind::KeywordWhen) {
                conditions.push(self.parse_when_clause());
            }
        } else {
            self.error(DiagnosticId::CaseMissingConditions, self.error_location());
        }

        let else_start = self.accept(TokenKind::KeywordElse);
        let else_statements = match else_start {
            Some(_) => self.parse_statements(TokenSet::single(TokenKind::KeywordEnd)),
            None => None,
        };
        let end = self.expect(TokenKind::KeywordEnd, DiagnosticId::CaseTerm);
        let end_keyword_loc = end.unwrap_or_else(|| Location::point(self.error_location().start));
        let else_clause = else_start.map(|keyword| else_clause(keyword, else_statements, end));
        let location = span(case_keyword_loc, std::iter::empty(), Some(end_keyword_loc));

        if pattern_match {
            Node::new(
                location,
                CaseMatchNode {
                    predicate,
                    conditions,
                    else_clause,
                    case_keyword_loc,
                    end_keyword_loc,
                },
            )
        } else {
            Node::new(
                location,
                CaseNode {
                    predicate,
                    conditions,
                    else_clause,
                    case_keyword_loc,
                    end_keyword_loc,
                },
            )
        }
    }

    /// `when a, *b then body`
    fn parse_when_clause(&mut self) -> Node {
        let keyword_loc = self.advance().location;
        let mut conditions = Vec::new();
        loop {
            let condition = if self.at(TokenKind::UStar) {
                self.parse_splat(bp::DEFINED)
            } else {
                self.parse_operand(bp::DEFINED, false)
            };
            conditions.push(condition);
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
            self.skip_newlines();
        }
        let then_keyword_loc = self.parse_then();
        let statements = self.parse_statements(WHEN_CLAUSES);
        let location = span(
            keyword_loc,
            conditions.iter().chain(statements.as_deref()),
            then_keyword_loc,
        );
        Node::new(
            location,
            WhenNode {
                keyword_loc,
                conditions,
                then_keyword_loc,
                statements,
            },
        )
    }

    /// `in pattern if guard then body`. A guard wraps the pattern in a
    /// conditional whose body is the pattern.
    fn parse_in_clause(&mut self) -> Node {
        self.cursor.set_lex_state(LexState::BEG | LexState::LABEL);
        let in_loc = self.advance().location;
        let mut pattern = self.parse_pattern_top(true);
        if self.at(TokenKind::KeywordIfModifier) || self.at(TokenKind::KeywordUnlessModifier) {
            let keyword = self.advance();
            let predicate = self.parse_operand(bp::COMPOSITION, true);
            let location = pattern.location.join(predicate.location);
            let statements = statements_node(vec![pattern]);
            let predicate = Box::new(predicate);
            pattern = if keyword.kind == TokenKind::KeywordIfModifier {
                Node::new(
                    location,
                    IfNode {
                        if_keyword_loc: Some(keyword.location),
                        predicate,
                        then_keyword_loc: None,
                        statements,
                        subsequent: None,
                        end_keyword_loc: None,
                    },
                )
            } else {
                Node::new(
                    location,
                    UnlessNode {
                        keyword_loc: keyword.location,
                        predicate,
                        then_keyword_loc: None,
                        statements,
                        else_clause: None,
                        end_keyword_loc: None,
                    },
                )
            };
        }
        let then_loc = self.parse_then();
        let statements = self.parse_statements(IN_CLAUSES);
        let location = span(in_loc, std::iter::once(&pattern).chain(statements.as_deref()), then_loc);
        Node::new(
            location,
            InNode {
                pattern: Box::new(pattern),
                statements,
                in_loc,
                then_loc,
            },
        )
    }

    /// `begin body rescue ... else ... ensure ... end`
    pub(crate) fn parse_begin(&mut self) -> Node {
        let begin_keyword_loc = self.advance().location;
        let statements = self.parse_statements(BODY_CLAUSES.with(TokenKind::KeywordEnd));
        let mut node = self.parse_begin_clauses(
            Some(begin_keyword_loc),
            statements,
            begin_keyword_loc.start,
            TokenKind::KeywordEnd,
        );
        let end = self.expect(TokenKind::KeywordEnd, DiagnosticId::BeginTerm);
        if let Some(end) = end {
            node.location = node.location.join(end);
        }
        if let NodeKind::Begin(begin) = &mut node.kind {
            begin.end_keyword_loc = end;
        }
        node
    }

    /// `return`, `break`, `next`, with optional arguments.
    pub(crate) fn parse_jump(&mut self) -> Node {
        let keyword = self.advance();
        let keyword_loc = keyword.location;
        let arguments = if self.at_any(ARGUMENT_START) || self.at(TokenKind::ParenthesisLeft) {
            let CallArguments { arguments, block, .. } = self.parse_command_arguments();
            if let Some(block) = block {
                self.error(DiagnosticId::UnexpectedToken, block.location);
            }
            arguments
        } else {
            None
        };
        let location = span(keyword_loc, arguments.as_deref(), None);
        match keyword.kind {
            TokenKind::KeywordReturn => Node::new(location, ReturnNode { keyword_loc, arguments }),
            TokenKind::KeywordBreak => Node::new(location, BreakNode { arguments, keyword_loc }),
            _ => Node::new(location, NextNode { arguments, keyword_loc }),
        }
    }

    /// `yield`, `yield(a)`, `yield a`. Only valid inside a method unless
    /// the source is a partial script.
    pub(crate) fn parse_yield(&mut self, command: bool) -> Node {
        let keyword_loc = self.advance().location;
        if !self.scopes.in_method() && !self.partial_script {
            self.error(DiagnosticId::InvalidYield, keyword_loc);
        }
        let arguments = if self.at(TokenKind::ParenthesisLeft) {
            let opening = self.advance().location;
            self.parse_parenthesized_arguments(opening)
        } else if command && self.at_any(ARGUMENT_START) {
            self.parse_command_arguments()
        } else {
            CallArguments::default()
        };
        if let Some(block) = &arguments.block {
            self.error(DiagnosticId::UnexpectedToken, block.location);
        }
        let location = span(keyword_loc, arguments.arguments.as_deref(), arguments.closing_loc);
        Node::new(
            location,
            YieldNode {
                keyword_loc,
                lparen_loc: arguments.opening_loc,
                arguments: arguments.arguments,
                rparen_loc: arguments.closing_loc,
            },
        )
    }

    /// `super`, `super()`, `super(a)`, `super a`. A bare `super` forwards
    /// the method's own arguments.
    pub(crate) fn parse_super(&mut self, command: bool) -> Node {
        let keyword_loc = self.advance().location;
        let arguments = if self.at(TokenKind::ParenthesisLeft) {
            let opening = self.advance().location;
            self.parse_parenthesized_arguments(opening)
        } else if command && self.at_any(ARGUMENT_START) {
            self.parse_command_arguments()
        } else {
            return Node::new(keyword_loc, ForwardingSuperNode { block: None });
        };

        let is_command_call = arguments.opening_loc.is_none();
        let mut block = arguments.block;
        if is_command_call && self.at(TokenKind::KeywordDo) && self.context.allows_do_block() {
            let do_block = self.parse_do_block();
            self.attach_block(&mut block, do_block);
        }
        let location = span(
            keyword_loc,
            arguments.arguments.as_deref().into_iter().chain(block.as_deref()),
            arguments.closing_loc,
        );
        Node::new(
            location,
            SuperNode {
                keyword_loc,
                lparen_loc: arguments.opening_loc,
                arguments: arguments.arguments,
                rparen_loc: arguments.closing_loc,
                block,
            },
        )
    }

    /// `BEGIN { ... }` and `END { ... }`
    pub(crate) fn parse_pre_post_execution(&mut self) -> Node {
        let keyword = self.advance();
        let keyword_loc = keyword.location;
        let pre = keyword.kind == TokenKind::KeywordBeginUpcase;
        if pre && self.statement_nesting != 1 {
            self.error(DiagnosticId::BeginUpcaseToplevel, keyword_loc);
        }
        if !pre && self.scopes.in_method() {
            self.warn(DiagnosticId::EndInMethod, keyword_loc);
        }
        let (brace_id, term_id) = if pre {
            (DiagnosticId::BeginUpcaseBrace, DiagnosticId::BeginUpcaseTerm)
        } else {
            (DiagnosticId::EndUpcaseBrace, DiagnosticId::EndUpcaseTerm)
        };
        let Some(opening_loc) = self.expect(TokenKind::BraceLeft, brace_id) else {
            let missing = Location::point(self.error_location().start);
            return if pre {
                Node::new(
                    keyword_loc,
                    PreExecutionNode {
                        statements: None,
                        keyword_loc,
                        opening_loc: missing,
                        closing_loc: missing,
                    },
                )
            } else {
                Node::new(
                    keyword_loc,
                    PostExecutionNode {
                        statements: None,
                        keyword_loc,
                        opening_loc: missing,
                        closing_loc: missing,
                    },
                )
            };
        };
        let statements = self.parse_statements(TokenSet::single(TokenKind::BraceRight));
        let closing_loc = self
            .expect(TokenKind::BraceRight, term_id)
            .unwrap_or_else(|| Location::point(self.error_location().start));
        let location = keyword_loc.join(closing_loc);
        if pre {
            Node::new(
                location,
                PreExecutionNode {
                    statements,
                    keyword_loc,
                    opening_loc,
                    closing_loc,
                },
            )
        } else {
            Node::new(
                location,
                PostExecutionNode {
                    statements,
                    keyword_loc,
                    opening_loc,
                    closing_loc,
                },
            )
        }
    }

    /// `alias new old`, `alias $new $old`
    pub(crate) fn parse_alias(&mut self) -> Node {
        let keyword_loc = self.advance().location;
        if is_global(self.current_kind()) {
            let new_name = self.parse_global_alias_name();
            let old_name = if is_global(self.current_kind()) {
                self.parse_global_alias_name()
            } else {
                self.error(DiagnosticId::AliasArgument, self.error_location());
                self.missing()
            };
            return Node::new(
                keyword_loc.join(old_name.location),
                AliasGlobalVariableNode {
                    new_name: Box::new(new_name),
                    old_name: Box::new(old_name),
                    keyword_loc,
                },
            );
        }
        let new_name = self.parse_method_name_item(DiagnosticId::AliasArgument);
        let old_name = self.parse_method_name_item(DiagnosticId::AliasArgument);
        Node::new(
            keyword_loc.join(old_name.location),
            AliasMethodNode {
                new_name: Box::new(new_name),
                old_name: Box::new(old_name),
                keyword_loc,
            },
        )
    }

    fn parse_global_alias_name(&mut self) -> Node {
        let token = self.current();
        self.cursor.set_lex_state(LexState::FNAME | LexState::FITEM);
        self.advance();
        let name = Name::new(token.raw);
        match token.kind {
            TokenKind::BackReference => Node::new(token.location, BackReferenceReadNode { name }),
            TokenKind::NumberedReference => {
                let number = std::str::from_utf8(token.raw.get(1..).unwrap_or_default())
                    .ok()
                    .and_then(|digits| digits.parse().ok())
                    .unwrap_or(0);
                Node::new(token.location, NumberedReferenceReadNode { number })
            }
            _ => Node::new(token.location, GlobalVariableReadNode { name }),
        }
    }

    /// A method name after `alias` or `undef`: a bare name, an operator,
    /// or a symbol. The token after it is lexed as another method name.
    fn parse_method_name_item(&mut self, id: DiagnosticId) -> Node {
        let kind = self.current_kind();
        if kind == TokenKind::SymbolBegin {
            return self.parse_symbol();
        }
        let is_name = matches!(
            kind,
            TokenKind::Identifier
                | TokenKind::Constant
                | TokenKind::MethodName
                | TokenKind::BracketLeftRight
                | TokenKind::BracketLeftRightEqual
        ) || kind.is_keyword()
            || kind.is_operator_method_name();
        if !is_name {
            self.error(id, self.error_location());
            return self.missing();
        }
        self.cursor.set_lex_state(LexState::FNAME | LexState::FITEM);
        let token = self.advance();
        method_name_symbol(token.location, token.raw)
    }

    /// `undef a, :b, +`
    pub(crate) fn parse_undef(&mut self) -> Node {
        let keyword_loc = self.advance().location;
        let mut names = vec![self.parse_method_name_item(DiagnosticId::UndefArgument)];
        while self.at(TokenKind::Comma) {
            self.cursor.set_lex_state(LexState::FNAME | LexState::FITEM);
            self.advance();
            names.push(self.parse_method_name_item(DiagnosticId::UndefArgument));
        }
        let location = span(keyword_loc, &names, None);
        Node::new(location, UndefNode { names, keyword_loc })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_static_literals() {
        let integer = Node::new(Location::new(0, 1), garnet_ir::node::NilNode {});
        assert!(!is_static_literal(&integer));
        let symbol = method_name_symbol(Location::new(0, 3), b"foo");
        assert!(is_static_literal(&symbol));
    }

    #[test]
    fn test_method_name_symbol_is_ascii_tagged() {
        let node = method_name_symbol(Location::new(6, 9), b"foo");
        let NodeKind::Symbol(symbol) = &node.kind else {
            panic!("expected a symbol, got {node:?}");
        };
        assert_eq!(symbol.flags, SymbolFlags::FORCED_US_ASCII_ENCODING);
        assert_eq!(symbol.value_loc, Some(Location::new(6, 9)));
        assert_eq!(symbol.opening_loc, None);
    }

    #[test]
    fn test_span_covers_parts_and_end() {
        let part = Node::new(Location::new(4, 8), garnet_ir::node::NilNode {});
        assert_eq!(span(Location::new(0, 2), [&part], Some(Location::new(10, 13))), Location::new(0, 13));
        assert_eq!(span(Location::new(0, 2), std::iter::empty(), None), Location::new(0, 2));
    }
}

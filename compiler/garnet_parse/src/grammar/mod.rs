//! Grammar productions.
//!
//! Statement lists and bodies live here; expressions are in `expr`, the
//! keyword constructs in `control` and `definition`, and pattern matching
//! in `pattern`.

mod command_line;
mod control;
mod definition;
pub(crate) mod expr;
mod pattern;

use garnet_diagnostic::DiagnosticId;
use garnet_ir::node::{BeginNode, ElseNode, EnsureNode, RescueNode, StatementsNode};
use garnet_ir::{Location, Node, TokenKind};

use crate::recovery::{TokenSet, EXPRESSION_START, STATEMENT_END};
use crate::Parser;
use expr::bp;

/// Clauses that may follow the statements of a body.
const BODY_CLAUSES: TokenSet = TokenSet::new()
    .with(TokenKind::KeywordRescue)
    .with(TokenKind::KeywordElse)
    .with(TokenKind::KeywordEnsure);

/// Wrap a statement list, or `None` when it is empty.
pub(crate) fn statements_node(body: Vec<Node>) -> Option<Box<Node>> {
    let first = body.first()?.location;
    let last = body.last().map_or(first, |node| node.location);
    Some(Box::new(Node::new(first.join(last), StatementsNode { body })))
}

impl Parser<'_> {
    /// The program body. Always a statements node, possibly empty.
    pub(crate) fn parse_program(&mut self) -> Node {
        let start = self.current_location().start;
        let body = self.parse_statement_list(TokenSet::new());
        match statements_node(body) {
            Some(statements) => *statements,
            None => Node::new(Location::point(start), StatementsNode { body: Vec::new() }),
        }
    }

    /// Statements up to, not including, a token in `terminators` or the
    /// end of input.
    ///
    /// A token that cannot start a statement is reported and skipped,
    /// unless it closes an enclosing construct; then the list ends and the
    /// owner of that construct deals with it.
    pub(crate) fn parse_statement_list(&mut self, terminators: TokenSet) -> Vec<Node> {
        self.terminators.push(terminators);
        self.statement_nesting += 1;
        let mut body = Vec::new();
        loop {
            self.skip_separators();
            if self.is_at_end() || self.at_any(terminators) {
                break;
            }
            if !self.at_any(EXPRESSION_START) {
                if self.closes_enclosing() {
                    break;
                }
                self.error_unexpected(DiagnosticId::UnexpectedTokenIgnore);
                self.advance();
                continue;
            }

            let before = self.current_location();
            body.push(self.parse_statement());
            if self.current_location() == before {
                self.advance();
            }

            if self.at_any(STATEMENT_END) || self.at_any(terminators) {
                continue;
            }
            if self.at_any(EXPRESSION_START) {
                self.error_unexpected(DiagnosticId::StatementSeparator);
            }
        }
        self.statement_nesting -= 1;
        self.terminators.pop();
        body
    }

    /// Statements node for a list, `None` when empty.
    pub(crate) fn parse_statements(&mut self, terminators: TokenSet) -> Option<Box<Node>> {
        let body = self.parse_statement_list(terminators);
        statements_node(body)
    }

    /// Whether the current token ends a statement list further out.
    fn closes_enclosing(&self) -> bool {
        let kind = self.current_kind();
        self.terminators.iter().rev().skip(1).any(|set| set.contains(kind))
    }

    /// One statement: an expression, or a multiple assignment.
    pub(crate) fn parse_statement(&mut self) -> Node {
        if self.at(TokenKind::UStar) {
            let multi = self.parse_multi_write(None);
            return self.parse_expression_from(multi, bp::STATEMENT, true);
        }
        let node = self.parse_expression(bp::STATEMENT, true);
        if self.at(TokenKind::Comma) && Self::is_multi_write_start(&node) {
            let multi = self.parse_multi_write(Some(node));
            return self.parse_expression_from(multi, bp::STATEMENT, true);
        }
        node
    }

    /// Body of a `def`, `class`, `module`, or `do` block up to `closer`.
    /// With `rescue`, `else`, or `ensure` clauses the body becomes an
    /// implicit begin node.
    pub(crate) fn parse_body(&mut self, closer: TokenKind) -> Option<Box<Node>> {
        let start = self.current_location().start;
        let statements = self.parse_statements(BODY_CLAUSES.with(closer));
        if !self.at_any(BODY_CLAUSES) {
            return statements;
        }
        let begin = self.parse_begin_clauses(None, statements, start, closer);
        Some(Box::new(begin))
    }

    /// The `rescue`/`else`/`ensure` clauses of a body. The closing `end` is
    /// left for the caller.
    pub(crate) fn parse_begin_clauses(
        &mut self,
        begin_keyword_loc: Option<Location>,
        statements: Option<Box<Node>>,
        start: u32,
        closer: TokenKind,
    ) -> Node {
        let rescue_clause = if self.at(TokenKind::KeywordRescue) {
            Some(Box::new(self.parse_rescue_clause(closer)))
        } else {
            None
        };

        let else_clause = if self.at(TokenKind::KeywordElse) {
            let else_keyword_loc = self.advance().location;
            let statements = self.parse_statements(
                TokenSet::new().with(TokenKind::KeywordEnsure).with(closer),
            );
            let end_keyword_loc = self.at_any(TokenSet::new().with(TokenKind::KeywordEnsure).with(closer))
                .then(|| self.current_location());
            let end = statements.as_ref().map_or(else_keyword_loc, |s| s.location);
            Some(Box::new(Node::new(
                else_keyword_loc.join(end),
                ElseNode {
                    else_keyword_loc,
                    statements,
                    end_keyword_loc,
                },
            )))
        } else {
            None
        };

        let ensure_clause = if self.at(TokenKind::KeywordEnsure) {
            let ensure_keyword_loc = self.advance().location;
            let statements = self.parse_statements(TokenSet::single(closer));
            let end_keyword_loc = if self.at(closer) {
                self.current_location()
            } else {
                Location::point(self.error_location().start)
            };
            let end = statements.as_ref().map_or(ensure_keyword_loc, |s| s.location);
            Some(Box::new(Node::new(
                ensure_keyword_loc.join(end),
                EnsureNode {
                    ensure_keyword_loc,
                    statements,
                    end_keyword_loc,
                },
            )))
        } else {
            None
        };

        let mut location = Location::point(start);
        for part in [&statements, &rescue_clause, &else_clause, &ensure_clause].into_iter().flatten() {
            location = location.join(part.location);
        }
        if let Some(keyword) = begin_keyword_loc {
            location = location.join(keyword);
        }
        Node::new(
            location,
            BeginNode {
                begin_keyword_loc,
                statements,
                rescue_clause,
                else_clause,
                ensure_clause,
                end_keyword_loc: None,
            },
        )
    }

    /// `rescue A, B => e then ...`, chaining any following clauses.
    fn parse_rescue_clause(&mut self, closer: TokenKind) -> Node {
        let keyword_loc = self.advance().location;

        let mut exceptions = Vec::new();
        if !self.at(TokenKind::EqualGreater) && !self.at(TokenKind::KeywordThen) && !self.at_any(STATEMENT_END) {
            loop {
                let exception = if self.at(TokenKind::UStar) {
                    self.parse_splat(bp::DEFINED)
                } else if self.at_any(EXPRESSION_START) {
                    self.parse_expression(bp::DEFINED, false)
                } else {
                    self.error_unexpected(DiagnosticId::ExpectExpression);
                    break;
                };
                exceptions.push(exception);
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
                self.skip_newlines();
            }
        }

        let mut operator_loc = None;
        let mut reference = None;
        if let Some(operator) = self.accept(TokenKind::EqualGreater) {
            operator_loc = Some(operator);
            if self.at_any(EXPRESSION_START) {
                let target = self.parse_expression(bp::INDEX, false);
                reference = Some(Box::new(self.to_target(target)));
            } else {
                self.error(DiagnosticId::RescueVariable, self.error_location());
            }
        }
        if self.accept(TokenKind::KeywordThen).is_none() && !self.at_any(STATEMENT_END) {
            self.error(DiagnosticId::ConditionalThen, self.error_location());
        }

        let context = self.context.with(crate::ParseContext::IN_RESCUE);
        let statements = self.with_context(context, |p| {
            p.parse_statements(BODY_CLAUSES.with(closer))
        });
        let subsequent = if self.at(TokenKind::KeywordRescue) {
            Some(Box::new(self.parse_rescue_clause(closer)))
        } else {
            None
        };

        let mut location = keyword_loc;
        for node in exceptions.iter().chain(reference.as_deref()) {
            location = location.join(node.location);
        }
        if let Some(statements) = &statements {
            location = location.join(statements.location);
        }
        if let Some(subsequent) = &subsequent {
            location = location.join(subsequent.location);
        }
        Node::new(
            location,
            RescueNode {
                keyword_loc,
                exceptions,
                operator_loc,
                reference,
                statements,
                subsequent,
            },
        )
    }
}

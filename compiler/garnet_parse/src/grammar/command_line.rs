//! Program wrappers for the `-n`, `-p`, `-l`, and `-a` switches.

use garnet_ir::node::{
    ArgumentsFlags, ArgumentsNode, CallFlags, CallNode, GlobalVariableReadNode, GlobalVariableWriteNode, LoopFlags,
    StatementsNode, WhileNode,
};
use garnet_ir::{Location, Name, Node, NodeKind};
use tracing::trace;

use crate::{CommandLine, Parser};

fn global(name: &str, at: Location) -> Node {
    Node::new(at, GlobalVariableReadNode { name: Name::from(name) })
}

/// A synthesized call without a source position of its own.
fn call(receiver: Option<Node>, name: &str, arguments: Vec<Node>, at: Location) -> Node {
    let arguments = (!arguments.is_empty()).then(|| {
        Box::new(Node::new(
            at,
            ArgumentsNode {
                flags: ArgumentsFlags::empty(),
                arguments,
            },
        ))
    });
    Node::new(
        at,
        CallNode {
            flags: CallFlags::empty(),
            receiver: receiver.map(Box::new),
            call_operator_loc: None,
            name: Name::from(name),
            message_loc: None,
            opening_loc: None,
            arguments,
            closing_loc: None,
            block: None,
        },
    )
}

impl Parser<'_> {
    /// Wrap the program body in `while gets ... end` for `-n` and `-p`,
    /// adding the per-line statements of `-l`, `-a`, and `-p`. Without
    /// `-n` or `-p` the body is returned unchanged.
    pub(crate) fn wrap_command_line(&mut self, statements: Node, flags: CommandLine) -> Node {
        if !flags.intersects(CommandLine::N | CommandLine::P) {
            return statements;
        }
        trace!(?flags, "wrapping program in a read loop");
        let location = statements.location;
        let at = Location::point(location.start);
        let mut body = match statements.kind {
            NodeKind::Statements(node) => node.body,
            kind => vec![Node::new(location, kind)],
        };

        let mut prologue = Vec::new();
        if flags.contains(CommandLine::L) {
            prologue.push(call(Some(global("$_", at)), "chomp!", Vec::new(), at));
        }
        if flags.contains(CommandLine::A) {
            let split = call(Some(global("$_", at)), "split", Vec::new(), at);
            prologue.push(Node::new(
                at,
                GlobalVariableWriteNode {
                    name: Name::from("$F"),
                    name_loc: at,
                    value: Box::new(split),
                    operator_loc: at,
                },
            ));
        }
        body.splice(0..0, prologue);
        if flags.contains(CommandLine::P) {
            let end = Location::point(location.end);
            body.push(call(None, "print", vec![global("$_", end)], end));
        }

        let loop_body = Node::new(location, StatementsNode { body });
        let predicate = call(None, "gets", Vec::new(), at);
        let wrapped = Node::new(
            location,
            WhileNode {
                flags: LoopFlags::empty(),
                keyword_loc: at,
                closing_loc: None,
                predicate: Box::new(predicate),
                statements: Some(Box::new(loop_body)),
            },
        );
        Node::new(location, StatementsNode { body: vec![wrapped] })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::{parse_with, statements};
    use crate::{CommandLine, Options};
    use garnet_ir::NodeKind;

    fn loop_body(source: &str, letters: &str) -> Vec<String> {
        let options = Options {
            command_line: CommandLine::parse(letters).unwrap(),
            ..Options::default()
        };
        let result = parse_with(source, &options);
        let top = statements(&result);
        assert_eq!(top.len(), 1);
        let NodeKind::While(node) = &top[0].kind else { panic!("expected a while loop") };
        let Some(body) = node.statements.as_deref() else { panic!("empty loop") };
        let NodeKind::Statements(body) = &body.kind else { panic!("expected statements") };
        body.body.iter().map(|node| format!("{:?}", node.node_type())).collect()
    }

    #[test]
    fn without_loop_flags_nothing_changes() {
        let options = Options {
            command_line: CommandLine::L | CommandLine::A,
            ..Options::default()
        };
        let result = parse_with("foo", &options);
        assert!(matches!(statements(&result)[0].kind, NodeKind::Call(_)));
    }

    #[test]
    fn n_wraps_in_a_read_loop() {
        assert_eq!(loop_body("foo", "n"), vec!["Call"]);
    }

    #[test]
    fn p_prints_after_each_line() {
        assert_eq!(loop_body("foo", "p"), vec!["Call", "Call"]);
    }

    #[test]
    fn l_and_a_prepend_in_order() {
        assert_eq!(loop_body("foo", "nla"), vec!["Call", "GlobalVariableWrite", "Call"]);
    }
}

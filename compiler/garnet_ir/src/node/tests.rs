use super::*;
use crate::{IntegerValue, Location, Name};
use pretty_assertions::assert_eq;

fn int(start: u32, end: u32, value: i64) -> Node {
    Node::new(
        Location::new(start, end),
        IntegerNode {
            flags: IntegerBaseFlags::DECIMAL,
            value: IntegerValue::from(value),
        },
    )
}

fn sample() -> Node {
    // foo = 1; bar(2)
    let write = Node::new(
        Location::new(0, 7),
        LocalVariableWriteNode {
            name: Name::from("foo"),
            depth: 0,
            name_loc: Location::new(0, 3),
            value: Box::new(int(6, 7, 1)),
            operator_loc: Location::new(4, 5),
        },
    );
    let args = Node::new(
        Location::new(13, 14),
        ArgumentsNode {
            flags: ArgumentsFlags::empty(),
            arguments: vec![int(13, 14, 2)],
        },
    );
    let call = Node::new(
        Location::new(9, 15),
        CallNode {
            flags: CallFlags::IGNORE_VISIBILITY,
            receiver: None,
            call_operator_loc: None,
            name: Name::from("bar"),
            message_loc: Some(Location::new(9, 12)),
            opening_loc: Some(Location::new(12, 13)),
            arguments: Some(Box::new(args)),
            closing_loc: Some(Location::new(14, 15)),
            block: None,
        },
    );
    let statements = Node::new(
        Location::new(0, 15),
        StatementsNode {
            body: vec![write, call],
        },
    );
    Node::new(
        Location::new(0, 15),
        ProgramNode {
            locals: vec![Name::from("foo")],
            statements: Box::new(statements),
        },
    )
}

#[test]
fn tags_round_trip() {
    for &ty in NodeType::ALL {
        assert_eq!(NodeType::from_tag(ty.tag()), Some(ty));
    }
    assert_eq!(NodeType::from_tag(0), None);
    assert_eq!(NodeType::from_tag(u8::MAX), None);
}

#[test]
fn names_end_in_node() {
    for &ty in NodeType::ALL {
        assert!(ty.name().ends_with("Node"), "{ty:?}");
    }
    assert_eq!(NodeType::SelfKeyword.name(), "SelfNode");
}

#[test]
fn fields_follow_schema() {
    fn check(node: &Node) {
        let schema = node.node_type().schema();
        let fields = node.fields();
        assert_eq!(schema.len(), fields.len());
        for ((name, kind), (field_name, field)) in schema.iter().zip(&fields) {
            assert_eq!(name, field_name);
            assert_eq!(*kind, field.kind());
        }
        for child in node.child_nodes() {
            check(child);
        }
    }
    check(&sample());
}

#[test]
fn child_nodes_in_field_order() {
    let program = sample();
    let children = program.child_nodes();
    assert_eq!(children.len(), 1);
    let statements = children[0];
    let kinds: Vec<_> = statements
        .child_nodes()
        .iter()
        .map(|n| n.node_type())
        .collect();
    assert_eq!(kinds, vec![NodeType::LocalVariableWrite, NodeType::Call]);
}

fn to_values(node: &Node) -> Vec<FieldValue> {
    node.fields()
        .into_iter()
        .map(|(_, field)| match field {
            FieldRef::Node(n) => FieldValue::Node(Box::new(n.clone())),
            FieldRef::OptionalNode(n) => FieldValue::OptionalNode(n.map(|n| Box::new(n.clone()))),
            FieldRef::NodeList(list) => FieldValue::NodeList(list.to_vec()),
            FieldRef::Location(l) => FieldValue::Location(l),
            FieldRef::OptionalLocation(l) => FieldValue::OptionalLocation(l),
            FieldRef::Constant(n) => FieldValue::Constant(n.clone()),
            FieldRef::OptionalConstant(n) => FieldValue::OptionalConstant(n.cloned()),
            FieldRef::ConstantList(n) => FieldValue::ConstantList(n.to_vec()),
            FieldRef::String(s) => FieldValue::String(s.clone()),
            FieldRef::Integer(i) => FieldValue::Integer(i.clone()),
            FieldRef::Double(d) => FieldValue::Double(d),
            FieldRef::UInt32(v) => FieldValue::UInt32(v),
            FieldRef::Flags(f) => FieldValue::Flags(f),
        })
        .collect()
}

#[test]
fn from_fields_rebuilds_payload() {
    let program = sample();
    let statements = program.child_nodes()[0];
    let call = statements.child_nodes()[1];
    let rebuilt = NodeKind::from_fields(call.node_type(), to_values(call));
    assert_eq!(rebuilt.as_ref(), Ok(&call.kind));
}

#[test]
fn from_fields_rejects_bad_input() {
    let node = int(0, 1, 1);
    let mut values = to_values(&node);
    values.push(FieldValue::UInt32(0));
    assert_eq!(
        NodeKind::from_fields(NodeType::Integer, values),
        Err(FieldError::Extra { count: 1 })
    );

    assert_eq!(
        NodeKind::from_fields(NodeType::Integer, vec![FieldValue::Flags(0)]),
        Err(FieldError::Missing { field: "value" })
    );

    assert_eq!(
        NodeKind::from_fields(
            NodeType::Integer,
            vec![
                FieldValue::Flags(0x8000),
                FieldValue::Integer(IntegerValue::from(1))
            ]
        ),
        Err(FieldError::Mismatch {
            field: "flags",
            expected: FieldKind::Flags
        })
    );
}

#[derive(Default)]
struct Counter {
    integers: Vec<i64>,
    calls: usize,
}

impl<'ast> Visitor<'ast> for Counter {
    fn visit_integer_node(&mut self, _node: &'ast Node, payload: &'ast IntegerNode) {
        self.integers.extend(payload.value.to_i64());
    }

    fn visit_call_node(&mut self, node: &'ast Node, _payload: &'ast CallNode) {
        self.calls += 1;
        walk_node(self, node);
    }
}

#[test]
fn visitor_dispatches_and_walks() {
    let mut counter = Counter::default();
    sample().accept(&mut counter);
    assert_eq!(counter.integers, vec![1, 2]);
    assert_eq!(counter.calls, 1);
}

#[test]
fn pretty_prints_field_names() {
    let text = int(0, 2, 42).pretty();
    assert_eq!(text, "@ IntegerNode 0...2\n  flags: 0x0002\n  value: 42\n");
    let program = sample().pretty();
    assert!(program.contains("locals: [:foo]"));
    assert!(program.contains("body: (length: 2)"));
}

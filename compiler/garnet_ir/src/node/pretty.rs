use std::fmt::Write;

use super::{FieldRef, Node};

pub(super) fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let _ = writeln!(out, "@ {} {}", node.node_type().name(), node.location);
    for (name, field) in node.fields() {
        indent(out, depth + 1);
        let _ = write!(out, "{name}: ");
        match field {
            FieldRef::Node(child) | FieldRef::OptionalNode(Some(child)) => {
                write_node(out, child, depth + 1);
            }
            FieldRef::OptionalNode(None)
            | FieldRef::OptionalLocation(None)
            | FieldRef::OptionalConstant(None) => out.push_str("nil\n"),
            FieldRef::NodeList(list) => {
                let _ = writeln!(out, "(length: {})", list.len());
                for child in list {
                    indent(out, depth + 2);
                    write_node(out, child, depth + 2);
                }
            }
            FieldRef::Location(loc) | FieldRef::OptionalLocation(Some(loc)) => {
                let _ = writeln!(out, "{loc}");
            }
            FieldRef::Constant(name) | FieldRef::OptionalConstant(Some(name)) => {
                let _ = writeln!(out, "{name:?}");
            }
            FieldRef::ConstantList(names) => {
                let _ = writeln!(out, "{names:?}");
            }
            FieldRef::String(value) => {
                let _ = writeln!(out, "{value:?}");
            }
            FieldRef::Integer(value) => {
                let _ = writeln!(out, "{value}");
            }
            FieldRef::Double(value) => {
                let _ = writeln!(out, "{value:?}");
            }
            FieldRef::UInt32(value) => {
                let _ = writeln!(out, "{value}");
            }
            FieldRef::Flags(bits) => {
                let _ = writeln!(out, "0x{bits:04x}");
            }
        }
    }
}

//! The syntax tree.
//!
//! A [`Node`] is a location plus a [`NodeKind`], a closed sum over every
//! syntactic form. The variant list lives in `kinds.rs` and is expanded by
//! [`define_nodes!`], which generates for each variant:
//!
//! - a payload struct with the variant's fields in schema order
//! - a [`NodeType`] tag (the wire tag) and its static field schema
//! - a `Visitor` method whose default walks the children
//! - field reflection (`fields`) and reconstruction (`from_fields`)
//!
//! Children are exclusively owned (`Box<Node>`, `Vec<Node>`), so the tree is
//! strict and acyclic.

mod field;
pub mod flags;
mod pretty;

pub use field::{FieldError, FieldKind, FieldRef, FieldType, FieldValue};
pub use flags::*;

use crate::Location;

/// Expand the node variant table.
///
/// Each entry reads `Variant(PayloadStruct) = tag, visit_method { field: Type, ... }`.
/// Tags must be unique; field order is the wire order.
macro_rules! define_nodes {
    ($(
        $(#[$meta:meta])*
        $variant:ident($payload:ident) = $tag:literal, $visit:ident {
            $($field:ident: $ty:ty),* $(,)?
        }
    )*) => {
        /// Wire tag of each node variant.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum NodeType {
            $($variant = $tag,)*
        }

        impl NodeType {
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant,)*];

            pub const fn from_tag(tag: u8) -> Option<NodeType> {
                match tag {
                    $($tag => Some(NodeType::$variant),)*
                    _ => None,
                }
            }

            #[inline]
            pub const fn tag(self) -> u8 {
                self as u8
            }

            /// Payload type name, e.g. `CallNode`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeType::$variant => stringify!($payload),)*
                }
            }

            /// Field names and kinds in wire order.
            pub fn schema(self) -> &'static [(&'static str, $crate::node::FieldKind)] {
                match self {
                    $(NodeType::$variant => {
                        const SCHEMA: &[(&str, $crate::node::FieldKind)] =
                            &[$((stringify!($field), <$ty as $crate::node::FieldType>::KIND),)*];
                        SCHEMA
                    })*
                }
            }
        }

        $(
            $(#[$meta])*
            #[derive(Clone, Debug, PartialEq, Eq, Hash)]
            pub struct $payload {
                $(pub $field: $ty,)*
            }

            impl From<$payload> for NodeKind {
                #[inline]
                fn from(payload: $payload) -> NodeKind {
                    NodeKind::$variant(payload)
                }
            }
        )*

        /// Every syntactic form, with its payload.
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant($payload),)*
        }

        impl NodeKind {
            pub fn node_type(&self) -> NodeType {
                match self {
                    $(NodeKind::$variant(_) => NodeType::$variant,)*
                }
            }

            /// Fields as `(name, value)` pairs in schema order.
            #[allow(unused_variables)]
            pub fn fields(&self) -> Vec<(&'static str, $crate::node::FieldRef<'_>)> {
                match self {
                    $(NodeKind::$variant(node) => vec![
                        $((stringify!($field), $crate::node::FieldType::as_field(&node.$field)),)*
                    ],)*
                }
            }

            /// Rebuild a payload from values in schema order.
            pub fn from_fields(
                node_type: NodeType,
                values: Vec<$crate::node::FieldValue>,
            ) -> Result<NodeKind, $crate::node::FieldError> {
                let mut values = values.into_iter();
                let kind = match node_type {
                    $(NodeType::$variant => NodeKind::$variant($payload {
                        $($field: $crate::node::field::take_field(&mut values, stringify!($field))?,)*
                    }),)*
                };
                match values.len() {
                    0 => Ok(kind),
                    count => Err($crate::node::FieldError::Extra { count }),
                }
            }
        }

        /// Double-dispatch visitor over the tree.
        ///
        /// Every method defaults to walking the node's children in field
        /// order. Override a method to intercept a variant; call
        /// [`walk_node`] to keep descending.
        pub trait Visitor<'ast> {
            $(
                fn $visit(&mut self, node: &'ast $crate::node::Node, payload: &'ast $payload) {
                    let _ = payload;
                    $crate::node::walk_node(self, node);
                }
            )*
        }

        impl $crate::node::Node {
            /// Dispatch to the visitor method for this node's variant.
            pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, visitor: &mut V) {
                match &self.kind {
                    $(NodeKind::$variant(payload) => visitor.$visit(self, payload),)*
                }
            }
        }
    };
}

mod kinds;

pub use kinds::*;

/// A located syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub location: Location,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn new(location: Location, kind: impl Into<NodeKind>) -> Self {
        Node {
            location,
            kind: kind.into(),
        }
    }

    /// Placeholder for a required element that is absent.
    pub fn missing(location: Location) -> Self {
        Node::new(location, MissingNode {})
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn fields(&self) -> Vec<(&'static str, FieldRef<'_>)> {
        self.kind.fields()
    }

    /// Direct children in field order.
    pub fn child_nodes(&self) -> Vec<&Node> {
        let mut children = Vec::new();
        for (_, field) in self.kind.fields() {
            match field {
                FieldRef::Node(node) | FieldRef::OptionalNode(Some(node)) => children.push(node),
                FieldRef::NodeList(list) => children.extend(list.iter()),
                _ => {}
            }
        }
        children
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, NodeKind::Missing(_))
    }

    /// Multi-line rendering with field names, for debugging and snapshots.
    pub fn pretty(&self) -> String {
        pretty::render(self)
    }
}

/// Visit every direct child of `node`.
pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    for child in node.child_nodes() {
        child.accept(visitor);
    }
}

#[cfg(test)]
mod tests;

//! Binary codecs for crossing a process or language boundary.
//!
//! Two independent protocols, all integers little-endian:
//!
//! - **Options** ([`encode_options`] / [`decode_options`]): a flat record a
//!   host sends to configure a parse. Malformed records are a
//!   [`ConfigError`](garnet_parse::ConfigError).
//! - **Trees and token streams** ([`serialize_tree`] / [`deserialize_tree`],
//!   [`serialize_tokens`] / [`deserialize_tokens`]): a magic tag, a version
//!   triple, the metadata recorded alongside the parse, then the payload.
//!   Nodes are written depth-first in preorder, each prefixed with its
//!   record length so a reader can skip subtrees ([`read_node_header`]).
//!
//! Text is never copied into a tree or token buffer when it can be sliced
//! from the source, so decoding always takes the source bytes the buffer
//! was produced from. Decoding either rebuilds exactly what was encoded or
//! fails with a [`DecodeError`]; it never returns a partial result.

mod buffer;
mod error;
mod metadata;
mod options;
mod tokens;
mod tree;

pub use error::DecodeError;
pub use options::{decode_options, encode_options};
pub use tokens::{deserialize_tokens, serialize_tokens};
pub use tree::{deserialize_tree, read_node_header, root_offset, serialize_tree, NodeHeader};

/// Layout revision of the options record.
///
/// The record carries no header of its own; hosts agree on the revision out
/// of band.
pub const OPTIONS_FORMAT_VERSION: [u8; 3] = [1, 0, 0];

/// Version triple written after the magic tag of tree and token buffers.
///
/// A buffer is readable when its major and minor numbers match.
pub const TREE_FORMAT_VERSION: [u8; 3] = [1, 0, 0];

/// Magic tag of a serialized tree.
pub const TREE_MAGIC: [u8; 4] = *b"GRNT";

/// Magic tag of a serialized token stream.
pub const TOKENS_MAGIC: [u8; 4] = *b"GRTK";

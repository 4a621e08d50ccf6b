//! Tree buffers.
//!
//! After the shared preamble (magic `GRNT`, version, encoding, start line)
//! come the frozen-string-literal state, comments, magic comments, the
//! `__END__` location, errors, warnings, and finally the root node.
//!
//! A node record is its `u8` tag, the `u64` byte length of the whole record
//! (tag included), its location, and then each field in schema order:
//!
//! | Field | Encoding |
//! |-------|----------|
//! | node | nested record |
//! | optional anything | `u8` presence, then the payload |
//! | list | `u64` count, then the elements |
//! | location | `u64` start, `u64` end |
//! | constant | `u32` length + bytes |
//! | string | `u8` 0 + location (same bytes as the source) or 1 + `u32` length + bytes |
//! | integer | `u8` sign, `u32` word count, `u32` words least significant first |
//! | double | `u64` IEEE-754 bits |
//! | `u32` | itself |
//! | flags | `u16` |

use garnet_ir::{
    FieldKind, FieldRef, FieldValue, FloatValue, IntegerValue, Location, Name, Node, NodeKind, NodeType, Source,
    StringValue,
};
use garnet_parse::{ensure_sufficient_stack, ParseResult};
use tracing::debug;

use crate::buffer::{Reader, Writer};
use crate::metadata::{write_diagnostics, write_preamble, write_trivia, Decoder};
use crate::{DecodeError, TREE_MAGIC};

/// Tag, record length, and location.
const NODE_HEADER_LEN: usize = 1 + 8 + 16;

const FROZEN_UNSET: u8 = 0;
const FROZEN_FALSE: u8 = 1;
const FROZEN_TRUE: u8 = 2;

const STRING_SHARED: u8 = 0;
const STRING_OWNED: u8 = 1;

/// Encode a parse result as a tree buffer.
#[tracing::instrument(level = "debug", skip_all, fields(len = result.source.bytes().len()))]
pub fn serialize_tree(result: &ParseResult<'_>) -> Vec<u8> {
    let mut writer = Writer::new();
    write_preamble(&mut writer, TREE_MAGIC, result.encoding, result.source.start_line());
    writer.u8(match result.frozen_string_literal {
        None => FROZEN_UNSET,
        Some(false) => FROZEN_FALSE,
        Some(true) => FROZEN_TRUE,
    });
    write_trivia(&mut writer, &result.comments, &result.magic_comments, result.data_loc);
    write_diagnostics(&mut writer, &result.errors);
    write_diagnostics(&mut writer, &result.warnings);
    write_node(&mut writer, &result.root);
    debug!(bytes = writer.len(), "serialized tree");
    writer.finish()
}

/// Rebuild a parse result from a tree buffer and the source it was
/// produced from.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn deserialize_tree<'src>(source: &'src [u8], bytes: &[u8]) -> Result<ParseResult<'src>, DecodeError> {
    let mut decoder = Decoder::new(Reader::new(bytes), source.len());
    let (encoding, start_line) = decoder.preamble(TREE_MAGIC)?;

    let offset = decoder.reader.offset();
    let frozen_string_literal = match decoder.reader.u8()? {
        FROZEN_UNSET => None,
        FROZEN_FALSE => Some(false),
        FROZEN_TRUE => Some(true),
        value => {
            return Err(DecodeError::InvalidByte {
                field: "frozen string literal",
                value,
                offset,
            })
        }
    };

    let trivia = decoder.trivia()?;
    let errors = decoder.diagnostics()?;
    let warnings = decoder.diagnostics()?;
    let root = read_node(&mut decoder)?;
    decoder.finish()?;

    Ok(ParseResult {
        root,
        comments: trivia.comments,
        magic_comments: trivia.magic_comments,
        data_loc: trivia.data_loc,
        errors,
        warnings,
        encoding,
        frozen_string_literal,
        source: Source::new(source, start_line),
    })
}

/// The fixed prefix of a node record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NodeHeader {
    pub node_type: NodeType,
    /// Offset of the record in the buffer.
    pub offset: usize,
    /// Byte length of the whole record, nested nodes included.
    pub length: u64,
    pub location: Location,
}

impl NodeHeader {
    /// Offset just past the record: where its next sibling starts.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(usize::try_from(self.length).unwrap_or(usize::MAX))
    }

    /// Offset of the first field.
    pub fn fields_offset(&self) -> usize {
        self.offset + NODE_HEADER_LEN
    }
}

/// Read the header of the node record at `offset` without decoding its
/// fields.
///
/// Locations are not checked against a source here; a full decode does
/// that.
pub fn read_node_header(bytes: &[u8], offset: usize) -> Result<NodeHeader, DecodeError> {
    let mut decoder = Decoder::new(Reader::at(bytes, offset), usize::MAX);
    let tag = decoder.reader.u8()?;
    let node_type = NodeType::from_tag(tag).ok_or(DecodeError::UnknownNodeType { tag, offset })?;
    let length = decoder.reader.u64()?;
    let location = decoder.location()?;
    let header = NodeHeader {
        node_type,
        offset,
        length,
        location,
    };
    if length < NODE_HEADER_LEN as u64 || header.end() > bytes.len() {
        return Err(DecodeError::LengthMismatch {
            node: node_type.name(),
            offset,
            declared: length,
            actual: (bytes.len() - offset) as u64,
        });
    }
    Ok(header)
}

/// Offset of the root node record, past the metadata.
pub fn root_offset(bytes: &[u8]) -> Result<usize, DecodeError> {
    let mut decoder = Decoder::new(Reader::new(bytes), usize::MAX);
    decoder.preamble(TREE_MAGIC)?;
    decoder.reader.u8()?;
    decoder.trivia()?;
    decoder.diagnostics()?;
    decoder.diagnostics()?;
    Ok(decoder.reader.offset())
}

// === Encoding ===

fn write_node(writer: &mut Writer, node: &Node) {
    ensure_sufficient_stack(|| {
        let start = writer.len();
        writer.u8(node.node_type().tag());
        let length_at = writer.len();
        writer.u64(0);
        writer.location(node.location);
        for (_, field) in node.fields() {
            write_field(writer, field);
        }
        let length = (writer.len() - start) as u64;
        writer.patch_u64(length_at, length);
    });
}

#[allow(clippy::cast_possible_truncation)]
fn write_field(writer: &mut Writer, field: FieldRef<'_>) {
    match field {
        FieldRef::Node(node) => write_node(writer, node),
        FieldRef::OptionalNode(node) => {
            writer.bool(node.is_some());
            if let Some(node) = node {
                write_node(writer, node);
            }
        }
        FieldRef::NodeList(nodes) => {
            writer.count(nodes.len());
            for node in nodes {
                write_node(writer, node);
            }
        }
        FieldRef::Location(location) => writer.location(location),
        FieldRef::OptionalLocation(location) => {
            writer.bool(location.is_some());
            if let Some(location) = location {
                writer.location(location);
            }
        }
        FieldRef::Constant(name) => writer.bytes(name.as_bytes()),
        FieldRef::OptionalConstant(name) => {
            writer.bool(name.is_some());
            if let Some(name) = name {
                writer.bytes(name.as_bytes());
            }
        }
        FieldRef::ConstantList(names) => {
            writer.count(names.len());
            for name in names {
                writer.bytes(name.as_bytes());
            }
        }
        FieldRef::String(StringValue::Shared(location)) => {
            writer.u8(STRING_SHARED);
            writer.location(*location);
        }
        FieldRef::String(StringValue::Owned(bytes)) => {
            writer.u8(STRING_OWNED);
            writer.bytes(bytes);
        }
        FieldRef::Integer(value) => {
            let (negative, words) = value.to_words();
            writer.bool(negative);
            writer.u32(words.len() as u32);
            for word in words {
                writer.u32(word);
            }
        }
        FieldRef::Double(value) => writer.u64(value.bits()),
        FieldRef::UInt32(value) => writer.u32(value),
        FieldRef::Flags(bits) => writer.u16(bits),
    }
}

// === Decoding ===

fn read_node(decoder: &mut Decoder<'_>) -> Result<Node, DecodeError> {
    ensure_sufficient_stack(|| -> Result<Node, DecodeError> {
        let offset = decoder.reader.offset();
        let tag = decoder.reader.u8()?;
        let node_type = NodeType::from_tag(tag).ok_or(DecodeError::UnknownNodeType { tag, offset })?;
        let declared = decoder.reader.u64()?;
        let location = decoder.location()?;

        let schema = node_type.schema();
        let mut values = Vec::with_capacity(schema.len());
        for &(_, kind) in schema {
            values.push(read_field(decoder, kind)?);
        }

        let actual = (decoder.reader.offset() - offset) as u64;
        if actual != declared {
            return Err(DecodeError::LengthMismatch {
                node: node_type.name(),
                offset,
                declared,
                actual,
            });
        }
        let kind = NodeKind::from_fields(node_type, values).map_err(|source| DecodeError::Field {
            node: node_type.name(),
            offset,
            source,
        })?;
        Ok(Node::new(location, kind))
    })
}

fn read_field(decoder: &mut Decoder<'_>, kind: FieldKind) -> Result<FieldValue, DecodeError> {
    let value = match kind {
        FieldKind::Node => FieldValue::Node(Box::new(read_node(decoder)?)),
        FieldKind::OptionalNode => {
            let node = if decoder.present("optional node")? {
                Some(Box::new(read_node(decoder)?))
            } else {
                None
            };
            FieldValue::OptionalNode(node)
        }
        FieldKind::NodeList => {
            let count = decoder.reader.count()?;
            let mut nodes = Vec::with_capacity(decoder.reader.capacity(count, NODE_HEADER_LEN));
            for _ in 0..count {
                nodes.push(read_node(decoder)?);
            }
            FieldValue::NodeList(nodes)
        }
        FieldKind::Location => FieldValue::Location(decoder.location()?),
        FieldKind::OptionalLocation => {
            let location = if decoder.present("optional location")? {
                Some(decoder.location()?)
            } else {
                None
            };
            FieldValue::OptionalLocation(location)
        }
        FieldKind::Constant => FieldValue::Constant(Name::new(decoder.reader.bytes()?)),
        FieldKind::OptionalConstant => {
            let name = if decoder.present("optional constant")? {
                Some(Name::new(decoder.reader.bytes()?))
            } else {
                None
            };
            FieldValue::OptionalConstant(name)
        }
        FieldKind::ConstantList => {
            let count = decoder.reader.count()?;
            let mut names = Vec::with_capacity(decoder.reader.capacity(count, 4));
            for _ in 0..count {
                names.push(Name::new(decoder.reader.bytes()?));
            }
            FieldValue::ConstantList(names)
        }
        FieldKind::String => {
            let offset = decoder.reader.offset();
            match decoder.reader.u8()? {
                STRING_SHARED => FieldValue::String(StringValue::Shared(decoder.location()?)),
                STRING_OWNED => FieldValue::String(StringValue::Owned(decoder.reader.bytes()?.to_vec())),
                value => {
                    return Err(DecodeError::InvalidByte {
                        field: "string",
                        value,
                        offset,
                    })
                }
            }
        }
        FieldKind::Integer => {
            let negative = decoder.present("integer sign")?;
            let count = decoder.reader.u32()? as usize;
            let mut words = Vec::with_capacity(decoder.reader.capacity(count, 4));
            for _ in 0..count {
                words.push(decoder.reader.u32()?);
            }
            FieldValue::Integer(IntegerValue::from_words(negative, &words))
        }
        FieldKind::Double => FieldValue::Double(FloatValue::from_bits(decoder.reader.u64()?)),
        FieldKind::UInt32 => FieldValue::UInt32(decoder.reader.u32()?),
        FieldKind::Flags => FieldValue::Flags(decoder.reader.u16()?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests;

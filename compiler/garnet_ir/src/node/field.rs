//! Field schema: the statically known kinds of values a node can carry.
//!
//! Every node payload field implements [`FieldType`], which ties the Rust
//! type to a [`FieldKind`] (used by the wire codec to know what comes next)
//! and converts to a borrowed [`FieldRef`] or from an owned [`FieldValue`].

use std::fmt;

use super::flags::{
    ArgumentsFlags, ArrayFlags, CallFlags, IntegerBaseFlags, InterpolatedStringFlags,
    KeywordHashFlags, LoopFlags, ParameterFlags, RangeFlags, RegularExpressionFlags, StringFlags,
    SymbolFlags,
};
use super::Node;
use crate::{FloatValue, IntegerValue, Location, Name, StringValue};

/// Kind of a node field, in schema order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FieldKind {
    Node,
    OptionalNode,
    NodeList,
    Location,
    OptionalLocation,
    Constant,
    OptionalConstant,
    ConstantList,
    String,
    Integer,
    Double,
    UInt32,
    Flags,
}

/// Borrowed view of one field of a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldRef<'a> {
    Node(&'a Node),
    OptionalNode(Option<&'a Node>),
    NodeList(&'a [Node]),
    Location(Location),
    OptionalLocation(Option<Location>),
    Constant(&'a Name),
    OptionalConstant(Option<&'a Name>),
    ConstantList(&'a [Name]),
    String(&'a StringValue),
    Integer(&'a IntegerValue),
    Double(FloatValue),
    UInt32(u32),
    Flags(u16),
}

impl FieldRef<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::Node(_) => FieldKind::Node,
            FieldRef::OptionalNode(_) => FieldKind::OptionalNode,
            FieldRef::NodeList(_) => FieldKind::NodeList,
            FieldRef::Location(_) => FieldKind::Location,
            FieldRef::OptionalLocation(_) => FieldKind::OptionalLocation,
            FieldRef::Constant(_) => FieldKind::Constant,
            FieldRef::OptionalConstant(_) => FieldKind::OptionalConstant,
            FieldRef::ConstantList(_) => FieldKind::ConstantList,
            FieldRef::String(_) => FieldKind::String,
            FieldRef::Integer(_) => FieldKind::Integer,
            FieldRef::Double(_) => FieldKind::Double,
            FieldRef::UInt32(_) => FieldKind::UInt32,
            FieldRef::Flags(_) => FieldKind::Flags,
        }
    }
}

/// Owned field value, produced by a decoder and consumed by
/// [`NodeKind::from_fields`](super::NodeKind::from_fields).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Node(Box<Node>),
    OptionalNode(Option<Box<Node>>),
    NodeList(Vec<Node>),
    Location(Location),
    OptionalLocation(Option<Location>),
    Constant(Name),
    OptionalConstant(Option<Name>),
    ConstantList(Vec<Name>),
    String(StringValue),
    Integer(IntegerValue),
    Double(FloatValue),
    UInt32(u32),
    Flags(u16),
}

/// Failure to assemble a node from decoded field values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Fewer values than the schema lists.
    Missing { field: &'static str },
    /// A value of the wrong kind, or flag bits outside the known set.
    Mismatch {
        field: &'static str,
        expected: FieldKind,
    },
    /// More values than the schema lists.
    Extra { count: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing { field } => write!(f, "missing value for field `{field}`"),
            FieldError::Mismatch { field, expected } => {
                write!(f, "field `{field}` expected a {expected:?} value")
            }
            FieldError::Extra { count } => write!(f, "{count} unexpected trailing field values"),
        }
    }
}

impl std::error::Error for FieldError {}

/// A Rust type usable as a node payload field.
pub trait FieldType: Sized {
    const KIND: FieldKind;

    fn as_field(&self) -> FieldRef<'_>;

    /// Convert back from an owned value; `None` on a kind mismatch.
    fn from_value(value: FieldValue) -> Option<Self>;
}

macro_rules! simple_field {
    ($ty:ty, $kind:ident, |$s:ident| $as:expr) => {
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::$kind;

            #[inline]
            fn as_field(&self) -> FieldRef<'_> {
                let $s = self;
                FieldRef::$kind($as)
            }

            fn from_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

simple_field!(Box<Node>, Node, |s| s);
simple_field!(Option<Box<Node>>, OptionalNode, |s| s.as_deref());
simple_field!(Vec<Node>, NodeList, |s| s);
simple_field!(Location, Location, |s| *s);
simple_field!(Option<Location>, OptionalLocation, |s| *s);
simple_field!(Name, Constant, |s| s);
simple_field!(Option<Name>, OptionalConstant, |s| s.as_ref());
simple_field!(Vec<Name>, ConstantList, |s| s);
simple_field!(StringValue, String, |s| s);
simple_field!(IntegerValue, Integer, |s| s);
simple_field!(FloatValue, Double, |s| *s);
simple_field!(u32, UInt32, |s| *s);

macro_rules! flags_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: FieldKind = FieldKind::Flags;

                #[inline]
                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Flags(self.bits())
                }

                fn from_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Flags(bits) => <$ty>::from_bits(bits),
                        _ => None,
                    }
                }
            }
        )*
    };
}

flags_field!(
    CallFlags,
    ArgumentsFlags,
    ArrayFlags,
    StringFlags,
    SymbolFlags,
    RegularExpressionFlags,
    IntegerBaseFlags,
    LoopFlags,
    RangeFlags,
    ParameterFlags,
    KeywordHashFlags,
    InterpolatedStringFlags,
);

/// Pull the next value off `values` and convert it to the field's type.
pub(crate) fn take_field<T: FieldType>(
    values: &mut impl Iterator<Item = FieldValue>,
    field: &'static str,
) -> Result<T, FieldError> {
    let value = values.next().ok_or(FieldError::Missing { field })?;
    T::from_value(value).ok_or(FieldError::Mismatch {
        field,
        expected: T::KIND,
    })
}

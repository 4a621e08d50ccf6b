//! Comments and magic comments recorded alongside the tree.

use crate::Location;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CommentKind {
    /// `# ...` to the end of the line.
    Inline = 0,
    /// `=begin ... =end`
    EmbeddedDoc = 1,
    /// Everything after `__END__`.
    TrailingDocument = 2,
}

impl CommentKind {
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(CommentKind::Inline),
            1 => Some(CommentKind::EmbeddedDoc),
            2 => Some(CommentKind::TrailingDocument),
            _ => None,
        }
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Comment {
    pub kind: CommentKind,
    pub location: Location,
}

impl Comment {
    pub fn new(kind: CommentKind, location: Location) -> Self {
        Comment { kind, location }
    }
}

/// A recognised `key: value` magic comment, e.g. `# frozen_string_literal: true`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MagicComment {
    pub key_loc: Location,
    pub value_loc: Location,
}

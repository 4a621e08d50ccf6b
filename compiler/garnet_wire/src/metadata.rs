//! Framing and metadata shared by tree and token-stream buffers: magic tag,
//! version, encoding, start line, comments, `__END__` location, and
//! diagnostics.

use garnet_diagnostic::{Diagnostic, DiagnosticId, Level};
use garnet_ir::{Comment, CommentKind, Encoding, Location, MagicComment};

use crate::buffer::{Reader, Writer};
use crate::{DecodeError, TREE_FORMAT_VERSION};

pub(crate) fn write_preamble(writer: &mut Writer, magic: [u8; 4], encoding: Encoding, start_line: i32) {
    writer.raw(&magic);
    writer.raw(&TREE_FORMAT_VERSION);
    writer.bytes(encoding.name().as_bytes());
    writer.i32(start_line);
}

pub(crate) fn write_trivia(
    writer: &mut Writer,
    comments: &[Comment],
    magic_comments: &[MagicComment],
    data_loc: Option<Location>,
) {
    writer.count(comments.len());
    for comment in comments {
        writer.u8(comment.kind.tag());
        writer.location(comment.location);
    }
    writer.count(magic_comments.len());
    for magic in magic_comments {
        writer.location(magic.key_loc);
        writer.location(magic.value_loc);
    }
    writer.bool(data_loc.is_some());
    if let Some(location) = data_loc {
        writer.location(location);
    }
}

pub(crate) fn write_diagnostics(writer: &mut Writer, diagnostics: &[Diagnostic]) {
    writer.count(diagnostics.len());
    for diagnostic in diagnostics {
        writer.u16(diagnostic.id.as_u16());
        writer.u8(diagnostic.level.tag());
        writer.bytes(diagnostic.message.as_bytes());
        writer.location(diagnostic.location);
    }
}

/// Comments and the data section, as read back.
pub(crate) struct Trivia {
    pub comments: Vec<Comment>,
    pub magic_comments: Vec<MagicComment>,
    pub data_loc: Option<Location>,
}

/// Reader that also validates locations against the source length.
pub(crate) struct Decoder<'a> {
    pub reader: Reader<'a>,
    source_len: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(reader: Reader<'a>, source_len: usize) -> Self {
        Decoder { reader, source_len }
    }

    /// Magic tag, version, encoding, and start line.
    pub(crate) fn preamble(&mut self, magic: [u8; 4]) -> Result<(Encoding, i32), DecodeError> {
        let found = self.reader.magic()?;
        if found != magic {
            return Err(DecodeError::BadMagic { expected: magic, found });
        }
        let version = self.reader.version()?;
        if version[..2] != TREE_FORMAT_VERSION[..2] {
            return Err(DecodeError::UnsupportedVersion { found: version });
        }
        let name = self.reader.bytes()?;
        let encoding = Encoding::find(name)
            .ok_or_else(|| DecodeError::UnknownEncoding(String::from_utf8_lossy(name).into_owned()))?;
        let start_line = self.reader.i32()?;
        Ok((encoding, start_line))
    }

    pub(crate) fn location(&mut self) -> Result<Location, DecodeError> {
        let offset = self.reader.offset();
        let start = self.reader.u64()?;
        let end = self.reader.u64()?;
        let location =
            Location::try_from_offsets(start, end).map_err(|source| DecodeError::Location { offset, source })?;
        if location.end as usize > self.source_len {
            return Err(DecodeError::OutOfBounds {
                location,
                offset,
                len: self.source_len,
            });
        }
        Ok(location)
    }

    /// A presence byte: 0 or 1.
    pub(crate) fn present(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        let offset = self.reader.offset();
        match self.reader.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidByte { field, value, offset }),
        }
    }

    pub(crate) fn trivia(&mut self) -> Result<Trivia, DecodeError> {
        let count = self.reader.count()?;
        let mut comments = Vec::with_capacity(self.reader.capacity(count, 17));
        for _ in 0..count {
            let offset = self.reader.offset();
            let tag = self.reader.u8()?;
            let kind = CommentKind::from_tag(tag).ok_or(DecodeError::UnknownCommentKind { tag, offset })?;
            comments.push(Comment::new(kind, self.location()?));
        }

        let count = self.reader.count()?;
        let mut magic_comments = Vec::with_capacity(self.reader.capacity(count, 32));
        for _ in 0..count {
            let key_loc = self.location()?;
            let value_loc = self.location()?;
            magic_comments.push(MagicComment { key_loc, value_loc });
        }

        let data_loc = if self.present("data location")? {
            Some(self.location()?)
        } else {
            None
        };
        Ok(Trivia {
            comments,
            magic_comments,
            data_loc,
        })
    }

    pub(crate) fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, DecodeError> {
        let count = self.reader.count()?;
        let mut diagnostics = Vec::with_capacity(self.reader.capacity(count, 23));
        for _ in 0..count {
            let offset = self.reader.offset();
            let raw = self.reader.u16()?;
            let id = DiagnosticId::from_u16(raw).ok_or(DecodeError::UnknownDiagnostic { id: raw, offset })?;

            let offset = self.reader.offset();
            let tag = self.reader.u8()?;
            let level = Level::from_tag(id.severity(), tag).ok_or(DecodeError::InvalidByte {
                field: "diagnostic level",
                value: tag,
                offset,
            })?;

            let offset = self.reader.offset();
            let message = std::str::from_utf8(self.reader.bytes()?)
                .map_err(|_| DecodeError::InvalidUtf8 {
                    field: "diagnostic message",
                    offset,
                })?
                .to_owned();

            let location = self.location()?;
            diagnostics.push(Diagnostic {
                id,
                severity: id.severity(),
                level,
                message,
                location,
            });
        }
        Ok(diagnostics)
    }

    /// Fail unless every byte was consumed.
    pub(crate) fn finish(self) -> Result<(), DecodeError> {
        match self.reader.remaining() {
            0 => Ok(()),
            count => Err(DecodeError::TrailingBytes { count }),
        }
    }
}

//! Token-stream buffers.
//!
//! The preamble (magic `GRTK`, version, encoding, start line), comments,
//! magic comments, the `__END__` location, errors, and warnings, then a
//! `u64` token count and each token as its `u8` kind tag and location.
//! Token text is sliced back out of the source on decode.

use garnet_ir::{Source, Token, TokenKind};
use garnet_parse::LexResult;
use tracing::debug;

use crate::buffer::{Reader, Writer};
use crate::metadata::{write_diagnostics, write_preamble, write_trivia, Decoder};
use crate::{DecodeError, TOKENS_MAGIC};

/// Tag and location.
const TOKEN_LEN: usize = 1 + 16;

#[tracing::instrument(level = "debug", skip_all, fields(tokens = result.tokens.len()))]
pub fn serialize_tokens(result: &LexResult<'_>) -> Vec<u8> {
    let mut writer = Writer::new();
    write_preamble(&mut writer, TOKENS_MAGIC, result.encoding, result.source.start_line());
    write_trivia(&mut writer, &result.comments, &result.magic_comments, result.data_loc);
    write_diagnostics(&mut writer, &result.errors);
    write_diagnostics(&mut writer, &result.warnings);
    writer.count(result.tokens.len());
    for token in &result.tokens {
        writer.u8(token.kind.tag());
        writer.location(token.location);
    }
    debug!(bytes = writer.len(), "serialized tokens");
    writer.finish()
}

#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn deserialize_tokens<'src>(source: &'src [u8], bytes: &[u8]) -> Result<LexResult<'src>, DecodeError> {
    let mut decoder = Decoder::new(Reader::new(bytes), source.len());
    let (encoding, start_line) = decoder.preamble(TOKENS_MAGIC)?;
    let trivia = decoder.trivia()?;
    let errors = decoder.diagnostics()?;
    let warnings = decoder.diagnostics()?;

    let count = decoder.reader.count()?;
    let mut tokens = Vec::with_capacity(decoder.reader.capacity(count, TOKEN_LEN));
    for _ in 0..count {
        let offset = decoder.reader.offset();
        let tag = decoder.reader.u8()?;
        let kind = TokenKind::from_tag(tag).ok_or(DecodeError::UnknownTokenKind { tag, offset })?;
        let location = decoder.location()?;
        tokens.push(Token::new(kind, location, &source[location.range()]));
    }
    decoder.finish()?;

    Ok(LexResult {
        tokens,
        comments: trivia.comments,
        magic_comments: trivia.magic_comments,
        data_loc: trivia.data_loc,
        errors,
        warnings,
        encoding,
        source: Source::new(source, start_line),
    })
}

#[cfg(test)]
mod tests;

//! The options record a host sends to configure a parse.
//!
//! Layout, in order:
//!
//! | Field | Encoding |
//! |-------|----------|
//! | filepath | `u32` length + bytes; empty means none |
//! | start line | `i32` |
//! | encoding | `u32` length + name; empty means detect |
//! | frozen string literal | `u8`: 0 unset, 1 true, `0xFF` false |
//! | command line | `u8` bits `a e l n p x` from bit 0 |
//! | version | `u8` selector: 0 latest, 1 `3.3`, 2 `3.4` |
//! | encoding locked | `u8` 0/1 |
//! | main script | `u8` 0/1 |
//! | partial script | `u8` 0/1 |
//! | reserved | `u8`, must be 0 |
//! | scopes | `u32` count; each `u32` local count, `u8` forwarding bits `* ** & ...`, then each local as `u32` length + bytes |
//!
//! The frozen string literal byte has three states, not two. 0 leaves the
//! choice to a `frozen_string_literal` magic comment, so string literals
//! carry neither the frozen nor the mutable flag. A host that wants
//! literals marked mutable sends `0xFF` (-1 as `i8`).

use garnet_ir::{Encoding, Name};
use garnet_parse::{CommandLine, ConfigError, Forwarding, Options, OptionsScope, Version};
use tracing::debug;

use crate::buffer::{Reader, Writer};

const FROZEN_UNSET: u8 = 0;
const FROZEN_TRUE: u8 = 1;
const FROZEN_FALSE: u8 = 0xFF;

/// Encode `options` as an options record.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_options(options: &Options) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.bytes(options.filepath.as_deref().unwrap_or_default());
    writer.i32(options.start_line);
    writer.bytes(options.encoding.map_or("", Encoding::name).as_bytes());
    writer.u8(match options.frozen_string_literal {
        None => FROZEN_UNSET,
        Some(true) => FROZEN_TRUE,
        Some(false) => FROZEN_FALSE,
    });
    writer.u8(options.command_line.bits());
    writer.u8(options.version.selector());
    writer.bool(options.encoding_locked);
    writer.bool(options.main_script);
    writer.bool(options.partial_script);
    writer.u8(0);

    writer.u32(options.scopes.len() as u32);
    for scope in &options.scopes {
        writer.u32(scope.locals.len() as u32);
        writer.u8(scope.forwarding.bits());
        for local in &scope.locals {
            writer.bytes(local.as_bytes());
        }
    }
    writer.finish()
}

/// Decode an options record.
///
/// Every byte must be accounted for: unknown bits, out-of-range selectors,
/// a non-zero reserved byte, truncation, and trailing bytes are all errors.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn decode_options(bytes: &[u8]) -> Result<Options, ConfigError> {
    let mut reader = Reader::new(bytes);

    let filepath = reader.bytes()?;
    let start_line = reader.i32()?;
    let name = reader.bytes()?;
    let encoding = if name.is_empty() {
        None
    } else {
        let encoding = Encoding::find(name)
            .ok_or_else(|| ConfigError::UnknownEncoding(String::from_utf8_lossy(name).into_owned()))?;
        Some(encoding)
    };

    let offset = reader.offset();
    let frozen_string_literal = match reader.u8()? {
        FROZEN_UNSET => None,
        FROZEN_TRUE => Some(true),
        FROZEN_FALSE => Some(false),
        value => return Err(invalid("frozen string literal", value, offset)),
    };

    let offset = reader.offset();
    let value = reader.u8()?;
    let command_line = CommandLine::from_bits(value).ok_or(invalid("command line", value, offset))?;

    let offset = reader.offset();
    let value = reader.u8()?;
    let version = Version::from_selector(value).ok_or(invalid("version", value, offset))?;

    let encoding_locked = flag(&mut reader, "encoding locked")?;
    let main_script = flag(&mut reader, "main script")?;
    let partial_script = flag(&mut reader, "partial script")?;

    let offset = reader.offset();
    if reader.u8()? != 0 {
        return Err(ConfigError::Reserved { offset });
    }

    let count = reader.u32()? as usize;
    let mut scopes = Vec::with_capacity(reader.capacity(count, 5));
    for _ in 0..count {
        let locals = reader.u32()? as usize;
        let offset = reader.offset();
        let value = reader.u8()?;
        let forwarding = Forwarding::from_bits(value).ok_or(invalid("forwarding", value, offset))?;
        let mut scope = OptionsScope {
            locals: Vec::with_capacity(reader.capacity(locals, 4)),
            forwarding,
        };
        for _ in 0..locals {
            scope.locals.push(Name::new(reader.bytes()?));
        }
        scopes.push(scope);
    }

    match reader.remaining() {
        0 => {}
        count => return Err(ConfigError::TrailingBytes { count }),
    }

    debug!(scopes = scopes.len(), ?version, "decoded options");
    Ok(Options {
        filepath: (!filepath.is_empty()).then(|| filepath.to_vec()),
        start_line,
        encoding,
        frozen_string_literal,
        command_line,
        version,
        encoding_locked,
        main_script,
        partial_script,
        scopes,
    })
}

fn invalid(field: &'static str, value: u8, offset: usize) -> ConfigError {
    ConfigError::InvalidByte { field, value, offset }
}

fn flag(reader: &mut Reader<'_>, field: &'static str) -> Result<bool, ConfigError> {
    let offset = reader.offset();
    match reader.u8()? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(invalid(field, value, offset)),
    }
}

#[cfg(test)]
mod tests;

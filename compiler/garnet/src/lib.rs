//! Garnet: a fault-tolerant parser with a binary transfer format.
//!
//! The [`Engine`] is the entry point for hosts. It parses or lexes source
//! bytes under a default set of [`Options`], and moves results across a
//! process or language boundary as byte buffers:
//!
//! ```text
//! host options ──decode_options──▶ Options
//! source ──parse──▶ ParseResult ──serialize_tree──▶ bytes
//! bytes + source ──deserialize_tree──▶ ParseResult
//! ```
//!
//! Syntax errors never fail a call; they are diagnostics on the result.
//! Only unusable options ([`ConfigError`]) and malformed buffers
//! ([`DecodeError`]) are `Err`s, both wrapped in [`EngineError`].

use std::io::{self, Write};
use std::sync::Once;

use thiserror::Error;
use tracing::debug;

pub use garnet_diagnostic::{ColorMode, Diagnostic, DiagnosticId, Level, Severity, TerminalEmitter};
pub use garnet_ir::{
    Comment, CommentKind, Encoding, Location, MagicComment, Name, Node, NodeKind, NodeType, Source, Token, TokenKind,
    Visitor,
};
pub use garnet_parse::{
    lex, parse, CommandLine, ConfigError, Forwarding, LexResult, Options, OptionsScope, ParseResult, Version,
};
pub use garnet_wire::{
    decode_options, encode_options, read_node_header, root_offset, DecodeError, NodeHeader, OPTIONS_FORMAT_VERSION,
    TREE_FORMAT_VERSION,
};

/// Any failure a host can see.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once; only
/// the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Options for calls that do not bring their own.
    pub options: Options,
    /// Call [`init_tracing`] when the engine is created.
    pub tracing: bool,
}

impl EngineConfig {
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_tracing(mut self, tracing: bool) -> Self {
        self.tracing = tracing;
        self
    }
}

/// Parses, lexes, and transfers trees.
///
/// Holds no state between calls beyond its configuration; one engine can
/// be shared by any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

#[allow(clippy::unused_self)]
impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        if config.tracing {
            init_tracing();
        }
        Engine { config }
    }

    pub fn options(&self) -> &Options {
        &self.config.options
    }

    /// Parse under the default options.
    pub fn parse<'src>(&self, source: &'src [u8]) -> ParseResult<'src> {
        garnet_parse::parse(source, &self.config.options)
    }

    /// Parse under options received as an encoded record.
    pub fn parse_encoded<'src>(&self, source: &'src [u8], options: &[u8]) -> Result<ParseResult<'src>, EngineError> {
        let options = decode_options(options)?;
        Ok(garnet_parse::parse(source, &options))
    }

    /// Tokens of `source` under the default options.
    pub fn lex<'src>(&self, source: &'src [u8]) -> LexResult<'src> {
        garnet_parse::lex(source, &self.config.options)
    }

    /// Parse and encode the result as a tree buffer.
    pub fn serialize_tree(&self, source: &[u8]) -> Vec<u8> {
        serialize_tree(source, &self.config.options)
    }

    pub fn deserialize_tree<'src>(&self, source: &'src [u8], bytes: &[u8]) -> Result<ParseResult<'src>, EngineError> {
        deserialize_tree(source, bytes)
    }

    /// Lex and encode the tokens as a token buffer.
    pub fn serialize_tokens(&self, source: &[u8]) -> Vec<u8> {
        serialize_tokens(source, &self.config.options)
    }

    pub fn deserialize_tokens<'src>(
        &self,
        source: &'src [u8],
        bytes: &[u8],
    ) -> Result<LexResult<'src>, EngineError> {
        deserialize_tokens(source, bytes)
    }
}

/// Parse `source` and encode the result as a tree buffer.
pub fn serialize_tree(source: &[u8], options: &Options) -> Vec<u8> {
    let result = garnet_parse::parse(source, options);
    debug!(errors = result.errors.len(), "serializing parse");
    garnet_wire::serialize_tree(&result)
}

/// Rebuild the parse result encoded in `bytes`; `source` must be the
/// bytes it was parsed from.
pub fn deserialize_tree<'src>(source: &'src [u8], bytes: &[u8]) -> Result<ParseResult<'src>, EngineError> {
    Ok(garnet_wire::deserialize_tree(source, bytes)?)
}

/// Lex `source` and encode the tokens as a token buffer.
pub fn serialize_tokens(source: &[u8], options: &Options) -> Vec<u8> {
    garnet_wire::serialize_tokens(&garnet_parse::lex(source, options))
}

pub fn deserialize_tokens<'src>(source: &'src [u8], bytes: &[u8]) -> Result<LexResult<'src>, EngineError> {
    Ok(garnet_wire::deserialize_tokens(source, bytes)?)
}

/// Write every error and warning of `result`, then a count.
pub fn report<W: Write>(result: &ParseResult<'_>, path: &str, writer: W, mode: ColorMode) -> io::Result<W> {
    let mut emitter = TerminalEmitter::with_color_mode(writer, mode, false);
    for diagnostic in result.errors.iter().chain(&result.warnings) {
        emitter.emit(diagnostic, &result.source, path)?;
    }
    emitter.emit_summary(result.errors.len(), result.warnings.len())?;
    emitter.flush()?;
    Ok(emitter.into_inner())
}

//! Parser configuration.
//!
//! Options are built in-process with the `with_*` builders, or decoded
//! from the binary options record by `garnet_wire`. Builders that take a
//! string validate it and return a [`ConfigError`] for unknown values.

use bitflags::bitflags;
use garnet_ir::{Encoding, Name};

use crate::scope::Forwarding;
use crate::ConfigError;

bitflags! {
    /// Command-line switches that change how the program is parsed.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CommandLine: u8 {
        /// `-a`: split each input line into `$F`.
        const A = 1 << 0;
        /// `-e`: the source came from the command line.
        const E = 1 << 1;
        /// `-l`: chomp each input line.
        const L = 1 << 2;
        /// `-n`: wrap the program in `while gets ... end`.
        const N = 1 << 3;
        /// `-p`: like `-n`, printing `$_` after each iteration.
        const P = 1 << 4;
        /// `-x`: skip leading lines up to a `#!...ruby` line.
        const X = 1 << 5;
    }
}

impl CommandLine {
    /// Flag for a switch letter.
    pub fn from_letter(letter: char) -> Result<CommandLine, ConfigError> {
        Ok(match letter {
            'a' => CommandLine::A,
            'e' => CommandLine::E,
            'l' => CommandLine::L,
            'n' => CommandLine::N,
            'p' => CommandLine::P,
            'x' => CommandLine::X,
            other => return Err(ConfigError::UnknownCommandLineFlag(other)),
        })
    }

    /// Parse a run of switch letters such as `"nl"`.
    pub fn parse(letters: &str) -> Result<CommandLine, ConfigError> {
        letters
            .chars()
            .try_fold(CommandLine::empty(), |flags, letter| {
                Ok(flags | CommandLine::from_letter(letter)?)
            })
    }
}

/// Language version the source is parsed as.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Version {
    #[default]
    Latest = 0,
    V3_3 = 1,
    V3_4 = 2,
}

impl Version {
    /// `"latest"`, `"3.3"`, `"3.4"`, or a patch release of either.
    pub fn parse(version: &str) -> Result<Version, ConfigError> {
        let known = |minor: &str| {
            version == minor
                || version
                    .strip_prefix(minor)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|patch| !patch.is_empty() && patch.bytes().all(|b| b.is_ascii_digit()))
        };
        if version == "latest" {
            Ok(Version::Latest)
        } else if known("3.3") {
            Ok(Version::V3_3)
        } else if known("3.4") {
            Ok(Version::V3_4)
        } else {
            Err(ConfigError::UnknownVersion(version.to_string()))
        }
    }

    pub const fn from_selector(selector: u8) -> Option<Version> {
        match selector {
            0 => Some(Version::Latest),
            1 => Some(Version::V3_3),
            2 => Some(Version::V3_4),
            _ => None,
        }
    }

    #[inline]
    pub const fn selector(self) -> u8 {
        self as u8
    }

    /// `it` is an implicit block parameter from 3.4 on.
    pub fn has_it_parameter(self) -> bool {
        !matches!(self, Version::V3_3)
    }
}

/// Locals visible to the source from an enclosing evaluation context.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct OptionsScope {
    pub locals: Vec<Name>,
    pub forwarding: Forwarding,
}

impl OptionsScope {
    pub fn new<I, N>(locals: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        OptionsScope {
            locals: locals.into_iter().map(Into::into).collect(),
            forwarding: Forwarding::empty(),
        }
    }

    /// Mark the scope as forwarding `*`, `**`, `&`, or `...`.
    pub fn with_forwarding(mut self, parameter: &str) -> Result<Self, ConfigError> {
        self.forwarding |= Forwarding::parse(parameter)?;
        Ok(self)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Options {
    /// Value of `__FILE__`.
    pub filepath: Option<Vec<u8>>,
    /// Number of the first line.
    pub start_line: i32,
    /// Source encoding; detected from magic comments when unset.
    pub encoding: Option<Encoding>,
    pub frozen_string_literal: Option<bool>,
    pub command_line: CommandLine,
    pub version: Version,
    /// Ignore `# encoding:` magic comments.
    pub encoding_locked: bool,
    /// The source is the main script, so shebang switches apply.
    pub main_script: bool,
    /// The source is a fragment of a method body; top-level `yield` is fine.
    pub partial_script: bool,
    /// Enclosing scopes, outermost first.
    pub scopes: Vec<OptionsScope>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            filepath: None,
            start_line: 1,
            encoding: None,
            frozen_string_literal: None,
            command_line: CommandLine::empty(),
            version: Version::Latest,
            encoding_locked: false,
            main_script: false,
            partial_script: false,
            scopes: Vec::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    #[must_use]
    pub fn with_filepath(mut self, filepath: impl Into<Vec<u8>>) -> Self {
        self.filepath = Some(filepath.into());
        self
    }

    #[must_use]
    pub fn with_start_line(mut self, line: i32) -> Self {
        self.start_line = line;
        self
    }

    pub fn with_encoding(mut self, name: &str) -> Result<Self, ConfigError> {
        let encoding =
            Encoding::find(name.as_bytes()).ok_or_else(|| ConfigError::UnknownEncoding(name.to_string()))?;
        self.encoding = Some(encoding);
        Ok(self)
    }

    #[must_use]
    pub fn with_frozen_string_literal(mut self, frozen: bool) -> Self {
        self.frozen_string_literal = Some(frozen);
        self
    }

    pub fn with_command_line(mut self, letters: &str) -> Result<Self, ConfigError> {
        self.command_line = CommandLine::parse(letters)?;
        Ok(self)
    }

    pub fn with_version(mut self, version: &str) -> Result<Self, ConfigError> {
        self.version = Version::parse(version)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_encoding_locked(mut self, locked: bool) -> Self {
        self.encoding_locked = locked;
        self
    }

    #[must_use]
    pub fn with_main_script(mut self, main_script: bool) -> Self {
        self.main_script = main_script;
        self
    }

    #[must_use]
    pub fn with_partial_script(mut self, partial_script: bool) -> Self {
        self.partial_script = partial_script;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: OptionsScope) -> Self {
        self.scopes.push(scope);
        self
    }
}

#[cfg(test)]
mod tests;

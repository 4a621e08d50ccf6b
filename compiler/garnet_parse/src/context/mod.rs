//! Parse context flags for context-sensitive parsing.
//!
//! Some constructs only mean something in certain positions: `do` after a
//! command argument belongs to the command, not to the argument; `retry` is
//! only valid in a `rescue` clause. The parser threads a [`ParseContext`]
//! through those positions and restores the previous one on the way out.

/// Context flags for parsing. Flags combine with [`with`](Self::with).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u16);

impl ParseContext {
    /// No special context.
    pub const NONE: Self = Self(0);

    /// A `do` here closes the enclosing command call, so inner calls must
    /// not take it as their block (`foo bar do ... end`).
    pub const NO_DO_BLOCK: Self = Self(1 << 0);

    /// Inside a `rescue` clause, where `retry` is valid.
    pub const IN_RESCUE: Self = Self(1 << 1);

    /// `|` closes a block parameter list instead of being binary or.
    pub const PIPE_IS_SEPARATOR: Self = Self(1 << 2);

    /// Inside a `def` body or its parameter defaults.
    pub const IN_DEF: Self = Self(1 << 3);

    /// Inside a pattern of `case/in`, `=>`, or `in`.
    pub const IN_PATTERN: Self = Self(1 << 4);

    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    /// Whether a `do` may open a block on the call being parsed.
    #[inline]
    pub const fn allows_do_block(self) -> bool {
        !self.has(Self::NO_DO_BLOCK)
    }

    #[inline]
    pub const fn in_rescue(self) -> bool {
        self.has(Self::IN_RESCUE)
    }

    #[inline]
    pub const fn pipe_is_separator(self) -> bool {
        self.has(Self::PIPE_IS_SEPARATOR)
    }

    #[inline]
    pub const fn in_def(self) -> bool {
        self.has(Self::IN_DEF)
    }

    #[inline]
    pub const fn in_pattern(self) -> bool {
        self.has(Self::IN_PATTERN)
    }
}

#[cfg(test)]
mod tests;

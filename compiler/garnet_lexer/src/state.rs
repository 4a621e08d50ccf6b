//! Lexer state: what the lexer expects next.
//!
//! The same bytes lex differently depending on what came before. `foo -1`
//! is a call with a negative argument when `foo` is a method but a
//! subtraction when `foo` is a local; `/` starts a regexp at the beginning
//! of an expression and divides after a value. The state records enough of
//! the preceding context to make these choices.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct LexState: u16 {
        /// Beginning of an expression.
        const BEG = 1 << 0;
        /// After a value; operators are binary.
        const END = 1 << 1;
        /// After a closing parenthesis of a command argument.
        const ENDARG = 1 << 2;
        /// After a method name in a definition, or a closing parenthesis.
        const ENDFN = 1 << 3;
        /// After a method name that may take arguments without parentheses.
        const ARG = 1 << 4;
        /// Like `ARG`, at the start of a command.
        const CMDARG = 1 << 5;
        /// After `return`, `break`, `next`, `rescue`.
        const MID = 1 << 6;
        /// Expecting a method name (`def`, `alias`, `undef`, `:sym`).
        const FNAME = 1 << 7;
        /// After `.` or `&.`.
        const DOT = 1 << 8;
        /// After `class`; `<<` is a singleton class, not a heredoc.
        const CLASS = 1 << 9;
        /// A label (`foo:`) may appear.
        const LABEL = 1 << 10;
        /// Just after a label.
        const LABELED = 1 << 11;
        /// After the first item of `alias`/`undef`.
        const FITEM = 1 << 12;

        const BEG_ANY = Self::BEG.bits() | Self::MID.bits() | Self::CLASS.bits();
        const ARG_ANY = Self::ARG.bits() | Self::CMDARG.bits();
        const END_ANY = Self::END.bits() | Self::ENDARG.bits() | Self::ENDFN.bits();
    }
}

impl LexState {
    /// At the beginning of an expression, where `-1` is a literal and `/`
    /// starts a regexp.
    #[inline]
    pub fn is_beg(self) -> bool {
        self.intersects(LexState::BEG_ANY) || self.contains(LexState::ARG | LexState::LABELED)
    }

    #[inline]
    pub fn is_arg(self) -> bool {
        self.intersects(LexState::ARG_ANY)
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self.intersects(LexState::END_ANY)
    }

    /// Expecting a method name, so operators lex as names.
    #[inline]
    pub fn is_fname_or_dot(self) -> bool {
        self.intersects(LexState::FNAME | LexState::DOT)
    }
}

#[cfg(test)]
mod tests {
    use super::LexState;

    #[test]
    fn beg_includes_labeled_arg() {
        assert!(LexState::BEG.is_beg());
        assert!(LexState::MID.is_beg());
        assert!((LexState::ARG | LexState::LABELED).is_beg());
        assert!(!LexState::ARG.is_beg());
        assert!(!LexState::END.is_beg());
    }

    #[test]
    fn groups() {
        assert!(LexState::CMDARG.is_arg());
        assert!(LexState::ENDFN.is_end());
        assert!(LexState::DOT.is_fname_or_dot());
        assert!(!(LexState::END | LexState::LABEL).is_beg());
    }
}

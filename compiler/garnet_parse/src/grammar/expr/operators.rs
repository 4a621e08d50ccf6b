//! Binding powers for expression parsing.
//!
//! Each infix operator has a left and a right binding power. The loop in
//! `parse_expression_from` keeps extending the left operand while the next
//! operator's left power is at least the caller's minimum; the right
//! operand is parsed with the right power. Left-associative operators use
//! `right = left + 1`, right-associative ones `right = left`.

use garnet_ir::TokenKind;

pub(crate) mod bp {
    pub const STATEMENT: u8 = 2;
    pub const MODIFIER_RESCUE: u8 = 4;
    pub const MODIFIER: u8 = 6;
    pub const COMPOSITION: u8 = 8;
    pub const NOT: u8 = 10;
    pub const MATCH: u8 = 12;
    pub const DEFINED: u8 = 14;
    pub const ASSIGNMENT: u8 = 18;
    pub const TERNARY: u8 = 20;
    pub const RANGE: u8 = 22;
    pub const LOGICAL_OR: u8 = 24;
    pub const LOGICAL_AND: u8 = 26;
    pub const EQUALITY: u8 = 28;
    pub const COMPARISON: u8 = 30;
    pub const BITWISE_OR: u8 = 32;
    pub const BITWISE_AND: u8 = 34;
    pub const SHIFT: u8 = 36;
    pub const TERM: u8 = 38;
    pub const FACTOR: u8 = 40;
    pub const UMINUS: u8 = 42;
    pub const EXPONENT: u8 = 44;
    pub const UNARY: u8 = 46;
    pub const INDEX: u8 = 48;
}

/// What an infix token builds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Infix {
    /// A method call named after the operator (`a + b`).
    Binary,
    /// `&&`, `and`
    And,
    /// `||`, `or`
    Or,
    /// `=`
    Assign,
    /// `+=`, `&&=`, `||=`, ...
    OperatorAssign,
    /// `? :`
    Ternary,
    /// `..`, `...`
    Range,
    /// `if`, `unless`, `while`, `until` after a statement.
    Modifier,
    /// `rescue` after an expression.
    RescueModifier,
    /// `value => pattern`
    MatchRequired,
    /// `value in pattern`
    MatchPredicate,
}

/// Classify `kind` as an infix operator with its binding powers.
pub(crate) fn infix(kind: TokenKind) -> Option<(Infix, u8, u8)> {
    use TokenKind as T;
    Some(match kind {
        T::KeywordRescueModifier => (Infix::RescueModifier, bp::MODIFIER_RESCUE, bp::COMPOSITION),
        T::KeywordIfModifier | T::KeywordUnlessModifier | T::KeywordWhileModifier | T::KeywordUntilModifier => {
            (Infix::Modifier, bp::MODIFIER, bp::COMPOSITION)
        }
        T::KeywordAnd => (Infix::And, bp::COMPOSITION, bp::COMPOSITION + 1),
        T::KeywordOr => (Infix::Or, bp::COMPOSITION, bp::COMPOSITION + 1),
        T::EqualGreater => (Infix::MatchRequired, bp::MATCH, bp::MATCH + 1),
        T::KeywordIn => (Infix::MatchPredicate, bp::MATCH, bp::MATCH + 1),
        T::Equal => (Infix::Assign, bp::UNARY, bp::ASSIGNMENT),
        kind if kind.is_operator_write() => (Infix::OperatorAssign, bp::UNARY, bp::ASSIGNMENT),
        T::QuestionMark => (Infix::Ternary, bp::TERNARY, bp::TERNARY),
        T::DotDot | T::DotDotDot => (Infix::Range, bp::RANGE, bp::RANGE + 1),
        T::PipePipe => (Infix::Or, bp::LOGICAL_OR, bp::LOGICAL_OR + 1),
        T::AmpersandAmpersand => (Infix::And, bp::LOGICAL_AND, bp::LOGICAL_AND + 1),
        T::LessEqualGreater | T::EqualEqual | T::EqualEqualEqual | T::BangEqual | T::EqualTilde | T::BangTilde => {
            (Infix::Binary, bp::EQUALITY, bp::EQUALITY + 1)
        }
        T::Less | T::LessEqual | T::Greater | T::GreaterEqual => (Infix::Binary, bp::COMPARISON, bp::COMPARISON + 1),
        T::Pipe | T::Caret => (Infix::Binary, bp::BITWISE_OR, bp::BITWISE_OR + 1),
        T::Ampersand => (Infix::Binary, bp::BITWISE_AND, bp::BITWISE_AND + 1),
        T::LessLess | T::GreaterGreater => (Infix::Binary, bp::SHIFT, bp::SHIFT + 1),
        T::Plus | T::Minus => (Infix::Binary, bp::TERM, bp::TERM + 1),
        T::Star | T::Slash | T::Percent => (Infix::Binary, bp::FACTOR, bp::FACTOR + 1),
        T::StarStar => (Infix::Binary, bp::EXPONENT, bp::EXPONENT),
        _ => return None,
    })
}

/// Whether `kind` compares for equality; these do not chain.
pub(crate) fn is_equality(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LessEqualGreater
            | TokenKind::EqualEqual
            | TokenKind::EqualEqualEqual
            | TokenKind::BangEqual
            | TokenKind::EqualTilde
            | TokenKind::BangTilde
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exponent_is_right_associative() {
        let (_, left, right) = infix(TokenKind::StarStar).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_arithmetic_binds_tighter_than_comparison() {
        let (_, plus, _) = infix(TokenKind::Plus).unwrap();
        let (_, star, _) = infix(TokenKind::Star).unwrap();
        let (_, less, _) = infix(TokenKind::Less).unwrap();
        assert!(star > plus);
        assert!(plus > less);
    }

    #[test]
    fn test_modifiers_bind_loosest() {
        let (kind, left, _) = infix(TokenKind::KeywordIfModifier).unwrap();
        assert_eq!(kind, Infix::Modifier);
        let (_, and, _) = infix(TokenKind::KeywordAnd).unwrap();
        assert!(left < and);
        assert_eq!(infix(TokenKind::KeywordIf), None);
    }

    #[test]
    fn test_compound_assignment_operators() {
        for kind in [TokenKind::PlusEqual, TokenKind::PipePipeEqual, TokenKind::AmpersandAmpersandEqual] {
            assert_eq!(infix(kind).map(|(infix, ..)| infix), Some(Infix::OperatorAssign));
        }
    }
}

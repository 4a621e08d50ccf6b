//! Token sets for lookahead decisions and error recovery.
//!
//! A [`TokenSet`] is a bitset over token tags, so membership is a shift and
//! a mask. The parser uses the predefined sets both to decide what a token
//! can start (an argument, an expression) and to find where to resume after
//! an error.

use garnet_ir::TokenKind;

const _: () = assert!(TokenKind::MAX_TAG < 255, "token tags must fit in two u128 words");

/// A set of token kinds, one bit per tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet([u128; 2]);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self([0, 0])
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self::new().with(kind)
    }

    /// Add a token kind (builder form for const initialisation).
    #[inline]
    #[must_use]
    #[allow(
        clippy::needless_pass_by_value,
        reason = "const fn builder API; TokenKind is Copy"
    )]
    pub const fn with(self, kind: TokenKind) -> Self {
        let tag = kind.tag();
        let mut words = self.0;
        words[(tag >> 7) as usize] |= 1u128 << (tag & 127);
        Self(words)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self([self.0[0] & other.0[0], self.0[1] & other.0[1]])
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let tag = kind.tag();
        self.0[(tag >> 7) as usize] & (1u128 << (tag & 127)) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0[0].count_ones() + self.0[1].count_ones()
    }
}

/// Build a `TokenSet` from a list of kinds.
macro_rules! token_set {
    ($($kind:ident),* $(,)?) => {
        TokenSet::new()$(.with(TokenKind::$kind))*
    };
}

/// Ends a statement.
pub const STATEMENT_END: TokenSet = token_set![Newline, Semicolon, Eof];

/// Closes some enclosing construct. The statement loop never consumes
/// these itself; an unexpected one is reported and skipped by whoever
/// owns the innermost body.
pub const BODY_CLOSERS: TokenSet = token_set![
    KeywordEnd,
    KeywordElse,
    KeywordElsif,
    KeywordWhen,
    KeywordIn,
    KeywordRescue,
    KeywordEnsure,
    KeywordThen,
    BraceRight,
    BracketRight,
    ParenthesisRight,
    EmbexprEnd,
    Eof,
];

/// Literal and variable tokens that stand on their own.
pub const PRIMARY_START: TokenSet = token_set![
    Integer,
    IntegerRational,
    IntegerImaginary,
    IntegerRationalImaginary,
    Float,
    FloatRational,
    FloatImaginary,
    FloatRationalImaginary,
    StringBegin,
    HeredocStart,
    Backtick,
    PercentLowerX,
    SymbolBegin,
    RegexpBegin,
    PercentLowerW,
    PercentUpperW,
    PercentLowerI,
    PercentUpperI,
    CharacterLiteral,
    InstanceVariable,
    ClassVariable,
    GlobalVariable,
    BackReference,
    NumberedReference,
    Constant,
    Identifier,
    MethodName,
    Label,
];

/// Keywords that begin an expression.
pub const KEYWORD_START: TokenSet = token_set![
    KeywordNil,
    KeywordTrue,
    KeywordFalse,
    KeywordSelf,
    KeywordFile,
    KeywordLine,
    KeywordEncoding,
    KeywordDefined,
    KeywordNot,
    KeywordIf,
    KeywordUnless,
    KeywordWhile,
    KeywordUntil,
    KeywordFor,
    KeywordCase,
    KeywordBegin,
    KeywordDef,
    KeywordClass,
    KeywordModule,
    KeywordReturn,
    KeywordBreak,
    KeywordNext,
    KeywordRedo,
    KeywordRetry,
    KeywordYield,
    KeywordSuper,
    KeywordAlias,
    KeywordUndef,
    KeywordBeginUpcase,
    KeywordEndUpcase,
];

/// Can begin an expression.
pub const EXPRESSION_START: TokenSet = PRIMARY_START.union(KEYWORD_START).union(token_set![
    ParenthesisLeft,
    ParenthesisLeftParentheses,
    BracketLeftArray,
    BraceLeft,
    MinusGreater,
    UColonColon,
    UDotDot,
    UDotDotDot,
    Bang,
    Tilde,
    UMinus,
    UMinusNum,
    UPlus,
    UStar,
    UStarStar,
    UAmpersand,
]);

/// Can begin the first argument of a call without parentheses
/// (`puts x`, `foo *args`, `bar -1`). Tokens that would read as a binary
/// operator after a method name are excluded by the lexer, which emits the
/// unary form only in argument position.
pub const ARGUMENT_START: TokenSet = PRIMARY_START.union(token_set![
    KeywordNil,
    KeywordTrue,
    KeywordFalse,
    KeywordSelf,
    KeywordFile,
    KeywordLine,
    KeywordEncoding,
    KeywordDefined,
    KeywordNot,
    KeywordCase,
    KeywordBegin,
    KeywordDef,
    KeywordIf,
    KeywordUnless,
    KeywordWhile,
    KeywordUntil,
    KeywordSuper,
    KeywordYield,
    KeywordClass,
    KeywordModule,
    KeywordFor,
    ParenthesisLeftParentheses,
    BracketLeftArray,
    MinusGreater,
    UColonColon,
    UDotDot,
    UDotDotDot,
    Bang,
    Tilde,
    UMinus,
    UMinusNum,
    UPlus,
    UStar,
    UStarStar,
    UAmpersand,
]);

/// Tokens that end an argument list written without parentheses.
pub const ARGUMENT_END: TokenSet = STATEMENT_END.union(BODY_CLOSERS).union(token_set![
    KeywordDo,
    KeywordIfModifier,
    KeywordUnlessModifier,
    KeywordWhileModifier,
    KeywordUntilModifier,
    KeywordRescueModifier,
    KeywordAnd,
    KeywordOr,
]);

#[cfg(test)]
mod tests;

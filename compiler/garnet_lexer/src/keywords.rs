//! Reserved words.
//!
//! Each keyword carries the token it lexes as at the start of an
//! expression, the token it lexes as in modifier position (`x if y`), and
//! the lexer state it leaves behind.

use garnet_ir::TokenKind;

use crate::LexState;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Keyword {
    pub kind: TokenKind,
    /// Token used when the keyword follows a value, if it differs.
    pub modifier: Option<TokenKind>,
    pub state: LexState,
}

const fn kw(kind: TokenKind, state: LexState) -> Option<Keyword> {
    Some(Keyword {
        kind,
        modifier: None,
        state,
    })
}

const fn modifier(kind: TokenKind, modifier: TokenKind, state: LexState) -> Option<Keyword> {
    Some(Keyword {
        kind,
        modifier: Some(modifier),
        state,
    })
}

/// Whether `text` is a reserved word.
pub fn is_reserved(text: &[u8]) -> bool {
    lookup(text).is_some()
}

/// Look up a reserved word, bucketed by length.
pub(crate) fn lookup(text: &[u8]) -> Option<Keyword> {
    use LexState as S;
    use TokenKind as T;

    if !(2..=12).contains(&text.len()) {
        return None;
    }
    match text.len() {
        2 => match text {
            b"do" => kw(T::KeywordDo, S::BEG),
            b"if" => modifier(T::KeywordIf, T::KeywordIfModifier, S::BEG),
            b"in" => kw(T::KeywordIn, S::BEG),
            b"or" => kw(T::KeywordOr, S::BEG),
            _ => None,
        },
        3 => match text {
            b"and" => kw(T::KeywordAnd, S::BEG),
            b"def" => kw(T::KeywordDef, S::FNAME),
            b"END" => kw(T::KeywordEndUpcase, S::END),
            b"end" => kw(T::KeywordEnd, S::END),
            b"for" => kw(T::KeywordFor, S::BEG),
            b"nil" => kw(T::KeywordNil, S::END),
            b"not" => kw(T::KeywordNot, S::ARG),
            _ => None,
        },
        4 => match text {
            b"case" => kw(T::KeywordCase, S::BEG),
            b"else" => kw(T::KeywordElse, S::BEG),
            b"next" => kw(T::KeywordNext, S::MID),
            b"redo" => kw(T::KeywordRedo, S::END),
            b"self" => kw(T::KeywordSelf, S::END),
            b"then" => kw(T::KeywordThen, S::BEG),
            b"true" => kw(T::KeywordTrue, S::END),
            b"when" => kw(T::KeywordWhen, S::BEG),
            _ => None,
        },
        5 => match text {
            b"alias" => kw(T::KeywordAlias, S::FNAME.union(S::FITEM)),
            b"begin" => kw(T::KeywordBegin, S::BEG),
            b"BEGIN" => kw(T::KeywordBeginUpcase, S::END),
            b"break" => kw(T::KeywordBreak, S::MID),
            b"class" => kw(T::KeywordClass, S::CLASS),
            b"elsif" => kw(T::KeywordElsif, S::BEG),
            b"false" => kw(T::KeywordFalse, S::END),
            b"retry" => kw(T::KeywordRetry, S::END),
            b"super" => kw(T::KeywordSuper, S::ARG),
            b"undef" => kw(T::KeywordUndef, S::FNAME.union(S::FITEM)),
            b"until" => modifier(T::KeywordUntil, T::KeywordUntilModifier, S::BEG),
            b"while" => modifier(T::KeywordWhile, T::KeywordWhileModifier, S::BEG),
            b"yield" => kw(T::KeywordYield, S::ARG),
            _ => None,
        },
        6 => match text {
            b"ensure" => kw(T::KeywordEnsure, S::BEG),
            b"module" => kw(T::KeywordModule, S::BEG),
            b"rescue" => modifier(T::KeywordRescue, T::KeywordRescueModifier, S::MID),
            b"return" => kw(T::KeywordReturn, S::MID),
            b"unless" => modifier(T::KeywordUnless, T::KeywordUnlessModifier, S::BEG),
            _ => None,
        },
        8 => match text {
            b"__FILE__" => kw(T::KeywordFile, S::END),
            b"__LINE__" => kw(T::KeywordLine, S::END),
            b"defined?" => kw(T::KeywordDefined, S::ARG),
            _ => None,
        },
        12 => match text {
            b"__ENCODING__" => kw(T::KeywordEncoding, S::END),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::lookup;
    use garnet_ir::TokenKind;

    #[test]
    fn finds_keywords() {
        assert_eq!(lookup(b"def").map(|k| k.kind), Some(TokenKind::KeywordDef));
        assert_eq!(
            lookup(b"__ENCODING__").map(|k| k.kind),
            Some(TokenKind::KeywordEncoding)
        );
        assert_eq!(
            lookup(b"if").and_then(|k| k.modifier),
            Some(TokenKind::KeywordIfModifier)
        );
    }

    #[test]
    fn rejects_identifiers() {
        assert!(lookup(b"foo").is_none());
        assert!(lookup(b"d").is_none());
        assert!(lookup(b"Def").is_none());
        assert!(lookup(b"definitely_not").is_none());
    }

    #[test]
    fn every_keyword_token_is_reachable() {
        let words: &[&[u8]] = &[
            b"alias", b"and", b"begin", b"BEGIN", b"break", b"case", b"class", b"def",
            b"defined?", b"do", b"else", b"elsif", b"end", b"END", b"ensure", b"false", b"for",
            b"if", b"in", b"module", b"next", b"nil", b"not", b"or", b"redo", b"rescue",
            b"retry", b"return", b"self", b"super", b"then", b"true", b"undef", b"unless",
            b"until", b"when", b"while", b"yield", b"__ENCODING__", b"__FILE__", b"__LINE__",
        ];
        for word in words {
            let keyword = lookup(word).map(|k| k.kind);
            assert!(keyword.is_some_and(TokenKind::is_keyword), "{word:?}");
        }
    }
}

//! The closed set of token kinds.
//!
//! Every kind has a stable `u8` wire tag (its discriminant), a
//! SCREAMING_CASE name used in token dumps, and a human-facing display
//! string used in "unexpected X" diagnostics.

use std::fmt;

macro_rules! define_token_kinds {
    ($($variant:ident = $tag:literal, $name:literal, $display:literal;)*) => {
        /// Token kinds produced by the lexer.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TokenKind {
            $($variant = $tag,)*
        }

        impl TokenKind {
            /// All token kinds in tag order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            /// Look up a kind by its wire tag.
            pub const fn from_tag(tag: u8) -> Option<TokenKind> {
                match tag {
                    $($tag => Some(TokenKind::$variant),)*
                    _ => None,
                }
            }

            /// Dump name, e.g. `KEYWORD_DEF`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }

            /// Human-facing description for diagnostics, e.g. `'def'`.
            pub const fn display(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $display,)*
                }
            }
        }
    };
}

define_token_kinds! {
    Eof = 1, "EOF", "end-of-input";
    Missing = 2, "MISSING", "missing token";
    NotProvided = 3, "NOT_PROVIDED", "not provided";
    Invalid = 4, "INVALID", "invalid token";

    Ampersand = 5, "AMPERSAND", "'&'";
    AmpersandAmpersand = 6, "AMPERSAND_AMPERSAND", "'&&'";
    AmpersandAmpersandEqual = 7, "AMPERSAND_AMPERSAND_EQUAL", "'&&='";
    AmpersandDot = 8, "AMPERSAND_DOT", "'&.'";
    AmpersandEqual = 9, "AMPERSAND_EQUAL", "'&='";
    Backtick = 10, "BACKTICK", "'`'";
    BackReference = 11, "BACK_REFERENCE", "back reference";
    Bang = 12, "BANG", "'!'";
    BangEqual = 13, "BANG_EQUAL", "'!='";
    BangTilde = 14, "BANG_TILDE", "'!~'";
    BraceLeft = 15, "BRACE_LEFT", "'{'";
    BraceRight = 16, "BRACE_RIGHT", "'}'";
    BracketLeft = 17, "BRACKET_LEFT", "'['";
    BracketLeftArray = 18, "BRACKET_LEFT_ARRAY", "'['";
    BracketLeftRight = 19, "BRACKET_LEFT_RIGHT", "'[]'";
    BracketLeftRightEqual = 20, "BRACKET_LEFT_RIGHT_EQUAL", "'[]='";
    BracketRight = 21, "BRACKET_RIGHT", "']'";
    Caret = 22, "CARET", "'^'";
    CaretEqual = 23, "CARET_EQUAL", "'^='";
    CharacterLiteral = 24, "CHARACTER_LITERAL", "character literal";
    ClassVariable = 25, "CLASS_VARIABLE", "class variable";
    Colon = 26, "COLON", "':'";
    ColonColon = 27, "COLON_COLON", "'::'";
    Comma = 28, "COMMA", "','";
    Comment = 29, "COMMENT", "comment";
    Constant = 30, "CONSTANT", "constant";
    Dot = 31, "DOT", "'.'";
    DotDot = 32, "DOT_DOT", "'..'";
    DotDotDot = 33, "DOT_DOT_DOT", "'...'";
    EmbdocBegin = 34, "EMBDOC_BEGIN", "'=begin'";
    EmbdocEnd = 35, "EMBDOC_END", "'=end'";
    EmbdocLine = 36, "EMBDOC_LINE", "embedded document line";
    EmbexprBegin = 37, "EMBEXPR_BEGIN", "'#{'";
    EmbexprEnd = 38, "EMBEXPR_END", "'}'";
    Embvar = 39, "EMBVAR", "'#'";
    Equal = 40, "EQUAL", "'='";
    EqualEqual = 41, "EQUAL_EQUAL", "'=='";
    EqualEqualEqual = 42, "EQUAL_EQUAL_EQUAL", "'==='";
    EqualGreater = 43, "EQUAL_GREATER", "'=>'";
    EqualTilde = 44, "EQUAL_TILDE", "'=~'";
    Float = 45, "FLOAT", "float";
    FloatImaginary = 46, "FLOAT_IMAGINARY", "imaginary";
    FloatRational = 47, "FLOAT_RATIONAL", "rational";
    FloatRationalImaginary = 48, "FLOAT_RATIONAL_IMAGINARY", "imaginary";
    GlobalVariable = 49, "GLOBAL_VARIABLE", "global variable";
    Greater = 50, "GREATER", "'>'";
    GreaterEqual = 51, "GREATER_EQUAL", "'>='";
    GreaterGreater = 52, "GREATER_GREATER", "'>>'";
    GreaterGreaterEqual = 53, "GREATER_GREATER_EQUAL", "'>>='";
    HeredocEnd = 54, "HEREDOC_END", "heredoc ending";
    HeredocStart = 55, "HEREDOC_START", "heredoc beginning";
    Identifier = 56, "IDENTIFIER", "local variable or method";
    IgnoredNewline = 57, "IGNORED_NEWLINE", "ignored newline";
    InstanceVariable = 58, "INSTANCE_VARIABLE", "instance variable";
    Integer = 59, "INTEGER", "integer";
    IntegerImaginary = 60, "INTEGER_IMAGINARY", "imaginary";
    IntegerRational = 61, "INTEGER_RATIONAL", "rational";
    IntegerRationalImaginary = 62, "INTEGER_RATIONAL_IMAGINARY", "imaginary";

    KeywordAlias = 63, "KEYWORD_ALIAS", "'alias'";
    KeywordAnd = 64, "KEYWORD_AND", "'and'";
    KeywordBegin = 65, "KEYWORD_BEGIN", "'begin'";
    KeywordBeginUpcase = 66, "KEYWORD_BEGIN_UPCASE", "'BEGIN'";
    KeywordBreak = 67, "KEYWORD_BREAK", "'break'";
    KeywordCase = 68, "KEYWORD_CASE", "'case'";
    KeywordClass = 69, "KEYWORD_CLASS", "'class'";
    KeywordDef = 70, "KEYWORD_DEF", "'def'";
    KeywordDefined = 71, "KEYWORD_DEFINED", "'defined?'";
    KeywordDo = 72, "KEYWORD_DO", "'do'";
    KeywordDoLoop = 73, "KEYWORD_DO_LOOP", "'do'";
    KeywordElse = 74, "KEYWORD_ELSE", "'else'";
    KeywordElsif = 75, "KEYWORD_ELSIF", "'elsif'";
    KeywordEnd = 76, "KEYWORD_END", "'end'";
    KeywordEndUpcase = 77, "KEYWORD_END_UPCASE", "'END'";
    KeywordEnsure = 78, "KEYWORD_ENSURE", "'ensure'";
    KeywordFalse = 79, "KEYWORD_FALSE", "'false'";
    KeywordFor = 80, "KEYWORD_FOR", "'for'";
    KeywordIf = 81, "KEYWORD_IF", "'if'";
    KeywordIfModifier = 82, "KEYWORD_IF_MODIFIER", "'if'";
    KeywordIn = 83, "KEYWORD_IN", "'in'";
    KeywordModule = 84, "KEYWORD_MODULE", "'module'";
    KeywordNext = 85, "KEYWORD_NEXT", "'next'";
    KeywordNil = 86, "KEYWORD_NIL", "'nil'";
    KeywordNot = 87, "KEYWORD_NOT", "'not'";
    KeywordOr = 88, "KEYWORD_OR", "'or'";
    KeywordRedo = 89, "KEYWORD_REDO", "'redo'";
    KeywordRescue = 90, "KEYWORD_RESCUE", "'rescue'";
    KeywordRescueModifier = 91, "KEYWORD_RESCUE_MODIFIER", "'rescue'";
    KeywordRetry = 92, "KEYWORD_RETRY", "'retry'";
    KeywordReturn = 93, "KEYWORD_RETURN", "'return'";
    KeywordSelf = 94, "KEYWORD_SELF", "'self'";
    KeywordSuper = 95, "KEYWORD_SUPER", "'super'";
    KeywordThen = 96, "KEYWORD_THEN", "'then'";
    KeywordTrue = 97, "KEYWORD_TRUE", "'true'";
    KeywordUndef = 98, "KEYWORD_UNDEF", "'undef'";
    KeywordUnless = 99, "KEYWORD_UNLESS", "'unless'";
    KeywordUnlessModifier = 100, "KEYWORD_UNLESS_MODIFIER", "'unless'";
    KeywordUntil = 101, "KEYWORD_UNTIL", "'until'";
    KeywordUntilModifier = 102, "KEYWORD_UNTIL_MODIFIER", "'until'";
    KeywordWhen = 103, "KEYWORD_WHEN", "'when'";
    KeywordWhile = 104, "KEYWORD_WHILE", "'while'";
    KeywordWhileModifier = 105, "KEYWORD_WHILE_MODIFIER", "'while'";
    KeywordYield = 106, "KEYWORD_YIELD", "'yield'";
    KeywordEncoding = 107, "KEYWORD___ENCODING__", "'__ENCODING__'";
    KeywordFile = 108, "KEYWORD___FILE__", "'__FILE__'";
    KeywordLine = 109, "KEYWORD___LINE__", "'__LINE__'";

    Label = 110, "LABEL", "label";
    LabelEnd = 111, "LABEL_END", "label terminator";
    LambdaBegin = 112, "LAMBDA_BEGIN", "'{'";
    Less = 113, "LESS", "'<'";
    LessEqual = 114, "LESS_EQUAL", "'<='";
    LessEqualGreater = 115, "LESS_EQUAL_GREATER", "'<=>'";
    LessLess = 116, "LESS_LESS", "'<<'";
    LessLessEqual = 117, "LESS_LESS_EQUAL", "'<<='";
    MethodName = 118, "METHOD_NAME", "method name";
    Minus = 119, "MINUS", "'-'";
    MinusEqual = 120, "MINUS_EQUAL", "'-='";
    MinusGreater = 121, "MINUS_GREATER", "'->'";
    Newline = 122, "NEWLINE", "newline";
    NumberedReference = 123, "NUMBERED_REFERENCE", "numbered reference";
    ParenthesisLeft = 124, "PARENTHESIS_LEFT", "'('";
    ParenthesisLeftParentheses = 125, "PARENTHESIS_LEFT_PARENTHESES", "'('";
    ParenthesisRight = 126, "PARENTHESIS_RIGHT", "')'";
    Percent = 127, "PERCENT", "'%'";
    PercentEqual = 128, "PERCENT_EQUAL", "'%='";
    PercentLowerI = 129, "PERCENT_LOWER_I", "'%i'";
    PercentLowerW = 130, "PERCENT_LOWER_W", "'%w'";
    PercentLowerX = 131, "PERCENT_LOWER_X", "'%x'";
    PercentUpperI = 132, "PERCENT_UPPER_I", "'%I'";
    PercentUpperW = 133, "PERCENT_UPPER_W", "'%W'";
    Pipe = 134, "PIPE", "'|'";
    PipeEqual = 135, "PIPE_EQUAL", "'|='";
    PipePipe = 136, "PIPE_PIPE", "'||'";
    PipePipeEqual = 137, "PIPE_PIPE_EQUAL", "'||='";
    Plus = 138, "PLUS", "'+'";
    PlusEqual = 139, "PLUS_EQUAL", "'+='";
    QuestionMark = 140, "QUESTION_MARK", "'?'";
    RegexpBegin = 141, "REGEXP_BEGIN", "regular expression beginning";
    RegexpEnd = 142, "REGEXP_END", "regular expression ending";
    Semicolon = 143, "SEMICOLON", "';'";
    Slash = 144, "SLASH", "'/'";
    SlashEqual = 145, "SLASH_EQUAL", "'/='";
    Star = 146, "STAR", "'*'";
    StarEqual = 147, "STAR_EQUAL", "'*='";
    StarStar = 148, "STAR_STAR", "'**'";
    StarStarEqual = 149, "STAR_STAR_EQUAL", "'**='";
    StringBegin = 150, "STRING_BEGIN", "string literal";
    StringContent = 151, "STRING_CONTENT", "string content";
    StringEnd = 152, "STRING_END", "string ending";
    SymbolBegin = 153, "SYMBOL_BEGIN", "symbol literal";
    Tilde = 154, "TILDE", "'~'";
    UAmpersand = 155, "UAMPERSAND", "'&'";
    UColonColon = 156, "UCOLON_COLON", "'::'";
    UDotDot = 157, "UDOT_DOT", "'..'";
    UDotDotDot = 158, "UDOT_DOT_DOT", "'...'";
    UMinus = 159, "UMINUS", "'-'";
    UMinusNum = 160, "UMINUS_NUM", "'-'";
    UPlus = 161, "UPLUS", "'+'";
    UStar = 162, "USTAR", "'*'";
    UStarStar = 163, "USTAR_STAR", "'**'";
    WordsSep = 164, "WORDS_SEP", "string separator";
    DataBegin = 165, "__END__", "'__END__'";
}

impl TokenKind {
    /// Highest tag in use. Bitsets over token kinds must cover `0..=MAX_TAG`.
    pub const MAX_TAG: u8 = 165;

    /// Wire tag of this kind.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Tokens the parser never sees: trivia recorded only in the token stream.
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Comment
                | TokenKind::IgnoredNewline
                | TokenKind::EmbdocBegin
                | TokenKind::EmbdocLine
                | TokenKind::EmbdocEnd
                | TokenKind::DataBegin
        )
    }

    /// Reserved words, in any of their positional forms.
    pub const fn is_keyword(self) -> bool {
        let tag = self as u8;
        tag >= TokenKind::KeywordAlias as u8 && tag <= TokenKind::KeywordLine as u8
    }

    /// Operator tokens that may be defined as methods (`def +`, `:<=>`).
    pub const fn is_operator_method_name(self) -> bool {
        matches!(
            self,
            TokenKind::Ampersand
                | TokenKind::Backtick
                | TokenKind::Bang
                | TokenKind::BangEqual
                | TokenKind::BangTilde
                | TokenKind::BracketLeftRight
                | TokenKind::BracketLeftRightEqual
                | TokenKind::Caret
                | TokenKind::EqualEqual
                | TokenKind::EqualEqualEqual
                | TokenKind::EqualTilde
                | TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::GreaterGreater
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::LessEqualGreater
                | TokenKind::LessLess
                | TokenKind::Minus
                | TokenKind::Percent
                | TokenKind::Pipe
                | TokenKind::Plus
                | TokenKind::Slash
                | TokenKind::Star
                | TokenKind::StarStar
                | TokenKind::Tilde
                | TokenKind::UMinus
                | TokenKind::UPlus
        )
    }

    /// Compound assignment operators (`+=`, `||=`, ...).
    pub const fn is_operator_write(self) -> bool {
        matches!(
            self,
            TokenKind::AmpersandAmpersandEqual
                | TokenKind::AmpersandEqual
                | TokenKind::CaretEqual
                | TokenKind::GreaterGreaterEqual
                | TokenKind::LessLessEqual
                | TokenKind::MinusEqual
                | TokenKind::PercentEqual
                | TokenKind::PipeEqual
                | TokenKind::PipePipeEqual
                | TokenKind::PlusEqual
                | TokenKind::SlashEqual
                | TokenKind::StarEqual
                | TokenKind::StarStarEqual
        )
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

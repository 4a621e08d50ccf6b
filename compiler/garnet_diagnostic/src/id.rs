//! Stable identifiers for every diagnostic the lexer and parser report.
//!
//! The numeric id is what crosses the wire; the message text travels with
//! it, so consumers never need this table to render a diagnostic.

use std::fmt;

use crate::{Level, Severity};

macro_rules! define_diagnostic_ids {
    ($($variant:ident = $id:literal, $severity:ident, $level:ident, $message:literal;)*) => {
        /// Identifier of a diagnostic kind.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[repr(u16)]
        pub enum DiagnosticId {
            $($variant = $id,)*
        }

        impl DiagnosticId {
            pub const ALL: &'static [DiagnosticId] = &[$(DiagnosticId::$variant,)*];

            pub const fn from_u16(id: u16) -> Option<DiagnosticId> {
                match id {
                    $($id => Some(DiagnosticId::$variant),)*
                    _ => None,
                }
            }

            /// Default message text. Some diagnostics replace it with a
            /// message naming the offending token.
            pub const fn message(self) -> &'static str {
                match self {
                    $(DiagnosticId::$variant => $message,)*
                }
            }

            pub const fn severity(self) -> Severity {
                match self {
                    $(DiagnosticId::$variant => Severity::$severity,)*
                }
            }

            pub const fn level(self) -> Level {
                match self {
                    $(DiagnosticId::$variant => Level::$level,)*
                }
            }
        }
    };
}

define_diagnostic_ids! {
    // Arguments
    ArgumentTermParen = 1, Error, Syntax, "Expected a ')' to close the argument list";
    ArgumentNoForwardEllipses = 2, Error, Syntax, "unexpected `...` when the parent method is not forwarding";
    ArgumentNoForwardStar = 3, Error, Syntax, "unexpected `*`; no anonymous rest parameter";
    ArgumentNoForwardStarStar = 4, Error, Syntax, "unexpected `**`; no anonymous keyword rest parameter";
    ArgumentNoForwardAmpersand = 5, Error, Syntax, "unexpected `&`; no anonymous block parameter";
    ArgumentAfterBlock = 6, Error, Syntax, "unexpected argument after a block argument";
    ArgumentAfterForwarding = 7, Error, Syntax, "unexpected argument after `...`";
    ArgumentBlockMulti = 8, Error, Syntax, "both block arg and actual block given";
    ArgumentTermBracket = 9, Error, Syntax, "expected a `]` to close the index arguments";

    // Collections
    ArrayTerm = 20, Error, Syntax, "expected a `]` to close the array";
    ArrayElement = 21, Error, Syntax, "expected an element for the array";
    HashTerm = 22, Error, Syntax, "expected a `}` to close the hash literal";
    HashKey = 23, Error, Syntax, "expected a key in the hash literal";
    HashValue = 24, Error, Syntax, "expected a value in the hash literal";
    HashRocket = 25, Error, Syntax, "expected a `=>` between the hash key and value";

    // Statements and definitions
    BeginTerm = 40, Error, Syntax, "expected an `end` to close the `begin` statement";
    BeginUpcaseBrace = 41, Error, Syntax, "expected a `{` after `BEGIN`";
    BeginUpcaseTerm = 42, Error, Syntax, "expected a `}` to close the `BEGIN` statement";
    BeginUpcaseToplevel = 43, Error, Syntax, "BEGIN is permitted only at toplevel";
    EndUpcaseBrace = 44, Error, Syntax, "expected a `{` after `END`";
    EndUpcaseTerm = 45, Error, Syntax, "expected a `}` to close the `END` statement";
    BlockTerm = 46, Error, Syntax, "expected a block beginning with `{` to end with `}`";
    BlockTermEnd = 47, Error, Syntax, "expected a block beginning with `do` to end with `end`";
    BlockParamPipeTerm = 48, Error, Syntax, "expected the block parameters to end with `|`";
    CaseMissingConditions = 49, Error, Syntax, "expected a `when` or `in` clause after `case`";
    CaseTerm = 50, Error, Syntax, "expected an `end` to close the `case` statement";
    ClassInMethod = 51, Error, Syntax, "class definition in method body";
    ClassName = 52, Error, Syntax, "unexpected constant path after `class`; class/module name must be CONSTANT";
    ClassTerm = 53, Error, Syntax, "expected an `end` to close the `class` statement";
    ModuleInMethod = 54, Error, Syntax, "module definition in method body";
    ModuleName = 55, Error, Syntax, "unexpected constant path after `module`; class/module name must be CONSTANT";
    ModuleTerm = 56, Error, Syntax, "expected an `end` to close the `module` statement";
    DefName = 57, Error, Syntax, "unexpected token; expected a method name";
    DefTerm = 58, Error, Syntax, "expected an `end` to close the `def` statement";
    DefParamsTerm = 59, Error, Syntax, "expected a delimiter to close the parameters";
    DefEndlessSetter = 60, Error, Syntax, "invalid method name; a setter method cannot be defined in an endless method definition";
    ConditionalTerm = 61, Error, Syntax, "expected an `end` to close the conditional clause";
    ConditionalPredicate = 62, Error, Syntax, "expected a predicate expression for the conditional";
    ConditionalThen = 63, Error, Syntax, "expected `then` or `;` or '\\n'";
    LoopTerm = 64, Error, Syntax, "expected an `end` to close the loop";
    ForIndex = 65, Error, Syntax, "expected an index after `for`";
    ForIn = 66, Error, Syntax, "expected an `in` after the index in a `for` statement";
    ForTerm = 67, Error, Syntax, "expected an `end` to close the `for` loop";
    RescueVariable = 68, Error, Syntax, "expected an exception variable after `=>` in a rescue statement";
    LambdaTerm = 69, Error, Syntax, "expected a lambda block beginning with `{` to end with `}`";
    LambdaTermEnd = 70, Error, Syntax, "expected a lambda block beginning with `do` to end with `end`";
    LambdaOpen = 71, Error, Syntax, "expected a `do` keyword or a `{` to open the lambda block";
    AliasArgument = 72, Error, Syntax, "invalid argument being passed to `alias`";
    UndefArgument = 73, Error, Syntax, "invalid argument being passed to `undef`";
    SingletonForLiterals = 74, Error, Syntax, "cannot define singleton method for literals";
    EndInMethod = 75, Error, Syntax, "END in method; use at_exit";
    DynamicConstantAssign = 76, Error, Syntax, "dynamic constant assignment";
    ConstantPathColonColon = 77, Error, Syntax, "expected a constant after the `::` operator";
    CallMessage = 78, Error, Syntax, "expected a message after the call operator";
    InvalidRetry = 79, Error, Syntax, "Invalid retry without rescue";
    InvalidYield = 80, Error, Syntax, "Invalid yield";
    SingletonClassTerm = 81, Error, Syntax, "expected an `end` to close the singleton class";

    // Expressions
    ExpectExpression = 100, Error, Syntax, "expected an expression";
    ExpectArgument = 101, Error, Syntax, "unexpected token; expected an argument";
    ExpectRparen = 102, Error, Syntax, "expected a matching `)`";
    ExpectRbracket = 103, Error, Syntax, "expected a matching `]`";
    UnexpectedToken = 104, Error, Syntax, "unexpected token; expected an expression";
    UnexpectedTokenIgnore = 105, Error, Syntax, "unexpected token, ignoring it";
    UnexpectedTokenClose = 106, Error, Syntax, "unexpected token, expecting end-of-input";
    StatementSeparator = 107, Error, Syntax, "unexpected token; expected a newline or a `;` after the statement";
    WriteTarget = 108, Error, Syntax, "unexpected write target";
    MultiAssignMultiSplats = 109, Error, Syntax, "multiple splats in multiple assignment";
    TernaryColon = 110, Error, Syntax, "expected `:` after `?` in the ternary operator";
    TernaryExpression = 111, Error, Syntax, "expected an expression after `?` in the ternary operator";
    OperatorWriteValue = 112, Error, Syntax, "expected an expression after the operator";
    NoLocalVariable = 113, Error, Syntax, "expected a local variable name in the block parameters";
    SetterCallWithBlock = 114, Error, Syntax, "cannot assign to a call with a block";

    // Parameters
    ParameterNameDuplicated = 130, Error, Syntax, "duplicated argument name";
    ParameterOrder = 131, Error, Syntax, "unexpected parameter order";
    ParameterName = 132, Error, Syntax, "unexpected name for a parameter";
    ParameterAssignment = 133, Error, Syntax, "unexpected parameter assignment";
    NumberedParameterOrdinary = 134, Error, Syntax, "numbered parameters are not allowed when an ordinary parameter is defined";
    NumberedParameterReserved = 135, Error, Syntax, "_1 is reserved for numbered parameters";
    ItNotAllowedOrdinary = 136, Error, Syntax, "`it` is not allowed when an ordinary parameter is defined";
    NumberedParameterOuterBlock = 137, Error, Syntax, "numbered parameter is already used in outer block";

    // Patterns
    PatternExpression = 150, Error, Syntax, "expected a pattern expression";
    PatternTermBracket = 151, Error, Syntax, "expected a `]` to close the pattern expression";
    PatternTermBrace = 152, Error, Syntax, "expected a `}` to close the pattern expression";
    PatternTermParen = 153, Error, Syntax, "expected a `)` to close the pattern expression";
    PatternHashKey = 154, Error, Syntax, "expected a key in the hash pattern";
    PatternRest = 155, Error, Syntax, "unexpected multiple '*' rest patterns in an array pattern";
    PatternCaptureDuplicate = 156, Error, Syntax, "duplicated variable name";
    PatternPinUndefined = 157, Error, Syntax, "no such local variable to pin";
    PatternHashKeyDuplicate = 158, Error, Syntax, "duplicated key name in the hash pattern";

    // Literals and lexing
    StringTerm = 170, Error, Syntax, "unterminated string meets end of file";
    HeredocTerm = 171, Error, Syntax, "unterminated heredoc; can't find string anywhere before EOF";
    RegexpTerm = 172, Error, Syntax, "unterminated regexp meets end of file";
    XStringTerm = 173, Error, Syntax, "expected a closing delimiter for the `%x` or backtick string";
    ListTerm = 174, Error, Syntax, "unterminated list; expected a closing delimiter";
    SymbolTerm = 175, Error, Syntax, "expected a closing delimiter for the dynamic symbol";
    EmbdocTerm = 176, Error, Syntax, "embedded document meets end of file";
    EmbexprTerm = 177, Error, Syntax, "expected a `}` to close the embedded expression";
    InvalidCharacter = 178, Error, Syntax, "invalid character";
    InvalidMultibyteChar = 179, Error, Syntax, "invalid multibyte character";
    InvalidEscape = 180, Error, Syntax, "invalid escape sequence";
    EscapeInvalidHex = 181, Error, Syntax, "invalid hex escape";
    EscapeInvalidUnicode = 182, Error, Syntax, "invalid Unicode escape sequence";
    EscapeInvalidControl = 183, Error, Syntax, "invalid control escape sequence";
    EscapeInvalidMeta = 184, Error, Syntax, "invalid meta escape sequence";
    InvalidNumberUnderscore = 185, Error, Syntax, "invalid underscore placement in number";
    InvalidOctalDigit = 186, Error, Syntax, "Invalid octal digit";
    NumberNoDigits = 187, Error, Syntax, "numeric literal without digits";
    InvalidFloatExponent = 188, Error, Syntax, "invalid exponent";
    CharacterLiteralTerm = 189, Error, Syntax, "incomplete character syntax";
    InvalidPercent = 190, Error, Syntax, "unknown type of %string";
    InvalidPercentEof = 191, Error, Syntax, "unterminated quoted string meets end of file";
    GlobalVariableBare = 192, Error, Syntax, "'$' without identifiers is not allowed as a global variable name";
    InstanceVariableBare = 193, Error, Syntax, "'@' without identifiers is not allowed as an instance variable name";
    ClassVariableBare = 194, Error, Syntax, "'@@' without identifiers is not allowed as a class variable name";
    InvalidVariableName = 195, Error, Syntax, "invalid variable name";
    RegexpUnknownOption = 196, Error, Syntax, "unknown regexp option";
    InvalidEncodingMagicComment = 197, Error, Syntax, "unknown or invalid encoding in the magic comment";
    MixedEncoding = 198, Error, Syntax, "UTF-8 mixed within source of another encoding";
    ScriptNotFound = 199, Error, Syntax, "no Ruby script found in input";

    // Warnings
    AmbiguousFirstArgumentMinus = 300, Warning, Verbose, "ambiguous first argument; put parentheses or a space even after `-` operator";
    AmbiguousFirstArgumentPlus = 301, Warning, Verbose, "ambiguous first argument; put parentheses or a space even after `+` operator";
    AmbiguousPrefixStar = 302, Warning, Verbose, "ambiguous `*` has been interpreted as an argument prefix";
    AmbiguousPrefixStarStar = 303, Warning, Verbose, "ambiguous `**` has been interpreted as an argument prefix";
    AmbiguousPrefixAmpersand = 304, Warning, Verbose, "ambiguous `&` has been interpreted as an argument prefix";
    AmbiguousSlash = 305, Warning, Verbose, "ambiguous `/`; wrap regexp in parentheses or add a space after `/` operator";
    DuplicatedHashKey = 306, Warning, Default, "key is duplicated and overwritten";
    DuplicatedRegexpOption = 307, Warning, Default, "duplicated regexp option";
    EqualInConditional = 308, Warning, Verbose, "found '= literal' in conditional, should be ==";
    LiteralInCondition = 309, Warning, Verbose, "literal in condition";
    DotDotDotEol = 310, Warning, Default, "... at EOL, should be parenthesized?";
    IgnoredFrozenStringLiteral = 311, Warning, Verbose, "'frozen_string_literal' is ignored after any tokens";
    FloatOutOfRange = 312, Warning, Verbose, "Float out of range";
    InvalidMagicCommentValue = 313, Warning, Verbose, "invalid value for magic comment";
}

impl DiagnosticId {
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests;

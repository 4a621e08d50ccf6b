//! Lexer modes. The top of the mode stack decides how bytes are scanned.

/// Delimiters and options of a string-like literal being lexed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Delimited {
    /// `#{}` and `#@var` are recognised.
    pub interpolation: bool,
    /// Opening bracket that nests (`(` for `%w(...)`), or 0.
    pub incrementor: u8,
    pub terminator: u8,
    /// Depth of unmatched incrementors seen so far.
    pub nesting: u32,
    /// The literal may end in `":` and become a label.
    pub label_allowed: bool,
    /// Which term-error to report if the literal runs into EOF.
    pub kind: LiteralKind,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum LiteralKind {
    String,
    XString,
    Symbol,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum HeredocQuote {
    /// `<<EOS` or `<<"EOS"`
    Double,
    /// `<<'EOS'`
    Single,
    /// ``<<`EOS` ``
    Backtick,
}

impl HeredocQuote {
    pub fn interpolates(self) -> bool {
        !matches!(self, HeredocQuote::Single)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HeredocIndent {
    /// `<<EOS`: terminator must start the line.
    None,
    /// `<<-EOS`: terminator may be indented.
    Dash,
    /// `<<~EOS`: terminator may be indented, body is dedented.
    Tilde,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Heredoc {
    pub ident_start: u32,
    pub ident_end: u32,
    pub quote: HeredocQuote,
    pub indent: HeredocIndent,
    /// Where lexing continues once the body has been consumed.
    pub resume: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    /// Inside `#{...}`: default lexing until the brace depth drops back.
    Embexpr { brace_nesting: u32 },
    /// After `#` of `#@var`: lex exactly one variable.
    Embvar,
    String(Delimited),
    Regexp(Delimited),
    /// `%w`, `%W`, `%i`, `%I`
    List(Delimited),
    Heredoc(Heredoc),
}

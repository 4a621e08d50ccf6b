//! Lexical scopes for local variables.
//!
//! The parser consults the tracker for every bare identifier: a name that
//! resolves is a local variable read, anything else is a method call. Each
//! scope keeps its locals in declaration order, which is the order the
//! enclosing node reports them in.
//!
//! Method, class, and program bodies are opaque: lookups stop there. Block
//! and lambda bodies are transparent, and every transparent boundary
//! crossed on the way to a declaration adds one to the reported depth.

use bitflags::bitflags;
use garnet_diagnostic::DiagnosticId;
use garnet_ir::Name;
use rustc_hash::FxHashMap;

use crate::ConfigError;

bitflags! {
    /// Anonymous parameters a scope forwards to inner calls.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Forwarding: u8 {
        /// `*`
        const POSITIONALS = 1 << 0;
        /// `**`
        const KEYWORDS = 1 << 1;
        /// `&`
        const BLOCK = 1 << 2;
        /// `...`
        const ALL = 1 << 3;
    }
}

impl Forwarding {
    pub fn parse(parameter: &str) -> Result<Forwarding, ConfigError> {
        match parameter {
            "*" => Ok(Forwarding::POSITIONALS),
            "**" => Ok(Forwarding::KEYWORDS),
            "&" => Ok(Forwarding::BLOCK),
            "..." => Ok(Forwarding::ALL),
            other => Err(ConfigError::UnknownForwarding(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScopeKind {
    /// Locals supplied by the host (an `eval` binding).
    Eval,
    /// The program body.
    Top,
    /// A `def` body.
    Method,
    /// A `class`, `module`, or `class << x` body.
    Class,
    /// A block or lambda body.
    Block,
}

/// How a block's parameters are given.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BlockParameters {
    #[default]
    None,
    /// `|a, b|` or `->(a)`, including an explicitly empty list.
    Ordinary,
    /// `_1` through `_9`; the highest one used.
    Numbered(u8),
    /// A bare `it`.
    It,
}

#[derive(Clone, Debug)]
pub struct Scope {
    kind: ScopeKind,
    /// Lookups stop after this scope.
    closed: bool,
    locals: Vec<Name>,
    index: FxHashMap<Name, u32>,
    forwarding: Forwarding,
    parameters: BlockParameters,
}

impl Scope {
    fn new(kind: ScopeKind, closed: bool) -> Self {
        Scope {
            kind,
            closed,
            locals: Vec::new(),
            index: FxHashMap::default(),
            forwarding: Forwarding::empty(),
            parameters: BlockParameters::None,
        }
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn locals(&self) -> &[Name] {
        &self.locals
    }

    pub fn into_locals(self) -> Vec<Name> {
        self.locals
    }

    pub fn forwarding(&self) -> Forwarding {
        self.forwarding
    }

    pub fn parameters(&self) -> BlockParameters {
        self.parameters
    }

    fn contains(&self, name: &[u8]) -> bool {
        self.index.contains_key(&Name::new(name))
    }

    fn insert(&mut self, name: &[u8]) -> bool {
        if self.contains(name) {
            return false;
        }
        let name = Name::new(name);
        let position = u32::try_from(self.locals.len()).unwrap_or(u32::MAX);
        self.index.insert(name.clone(), position);
        self.locals.push(name);
        true
    }
}

/// The stack of open scopes, innermost last.
#[derive(Clone, Debug, Default)]
pub struct ScopeTracker {
    scopes: Vec<Scope>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        ScopeTracker::default()
    }

    /// Open a scope. Block scopes see their parent; every other kind is
    /// opaque, except a program body nested inside host-supplied scopes.
    pub fn push_scope(&mut self, kind: ScopeKind) {
        let closed = match kind {
            ScopeKind::Block => false,
            ScopeKind::Eval => self.scopes.is_empty(),
            ScopeKind::Top => self.scopes.is_empty(),
            ScopeKind::Method | ScopeKind::Class => true,
        };
        self.scopes.push(Scope::new(kind, closed));
    }

    /// Open a scope pre-filled with `locals`, e.g. from the options.
    pub fn push_scope_with<'n>(&mut self, kind: ScopeKind, locals: impl IntoIterator<Item = &'n Name>, forwarding: Forwarding) {
        self.push_scope(kind);
        for name in locals {
            self.declare(name.as_bytes());
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.forwarding = forwarding;
        }
    }

    /// Close the innermost scope and hand it back.
    pub fn pop_scope(&mut self) -> Scope {
        self.scopes.pop().unwrap_or_else(|| Scope::new(ScopeKind::Top, true))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declare `name` in the innermost scope. Returns whether it is new
    /// there.
    pub fn declare(&mut self, name: &[u8]) -> bool {
        match self.scopes.last_mut() {
            Some(scope) => scope.insert(name),
            None => false,
        }
    }

    /// Whether `name` is declared in the innermost scope itself.
    pub fn is_declared_here(&self, name: &[u8]) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains(name))
    }

    /// Depth of the nearest declaration of `name`, or `None` when it is not
    /// a visible local.
    pub fn resolve(&self, name: &[u8]) -> Option<u32> {
        let mut depth = 0;
        for scope in self.scopes.iter().rev() {
            if scope.contains(name) {
                return Some(depth);
            }
            if scope.closed {
                return None;
            }
            depth += 1;
        }
        None
    }

    /// Record that the innermost scope forwards `forwarding`.
    pub fn add_forwarding(&mut self, forwarding: Forwarding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.forwarding |= forwarding;
        }
    }

    /// Whether an anonymous `forwarding` argument is allowed here: the
    /// nearest enclosing non-block scope must have declared it.
    pub fn can_forward(&self, forwarding: Forwarding) -> bool {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.kind != ScopeKind::Block)
            .is_some_and(|scope| scope.forwarding.contains(forwarding))
    }

    /// Kind of the nearest opaque scope.
    pub fn enclosing_kind(&self) -> Option<ScopeKind> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.closed || scope.kind != ScopeKind::Block)
            .map(Scope::kind)
    }

    /// Inside a `def` body, looking through blocks.
    pub fn in_method(&self) -> bool {
        self.enclosing_kind() == Some(ScopeKind::Method)
    }

    pub fn in_block(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.kind == ScopeKind::Block)
    }

    pub fn parameters(&self) -> BlockParameters {
        self.scopes.last().map_or(BlockParameters::None, |scope| scope.parameters)
    }

    /// The innermost block declared ordinary parameters.
    pub fn set_ordinary_parameters(&mut self) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.parameters = BlockParameters::Ordinary;
        }
    }

    /// Use `_n` in the innermost block, declaring `_1` through `_n`.
    pub fn use_numbered_parameter(&mut self, number: u8) -> Result<(), DiagnosticId> {
        let outer_uses_numbered = self
            .scopes
            .iter()
            .rev()
            .skip(1)
            .take_while(|scope| scope.kind == ScopeKind::Block)
            .any(|scope| matches!(scope.parameters, BlockParameters::Numbered(_)));
        let Some(scope) = self.scopes.last_mut() else {
            return Err(DiagnosticId::NumberedParameterReserved);
        };
        match scope.parameters {
            BlockParameters::Ordinary => return Err(DiagnosticId::NumberedParameterOrdinary),
            BlockParameters::It => return Err(DiagnosticId::ItNotAllowedOrdinary),
            _ if outer_uses_numbered => return Err(DiagnosticId::NumberedParameterOuterBlock),
            BlockParameters::Numbered(max) if max >= number => return Ok(()),
            _ => {}
        }
        for n in 1..=number {
            scope.insert(&[b'_', b'0' + n]);
        }
        scope.parameters = BlockParameters::Numbered(number);
        Ok(())
    }

    /// Use `it` in the innermost block.
    pub fn use_it_parameter(&mut self) -> Result<(), DiagnosticId> {
        let Some(scope) = self.scopes.last_mut() else {
            return Err(DiagnosticId::ItNotAllowedOrdinary);
        };
        match scope.parameters {
            BlockParameters::None | BlockParameters::It => {
                scope.parameters = BlockParameters::It;
                Ok(())
            }
            BlockParameters::Numbered(_) => Err(DiagnosticId::NumberedParameterOrdinary),
            BlockParameters::Ordinary => Err(DiagnosticId::ItNotAllowedOrdinary),
        }
    }
}

/// `_1` through `_9`.
pub fn numbered_parameter(name: &[u8]) -> Option<u8> {
    match name {
        [b'_', digit @ b'1'..=b'9'] => Some(digit - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests;

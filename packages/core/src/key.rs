//! Property keys: the names a wrapped record can be probed with.

use std::fmt;

/// Keys that are never field names.
///
/// Framework and runtime machinery probes objects with these; they never
/// carry record data and are never reported as legacy access.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Symbol {
    /// The tag used when rendering an object's type (`[object Future]`).
    ToStringTag,
    /// The iteration protocol hook.
    Iterator,
    /// Any other internal key.
    Named(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::ToStringTag => write!(f, "Symbol(toStringTag)"),
            Symbol::Iterator => write!(f, "Symbol(iterator)"),
            Symbol::Named(name) => write!(f, "Symbol({})", name),
        }
    }
}

/// A property key: either a string field name or a symbol.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl PropertyKey {
    /// The field name, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        PropertyKey::Symbol(s)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Symbol(s) => write!(f, "{}", s),
        }
    }
}

//! Symbolic names used as error identities, dispatch events and adapter names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The dispatch keyword that selects successful outcomes.
pub const SUCCESS_KEYWORD: &str = "success";

/// The dispatch keyword that selects failed outcomes.
pub const FAILURE_KEYWORD: &str = "failure";

/// Keywords that can never be used as a failure's error identity.
pub const RESERVED_KEYWORDS: [&str; 2] = [SUCCESS_KEYWORD, FAILURE_KEYWORD];

/// An immutable symbolic name.
///
/// Construction never fails; whether the name is usable in a given position
/// is decided by the caller through [`Symbol::is_identifier`] and
/// [`Symbol::is_reserved`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Creates a symbol from any string-like value.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name is a plain identifier.
    ///
    /// Identifiers start with an ASCII letter or `_`, continue with ASCII
    /// alphanumerics or `_`, and may end with a single `?` or `!`.
    pub fn is_identifier(&self) -> bool {
        let name = self.as_str();
        let body = name
            .strip_suffix('?')
            .or_else(|| name.strip_suffix('!'))
            .unwrap_or(name);

        let mut chars = body.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Returns the reserved keyword this symbol collides with, if any.
    pub fn reserved_keyword(&self) -> Option<&'static str> {
        RESERVED_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| *keyword == self.as_str())
    }

    /// Returns `true` if the name is one of the reserved dispatch keywords.
    pub fn is_reserved(&self) -> bool {
        self.reserved_keyword().is_some()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

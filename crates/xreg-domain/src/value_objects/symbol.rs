//! Symbol value objects
//!
//! A symbol is anything the host runtime can be told about: a global
//! object, a class, a class nested inside another class, or a free
//! function. Names are flat and fully qualified; nesting is expressed only
//! through the `::` separator.

use crate::constants::{
    ALT_SYMBOL_SEPARATOR, FUNCTION_CALL_SUFFIX, GLOBAL_OBJECT_PREFIX, SYMBOL_SEPARATOR,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Validated, fully-qualified symbol name
///
/// # Example
///
/// ```
/// use xreg_domain::SymbolName;
///
/// let name = SymbolName::parse("THaDetMap.Module").unwrap();
/// assert_eq!(name.as_str(), "THaDetMap::Module");
/// assert_eq!(name.enclosing().unwrap().as_str(), "THaDetMap");
/// assert_eq!(name.leaf(), "Module");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolName(String);

impl SymbolName {
    /// Parse and normalize a symbol name
    ///
    /// `.` is accepted as a nesting separator and rewritten to `::`.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::malformed_symbol(raw, "name is empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(Error::malformed_symbol(raw, "name contains whitespace"));
        }

        let normalized = raw.replace(ALT_SYMBOL_SEPARATOR, SYMBOL_SEPARATOR);
        if normalized.starts_with(SYMBOL_SEPARATOR) {
            return Err(Error::malformed_symbol(raw, "separator at position 0"));
        }
        if normalized.ends_with(SYMBOL_SEPARATOR) {
            return Err(Error::malformed_symbol(raw, "separator at end of name"));
        }
        for segment in normalized.split(SYMBOL_SEPARATOR) {
            if segment.is_empty() {
                return Err(Error::malformed_symbol(raw, "empty segment between separators"));
            }
            if segment.contains(':') {
                return Err(Error::malformed_symbol(raw, "stray ':' outside a separator"));
            }
        }

        Ok(Self(normalized))
    }

    /// The normalized name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name segments from outermost to innermost
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SYMBOL_SEPARATOR)
    }

    /// Number of segments (1 for a top-level symbol)
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Whether the name refers to a nested symbol
    pub fn is_nested(&self) -> bool {
        self.0.contains(SYMBOL_SEPARATOR)
    }

    /// Name of the directly enclosing symbol, if nested
    pub fn enclosing(&self) -> Option<SymbolName> {
        self.0
            .rsplit_once(SYMBOL_SEPARATOR)
            .map(|(outer, _)| Self(outer.to_string()))
    }

    /// Innermost segment
    pub fn leaf(&self) -> &str {
        self.0
            .rsplit_once(SYMBOL_SEPARATOR)
            .map_or(self.0.as_str(), |(_, inner)| inner)
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SymbolName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SymbolName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SymbolName> for String {
    fn from(name: SymbolName) -> Self {
        name.0
    }
}

impl AsRef<str> for SymbolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Policy kinds a default policy can be declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Global,
    Class,
    Function,
}

impl PolicyKind {
    /// Every policy kind, in declaration order
    pub const ALL: [PolicyKind; 3] = [Self::Global, Self::Class, Self::Function];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Class => "class",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global" | "globals" => Ok(Self::Global),
            "class" | "classes" => Ok(Self::Class),
            "function" | "functions" => Ok(Self::Function),
            _ => Err(Error::unknown_kind(s)),
        }
    }
}

/// Kind of symbol a rule refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolKind {
    GlobalObject,
    Class,
    NestedClass,
    FreeFunction,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlobalObject => "global-object",
            Self::Class => "class",
            Self::NestedClass => "nested-class",
            Self::FreeFunction => "free-function",
        }
    }

    /// Policy kind whose default applies to this symbol kind
    ///
    /// Nested classes share the class default.
    pub fn policy_kind(self) -> PolicyKind {
        match self {
            Self::GlobalObject => PolicyKind::Global,
            Self::Class | Self::NestedClass => PolicyKind::Class,
            Self::FreeFunction => PolicyKind::Function,
        }
    }

    /// Reconcile a declared kind with the shape of the name it applies to
    ///
    /// `Class` on a nested name becomes `NestedClass` and vice versa. Globals
    /// and functions keep their kind even when qualified.
    pub fn normalize_for(self, name: &SymbolName) -> Self {
        match (self, name.is_nested()) {
            (Self::Class, true) => Self::NestedClass,
            (Self::NestedClass, false) => Self::Class,
            (kind, _) => kind,
        }
    }

    /// Presume a kind from the shape of a name with no explicit rule
    ///
    /// ```
    /// use xreg_domain::SymbolKind;
    ///
    /// assert_eq!(SymbolKind::infer("THaVDC"), Some(SymbolKind::Class));
    /// assert_eq!(SymbolKind::infer("gHaVars"), Some(SymbolKind::GlobalObject));
    /// assert_eq!(SymbolKind::infer("THaDetMap::Module"), Some(SymbolKind::NestedClass));
    /// assert_eq!(SymbolKind::infer("compute()"), Some(SymbolKind::FreeFunction));
    /// assert_eq!(SymbolKind::infer("compute"), None);
    /// ```
    pub fn infer(name: &str) -> Option<Self> {
        if name.contains(SYMBOL_SEPARATOR) {
            return Some(Self::NestedClass);
        }
        if name.ends_with(FUNCTION_CALL_SUFFIX) {
            return Some(Self::FreeFunction);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(GLOBAL_OBJECT_PREFIX), Some(second)) if second.is_ascii_uppercase() => {
                Some(Self::GlobalObject)
            }
            (Some(first), _) if first.is_ascii_uppercase() => Some(Self::Class),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global" | "global-object" => Ok(Self::GlobalObject),
            "class" | "struct" => Ok(Self::Class),
            "nested-class" | "nestedclass" => Ok(Self::NestedClass),
            "function" | "free-function" => Ok(Self::FreeFunction),
            _ => Err(Error::unknown_kind(s)),
        }
    }
}

/// Whether a rule exposes or hides its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Expose,
    Hide,
}

impl Polarity {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Expose)
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expose => write!(f, "expose"),
            Self::Hide => write!(f, "hide"),
        }
    }
}

//! Exposure rule value objects

use super::symbol::{Polarity, SymbolKind, SymbolName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a declared rule takes part in evaluation
///
/// Inactive rules come from directives that were disabled in place
/// (commented out). They keep their provenance but never change
/// visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleState {
    #[default]
    Active,
    Inactive,
}

/// Where a rule was declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Manifest file or other source label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// 1-based line number within the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Provenance {
    /// Provenance pointing at a line of an unnamed source
    pub fn line(line: usize) -> Self {
        Self {
            source: None,
            line: Some(line),
        }
    }

    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, "{source}:{line}"),
            (Some(source), None) => write!(f, "{source}"),
            (None, Some(line)) => write!(f, "line {line}"),
            (None, None) => write!(f, "<api>"),
        }
    }
}

/// A single exposure override
///
/// # Example
///
/// ```
/// use xreg_domain::{ExposureRule, Polarity, SymbolKind, SymbolName};
///
/// let rule = ExposureRule::new(
///     SymbolName::parse("THaScintillator::DataDest").unwrap(),
///     SymbolKind::Class,
///     Polarity::Expose,
/// )
/// .with_version(Some(1));
///
/// assert_eq!(rule.kind, SymbolKind::NestedClass);
/// assert!(rule.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRule {
    /// Fully-qualified symbol the rule applies to
    pub symbol: SymbolName,

    /// Kind of symbol, normalized against the name shape
    pub kind: SymbolKind,

    /// Expose or hide
    pub polarity: Polarity,

    /// Schema/layout revision tag, stored but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Active or declared-but-inactive
    #[serde(default)]
    pub state: RuleState,

    /// Declaration site
    #[serde(default)]
    pub provenance: Provenance,
}

impl ExposureRule {
    /// Create an active, untagged rule
    pub fn new(symbol: SymbolName, kind: SymbolKind, polarity: Polarity) -> Self {
        let kind = kind.normalize_for(&symbol);
        Self {
            symbol,
            kind,
            polarity,
            version: None,
            state: RuleState::Active,
            provenance: Provenance::default(),
        }
    }

    pub fn with_version(mut self, version: Option<u32>) -> Self {
        self.version = version;
        self
    }

    pub fn with_state(mut self, state: RuleState) -> Self {
        self.state = state;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state == RuleState::Active
    }
}

impl fmt::Display for ExposureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.polarity, self.kind, self.symbol)?;
        if let Some(version) = self.version {
            write!(f, " v{version}")?;
        }
        if self.state == RuleState::Inactive {
            write!(f, " (inactive)")?;
        }
        Ok(())
    }
}

//! Finalize-time diagnostics
//!
//! Findings that do not invalidate a manifest but that an author usually
//! wants to know about. Fatal problems are errors, never diagnostics.

use serde::Serialize;
use std::fmt;
use xreg_domain::{Provenance, SymbolName};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// Registry diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// An active rule later overridden by another active rule
    ShadowedRule {
        symbol: SymbolName,
        overridden_at: Provenance,
        by: Provenance,
    },
    /// An exposed nested symbol whose enclosing symbol is not exposed
    OrphanNested {
        symbol: SymbolName,
        enclosing: SymbolName,
        at: Provenance,
    },
    /// A rule declared a lower version tag than an earlier one
    VersionRegression {
        symbol: SymbolName,
        previous: u32,
        declared: u32,
        at: Provenance,
    },
    /// A symbol declared only through inactive directives
    InactiveDeclaration { symbol: SymbolName, at: Provenance },
}

impl Diagnostic {
    pub fn id(&self) -> &'static str {
        match self {
            Self::ShadowedRule { .. } => "XR001",
            Self::OrphanNested { .. } => "XR002",
            Self::VersionRegression { .. } => "XR003",
            Self::InactiveDeclaration { .. } => "XR004",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::ShadowedRule { .. } | Self::InactiveDeclaration { .. } => Severity::Info,
            Self::OrphanNested { .. } | Self::VersionRegression { .. } => Severity::Warning,
        }
    }

    pub fn symbol(&self) -> &SymbolName {
        match self {
            Self::ShadowedRule { symbol, .. }
            | Self::OrphanNested { symbol, .. }
            | Self::VersionRegression { symbol, .. }
            | Self::InactiveDeclaration { symbol, .. } => symbol,
        }
    }

    /// Declaration site the finding points at
    pub fn provenance(&self) -> &Provenance {
        match self {
            Self::ShadowedRule { by, .. } => by,
            Self::OrphanNested { at, .. }
            | Self::VersionRegression { at, .. }
            | Self::InactiveDeclaration { at, .. } => at,
        }
    }

    /// Emit the diagnostic through `tracing` at its severity
    pub fn log(&self) {
        match self.severity() {
            Severity::Warning => tracing::warn!(
                id = self.id(),
                symbol = %self.symbol(),
                at = %self.provenance(),
                "{}",
                self
            ),
            Severity::Info => tracing::info!(
                id = self.id(),
                symbol = %self.symbol(),
                at = %self.provenance(),
                "{}",
                self
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShadowedRule {
                symbol,
                overridden_at,
                by,
            } => write!(
                f,
                "Rule for {symbol} at {overridden_at} is overridden by the rule at {by}"
            ),
            Self::OrphanNested {
                symbol,
                enclosing,
                at,
            } => write!(
                f,
                "Nested symbol {symbol} at {at} is exposed but {enclosing} is not"
            ),
            Self::VersionRegression {
                symbol,
                previous,
                declared,
                at,
            } => write!(
                f,
                "Version tag of {symbol} goes back from {previous} to {declared} at {at}"
            ),
            Self::InactiveDeclaration { symbol, at } => {
                write!(f, "{symbol} is only declared inactive at {at}")
            }
        }
    }
}

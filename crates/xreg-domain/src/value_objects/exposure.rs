//! Query results handed to the host runtime

use super::symbol::SymbolKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an exposure answer was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// No rule mentions the symbol; the default policy decided
    Default,
    /// The last active rule for the symbol decided
    Rule,
    /// Only inactive declarations exist; the default policy decided
    Suppressed,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Rule => write!(f, "rule"),
            Self::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// Visibility answer for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exposure {
    /// Whether the host runtime may see the symbol
    pub visible: bool,

    /// Latest declared version tag, `0` when never tagged
    pub version: u32,

    /// Kind the answer was computed for
    pub kind: SymbolKind,

    /// Where the answer came from
    pub resolution: Resolution,
}

impl fmt::Display for Exposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} {} ({})",
            if self.visible { "visible" } else { "hidden" },
            self.version,
            self.kind,
            self.resolution
        )
    }
}

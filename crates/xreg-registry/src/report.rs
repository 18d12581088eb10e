//! Registry reporting
//!
//! Serializable snapshots of a finalized registry for build logs and
//! authoring tools.

use crate::diagnostics::Severity;
use crate::effective::{DefaultPolicy, EffectiveRegistry};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;
use xreg_domain::{Resolution, Result, SymbolKind};

/// Counts describing a finalized registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub symbols: usize,
    pub exposed: usize,
    pub hidden: usize,
    pub suppressed: usize,
    pub excluded: usize,
    pub warnings: usize,
}

impl RegistrySummary {
    pub fn from_registry(registry: &EffectiveRegistry) -> Self {
        let exposed = registry.exposed().count();
        let suppressed = registry
            .entries()
            .filter(|entry| entry.resolution == Resolution::Suppressed)
            .count();
        let warnings = registry
            .diagnostics()
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
            .count();
        Self {
            symbols: registry.len(),
            exposed,
            hidden: registry.len() - exposed,
            suppressed,
            excluded: registry.excluded_count(),
            warnings,
        }
    }
}

impl fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} symbols: {} exposed, {} hidden ({} suppressed), {} excluded by conditionals, {} warnings",
            self.symbols, self.exposed, self.hidden, self.suppressed, self.excluded, self.warnings
        )
    }
}

/// One row of the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub symbol: String,
    pub kind: SymbolKind,
    pub visible: bool,
    pub version: u32,
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// One diagnostic of the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportDiagnostic {
    pub id: &'static str,
    pub severity: Severity,
    pub symbol: String,
    pub message: String,
}

/// Full snapshot of a finalized registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistryReport {
    pub features: Vec<String>,
    pub defaults: DefaultPolicy,
    pub summary: RegistrySummary,
    pub entries: Vec<ReportEntry>,
    pub inactive: Vec<ReportEntry>,
    pub diagnostics: Vec<ReportDiagnostic>,
}

impl RegistryReport {
    pub fn from_registry(registry: &EffectiveRegistry) -> Self {
        let entries = registry
            .entries()
            .map(|entry| ReportEntry {
                symbol: entry.symbol.to_string(),
                kind: entry.kind,
                visible: entry.visible,
                version: entry.version,
                resolution: entry.resolution,
                line: entry.provenance.line,
            })
            .collect();

        let inactive = registry
            .inactive_declarations()
            .iter()
            .map(|rule| ReportEntry {
                symbol: rule.symbol.to_string(),
                kind: rule.kind,
                visible: rule.polarity.is_visible(),
                version: rule.version.unwrap_or_default(),
                resolution: Resolution::Suppressed,
                line: rule.provenance.line,
            })
            .collect();

        let diagnostics = registry
            .diagnostics()
            .iter()
            .map(|diagnostic| ReportDiagnostic {
                id: diagnostic.id(),
                severity: diagnostic.severity(),
                symbol: diagnostic.symbol().to_string(),
                message: diagnostic.to_string(),
            })
            .collect();

        Self {
            features: registry.features().iter().map(String::from).collect(),
            defaults: *registry.defaults(),
            summary: RegistrySummary::from_registry(registry),
            entries,
            inactive,
            diagnostics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain text table, one symbol per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let width = self
            .entries
            .iter()
            .map(|entry| entry.symbol.len())
            .max()
            .unwrap_or(0);

        let _ = writeln!(out, "features: [{}]", self.features.join(", "));
        let _ = writeln!(
            out,
            "defaults: global={} class={} function={}",
            self.defaults.global, self.defaults.class, self.defaults.function
        );
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{:<width$}  {:<7}  v{:<3} {:<14} {}",
                entry.symbol,
                if entry.visible { "exposed" } else { "hidden" },
                entry.version,
                entry.kind.as_str(),
                entry.resolution,
            );
        }
        for entry in &self.inactive {
            let _ = writeln!(
                out,
                "inactive: {} {} (line {})",
                entry.kind,
                entry.symbol,
                entry.line.map_or_else(|| "?".to_string(), |l| l.to_string())
            );
        }
        for diagnostic in &self.diagnostics {
            let _ = writeln!(
                out,
                "[{}] {}: {}",
                diagnostic.severity, diagnostic.id, diagnostic.message
            );
        }
        let _ = write!(out, "{}", self.summary);
        out
    }
}

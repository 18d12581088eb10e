//! Effective Registry
//!
//! The materialized name → exposure mapping produced by `finalize`. It is
//! never mutated after construction and is handed out as
//! `Arc<EffectiveRegistry>`, so any number of readers may query it
//! concurrently without locking.

use crate::conditional::FeatureSet;
use crate::diagnostics::Diagnostic;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use xreg_domain::constants::{FUNCTION_CALL_SUFFIX, UNVERSIONED};
use xreg_domain::{
    Error, Exposure, ExposureRule, Polarity, PolicyKind, Provenance, Resolution, Result,
    SymbolKind, SymbolName,
};

/// Baseline polarity per policy kind
///
/// Defaults to hiding everything: exposure is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultPolicy {
    pub global: Polarity,
    pub class: Polarity,
    pub function: Polarity,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            global: Polarity::Hide,
            class: Polarity::Hide,
            function: Polarity::Hide,
        }
    }
}

impl DefaultPolicy {
    pub fn get(&self, kind: PolicyKind) -> Polarity {
        match kind {
            PolicyKind::Global => self.global,
            PolicyKind::Class => self.class,
            PolicyKind::Function => self.function,
        }
    }

    pub fn set(&mut self, kind: PolicyKind, polarity: Polarity) {
        match kind {
            PolicyKind::Global => self.global = polarity,
            PolicyKind::Class => self.class = polarity,
            PolicyKind::Function => self.function = polarity,
        }
    }
}

/// Resolved state of one symbol mentioned by the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub symbol: SymbolName,
    pub kind: SymbolKind,
    pub visible: bool,
    pub version: u32,
    pub resolution: Resolution,
    /// Declaration that decided the entry
    pub provenance: Provenance,
}

impl RegistryEntry {
    pub fn exposure(&self) -> Exposure {
        Exposure {
            visible: self.visible,
            version: self.version,
            kind: self.kind,
            resolution: self.resolution,
        }
    }
}

/// Immutable exposure table consumed by the host runtime
#[derive(Debug, Clone)]
pub struct EffectiveRegistry {
    defaults: DefaultPolicy,
    entries: BTreeMap<SymbolName, RegistryEntry>,
    inactive: Vec<ExposureRule>,
    diagnostics: Vec<Diagnostic>,
    features: FeatureSet,
    excluded: usize,
}

impl EffectiveRegistry {
    /// Apply `defaults` and then `rules` in declaration order
    ///
    /// `rules` must already be flattened: every conditional block resolved.
    pub(crate) fn build(
        defaults: DefaultPolicy,
        rules: Vec<ExposureRule>,
        features: FeatureSet,
        excluded: usize,
        strict_versions: bool,
    ) -> Result<Self> {
        let mut entries: BTreeMap<SymbolName, RegistryEntry> = BTreeMap::new();
        let mut declared_versions: HashMap<SymbolName, u32> = HashMap::new();
        let mut inactive = Vec::new();
        let mut diagnostics = Vec::new();

        for rule in rules {
            if !rule.is_active() {
                inactive.push(rule);
                continue;
            }

            if let Some(declared) = rule.version {
                if let Some(&previous) = declared_versions.get(&rule.symbol) {
                    if declared < previous {
                        if strict_versions {
                            return Err(Error::VersionRegression {
                                symbol: rule.symbol.to_string(),
                                previous,
                                declared,
                                line: rule.provenance.line,
                            });
                        }
                        diagnostics.push(Diagnostic::VersionRegression {
                            symbol: rule.symbol.clone(),
                            previous,
                            declared,
                            at: rule.provenance.clone(),
                        });
                    }
                }
                declared_versions.insert(rule.symbol.clone(), declared);
            }

            if let Some(previous) = entries.get(&rule.symbol) {
                diagnostics.push(Diagnostic::ShadowedRule {
                    symbol: rule.symbol.clone(),
                    overridden_at: previous.provenance.clone(),
                    by: rule.provenance.clone(),
                });
            }

            let version = declared_versions
                .get(&rule.symbol)
                .copied()
                .unwrap_or(UNVERSIONED);
            entries.insert(
                rule.symbol.clone(),
                RegistryEntry {
                    symbol: rule.symbol,
                    kind: rule.kind,
                    visible: rule.polarity.is_visible(),
                    version,
                    resolution: Resolution::Rule,
                    provenance: rule.provenance,
                },
            );
        }

        for rule in &inactive {
            if entries.contains_key(&rule.symbol) {
                continue;
            }
            diagnostics.push(Diagnostic::InactiveDeclaration {
                symbol: rule.symbol.clone(),
                at: rule.provenance.clone(),
            });
            entries.insert(
                rule.symbol.clone(),
                RegistryEntry {
                    symbol: rule.symbol.clone(),
                    kind: rule.kind,
                    visible: defaults.get(rule.kind.policy_kind()).is_visible(),
                    version: UNVERSIONED,
                    resolution: Resolution::Suppressed,
                    provenance: rule.provenance.clone(),
                },
            );
        }

        for entry in entries.values() {
            if entry.resolution != Resolution::Rule || !entry.visible {
                continue;
            }
            let Some(enclosing) = entry.symbol.enclosing() else {
                continue;
            };
            let enclosing_exposed = entries
                .get(&enclosing)
                .is_some_and(|outer| outer.resolution == Resolution::Rule && outer.visible);
            if !enclosing_exposed {
                diagnostics.push(Diagnostic::OrphanNested {
                    symbol: entry.symbol.clone(),
                    enclosing,
                    at: entry.provenance.clone(),
                });
            }
        }

        Ok(Self {
            defaults,
            entries,
            inactive,
            diagnostics,
            features,
            excluded,
        })
    }

    /// Visibility and version of `name`
    ///
    /// Unknown symbols fall back to the default policy of the kind their
    /// name suggests. A trailing `()` marks a free function.
    pub fn is_exposed(&self, name: &str) -> Result<Exposure> {
        let (lookup, call_shaped) = split_call_suffix(name);
        let symbol = SymbolName::parse(lookup)?;
        if let Some(entry) = self.entries.get(&symbol) {
            return Ok(entry.exposure());
        }

        let kind = if call_shaped {
            SymbolKind::FreeFunction
        } else {
            SymbolKind::infer(symbol.as_str()).ok_or_else(|| Error::unknown_kind(name))?
        };
        Ok(self.default_exposure(kind))
    }

    /// Like [`is_exposed`](Self::is_exposed) for callers that know the kind
    ///
    /// Skips name-shape inference for symbols without a rule. A trailing
    /// `()` is stripped as in `is_exposed`.
    pub fn is_exposed_as(&self, name: &str, kind: SymbolKind) -> Result<Exposure> {
        let (lookup, _) = split_call_suffix(name);
        let symbol = SymbolName::parse(lookup)?;
        match self.entries.get(&symbol) {
            Some(entry) => Ok(entry.exposure()),
            None => Ok(self.default_exposure(kind.normalize_for(&symbol))),
        }
    }

    fn default_exposure(&self, kind: SymbolKind) -> Exposure {
        Exposure {
            visible: self.defaults.get(kind.policy_kind()).is_visible(),
            version: UNVERSIONED,
            kind,
            resolution: Resolution::Default,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn default_policy(&self, kind: PolicyKind) -> Polarity {
        self.defaults.get(kind)
    }

    pub fn defaults(&self) -> &DefaultPolicy {
        &self.defaults
    }

    /// Every symbol mentioned by the manifest, sorted by name
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Names of all visible symbols, sorted
    pub fn exposed(&self) -> impl Iterator<Item = &SymbolName> {
        self.entries
            .values()
            .filter(|entry| entry.visible)
            .map(|entry| &entry.symbol)
    }

    /// Symbols nested directly inside `outer`
    pub fn nested_of(&self, outer: &str) -> Vec<&SymbolName> {
        self.entries
            .keys()
            .filter(|symbol| {
                symbol
                    .enclosing()
                    .is_some_and(|enclosing| enclosing.as_str() == outer)
            })
            .collect()
    }

    /// Declared-but-inactive rules in declaration order
    pub fn inactive_declarations(&self) -> &[ExposureRule] {
        &self.inactive
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Feature set the registry was finalized against
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Number of rules dropped by inactive conditional blocks
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_call_suffix(name: &str) -> (&str, bool) {
    match name.strip_suffix(FUNCTION_CALL_SUFFIX) {
        Some(stripped) => (stripped, true),
        None => (name, false),
    }
}

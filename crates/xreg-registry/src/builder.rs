//! Exposure Registry
//!
//! Single-writer construction of the exposure table. Rules, default
//! policies and conditional blocks are collected in declaration order;
//! `finalize` resolves them once into an [`EffectiveRegistry`] and the
//! registry answers queries from that point on.
//!
//! # Example
//!
//! ```
//! use xreg_registry::{ExposureRegistry, FeatureSet};
//! use xreg_domain::{Polarity, PolicyKind, SymbolKind};
//!
//! let mut registry = ExposureRegistry::new();
//! registry.register_default_policy(PolicyKind::Class, Polarity::Hide)?;
//! registry.register_rule("THaVDC", SymbolKind::Class, Polarity::Expose, None)?;
//! registry.begin_conditional("ONLINE_ET")?;
//! registry.register_rule("THaOnlRun", SymbolKind::Class, Polarity::Expose, None)?;
//! registry.end_conditional()?;
//! registry.finalize(&FeatureSet::new())?;
//!
//! assert!(registry.is_exposed("THaVDC")?.visible);
//! assert!(!registry.is_exposed("THaOnlRun")?.visible);
//! # Ok::<(), xreg_domain::Error>(())
//! ```

use crate::conditional::{ConditionalFrame, FeaturePredicate, FeatureSet, PendingRule, flatten};
use crate::effective::{DefaultPolicy, EffectiveRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use xreg_domain::{
    Error, Exposure, ExposureRule, Polarity, PolicyKind, Result, RuleState, SymbolKind,
    SymbolName,
};

/// Finalize-time behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// Fail `finalize` when a symbol's version tag goes backwards
    #[serde(default)]
    pub strict_versions: bool,
}

/// Default policy declaration, guarded like a rule
#[derive(Debug, Clone)]
struct PendingDefault {
    kind: PolicyKind,
    polarity: Polarity,
    guards: Vec<FeaturePredicate>,
}

#[derive(Debug, Default)]
struct Declarations {
    defaults: Vec<PendingDefault>,
    rules: Vec<PendingRule>,
    open_blocks: Vec<ConditionalFrame>,
}

impl Declarations {
    fn guards(&self) -> Vec<FeaturePredicate> {
        self.open_blocks
            .iter()
            .map(|frame| frame.predicate.clone())
            .collect()
    }

    /// Baseline per kind from the defaults whose guards hold; last one wins
    fn resolve_defaults(&self, features: &FeatureSet) -> DefaultPolicy {
        let mut policy = DefaultPolicy::default();
        for declared in &self.defaults {
            if declared.guards.iter().all(|guard| guard.holds(features)) {
                policy.set(declared.kind, declared.polarity);
            }
        }
        policy
    }
}

#[derive(Debug)]
enum RegistryState {
    Building(Declarations),
    Finalized(Arc<EffectiveRegistry>),
}

/// Exposure registry with a build phase and a query phase
#[derive(Debug)]
pub struct ExposureRegistry {
    state: RegistryState,
    options: RegistryOptions,
}

impl Default for ExposureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureRegistry {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            state: RegistryState::Building(Declarations::default()),
            options,
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, RegistryState::Finalized(_))
    }

    fn declarations(&mut self) -> Result<&mut Declarations> {
        match &mut self.state {
            RegistryState::Building(declarations) => Ok(declarations),
            RegistryState::Finalized(_) => Err(Error::AlreadyFinalized),
        }
    }

    /// Set the baseline polarity for a policy kind
    ///
    /// Last call per kind wins. The default always stays the lowest
    /// priority rule, even when declared after overrides.
    pub fn register_default_policy(&mut self, kind: PolicyKind, polarity: Polarity) -> Result<()> {
        let declarations = self.declarations()?;
        if !declarations.rules.is_empty() {
            warn!(
                kind = %kind,
                polarity = %polarity,
                "Default policy declared after overrides; it still applies at lowest priority"
            );
        }
        let guards = declarations.guards();
        declarations.defaults.push(PendingDefault {
            kind,
            polarity,
            guards,
        });
        debug!(kind = %kind, polarity = %polarity, "Default policy registered");
        Ok(())
    }

    /// Append an active override
    pub fn register_rule(
        &mut self,
        name: &str,
        kind: SymbolKind,
        polarity: Polarity,
        version: Option<u32>,
    ) -> Result<()> {
        let rule = ExposureRule::new(SymbolName::parse(name)?, kind, polarity).with_version(version);
        self.register(rule)
    }

    /// Append a declared-but-inactive override
    pub fn register_inactive_rule(
        &mut self,
        name: &str,
        kind: SymbolKind,
        polarity: Polarity,
        version: Option<u32>,
    ) -> Result<()> {
        let rule = ExposureRule::new(SymbolName::parse(name)?, kind, polarity)
            .with_version(version)
            .with_state(RuleState::Inactive);
        self.register(rule)
    }

    /// Append a prepared rule, guarded by every open conditional block
    pub fn register(&mut self, rule: ExposureRule) -> Result<()> {
        let declarations = self.declarations()?;
        let rule = ExposureRule {
            kind: rule.kind.normalize_for(&rule.symbol),
            ..rule
        };
        let guards = declarations.guards();
        debug!(rule = %rule, at = %rule.provenance, guards = guards.len(), "Rule registered");
        declarations.rules.push(PendingRule { rule, guards });
        Ok(())
    }

    /// Open a block active only when `feature` is defined
    pub fn begin_conditional(&mut self, feature: &str) -> Result<()> {
        self.begin_conditional_with(FeaturePredicate::defined(feature), None)
    }

    /// Open a block guarded by an arbitrary predicate
    pub fn begin_conditional_with(
        &mut self,
        predicate: FeaturePredicate,
        line: Option<usize>,
    ) -> Result<()> {
        let declarations = self.declarations()?;
        debug!(
            predicate = %predicate,
            depth = declarations.open_blocks.len() + 1,
            "Conditional block opened"
        );
        declarations.open_blocks.push(ConditionalFrame {
            predicate,
            opened_at: line,
        });
        Ok(())
    }

    /// Close the innermost open block
    pub fn end_conditional(&mut self) -> Result<FeaturePredicate> {
        self.end_conditional_at(None)
    }

    /// Close the innermost open block, reporting `line` if none is open
    pub fn end_conditional_at(&mut self, line: Option<usize>) -> Result<FeaturePredicate> {
        let declarations = self.declarations()?;
        declarations
            .open_blocks
            .pop()
            .map(|frame| frame.predicate)
            .ok_or(Error::UnmatchedEndConditional { line })
    }

    /// Predicate of the innermost open block
    pub fn open_conditional(&self) -> Option<&FeaturePredicate> {
        match &self.state {
            RegistryState::Building(declarations) => {
                declarations.open_blocks.last().map(|frame| &frame.predicate)
            }
            RegistryState::Finalized(_) => None,
        }
    }

    /// Resolve conditional blocks, apply defaults then overrides
    ///
    /// Callable exactly once. On error the registry stays in its build
    /// phase; the caller is expected to abort.
    pub fn finalize(&mut self, features: &FeatureSet) -> Result<Arc<EffectiveRegistry>> {
        let declarations = self.declarations()?;
        if let Some(frame) = declarations.open_blocks.last() {
            return Err(Error::UnterminatedConditionalBlock {
                predicate: frame.predicate.to_string(),
                line: frame.opened_at,
            });
        }

        let defaults = declarations.resolve_defaults(features);
        let pending = std::mem::take(&mut declarations.rules);
        let declared = pending.len();
        let flattened = flatten(pending.clone(), features);

        let effective = match EffectiveRegistry::build(
            defaults,
            flattened.rules,
            features.clone(),
            flattened.excluded,
            self.options.strict_versions,
        ) {
            Ok(effective) => Arc::new(effective),
            Err(e) => {
                if let RegistryState::Building(declarations) = &mut self.state {
                    declarations.rules = pending;
                }
                return Err(e);
            }
        };

        for diagnostic in effective.diagnostics() {
            diagnostic.log();
        }
        info!(
            declared,
            excluded = effective.excluded_count(),
            symbols = effective.len(),
            exposed = effective.exposed().count(),
            inactive = effective.inactive_declarations().len(),
            features = %features,
            "Exposure registry finalized"
        );

        self.state = RegistryState::Finalized(Arc::clone(&effective));
        Ok(effective)
    }

    /// Shared handle to the finalized table
    pub fn effective(&self) -> Result<Arc<EffectiveRegistry>> {
        match &self.state {
            RegistryState::Finalized(effective) => Ok(Arc::clone(effective)),
            RegistryState::Building(_) => Err(Error::RegistryNotFinalized),
        }
    }

    /// Visibility and version of `name`; see [`EffectiveRegistry::is_exposed`]
    pub fn is_exposed(&self, name: &str) -> Result<Exposure> {
        match &self.state {
            RegistryState::Finalized(effective) => effective.is_exposed(name),
            RegistryState::Building(_) => Err(Error::RegistryNotFinalized),
        }
    }

    /// Visibility and version of `name` when its kind is known
    pub fn is_exposed_as(&self, name: &str, kind: SymbolKind) -> Result<Exposure> {
        match &self.state {
            RegistryState::Finalized(effective) => effective.is_exposed_as(name, kind),
            RegistryState::Building(_) => Err(Error::RegistryNotFinalized),
        }
    }
}

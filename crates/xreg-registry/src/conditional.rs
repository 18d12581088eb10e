//! Build-time conditional blocks
//!
//! Rules registered inside a conditional block are buffered together with
//! the predicates of every enclosing block. Whether they reach the
//! effective registry is decided once, at finalize time, against the
//! feature set the environment resolved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use xreg_domain::ExposureRule;

/// Resolved set of active build-time features
///
/// The registry never derives this itself; it is handed in by whoever
/// read the build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<String>);

impl FeatureSet {
    /// Empty feature set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, feature: S) -> bool {
        self.0.insert(feature.into())
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for FeatureSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, feature) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{feature}")?;
        }
        write!(f, "}}")
    }
}

/// Predicate guarding a conditional block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "test", content = "feature")]
pub enum FeaturePredicate {
    /// Holds when the feature is active
    Defined(String),
    /// Holds when the feature is not active
    NotDefined(String),
}

impl FeaturePredicate {
    pub fn defined<S: Into<String>>(feature: S) -> Self {
        Self::Defined(feature.into())
    }

    pub fn not_defined<S: Into<String>>(feature: S) -> Self {
        Self::NotDefined(feature.into())
    }

    pub fn feature(&self) -> &str {
        match self {
            Self::Defined(name) | Self::NotDefined(name) => name,
        }
    }

    pub fn holds(&self, features: &FeatureSet) -> bool {
        match self {
            Self::Defined(name) => features.contains(name),
            Self::NotDefined(name) => !features.contains(name),
        }
    }

    /// The predicate of the `#else` branch
    pub fn negate(&self) -> Self {
        match self {
            Self::Defined(name) => Self::NotDefined(name.clone()),
            Self::NotDefined(name) => Self::Defined(name.clone()),
        }
    }
}

impl fmt::Display for FeaturePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(name) => write!(f, "defined({name})"),
            Self::NotDefined(name) => write!(f, "!defined({name})"),
        }
    }
}

/// An open conditional block during construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalFrame {
    pub predicate: FeaturePredicate,
    /// Line the block was opened on, when known
    pub opened_at: Option<usize>,
}

/// A registered rule together with the predicates that guard it
#[derive(Debug, Clone)]
pub struct PendingRule {
    pub rule: ExposureRule,
    pub guards: Vec<FeaturePredicate>,
}

impl PendingRule {
    /// Whether every enclosing predicate holds
    pub fn is_enabled(&self, features: &FeatureSet) -> bool {
        self.guards.iter().all(|guard| guard.holds(features))
    }
}

/// Result of resolving conditional blocks
#[derive(Debug, Default)]
pub struct Flattened {
    /// Rules whose guards all held, in declaration order
    pub rules: Vec<ExposureRule>,
    /// Number of rules dropped by a false predicate
    pub excluded: usize,
}

/// Resolve every conditional block against `features`
///
/// Order of the surviving rules is preserved.
pub fn flatten(pending: Vec<PendingRule>, features: &FeatureSet) -> Flattened {
    let mut flattened = Flattened::default();
    for entry in pending {
        if entry.is_enabled(features) {
            flattened.rules.push(entry.rule);
        } else {
            tracing::debug!(
                symbol = %entry.rule.symbol,
                guards = ?entry.guards,
                "Rule excluded by inactive conditional block"
            );
            flattened.excluded += 1;
        }
    }
    flattened
}

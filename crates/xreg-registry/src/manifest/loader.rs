//! Manifest loader
//!
//! Reads a manifest, parses it and replays the directives into a fresh
//! [`ExposureRegistry`]. The first error aborts the load; the error carries
//! the offending line.

use super::parser::{Directive, DirectiveKind, parse_manifest};
use crate::builder::{ExposureRegistry, RegistryOptions};
use crate::conditional::FeaturePredicate;
use std::path::Path;
use tracing::debug;
use xreg_domain::{Error, ExposureRule, Provenance, Result, RuleState, SymbolName};

/// Loads manifests into registries ready for `finalize`
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    options: RegistryOptions,
}

/// Open block as seen by the loader, to resolve `#else`
struct OpenBlock {
    predicate: FeaturePredicate,
    in_else: bool,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Load a manifest file
    pub fn load_file(&self, path: &Path) -> Result<ExposureRegistry> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io_with_source(format!("Failed to read manifest {}", path.display()), e)
        })?;
        self.load_with_source(&content, Some(path.display().to_string()))
    }

    /// Load manifest text with no source label
    pub fn load_str(&self, content: &str) -> Result<ExposureRegistry> {
        self.load_with_source(content, None)
    }

    /// Load manifest text, labelling rule provenance with `source`
    pub fn load_with_source(
        &self,
        content: &str,
        source: Option<String>,
    ) -> Result<ExposureRegistry> {
        let directives = parse_manifest(content)?;
        debug!(
            source = source.as_deref().unwrap_or("<inline>"),
            directives = directives.len(),
            "Manifest parsed"
        );

        let mut registry = ExposureRegistry::with_options(self.options);
        let mut blocks: Vec<OpenBlock> = Vec::new();
        for directive in directives {
            let line = directive.line;
            apply(&mut registry, &mut blocks, directive, source.as_deref())
                .map_err(|e| e.at_line(line))?;
        }
        Ok(registry)
    }
}

fn apply(
    registry: &mut ExposureRegistry,
    blocks: &mut Vec<OpenBlock>,
    directive: Directive,
    source: Option<&str>,
) -> Result<()> {
    let line = directive.line;
    match directive.kind {
        DirectiveKind::DefaultPolicy { kind, polarity } => {
            registry.register_default_policy(kind, polarity)
        }
        DirectiveKind::Rule {
            name,
            kind,
            polarity,
            version,
            inactive,
        } => {
            let mut provenance = Provenance::line(line);
            if let Some(source) = source {
                provenance = provenance.with_source(source);
            }
            let state = if inactive {
                RuleState::Inactive
            } else {
                RuleState::Active
            };
            let rule = ExposureRule::new(SymbolName::parse(&name)?, kind, polarity)
                .with_version(version)
                .with_state(state)
                .with_provenance(provenance);
            registry.register(rule)
        }
        DirectiveKind::BeginConditional(predicate) => {
            registry.begin_conditional_with(predicate.clone(), Some(line))?;
            blocks.push(OpenBlock {
                predicate,
                in_else: false,
            });
            Ok(())
        }
        DirectiveKind::Else => {
            let Some(block) = blocks.last_mut() else {
                return Err(Error::UnmatchedEndConditional { line: Some(line) });
            };
            if block.in_else {
                return Err(Error::syntax(line, "duplicate #else in conditional block"));
            }
            block.in_else = true;
            registry.end_conditional_at(Some(line))?;
            registry.begin_conditional_with(block.predicate.negate(), Some(line))
        }
        DirectiveKind::EndConditional => {
            registry.end_conditional_at(Some(line))?;
            blocks.pop();
            Ok(())
        }
    }
}

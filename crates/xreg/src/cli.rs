//! Command line interface
//!
//! ```bash
//! # Validate a manifest for the dictionary build
//! xreg --feature __CINT__ check LinkDef.h
//!
//! # Ask about individual symbols
//! xreg --feature __CINT__ --feature ONLINE_ET query LinkDef.h THaOnlRun gHaVars
//!
//! # Full report as JSON
//! xreg --feature __CINT__ dump LinkDef.h --format json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xreg_infrastructure::config::{AppConfig, ConfigLoader};
use xreg_registry::{EffectiveRegistry, ManifestLoader, RegistryReport, RegistrySummary};

/// Command line interface for the exposure registry
#[derive(Parser, Debug)]
#[command(name = "xreg")]
#[command(about = "Selective type-exposure registry for reflection dictionaries")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Define a feature for conditional blocks (repeatable)
    #[arg(short = 'D', long = "feature", value_name = "NAME", global = true)]
    pub features: Vec<String>,

    /// Fail when a symbol's version tag goes backwards
    #[arg(long, global = true)]
    pub strict_versions: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse and finalize a manifest, then print the summary and diagnostics
    Check {
        /// Manifest file
        manifest: PathBuf,
    },

    /// Print the exposure of individual symbols
    Query {
        /// Manifest file
        manifest: PathBuf,

        /// Symbols to look up; a trailing `()` marks a free function
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Print the full registry report
    Dump {
        /// Manifest file
        manifest: PathBuf,

        #[arg(long, default_value = "text", value_enum)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Configuration from file and environment, with command line overrides
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load().context("Failed to load configuration")?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        config.registry.add_features(self.features.iter().cloned());
        config.registry.strict_versions |= self.strict_versions;
    }
}

/// Run `cli.command` against `config` and return what to print
pub fn execute(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    match &cli.command {
        Command::Check { manifest } => {
            let registry = finalize_manifest(manifest, config)?;
            let mut out = RegistrySummary::from_registry(&registry).to_string();
            for diagnostic in registry.diagnostics() {
                let _ = write!(
                    out,
                    "\n[{}] {}: {}",
                    diagnostic.severity(),
                    diagnostic.id(),
                    diagnostic
                );
            }
            Ok(out)
        }
        Command::Query { manifest, symbols } => {
            let registry = finalize_manifest(manifest, config)?;
            let mut lines = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let exposure = registry
                    .is_exposed(symbol)
                    .with_context(|| format!("Failed to query '{symbol}'"))?;
                lines.push(format!(
                    "{symbol} {} {} {} {}",
                    exposure.visible,
                    exposure.version,
                    exposure.kind.as_str(),
                    exposure.resolution
                ));
            }
            Ok(lines.join("\n"))
        }
        Command::Dump { manifest, format } => {
            let registry = finalize_manifest(manifest, config)?;
            let report = RegistryReport::from_registry(&registry);
            match format {
                OutputFormat::Text => Ok(report.render_text()),
                OutputFormat::Json => Ok(report.to_json()?),
            }
        }
    }
}

fn finalize_manifest(path: &Path, config: &AppConfig) -> anyhow::Result<Arc<EffectiveRegistry>> {
    let mut registry = ManifestLoader::new()
        .with_options(config.registry.to_options())
        .load_file(path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    let effective = registry
        .finalize(&config.registry.feature_set())
        .with_context(|| format!("Failed to finalize manifest {}", path.display()))?;
    Ok(effective)
}

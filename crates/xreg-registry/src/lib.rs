//! Selective Type-Exposure Registry
//!
//! Decides which globals, classes, nested classes and free functions of a
//! native library are visible to a reflection runtime. The model is an
//! allow-list: a default policy per kind (normally "hide everything"),
//! followed by ordered per-symbol overrides where the last rule for a name
//! wins. Overrides may sit inside build-time conditional blocks, which are
//! resolved once against the active feature set.
//!
//! # Lifecycle
//!
//! 1. Declare defaults, rules and conditional blocks on an
//!    [`ExposureRegistry`], directly or through a [`ManifestLoader`].
//! 2. Call [`ExposureRegistry::finalize`] once with the active [`FeatureSet`].
//! 3. Query the resulting [`EffectiveRegistry`], shared as an `Arc`.
//!
//! ```
//! use xreg_registry::{FeatureSet, ManifestLoader};
//!
//! let manifest = "\
//! #pragma link off all classes;
//! #pragma link C++ class THaVDC+;
//! #ifdef ONLINE_ET
//! #pragma link C++ class THaOnlRun+;
//! #endif
//! ";
//!
//! let mut registry = ManifestLoader::new().load_str(manifest)?;
//! let effective = registry.finalize(&FeatureSet::from_iter(["ONLINE_ET"]))?;
//! assert!(effective.is_exposed("THaOnlRun")?.visible);
//! assert_eq!(effective.is_exposed("THaVDC")?.version, 1);
//! # Ok::<(), xreg_domain::Error>(())
//! ```

pub mod builder;
pub mod conditional;
pub mod diagnostics;
pub mod effective;
pub mod manifest;
pub mod report;

pub use builder::{ExposureRegistry, RegistryOptions};
pub use conditional::{FeaturePredicate, FeatureSet};
pub use diagnostics::{Diagnostic, Severity};
pub use effective::{DefaultPolicy, EffectiveRegistry, RegistryEntry};
pub use manifest::{Directive, DirectiveKind, ManifestLoader, parse_manifest};
pub use report::{RegistryReport, RegistrySummary};

//! # xreg
//!
//! Selective type-exposure registry: decides which symbols of a native
//! library a reflection runtime may see, from an ordered allow-list
//! manifest with build-time conditional blocks.
//!
//! ## Example
//!
//! ```
//! use xreg::registry::{FeatureSet, ManifestLoader};
//!
//! let mut registry = ManifestLoader::new()
//!     .load_str("#pragma link off all classes;\n#pragma link C++ class THaVDC+;\n")?;
//! let effective = registry.finalize(&FeatureSet::new())?;
//! assert!(effective.is_exposed("THaVDC")?.visible);
//! assert!(!effective.is_exposed("THaUnknownClass")?.visible);
//! # Ok::<(), xreg::domain::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - symbol names, rules, exposures and the error taxonomy
//! - `registry` - registry lifecycle, conditional blocks, manifest loading
//! - `infrastructure` - configuration and logging
//! - `cli` - the `xreg` command line tool

/// Domain layer - value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use xreg_domain::*;
}

/// Registry core
///
/// Re-exports from the registry crate for convenience
pub mod registry {
    pub use xreg_registry::*;
}

/// Infrastructure layer - configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use xreg_infrastructure::*;
}

pub mod cli;

pub use cli::{Cli, Command, OutputFormat, execute};

//! # Exposure Registry Domain
//!
//! Core types shared by every layer of the exposure registry: validated
//! symbol names, symbol kinds, exposure rules and the error taxonomy.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Separator conventions and version defaults |
//! | [`error`] | Error type and `Result` alias |
//! | [`value_objects`] | Symbol names, kinds, rules and query results |

/// Domain constants
pub mod constants;
/// Error handling types
pub mod error;
/// Immutable value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{
    Exposure, ExposureRule, Polarity, PolicyKind, Provenance, Resolution, RuleState, SymbolKind,
    SymbolName,
};

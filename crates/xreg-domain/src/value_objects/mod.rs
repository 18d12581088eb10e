//! Domain Value Objects
//!
//! Immutable value objects describing symbols, the rules declared for them
//! and the answers the registry gives about them.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`SymbolName`] | Validated fully-qualified symbol name |
//! | [`SymbolKind`] | Global object, class, nested class or free function |
//! | [`PolicyKind`] | Kind a default policy is declared for |
//! | [`Polarity`] | Expose or hide |
//! | [`ExposureRule`] | One override with version tag and provenance |
//! | [`Exposure`] | Query result for one symbol |

/// Query result value objects
pub mod exposure;
/// Rule value objects
pub mod rule;
/// Symbol naming value objects
pub mod symbol;

pub use exposure::{Exposure, Resolution};
pub use rule::{ExposureRule, Provenance, RuleState};
pub use symbol::{Polarity, PolicyKind, SymbolKind, SymbolName};

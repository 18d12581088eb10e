//! Domain layer constants
//!
//! Naming conventions shared by the manifest parser, the registry and the
//! query API.

// ============================================================================
// SYMBOL NAMING CONSTANTS
// ============================================================================

/// Canonical separator between an enclosing symbol and a nested one
pub const SYMBOL_SEPARATOR: &str = "::";

/// Alternate nesting separator accepted on input and normalized to `::`
pub const ALT_SYMBOL_SEPARATOR: char = '.';

/// Suffix marking a query name as a free function (`Foo()`)
pub const FUNCTION_CALL_SUFFIX: &str = "()";

/// Prefix convention for global objects (`gHaVars`)
pub const GLOBAL_OBJECT_PREFIX: char = 'g';

// ============================================================================
// VERSION TAG CONSTANTS
// ============================================================================

/// Version reported for symbols that never declared a version tag
pub const UNVERSIONED: u32 = 0;

/// Version tag implied by a bare `+` suffix
pub const IMPLICIT_VERSION_TAG: u32 = 1;

//! Infrastructure layer constants
//!
//! Registry semantics constants live in `xreg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "xreg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "xreg";

/// Environment variable prefix for configuration (`XREG__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "XREG";

/// Separator between prefix, sections and keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable overriding the configured filter
pub const LOG_ENV_FILTER: &str = "XREG_LOG";

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "xreg";

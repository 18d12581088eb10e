//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the registry tools.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`constants`] | Configuration and logging constants |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LoggingConfig, RegistryConfig};
pub use error_ext::ErrorContext;

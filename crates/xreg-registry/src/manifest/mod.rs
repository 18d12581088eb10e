//! Manifest System
//!
//! Line-oriented manifest format: parsing into directives and loading the
//! directives into an exposure registry.

pub mod loader;
pub mod parser;

pub use loader::ManifestLoader;
pub use parser::{Directive, DirectiveKind, parse_line, parse_manifest};

//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::ref_option)] // thiserror hands format args over by reference
fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// Main error type for the exposure registry
///
/// Every variant is a contract violation raised to the immediate caller.
/// Nothing here is recovered or retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Symbol name is empty or misuses the nesting separator
    #[error("Malformed symbol name '{name}': {reason}")]
    MalformedSymbolName {
        /// The offending name as written
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A conditional block was still open at finalize time
    #[error("Unterminated conditional block '{predicate}'{}", at_line(.line))]
    UnterminatedConditionalBlock {
        /// Predicate of the innermost open block
        predicate: String,
        /// Line the block was opened on, when known
        line: Option<usize>,
    },

    /// `end_conditional` (or `#else`/`#endif`) without an open block
    #[error("End of conditional block without a matching begin{}", at_line(.line))]
    UnmatchedEndConditional {
        /// Line of the stray terminator, when known
        line: Option<usize>,
    },

    /// `finalize` called twice, or registration attempted after it
    #[error("Registry already finalized")]
    AlreadyFinalized,

    /// Query attempted before `finalize`
    #[error("Registry not finalized: call finalize() before querying")]
    RegistryNotFinalized,

    /// Unknown symbol whose kind cannot be inferred from its name
    #[error("Cannot infer symbol kind for '{name}'")]
    UnknownSymbolKind {
        /// The queried name
        name: String,
    },

    /// A later rule declared a lower version tag (strict mode only)
    #[error(
        "Version tag for '{symbol}' regressed from {previous} to {declared}{}",
        at_line(.line)
    )]
    VersionRegression {
        /// Symbol whose tag went backwards
        symbol: String,
        /// Highest tag declared before
        previous: u32,
        /// Tag declared by the offending rule
        declared: u32,
        /// Line of the offending rule, when known
        line: Option<usize>,
    },

    /// Manifest line that matches no directive
    #[error("Manifest syntax error at line {line}: {message}")]
    ManifestSyntax {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Registry error raised while applying a manifest line
    #[error("Manifest line {line}: {source}")]
    Manifest {
        /// 1-based line number
        line: usize,
        /// The underlying registry error
        #[source]
        source: Box<Error>,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Registry error creation methods
impl Error {
    /// Create a malformed symbol name error
    pub fn malformed_symbol<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::MalformedSymbolName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown symbol kind error
    pub fn unknown_kind<S: Into<String>>(name: S) -> Self {
        Self::UnknownSymbolKind { name: name.into() }
    }

    /// Create a manifest syntax error
    pub fn syntax<S: Into<String>>(line: usize, message: S) -> Self {
        Self::ManifestSyntax {
            line,
            message: message.into(),
        }
    }

    /// Attach a manifest line number to a registry error
    ///
    /// Variants that already carry a line are returned as they are.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::ManifestSyntax { .. } | Self::Manifest { .. } => self,
            Self::UnmatchedEndConditional { line: None } => {
                Self::UnmatchedEndConditional { line: Some(line) }
            }
            Self::UnmatchedEndConditional { .. }
            | Self::UnterminatedConditionalBlock { line: Some(_), .. }
            | Self::VersionRegression { line: Some(_), .. } => self,
            other => Self::Manifest {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The registry error behind any manifest line wrapping
    pub fn root(&self) -> &Error {
        match self {
            Self::Manifest { source, .. } => source.root(),
            other => other,
        }
    }

    /// Line number carried by this error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ManifestSyntax { line, .. } | Self::Manifest { line, .. } => Some(*line),
            Self::UnterminatedConditionalBlock { line, .. }
            | Self::UnmatchedEndConditional { line }
            | Self::VersionRegression { line, .. } => *line,
            _ => None,
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelatedFieldError {
    /// Misconfigured column or path, surfaced when the list display is set up
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A segment of a relation path could not be read while walking a row
    #[error("Attribute resolution error: cannot read `{segment}` while resolving `{path}` ({reason})")]
    AttributeResolution {
        path: CompactString,
        segment: CompactString,
        reason: ResolutionFailure,
    },

    /// Column is neither declared, a relation path, nor a model field
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Error loading a list display configuration file
    #[cfg(feature = "config")]
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl RelatedFieldError {
    /// True for failures raised while walking a row, as opposed to setup errors.
    pub fn is_attribute_resolution(&self) -> bool {
        matches!(self, Self::AttributeResolution { .. })
    }
}

/// Why a path segment could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// The object has no attribute with that name
    Missing,
    /// The previous hop was null, so there is nothing to read from
    Null,
    /// The previous hop is a plain value rather than a related object
    NotARecord,
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Missing => "no such attribute",
            Self::Null => "previous relation is null",
            Self::NotARecord => "previous value is not a related object",
        })
    }
}

/// Result type for related-field operations
pub type Result<T> = std::result::Result<T, RelatedFieldError>;

//! Error types for the browser.
//!
//! Only document-level failures are errors. Missing fields inside a single
//! entry degrade to `None` during extraction and never reach this type.

use thiserror::Error;

/// Main error type for the astrodata-filter library.
#[derive(Debug, Error)]
pub enum AstroError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Could not read the source document.
    #[error("Failed to read {path}: {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A filter criterion supplied by the user is invalid.
    #[error("Invalid criterion for {field}: {reason}")]
    InvalidCriterion { field: String, reason: String },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Keyword mapping file could not be parsed.
    #[error("Keyword mapping parse failed: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl AstroError {
    /// Shorthand for [`AstroError::InvalidCriterion`].
    pub fn invalid_criterion(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCriterion {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for browser operations.
pub type Result<T> = std::result::Result<T, AstroError>;

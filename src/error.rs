//! Unified error type for schema synthesis.
//!
//! Most configuration problems are deliberately *not* errors: a bad field
//! name or an empty field group is logged as a diagnostic and the offending
//! field or group is skipped, never aborting the rest of the registration
//! pass. The variants here cover the cases where a caller genuinely needs
//! to react, such as a duplicate type reaching the schema builder.

use thiserror::Error;

/// Errors that can surface from schema synthesis or config loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A computed type or field name violates the schema's identifier rules
    #[error("invalid name \"{name}\": {reason}")]
    InvalidName { name: String, reason: String },

    /// A type name reached the schema builder more than once. The registry
    /// memoizes registrations precisely to prevent this.
    #[error("type \"{type_name}\" is already registered")]
    DuplicateType { type_name: String },

    /// A field group config could not be used at all
    #[error("invalid field group \"{key}\": {reason}")]
    InvalidGroup { key: String, reason: String },

    /// A config document failed to parse
    #[error("invalid field group config: {0}")]
    InvalidConfig(String),

    /// A config file could not be read
    #[error("failed to read config from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for schema synthesis operations
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

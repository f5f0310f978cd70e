//! crates/logging/src/error.rs
//! Errors reported while parsing form configuration.

use thiserror::Error;

/// Error produced when a directive, category definition or configuration
/// file cannot be applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The directive token was empty.
    #[error("empty form directive")]
    EmptyDirective,
    /// The directive carried a value or sign but no form name.
    #[error("form directive '{0}' names no form")]
    EmptyName(String),
    /// The value after `=` is not a recognised switch.
    #[error("invalid value '{value}' in form directive '{directive}' (expected on or off)")]
    InvalidValue {
        /// The full directive token.
        directive: String,
        /// The unrecognised value.
        value: String,
    },
    /// The directive combined a `+`/`-` sign with an `=VALUE` switch.
    #[error("form directive '{0}' combines a sign with a value")]
    SignedValue(String),
    /// A configuration document listed the reserved `unspecified` name under
    /// `forms`.
    #[error("'{0}' is reserved in forms; use the unspecified field instead")]
    ReservedForm(String),
    /// A configuration document listed a form name that is not lower-case.
    #[error("form '{0}' in configuration must be lower-case")]
    UnnormalizedForm(String),
    /// A category definition lacks the `=` separator or a category name.
    #[error("category definition '{0}' must look like CATEGORY=TYPE[,TYPE...]")]
    MissingTypes(String),
    /// The configuration file could not be read.
    #[error("failed to read form configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration document is not valid JSON for a form configuration.
    #[cfg(feature = "serde")]
    #[error("invalid form configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn messages_name_offending_input() {
        let error = ConfigError::InvalidValue {
            directive: "net=maybe".to_owned(),
            value: "maybe".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "invalid value 'maybe' in form directive 'net=maybe' (expected on or off)"
        );
        assert!(ConfigError::MissingTypes("io".into()).to_string().contains("'io'"));
        assert_eq!(
            ConfigError::SignedValue("-net=on".into()).to_string(),
            "form directive '-net=on' combines a sign with a value"
        );
    }

    #[test]
    fn io_error_is_preserved_as_source() {
        let error = ConfigError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(error.to_string().starts_with("failed to read"));
        assert_eq!(error.source().map(ToString::to_string), Some("missing".to_owned()));
    }
}

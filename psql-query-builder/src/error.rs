//! Error types for the query builder

use thiserror::Error;

/// The main error type for query building and execution
#[derive(Error, Debug)]
pub enum Error {
    /// Opening the database connection failed
    #[error("Configuration error: {0}")]
    Configuration(#[source] sqlx::Error),

    /// The database rejected the rendered statement
    #[error("Execution error: {0}")]
    Execution(#[source] sqlx::Error),

    /// A templated column type referenced `n`, `p` or `s` without a value
    #[error("Missing '{field}' in 'createTable' for type '{column_type}'")]
    MissingTypeParameter { field: char, column_type: String },

    /// A result column could not be decoded
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Operator string outside the supported set
    #[error("Unknown operator '{0}'")]
    InvalidOperator(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for query builder operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new missing type parameter error
    pub fn missing_type_parameter(field: char, column_type: impl Into<String>) -> Self {
        Self::MissingTypeParameter {
            field,
            column_type: column_type.into(),
        }
    }

    /// Create a new decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid operator error
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        Self::InvalidOperator(operator.into())
    }

    /// The missing field name, if this is a [`Error::MissingTypeParameter`]
    pub fn missing_field(&self) -> Option<char> {
        match self {
            Self::MissingTypeParameter { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether the statement was already run when this error occurred.
    ///
    /// Decode and serialization failures happen while reading back the rows
    /// of a statement the database accepted.
    pub fn statement_executed(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_parameter_error() {
        let err = Error::missing_type_parameter('p', "DECIMAL(p,s)");
        assert!(matches!(err, Error::MissingTypeParameter { field: 'p', .. }));
        assert_eq!(err.missing_field(), Some('p'));
        assert_eq!(
            err.to_string(),
            "Missing 'p' in 'createTable' for type 'DECIMAL(p,s)'"
        );
    }

    #[test]
    fn test_decode_error() {
        let err = Error::decode("created_at", "unsupported type TIMESTAMPTZ");
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(
            err.to_string(),
            "Decode error on column 'created_at': unsupported type TIMESTAMPTZ"
        );
        assert_eq!(err.missing_field(), None);
        assert!(err.statement_executed());
    }

    #[test]
    fn test_execution_error_wraps_sqlx() {
        let err = Error::Execution(sqlx::Error::Protocol("syntax error".to_string()));
        assert!(err.to_string().starts_with("Execution error:"));
        assert!(err.to_string().contains("syntax error"));
        assert!(!err.statement_executed());
    }

    #[test]
    fn test_invalid_operator_error() {
        let err = Error::invalid_operator("~~~");
        assert_eq!(err.to_string(), "Unknown operator '~~~'");
    }
}

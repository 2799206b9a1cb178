//! Error types for the explorer query core
//!
//! Conversion between the unified model and the wire format is total and never
//! returns these. They cover the boundaries around it: parsing raw wire JSON,
//! validating ranking-expression trees built by the UI, and loading settings.

use thiserror::Error;

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Main error type for the explorer query core
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Query model and wire codec errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid wire query: {reason}")]
    InvalidWireJson { reason: String },

    #[error("Operator {operator} expects {expected} operand(s), got {actual}")]
    InvalidArity {
        operator: String,
        expected: String,
        actual: usize,
    },

    #[error("Unknown ranking operator tag: {tag}")]
    UnknownOperatorTag { tag: String },

    #[error("Unsupported ranking expression literal: {literal}")]
    UnsupportedLiteral { literal: String },
}

/// Settings loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid settings: {reason}")]
    Invalid { reason: String },
}

impl QueryError {
    /// Whether the error came from input the user typed or pasted, as opposed
    /// to a tree built by the application itself
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidWireJson { .. }
                | QueryError::UnknownOperatorTag { .. }
                | QueryError::UnsupportedLiteral { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_user_input() {
        let err = QueryError::InvalidWireJson {
            reason: "expected value".to_string(),
        };
        assert!(err.is_user_input());

        let err = QueryError::UnknownOperatorTag {
            tag: "Mod".to_string(),
        };
        assert!(err.is_user_input());

        // Arity problems come from trees the builder assembled
        let err = QueryError::InvalidArity {
            operator: "Log".to_string(),
            expected: "1".to_string(),
            actual: 0,
        };
        assert!(!err.is_user_input());
    }

    #[test]
    fn test_error_messages() {
        let err = QueryError::InvalidArity {
            operator: "Pow".to_string(),
            expected: "2".to_string(),
            actual: 3,
        };
        assert_eq!(err.to_string(), "Operator Pow expects 2 operand(s), got 3");

        let err: ExplorerError = err.into();
        assert!(err.to_string().starts_with("Query error: "));
    }

    #[test]
    fn test_explorer_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ExplorerError = json_err.into();
        assert!(matches!(err, ExplorerError::Json(_)));
    }
}

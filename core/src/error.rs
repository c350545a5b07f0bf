//! Errors from route registration and configuration loading.
//!
//! Lookup misses are not errors: [`Router::lookup`](crate::Router::lookup)
//! returns `None` for a path nothing matches.

/// Errors from schema compilation, parameter extraction and route loading.
///
/// All of these surface at registration or load time. Registration that
/// fails leaves the router exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// A pattern could not be compiled into a [`Schema`](crate::Schema).
    #[error("bad schema: {0}")]
    BadSchema(String),

    /// A concrete path was parsed against a schema of a different length.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A route table referenced a handler name that was never registered.
    #[error("unknown handler \"{name}\"{}", format_available(.available))]
    UnknownHandler {
        /// The unregistered handler name.
        name: String,
        /// Handler names that ARE registered.
        available: Vec<String>,
    },

    /// A guard pattern (regex) is invalid.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A guard tree nests deeper than [`MAX_GUARD_DEPTH`](crate::MAX_GUARD_DEPTH).
    #[error("guard depth {depth} exceeds maximum {max}")]
    DepthExceeded {
        /// Actual depth of the guard tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// An `all`/`any` guard has more children than
    /// [`MAX_GUARDS_PER_COMPOUND`](crate::MAX_GUARDS_PER_COMPOUND).
    #[error("compound guard has {count} children, maximum is {max}")]
    TooManyGuards {
        /// Actual number of children.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A guard match value is longer than the configured limit.
    #[error("pattern length {len} exceeds maximum {max}")]
    PatternTooLong {
        /// Actual length in bytes.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A route table could not be read or deserialized.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        " (no handlers are registered)".to_string()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_handler_lists_registered_names() {
        let err = RouterError::UnknownHandler {
            name: "profile".into(),
            available: vec!["home".into(), "match".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown handler \"profile\" (registered: home, match)"
        );
    }

    #[test]
    fn unknown_handler_with_empty_registry() {
        let err = RouterError::UnknownHandler {
            name: "profile".into(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("(no handlers are registered)"));
    }

    #[test]
    fn bad_schema_message() {
        let err = RouterError::BadSchema("parameter 0 has no name".into());
        assert_eq!(err.to_string(), "bad schema: parameter 0 has no name");
    }

    #[test]
    fn limit_messages() {
        let err = RouterError::DepthExceeded { depth: 40, max: 32 };
        assert_eq!(err.to_string(), "guard depth 40 exceeds maximum 32");
        let err = RouterError::PatternTooLong { len: 9000, max: 8192 };
        assert!(err.to_string().contains("9000"));
    }
}

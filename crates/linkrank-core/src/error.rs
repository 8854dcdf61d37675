use std::fmt;

use thiserror::Error;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    OutOfBounds,
    SizeMismatch,
    Numerical,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "E1001",
            Self::OutOfBounds => "E2001",
            Self::SizeMismatch => "E2002",
            Self::Numerical => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument",
            Self::OutOfBounds => "Node id out of bounds",
            Self::SizeMismatch => "Declared edge count does not match edge list",
            Self::Numerical => "Numerical solver failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument => None,
            Self::OutOfBounds => Some("Node ids are 0-indexed and must be below the graph order."),
            Self::SizeMismatch => {
                Some("Fix the `n m` header so that m equals the number of edge lines.")
            }
            Self::Numerical => Some("Retry with a teleport probability above 0."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by graph construction and the ranking engines.
///
/// All of these are deterministic: retrying the same call with the same
/// inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("node id {node} out of bounds for graph of order {order}")]
    OutOfBounds { node: usize, order: usize },

    #[error("declared edge count {declared} does not match edge list length {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("numerical failure: {reason}")]
    Numerical { reason: String },
}

impl RankError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            Self::SizeMismatch { .. } => ErrorCode::SizeMismatch,
            Self::Numerical { .. } => ErrorCode::Numerical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, RankError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::InvalidArgument,
            ErrorCode::OutOfBounds,
            ErrorCode::SizeMismatch,
            ErrorCode::Numerical,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::SizeMismatch.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_map_to_codes() {
        let err = RankError::OutOfBounds { node: 7, order: 3 };
        assert_eq!(err.code(), ErrorCode::OutOfBounds);
        assert_eq!(
            err.to_string(),
            "node id 7 out of bounds for graph of order 3"
        );
        assert_eq!(
            RankError::invalid("alpha").code(),
            ErrorCode::InvalidArgument
        );
        let err = RankError::Numerical {
            reason: "lost mass".to_string(),
        };
        assert_eq!(err.code().code(), "E3001");
        assert!(err.code().hint().is_some());
        assert_eq!(err.to_string(), "numerical failure: lost mass");
    }
}

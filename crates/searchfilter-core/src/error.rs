use crate::{expr::EvalError, value::ValueTag};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CompileError
///
/// Failure to turn a predicate into a filter tree. Only `Unsupported` is
/// recoverable; the optimizer then keeps the predicate as a post-filter.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CompileError {
    #[error("unsupported filter expression: {reason}")]
    Unsupported { reason: String },

    #[error("dynamic attribute segment {segment} evaluated to {found}, expected string or number")]
    InvalidDynamicSegmentType { segment: usize, found: ValueTag },

    #[error("element {index} of membership list is {found}, only scalar values are allowed")]
    InvalidCollectionElement { index: usize, found: ValueTag },

    #[error("unable to lookup analyzer '{name}'")]
    AnalyzerNotFound { name: String },

    #[error("malformed {node} node: {reason}")]
    MalformedNode { node: &'static str, reason: String },

    #[error("invalid argument {position} for '{function}': {reason}")]
    InvalidArgument {
        function: &'static str,
        position: usize,
        reason: String,
    },

    #[error("function '{name}' is not registered")]
    UnknownFunction { name: String },

    #[error("failed to evaluate expression: {0}")]
    Evaluation(#[from] EvalError),
}

impl CompileError {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Unsupported { .. } => ErrorClass::Unsupported,
            Self::InvalidDynamicSegmentType { .. }
            | Self::InvalidCollectionElement { .. }
            | Self::MalformedNode { .. }
            | Self::InvalidArgument { .. } => ErrorClass::InvalidInput,
            Self::AnalyzerNotFound { .. } | Self::UnknownFunction { .. } => ErrorClass::NotFound,
            Self::Evaluation(_) => ErrorClass::Execution,
        }
    }

    /// The optimizer may fall back to a post-filter instead of failing the query.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.class(), ErrorClass::Unsupported)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Unsupported,
    InvalidInput,
    NotFound,
    Execution,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsupported => "unsupported",
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Execution => "execution",
        };
        write!(f, "{label}")
    }
}

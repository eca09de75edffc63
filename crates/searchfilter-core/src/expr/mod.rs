//! Module: expr
//! Responsibility: runtime evaluation of expression trees.
//! Does not own: filter compilation or index access.
//! Boundary: compile-time constant evaluation and per-document fallback
//! evaluation both go through `Evaluator`.

mod bindings;
mod eval;
mod function;
mod scan;


pub use bindings::Bindings;
pub use eval::Evaluator;
pub use function::{Function, FunctionImpl, FunctionRegistry};
pub use scan::{CancellationToken, ScanContext};

use crate::value::Range;
use thiserror::Error as ThisError;

///
/// EvalError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    #[error("variable '{name}' is not bound")]
    UnboundVariable { name: String },

    #[error("function '{name}' is not registered")]
    UnknownFunction { name: String },

    #[error("function '{function}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("invalid argument {position} for function '{function}': {reason}")]
    InvalidArgument {
        function: String,
        position: usize,
        reason: String,
    },

    #[error("expanding {range} would produce {len} values, more than the limit of {limit}")]
    ExpansionTooLarge { range: Range, len: u64, limit: u64 },

    #[error("scan cancelled")]
    Cancelled,

    #[error("scan deadline exceeded")]
    DeadlineExceeded,
}

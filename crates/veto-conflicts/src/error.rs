//! Precondition-violation errors for the conflict engine.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the conflict engine.
///
/// Every variant is a violated precondition, not a recoverable runtime
/// condition; the engine never ignores one silently. Callers that want
/// "add if absent" semantics check with `in_conflict` before calling `add`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConflictError {
    /// Attempted to put an object in conflict with itself.
    #[error("an object cannot be in conflict with itself")]
    #[diagnostic(help("a conflict relates two distinct objects"))]
    SelfConflict,

    /// The two objects are already in conflict — directly, or through
    /// intermediate objects when cascading is on.
    #[error("conflict already exists")]
    #[diagnostic(help("check with in_conflict before calling add"))]
    DuplicateConflict,

    /// No direct conflict matched a removal request.
    #[error("conflict does not exist")]
    #[diagnostic(help("only direct conflicts can be removed"))]
    ConflictNotFound,
}

/// Convenience alias for conflict-engine results.
pub type ConflictResult<T> = Result<T, ConflictError>;

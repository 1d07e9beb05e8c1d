//! Error hierarchy (§6 "Error types", §7 "Error handling design"): a small,
//! closed set of error kinds, never used internally for logging or retry —
//! the library "never logs, never retries, never swallows" (§7). Errors
//! only ever surface as the `Err` side of a `Result` at the one or two call
//! sites that can fail (`at`, `try_insert`/`try_append`-style capacity
//! checks); everything else is either infallible or, per §7, undefined
//! behavior on precondition violation (e.g. dereferencing `end`) rather
//! than a checked error.
//!
//! Realized with `thiserror` rather than the teacher's hand-rolled
//! `SGErr` (`tree/error.rs` in the retrieval pack) because the teacher is
//! `no_std` and hand-rolls to avoid a dependency with an allocator
//! assumption; this crate targets `std`, where `thiserror`'s derive is the
//! idiomatic choice (see `vvoss-dev-ReedCMS`'s `Cargo.toml` in this pack).

use thiserror::Error;

/// Violations the caller could have avoided by checking state first.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LogicError {
    /// `at(index)` / `at(key)` / `front`/`back` on an empty or out-of-range
    /// position.
    #[error("index or key out of range")]
    OutOfRange,

    /// Iterators from a different container passed to an operation, or an
    /// inverted `erase` range (`first` does not precede `last`).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Requested size exceeds `max_size()`.
    #[error("length error: requested size exceeds max_size()")]
    LengthError,

    /// A domain precondition (e.g. a comparator that isn't a strict weak
    /// ordering) was violated.
    #[error("domain error: {0}")]
    DomainError(&'static str),
}

/// Failures that can only be detected once an operation is underway.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// Arithmetic overflow while computing a size or capacity.
    #[error("runtime overflow")]
    Overflow,

    /// Arithmetic underflow (e.g. decrementing an already-empty count).
    #[error("runtime underflow")]
    Underflow,

    /// A requested range does not fit within the container's bounds.
    #[error("range error: {0}")]
    RangeError(&'static str),
}

/// Carrier for an OS/allocator-level failure, identified by an opaque code
/// and category string (mirrors the conventional `std::system_error`
/// carrier named in §6; this crate only constructs one for allocation
/// failure surfaced through `try_*` APIs).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("system error {code} ({category})")]
pub struct SystemError {
    pub code: i32,
    pub category: &'static str,
}

/// Crate-wide error type unifying the three kinds above.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    System(#[from] SystemError),
}

//! Configuration errors raised during schema composition.
//!
//! There are exactly two fatal, caller-visible errors in this crate, and
//! both are programmer errors in the composition input:
//!
//! 1. **UnknownEvaluationType** — an evaluation tag string outside the
//!    closed set reached the composer.
//! 2. **NoActionsEnabled** — a decision schema was requested with every
//!    capability flag off.
//!
//! Both abort composition synchronously. Retrying is never appropriate
//! since the input itself is invalid. Everything else in this crate is
//! either pure construction or governed by the language profile's
//! silent-degrade policy (see [`crate::language`]).

use thiserror::Error;

/// Fatal configuration error during schema composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// An evaluation tag outside the closed set was supplied.
    ///
    /// The closed set is `definitive`, `freshness`, `plurality`,
    /// `attribution`, `completeness`. There is no default variant — an
    /// unrecognized tag is always an error, never a fallback.
    #[error("unknown evaluation type: {0:?}")]
    UnknownEvaluationType(String),

    /// A decision schema was requested with zero enabled action flags.
    ///
    /// An empty-choice schema would let the model pick nothing; the
    /// composer refuses to produce one.
    #[error("decision schema requires at least one enabled action")]
    NoActionsEnabled,
}

/// Result type alias for composition operations.
pub type ContractResult<T> = Result<T, ContractError>;

use thiserror::Error;

use crate::math::Real;

/// Top-level error type for the timber CSG kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors raised by exact arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of negative value {0}")]
    NegativeRadicand(Real),

    #[error("square root of {0} has no exact quadratic-surd form")]
    UnsupportedRadicand(Real),
}

/// Invariant violations detected while building a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("{what} must be a non-zero vector")]
    ZeroVector { what: &'static str },

    #[error("{parameter} = {value} must be positive")]
    NonPositive { parameter: &'static str, value: Real },

    #[error("start distance {start} is past end distance {end}")]
    InvertedBounds { start: Real, end: Real },
}

/// Reasons a support-point query has no answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("cannot compute support point: {shape} is infinite in both directions")]
    InfiniteInBothDirections { shape: &'static str },

    #[error("cannot compute support point: {shape} is infinite in negative direction")]
    InfiniteInNegativeDirection { shape: &'static str },

    #[error("cannot compute support point: {shape} is infinite in positive direction")]
    InfiniteInPositiveDirection { shape: &'static str },

    #[error("half-space is unbounded except in the direction exactly opposite to its normal")]
    HalfSpaceUnbounded,

    #[error("cannot compute support point of an empty union")]
    EmptyUnion,
}

/// Convenience type alias for results using [`CsgError`].
pub type Result<T> = std::result::Result<T, CsgError>;

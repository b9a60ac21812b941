use std::fmt;

use num_bigint::Sign;

use crate::error::{ConstructionError, QueryError, Result};
use crate::math::Real;

/// Start and end distances along a shape's axis. A missing bound means the
/// shape runs to infinity on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialExtent {
    start: Option<Real>,
    end: Option<Real>,
}

impl AxialExtent {
    /// Creates an extent from optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvertedBounds`] if both bounds are present
    /// and `start > end`.
    pub fn new(start: Option<Real>, end: Option<Real>) -> Result<Self> {
        if let (Some(start), Some(end)) = (&start, &end) {
            if start > end {
                return Err(ConstructionError::InvertedBounds {
                    start: start.clone(),
                    end: end.clone(),
                }
                .into());
            }
        }
        Ok(Self { start, end })
    }

    /// Returns the start distance, if bounded.
    #[must_use]
    pub fn start(&self) -> Option<&Real> {
        self.start.as_ref()
    }

    /// Returns the end distance, if bounded.
    #[must_use]
    pub fn end(&self) -> Option<&Real> {
        self.end.as_ref()
    }

    /// Returns the axial coordinate that minimizes the projection onto a
    /// direction whose axial component is `axial`.
    ///
    /// A positive component needs the start bound and a negative one the end
    /// bound. A zero component takes whichever bound is present, start first.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] naming `shape` when the needed bound is missing.
    /// An extent with no bounds always fails.
    pub fn minimal_coordinate(&self, axial: &Real, shape: &'static str) -> Result<&Real> {
        let bound = match (&self.start, &self.end, axial.sign()) {
            (None, None, _) => return Err(QueryError::InfiniteInBothDirections { shape }.into()),
            (Some(start), _, Sign::Plus) => start,
            (None, Some(_), Sign::Plus) => {
                return Err(QueryError::InfiniteInNegativeDirection { shape }.into())
            }
            (_, Some(end), Sign::Minus) => end,
            (Some(_), None, Sign::Minus) => {
                return Err(QueryError::InfiniteInPositiveDirection { shape }.into())
            }
            (Some(start), _, Sign::NoSign) => start,
            (None, Some(end), Sign::NoSign) => end,
        };
        Ok(bound)
    }

    /// Returns `true` if `t` lies between the present bounds, inclusive.
    #[must_use]
    pub fn contains(&self, t: &Real) -> bool {
        self.start.as_ref().is_none_or(|start| start <= t)
            && self.end.as_ref().is_none_or(|end| t <= end)
    }

    /// Returns `true` if `t` equals one of the present bounds.
    #[must_use]
    pub fn is_at_bound(&self, t: &Real) -> bool {
        self.start.as_ref() == Some(t) || self.end.as_ref() == Some(t)
    }
}

impl fmt::Display for AxialExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn bound(value: Option<&Real>) -> String {
            value.map_or_else(|| "None".to_owned(), ToString::to_string)
        }
        write!(f, "start={}, end={}", bound(self.start()), bound(self.end()))
    }
}

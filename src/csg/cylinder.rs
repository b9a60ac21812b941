use std::fmt;

use num_traits::Zero;

use crate::error::{ConstructionError, Result};
use crate::math::{is_zero_vector, resolve_basis, Frame, Point3, Real, Vector3};

use super::{AxialExtent, Components, Solid};

/// A circular cylinder around an axis through the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    axis_direction: Vector3,
    radius: Real,
    extent: AxialExtent,
    frame: Frame,
}

impl Cylinder {
    /// Creates a cylinder. Omitting `start` or `end` leaves that side unbounded.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the radius is not positive, the axis
    /// is zero, or `start > end`.
    pub fn new(
        axis_direction: Vector3,
        radius: Real,
        start: Option<Real>,
        end: Option<Real>,
    ) -> Result<Self> {
        if !radius.is_positive() {
            return Err(ConstructionError::NonPositive {
                parameter: "radius",
                value: radius,
            }
            .into());
        }
        if is_zero_vector(&axis_direction) {
            return Err(ConstructionError::ZeroVector {
                what: "axis direction",
            }
            .into());
        }
        let extent = AxialExtent::new(start, end)?;
        let frame = resolve_basis(&axis_direction)?;
        Ok(Self {
            axis_direction,
            radius,
            extent,
            frame,
        })
    }

    /// Returns the axis direction as given.
    #[must_use]
    pub fn axis_direction(&self) -> &Vector3 {
        &self.axis_direction
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> &Real {
        &self.radius
    }

    /// Returns the start and end distances along the axis.
    #[must_use]
    pub fn extent(&self) -> &AxialExtent {
        &self.extent
    }

    /// Returns the local frame around the axis.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Rim offset in frame coordinates for a radial direction `(du, dv)`.
    fn rim(&self, du: &Real, dv: &Real) -> Result<(Real, Real)> {
        if du.is_zero() && dv.is_zero() {
            return Ok((self.radius.clone(), Real::zero()));
        }
        let length = (du * du + dv * dv).sqrt()?;
        let scale = -self.radius.checked_div(&length)?;
        Ok((&scale * du, &scale * dv))
    }

    fn radial_distance_squared(x: &Real, y: &Real) -> Real {
        x * x + y * y
    }
}

impl Solid for Cylinder {
    /// A purely axial query has no unique rim point; the frame's `u`
    /// direction is used.
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        let (du, dv, dw) = self.frame.decompose(direction);
        let axial = self.extent.minimal_coordinate(&dw, "cylinder")?;
        let (x, y) = self.rim(&du, &dv)?;
        Ok(self.frame.compose(&x, &y, axial))
    }

    fn contains_point(&self, point: &Point3) -> bool {
        let (x, y, t) = self.frame.decompose(&point.coords);
        Self::radial_distance_squared(&x, &y) <= &self.radius * &self.radius
            && self.extent.contains(&t)
    }

    fn is_on_boundary(&self, point: &Point3) -> bool {
        if !self.contains_point(point) {
            return false;
        }
        let (x, y, t) = self.frame.decompose(&point.coords);
        Self::radial_distance_squared(&x, &y) == &self.radius * &self.radius
            || self.extent.is_at_bound(&t)
    }

    /// The lateral surface wins over the end caps on a rim edge.
    fn outward_normal(&self, point: &Point3) -> Option<Vector3> {
        let (x, y, t) = self.frame.decompose(&point.coords);
        if Self::radial_distance_squared(&x, &y) == &self.radius * &self.radius {
            let scale = self.radius.recip().ok()?;
            let normal = self.frame.compose(&(x * &scale), &(y * &scale), &Real::zero());
            Some(normal.coords)
        } else if self.extent.start() == Some(&t) {
            Some(-self.frame.w())
        } else if self.extent.end() == Some(&t) {
            Some(self.frame.w().clone())
        } else {
            None
        }
    }
}

impl fmt::Display for Cylinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cylinder(axis={}, radius={}, {})",
            Components(self.axis_direction.as_slice()),
            self.radius,
            self.extent
        )
    }
}

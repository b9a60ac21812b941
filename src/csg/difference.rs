use std::fmt;

use num_traits::One;

use crate::error::Result;
use crate::math::{Point3, Real, Vector3};

use super::{average_normals, Shape, Solid};

/// A base shape with other shapes carved out of it.
///
/// Membership honors the subtraction. The support-point query does not: it
/// answers for the outer envelope of the stock, which is the base alone. Use
/// it to find where uncut material starts or ends along an axis, not to
/// extract the boundary of the carved solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    base: Box<Shape>,
    subtract: Vec<Shape>,
}

impl Difference {
    /// Creates `base` minus every shape in `subtract`.
    #[must_use]
    pub fn new(base: Shape, subtract: Vec<Shape>) -> Self {
        Self {
            base: Box::new(base),
            subtract,
        }
    }

    /// Returns the base shape.
    #[must_use]
    pub fn base(&self) -> &Shape {
        &self.base
    }

    /// Returns the subtracted shapes.
    #[must_use]
    pub fn subtract(&self) -> &[Shape] {
        &self.subtract
    }
}

impl Solid for Difference {
    /// Envelope query: delegates to the base and ignores the subtracted
    /// shapes. Base failures propagate unchanged.
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        self.base.support_point(direction)
    }

    /// Subtracted shapes remove their open interior, so cut faces stay part
    /// of the result. A point where a subtracted face lies flush on a base
    /// face with the same outward normal is removed, as is any shared
    /// boundary point whose normals cannot be determined.
    fn contains_point(&self, point: &Point3) -> bool {
        if !self.base.contains_point(point) {
            return false;
        }
        let cutting = self.subtract.iter().filter(|shape| shape.contains_point(point));
        for shape in cutting {
            if !shape.is_on_boundary(point) {
                return false;
            }
            if self.base.is_on_boundary(point) {
                let (Some(base_normal), Some(cut_normal)) =
                    (self.base.outward_normal(point), shape.outward_normal(point))
                else {
                    return false;
                };
                if base_normal.dot(&cut_normal) == Real::one() {
                    return false;
                }
            }
        }
        true
    }

    fn is_on_boundary(&self, point: &Point3) -> bool {
        self.contains_point(point)
            && (self.base.is_on_boundary(point)
                || self.subtract.iter().any(|shape| shape.is_on_boundary(point)))
    }

    /// The base normal where the base boundary holds the point, otherwise the
    /// averaged reversed normals of the cut faces through it.
    fn outward_normal(&self, point: &Point3) -> Option<Vector3> {
        if self.base.is_on_boundary(point) {
            return self.base.outward_normal(point);
        }
        average_normals(
            self.subtract
                .iter()
                .filter(|shape| shape.is_on_boundary(point))
                .filter_map(|shape| shape.outward_normal(point))
                .map(|normal| -normal)
                .collect(),
        )
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference(base={}, subtract={} objects)",
            self.base,
            self.subtract.len()
        )
    }
}

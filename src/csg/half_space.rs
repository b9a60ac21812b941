use std::fmt;

use crate::error::{QueryError, Result};
use crate::math::{is_zero_vector, normalize, Point3, Real, Vector3};

use super::{Components, Solid};

/// The closed set of points `P` with `P · n̂ >= offset`, where `n̂` is the
/// normalized normal.
///
/// The normal points into the solid, so the boundary plane is where material
/// begins when approached from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpace {
    normal: Vector3,
    offset: Real,
    unit_normal: Vector3,
}

impl HalfSpace {
    /// Creates a half-space. The normal need not be unit length.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::ZeroVector`](crate::error::ConstructionError::ZeroVector)
    /// if `normal` is zero, or a numeric error if its length has no exact form.
    pub fn new(normal: Vector3, offset: Real) -> Result<Self> {
        let unit_normal = normalize(&normal, "normal")?;
        Ok(Self {
            normal,
            offset,
            unit_normal,
        })
    }

    /// Creates a half-space whose boundary plane passes through the origin.
    ///
    /// # Errors
    ///
    /// Same as [`HalfSpace::new`].
    pub fn through_origin(normal: Vector3) -> Result<Self> {
        Self::new(normal, Real::from(0))
    }

    /// Returns the normal as given.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the signed distance of the boundary plane from the origin.
    #[must_use]
    pub fn offset(&self) -> &Real {
        &self.offset
    }

    fn height(&self, point: &Point3) -> Real {
        point.coords.dot(&self.unit_normal)
    }
}

impl Solid for HalfSpace {
    /// Only a direction exactly opposite the normal has a unique minimizer:
    /// the foot of the boundary plane, `offset · n̂`.
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        let collinear = is_zero_vector(&direction.cross(&self.normal));
        if collinear && direction.dot(&self.normal).is_negative() {
            Ok(Point3::from(&self.unit_normal * self.offset.clone()))
        } else {
            Err(QueryError::HalfSpaceUnbounded.into())
        }
    }

    fn contains_point(&self, point: &Point3) -> bool {
        self.height(point) >= self.offset
    }

    fn is_on_boundary(&self, point: &Point3) -> bool {
        self.height(point) == self.offset
    }

    /// The normal points into the solid, so the outward normal is `-n̂`
    /// everywhere.
    fn outward_normal(&self, _point: &Point3) -> Option<Vector3> {
        Some(-&self.unit_normal)
    }
}

impl fmt::Display for HalfSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HalfSpace(normal={}, offset={})",
            Components(self.normal.as_slice()),
            self.offset
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ConstructionError, CsgError};
    use crate::math::{point3, vector3};

    fn floor_at_five() -> HalfSpace {
        HalfSpace::new(vector3(0, 0, 1), Real::from(5)).unwrap()
    }

    fn unbounded() -> Result<Point3> {
        Err(CsgError::Query(QueryError::HalfSpaceUnbounded))
    }

    #[test]
    fn opposite_direction_hits_plane_foot() {
        let h = floor_at_five();
        assert_eq!(h.support_point(&vector3(0, 0, -1)).unwrap(), point3(0, 0, 5));
        assert_eq!(h.support_point(&vector3(0, 0, -3)).unwrap(), point3(0, 0, 5));
    }

    #[test]
    fn other_directions_are_unbounded() {
        let h = floor_at_five();
        for d in [
            vector3(0, 0, 1),
            vector3(1, 0, 0),
            vector3(1, 1, -1),
            vector3(0, 0, 0),
        ] {
            assert_eq!(h.support_point(&d), unbounded());
        }
    }

    #[test]
    fn non_unit_normal_is_normalized() {
        let h = HalfSpace::new(vector3(0, 0, 2), Real::from(5)).unwrap();
        assert_eq!(h.support_point(&vector3(0, 0, -1)).unwrap(), point3(0, 0, 5));
        assert_eq!(h.normal(), &vector3(0, 0, 2));
    }

    #[test]
    fn diagonal_normal_stays_exact() {
        let h = HalfSpace::new(vector3(1, 1, 0), Real::from(2)).unwrap();
        let root_two = Real::from(2).sqrt().unwrap();
        let foot = h.support_point(&vector3(-5, -5, 0)).unwrap();
        assert_eq!(foot, Point3::new(root_two.clone(), root_two, Real::from(0)));
        assert!(h.is_on_boundary(&foot));
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert_eq!(
            HalfSpace::through_origin(vector3(0, 0, 0)),
            Err(CsgError::Construction(ConstructionError::ZeroVector {
                what: "normal"
            }))
        );
    }

    #[test]
    fn membership_is_inclusive() {
        let h = floor_at_five();
        assert!(h.contains_point(&point3(100, -3, 6)));
        assert!(h.contains_point(&point3(1, 1, 5)));
        assert!(h.is_on_boundary(&point3(1, 1, 5)));
        assert!(!h.contains_point(&point3(0, 0, 4)));
        assert!(h.contains_strictly(&point3(0, 0, 6)));
    }

    #[test]
    fn outward_normal_opposes_normal() {
        let h = HalfSpace::new(vector3(0, 0, 2), Real::from(5)).unwrap();
        assert_eq!(h.outward_normal(&point3(3, 4, 5)), Some(vector3(0, 0, -1)));
    }

    #[test]
    fn display_shows_parameters() {
        assert_eq!(
            floor_at_five().to_string(),
            "HalfSpace(normal=[0, 0, 1], offset=5)"
        );
    }
}

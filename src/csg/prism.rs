use std::fmt;

use crate::error::{ConstructionError, Result};
use crate::math::{is_zero_vector, resolve_basis, Frame, Point3, Real, Vector2, Vector3};

use super::{AxialExtent, Components, Solid};

/// A rectangular prism along an axis through the origin.
///
/// The cross-section is `size.x` wide along the frame's `u` axis and `size.y`
/// high along `v`, centered on the axis. Either end may be open.
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    size: Vector2,
    orientation: Vector3,
    extent: AxialExtent,
    frame: Frame,
}

impl Prism {
    /// Creates a prism. Omitting `start` or `end` leaves that side unbounded.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if either size component is not
    /// positive, the orientation is zero, or `start > end`.
    pub fn new(
        size: Vector2,
        orientation: Vector3,
        start: Option<Real>,
        end: Option<Real>,
    ) -> Result<Self> {
        for (parameter, value) in [("width", &size.x), ("height", &size.y)] {
            if !value.is_positive() {
                return Err(ConstructionError::NonPositive {
                    parameter,
                    value: value.clone(),
                }
                .into());
            }
        }
        if is_zero_vector(&orientation) {
            return Err(ConstructionError::ZeroVector {
                what: "orientation",
            }
            .into());
        }
        let extent = AxialExtent::new(start, end)?;
        let frame = resolve_basis(&orientation)?;
        Ok(Self {
            size,
            orientation,
            extent,
            frame,
        })
    }

    /// Returns the cross-section as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> &Vector2 {
        &self.size
    }

    /// Returns the axis direction as given.
    #[must_use]
    pub fn orientation(&self) -> &Vector3 {
        &self.orientation
    }

    /// Returns the start and end distances along the axis.
    #[must_use]
    pub fn extent(&self) -> &AxialExtent {
        &self.extent
    }

    /// Returns the local frame: `u` along the width, `v` along the height.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn half_extents(&self) -> (Real, Real) {
        (self.size.x.half(), self.size.y.half())
    }
}

/// Picks the cross-section side that minimizes a projection with the given
/// component. A zero component takes the negative side.
fn corner(component: &Real, half_extent: &Real) -> Real {
    if component.is_negative() {
        half_extent.clone()
    } else {
        -half_extent
    }
}

impl Solid for Prism {
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        let (du, dv, dw) = self.frame.decompose(direction);
        let axial = self.extent.minimal_coordinate(&dw, "prism")?;
        let (half_width, half_height) = self.half_extents();
        Ok(self.frame.compose(
            &corner(&du, &half_width),
            &corner(&dv, &half_height),
            axial,
        ))
    }

    fn contains_point(&self, point: &Point3) -> bool {
        let (x, y, t) = self.frame.decompose(&point.coords);
        let (half_width, half_height) = self.half_extents();
        x.abs() <= half_width && y.abs() <= half_height && self.extent.contains(&t)
    }

    fn is_on_boundary(&self, point: &Point3) -> bool {
        if !self.contains_point(point) {
            return false;
        }
        let (x, y, t) = self.frame.decompose(&point.coords);
        let (half_width, half_height) = self.half_extents();
        x.abs() == half_width || y.abs() == half_height || self.extent.is_at_bound(&t)
    }

    /// On an edge or corner the end caps win over the width faces, and the
    /// width faces over the height faces.
    fn outward_normal(&self, point: &Point3) -> Option<Vector3> {
        let (x, y, t) = self.frame.decompose(&point.coords);
        let (half_width, half_height) = self.half_extents();
        if self.extent.start() == Some(&t) {
            Some(-self.frame.w())
        } else if self.extent.end() == Some(&t) {
            Some(self.frame.w().clone())
        } else if x.abs() == half_width {
            Some(signed_axis(&x, self.frame.u()))
        } else if y.abs() == half_height {
            Some(signed_axis(&y, self.frame.v()))
        } else {
            None
        }
    }
}

fn signed_axis(coordinate: &Real, axis: &Vector3) -> Vector3 {
    if coordinate.is_negative() {
        -axis
    } else {
        axis.clone()
    }
}

impl fmt::Display for Prism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prism(size={}, orientation={}, {})",
            Components(self.size.as_slice()),
            Components(self.orientation.as_slice()),
            self.extent
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{CsgError, QueryError};
    use crate::math::{point3, vector2, vector3};

    fn post(start: Option<i64>, end: Option<i64>) -> Prism {
        Prism::new(
            vector2(4, 6),
            vector3(0, 0, 1),
            start.map(Real::from),
            end.map(Real::from),
        )
        .unwrap()
    }

    fn octants() -> Vec<Vector3> {
        let mut directions = Vec::new();
        for x in [-1, 1] {
            for y in [-1, 1] {
                for z in [-1, 1] {
                    directions.push(vector3(x, y, z));
                }
            }
        }
        directions
    }

    #[test]
    fn golden_corner_on_z_axis() {
        let p = post(Some(0), Some(10));
        assert_eq!(p.support_point(&vector3(1, 1, 1)).unwrap(), point3(-3, -2, 0));
    }

    #[test]
    fn axial_coordinate_follows_direction_sign() {
        for orientation in [vector3(0, 0, 1), vector3(1, 0, 0), vector3(3, 0, 4)] {
            let p = Prism::new(
                vector2(2, 3),
                orientation,
                Some(Real::from(-2)),
                Some(Real::from(7)),
            )
            .unwrap();
            for d in octants() {
                let axial_sign = d.dot(p.frame().w());
                let point = p.support_point(&d).unwrap();
                let t = point.coords.dot(p.frame().w());
                if axial_sign.is_positive() {
                    assert_eq!(t, Real::from(-2));
                } else if axial_sign.is_negative() {
                    assert_eq!(t, Real::from(7));
                }
            }
        }
    }

    #[test]
    fn support_point_minimizes_over_corners() {
        let p = Prism::new(
            vector2(2, 5),
            vector3(1, 2, 2),
            Some(Real::from(1)),
            Some(Real::from(4)),
        )
        .unwrap();
        let (hw, hh) = (Real::from(1), Real::ratio(5, 2).unwrap());
        for d in octants() {
            let best = p.support_point(&d).unwrap().coords.dot(&d);
            for x in [&hw, &-&hw] {
                for y in [&hh, &-&hh] {
                    for t in [Real::from(1), Real::from(4)] {
                        let corner = p.frame().compose(x, y, &t);
                        assert!(corner.coords.dot(&d) >= best);
                    }
                }
            }
        }
    }

    #[test]
    fn semi_infinite_prism_fails_on_open_side() {
        let p = post(None, Some(10));
        assert_eq!(p.support_point(&vector3(0, 0, -1)).unwrap(), point3(-3, 2, 10));
        assert_eq!(
            p.support_point(&vector3(0, 0, 1)),
            Err(CsgError::Query(QueryError::InfiniteInNegativeDirection {
                shape: "prism"
            }))
        );
    }

    #[test]
    fn infinite_prism_always_fails() {
        let p = post(None, None);
        for d in [vector3(1, 0, 0), vector3(0, 0, 1), vector3(0, 0, 0)] {
            assert_eq!(
                p.support_point(&d),
                Err(CsgError::Query(QueryError::InfiniteInBothDirections {
                    shape: "prism"
                }))
            );
        }
    }

    #[test]
    fn zero_direction_returns_default_corner() {
        let p = post(Some(0), Some(10));
        assert_eq!(p.support_point(&vector3(0, 0, 0)).unwrap(), point3(-3, 2, 0));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            Prism::new(vector2(0, 6), vector3(0, 0, 1), None, None),
            Err(CsgError::Construction(ConstructionError::NonPositive {
                parameter: "width",
                value: Real::from(0),
            }))
        );
        assert_eq!(
            Prism::new(vector2(4, -1), vector3(0, 0, 1), None, None),
            Err(CsgError::Construction(ConstructionError::NonPositive {
                parameter: "height",
                value: Real::from(-1),
            }))
        );
        assert_eq!(
            Prism::new(vector2(4, 6), vector3(0, 0, 0), None, None),
            Err(CsgError::Construction(ConstructionError::ZeroVector {
                what: "orientation"
            }))
        );
        assert!(Prism::new(
            vector2(4, 6),
            vector3(0, 0, 1),
            Some(Real::from(3)),
            Some(Real::from(1))
        )
        .is_err());
    }

    #[test]
    fn membership_in_cross_section_and_extent() {
        let p = post(Some(0), Some(10));
        assert!(p.contains_strictly(&point3(1, 1, 5)));
        assert!(p.is_on_boundary(&point3(3, 0, 5)));
        assert!(p.is_on_boundary(&point3(0, 2, 5)));
        assert!(p.is_on_boundary(&point3(0, 0, 10)));
        assert!(!p.contains_point(&point3(0, 3, 5)));
        assert!(!p.contains_point(&point3(0, 0, 11)));
        assert!(!p.is_on_boundary(&point3(0, 0, 11)));
    }

    #[test]
    fn outward_normal_per_face() {
        let p = post(Some(0), Some(10));
        assert_eq!(p.outward_normal(&point3(0, 0, 0)), Some(vector3(0, 0, -1)));
        assert_eq!(p.outward_normal(&point3(1, 1, 10)), Some(vector3(0, 0, 1)));
        assert_eq!(p.outward_normal(&point3(0, 2, 5)), Some(vector3(0, 1, 0)));
        assert_eq!(p.outward_normal(&point3(0, -2, 5)), Some(vector3(0, -1, 0)));
        assert_eq!(p.outward_normal(&point3(3, 0, 5)), Some(vector3(1, 0, 0)));
        assert_eq!(p.outward_normal(&point3(-3, 1, 5)), Some(vector3(-1, 0, 0)));
        assert_eq!(p.outward_normal(&point3(1, 1, 5)), None);
    }

    #[test]
    fn outward_normal_on_edges_prefers_caps_then_width() {
        let p = post(Some(0), Some(10));
        assert_eq!(p.outward_normal(&point3(3, 2, 10)), Some(vector3(0, 0, 1)));
        assert_eq!(p.outward_normal(&point3(3, 2, 5)), Some(vector3(0, 1, 0)));
    }
}

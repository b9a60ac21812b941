mod cylinder;
mod difference;
mod extent;
mod half_space;
mod prism;
mod union;

pub use cylinder::Cylinder;
pub use difference::Difference;
pub use extent::AxialExtent;
pub use half_space::HalfSpace;
pub use prism::Prism;
pub use union::Union;

use std::fmt;

use crate::error::Result;
use crate::math::{normalize, Point3, Real, Vector3};

/// Trait for solids that answer directional extremal-point queries.
pub trait Solid {
    /// Returns the point of the solid that minimizes `point · direction`.
    ///
    /// This is the point reached first by a plane sweeping in from infinitely
    /// far along `-direction`.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`](crate::error::QueryError) if the solid is
    /// unbounded in the queried sense.
    fn support_point(&self, direction: &Vector3) -> Result<Point3>;

    /// Returns `true` if the point lies in the closed solid.
    fn contains_point(&self, point: &Point3) -> bool;

    /// Returns `true` if the point lies on the solid's boundary.
    fn is_on_boundary(&self, point: &Point3) -> bool;

    /// Returns the unit outward normal at a boundary point, or `None` if no
    /// single face can be picked.
    ///
    /// Only meaningful when [`Solid::is_on_boundary`] holds for `point`.
    fn outward_normal(&self, point: &Point3) -> Option<Vector3>;

    /// Returns `true` if the point lies in the solid but not on its boundary.
    fn contains_strictly(&self, point: &Point3) -> bool {
        self.contains_point(point) && !self.is_on_boundary(point)
    }
}

/// Averages unit normals into one. `None` if there are none or they cancel.
fn average_normals(normals: Vec<Vector3>) -> Option<Vector3> {
    let mut normals = normals.into_iter();
    let first = normals.next()?;
    let mut sum = first.clone();
    let mut count = 1;
    for normal in normals {
        sum += normal;
        count += 1;
    }
    if count == 1 {
        return Some(first);
    }
    normalize(&sum, "average normal").ok()
}

/// The closed set of shape kinds a CSG tree is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    HalfSpace(HalfSpace),
    Prism(Prism),
    Cylinder(Cylinder),
    Union(Union),
    Difference(Difference),
}

impl Shape {
    /// Returns the lowercase name of the shape kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HalfSpace(_) => "half-space",
            Self::Prism(_) => "prism",
            Self::Cylinder(_) => "cylinder",
            Self::Union(_) => "union",
            Self::Difference(_) => "difference",
        }
    }
}

impl Solid for Shape {
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        tracing::trace!(kind = self.kind(), "support point query");
        match self {
            Self::HalfSpace(shape) => shape.support_point(direction),
            Self::Prism(shape) => shape.support_point(direction),
            Self::Cylinder(shape) => shape.support_point(direction),
            Self::Union(shape) => shape.support_point(direction),
            Self::Difference(shape) => shape.support_point(direction),
        }
    }

    fn contains_point(&self, point: &Point3) -> bool {
        match self {
            Self::HalfSpace(shape) => shape.contains_point(point),
            Self::Prism(shape) => shape.contains_point(point),
            Self::Cylinder(shape) => shape.contains_point(point),
            Self::Union(shape) => shape.contains_point(point),
            Self::Difference(shape) => shape.contains_point(point),
        }
    }

    fn is_on_boundary(&self, point: &Point3) -> bool {
        match self {
            Self::HalfSpace(shape) => shape.is_on_boundary(point),
            Self::Prism(shape) => shape.is_on_boundary(point),
            Self::Cylinder(shape) => shape.is_on_boundary(point),
            Self::Union(shape) => shape.is_on_boundary(point),
            Self::Difference(shape) => shape.is_on_boundary(point),
        }
    }

    fn outward_normal(&self, point: &Point3) -> Option<Vector3> {
        match self {
            Self::HalfSpace(shape) => shape.outward_normal(point),
            Self::Prism(shape) => shape.outward_normal(point),
            Self::Cylinder(shape) => shape.outward_normal(point),
            Self::Union(shape) => shape.outward_normal(point),
            Self::Difference(shape) => shape.outward_normal(point),
        }
    }
}

macro_rules! shape_from {
    ($($variant:ident),*) => {$(
        impl From<$variant> for Shape {
            fn from(shape: $variant) -> Self {
                Self::$variant(shape)
            }
        }
    )*};
}

shape_from!(HalfSpace, Prism, Cylinder, Union, Difference);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HalfSpace(shape) => fmt::Display::fmt(shape, f),
            Self::Prism(shape) => fmt::Display::fmt(shape, f),
            Self::Cylinder(shape) => fmt::Display::fmt(shape, f),
            Self::Union(shape) => fmt::Display::fmt(shape, f),
            Self::Difference(shape) => fmt::Display::fmt(shape, f),
        }
    }
}

/// Formats vector components as `[a, b, c]`.
struct Components<'a>(&'a [Real]);

impl fmt::Display for Components<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

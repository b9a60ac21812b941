use std::fmt;

use crate::error::{CsgError, QueryError, Result};
use crate::math::{Point3, Real, Vector3};

use super::{average_normals, Shape, Solid};

/// Points inside any of the child shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    children: Vec<Shape>,
}

impl Union {
    /// Creates a union. An empty union is allowed but answers no queries.
    #[must_use]
    pub fn new(children: Vec<Shape>) -> Self {
        Self { children }
    }

    /// Returns the child shapes in construction order.
    #[must_use]
    pub fn children(&self) -> &[Shape] {
        &self.children
    }
}

impl Solid for Union {
    /// Queries every child and keeps the point with the smallest projection,
    /// preferring earlier children on ties. Children that fail are skipped
    /// unless all of them fail, in which case the first child's error is
    /// returned.
    fn support_point(&self, direction: &Vector3) -> Result<Point3> {
        if self.children.is_empty() {
            return Err(QueryError::EmptyUnion.into());
        }

        let mut best: Option<(Real, Point3)> = None;
        let mut first_error: Option<CsgError> = None;
        for (index, child) in self.children.iter().enumerate() {
            match child.support_point(direction) {
                Ok(point) => {
                    let projection = point.coords.dot(direction);
                    if best.as_ref().is_none_or(|(lowest, _)| projection < *lowest) {
                        best = Some((projection, point));
                    }
                }
                Err(err) => {
                    tracing::debug!(index, kind = child.kind(), %err, "skipping union child");
                    first_error.get_or_insert(err);
                }
            }
        }

        match (best, first_error) {
            (Some((_, point)), _) => Ok(point),
            (None, Some(err)) => Err(err),
            (None, None) => Err(QueryError::EmptyUnion.into()),
        }
    }

    fn contains_point(&self, point: &Point3) -> bool {
        self.children.iter().any(|child| child.contains_point(point))
    }

    /// A point is on the boundary when some child holds it and none holds it
    /// strictly inside.
    fn is_on_boundary(&self, point: &Point3) -> bool {
        self.contains_point(point)
            && !self
                .children
                .iter()
                .any(|child| child.contains_strictly(point))
    }

    /// Averages the normals of every child whose boundary holds the point.
    fn outward_normal(&self, point: &Point3) -> Option<Vector3> {
        average_normals(
            self.children
                .iter()
                .filter(|child| child.is_on_boundary(point))
                .filter_map(|child| child.outward_normal(point))
                .collect(),
        )
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Union({} children)", self.children.len())
    }
}

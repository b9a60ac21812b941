use super::{normalize, Point3, Real, Vector3};
use crate::error::Result;

/// A right-handed orthonormal basis built around one axis.
///
/// `u` is the width direction, `v` the height direction and `w` the
/// normalized axis, with `u × v = w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    u: Vector3,
    v: Vector3,
    w: Vector3,
}

impl Frame {
    /// Returns the width axis.
    #[must_use]
    pub fn u(&self) -> &Vector3 {
        &self.u
    }

    /// Returns the height axis.
    #[must_use]
    pub fn v(&self) -> &Vector3 {
        &self.v
    }

    /// Returns the normalized principal axis.
    #[must_use]
    pub fn w(&self) -> &Vector3 {
        &self.w
    }

    /// Maps local coordinates to a world-space point.
    #[must_use]
    pub fn compose(&self, u: &Real, v: &Real, w: &Real) -> Point3 {
        Point3::from(&self.u * u.clone() + &self.v * v.clone() + &self.w * w.clone())
    }

    /// Projects a world-space vector onto the three axes.
    #[must_use]
    pub fn decompose(&self, vector: &Vector3) -> (Real, Real, Real) {
        (vector.dot(&self.u), vector.dot(&self.v), vector.dot(&self.w))
    }
}

/// Builds the local frame of a timber-like solid from its axis.
///
/// The reference direction is `+Z` when `|axis.z| < |axis.x|` and `+X`
/// otherwise. `u` is `reference × axis` normalized and `v` is `w × u`, so an
/// axis along `+Z` yields `u = -Y`, `v = +X`.
///
/// # Errors
///
/// Returns [`ConstructionError::ZeroVector`](crate::error::ConstructionError::ZeroVector)
/// for a zero axis, or a numeric error if a length has no exact square root.
pub fn resolve_basis(axis: &Vector3) -> Result<Frame> {
    let w = normalize(axis, "axis")?;
    let reference = if axis.z.abs() < axis.x.abs() {
        Vector3::z()
    } else {
        Vector3::x()
    };
    let u = normalize(&reference.cross(axis), "width axis")?;
    let v = w.cross(&u);
    Ok(Frame { u, v, w })
}

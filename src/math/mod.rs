pub mod frame;
mod real;

pub use frame::{resolve_basis, Frame};
pub use real::Real;

use num_traits::Zero;

use crate::error::{ConstructionError, Result};

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<Real>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<Real>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<Real>;

/// Builds a [`Vector2`] from anything convertible to [`Real`].
#[must_use]
pub fn vector2(x: impl Into<Real>, y: impl Into<Real>) -> Vector2 {
    Vector2::new(x.into(), y.into())
}

/// Builds a [`Vector3`] from anything convertible to [`Real`].
#[must_use]
pub fn vector3(x: impl Into<Real>, y: impl Into<Real>, z: impl Into<Real>) -> Vector3 {
    Vector3::new(x.into(), y.into(), z.into())
}

/// Builds a [`Point3`] from anything convertible to [`Real`].
#[must_use]
pub fn point3(x: impl Into<Real>, y: impl Into<Real>, z: impl Into<Real>) -> Point3 {
    Point3::new(x.into(), y.into(), z.into())
}

/// Returns `true` if every component is exactly zero.
#[must_use]
pub fn is_zero_vector(vector: &Vector3) -> bool {
    vector.iter().all(Zero::is_zero)
}

/// Squared Euclidean length, which stays exact without a square root.
#[must_use]
pub fn norm_squared(vector: &Vector3) -> Real {
    vector.dot(vector)
}

/// Scales a vector to unit length.
///
/// `what` names the vector in the error message.
///
/// # Errors
///
/// Returns [`ConstructionError::ZeroVector`] for the zero vector, or a
/// numeric error if the length has no exact form.
pub fn normalize(vector: &Vector3, what: &'static str) -> Result<Vector3> {
    if is_zero_vector(vector) {
        return Err(ConstructionError::ZeroVector { what }.into());
    }
    let length = norm_squared(vector).sqrt()?;
    Ok(vector * length.recip()?)
}

/// Converts an exact point to `f64` for rendering or reporting.
#[must_use]
pub fn to_f64_point(point: &Point3) -> nalgebra::Point3<f64> {
    nalgebra::Point3::new(point.x.to_f64(), point.y.to_f64(), point.z.to_f64())
}

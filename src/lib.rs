//! Exact support-point queries on CSG solids for timber joinery.
//!
//! Shapes are built from [`math::Real`] values, which stay exact through
//! square roots of rationals, so cut positions compose without drift.

pub mod csg;
pub mod error;
pub mod math;

pub use csg::{Cylinder, Difference, HalfSpace, Prism, Shape, Solid, Union};
pub use error::{CsgError, Result};
pub use math::Real;

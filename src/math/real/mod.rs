mod radical;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{NumericError, Result};

/// An exact real number `q₀ + q₁·√s₁ + … + qₙ·√sₙ`.
///
/// Coefficients are arbitrary-precision rationals and every radicand `sᵢ` is a
/// square-free integer greater than one. Square roots of distinct square-free
/// integers are linearly independent over the rationals, so the form is
/// canonical: two values are equal exactly when their terms are equal.
///
/// This is the scalar behind every coordinate, offset and radius in the
/// crate. Floating point only appears through [`Real::to_f64`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Real {
    /// Radicand → coefficient. Radicand `1` holds the rational part.
    /// Coefficients are never zero.
    terms: BTreeMap<BigUint, BigRational>,
}

impl Real {
    fn from_term(radicand: BigUint, coefficient: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !coefficient.is_zero() {
            terms.insert(radicand, coefficient);
        }
        Self { terms }
    }

    /// Creates the rational `numer / denom`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::DivisionByZero`] if `denom` is zero.
    pub fn ratio(numer: i64, denom: i64) -> Result<Self> {
        if denom == 0 {
            return Err(NumericError::DivisionByZero.into());
        }
        Ok(Self::from(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }

    /// Returns the value as a rational, if it has no radical terms.
    #[must_use]
    pub fn as_rational(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&BigUint::one()).cloned(),
            _ => None,
        }
    }

    /// Returns `true` if the value has no radical terms.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.terms.keys().all(One::is_one)
    }

    /// Returns half of the value.
    #[must_use]
    pub fn half(&self) -> Self {
        self * &Self::from(BigRational::new(BigInt::one(), BigInt::from(2)))
    }

    /// Determines the sign exactly.
    ///
    /// Writes the value as `a + b·√p` for one element `p` of a coprime basis
    /// of its radicands, then recurses on `a`, `b` and `a² − b²·p`, none of
    /// which mention `√p`.
    #[must_use]
    pub fn sign(&self) -> Sign {
        let Some(pivot) = self.pivot() else {
            return self
                .terms
                .get(&BigUint::one())
                .map_or(Sign::NoSign, |q| q.numer().sign());
        };
        let (rest, coefficient) = self.split(&pivot);
        let rest_sign = rest.sign();
        let coefficient_sign = coefficient.sign();
        if rest_sign == coefficient_sign || coefficient_sign == Sign::NoSign {
            return rest_sign;
        }
        if rest_sign == Sign::NoSign {
            return coefficient_sign;
        }
        let excess = &rest * &rest - &coefficient * &coefficient * Self::from(BigInt::from(pivot));
        match excess.sign() {
            Sign::Plus => rest_sign,
            Sign::Minus => coefficient_sign,
            Sign::NoSign => Sign::NoSign,
        }
    }

    /// Returns `true` if the value is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.sign() == Sign::Plus
    }

    /// Returns `true` if the value is strictly less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.sign() == Sign::Minus
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Returns `1 / self`, rationalizing the denominator one radical at a time.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::DivisionByZero`] if the value is zero.
    pub fn recip(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero.into());
        }
        let Some(pivot) = self.pivot() else {
            return Ok(Self::from(self.rational_part().recip()));
        };
        let (rest, coefficient) = self.split(&pivot);
        let norm =
            &rest * &rest - &coefficient * &coefficient * Self::from(BigInt::from(pivot.clone()));
        let conjugate = rest - coefficient * Self::from_term(pivot, BigRational::one());
        Ok(conjugate * norm.recip()?)
    }

    /// Returns `self / divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        Ok(self * &divisor.recip()?)
    }

    /// Returns the exact square root.
    ///
    /// Succeeds for non-negative rationals whose numerator and denominator
    /// can be reduced to a square-free radicand, and for `a + b·√s` whenever
    /// `a² − b²·s` is a rational square.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NegativeRadicand`] for negative values and
    /// [`NumericError::UnsupportedRadicand`] when the root has no form in this
    /// representation or cannot be reduced without factoring a large integer.
    pub fn sqrt(&self) -> Result<Self> {
        match self.sign() {
            Sign::Minus => return Err(NumericError::NegativeRadicand(self.clone()).into()),
            Sign::NoSign => return Ok(Self::zero()),
            Sign::Plus => {}
        }
        let root = if self.is_rational() {
            sqrt_rational(&self.rational_part())
        } else {
            self.denest()
        };
        root.ok_or_else(|| NumericError::UnsupportedRadicand(self.clone()).into())
    }

    /// Approximates the value as `f64`, for reporting only.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.terms
            .iter()
            .map(|(radicand, coefficient)| {
                let coefficient = coefficient.to_f64().unwrap_or(f64::NAN);
                let radicand = radicand.to_f64().unwrap_or(f64::NAN);
                coefficient * radicand.sqrt()
            })
            .sum()
    }

    fn rational_part(&self) -> BigRational {
        self.terms
            .get(&BigUint::one())
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    /// Picks a radical to eliminate next, or `None` for a rational value.
    fn pivot(&self) -> Option<BigUint> {
        radical::coprime_basis(self.terms.keys()).pop()
    }

    /// Splits the value into `(a, b)` with `self = a + b·√pivot`.
    fn split(&self, pivot: &BigUint) -> (Self, Self) {
        let mut rest = BTreeMap::new();
        let mut coefficient = BTreeMap::new();
        for (radicand, value) in &self.terms {
            if (radicand % pivot).is_zero() {
                coefficient.insert(radicand / pivot, value.clone());
            } else {
                rest.insert(radicand.clone(), value.clone());
            }
        }
        (Self { terms: rest }, Self { terms: coefficient })
    }

    /// `√(a + b·√s) = √((a + c)/2) ± √((a − c)/2)` with `c = √(a² − b²·s)`.
    fn denest(&self) -> Option<Self> {
        if self.terms.len() != 2 {
            return None;
        }
        let a = self.terms.get(&BigUint::one())?;
        let (radicand, b) = self.terms.iter().find(|(radicand, _)| !radicand.is_one())?;
        let discriminant =
            a * a - b * b * BigRational::from_integer(BigInt::from(radicand.clone()));
        let c = radical::exact_sqrt(&discriminant)?;
        let two = BigRational::from_integer(BigInt::from(2));
        let high = sqrt_rational(&((a + &c) / &two))?;
        let low = sqrt_rational(&((a - &c) / &two))?;
        Some(if b.is_positive() { high + low } else { high - low })
    }
}

/// `√(n/d)` with `n = a²·r` and `d = b²·s` is `a·g·√(r/g · s/g) / (b·s)`
/// for `g = gcd(r, s)`. Fails when either side is too large to reduce.
fn sqrt_rational(q: &BigRational) -> Option<Real> {
    let (numer_root, numer_radicand) = radical::square_free(q.numer().magnitude())?;
    let (denom_root, denom_radicand) = radical::square_free(q.denom().magnitude())?;
    let shared = numer_radicand.gcd(&denom_radicand);
    let radicand = (&numer_radicand / &shared) * (&denom_radicand / &shared);
    Some(Real::from_term(
        radicand,
        BigRational::new(
            BigInt::from(numer_root * shared),
            BigInt::from(denom_root * denom_radicand),
        ),
    ))
}

impl Zero for Real {
    fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Real {
    fn one() -> Self {
        Self::from_term(BigUint::one(), BigRational::one())
    }
}

impl From<BigRational> for Real {
    fn from(value: BigRational) -> Self {
        Self::from_term(BigUint::one(), value)
    }
}

impl From<BigInt> for Real {
    fn from(value: BigInt) -> Self {
        Self::from(BigRational::from_integer(value))
    }
}

macro_rules! real_from_int {
    ($($int:ty),*) => {$(
        impl From<$int> for Real {
            fn from(value: $int) -> Self {
                Self::from(BigInt::from(value))
            }
        }
    )*};
}

real_from_int!(i32, i64, u32, u64);

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        -self.clone()
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(mut self) -> Real {
        for value in self.terms.values_mut() {
            let negated = -&*value;
            *value = negated;
        }
        self
    }
}

impl AddAssign<&Real> for Real {
    fn add_assign(&mut self, rhs: &Real) {
        for (radicand, value) in &rhs.terms {
            let entry = self
                .terms
                .entry(radicand.clone())
                .or_insert_with(BigRational::zero);
            *entry += value;
            if entry.is_zero() {
                self.terms.remove(radicand);
            }
        }
    }
}

impl SubAssign<&Real> for Real {
    fn sub_assign(&mut self, rhs: &Real) {
        for (radicand, value) in &rhs.terms {
            let entry = self
                .terms
                .entry(radicand.clone())
                .or_insert_with(BigRational::zero);
            *entry -= value;
            if entry.is_zero() {
                self.terms.remove(radicand);
            }
        }
    }
}

impl MulAssign<&Real> for Real {
    fn mul_assign(&mut self, rhs: &Real) {
        *self = &*self * rhs;
    }
}

impl Add<&Real> for &Real {
    type Output = Real;

    fn add(self, rhs: &Real) -> Real {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Sub<&Real> for &Real {
    type Output = Real;

    fn sub(self, rhs: &Real) -> Real {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl Mul<&Real> for &Real {
    type Output = Real;

    /// `√a · √b = g · √(a/g · b/g)` with `g = gcd(a, b)`, which keeps the
    /// radicand square-free.
    fn mul(self, rhs: &Real) -> Real {
        let mut terms: BTreeMap<BigUint, BigRational> = BTreeMap::new();
        for (left_radicand, left) in &self.terms {
            for (right_radicand, right) in &rhs.terms {
                let shared = left_radicand.gcd(right_radicand);
                let radicand = (left_radicand / &shared) * (right_radicand / &shared);
                let value = left * right * BigRational::from_integer(BigInt::from(shared));
                *terms.entry(radicand).or_insert_with(BigRational::zero) += value;
            }
        }
        terms.retain(|_, value| !value.is_zero());
        Real { terms }
    }
}

macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl $Op<Real> for Real {
            type Output = Real;

            fn $op(self, rhs: Real) -> Real {
                (&self).$op(&rhs)
            }
        }

        impl $Op<&Real> for Real {
            type Output = Real;

            fn $op(self, rhs: &Real) -> Real {
                (&self).$op(rhs)
            }
        }

        impl $Op<Real> for &Real {
            type Output = Real;

            fn $op(self, rhs: Real) -> Real {
                self.$op(&rhs)
            }
        }

        impl $OpAssign<Real> for Real {
            fn $op_assign(&mut self, rhs: Real) {
                self.$op_assign(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self - other).sign() {
            Sign::Minus => Ordering::Less,
            Sign::NoSign => Ordering::Equal,
            Sign::Plus => Ordering::Greater,
        }
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (index, (radicand, coefficient)) in self.terms.iter().enumerate() {
            let negative = coefficient.is_negative();
            match (index, negative) {
                (0, true) => f.write_str("-")?,
                (0, false) => {}
                (_, true) => f.write_str(" - ")?,
                (_, false) => f.write_str(" + ")?,
            }
            let magnitude = coefficient.abs();
            if radicand.is_one() {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write!(f, "sqrt({radicand})")?;
            } else {
                write!(f, "{magnitude}*sqrt({radicand})")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Real({self})")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CsgError;
    use approx::assert_relative_eq;
    use std::time::{Duration, Instant};

    fn r(n: i64) -> Real {
        Real::from(n)
    }

    fn q(numer: i64, denom: i64) -> Real {
        Real::ratio(numer, denom).unwrap()
    }

    fn root(n: i64) -> Real {
        r(n).sqrt().unwrap()
    }

    #[test]
    fn rational_arithmetic_is_exact() {
        assert_eq!(q(1, 3) + q(1, 6), q(1, 2));
        assert_eq!(q(2, 3) * q(3, 4), q(1, 2));
        assert_eq!(q(1, 2) - q(1, 2), Real::zero());
        assert_eq!(r(7).checked_div(&r(2)).unwrap(), q(7, 2));
    }

    #[test]
    fn ratio_rejects_zero_denominator() {
        assert_eq!(
            Real::ratio(1, 0),
            Err(CsgError::Numeric(NumericError::DivisionByZero))
        );
    }

    #[test]
    fn sqrt_reduces_to_square_free_radicand() {
        assert_eq!(root(8), r(2) * root(2));
        assert_eq!(root(16), r(4));
        assert_eq!(q(1, 2).sqrt().unwrap(), q(1, 2) * root(2));
        assert!(!root(2).is_rational());
    }

    #[test]
    fn radicals_multiply_back_to_rationals() {
        assert_eq!(root(2) * root(2), r(2));
        assert_eq!(root(2) * root(3), root(6));
        assert_eq!(root(6) * root(10), r(2) * root(15));
    }

    #[test]
    fn recip_rationalizes_denominator() {
        let x = r(1) + root(2);
        assert_eq!(x.recip().unwrap(), root(2) - r(1));

        let y = root(2) + root(3) + root(5);
        assert_eq!(&y * &y.recip().unwrap(), Real::one());
    }

    #[test]
    fn recip_of_zero_fails() {
        assert!(Real::zero().recip().is_err());
    }

    #[test]
    fn sign_is_decided_exactly() {
        assert!((root(2) + root(3) - root(10)).is_negative());
        assert!((root(2) + root(3) - q(314, 100)).is_positive());
        assert!(root(2) + root(3) < root(10));
        assert_eq!((root(8) - r(2) * root(2)).sign(), Sign::NoSign);
    }

    #[test]
    fn sqrt_denests_single_radical() {
        let x = r(3) + r(2) * root(2);
        assert_eq!(x.sqrt().unwrap(), r(1) + root(2));

        let y = r(3) - r(2) * root(2);
        assert_eq!(y.sqrt().unwrap(), root(2) - r(1));
    }

    #[test]
    fn sqrt_failures() {
        assert!(matches!(
            r(-1).sqrt(),
            Err(CsgError::Numeric(NumericError::NegativeRadicand(_)))
        ));
        assert!(matches!(
            root(2).sqrt(),
            Err(CsgError::Numeric(NumericError::UnsupportedRadicand(_)))
        ));
    }

    #[test]
    fn sqrt_of_large_rationals_returns_promptly() {
        let start = Instant::now();
        let a = q(123_456_789, 1_000_000_007);
        let b = q(987_654_321, 1_000_000_009);

        assert_eq!((&a * &a).sqrt().unwrap(), a);
        assert_eq!((&a * &a * r(2)).sqrt().unwrap(), &a * &root(2));

        let hypotenuse = (&a * &a + &b * &b).sqrt();
        match hypotenuse {
            Ok(h) => assert_eq!(&h * &h, &a * &a + &b * &b),
            Err(err) => assert!(matches!(
                err,
                CsgError::Numeric(NumericError::UnsupportedRadicand(_))
            )),
        }
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn sqrt_of_millimetre_dimensions() {
        let width = q(89, 2);
        let depth = q(1403, 10);
        let squared = &width * &width + &depth * &depth;
        let diagonal = squared.sqrt().unwrap();
        assert_eq!(&diagonal * &diagonal, squared);
        assert!(diagonal > depth);
    }

    #[test]
    fn many_radicals_through_sign_and_recip() {
        let y = root(2) + root(3) + root(5) + root(7);
        assert_eq!(&y * &y.recip().unwrap(), Real::one());

        let z = root(2) + root(3) + root(5);
        assert!((&z - q(538, 100)).is_positive());
        assert!((&z - q(539, 100)).is_negative());
        assert_eq!((root(6) - root(2) * root(3)).sign(), Sign::NoSign);
        assert!(root(30) < root(2) * root(3) * root(5) + r(1));
    }

    #[test]
    fn sqrt_rejects_non_denestable_radicals() {
        for value in [r(1) + root(2) + root(3), r(1) + root(2)] {
            assert!(matches!(
                value.sqrt(),
                Err(CsgError::Numeric(NumericError::UnsupportedRadicand(_)))
            ));
        }
    }

    #[test]
    fn abs_and_ordering() {
        assert_eq!((r(1) - root(2)).abs(), root(2) - r(1));
        assert_eq!(q(-3, 2).abs(), q(3, 2));
        assert_eq!(root(2).max(q(3, 2)), q(3, 2));
    }

    #[test]
    fn display_prints_canonical_form() {
        assert_eq!((q(3, 2) + q(1, 2) * root(2)).to_string(), "3/2 + 1/2*sqrt(2)");
        assert_eq!((-root(3)).to_string(), "-sqrt(3)");
        assert_eq!(Real::zero().to_string(), "0");
        assert_eq!(format!("{:?}", r(5)), "Real(5)");
    }

    #[test]
    fn to_f64_approximates() {
        assert_relative_eq!(root(2).to_f64(), std::f64::consts::SQRT_2);
        assert_relative_eq!((q(1, 2) + root(3)).to_f64(), 0.5 + 3.0_f64.sqrt());
    }
}

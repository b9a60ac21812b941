use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Primes below this bound are found by trial division. Larger square
/// factors are only recognized when what remains is itself a square or is
/// small enough to have at most two prime factors.
const TRIAL_DIVISION_LIMIT: u32 = 1 << 16;

/// Splits `n` into `(root, radicand)` with `n = root² · radicand` and
/// `radicand` square-free.
///
/// Trial division runs while `factor³ <= rest` and `factor` is below
/// [`TRIAL_DIVISION_LIMIT`]. If it stops on the cube bound, every remaining
/// prime factor exceeds the cube root, so `rest` is `1`, a prime, a product
/// of two distinct primes, or a prime squared. If it stops on the limit and
/// `rest` is not a perfect square, square-freeness cannot be settled without
/// factoring and `None` is returned.
pub(super) fn square_free(n: &BigUint) -> Option<(BigUint, BigUint)> {
    if n.is_zero() {
        return Some((BigUint::zero(), BigUint::one()));
    }
    if let Some(whole_root) = perfect_root(n) {
        return Some((whole_root, BigUint::one()));
    }

    let mut rest = n.clone();
    let mut root = BigUint::one();
    let mut radicand = BigUint::one();
    let mut factor: u32 = 2;

    while BigUint::from(u64::from(factor).pow(3)) <= rest {
        if factor >= TRIAL_DIVISION_LIMIT {
            let rest_root = perfect_root(&rest)?;
            return Some((root * rest_root, radicand));
        }
        let mut multiplicity = 0u32;
        while (&rest % factor).is_zero() {
            rest /= factor;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            root *= BigUint::from(factor).pow(multiplicity / 2);
            if multiplicity % 2 == 1 {
                radicand *= factor;
            }
        }
        factor += if factor == 2 { 1 } else { 2 };
    }

    match perfect_root(&rest) {
        Some(rest_root) => root *= rest_root,
        None => radicand *= rest,
    }
    Some((root, radicand))
}

fn perfect_root(n: &BigUint) -> Option<BigUint> {
    let root = n.sqrt();
    (&root * &root == *n).then_some(root)
}

/// Returns `√q` when it is itself rational.
pub(super) fn exact_sqrt(q: &BigRational) -> Option<BigRational> {
    if q.numer().sign() == Sign::Minus {
        return None;
    }
    let numer_root = perfect_root(q.numer().magnitude())?;
    let denom_root = perfect_root(q.denom().magnitude())?;
    Some(BigRational::new(
        BigInt::from(numer_root),
        BigInt::from(denom_root),
    ))
}

/// Refines a set of square-free integers into pairwise coprime factors.
///
/// Every input is a product of distinct elements of the result. Ones are
/// dropped.
pub(super) fn coprime_basis<'a>(numbers: impl IntoIterator<Item = &'a BigUint>) -> Vec<BigUint> {
    let mut basis: Vec<BigUint> = Vec::new();
    for number in numbers {
        let mut rest = number.clone();
        let mut index = 0;
        while index < basis.len() && !rest.is_one() {
            let shared = rest.gcd(&basis[index]);
            if !shared.is_one() {
                // Square-free inputs make `shared`, `rest / shared` and
                // `basis[index] / shared` pairwise coprime.
                let leftover = &basis[index] / &shared;
                rest /= &shared;
                basis[index] = shared;
                if !leftover.is_one() {
                    basis.push(leftover);
                }
            }
            index += 1;
        }
        if !rest.is_one() {
            basis.push(rest);
        }
    }
    basis
}

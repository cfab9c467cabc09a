//! Integer math kernel.
//!
//! Exact integer square and nth roots, ceiling division, clamping, bounded
//! exponentiation and prime-table binary search, generic over the signed
//! accumulator widths via [`CountOps`]. All operations are total on their
//! documented preconditions; violating a precondition is a programming
//! error, not a recoverable condition.

use crate::types::CountOps;

/// Exact integer square root: ⌊√x⌋.
///
/// Seeds from the floating-point square root, clamps the seed to the largest
/// representable root so the correction loop never squares an out-of-range
/// candidate, then corrects by single steps. The seed is off by at most a
/// few thousand at the top of the `i128` range and by at most one step for
/// `i64` inputs.
///
/// # Preconditions
/// `x >= 0`.
pub fn isqrt<T: CountOps>(x: T) -> T {
    debug_assert!(x >= T::ZERO);

    let mut r = T::from_f64(x.to_f64().sqrt());
    r = r.min(T::MAX_ROOT);

    while r * r > x {
        r = r - T::ONE;
    }
    while x - r * r > r + r {
        r = r + T::ONE;
    }

    r
}

/// Exact integer nth root: ⌊x^(1/N)⌋.
///
/// Corrections go through [`ipow_less_equal`] so no intermediate power is
/// ever computed past the overflow boundary.
///
/// # Preconditions
/// `x >= 0`, `N >= 1`.
pub fn iroot<const N: u32, T: CountOps>(x: T) -> T {
    debug_assert!(x >= T::ZERO);
    debug_assert!(N >= 1);

    let mut r = T::from_f64(x.to_f64().powf(1.0 / N as f64));

    while r > T::ZERO && !ipow_less_equal(r, N, x) {
        r = r - T::ONE;
    }
    while ipow_less_equal(r + T::ONE, N, x) {
        r = r + T::ONE;
    }

    r
}

/// Ceiling division: ⌈a / b⌉.
///
/// # Preconditions
/// `a >= 0`, `b > 0`.
#[inline]
pub fn ceil_div<T: CountOps>(a: T, b: T) -> T {
    debug_assert!(b > T::ZERO);
    (a + b - T::ONE) / b
}

/// Clamp x into [min, max].
///
/// Checks the lower bound first, mirroring the scheduling code that calls it
/// with a possibly inverted interval once the sweep has overrun its upper
/// bound; in that case the result is unused.
#[inline]
pub fn in_between<T: PartialOrd>(min: T, x: T, max: T) -> T {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// x raised to the nth power.
///
/// # Preconditions
/// The result must be representable in T; use [`ipow_less_equal`] to probe
/// first when that is not statically known.
#[inline]
pub fn ipow<T: CountOps>(x: T, n: u32) -> T {
    let mut r = T::ONE;
    for _ in 0..n {
        r = r * x;
    }
    r
}

/// Checks whether x^n <= limit without ever overflowing.
///
/// Each partial power is validated against `limit / x` before the next
/// multiplication, so the probe exits early the moment the power would
/// exceed the limit.
///
/// # Preconditions
/// `x >= 1`.
pub fn ipow_less_equal<T: CountOps>(x: T, n: u32, limit: T) -> bool {
    debug_assert!(x >= T::ONE);

    if limit <= T::ZERO {
        return false;
    }

    let mut r = T::ONE;
    for _ in 0..n {
        if r > limit / x {
            return false;
        }
        r = r * x;
    }

    true
}

/// Number of primes <= x, looked up in a 1-indexed sorted prime table via
/// upper-bound binary search.
///
/// # Preconditions
/// `primes[0] == 0`, `primes[1] == 2`, ..., and `x <= *primes.last()`.
pub fn pi_bsearch(primes: &[i64], x: i64) -> i64 {
    debug_assert_eq!(primes.first().copied(), Some(0));
    debug_assert!(primes.last().is_some_and(|&p| x <= p));

    primes[1..].partition_point(|&p| p <= x) as i64
}

//! Public entry points for the P2 engine.
//!
//! The engine is generic over the accumulator width: the `i64` path serves
//! bounds up to 2^63 and the `i128` path everything beyond, with the same
//! window sweep underneath. Domain validation happens once here; the
//! computation itself is total on validated inputs.

mod balance;
mod p2;
pub mod progress;

use crate::algo::progress::ProgressReporter;
use crate::cluster::{ProcessGroup, SingleProcess};
use crate::types::{CountOps, P2Error};

fn validate<T: CountOps>(x: T, y: i64, threads: usize) -> Result<(), P2Error> {
    if x < T::ZERO {
        return Err(P2Error::NegativeBound { x: x.to_i128() });
    }
    if y < 0 {
        return Err(P2Error::NegativeThreshold { y });
    }
    if threads < 1 {
        return Err(P2Error::ZeroThreads);
    }
    Ok(())
}

/// P2(x, y): the number of integers <= x with exactly two prime factors,
/// each greater than y.
///
/// The result does not depend on `threads`; the thread count only shapes
/// how the quotient range is swept.
///
/// # Panics
/// On domain violations (x < 0, y < 0, threads = 0); use [`try_p2`] for a
/// `Result`.
///
/// # Example
/// ```
/// use pirust_core::p2;
///
/// assert_eq!(p2(1_000, 10, 2), 63);
/// assert_eq!(p2(100, 3, 1), 9);
/// ```
#[inline]
pub fn p2(x: i64, y: i64, threads: usize) -> i64 {
    try_p2(x, y, threads).expect("P2 domain error")
}

/// P2(x, y) with explicit domain-error handling.
///
/// # Errors
/// [`P2Error::NegativeBound`], [`P2Error::NegativeThreshold`] or
/// [`P2Error::ZeroThreads`] when the corresponding precondition fails.
pub fn try_p2(x: i64, y: i64, threads: usize) -> Result<i64, P2Error> {
    validate(x, y, threads)?;
    Ok(p2::p2_compute(x, y, threads, &SingleProcess, None))
}

/// P2(x, y) over the 128-bit accumulator, for bounds beyond 2^63.
///
/// The quotient range must still fit the index side: callers keep
/// ⌊x / max(y, 1)⌋ within `i64`, which every practical pairing of a wide x
/// with its tuned y satisfies.
///
/// # Panics
/// On domain violations; use [`try_p2_wide`] for a `Result`.
///
/// # Example
/// ```
/// use pirust_core::{p2, p2_wide};
///
/// assert_eq!(p2_wide(1_000_000, 100, 2), p2(1_000_000, 100, 2) as i128);
/// ```
#[inline]
pub fn p2_wide(x: i128, y: i64, threads: usize) -> i128 {
    try_p2_wide(x, y, threads).expect("P2 domain error")
}

/// [`p2_wide`] with explicit domain-error handling.
pub fn try_p2_wide(x: i128, y: i64, threads: usize) -> Result<i128, P2Error> {
    validate(x, y, threads)?;
    Ok(p2::p2_compute(x, y, threads, &SingleProcess, None))
}

/// P2(x, y) with a progress callback receiving the sweep position as a
/// percentage after every round.
pub fn try_p2_with_progress<T: CountOps>(
    x: T,
    y: i64,
    threads: usize,
    reporter: Option<&ProgressReporter>,
) -> Result<T, P2Error> {
    validate(x, y, threads)?;
    Ok(p2::p2_compute(x, y, threads, &SingleProcess, reporter))
}

/// P2(x, y) evaluated collectively by a process group.
///
/// Each rank sweeps its static shard of the quotient range with its own
/// worker pool; the partials meet in the group's sum collective and every
/// rank returns the identical total, bit-for-bit equal to the single-rank
/// result. Call this from every rank of the group, or the collective will
/// not complete.
pub fn try_p2_distributed<T: CountOps>(
    x: T,
    y: i64,
    threads: usize,
    group: &dyn ProcessGroup,
) -> Result<T, P2Error> {
    validate(x, y, threads)?;
    Ok(p2::p2_compute(x, y, threads, group, None))
}

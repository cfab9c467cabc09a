//! Parallel prime-counting oracle.

use crate::config::sieve::PI_SEGMENT_SPAN;
use crate::imath::{ceil_div, isqrt};
use crate::sieve::{count_interval, simple_sieve};
use rayon::prelude::*;

/// π(n): the number of primes <= n.
///
/// Counts by popcounting bit-packed sieve segments, in parallel for inputs
/// spanning more than one segment. This is the same sieve the prime cursors
/// stream over, so the boundary convention (p <= n inclusive) cannot drift
/// between the oracle and the iterators.
///
/// # Example
/// ```
/// use pirust_core::pi_simple;
///
/// assert_eq!(pi_simple(100, 1), 25);
/// ```
pub fn pi_simple(n: i64, threads: usize) -> i64 {
    assert!(threads >= 1, "pi_simple requires at least one thread");

    if n < 2 {
        return 0;
    }

    let base = simple_sieve(isqrt(n));
    let segments = ceil_div(n - 1, PI_SEGMENT_SPAN);

    if segments == 1 || threads == 1 {
        return count_interval(2, n, &base);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build thread pool");

    pool.install(|| {
        (0..segments)
            .into_par_iter()
            .map(|k| {
                let low = 2 + k * PI_SEGMENT_SPAN;
                let high = (low + PI_SEGMENT_SPAN - 1).min(n);
                count_interval(low, high, &base)
            })
            .sum()
    })
}

/// 1-indexed prime table for [`crate::imath::pi_bsearch`]: `[0, 2, 3, 5, ...]`
/// holding every prime <= limit.
pub fn primes_table(limit: i64) -> Vec<i64> {
    let mut table = vec![0];
    table.extend(simple_sieve(limit));
    table
}

//! Evaluation engine for the second partial sieve function.
//!
//! P2(x, y) counts the numbers <= x with exactly two prime factors, each
//! greater than y. Evaluation follows the combinatorial identity
//!
//! P2(x, y) = C(a, b) + Σ_{a < i <= b} π(⌊x / pᵢ⌋),
//! C(a, b) = (a − 2)(a + 1)/2 − (b − 2)(b + 1)/2,
//!
//! with a = π(y), b = π(⌊√x⌋). The sum is swept window by window over the
//! quotient range [2, z), z = ⌊x / max(y, 1)⌋: a worker owns the primes p
//! whose quotient ⌊x/p⌋ falls inside its window, walks them downward with a
//! reverse cursor and accumulates π counts with a forward cursor. Those
//! counts are relative to the window's lower bound; the π prefix every term
//! still owes is restored afterwards by a strictly ordered serial stitch.

use std::time::Instant;

use crossbeam_utils::CachePadded;
use log::{debug, info};
use rayon::prelude::*;

use crate::algo::balance::balance_load;
use crate::algo::progress::{percent, ProgressReporter};
use crate::cluster::{shard_bounds, ProcessGroup};
use crate::config::tuning::MIN_THREAD_DISTANCE;
use crate::imath::{ceil_div, in_between, isqrt};
use crate::iterators::{PrimeIter, ReversePrimeIter};
use crate::pi::pi_simple;
use crate::types::CountOps;

/// One worker's share of a round.
#[derive(Clone, Copy, Debug)]
struct WorkerShare<T> {
    /// Σ (π(⌊x/p⌋) − π(window low − 1)) over the worker's primes.
    sum: T,
    /// Count of primes inside [window low, window high − 1]: the worker's
    /// increment to the rolling π.
    pix: i64,
    /// Number of π(⌊x/p⌋) terms emitted.
    pix_count: i64,
}

impl<T: CountOps> Default for WorkerShare<T> {
    fn default() -> Self {
        Self {
            sum: T::ZERO,
            pix: 0,
            pix_count: 0,
        }
    }
}

/// Count the primes inside [*prime, stop], leaving *prime on the first
/// prime past stop.
fn count_primes(it: &mut PrimeIter, prime: &mut i64, stop: i64) -> i64 {
    let mut count = 0;

    while *prime <= stop {
        *prime = it.next_prime();
        count += 1;
    }

    count
}

/// Evaluate one window of the quotient range.
///
/// Pure over its inputs: identical arguments produce the identical share,
/// and shares commute under the round's sum reduction.
fn p2_worker<T: CountOps>(
    x: T,
    y: i64,
    z: i64,
    low: i64,
    thread_num: i64,
    thread_distance: i64,
) -> WorkerShare<T> {
    let mut share = WorkerShare::default();

    let low = low + thread_distance * thread_num;
    let high = (low + thread_distance).min(z);
    // Narrow only after min/max in the wide type; both bounds fit i64 once
    // clamped by the quotient range.
    let start = (x / T::from_i64(high)).max(T::from_i64(y)).to_i64();
    let stop = (x / T::from_i64(low)).min(isqrt(x)).to_i64();

    let mut rit = ReversePrimeIter::new(stop, start);
    let mut it = PrimeIter::new(low, high);

    let mut next = it.next_prime();
    let mut prime = rit.prev_prime();

    // Σ_{i = π(start)+1}^{π(stop)} π(x / pᵢ), counted relative to low.
    while prime > start {
        let xp = (x / T::from_i64(prime)).to_i64();
        if xp >= high {
            // This quotient belongs to a later window.
            break;
        }
        share.pix += count_primes(&mut it, &mut next, xp);
        share.pix_count += 1;
        share.sum += T::from_i64(share.pix);
        prime = rit.prev_prime();
    }

    // Fold the window's remaining primes so pix covers [low, high − 1].
    share.pix += count_primes(&mut it, &mut next, high - 1);

    share
}

/// Sweep the quotient windows of [low, bound), returning their summed
/// contribution stitched with the π prefix rolling up from `pix_low`.
fn p2_rounds<T: CountOps>(
    x: T,
    y: i64,
    mut low: i64,
    bound: i64,
    mut pix_low: i64,
    threads: usize,
    reporter: Option<&ProgressReporter>,
) -> T {
    let mut sum = T::ZERO;
    let mut thread_distance = MIN_THREAD_DISTANCE;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build worker pool");

    while low < bound {
        let max_threads = ceil_div(bound - low, thread_distance);
        let active = in_between(1, threads as i64, max_threads) as usize;
        let time = Instant::now();

        // One padded slot per worker prevents false sharing. Slots are
        // written in parallel (one writer each) and read back only after
        // the round barrier, so this is a join, not concurrent access.
        let mut shares: Vec<CachePadded<WorkerShare<T>>> =
            vec![CachePadded::new(WorkerShare::default()); active];

        pool.install(|| {
            shares.par_iter_mut().enumerate().for_each(|(i, share)| {
                **share = p2_worker(x, y, bound, low, i as i64, thread_distance);
            });
        });

        // Order-independent reduction of the window sums.
        for share in shares.iter() {
            sum += share.sum;
        }

        low += thread_distance * active as i64;
        balance_load(
            &mut thread_distance,
            low,
            bound,
            active,
            time.elapsed().as_secs_f64(),
        );

        // Serial stitch, in strict worker order: every π(⌊x/p⌋) term worker
        // i emitted is still missing the primes below its window, which is
        // exactly the prefix accumulated from all earlier windows.
        for share in shares.iter() {
            sum += T::from_i64(pix_low) * T::from_i64(share.pix_count);
            pix_low += share.pix;
        }

        debug!(
            "round done: low = {}, thread_distance = {}, pix_low = {}",
            low, thread_distance, pix_low
        );

        if let Some(report) = reporter {
            report(percent(low, bound));
        }
    }

    sum
}

/// Full P2 evaluation across a process group.
///
/// Every rank derives a, b and z independently from the shared π oracle, so
/// the early exits (x < 4, a >= b) are taken by all ranks or none and the
/// collective stays balanced. Ranks with an empty shard still join the
/// final reduction with a zero partial.
pub(crate) fn p2_compute<T: CountOps>(
    x: T,
    y: i64,
    threads: usize,
    group: &dyn ProcessGroup,
    reporter: Option<&ProgressReporter>,
) -> T {
    if x < T::from_i64(4) {
        return T::ZERO;
    }

    let time = Instant::now();
    info!("=== P2(x, y) ===");
    info!("computation of the 2nd partial sieve function");
    info!("x = {}", x);
    info!("y = {}", y);
    info!("threads = {}", threads);

    let sqrt_x = isqrt(x);
    if T::from_i64(y) >= sqrt_x {
        // π is monotone, so a >= b without asking the oracle.
        return T::ZERO;
    }

    let a = pi_simple(y, threads);
    let b = pi_simple(sqrt_x.to_i64(), threads);

    if a >= b {
        return T::ZERO;
    }

    // Closed-form seed: Σ_{i=a+1}^{b} −(i − 1)
    let two = T::from_i64(2);
    let (a, b) = (T::from_i64(a), T::from_i64(b));
    let seed = (a - two) * (a + T::ONE) / two - (b - two) * (b + T::ONE) / two;

    let z = (x / T::from_i64(y.max(1))).to_i64();

    let (shard_low, shard_high) = shard_bounds(2, z, group.rank(), group.num_ranks());
    let local = if shard_low < shard_high {
        // The shard's windows owe π prefixes from below the shard as well;
        // seed the rolling π independently instead of messaging for it.
        let pix_low = pi_simple(shard_low - 1, threads);
        let reporter = if group.rank() == 0 { reporter } else { None };
        p2_rounds(x, y, shard_low, shard_high, pix_low, threads, reporter)
    } else {
        T::ZERO
    };

    let sum = seed + T::from_i128(group.sum_all(local.to_i128()));

    info!("P2 = {} ({:.3}s)", sum, time.elapsed().as_secs_f64());
    sum
}

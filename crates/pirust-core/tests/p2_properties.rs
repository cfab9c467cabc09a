//! Property-based and end-to-end tests for the P2 engine.
//!
//! The reference implementation evaluates the defining identity
//! P2(x, y) = Σ_{y < p <= √x} (π(⌊x/p⌋) − π(p) + 1) directly over a
//! sieve-built prime table; the engine must match it bit for bit across
//! thread counts, rank counts and accumulator widths.

use std::sync::OnceLock;
use std::thread;

use pirust_core::imath::pi_bsearch;
use pirust_core::{p2, p2_wide, pi_simple, primes_table, try_p2_distributed, LocalGroup};
use proptest::prelude::*;

const TABLE_LIMIT: i64 = 1_000_000;

fn table() -> &'static [i64] {
    static TABLE: OnceLock<Vec<i64>> = OnceLock::new();
    TABLE.get_or_init(|| primes_table(TABLE_LIMIT))
}

/// Direct evaluation of the defining identity; valid for x <= TABLE_LIMIT.
fn p2_reference(x: i64, y: i64) -> i64 {
    assert!(x <= TABLE_LIMIT);
    let table = table();

    let mut sum = 0;
    for &p in &table[1..] {
        if p <= y {
            continue;
        }
        if p > x / p {
            break;
        }
        sum += pi_bsearch(table, x / p) - pi_bsearch(table, p) + 1;
    }

    sum
}

// ============================================================================
// Property: engine matches the defining identity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_reference_identity(x in 4i64..1_000_000, y in 0i64..1_100) {
        prop_assert_eq!(p2(x, y, 1), p2_reference(x, y), "P2({}, {})", x, y);
    }

    #[test]
    fn matches_reference_identity_multithreaded(x in 4i64..1_000_000, y in 0i64..1_100) {
        prop_assert_eq!(p2(x, y, 4), p2_reference(x, y), "P2({}, {})", x, y);
    }
}

// ============================================================================
// Property: thread count is semantically inert
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn thread_count_is_inert(x in 4i64..1_000_000, y in 0i64..1_100, threads in 2usize..8) {
        prop_assert_eq!(p2(x, y, threads), p2(x, y, 1));
    }
}

// ============================================================================
// Property: monotone in x for fixed y
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn monotone_in_x(x1 in 4i64..500_000, dx in 0i64..500_000, y in 0i64..1_100) {
        let x2 = x1 + dx;
        prop_assert!(p2(x1, y, 2) <= p2(x2, y, 2));
    }
}

// ============================================================================
// Property: wide accumulator agrees on the shared domain
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn wide_path_agrees(x in 4i64..1_000_000, y in 0i64..1_100) {
        prop_assert_eq!(p2_wide(x as i128, y, 2), p2(x, y, 2) as i128);
    }
}

// ============================================================================
// End-to-end reference values
// ============================================================================

#[test]
fn reference_values() {
    assert_eq!(p2(10, 2, 1), 1);
    assert_eq!(p2(100, 3, 1), 9);
    assert_eq!(p2(1_000, 10, 2), 63);
    assert_eq!(p2(10_000, 25, 4), 413);
    assert_eq!(p2(1_000_000, 100, 4), 42_286);
    assert_eq!(p2(1_000_000, 0, 4), 210_035);
    assert_eq!(p2(10_000_000, 100, 4), 523_904);
}

#[test]
fn reference_value_ten_billion() {
    // Large enough to span several sweep windows
    assert_eq!(p2(10_000_000_000, 1_000, 8), 350_698_544);
    assert_eq!(p2_wide(10_000_000_000, 1_000, 8), 350_698_544);
}

#[test]
fn zero_for_tiny_bounds() {
    for y in [0, 1, 5] {
        assert_eq!(p2(0, y, 1), 0);
        assert_eq!(p2(1, y, 1), 0);
        assert_eq!(p2(2, y, 1), 0);
        assert_eq!(p2(3, y, 1), 0);
    }
    assert_eq!(p2(4, 0, 1), 1); // 4 = 2·2 is the first semiprime
}

#[test]
fn zero_when_threshold_reaches_sqrt() {
    // x = 31² exactly
    assert_eq!(p2(961, 31, 2), 0);
    assert_eq!(p2(961, 30, 2), 1); // 31·31
    assert_eq!(p2(10_000, 100, 2), 0);
    assert_eq!(p2(10_000, 99, 2), 0); // π(99) = π(100)
}

#[test]
fn sweep_bound_divisible_by_window_floor() {
    // z = ⌊x/y⌋ = 3·2^23 exactly: rounds tile the range with no tail
    assert_eq!(p2(176_160_768, 7, 4), 17_737_193);
}

#[test]
fn sweep_bound_with_small_tail() {
    // z just past 3·2^23: the last round sweeps a sub-floor remainder
    assert_eq!(p2(176_167_768, 7, 4), 17_737_907);
}

#[test]
fn single_round_single_worker() {
    // z far below the window floor: one round, one worker, any thread count
    for threads in [1, 2, 16] {
        assert_eq!(p2(100_000, 50, threads), 4_320);
    }
}

#[test]
fn repeated_calls_bitwise_identical() {
    let first = p2(2_000_000, 126, 4);
    assert_eq!(first, 81_617);
    for _ in 0..3 {
        assert_eq!(p2(2_000_000, 126, 4), first);
    }
}

// ============================================================================
// Distributed mode: rank count is semantically inert
// ============================================================================

fn p2_over_ranks(x: i64, y: i64, num_ranks: usize, threads: usize) -> Vec<i64> {
    let groups = LocalGroup::split(num_ranks);

    thread::scope(|s| {
        let handles: Vec<_> = groups
            .into_iter()
            .map(|g| s.spawn(move || try_p2_distributed(x, y, threads, &g).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn rank_count_is_inert() {
    for (x, y) in [(1_000_000i64, 100i64), (2_000_000, 126), (123_456, 50)] {
        let expected = p2(x, y, 2);
        for num_ranks in [1, 2, 3, 5] {
            let results = p2_over_ranks(x, y, num_ranks, 2);
            assert!(
                results.iter().all(|&r| r == expected),
                "P2({}, {}) over {} ranks: {:?} != {}",
                x,
                y,
                num_ranks,
                results,
                expected
            );
        }
    }
}

#[test]
fn ranks_outnumbering_the_sweep() {
    // z − 2 smaller than the rank count leaves most shards empty
    let expected = p2(100, 3, 1);
    let results = p2_over_ranks(100, 3, 7, 1);
    assert!(results.iter().all(|&r| r == expected));
}

#[test]
fn distributed_early_exits_stay_collective() {
    // x < 4 and a >= b return before the reduction on every rank alike
    assert!(p2_over_ranks(3, 0, 3, 1).iter().all(|&r| r == 0));
    assert!(p2_over_ranks(961, 31, 3, 1).iter().all(|&r| r == 0));
}

// ============================================================================
// Oracle consistency
// ============================================================================

#[test]
fn oracle_agrees_with_table() {
    let table = table();
    for x in [2, 10, 100, 65_536, 999_983, TABLE_LIMIT] {
        assert_eq!(pi_simple(x, 2), pi_bsearch(table, x), "π({})", x);
    }
}

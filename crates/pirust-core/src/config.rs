//! Tuning constants for the P2 engine.
//!
//! This module centralizes scheduling and sieving parameters to facilitate
//! tuning and keep the orchestrator, the π oracle and the prime cursors
//! consistent with each other.

/// Round scheduling parameters for the P2 orchestrator.
pub mod tuning {
    /// Floor for the per-worker window width (2^23 = 8,388,608).
    ///
    /// Below this width the cost of constructing per-window prime cursors
    /// dominates the sieving itself, so smaller windows only add scheduling
    /// overhead without improving balance.
    pub const MIN_THREAD_DISTANCE: i64 = 1 << 23;

    /// Target wall-clock duration of one round, in seconds.
    ///
    /// The stride controller doubles the window width while rounds finish
    /// faster than this and halves it when they run longer. One minute keeps
    /// rebalancing overhead negligible while bounding how long a straggler
    /// can hold up the round barrier.
    pub const TARGET_ROUND_SECS: f64 = 60.0;
}

/// Segment sizing for the bit-packed odd sieve.
pub mod sieve {
    /// Smallest span (in numbers) a prime cursor sieves at once.
    pub const MIN_SEGMENT_SPAN: i64 = 1 << 14;

    /// Largest span (in numbers) a prime cursor sieves at once.
    ///
    /// 2^21 numbers pack into a 128 KB odd-only bitset, small enough to stay
    /// cache-resident while a cursor streams through it.
    pub const MAX_SEGMENT_SPAN: i64 = 1 << 21;

    /// Span of one counting segment inside `pi_simple`.
    ///
    /// Counting only popcounts words and never extracts primes, so it can
    /// afford larger segments than the streaming cursors.
    pub const PI_SEGMENT_SPAN: i64 = 1 << 22;
}

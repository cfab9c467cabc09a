//! Distributed evaluation across a process group.
//!
//! Ranks never talk to each other while computing: the quotient range is
//! split statically, each rank seeds its own π prefix from the oracle, and
//! the only communication is one collective sum at the end. That collective
//! is abstracted behind [`ProcessGroup`] so the engine itself stays
//! transport-free: [`SingleProcess`] is the degenerate group,
//! [`LocalGroup`] runs several ranks inside one process (threads), and an
//! MPI-style transport can implement the same trait downstream.

use std::sync::{Arc, Barrier, Mutex};

/// A collective of ranks evaluating one P2 call together.
///
/// Implementations must guarantee that `sum_all` acts as a barrier: it
/// returns the same total on every rank, and only after all ranks have
/// contributed.
pub trait ProcessGroup: Send + Sync {
    /// This process's rank, in [0, num_ranks).
    fn rank(&self) -> usize;

    /// Number of ranks in the group.
    fn num_ranks(&self) -> usize;

    /// Collective sum-reduction: every rank passes its partial and receives
    /// the global total. Widened to `i128` so one signature serves both
    /// accumulator widths; integer addition keeps the result exact and
    /// independent of contribution order.
    fn sum_all(&self, local: i128) -> i128;
}

/// The trivial group: one rank, identity reduction.
pub struct SingleProcess;

impl ProcessGroup for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn num_ranks(&self) -> usize {
        1
    }

    fn sum_all(&self, local: i128) -> i128 {
        local
    }
}

/// Static partition of [low, high) into `num_ranks` contiguous shards of
/// equal length; the last shard absorbs the remainder.
///
/// A shard may come out empty (`lo >= hi`) when the span is smaller than
/// the group; such ranks contribute zero but still join the collective.
pub fn shard_bounds(low: i64, high: i64, rank: usize, num_ranks: usize) -> (i64, i64) {
    debug_assert!(num_ranks >= 1);
    debug_assert!(rank < num_ranks);

    let span = (high - low).max(0);
    let step = span / num_ranks as i64;

    let lo = low + step * rank as i64;
    let hi = if rank + 1 == num_ranks {
        low + span
    } else {
        low + step * (rank as i64 + 1)
    };

    (lo, hi)
}

struct LocalGroupShared {
    acc: Mutex<i128>,
    snapshot: Mutex<i128>,
    barrier: Barrier,
}

/// An in-process group: every rank is a thread sharing one allreduce cell.
///
/// `split(n)` hands out one handle per rank; move each handle onto its own
/// thread and run the distributed entry point there.
pub struct LocalGroup {
    rank: usize,
    num_ranks: usize,
    shared: Arc<LocalGroupShared>,
}

impl LocalGroup {
    /// Create handles for a group of `num_ranks` ranks.
    pub fn split(num_ranks: usize) -> Vec<LocalGroup> {
        assert!(num_ranks >= 1, "a group needs at least one rank");

        let shared = Arc::new(LocalGroupShared {
            acc: Mutex::new(0),
            snapshot: Mutex::new(0),
            barrier: Barrier::new(num_ranks),
        });

        (0..num_ranks)
            .map(|rank| LocalGroup {
                rank,
                num_ranks,
                shared: shared.clone(),
            })
            .collect()
    }
}

impl ProcessGroup for LocalGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    fn sum_all(&self, local: i128) -> i128 {
        *self.shared.acc.lock().unwrap() += local;

        // All contributions are in; the leader publishes the total and
        // clears the accumulator for the next collective before anyone is
        // released past the second barrier.
        if self.shared.barrier.wait().is_leader() {
            let mut acc = self.shared.acc.lock().unwrap();
            *self.shared.snapshot.lock().unwrap() = *acc;
            *acc = 0;
        }
        self.shared.barrier.wait();

        *self.shared.snapshot.lock().unwrap()
    }
}

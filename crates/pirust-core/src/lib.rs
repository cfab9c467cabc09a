//! # PiRust Core
//!
//! Distributed-parallel evaluation of the **second partial sieve function**
//! P2(x, y) — the count of integers n <= x with exactly two prime factors,
//! each greater than y. P2 is the dominant subroutine of the combinatorial
//! prime-counting algorithms (Meissel, Lehmer, Lagarias–Miller–Odlyzko,
//! Deléglise–Rivat); this crate provides it as a standalone engine.
//!
//! ## Architecture
//!
//! - **Prime cursors** ([`PrimeIter`], [`ReversePrimeIter`]): streaming
//!   forward/reverse prime iterators over a bit-packed segmented sieve.
//! - **Integer math kernel** ([`imath`]): exact roots, ceiling division,
//!   clamping, overflow-guarded exponentiation and π table search, generic
//!   over `i64` and `i128`.
//! - **Workers**: each round, every worker evaluates one window of the
//!   quotient range [2, ⌊x / max(y, 1)⌋) as a pure function and returns its
//!   partial sum plus prime-count bookkeeping.
//! - **Orchestrator**: dispatches one window per worker per round over a
//!   bounded rayon pool, adapts the window width to wall-clock feedback,
//!   then stitches the prefix-dependent corrections serially.
//! - **Cluster layer** ([`cluster`]): optional static sharding across ranks
//!   with a single collective sum at the end; ranks share nothing while
//!   computing.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pirust-core = "0.1"
//! ```
//!
//! ### Basic example
//!
//! ```rust
//! use pirust_core::p2;
//!
//! // Numbers <= 1000 that are products of two primes > 10
//! let count = p2(1_000, 10, 4);
//! assert_eq!(count, 63);
//! ```
//!
//! ### Streaming primes
//!
//! ```rust
//! use pirust_core::PrimeIter;
//!
//! let first_five: Vec<i64> = PrimeIter::new(0, 100).take(5).collect();
//! assert_eq!(first_five, vec![2, 3, 5, 7, 11]);
//! ```
//!
//! The result is independent of the thread count, the rank count and the
//! load balancer's stride decisions; those only shape the sweep.

pub mod algo;
pub mod cluster;
pub mod config;
pub mod imath;
pub mod iterators;
pub mod pi;
mod sieve;
pub mod types;

// Re-export the engine surface
pub use algo::{p2, p2_wide, try_p2, try_p2_distributed, try_p2_wide, try_p2_with_progress};

pub use algo::progress::{percent, status_precision, ProgressReporter};
pub use cluster::{LocalGroup, ProcessGroup, SingleProcess};
pub use iterators::{PrimeIter, ReversePrimeIter};
pub use pi::{pi_simple, primes_table};
pub use types::{CountOps, P2Error};

//! Adaptive stride control for the round loop.

use crate::config::tuning::{MIN_THREAD_DISTANCE, TARGET_ROUND_SECS};
use crate::imath::{ceil_div, in_between};

/// Adjust the per-worker window width from the previous round's wall time.
///
/// A proportional controller, not a PID: double the stride while rounds
/// finish under the one-minute target, halve it when they run over, and
/// clamp into `[MIN_THREAD_DISTANCE, ⌈remaining / threads⌉]` so the final
/// rounds cannot overshoot the sweep bound by more than one stride.
///
/// Load balancing is semantically inert: any stride sequence inside the
/// clamp yields the identical P2 value.
pub(crate) fn balance_load(
    thread_distance: &mut i64,
    low: i64,
    z: i64,
    threads: usize,
    seconds: f64,
) {
    let max_distance = ceil_div(z - low, threads as i64);

    if seconds < TARGET_ROUND_SECS {
        *thread_distance *= 2;
    }
    if seconds > TARGET_ROUND_SECS {
        *thread_distance /= 2;
    }

    *thread_distance = in_between(MIN_THREAD_DISTANCE, *thread_distance, max_distance);
}

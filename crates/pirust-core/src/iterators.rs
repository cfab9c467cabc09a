//! Streaming prime cursors.
//!
//! [`PrimeIter`] walks primes upward from a seed, [`ReversePrimeIter`] walks
//! them downward; both generate one bit-packed sieve segment at a time and
//! hand out primes from the decoded buffer. Each cursor is owned by exactly
//! one thread; workers construct their own pair per window.
//!
//! The size hints passed at construction only shape the internal segment
//! span. Advancing past a hint is always allowed: the cursor transparently
//! sieves further segments (growing them across prime-free stretches), so a
//! caller can trust the stream to be gapless over the full `i64` range it
//! touches.

use crate::config::sieve::{MAX_SEGMENT_SPAN, MIN_SEGMENT_SPAN};
use crate::imath::in_between;
use crate::sieve::{sieve_interval, BaseSet};

/// Forward prime cursor.
///
/// # Example
/// ```
/// use pirust_core::PrimeIter;
///
/// let mut it = PrimeIter::new(10, 100);
/// assert_eq!(it.next_prime(), 11);
/// assert_eq!(it.next_prime(), 13);
/// ```
pub struct PrimeIter {
    buf: Vec<i64>,
    pos: usize,
    /// Start of the next unsieved span.
    low: i64,
    segment_span: i64,
    base: BaseSet,
}

impl PrimeIter {
    /// Cursor over primes >= `seed` in ascending order.
    ///
    /// `stop_hint` is advisory: it sizes the sieve segments for the span the
    /// caller expects to touch.
    pub fn new(seed: i64, stop_hint: i64) -> Self {
        let seed = seed.max(0);
        let span = in_between(
            MIN_SEGMENT_SPAN,
            stop_hint.saturating_sub(seed).saturating_add(1),
            MAX_SEGMENT_SPAN,
        );

        Self {
            buf: Vec::new(),
            pos: 0,
            low: seed,
            segment_span: span,
            base: BaseSet::new(),
        }
    }

    fn fill(&mut self) {
        loop {
            let high = self.low.saturating_add(self.segment_span - 1);
            let base = self.base.ensure(high);
            self.buf = sieve_interval(self.low, high, base);
            self.pos = 0;
            self.low = high.saturating_add(1);
            if !self.buf.is_empty() {
                return;
            }
            // Prime-free stretch wider than the hint suggested: widen.
            self.segment_span = (self.segment_span * 2).min(MAX_SEGMENT_SPAN);
        }
    }

    /// The next prime, advancing the cursor.
    #[inline]
    pub fn next_prime(&mut self) -> i64 {
        if self.pos >= self.buf.len() {
            self.fill();
        }
        let p = self.buf[self.pos];
        self.pos += 1;
        p
    }
}

impl Iterator for PrimeIter {
    type Item = i64;

    /// Endless in practice; bound with `take_while` or a stop value.
    #[inline]
    fn next(&mut self) -> Option<i64> {
        Some(self.next_prime())
    }
}

/// Reverse prime cursor.
///
/// # Example
/// ```
/// use pirust_core::ReversePrimeIter;
///
/// let mut rit = ReversePrimeIter::new(10, 0);
/// assert_eq!(rit.prev_prime(), 7);
/// assert_eq!(rit.prev_prime(), 5);
/// ```
pub struct ReversePrimeIter {
    /// Ascending segment buffer, consumed from the back.
    buf: Vec<i64>,
    remaining: usize,
    /// End of the next unsieved span; below 2 once the stream is done.
    high: i64,
    segment_span: i64,
    base: BaseSet,
}

impl ReversePrimeIter {
    /// Cursor over primes <= `seed` in descending order.
    ///
    /// `floor_hint` is advisory, like the forward cursor's `stop_hint`.
    pub fn new(seed: i64, floor_hint: i64) -> Self {
        let span = in_between(
            MIN_SEGMENT_SPAN,
            seed.saturating_sub(floor_hint).saturating_add(1),
            MAX_SEGMENT_SPAN,
        );

        Self {
            buf: Vec::new(),
            remaining: 0,
            high: seed,
            segment_span: span,
            base: BaseSet::new(),
        }
    }

    fn fill(&mut self) {
        while self.high >= 2 {
            let low = (self.high - (self.segment_span - 1)).max(2);
            let base = self.base.ensure(self.high);
            self.buf = sieve_interval(low, self.high, base);
            self.remaining = self.buf.len();
            self.high = low - 1;
            if self.remaining > 0 {
                return;
            }
            self.segment_span = (self.segment_span * 2).min(MAX_SEGMENT_SPAN);
        }
    }

    /// The next-smaller prime, or 0 once the stream is exhausted below 2.
    #[inline]
    pub fn prev_prime(&mut self) -> i64 {
        if self.remaining == 0 {
            self.fill();
            if self.remaining == 0 {
                return 0;
            }
        }
        self.remaining -= 1;
        self.buf[self.remaining]
    }
}

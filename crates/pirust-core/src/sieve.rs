//! Bit-packed odd-number sieve primitives.
//!
//! Shared by the prime cursors and the π oracle. Odd numbers map to
//! half-indices (n = 2i + 1), so one `u64` word covers 128 numbers; 2 is
//! handled out of band. Interval marking never materializes a multiple
//! below p², and tail bits past the interval end are pre-masked so that
//! extraction and popcounting need no bounds checks.

use crate::imath::{ceil_div, isqrt};

const WORD_BITS: usize = 64;

#[inline]
fn prime_count_upper(n: i64) -> usize {
    if n < 10 {
        return 8;
    }
    let nf = n as f64;
    (nf / nf.ln() * 1.2) as usize + 16
}

#[inline]
fn test_bit(bits: &[u64], i: usize) -> bool {
    bits[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1
}

#[inline]
fn clear_bit(bits: &mut [u64], i: usize) {
    bits[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
}

/// All primes <= limit, via a flat odd-only sieve.
pub(crate) fn simple_sieve(limit: i64) -> Vec<i64> {
    if limit < 2 {
        return Vec::new();
    }

    // Half-index of the largest odd number <= limit.
    let h = ((limit - 1) / 2) as usize;
    let mut bits = vec![!0u64; h / WORD_BITS + 1];
    clear_bit(&mut bits, 0); // 1 is not prime

    let used = h % WORD_BITS + 1;
    if used < WORD_BITS {
        bits[h / WORD_BITS] &= (1u64 << used) - 1;
    }

    let root = isqrt(limit) as usize;
    let mut i = 1usize;
    while 2 * i + 1 <= root {
        if test_bit(&bits, i) {
            let p = 2 * i + 1;
            let mut j = (p * p - 1) / 2;
            while j <= h {
                clear_bit(&mut bits, j);
                j += p;
            }
        }
        i += 1;
    }

    let mut primes = Vec::with_capacity(prime_count_upper(limit));
    primes.push(2);
    for (w, &word) in bits.iter().enumerate() {
        let mut word = word;
        while word != 0 {
            let i = w * WORD_BITS + word.trailing_zeros() as usize;
            primes.push((2 * i + 1) as i64);
            word &= word - 1;
        }
    }

    primes
}

/// Sieve the odd part of [low, high] into a fresh bitset.
///
/// Bit k of the result represents the odd number `2 * (lo_i + k) + 1` where
/// `lo_i` is the returned base half-index. `None` when the interval holds no
/// odd candidate >= 3. `base` must contain every prime <= ⌊√high⌋.
fn sieve_odd_interval(low: i64, high: i64, base: &[i64]) -> Option<(Vec<u64>, usize)> {
    let lo_n = (low.max(3)) | 1;
    if lo_n > high {
        return None;
    }
    let hi_n = if high % 2 == 0 { high - 1 } else { high };

    let lo_i = ((lo_n - 1) / 2) as usize;
    let hi_i = ((hi_n - 1) / 2) as usize;
    let len = hi_i - lo_i + 1;

    let mut bits = vec![!0u64; (len + WORD_BITS - 1) / WORD_BITS];
    let used = len % WORD_BITS;
    if used != 0 {
        *bits.last_mut().unwrap() &= (1u64 << used) - 1;
    }

    for &p in base {
        if p < 3 {
            continue;
        }
        if p > high / p {
            break;
        }

        // First odd multiple of p inside the interval, never below p².
        // Widened so intervals near the top of the i64 range stay exact.
        let mut m = p as i128 * p as i128;
        if m < lo_n as i128 {
            m = ceil_div(lo_n, p) as i128 * p as i128;
            if m % 2 == 0 {
                m += p as i128;
            }
        }
        if m > hi_n as i128 {
            continue;
        }

        let mut j = ((m as i64 - 1) / 2) as usize - lo_i;
        while j < len {
            clear_bit(&mut bits, j);
            j += p as usize;
        }
    }

    Some((bits, lo_i))
}

/// Primes inside [low, high], ascending. `base` must contain every prime
/// <= ⌊√high⌋.
pub(crate) fn sieve_interval(low: i64, high: i64, base: &[i64]) -> Vec<i64> {
    let mut primes = Vec::new();
    if high < 2 || low > high {
        return primes;
    }
    if low <= 2 {
        primes.push(2);
    }

    if let Some((bits, lo_i)) = sieve_odd_interval(low, high, base) {
        for (w, &word) in bits.iter().enumerate() {
            let mut word = word;
            while word != 0 {
                let i = lo_i + w * WORD_BITS + word.trailing_zeros() as usize;
                primes.push((2 * i + 1) as i64);
                word &= word - 1;
            }
        }
    }

    primes
}

/// Count of primes inside [low, high]; the popcount-only sibling of
/// [`sieve_interval`].
pub(crate) fn count_interval(low: i64, high: i64, base: &[i64]) -> i64 {
    if high < 2 || low > high {
        return 0;
    }
    let mut count = i64::from(low <= 2);

    if let Some((bits, _)) = sieve_odd_interval(low, high, base) {
        count += bits.iter().map(|w| w.count_ones() as i64).sum::<i64>();
    }

    count
}

/// Lazily grown set of base primes for interval sieving.
///
/// Grows geometrically so a forward cursor crossing many segments re-sieves
/// its base rarely.
pub(crate) struct BaseSet {
    primes: Vec<i64>,
    limit: i64,
}

impl BaseSet {
    pub(crate) fn new() -> Self {
        Self {
            primes: Vec::new(),
            limit: 0,
        }
    }

    /// Base primes sufficient to sieve any interval ending at `high`.
    pub(crate) fn ensure(&mut self, high: i64) -> &[i64] {
        let need = isqrt(high.max(0));
        if self.limit < need {
            self.limit = need.max(self.limit.saturating_mul(2)).max(1024);
            self.primes = simple_sieve(self.limit);
        }
        &self.primes
    }
}

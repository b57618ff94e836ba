//! Exponential moving average (single-pole IIR low-pass) using shifts only.
//!
//! Difference equation: `y[n] = α·x[n] + (1 - α)·y[n-1]` with `α = 2^-K`.
//! The pole sits at `1 - 2^-K`; larger `K` means a lower cutoff, more
//! smoothing and a slower response.
//!
//! Notes
//! - The accumulator holds the filter state in fixed point with `K`
//!   fractional bits. The output is subtracted back out of it on every call,
//!   so the rounding residual is carried into the next sample instead of
//!   being lost.
//! - `T` must be at least `M + K` bits wide, where `M` is the number of bits
//!   of the largest input (`M = 10` for a 10-bit ADC). This is not checked
//!   per call: a too-narrow `T` wraps silently in release builds. See
//!   [`Ema::headroom_ok`].

use core::fmt;

use crate::sample::{accumulate, bits_of, release, Sample};
use crate::stage::Stage;

/// Shift-only EMA filter.
///
/// `K` is the shift amount (`1 <= K < bits_of::<T>()`), `T` the unsigned
/// type used for input, accumulator and output. Both are checked when the
/// filter is instantiated; a signed `T` does not compile at all:
///
/// ```compile_fail
/// let _ = fixfilt_core::ema::Ema::<5, i16>::new();
/// ```
///
/// ```compile_fail
/// // K = 0 would need a shift by -1 for the rounding constant.
/// let mut f = fixfilt_core::ema::Ema::<0, u16>::new();
/// f.filter(1);
/// ```
///
/// ```
/// use fixfilt_core::ema::Ema;
///
/// let mut ema = Ema::<5, u16>::new();
/// let y = ema.filter(1000);
/// assert_eq!(y, 31);
/// ```
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Ema<const K: u8, T: Sample> {
    filtered: T,
}

impl<const K: u8, T: Sample> Ema<K, T> {
    /// The shift amount, i.e. `-log2(α)`.
    pub const SHIFT: u8 = K;

    /// A zeroed filter.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(K >= 1, "Ema: K must be at least 1");
            assert!(
                (K as u32) < bits_of::<T>(),
                "Ema: K must be smaller than the bit width of T"
            );
        };
        Self { filtered: T::zero() }
    }

    /// One half in fixed point with `K` fractional bits, used for rounding.
    #[inline]
    fn half() -> T {
        T::one() << usize::from(K - 1)
    }

    /// Filter the input: given `x[n]`, compute `y[n]`.
    #[inline]
    pub fn filter(&mut self, input: T) -> T {
        self.filtered = accumulate(self.filtered, input);
        let output = accumulate(self.filtered, Self::half()) >> usize::from(K);
        self.filtered = release(self.filtered, output);
        output
    }

    /// Borrow the filter as a closure, e.g. for `Iterator::map`.
    #[inline]
    pub fn as_fn(&mut self) -> impl FnMut(T) -> T + '_ {
        move |x| self.filter(x)
    }

    /// Raw accumulator in fixed point (`K` fractional bits).
    #[inline]
    #[must_use]
    pub fn state(&self) -> T {
        self.filtered
    }

    /// Clear the accumulator back to zero.
    #[inline]
    pub fn reset(&mut self) {
        self.filtered = T::zero();
    }

    /// Whether `T` leaves room for `input_bits`-bit inputs plus the `K` bits of
    /// fixed-point headroom the accumulator needs.
    #[inline]
    #[must_use]
    pub const fn headroom_ok(input_bits: u32) -> bool {
        input_bits + K as u32 <= bits_of::<T>()
    }
}

impl<const K: u8, T: Sample> Default for Ema<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: u8, T: Sample> fmt::Debug for Ema<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ema")
            .field("k", &K)
            .field("filtered", &self.filtered)
            .finish()
    }
}

impl<const K: u8, T: Sample> Stage for Ema<K, T> {
    type Input = T;
    type Output = T;

    #[inline]
    fn process(&mut self, input: T) -> T {
        self.filter(input)
    }
}

// ------------------------------------ Tests --------------------------------------

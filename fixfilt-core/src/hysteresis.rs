//! Hysteresis quantizer: drop `BITS` bits of resolution without chatter.
//!
//! Once the output has settled on a level, the input has to leave a band of
//! `±(2^BITS - 1)` around that level before the output moves again. A noisy
//! input hovering around a quantization boundary therefore keeps its level
//! instead of toggling between two neighbours.
//!
//! Example for `BITS = 7` and an input from 0 to 1023 (centred band):
//!
//! ```text
//!    7                                                     ┌───◄───┬───
//! o  6                                             ┌───◄───┼───►───┘
//! u  5                                     ┌───◄───┼───►───┘
//! t  4                             ┌───◄───┼───►───┘
//! p  3                     ┌───◄───┼───►───┘
//! u  2             ┌───◄───┼───►───┘
//! t  1     ┌───◄───┼───►───┘
//!    0 ────┴───►───┘
//!      0      128     256     384     512     640     768     896    1023
//!                                  i n p u t
//! ```
//!
//! Two band placements are provided:
//! - [`Hysteresis`] (default, `CENTERED = true`): the band is centred on the
//!   middle of the current level's step, `(L << BITS) | 2^(BITS-1)`.
//! - [`EdgeHysteresis`] (`CENTERED = false`): the band is anchored on the
//!   lower edge of the step, `L << BITS`.

use core::fmt;
use core::marker::PhantomData;

use num_traits::AsPrimitive;

use crate::sample::{bits_of, Sample};
use crate::stage::Stage;

/// Hysteresis quantizer from `TIn` samples to `TOut` levels.
///
/// `TOut` must be wide enough for `input_max >> BITS`.
///
/// The band is centred on the current step, so from level 0 with `BITS = 3`
/// an input of 9 is still inside it (bounds `0..=11`). Use
/// [`EdgeHysteresis`] for the lower-edge band, where 9 already moves the
/// level to 1:
///
/// ```
/// use fixfilt_core::hysteresis::{EdgeHysteresis, Hysteresis};
///
/// let mut centred = Hysteresis::<3, u16, u8>::new();
/// assert!(!centred.update(9));
/// assert_eq!(centred.value(), 0);
///
/// let mut edge = EdgeHysteresis::<3, u16, u8>::new();
/// assert!(!edge.update(5));
/// assert!(edge.update(9));
/// assert_eq!(edge.value(), 1);
/// ```
///
/// ```
/// use fixfilt_core::hysteresis::Hysteresis;
///
/// let mut h = Hysteresis::<3, u16, u8>::new();
/// assert!(!h.update(5));
/// assert!(h.update(12));
/// assert_eq!(h.value(), 1);
/// ```
pub struct Hysteresis<const BITS: u8, TIn = u16, TOut = u8, const CENTERED: bool = true> {
    previous_level: TOut,
    _input: PhantomData<fn(TIn) -> TOut>,
}

/// Hysteresis whose band is anchored at the lower edge of the current step.
pub type EdgeHysteresis<const BITS: u8, TIn = u16, TOut = u8> = Hysteresis<BITS, TIn, TOut, false>;

impl<const BITS: u8, TIn, TOut, const CENTERED: bool> Hysteresis<BITS, TIn, TOut, CENTERED>
where
    TIn: Sample + AsPrimitive<TOut>,
    TOut: Sample + AsPrimitive<TIn>,
{
    /// A quantizer sitting at level 0.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(BITS >= 1, "Hysteresis: BITS must be at least 1");
            assert!(
                (BITS as u32) < bits_of::<TIn>(),
                "Hysteresis: BITS must be smaller than the bit width of TIn"
            );
        };
        Self {
            previous_level: TOut::zero(),
            _input: PhantomData,
        }
    }

    #[inline]
    fn margin() -> TIn {
        (TIn::one() << usize::from(BITS)) - TIn::one()
    }

    #[inline]
    fn offset() -> TIn {
        if CENTERED {
            TIn::one() << usize::from(BITS - 1)
        } else {
            TIn::zero()
        }
    }

    /// Inclusive range of inputs that keep the current level.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> (TIn, TIn) {
        let level: TIn = self.previous_level.as_();
        let full = (level << usize::from(BITS)) | Self::offset();
        let lower = if self.previous_level > TOut::zero() {
            full - Self::margin()
        } else {
            TIn::zero()
        };
        let upper = full.saturating_add(Self::margin());
        (lower, upper)
    }

    /// Feed a new input. Returns `true` iff the output level changed.
    #[inline]
    pub fn update(&mut self, input: TIn) -> bool {
        let (lower, upper) = self.bounds();
        if input < lower || input > upper {
            self.previous_level = (input >> usize::from(BITS)).as_();
            return true;
        }
        false
    }

    /// Current output level.
    #[inline]
    #[must_use]
    pub fn value(&self) -> TOut {
        self.previous_level
    }
}

impl<const BITS: u8, TIn, TOut, const CENTERED: bool> Default for Hysteresis<BITS, TIn, TOut, CENTERED>
where
    TIn: Sample + AsPrimitive<TOut>,
    TOut: Sample + AsPrimitive<TIn>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const BITS: u8, TIn, TOut: Copy, const CENTERED: bool> Clone for Hysteresis<BITS, TIn, TOut, CENTERED> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const BITS: u8, TIn, TOut: Copy, const CENTERED: bool> Copy for Hysteresis<BITS, TIn, TOut, CENTERED> {}

impl<const BITS: u8, TIn, TOut: fmt::Debug, const CENTERED: bool> fmt::Debug
    for Hysteresis<BITS, TIn, TOut, CENTERED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hysteresis")
            .field("bits", &BITS)
            .field("centered", &CENTERED)
            .field("level", &self.previous_level)
            .finish()
    }
}

impl<const BITS: u8, TIn, TOut, const CENTERED: bool> Stage for Hysteresis<BITS, TIn, TOut, CENTERED>
where
    TIn: Sample + AsPrimitive<TOut>,
    TOut: Sample + AsPrimitive<TIn>,
{
    type Input = TIn;
    type Output = TOut;

    #[inline]
    fn process(&mut self, input: TIn) -> TOut {
        self.update(input);
        self.value()
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_band_scenario() {
        let mut h = EdgeHysteresis::<3, u16, u8>::new();
        assert_eq!(h.bounds(), (0, 7));
        assert!(!h.update(5));
        assert_eq!(h.value(), 0);
        assert!(h.update(9));
        assert_eq!(h.value(), 9 >> 3);
        assert_eq!(h.bounds(), (1, 15));
        assert!(h.update(0));
        assert_eq!(h.value(), 0);
    }

    #[test]
    fn centred_band_scenario() {
        let mut h = Hysteresis::<3, u16, u8>::new();
        assert_eq!(h.bounds(), (0, 11));
        assert!(!h.update(5));
        assert!(!h.update(9));
        assert!(!h.update(11));
        assert_eq!(h.value(), 0);
        assert!(h.update(12));
        assert_eq!(h.value(), 1);
        assert_eq!(h.bounds(), (5, 19));
        assert!(!h.update(5));
        assert!(h.update(4));
        assert_eq!(h.value(), 0);
    }

    #[test]
    fn whole_band_keeps_level_and_one_past_each_edge_moves_it() {
        fn check<const CENTERED: bool>() {
            for level in [1u16, 2, 17, 100] {
                let mut h = Hysteresis::<4, u16, u16, CENTERED>::new();
                let seed = (level << 4) | 8;
                assert!(h.update(seed));
                assert_eq!(h.value(), level);

                let (lo, hi) = h.bounds();
                assert_eq!(hi - lo, 2 * 15);
                for x in lo..=hi {
                    assert!(!h.update(x), "level={level} x={x}");
                    assert_eq!(h.value(), level);
                }

                let mut below = h;
                assert!(below.update(lo - 1));
                assert_eq!(below.value(), (lo - 1) >> 4);

                let mut above = h;
                assert!(above.update(hi + 1));
                assert_eq!(above.value(), (hi + 1) >> 4);
            }
        }
        check::<true>();
        check::<false>();
    }

    #[test]
    fn lower_bound_clamps_at_level_zero() {
        let h = Hysteresis::<6, u16, u16>::new();
        assert_eq!(h.bounds(), (0, 32 + 63));
        let h = EdgeHysteresis::<6, u16, u16>::new();
        assert_eq!(h.bounds(), (0, 63));
    }

    #[test]
    fn noise_around_a_boundary_does_not_chatter() {
        let mut h = Hysteresis::<3, u16, u8>::new();
        h.update(100);
        let level = h.value();
        let changes = [95u16, 104, 97, 103, 96, 100, 101, 99]
            .iter()
            .filter(|&&x| h.update(x))
            .count();
        assert_eq!(changes, 0);
        assert_eq!(h.value(), level);
    }

    #[test]
    fn upper_bound_saturates_at_top_of_input_range() {
        let mut h = Hysteresis::<2, u8, u8>::new();
        assert!(h.update(255));
        assert_eq!(h.value(), 63);
        assert_eq!(h.bounds(), (251, 255));
        assert!(!h.update(255));
    }

    #[test]
    fn stage_returns_level() {
        let mut h = Hysteresis::<3, u16, u8>::default();
        let levels: Vec<u8> = [0u16, 5, 12, 13, 30, 29]
            .iter()
            .map(|&x| h.process(x))
            .collect();
        assert_eq!(levels, [0, 0, 1, 1, 3, 3]);
    }
}

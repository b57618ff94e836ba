//! Bit-depth conversion between integer resolutions.
//!
//! Contents
//! - [`rescale`]            : widen by zero-filling, narrow by truncation
//! - [`increase_bit_depth`] : widen by replicating the high bits into the
//!   freed low bits, so full scale maps onto full scale
//! - [`Rescale`], [`Replicate`] : the same conversions as zero-sized stages
//!
//! Widening before an [`Ema`](crate::ema::Ema) does not add information, but
//! it gives the filter's own rounding more bits to work with: filtering at 16
//! bits and narrowing afterwards loses less than filtering at 10 bits.
//!
//! All values are treated as unsigned magnitudes. The bit counts are checked
//! against the widths of the types when the conversion is instantiated.

use core::marker::PhantomData;

use num_traits::AsPrimitive;

use crate::sample::{bits_of, Sample};
use crate::stage::Stage;

/// Move `value` from `FROM` significant bits to `TO` significant bits.
///
/// - `TO > FROM`: shift left by `TO - FROM`, low bits are zero.
/// - `TO < FROM`: shift right by `FROM - TO`, low bits are discarded.
/// - `TO == FROM`: identity (apart from the type conversion).
///
/// ```
/// use fixfilt_core::bitdepth::rescale;
///
/// let wide: u16 = rescale::<10, 16, _, _>(1023u16);
/// assert_eq!(wide, 0xFFC0);
/// assert_eq!(rescale::<16, 10, u16, _>(wide), 1023);
/// ```
#[inline]
#[must_use]
pub fn rescale<const FROM: u32, const TO: u32, TOut, TIn>(value: TIn) -> TOut
where
    TIn: Sample + AsPrimitive<TOut>,
    TOut: Sample,
{
    const {
        assert!(FROM >= 1 && FROM <= bits_of::<TIn>(), "rescale: FROM exceeds the width of TIn");
        assert!(TO >= 1 && TO <= bits_of::<TOut>(), "rescale: TO exceeds the width of TOut");
    };
    if TO > FROM {
        let widened: TOut = value.as_();
        widened << (TO - FROM) as usize
    } else {
        (value >> (FROM - TO) as usize).as_()
    }
}

/// Widen `value` from `FROM` to `TO` bits, filling the new low bits with
/// copies of the value's own high bits.
///
/// `0` stays `0` and `2^FROM - 1` becomes `2^TO - 1`, which a zero-filling
/// [`rescale`] cannot do. When `TO > 2 * FROM` the value is repeated as many
/// times as needed.
///
/// ```
/// use fixfilt_core::bitdepth::increase_bit_depth;
///
/// assert_eq!(increase_bit_depth::<10, 16, u16, _>(1023u16), 0xFFFF);
/// assert_eq!(increase_bit_depth::<7, 10, u16, _>(0x7Fu8), 1023);
/// ```
#[inline]
#[must_use]
pub fn increase_bit_depth<const FROM: u32, const TO: u32, TOut, TIn>(value: TIn) -> TOut
where
    TIn: Sample + AsPrimitive<TOut>,
    TOut: Sample,
{
    const {
        assert!(FROM >= 1 && FROM <= bits_of::<TIn>(), "increase_bit_depth: FROM exceeds the width of TIn");
        assert!(TO <= bits_of::<TOut>(), "increase_bit_depth: TO exceeds the width of TOut");
        assert!(TO >= FROM, "increase_bit_depth: TO must not be smaller than FROM");
    };
    let widened: TOut = value.as_();
    let mut free = TO - FROM;
    let mut out = widened << free as usize;
    while free > 0 {
        if free >= FROM {
            free -= FROM;
            out = out | (widened << free as usize);
        } else {
            out = out | (widened >> (FROM - free) as usize);
            free = 0;
        }
    }
    out
}

// ------------------------------------ Stages -------------------------------------

/// [`rescale`] as a stateless stage.
pub struct Rescale<const FROM: u32, const TO: u32, TIn, TOut>(PhantomData<fn(TIn) -> TOut>);

/// [`increase_bit_depth`] as a stateless stage.
pub struct Replicate<const FROM: u32, const TO: u32, TIn, TOut>(PhantomData<fn(TIn) -> TOut>);

macro_rules! zst_stage {
    ($name:ident, $convert:ident) => {
        impl<const FROM: u32, const TO: u32, TIn, TOut> $name<FROM, TO, TIn, TOut> {
            #[inline]
            #[must_use]
            pub const fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<const FROM: u32, const TO: u32, TIn, TOut> Default for $name<FROM, TO, TIn, TOut> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<const FROM: u32, const TO: u32, TIn, TOut> Clone for $name<FROM, TO, TIn, TOut> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<const FROM: u32, const TO: u32, TIn, TOut> Copy for $name<FROM, TO, TIn, TOut> {}

        impl<const FROM: u32, const TO: u32, TIn, TOut> core::fmt::Debug for $name<FROM, TO, TIn, TOut> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), "<{}, {}>"), FROM, TO)
            }
        }

        impl<const FROM: u32, const TO: u32, TIn, TOut> Stage for $name<FROM, TO, TIn, TOut>
        where
            TIn: Sample + AsPrimitive<TOut>,
            TOut: Sample,
        {
            type Input = TIn;
            type Output = TOut;

            #[inline]
            fn process(&mut self, input: TIn) -> TOut {
                $convert::<FROM, TO, TOut, TIn>(input)
            }
        }
    };
}

zst_stage!(Rescale, rescale);
zst_stage!(Replicate, increase_bit_depth);

// ------------------------------------ Tests --------------------------------------

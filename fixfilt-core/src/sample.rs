//! Numeric policy shared by every primitive.
//!
//! All primitives work on unsigned integers only. Division by `2^K` is done by
//! shifting, which is only a floor division for unsigned magnitudes, so the
//! restriction is part of the type: signed integers simply do not implement
//! [`Sample`] and are rejected at compile time.
//!
//! Overflow is a caller obligation. The accumulation helpers wrap silently in
//! release builds and assert in debug builds; the wrapped result is the same
//! in both, only the debug build stops to tell you about it.

use core::fmt::Debug;

use cfg_if::cfg_if;
use num_traits::{PrimInt, Unsigned, WrappingAdd, WrappingSub};

/// An unsigned primitive integer usable as a sample or accumulator.
///
/// Blanket-implemented for `u8`, `u16`, `u32`, `u64`, `u128` and `usize`.
pub trait Sample: PrimInt + Unsigned + WrappingAdd + WrappingSub + Debug + 'static {}

impl<T> Sample for T where T: PrimInt + Unsigned + WrappingAdd + WrappingSub + Debug + 'static {}

/// Width of `T` in bits.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn bits_of<T>() -> u32 {
    (core::mem::size_of::<T>() * 8) as u32
}

/// Whether `value` has no significant bits above the lowest `bits`.
#[inline]
#[must_use]
pub fn fits_in<T: Sample>(value: T, bits: u32) -> bool {
    if bits >= bits_of::<T>() {
        return true;
    }
    value >> bits as usize == T::zero()
}

/// Largest value representable with `bits` significant bits, saturated to `T::max_value()`.
#[inline]
#[must_use]
pub fn full_scale<T: Sample>(bits: u32) -> T {
    if bits >= bits_of::<T>() {
        T::max_value()
    } else {
        (T::one() << bits as usize) - T::one()
    }
}

// ----------------------------- Accumulator arithmetic -----------------------------

cfg_if! {
    if #[cfg(debug_assertions)] {
        #[inline]
        pub(crate) fn accumulate<T: Sample>(acc: T, x: T) -> T {
            debug_assert!(
                acc.checked_add(&x).is_some(),
                "accumulator overflow: {acc:?} + {x:?} (type too narrow for input + shift)"
            );
            acc.wrapping_add(&x)
        }

        #[inline]
        pub(crate) fn release<T: Sample>(acc: T, x: T) -> T {
            debug_assert!(
                acc.checked_sub(&x).is_some(),
                "accumulator underflow: {acc:?} - {x:?}"
            );
            acc.wrapping_sub(&x)
        }
    } else {
        #[inline]
        pub(crate) fn accumulate<T: Sample>(acc: T, x: T) -> T { acc.wrapping_add(&x) }

        #[inline]
        pub(crate) fn release<T: Sample>(acc: T, x: T) -> T { acc.wrapping_sub(&x) }
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(bits_of::<u8>(), 8);
        assert_eq!(bits_of::<u16>(), 16);
        assert_eq!(bits_of::<u32>(), 32);
        assert_eq!(bits_of::<u128>(), 128);
    }

    #[test]
    fn fits_in_checks_high_bits() {
        assert!(fits_in(1023u16, 10));
        assert!(!fits_in(1024u16, 10));
        assert!(fits_in(0u8, 0));
        assert!(fits_in(u16::MAX, 16));
        assert!(fits_in(u16::MAX, 40));
    }

    #[test]
    fn full_scale_saturates() {
        assert_eq!(full_scale::<u16>(10), 1023);
        assert_eq!(full_scale::<u16>(16), u16::MAX);
        assert_eq!(full_scale::<u8>(12), u8::MAX);
    }

    #[test]
    fn accumulate_and_release_are_inverse() {
        let acc = accumulate(100u16, 23);
        assert_eq!(acc, 123);
        assert_eq!(release(acc, 23), 100);
    }
}

//! Declared bit widths and the checks that tie a chain together.
//!
//! The type system already guarantees that adjacent stages agree on the
//! *integer type*. It cannot see how many of those bits are significant: a
//! `u16` may carry a 10-bit ADC reading or a 16-bit widened one. Each stage of
//! a pipeline therefore declares its input and output width, and
//! [`check_chain`] verifies that they line up before any sample is processed.

use fixfilt_core::ema::Ema;
use fixfilt_core::sample::{bits_of, Sample};

use crate::error::{PipelineError, Result};

/// Significant bits a stage consumes and produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Width {
    pub name: &'static str,
    pub input_bits: u32,
    pub output_bits: u32,
}

impl Width {
    #[inline]
    pub const fn new(name: &'static str, input_bits: u32, output_bits: u32) -> Self {
        Self { name, input_bits, output_bits }
    }

    /// A stage that keeps the resolution (filters, type conversions).
    #[inline]
    pub const fn same(name: &'static str, bits: u32) -> Self {
        Self::new(name, bits, bits)
    }
}

/// Every stage's output width must equal the next stage's input width.
pub fn check_chain(stages: &[Width]) -> Result<()> {
    for pair in stages.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.output_bits != next.input_bits {
            return Err(PipelineError::WidthMismatch {
                from: prev.name,
                to: next.name,
                produced: prev.output_bits,
                expected: next.input_bits,
            });
        }
    }
    Ok(())
}

/// `Ema<K, T>` fed `input_bits`-bit samples needs `input_bits + K` bits in `T`.
pub fn check_headroom<const K: u8, T: Sample>(name: &'static str, input_bits: u32) -> Result<Width> {
    if Ema::<K, T>::headroom_ok(input_bits) {
        Ok(Width::same(name, input_bits))
    } else {
        Err(PipelineError::Headroom {
            stage: name,
            needed: input_bits + u32::from(K),
            available: bits_of::<T>(),
        })
    }
}

/// A hysteresis dropping `BITS` bits of `input_bits`-bit samples emits
/// `input_bits - BITS` bit levels, which must fit in `TOut`.
pub fn check_level_width<const BITS: u8, TOut: Sample>(name: &'static str, input_bits: u32) -> Result<Width> {
    let needed = input_bits.saturating_sub(u32::from(BITS));
    if needed <= bits_of::<TOut>() {
        Ok(Width::new(name, input_bits, needed))
    } else {
        Err(PipelineError::LevelWidth {
            stage: name,
            needed,
            available: bits_of::<TOut>(),
        })
    }
}

// ------------------------------------ Tests --------------------------------------

#![cfg_attr(not(feature = "std"), no_std)]
//! fixfilt core: fixed-point signal conditioning for ADC readings, no_std-ready.
//!
//! Features
//! - `std` : (default) use the Rust standard library; without it the crate is `#![no_std]`
//!
//! Modules
//! - [`ema`]        : shift-only exponential moving average low-pass
//! - [`hysteresis`] : resolution reduction with a Schmitt-trigger band
//! - [`bitdepth`]   : zero-filling / replicating bit-depth conversion
//! - [`stage`]      : the `Stage` trait and chaining combinators
//! - [`sample`]     : unsigned sample policy and width helpers
//!
//! Design
//! - Integer arithmetic only: additions, subtractions and shifts
//! - No heap allocations, no global state; each instance belongs to one channel
//! - Every call is O(1) and safe to run from an interrupt handler
//! - Parameters are const generics; invalid ones fail to compile
//!
//! Typical chain for a 10-bit ADC:
//!
//! ```
//! use fixfilt_core::prelude::*;
//!
//! let mut channel = Rescale::<10, 16, u16, u32>::new()
//!     .then(Ema::<5, u32>::new())
//!     .then(Rescale::<16, 10, u32, u16>::new())
//!     .then(Hysteresis::<3, u16, u8>::new());
//!
//! let mut level = 0;
//! for _ in 0..500 {
//!     level = channel.process(804);
//! }
//! assert_eq!(level, 100);
//! ```

pub mod bitdepth;
pub mod ema;
pub mod hysteresis;
pub mod sample;
pub mod stage;

pub use bitdepth::{increase_bit_depth, rescale, Replicate, Rescale};
pub use ema::Ema;
pub use hysteresis::{EdgeHysteresis, Hysteresis};
pub use sample::Sample;
pub use stage::{Chain, Stage, StageExt};

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::bitdepth::{increase_bit_depth, rescale, Replicate, Rescale};
    pub use crate::ema::Ema;
    pub use crate::hysteresis::{EdgeHysteresis, Hysteresis};
    pub use crate::sample::{bits_of, fits_in, full_scale, Sample};
    pub use crate::stage::{Chain, Stage, StageExt};
}

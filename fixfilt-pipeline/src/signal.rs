//! Synthetic ADC test signal: a slow raised-cosine step plus Gaussian noise.
//!
//! The first half of the buffer ramps from 0 to `target` along
//! `target/2 · (1 - cos(π·i/half))`, the second half holds `target`. Each
//! sample gets additive Gaussian noise and is clamped to the ADC range, then
//! truncated to an integer exactly like a real converter reading would be.
//!
//! The noise is generated with the Box–Muller transform over `rand`'s uniform
//! `f64`s. Seeded configurations reproduce the same buffer on every run.

use core::f64::consts::PI;

use fixfilt_core::sample::full_scale;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PipelineError, Result};

/// Largest ADC resolution the `u16` sample buffer can carry.
pub const MAX_ADC_BITS: u32 = 16;

/// Parameters of the step + noise test signal.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalConfig {
    /// Number of samples.
    pub len: usize,
    /// Level reached at the end of the ramp.
    pub target: u16,
    /// Standard deviation of the additive noise, in LSB.
    pub noise_stddev: f64,
    /// ADC resolution; samples are clamped to `[0, 2^adc_bits - 1]`.
    pub adc_bits: u32,
    /// Fixed RNG seed, or `None` for entropy.
    pub seed: Option<u64>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            len: 1024,
            target: 1000,
            noise_stddev: 1.0,
            adc_bits: 10,
            seed: None,
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.len == 0 {
            return Err(PipelineError::InvalidSignal("length must be at least one sample"));
        }
        if self.adc_bits == 0 || self.adc_bits > MAX_ADC_BITS {
            return Err(PipelineError::InvalidSignal("ADC resolution must be 1..=16 bits"));
        }
        if self.target > full_scale::<u16>(self.adc_bits) {
            return Err(PipelineError::InvalidSignal("target exceeds the ADC range"));
        }
        if !self.noise_stddev.is_finite() || self.noise_stddev < 0.0 {
            return Err(PipelineError::InvalidSignal("noise deviation must be finite and non-negative"));
        }
        Ok(())
    }

    /// Generate the sample buffer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn generate(&self) -> Result<Vec<u16>> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let max = f64::from(full_scale::<u16>(self.adc_bits));
        let target = f64::from(self.target);
        let half = self.len / 2;

        let samples = (0..self.len)
            .map(|i| {
                let clean = if i < half {
                    let phase = i as f64 * PI / half as f64;
                    target / 2.0 * (1.0 - phase.cos())
                } else {
                    target
                };
                let noisy = clean + gaussian(&mut rng) * self.noise_stddev;
                noisy.clamp(0.0, max) as u16
            })
            .collect::<Vec<u16>>();

        debug!(
            "generated {} samples (target {}, σ {}, {} bit, seed {:?})",
            samples.len(),
            self.target,
            self.noise_stddev,
            self.adc_bits,
            self.seed
        );
        Ok(samples)
    }
}

/// One standard-normal draw (Box–Muller, cosine branch).
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the logarithm finite.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> SignalConfig {
        SignalConfig { noise_stddev: 0.0, seed: Some(1), ..SignalConfig::default() }
    }

    #[test]
    fn noiseless_signal_is_a_monotonic_step() {
        let s = quiet().generate().unwrap();
        assert_eq!(s.len(), 1024);
        assert_eq!(s[0], 0);
        assert!(s.windows(2).all(|w| w[0] <= w[1]));
        assert!(s[512..].iter().all(|&x| x == 1000));
        // cos(π/2) is not exactly zero in f64, so the midpoint truncates to 499.
        assert_eq!(s[256], 499);
        assert_eq!(s[511], 999);
    }

    #[test]
    fn seeded_signal_is_reproducible() {
        let cfg = SignalConfig { seed: Some(42), ..SignalConfig::default() };
        assert_eq!(cfg.generate().unwrap(), cfg.generate().unwrap());
        let other = SignalConfig { seed: Some(43), ..SignalConfig::default() };
        assert_ne!(cfg.generate().unwrap(), other.generate().unwrap());
    }

    #[test]
    fn samples_stay_in_adc_range() {
        let cfg = SignalConfig {
            target: 1023,
            noise_stddev: 8.0,
            seed: Some(7),
            ..SignalConfig::default()
        };
        let s = cfg.generate().unwrap();
        assert!(s.iter().all(|&x| x <= 1023));
        assert!(s[600..].iter().any(|&x| x == 1023));
    }

    #[test]
    fn noise_is_centred_on_the_target() {
        let cfg = SignalConfig { len: 8192, noise_stddev: 4.0, seed: Some(3), ..SignalConfig::default() };
        let s = cfg.generate().unwrap();
        let tail = &s[4096..];
        let mean = tail.iter().map(|&x| f64::from(x)).sum::<f64>() / tail.len() as f64;
        // Truncation shifts the mean down by about half an LSB.
        assert!((mean - 999.5).abs() < 0.5, "mean={mean}");
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let bad = [
            SignalConfig { len: 0, ..SignalConfig::default() },
            SignalConfig { adc_bits: 0, ..SignalConfig::default() },
            SignalConfig { adc_bits: 17, ..SignalConfig::default() },
            SignalConfig { adc_bits: 8, ..SignalConfig::default() },
            SignalConfig { noise_stddev: f64::NAN, ..SignalConfig::default() },
            SignalConfig { noise_stddev: -1.0, ..SignalConfig::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.generate(), Err(PipelineError::InvalidSignal(_))), "{cfg:?}");
        }
    }

    #[test]
    fn single_sample_is_the_target() {
        let cfg = SignalConfig { len: 1, ..quiet() };
        assert_eq!(cfg.generate().unwrap(), [1000]);
    }
}

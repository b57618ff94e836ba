//! The demo bench: one noisy 10-bit input, six processed traces.
//!
//! Traces (all columns are `u16`):
//! 1. `input`            : raw ADC samples
//! 2. `filtered`         : `Ema<5, u16>` at the ADC's 10 bits
//! 3. `hires`            : input widened to 16 bits by bit replication
//! 4. `hires_filtered`   : `Ema<5, u32>` on the 16-bit samples
//! 5. `hysteresis`       : centred `Hysteresis<3>` on `filtered` (7-bit
//!    levels), widened back to 10 bits for comparison
//! 6. `hires_hysteresis` : centred `Hysteresis<6>` on `hires_filtered`,
//!    landing directly on 10-bit levels
//!
//! The bench declares the bit widths of each chain and validates them (and
//! the accumulator headroom of both filters) when it is built.

use fixfilt_core::prelude::*;
use log::{debug, info};

use crate::error::{PipelineError, Result};
use crate::graph::Channel;
use crate::width::{check_chain, check_headroom, check_level_width, Width};

/// Resolution the bench's chains are built for.
pub const ADC_BITS: u32 = 10;
/// Resolution of the widened path.
pub const HIRES_BITS: u32 = 16;

pub type FilterStage = Ema<5, u16>;
pub type WidenStage = Replicate<10, 16, u16, u16>;
pub type HiResFilterStage = Chain<Chain<Rescale<16, 16, u16, u32>, Ema<5, u32>>, Rescale<16, 16, u32, u16>>;
pub type LevelStage = Chain<Hysteresis<3, u16, u8>, Replicate<7, 10, u8, u16>>;
pub type HiResLevelStage = Hysteresis<6, u16, u16>;

/// Column names, in [`Traces::row`] order.
pub const COLUMNS: [&str; 6] = [
    "input",
    "filtered",
    "hires",
    "hires_filtered",
    "hysteresis",
    "hires_hysteresis",
];

/// Validated description of the demo chains.
#[derive(Clone, Debug)]
pub struct DemoBench {
    adc_bits: u32,
    chains: Vec<Vec<Width>>,
}

impl DemoBench {
    /// Check every chain against an input of `adc_bits` bits.
    ///
    /// The chains are typed for [`ADC_BITS`]-bit input, so any other width
    /// fails with [`PipelineError::WidthMismatch`].
    pub fn new(adc_bits: u32) -> Result<Self> {
        let adc = Width::same("adc", adc_bits);
        let ema = check_headroom::<5, u16>("ema", ADC_BITS)?;
        let widen = Width::new("replicate", ADC_BITS, HIRES_BITS);
        let hires_ema = check_headroom::<5, u32>("hires ema", HIRES_BITS)?;
        let level = check_level_width::<3, u8>("hysteresis", ADC_BITS)?;
        let level_widen = Width::new("replicate levels", level.output_bits, ADC_BITS);
        let hires_level = check_level_width::<6, u16>("hires hysteresis", HIRES_BITS)?;

        let chains = vec![
            vec![adc, ema],
            vec![adc, widen],
            vec![adc, widen, hires_ema],
            vec![adc, ema, level, level_widen],
            vec![adc, widen, hires_ema, hires_level],
        ];
        for chain in &chains {
            check_chain(chain)?;
        }
        info!("demo bench ready: {} chains, {adc_bits}-bit input", chains.len());
        Ok(Self { adc_bits, chains })
    }

    #[inline] pub fn adc_bits(&self) -> u32 { self.adc_bits }

    /// The declared widths of each chain.
    #[inline] pub fn chains(&self) -> &[Vec<Width>] { &self.chains }

    /// Run every chain over `input` with freshly zeroed state.
    pub fn run(&self, input: &[u16]) -> Result<Traces> {
        if let Some((index, &value)) = input.iter().enumerate().find(|&(_, &x)| !fits_in(x, self.adc_bits)) {
            return Err(PipelineError::SampleRange {
                index,
                value: u64::from(value),
                bits: self.adc_bits,
            });
        }

        let mut filter = Channel::<FilterStage>::default();
        let mut widen = Channel::<WidenStage>::default();
        let mut hires_filter = Channel::<HiResFilterStage>::default();
        let mut level = Channel::<LevelStage>::default();
        let mut hires_level = Channel::<HiResLevelStage>::default();

        let mut traces = Traces::with_capacity(input.len());
        for &x in input {
            let filtered = filter.push(x);
            let hires = widen.push(x);
            let hires_filtered = hires_filter.push(hires);
            traces.input.push(x);
            traces.filtered.push(filtered);
            traces.hires.push(hires);
            traces.hires_filtered.push(hires_filtered);
            traces.hysteresis.push(level.push(filtered));
            traces.hires_hysteresis.push(hires_level.push(hires_filtered));
        }
        debug!("demo bench processed {} samples", filter.samples());
        Ok(traces)
    }
}

/// The six output columns of one bench run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Traces {
    pub input: Vec<u16>,
    pub filtered: Vec<u16>,
    pub hires: Vec<u16>,
    pub hires_filtered: Vec<u16>,
    pub hysteresis: Vec<u16>,
    pub hires_hysteresis: Vec<u16>,
}

/// Convergence figures of one trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceSummary {
    pub name: &'static str,
    pub final_value: Option<u16>,
    /// First index from which every sample stays within the tolerance of
    /// the final value.
    pub settled_at: Option<usize>,
    /// Number of samples that differ from their predecessor.
    pub changes: usize,
}

impl Traces {
    fn with_capacity(n: usize) -> Self {
        Self {
            input: Vec::with_capacity(n),
            filtered: Vec::with_capacity(n),
            hires: Vec::with_capacity(n),
            hires_filtered: Vec::with_capacity(n),
            hysteresis: Vec::with_capacity(n),
            hires_hysteresis: Vec::with_capacity(n),
        }
    }

    #[inline] pub fn len(&self) -> usize { self.input.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.input.is_empty() }

    /// Columns in [`COLUMNS`] order.
    pub fn columns(&self) -> [&[u16]; 6] {
        [
            &self.input,
            &self.filtered,
            &self.hires,
            &self.hires_filtered,
            &self.hysteresis,
            &self.hires_hysteresis,
        ]
    }

    /// Sample `i` of every column.
    pub fn row(&self, i: usize) -> Option<[u16; 6]> {
        if i >= self.len() {
            return None;
        }
        Some(self.columns().map(|c| c[i]))
    }

    /// Settling index and change count of every column. `tolerance` is
    /// applied to the 10-bit columns and scaled by 64 for the 16-bit ones.
    pub fn summary(&self, tolerance: u16) -> Vec<TraceSummary> {
        let wide = tolerance.saturating_mul(1 << (HIRES_BITS - ADC_BITS));
        COLUMNS
            .iter()
            .zip(self.columns())
            .map(|(&name, column)| {
                let tol = if name.starts_with("hires") && name != "hires_hysteresis" { wide } else { tolerance };
                summarize(name, column, tol)
            })
            .collect()
    }
}

fn summarize(name: &'static str, column: &[u16], tol: u16) -> TraceSummary {
    let final_value = column.last().copied();
    let settled_at = final_value.map(|last| {
        column
            .iter()
            .rposition(|&v| v.abs_diff(last) > tol)
            .map_or(0, |i| i + 1)
    });
    let changes = column.windows(2).filter(|w| w[0] != w[1]).count();
    TraceSummary { name, final_value, settled_at, changes }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalConfig;

    fn bench() -> DemoBench {
        DemoBench::new(ADC_BITS).unwrap()
    }

    #[test]
    fn chains_validate_for_ten_bit_input() {
        let b = bench();
        assert_eq!(b.adc_bits(), 10);
        assert_eq!(b.chains().len(), 5);
        let levels = &b.chains()[3];
        assert_eq!(levels[2], Width::new("hysteresis", 10, 7));
    }

    #[test]
    fn other_adc_widths_are_rejected() {
        let err = DemoBench::new(12).unwrap_err();
        assert_eq!(
            err,
            PipelineError::WidthMismatch { from: "adc", to: "ema", produced: 12, expected: 10 }
        );
    }

    #[test]
    fn out_of_range_samples_are_rejected() {
        let err = bench().run(&[0, 5, 1024, 3]).unwrap_err();
        assert_eq!(err, PipelineError::SampleRange { index: 2, value: 1024, bits: 10 });
    }

    #[test]
    fn noiseless_step_settles_on_every_trace() {
        let input = SignalConfig { noise_stddev: 0.0, seed: Some(0), ..SignalConfig::default() }
            .generate()
            .unwrap();
        let t = bench().run(&input).unwrap();
        assert_eq!(t.len(), 1024);
        assert_eq!(*t.filtered.last().unwrap(), 1000);
        let hires_target = increase_bit_depth::<10, 16, u16, _>(1000u16);
        assert_eq!(*t.hires.last().unwrap(), hires_target);
        assert_eq!(*t.hires_filtered.last().unwrap(), hires_target);
        assert!(t.hysteresis.last().unwrap().abs_diff(1000) <= 16);
        assert!(t.hires_hysteresis.last().unwrap().abs_diff(1000) <= 1);
        assert!(t.filtered.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn hysteresis_suppresses_chatter() {
        let input = SignalConfig { seed: Some(11), noise_stddev: 2.0, ..SignalConfig::default() }
            .generate()
            .unwrap();
        let t = bench().run(&input).unwrap();
        let s = t.summary(2);
        let by_name = |n: &str| s.iter().find(|x| x.name == n).unwrap().clone();
        assert!(by_name("hysteresis").changes < by_name("filtered").changes);
        assert!(by_name("filtered").changes < by_name("input").changes);
        // Once the ramp is over the level stops moving.
        let tail_changes = t.hysteresis[700..].windows(2).filter(|w| w[0] != w[1]).count();
        assert!(tail_changes <= 2, "tail_changes={tail_changes}");
    }

    #[test]
    fn rows_follow_column_order() {
        let t = bench().run(&[1023, 0]).unwrap();
        let row = t.row(0).unwrap();
        assert_eq!(row[0], 1023);
        assert_eq!(row[2], 0xFFFF);
        assert_eq!(t.row(2), None);
    }

    #[test]
    fn summary_of_constant_trace() {
        let s = summarize("x", &[0, 4, 8, 8, 9, 8], 1);
        assert_eq!(s.final_value, Some(8));
        assert_eq!(s.settled_at, Some(2));
        assert_eq!(s.changes, 4);
        let empty = summarize("x", &[], 1);
        assert_eq!(empty.final_value, None);
        assert_eq!(empty.settled_at, None);
    }
}

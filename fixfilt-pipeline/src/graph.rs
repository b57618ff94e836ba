//! Per-channel processing core.
//!
//! A [`Channel`] owns the stage chain of one logical signal (one ADC input)
//! and pushes samples through it one at a time. It is generic over the chain
//! type, so channels with different pipelines never go through trait objects.
//!
//! Design goals
//! - No dynamic allocations per sample (only [`Channel::render`] allocates
//!   its output buffer)
//! - One owner per channel; distinct channels share nothing and may live on
//!   different threads

use fixfilt_core::stage::Stage;
use log::{debug, trace};

/// One logical signal channel and the stage chain it runs.
#[derive(Clone, Debug)]
pub struct Channel<S: Stage> {
    stage: S,
    samples: u64,
    last: Option<S::Output>,
}

impl<S: Stage> Channel<S> {
    /// Take ownership of an already-built stage chain.
    #[inline]
    pub fn new(stage: S) -> Self {
        Self { stage, samples: 0, last: None }
    }

    /// Process one sample.
    #[inline]
    pub fn push(&mut self, sample: S::Input) -> S::Output {
        let out = self.stage.process(sample);
        self.samples += 1;
        self.last = Some(out);
        out
    }

    /// Process a block of samples into a new buffer.
    pub fn render(&mut self, input: &[S::Input]) -> Vec<S::Output> {
        let out: Vec<S::Output> = input.iter().map(|&x| self.push(x)).collect();
        trace!("channel rendered {} samples ({} total)", out.len(), self.samples);
        out
    }

    /// Most recent output, if any sample has been pushed.
    #[inline] pub fn last(&self) -> Option<S::Output> { self.last }

    /// Number of samples pushed since construction or the last reset.
    #[inline] pub fn samples(&self) -> u64 { self.samples }

    #[inline] pub fn stage(&self) -> &S { &self.stage }

    /// Mutable access to the chain, e.g. to reset a single stage.
    #[inline] pub fn stage_mut(&mut self) -> &mut S { &mut self.stage }

    /// Replace the chain (and its state) with a fresh one.
    pub fn reset_with(&mut self, stage: S) {
        debug!("channel reset after {} samples", self.samples);
        self.stage = stage;
        self.samples = 0;
        self.last = None;
    }

    #[inline] pub fn into_inner(self) -> S { self.stage }
}

impl<S: Stage + Default> Default for Channel<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

// ------------------------------------ Tests --------------------------------------

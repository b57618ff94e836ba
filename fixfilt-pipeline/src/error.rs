//! Errors raised while assembling or feeding a pipeline.
//!
//! The primitives themselves never fail at runtime; everything here is a
//! configuration problem caught before (or instead of) silent wraparound.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("stage `{to}` expects {expected}-bit input but `{from}` produces {produced} bits")]
    WidthMismatch {
        from: &'static str,
        to: &'static str,
        produced: u32,
        expected: u32,
    },

    #[error("stage `{stage}` needs {needed} bits of accumulator but its type has {available}")]
    Headroom {
        stage: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("stage `{stage}` emits {needed}-bit levels but its output type has {available} bits")]
    LevelWidth {
        stage: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("sample #{index} = {value} does not fit in {bits} bits")]
    SampleRange { index: usize, value: u64, bits: u32 },

    #[error("invalid signal configuration: {0}")]
    InvalidSignal(&'static str),
}

pub type Result<T, E = PipelineError> = core::result::Result<T, E>;

//! fixfilt pipeline: host-side composition of the fixed-point primitives.
//!
//! Crate layout:
//! - [`graph`]   : `Channel<S>`, the owner of one signal's stage chain
//! - [`width`]   : declared bit widths and construction-time checks
//! - [`signal`]  : synthetic step + Gaussian noise ADC signal
//! - [`presets`] : the demo bench producing the six comparison traces
//! - [`error`]   : `PipelineError`
//!
//! The per-sample work stays in `fixfilt-core`; this crate adds the
//! allocation, validation and logging that only make sense on a host.

pub mod error;
pub mod graph;
pub mod presets;
pub mod signal;
pub mod width;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use error::PipelineError;
pub use graph::Channel;
pub use presets::{DemoBench, TraceSummary, Traces, COLUMNS};
pub use signal::SignalConfig;
pub use width::{check_chain, Width};

#[cfg(test)]
mod smoke {
    use super::*;

    #[test]
    fn seeded_demo_runs_end_to_end() {
        let input = SignalConfig { seed: Some(5), ..SignalConfig::default() }
            .generate()
            .unwrap();
        let traces = DemoBench::new(10).unwrap().run(&input).unwrap();
        assert_eq!(traces.len(), input.len());
        assert_eq!(traces.summary(1).len(), COLUMNS.len());
    }
}

//! Whole-pass timing hooks
//!
//! Timings are taken around complete passes only, never per sample.
//! `web_time::Instant` is `std::time::Instant` on native targets and
//! `performance.now()` under wasm.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

/// Stages of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Decode,
    ModalityTransform,
    RangeScan,
    Rasterize,
}

impl Pass {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::ModalityTransform => "modality transform",
            Self::RangeScan => "range scan",
            Self::Rasterize => "rasterize",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver for pass durations
pub trait TimingSink {
    fn record(&mut self, pass: Pass, elapsed: Duration);
}

/// Run `f` and report its duration to `sink`, if any
pub(crate) fn timed<R>(sink: &mut Option<&mut dyn TimingSink>, pass: Pass, f: impl FnOnce() -> R) -> R {
    let Some(sink) = sink.as_deref_mut() else {
        return f();
    };
    let start = Instant::now();
    let result = f();
    sink.record(pass, start.elapsed());
    result
}

/// Collects pass durations in the order they ran
#[derive(Debug, Clone, Default)]
pub struct PassTimings {
    steps: Vec<(Pass, Duration)>,
}

impl PassTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn steps(&self) -> &[(Pass, Duration)] {
        &self.steps
    }

    /// Total time spent in `pass`
    #[must_use]
    pub fn get(&self, pass: Pass) -> Option<Duration> {
        self.steps
            .iter()
            .filter(|(p, _)| *p == pass)
            .map(|(_, d)| *d)
            .reduce(|a, b| a + b)
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }
}

impl TimingSink for PassTimings {
    fn record(&mut self, pass: Pass, elapsed: Duration) {
        self.steps.push((pass, elapsed));
    }
}

impl fmt::Display for PassTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        for (pass, duration) in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                duration.as_secs_f64() / total.as_secs_f64() * 100.0
            } else {
                0.0
            };
            writeln!(
                f,
                "{:<20} {:>10.3}ms ({:>5.1}%)",
                pass.name(),
                duration.as_secs_f64() * 1000.0,
                percentage
            )?;
        }
        write!(f, "{:<20} {:>10.3}ms", "total", total.as_secs_f64() * 1000.0)
    }
}

/// Forwards pass durations to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TimingSink for TracingSink {
    fn record(&mut self, pass: Pass, elapsed: Duration) {
        tracing::debug!(pass = pass.name(), elapsed_us = elapsed.as_micros() as u64, "pass finished");
    }
}

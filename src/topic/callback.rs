//! Per-iteration reporting.
//!
//! The training loop never prints. It hands one [`IterationRecord`] per
//! iteration, in order, to a [`TrainingCallback`].

use serde::Serialize;
use std::io::Write;

/// What one EM iteration produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationRecord {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Log-likelihood after the M-step.
    pub log_likelihood: f64,
    /// Normalizations in this iteration whose divisor was exactly zero.
    pub degenerate_normalizations: usize,
}

impl IterationRecord {
    /// True if the parameters have degenerated (zero divisors or a
    /// non-finite likelihood).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate_normalizations > 0 || !self.log_likelihood.is_finite()
    }
}

/// Receives iteration records during training.
///
/// Closures taking `&IterationRecord` implement this trait.
///
/// # Examples
///
/// ```
/// use plsa::topic::{IterationRecord, TrainingCallback};
///
/// let mut seen = Vec::new();
/// let mut sink = |r: &IterationRecord| seen.push(r.iteration);
/// sink.on_iteration(&IterationRecord {
///     iteration: 0,
///     log_likelihood: -3.2,
///     degenerate_normalizations: 0,
/// });
/// assert_eq!(seen, vec![0]);
/// ```
pub trait TrainingCallback {
    /// Called once per iteration, after the likelihood is computed.
    fn on_iteration(&mut self, record: &IterationRecord);

    /// Called after [`on_iteration`](Self::on_iteration) when the record is
    /// degenerate. Training continues regardless.
    fn on_degeneracy(&mut self, _record: &IterationRecord) {}
}

impl<F: FnMut(&IterationRecord)> TrainingCallback for F {
    fn on_iteration(&mut self, record: &IterationRecord) {
        self(record);
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallback;

impl TrainingCallback for NoopCallback {
    fn on_iteration(&mut self, _record: &IterationRecord) {}
}

/// Collects records in memory.
#[derive(Debug, Clone, Default)]
pub struct HistoryCallback {
    records: Vec<IterationRecord>,
    degenerate: usize,
}

impl HistoryCallback {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far.
    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Log-likelihood sequence.
    #[must_use]
    pub fn log_likelihoods(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.log_likelihood).collect()
    }

    /// Number of degeneracy notifications received.
    #[must_use]
    pub fn degenerate_iterations(&self) -> usize {
        self.degenerate
    }
}

impl TrainingCallback for HistoryCallback {
    fn on_iteration(&mut self, record: &IterationRecord) {
        self.records.push(*record);
    }

    fn on_degeneracy(&mut self, _record: &IterationRecord) {
        self.degenerate += 1;
    }
}

/// Writes one text line per iteration: `[it]\tlikelihood: L`.
///
/// Degenerate iterations get an extra `[warn]` line. The first write error is
/// kept and later writes are skipped.
#[derive(Debug)]
pub struct WriterReporter<W: Write> {
    writer: W,
    error: Option<std::io::Error>,
}

impl<W: Write> WriterReporter<W> {
    /// Report to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Take the first write error, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_fmt(args).and_then(|()| self.writer.write_all(b"\n")) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> TrainingCallback for WriterReporter<W> {
    fn on_iteration(&mut self, record: &IterationRecord) {
        self.emit(format_args!(
            "[{}]\tlikelihood: {}",
            record.iteration, record.log_likelihood
        ));
    }

    fn on_degeneracy(&mut self, record: &IterationRecord) {
        self.emit(format_args!(
            "[warn] iteration {}: {} zero-divisor normalization(s), parameters degenerated",
            record.iteration, record.degenerate_normalizations
        ));
    }
}

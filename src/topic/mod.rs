//! Topic modeling with Probabilistic Latent Semantic Analysis (PLSA).
//!
//! PLSA explains each observed (document, word) occurrence as coming from a
//! latent topic z:
//!
//! ```text
//! P(d, w) = Σ_z P(z) P(d|z) P(w|z)
//! ```
//!
//! and fits the three tables with Expectation-Maximization:
//!
//! 1. Build the word → occurrence [`InvertedIndex`] once
//! 2. Draw a random normalized starting point ([`ParameterStore::initialize`])
//! 3. Repeat a fixed number of times: [`e_step`], [`m_step`], [`log_likelihood`]
//!
//! Each iteration is reported to a [`TrainingCallback`]. Zero divisors during
//! normalization are not errors. They surface as
//! [`IterationRecord::degenerate_normalizations`] and the run continues.
//!
//! # Quick Start
//!
//! ```
//! use plsa::data::{Dataset, Document};
//! use plsa::topic::{HistoryCallback, Plsa};
//!
//! let dataset = Dataset::from_documents(vec![
//!     Document::from_pairs(&[(0, 2.0), (1, 1.0)]),
//!     Document::from_pairs(&[(1, 1.0), (2, 3.0)]),
//! ]);
//!
//! let mut history = HistoryCallback::new();
//! let model = Plsa::new(2)
//!     .with_iterations(10)
//!     .with_random_seed(42)
//!     .fit(&dataset, &mut history)
//!     .expect("fit should succeed");
//!
//! assert_eq!(history.records().len(), 10);
//! assert_eq!(model.word_given_topic().shape(), (2, 3));
//! ```

mod callback;
mod config;
mod context;
mod estep;
mod index;
mod likelihood;
mod mstep;
mod params;

pub use callback::{HistoryCallback, IterationRecord, NoopCallback, TrainingCallback, WriterReporter};
pub use config::PlsaConfig;
pub use context::TrainingContext;
pub use estep::e_step;
pub use index::{InvertedIndex, Posting};
pub use likelihood::log_likelihood;
pub use mstep::m_step;
pub use params::{ParameterStore, Posterior};

use crate::data::Dataset;
use crate::error::Result;
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop signal, checked between EM iterations.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that training stop before its next iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// PLSA estimator.
///
/// # Examples
///
/// ```
/// use plsa::topic::Plsa;
///
/// let plsa = Plsa::new(5).with_iterations(50).with_random_seed(123);
/// assert_eq!(plsa.config().n_topics, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Plsa {
    config: PlsaConfig,
    cancel: Option<CancellationToken>,
}

impl Plsa {
    /// Create an estimator with `n_topics` topics and default settings.
    #[must_use]
    pub fn new(n_topics: usize) -> Self {
        Self::from_config(PlsaConfig::new(n_topics))
    }

    /// Create an estimator from a full configuration.
    #[must_use]
    pub fn from_config(config: PlsaConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Set number of EM iterations.
    #[must_use]
    pub fn with_iterations(mut self, n_iterations: usize) -> Self {
        self.config.n_iterations = n_iterations;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PlsaConfig {
        &self.config
    }

    /// Fit the model to `dataset`, reporting every iteration to `callback`.
    ///
    /// Runs exactly `n_iterations` EM rounds unless cancelled. A plateau or a
    /// non-finite likelihood does not stop training.
    ///
    /// # Errors
    ///
    /// Returns a dataset error (empty dataset, dimension outside the
    /// vocabulary) or [`PlsaError::InvalidParameters`](crate::error::PlsaError)
    /// before any parameter is allocated.
    pub fn fit<C: TrainingCallback + ?Sized>(
        &self,
        dataset: &Dataset,
        callback: &mut C,
    ) -> Result<PlsaModel> {
        self.config.validate()?;
        let ctx = TrainingContext::new(dataset, self.config.n_topics)?;

        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        let mut params = ParameterStore::initialize(&ctx, &mut rng)?;

        let mut history = Vec::with_capacity(self.config.n_iterations);
        let mut cancelled = false;

        for iteration in 0..self.config.n_iterations {
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                cancelled = true;
                break;
            }

            let mut degenerate = e_step(&ctx, &mut params);
            degenerate += m_step(&ctx, &mut params);

            let record = IterationRecord {
                iteration,
                log_likelihood: log_likelihood(&ctx, &params),
                degenerate_normalizations: degenerate,
            };
            callback.on_iteration(&record);
            if record.is_degenerate() {
                callback.on_degeneracy(&record);
            }
            history.push(record);
        }

        Ok(PlsaModel {
            params,
            history,
            cancelled,
        })
    }
}

/// A fitted PLSA model.
#[derive(Debug, Clone)]
pub struct PlsaModel {
    params: ParameterStore,
    history: Vec<IterationRecord>,
    cancelled: bool,
}

impl PlsaModel {
    /// P(z).
    #[must_use]
    pub fn topic_prior(&self) -> &[f64] {
        &self.params.topic_prior
    }

    /// P(d|z), K × M.
    #[must_use]
    pub fn doc_given_topic(&self) -> &Matrix<f64> {
        &self.params.doc_given_topic
    }

    /// P(w|z), K × V.
    #[must_use]
    pub fn word_given_topic(&self) -> &Matrix<f64> {
        &self.params.word_given_topic
    }

    /// P(z | doc, position) from the last E-step.
    #[must_use]
    pub fn posterior(&self, doc: usize, position: usize) -> &[f64] {
        self.params.posterior.occurrence(doc, position)
    }

    /// All parameter tables.
    #[must_use]
    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    /// Consume the model, keeping only its parameters.
    #[must_use]
    pub fn into_parameters(self) -> ParameterStore {
        self.params
    }

    /// K.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.params.n_topics()
    }

    /// One record per completed iteration.
    #[must_use]
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Number of EM iterations actually run.
    #[must_use]
    pub fn iterations_completed(&self) -> usize {
        self.history.len()
    }

    /// Whether training stopped early on a cancellation request.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Log-likelihood after the last iteration.
    #[must_use]
    pub fn final_log_likelihood(&self) -> Option<f64> {
        self.history.last().map(|r| r.log_likelihood)
    }

    /// P(z|d) for every document, M × K.
    ///
    /// Computed as P(z) P(d|z) normalized per document. A document with no
    /// mass under any topic gets a uniform row.
    #[must_use]
    pub fn document_topics(&self) -> Matrix<f64> {
        let k = self.n_topics();
        let m = self.params.doc_given_topic.n_cols();
        let mut out = Matrix::zeros(m, k);

        for d in 0..m {
            let row = out.row_mut(d);
            for (z, slot) in row.iter_mut().enumerate() {
                *slot = self.params.topic_prior[z] * self.params.doc_given_topic.get(z, d);
            }
            let norm: f64 = row.iter().sum();
            if norm > 0.0 {
                row.iter_mut().for_each(|p| *p /= norm);
            } else {
                row.fill(1.0 / k as f64);
            }
        }
        out
    }

    /// Top `n_words` dimensions of each topic by P(w|z), descending.
    #[must_use]
    pub fn top_words(&self, n_words: usize) -> Vec<Vec<(usize, f64)>> {
        self.params
            .word_given_topic
            .rows()
            .map(|row| {
                let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
                scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
                scored.truncate(n_words);
                scored
            })
            .collect()
    }
}

/// Fit a PLSA model with an explicit seed, reporting to `callback`.
///
/// # Errors
///
/// See [`Plsa::fit`].
pub fn train<C: TrainingCallback + ?Sized>(
    dataset: &Dataset,
    n_topics: usize,
    n_iterations: usize,
    random_seed: u64,
    callback: &mut C,
) -> Result<PlsaModel> {
    Plsa::new(n_topics)
        .with_iterations(n_iterations)
        .with_random_seed(random_seed)
        .fit(dataset, callback)
}

/// Load a dataset from `source` and train on it.
///
/// # Errors
///
/// Returns [`PlsaError::SourceNotFound`](crate::error::PlsaError) and other
/// dataset errors from the loader, or any error from [`Plsa::fit`].
pub fn run_with<C: TrainingCallback + ?Sized>(
    source: impl AsRef<Path>,
    config: &PlsaConfig,
    callback: &mut C,
) -> Result<PlsaModel> {
    config.validate()?;
    let dataset = Dataset::from_path(source)?;
    Plsa::from_config(config.clone()).fit(&dataset, callback)
}

/// Train on the dataset file at `source`, printing one
/// `[it]\tlikelihood: L` line per iteration to stdout.
///
/// Returns `false` if the source or parameters are invalid, or if a report
/// line could not be written; otherwise `true` once the last iteration has
/// been reported, even if the parameters degenerated along the way.
pub fn run(source: impl AsRef<Path>, n_topics: usize, n_iterations: usize) -> bool {
    let config = PlsaConfig::new(n_topics).with_iterations(n_iterations);
    run_to_writer(source, &config, std::io::stdout().lock())
}

fn run_to_writer<W: std::io::Write>(
    source: impl AsRef<Path>,
    config: &PlsaConfig,
    writer: W,
) -> bool {
    let mut reporter = WriterReporter::new(writer);
    let trained = run_with(source, config, &mut reporter).is_ok();
    trained && reporter.take_error().is_none()
}


#[cfg(test)]
mod plsa_contract_falsify;

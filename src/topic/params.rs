//! Probability tables and their random initialization.

use super::context::TrainingContext;
use crate::data::Dataset;
use crate::error::{PlsaError, Result};
use crate::primitives::Matrix;
use rand::Rng;

/// P(z | d, w) for every observed occurrence.
///
/// Stored as one flat buffer: the K responsibilities of an occurrence are
/// contiguous, and occurrences are laid out document by document. `offsets[m]`
/// is the number of occurrences before document `m`, so the table is sized
/// once from the dataset and never reallocated.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    values: Vec<f64>,
    offsets: Vec<usize>,
    n_topics: usize,
}

impl Posterior {
    /// Allocate a zeroed table shaped for `dataset` with `n_topics` topics.
    ///
    /// # Panics
    ///
    /// Panics if the table cannot be allocated; [`TrainingContext::new`]
    /// rejects such sizes up front.
    #[must_use]
    pub fn new(dataset: &Dataset, n_topics: usize) -> Self {
        let mut offsets = Vec::with_capacity(dataset.n_documents() + 1);
        let mut total = 0;
        offsets.push(0);
        for doc in dataset.documents() {
            total += doc.len();
            offsets.push(total);
        }
        Self {
            values: vec![0.0; total.checked_mul(n_topics).unwrap_or(usize::MAX)],
            offsets,
            n_topics,
        }
    }

    /// K responsibilities of occurrence `(doc, position)`.
    #[must_use]
    pub fn occurrence(&self, doc: usize, position: usize) -> &[f64] {
        let start = (self.offsets[doc] + position) * self.n_topics;
        &self.values[start..start + self.n_topics]
    }

    /// P(z | doc, position).
    #[must_use]
    pub fn get(&self, topic: usize, doc: usize, position: usize) -> f64 {
        self.values[(self.offsets[doc] + position) * self.n_topics + topic]
    }

    /// All responsibilities of document `doc`, occurrence-major.
    #[must_use]
    pub fn document(&self, doc: usize) -> &[f64] {
        &self.values[self.offsets[doc] * self.n_topics..self.offsets[doc + 1] * self.n_topics]
    }

    /// Disjoint mutable slices, one per document.
    pub fn documents_mut(&mut self) -> Vec<&mut [f64]> {
        let k = self.n_topics;
        let mut rest: &mut [f64] = &mut self.values;
        let mut slices = Vec::with_capacity(self.offsets.len().saturating_sub(1));
        for bounds in self.offsets.windows(2) {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut((bounds[1] - bounds[0]) * k);
            slices.push(head);
            rest = tail;
        }
        slices
    }

    /// Number of occurrences covered.
    #[must_use]
    pub fn n_occurrences(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Number of topics.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    /// Raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// The PLSA parameters: P(z), P(d|z), P(w|z) and the E-step posteriors.
///
/// Allocated once and updated in place every iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    /// P(z), length K.
    pub topic_prior: Vec<f64>,
    /// P(d | z), K × M.
    pub doc_given_topic: Matrix<f64>,
    /// P(w | z), K × V.
    pub word_given_topic: Matrix<f64>,
    /// P(z | d, w), one K-vector per occurrence.
    pub posterior: Posterior,
}

impl ParameterStore {
    /// Initialize parameters for the model described by `ctx`.
    ///
    /// The topic prior is uniform. Each row of P(d|z) and P(w|z) is filled
    /// with draws from (0, 1] and normalized. All P(d|z) rows are drawn
    /// before any P(w|z) row, so a given seed fixes the whole starting point.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::InvalidParameters`] if K, M or V is zero.
    pub fn initialize<R: Rng + ?Sized>(ctx: &TrainingContext<'_>, rng: &mut R) -> Result<Self> {
        let (k, m, v) = (ctx.n_topics(), ctx.n_documents(), ctx.vocab_size());
        if k == 0 {
            return Err(PlsaError::invalid_parameter("n_topics", k, ">= 1"));
        }
        if m == 0 {
            return Err(PlsaError::invalid_parameter("n_documents", m, ">= 1"));
        }
        if v == 0 {
            return Err(PlsaError::invalid_parameter("vocab_size", v, ">= 1"));
        }

        let topic_prior = vec![1.0 / k as f64; k];

        let mut doc_given_topic = Matrix::zeros(k, m);
        for z in 0..k {
            fill_normalized(doc_given_topic.row_mut(z), rng);
        }

        let mut word_given_topic = Matrix::zeros(k, v);
        for z in 0..k {
            fill_normalized(word_given_topic.row_mut(z), rng);
        }

        Ok(Self {
            topic_prior,
            doc_given_topic,
            word_given_topic,
            posterior: Posterior::new(ctx.dataset(), k),
        })
    }

    /// K.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.topic_prior.len()
    }
}

fn fill_normalized<R: Rng + ?Sized>(row: &mut [f64], rng: &mut R) {
    // gen() is [0, 1); flip it so no entry starts at exactly zero
    for x in row.iter_mut() {
        *x = 1.0 - rng.gen::<f64>();
    }
    let norm: f64 = row.iter().sum();
    for x in row.iter_mut() {
        *x /= norm;
    }
}

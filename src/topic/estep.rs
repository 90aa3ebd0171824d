//! E-step: posterior topic responsibilities per occurrence.
//!
//! ```text
//! P(z | d, w) = P(z) P(d|z) P(w|z) / Σ_z' P(z') P(d|z') P(w|z')
//! ```

use super::context::TrainingContext;
use super::params::ParameterStore;
use crate::data::Document;
use crate::primitives::Matrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Recompute every posterior from the current P(z), P(d|z), P(w|z).
///
/// Returns the number of occurrences whose normalizer was exactly zero. Those
/// occurrences are still divided through and end up NaN.
pub fn e_step(ctx: &TrainingContext<'_>, params: &mut ParameterStore) -> usize {
    let ParameterStore {
        topic_prior,
        doc_given_topic,
        word_given_topic,
        posterior,
    } = params;
    let topic_prior: &[f64] = topic_prior;
    let doc_given_topic: &Matrix<f64> = doc_given_topic;
    let word_given_topic: &Matrix<f64> = word_given_topic;
    let documents = ctx.dataset().documents();

    #[cfg(feature = "parallel")]
    let degenerate: usize = posterior
        .documents_mut()
        .into_par_iter()
        .enumerate()
        .map(|(m, out)| {
            document_posterior(
                &documents[m],
                m,
                topic_prior,
                doc_given_topic,
                word_given_topic,
                out,
            )
        })
        .sum();

    #[cfg(not(feature = "parallel"))]
    let degenerate: usize = posterior
        .documents_mut()
        .into_iter()
        .enumerate()
        .map(|(m, out)| {
            document_posterior(
                &documents[m],
                m,
                topic_prior,
                doc_given_topic,
                word_given_topic,
                out,
            )
        })
        .sum();

    degenerate
}

fn document_posterior(
    document: &Document,
    m: usize,
    topic_prior: &[f64],
    doc_given_topic: &Matrix<f64>,
    word_given_topic: &Matrix<f64>,
    out: &mut [f64],
) -> usize {
    let k = topic_prior.len();
    let mut degenerate = 0;

    for (feature, resp) in document.features().iter().zip(out.chunks_exact_mut(k)) {
        let mut norm = 0.0;
        for (z, r) in resp.iter_mut().enumerate() {
            let val = topic_prior[z] * doc_given_topic.get(z, m) * word_given_topic.get(z, feature.dim);
            *r = val;
            norm += val;
        }

        if norm == 0.0 {
            degenerate += 1;
        }
        for r in resp.iter_mut() {
            *r /= norm;
        }
    }

    degenerate
}

//! M-step: re-estimate P(w|z), P(d|z) and P(z) from the posteriors.
//!
//! ```text
//! P(w|z) ∝ Σ_{(d,p) ∈ postings(w)} n(d,p) P(z|d,p)
//! P(d|z) ∝ Σ_{p ∈ d}               n(d,p) P(z|d,p)
//! P(z)   ∝ Σ_d Σ_{p ∈ d}           n(d,p) P(z|d,p)
//! ```
//!
//! Each topic row is computed and normalized independently, so with the
//! `parallel` feature rows are distributed across workers. The topic prior
//! waits until every document row has reported its unnormalized mass.

use super::context::TrainingContext;
use super::params::{ParameterStore, Posterior};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Update all three probability tables in place, in the order
/// P(w|z), P(d|z), P(z).
///
/// Returns the number of normalization points whose divisor was exactly
/// zero; the affected entries are left NaN or infinite.
pub fn m_step(ctx: &TrainingContext<'_>, params: &mut ParameterStore) -> usize {
    let ParameterStore {
        topic_prior,
        doc_given_topic,
        word_given_topic,
        posterior,
    } = params;
    let posterior: &Posterior = posterior;
    let v = ctx.vocab_size();
    let m = ctx.n_documents();

    #[cfg(feature = "parallel")]
    let word_degenerate: usize = word_given_topic
        .as_mut_slice()
        .par_chunks_mut(v)
        .enumerate()
        .map(|(z, row)| word_row(ctx, posterior, z, row))
        .sum();

    #[cfg(not(feature = "parallel"))]
    let word_degenerate: usize = word_given_topic
        .as_mut_slice()
        .chunks_mut(v)
        .enumerate()
        .map(|(z, row)| word_row(ctx, posterior, z, row))
        .sum();

    #[cfg(feature = "parallel")]
    let topic_mass: Vec<f64> = doc_given_topic
        .as_mut_slice()
        .par_chunks_mut(m)
        .enumerate()
        .map(|(z, row)| document_row(ctx, posterior, z, row))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let topic_mass: Vec<f64> = doc_given_topic
        .as_mut_slice()
        .chunks_mut(m)
        .enumerate()
        .map(|(z, row)| document_row(ctx, posterior, z, row))
        .collect();

    let doc_degenerate = topic_mass.iter().filter(|&&mass| mass == 0.0).count();

    topic_prior.copy_from_slice(&topic_mass);
    let prior_degenerate = usize::from(normalize(topic_prior) == 0.0);

    word_degenerate + doc_degenerate + prior_degenerate
}

/// Fill P(·|z) over words for one topic. Returns 1 if the row total was zero.
fn word_row(ctx: &TrainingContext<'_>, posterior: &Posterior, z: usize, row: &mut [f64]) -> usize {
    let index = ctx.index();
    for (w, slot) in row.iter_mut().enumerate() {
        *slot = index
            .postings(w)
            .iter()
            .map(|p| ctx.weight(p.doc, p.position) * posterior.get(z, p.doc, p.position))
            .sum();
    }
    usize::from(normalize(row) == 0.0)
}

/// Fill P(·|z) over documents for one topic and return the row's mass before
/// normalization.
fn document_row(ctx: &TrainingContext<'_>, posterior: &Posterior, z: usize, row: &mut [f64]) -> f64 {
    let k = posterior.n_topics();
    for (d, slot) in row.iter_mut().enumerate() {
        let document = ctx.dataset().document(d);
        *slot = document
            .features()
            .iter()
            .zip(posterior.document(d).chunks_exact(k))
            .map(|(f, resp)| f.weight * resp[z])
            .sum();
    }
    normalize(row)
}

/// Divide `values` by their sum and return that sum.
fn normalize(values: &mut [f64]) -> f64 {
    let norm: f64 = values.iter().sum();
    for x in values.iter_mut() {
        *x /= norm;
    }
    norm
}

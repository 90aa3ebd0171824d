//! Data log-likelihood under the current parameters.

use super::context::TrainingContext;
use super::params::ParameterStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `L = Σ_d Σ_p n(d,p) · ln Σ_z P(z) P(d|z) P(w|z)`.
///
/// Monitoring only. An occurrence whose mixture probability is zero drives
/// the result to `-inf` (or NaN), which signals degenerate parameters.
///
/// Per-document partial sums are added in document order, so the value does
/// not depend on the `parallel` feature.
#[must_use]
pub fn log_likelihood(ctx: &TrainingContext<'_>, params: &ParameterStore) -> f64 {
    let n_docs = ctx.n_documents();

    #[cfg(feature = "parallel")]
    let partials: Vec<f64> = (0..n_docs)
        .into_par_iter()
        .map(|m| document_log_likelihood(ctx, params, m))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let partials: Vec<f64> = (0..n_docs)
        .map(|m| document_log_likelihood(ctx, params, m))
        .collect();

    partials.iter().sum()
}

fn document_log_likelihood(ctx: &TrainingContext<'_>, params: &ParameterStore, m: usize) -> f64 {
    let k = params.n_topics();
    ctx.dataset()
        .document(m)
        .features()
        .iter()
        .map(|f| {
            let mixture: f64 = (0..k)
                .map(|z| {
                    params.topic_prior[z]
                        * params.doc_given_topic.get(z, m)
                        * params.word_given_topic.get(z, f.dim)
                })
                .sum();
            f.weight * mixture.ln()
        })
        .sum()
}

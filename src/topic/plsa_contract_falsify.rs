//! PLSA contract falsification tests.
//!
//! Each test tries to break one probabilistic claim of the EM engine:
//!   - posteriors sum to 1 per occurrence after every E-step
//!   - P(z), P(d|z), P(w|z) rows sum to 1 after every M-step
//!   - every table stays non-negative on well-formed input
//!   - the log-likelihood never decreases
//!   - a fixed seed reproduces the run bit for bit
//!   - the inverted index covers every occurrence exactly once
//!   - the engine matches a plain sequential EM round exactly, whichever
//!     way the `parallel` feature is set

use super::*;
use crate::data::{Dataset, Document};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

const EPS: f64 = 1e-9;

fn make_dataset() -> Dataset {
    Dataset::from_documents(vec![
        Document::from_pairs(&[(0, 2.0), (1, 1.0), (4, 1.0)]),
        Document::from_pairs(&[(1, 1.0), (2, 3.0)]),
        Document::from_pairs(&[(3, 2.0), (4, 2.0), (0, 0.5)]),
        Document::from_pairs(&[(2, 1.0), (3, 1.0), (5, 4.0)]),
        Document::from_pairs(&[(5, 1.0), (5, 1.0), (1, 2.0)]),
    ])
}

fn setup(ds: &Dataset, k: usize, seed: u64) -> (TrainingContext<'_>, ParameterStore) {
    let ctx = TrainingContext::new(ds, k).expect("context");
    let params = ParameterStore::initialize(&ctx, &mut StdRng::seed_from_u64(seed)).expect("init");
    (ctx, params)
}

// ============================================================================
// FALSIFY-PLSA-001: Posterior simplex after every E-step
// ============================================================================

#[test]
fn falsify_plsa_001_posterior_simplex() {
    let ds = make_dataset();
    let (ctx, mut params) = setup(&ds, 3, 42);

    for it in 0..15 {
        e_step(&ctx, &mut params);
        for m in 0..ds.n_documents() {
            for p in 0..ds.document(m).len() {
                let resp = params.posterior.occurrence(m, p);
                let sum: f64 = resp.iter().sum();
                assert!(
                    (sum - 1.0).abs() < EPS,
                    "FALSIFIED PLSA-001: iteration {it} posterior({m},{p}) sums to {sum}"
                );
            }
        }
        m_step(&ctx, &mut params);
    }
}

// ============================================================================
// FALSIFY-PLSA-002: Parameter rows on the simplex after every M-step
// ============================================================================

#[test]
fn falsify_plsa_002_parameter_simplex() {
    let ds = make_dataset();
    let (ctx, mut params) = setup(&ds, 4, 7);

    for it in 0..15 {
        e_step(&ctx, &mut params);
        m_step(&ctx, &mut params);

        let prior: f64 = params.topic_prior.iter().sum();
        assert!((prior - 1.0).abs() < EPS, "FALSIFIED PLSA-002: iteration {it} P(z) sums to {prior}");
        for (z, sum) in params.doc_given_topic.row_sums().into_iter().enumerate() {
            assert!((sum - 1.0).abs() < EPS, "FALSIFIED PLSA-002: iteration {it} P(d|z={z}) sums to {sum}");
        }
        for (z, sum) in params.word_given_topic.row_sums().into_iter().enumerate() {
            assert!((sum - 1.0).abs() < EPS, "FALSIFIED PLSA-002: iteration {it} P(w|z={z}) sums to {sum}");
        }
    }
}

// ============================================================================
// FALSIFY-PLSA-003: Non-negativity
// ============================================================================

#[test]
fn falsify_plsa_003_non_negative() {
    let ds = make_dataset();
    let (ctx, mut params) = setup(&ds, 3, 99);

    for _ in 0..10 {
        e_step(&ctx, &mut params);
        m_step(&ctx, &mut params);
        let tables = [
            params.topic_prior.as_slice(),
            params.doc_given_topic.as_slice(),
            params.word_given_topic.as_slice(),
            params.posterior.as_slice(),
        ];
        for table in tables {
            for &x in table {
                assert!(x >= -EPS && x.is_finite(), "FALSIFIED PLSA-003: entry {x}");
            }
        }
    }
}

// ============================================================================
// FALSIFY-PLSA-004: EM never decreases the log-likelihood
// ============================================================================

#[test]
fn falsify_plsa_004_monotone_likelihood() {
    let ds = make_dataset();
    for seed in [1, 2, 3, 42] {
        let mut history = HistoryCallback::new();
        train(&ds, 3, 40, seed, &mut history).expect("fit");
        let ll = history.log_likelihoods();
        for pair in ll.windows(2) {
            assert!(
                pair[1] >= pair[0] - 1e-9 * pair[0].abs().max(1.0),
                "FALSIFIED PLSA-004: seed {seed} likelihood dropped {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ============================================================================
// FALSIFY-PLSA-005: Determinism under a fixed seed
// ============================================================================

#[test]
fn falsify_plsa_005_deterministic() {
    let ds = make_dataset();
    let mut h1 = HistoryCallback::new();
    let mut h2 = HistoryCallback::new();
    let a = train(&ds, 3, 20, 1234, &mut h1).expect("fit");
    let b = train(&ds, 3, 20, 1234, &mut h2).expect("fit");

    assert_eq!(a.parameters(), b.parameters(), "FALSIFIED PLSA-005: tables differ");
    let bits = |h: &HistoryCallback| h.log_likelihoods().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&h1), bits(&h2), "FALSIFIED PLSA-005: likelihoods differ");
}

// ============================================================================
// FALSIFY-PLSA-006: Inverted index completeness
// ============================================================================

#[test]
fn falsify_plsa_006_index_completeness() {
    let ds = make_dataset();
    let index = InvertedIndex::build(&ds).expect("index");
    assert_eq!(index.n_postings(), ds.total_occurrences(), "FALSIFIED PLSA-006: posting count");

    let mut seen = HashSet::new();
    for (_, list) in index.iter() {
        for p in list {
            assert!(seen.insert((p.doc, p.position)), "FALSIFIED PLSA-006: duplicate {p:?}");
        }
    }
    for m in 0..ds.n_documents() {
        for p in 0..ds.document(m).len() {
            assert!(seen.contains(&(m, p)), "FALSIFIED PLSA-006: ({m},{p}) missing");
        }
    }
}

// ============================================================================
// FALSIFY-PLSA-007: Empty documents stay well-defined
// ============================================================================

#[test]
fn falsify_plsa_007_empty_document() {
    let ds = Dataset::from_documents(vec![
        Document::from_pairs(&[(0, 1.0), (1, 2.0)]),
        Document::default(),
        Document::from_pairs(&[(2, 1.0), (1, 1.0)]),
    ]);
    let mut history = HistoryCallback::new();
    let model = train(&ds, 2, 10, 42, &mut history).expect("fit");

    assert_eq!(history.degenerate_iterations(), 0, "FALSIFIED PLSA-007: degenerate run");
    for z in 0..2 {
        assert!(model.doc_given_topic().get(z, 1).abs() < EPS);
        let sum: f64 = model.doc_given_topic().row(z).iter().sum();
        assert!((sum - 1.0).abs() < EPS, "FALSIFIED PLSA-007: P(d|z={z}) sums to {sum}");
    }
    assert!(model.final_log_likelihood().is_some_and(f64::is_finite));
}

// ============================================================================
// FALSIFY-PLSA-008: Engine equals a sequential EM round, bit for bit
// ============================================================================

/// One EM round written as straight loops over documents, without the
/// inverted index or any worker split. Returns the posterior buffer and the
/// log-likelihood after the update.
fn sequential_round(ds: &Dataset, params: &mut ParameterStore) -> (Vec<f64>, f64) {
    let k = params.n_topics();
    let (n_docs, v) = (ds.n_documents(), ds.vocab_size());

    let mut posterior = Vec::with_capacity(ds.total_occurrences() * k);
    for m in 0..n_docs {
        for f in ds.document(m).features() {
            let start = posterior.len();
            let mut norm = 0.0;
            for z in 0..k {
                let val = params.topic_prior[z]
                    * params.doc_given_topic.get(z, m)
                    * params.word_given_topic.get(z, f.dim);
                posterior.push(val);
                norm += val;
            }
            posterior[start..].iter_mut().for_each(|r| *r /= norm);
        }
    }

    let mut word = vec![vec![0.0; v]; k];
    let mut doc = vec![vec![0.0; n_docs]; k];
    let mut offset = 0;
    for m in 0..n_docs {
        for f in ds.document(m).features() {
            for z in 0..k {
                let contribution = f.weight * posterior[offset + z];
                word[z][f.dim] += contribution;
                doc[z][m] += contribution;
            }
            offset += k;
        }
    }

    let mut mass = vec![0.0; k];
    for z in 0..k {
        let word_norm: f64 = word[z].iter().sum();
        for w in 0..v {
            params.word_given_topic.set(z, w, word[z][w] / word_norm);
        }
        mass[z] = doc[z].iter().sum();
        for m in 0..n_docs {
            params.doc_given_topic.set(z, m, doc[z][m] / mass[z]);
        }
    }
    let prior_norm: f64 = mass.iter().sum();
    for z in 0..k {
        params.topic_prior[z] = mass[z] / prior_norm;
    }

    let mut likelihood = 0.0;
    for m in 0..n_docs {
        let partial: f64 = ds
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
            .sum();
        likelihood += partial;
    }

    (posterior, likelihood)
}

#[test]
fn falsify_plsa_008_matches_sequential_round() {
    let ds = make_dataset();
    let (ctx, mut params) = setup(&ds, 3, 99);
    let mut reference = params.clone();

    for it in 0..10 {
        e_step(&ctx, &mut params);
        m_step(&ctx, &mut params);
        let likelihood = log_likelihood(&ctx, &params);

        let (posterior, expected) = sequential_round(&ds, &mut reference);

        assert_eq!(
            params.posterior.as_slice(),
            posterior.as_slice(),
            "FALSIFIED PLSA-008: iteration {it} posterior differs"
        );
        assert_eq!(
            params.word_given_topic.as_slice(),
            reference.word_given_topic.as_slice(),
            "FALSIFIED PLSA-008: iteration {it} P(w|z) differs"
        );
        assert_eq!(
            params.doc_given_topic.as_slice(),
            reference.doc_given_topic.as_slice(),
            "FALSIFIED PLSA-008: iteration {it} P(d|z) differs"
        );
        assert_eq!(
            params.topic_prior, reference.topic_prior,
            "FALSIFIED PLSA-008: iteration {it} P(z) differs"
        );
        assert_eq!(
            likelihood.to_bits(),
            expected.to_bits(),
            "FALSIFIED PLSA-008: iteration {it} likelihood {likelihood} != {expected}"
        );
    }
}

//! PLSA: Probabilistic Latent Semantic Analysis in pure Rust.
//!
//! Fits a PLSA topic model to sparse weighted documents with
//! Expectation-Maximization. An inverted word index keeps the P(w|z) update
//! proportional to the number of occurrences. With the default `parallel`
//! feature, the E-step and M-step are spread over a rayon pool.
//!
//! # Quick Start
//!
//! ```
//! use plsa::prelude::*;
//!
//! let dataset = Dataset::from_documents(vec![
//!     Document::from_pairs(&[(0, 2.0), (1, 1.0)]),
//!     Document::from_pairs(&[(1, 1.0), (2, 3.0)]),
//! ]);
//!
//! let mut history = HistoryCallback::new();
//! let model = train(&dataset, 2, 20, 42, &mut history).expect("valid input");
//!
//! let prior: f64 = model.topic_prior().iter().sum();
//! assert!((prior - 1.0).abs() < 1e-9);
//! assert_eq!(history.records().len(), 20);
//! ```
//!
//! # Modules
//!
//! - [`data`]: Sparse documents, datasets and the text-format loader
//! - [`topic`]: Inverted index, parameter tables, EM stages and the trainer
//! - [`primitives`]: Dense row-major matrix backing the probability tables
//! - [`error`]: Error taxonomy

pub mod data;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod topic;

pub use error::{PlsaError, Result};
pub use topic::{run, run_with, train, Plsa, PlsaConfig, PlsaModel};

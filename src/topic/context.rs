//! Immutable inputs shared by every EM stage.

use super::index::InvertedIndex;
use crate::data::Dataset;
use crate::error::{PlsaError, Result};

/// Everything an EM stage reads but never writes: the dataset, its inverted
/// index and the model dimensions.
///
/// Constructing a context performs all up-front validation, so a context that
/// exists always has `n_topics >= 1`, at least one document, a non-empty
/// vocabulary and every dimension inside that vocabulary.
#[derive(Debug)]
pub struct TrainingContext<'a> {
    dataset: &'a Dataset,
    index: InvertedIndex,
    n_topics: usize,
}

impl<'a> TrainingContext<'a> {
    /// Validate the inputs and build the inverted index.
    ///
    /// # Errors
    ///
    /// - [`PlsaError::EmptyDataset`] if the dataset has no documents
    /// - [`PlsaError::InvalidParameters`] if `n_topics < 1`, the vocabulary is
    ///   empty, or a K-row parameter table would not fit in memory
    /// - [`PlsaError::InvalidDataset`] if a dimension falls outside the vocabulary
    pub fn new(dataset: &'a Dataset, n_topics: usize) -> Result<Self> {
        if dataset.is_empty() {
            return Err(PlsaError::empty_dataset("dataset has no documents"));
        }
        if n_topics < 1 {
            return Err(PlsaError::invalid_parameter("n_topics", n_topics, ">= 1"));
        }
        if dataset.vocab_size() == 0 {
            return Err(PlsaError::invalid_parameter("vocab_size", 0, ">= 1"));
        }

        let index = InvertedIndex::build(dataset)?;
        check_table_sizes(dataset, n_topics)?;
        Ok(Self {
            dataset,
            index,
            n_topics,
        })
    }

    /// The training data.
    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// The word-occurrence index.
    #[must_use]
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// K.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    /// M.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.dataset.n_documents()
    }

    /// V.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.dataset.vocab_size()
    }

    /// Occurrence weight at `(doc, position)`.
    #[must_use]
    pub fn weight(&self, doc: usize, position: usize) -> f64 {
        self.dataset.document(doc).feature(position).weight
    }
}

/// K × M, K × V and K × occurrences must each be an allocatable `f64` buffer.
fn check_table_sizes(dataset: &Dataset, n_topics: usize) -> Result<()> {
    let max_len = isize::MAX as usize / std::mem::size_of::<f64>();
    let extents = [
        ("documents", dataset.n_documents()),
        ("vocab_size", dataset.vocab_size()),
        ("occurrences", dataset.total_occurrences()),
    ];
    for (name, extent) in extents {
        match n_topics.checked_mul(extent) {
            Some(len) if len <= max_len => {}
            _ => {
                return Err(PlsaError::invalid_parameter(
                    "n_topics",
                    n_topics,
                    &format!("n_topics * {name} ({extent}) to fit in memory"),
                ))
            }
        }
    }
    Ok(())
}

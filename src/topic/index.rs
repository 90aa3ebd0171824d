//! Word-occurrence inverted index.
//!
//! Maps every vocabulary dimension to the (document, position) pairs where it
//! occurs, so the word-given-topic update touches only the occurrences of
//! each word instead of rescanning every document.

use crate::data::Dataset;
use crate::error::{PlsaError, Result};

/// Locates one occurrence of a vocabulary dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Posting {
    /// Document index.
    pub doc: usize,
    /// Position of the occurrence inside that document.
    pub position: usize,
}

/// Posting lists for dimensions `0..vocab_size`.
///
/// Built once from a [`Dataset`] and read-only afterwards. The total number of
/// postings always equals [`Dataset::total_occurrences`].
///
/// # Examples
///
/// ```
/// use plsa::data::{Dataset, Document};
/// use plsa::topic::InvertedIndex;
///
/// let ds = Dataset::from_documents(vec![
///     Document::from_pairs(&[(0, 2.0), (1, 1.0)]),
///     Document::from_pairs(&[(1, 1.0), (2, 3.0)]),
/// ]);
/// let index = InvertedIndex::build(&ds).expect("dimensions within vocabulary");
/// assert_eq!(index.postings(1).len(), 2);
/// assert_eq!(index.n_postings(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InvertedIndex {
    lists: Vec<Vec<Posting>>,
}

impl InvertedIndex {
    /// Build the index.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::InvalidDataset`] if any occurrence references a
    /// dimension `>= dataset.vocab_size()`, and
    /// [`PlsaError::InvalidParameters`] if the declared vocabulary is too large
    /// to allocate one posting list per dimension.
    pub fn build(dataset: &Dataset) -> Result<Self> {
        let vocab_size = dataset.vocab_size();

        // dimensions are checked before anything is sized by vocab_size
        for (doc, document) in dataset.documents().iter().enumerate() {
            if let Some((position, feature)) = document
                .features()
                .iter()
                .enumerate()
                .find(|(_, f)| f.dim >= vocab_size)
            {
                return Err(PlsaError::InvalidDataset {
                    document: doc,
                    position,
                    dimension: feature.dim,
                    vocab_size,
                });
            }
        }

        let max_lists = isize::MAX as usize / std::mem::size_of::<Vec<Posting>>();
        if vocab_size > max_lists {
            return Err(PlsaError::invalid_parameter(
                "vocab_size",
                vocab_size,
                "a vocabulary that fits in memory",
            ));
        }

        let mut lists = vec![Vec::new(); vocab_size];
        for (doc, document) in dataset.documents().iter().enumerate() {
            for (position, feature) in document.features().iter().enumerate() {
                lists[feature.dim].push(Posting { doc, position });
            }
        }

        Ok(Self { lists })
    }

    /// Postings of dimension `dim` (empty for unused dimensions).
    ///
    /// # Panics
    ///
    /// Panics if `dim >= vocab_size()`.
    #[must_use]
    pub fn postings(&self, dim: usize) -> &[Posting] {
        &self.lists[dim]
    }

    /// Number of dimensions covered.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.lists.len()
    }

    /// Total number of postings across all dimensions.
    #[must_use]
    pub fn n_postings(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Iterate `(dim, postings)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Posting])> {
        self.lists.iter().enumerate().map(|(w, l)| (w, l.as_slice()))
    }
}

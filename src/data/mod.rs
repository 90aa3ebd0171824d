//! Sparse document collections.
//!
//! A [`Dataset`] is an indexed collection of [`Document`]s, each an ordered
//! sequence of weighted vocabulary occurrences ([`Feature`]s). The position of
//! a feature inside its document is significant: the EM engine stores one
//! posterior per (document, position).
//!
//! Datasets are immutable once built. Tokenization, stop-word removal and
//! other preprocessing happen upstream.

mod loader;

pub use loader::{parse_line, MAX_DIMENSION};

/// One weighted occurrence of a vocabulary dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    /// Vocabulary dimension (word id).
    pub dim: usize,
    /// Non-negative occurrence weight (count, tf-idf, ...).
    pub weight: f64,
}

impl Feature {
    /// Create a feature.
    #[must_use]
    pub fn new(dim: usize, weight: f64) -> Self {
        Self { dim, weight }
    }
}

/// An ordered sparse bag of occurrences.
///
/// # Examples
///
/// ```
/// use plsa::data::{Document, Feature};
///
/// let doc = Document::new(vec![Feature::new(0, 2.0), Feature::new(4, 1.0)]);
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.feature(1).dim, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    features: Vec<Feature>,
}

impl Document {
    /// Create a document from its features, in position order.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Build a document from `(dim, weight)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(usize, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(dim, weight)| Feature::new(dim, weight)).collect())
    }

    /// Number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True if the document has no occurrences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[must_use]
    pub fn feature(&self, position: usize) -> Feature {
        self.features[position]
    }

    /// All features in position order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Sum of occurrence weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.features.iter().map(|f| f.weight).sum()
    }

    /// Largest dimension referenced, if any.
    #[must_use]
    pub fn max_dim(&self) -> Option<usize> {
        self.features.iter().map(|f| f.dim).max()
    }
}

/// A collection of documents over a vocabulary of `vocab_size` dimensions.
///
/// # Examples
///
/// ```
/// use plsa::data::{Dataset, Document};
///
/// let ds = Dataset::from_documents(vec![
///     Document::from_pairs(&[(0, 2.0), (1, 1.0)]),
///     Document::from_pairs(&[(1, 1.0), (2, 3.0)]),
/// ]);
/// assert_eq!(ds.n_documents(), 2);
/// assert_eq!(ds.vocab_size(), 3);
/// assert_eq!(ds.total_occurrences(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    documents: Vec<Document>,
    vocab_size: usize,
}

impl Dataset {
    /// Create a dataset with a declared vocabulary size.
    ///
    /// Dimensions are not checked here; the inverted index builder rejects
    /// any occurrence with `dim >= vocab_size`.
    #[must_use]
    pub fn new(documents: Vec<Document>, vocab_size: usize) -> Self {
        Self {
            documents,
            vocab_size,
        }
    }

    /// Create a dataset whose vocabulary size is the largest dimension + 1.
    ///
    /// A dimension of `usize::MAX` has no representable vocabulary; the size
    /// saturates and the inverted index builder then rejects that occurrence.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let vocab_size = documents
            .iter()
            .filter_map(Document::max_dim)
            .max()
            .map_or(0, |d| d.checked_add(1).unwrap_or(usize::MAX));
        Self::new(documents, vocab_size)
    }

    /// Number of documents (M).
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.documents.len()
    }

    /// Vocabulary size (V).
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// True if there are no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document at index `m`.
    ///
    /// # Panics
    ///
    /// Panics if `m` is out of bounds.
    #[must_use]
    pub fn document(&self, m: usize) -> &Document {
        &self.documents[m]
    }

    /// All documents.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Total number of occurrences across all documents.
    #[must_use]
    pub fn total_occurrences(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }

    /// Sum of all occurrence weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.documents.iter().map(Document::total_weight).sum()
    }
}

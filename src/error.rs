//! Error types for PLSA operations.
//!
//! Configuration and input problems are detected once, before the EM loop
//! starts, and short-circuit the whole run. Numeric degeneracy during
//! training is not an error; it is reported through
//! [`crate::topic::IterationRecord`].

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`PlsaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The dataset source is missing, empty, malformed or inconsistent.
    Dataset,
    /// A training parameter is out of range.
    InvalidParameters,
}

/// Main error type for PLSA operations.
///
/// # Examples
///
/// ```
/// use plsa::error::{ErrorKind, PlsaError};
///
/// let err = PlsaError::invalid_parameter("n_topics", 0, ">= 1");
/// assert_eq!(err.kind(), ErrorKind::InvalidParameters);
/// assert!(err.to_string().contains("n_topics"));
/// ```
#[derive(Debug, Error)]
pub enum PlsaError {
    /// The named dataset source does not exist.
    #[error("dataset source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The dataset has no documents (or no vocabulary to speak of).
    #[error("empty dataset: {context}")]
    EmptyDataset {
        /// What was found empty
        context: String,
    },

    /// A document references a dimension outside the declared vocabulary.
    #[error(
        "invalid dataset: document {document} position {position} references dimension \
         {dimension}, vocabulary size is {vocab_size}"
    )]
    InvalidDataset {
        /// Document index
        document: usize,
        /// Position within the document
        position: usize,
        /// Offending dimension
        dimension: usize,
        /// Declared vocabulary size
        vocab_size: usize,
    },

    /// A line of a dataset source could not be parsed.
    #[error("malformed dataset at line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A training parameter violates its constraint.
    #[error("invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameters {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error while reading a dataset or configuration source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlsaError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(
        param: &str,
        value: impl std::fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidParameters {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty dataset error.
    #[must_use]
    pub fn empty_dataset(context: &str) -> Self {
        Self::EmptyDataset {
            context: context.to_string(),
        }
    }

    /// Which branch of the error taxonomy this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters { .. } | Self::Config(_) => ErrorKind::InvalidParameters,
            Self::SourceNotFound(_)
            | Self::EmptyDataset { .. }
            | Self::InvalidDataset { .. }
            | Self::Parse { .. }
            | Self::Io(_) => ErrorKind::Dataset,
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PlsaError>;

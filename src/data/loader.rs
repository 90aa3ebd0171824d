//! Sparse text format reader.
//!
//! One document per line, SVM-light style:
//!
//! ```text
//! # comment
//! 1 0:2.0 1:1.0
//! 1:1.0 2:3.0
//! ```
//!
//! A leading token without `:` is a label and is ignored. A blank line is an
//! empty document. Lines starting with `#` are skipped. Dimensions above
//! [`MAX_DIMENSION`] are rejected.

use super::{Dataset, Document, Feature};
use crate::error::{PlsaError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Largest dimension the text format accepts.
///
/// Bounds the vocabulary of a loaded file at 2^24 words, so a corrupt
/// dimension is a parse error rather than a multi-terabyte table.
pub const MAX_DIMENSION: usize = (1 << 24) - 1;

impl Dataset {
    /// Read a dataset from a file in the sparse text format.
    ///
    /// # Errors
    ///
    /// - [`PlsaError::SourceNotFound`] if `path` does not exist
    /// - [`PlsaError::Parse`] on malformed lines
    /// - [`PlsaError::EmptyDataset`] if no documents were read
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PlsaError::SourceNotFound(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }

    /// Read a dataset from any reader in the sparse text format.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::Parse`] on malformed lines and
    /// [`PlsaError::EmptyDataset`] if no documents were read.
    ///
    /// # Examples
    ///
    /// ```
    /// use plsa::data::Dataset;
    ///
    /// let text = "0:2.0 1:1.0\n1:1.0 2:3.0\n";
    /// let ds = Dataset::from_reader(text.as_bytes()).expect("valid input");
    /// assert_eq!(ds.n_documents(), 2);
    /// assert_eq!(ds.vocab_size(), 3);
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut documents = Vec::new();
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim_start().starts_with('#') {
                continue;
            }
            documents.push(parse_line(&line, idx + 1)?);
        }

        if documents.is_empty() {
            return Err(PlsaError::empty_dataset("source contains no documents"));
        }
        Ok(Self::from_documents(documents))
    }
}

/// Parse one line of the sparse text format into a [`Document`].
///
/// `line_no` is only used for error messages.
///
/// # Errors
///
/// Returns [`PlsaError::Parse`] for tokens that are not `dim:weight`
/// (other than a leading label), for dimensions above [`MAX_DIMENSION`], or
/// for negative or non-finite weights.
pub fn parse_line(line: &str, line_no: usize) -> Result<Document> {
    let parse_err = |reason: String| PlsaError::Parse {
        line: line_no,
        reason,
    };

    let mut features = Vec::new();
    for (i, token) in line.split_whitespace().enumerate() {
        let Some((dim, weight)) = token.split_once(':') else {
            if i == 0 {
                continue;
            }
            return Err(parse_err(format!("expected dim:weight, got '{token}'")));
        };

        let dim: usize = dim
            .parse()
            .map_err(|_| parse_err(format!("invalid dimension '{dim}'")))?;
        if dim > MAX_DIMENSION {
            return Err(parse_err(format!(
                "dimension {dim} exceeds maximum {MAX_DIMENSION}"
            )));
        }
        let weight: f64 = weight
            .parse()
            .map_err(|_| parse_err(format!("invalid weight '{weight}'")))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(parse_err(format!(
                "weight must be finite and non-negative, got {weight}"
            )));
        }
        features.push(Feature::new(dim, weight));
    }
    Ok(Document::new(features))
}

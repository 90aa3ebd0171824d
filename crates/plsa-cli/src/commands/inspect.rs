//! Inspect command implementation
//!
//! Summarizes a sparse dataset file without training on it.

use super::validate_path;
use crate::error::Result;
use crate::output;
use plsa::data::Dataset;
use plsa::topic::InvertedIndex;
use serde::Serialize;
use std::path::Path;

/// Dataset statistics for display/JSON
#[derive(Serialize)]
struct DatasetSummary {
    file: String,
    documents: usize,
    vocab_size: usize,
    occurrences: usize,
    total_weight: f64,
    empty_documents: usize,
    unused_dimensions: usize,
}

/// Run the inspect command
pub(crate) fn run(path: &Path, json_output: bool) -> Result<()> {
    validate_path(path)?;
    let dataset = Dataset::from_path(path)?;
    let index = InvertedIndex::build(&dataset)?;

    let summary = DatasetSummary {
        file: path.display().to_string(),
        documents: dataset.n_documents(),
        vocab_size: dataset.vocab_size(),
        occurrences: dataset.total_occurrences(),
        total_weight: dataset.total_weight(),
        empty_documents: dataset.documents().iter().filter(|d| d.is_empty()).count(),
        unused_dimensions: index.iter().filter(|(_, list)| list.is_empty()).count(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::section(&format!("Dataset: {}", summary.file));
    output::kv("Documents", summary.documents);
    output::kv("Vocabulary", summary.vocab_size);
    output::kv("Occurrences", summary.occurrences);
    output::kv("Total weight", format!("{:.4}", summary.total_weight));
    output::kv("Empty documents", summary.empty_documents);
    output::kv("Unused dimensions", summary.unused_dimensions);
    if summary.empty_documents > 0 {
        output::warning("empty documents receive zero P(d|z) under every topic");
    }
    Ok(())
}

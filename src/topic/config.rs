//! Training configuration.

use crate::error::{PlsaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hyperparameters for a PLSA run.
///
/// Missing fields take their defaults when decoded from JSON.
///
/// # Examples
///
/// ```
/// use plsa::topic::PlsaConfig;
///
/// let config = PlsaConfig::new(4).with_iterations(25).with_random_seed(7);
/// assert!(config.validate().is_ok());
///
/// let decoded = PlsaConfig::from_json_str(r#"{"n_topics": 4}"#).expect("valid json");
/// assert_eq!(decoded.n_iterations, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlsaConfig {
    /// Number of latent topics (K).
    pub n_topics: usize,
    /// Number of EM iterations; there is no convergence-based stop.
    pub n_iterations: usize,
    /// Seed for the initializer's random source.
    pub random_seed: u64,
}

impl Default for PlsaConfig {
    fn default() -> Self {
        Self {
            n_topics: 2,
            n_iterations: 100,
            random_seed: 42,
        }
    }
}

impl PlsaConfig {
    /// Default configuration with `n_topics` topics.
    #[must_use]
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            ..Self::default()
        }
    }

    /// Set number of topics.
    #[must_use]
    pub fn with_topics(mut self, n_topics: usize) -> Self {
        self.n_topics = n_topics;
        self
    }

    /// Set number of EM iterations.
    #[must_use]
    pub fn with_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Check hyperparameter constraints.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::InvalidParameters`] if `n_topics < 1`.
    pub fn validate(&self) -> Result<()> {
        if self.n_topics < 1 {
            return Err(PlsaError::invalid_parameter(
                "n_topics",
                self.n_topics,
                ">= 1",
            ));
        }
        Ok(())
    }

    /// Decode a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::Config`] for malformed JSON and
    /// [`PlsaError::InvalidParameters`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and decode a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Encode as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlsaError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PlsaConfig::default();
        assert_eq!(config.n_topics, 2);
        assert_eq!(config.n_iterations, 100);
        assert_eq!(config.random_seed, 42);
    }

    #[test]
    fn test_builder() {
        let config = PlsaConfig::new(5).with_iterations(3).with_random_seed(9).with_topics(6);
        assert_eq!(config.n_topics, 6);
        assert_eq!(config.n_iterations, 3);
        assert_eq!(config.random_seed, 9);
    }

    #[test]
    fn test_validate_zero_topics() {
        let err = PlsaConfig::new(0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PlsaConfig::new(3).with_iterations(10);
        let json = config.to_json().expect("encode");
        assert_eq!(PlsaConfig::from_json_str(&json).expect("decode"), config);
    }

    #[test]
    fn test_json_rejects_zero_topics() {
        let err = PlsaConfig::from_json_str(r#"{"n_topics": 0}"#).unwrap_err();
        assert!(matches!(err, PlsaError::InvalidParameters { .. }));
    }

    #[test]
    fn test_json_malformed() {
        let err = PlsaConfig::from_json_str("{ n_topics: ").unwrap_err();
        assert!(matches!(err, PlsaError::Config(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"n_topics": 8, "random_seed": 1}}"#).expect("write");
        let config = PlsaConfig::from_json_file(file.path()).expect("load");
        assert_eq!(config.n_topics, 8);
        assert_eq!(config.random_seed, 1);
        assert_eq!(config.n_iterations, 100);
    }
}

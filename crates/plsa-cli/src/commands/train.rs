//! Train command implementation
//!
//! Fits a PLSA model to a dataset file, streaming the log-likelihood of each
//! iteration, then prints the strongest words of every topic.

use super::validate_path;
use crate::error::{CliError, Result};
use crate::output;
use colored::Colorize;
use plsa::data::Dataset;
use plsa::topic::{IterationRecord, Plsa, PlsaConfig, PlsaModel, TrainingCallback};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options collected from the command line.
#[derive(Debug, Default)]
pub(crate) struct TrainOptions {
    pub(crate) topics: Option<usize>,
    pub(crate) iterations: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) top: usize,
    pub(crate) json: bool,
    pub(crate) quiet: bool,
}

impl TrainOptions {
    /// Defaults, then the config file, then explicit flags. Only the merged
    /// result is validated.
    fn resolve_config(&self) -> Result<PlsaConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str::<PlsaConfig>(&text).map_err(|e| {
                    CliError::InvalidConfig(format!("{}: {e}", path.display()))
                })?
            }
            None => PlsaConfig::default(),
        };
        if let Some(k) = self.topics {
            config = config.with_topics(k);
        }
        if let Some(n) = self.iterations {
            config = config.with_iterations(n);
        }
        if let Some(seed) = self.seed {
            config = config.with_random_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Streams iteration records to the console.
struct ConsoleReporter {
    json: bool,
    quiet: bool,
    degenerate: usize,
}

impl TrainingCallback for ConsoleReporter {
    fn on_iteration(&mut self, record: &IterationRecord) {
        if self.json {
            if let Ok(line) = serde_json::to_string(record) {
                println!("{line}");
            }
        } else if !self.quiet {
            println!(
                "{}\tlikelihood: {}",
                format!("[{}]", record.iteration).dimmed(),
                record.log_likelihood
            );
        }
    }

    fn on_degeneracy(&mut self, record: &IterationRecord) {
        self.degenerate += 1;
        if !self.json && !self.quiet {
            output::warning(&format!(
                "iteration {}: {} zero-divisor normalization(s)",
                record.iteration, record.degenerate_normalizations
            ));
        }
    }
}

#[derive(Serialize)]
struct WordWeight {
    dim: usize,
    probability: f64,
}

#[derive(Serialize)]
struct TopicSummary {
    topic: usize,
    prior: f64,
    words: Vec<WordWeight>,
}

#[derive(Serialize)]
struct TrainSummary {
    file: String,
    config: PlsaConfig,
    iterations_completed: usize,
    final_log_likelihood: Option<f64>,
    degenerate_iterations: usize,
    topics: Vec<TopicSummary>,
}

fn summarize(path: &Path, config: PlsaConfig, model: &PlsaModel, top: usize, degenerate: usize) -> TrainSummary {
    let topics = model
        .top_words(top)
        .into_iter()
        .enumerate()
        .map(|(z, words)| TopicSummary {
            topic: z,
            prior: model.topic_prior()[z],
            words: words
                .into_iter()
                .map(|(dim, probability)| WordWeight { dim, probability })
                .collect(),
        })
        .collect();

    TrainSummary {
        file: path.display().to_string(),
        config,
        iterations_completed: model.iterations_completed(),
        final_log_likelihood: model.final_log_likelihood(),
        degenerate_iterations: degenerate,
        topics,
    }
}

/// Run the train command
pub(crate) fn run(path: &Path, opts: &TrainOptions) -> Result<()> {
    validate_path(path)?;
    let config = opts.resolve_config()?;
    let dataset = Dataset::from_path(path)?;

    if !opts.json && !opts.quiet {
        output::section(&format!("Training: {}", path.display()));
        output::kv("Documents", dataset.n_documents());
        output::kv("Vocabulary", dataset.vocab_size());
        output::kv("Topics", config.n_topics);
        output::kv("Iterations", config.n_iterations);
        output::kv("Seed", config.random_seed);
        println!();
    }

    let mut reporter = ConsoleReporter {
        json: opts.json,
        quiet: opts.quiet,
        degenerate: 0,
    };
    let model = Plsa::from_config(config.clone()).fit(&dataset, &mut reporter)?;
    let summary = summarize(path, config, &model, opts.top, reporter.degenerate);

    if opts.json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    output::section("Topics");
    for topic in &summary.topics {
        let words: Vec<String> = topic
            .words
            .iter()
            .map(|w| format!("{}:{:.4}", w.dim, w.probability))
            .collect();
        println!(
            "  {} (P={:.4})  {}",
            format!("topic {}", topic.topic).white().bold(),
            topic.prior,
            words.join(" ")
        );
    }

    if summary.degenerate_iterations > 0 {
        output::warning(&format!(
            "{} iteration(s) had degenerate parameters",
            summary.degenerate_iterations
        ));
    } else {
        output::success(&format!(
            "{} iteration(s), final likelihood {}",
            summary.iterations_completed,
            summary
                .final_log_likelihood
                .map_or_else(|| "n/a".to_string(), |ll| ll.to_string())
        ));
    }
    Ok(())
}

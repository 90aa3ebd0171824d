//! Convenience re-exports for common PLSA usage.
//!
//! ```
//! use plsa::prelude::*;
//! ```

pub use crate::data::{Dataset, Document, Feature};
pub use crate::error::{ErrorKind, PlsaError};
pub use crate::primitives::Matrix;
pub use crate::topic::{
    train, CancellationToken, HistoryCallback, IterationRecord, NoopCallback, Plsa, PlsaConfig,
    PlsaModel, TrainingCallback, WriterReporter,
};

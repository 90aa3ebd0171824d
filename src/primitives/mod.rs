//! Core compute primitives.
//!
//! Dense row-major storage backing the PLSA probability tables.

mod matrix;

pub use matrix::Matrix;

//! Aggregation layer.
//!
//! Drives the walk, reads included files and writes the output document:
//! - Validates the project root before any output is created
//! - Reads each included file as text, skipping what cannot be read
//! - Produces a [`CollectReport`] with the warnings of the run

pub mod collector;
pub mod summary;

pub use collector::{Aggregator, CollectOptions, OverwritePolicy};
pub use summary::CollectReport;

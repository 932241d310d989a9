//! Core data model for the CORD-19 metadata analysis pipeline.
//!
//! This crate defines the types shared by the loader, cleaner, deriver, and
//! aggregator: [`Record`], [`Table`], [`Schema`], [`Field`], and the
//! per-column [`CleaningPolicy`] rules, along with the pipeline error
//! taxonomy.

pub mod error;
pub mod field;
pub mod policy;
pub mod record;

pub use error::{PipelineError, Result};
pub use field::Field;
pub use policy::{CleaningPolicy, DEFAULT_SENTINEL, PolicySet};
pub use record::{Record, Schema, Table};

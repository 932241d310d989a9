//! Library surface of the CORD-19 metadata CLI.
//!
//! The binary in `main.rs` is a thin shell over these modules; everything
//! here is also reachable from integration tests.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use cache::{CacheKey, ResultCache};
pub use pipeline::{PipelineOptions, run_pipeline};
pub use types::AnalysisResult;

//! Ingestion for the metadata pipeline: CSV loading and export.

pub mod export;
pub mod loader;

pub use export::{write_records, write_table};
pub use loader::{LoadOptions, LoadReport, load_metadata, normalize_cell};

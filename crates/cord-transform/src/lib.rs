//! Cleaning and feature derivation for the metadata pipeline.

pub mod clean;
pub mod dates;
pub mod derive;

pub use clean::{CleanReport, clean};
pub use dates::parse_publish_date;
pub use derive::{WORD_COUNT_FIELDS, derive_features, word_count};

//! Aggregation over cleaned metadata tables.
//!
//! Filtering always happens before aggregation and never mutates the
//! source table: [`filter_records`] returns a borrowed view that the
//! aggregation functions consume.

pub mod aggregate;
pub mod filter;

pub use aggregate::{
    CategoryCount, DEFAULT_TOP_N, Dimension, Distribution, SummaryRequest, SummaryStat,
    distribution, summarize, top_categories, word_count_distribution, year_counts,
};
pub use filter::{FilterSpec, filter_records};

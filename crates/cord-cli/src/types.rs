//! Result types shared between the pipeline, the cache, and the printers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use cord_ingest::LoadReport;
use cord_stats::{CategoryCount, Distribution};
use cord_transform::CleanReport;

/// Everything one analysis run produces. Cached and cloned on cache hits,
/// so it owns all of its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Source file the analysis ran over.
    pub metadata_path: PathBuf,
    /// Row counts and recovered-error tallies from the load stage.
    pub load: LoadReport,
    /// Per-policy tallies from the cleaning stage.
    pub clean: CleanReport,
    /// Records surviving cleaning.
    pub total_records: usize,
    /// Records matching the filter, out of `total_records`.
    pub filtered_records: usize,
    /// Papers per publication year over the filtered view.
    pub year_counts: BTreeMap<i32, u64>,
    /// Top journals by paper count over the filtered view.
    pub top_journals: Vec<CategoryCount>,
    /// Top sources by paper count over the filtered view.
    pub top_sources: Vec<CategoryCount>,
    /// Abstract word-count statistics, when any abstracts are present.
    pub abstract_words: Option<Distribution>,
    /// Where the filtered records were exported, if requested.
    pub export_path: Option<PathBuf>,
}

//! Analysis pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Read the metadata CSV with a row cap, tallying malformed rows
//! 2. **Clean**: Normalize dates and apply per-column missing-value policies
//! 3. **Derive**: Compute publication year and word-count features
//! 4. **Aggregate**: Filter, then compute year counts, rankings, distributions
//! 5. **Export**: Optionally write the filtered records back out as CSV
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use cord_ingest::{LoadOptions, load_metadata, write_records};
use cord_model::{PolicySet, Table};
use cord_stats::{Dimension, FilterSpec, SummaryRequest, SummaryStat, filter_records, summarize};
use cord_transform::{clean, derive_features};

use crate::types::AnalysisResult;

/// Options for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Load at most this many data rows.
    pub row_limit: Option<usize>,
    /// Filter applied before aggregation.
    pub filter: FilterSpec,
    /// Ranking depth for the top-journal and top-source lists.
    pub top_n: usize,
    /// Export the filtered records to this path.
    pub export: Option<PathBuf>,
}

/// Run the full pipeline over one metadata file.
pub fn run_pipeline(metadata: &PathBuf, options: &PipelineOptions) -> Result<AnalysisResult> {
    let pipeline_span = info_span!("analyze", metadata = %metadata.display());
    let _pipeline_guard = pipeline_span.enter();
    let pipeline_start = Instant::now();

    let (mut table, load_report) = info_span!("load").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let load_options = LoadOptions {
            row_limit: options.row_limit,
        };
        let (table, report) = load_metadata(metadata, &load_options)
            .with_context(|| format!("load {}", metadata.display()))?;
        debug!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            malformed_rows = report.malformed_rows,
            blank_rows = report.blank_rows,
            truncated = report.truncated,
            duration_ms = start.elapsed().as_millis(),
            "load complete"
        );
        Ok((table, report))
    })?;

    let clean_report = info_span!("clean").in_scope(|| {
        let start = Instant::now();
        let policies = PolicySet::default_policies();
        let report = clean(&mut table, &policies);
        debug!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            unparseable_dates = report.unparseable_dates,
            duration_ms = start.elapsed().as_millis(),
            "clean complete"
        );
        report
    });

    info_span!("derive").in_scope(|| {
        let start = Instant::now();
        derive_features(&mut table);
        debug!(
            record_count = table.len(),
            duration_ms = start.elapsed().as_millis(),
            "derive complete"
        );
    });

    let mut result = info_span!("aggregate").in_scope(|| {
        let start = Instant::now();
        let filtered_records = filter_records(&table, &options.filter).len();
        let request = SummaryRequest {
            filter: options.filter.clone(),
            dimensions: vec![Dimension::Journal, Dimension::Source],
            top_n: Some(options.top_n),
        };
        let mut year_counts = BTreeMap::new();
        let mut top_journals = Vec::new();
        let mut top_sources = Vec::new();
        let mut abstract_words = None;
        for stat in summarize(&table, &request) {
            match stat {
                SummaryStat::YearCounts(counts) => year_counts = counts,
                SummaryStat::TopCategories {
                    dimension: Dimension::Journal,
                    entries,
                } => top_journals = entries,
                SummaryStat::TopCategories {
                    dimension: Dimension::Source,
                    entries,
                } => top_sources = entries,
                SummaryStat::WordCountDistribution { stats, .. } => abstract_words = Some(stats),
            }
        }
        debug!(
            total = table.len(),
            filtered = filtered_records,
            duration_ms = start.elapsed().as_millis(),
            "aggregation complete"
        );
        AnalysisResult {
            metadata_path: metadata.clone(),
            load: load_report,
            clean: clean_report,
            total_records: table.len(),
            filtered_records,
            year_counts,
            top_journals,
            top_sources,
            abstract_words,
            export_path: None,
        }
    });

    if let Some(export) = &options.export {
        info_span!("export").in_scope(|| -> Result<()> {
            let start = Instant::now();
            let exported = export_filtered(&table, &options.filter, export)?;
            debug!(
                path = %export.display(),
                record_count = exported,
                duration_ms = start.elapsed().as_millis(),
                "export complete"
            );
            Ok(())
        })?;
        result.export_path = Some(export.clone());
    }

    info!(
        rows_read = result.load.rows_read,
        total_records = result.total_records,
        filtered_records = result.filtered_records,
        duration_ms = pipeline_start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(result)
}

fn export_filtered(table: &Table, filter: &FilterSpec, path: &PathBuf) -> Result<usize> {
    let filtered = filter_records(table, filter);
    write_records(path, table.schema(), filtered.iter().copied())
        .with_context(|| format!("export {}", path.display()))?;
    Ok(filtered.len())
}

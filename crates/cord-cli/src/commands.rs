//! Command entry points for the CLI binary.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use comfy_table::Table;

use cord_model::{Field, PolicySet};
use cord_stats::FilterSpec;

use crate::cache::{CacheKey, ResultCache};
use crate::cli::AnalyzeArgs;
use crate::pipeline::{PipelineOptions, run_pipeline};
use crate::summary::{apply_table_style, header_cell};
use crate::types::AnalysisResult;

/// Run the analyze command, reusing a cached result when the same file,
/// row cap, and filter were analyzed before.
pub fn run_analyze(args: &AnalyzeArgs, cache: &mut ResultCache) -> Result<AnalysisResult> {
    let filter = filter_from_args(args)?;
    let key = CacheKey {
        path: args.metadata.clone(),
        row_limit: args.limit,
        filter: filter.clone(),
    };
    let options = PipelineOptions {
        row_limit: args.limit,
        filter,
        top_n: args.top_n,
        export: args.export.clone(),
    };
    // Export runs on every invocation even when the analysis itself is cached.
    if args.export.is_some() {
        cache.invalidate(&args.metadata);
    }
    let result = cache.get_or_compute(key, || run_pipeline(&args.metadata, &options))?;
    Ok(result.clone())
}

/// Build a filter from the CLI flags. Either year bound may be given alone.
fn filter_from_args(args: &AnalyzeArgs) -> Result<FilterSpec> {
    let year_range = match (args.year_from, args.year_to) {
        (None, None) => None,
        (from, to) => {
            let from = from.unwrap_or(i32::MIN);
            let to = to.unwrap_or(i32::MAX);
            if from > to {
                bail!("--year-from ({from}) is after --year-to ({to})");
            }
            Some((from, to))
        }
    };
    let sources = if args.source.is_empty() {
        None
    } else {
        Some(args.source.iter().cloned().collect::<BTreeSet<String>>())
    };
    Ok(FilterSpec {
        year_range,
        sources,
    })
}

/// Print the recognized columns with their aliases and default policies.
pub fn run_columns() -> Result<()> {
    let policies = PolicySet::default_policies();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Aliases"),
        header_cell("Required"),
        header_cell("Missing-value policy"),
    ]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        let aliases = field.header_names().join(", ");
        let policy = policies
            .rule(field)
            .map(|rule| rule.describe())
            .unwrap_or_else(|| "keep as-is".to_string());
        table.add_row(vec![
            field.canonical_header().to_string(),
            aliases,
            if field.is_required() { "yes" } else { "no" }.to_string(),
            policy,
        ]);
    }
    println!("{table}");
    Ok(())
}

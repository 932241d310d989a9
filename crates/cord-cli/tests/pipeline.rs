use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use cord_cli::cache::{CacheKey, ResultCache};
use cord_cli::pipeline::{PipelineOptions, run_pipeline};
use cord_stats::FilterSpec;

const METADATA: &str = "\
title,abstract,authors,journal,publish_time,source_x\n\
COVID Study,A three word abstract,Doe J.,NEJM,2021-03-01,PMC\n\
Flu Study,NaN,Roe R.,Lancet,2020-06-15,WHO\n\
Untitled,,Poe E.,,2020-07-01,PMC\n\
Vaccine Trial,Short abstract,Doe J.,NEJM,not-a-date,PMC\n\
Masks Study,Another abstract here,Doe J.,,2021-01-10,PMC\n";

fn write_metadata(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("metadata.csv");
    fs::write(&path, METADATA).expect("write fixture");
    path
}

#[test]
fn end_to_end_analysis() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);

    let options = PipelineOptions {
        top_n: 10,
        ..PipelineOptions::default()
    };
    let result = run_pipeline(&path, &options).expect("pipeline");

    // "Untitled" row has a title, so only the unparseable date drops a row.
    assert_eq!(result.load.rows_read, 5);
    assert_eq!(result.clean.unparseable_dates, 1);
    assert_eq!(result.total_records, 4);
    assert_eq!(result.filtered_records, 4);
    assert_eq!(result.year_counts.get(&2020), Some(&2));
    assert_eq!(result.year_counts.get(&2021), Some(&2));

    // Journals with no value were filled with the sentinel.
    let journals: Vec<&str> = result
        .top_journals
        .iter()
        .map(|entry| entry.category.as_str())
        .collect();
    assert!(journals.contains(&"Unknown"));
    assert!(journals.contains(&"NEJM"));

    // Of the surviving rows, only two carry an abstract: the NaN and the
    // empty cell normalized to missing, and the row with a bad date dropped.
    let stats = result.abstract_words.expect("abstract stats");
    assert_eq!(stats.count, 2);
}

#[test]
fn filter_narrows_the_aggregates() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);

    let options = PipelineOptions {
        filter: FilterSpec {
            year_range: Some((2021, 2021)),
            sources: Some(BTreeSet::from(["PMC".to_string()])),
        },
        top_n: 10,
        ..PipelineOptions::default()
    };
    let result = run_pipeline(&path, &options).expect("pipeline");

    assert_eq!(result.total_records, 4);
    assert_eq!(result.filtered_records, 2);
    assert_eq!(result.year_counts.len(), 1);
    assert_eq!(result.year_counts.get(&2021), Some(&2));
}

#[test]
fn row_limit_flows_through_to_the_report() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);

    let options = PipelineOptions {
        row_limit: Some(2),
        top_n: 10,
        ..PipelineOptions::default()
    };
    let result = run_pipeline(&path, &options).expect("pipeline");

    assert!(result.load.truncated);
    assert_eq!(result.total_records, 2);
}

#[test]
fn export_writes_the_filtered_records() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);
    let export = dir.path().join("filtered.csv");

    let options = PipelineOptions {
        row_limit: None,
        filter: FilterSpec {
            year_range: Some((2021, 2021)),
            sources: None,
        },
        top_n: 10,
        export: Some(export.clone()),
    };
    let result = run_pipeline(&path, &options).expect("pipeline");

    assert_eq!(result.export_path.as_ref(), Some(&export));
    let exported = fs::read_to_string(&export).expect("read export");
    let mut lines = exported.lines();
    assert_eq!(
        lines.next(),
        Some("title,abstract,authors,journal,publish_time,source_x")
    );
    assert_eq!(lines.count(), result.filtered_records);
}

#[test]
fn cache_computes_once_per_key() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);
    let mut cache = ResultCache::new();

    let key = CacheKey {
        path: path.clone(),
        row_limit: None,
        filter: FilterSpec::default(),
    };
    let options = PipelineOptions {
        top_n: 10,
        ..PipelineOptions::default()
    };

    let mut computed = 0;
    for _ in 0..3 {
        cache
            .get_or_compute(key.clone(), || {
                computed += 1;
                run_pipeline(&path, &options)
            })
            .expect("analysis");
    }
    assert_eq!(computed, 1);
    assert_eq!(cache.len(), 1);

    // A different filter is a different result.
    let other_key = CacheKey {
        filter: FilterSpec {
            year_range: Some((2021, 2021)),
            sources: None,
        },
        ..key.clone()
    };
    cache
        .get_or_compute(other_key, || {
            computed += 1;
            run_pipeline(&path, &options)
        })
        .expect("analysis");
    assert_eq!(computed, 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn invalidation_drops_every_entry_for_the_path() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_metadata(&dir);
    let other = dir.path().join("other.csv");
    fs::write(&other, METADATA).expect("write fixture");
    let mut cache = ResultCache::new();
    let options = PipelineOptions {
        top_n: 10,
        ..PipelineOptions::default()
    };

    for (target, limit) in [(&path, None), (&path, Some(2)), (&other, None)] {
        let key = CacheKey {
            path: target.clone(),
            row_limit: limit,
            filter: FilterSpec::default(),
        };
        cache
            .get_or_compute(key, || run_pipeline(target, &options))
            .expect("analysis");
    }
    assert_eq!(cache.len(), 3);

    let removed = cache.invalidate(&path);
    assert_eq!(removed, 2);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

use std::collections::BTreeSet;

use cord_model::{Field, Record, Schema, Table};
use cord_stats::{
    Dimension, FilterSpec, SummaryRequest, SummaryStat, distribution, filter_records,
    summarize, top_categories, word_count_distribution, year_counts,
};

fn record(title: &str, year: Option<i32>, journal: &str, source: &str) -> Record {
    let mut record = Record::default();
    record.set(Field::Title, Some(title.to_string()));
    if !journal.is_empty() {
        record.set(Field::Journal, Some(journal.to_string()));
    }
    if !source.is_empty() {
        record.set(Field::Source, Some(source.to_string()));
    }
    record.year = year;
    record
}

fn table_of(records: Vec<Record>) -> Table {
    let headers = vec!["title".to_string(), "publish_time".to_string()];
    let schema = Schema::from_headers(headers).expect("schema");
    Table::new(schema, records)
}

fn view(table: &Table) -> Vec<&Record> {
    table.records().iter().collect()
}

#[test]
fn year_counts_skip_records_without_a_year() {
    let table = table_of(vec![
        record("a", Some(2020), "", ""),
        record("b", Some(2020), "", ""),
        record("c", Some(2019), "", ""),
        record("d", Some(2021), "", ""),
        record("e", None, "", ""),
    ]);

    let counts = year_counts(&view(&table));
    assert_eq!(counts.get(&2019), Some(&1));
    assert_eq!(counts.get(&2020), Some(&2));
    assert_eq!(counts.get(&2021), Some(&1));
    assert_eq!(counts.len(), 3);
}

#[test]
fn top_categories_rank_by_count_descending() {
    let mut records = Vec::new();
    for _ in 0..5 {
        records.push(record("x", None, "NEJM", ""));
    }
    for _ in 0..2 {
        records.push(record("x", None, "BMJ", ""));
    }
    for _ in 0..3 {
        records.push(record("x", None, "Lancet", ""));
    }
    let table = table_of(records);

    let top = top_categories(&view(&table), Dimension::Journal, 10);
    let names: Vec<&str> = top.iter().map(|entry| entry.category.as_str()).collect();
    assert_eq!(names, vec!["NEJM", "Lancet", "BMJ"]);
    assert_eq!(top[0].count, 5);
}

#[test]
fn ties_break_by_first_seen_order() {
    // NEJM appears before Lancet in the data, so with equal counts and
    // room for only two entries NEJM must win the cut.
    let mut records = Vec::new();
    records.push(record("x", None, "NEJM", ""));
    records.push(record("x", None, "Lancet", ""));
    for _ in 0..4 {
        records.push(record("x", None, "NEJM", ""));
        records.push(record("x", None, "Lancet", ""));
    }
    records.push(record("x", None, "BMJ", ""));
    let table = table_of(records);

    let top = top_categories(&view(&table), Dimension::Journal, 2);
    let names: Vec<&str> = top.iter().map(|entry| entry.category.as_str()).collect();
    assert_eq!(names, vec!["NEJM", "Lancet"]);
}

#[test]
fn top_categories_yield_at_most_n_entries() {
    let table = table_of(vec![
        record("x", None, "A", ""),
        record("x", None, "B", ""),
        record("x", None, "C", ""),
    ]);
    assert_eq!(top_categories(&view(&table), Dimension::Journal, 2).len(), 2);
    assert_eq!(top_categories(&view(&table), Dimension::Journal, 9).len(), 3);
}

#[test]
fn distribution_over_known_values() {
    let stats = distribution([100.0, 200.0, 300.0]).expect("stats");
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, 100.0);
    assert_eq!(stats.max, 300.0);
    assert_eq!(stats.mean, 200.0);
    assert_eq!(stats.median, 200.0);
    assert!((stats.std_dev - 100.0).abs() < 1e-9);
}

#[test]
fn median_averages_the_middle_pair_for_even_counts() {
    // Input order must not matter.
    let stats = distribution([4.0, 1.0, 3.0, 2.0]).expect("stats");
    assert_eq!(stats.median, 2.5);
    let odd = distribution([4.0, 1.0, 3.0]).expect("stats");
    assert_eq!(odd.median, 3.0);
}

#[test]
fn distribution_edge_cases() {
    assert_eq!(distribution([]), None);
    let single = distribution([42.0]).expect("stats");
    assert_eq!(single.count, 1);
    assert_eq!(single.std_dev, 0.0);
    assert_eq!(single.mean, 42.0);
    assert_eq!(single.median, 42.0);
}

#[test]
fn word_count_distribution_excludes_absent_values() {
    let mut with_abstract = record("a", None, "", "");
    with_abstract.set(Field::Abstract, Some("one two three".to_string()));
    with_abstract.word_counts.insert(Field::Abstract, 3);
    let without_abstract = record("b", None, "", "");
    let table = table_of(vec![with_abstract, without_abstract]);

    let stats = word_count_distribution(&view(&table), Field::Abstract).expect("stats");
    assert_eq!(stats.count, 1);
    assert_eq!(stats.mean, 3.0);
}

#[test]
fn filtering_leaves_the_table_untouched() {
    let table = table_of(vec![
        record("a", Some(2020), "", "PMC"),
        record("b", Some(2021), "", "WHO"),
    ]);
    let snapshot = table.clone();

    let spec = FilterSpec {
        year_range: Some((2021, 2021)),
        sources: None,
    };
    let filtered = filter_records(&table, &spec);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].get(Field::Title), Some("b"));
    assert_eq!(table, snapshot);
}

#[test]
fn year_filter_is_inclusive_and_strict_about_missing_years() {
    let table = table_of(vec![
        record("a", Some(2019), "", ""),
        record("b", Some(2020), "", ""),
        record("c", Some(2021), "", ""),
        record("d", None, "", ""),
    ]);

    let spec = FilterSpec {
        year_range: Some((2019, 2020)),
        sources: None,
    };
    let filtered = filter_records(&table, &spec);
    let names: Vec<_> = filtered
        .iter()
        .map(|record| record.get(Field::Title).unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn source_filter_matches_any_of_the_requested_sources() {
    let table = table_of(vec![
        record("a", None, "", "PMC"),
        record("b", None, "", "WHO"),
        record("c", None, "", "Elsevier"),
        record("d", None, "", ""),
    ]);

    let spec = FilterSpec {
        year_range: None,
        sources: Some(BTreeSet::from(["PMC".to_string(), "WHO".to_string()])),
    };
    let filtered = filter_records(&table, &spec);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn summarize_filters_before_aggregating() {
    let table = table_of(vec![
        record("a", Some(2020), "NEJM", "PMC"),
        record("b", Some(2021), "NEJM", "PMC"),
        record("c", Some(2021), "Lancet", "WHO"),
    ]);

    let request = SummaryRequest {
        filter: FilterSpec {
            year_range: Some((2021, 2021)),
            sources: None,
        },
        dimensions: vec![Dimension::Journal, Dimension::Source],
        top_n: Some(5),
    };
    let stats = summarize(&table, &request);

    let SummaryStat::YearCounts(counts) = &stats[0] else {
        panic!("expected year counts first");
    };
    assert_eq!(counts.get(&2021), Some(&2));
    assert_eq!(counts.get(&2020), None);

    // One ranking per requested dimension, in request order.
    let SummaryStat::TopCategories { dimension, entries } = &stats[1] else {
        panic!("expected a journal ranking second");
    };
    assert_eq!(*dimension, Dimension::Journal);
    assert_eq!(entries.len(), 2);

    let SummaryStat::TopCategories { dimension, entries } = &stats[2] else {
        panic!("expected a source ranking third");
    };
    assert_eq!(*dimension, Dimension::Source);
    assert_eq!(entries.len(), 2);
}

#[test]
fn empty_filter_matches_everything() {
    let table = table_of(vec![
        record("a", Some(2020), "", "PMC"),
        record("b", None, "", ""),
    ]);
    let filtered = filter_records(&table, &FilterSpec::default());
    assert_eq!(filtered.len(), table.len());
}

mod properties {
    use proptest::prelude::*;

    use super::{FilterSpec, record, table_of, year_counts};
    use cord_stats::filter_records;

    proptest! {
        /// Filtering to a year window and counting must agree with
        /// counting first and then keeping only the window's buckets.
        #[test]
        fn filter_then_count_matches_count_then_trim(
            years in prop::collection::vec(proptest::option::of(2000i32..2030), 0..40),
            from in 2000i32..2030,
            width in 0i32..10,
        ) {
            let to = from + width;
            let table = table_of(
                years
                    .iter()
                    .map(|year| record("x", *year, "", ""))
                    .collect(),
            );

            let spec = FilterSpec {
                year_range: Some((from, to)),
                sources: None,
            };
            let filtered_counts = year_counts(&filter_records(&table, &spec));

            let all: Vec<_> = table.records().iter().collect();
            let mut trimmed = year_counts(&all);
            trimmed.retain(|year, _| *year >= from && *year <= to);

            prop_assert_eq!(filtered_counts, trimmed);
        }

        /// The filtered view is always a subset, in order.
        #[test]
        fn filtered_view_is_an_ordered_subset(
            years in prop::collection::vec(proptest::option::of(2000i32..2030), 0..40),
        ) {
            let table = table_of(
                years
                    .iter()
                    .map(|year| record("x", *year, "", ""))
                    .collect(),
            );
            let spec = FilterSpec {
                year_range: Some((2010, 2020)),
                sources: None,
            };
            let filtered = filter_records(&table, &spec);
            prop_assert!(filtered.len() <= table.len());
            let mut cursor = table.records().iter();
            for kept in &filtered {
                prop_assert!(cursor.any(|record| std::ptr::eq(record, *kept)));
            }
        }
    }
}

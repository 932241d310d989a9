use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use cord_model::{Field, Record, Table};

use crate::filter::{FilterSpec, filter_records};

/// Top-N size when a request does not specify one.
pub const DEFAULT_TOP_N: usize = 10;

/// Categorical grouping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dimension {
    Journal,
    Source,
}

impl Dimension {
    pub fn field(self) -> Field {
        match self {
            Dimension::Journal => Field::Journal,
            Dimension::Source => Field::Source,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Journal => "journal",
            Dimension::Source => "source",
        }
    }
}

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Descriptive statistics over a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Midpoint value; the average of the two middle values for an even
    /// count.
    pub median: f64,
    /// Sample standard deviation; 0 when fewer than two values.
    pub std_dev: f64,
}

/// An aggregation request: which dimensions to rank, how deep, and which
/// filtered view of the table to aggregate over.
#[derive(Debug, Clone, Default)]
pub struct SummaryRequest {
    pub filter: FilterSpec,
    pub dimensions: Vec<Dimension>,
    pub top_n: Option<usize>,
}

/// A computed aggregate, keyed by its dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SummaryStat {
    YearCounts(BTreeMap<i32, u64>),
    TopCategories {
        dimension: Dimension,
        entries: Vec<CategoryCount>,
    },
    WordCountDistribution {
        field: Field,
        stats: Distribution,
    },
}

/// Count records per publication year. Only years actually present appear;
/// gaps are not filled.
pub fn year_counts(records: &[&Record]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts
}

/// Rank categories by record count, descending, truncated to `n`.
/// Ties break by first-seen order in the record view.
pub fn top_categories(records: &[&Record], dimension: Dimension, n: usize) -> Vec<CategoryCount> {
    let field = dimension.field();
    let mut counts: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        let Some(value) = record.get(field) else {
            continue;
        };
        counts.entry(value).or_insert((0, index)).0 += 1;
    }
    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(category, (count, first_seen))| (category, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(category, count, _)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

/// Min/max/mean/median/standard deviation over a value set. `None` when
/// empty.
pub fn distribution<I>(values: I) -> Option<Distribution>
where
    I: IntoIterator<Item = f64>,
{
    let mut values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let min = values[0];
    let max = values[count - 1];
    let mean = values.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        values[count / 2]
    } else {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    };
    let std_dev = if count < 2 {
        0.0
    } else {
        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    };
    Some(Distribution {
        count,
        min,
        max,
        mean,
        median,
        std_dev,
    })
}

/// Distribution of a derived word count, over records where the source
/// field is non-null only. Records with the field absent are excluded
/// rather than counted as zero.
pub fn word_count_distribution(records: &[&Record], field: Field) -> Option<Distribution> {
    distribution(
        records
            .iter()
            .filter(|record| record.get(field).is_some())
            .map(|record| record.word_count(field) as f64),
    )
}

/// Run one aggregation request: filter first, then compute year counts,
/// a top-N ranking per requested dimension, and the abstract word-count
/// distribution.
pub fn summarize(table: &Table, request: &SummaryRequest) -> Vec<SummaryStat> {
    let records = filter_records(table, &request.filter);
    debug!(
        total = table.len(),
        matched = records.len(),
        "aggregation view filtered"
    );
    let mut stats = vec![SummaryStat::YearCounts(year_counts(&records))];
    for &dimension in &request.dimensions {
        stats.push(SummaryStat::TopCategories {
            dimension,
            entries: top_categories(
                &records,
                dimension,
                request.top_n.unwrap_or(DEFAULT_TOP_N),
            ),
        });
    }
    if let Some(dist) = word_count_distribution(&records, Field::Abstract) {
        stats.push(SummaryStat::WordCountDistribution {
            field: Field::Abstract,
            stats: dist,
        });
    }
    stats
}

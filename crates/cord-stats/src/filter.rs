use std::collections::BTreeSet;

use serde::Serialize;

use cord_model::{Record, Table};

/// Record-level filter applied before aggregation.
///
/// An empty spec matches everything. The year range is inclusive on both
/// ends; a record without a derived year never matches a year filter, and
/// a record without a source never matches a source filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterSpec {
    pub year_range: Option<(i32, i32)>,
    pub sources: Option<BTreeSet<String>>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.year_range.is_none() && self.sources.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some((from, to)) = self.year_range {
            match record.year {
                Some(year) if year >= from && year <= to => {}
                _ => return false,
            }
        }
        if let Some(sources) = &self.sources {
            match record.source.as_deref() {
                Some(source) if sources.contains(source) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Borrowed view of the records matching a filter, in table order.
/// The source table is left untouched.
pub fn filter_records<'a>(table: &'a Table, spec: &FilterSpec) -> Vec<&'a Record> {
    table
        .records()
        .iter()
        .filter(|record| spec.matches(record))
        .collect()
}

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use cord_model::{CleaningPolicy, Field, PolicySet, Record, Table};

use crate::dates::parse_publish_date;

/// Tally of what one cleaning pass changed.
///
/// Re-running the cleaner on an already-clean table leaves the table
/// unchanged and reports no drops and no new date failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Date values that parsed to nothing and were normalized to missing.
    pub unparseable_dates: usize,
    /// Rows removed, keyed by the first drop-policy field that was missing.
    pub dropped: BTreeMap<Field, usize>,
    /// Sentinel fills applied, per field.
    pub filled: BTreeMap<Field, usize>,
    /// Missing values flagged (value left absent), per field.
    pub flagged: BTreeMap<Field, usize>,
}

impl CleanReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

/// Apply the per-column cleaning policies to a table in place.
///
/// Order of operations: publication dates are parsed and normalized first
/// so the drop pass sees the outcome — an unparseable date becomes a
/// missing value and then falls under the `publish_time` policy. Fill and
/// flag policies run after retention, so their tallies count surviving
/// rows only. A row missing several drop-policy columns is removed exactly
/// once and tallied against the first one in field order.
pub fn clean(table: &mut Table, policies: &PolicySet) -> CleanReport {
    let mut report = CleanReport {
        rows_in: table.len(),
        ..CleanReport::default()
    };

    let date_sentinel = match policies.rule(Field::PublishTime) {
        Some(CleaningPolicy::FillDefault(sentinel)) => Some(sentinel.clone()),
        _ => None,
    };
    for record in table.records_mut().iter_mut() {
        normalize_date(record, date_sentinel.as_deref(), &mut report);
    }

    let drop_fields: Vec<Field> = policies
        .iter()
        .filter(|(_, policy)| matches!(policy, CleaningPolicy::DropRow))
        .map(|(field, _)| field)
        .collect();
    let mut dropped: BTreeMap<Field, usize> = BTreeMap::new();
    table.records_mut().retain(|record| {
        match drop_fields
            .iter()
            .copied()
            .find(|&field| record.get(field).is_none())
        {
            Some(field) => {
                *dropped.entry(field).or_default() += 1;
                false
            }
            None => true,
        }
    });
    report.dropped = dropped;
    report.rows_out = table.len();

    for record in table.records_mut().iter_mut() {
        apply_value_policies(record, policies, &mut report);
    }

    debug!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        unparseable_dates = report.unparseable_dates,
        "cleaning pass complete"
    );
    report
}

/// Parse the raw publish time once and store both the date and its ISO
/// rendering. Records with a date already set are left alone, which keeps
/// repeat cleaning from re-counting old failures.
fn normalize_date(record: &mut Record, fill_sentinel: Option<&str>, report: &mut CleanReport) {
    if record.publish_date.is_some() {
        return;
    }
    let Some(raw) = record.publish_time.take() else {
        return;
    };
    // A value equal to the fill sentinel was written by an earlier cleaning
    // pass, not read from the input; it is opaque text, not a date.
    if fill_sentinel == Some(raw.as_str()) {
        record.publish_time = Some(raw);
        return;
    }
    match parse_publish_date(&raw) {
        Some(date) => {
            record.publish_time = Some(date.format("%Y-%m-%d").to_string());
            record.publish_date = Some(date);
        }
        None => {
            report.unparseable_dates += 1;
        }
    }
}

fn apply_value_policies(record: &mut Record, policies: &PolicySet, report: &mut CleanReport) {
    for (field, policy) in policies.iter() {
        match policy {
            CleaningPolicy::FillDefault(sentinel) => {
                if record.get(field).is_none() {
                    record.set(field, Some(sentinel.clone()));
                    *report.filled.entry(field).or_default() += 1;
                }
            }
            CleaningPolicy::FlagMissing => {
                let present = record.get(field).is_some();
                let previous = record.flags.insert(field, present);
                if previous.is_none() && !present {
                    *report.flagged.entry(field).or_default() += 1;
                }
            }
            CleaningPolicy::DropRow => {}
        }
    }
}

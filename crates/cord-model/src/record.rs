use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};
use crate::field::Field;

/// One research-paper metadata row.
///
/// Known columns are stored as optional strings; an absent value is the
/// single missing marker regardless of how the input spelled it (empty
/// cell, `NaN`, `null`, ...). `publish_date`, `year`, `word_counts`, and
/// `flags` are never read from the input file: the cleaner and deriver
/// compute them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub publish_time: Option<String>,
    pub source: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    /// Parsed publication date, set by the cleaner.
    pub publish_date: Option<NaiveDate>,
    /// Unknown columns, preserved opaquely by header name.
    pub extra: BTreeMap<String, String>,
    /// Companion presence flags written by the keep-as-is-with-flag policy.
    pub flags: BTreeMap<Field, bool>,
    /// Derived: calendar year of the publication date.
    pub year: Option<i32>,
    /// Derived: whitespace-token counts for text fields.
    pub word_counts: BTreeMap<Field, usize>,
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Abstract => self.abstract_text.as_deref(),
            Field::Authors => self.authors.as_deref(),
            Field::Journal => self.journal.as_deref(),
            Field::PublishTime => self.publish_time.as_deref(),
            Field::Source => self.source.as_deref(),
            Field::Doi => self.doi.as_deref(),
            Field::Url => self.url.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Abstract => &mut self.abstract_text,
            Field::Authors => &mut self.authors,
            Field::Journal => &mut self.journal,
            Field::PublishTime => &mut self.publish_time,
            Field::Source => &mut self.source,
            Field::Doi => &mut self.doi,
            Field::Url => &mut self.url,
        };
        *slot = value;
    }

    /// Derived word count for a field, 0 when not derived or field empty.
    pub fn word_count(&self, field: Field) -> usize {
        self.word_counts.get(&field).copied().unwrap_or(0)
    }
}

/// The column layout of a loaded file.
///
/// Headers keep the original file order so an exported table matches the
/// input column-for-column. The schema is fixed at load time; cleaning and
/// derivation only ever change the row set and the derived record fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    headers: Vec<String>,
    positions: BTreeMap<Field, usize>,
}

impl Schema {
    /// Build a schema from a normalized header row.
    ///
    /// Fails with [`PipelineError::MissingColumn`] when a required column
    /// is absent. When a field has several accepted spellings the first
    /// occurrence in file order wins.
    pub fn from_headers(headers: Vec<String>) -> Result<Self> {
        let mut positions = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(field) = Field::from_header(header) {
                positions.entry(field).or_insert(index);
            }
        }
        for field in Field::ALL {
            if field.is_required() && !positions.contains_key(&field) {
                return Err(PipelineError::MissingColumn {
                    column: field.canonical_header().to_string(),
                });
            }
        }
        Ok(Schema { headers, positions })
    }

    /// Header names in original file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Column index of a known field, if the file carries it.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    /// The known field a column index resolves to, if any.
    pub fn field_at(&self, index: usize) -> Option<Field> {
        self.positions
            .iter()
            .find(|(_, position)| **position == index)
            .map(|(field, _)| *field)
    }
}

/// An ordered collection of records sharing one schema.
///
/// Insertion order is file order and is preserved through cleaning; the
/// aggregator relies on it for first-seen tie-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Table { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access to the row set. The schema stays fixed.
    pub fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Schema};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn schema_resolves_known_columns() {
        let schema =
            Schema::from_headers(headers(&["title", "publish_time", "source_x", "license"]))
                .expect("schema");
        assert_eq!(schema.position(Field::Title), Some(0));
        assert_eq!(schema.position(Field::Source), Some(2));
        assert_eq!(schema.field_at(3), None);
    }

    #[test]
    fn schema_requires_title_and_publish_time() {
        let error = Schema::from_headers(headers(&["title", "journal"])).unwrap_err();
        assert_eq!(error.to_string(), {
            "required column `publish_time` is missing from the header row"
        });
    }
}

use chrono::Datelike;

use cord_model::{Field, Table};

/// Text fields that get a derived word count.
pub const WORD_COUNT_FIELDS: [Field; 2] = [Field::Title, Field::Abstract];

/// Number of whitespace-delimited tokens in a text value.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Recompute the derived columns for every record: the publication year
/// and the word counts for [`WORD_COUNT_FIELDS`].
///
/// Derived values are overwritten wholesale on every call, so they are
/// always consistent with their source columns. Purely functional over
/// already-cleaned data; nothing here can fail.
pub fn derive_features(table: &mut Table) {
    for record in table.records_mut().iter_mut() {
        record.year = record.publish_date.map(|date| date.year());
        record.word_counts.clear();
        for field in WORD_COUNT_FIELDS {
            let count = record.get(field).map(word_count).unwrap_or(0);
            record.word_counts.insert(field, count);
        }
    }
}

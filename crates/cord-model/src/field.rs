use std::fmt;

use serde::Serialize;

/// The metadata columns the pipeline interprets.
///
/// Every other column in the input file is carried through opaquely and
/// never inspected. Each field accepts one or more header spellings; the
/// CORD-19 export names its source column `source_x`, so both `source` and
/// `source_x` resolve to [`Field::Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    Title,
    Abstract,
    Authors,
    Journal,
    PublishTime,
    Source,
    Doi,
    Url,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Abstract,
        Field::Authors,
        Field::Journal,
        Field::PublishTime,
        Field::Source,
        Field::Doi,
        Field::Url,
    ];

    /// Header spellings accepted for this field, compared case-insensitively.
    pub fn header_names(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["title"],
            Field::Abstract => &["abstract"],
            Field::Authors => &["authors"],
            Field::Journal => &["journal"],
            Field::PublishTime => &["publish_time"],
            Field::Source => &["source", "source_x"],
            Field::Doi => &["doi"],
            Field::Url => &["url"],
        }
    }

    /// The spelling used in error messages and the `columns` listing.
    pub fn canonical_header(self) -> &'static str {
        self.header_names()[0]
    }

    /// Whether the column must be present in the input header row.
    ///
    /// A missing required column is a fatal schema error; missing optional
    /// columns are treated as entirely-missing for every row.
    pub fn is_required(self) -> bool {
        matches!(self, Field::Title | Field::PublishTime)
    }

    /// Resolve a normalized header name to a field, if it names one.
    pub fn from_header(header: &str) -> Option<Field> {
        let lower = header.to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.header_names().contains(&lower.as_str()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_header())
    }
}
